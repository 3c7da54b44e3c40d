pub mod box_model;
pub mod data;
pub mod length;
pub mod resolve;
pub mod scale;

pub use box_model::{EdgeSpec, Edges, resolve_edges};
pub use data::{OhlcPoint, VisiblePoint, points_in_window};
pub use length::{Length, measure};
pub use resolve::{
    AlignX, AlignY, BoxRequest, BoxSpec, Flow, FlowCursor, Position, ResolvedBox, dims,
};
pub use scale::{PixelExtent, Scale, ScaleKind, ScalePatch, ScrollState, Tick, apply_scroll};
