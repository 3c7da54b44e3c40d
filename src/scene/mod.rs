pub mod config;
pub mod images;
pub mod layer;
pub mod surface;
pub mod tree;

pub use config::{NodeConfig, NodeConfigPatch};
pub use images::{ImageCache, ImageHandle};
pub use layer::{
    Brush, CircleOpts, HeuristicTextMeasurer, ImageOpts, LineOpts, Painter, RectOpts, TextMeasurer,
    TextOpts,
};
pub use surface::{Element, ElementId, Scrollable, Surface};
pub use tree::{NodeHook, NodeId, SceneTree};
