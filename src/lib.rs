//! candlewick: retained-mode scene-graph layout with an OHLC charting widget.
//!
//! The crate provides a constraint-based box-model resolver, a small scene
//! tree with a two-phase update/render lifecycle, pannable/zoomable
//! domain-to-pixel scales, and a candlestick chart element built from those
//! parts.

pub mod api;
pub mod chart;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{ChartWidget, NodeKind, NodeSpec};
pub use error::{ChartError, ChartResult};
