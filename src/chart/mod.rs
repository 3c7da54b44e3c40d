pub mod axis;
pub mod candles;
pub mod element;
pub mod layer;
pub mod x_axis;
pub mod y_axis;

pub use axis::{MarkerOpts, bracketing_ticks, nearest_visible_point};
pub use candles::{CandleGeometry, project_candles};
pub use element::ChartElement;
pub use layer::{ChartConfig, ChartConfigPatch, ChartLayer};
pub use x_axis::{CrosshairSnap, XAxis};
pub use y_axis::YAxis;
