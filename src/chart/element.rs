use std::any::Any;

use tracing::warn;

use crate::chart::axis::MarkerOpts;
use crate::chart::candles::{draw_candles, draw_readout, project_candles};
use crate::chart::layer::{ChartConfig, ChartConfigPatch, ChartLayer};
use crate::chart::x_axis::{XAxis, format_time};
use crate::chart::y_axis::{YAxis, format_value};
use crate::core::{BoxSpec, Length, OhlcPoint, PixelExtent, Position, ResolvedBox};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CursorState, PointerEvent, WheelEvent};
use crate::scene::surface::{Element, Scrollable};
use crate::scene::tree::{NodeId, SceneTree};
use crate::scene::{Brush, LineOpts, Painter};

/// Child node names the chart element expects under its own node.
pub const PLOT: &str = "plot";
pub const X_AXIS: &str = "x_axis";
pub const Y_AXIS: &str = "y_axis";
pub const READOUT: &str = "readout";

/// Candlestick chart element: composes the data layer, both axes and the
/// hover readout over the node subtree the widget scaffolds for it.
pub struct ChartElement {
    layer: ChartLayer,
    x_axis: XAxis,
    y_axis: YAxis,
    cursor: CursorState,
}

impl ChartElement {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        Ok(Self {
            layer: ChartLayer::new(config)?,
            x_axis: XAxis::default(),
            y_axis: YAxis::default(),
            cursor: CursorState::default(),
        })
    }

    #[must_use]
    pub fn layer(&self) -> &ChartLayer {
        &self.layer
    }

    #[must_use]
    pub fn x_axis(&self) -> &XAxis {
        &self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> &YAxis {
        &self.y_axis
    }

    pub fn set_points(&mut self, points: Vec<OhlcPoint>) -> ChartResult<()> {
        self.layer.set_points(points)
    }

    pub fn append(&mut self, point: OhlcPoint) -> ChartResult<()> {
        self.layer.append(point)
    }

    pub fn apply_config(&mut self, patch: &ChartConfigPatch) -> ChartResult<()> {
        self.layer.apply_config(patch)
    }

    fn child_box(tree: &SceneTree, node: NodeId, name: &str) -> ChartResult<ResolvedBox> {
        let id = tree
            .child(node, name)
            .ok_or_else(|| ChartError::UnknownNode(name.to_owned()))?;
        tree.geometry(id)
    }

    /// Plot-local cursor position, when the pointer is inside the plot.
    fn plot_cursor(&self, plot: ResolvedBox) -> Option<(f64, f64)> {
        if !self.cursor.visible {
            return None;
        }
        let x = self.cursor.x - plot.x;
        let y = self.cursor.y - plot.y;
        if x < 0.0 || x > plot.w || y < 0.0 || y > plot.h {
            return None;
        }
        Some((x, y))
    }

    fn draw_grid(
        &self,
        painter: &mut Painter<'_>,
        plot: ResolvedBox,
        config: &ChartConfig,
    ) -> ChartResult<()> {
        let mut brush = Brush::new(painter, plot);
        for tick in self.layer.x_scale.ticks() {
            brush.line(LineOpts::new(
                BoxSpec {
                    x: Some(Length::Px(tick.pos)),
                    x2: Some(Length::Px(tick.pos)),
                    y: Some(Length::Px(0.0)),
                    y2: Some(Length::Percent(100.0)),
                    position: Position::Absolute,
                    ..BoxSpec::default()
                },
                config.grid_color.clone(),
            ))?;
        }
        for tick in self.layer.y_scale.ticks() {
            brush.line(LineOpts::new(
                BoxSpec {
                    x: Some(Length::Px(0.0)),
                    x2: Some(Length::Percent(100.0)),
                    y: Some(Length::Px(tick.pos)),
                    y2: Some(Length::Px(tick.pos)),
                    position: Position::Absolute,
                    ..BoxSpec::default()
                },
                config.grid_color.clone(),
            ))?;
        }
        Ok(())
    }
}

impl Element for ChartElement {
    fn update(&mut self, tree: &SceneTree, node: NodeId) -> ChartResult<()> {
        let plot = Self::child_box(tree, node, PLOT)?;

        let mut extra_values = Vec::new();
        if self.layer.config().last_close_marker {
            if let Some(last) = self.layer.points().last() {
                extra_values.push(last.close);
            }
        }
        self.layer.update_window(plot, &extra_values)?;

        let cursor = self.plot_cursor(plot);
        let ticks = self.layer.x_scale.ticks();
        self.x_axis
            .track(self.layer.visible(), &ticks, cursor.map(|(x, _)| x));
        self.y_axis
            .track(&self.layer.y_scale, cursor.map(|(_, y)| y));
        Ok(())
    }

    fn draw(
        &mut self,
        tree: &SceneTree,
        node: NodeId,
        painter: &mut Painter<'_>,
    ) -> ChartResult<()> {
        let plot = Self::child_box(tree, node, PLOT)?;
        let x_strip = Self::child_box(tree, node, X_AXIS)?;
        let y_strip = Self::child_box(tree, node, Y_AXIS)?;
        let config = self.layer.config().clone();

        self.draw_grid(painter, plot, &config)?;

        let geometries =
            project_candles(self.layer.visible(), &self.layer.y_scale, config.body_width_px());
        draw_candles(painter, plot, &geometries, &config)?;

        // Axis strips span the whole surface edge, so their labels draw
        // through scales rebased from the plot extent onto the strip extent.
        let x_rebased = self.layer.x_scale.rebased(
            PixelExtent::new(plot.x, plot.x2),
            PixelExtent::new(x_strip.x, x_strip.x2),
        )?;
        self.x_axis
            .draw_labels(painter, x_strip, &x_rebased, &config)?;
        let y_rebased = self.layer.y_scale.rebased(
            PixelExtent::new(plot.y, plot.y2),
            PixelExtent::new(y_strip.y, y_strip.y2),
        )?;
        self.y_axis
            .draw_labels(painter, y_strip, &y_rebased, &config)?;

        if config.last_close_marker {
            if let Some(last) = self.layer.points().last() {
                let pos = self.layer.y_scale.to_pixels(last.close);
                self.y_axis.marker(
                    painter,
                    plot,
                    y_strip,
                    &self.layer.x_scale,
                    &config,
                    &format_value(last.close, config.precision),
                    pos,
                    &MarkerOpts {
                        line: true,
                        dot_at: None,
                        icon: config.marker_icon.clone(),
                    },
                )?;
            }
        }

        if let Some(snap) = self.x_axis.tracked {
            self.x_axis.marker(
                painter,
                plot,
                x_strip,
                &self.layer.y_scale,
                &config,
                &format_time(snap.point.time),
                snap.x,
                &MarkerOpts {
                    line: true,
                    dot_at: Some(snap.point.close),
                    icon: None,
                },
            )?;
        }
        if let Some(value) = self.y_axis.hovered_value {
            let pos = self.layer.y_scale.to_pixels(value);
            self.y_axis.marker(
                painter,
                plot,
                y_strip,
                &self.layer.x_scale,
                &config,
                &format_value(value, config.precision),
                pos,
                &MarkerOpts::default(),
            )?;
        }

        if let Some(snap) = self.x_axis.tracked {
            if let Some(panel_id) = tree.child(node, READOUT) {
                let panel = tree.geometry(panel_id)?;
                draw_readout(painter, panel, &snap.point, &config)?;
            }
        }
        Ok(())
    }

    fn as_scrollable(&mut self) -> Option<&mut dyn Scrollable> {
        Some(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Scrollable for ChartElement {
    fn pointer_move(&mut self, event: PointerEvent) {
        self.cursor.on_pointer_move(event);

        if let Some((dx, _)) = self.x_axis.drag.advance(event.x, event.y) {
            let delta = -dx * self.layer.x_scale.density();
            if let Err(err) = self.layer.x_scale.pan_by(delta) {
                warn!(error = %err, "skipping time-axis pan step");
            }
        }
        if let Some((_, dy)) = self.y_axis.drag.advance(event.x, event.y) {
            let delta = -dy * self.layer.y_scale.density();
            if let Err(err) = self.layer.y_scale.pan_by(delta) {
                warn!(error = %err, "skipping value-axis pan step");
            }
        }
    }

    fn pointer_down(&mut self, event: PointerEvent) {
        self.x_axis.drag.arm(event.x, event.y);
        self.y_axis.drag.arm(event.x, event.y);
    }

    fn pointer_up(&mut self, _event: PointerEvent) {
        self.x_axis.drag.disarm();
        self.y_axis.drag.disarm();
    }

    fn pointer_leave(&mut self) {
        self.x_axis.drag.disarm();
        self.y_axis.drag.disarm();
        self.cursor.on_pointer_leave();
    }

    fn wheel(&mut self, event: WheelEvent) {
        // Wheel input always pans: horizontal delta on the time axis,
        // vertical delta on the value axis.
        let x_delta = -event.dx * self.layer.x_scale.density();
        if let Err(err) = self.layer.x_scale.pan_by(x_delta) {
            warn!(error = %err, "skipping time-axis wheel pan");
        }
        let y_delta = -event.dy * self.layer.y_scale.density();
        if let Err(err) = self.layer.y_scale.pan_by(y_delta) {
            warn!(error = %err, "skipping value-axis wheel pan");
        }
    }
}
