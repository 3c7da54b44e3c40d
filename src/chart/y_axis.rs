use crate::chart::axis::MarkerOpts;
use crate::chart::layer::ChartConfig;
use crate::core::{BoxSpec, EdgeSpec, Length, Position, ResolvedBox, Scale};
use crate::error::ChartResult;
use crate::interaction::DragState;
use crate::render::TextHAlign;
use crate::scene::{Brush, CircleOpts, ImageOpts, LineOpts, Painter, TextOpts};

/// Value axis: tick labels, direct crosshair inverse-mapping and vertical
/// pan input.
#[derive(Debug, Default)]
pub struct YAxis {
    pub drag: DragState,
    /// Domain value under the cursor, from a direct inverse map.
    pub hovered_value: Option<f64>,
}

impl YAxis {
    /// Re-resolves the hovered value from a plot-local cursor position.
    pub fn track(&mut self, scale: &Scale, cursor_y: Option<f64>) {
        self.hovered_value = cursor_y.map(|y| scale.from_pixels(y));
    }

    /// Draws tick labels into the axis strip using a scale rebased onto the
    /// strip's extent.
    pub fn draw_labels(
        &self,
        painter: &mut Painter<'_>,
        strip: ResolvedBox,
        scale: &Scale,
        config: &ChartConfig,
    ) -> ChartResult<()> {
        let mut brush = Brush::new(painter, strip);
        for tick in scale.ticks() {
            let label = format_value(tick.val, config.precision);
            brush.text(
                TextOpts::new(
                    label,
                    BoxSpec {
                        x: Some(Length::Px(6.0)),
                        y: Some(Length::Px(tick.pos - 6.0)),
                        position: Position::Absolute,
                        ..BoxSpec::default()
                    },
                )
                .with_color(config.label_color.clone()),
            )?;
        }
        Ok(())
    }

    /// Draws one value-axis marker: an optional dashed horizontal line
    /// across the plot, an optional intersection dot against the time
    /// scale, an optional icon badge, and the formatted value label in the
    /// strip.
    #[allow(clippy::too_many_arguments)]
    pub fn marker(
        &self,
        painter: &mut Painter<'_>,
        plot: ResolvedBox,
        strip: ResolvedBox,
        time_scale: &Scale,
        config: &ChartConfig,
        label: &str,
        pos_px: f64,
        opts: &MarkerOpts,
    ) -> ChartResult<()> {
        let mut plot_brush = Brush::new(painter, plot);
        if opts.line {
            plot_brush.line(
                LineOpts::new(
                    BoxSpec {
                        x: Some(Length::Px(0.0)),
                        x2: Some(Length::Percent(100.0)),
                        y: Some(Length::Px(pos_px)),
                        y2: Some(Length::Px(pos_px)),
                        position: Position::Absolute,
                        ..BoxSpec::default()
                    },
                    config.crosshair_color.clone(),
                )
                .dashed(4.0, 4.0),
            )?;
        }
        if let Some(value) = opts.dot_at {
            let dot_x = time_scale.to_pixels(value);
            plot_brush.circle(
                CircleOpts::new(
                    BoxSpec {
                        x: Some(Length::Px(dot_x - 3.0)),
                        y: Some(Length::Px(pos_px - 3.0)),
                        w: Some(Length::Px(6.0)),
                        h: Some(Length::Px(6.0)),
                        position: Position::Absolute,
                        ..BoxSpec::default()
                    },
                    config.crosshair_color.clone(),
                ),
            )?;
        }

        let strip_pos = plot.y - strip.y + pos_px;
        let mut strip_brush = Brush::new(painter, strip);
        if let Some(icon) = &opts.icon {
            strip_brush.image(ImageOpts::new(
                icon.clone(),
                BoxSpec {
                    x: Some(Length::Px(2.0)),
                    y: Some(Length::Px(strip_pos - 14.0)),
                    w: Some(Length::Px(12.0)),
                    h: Some(Length::Px(12.0)),
                    position: Position::Absolute,
                    ..BoxSpec::default()
                },
            ))?;
        }
        strip_brush.text(
            TextOpts::new(
                label,
                BoxSpec {
                    x: Some(Length::Px(6.0)),
                    y: Some(Length::Px(strip_pos - 6.0)),
                    padding: EdgeSpec::Uniform(Length::Px(2.0)),
                    position: Position::Absolute,
                    ..BoxSpec::default()
                },
            )
            .with_color(config.label_color.clone())
            .aligned(TextHAlign::Left),
        )?;
        Ok(())
    }
}

/// Fixed-precision numeric label for the value axis.
#[must_use]
pub fn format_value(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}
