use chrono::DateTime;

use crate::chart::axis::{MarkerOpts, bracketing_ticks, nearest_visible_point};
use crate::chart::layer::ChartConfig;
use crate::core::{
    BoxSpec, EdgeSpec, Length, OhlcPoint, Position, ResolvedBox, Scale, Tick, VisiblePoint,
};
use crate::error::ChartResult;
use crate::interaction::DragState;
use crate::render::TextHAlign;
use crate::scene::{Brush, CircleOpts, ImageOpts, LineOpts, Painter, TextOpts};

/// Nearest-point crosshair candidate tracked by the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrosshairSnap {
    pub index: usize,
    /// Plot-local pixel position of the snapped point.
    pub x: f64,
    pub point: OhlcPoint,
}

/// Time axis: tick labels, crosshair tracking and horizontal pan input.
#[derive(Debug, Default)]
pub struct XAxis {
    pub drag: DragState,
    pub tracked: Option<CrosshairSnap>,
    pub hovered_interval: Option<(Tick, Tick)>,
}

impl XAxis {
    /// Re-resolves the crosshair against this frame's visible points.
    ///
    /// `cursor_x` is plot-local; `None` clears the tracked state.
    pub fn track(&mut self, visible: &[VisiblePoint], ticks: &[Tick], cursor_x: Option<f64>) {
        let Some(cursor_x) = cursor_x else {
            self.tracked = None;
            self.hovered_interval = None;
            return;
        };
        self.tracked = nearest_visible_point(visible, cursor_x).map(|index| CrosshairSnap {
            index,
            x: visible[index].x,
            point: visible[index].point,
        });
        self.hovered_interval = bracketing_ticks(ticks, cursor_x);
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
            let label = format_time(tick.val);
            brush.text(
                TextOpts::new(
                    label,
                    BoxSpec {
                        x: Some(Length::Px(tick.pos)),
                        y: Some(Length::Px(4.0)),
                        position: Position::Absolute,
                        ..BoxSpec::default()
                    },
                )
                .with_color(config.label_color.clone())
                .aligned(TextHAlign::Center),
            )?;
        }
        Ok(())
    }

    /// Draws one time-axis marker: an optional dashed vertical line across
    /// the plot, an optional intersection dot against the value scale, an
    /// optional icon badge, and the formatted time label in the strip.
    #[allow(clippy::too_many_arguments)]
    pub fn marker(
        &self,
        painter: &mut Painter<'_>,
        plot: ResolvedBox,
        strip: ResolvedBox,
        value_scale: &Scale,
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
                        x: Some(Length::Px(pos_px)),
                        x2: Some(Length::Px(pos_px)),
                        y: Some(Length::Px(0.0)),
                        y2: Some(Length::Percent(100.0)),
                        position: Position::Absolute,
                        ..BoxSpec::default()
                    },
                    config.crosshair_color.clone(),
                )
                .dashed(4.0, 4.0),
            )?;
        }
        if let Some(value) = opts.dot_at {
            let dot_y = value_scale.to_pixels(value);
            plot_brush.circle(
                CircleOpts::new(
                    BoxSpec {
                        x: Some(Length::Px(pos_px - 3.0)),
                        y: Some(Length::Px(dot_y - 3.0)),
                        w: Some(Length::Px(6.0)),
                        h: Some(Length::Px(6.0)),
                        position: Position::Absolute,
                        ..BoxSpec::default()
                    },
                    config.crosshair_color.clone(),
                ),
            )?;
        }

        let strip_pos = plot.x - strip.x + pos_px;
        let mut strip_brush = Brush::new(painter, strip);
        if let Some(icon) = &opts.icon {
            strip_brush.image(ImageOpts::new(
                icon.clone(),
                BoxSpec {
                    x: Some(Length::Px(strip_pos - 18.0)),
                    y: Some(Length::Px(4.0)),
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
                    x: Some(Length::Px(strip_pos)),
                    y: Some(Length::Px(4.0)),
                    padding: EdgeSpec::Uniform(Length::Px(2.0)),
                    position: Position::Absolute,
                    ..BoxSpec::default()
                },
            )
            .with_color(config.label_color.clone())
            .aligned(TextHAlign::Center),
        )?;
        Ok(())
    }
}

/// Formats a unix-seconds value as `HH:MM` UTC.
#[must_use]
pub fn format_time(value: f64) -> String {
    if !value.is_finite() {
        return "--:--".to_owned();
    }
    match DateTime::from_timestamp(value as i64, 0) {
        Some(time) => time.format("%H:%M").to_string(),
        None => "--:--".to_owned(),
    }
}
