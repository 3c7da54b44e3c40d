use crate::chart::layer::ChartConfig;
use crate::chart::x_axis::format_time;
use crate::chart::y_axis::format_value;
use crate::core::{
    BoxSpec, EdgeSpec, Length, OhlcPoint, Position, ResolvedBox, Scale, VisiblePoint,
};
use crate::error::ChartResult;
use crate::scene::{Brush, LineOpts, Painter, RectOpts, TextOpts};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

/// Projected candle geometry in plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGeometry {
    pub center_x: f64,
    pub body_left: f64,
    pub body_right: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_up: bool,
}

/// Projects visible points into deterministic candle geometry.
///
/// Pure so it can back both rendering and regression tests; the optional
/// parallel path keeps behavior identical while reducing wall-clock time on
/// large visible windows.
#[must_use]
pub fn project_candles(
    visible: &[VisiblePoint],
    value_scale: &Scale,
    body_width_px: f64,
) -> Vec<CandleGeometry> {
    #[cfg(feature = "parallel-projection")]
    {
        visible
            .par_iter()
            .map(|point| project_single_candle(*point, *value_scale, body_width_px))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        visible
            .iter()
            .map(|point| project_single_candle(*point, *value_scale, body_width_px))
            .collect()
    }
}

fn project_single_candle(
    visible: VisiblePoint,
    value_scale: Scale,
    body_width_px: f64,
) -> CandleGeometry {
    let half = body_width_px / 2.0;
    let open_y = value_scale.to_pixels(visible.point.open);
    let close_y = value_scale.to_pixels(visible.point.close);

    CandleGeometry {
        center_x: visible.x,
        body_left: visible.x - half,
        body_right: visible.x + half,
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_top: value_scale.to_pixels(visible.point.high),
        wick_bottom: value_scale.to_pixels(visible.point.low),
        is_up: visible.point.is_up(),
    }
}

/// Draws wick and body for each projected candle into the plot.
pub fn draw_candles(
    painter: &mut Painter<'_>,
    plot: ResolvedBox,
    geometries: &[CandleGeometry],
    config: &ChartConfig,
) -> ChartResult<()> {
    let mut brush = Brush::new(painter, plot);
    for geometry in geometries {
        let color = if geometry.is_up {
            config.up_color.clone()
        } else {
            config.down_color.clone()
        };

        brush.line(LineOpts::new(
            BoxSpec {
                x: Some(Length::Px(geometry.center_x)),
                x2: Some(Length::Px(geometry.center_x)),
                y: Some(Length::Px(geometry.wick_top)),
                y2: Some(Length::Px(geometry.wick_bottom)),
                position: Position::Absolute,
                ..BoxSpec::default()
            },
            color.clone(),
        ))?;

        brush.rect(RectOpts::new(
            BoxSpec {
                x: Some(Length::Px(geometry.body_left)),
                x2: Some(Length::Px(geometry.body_right)),
                y: Some(Length::Px(geometry.body_top)),
                y2: Some(Length::Px(geometry.body_bottom.max(geometry.body_top + 1.0))),
                position: Position::Absolute,
                ..BoxSpec::default()
            },
            color,
        ))?;
    }
    Ok(())
}

/// Draws the hover readout panel for the tracked point: open, high, low,
/// close, volume and the percent variation.
pub fn draw_readout(
    painter: &mut Painter<'_>,
    panel: ResolvedBox,
    point: &OhlcPoint,
    config: &ChartConfig,
) -> ChartResult<()> {
    let mut brush = Brush::new(painter, panel);
    brush.rect(RectOpts::new(panel, config.panel_color.clone()))?;

    let change_color = if point.is_up() {
        config.up_color.clone()
    } else {
        config.down_color.clone()
    };

    let mut rows = brush.col(
        BoxSpec {
            padding: EdgeSpec::Uniform(Length::Px(8.0)),
            ..BoxSpec::default()
        },
        2.0,
    )?;
    let precision = config.precision;
    let lines = [
        (format_time(point.time), None),
        (format!("O {}", format_value(point.open, precision)), None),
        (format!("H {}", format_value(point.high, precision)), None),
        (format!("L {}", format_value(point.low, precision)), None),
        (format!("C {}", format_value(point.close, precision)), None),
        (format!("V {}", format_value(point.volume, 0)), None),
        (
            format!("{:+.2}%", point.percent_change()),
            Some(change_color),
        ),
    ];
    for (content, color) in lines {
        let mut opts = TextOpts::new(content, BoxSpec::default());
        if let Some(color) = color {
            opts = opts.with_color(color);
        }
        rows.text(opts)?;
    }
    Ok(())
}
