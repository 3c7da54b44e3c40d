use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    OhlcPoint, ResolvedBox, Scale, ScaleKind, ScalePatch, VisiblePoint, apply_scroll,
    points_in_window,
};
use crate::error::{ChartError, ChartResult};

/// Chart tuning and candlestick palette.
///
/// Colors are theme tokens or hex literals, resolved at draw time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Horizontal pixels reserved per data point.
    pub point_spacing_px: f64,
    /// Time units between consecutive points.
    pub interval: f64,
    /// Share of the window duration pannable into empty future space.
    pub future_ratio: f64,
    /// Fixed tick step of the time axis, in time units.
    pub time_step: f64,
    /// Minimum label rows per 100 px on the value axis.
    pub rows_per_100px: f64,
    /// Decimal places for value labels.
    pub precision: usize,
    /// Body gutter on each side of a candle, as a share of point spacing.
    pub gutter_ratio: f64,
    /// Dashed marker pinned at the latest close.
    pub last_close_marker: bool,
    /// Optional icon badge next to the latest-close label.
    pub marker_icon: Option<String>,
    pub up_color: String,
    pub down_color: String,
    pub grid_color: String,
    pub label_color: String,
    pub crosshair_color: String,
    pub panel_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            point_spacing_px: 10.0,
            interval: 60.0,
            future_ratio: 0.33,
            time_step: 600.0,
            rows_per_100px: 2.0,
            precision: 2,
            gutter_ratio: 0.15,
            last_close_marker: true,
            marker_icon: None,
            up_color: "--up".to_owned(),
            down_color: "--down".to_owned(),
            grid_color: "--grid".to_owned(),
            label_color: "--label".to_owned(),
            crosshair_color: "--crosshair".to_owned(),
            panel_color: "--panel".to_owned(),
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("point_spacing_px", self.point_spacing_px),
            ("interval", self.interval),
            ("time_step", self.time_step),
            ("rows_per_100px", self.rows_per_100px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "chart `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.future_ratio.is_finite() || self.future_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "chart `future_ratio` must be finite and >= 0".to_owned(),
            ));
        }
        if !self.gutter_ratio.is_finite() || !(0.0..0.5).contains(&self.gutter_ratio) {
            return Err(ChartError::InvalidData(
                "chart `gutter_ratio` must be in [0, 0.5)".to_owned(),
            ));
        }
        Ok(())
    }

    /// Candle body width for the configured spacing and gutter.
    #[must_use]
    pub fn body_width_px(&self) -> f64 {
        self.point_spacing_px * (1.0 - 2.0 * self.gutter_ratio)
    }
}

/// Partial chart configuration for construction and in-place updates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfigPatch {
    pub point_spacing_px: Option<f64>,
    pub interval: Option<f64>,
    pub future_ratio: Option<f64>,
    pub time_step: Option<f64>,
    pub rows_per_100px: Option<f64>,
    pub precision: Option<usize>,
    pub gutter_ratio: Option<f64>,
    pub last_close_marker: Option<bool>,
    pub marker_icon: Option<String>,
    pub up_color: Option<String>,
    pub down_color: Option<String>,
    pub grid_color: Option<String>,
    pub label_color: Option<String>,
    pub crosshair_color: Option<String>,
    pub panel_color: Option<String>,
}

impl ChartConfig {
    pub fn apply(&mut self, patch: &ChartConfigPatch) {
        if let Some(value) = patch.point_spacing_px {
            self.point_spacing_px = value;
        }
        if let Some(value) = patch.interval {
            self.interval = value;
        }
        if let Some(value) = patch.future_ratio {
            self.future_ratio = value;
        }
        if let Some(value) = patch.time_step {
            self.time_step = value;
        }
        if let Some(value) = patch.rows_per_100px {
            self.rows_per_100px = value;
        }
        if let Some(value) = patch.precision {
            self.precision = value;
        }
        if let Some(value) = patch.gutter_ratio {
            self.gutter_ratio = value;
        }
        if let Some(value) = patch.last_close_marker {
            self.last_close_marker = value;
        }
        if let Some(value) = &patch.marker_icon {
            self.marker_icon = Some(value.clone());
        }
        if let Some(value) = &patch.up_color {
            self.up_color = value.clone();
        }
        if let Some(value) = &patch.down_color {
            self.down_color = value.clone();
        }
        if let Some(value) = &patch.grid_color {
            self.grid_color = value.clone();
        }
        if let Some(value) = &patch.label_color {
            self.label_color = value.clone();
        }
        if let Some(value) = &patch.crosshair_color {
            self.crosshair_color = value.clone();
        }
        if let Some(value) = &patch.panel_color {
            self.panel_color = value.clone();
        }
    }
}

/// OHLC dataset plus the scales deriving its visible window.
///
/// The visible-point list is always a filtered+mapped derivative of the
/// full dataset, recomputed by [`ChartLayer::update_window`] each frame.
#[derive(Debug, Clone)]
pub struct ChartLayer {
    config: ChartConfig,
    points: Vec<OhlcPoint>,
    pub x_scale: Scale,
    pub y_scale: Scale,
    visible: Vec<VisiblePoint>,
    window_ready: bool,
}

impl ChartLayer {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let mut x_scale = Scale::new(ScaleKind::Time);
        x_scale.set_time_step(config.time_step)?;
        let mut y_scale = Scale::new(ScaleKind::Value);
        y_scale.set_rows_per_100px(config.rows_per_100px)?;
        Ok(Self {
            config,
            points: Vec::new(),
            x_scale,
            y_scale,
            visible: Vec::new(),
            window_ready: false,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn apply_config(&mut self, patch: &ChartConfigPatch) -> ChartResult<()> {
        let mut merged = self.config.clone();
        merged.apply(patch);
        merged.validate()?;
        self.x_scale.set_time_step(merged.time_step)?;
        self.y_scale.set_rows_per_100px(merged.rows_per_100px)?;
        self.config = merged;
        Ok(())
    }

    #[must_use]
    pub fn points(&self) -> &[OhlcPoint] {
        &self.points
    }

    #[must_use]
    pub fn visible(&self) -> &[VisiblePoint] {
        &self.visible
    }

    /// Replaces the dataset, canonicalizing to ascending unique times
    /// (later samples win).
    pub fn set_points(&mut self, mut points: Vec<OhlcPoint>) -> ChartResult<()> {
        let original_count = points.len();
        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        points.reverse();
        points.dedup_by(|a, b| a.time == b.time);
        points.reverse();
        debug!(
            original_count,
            canonical_count = points.len(),
            "set chart points"
        );
        self.points = points;
        self.window_ready = false;
        Ok(())
    }

    /// Realtime-update semantics: appends a newer sample, replaces the
    /// latest on equal time, rejects out-of-order input.
    pub fn append(&mut self, point: OhlcPoint) -> ChartResult<()> {
        match self.points.last() {
            Some(last) if point.time < last.time => {
                return Err(ChartError::InvalidData(
                    "appended sample is older than the latest sample".to_owned(),
                ));
            }
            Some(last) if point.time == last.time => {
                let index = self.points.len() - 1;
                self.points[index] = point;
            }
            _ => self.points.push(point),
        }
        trace!(count = self.points.len(), "append chart point");
        Ok(())
    }

    /// Derives the visible window for this frame.
    ///
    /// While the window is uninitialized or still pinned to the latest data
    /// (`offset == offset_max`), the window is recomputed to show the last
    /// N points that fill the plot width, with pan clamps anchoring the
    /// dataset start and a configurable slice of empty future space.
    /// Otherwise the existing pan/zoom state is re-applied unchanged.
    ///
    /// `extra_values` are always-visible value-axis anchors (marker values)
    /// included in the derived value bounds.
    pub fn update_window(&mut self, plot: ResolvedBox, extra_values: &[f64]) -> ChartResult<()> {
        if self.points.is_empty() || plot.w <= 0.0 || plot.h <= 0.0 {
            self.visible.clear();
            return Ok(());
        }

        let spacing = self.config.point_spacing_px;
        let interval = self.config.interval;
        let visible_count = (plot.w / spacing).floor().max(1.0);
        let window_duration = visible_count * interval;

        let scroll = self.x_scale.scroll();
        let pinned = !self.window_ready || scroll.offset == scroll.offset_max;
        if pinned {
            let last_time = self.points[self.points.len() - 1].time;
            let offset_max = self.config.future_ratio * window_duration;
            let base_max = last_time - offset_max;
            let base_min = base_max - window_duration;
            let offset_min = (-base_min).min(offset_max);
            self.x_scale.update(ScalePatch {
                base_min: Some(base_min),
                base_max: Some(base_max),
                offset: Some(offset_max),
                offset_min: Some(offset_min),
                offset_max: Some(offset_max),
                space_px: Some(plot.w),
                zoom: None,
            })?;
            self.window_ready = true;
        } else {
            self.x_scale.update(ScalePatch {
                space_px: Some(plot.w),
                ..ScalePatch::default()
            })?;
        }

        let (window_min, window_max) = self.x_scale.bounds();
        self.visible = points_in_window(&self.points, window_min, window_max)
            .into_iter()
            .map(|point| VisiblePoint {
                point,
                x: self.x_scale.to_pixels(point.time),
            })
            .collect();

        self.update_value_bounds(plot, extra_values)
    }

    fn update_value_bounds(&mut self, plot: ResolvedBox, extra_values: &[f64]) -> ChartResult<()> {
        let mut low = f64::INFINITY;
        let mut high = f64::NEG_INFINITY;
        for visible in &self.visible {
            low = low.min(visible.point.low);
            high = high.max(visible.point.high);
        }
        for value in extra_values {
            low = low.min(*value);
            high = high.max(*value);
        }
        if !low.is_finite() || !high.is_finite() {
            return Ok(());
        }
        if low == high {
            low -= 0.5;
            high += 0.5;
        }

        // Value panning stays clamped to half the derived span on either
        // side; the offset survives across frames and re-clamps when the
        // bounds tighten.
        let half_span = (high - low) / 2.0;
        let mut scroll = self.y_scale.scroll();
        scroll.offset_min = -half_span;
        scroll.offset_max = half_span;
        scroll = apply_scroll(scroll, 0.0)?;
        self.y_scale.update(ScalePatch {
            base_min: Some(low),
            base_max: Some(high),
            offset: Some(scroll.offset),
            offset_min: Some(scroll.offset_min),
            offset_max: Some(scroll.offset_max),
            space_px: Some(plot.h),
            zoom: None,
        })?;
        Ok(())
    }
}
