use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Domain kind for one scale axis.
///
/// `Time` maps left-to-right; `Value` is a vertical axis and maps
/// bottom-to-top (inverted pixel direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    Time,
    Value,
}

/// Pan/zoom state, kept separate from the scale so input handling can be a
/// pure state transition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    /// Zoom delta applied symmetrically around the window center.
    pub zoom: f64,
    /// Pan offset in domain units.
    pub offset: f64,
    pub offset_min: f64,
    pub offset_max: f64,
}

impl ScrollState {
    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("zoom", self.zoom),
            ("offset", self.offset),
            ("offset_min", self.offset_min),
            ("offset_max", self.offset_max),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "scroll `{name}` must be finite"
                )));
            }
        }
        if self.offset_min > self.offset_max {
            return Err(ChartError::InvalidData(
                "scroll offset_min must be <= offset_max".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Applies one pan delta to scroll state, clamping the offset to
/// `[offset_min, offset_max]`.
pub fn apply_scroll(state: ScrollState, delta: f64) -> ChartResult<ScrollState> {
    if !delta.is_finite() {
        return Err(ChartError::InvalidData(
            "scroll delta must be finite".to_owned(),
        ));
    }
    state.validate()?;
    Ok(ScrollState {
        offset: (state.offset + delta).clamp(state.offset_min, state.offset_max),
        ..state
    })
}

/// One generated axis tick: domain value plus its pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub val: f64,
    pub pos: f64,
}

/// Pixel extent of one layer along a scale's axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelExtent {
    pub start: f64,
    pub end: f64,
}

impl PixelExtent {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.end - self.start
    }
}

/// Partial state merge for [`Scale::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalePatch {
    pub base_min: Option<f64>,
    pub base_max: Option<f64>,
    pub zoom: Option<f64>,
    pub offset: Option<f64>,
    pub offset_min: Option<f64>,
    pub offset_max: Option<f64>,
    pub space_px: Option<f64>,
}

/// A 1-D mapping between a domain range (time or price) and a pixel range,
/// with pan/zoom state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    kind: ScaleKind,
    base_min: f64,
    base_max: f64,
    scroll: ScrollState,
    space_px: f64,
    min: f64,
    max: f64,
    /// Fixed tick step for time scales.
    time_step: f64,
    /// Minimum label rows per 100 px for value scales.
    rows_per_100px: f64,
}

impl Scale {
    #[must_use]
    pub fn new(kind: ScaleKind) -> Self {
        Self {
            kind,
            base_min: 0.0,
            base_max: 1.0,
            scroll: ScrollState::default(),
            space_px: 1.0,
            min: 0.0,
            max: 1.0,
            time_step: 10.0,
            rows_per_100px: 2.0,
        }
    }

    #[must_use]
    pub fn kind(self) -> ScaleKind {
        self.kind
    }

    /// Visible domain bounds, valid after the last `update`.
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn scroll(self) -> ScrollState {
        self.scroll
    }

    #[must_use]
    pub fn space_px(self) -> f64 {
        self.space_px
    }

    #[must_use]
    pub fn time_step(self) -> f64 {
        self.time_step
    }

    pub fn set_time_step(&mut self, step: f64) -> ChartResult<()> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ChartError::InvalidData(
                "time step must be finite and > 0".to_owned(),
            ));
        }
        self.time_step = step;
        Ok(())
    }

    pub fn set_rows_per_100px(&mut self, rows: f64) -> ChartResult<()> {
        if !rows.is_finite() || rows <= 0.0 {
            return Err(ChartError::InvalidData(
                "rows per 100px must be finite and > 0".to_owned(),
            ));
        }
        self.rows_per_100px = rows;
        Ok(())
    }

    /// Merges partial state and recomputes the visible domain window:
    /// `min = base_min + offset - zoom/2`, `max = base_max + offset + zoom/2`.
    ///
    /// Fails when the merged state would violate `min < max`.
    pub fn update(&mut self, patch: ScalePatch) -> ChartResult<()> {
        let mut scroll = self.scroll;
        if let Some(zoom) = patch.zoom {
            scroll.zoom = zoom;
        }
        if let Some(offset) = patch.offset {
            scroll.offset = offset;
        }
        if let Some(offset_min) = patch.offset_min {
            scroll.offset_min = offset_min;
        }
        if let Some(offset_max) = patch.offset_max {
            scroll.offset_max = offset_max;
        }
        scroll.validate()?;

        let base_min = patch.base_min.unwrap_or(self.base_min);
        let base_max = patch.base_max.unwrap_or(self.base_max);
        let space_px = patch.space_px.unwrap_or(self.space_px);
        if !base_min.is_finite() || !base_max.is_finite() {
            return Err(ChartError::InvalidData(
                "scale base bounds must be finite".to_owned(),
            ));
        }
        if !space_px.is_finite() || space_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "scale pixel space must be finite and > 0".to_owned(),
            ));
        }

        let min = base_min + scroll.offset - scroll.zoom / 2.0;
        let max = base_max + scroll.offset + scroll.zoom / 2.0;
        if min >= max {
            return Err(ChartError::InvalidData(
                "scale window must satisfy min < max".to_owned(),
            ));
        }

        self.base_min = base_min;
        self.base_max = base_max;
        self.scroll = scroll;
        self.space_px = space_px;
        self.min = min;
        self.max = max;
        Ok(())
    }

    /// Applies one pan delta through [`apply_scroll`] and recomputes bounds.
    pub fn pan_by(&mut self, delta: f64) -> ChartResult<()> {
        self.scroll = apply_scroll(self.scroll, delta)?;
        self.update(ScalePatch::default())
    }

    /// Domain units per pixel for the current window.
    #[must_use]
    pub fn density(self) -> f64 {
        (self.max - self.min) / self.space_px
    }

    /// Tick spacing in domain units.
    ///
    /// Time scales use a fixed step. Value scales derive the step from the
    /// available pixel space and the minimum rows-per-100px target, rounded
    /// up to the next integer multiple.
    #[must_use]
    pub fn step(self) -> f64 {
        match self.kind {
            ScaleKind::Time => self.time_step,
            ScaleKind::Value => {
                let rows = (self.space_px * self.rows_per_100px / 100.0).max(1.0);
                ((self.max - self.min) / rows).ceil().max(1.0)
            }
        }
    }

    /// Maps a domain value to a pixel position within the scale's space.
    ///
    /// Value scales invert so larger values sit higher on screen.
    #[must_use]
    pub fn to_pixels(self, value: f64) -> f64 {
        let mut pct = (value - self.min) / (self.max - self.min);
        if self.kind == ScaleKind::Value {
            pct = 1.0 - pct;
        }
        pct * self.space_px
    }

    /// Maps a pixel position back into the domain.
    ///
    /// The vertical inversion is applied here for both scale kinds, while
    /// `to_pixels` only inverts for value scales, so X-axis round trips come
    /// back mirrored. Pinned by test; not corrected until the interaction
    /// model settles.
    #[must_use]
    pub fn from_pixels(self, pixels: f64) -> f64 {
        let pct = pixels / self.space_px;
        self.min + (1.0 - pct) * (self.max - self.min)
    }

    /// Generates ticks from the window min rounded outward to a multiple of
    /// the step, up to the window max.
    #[must_use]
    pub fn ticks(self) -> Vec<Tick> {
        let step = self.step();
        let mut out = Vec::new();
        if !step.is_finite() || step <= 0.0 {
            return out;
        }
        let mut val = (self.min / step).ceil() * step;
        while val <= self.max {
            out.push(Tick {
                val,
                pos: self.to_pixels(val),
            });
            val += step;
        }
        out
    }

    /// Re-expresses this scale, computed against `reference`, onto a larger
    /// `target` extent while preserving the absolute domain-to-pixel
    /// correspondence at the shared boundary.
    ///
    /// Fails when the target extent is smaller than the reference on either
    /// edge.
    pub fn rebased(&self, reference: PixelExtent, target: PixelExtent) -> ChartResult<Scale> {
        if reference.length() <= 0.0 || target.length() <= 0.0 {
            return Err(ChartError::InvalidData(
                "rebase extents must have positive length".to_owned(),
            ));
        }
        if target.start > reference.start {
            return Err(ChartError::RebaseTargetSmaller { edge: "start" });
        }
        if target.end < reference.end {
            return Err(ChartError::RebaseTargetSmaller { edge: "end" });
        }

        let density = (self.max - self.min) / reference.length();
        let lead = (reference.start - target.start) * density;
        let trail = (target.end - reference.end) * density;

        let mut rebased = *self;
        match self.kind {
            ScaleKind::Time => {
                rebased.min -= lead;
                rebased.max += trail;
            }
            // The start edge of a vertical extent is the top of the screen,
            // which carries the domain max.
            ScaleKind::Value => {
                rebased.max += lead;
                rebased.min -= trail;
            }
        }
        rebased.space_px = target.length();
        Ok(rebased)
    }
}
