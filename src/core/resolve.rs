use serde::{Deserialize, Serialize};

use crate::core::box_model::{EdgeSpec, Edges, resolve_edges};
use crate::core::length::{Length, measure};
use crate::error::ChartResult;

/// Flow axis for automatic sibling placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Row,
    #[default]
    Col,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Flow,
    Absolute,
}

/// Horizontal alignment. `Center` shifts the box by `+w/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignX {
    #[default]
    Start,
    Center,
}

/// Vertical alignment. `Middle` shifts the box by `-h/2`.
///
/// The asymmetry with [`AlignX::Center`] matches the established layout
/// contract and is relied on by existing trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignY {
    #[default]
    Start,
    Middle,
}

/// Declarative positional/sizing input for one box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSpec {
    pub x: Option<Length>,
    pub y: Option<Length>,
    pub x2: Option<Length>,
    pub y2: Option<Length>,
    pub w: Option<Length>,
    pub h: Option<Length>,
    pub margin: EdgeSpec,
    pub padding: EdgeSpec,
    pub position: Position,
    pub align_x: AlignX,
    pub align_y: AlignY,
}

/// Per-node flow cursor advanced as flowed children resolve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlowCursor {
    pub x_advance: f64,
    pub y_advance: f64,
}

/// Fully resolved box geometry in absolute surface pixels.
///
/// Valid only after the frame's top-down measure pass; recomputed every
/// frame and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub x2: f64,
    pub y2: f64,
    pub margin: Edges,
    pub padding: Edges,
    /// Marks the box as already expressed in absolute pixels, letting
    /// drawing helpers skip re-resolution.
    pub resolved: bool,
}

impl ResolvedBox {
    /// Builds a root box with no parent to inherit from.
    #[must_use]
    pub fn root(width: f64, height: f64, margin: Edges, padding: Edges) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: width,
            h: height,
            x2: width,
            y2: height,
            margin,
            padding,
            resolved: true,
        }
    }

    /// Builds an already-absolute box from raw pixel bounds.
    #[must_use]
    pub fn from_pixels(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            x2: x + w,
            y2: y + h,
            margin: Edges::default(),
            padding: Edges::default(),
            resolved: true,
        }
    }

    #[must_use]
    pub fn content_width(self) -> f64 {
        self.w - self.padding.horizontal()
    }

    #[must_use]
    pub fn content_height(self) -> f64 {
        self.h - self.padding.vertical()
    }
}

/// Geometry request for one box: a declarative spec to resolve against a
/// parent, or an already-resolved box in absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxRequest {
    Spec(BoxSpec),
    Resolved(ResolvedBox),
}

impl From<BoxSpec> for BoxRequest {
    fn from(spec: BoxSpec) -> Self {
        Self::Spec(spec)
    }
}

impl From<ResolvedBox> for BoxRequest {
    fn from(resolved: ResolvedBox) -> Self {
        Self::Resolved(resolved)
    }
}

/// Resolves one box against its parent's geometry and flow cursor.
///
/// This is the central measure algorithm. It runs once per node per frame,
/// strictly after the parent's own box has been resolved:
///
/// 1. raw `w`/`h` resolve against the parent's available space (full size
///    for absolute boxes, remaining flow space otherwise);
/// 2. an explicit `x`/`x2` (or `y`/`y2`) pair overrides the size as the
///    span between the two edges;
/// 3. margin/padding resolve against the box's own size;
/// 4. a lone `x2`/`y2` end-anchors the box against the parent's far edge;
/// 5. `x`/`y` resolve against the parent size;
/// 6. alignment shifts the position (`center` by `+w/2`, `middle` by `-h/2`);
/// 7. percentage-relative sizes carve their own margin out of the result;
/// 8. flowed boxes add the parent cursor plus own margin, then advance the
///    cursor by `size + gap` along the flow axis;
/// 9. the position is converted to absolute surface coordinates;
/// 10. the result is flagged `resolved` so feeding it back in is idempotent.
pub fn dims(
    request: &BoxRequest,
    parent: &ResolvedBox,
    flow: Flow,
    gap: f64,
    cursor: &mut FlowCursor,
) -> ChartResult<ResolvedBox> {
    let spec = match request {
        BoxRequest::Resolved(resolved) => return Ok(*resolved),
        BoxRequest::Spec(spec) => spec,
    };

    let absolute = spec.position == Position::Absolute;
    let avail_w = if absolute {
        parent.w
    } else {
        parent.w - cursor.x_advance
    };
    let avail_h = if absolute {
        parent.h
    } else {
        parent.h - cursor.y_advance
    };

    let w_len = spec.w.unwrap_or(Length::Percent(100.0));
    let h_len = spec.h.unwrap_or(Length::Percent(100.0));
    let mut w = measure(w_len, Some(avail_w))?;
    let mut h = measure(h_len, Some(avail_h))?;
    let mut w_percent = w_len.is_percent();
    let mut h_percent = h_len.is_percent();

    if let (Some(x), Some(x2)) = (spec.x, spec.x2) {
        w = measure(x2, Some(parent.w))? - measure(x, Some(parent.w))?;
        w_percent = false;
    }
    if let (Some(y), Some(y2)) = (spec.y, spec.y2) {
        h = measure(y2, Some(parent.h))? - measure(y, Some(parent.h))?;
        h_percent = false;
    }

    let margin = resolve_edges(spec.margin, w, h)?;
    let padding = resolve_edges(spec.padding, w, h)?;

    let mut x = match (spec.x, spec.x2) {
        (Some(x), _) => measure(x, Some(parent.w))?,
        (None, Some(x2)) => {
            measure(x2, Some(parent.w))? - w - margin.right - parent.padding.horizontal()
        }
        (None, None) => 0.0,
    };
    let mut y = match (spec.y, spec.y2) {
        (Some(y), _) => measure(y, Some(parent.h))?,
        (None, Some(y2)) => {
            measure(y2, Some(parent.h))? - h - margin.bottom - parent.padding.vertical()
        }
        (None, None) => 0.0,
    };

    if spec.align_x == AlignX::Center {
        x += w / 2.0;
    }
    if spec.align_y == AlignY::Middle {
        y -= h / 2.0;
    }

    if w_percent {
        w -= margin.horizontal();
    }
    if h_percent {
        h -= margin.vertical();
    }

    if !absolute {
        x += cursor.x_advance + margin.left;
        y += cursor.y_advance + margin.top;
        match flow {
            Flow::Row => cursor.x_advance += w + gap,
            Flow::Col => cursor.y_advance += h + gap,
        }
    }

    x += parent.x + parent.padding.left;
    y += parent.y + parent.padding.top;

    Ok(ResolvedBox {
        x,
        y,
        w,
        h,
        x2: x + w,
        y2: y + h,
        margin,
        padding,
        resolved: true,
    })
}
