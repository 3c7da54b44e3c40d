use serde::{Deserialize, Serialize};

use crate::core::length::{Length, measure};
use crate::error::ChartResult;

/// Resolved per-side pixel extents for margins and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

/// Margin/padding input: one uniform length or explicit per-side lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeSpec {
    Uniform(Length),
    PerSide {
        #[serde(default)]
        top: Option<Length>,
        #[serde(default)]
        right: Option<Length>,
        #[serde(default)]
        bottom: Option<Length>,
        #[serde(default)]
        left: Option<Length>,
    },
}

impl Default for EdgeSpec {
    fn default() -> Self {
        Self::Uniform(Length::Px(0.0))
    }
}

/// Resolves margin/padding sides against the owning box's size.
///
/// Horizontal sides resolve against the box's own width and vertical sides
/// against its own height, so percentage margins scale with the box itself
/// rather than with the parent.
pub fn resolve_edges(spec: EdgeSpec, own_width: f64, own_height: f64) -> ChartResult<Edges> {
    match spec {
        EdgeSpec::Uniform(length) => Ok(Edges {
            top: measure(length, Some(own_height))?,
            right: measure(length, Some(own_width))?,
            bottom: measure(length, Some(own_height))?,
            left: measure(length, Some(own_width))?,
        }),
        EdgeSpec::PerSide {
            top,
            right,
            bottom,
            left,
        } => {
            let side = |length: Option<Length>, reference: f64| match length {
                Some(length) => measure(length, Some(reference)),
                None => Ok(0.0),
            };
            Ok(Edges {
                top: side(top, own_height)?,
                right: side(right, own_width)?,
                bottom: side(bottom, own_height)?,
                left: side(left, own_width)?,
            })
        }
    }
}
