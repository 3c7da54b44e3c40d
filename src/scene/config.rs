use serde::{Deserialize, Serialize};

use crate::core::{AlignX, AlignY, BoxSpec, EdgeSpec, Flow, Length, Position};

/// Merged per-node configuration.
///
/// Positional and sizing fields accept numbers or percentage strings; the
/// remaining fields drive text defaults, child flow, and render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub name: String,
    /// Text color token or literal inherited by this node's labels.
    pub color: Option<String>,
    pub font_size: f64,
    pub flow: Flow,
    /// Inter-child gap in pixels along the flow axis.
    pub gap: f64,
    /// Draws the resolved box outline when set.
    pub debug: bool,
    /// Explicit child render order; unlisted children render afterwards in
    /// declaration order.
    pub order: Option<Vec<String>>,
    /// Arbitrary host data attached to the node.
    pub data: Option<serde_json::Value>,
    #[serde(flatten)]
    pub box_spec: BoxSpec,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: None,
            font_size: 12.0,
            flow: Flow::default(),
            gap: 0.0,
            debug: false,
            order: None,
            data: None,
            box_spec: BoxSpec::default(),
        }
    }
}

impl NodeConfig {
    /// Applies a partial update field-by-field, leaving absent fields
    /// untouched.
    pub fn apply(&mut self, patch: &NodeConfigPatch) {
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(flow) = patch.flow {
            self.flow = flow;
        }
        if let Some(gap) = patch.gap {
            self.gap = gap;
        }
        if let Some(debug) = patch.debug {
            self.debug = debug;
        }
        if let Some(order) = &patch.order {
            self.order = Some(order.clone());
        }
        if let Some(data) = &patch.data {
            self.data = Some(data.clone());
        }
        if let Some(x) = patch.x {
            self.box_spec.x = Some(x);
        }
        if let Some(y) = patch.y {
            self.box_spec.y = Some(y);
        }
        if let Some(x2) = patch.x2 {
            self.box_spec.x2 = Some(x2);
        }
        if let Some(y2) = patch.y2 {
            self.box_spec.y2 = Some(y2);
        }
        if let Some(w) = patch.w {
            self.box_spec.w = Some(w);
        }
        if let Some(h) = patch.h {
            self.box_spec.h = Some(h);
        }
        if let Some(margin) = patch.margin {
            self.box_spec.margin = margin;
        }
        if let Some(padding) = patch.padding {
            self.box_spec.padding = padding;
        }
        if let Some(position) = patch.position {
            self.box_spec.position = position;
        }
        if let Some(align_x) = patch.align_x {
            self.box_spec.align_x = align_x;
        }
        if let Some(align_y) = patch.align_y {
            self.box_spec.align_y = align_y;
        }
    }

    #[must_use]
    pub fn merged(mut self, patch: &NodeConfigPatch) -> Self {
        self.apply(patch);
        self
    }
}

/// Partial node configuration used at construction and for in-place option
/// updates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfigPatch {
    pub color: Option<String>,
    pub font_size: Option<f64>,
    pub flow: Option<Flow>,
    pub gap: Option<f64>,
    pub debug: Option<bool>,
    pub order: Option<Vec<String>>,
    pub data: Option<serde_json::Value>,
    pub x: Option<Length>,
    pub y: Option<Length>,
    pub x2: Option<Length>,
    pub y2: Option<Length>,
    pub w: Option<Length>,
    pub h: Option<Length>,
    pub margin: Option<EdgeSpec>,
    pub padding: Option<EdgeSpec>,
    pub position: Option<Position>,
    pub align_x: Option<AlignX>,
    pub align_y: Option<AlignY>,
}
