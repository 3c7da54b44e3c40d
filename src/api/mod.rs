//! Widget facade: declarative mount, in-place option updates, event entry
//! points.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::element::{PLOT, READOUT, X_AXIS, Y_AXIS};
use crate::chart::{ChartConfig, ChartConfigPatch, ChartElement};
use crate::core::{EdgeSpec, Length, OhlcPoint, Position};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{EventKind, InputEvent};
use crate::render::{RenderFrame, Renderer, Theme};
use crate::scene::tree::{NodeId, SceneTree};
use crate::scene::{ElementId, ImageHandle, NodeConfig, NodeConfigPatch, Surface};

/// Node kinds a declarative tree can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Layer,
    Chart,
}

/// One `(kind, options, children)` triple of the declarative construction
/// tree, consumed once at mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub kind: NodeKind,
    #[serde(default)]
    pub options: NodeConfigPatch,
    #[serde(default)]
    pub chart: Option<ChartConfigPatch>,
    #[serde(default)]
    pub children: IndexMap<String, NodeSpec>,
}

impl NodeSpec {
    #[must_use]
    pub fn layer() -> Self {
        Self {
            kind: NodeKind::Layer,
            options: NodeConfigPatch::default(),
            chart: None,
            children: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn chart() -> Self {
        Self {
            kind: NodeKind::Chart,
            ..Self::layer()
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: NodeConfigPatch) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_chart_options(mut self, chart: ChartConfigPatch) -> Self {
        self.chart = Some(chart);
        self
    }

    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, child: NodeSpec) -> Self {
        self.children.insert(name.into(), child);
        self
    }

    pub fn from_json(raw: &str) -> ChartResult<Self> {
        serde_json::from_str(raw)
            .map_err(|err| ChartError::InvalidData(format!("invalid node spec: {err}")))
    }

    /// Standard single-chart widget tree: one chart node under the root.
    #[must_use]
    pub fn candlestick() -> Self {
        Self::layer().with_child("chart", Self::chart())
    }
}

/// Interactive OHLC charting widget over one scene surface and renderer.
///
/// The tree is built once at mount and only reconfigured afterwards; every
/// entry point runs one synchronous update+render pass and hands the frame
/// to the renderer.
pub struct ChartWidget<R: Renderer> {
    surface: Surface,
    renderer: R,
    chart_element: Option<ElementId>,
}

impl<R: Renderer> ChartWidget<R> {
    pub fn mount(spec: &NodeSpec, renderer: R, theme: Theme) -> ChartResult<Self> {
        if spec.kind != NodeKind::Layer {
            return Err(ChartError::InvalidData(
                "the root spec must be a layer".to_owned(),
            ));
        }

        let root_config = NodeConfig::default().merged(&spec.options);
        let mut widget = Self {
            surface: Surface::new(root_config, theme),
            renderer,
            chart_element: None,
        };
        let root = widget.surface.tree().root();
        for (name, child) in &spec.children {
            widget.build_node(root, name, child)?;
        }
        debug!(has_chart = widget.chart_element.is_some(), "widget mounted");
        Ok(widget)
    }

    fn build_node(&mut self, parent: NodeId, name: &str, spec: &NodeSpec) -> ChartResult<NodeId> {
        let config = NodeConfig::default().merged(&spec.options);
        let id = self.surface.tree_mut().add_child(parent, name, config)?;

        if spec.kind == NodeKind::Chart {
            let mut chart_config = ChartConfig::default();
            if let Some(patch) = &spec.chart {
                chart_config.apply(patch);
            }
            let element = ChartElement::new(chart_config)?;
            let element_id = self.surface.add_element(id, Box::new(element));
            for kind in [
                EventKind::PointerMove,
                EventKind::PointerDown,
                EventKind::PointerUp,
                EventKind::PointerLeave,
                EventKind::Wheel,
            ] {
                self.surface.listen(kind, element_id);
            }
            if self.chart_element.is_none() {
                self.chart_element = Some(element_id);
            }
        }

        for (child_name, child_spec) in &spec.children {
            self.build_node(id, child_name, child_spec)?;
        }

        if spec.kind == NodeKind::Chart {
            scaffold_chart_children(self.surface.tree_mut(), id)?;
        }
        Ok(id)
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        self.surface.frame()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Adopts the container's new content-box size and re-renders.
    pub fn resize(&mut self, width: f64, height: f64) -> ChartResult<bool> {
        self.surface.set_size(width, height);
        self.pump()
    }

    /// Forwards one input event through the surface fan-out, then
    /// re-renders.
    pub fn dispatch(&mut self, event: InputEvent) -> ChartResult<bool> {
        let drew = self.surface.dispatch(event)?;
        if drew {
            self.renderer.render(self.surface.frame())?;
        }
        Ok(drew)
    }

    /// Applies a partial option update to the node at `path` (child names
    /// from the root) and re-renders.
    pub fn set_option(&mut self, path: &[&str], patch: &NodeConfigPatch) -> ChartResult<bool> {
        let node = self
            .surface
            .tree()
            .find(path)
            .ok_or_else(|| ChartError::UnknownNode(path.join("/")))?;
        self.surface.tree_mut().node_mut(node).config.apply(patch);
        self.pump()
    }

    /// Replaces the chart's dataset and re-renders.
    pub fn set_series(&mut self, points: Vec<OhlcPoint>) -> ChartResult<bool> {
        self.chart_mut()?.set_points(points)?;
        self.pump()
    }

    /// Appends one sample with realtime-update semantics and re-renders.
    pub fn append(&mut self, point: OhlcPoint) -> ChartResult<bool> {
        self.chart_mut()?.append(point)?;
        self.pump()
    }

    /// Applies a partial chart configuration update and re-renders.
    pub fn set_chart_options(&mut self, patch: &ChartConfigPatch) -> ChartResult<bool> {
        self.chart_mut()?.apply_config(patch)?;
        self.pump()
    }

    /// Completes a pending image fetch and re-renders so the image lands on
    /// the next frame.
    pub fn complete_image(
        &mut self,
        url: &str,
        result: ChartResult<ImageHandle>,
    ) -> ChartResult<bool> {
        self.surface.complete_image(url, result);
        self.pump()
    }

    /// The mounted chart element, when the tree declares one.
    pub fn chart_mut(&mut self) -> ChartResult<&mut ChartElement> {
        let id = self
            .chart_element
            .ok_or_else(|| ChartError::InvalidData("no chart element mounted".to_owned()))?;
        self.surface
            .element_mut(id)
            .and_then(|element| element.as_any_mut().downcast_mut::<ChartElement>())
            .ok_or_else(|| ChartError::InvalidData("chart element table out of sync".to_owned()))
    }

    fn pump(&mut self) -> ChartResult<bool> {
        let drew = self.surface.run_frame()?;
        if drew {
            self.renderer.render(self.surface.frame())?;
        }
        Ok(drew)
    }
}

/// Creates the standard chart sub-nodes (plot area, both axis strips and
/// the hover readout) unless the mounting tree declared them itself.
fn scaffold_chart_children(tree: &mut SceneTree, chart: NodeId) -> ChartResult<()> {
    const AXIS_WIDTH: f64 = 64.0;
    const AXIS_HEIGHT: f64 = 24.0;

    if tree.child(chart, PLOT).is_none() {
        let mut config = NodeConfig::default();
        config.box_spec.position = Position::Absolute;
        config.box_spec.margin = EdgeSpec::PerSide {
            top: None,
            right: Some(Length::Px(AXIS_WIDTH)),
            bottom: Some(Length::Px(AXIS_HEIGHT)),
            left: None,
        };
        tree.add_child(chart, PLOT, config)?;
    }
    if tree.child(chart, X_AXIS).is_none() {
        let mut config = NodeConfig::default();
        config.box_spec.position = Position::Absolute;
        config.box_spec.y2 = Some(Length::Percent(100.0));
        config.box_spec.h = Some(Length::Px(AXIS_HEIGHT));
        tree.add_child(chart, X_AXIS, config)?;
    }
    if tree.child(chart, Y_AXIS).is_none() {
        let mut config = NodeConfig::default();
        config.box_spec.position = Position::Absolute;
        config.box_spec.x2 = Some(Length::Percent(100.0));
        config.box_spec.w = Some(Length::Px(AXIS_WIDTH));
        tree.add_child(chart, Y_AXIS, config)?;
    }
    if tree.child(chart, READOUT).is_none() {
        let mut config = NodeConfig::default();
        config.box_spec.position = Position::Absolute;
        config.box_spec.x = Some(Length::Px(8.0));
        config.box_spec.y = Some(Length::Px(8.0));
        config.box_spec.w = Some(Length::Px(190.0));
        config.box_spec.h = Some(Length::Px(124.0));
        tree.add_child(chart, READOUT, config)?;
    }
    Ok(())
}
