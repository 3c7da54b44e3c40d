use indexmap::IndexMap;
use tracing::warn;

use crate::core::{BoxRequest, FlowCursor, ResolvedBox, dims};
use crate::error::{ChartError, ChartResult};
use crate::render::RenderFrame;
use crate::scene::config::NodeConfig;

/// Stable handle into the scene arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Per-node post-render hook, invoked after the node's subtree renders.
pub type NodeHook = Box<dyn FnMut(&ResolvedBox, &mut RenderFrame)>;

pub struct Node {
    pub config: NodeConfig,
    pub parent: Option<NodeId>,
    pub children: IndexMap<String, NodeId>,
    /// Resolved geometry for the current frame; `None` before the first
    /// measure pass.
    pub geometry: Option<ResolvedBox>,
    pub(crate) cursor: FlowCursor,
    /// Index into the owning surface's element table.
    pub element: Option<usize>,
    pub post_render: Option<NodeHook>,
}

impl Node {
    fn new(config: NodeConfig, parent: Option<NodeId>) -> Self {
        Self {
            config,
            parent,
            children: IndexMap::new(),
            geometry: None,
            cursor: FlowCursor::default(),
            element: None,
            post_render: None,
        }
    }
}

/// One step of a render pass: draw a node, or fire a node's post-render
/// hook once its subtree has rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    Node(NodeId),
    Hook(NodeId),
}

/// Arena of scene nodes addressed by [`NodeId`] handles.
///
/// Parent/child links are indices, so the tree carries no ownership cycles
/// and nodes never hold back-references.
pub struct SceneTree {
    nodes: Vec<Node>,
}

impl SceneTree {
    #[must_use]
    pub fn with_root(mut config: NodeConfig) -> Self {
        if config.name.is_empty() {
            config.name = "root".to_owned();
        }
        Self {
            nodes: vec![Node::new(config, None)],
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: &str,
        mut config: NodeConfig,
    ) -> ChartResult<NodeId> {
        if self.nodes[parent.0].children.contains_key(name) {
            return Err(ChartError::InvalidData(format!(
                "duplicate child name `{name}`"
            )));
        }
        config.name = name.to_owned();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(config, Some(parent)));
        self.nodes[parent.0].children.insert(name.to_owned(), id);
        Ok(id)
    }

    #[must_use]
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[parent.0].children.get(name).copied()
    }

    /// Resolves a `/`-free path of child names starting at the root.
    #[must_use]
    pub fn find(&self, path: &[&str]) -> Option<NodeId> {
        let mut current = self.root();
        for name in path {
            current = self.child(current, name)?;
        }
        Some(current)
    }

    /// Resolved geometry for the current frame.
    pub fn geometry(&self, id: NodeId) -> ChartResult<ResolvedBox> {
        self.nodes[id.0].geometry.ok_or_else(|| {
            ChartError::InvalidData(format!(
                "geometry of `{}` requested before the measure pass",
                self.nodes[id.0].config.name
            ))
        })
    }

    /// Top-down measure pass: resolves every node's box from the given root
    /// geometry, resetting and advancing flow cursors along the way.
    pub fn layout(&mut self, root_box: ResolvedBox) -> ChartResult<()> {
        self.nodes[0].geometry = Some(root_box);
        self.layout_children(self.root())
    }

    fn layout_children(&mut self, id: NodeId) -> ChartResult<()> {
        self.nodes[id.0].cursor = FlowCursor::default();
        let parent_box = self.geometry(id)?;
        let flow = self.nodes[id.0].config.flow;
        let gap = self.nodes[id.0].config.gap;

        let child_ids: Vec<NodeId> = self.nodes[id.0].children.values().copied().collect();
        for child in child_ids {
            let mut cursor = self.nodes[id.0].cursor;
            let request = BoxRequest::Spec(self.nodes[child.0].config.box_spec);
            let resolved = dims(&request, &parent_box, flow, gap, &mut cursor)?;
            self.nodes[id.0].cursor = cursor;
            self.nodes[child.0].geometry = Some(resolved);
            self.layout_children(child)?;
        }
        Ok(())
    }

    /// Children in render order: the explicit `order` list first (unknown
    /// names are skipped with a warning), then unlisted children in
    /// declaration order.
    #[must_use]
    pub fn render_order(&self, id: NodeId) -> Vec<NodeId> {
        let node = &self.nodes[id.0];
        let Some(order) = &node.config.order else {
            return node.children.values().copied().collect();
        };

        let mut out = Vec::with_capacity(node.children.len());
        for name in order {
            match node.children.get(name) {
                Some(child) => out.push(*child),
                None => warn!(
                    parent = %node.config.name,
                    child = %name,
                    "render order lists unknown child"
                ),
            }
        }
        for (name, child) in &node.children {
            if !order.contains(name) {
                out.push(*child);
            }
        }
        out
    }

    /// Flattened render plan for one frame.
    #[must_use]
    pub fn render_steps(&self) -> Vec<RenderStep> {
        let mut steps = Vec::new();
        steps.push(RenderStep::Node(self.root()));
        self.collect_steps(self.root(), &mut steps);
        steps
    }

    fn collect_steps(&self, id: NodeId, steps: &mut Vec<RenderStep>) {
        for child in self.render_order(id) {
            steps.push(RenderStep::Node(child));
            self.collect_steps(child, steps);
            steps.push(RenderStep::Hook(child));
        }
    }

    /// Depth-first `(node, element)` pairs for the element update pass.
    #[must_use]
    pub fn element_nodes(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        self.collect_elements(self.root(), &mut out);
        out
    }

    fn collect_elements(&self, id: NodeId, out: &mut Vec<(NodeId, usize)>) {
        if let Some(element) = self.nodes[id.0].element {
            out.push((id, element));
        }
        for child in self.nodes[id.0].children.values() {
            self.collect_elements(*child, out);
        }
    }
}
