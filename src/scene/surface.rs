use std::any::Any;

use tracing::error;

use crate::core::{ResolvedBox, resolve_edges};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{EventKind, InputEvent, PointerEvent, WheelEvent};
use crate::render::{Color, RectPrimitive, RenderFrame, Theme, Viewport};
use crate::scene::config::NodeConfig;
use crate::scene::images::{ImageCache, ImageHandle};
use crate::scene::layer::{Brush, HeuristicTextMeasurer, Painter, TextMeasurer};
use crate::scene::tree::{NodeHook, NodeId, RenderStep, SceneTree};

/// Index into the surface's element table.
pub type ElementId = usize;

/// Capability seam for nodes that draw or keep per-frame state.
///
/// Concrete elements implement only what they need; the scene dispatches
/// through this table instead of a subclass chain.
pub trait Element {
    /// Called once per frame after the node's box has been resolved.
    fn update(&mut self, tree: &SceneTree, node: NodeId) -> ChartResult<()> {
        let _ = (tree, node);
        Ok(())
    }

    /// Emits draw primitives for the node.
    fn draw(&mut self, tree: &SceneTree, node: NodeId, painter: &mut Painter<'_>)
    -> ChartResult<()>;

    /// Interaction capability, when the element consumes pointer/wheel
    /// input.
    fn as_scrollable(&mut self) -> Option<&mut dyn Scrollable> {
        None
    }

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Pointer/wheel input capability.
pub trait Scrollable {
    fn pointer_move(&mut self, event: PointerEvent);
    fn pointer_down(&mut self, event: PointerEvent);
    fn pointer_up(&mut self, event: PointerEvent);
    fn pointer_leave(&mut self);
    fn wheel(&mut self, event: WheelEvent);
}

/// One ordered listener list per event kind; fan-out follows registration
/// order with no capture or bubbling.
#[derive(Debug, Default)]
struct ListenerTable {
    pointer_move: Vec<ElementId>,
    pointer_down: Vec<ElementId>,
    pointer_up: Vec<ElementId>,
    pointer_leave: Vec<ElementId>,
    wheel: Vec<ElementId>,
}

impl ListenerTable {
    fn list(&self, kind: EventKind) -> &[ElementId] {
        match kind {
            EventKind::PointerMove => &self.pointer_move,
            EventKind::PointerDown => &self.pointer_down,
            EventKind::PointerUp => &self.pointer_up,
            EventKind::PointerLeave => &self.pointer_leave,
            EventKind::Wheel => &self.wheel,
        }
    }

    fn list_mut(&mut self, kind: EventKind) -> &mut Vec<ElementId> {
        match kind {
            EventKind::PointerMove => &mut self.pointer_move,
            EventKind::PointerDown => &mut self.pointer_down,
            EventKind::PointerUp => &mut self.pointer_up,
            EventKind::PointerLeave => &mut self.pointer_leave,
            EventKind::Wheel => &mut self.wheel,
        }
    }
}

/// Root of the scene: owns the tree, the element table, the frame and the
/// event fan-out.
///
/// Constructed once when the widget mounts and reconfigured in place
/// afterwards; every external trigger runs one full synchronous
/// update+render pass.
pub struct Surface {
    tree: SceneTree,
    elements: Vec<Box<dyn Element>>,
    theme: Theme,
    measurer: Box<dyn TextMeasurer>,
    images: ImageCache,
    listeners: ListenerTable,
    width: f64,
    height: f64,
    frame: RenderFrame,
    post_render: Option<Box<dyn FnMut(&RenderFrame)>>,
    in_pass: bool,
}

impl Surface {
    #[must_use]
    pub fn new(root_config: NodeConfig, theme: Theme) -> Self {
        Self {
            tree: SceneTree::with_root(root_config),
            elements: Vec::new(),
            theme,
            measurer: Box::new(HeuristicTextMeasurer::default()),
            images: ImageCache::default(),
            listeners: ListenerTable::default(),
            width: 0.0,
            height: 0.0,
            frame: RenderFrame::new(Viewport::new(1.0, 1.0)),
            post_render: None,
            in_pass: false,
        }
    }

    #[must_use]
    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SceneTree {
        &mut self.tree
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut Theme {
        &mut self.theme
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
    }

    pub fn set_post_render(&mut self, hook: Box<dyn FnMut(&RenderFrame)>) {
        self.post_render = Some(hook);
    }

    pub fn set_node_hook(&mut self, node: NodeId, hook: NodeHook) {
        self.tree.node_mut(node).post_render = Some(hook);
    }

    /// Registers an element for a node and returns its table index.
    pub fn add_element(&mut self, node: NodeId, element: Box<dyn Element>) -> ElementId {
        let id = self.elements.len();
        self.elements.push(element);
        self.tree.node_mut(node).element = Some(id);
        id
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut (dyn Element + 'static)> {
        self.elements.get_mut(id).map(|boxed| boxed.as_mut())
    }

    pub fn listen(&mut self, kind: EventKind, element: ElementId) {
        self.listeners.list_mut(kind).push(element);
    }

    /// Records the container's current content-box size; the next frame
    /// resizes the viewport to match.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Completes one pending image fetch; failures evict the entry so a
    /// future draw retries.
    pub fn complete_image(&mut self, url: &str, result: ChartResult<ImageHandle>) {
        self.images.complete(url, result);
    }

    #[must_use]
    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Runs one full synchronous update+render pass.
    ///
    /// Returns `Ok(false)` when the frame was skipped because the container
    /// collapsed to zero size; rejects re-entrant calls from inside an
    /// in-progress pass.
    pub fn run_frame(&mut self) -> ChartResult<bool> {
        if self.in_pass {
            return Err(ChartError::UpdateInProgress);
        }
        self.in_pass = true;
        let result = self.frame_inner();
        self.in_pass = false;
        result
    }

    /// Forwards one input event to every registered listener in
    /// registration order, then runs a frame.
    pub fn dispatch(&mut self, event: InputEvent) -> ChartResult<bool> {
        if self.in_pass {
            return Err(ChartError::UpdateInProgress);
        }

        let targets = self.listeners.list(event.kind()).to_vec();
        for id in targets {
            let Some(element) = self.elements.get_mut(id) else {
                continue;
            };
            let Some(scrollable) = element.as_scrollable() else {
                continue;
            };
            match event {
                InputEvent::PointerMove(pointer) => scrollable.pointer_move(pointer),
                InputEvent::PointerDown(pointer) => scrollable.pointer_down(pointer),
                InputEvent::PointerUp(pointer) => scrollable.pointer_up(pointer),
                InputEvent::PointerLeave => scrollable.pointer_leave(),
                InputEvent::Wheel(wheel) => scrollable.wheel(wheel),
            }
        }

        self.run_frame()
    }

    fn frame_inner(&mut self) -> ChartResult<bool> {
        let viewport = Viewport::new(self.width, self.height);
        if !viewport.is_valid() {
            error!(
                width = self.width,
                height = self.height,
                "container collapsed, skipping frame"
            );
            return Ok(false);
        }

        // Measure pass. The root resolves its own margin/padding with no
        // parent to inherit from.
        let root_spec = self.tree.node(self.tree.root()).config.box_spec;
        let margin = resolve_edges(root_spec.margin, self.width, self.height)?;
        let padding = resolve_edges(root_spec.padding, self.width, self.height)?;
        let root_box = ResolvedBox::root(self.width, self.height, margin, padding);
        self.tree.layout(root_box)?;

        for (node, element) in self.tree.element_nodes() {
            let Self { tree, elements, .. } = self;
            elements[element].update(tree, node)?;
        }

        // Render pass.
        self.frame.clear(viewport);
        for step in self.tree.render_steps() {
            match step {
                RenderStep::Node(id) => self.render_node(id)?,
                RenderStep::Hook(id) => {
                    let geometry = self.tree.geometry(id)?;
                    if let Some(hook) = self.tree.node_mut(id).post_render.as_mut() {
                        hook(&geometry, &mut self.frame);
                    }
                }
            }
        }

        if let Some(hook) = self.post_render.as_mut() {
            hook(&self.frame);
        }
        Ok(true)
    }

    fn render_node(&mut self, id: NodeId) -> ChartResult<()> {
        let geometry = self.tree.geometry(id)?;

        if let Some(element) = self.tree.node(id).element {
            let Self {
                tree,
                elements,
                theme,
                measurer,
                images,
                frame,
                ..
            } = self;
            let mut painter = Painter {
                frame,
                theme,
                measurer: measurer.as_ref(),
                images,
            };
            elements[element].draw(tree, id, &mut painter)?;
        }

        if self.tree.node(id).config.debug {
            let outline = self.theme.resolve("#ff00ff")?;
            self.frame.rects.push(
                RectPrimitive::filled(
                    geometry.x,
                    geometry.y,
                    geometry.w,
                    geometry.h,
                    Color::rgba(0.0, 0.0, 0.0, 0.0),
                )
                .with_border(1.0, outline),
            );
        }
        Ok(())
    }

    /// Drawing handle for one node's resolved box with the node's text
    /// defaults applied.
    pub fn brush_for<'p, 'a>(
        painter: &'p mut Painter<'a>,
        tree: &SceneTree,
        node: NodeId,
    ) -> ChartResult<Brush<'p, 'a>> {
        let geometry = tree.geometry(node)?;
        let config = &tree.node(node).config;
        Ok(Brush::new(painter, geometry)
            .with_flow(config.flow, config.gap)
            .with_text_defaults(config.color.as_deref(), config.font_size))
    }
}
