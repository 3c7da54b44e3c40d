use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use candlewick::error::ChartResult;
use candlewick::interaction::{EventKind, InputEvent, PointerEvent, WheelEvent};
use candlewick::render::Theme;
use candlewick::scene::tree::{NodeId, SceneTree};
use candlewick::scene::{Element, NodeConfig, Painter, Scrollable, Surface};

/// Test element recording the order it receives events in.
struct Recorder {
    tag: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

impl Element for Recorder {
    fn draw(
        &mut self,
        _tree: &SceneTree,
        _node: NodeId,
        _painter: &mut Painter<'_>,
    ) -> ChartResult<()> {
        Ok(())
    }

    fn as_scrollable(&mut self) -> Option<&mut dyn Scrollable> {
        Some(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Scrollable for Recorder {
    fn pointer_move(&mut self, _event: PointerEvent) {
        self.log.borrow_mut().push(format!("{}:move", self.tag));
    }

    fn pointer_down(&mut self, _event: PointerEvent) {
        self.log.borrow_mut().push(format!("{}:down", self.tag));
    }

    fn pointer_up(&mut self, _event: PointerEvent) {
        self.log.borrow_mut().push(format!("{}:up", self.tag));
    }

    fn pointer_leave(&mut self) {
        self.log.borrow_mut().push(format!("{}:leave", self.tag));
    }

    fn wheel(&mut self, _event: WheelEvent) {
        self.log.borrow_mut().push(format!("{}:wheel", self.tag));
    }
}

fn surface_with_recorders() -> (Surface, Rc<RefCell<Vec<String>>>) {
    let mut surface = Surface::new(NodeConfig::default(), Theme::default());
    let log = Rc::new(RefCell::new(Vec::new()));
    let root = surface.tree().root();

    for tag in ["first", "second"] {
        let node = surface
            .tree_mut()
            .add_child(root, tag, NodeConfig::default())
            .expect("child");
        let element = surface.add_element(
            node,
            Box::new(Recorder {
                tag,
                log: Rc::clone(&log),
            }),
        );
        surface.listen(EventKind::PointerMove, element);
        surface.listen(EventKind::Wheel, element);
    }

    surface.set_size(300.0, 200.0);
    (surface, log)
}

#[test]
fn zero_size_container_skips_the_frame() {
    let mut surface = Surface::new(NodeConfig::default(), Theme::default());
    surface.set_size(0.0, 200.0);
    assert!(!surface.run_frame().expect("frame result"));

    surface.set_size(300.0, 200.0);
    assert!(surface.run_frame().expect("frame result"));
    assert_eq!(surface.frame().viewport.width, 300.0);
}

#[test]
fn frame_skip_resumes_on_the_next_resize() {
    let mut surface = Surface::new(NodeConfig::default(), Theme::default());
    surface.set_size(300.0, 200.0);
    surface.run_frame().expect("frame");

    surface.set_size(0.0, 0.0);
    assert!(!surface.run_frame().expect("frame result"));
    surface.set_size(320.0, 240.0);
    assert!(surface.run_frame().expect("frame result"));
    assert_eq!(surface.frame().viewport.height, 240.0);
}

#[test]
fn events_fan_out_in_registration_order() {
    let (mut surface, log) = surface_with_recorders();

    surface
        .dispatch(InputEvent::PointerMove(PointerEvent::new(5.0, 5.0, 0)))
        .expect("dispatch");
    surface
        .dispatch(InputEvent::Wheel(WheelEvent::new(1.0, 0.0)))
        .expect("dispatch");

    assert_eq!(
        *log.borrow(),
        vec![
            "first:move".to_owned(),
            "second:move".to_owned(),
            "first:wheel".to_owned(),
            "second:wheel".to_owned(),
        ]
    );
}

#[test]
fn unregistered_event_kinds_reach_no_listener() {
    let (mut surface, log) = surface_with_recorders();

    surface
        .dispatch(InputEvent::PointerDown(PointerEvent::new(5.0, 5.0, 1)))
        .expect("dispatch");

    assert!(log.borrow().is_empty());
}

#[test]
fn node_post_render_hook_runs_after_the_subtree() {
    let mut surface = Surface::new(NodeConfig::default(), Theme::default());
    let root = surface.tree().root();
    let node = surface
        .tree_mut()
        .add_child(root, "panel", NodeConfig::default())
        .expect("child");

    let fired = Rc::new(RefCell::new(0));
    let fired_in_hook = Rc::clone(&fired);
    surface.set_node_hook(
        node,
        Box::new(move |geometry, frame| {
            assert!(geometry.resolved);
            assert!(frame.viewport.is_valid());
            *fired_in_hook.borrow_mut() += 1;
        }),
    );

    surface.set_size(100.0, 100.0);
    surface.run_frame().expect("frame");
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn global_post_render_hook_sees_the_finished_frame() {
    let mut surface = Surface::new(NodeConfig::default(), Theme::default());
    let seen = Rc::new(RefCell::new(None));
    let seen_in_hook = Rc::clone(&seen);
    surface.set_post_render(Box::new(move |frame| {
        *seen_in_hook.borrow_mut() = Some(frame.viewport.width);
    }));

    surface.set_size(640.0, 480.0);
    surface.run_frame().expect("frame");
    assert_eq!(*seen.borrow(), Some(640.0));
}
