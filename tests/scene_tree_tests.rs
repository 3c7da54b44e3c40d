use candlewick::core::{Edges, Flow, Length, ResolvedBox};
use candlewick::scene::{NodeConfig, NodeConfigPatch, SceneTree};

fn named(name: &str) -> NodeConfig {
    NodeConfig {
        name: name.to_owned(),
        ..NodeConfig::default()
    }
}

#[test]
fn duplicate_child_names_are_rejected() {
    let mut tree = SceneTree::with_root(NodeConfig::default());
    let root = tree.root();
    tree.add_child(root, "a", named("a")).expect("first child");
    assert!(tree.add_child(root, "a", named("a")).is_err());
}

#[test]
fn find_resolves_nested_paths() {
    let mut tree = SceneTree::with_root(NodeConfig::default());
    let root = tree.root();
    let outer = tree.add_child(root, "outer", named("outer")).expect("outer");
    let inner = tree.add_child(outer, "inner", named("inner")).expect("inner");

    assert_eq!(tree.find(&["outer", "inner"]), Some(inner));
    assert_eq!(tree.find(&["outer", "missing"]), None);
    assert_eq!(tree.find(&[]), Some(root));
}

#[test]
fn geometry_before_layout_is_an_ordering_error() {
    let mut tree = SceneTree::with_root(NodeConfig::default());
    let root = tree.root();
    let child = tree.add_child(root, "child", named("child")).expect("child");
    assert!(tree.geometry(child).is_err());
}

#[test]
fn layout_resolves_parents_before_children() {
    let mut tree = SceneTree::with_root(NodeConfig::default());
    let root = tree.root();
    let mut outer_config = named("outer");
    outer_config.box_spec.w = Some(Length::Percent(50.0));
    outer_config.box_spec.h = Some(Length::Px(100.0));
    let outer = tree.add_child(root, "outer", outer_config).expect("outer");

    let mut inner_config = named("inner");
    inner_config.box_spec.w = Some(Length::Percent(50.0));
    inner_config.box_spec.h = Some(Length::Px(10.0));
    let inner = tree.add_child(outer, "inner", inner_config).expect("inner");

    tree.layout(ResolvedBox::root(
        400.0,
        300.0,
        Edges::default(),
        Edges::default(),
    ))
    .expect("layout");

    assert_eq!(tree.geometry(outer).expect("outer box").w, 200.0);
    assert_eq!(tree.geometry(inner).expect("inner box").w, 100.0);
}

#[test]
fn column_flow_stacks_children() {
    let mut tree = SceneTree::with_root(NodeConfig {
        flow: Flow::Col,
        gap: 4.0,
        ..NodeConfig::default()
    });
    let root = tree.root();

    for name in ["a", "b"] {
        let mut config = named(name);
        config.box_spec.h = Some(Length::Px(20.0));
        tree.add_child(root, name, config).expect("child");
    }

    tree.layout(ResolvedBox::root(
        100.0,
        100.0,
        Edges::default(),
        Edges::default(),
    ))
    .expect("layout");

    let a = tree.find(&["a"]).expect("a");
    let b = tree.find(&["b"]).expect("b");
    assert_eq!(tree.geometry(a).expect("a box").y, 0.0);
    assert_eq!(tree.geometry(b).expect("b box").y, 24.0);
}

#[test]
fn explicit_order_wins_and_unlisted_children_follow() {
    let mut tree = SceneTree::with_root(NodeConfig {
        order: Some(vec!["late".to_owned(), "early".to_owned(), "ghost".to_owned()]),
        ..NodeConfig::default()
    });
    let root = tree.root();
    let early = tree.add_child(root, "early", named("early")).expect("early");
    let late = tree.add_child(root, "late", named("late")).expect("late");
    let extra = tree.add_child(root, "extra", named("extra")).expect("extra");

    assert_eq!(tree.render_order(root), vec![late, early, extra]);
}

#[test]
fn config_patch_merges_field_by_field() {
    let mut config = NodeConfig::default();
    config.apply(&NodeConfigPatch {
        gap: Some(7.0),
        w: Some(Length::Percent(25.0)),
        ..NodeConfigPatch::default()
    });

    assert_eq!(config.gap, 7.0);
    assert_eq!(config.box_spec.w, Some(Length::Percent(25.0)));
    // Untouched fields keep their defaults.
    assert_eq!(config.font_size, 12.0);
    assert_eq!(config.box_spec.h, None);
}

#[test]
fn node_config_deserializes_flat_box_fields() {
    let config: NodeConfig = serde_json::from_str(
        r#"{"name":"panel","gap":2,"w":"50%","h":120,"margin":4}"#,
    )
    .expect("deserialize");

    assert_eq!(config.name, "panel");
    assert_eq!(config.box_spec.w, Some(Length::Percent(50.0)));
    assert_eq!(config.box_spec.h, Some(Length::Px(120.0)));
}
