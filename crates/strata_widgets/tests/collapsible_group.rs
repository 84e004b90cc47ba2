//! Collapsible group behavior through layout and event dispatch

use std::sync::Arc;

use strata_core::{Event, ResourceBundle};
use strata_layout::widgets::{window, Checkbox, Label, INDICATOR_ID};
use strata_layout::RenderTree;
use strata_widgets::prelude::*;
use strata_widgets::COLLAPSIBLE_GROUP_STYLESHEET;

fn laid_out(group: &CollapsibleGroup, width: f32, height: f32) -> RenderTree {
    let root = window(group.element(), width, height);
    let mut tree = RenderTree::from_element(&root);
    tree.compute_layout(width, height);
    tree
}

fn is_shown(tree: &RenderTree, id: &str) -> bool {
    tree.find_by_id(id)
        .map(|node| tree.is_node_visible(node))
        .unwrap_or(false)
}

#[test]
fn default_group_is_expanded_with_visible_content() {
    let ctx = UiContext::new();
    let group = CollapsibleGroup::new(&ctx, "Material", None);

    assert!(group.is_checked());
    let tree = laid_out(&group, 300.0, 200.0);
    assert!(is_shown(&tree, group.content_id()));
}

#[test]
fn collapsing_hides_content() {
    let ctx = UiContext::new();
    let group = CollapsibleGroup::new(&ctx, "Material", None);

    group.set_collapsed(true);
    assert!(!group.is_checked());
    let tree = laid_out(&group, 300.0, 200.0);
    assert!(!is_shown(&tree, group.content_id()));
}

#[test]
fn widget_added_while_collapsed_appears_on_expand() {
    let ctx = UiContext::new();
    let group = CollapsibleGroup::new(&ctx, "Material", None);
    group.set_collapsed(true);

    let label = Arc::new(Label::new(&ctx, "Roughness"));
    group.add_widget(label.clone());
    assert_eq!(group.child_count(), 1);

    let tree = laid_out(&group, 300.0, 200.0);
    assert!(!is_shown(&tree, label.id()));

    group.set_collapsed(false);
    let tree = laid_out(&group, 300.0, 200.0);
    assert!(is_shown(&tree, label.id()));
}

#[test]
fn collapsing_twice_equals_once() {
    let ctx = UiContext::new();
    let once = CollapsibleGroup::new(&ctx, "Material", None);
    let twice = CollapsibleGroup::new(&ctx, "Material", None);

    once.set_collapsed(true);
    twice.set_collapsed(true);
    twice.set_collapsed(true);

    assert_eq!(once.is_checked(), twice.is_checked());
    assert_eq!(once.title().is_enabled(), twice.title().is_enabled());
    assert_eq!(once.size_hint(), twice.size_hint());
}

#[test]
fn clicking_the_checkbox_collapses_the_group() {
    let ctx = UiContext::new();
    let group = CollapsibleGroup::new(&ctx, "Material", None);
    group.add_widget(Arc::new(Label::new(&ctx, "Roughness")));

    let mut tree = laid_out(&group, 300.0, 200.0);
    let checkbox = tree.find_by_id(group.checkbox().id()).unwrap();
    let bounds = tree.get_absolute_bounds(checkbox).unwrap();
    let (x, y) = (bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0);

    tree.dispatch(&Event::pointer_down(x, y));
    tree.dispatch(&Event::pointer_up(x, y));

    assert!(!group.is_checked());
    assert!(!group.title().is_enabled());
    assert!(ctx.take_relayout_request());
}

#[test]
fn group_is_skinned_without_registering_resources() {
    let group = CollapsibleGroup::new(&UiContext::new(), "Material", None);
    assert!(group.checkbox().has_stylesheet());

    let tree = laid_out(&group, 300.0, 200.0);
    let id = format!("{}/{}", group.checkbox().id(), INDICATOR_ID);
    let node = tree.find_by_id(&id).unwrap();
    assert_eq!(tree.get_absolute_bounds(node).unwrap().width, 11.0);
}

#[test]
fn missing_stylesheet_keeps_the_default_skin() {
    let ctx = UiContext::new();
    let checkbox = Checkbox::new(&ctx, true);
    assert!(!checkbox.load_stylesheet(&ResourceBundle::new(), COLLAPSIBLE_GROUP_STYLESHEET));
    assert!(!checkbox.has_stylesheet());

    let root = window(checkbox.element(), 100.0, 40.0);
    let mut tree = RenderTree::from_element(&root);
    tree.compute_layout(100.0, 40.0);
    let id = format!("{}/{}", checkbox.id(), INDICATOR_ID);
    let node = tree.find_by_id(&id).unwrap();
    let default_width = checkbox.default_style().width.unwrap();
    assert_eq!(tree.get_absolute_bounds(node).unwrap().width, default_width);
}

#[test]
fn broken_stylesheet_keeps_the_default_skin() {
    let resources = ResourceBundle::new().with(
        COLLAPSIBLE_GROUP_STYLESHEET,
        b"#indicator { width: 11px; ".as_slice(),
    );
    let group = CollapsibleGroup::new(&UiContext::new().with_resources(resources), "Material", None);
    assert!(!group.checkbox().has_stylesheet());
}
