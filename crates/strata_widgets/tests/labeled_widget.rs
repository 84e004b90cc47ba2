//! Labeled rows and the widgets commonly placed in them

use std::sync::{Arc, Mutex};

use strata_layout::widgets::window;
use strata_layout::{Pixmap, RenderTree};
use strata_widgets::labeled::COLUMN_STRETCH;
use strata_widgets::prelude::*;

fn laid_out(element: Box<dyn ElementBuilder>, width: f32, height: f32) -> RenderTree {
    let root = window(element, width, height);
    let mut tree = RenderTree::from_element(&root);
    tree.compute_layout(width, height);
    tree
}

/// Children of the row container, skipping the wrapper `window` adds
fn row_children(tree: &RenderTree, row_id: &str) -> usize {
    let row = tree.find_by_id(row_id).unwrap();
    tree.layout().children(row).len()
}

#[test]
fn row_without_icon_has_label_and_content() {
    let ctx = UiContext::new();
    let (row, _) = labeled_widget(HLine::new, &ctx, "Opacity", None, None);

    let tree = laid_out(row.element(), 300.0, 40.0);
    assert_eq!(row_children(&tree, row.id()), 2);
    assert!(tree.find_by_id(&row.icon_group_id()).is_none());
    assert_eq!(COLUMN_STRETCH, (0.0, 1.0));
}

#[test]
fn row_with_icon_nests_icon_and_label() {
    let ctx = UiContext::new();
    let (row, _) = labeled_widget(HLine::new, &ctx, "Opacity", Some(":icons/opacity.png"), None);

    let tree = laid_out(row.element(), 300.0, 40.0);
    assert_eq!(row_children(&tree, row.id()), 2);

    let group = tree.find_by_id(&row.icon_group_id()).unwrap();
    assert_eq!(tree.layout().children(group).len(), 2);

    // Unknown icon resources load as an empty image
    let icon = row.icon().unwrap();
    assert!(icon.pixmap().map(|p: Pixmap| p.is_null()).unwrap_or(false));
}

#[test]
fn content_column_absorbs_extra_width() {
    let ctx = UiContext::new();
    let (row, slider) = labeled_widget(AnnotatedSlider::new, &ctx, "Strength", None, None);

    let narrow = laid_out(row.element(), 300.0, 40.0);
    let wide = laid_out(row.element(), 500.0, 40.0);
    let width = |tree: &RenderTree, id: &str| {
        let node = tree.find_by_id(id).unwrap();
        tree.get_absolute_bounds(node).unwrap().width
    };

    assert_eq!(
        width(&narrow, row.label().id()),
        width(&wide, row.label().id())
    );
    let grown = width(&wide, slider.id()) - width(&narrow, slider.id());
    assert!((grown - 200.0).abs() < 0.01);
}

#[test]
fn vector_spinner_round_trips_and_clamps() {
    let ctx = UiContext::new();
    let (_, spinner) = labeled_widget(|c| VectorSpinner::new(c, [0.0; 3]), &ctx, "Normal", None, None);

    spinner.set_value(0.5, -0.3, 0.8);
    assert_eq!(spinner.value(), [0.5, -0.3, 0.8]);

    spinner.set_y(-7.0);
    assert_eq!(spinner.value(), [0.5, -1.0, 0.8]);
}

#[test]
fn vector_spinner_bulk_set_notifies_once() {
    let ctx = UiContext::new();
    let spinner = VectorSpinner::new(&ctx, [0.0; 3]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    spinner.on_change(move |value| log.lock().unwrap().push(value));

    spinner.set_value(0.1, 0.2, 0.3);
    spinner.set_value(0.1, 0.2, 0.3);

    assert_eq!(*seen.lock().unwrap(), vec![[0.1, 0.2, 0.3]]);
}
