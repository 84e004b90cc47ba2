//! Widgets paint with the active theme
//!
//! Kept in its own test binary: it replaces the global theme.

use strata_core::{Color, ColorToken, DrawCommand, RecordingContext, Size, Theme, ThemeState};
use strata_layout::widgets::window;
use strata_layout::RenderTree;
use strata_widgets::prelude::*;

#[test]
fn toml_theme_reaches_slider_painting() {
    let theme = Theme::from_toml_str(
        r##"
        [colors]
        annotation = "#ff0000"

        [metrics]
        slider_height = 30.0
        "##,
    )
    .unwrap();
    ThemeState::set(theme);
    assert_eq!(ThemeState::get().color(ColorToken::Annotation), Color::RED);

    let ctx = UiContext::new();
    let slider = AnnotatedSlider::new(&ctx);
    slider.set_range(0, 4).unwrap();

    let root = window(slider.element(), 100.0, 60.0);
    let mut tree = RenderTree::from_element(&root);
    tree.compute_layout(100.0, 60.0);
    let mut recorded = RecordingContext::new(Size::new(100.0, 60.0));
    tree.render(&mut recorded);

    let lines: Vec<_> = recorded
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Line { from, brush, .. } => Some((from.y, brush.color())),
            _ => None,
        })
        .collect();
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|&(y, color)| y == 30.0 && color == Color::RED));
}
