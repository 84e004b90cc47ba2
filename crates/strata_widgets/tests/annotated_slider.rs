//! Annotated slider painting

use strata_core::{DrawCommand, Point, RecordingContext, Size};
use strata_layout::widgets::window;
use strata_layout::RenderTree;
use strata_widgets::prelude::*;
use strata_widgets::WidgetError;

fn paint(slider: &AnnotatedSlider, width: f32, height: f32) -> RecordingContext {
    let root = window(slider.element(), width, height);
    let mut tree = RenderTree::from_element(&root);
    tree.compute_layout(width, height);
    let mut recorded = RecordingContext::new(Size::new(width, height));
    tree.render(&mut recorded);
    recorded
}

/// Tick lines as (x, height) in paint order
fn ticks(recorded: &RecordingContext) -> Vec<(f32, f32)> {
    recorded
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, .. } => Some((from.x, from.y - to.y)),
            _ => None,
        })
        .collect()
}

#[test]
fn tick_interval_ten_over_a_hundred_draws_eleven_ticks() {
    let ctx = UiContext::new();
    let slider = AnnotatedSlider::new(&ctx);
    slider.set_range(0, 100).unwrap();
    slider.set_tick_interval(10).unwrap();

    let ticks = ticks(&paint(&slider, 200.0, 40.0));
    assert_eq!(ticks.len(), 11);

    for (i, (_, height)) in ticks.iter().enumerate() {
        let expected = if i == 0 || i == 5 || i == 10 { 10.0 } else { 5.0 };
        assert_eq!(*height, expected, "tick {i}");
    }
    assert_eq!(ticks[0].0, 2.0);
    assert_eq!(ticks[10].0, 198.0);
}

#[test]
fn readout_shows_normalized_value() {
    let ctx = UiContext::new();
    let slider = AnnotatedSlider::new(&ctx);
    slider.set_range(0, 100).unwrap();

    slider.set_value(50);
    assert_eq!(paint(&slider, 200.0, 40.0).texts(), vec!["0.5"]);

    slider.set_value(33);
    assert_eq!(paint(&slider, 200.0, 40.0).texts(), vec!["0.33"]);
}

#[test]
fn readout_sits_above_the_bottom_edge() {
    let ctx = UiContext::new();
    let slider = AnnotatedSlider::new(&ctx);

    let recorded = paint(&slider, 200.0, 40.0);
    let origin = recorded
        .commands()
        .iter()
        .find_map(|cmd| match cmd {
            DrawCommand::DrawText { origin, .. } => Some(*origin),
            _ => None,
        })
        .unwrap();

    let font_size = strata_core::ThemeState::get().typography.font_size_base;
    let text_height = strata_layout::measure_text("0.0", font_size).height;
    let height = strata_core::ThemeState::get().metrics.slider_height;
    assert_eq!(origin, Point::new(0.0, height - text_height - 3.0));
}

#[test]
fn zero_tick_count_draws_no_ticks() {
    let ctx = UiContext::new();
    let slider = AnnotatedSlider::new(&ctx);
    slider.set_range(0, 5).unwrap();
    slider.set_tick_interval(10).unwrap();

    assert_eq!(slider.tick_count(), 0);
    assert!(ticks(&paint(&slider, 200.0, 40.0)).is_empty());
}

#[test]
fn non_positive_tick_interval_is_rejected() {
    let ctx = UiContext::new();
    let slider = AnnotatedSlider::new(&ctx);

    assert_eq!(
        slider.set_tick_interval(-3),
        Err(WidgetError::InvalidTickInterval(-3))
    );
    assert_eq!(slider.tick_interval(), 1);
}

#[test]
fn zero_maximum_reads_zero() {
    let ctx = UiContext::new();
    let slider = AnnotatedSlider::new(&ctx);
    slider.set_range(-10, 0).unwrap();
    slider.set_value(-5);

    assert_eq!(slider.readout(), "0.0");
}
