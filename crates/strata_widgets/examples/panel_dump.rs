//! Build a small material panel, lay it out and print the draw commands
//!
//! ```sh
//! RUST_LOG=strata_widgets=debug cargo run -p strata_widgets --example panel_dump
//! ```
//!
//! Pass a theme file as the first argument to paint with it.

use std::sync::Arc;

use anyhow::Context as _;
use strata_core::{RecordingContext, Size, Theme, ThemeState};
use strata_layout::widgets::window;
use strata_layout::RenderTree;
use strata_widgets::prelude::*;
use tracing_subscriber::EnvFilter;

const WIDTH: f32 = 360.0;
const HEIGHT: f32 = 240.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Some(path) = std::env::args().nth(1) {
        let theme = Theme::load(&path).with_context(|| format!("loading theme {path}"))?;
        ThemeState::set(theme);
    }

    let ctx = UiContext::new().with_resources(bundled_resources());
    let group = CollapsibleGroup::new(&ctx, "Surface", None);

    let (roughness_row, roughness) =
        labeled_widget(AnnotatedSlider::new, &ctx, "Roughness", None, None);
    roughness.set_range(0, 100)?;
    roughness.set_tick_interval(10)?;
    roughness.set_value(35);

    let (normal_row, normal) = labeled_widget(
        |parent| VectorSpinner::new(parent, [0.0, 0.0, 1.0]),
        &ctx,
        "Normal",
        None,
        None,
    );
    normal.on_change(|value| tracing::info!(?value, "normal changed"));
    normal.set_value(0.0, 0.7, 0.7);

    group.add_widget(Arc::new(roughness_row));
    group.add_widget(Arc::new(HLine::new(&ctx)));
    group.add_widget(Arc::new(normal_row));

    for collapsed in [false, true] {
        group.set_collapsed(collapsed);
        if ctx.take_relayout_request() {
            tracing::info!(collapsed, "relayout requested");
        }

        let root = window(group.element(), WIDTH, HEIGHT);
        let mut tree = RenderTree::from_element(&root);
        tree.compute_layout(WIDTH, HEIGHT);

        let mut recorded = RecordingContext::new(Size::new(WIDTH, HEIGHT));
        tree.render(&mut recorded);

        println!(
            "== {} ({} commands, preferred size {:?})",
            if collapsed { "collapsed" } else { "expanded" },
            recorded.commands().len(),
            group.size_hint(),
        );
        for command in recorded.commands() {
            println!("{command:?}");
        }
    }

    Ok(())
}
