//! Primitive widgets
//!
//! A widget owns its state as reactive [`State`](strata_core::State) values
//! and rebuilds a fresh element tree from it on every [`Widget::element`]
//! call. Event handlers in that tree capture state handles, so dispatching an
//! event through a [`RenderTree`] updates the widget and the next rebuild
//! shows the change.
//!
//! - [`Frame`] - box or line frames with optional children
//! - [`Label`] - text or pixmap label
//! - [`Checkbox`] - toggle with a stylesheet skin
//! - [`DoubleSpinBox`] - bounded decimal field with keyboard, wheel and drag input

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use strata_core::Size;

use crate::div::{div, Div, ElementBuilder};
use crate::renderer::RenderTree;

pub mod checkbox;
pub mod frame;
pub mod label;
pub mod spin_box;

pub use checkbox::{Checkbox, CheckboxInteraction, INDICATOR_ID};
pub use frame::{BoxLayout, Direction, Frame, FrameShadow, FrameShape};
pub use label::Label;
pub use spin_box::DoubleSpinBox;

/// Spacing between items of a layout that does not set its own
pub const DEFAULT_SPACING: f32 = 6.0;

/// Opacity multiplier for disabled non-text widgets
pub const DISABLED_OPACITY: f32 = 0.5;

/// A retained widget that can describe itself as an element tree
pub trait Widget: Send + Sync {
    /// Build the element tree for the current state
    fn element(&self) -> Box<dyn ElementBuilder>;

    fn set_enabled(&self, enabled: bool);

    fn is_enabled(&self) -> bool;

    /// Preferred size: the max-content layout of the current element tree
    fn size_hint(&self) -> Size {
        let element = self.element();
        RenderTree::from_element(&element).compute_intrinsic()
    }
}

impl<W: Widget + ?Sized> Widget for Arc<W> {
    fn element(&self) -> Box<dyn ElementBuilder> {
        (**self).element()
    }

    fn set_enabled(&self, enabled: bool) {
        (**self).set_enabled(enabled)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn size_hint(&self) -> Size {
        (**self).size_hint()
    }
}

/// Top-level window of a fixed size with `content` stretched across it
pub fn window(content: Box<dyn ElementBuilder>, width: f32, height: f32) -> Div {
    div().w(width).h(height).flex_col().child_box(content)
}

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique element id such as `checkbox-7`, used to find a widget's nodes
pub fn next_widget_id(prefix: &str) -> String {
    let n = NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_ids_are_unique() {
        let a = next_widget_id("label");
        let b = next_widget_id("label");
        assert_ne!(a, b);
        assert!(a.starts_with("label-"));
    }
}
