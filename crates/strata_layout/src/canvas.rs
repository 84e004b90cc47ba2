//! Canvas element for custom drawing
//!
//! The callback receives the draw context already translated to the canvas
//! origin, so drawing at (0, 0) draws at the canvas' top-left corner.
//!
//! ```rust
//! use strata_layout::prelude::*;
//! use strata_core::{Color, DrawContext, Point, Stroke};
//!
//! let rule = canvas(|ctx: &mut dyn DrawContext, bounds| {
//!     ctx.draw_line(
//!         Point::new(0.0, 0.0),
//!         Point::new(bounds.width, 0.0),
//!         &Stroke::new(1.0),
//!         Color::GRAY.into(),
//!     );
//! })
//! .h(1.0)
//! .w_full();
//! ```

use std::rc::Rc;

use strata_core::DrawContext;
use taffy::prelude::*;

use crate::div::{ElementBuilder, ElementTypeId};
use crate::element::RenderProps;
use crate::tree::{LayoutNodeId, LayoutTree};

/// Bounds passed to canvas render callback
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasBounds {
    pub width: f32,
    pub height: f32,
}

/// Canvas render function type - uses Rc for single-threaded UI
pub type CanvasRenderFn = Rc<dyn Fn(&mut dyn DrawContext, CanvasBounds)>;

/// Element that reserves layout space and paints through a callback
pub struct Canvas {
    style: Style,
    render_fn: Option<CanvasRenderFn>,
    opacity: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            style: Style::default(),
            render_fn: None,
            opacity: 1.0,
        }
    }

    /// Create a canvas with a render callback
    pub fn with_render<F>(render_fn: F) -> Self
    where
        F: Fn(&mut dyn DrawContext, CanvasBounds) + 'static,
    {
        Self::new().render(render_fn)
    }

    /// Set the render callback
    pub fn render<F>(mut self, render_fn: F) -> Self
    where
        F: Fn(&mut dyn DrawContext, CanvasBounds) + 'static,
    {
        self.render_fn = Some(Rc::new(render_fn));
        self
    }

    pub fn w(mut self, width: f32) -> Self {
        self.style.size.width = Dimension::Length(width);
        self
    }

    pub fn h(mut self, height: f32) -> Self {
        self.style.size.height = Dimension::Length(height);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.style.size.width = Dimension::Length(width);
        self.style.size.height = Dimension::Length(height);
        self
    }

    pub fn w_full(mut self) -> Self {
        self.style.size.width = Dimension::Percent(1.0);
        self
    }

    pub fn h_full(mut self) -> Self {
        self.style.size.height = Dimension::Percent(1.0);
        self
    }

    pub fn min_w(mut self, px: f32) -> Self {
        self.style.min_size.width = Dimension::Length(px);
        self
    }

    /// Share of the parent's extra space along its main axis
    pub fn stretch(mut self, factor: f32) -> Self {
        self.style.flex_grow = factor;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

impl ElementBuilder for Canvas {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        tree.create_node(self.style.clone())
    }

    fn render_props(&self) -> RenderProps {
        RenderProps::default().with_opacity(self.opacity)
    }

    fn children_builders(&self) -> &[Box<dyn ElementBuilder>] {
        &[]
    }

    fn element_type_id(&self) -> ElementTypeId {
        ElementTypeId::Canvas
    }

    fn canvas_render_info(&self) -> Option<CanvasRenderFn> {
        self.render_fn.clone()
    }
}

/// Create a canvas element with a render callback
pub fn canvas<F>(render_fn: F) -> Canvas
where
    F: Fn(&mut dyn DrawContext, CanvasBounds) + 'static,
{
    Canvas::with_render(render_fn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderTree;
    use std::cell::Cell;
    use strata_core::{Color, CornerRadius, DrawCommand, Rect, RecordingContext, Size};

    #[test]
    fn test_canvas_receives_layout_bounds() {
        let seen = Rc::new(Cell::new(None));
        let seen_in_render = Rc::clone(&seen);

        let element = canvas(move |ctx, bounds| {
            seen_in_render.set(Some(bounds));
            ctx.fill_rect(
                Rect::new(0.0, 0.0, bounds.width, bounds.height),
                CornerRadius::ZERO,
                Color::RED.into(),
            );
        })
        .size(30.0, 12.0);

        let mut tree = RenderTree::from_element(&element);
        tree.compute_layout(100.0, 100.0);

        let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
        tree.render(&mut ctx);

        assert_eq!(
            seen.get(),
            Some(CanvasBounds {
                width: 30.0,
                height: 12.0
            })
        );
        assert!(ctx
            .commands()
            .iter()
            .any(|cmd| matches!(cmd, DrawCommand::FillRect { rect, .. } if rect.width() == 30.0)));
    }
}
