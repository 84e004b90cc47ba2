//! Text element builder
//!
//! ```rust
//! use strata_layout::prelude::*;
//! use strata_core::Color;
//!
//! let label = text("Roughness").size(13.0).color(Color::WHITE);
//! ```

use strata_core::theme::{ColorToken, ThemeState};
use strata_core::Color;
use taffy::prelude::*;

use crate::div::{ElementBuilder, ElementTypeId, TextRenderInfo};
use crate::element::RenderProps;
use crate::tree::{LayoutNodeId, LayoutTree, TextMeasureContext};

/// A single-line text element, sized by the text measurer
pub struct Text {
    content: String,
    font_size: f32,
    color: Color,
    line_height: f32,
    style: Style,
}

impl Text {
    /// Create a text element in the theme's base font size and primary color
    pub fn new(content: impl Into<String>) -> Self {
        let theme = ThemeState::get();
        Self {
            content: content.into(),
            font_size: theme.typography.font_size_base,
            color: theme.color(ColorToken::TextPrimary),
            line_height: theme.typography.line_height,
            style: Style {
                flex_shrink: 0.0,
                ..Style::default()
            },
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn text_color(&self) -> Color {
        self.color
    }

    /// Set margin on all sides in pixels
    pub fn m_px(mut self, px: f32) -> Self {
        let px = LengthPercentageAuto::Length(px);
        self.style.margin = Rect {
            left: px,
            right: px,
            top: px,
            bottom: px,
        };
        self
    }

    /// Share of the parent's extra space along its main axis
    pub fn stretch(mut self, factor: f32) -> Self {
        self.style.flex_grow = factor;
        self
    }
}

impl ElementBuilder for Text {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        tree.create_text_node(
            self.style.clone(),
            TextMeasureContext {
                content: self.content.clone(),
                font_size: self.font_size,
                line_height: self.line_height,
            },
        )
    }

    fn render_props(&self) -> RenderProps {
        RenderProps::default()
    }

    fn children_builders(&self) -> &[Box<dyn ElementBuilder>] {
        &[]
    }

    fn element_type_id(&self) -> ElementTypeId {
        ElementTypeId::Text
    }

    fn text_render_info(&self) -> Option<TextRenderInfo> {
        Some(TextRenderInfo {
            content: self.content.clone(),
            font_size: self.font_size,
            color: self.color,
        })
    }
}

/// Convenience function to create a new text element
pub fn text(content: impl Into<String>) -> Text {
    Text::new(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderTree;
    use crate::text_measure::measure_text;

    #[test]
    fn test_text_sized_by_measurer() {
        let label = text("Metallic").size(10.0);
        let expected = measure_text("Metallic", 10.0);

        let mut tree = RenderTree::from_element(&label);
        tree.compute_layout(500.0, 500.0);

        let bounds = tree.get_bounds(tree.root().unwrap()).unwrap();
        assert!((bounds.width - expected.width).abs() <= 1.0);
        assert!(bounds.height > 0.0);
    }

    #[test]
    fn test_render_info() {
        let label = text("x").color(Color::RED);
        let info = label.text_render_info().unwrap();
        assert_eq!(info.content, "x");
        assert_eq!(info.color, Color::RED);
        assert_eq!(label.element_type_id(), ElementTypeId::Text);
    }
}
