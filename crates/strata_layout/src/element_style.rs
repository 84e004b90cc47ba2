//! Visual style overrides for elements
//!
//! Every property is optional: merging a state style onto a base style only
//! replaces what the state sets.
//!
//! ```rust
//! use strata_layout::element_style::ElementStyle;
//! use strata_core::Color;
//!
//! let idle = ElementStyle::new().bg(Color::BLACK).border(1.0, Color::GRAY);
//! let checked = ElementStyle::new().bg(Color::WHITE);
//!
//! let active = idle.merge(&checked);
//! assert_eq!(active.background, Some(Color::WHITE));
//! assert_eq!(active.border_width, Some(1.0));
//! ```

use strata_core::Color;

/// Visual style properties for an element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementStyle {
    pub background: Option<Color>,
    /// Foreground (text and glyph) color
    pub color: Option<Color>,
    pub border_color: Option<Color>,
    pub border_width: Option<f32>,
    pub corner_radius: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// 0.0 = transparent, 1.0 = opaque
    pub opacity: Option<f32>,
}

impl ElementStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border_width = Some(width);
        self.border_color = Some(color);
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    /// `other`'s set properties win
    pub fn merge(&self, other: &ElementStyle) -> ElementStyle {
        ElementStyle {
            background: other.background.or(self.background),
            color: other.color.or(self.color),
            border_color: other.border_color.or(self.border_color),
            border_width: other.border_width.or(self.border_width),
            corner_radius: other.corner_radius.or(self.corner_radius),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            opacity: other.opacity.or(self.opacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ElementStyle::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_only_set_properties() {
        let base = ElementStyle::new().bg(Color::BLACK).rounded(2.0);
        let hover = ElementStyle::new().bg(Color::GRAY);

        let merged = base.merge(&hover);
        assert_eq!(merged.background, Some(Color::GRAY));
        assert_eq!(merged.corner_radius, Some(2.0));
        assert!(merged.opacity.is_none());
    }

    #[test]
    fn test_is_empty() {
        assert!(ElementStyle::new().is_empty());
        assert!(!ElementStyle::new().opacity(0.5).is_empty());
    }
}
