//! Element geometry and render properties

use strata_core::{Brush, Color, CornerRadius, Point, Rect};
use taffy::Layout;

use crate::tree::LayoutNodeId;

/// Computed layout bounds for an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBounds {
    /// X position relative to parent
    pub x: f32,
    /// Y position relative to parent
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementBounds {
    /// Create bounds from a Taffy Layout with parent offset
    pub fn from_layout(layout: &Layout, parent_offset: (f32, f32)) -> Self {
        Self {
            x: parent_offset.0 + layout.location.x,
            y: parent_offset.1 + layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
        }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.to_rect().contains(point)
    }
}

/// Outline drawn inside an element's bounds
#[derive(Clone, Debug, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

/// Visual properties for rendering an element
#[derive(Clone, Debug)]
pub struct RenderProps {
    pub background: Option<Brush>,
    pub border: Option<Border>,
    pub border_radius: CornerRadius,
    /// Multiplies the opacity of the element and its subtree
    pub opacity: f32,
    /// Node ID for looking up children
    pub node_id: Option<LayoutNodeId>,
}

impl Default for RenderProps {
    fn default() -> Self {
        Self {
            background: None,
            border: None,
            border_radius: CornerRadius::ZERO,
            opacity: 1.0,
            node_id: None,
        }
    }
}

impl RenderProps {
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}
