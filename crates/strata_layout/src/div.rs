//! Div builder with tailwind-style methods
//!
//! Provides a fluent builder API for creating layout elements:
//! ```rust
//! use strata_layout::prelude::*;
//! use strata_core::Color;
//!
//! let ui = div()
//!     .flex_row()
//!     .gap_px(15.0)
//!     .p_px(1.0)
//!     .bg(Color::GRAY)
//!     .child(text("Roughness"));
//! ```

use strata_core::{Brush, Color, CornerRadius};
use taffy::prelude::*;

use crate::canvas::CanvasRenderFn;
use crate::element::{Border, RenderProps};
use crate::event_handler::{EventContext, EventHandlers};
use crate::tree::{LayoutNodeId, LayoutTree};

/// A div element builder
pub struct Div {
    style: Style,
    children: Vec<Box<dyn ElementBuilder>>,
    background: Option<Brush>,
    border: Option<Border>,
    border_radius: CornerRadius,
    opacity: f32,
    handlers: EventHandlers,
    element_id: Option<String>,
}

impl Default for Div {
    fn default() -> Self {
        Self::new()
    }
}

impl Div {
    pub fn new() -> Self {
        Self {
            style: Style::default(),
            children: Vec::new(),
            background: None,
            border: None,
            border_radius: CornerRadius::ZERO,
            opacity: 1.0,
            handlers: EventHandlers::new(),
            element_id: None,
        }
    }

    // =========================================================================
    // Display & Flex Direction
    // =========================================================================

    /// Set display to none
    pub fn hidden(mut self) -> Self {
        self.style.display = Display::None;
        self
    }

    /// Hide the element unless `visible`
    pub fn visible(self, visible: bool) -> Self {
        if visible {
            self
        } else {
            self.hidden()
        }
    }

    /// Set flex direction to row (horizontal)
    pub fn flex_row(mut self) -> Self {
        self.style.display = Display::Flex;
        self.style.flex_direction = FlexDirection::Row;
        self
    }

    /// Set flex direction to column (vertical)
    pub fn flex_col(mut self) -> Self {
        self.style.display = Display::Flex;
        self.style.flex_direction = FlexDirection::Column;
        self
    }

    // =========================================================================
    // Flex Properties
    // =========================================================================

    /// Set flex-grow to 1 (element will grow to fill space)
    pub fn flex_grow(mut self) -> Self {
        self.style.flex_grow = 1.0;
        self
    }

    /// Share of the parent's extra space along its main axis
    pub fn stretch(mut self, factor: f32) -> Self {
        self.style.flex_grow = factor;
        self
    }

    /// Set flex-shrink to 0 (element won't shrink)
    pub fn flex_shrink_0(mut self) -> Self {
        self.style.flex_shrink = 0.0;
        self
    }

    // =========================================================================
    // Alignment & Justification
    // =========================================================================

    pub fn items_center(mut self) -> Self {
        self.style.align_items = Some(AlignItems::Center);
        self
    }

    pub fn items_start(mut self) -> Self {
        self.style.align_items = Some(AlignItems::Start);
        self
    }

    pub fn justify_center(mut self) -> Self {
        self.style.justify_content = Some(JustifyContent::Center);
        self
    }

    // =========================================================================
    // Sizing (pixel values)
    // =========================================================================

    pub fn w(mut self, px: f32) -> Self {
        self.style.size.width = Dimension::Length(px);
        self
    }

    /// Set width to 100%
    pub fn w_full(mut self) -> Self {
        self.style.size.width = Dimension::Percent(1.0);
        self
    }

    pub fn h(mut self, px: f32) -> Self {
        self.style.size.height = Dimension::Length(px);
        self
    }

    /// Set height to 100%
    pub fn h_full(mut self) -> Self {
        self.style.size.height = Dimension::Percent(1.0);
        self
    }

    /// Set both width and height in pixels
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.style.size.width = Dimension::Length(w);
        self.style.size.height = Dimension::Length(h);
        self
    }

    pub fn min_w(mut self, px: f32) -> Self {
        self.style.min_size.width = Dimension::Length(px);
        self
    }

    pub fn min_h(mut self, px: f32) -> Self {
        self.style.min_size.height = Dimension::Length(px);
        self
    }

    // =========================================================================
    // Spacing
    // =========================================================================

    /// Set gap between children (in 4px units)
    pub fn gap(mut self, units: f32) -> Self {
        let gap = LengthPercentage::Length(units * 4.0);
        self.style.gap = Size {
            width: gap,
            height: gap,
        };
        self
    }

    /// Set gap between children in pixels
    pub fn gap_px(mut self, px: f32) -> Self {
        let gap = LengthPercentage::Length(px);
        self.style.gap = Size {
            width: gap,
            height: gap,
        };
        self
    }

    /// Set padding on all sides (in 4px units)
    pub fn p(self, units: f32) -> Self {
        self.p_px(units * 4.0)
    }

    /// Set padding on all sides in pixels
    pub fn p_px(mut self, px: f32) -> Self {
        let px = LengthPercentage::Length(px);
        self.style.padding = Rect {
            left: px,
            right: px,
            top: px,
            bottom: px,
        };
        self
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

    // =========================================================================
    // Visual Properties
    // =========================================================================

    pub fn bg(mut self, color: Color) -> Self {
        self.background = Some(Brush::Solid(color));
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border = Some(Border { width, color });
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.border_radius = CornerRadius::uniform(radius);
        self
    }

    /// Multiply the opacity of this element and its subtree
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Name this element so it can be found with `RenderTree::find_by_id`
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    // =========================================================================
    // Children
    // =========================================================================

    pub fn child(mut self, child: impl ElementBuilder + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    /// Add an already boxed child
    pub fn child_box(mut self, child: Box<dyn ElementBuilder>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn ElementBuilder>>,
    {
        self.children.extend(children);
        self
    }

    /// Direct access to the taffy style
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on_click(handler);
        self
    }

    pub fn on_mouse_down<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on_mouse_down(handler);
        self
    }

    pub fn on_hover_enter<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on_hover_enter(handler);
        self
    }

    pub fn on_hover_leave<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on_hover_leave(handler);
        self
    }

    pub fn on_key_down<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on_key_down(handler);
        self
    }

    pub fn on_text_input<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on_text_input(handler);
        self
    }

    pub fn on_scroll<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on_scroll(handler);
        self
    }

    pub fn on_blur<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on_blur(handler);
        self
    }

    pub fn on_drag<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on_drag(handler);
        self
    }

    pub fn on_drag_end<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on_drag_end(handler);
        self
    }

    /// Attach a prepared handler set
    pub fn handlers(mut self, handlers: EventHandlers) -> Self {
        self.handlers.merge(handlers);
        self
    }
}

/// Element type identifier for downcasting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementTypeId {
    Div,
    Text,
    Image,
    Canvas,
}

/// Text render data extracted from element
#[derive(Clone, Debug)]
pub struct TextRenderInfo {
    pub content: String,
    pub font_size: f32,
    pub color: Color,
}

/// Image render data extracted from element
#[derive(Clone, Copy, Debug)]
pub struct ImageRenderInfo {
    pub image: strata_core::ImageId,
    pub opacity: f32,
}

/// Trait for types that can build layout nodes
pub trait ElementBuilder {
    /// Build this element into a layout tree, returning the node ID
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId;

    /// Get the render properties for this element
    fn render_props(&self) -> RenderProps;

    /// Get children builders (for recursive traversal)
    fn children_builders(&self) -> &[Box<dyn ElementBuilder>];

    fn element_type_id(&self) -> ElementTypeId {
        ElementTypeId::Div
    }

    fn text_render_info(&self) -> Option<TextRenderInfo> {
        None
    }

    fn image_render_info(&self) -> Option<ImageRenderInfo> {
        None
    }

    fn canvas_render_info(&self) -> Option<CanvasRenderFn> {
        None
    }

    fn event_handlers(&self) -> Option<&EventHandlers> {
        None
    }

    /// Name used by `RenderTree::find_by_id`
    fn element_id(&self) -> Option<&str> {
        None
    }
}

impl ElementBuilder for Div {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        let node = tree.create_node(self.style.clone());

        for child in &self.children {
            let child_node = child.build(tree);
            tree.add_child(node, child_node);
        }

        node
    }

    fn render_props(&self) -> RenderProps {
        RenderProps {
            background: self.background.clone(),
            border: self.border.clone(),
            border_radius: self.border_radius,
            opacity: self.opacity,
            node_id: None,
        }
    }

    fn children_builders(&self) -> &[Box<dyn ElementBuilder>] {
        &self.children
    }

    fn event_handlers(&self) -> Option<&EventHandlers> {
        if self.handlers.is_empty() {
            None
        } else {
            Some(&self.handlers)
        }
    }

    fn element_id(&self) -> Option<&str> {
        self.element_id.as_deref()
    }
}

impl<E: ElementBuilder + ?Sized> ElementBuilder for Box<E> {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        (**self).build(tree)
    }

    fn render_props(&self) -> RenderProps {
        (**self).render_props()
    }

    fn children_builders(&self) -> &[Box<dyn ElementBuilder>] {
        (**self).children_builders()
    }

    fn element_type_id(&self) -> ElementTypeId {
        (**self).element_type_id()
    }

    fn text_render_info(&self) -> Option<TextRenderInfo> {
        (**self).text_render_info()
    }

    fn image_render_info(&self) -> Option<ImageRenderInfo> {
        (**self).image_render_info()
    }

    fn canvas_render_info(&self) -> Option<CanvasRenderFn> {
        (**self).canvas_render_info()
    }

    fn event_handlers(&self) -> Option<&EventHandlers> {
        (**self).event_handlers()
    }

    fn element_id(&self) -> Option<&str> {
        (**self).element_id()
    }
}

/// Convenience function to create a new div
pub fn div() -> Div {
    Div::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderTree;

    #[test]
    fn test_div_builder() {
        let d = div().w(100.0).h(50.0).flex_row().gap_px(15.0).p_px(1.0);

        assert!(matches!(d.style.display, Display::Flex));
        assert!(matches!(d.style.flex_direction, FlexDirection::Row));
        assert_eq!(d.style.gap.width, LengthPercentage::Length(15.0));
    }

    #[test]
    fn test_div_with_children() {
        let parent = div().flex_col().child(div().h(20.0)).child(div().h(30.0));

        assert_eq!(parent.children.len(), 2);
    }

    #[test]
    fn test_visible_false_sets_display_none() {
        assert!(matches!(div().visible(false).style.display, Display::None));
        assert!(matches!(div().visible(true).style.display, Display::Flex));
    }

    #[test]
    fn test_stretch_factors_split_extra_space() {
        let ui = div()
            .w(300.0)
            .h(20.0)
            .flex_row()
            .p_px(1.0)
            .gap_px(15.0)
            .child(div().w(40.0).stretch(0.0))
            .child(div().stretch(1.0));

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(300.0, 20.0);

        let root = tree.root().unwrap();
        let children = tree.layout_tree.children(root);
        let label = tree.layout_tree.get_bounds(children[0], (0.0, 0.0)).unwrap();
        let content = tree.layout_tree.get_bounds(children[1], (0.0, 0.0)).unwrap();

        assert_eq!(label.x, 1.0);
        assert_eq!(label.width, 40.0);
        assert_eq!(content.x, 56.0);
        assert_eq!(content.width, 243.0);
    }

    #[test]
    fn test_hidden_child_takes_no_space() {
        let ui = div()
            .w(100.0)
            .flex_col()
            .child(div().h(20.0))
            .child(div().h(30.0).hidden())
            .child(div().h(10.0));

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(100.0, 100.0);

        let root = tree.root().unwrap();
        let children = tree.layout_tree.children(root);
        let last = tree.layout_tree.get_bounds(children[2], (0.0, 0.0)).unwrap();
        assert_eq!(last.y, 20.0);
    }
}
