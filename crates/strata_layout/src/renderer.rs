//! RenderTree bridge connecting layout to rendering and input
//!
//! A `RenderTree` is built from an element tree, laid out with taffy, then
//! painted into any [`DrawContext`]. It also routes input [`Event`]s to the
//! handlers registered on elements, tracking hover, pointer capture and
//! keyboard focus.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use strata_core::events::{event_types, EventData, EventType};
use strata_core::{
    Color, DrawContext, Event, ImageId, Point, Rect, Stroke, TextBaseline, TextStyle, Transform,
};
use taffy::prelude::*;

use crate::canvas::{CanvasBounds, CanvasRenderFn};
use crate::div::{ElementBuilder, ElementTypeId};
use crate::element::{ElementBounds, RenderProps};
use crate::event_handler::{EventContext, HandlerRegistry};
use crate::tree::{LayoutNodeId, LayoutTree};

/// Stores an element's type for rendering
#[derive(Clone)]
pub enum ElementType {
    Div,
    Text(TextData),
    Image(ImageData),
    Canvas(CanvasData),
}

/// Text data for rendering
#[derive(Clone, Debug)]
pub struct TextData {
    pub content: String,
    pub font_size: f32,
    pub color: Color,
}

/// Image data for rendering
#[derive(Clone, Copy, Debug)]
pub struct ImageData {
    pub image: ImageId,
    pub opacity: f32,
}

/// Canvas data for rendering
#[derive(Clone)]
pub struct CanvasData {
    pub render_fn: Option<CanvasRenderFn>,
}

/// Node data for rendering
#[derive(Clone)]
pub struct RenderNode {
    pub props: RenderProps,
    pub element_type: ElementType,
    /// Name given with `Div::id`
    pub element_id: Option<String>,
}

/// Pointer and keyboard routing state
#[derive(Clone, Debug, Default)]
struct InteractionState {
    /// Nodes under the pointer, innermost first
    hovered: Vec<LayoutNodeId>,
    /// Node that captured the pointer on press
    pressed: Option<LayoutNodeId>,
    press_position: (f32, f32),
    dragging: bool,
    focused: Option<LayoutNodeId>,
}

/// Layout, paint and input routing for one element tree
pub struct RenderTree {
    /// The layout tree
    pub layout_tree: LayoutTree,
    /// Render data for each node (tree order)
    render_nodes: IndexMap<LayoutNodeId, RenderNode>,
    parents: FxHashMap<LayoutNodeId, LayoutNodeId>,
    root: Option<LayoutNodeId>,
    handler_registry: HandlerRegistry,
    interaction: InteractionState,
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTree {
    pub fn new() -> Self {
        Self {
            layout_tree: LayoutTree::new(),
            render_nodes: IndexMap::new(),
            parents: FxHashMap::default(),
            root: None,
            handler_registry: HandlerRegistry::new(),
            interaction: InteractionState::default(),
        }
    }

    /// Build a render tree from an element builder
    pub fn from_element<E: ElementBuilder + ?Sized>(element: &E) -> Self {
        let mut tree = Self::new();
        let root = element.build(&mut tree.layout_tree);
        tree.collect_render_props(element, root, None);
        tree.root = Some(root);
        tracing::trace!(nodes = tree.layout_tree.len(), "render tree built");
        tree
    }

    /// Walk the element tree again to collect render data for each built node
    fn collect_render_props<E: ElementBuilder + ?Sized>(
        &mut self,
        element: &E,
        node_id: LayoutNodeId,
        parent: Option<LayoutNodeId>,
    ) {
        let mut props = element.render_props();
        props.node_id = Some(node_id);

        let element_type = match element.element_type_id() {
            ElementTypeId::Text => match element.text_render_info() {
                Some(info) => ElementType::Text(TextData {
                    content: info.content,
                    font_size: info.font_size,
                    color: info.color,
                }),
                None => ElementType::Div,
            },
            ElementTypeId::Image => match element.image_render_info() {
                Some(info) => ElementType::Image(ImageData {
                    image: info.image,
                    opacity: info.opacity,
                }),
                None => ElementType::Div,
            },
            ElementTypeId::Canvas => ElementType::Canvas(CanvasData {
                render_fn: element.canvas_render_info(),
            }),
            ElementTypeId::Div => ElementType::Div,
        };

        self.render_nodes.insert(
            node_id,
            RenderNode {
                props,
                element_type,
                element_id: element.element_id().map(str::to_owned),
            },
        );

        if let Some(parent) = parent {
            self.parents.insert(node_id, parent);
        }

        if let Some(handlers) = element.event_handlers() {
            self.handler_registry.register(node_id, handlers.clone());
        }

        // Children were built in order, so match them by index
        let child_node_ids = self.layout_tree.children(node_id);
        for (child_builder, &child_node_id) in element
            .children_builders()
            .iter()
            .zip(child_node_ids.iter())
        {
            self.collect_render_props(child_builder.as_ref(), child_node_id, Some(node_id));
        }
    }

    pub fn root(&self) -> Option<LayoutNodeId> {
        self.root
    }

    /// Compute layout for the given viewport size
    pub fn compute_layout(&mut self, width: f32, height: f32) {
        if let Some(root) = self.root {
            self.layout_tree.compute_layout(
                root,
                Size {
                    width: AvailableSpace::Definite(width),
                    height: AvailableSpace::Definite(height),
                },
            );
        }
    }

    /// Lay out without constraints and return the root's preferred size
    pub fn compute_intrinsic(&mut self) -> strata_core::Size {
        let Some(root) = self.root else {
            return strata_core::Size::ZERO;
        };
        self.layout_tree.compute_layout(root, Size::MAX_CONTENT);
        self.get_bounds(root)
            .map(|b| strata_core::Size::new(b.width, b.height))
            .unwrap_or_default()
    }

    pub fn layout(&self) -> &LayoutTree {
        &self.layout_tree
    }

    pub fn handler_registry(&self) -> &HandlerRegistry {
        &self.handler_registry
    }

    /// Bounds relative to the parent node
    pub fn get_bounds(&self, node: LayoutNodeId) -> Option<ElementBounds> {
        self.layout_tree.get_bounds(node, (0.0, 0.0))
    }

    /// Bounds in tree coordinates
    pub fn get_absolute_bounds(&self, node: LayoutNodeId) -> Option<ElementBounds> {
        let mut bounds = self.get_bounds(node)?;
        let mut current = node;
        while let Some(&parent) = self.parents.get(&current) {
            let parent_bounds = self.get_bounds(parent)?;
            bounds.x += parent_bounds.x;
            bounds.y += parent_bounds.y;
            current = parent;
        }
        Some(bounds)
    }

    pub fn get_render_node(&self, node: LayoutNodeId) -> Option<&RenderNode> {
        self.render_nodes.get(&node)
    }

    /// Iterate over all nodes in tree order
    pub fn iter_nodes(&self) -> impl Iterator<Item = (LayoutNodeId, &RenderNode)> {
        self.render_nodes.iter().map(|(&id, node)| (id, node))
    }

    pub fn parent(&self, node: LayoutNodeId) -> Option<LayoutNodeId> {
        self.parents.get(&node).copied()
    }

    /// Find the first node named `id` with `Div::id`
    pub fn find_by_id(&self, id: &str) -> Option<LayoutNodeId> {
        self.render_nodes
            .iter()
            .find(|(_, node)| node.element_id.as_deref() == Some(id))
            .map(|(&node_id, _)| node_id)
    }

    /// The node and its ancestors, innermost first
    pub fn ancestors(&self, node: LayoutNodeId) -> Vec<LayoutNodeId> {
        let mut chain = vec![node];
        let mut current = node;
        while let Some(&parent) = self.parents.get(&current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    fn is_hidden(&self, node: LayoutNodeId) -> bool {
        self.layout_tree
            .style(node)
            .map(|style| style.display == Display::None)
            .unwrap_or(true)
    }

    /// Whether neither the node nor any ancestor is `display: none`
    pub fn is_node_visible(&self, node: LayoutNodeId) -> bool {
        self.ancestors(node).into_iter().all(|n| !self.is_hidden(n))
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint the tree into `ctx`
    pub fn render(&self, ctx: &mut dyn DrawContext) {
        if let Some(root) = self.root {
            self.render_node(ctx, root, (0.0, 0.0));
        }
    }

    fn render_node(&self, ctx: &mut dyn DrawContext, node: LayoutNodeId, parent_offset: (f32, f32)) {
        if self.is_hidden(node) {
            return;
        }

        let Some(bounds) = self.layout_tree.get_bounds(node, parent_offset) else {
            return;
        };

        let Some(render_node) = self.render_nodes.get(&node) else {
            return;
        };

        ctx.push_transform(Transform::translate(bounds.x, bounds.y));

        let has_opacity = render_node.props.opacity < 1.0;
        if has_opacity {
            ctx.push_opacity(render_node.props.opacity);
        }

        let rect = Rect::new(0.0, 0.0, bounds.width, bounds.height);
        let radius = render_node.props.border_radius;

        if let Some(ref bg) = render_node.props.background {
            ctx.fill_rect(rect, radius, bg.clone());
        }

        if let Some(ref border) = render_node.props.border {
            ctx.stroke_rect(rect, radius, &Stroke::new(border.width), border.color.into());
        }

        match &render_node.element_type {
            ElementType::Div => {}
            ElementType::Text(text) => {
                let style = TextStyle::default()
                    .with_size(text.font_size)
                    .with_color(text.color)
                    .with_baseline(TextBaseline::Top);
                ctx.draw_text(&text.content, Point::ZERO, &style);
            }
            ElementType::Image(image) => {
                if image.opacity < 1.0 {
                    ctx.push_opacity(image.opacity);
                    ctx.draw_image(image.image, rect);
                    ctx.pop_opacity();
                } else {
                    ctx.draw_image(image.image, rect);
                }
            }
            ElementType::Canvas(canvas) => {
                if let Some(render_fn) = &canvas.render_fn {
                    render_fn(
                        ctx,
                        CanvasBounds {
                            width: bounds.width,
                            height: bounds.height,
                        },
                    );
                }
            }
        }

        for child_id in self.layout_tree.children(node) {
            self.render_node(ctx, child_id, (0.0, 0.0));
        }

        if has_opacity {
            ctx.pop_opacity();
        }

        ctx.pop_transform();
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Innermost visible node under the point; later siblings win
    pub fn hit_test(&self, x: f32, y: f32) -> Option<LayoutNodeId> {
        let root = self.root?;
        self.hit_test_node(root, (0.0, 0.0), Point::new(x, y))
    }

    fn hit_test_node(
        &self,
        node: LayoutNodeId,
        parent_offset: (f32, f32),
        point: Point,
    ) -> Option<LayoutNodeId> {
        if self.is_hidden(node) {
            return None;
        }
        let bounds = self.layout_tree.get_bounds(node, parent_offset)?;
        if !bounds.contains(point) {
            return None;
        }
        for child in self.layout_tree.children(node).into_iter().rev() {
            if let Some(hit) = self.hit_test_node(child, (bounds.x, bounds.y), point) {
                return Some(hit);
            }
        }
        Some(node)
    }

    /// First node from `node` up to the root with a handler for `event_type`
    fn handler_target(&self, node: LayoutNodeId, event_type: EventType) -> Option<LayoutNodeId> {
        self.ancestors(node)
            .into_iter()
            .find(|&n| self.handler_registry.has_handler(n, event_type))
    }

    fn first_with_any(&self, node: LayoutNodeId, event_types: &[EventType]) -> Option<LayoutNodeId> {
        self.ancestors(node).into_iter().find(|&n| {
            event_types
                .iter()
                .any(|&t| self.handler_registry.has_handler(n, t))
        })
    }

    fn context(&self, event_type: EventType, node: LayoutNodeId, x: f32, y: f32) -> EventContext {
        let bounds = self.get_absolute_bounds(node).unwrap_or_default();
        EventContext::new(event_type, node)
            .with_mouse_pos(x, y)
            .with_local_pos(x - bounds.x, y - bounds.y)
            .with_size(bounds.width, bounds.height)
    }

    fn send(&self, ctx: &EventContext) -> bool {
        if self.handler_registry.has_handler(ctx.node_id, ctx.event_type) {
            self.handler_registry.dispatch(ctx);
            true
        } else {
            false
        }
    }

    /// Route an input event; returns true when some handler received it
    ///
    /// Pointer presses capture the nearest pointer-handling ancestor: drags and
    /// the release go to it even when the pointer has left its bounds. Key and
    /// text events go to the focused node, which is the nearest key-handling
    /// ancestor of the last press.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match (&event.data, event.event_type) {
            (EventData::Pointer { x, y }, event_types::POINTER_MOVE) => {
                self.dispatch_pointer_move(*x, *y)
            }
            (EventData::Pointer { x, y }, event_types::POINTER_DOWN) => {
                self.dispatch_pointer_down(*x, *y, event)
            }
            (EventData::Pointer { x, y }, event_types::POINTER_UP) => {
                self.dispatch_pointer_up(*x, *y, event)
            }
            (
                EventData::Scroll {
                    x,
                    y,
                    delta_x,
                    delta_y,
                },
                _,
            ) => {
                let Some(hit) = self.hit_test(*x, *y) else {
                    return false;
                };
                let Some(target) = self.handler_target(hit, event_types::SCROLL) else {
                    return false;
                };
                let ctx = self
                    .context(event_types::SCROLL, target, *x, *y)
                    .with_scroll_delta(*delta_x, *delta_y)
                    .with_modifiers(event.modifiers);
                self.send(&ctx)
            }
            (EventData::Key { key }, event_type) => {
                let Some(focused) = self.interaction.focused else {
                    return false;
                };
                let ctx = EventContext::new(event_type, focused)
                    .with_key(*key)
                    .with_modifiers(event.modifiers);
                self.send(&ctx)
            }
            (EventData::TextInput { text }, _) => {
                let Some(focused) = self.interaction.focused else {
                    return false;
                };
                let ctx = EventContext::new(event_types::TEXT_INPUT, focused)
                    .with_text(text.clone())
                    .with_modifiers(event.modifiers);
                self.send(&ctx)
            }
            _ => false,
        }
    }

    fn dispatch_pointer_move(&mut self, x: f32, y: f32) -> bool {
        let mut handled = false;

        let now_hovered = self
            .hit_test(x, y)
            .map(|hit| self.ancestors(hit))
            .unwrap_or_default();
        let previously_hovered = std::mem::replace(&mut self.interaction.hovered, now_hovered);

        for &node in previously_hovered
            .iter()
            .filter(|n| !self.interaction.hovered.contains(n))
        {
            handled |= self.send(&self.context(event_types::POINTER_LEAVE, node, x, y));
        }
        for &node in self
            .interaction
            .hovered
            .iter()
            .filter(|n| !previously_hovered.contains(n))
        {
            handled |= self.send(&self.context(event_types::POINTER_ENTER, node, x, y));
        }

        if let Some(pressed) = self.interaction.pressed {
            self.interaction.dragging = true;
            let (start_x, start_y) = self.interaction.press_position;
            let ctx = self
                .context(event_types::DRAG, pressed, x, y)
                .with_drag_delta(x - start_x, y - start_y);
            handled |= self.send(&ctx);
        } else if let Some(&hit) = self.interaction.hovered.first() {
            if let Some(target) = self.handler_target(hit, event_types::POINTER_MOVE) {
                handled |= self.send(&self.context(event_types::POINTER_MOVE, target, x, y));
            }
        }

        handled
    }

    fn dispatch_pointer_down(&mut self, x: f32, y: f32, event: &Event) -> bool {
        let Some(hit) = self.hit_test(x, y) else {
            self.set_focus(None);
            return false;
        };

        let focus = self.first_with_any(hit, &[event_types::KEY_DOWN, event_types::TEXT_INPUT]);
        self.set_focus(focus);

        self.interaction.pressed = self.first_with_any(
            hit,
            &[
                event_types::POINTER_DOWN,
                event_types::POINTER_UP,
                event_types::DRAG,
                event_types::DRAG_END,
            ],
        );
        self.interaction.press_position = (x, y);
        self.interaction.dragging = false;

        match self.handler_target(hit, event_types::POINTER_DOWN) {
            Some(target) => {
                let ctx = self
                    .context(event_types::POINTER_DOWN, target, x, y)
                    .with_modifiers(event.modifiers);
                self.send(&ctx)
            }
            None => false,
        }
    }

    fn dispatch_pointer_up(&mut self, x: f32, y: f32, event: &Event) -> bool {
        let pressed = self.interaction.pressed.take();
        let was_dragging = std::mem::take(&mut self.interaction.dragging);
        let (start_x, start_y) = self.interaction.press_position;

        let Some(pressed) = pressed else {
            let Some(hit) = self.hit_test(x, y) else {
                return false;
            };
            return match self.handler_target(hit, event_types::POINTER_UP) {
                Some(target) => self.send(&self.context(event_types::POINTER_UP, target, x, y)),
                None => false,
            };
        };

        let mut handled = false;
        if was_dragging {
            let ctx = self
                .context(event_types::DRAG_END, pressed, x, y)
                .with_drag_delta(x - start_x, y - start_y);
            handled |= self.send(&ctx);
        }

        // A release only counts as a click on the node that saw the press
        let released_inside = self
            .get_absolute_bounds(pressed)
            .map(|b| b.contains(Point::new(x, y)))
            .unwrap_or(false);
        if released_inside {
            let ctx = self
                .context(event_types::POINTER_UP, pressed, x, y)
                .with_modifiers(event.modifiers);
            handled |= self.send(&ctx);
        }

        handled
    }

    fn set_focus(&mut self, node: Option<LayoutNodeId>) {
        if self.interaction.focused == node {
            return;
        }
        if let Some(previous) = self.interaction.focused.take() {
            self.send(&EventContext::new(event_types::BLUR, previous));
        }
        if let Some(next) = node {
            self.send(&EventContext::new(event_types::FOCUS, next));
        }
        self.interaction.focused = node;
    }

    /// Node that receives key and text events
    pub fn focused(&self) -> Option<LayoutNodeId> {
        self.interaction.focused
    }

    /// Move keyboard focus without a pointer press
    pub fn focus(&mut self, node: LayoutNodeId) {
        self.set_focus(Some(node));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::div::div;
    use crate::text::text;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use strata_core::{DrawCommand, KeyCode, RecordingContext};

    #[test]
    fn test_render_tree_from_element() {
        let ui = div().w(100.0).h(100.0).child(div().w(50.0).h(50.0));

        let tree = RenderTree::from_element(&ui);
        assert!(tree.root().is_some());
        assert_eq!(tree.iter_nodes().count(), 2);
    }

    #[test]
    fn test_compute_layout() {
        let ui = div()
            .w(200.0)
            .h(200.0)
            .flex_col()
            .child(div().h(50.0).w_full())
            .child(div().flex_grow().w_full());

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(200.0, 200.0);

        let root = tree.root().unwrap();
        let bounds = tree.get_bounds(root).unwrap();

        assert_eq!(bounds.width, 200.0);
        assert_eq!(bounds.height, 200.0);

        let children = tree.layout_tree.children(root);
        let grown = tree.get_bounds(children[1]).unwrap();
        assert_eq!(grown.y, 50.0);
        assert_eq!(grown.height, 150.0);
    }

    #[test]
    fn test_absolute_bounds_and_find_by_id() {
        let ui = div()
            .p_px(10.0)
            .child(div().p_px(5.0).child(div().id("leaf").size(10.0, 10.0)));

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(100.0, 100.0);

        let leaf = tree.find_by_id("leaf").unwrap();
        let bounds = tree.get_absolute_bounds(leaf).unwrap();
        assert_eq!((bounds.x, bounds.y), (15.0, 15.0));
        assert!(tree.find_by_id("missing").is_none());
    }

    #[test]
    fn test_hidden_subtree_not_painted_or_hit() {
        let ui = div()
            .w(100.0)
            .h(100.0)
            .child(div().id("gone").hidden().child(text("secret")))
            .child(text("shown"));

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(100.0, 100.0);

        let mut ctx = RecordingContext::new(strata_core::Size::new(100.0, 100.0));
        tree.render(&mut ctx);
        assert_eq!(ctx.texts(), vec!["shown"]);

        let gone = tree.find_by_id("gone").unwrap();
        assert!(!tree.is_node_visible(gone));
        let secret = tree.layout_tree.children(gone)[0];
        assert!(!tree.is_node_visible(secret));
    }

    #[test]
    fn test_render_pushes_balanced_transforms() {
        let ui = div().bg(Color::RED).opacity(0.5).child(div().size(5.0, 5.0));

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(10.0, 10.0);

        let mut ctx = RecordingContext::new(strata_core::Size::new(10.0, 10.0));
        tree.render(&mut ctx);

        let pushes = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::PushTransform(_)))
            .count();
        let pops = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::PopTransform))
            .count();
        assert_eq!(pushes, 2);
        assert_eq!(pushes, pops);
        assert!(ctx.commands().contains(&DrawCommand::PushOpacity(0.5)));
    }

    #[test]
    fn test_click_goes_to_pressed_node() {
        let clicks = Rc::new(Cell::new(0));
        let clicks_in_handler = Rc::clone(&clicks);

        let ui = div()
            .w(100.0)
            .h(20.0)
            .flex_row()
            .child(
                div()
                    .id("button")
                    .size(20.0, 20.0)
                    .on_click(move |_| clicks_in_handler.set(clicks_in_handler.get() + 1)),
            );

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(100.0, 20.0);

        // Press has no handler of its own but captures the pointer
        assert!(!tree.dispatch(&Event::pointer_down(5.0, 5.0)));
        assert!(tree.dispatch(&Event::pointer_up(6.0, 5.0)));
        assert_eq!(clicks.get(), 1);

        // Released outside the button: no click
        tree.dispatch(&Event::pointer_down(5.0, 5.0));
        tree.dispatch(&Event::pointer_up(50.0, 5.0));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_drag_delivers_delta_and_end() {
        let deltas = Rc::new(RefCell::new(Vec::new()));
        let ended = Rc::new(Cell::new(false));
        let (d, e) = (Rc::clone(&deltas), Rc::clone(&ended));

        let ui = div()
            .size(100.0, 20.0)
            .on_drag(move |ctx| d.borrow_mut().push(ctx.drag_delta_x))
            .on_drag_end(move |_| e.set(true));

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(100.0, 20.0);

        tree.dispatch(&Event::pointer_down(10.0, 10.0));
        tree.dispatch(&Event::pointer_move(30.0, 10.0));
        // Outside the element: still captured
        tree.dispatch(&Event::pointer_move(150.0, 10.0));
        tree.dispatch(&Event::pointer_up(150.0, 10.0));

        assert_eq!(*deltas.borrow(), vec![20.0, 140.0]);
        assert!(ended.get());
    }

    #[test]
    fn test_keys_go_to_focused_node() {
        let keys = Rc::new(RefCell::new(Vec::new()));
        let keys_in_handler = Rc::clone(&keys);
        let blurred = Rc::new(Cell::new(false));
        let blurred_in_handler = Rc::clone(&blurred);

        let ui = div()
            .w(100.0)
            .h(20.0)
            .flex_row()
            .child(
                div()
                    .size(20.0, 20.0)
                    .on_key_down(move |ctx| keys_in_handler.borrow_mut().push(ctx.key))
                    .on_blur(move |_| blurred_in_handler.set(true)),
            )
            .child(div().size(20.0, 20.0));

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(100.0, 20.0);

        // Nothing focused yet
        assert!(!tree.dispatch(&Event::key_down(KeyCode::UP)));

        tree.dispatch(&Event::pointer_down(5.0, 5.0));
        tree.dispatch(&Event::pointer_up(5.0, 5.0));
        assert!(tree.dispatch(&Event::key_down(KeyCode::UP)));
        assert_eq!(*keys.borrow(), vec![Some(KeyCode::UP)]);

        // Pressing elsewhere moves focus away
        tree.dispatch(&Event::pointer_down(30.0, 5.0));
        assert!(blurred.get());
        assert!(tree.focused().is_none());
    }

    #[test]
    fn test_scroll_bubbles_to_handler() {
        let scrolled = Rc::new(Cell::new(0.0));
        let s = Rc::clone(&scrolled);

        let ui = div()
            .size(100.0, 100.0)
            .on_scroll(move |ctx| s.set(ctx.scroll_delta_y))
            .child(div().size(50.0, 50.0));

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(100.0, 100.0);

        assert!(tree.dispatch(&Event::scroll(10.0, 10.0, 0.0, 1.0)));
        assert_eq!(scrolled.get(), 1.0);
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (enter_log, leave_log) = (Rc::clone(&log), Rc::clone(&log));

        let ui = div().w(100.0).h(20.0).flex_row().child(
            div()
                .size(20.0, 20.0)
                .on_hover_enter(move |_| enter_log.borrow_mut().push("enter"))
                .on_hover_leave(move |_| leave_log.borrow_mut().push("leave")),
        );

        let mut tree = RenderTree::from_element(&ui);
        tree.compute_layout(100.0, 20.0);

        tree.dispatch(&Event::pointer_move(5.0, 5.0));
        tree.dispatch(&Event::pointer_move(6.0, 5.0));
        tree.dispatch(&Event::pointer_move(60.0, 5.0));

        assert_eq!(*log.borrow(), vec!["enter", "leave"]);
    }
}
