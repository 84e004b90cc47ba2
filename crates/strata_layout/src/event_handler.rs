//! Event handler storage for layout elements
//!
//! ```text
//! Element (Div)
//!     ↓ .on_click(|e| ...)
//! EventHandlers (stored on element)
//!     ↓ built into RenderTree
//! HandlerRegistry (handlers indexed by LayoutNodeId)
//!     ↓ RenderTree::dispatch routes the event
//! Handler callback invoked
//! ```

use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use strata_core::events::{event_types, EventType, KeyCode, Modifiers};

use crate::tree::LayoutNodeId;

/// Callback for handling events
///
/// Uses Rc since element trees live on the UI thread.
pub type EventCallback = Rc<dyn Fn(&EventContext)>;

/// Context passed to event handlers
#[derive(Clone, Debug)]
pub struct EventContext {
    pub event_type: EventType,
    /// The node that received the event
    pub node_id: LayoutNodeId,
    /// Pointer position in tree coordinates
    pub mouse_x: f32,
    pub mouse_y: f32,
    /// Pointer position relative to the node's bounds
    pub local_x: f32,
    pub local_y: f32,
    /// Size of the receiving node
    pub width: f32,
    pub height: f32,
    pub scroll_delta_x: f32,
    pub scroll_delta_y: f32,
    /// Offset from the pointer-down position (DRAG / DRAG_END)
    pub drag_delta_x: f32,
    pub drag_delta_y: f32,
    /// Key for KEY_DOWN
    pub key: Option<KeyCode>,
    /// Committed text for TEXT_INPUT
    pub text: Option<String>,
    pub modifiers: Modifiers,
}

impl EventContext {
    pub fn new(event_type: EventType, node_id: LayoutNodeId) -> Self {
        Self {
            event_type,
            node_id,
            mouse_x: 0.0,
            mouse_y: 0.0,
            local_x: 0.0,
            local_y: 0.0,
            width: 0.0,
            height: 0.0,
            scroll_delta_x: 0.0,
            scroll_delta_y: 0.0,
            drag_delta_x: 0.0,
            drag_delta_y: 0.0,
            key: None,
            text: None,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_mouse_pos(mut self, x: f32, y: f32) -> Self {
        self.mouse_x = x;
        self.mouse_y = y;
        self
    }

    pub fn with_local_pos(mut self, x: f32, y: f32) -> Self {
        self.local_x = x;
        self.local_y = y;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_scroll_delta(mut self, dx: f32, dy: f32) -> Self {
        self.scroll_delta_x = dx;
        self.scroll_delta_y = dy;
        self
    }

    /// Vertical wheel direction: 1 up, -1 down, 0 for no movement
    pub fn scroll_steps(&self) -> i32 {
        if self.scroll_delta_y > 0.0 {
            1
        } else if self.scroll_delta_y < 0.0 {
            -1
        } else {
            0
        }
    }

    pub fn with_drag_delta(mut self, dx: f32, dy: f32) -> Self {
        self.drag_delta_x = dx;
        self.drag_delta_y = dy;
        self
    }

    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Storage for event handlers on an element
#[derive(Default, Clone)]
pub struct EventHandlers {
    handlers: FxHashMap<EventType, SmallVec<[EventCallback; 1]>>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn has_handler(&self, event_type: EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    /// Register a handler for an event type
    pub fn on<F>(&mut self, event_type: EventType, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Rc::new(handler));
    }

    pub fn get(&self, event_type: EventType) -> Option<&[EventCallback]> {
        self.handlers.get(&event_type).map(|v| v.as_slice())
    }

    /// Dispatch an event to all registered handlers for that type
    pub fn dispatch(&self, ctx: &EventContext) {
        if let Some(handlers) = self.handlers.get(&ctx.event_type) {
            for handler in handlers {
                handler(ctx);
            }
        }
    }

    /// Merge another set of handlers into this one
    pub fn merge(&mut self, other: EventHandlers) {
        for (event_type, handlers) in other.handlers {
            self.handlers
                .entry(event_type)
                .or_default()
                .extend(handlers);
        }
    }

    // =========================================================================
    // Convenience registration methods
    // =========================================================================

    /// Register a click handler
    ///
    /// Fires on POINTER_UP, which is delivered to the node that saw the press.
    pub fn on_click<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.on(event_types::POINTER_UP, handler);
    }

    pub fn on_mouse_down<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.on(event_types::POINTER_DOWN, handler);
    }

    pub fn on_hover_enter<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.on(event_types::POINTER_ENTER, handler);
    }

    pub fn on_hover_leave<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.on(event_types::POINTER_LEAVE, handler);
    }

    pub fn on_key_down<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.on(event_types::KEY_DOWN, handler);
    }

    pub fn on_text_input<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.on(event_types::TEXT_INPUT, handler);
    }

    pub fn on_scroll<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.on(event_types::SCROLL, handler);
    }

    pub fn on_blur<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.on(event_types::BLUR, handler);
    }

    /// Register a drag handler (pointer moved while pressed)
    ///
    /// `drag_delta_x/y` hold the offset from the press position.
    pub fn on_drag<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.on(event_types::DRAG, handler);
    }

    /// Register a drag end handler (release after dragging)
    pub fn on_drag_end<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) + 'static,
    {
        self.on(event_types::DRAG_END, handler);
    }
}

/// Handlers of a render tree, indexed by node
#[derive(Default)]
pub struct HandlerRegistry {
    nodes: FxHashMap<LayoutNodeId, EventHandlers>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register handlers for a node
    pub fn register(&mut self, node_id: LayoutNodeId, handlers: EventHandlers) {
        if !handlers.is_empty() {
            self.nodes.insert(node_id, handlers);
        }
    }

    pub fn get(&self, node_id: LayoutNodeId) -> Option<&EventHandlers> {
        self.nodes.get(&node_id)
    }

    /// Dispatch an event to a node's handlers
    pub fn dispatch(&self, ctx: &EventContext) {
        if let Some(handlers) = self.nodes.get(&ctx.node_id) {
            handlers.dispatch(ctx);
        }
    }

    pub fn has_handler(&self, node_id: LayoutNodeId, event_type: EventType) -> bool {
        self.nodes
            .get(&node_id)
            .map(|h| h.has_handler(event_type))
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::cell::Cell;

    fn create_node_id() -> LayoutNodeId {
        let mut sm: SlotMap<LayoutNodeId, ()> = SlotMap::with_key();
        sm.insert(())
    }

    #[test]
    fn test_event_dispatch() {
        let mut handlers = EventHandlers::new();
        let call_count = Rc::new(Cell::new(0));
        let node_id = create_node_id();

        let count = Rc::clone(&call_count);
        handlers.on_click(move |_| count.set(count.get() + 1));

        assert!(handlers.has_handler(event_types::POINTER_UP));

        let ctx = EventContext::new(event_types::POINTER_UP, node_id);
        handlers.dispatch(&ctx);
        handlers.dispatch(&ctx);
        assert_eq!(call_count.get(), 2);

        // Other event types are not routed to click handlers
        handlers.dispatch(&EventContext::new(event_types::POINTER_DOWN, node_id));
        assert_eq!(call_count.get(), 2);
    }

    #[test]
    fn test_merge_keeps_both_handlers() {
        let call_count = Rc::new(Cell::new(0));
        let node_id = create_node_id();

        let mut first = EventHandlers::new();
        let count1 = Rc::clone(&call_count);
        first.on_scroll(move |_| count1.set(count1.get() + 1));

        let mut second = EventHandlers::new();
        let count2 = Rc::clone(&call_count);
        second.on_scroll(move |_| count2.set(count2.get() + 10));

        first.merge(second);
        first.dispatch(&EventContext::new(event_types::SCROLL, node_id));

        assert_eq!(call_count.get(), 11);
    }

    #[test]
    fn test_scroll_steps() {
        let node_id = create_node_id();
        let ctx = |dy| EventContext::new(event_types::SCROLL, node_id).with_scroll_delta(0.0, dy);
        assert_eq!(ctx(3.5).scroll_steps(), 1);
        assert_eq!(ctx(-0.2).scroll_steps(), -1);
        assert_eq!(ctx(0.0).scroll_steps(), 0);
    }

    #[test]
    fn test_handler_registry() {
        let mut registry = HandlerRegistry::new();
        let node_id = create_node_id();
        let seen_key = Rc::new(Cell::new(None));

        let mut handlers = EventHandlers::new();
        let seen = Rc::clone(&seen_key);
        handlers.on_key_down(move |ctx| seen.set(ctx.key));
        registry.register(node_id, handlers);

        assert!(registry.has_handler(node_id, event_types::KEY_DOWN));
        assert!(!registry.has_handler(node_id, event_types::POINTER_DOWN));

        let ctx = EventContext::new(event_types::KEY_DOWN, node_id).with_key(KeyCode::HOME);
        registry.dispatch(&ctx);
        assert_eq!(seen_key.get(), Some(KeyCode::HOME));
    }

    #[test]
    fn test_empty_handlers_not_registered() {
        let mut registry = HandlerRegistry::new();
        let node_id = create_node_id();
        registry.register(node_id, EventHandlers::new());
        assert!(registry.get(node_id).is_none());
    }
}
