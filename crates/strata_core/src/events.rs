//! Input events
//!
//! Platform input is normalized into [`Event`]s that carry an [`EventType`]
//! code plus typed payload. The render tree turns them into per-node
//! dispatches (adding enter/leave, drag and focus semantics).

/// Numeric event type code
pub type EventType = u32;

/// Event type codes
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const DRAG: EventType = 6;
    pub const DRAG_END: EventType = 7;
    pub const SCROLL: EventType = 8;

    pub const KEY_DOWN: EventType = 20;
    pub const KEY_UP: EventType = 21;
    pub const TEXT_INPUT: EventType = 22;

    pub const FOCUS: EventType = 30;
    pub const BLUR: EventType = 31;

    /// Not delivered by input; used by state machines for enabled toggles
    pub const DISABLE: EventType = 40;
    pub const ENABLE: EventType = 41;
}

/// Keyboard key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(8);
    pub const TAB: KeyCode = KeyCode(9);
    pub const ENTER: KeyCode = KeyCode(13);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const SPACE: KeyCode = KeyCode(32);
    pub const PAGE_UP: KeyCode = KeyCode(33);
    pub const PAGE_DOWN: KeyCode = KeyCode(34);
    pub const END: KeyCode = KeyCode(35);
    pub const HOME: KeyCode = KeyCode(36);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const DELETE: KeyCode = KeyCode(46);
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Event payload
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    Scroll { x: f32, y: f32, delta_x: f32, delta_y: f32 },
    Key { key: KeyCode },
    TextInput { text: String },
    None,
}

/// An input event in window coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    pub modifiers: Modifiers,
}

impl Event {
    fn pointer(event_type: EventType, x: f32, y: f32) -> Self {
        Self {
            event_type,
            data: EventData::Pointer { x, y },
            modifiers: Modifiers::default(),
        }
    }

    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::pointer(event_types::POINTER_DOWN, x, y)
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::pointer(event_types::POINTER_UP, x, y)
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::pointer(event_types::POINTER_MOVE, x, y)
    }

    /// Wheel scroll at a position; positive `delta_y` scrolls up
    pub fn scroll(x: f32, y: f32, delta_x: f32, delta_y: f32) -> Self {
        Self {
            event_type: event_types::SCROLL,
            data: EventData::Scroll {
                x,
                y,
                delta_x,
                delta_y,
            },
            modifiers: Modifiers::default(),
        }
    }

    pub fn key_down(key: KeyCode) -> Self {
        Self {
            event_type: event_types::KEY_DOWN,
            data: EventData::Key { key },
            modifiers: Modifiers::default(),
        }
    }

    pub fn text_input(text: impl Into<String>) -> Self {
        Self {
            event_type: event_types::TEXT_INPUT,
            data: EventData::TextInput { text: text.into() },
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Window position, for pointer and scroll events
    pub fn position(&self) -> Option<(f32, f32)> {
        match self.data {
            EventData::Pointer { x, y } | EventData::Scroll { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }

    pub fn is_keyboard(&self) -> bool {
        matches!(
            self.event_type,
            event_types::KEY_DOWN | event_types::KEY_UP | event_types::TEXT_INPUT
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_position() {
        assert_eq!(Event::pointer_down(3.0, 4.0).position(), Some((3.0, 4.0)));
        assert_eq!(Event::scroll(1.0, 2.0, 0.0, 1.0).position(), Some((1.0, 2.0)));
        assert_eq!(Event::key_down(KeyCode::ENTER).position(), None);
    }

    #[test]
    fn test_keyboard_classification() {
        assert!(Event::text_input("5").is_keyboard());
        assert!(!Event::pointer_up(0.0, 0.0).is_keyboard());
    }
}
