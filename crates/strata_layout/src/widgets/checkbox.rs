//! Checkbox with a stylesheet skin
//!
//! The indicator's look comes from the theme unless a stylesheet is set.
//! Stylesheets style the `#indicator` selector and its `:hover`, `:pressed`,
//! `:checked` and `:disabled` states:
//!
//! ```rust
//! use strata_layout::context::UiContext;
//! use strata_layout::css_parser::Stylesheet;
//! use strata_layout::widgets::Checkbox;
//! use strata_core::Color;
//!
//! let ctx = UiContext::new();
//! let checkbox = Checkbox::new(&ctx, true);
//! checkbox.set_stylesheet(Stylesheet::parse_or_empty(
//!     "#indicator:checked { background: #ffffff; }",
//! ));
//! assert_eq!(checkbox.style().background, Some(Color::WHITE));
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use strata_core::events::event_types::*;
use strata_core::{
    Color, ColorToken, Effect, EventType, ResourceBundle, State, StateMachine, StateTransitions,
    ThemeState,
};
use tracing::debug;

use crate::context::UiContext;
use crate::css_parser::{ElementState, Stylesheet};
use crate::div::{div, ElementBuilder};
use crate::element_style::ElementStyle;
use crate::widgets::{next_widget_id, Widget, DISABLED_OPACITY};

/// Selector id styled by checkbox stylesheets
pub const INDICATOR_ID: &str = "indicator";

/// Pointer interaction state of a checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckboxInteraction {
    #[default]
    Idle,
    Hovered,
    Pressed,
    Disabled,
}

impl StateTransitions for CheckboxInteraction {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use CheckboxInteraction::*;
        match (self, event) {
            (Idle, POINTER_ENTER) => Some(Hovered),
            (Hovered, POINTER_LEAVE) => Some(Idle),
            (Hovered, POINTER_DOWN) => Some(Pressed),
            (Pressed, POINTER_UP) => Some(Hovered),
            (Pressed, POINTER_LEAVE) => Some(Idle),
            (Disabled, ENABLE) => Some(Idle),
            (Disabled, _) => None,
            (_, DISABLE) => Some(Disabled),
            _ => None,
        }
    }
}

impl CheckboxInteraction {
    fn element_state(&self) -> Option<ElementState> {
        match self {
            CheckboxInteraction::Hovered => Some(ElementState::Hover),
            CheckboxInteraction::Pressed => Some(ElementState::Pressed),
            CheckboxInteraction::Disabled => Some(ElementState::Disabled),
            CheckboxInteraction::Idle => None,
        }
    }
}

type SharedInteraction = Arc<Mutex<StateMachine<CheckboxInteraction>>>;

fn send(interaction: &SharedInteraction, event: EventType) -> bool {
    interaction
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .send(event)
}

/// A two-state checkbox
pub struct Checkbox {
    id: String,
    checked: State<bool>,
    enabled: State<bool>,
    interaction: SharedInteraction,
    stylesheet: Mutex<Option<Stylesheet>>,
}

impl Checkbox {
    pub fn new(ctx: &UiContext, checked: bool) -> Self {
        Self {
            id: next_widget_id("checkbox"),
            checked: State::new(ctx.graph(), checked),
            enabled: State::new(ctx.graph(), true),
            interaction: Arc::new(Mutex::new(StateMachine::default())),
            stylesheet: Mutex::new(None),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }

    /// Set the checked state; returns true when it changed
    pub fn set_checked(&self, checked: bool) -> bool {
        self.checked.set(checked)
    }

    pub fn toggle(&self) {
        self.checked.update(|checked| !checked);
    }

    /// The reactive checked state, for effect subscriptions
    pub fn checked_state(&self) -> &State<bool> {
        &self.checked
    }

    /// Call `f` with the new checked state after every change
    pub fn on_toggled(&self, f: impl Fn(bool) + Send + Sync + 'static) -> Effect {
        self.checked.on_change(f)
    }

    pub fn interaction(&self) -> CheckboxInteraction {
        self.interaction
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state()
    }

    pub fn set_stylesheet(&self, stylesheet: Stylesheet) {
        *self.stylesheet.lock().unwrap_or_else(PoisonError::into_inner) = Some(stylesheet);
    }

    pub fn has_stylesheet(&self) -> bool {
        self.stylesheet
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Apply the stylesheet at `path`
    ///
    /// A missing resource or a stylesheet with errors leaves the current
    /// skin in place; returns whether the stylesheet was applied.
    pub fn load_stylesheet(&self, resources: &ResourceBundle, path: &str) -> bool {
        let source = match resources.read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                debug!(path, %err, "checkbox stylesheet unavailable, keeping default skin");
                return false;
            }
        };

        let result = Stylesheet::parse_with_errors(&source);
        result.log_diagnostics();
        if result.has_errors() {
            debug!(path, "checkbox stylesheet has errors, keeping default skin");
            return false;
        }

        self.set_stylesheet(result.stylesheet);
        true
    }

    /// Theme-derived indicator style used without a stylesheet
    pub fn default_style(&self) -> ElementStyle {
        let theme = ThemeState::get();
        let size = theme.metrics.checkbox_size;
        let base = ElementStyle::new()
            .bg(theme.color(ColorToken::InputBg))
            .color(theme.color(ColorToken::TextPrimary))
            .border(1.0, theme.color(ColorToken::Border))
            .rounded(theme.radii.radius_sm)
            .size(size, size);

        match self.interaction() {
            CheckboxInteraction::Hovered | CheckboxInteraction::Pressed => {
                base.merge(&ElementStyle::new().border(1.0, theme.color(ColorToken::BorderFocus)))
            }
            CheckboxInteraction::Disabled => base.merge(
                &ElementStyle::new()
                    .bg(theme.color(ColorToken::InputBgDisabled))
                    .opacity(DISABLED_OPACITY),
            ),
            CheckboxInteraction::Idle => base,
        }
    }

    /// Indicator style for the current state
    pub fn style(&self) -> ElementStyle {
        let base = self.default_style();
        let stylesheet = self.stylesheet.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sheet) = stylesheet.as_ref() else {
            return base;
        };

        let mut states = Vec::with_capacity(2);
        if self.is_checked() {
            states.push(ElementState::Checked);
        }
        states.extend(self.interaction().element_state());

        base.merge(&sheet.resolve(INDICATOR_ID, &states))
    }
}

impl Widget for Checkbox {
    fn element(&self) -> Box<dyn ElementBuilder> {
        let style = self.style();
        let size = style.width.unwrap_or(13.0);
        let height = style.height.unwrap_or(size);
        let background = style.background.unwrap_or(Color::TRANSPARENT);
        let mark = style.color.unwrap_or(Color::BLACK);

        let mut indicator = div()
            .id(format!("{}/indicator", self.id))
            .size(size, height)
            .flex_shrink_0()
            .items_center()
            .justify_center()
            .bg(background)
            .rounded(style.corner_radius.unwrap_or(0.0))
            .opacity(style.opacity.unwrap_or(1.0));
        if let Some(width) = style.border_width.filter(|w| *w > 0.0) {
            indicator = indicator.border(width, style.border_color.unwrap_or(mark));
        }
        if self.is_checked() {
            let inset = (size * 0.25).round();
            indicator = indicator.child(
                div()
                    .size(size - inset * 2.0, height - inset * 2.0)
                    .bg(mark)
                    .rounded(1.0),
            );
        }

        let enabled = self.is_enabled();
        let checked = self.checked.clone();
        let on_enter = Arc::clone(&self.interaction);
        let on_leave = Arc::clone(&self.interaction);
        let on_down = Arc::clone(&self.interaction);
        let on_up = Arc::clone(&self.interaction);

        Box::new(
            div()
                .id(self.id.clone())
                .flex_row()
                .items_center()
                .flex_shrink_0()
                .child(indicator)
                .on_hover_enter(move |_| {
                    send(&on_enter, POINTER_ENTER);
                })
                .on_hover_leave(move |_| {
                    send(&on_leave, POINTER_LEAVE);
                })
                .on_mouse_down(move |_| {
                    send(&on_down, POINTER_DOWN);
                })
                .on_click(move |_| {
                    send(&on_up, POINTER_UP);
                    if enabled {
                        checked.update(|c| !c);
                    }
                }),
        )
    }

    fn set_enabled(&self, enabled: bool) {
        if self.enabled.set(enabled) {
            send(&self.interaction, if enabled { ENABLE } else { DISABLE });
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled.try_get().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderTree;
    use crate::widgets::window;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use strata_core::Event;

    fn click(checkbox: &Checkbox) {
        let root = window(checkbox.element(), 100.0, 30.0);
        let mut tree = RenderTree::from_element(&root);
        tree.compute_layout(100.0, 30.0);
        tree.dispatch(&Event::pointer_down(5.0, 5.0));
        tree.dispatch(&Event::pointer_up(5.0, 5.0));
    }

    #[test]
    fn test_click_toggles() {
        let ctx = UiContext::new();
        let checkbox = Checkbox::new(&ctx, true);

        click(&checkbox);
        assert!(!checkbox.is_checked());
        click(&checkbox);
        assert!(checkbox.is_checked());
    }

    #[test]
    fn test_disabled_ignores_clicks() {
        let ctx = UiContext::new();
        let checkbox = Checkbox::new(&ctx, false);
        checkbox.set_enabled(false);

        click(&checkbox);
        assert!(!checkbox.is_checked());
        assert_eq!(checkbox.interaction(), CheckboxInteraction::Disabled);

        checkbox.set_enabled(true);
        assert_eq!(checkbox.interaction(), CheckboxInteraction::Idle);
    }

    #[test]
    fn test_toggled_fires_only_on_change() {
        let ctx = UiContext::new();
        let checkbox = Checkbox::new(&ctx, true);
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        checkbox.on_toggled(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!checkbox.set_checked(true));
        assert!(checkbox.set_checked(false));
        assert!(!checkbox.set_checked(false));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_or_broken_stylesheet_keeps_default_skin() {
        let ctx = UiContext::new();
        let checkbox = Checkbox::new(&ctx, true);
        let resources = ResourceBundle::new().with(":styles/broken.css", b"{ color: red; }".as_slice());

        assert!(!checkbox.load_stylesheet(&resources, ":styles/missing.css"));
        assert!(!checkbox.load_stylesheet(&resources, ":styles/broken.css"));
        assert!(!checkbox.has_stylesheet());
        assert_eq!(checkbox.style(), checkbox.default_style());
    }

    #[test]
    fn test_stylesheet_states_apply() {
        let ctx = UiContext::new();
        let checkbox = Checkbox::new(&ctx, false);
        let resources = ResourceBundle::new().with(
            ":styles/cb.css",
            b"#indicator { background: #000000; } #indicator:checked { background: #ffffff; }"
                .as_slice(),
        );

        assert!(checkbox.load_stylesheet(&resources, ":styles/cb.css"));
        assert_eq!(checkbox.style().background, Some(Color::BLACK));

        checkbox.set_checked(true);
        assert_eq!(checkbox.style().background, Some(Color::WHITE));
    }

    #[test]
    fn test_hover_state_tracks_pointer() {
        let ctx = UiContext::new();
        let checkbox = Checkbox::new(&ctx, false);
        let root = window(checkbox.element(), 100.0, 30.0);
        let mut tree = RenderTree::from_element(&root);
        tree.compute_layout(100.0, 30.0);

        tree.dispatch(&Event::pointer_move(5.0, 5.0));
        assert_eq!(checkbox.interaction(), CheckboxInteraction::Hovered);
        tree.dispatch(&Event::pointer_down(5.0, 5.0));
        assert_eq!(checkbox.interaction(), CheckboxInteraction::Pressed);
        tree.dispatch(&Event::pointer_move(500.0, 500.0));
        assert_eq!(checkbox.interaction(), CheckboxInteraction::Idle);
    }
}
