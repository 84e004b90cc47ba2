//! Bounded decimal spin box
//!
//! Values are clamped to the range and rounded to the configured number of
//! decimals before they are stored. Input:
//!
//! - typing digits, `-` or `.` starts an edit; `Enter` or losing focus
//!   commits it, `Escape` cancels
//! - Up/Down step by one single step, PageUp/PageDown by ten
//! - the wheel steps once per notch
//! - dragging horizontally scrubs one step per `spin_box_drag_step` pixels

use std::sync::{Arc, Mutex, PoisonError};

use strata_core::{ColorToken, Effect, KeyCode, State, ThemeState};
use tracing::trace;

use crate::context::UiContext;
use crate::div::{div, ElementBuilder};
use crate::event_handler::EventContext;
use crate::text::text;
use crate::widgets::{next_widget_id, Widget};

/// Range, precision and step of a spin box
#[derive(Clone, Copy, Debug, PartialEq)]
struct SpinRange {
    minimum: f64,
    maximum: f64,
    decimals: u32,
    single_step: f64,
}

impl SpinRange {
    fn bound(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimals as i32);
        let rounded = (value * scale).round() / scale;
        rounded.clamp(self.minimum, self.maximum)
    }

    /// Write `value` bounded into `state`; NaN is ignored
    fn store(&self, state: &State<f64>, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        state.set(self.bound(value))
    }

    fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals as usize, value)
    }
}

/// In-progress keyboard edit and drag origin
#[derive(Clone, Debug, Default)]
struct EditState {
    buffer: Option<String>,
    drag_origin: Option<f64>,
}

type SharedEdit = Arc<Mutex<EditState>>;

fn lock(edit: &SharedEdit) -> std::sync::MutexGuard<'_, EditState> {
    edit.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Numeric field for `f64` values
pub struct DoubleSpinBox {
    id: String,
    value: State<f64>,
    enabled: State<bool>,
    range: SpinRange,
    buttons_visible: bool,
    edit: SharedEdit,
}

impl DoubleSpinBox {
    /// Range 0 to 99.99, two decimals, single step 1
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            id: next_widget_id("spin-box"),
            value: State::new(ctx.graph(), 0.0),
            enabled: State::new(ctx.graph(), true),
            range: SpinRange {
                minimum: 0.0,
                maximum: 99.99,
                decimals: 2,
                single_step: 1.0,
            },
            buttons_visible: true,
            edit: Arc::new(Mutex::new(EditState::default())),
        }
    }

    /// Set the range; a reversed range collapses to `minimum`
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.range.minimum = minimum;
        self.range.maximum = maximum.max(minimum);
        self.value.set(self.range.bound(self.value.get()));
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.range.decimals = decimals;
        self.value.set(self.range.bound(self.value.get()));
        self
    }

    pub fn with_single_step(mut self, step: f64) -> Self {
        self.range.single_step = step;
        self
    }

    /// Show or hide the up/down buttons
    pub fn with_buttons(mut self, visible: bool) -> Self {
        self.buttons_visible = visible;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> f64 {
        self.value.get()
    }

    /// Store `value` clamped and rounded; returns true when it changed
    ///
    /// NaN leaves the value untouched.
    pub fn set_value(&self, value: f64) -> bool {
        self.range.store(&self.value, value)
    }

    /// Move by `steps` single steps
    pub fn step_by(&self, steps: i32) -> bool {
        self.set_value(self.value() + f64::from(steps) * self.range.single_step)
    }

    pub fn minimum(&self) -> f64 {
        self.range.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.range.maximum
    }

    pub fn decimals(&self) -> u32 {
        self.range.decimals
    }

    pub fn single_step(&self) -> f64 {
        self.range.single_step
    }

    pub fn buttons_visible(&self) -> bool {
        self.buttons_visible
    }

    /// Displayed text: the edit buffer while editing, else the value
    pub fn text(&self) -> String {
        match &lock(&self.edit).buffer {
            Some(buffer) => buffer.clone(),
            None => self.range.format(self.value()),
        }
    }

    pub fn is_editing(&self) -> bool {
        lock(&self.edit).buffer.is_some()
    }

    /// The reactive value, for effect subscriptions
    pub fn value_state(&self) -> &State<f64> {
        &self.value
    }

    /// Call `f` with the new value after every change
    pub fn on_value_changed(&self, f: impl Fn(f64) + Send + Sync + 'static) -> Effect {
        self.value.on_change(f)
    }

    fn step_button(&self, label: &str, steps: i32) -> impl ElementBuilder {
        let value = self.value.clone();
        let range = self.range;
        let enabled = self.is_enabled();
        div()
            .id(format!("{}/{}", self.id, if steps > 0 { "up" } else { "down" }))
            .flex_grow()
            .items_center()
            .justify_center()
            .child(text(label).size(ThemeState::get().typography.font_size_sm))
            .on_click(move |_| {
                if enabled {
                    range.store(&value, value.get() + f64::from(steps) * range.single_step);
                }
            })
    }
}

/// Commit the edit buffer; unparsable text is discarded
fn commit(edit: &SharedEdit, value: &State<f64>, range: SpinRange) {
    let Some(buffer) = lock(edit).buffer.take() else {
        return;
    };
    match buffer.trim().parse::<f64>() {
        Ok(parsed) => {
            range.store(&value, parsed);
        }
        Err(_) => trace!(%buffer, "spin box edit discarded"),
    }
}

fn handle_key(ctx: &EventContext, edit: &SharedEdit, value: &State<f64>, range: SpinRange) {
    let Some(key) = ctx.key else {
        return;
    };
    let steps = match key {
        KeyCode::ENTER => {
            commit(edit, value, range);
            return;
        }
        KeyCode::ESCAPE => {
            lock(edit).buffer = None;
            return;
        }
        KeyCode::BACKSPACE => {
            if let Some(buffer) = lock(edit).buffer.as_mut() {
                buffer.pop();
            }
            return;
        }
        KeyCode::UP => 1.0,
        KeyCode::DOWN => -1.0,
        KeyCode::PAGE_UP => 10.0,
        KeyCode::PAGE_DOWN => -10.0,
        _ => return,
    };
    lock(edit).buffer = None;
    range.store(&value, value.get() + steps * range.single_step);
}

impl Widget for DoubleSpinBox {
    fn element(&self) -> Box<dyn ElementBuilder> {
        let theme = ThemeState::get();
        let enabled = self.is_enabled();
        let (text_token, bg_token) = if enabled {
            (ColorToken::TextPrimary, ColorToken::InputBg)
        } else {
            (ColorToken::TextDisabled, ColorToken::InputBgDisabled)
        };

        let mut field = div()
            .id(self.id.clone())
            .flex_row()
            .flex_grow()
            .items_center()
            .min_w(theme.metrics.spin_box_width)
            .h(theme.metrics.spin_box_height)
            .p_px(2.0)
            .bg(theme.color(bg_token))
            .child(
                text(self.text())
                    .color(theme.color(text_token))
                    .stretch(1.0),
            );

        if self.buttons_visible {
            field = field.child(
                div()
                    .flex_col()
                    .w(12.0)
                    .h_full()
                    .child(self.step_button("+", 1))
                    .child(self.step_button("-", -1)),
            );
        }

        if !enabled {
            return Box::new(field);
        }

        let range = self.range;
        let drag_step = theme.metrics.spin_box_drag_step.max(1.0);

        let (edit, value) = (Arc::clone(&self.edit), self.value.clone());
        field = field.on_key_down(move |ctx| handle_key(ctx, &edit, &value, range));

        let edit = Arc::clone(&self.edit);
        field = field.on_text_input(move |ctx| {
            let Some(typed) = ctx.text.as_deref() else {
                return;
            };
            let accepted: String = typed
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
                .collect();
            if !accepted.is_empty() {
                lock(&edit)
                    .buffer
                    .get_or_insert_with(String::new)
                    .push_str(&accepted);
            }
        });

        let (edit, value) = (Arc::clone(&self.edit), self.value.clone());
        field = field.on_blur(move |_| commit(&edit, &value, range));

        let value = self.value.clone();
        field = field.on_scroll(move |ctx| {
            let steps = ctx.scroll_steps();
            if steps != 0 {
                range.store(&value, value.get() + f64::from(steps) * range.single_step);
            }
        });

        let (edit, value) = (Arc::clone(&self.edit), self.value.clone());
        field = field.on_mouse_down(move |_| {
            lock(&edit).drag_origin = Some(value.get());
        });

        let (edit, value) = (Arc::clone(&self.edit), self.value.clone());
        field = field.on_drag(move |ctx| {
            let Some(origin) = lock(&edit).drag_origin else {
                return;
            };
            let steps = (ctx.drag_delta_x / drag_step).trunc() as f64;
            range.store(&value, origin + steps * range.single_step);
        });

        let edit = Arc::clone(&self.edit);
        field = field.on_drag_end(move |_| {
            lock(&edit).drag_origin = None;
        });

        Box::new(field)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        if !enabled {
            lock(&self.edit).buffer = None;
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
    use strata_core::Event;

    fn unit_spin(ctx: &UiContext) -> DoubleSpinBox {
        DoubleSpinBox::new(ctx)
            .with_range(-1.0, 1.0)
            .with_buttons(false)
    }

    fn tree(spin: &DoubleSpinBox) -> RenderTree {
        let root = window(spin.element(), 120.0, 40.0);
        let mut tree = RenderTree::from_element(&root);
        tree.compute_layout(120.0, 40.0);
        tree
    }

    #[test]
    fn test_clamps_and_rounds() {
        let ctx = UiContext::new();
        let spin = unit_spin(&ctx);

        spin.set_value(3.0);
        assert_eq!(spin.value(), 1.0);
        spin.set_value(-0.333);
        assert_eq!(spin.value(), -0.33);
        assert_eq!(spin.text(), "-0.33");
    }

    #[test]
    fn test_nan_is_ignored() {
        let ctx = UiContext::new();
        let spin = unit_spin(&ctx);
        spin.set_value(0.5);

        assert!(!spin.set_value(f64::NAN));
        assert_eq!(spin.value(), 0.5);
        assert!(!spin.set_value(f64::NAN));

        assert!(spin.set_value(f64::INFINITY));
        assert_eq!(spin.value(), 1.0);
    }

    #[test]
    fn test_typed_value_commits_on_enter() {
        let ctx = UiContext::new();
        let spin = unit_spin(&ctx);
        let mut tree = tree(&spin);

        tree.dispatch(&Event::pointer_down(10.0, 5.0));
        tree.dispatch(&Event::pointer_up(10.0, 5.0));
        tree.dispatch(&Event::text_input("0.5x"));
        assert!(spin.is_editing());
        assert_eq!(spin.text(), "0.5");
        assert_eq!(spin.value(), 0.0);

        tree.dispatch(&Event::key_down(KeyCode::ENTER));
        assert!(!spin.is_editing());
        assert_eq!(spin.value(), 0.5);
    }

    #[test]
    fn test_escape_cancels_edit() {
        let ctx = UiContext::new();
        let spin = unit_spin(&ctx);
        let mut tree = tree(&spin);

        tree.dispatch(&Event::pointer_down(10.0, 5.0));
        tree.dispatch(&Event::text_input("9"));
        tree.dispatch(&Event::key_down(KeyCode::ESCAPE));
        assert_eq!(spin.value(), 0.0);
        assert_eq!(spin.text(), "0.00");
    }

    #[test]
    fn test_wheel_and_keys_step() {
        let ctx = UiContext::new();
        let spin = unit_spin(&ctx).with_single_step(0.25);
        let mut tree = tree(&spin);

        tree.dispatch(&Event::scroll(10.0, 5.0, 0.0, 1.0));
        assert_eq!(spin.value(), 0.25);

        tree.dispatch(&Event::pointer_down(10.0, 5.0));
        tree.dispatch(&Event::key_down(KeyCode::DOWN));
        assert_eq!(spin.value(), 0.0);
        tree.dispatch(&Event::key_down(KeyCode::PAGE_UP));
        assert_eq!(spin.value(), 1.0);
    }

    #[test]
    fn test_horizontal_drag_scrubs() {
        let ctx = UiContext::new();
        let spin = unit_spin(&ctx).with_single_step(0.1);
        let mut tree = tree(&spin);
        let drag_step = ThemeState::get().metrics.spin_box_drag_step;

        tree.dispatch(&Event::pointer_down(10.0, 5.0));
        tree.dispatch(&Event::pointer_move(10.0 + drag_step * 3.0, 5.0));
        assert_eq!(spin.value(), 0.3);
        tree.dispatch(&Event::pointer_up(10.0 + drag_step * 3.0, 5.0));

        tree.dispatch(&Event::pointer_down(10.0, 5.0));
        tree.dispatch(&Event::pointer_move(10.0 - drag_step * 100.0, 5.0));
        assert_eq!(spin.value(), -1.0);
    }

    #[test]
    fn test_buttons_step() {
        let ctx = UiContext::new();
        let spin = DoubleSpinBox::new(&ctx);
        let mut tree = tree(&spin);

        let up = tree.find_by_id(&format!("{}/up", spin.id())).unwrap();
        let bounds = tree.get_absolute_bounds(up).unwrap();
        let (x, y) = (bounds.x + 1.0, bounds.y + 1.0);
        tree.dispatch(&Event::pointer_down(x, y));
        tree.dispatch(&Event::pointer_up(x, y));
        assert_eq!(spin.value(), 1.0);
    }
}
