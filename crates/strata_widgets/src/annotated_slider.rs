//! Slider with a value readout and tick marks
//!
//! Paints the base slider (groove and handle), then the annotations:
//!
//! - the readout, `value / maximum` rounded to two decimals, at the left
//!   edge with its baseline `text height + 3` above the bottom
//! - one tick per tick interval along the bottom edge, tall at both ends and
//!   in the middle
//!
//! Ticks are drawn for horizontal sliders only.
//!
//! ```rust
//! use strata_layout::UiContext;
//! use strata_widgets::AnnotatedSlider;
//!
//! let ctx = UiContext::new();
//! let slider = AnnotatedSlider::new(&ctx);
//! slider.set_range(0, 100).unwrap();
//! slider.set_value(33);
//! assert_eq!(slider.readout(), "0.33");
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use strata_core::events::event_types::*;
use strata_core::{
    ColorToken, CornerRadius, DrawContext, Effect, EventType, KeyCode, Point, Rect, State,
    StateMachine, StateTransitions, Stroke, TextBaseline, TextStyle, ThemeState,
};
use strata_layout::canvas::{canvas, CanvasBounds};
use strata_layout::div::{div, ElementBuilder};
use strata_layout::event_handler::EventContext;
use strata_layout::text_measure::measure_text;
use strata_layout::widgets::{next_widget_id, Widget, DISABLED_OPACITY};
use strata_layout::UiContext;

use crate::error::{Result, WidgetError};

/// Gap between the readout's text box and the bottom edge
const READOUT_BOTTOM_GAP: f32 = 3.0;
/// Ticks closer than this to either edge are pulled inside
const TICK_EDGE_INSET: f32 = 2.0;
const TICK_MAJOR_HEIGHT: f32 = 10.0;
const TICK_MINOR_HEIGHT: f32 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Handle interaction states
///
/// Dragging lasts until DRAG_END or the release, regardless of where the
/// pointer goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SliderHandleState {
    #[default]
    Idle,
    Hovered,
    Pressed,
    Dragging,
}

impl StateTransitions for SliderHandleState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use SliderHandleState::*;
        match (self, event) {
            (Idle, POINTER_ENTER) => Some(Hovered),
            (Idle | Hovered, POINTER_DOWN) => Some(Pressed),
            (Hovered, POINTER_LEAVE) => Some(Idle),

            (Pressed, POINTER_UP) => Some(Hovered),
            (Pressed, DRAG) => Some(Dragging),

            (Dragging, DRAG_END) | (Dragging, POINTER_UP) => Some(Idle),
            (Dragging, _) => None,

            (Pressed, POINTER_LEAVE) => Some(Idle),
            _ => None,
        }
    }
}

/// A tick mark at `x`, `height` tall from the bottom edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickMark {
    pub x: f32,
    pub height: f32,
}

/// Number of tick intervals: `(maximum - minimum) / interval`, truncated
///
/// A non-positive interval has no ticks. Counts past `i32::MAX` saturate.
pub fn tick_count(minimum: i32, maximum: i32, interval: i32) -> i32 {
    if interval <= 0 {
        return 0;
    }
    let count = (i64::from(maximum) - i64::from(minimum)) / i64::from(interval);
    i32::try_from(count.max(0)).unwrap_or(i32::MAX)
}

/// Tick positions across `width` for `count` intervals
///
/// Gives `count + 1` ticks, or none when `count` is not positive. Ticks at
/// the edges are moved 2 units inside; the first, last and middle ticks are
/// tall. At most one interval per unit of width is drawn.
pub fn tick_marks(width: f32, count: i32) -> Vec<TickMark> {
    let count = count.min(width.max(1.0) as i32);
    if count <= 0 {
        return Vec::new();
    }

    let spacing = width / count as f32;
    (0..=count)
        .map(|i| {
            let mut x = spacing * i as f32;
            if x >= width {
                x = width - TICK_EDGE_INSET;
            } else if x == 0.0 {
                x = TICK_EDGE_INSET;
            }

            let major = i == 0 || i == count || i == count / 2;
            TickMark {
                x,
                height: if major {
                    TICK_MAJOR_HEIGHT
                } else {
                    TICK_MINOR_HEIGHT
                },
            }
        })
        .collect()
}

/// Readout text: `value / maximum` rounded to two decimals
///
/// Printed as the shortest decimal that reads back the same, with at least
/// one fractional digit (`0.5`, `0.33`, `1.0`). A zero maximum reads `0.0`.
pub fn format_readout(value: i32, maximum: i32) -> String {
    if maximum == 0 {
        return "0.0".to_string();
    }

    // Ties round away from zero: 1/8 reads 0.13
    let normalized = f64::from(value) / f64::from(maximum);
    let rounded = (normalized * 100.0).round() / 100.0;

    if rounded.is_finite() && rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        rounded.to_string()
    }
}

/// Baseline origin of the readout in a slider of `height`
pub fn readout_origin(height: f32, text_height: f32) -> Point {
    Point::new(0.0, height - text_height - READOUT_BOTTOM_GAP)
}

/// Range and stepping configuration
#[derive(Clone, Copy, Debug, PartialEq)]
struct SliderRange {
    minimum: i32,
    maximum: i32,
    single_step: i32,
    page_step: i32,
    tick_interval: i32,
    orientation: Orientation,
}

impl Default for SliderRange {
    fn default() -> Self {
        Self {
            minimum: 0,
            maximum: 99,
            single_step: 1,
            page_step: 10,
            tick_interval: 1,
            orientation: Orientation::Horizontal,
        }
    }
}

impl SliderRange {
    fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.minimum, self.maximum)
    }

    fn span(&self) -> i64 {
        i64::from(self.maximum) - i64::from(self.minimum)
    }

    /// Handle offset along the groove for `value`
    fn handle_offset(&self, value: i32, length: f32, handle: f32) -> f32 {
        let travel = (length - handle).max(0.0);
        if self.span() == 0 {
            return 0.0;
        }
        let along = i64::from(value) - i64::from(self.minimum);
        let fraction = (along as f64 / self.span() as f64) as f32;
        match self.orientation {
            Orientation::Horizontal => fraction * travel,
            Orientation::Vertical => (1.0 - fraction) * travel,
        }
    }

    /// Value whose handle sits at `offset`
    fn value_at(&self, offset: f32, length: f32, handle: f32) -> i32 {
        let travel = (length - handle).max(0.0);
        if travel == 0.0 {
            return self.minimum;
        }
        let fraction = (offset / travel).clamp(0.0, 1.0);
        let fraction = match self.orientation {
            Orientation::Horizontal => fraction,
            Orientation::Vertical => 1.0 - fraction,
        };
        let along = (f64::from(fraction) * self.span() as f64).round() as i64;
        let value = i64::from(self.minimum) + along;
        self.clamp(i32::try_from(value).unwrap_or(self.maximum))
    }
}

/// Position along the slider axis, and the axis length, for an event
fn axis(ctx: &EventContext, orientation: Orientation) -> (f32, f32) {
    match orientation {
        Orientation::Horizontal => (ctx.local_x, ctx.width),
        Orientation::Vertical => (ctx.local_y, ctx.height),
    }
}

type SharedHandle = Arc<Mutex<StateMachine<SliderHandleState>>>;

fn send(handle: &SharedHandle, event: EventType) {
    handle
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .send(event);
}

/// Integer slider annotated with its normalized value and tick marks
pub struct AnnotatedSlider {
    id: String,
    value: State<i32>,
    enabled: State<bool>,
    range: Mutex<SliderRange>,
    handle: SharedHandle,
    /// Pointer offset inside the handle while dragging it
    grab: Arc<Mutex<Option<f32>>>,
}

impl AnnotatedSlider {
    /// Range 0..=99, single step 1, page step 10, tick interval 1, horizontal
    pub fn new(parent: &UiContext) -> Self {
        Self {
            id: next_widget_id("annotated-slider"),
            value: State::new(parent.graph(), 0),
            enabled: State::new(parent.graph(), true),
            range: Mutex::new(SliderRange::default()),
            handle: Arc::new(Mutex::new(StateMachine::default())),
            grab: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_orientation(self, orientation: Orientation) -> Self {
        self.set_orientation(orientation);
        self
    }

    fn range(&self) -> SliderRange {
        *self.range.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_range(&self, f: impl FnOnce(&mut SliderRange)) -> SliderRange {
        let mut range = self.range.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut range);
        *range
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> i32 {
        self.value.get()
    }

    /// Set the value clamped to the range; returns true when it changed
    pub fn set_value(&self, value: i32) -> bool {
        self.value.set(self.range().clamp(value))
    }

    pub fn minimum(&self) -> i32 {
        self.range().minimum
    }

    pub fn maximum(&self) -> i32 {
        self.range().maximum
    }

    /// Set the range, re-clamping the current value
    ///
    /// `maximum - minimum` must fit in an `i32`.
    pub fn set_range(&self, minimum: i32, maximum: i32) -> Result<()> {
        if minimum > maximum || maximum.checked_sub(minimum).is_none() {
            return Err(WidgetError::InvalidRange { minimum, maximum });
        }
        let range = self.update_range(|r| {
            r.minimum = minimum;
            r.maximum = maximum;
        });
        self.value.set(range.clamp(self.value.get()));
        Ok(())
    }

    pub fn single_step(&self) -> i32 {
        self.range().single_step
    }

    pub fn set_single_step(&self, step: i32) {
        self.update_range(|r| r.single_step = step.max(1));
    }

    pub fn page_step(&self) -> i32 {
        self.range().page_step
    }

    pub fn set_page_step(&self, step: i32) {
        self.update_range(|r| r.page_step = step.max(1));
    }

    pub fn tick_interval(&self) -> i32 {
        self.range().tick_interval
    }

    /// Distance between ticks in value units; must be positive
    pub fn set_tick_interval(&self, interval: i32) -> Result<()> {
        if interval <= 0 {
            return Err(WidgetError::InvalidTickInterval(interval));
        }
        self.update_range(|r| r.tick_interval = interval);
        Ok(())
    }

    pub fn orientation(&self) -> Orientation {
        self.range().orientation
    }

    pub fn set_orientation(&self, orientation: Orientation) {
        self.update_range(|r| r.orientation = orientation);
    }

    pub fn handle_state(&self) -> SliderHandleState {
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state()
    }

    /// Current readout text
    pub fn readout(&self) -> String {
        format_readout(self.value(), self.maximum())
    }

    /// Number of tick intervals for the current range
    pub fn tick_count(&self) -> i32 {
        let range = self.range();
        tick_count(range.minimum, range.maximum, range.tick_interval)
    }

    /// The reactive value, for effect subscriptions
    pub fn value_state(&self) -> &State<i32> {
        &self.value
    }

    /// Call `f` with the new value after every change
    pub fn on_change(&self, f: impl Fn(i32) + Send + Sync + 'static) -> Effect {
        self.value.on_change(f)
    }

    fn painter(&self) -> impl Fn(&mut dyn DrawContext, CanvasBounds) + 'static {
        let theme = ThemeState::get();
        let range = self.range();
        let value = self.value();
        let readout = format_readout(value, range.maximum);
        let font_size = theme.typography.font_size_base;
        let groove_thickness = theme.metrics.slider_groove_height;
        let handle_width = theme.metrics.slider_handle_width;
        let groove = theme.color(ColorToken::SliderGroove);
        let handle = match self.handle_state() {
            SliderHandleState::Pressed | SliderHandleState::Dragging => {
                theme.color(ColorToken::SliderHandleActive)
            }
            _ => theme.color(ColorToken::SliderHandle),
        };
        let annotation = theme.color(ColorToken::Annotation);
        let radius = CornerRadius::uniform(theme.radii.radius_sm);

        move |ctx: &mut dyn DrawContext, bounds: CanvasBounds| {
            // Base slider
            let (groove_rect, handle_rect) = match range.orientation {
                Orientation::Horizontal => {
                    let offset = range.handle_offset(value, bounds.width, handle_width);
                    (
                        Rect::new(
                            0.0,
                            (bounds.height - groove_thickness) / 2.0,
                            bounds.width,
                            groove_thickness,
                        ),
                        Rect::new(offset, 0.0, handle_width, bounds.height),
                    )
                }
                Orientation::Vertical => {
                    let offset = range.handle_offset(value, bounds.height, handle_width);
                    (
                        Rect::new(
                            (bounds.width - groove_thickness) / 2.0,
                            0.0,
                            groove_thickness,
                            bounds.height,
                        ),
                        Rect::new(0.0, offset, bounds.width, handle_width),
                    )
                }
            };
            ctx.fill_rect(groove_rect, radius, groove.into());
            ctx.fill_rect(handle_rect, radius, handle.into());

            // Readout
            let text_height = measure_text(&readout, font_size).height;
            let style = TextStyle::default()
                .with_size(font_size)
                .with_color(annotation)
                .with_baseline(TextBaseline::Alphabetic);
            ctx.draw_text(&readout, readout_origin(bounds.height, text_height), &style);

            // Ticks
            if range.orientation == Orientation::Horizontal {
                let count = tick_count(range.minimum, range.maximum, range.tick_interval);
                let stroke = Stroke::new(1.0);
                for tick in tick_marks(bounds.width, count) {
                    ctx.draw_line(
                        Point::new(tick.x, bounds.height),
                        Point::new(tick.x, bounds.height - tick.height),
                        &stroke,
                        annotation.into(),
                    );
                }
            }
        }
    }
}

impl Widget for AnnotatedSlider {
    fn element(&self) -> Box<dyn ElementBuilder> {
        let theme = ThemeState::get();
        let range = self.range();
        let enabled = self.is_enabled();
        let thickness = theme.metrics.slider_height;
        let min_length = theme.metrics.slider_min_width;
        let handle_width = theme.metrics.slider_handle_width;

        let surface = canvas(self.painter()).opacity(if enabled { 1.0 } else { DISABLED_OPACITY });
        let mut slider = match range.orientation {
            Orientation::Horizontal => div()
                .flex_col()
                .flex_grow()
                .child(surface.h(thickness).min_w(min_length)),
            Orientation::Vertical => div().flex_row().child(surface.w(thickness).h(min_length)),
        }
        .id(self.id.clone());

        if !enabled {
            return Box::new(slider);
        }

        let handle = Arc::clone(&self.handle);
        slider = slider.on_hover_enter(move |_| send(&handle, POINTER_ENTER));
        let handle = Arc::clone(&self.handle);
        slider = slider.on_hover_leave(move |_| send(&handle, POINTER_LEAVE));

        // Press on the handle grabs it; elsewhere pages toward the pointer
        let (handle, grab, value) = (Arc::clone(&self.handle), Arc::clone(&self.grab), self.value.clone());
        slider = slider.on_mouse_down(move |ctx| {
            send(&handle, POINTER_DOWN);
            let (position, length) = axis(ctx, range.orientation);
            let current = value.get();
            let offset = range.handle_offset(current, length, handle_width);

            if position >= offset && position <= offset + handle_width {
                *grab.lock().unwrap_or_else(PoisonError::into_inner) = Some(position - offset);
                return;
            }

            let toward_maximum = match range.orientation {
                Orientation::Horizontal => position > offset,
                Orientation::Vertical => position < offset,
            };
            let step = if toward_maximum {
                range.page_step
            } else {
                -range.page_step
            };
            value.set(range.clamp(current.saturating_add(step)));
        });

        let (handle, grab, value) = (Arc::clone(&self.handle), Arc::clone(&self.grab), self.value.clone());
        slider = slider.on_drag(move |ctx| {
            send(&handle, DRAG);
            let Some(grab_offset) = *grab.lock().unwrap_or_else(PoisonError::into_inner) else {
                return;
            };
            let (position, length) = axis(ctx, range.orientation);
            value.set(range.value_at(position - grab_offset, length, handle_width));
        });

        let (handle, grab) = (Arc::clone(&self.handle), Arc::clone(&self.grab));
        slider = slider.on_drag_end(move |_| {
            send(&handle, DRAG_END);
            *grab.lock().unwrap_or_else(PoisonError::into_inner) = None;
        });

        let (handle, grab) = (Arc::clone(&self.handle), Arc::clone(&self.grab));
        slider = slider.on_click(move |_| {
            send(&handle, POINTER_UP);
            *grab.lock().unwrap_or_else(PoisonError::into_inner) = None;
        });

        let value = self.value.clone();
        slider = slider.on_scroll(move |ctx| {
            let steps = ctx.scroll_steps();
            if steps != 0 {
                let delta = steps.saturating_mul(range.single_step);
                value.set(range.clamp(value.get().saturating_add(delta)));
            }
        });

        let value = self.value.clone();
        slider = slider.on_key_down(move |ctx| {
            let current = value.get();
            let next = match ctx.key {
                Some(KeyCode::LEFT) | Some(KeyCode::DOWN) => current.saturating_sub(range.single_step),
                Some(KeyCode::RIGHT) | Some(KeyCode::UP) => current.saturating_add(range.single_step),
                Some(KeyCode::PAGE_DOWN) => current.saturating_sub(range.page_step),
                Some(KeyCode::PAGE_UP) => current.saturating_add(range.page_step),
                Some(KeyCode::HOME) => range.minimum,
                Some(KeyCode::END) => range.maximum,
                _ => return,
            };
            value.set(range.clamp(next));
        });

        Box::new(slider)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.try_get().unwrap_or(true)
    }
}
