//! Three-component vector editor
//!
//! Three spin boxes bounded to `[-1, 1]` in a sunken box, separated by
//! vertical rules. The components are read and written as one `[x, y, z]`
//! value; bulk writes notify observers once.

use std::sync::Arc;

use strata_core::reactive::effect;
use strata_core::{Effect, State};
use strata_layout::div::ElementBuilder;
use strata_layout::widgets::{
    next_widget_id, BoxLayout, DoubleSpinBox, Frame, FrameShadow, FrameShape, Widget,
};
use strata_layout::UiContext;

use crate::divider::VLine;

/// Bounds of every component
pub const COMPONENT_MINIMUM: f64 = -1.0;
pub const COMPONENT_MAXIMUM: f64 = 1.0;
const COMPONENT_DECIMALS: u32 = 2;

const FRAME_MARGINS: f32 = 1.0;

/// Editor for a unit-range `[x, y, z]` vector
pub struct VectorSpinner {
    id: String,
    ctx: UiContext,
    fields: [Arc<DoubleSpinBox>; 3],
    frame: Frame,
    enabled: State<bool>,
}

fn component_field(parent: &UiContext, initial: f64) -> Arc<DoubleSpinBox> {
    let field = DoubleSpinBox::new(parent)
        .with_range(COMPONENT_MINIMUM, COMPONENT_MAXIMUM)
        .with_decimals(COMPONENT_DECIMALS)
        .with_buttons(false);
    field.set_value(initial);
    Arc::new(field)
}

impl VectorSpinner {
    /// Fields start at `initial`, clamped to the component bounds
    pub fn new(parent: &UiContext, initial: [f64; 3]) -> Self {
        let fields = initial.map(|component| component_field(parent, component));

        let frame = Frame::new(parent, FrameShape::Box, FrameShadow::Sunken)
            .with_layout(BoxLayout::row().margins(FRAME_MARGINS));
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                frame.add_widget(Arc::new(VLine::new(parent)));
            }
            frame.add_widget_with_stretch(Arc::clone(field) as Arc<dyn Widget>, 1.0);
        }

        Self {
            id: next_widget_id("vector-spinner"),
            ctx: parent.clone(),
            fields,
            frame,
            enabled: State::new(parent.graph(), true),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn x(&self) -> f64 {
        self.fields[0].value()
    }

    pub fn y(&self) -> f64 {
        self.fields[1].value()
    }

    pub fn z(&self) -> f64 {
        self.fields[2].value()
    }

    pub fn set_x(&self, value: f64) -> bool {
        self.fields[0].set_value(value)
    }

    pub fn set_y(&self, value: f64) -> bool {
        self.fields[1].set_value(value)
    }

    pub fn set_z(&self, value: f64) -> bool {
        self.fields[2].set_value(value)
    }

    pub fn value(&self) -> [f64; 3] {
        [self.x(), self.y(), self.z()]
    }

    /// Write all three components as one change
    pub fn set_value(&self, x: f64, y: f64, z: f64) {
        self.ctx.batch(|| {
            self.set_x(x);
            self.set_y(y);
            self.set_z(z);
        });
    }

    /// The x, y and z fields
    pub fn fields(&self) -> &[Arc<DoubleSpinBox>; 3] {
        &self.fields
    }

    /// Call `f` with the whole vector after any component changes
    pub fn on_change(&self, f: impl Fn([f64; 3]) + Send + Sync + 'static) -> Effect {
        let states: [State<f64>; 3] = [
            self.fields[0].value_state().clone(),
            self.fields[1].value_state().clone(),
            self.fields[2].value_state().clone(),
        ];
        let dependencies: Vec<_> = states.iter().map(State::signal_id).collect();

        effect(self.ctx.graph(), &dependencies, move || {
            let [x, y, z] = &states;
            f([x.get(), y.get(), z.get()]);
        })
    }
}

impl Widget for VectorSpinner {
    fn element(&self) -> Box<dyn ElementBuilder> {
        let row = BoxLayout::row().margins(0.0);
        Box::new(
            row.container()
                .id(self.id.clone())
                .child(row.item(self.frame.element(), 1.0)),
        )
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        self.frame.set_enabled(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.try_get().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use strata_core::{Event, KeyCode};
    use strata_layout::widgets::window;
    use strata_layout::RenderTree;

    #[test]
    fn test_set_and_get_vector() {
        let ctx = UiContext::new();
        let spinner = VectorSpinner::new(&ctx, [0.0; 3]);

        spinner.set_value(0.5, -0.3, 0.8);
        assert_eq!(spinner.value(), [0.5, -0.3, 0.8]);
    }

    #[test]
    fn test_components_are_independent_and_clamped() {
        let ctx = UiContext::new();
        let spinner = VectorSpinner::new(&ctx, [0.1, 0.2, 0.3]);

        spinner.set_y(-0.75);
        assert_eq!(spinner.value(), [0.1, -0.75, 0.3]);

        spinner.set_x(4.0);
        spinner.set_z(-2.5);
        assert_eq!(spinner.value(), [1.0, -0.75, -1.0]);

        let clamped = VectorSpinner::new(&ctx, [3.0, 0.0, -3.0]);
        assert_eq!(clamped.value(), [1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_bulk_set_notifies_once() {
        let ctx = UiContext::new();
        let spinner = VectorSpinner::new(&ctx, [0.0; 3]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        spinner.on_change(move |v| log.lock().unwrap().push(v));

        spinner.set_value(0.25, 0.5, 0.75);
        assert_eq!(*seen.lock().unwrap(), vec![[0.25, 0.5, 0.75]]);

        spinner.set_z(0.0);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_nan_component_is_ignored() {
        let ctx = UiContext::new();
        let spinner = VectorSpinner::new(&ctx, [0.1, 0.2, 0.3]);
        let changes = Arc::new(Mutex::new(0));
        let count = Arc::clone(&changes);
        spinner.on_change(move |_| *count.lock().unwrap() += 1);

        assert!(!spinner.set_x(f64::NAN));
        spinner.set_value(f64::NAN, f64::NAN, f64::NAN);
        assert_eq!(spinner.value(), [0.1, 0.2, 0.3]);
        assert_eq!(*changes.lock().unwrap(), 0);
    }

    #[test]
    fn test_fields_share_the_width() {
        let ctx = UiContext::new();
        let spinner = VectorSpinner::new(&ctx, [0.0; 3]);
        assert!(spinner.fields().iter().all(|f| !f.buttons_visible()));

        let root = window(spinner.element(), 300.0, 30.0);
        let mut tree = RenderTree::from_element(&root);
        tree.compute_layout(300.0, 30.0);

        let widths: Vec<f32> = spinner
            .fields()
            .iter()
            .map(|f| {
                let node = tree.find_by_id(f.id()).unwrap();
                tree.get_absolute_bounds(node).unwrap().width
            })
            .collect();
        assert!((widths[0] - widths[1]).abs() < 0.01);
        assert!((widths[1] - widths[2]).abs() < 0.01);
        assert!(widths[0] > 50.0);
    }

    #[test]
    fn test_typing_into_a_field() {
        let ctx = UiContext::new();
        let spinner = VectorSpinner::new(&ctx, [0.0; 3]);

        let root = window(spinner.element(), 300.0, 30.0);
        let mut tree = RenderTree::from_element(&root);
        tree.compute_layout(300.0, 30.0);

        let node = tree.find_by_id(spinner.fields()[1].id()).unwrap();
        tree.focus(node);
        tree.dispatch(&Event::text_input("-0.4"));
        tree.dispatch(&Event::key_down(KeyCode::ENTER));

        assert_eq!(spinner.value(), [0.0, -0.4, 0.0]);
    }
}
