//! Titled group whose content folds away behind a checkbox
//!
//! ```text
//! [x] [icon] Title ──────────────────
//!     content widget
//!     content widget
//! ```
//!
//! Checked means expanded. Collapsing hides the content container and
//! disables the title; children are kept and reappear on expand.

use std::sync::Arc;

use strata_core::{Effect, State};
use strata_layout::div::{div, ElementBuilder};
use strata_layout::widgets::{
    next_widget_id, BoxLayout, Checkbox, Frame, FrameShadow, FrameShape, Widget,
};
use strata_layout::UiContext;
use tracing::debug;

use crate::divider::HLine;
use crate::labeled::{labeled_widget, LabeledWidget};
use crate::resources::{bundled_resources, COLLAPSIBLE_GROUP_STYLESHEET};

/// Icon size in the title row
pub const TITLE_ICON_SIZE: f32 = 30.0;

const GROUP_MARGINS: f32 = 1.0;

/// Expanded or collapsed group of widgets under a titled rule
pub struct CollapsibleGroup {
    id: String,
    checkbox: Arc<Checkbox>,
    title: Arc<LabeledWidget<HLine>>,
    content: Arc<Frame>,
    enabled: State<bool>,
    toggled: Effect,
}

impl CollapsibleGroup {
    /// An expanded group titled `title`, with an optional icon resource
    ///
    /// The toggle skin is read from the context's resources when they carry
    /// [`COLLAPSIBLE_GROUP_STYLESHEET`], otherwise from [`bundled_resources`].
    pub fn new(parent: &UiContext, title: &str, icon: Option<&str>) -> Self {
        let checkbox = Arc::new(Checkbox::new(parent, true));
        let loaded = if parent.resources().contains(COLLAPSIBLE_GROUP_STYLESHEET) {
            checkbox.load_stylesheet(parent.resources(), COLLAPSIBLE_GROUP_STYLESHEET)
        } else {
            checkbox.load_stylesheet(&bundled_resources(), COLLAPSIBLE_GROUP_STYLESHEET)
        };
        if !loaded {
            debug!(title, "collapsible group uses the default checkbox skin");
        }

        let (row, _rule) = labeled_widget(HLine::new, parent, title, icon, Some(TITLE_ICON_SIZE));
        let title = Arc::new(row);

        let content = Arc::new(
            Frame::new(parent, FrameShape::NoFrame, FrameShadow::Plain)
                .with_layout(BoxLayout::column().margins(0.0).spacing(0.0)),
        );

        let id = next_widget_id("collapsible-group");
        let toggled = {
            let title = Arc::clone(&title);
            let ctx = parent.clone();
            let id = id.clone();
            checkbox.on_toggled(move |checked| {
                debug!(group = %id, expanded = checked, "collapsible group toggled");
                title.set_enabled(checked);
                ctx.request_relayout(&id);
            })
        };

        Self {
            id,
            checkbox,
            title,
            content,
            enabled: State::new(parent.graph(), true),
            toggled,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// True while expanded
    pub fn is_checked(&self) -> bool {
        self.checkbox.is_checked()
    }

    /// Force the collapsed state; returns true when it changed
    pub fn set_collapsed(&self, collapsed: bool) -> bool {
        self.checkbox.set_checked(!collapsed)
    }

    /// Append `widget` to the content column, in either state
    pub fn add_widget(&self, widget: Arc<dyn Widget>) {
        self.content.add_widget(widget);
    }

    pub fn child_count(&self) -> usize {
        self.content.child_count()
    }

    pub fn checkbox(&self) -> &Arc<Checkbox> {
        &self.checkbox
    }

    pub fn title(&self) -> &LabeledWidget<HLine> {
        &self.title
    }

    /// Element id of the content container
    pub fn content_id(&self) -> &str {
        self.content.id()
    }

    /// Call `f` with the expanded state after every toggle
    pub fn on_toggled(&self, f: impl Fn(bool) + Send + Sync + 'static) -> Effect {
        self.checkbox.on_toggled(f)
    }

    /// Effect that keeps the title and layout in step with the checkbox
    pub fn toggle_effect(&self) -> Effect {
        self.toggled
    }
}

impl Widget for CollapsibleGroup {
    fn element(&self) -> Box<dyn ElementBuilder> {
        let header = BoxLayout::row().margins(0.0);
        let title_row = header
            .container()
            .items_center()
            .child(header.item(self.checkbox.element(), 0.0))
            .child(header.item(self.title.element(), 1.0));

        let group = BoxLayout::column().margins(GROUP_MARGINS);
        Box::new(
            group
                .container()
                .id(self.id.clone())
                .child(title_row)
                .child(
                    div()
                        .flex_col()
                        .child_box(self.content.element())
                        .visible(self.is_checked()),
                ),
        )
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        self.checkbox.set_enabled(enabled);
        self.title.set_enabled(enabled && self.is_checked());
        self.content.set_enabled(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.try_get().unwrap_or(true)
    }
}
