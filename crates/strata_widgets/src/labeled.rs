//! Labeled rows: `[icon] label [content]`
//!
//! The label column keeps its natural width and the content column takes
//! all extra horizontal space.
//!
//! ```rust
//! use strata_layout::widgets::Frame;
//! use strata_layout::UiContext;
//! use strata_widgets::labeled::labeled_widget;
//!
//! let ctx = UiContext::new();
//! let (row, rule) = labeled_widget(Frame::hline, &ctx, "Shading", None, None);
//! assert!(row.icon().is_none());
//! assert_eq!(rule.id(), row.content().id());
//! ```

use std::sync::Arc;

use strata_core::State;
use strata_layout::div::ElementBuilder;
use strata_layout::image::Pixmap;
use strata_layout::widgets::{next_widget_id, BoxLayout, Label, Widget};
use strata_layout::UiContext;

/// Side of the square an icon is scaled to fit when none is given
pub const DEFAULT_ICON_SIZE: f32 = 40.0;

const ROW_MARGINS: f32 = 1.0;
const ROW_SPACING: f32 = 15.0;
const ICON_SPACING: f32 = 5.0;

/// Stretch factors of the label and content columns
pub const COLUMN_STRETCH: (f32, f32) = (0.0, 1.0);

/// A content widget with a label and an optional icon in front of it
pub struct LabeledWidget<W: Widget> {
    id: String,
    label: Arc<Label>,
    icon: Option<Arc<Label>>,
    content: Arc<W>,
    enabled: State<bool>,
}

/// Build `factory`'s widget into a labeled row
///
/// `icon` is a resource path; an unreadable icon becomes an empty image.
/// `icon_size` defaults to [`DEFAULT_ICON_SIZE`]. Returns the row and the
/// content widget.
pub fn labeled_widget<W, F>(
    factory: F,
    parent: &UiContext,
    label: &str,
    icon: Option<&str>,
    icon_size: Option<f32>,
) -> (LabeledWidget<W>, Arc<W>)
where
    W: Widget + 'static,
    F: FnOnce(&UiContext) -> W,
{
    let icon = icon.map(|path| {
        let pixmap = Pixmap::load(parent.resources(), path);
        Arc::new(Label::with_pixmap(
            parent,
            pixmap,
            icon_size.unwrap_or(DEFAULT_ICON_SIZE),
        ))
    });
    let content = Arc::new(factory(parent));

    let row = LabeledWidget {
        id: next_widget_id("labeled"),
        label: Arc::new(Label::new(parent, label)),
        icon,
        content: Arc::clone(&content),
        enabled: State::new(parent.graph(), true),
    };
    (row, content)
}

impl<W: Widget> LabeledWidget<W> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Element id of the nested icon and label group, present with an icon
    pub fn icon_group_id(&self) -> String {
        format!("{}/icon-group", self.id)
    }

    pub fn label(&self) -> &Arc<Label> {
        &self.label
    }

    pub fn icon(&self) -> Option<&Arc<Label>> {
        self.icon.as_ref()
    }

    pub fn content(&self) -> &Arc<W> {
        &self.content
    }

    fn label_column(&self) -> Box<dyn ElementBuilder> {
        match &self.icon {
            None => self.label.element(),
            Some(icon) => Box::new(
                BoxLayout::row()
                    .margins(0.0)
                    .spacing(ICON_SPACING)
                    .container()
                    .id(self.icon_group_id())
                    .items_center()
                    .child_box(icon.element())
                    .child_box(self.label.element()),
            ),
        }
    }
}

impl<W: Widget> Widget for LabeledWidget<W> {
    fn element(&self) -> Box<dyn ElementBuilder> {
        let layout = BoxLayout::row().margins(ROW_MARGINS).spacing(ROW_SPACING);
        let (label_stretch, content_stretch) = COLUMN_STRETCH;

        Box::new(
            layout
                .container()
                .id(self.id.clone())
                .items_center()
                .child(layout.item(self.label_column(), label_stretch))
                .child(layout.item(self.content.element(), content_stretch)),
        )
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        self.label.set_enabled(enabled);
        if let Some(icon) = &self.icon {
            icon.set_enabled(enabled);
        }
        self.content.set_enabled(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.try_get().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_layout::widgets::{window, Frame};
    use strata_layout::RenderTree;

    #[test]
    fn test_disable_reaches_every_part() {
        let ctx = UiContext::new();
        let (row, rule) = labeled_widget(Frame::hline, &ctx, "Title", Some(":icons/none.png"), Some(30.0));

        row.set_enabled(false);
        assert!(!row.is_enabled());
        assert!(!row.label().is_enabled());
        assert!(!row.icon().unwrap().is_enabled());
        assert!(!rule.is_enabled());
    }

    #[test]
    fn test_content_column_takes_extra_width() {
        let ctx = UiContext::new();
        let (row, rule) = labeled_widget(Frame::hline, &ctx, "Title", None, None);

        let root = window(row.element(), 300.0, 40.0);
        let mut tree = RenderTree::from_element(&root);
        tree.compute_layout(300.0, 40.0);

        let label = tree.find_by_id(row.label().id()).unwrap();
        let content = tree.find_by_id(rule.id()).unwrap();
        let label = tree.get_absolute_bounds(label).unwrap();
        let content = tree.get_absolute_bounds(content).unwrap();

        assert_eq!(label.x, ROW_MARGINS);
        assert_eq!(content.x, label.x + label.width + ROW_SPACING);
        assert_eq!(content.x + content.width, 300.0 - ROW_MARGINS);
    }
}
