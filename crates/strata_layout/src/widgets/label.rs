//! Text and pixmap labels

use std::sync::{Mutex, PoisonError};

use strata_core::{ColorToken, State, ThemeState};

use crate::context::UiContext;
use crate::div::{div, ElementBuilder};
use crate::image::{img, Pixmap};
use crate::text::text;
use crate::widgets::{next_widget_id, Widget, DISABLED_OPACITY};

#[derive(Clone, Debug, PartialEq)]
enum LabelContent {
    Text(String),
    /// Pixmap scaled to fit a square of the given side
    Pixmap(Pixmap, f32),
}

/// A static label showing either text or an image
pub struct Label {
    id: String,
    content: Mutex<LabelContent>,
    enabled: State<bool>,
}

impl Label {
    pub fn new(ctx: &UiContext, content: impl Into<String>) -> Self {
        Self::with_content(ctx, LabelContent::Text(content.into()))
    }

    /// Label showing `pixmap` scaled to fit `size × size`
    pub fn with_pixmap(ctx: &UiContext, pixmap: Pixmap, size: f32) -> Self {
        Self::with_content(ctx, LabelContent::Pixmap(pixmap, size))
    }

    fn with_content(ctx: &UiContext, content: LabelContent) -> Self {
        Self {
            id: next_widget_id("label"),
            content: Mutex::new(content),
            enabled: State::new(ctx.graph(), true),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The label's text; empty for pixmap labels
    pub fn text(&self) -> String {
        match &*self.content.lock().unwrap_or_else(PoisonError::into_inner) {
            LabelContent::Text(content) => content.clone(),
            LabelContent::Pixmap(..) => String::new(),
        }
    }

    pub fn set_text(&self, content: impl Into<String>) {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) =
            LabelContent::Text(content.into());
    }

    pub fn pixmap(&self) -> Option<Pixmap> {
        match &*self.content.lock().unwrap_or_else(PoisonError::into_inner) {
            LabelContent::Pixmap(pixmap, _) => Some(pixmap.clone()),
            LabelContent::Text(_) => None,
        }
    }
}

impl Widget for Label {
    fn element(&self) -> Box<dyn ElementBuilder> {
        let enabled = self.is_enabled();
        let content = self
            .content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let inner: Box<dyn ElementBuilder> = match content {
            LabelContent::Text(content) => {
                let token = if enabled {
                    ColorToken::TextPrimary
                } else {
                    ColorToken::TextDisabled
                };
                Box::new(text(content).color(ThemeState::get().color(token)))
            }
            LabelContent::Pixmap(pixmap, size) => {
                let opacity = if enabled { 1.0 } else { DISABLED_OPACITY };
                Box::new(img(pixmap).fit(size, size).opacity(opacity))
            }
        };

        Box::new(
            div()
                .id(self.id.clone())
                .flex_row()
                .items_center()
                .flex_shrink_0()
                .child_box(inner),
        )
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
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
    use strata_core::{DrawCommand, RecordingContext, Size};

    fn painted_text_color(label: &Label) -> Option<strata_core::Color> {
        let root = window(label.element(), 200.0, 40.0);
        let mut tree = RenderTree::from_element(&root);
        tree.compute_layout(200.0, 40.0);
        let mut ctx = RecordingContext::new(Size::new(200.0, 40.0));
        tree.render(&mut ctx);
        ctx.commands().iter().find_map(|cmd| match cmd {
            DrawCommand::DrawText { style, .. } => Some(style.color),
            _ => None,
        })
    }

    #[test]
    fn test_disabled_label_uses_disabled_color() {
        let ctx = UiContext::new();
        let label = Label::new(&ctx, "Roughness");
        let theme = ThemeState::get();

        assert_eq!(
            painted_text_color(&label),
            Some(theme.color(ColorToken::TextPrimary))
        );

        label.set_enabled(false);
        assert_eq!(
            painted_text_color(&label),
            Some(theme.color(ColorToken::TextDisabled))
        );
    }

    #[test]
    fn test_empty_pixmap_label_has_no_size() {
        let ctx = UiContext::new();
        let icon = Label::with_pixmap(&ctx, Pixmap::empty(), 40.0);

        assert_eq!(icon.size_hint(), Size::new(0.0, 0.0));
        assert!(icon.text().is_empty());
        assert!(icon.pixmap().is_some());
    }

    #[test]
    fn test_set_text() {
        let ctx = UiContext::new();
        let label = Label::new(&ctx, "a");
        label.set_text("b");
        assert_eq!(label.text(), "b");
    }
}
