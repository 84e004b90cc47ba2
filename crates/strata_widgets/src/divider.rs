//! Horizontal and vertical divider lines
//!
//! Both are sunken line frames: a dark line followed by a light one.
//! They deref to [`Frame`] for shape and id queries.

use std::ops::Deref;

use strata_layout::div::ElementBuilder;
use strata_layout::widgets::{Frame, Widget};
use strata_layout::UiContext;

/// Horizontal rule spanning the available width
pub struct HLine {
    frame: Frame,
}

impl HLine {
    pub fn new(parent: &UiContext) -> Self {
        Self {
            frame: Frame::hline(parent),
        }
    }
}

impl Deref for HLine {
    type Target = Frame;

    fn deref(&self) -> &Self::Target {
        &self.frame
    }
}

impl Widget for HLine {
    fn element(&self) -> Box<dyn ElementBuilder> {
        self.frame.element()
    }

    fn set_enabled(&self, enabled: bool) {
        self.frame.set_enabled(enabled)
    }

    fn is_enabled(&self) -> bool {
        self.frame.is_enabled()
    }
}

/// Vertical rule spanning the available height
pub struct VLine {
    frame: Frame,
}

impl VLine {
    pub fn new(parent: &UiContext) -> Self {
        Self {
            frame: Frame::vline(parent),
        }
    }
}

impl Deref for VLine {
    type Target = Frame;

    fn deref(&self) -> &Self::Target {
        &self.frame
    }
}

impl Widget for VLine {
    fn element(&self) -> Box<dyn ElementBuilder> {
        self.frame.element()
    }

    fn set_enabled(&self, enabled: bool) {
        self.frame.set_enabled(enabled)
    }

    fn is_enabled(&self) -> bool {
        self.frame.is_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{DrawCommand, RecordingContext, Size};
    use strata_layout::widgets::{window, FrameShadow, FrameShape};
    use strata_layout::RenderTree;

    #[test]
    fn test_shapes() {
        let ctx = UiContext::new();
        let h = HLine::new(&ctx);
        let v = VLine::new(&ctx);

        assert_eq!(h.shape(), FrameShape::HLine);
        assert_eq!(v.shape(), FrameShape::VLine);
        assert_eq!(h.shadow(), FrameShadow::Sunken);
        assert_eq!(v.shadow(), FrameShadow::Sunken);
    }

    #[test]
    fn test_disabled_line_is_dimmed() {
        let ctx = UiContext::new();
        let line = HLine::new(&ctx);
        line.set_enabled(false);

        let root = window(line.element(), 100.0, 10.0);
        let mut tree = RenderTree::from_element(&root);
        tree.compute_layout(100.0, 10.0);
        let mut draw = RecordingContext::new(Size::new(100.0, 10.0));
        tree.render(&mut draw);

        assert!(draw
            .commands()
            .iter()
            .any(|cmd| matches!(cmd, DrawCommand::PushOpacity(o) if *o < 1.0)));
    }
}
