//! Frames: boxed containers and divider lines
//!
//! A sunken or raised frame is drawn with two lines per edge, a dark one
//! from [`ColorToken::LineShadow`] and a light one from
//! [`ColorToken::LineLight`]. Sunken puts the dark line first.

use std::sync::{Arc, Mutex, PoisonError};

use strata_core::{ColorToken, DrawContext, Point, State, Stroke, ThemeState};

use crate::canvas::{canvas, CanvasBounds};
use crate::context::UiContext;
use crate::div::{div, Div, ElementBuilder};
use crate::widgets::{next_widget_id, Widget, DEFAULT_SPACING, DISABLED_OPACITY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameShape {
    NoFrame,
    Box,
    HLine,
    VLine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameShadow {
    Plain,
    Sunken,
    Raised,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Row,
    Column,
}

/// Box layout parameters: direction, contents margins and item spacing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxLayout {
    pub direction: Direction,
    pub margins: f32,
    pub spacing: f32,
}

impl BoxLayout {
    pub fn row() -> Self {
        Self {
            direction: Direction::Row,
            margins: 0.0,
            spacing: DEFAULT_SPACING,
        }
    }

    pub fn column() -> Self {
        Self {
            direction: Direction::Column,
            ..Self::row()
        }
    }

    pub fn margins(mut self, margins: f32) -> Self {
        self.margins = margins;
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Empty container div laid out with these parameters
    pub fn container(&self) -> Div {
        let container = match self.direction {
            Direction::Row => div().flex_row(),
            Direction::Column => div().flex_col(),
        };
        container.p_px(self.margins).gap_px(self.spacing)
    }

    /// Wrap an item so it takes `stretch` shares of the extra space
    ///
    /// The wrapper runs along the layout's direction: the item is stretched
    /// across it and may grow along it.
    pub fn item(&self, element: Box<dyn ElementBuilder>, stretch: f32) -> Div {
        let wrapper = match self.direction {
            Direction::Row => div().flex_row(),
            Direction::Column => div().flex_col(),
        };
        wrapper.stretch(stretch).child_box(element)
    }
}

/// A frame, optionally holding child widgets in a box layout
pub struct Frame {
    id: String,
    shape: FrameShape,
    shadow: FrameShadow,
    line_width: f32,
    layout: BoxLayout,
    children: Mutex<Vec<(Arc<dyn Widget>, f32)>>,
    enabled: State<bool>,
}

impl Frame {
    pub fn new(ctx: &UiContext, shape: FrameShape, shadow: FrameShadow) -> Self {
        let prefix = match shape {
            FrameShape::NoFrame | FrameShape::Box => "frame",
            FrameShape::HLine => "hline",
            FrameShape::VLine => "vline",
        };
        Self {
            id: next_widget_id(prefix),
            shape,
            shadow,
            line_width: 1.0,
            layout: BoxLayout::row(),
            children: Mutex::new(Vec::new()),
            enabled: State::new(ctx.graph(), true),
        }
    }

    /// Horizontal sunken rule
    pub fn hline(ctx: &UiContext) -> Self {
        Self::new(ctx, FrameShape::HLine, FrameShadow::Sunken)
    }

    /// Vertical sunken rule
    pub fn vline(ctx: &UiContext) -> Self {
        Self::new(ctx, FrameShape::VLine, FrameShadow::Sunken)
    }

    pub fn with_layout(mut self, layout: BoxLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width.max(0.0);
        self
    }

    pub fn shape(&self) -> FrameShape {
        self.shape
    }

    pub fn shadow(&self) -> FrameShadow {
        self.shadow
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append a child with stretch factor 0
    pub fn add_widget(&self, widget: Arc<dyn Widget>) {
        self.add_widget_with_stretch(widget, 0.0);
    }

    pub fn add_widget_with_stretch(&self, widget: Arc<dyn Widget>, stretch: f32) {
        widget.set_enabled(self.is_enabled());
        self.children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((widget, stretch));
    }

    pub fn child_count(&self) -> usize {
        self.children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Total thickness of the frame border on one side
    pub fn frame_width(&self) -> f32 {
        match (self.shape, self.shadow) {
            (FrameShape::NoFrame, _) => 0.0,
            (_, FrameShadow::Plain) => self.line_width,
            _ => self.line_width * 2.0,
        }
    }

    /// Dark and light line colors in paint order
    fn line_colors(&self) -> Vec<strata_core::Color> {
        let theme = ThemeState::get();
        let dark = theme.color(ColorToken::LineShadow);
        let light = theme.color(ColorToken::LineLight);
        match self.shadow {
            FrameShadow::Plain => vec![dark],
            FrameShadow::Sunken => vec![dark, light],
            FrameShadow::Raised => vec![light, dark],
        }
    }

    fn line_element(&self) -> Box<dyn ElementBuilder> {
        let colors = self.line_colors();
        let line_width = self.line_width;
        let thickness = self.frame_width();
        let horizontal = self.shape == FrameShape::HLine;
        let opacity = if self.is_enabled() { 1.0 } else { DISABLED_OPACITY };

        let rule = canvas(move |ctx: &mut dyn DrawContext, bounds: CanvasBounds| {
            let stroke = Stroke::new(line_width);
            for (i, color) in colors.iter().enumerate() {
                let offset = line_width * (i as f32 + 0.5);
                let (from, to) = if horizontal {
                    (Point::new(0.0, offset), Point::new(bounds.width, offset))
                } else {
                    (Point::new(offset, 0.0), Point::new(offset, bounds.height))
                };
                ctx.draw_line(from, to, &stroke, (*color).into());
            }
        })
        .opacity(opacity);

        let line = if horizontal {
            div()
                .flex_col()
                .flex_grow()
                .justify_center()
                .child(rule.h(thickness).min_w(1.0))
        } else {
            div().flex_row().child(rule.w(thickness))
        };

        Box::new(line.id(self.id.clone()))
    }

    fn box_element(&self) -> Box<dyn ElementBuilder> {
        let mut content = self.layout.container();
        for (widget, stretch) in self
            .children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            content = content.child(self.layout.item(widget.element(), *stretch));
        }

        if self.shape == FrameShape::NoFrame {
            return Box::new(content.id(self.id.clone()));
        }

        let colors = self.line_colors();
        let frame = colors
            .iter()
            .rev()
            .fold(content.stretch(1.0), |inner, color| {
                div()
                    .flex_col()
                    .stretch(1.0)
                    .border(self.line_width, *color)
                    .p_px(self.line_width)
                    .child(inner)
            });

        Box::new(frame.id(self.id.clone()))
    }
}

impl Widget for Frame {
    fn element(&self) -> Box<dyn ElementBuilder> {
        match self.shape {
            FrameShape::HLine | FrameShape::VLine => self.line_element(),
            FrameShape::Box | FrameShape::NoFrame => self.box_element(),
        }
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        for (child, _) in self
            .children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            child.set_enabled(enabled);
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled.try_get().unwrap_or(true)
    }
}
