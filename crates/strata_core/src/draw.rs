//! Drawing API
//!
//! Elements paint through the [`DrawContext`] trait. A renderer backend
//! implements it to rasterize; [`RecordingContext`] records the calls as
//! [`DrawCommand`]s so they can be replayed later or inspected in tests.
//!
//! ```rust
//! use strata_core::{Color, DrawContext, Point, RecordingContext, Size, Stroke};
//!
//! let mut ctx = RecordingContext::new(Size::new(100.0, 20.0));
//! ctx.draw_line(
//!     Point::new(2.0, 20.0),
//!     Point::new(2.0, 10.0),
//!     &Stroke::new(1.0),
//!     Color::WHITE.into(),
//! );
//! assert_eq!(ctx.commands().len(), 1);
//! ```

use crate::layer::{Brush, Color, CornerRadius, Point, Rect, Size};

/// 2D affine transform restricted to scale + translation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: x,
            translate_y: y,
        }
    }

    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            scale_x: sx,
            scale_y: sy,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    /// Compose: apply `self` first, then `next`
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            scale_x: self.scale_x * next.scale_x,
            scale_y: self.scale_y * next.scale_y,
            translate_x: self.translate_x * next.scale_x + next.translate_x,
            translate_y: self.translate_y * next.scale_y + next.translate_y,
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale_x + self.translate_x,
            point.y * self.scale_y + self.translate_y,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Stroke style for lines and outlines
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
}

impl Stroke {
    pub fn new(width: f32) -> Self {
        Self { width }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self { width: 1.0 }
    }
}

/// Horizontal text alignment relative to the origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Which part of the text line the origin's y refers to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// Text style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Text alignment
    pub align: TextAlign,
    /// Text baseline
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color::BLACK,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

impl TextStyle {
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }
}

/// Handle to an image known to the renderer (hash of its resource path)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

/// A recorded drawing operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushTransform(Transform),
    PopTransform,
    PushOpacity(f32),
    PopOpacity,

    // 2D drawing
    FillRect {
        rect: Rect,
        corner_radius: CornerRadius,
        brush: Brush,
    },
    StrokeRect {
        rect: Rect,
        corner_radius: CornerRadius,
        stroke: Stroke,
        brush: Brush,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
        brush: Brush,
    },
    DrawText {
        text: String,
        origin: Point,
        style: TextStyle,
    },
    DrawImage {
        image: ImageId,
        rect: Rect,
    },
}

/// Unified 2D drawing interface
pub trait DrawContext {
    /// Push a transform onto the stack
    fn push_transform(&mut self, transform: Transform);

    /// Pop the most recent transform
    fn pop_transform(&mut self);

    /// The accumulated transform
    fn current_transform(&self) -> Transform;

    /// Multiply subsequent drawing by `opacity`
    fn push_opacity(&mut self, opacity: f32);

    fn pop_opacity(&mut self);

    fn fill_rect(&mut self, rect: Rect, corner_radius: CornerRadius, brush: Brush);

    fn stroke_rect(&mut self, rect: Rect, corner_radius: CornerRadius, stroke: &Stroke, brush: Brush);

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke, brush: Brush);

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);

    fn draw_image(&mut self, image: ImageId, rect: Rect);

    /// Size of the drawing surface
    fn viewport_size(&self) -> Size;
}

/// A DrawContext that records commands
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Transform>,
    opacity_stack: Vec<f32>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![Transform::identity()],
            opacity_stack: vec![1.0],
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the context empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clear commands and reset state stacks
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack = vec![Transform::identity()];
        self.opacity_stack = vec![1.0];
    }

    /// Current accumulated opacity
    pub fn current_opacity(&self) -> f32 {
        *self.opacity_stack.last().unwrap_or(&1.0)
    }

    /// Text of every DrawText command, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let combined = transform.then(&self.current_transform());
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.commands.push(DrawCommand::PushOpacity(opacity));
        let current = self.current_opacity();
        self.opacity_stack.push(current * opacity);
    }

    fn pop_opacity(&mut self) {
        self.commands.push(DrawCommand::PopOpacity);
        if self.opacity_stack.len() > 1 {
            self.opacity_stack.pop();
        }
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: CornerRadius, brush: Brush) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            corner_radius,
            brush,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, corner_radius: CornerRadius, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            corner_radius,
            stroke: stroke.clone(),
            brush,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: stroke.clone(),
            brush,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            origin,
            style: style.clone(),
        });
    }

    fn draw_image(&mut self, image: ImageId, rect: Rect) {
        self.commands.push(DrawCommand::DrawImage { image, rect });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_stack_composes_translations() {
        let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
        ctx.push_transform(Transform::translate(10.0, 5.0));
        ctx.push_transform(Transform::translate(1.0, 1.0));

        let origin = ctx.current_transform().apply(Point::ZERO);
        assert_eq!(origin, Point::new(11.0, 6.0));

        ctx.pop_transform();
        let origin = ctx.current_transform().apply(Point::ZERO);
        assert_eq!(origin, Point::new(10.0, 5.0));
    }

    #[test]
    fn test_opacity_multiplies() {
        let mut ctx = RecordingContext::new(Size::ZERO);
        ctx.push_opacity(0.5);
        ctx.push_opacity(0.5);
        assert_eq!(ctx.current_opacity(), 0.25);
        ctx.pop_opacity();
        assert_eq!(ctx.current_opacity(), 0.5);
    }

    #[test]
    fn test_texts_filters_draw_text() {
        let mut ctx = RecordingContext::new(Size::ZERO);
        ctx.fill_rect(Rect::ZERO, CornerRadius::ZERO, Color::BLACK.into());
        ctx.draw_text("0.5", Point::ZERO, &TextStyle::default());
        assert_eq!(ctx.texts(), vec!["0.5"]);

        ctx.clear();
        assert!(ctx.commands().is_empty());
    }
}
