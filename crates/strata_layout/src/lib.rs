//! Strata Layout Engine
//!
//! Flexbox layout powered by Taffy with a builder API, a render tree that
//! paints into any [`DrawContext`](strata_core::DrawContext) and routes input,
//! and the primitive widgets composite widgets are built from.
//!
//! # Example
//!
//! ```rust
//! use strata_layout::prelude::*;
//!
//! let ui = div()
//!     .flex_row()
//!     .w(300.0)
//!     .p_px(1.0)
//!     .gap_px(15.0)
//!     .child(text("Metallic"))
//!     .child(div().stretch(1.0).h(20.0));
//!
//! let mut tree = RenderTree::from_element(&ui);
//! tree.compute_layout(300.0, 40.0);
//! ```

pub mod canvas;
pub mod context;
pub mod css_parser;
pub mod div;
pub mod element;
pub mod element_style;
pub mod event_handler;
pub mod image;
pub mod renderer;
pub mod text;
pub mod text_measure;
pub mod tree;
pub mod widgets;

// Core types
pub use element::{ElementBounds, RenderProps};
pub use event_handler::{EventCallback, EventContext, EventHandlers, HandlerRegistry};
pub use tree::{LayoutNodeId, LayoutTree};

// Elements
pub use canvas::{canvas, Canvas, CanvasBounds, CanvasRenderFn};
pub use div::{div, Div, ElementBuilder, ElementTypeId};
pub use image::{img, Image, Pixmap};
pub use text::{text, Text};

// Styling
pub use css_parser::{CssParseResult, ElementState, ParseError, Severity, Stylesheet};
pub use element_style::ElementStyle;

// Rendering and input
pub use renderer::{RenderNode, RenderTree};

// Widgets
pub use context::UiContext;
pub use widgets::{
    BoxLayout, Checkbox, Direction, DoubleSpinBox, Frame, FrameShadow, FrameShape, Label, Widget,
};

pub use text_measure::{measure_text, set_text_measurer, TextMeasurer, TextMetrics};

/// Prelude for building element trees and widgets
pub mod prelude {
    pub use crate::canvas::{canvas, Canvas, CanvasBounds};
    pub use crate::context::UiContext;
    pub use crate::div::{div, Div, ElementBuilder};
    pub use crate::element::ElementBounds;
    pub use crate::event_handler::{EventContext, EventHandlers};
    pub use crate::image::{img, Image, Pixmap};
    pub use crate::renderer::RenderTree;
    pub use crate::text::{text, Text};
    pub use crate::tree::LayoutNodeId;
    pub use crate::widgets::{window, BoxLayout, Direction, Widget};
}
