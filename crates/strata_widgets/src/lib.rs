//! Strata inspector widgets
//!
//! Composite widgets for property panels, built from the `strata_layout`
//! primitives:
//!
//! - [`labeled_widget`]: `[icon] label [content]` rows
//! - [`HLine`] / [`VLine`]: sunken divider rules
//! - [`AnnotatedSlider`]: a slider with a value readout and tick marks
//! - [`CollapsibleGroup`]: a titled group folded by a checkbox
//! - [`VectorSpinner`]: three spin boxes editing an `[x, y, z]` vector
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use strata_widgets::prelude::*;
//!
//! let ctx = UiContext::new();
//!
//! let group = CollapsibleGroup::new(&ctx, "Transform", None);
//! let (row, offset) = labeled_widget(|c| VectorSpinner::new(c, [0.0; 3]), &ctx, "Offset", None, None);
//! group.add_widget(Arc::new(row));
//!
//! offset.set_value(0.5, -0.3, 0.8);
//! assert_eq!(offset.value(), [0.5, -0.3, 0.8]);
//!
//! group.set_collapsed(true);
//! assert!(!group.is_checked());
//! ```

pub mod annotated_slider;
pub mod collapsible_group;
pub mod divider;
pub mod error;
pub mod labeled;
pub mod resources;
pub mod vector_spinner;

pub use annotated_slider::{
    format_readout, tick_count, tick_marks, AnnotatedSlider, Orientation, SliderHandleState,
    TickMark,
};
pub use collapsible_group::CollapsibleGroup;
pub use divider::{HLine, VLine};
pub use error::{Result, WidgetError};
pub use labeled::{labeled_widget, LabeledWidget};
pub use resources::{bundled_resources, COLLAPSIBLE_GROUP_STYLESHEET};
pub use vector_spinner::VectorSpinner;

/// Widgets plus the layout types needed to place them
pub mod prelude {
    pub use crate::annotated_slider::{AnnotatedSlider, Orientation};
    pub use crate::collapsible_group::CollapsibleGroup;
    pub use crate::divider::{HLine, VLine};
    pub use crate::labeled::{labeled_widget, LabeledWidget};
    pub use crate::resources::bundled_resources;
    pub use crate::vector_spinner::VectorSpinner;
    pub use strata_layout::prelude::*;
}
