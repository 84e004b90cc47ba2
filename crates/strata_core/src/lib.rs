//! Strata Core Runtime
//!
//! Foundational primitives for the Strata widget toolkit:
//!
//! - **Reactive State**: signals with explicit effect subscriptions and batching
//! - **State Machines**: interaction states for widgets
//! - **Events**: normalized pointer, wheel and keyboard input
//! - **Draw Context**: recorded 2D drawing commands
//! - **Theme**: design tokens loaded from TOML
//! - **Resources**: embedded and file-system resources by logical path
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use strata_core::reactive::{batch, ReactiveGraph, State};
//!
//! let graph = Arc::new(Mutex::new(ReactiveGraph::new()));
//! let x = State::new(&graph, 0.0f64);
//! let y = State::new(&graph, 0.0f64);
//!
//! x.on_change(|v| println!("x is now {v}"));
//!
//! batch(&graph, || {
//!     x.set(0.5);
//!     y.set(-0.3);
//! });
//! assert_eq!(x.get(), 0.5);
//! ```

pub mod draw;
pub mod error;
pub mod events;
pub mod fsm;
pub mod layer;
pub mod reactive;
pub mod resources;
pub mod theme;

pub use draw::{
    DrawCommand, DrawContext, ImageId, RecordingContext, Stroke, TextAlign, TextBaseline,
    TextStyle, Transform,
};
pub use error::{ResourceError, ThemeError};
pub use events::{event_types, Event, EventData, EventType, KeyCode, Modifiers};
pub use fsm::{NoState, StateMachine, StateTransitions};
pub use layer::{Brush, Color, CornerRadius, Point, Rect, Size};
pub use reactive::{
    DirtyFlag, Effect, EffectId, ReactiveGraph, SharedReactiveGraph, Signal, SignalId, State,
};
pub use resources::ResourceBundle;
pub use theme::{ColorToken, Theme, ThemeState};
