//! Shared context handed to widget constructors
//!
//! Widgets do not hold a parent pointer. Everything a widget needs from its
//! surroundings lives here: the reactive graph its state is registered in,
//! the flag used to ask the host for a new layout pass, and the resource
//! bundle for stylesheets and icons.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use strata_core::reactive::{self, DirtyFlag, ReactiveGraph, SharedReactiveGraph};
use strata_core::ResourceBundle;

/// Reactive graph, relayout flag and resources for a widget tree
#[derive(Clone)]
pub struct UiContext {
    graph: SharedReactiveGraph,
    relayout: DirtyFlag,
    resources: Arc<ResourceBundle>,
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

impl UiContext {
    /// A context with a fresh graph and no resources
    pub fn new() -> Self {
        Self {
            graph: Arc::new(Mutex::new(ReactiveGraph::new())),
            relayout: Arc::new(AtomicBool::new(false)),
            resources: Arc::new(ResourceBundle::new()),
        }
    }

    pub fn with_resources(mut self, resources: ResourceBundle) -> Self {
        self.resources = Arc::new(resources);
        self
    }

    pub fn graph(&self) -> &SharedReactiveGraph {
        &self.graph
    }

    pub fn resources(&self) -> &ResourceBundle {
        &self.resources
    }

    /// Ask the host to recompute sizes on the next frame
    pub fn request_relayout(&self, reason: &str) {
        tracing::debug!(reason, "relayout requested");
        self.relayout.store(true, Ordering::SeqCst);
    }

    pub fn needs_relayout(&self) -> bool {
        self.relayout.load(Ordering::SeqCst)
    }

    /// Consume a pending relayout request
    pub fn take_relayout_request(&self) -> bool {
        self.relayout.swap(false, Ordering::SeqCst)
    }

    /// Run `f` with effects deferred until it returns
    pub fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
        reactive::batch(&self.graph, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::State;

    #[test]
    fn test_relayout_request_is_consumed() {
        let ctx = UiContext::new();
        assert!(!ctx.needs_relayout());

        ctx.request_relayout("test");
        assert!(ctx.needs_relayout());
        assert!(ctx.take_relayout_request());
        assert!(!ctx.take_relayout_request());
    }

    #[test]
    fn test_clones_share_graph_and_flag() {
        let ctx = UiContext::new();
        let other = ctx.clone();

        let value = State::new(ctx.graph(), 1);
        other.batch(|| value.set(2));
        assert_eq!(value.get(), 2);

        other.request_relayout("clone");
        assert!(ctx.needs_relayout());
    }
}
