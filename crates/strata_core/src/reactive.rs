//! Reactive signal system
//!
//! Signals hold values in a shared [`ReactiveGraph`]. Effects are explicit
//! subscriptions to a set of signals: when one of those signals changes, the
//! effect is queued and runs once the graph lock has been released, so an
//! effect may freely read or write other state.
//!
//! Inside a batch, queued effects are deferred and de-duplicated until the
//! outermost batch ends. An effect subscribed to three signals that are all
//! written in one batch runs exactly once.
//!
//! # State
//!
//! [`State<T>`] wraps a signal together with the shared graph and is the API
//! widgets use for their model values.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use strata_core::reactive::{ReactiveGraph, State};
//!
//! let graph = Arc::new(Mutex::new(ReactiveGraph::new()));
//! let checked = State::new(&graph, true);
//!
//! checked.set(false);
//! assert!(!checked.get());
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

new_key_type! {
    /// Unique identifier for a signal
    pub struct SignalId;
    /// Unique identifier for an effect
    pub struct EffectId;
}

/// A reactive signal handle (cheap to copy)
#[derive(Debug)]
pub struct Signal<T> {
    id: SignalId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> Signal<T> {
    /// Get the signal's internal ID
    pub fn id(&self) -> SignalId {
        self.id
    }
}

/// An effect handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    id: EffectId,
}

impl Effect {
    pub fn id(&self) -> EffectId {
        self.id
    }
}

/// Effect body. Runs without the graph lock held.
pub type EffectFn = Arc<dyn Fn() + Send + Sync>;

struct SignalNode {
    /// The signal value (type-erased)
    value: Box<dyn Any + Send>,
    /// Version counter for change detection
    version: u64,
    /// Effects to queue on change
    subscribers: SmallVec<[EffectId; 4]>,
}

struct EffectNode {
    run: EffectFn,
    dependencies: SmallVec<[SignalId; 4]>,
    /// Queued and not yet run
    dirty: bool,
    /// Registration order
    seq: u64,
}

/// The reactive graph that owns all signals and effects
pub struct ReactiveGraph {
    signals: SlotMap<SignalId, SignalNode>,
    effects: SlotMap<EffectId, EffectNode>,
    /// Effects queued since the last flush
    pending_effects: Vec<EffectId>,
    /// Current batch depth (> 0 means we're in a batch)
    batch_depth: u32,
    next_seq: u64,
    global_version: u64,
}

impl ReactiveGraph {
    /// Create a new reactive graph
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            effects: SlotMap::with_key(),
            pending_effects: Vec::new(),
            batch_depth: 0,
            next_seq: 0,
            global_version: 0,
        }
    }

    // =========================================================================
    // SIGNALS
    // =========================================================================

    /// Create a new signal with an initial value
    pub fn create_signal<T: Send + 'static>(&mut self, initial: T) -> Signal<T> {
        let id = self.signals.insert(SignalNode {
            value: Box::new(initial),
            version: 0,
            subscribers: SmallVec::new(),
        });
        Signal {
            id,
            _marker: PhantomData,
        }
    }

    /// Get the current value of a signal
    pub fn get<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        self.signals
            .get(signal.id)
            .and_then(|node| node.value.downcast_ref::<T>().cloned())
    }

    /// Set the value of a signal
    ///
    /// Returns `false` (and queues nothing) when the new value equals the
    /// current one. Queued effects are not run here; see [`flush`].
    pub fn set<T: PartialEq + Send + 'static>(&mut self, signal: Signal<T>, value: T) -> bool {
        let Some(node) = self.signals.get_mut(signal.id) else {
            return false;
        };

        if node.value.downcast_ref::<T>() == Some(&value) {
            return false;
        }

        node.value = Box::new(value);
        node.version += 1;
        self.global_version += 1;

        let subscribers = node.subscribers.clone();
        for effect_id in subscribers {
            self.mark_dirty(effect_id);
        }
        true
    }

    /// Get the version of a signal (for change detection)
    pub fn signal_version(&self, id: SignalId) -> Option<u64> {
        self.signals.get(id).map(|n| n.version)
    }

    // =========================================================================
    // EFFECTS
    // =========================================================================

    /// Subscribe `run` to changes of any signal in `dependencies`
    ///
    /// The effect does not run at registration.
    pub fn create_effect(&mut self, dependencies: &[SignalId], run: EffectFn) -> Effect {
        let seq = self.next_seq;
        self.next_seq += 1;

        let id = self.effects.insert(EffectNode {
            run,
            dependencies: dependencies.iter().copied().collect(),
            dirty: false,
            seq,
        });

        for dep in dependencies {
            if let Some(sig) = self.signals.get_mut(*dep) {
                if !sig.subscribers.contains(&id) {
                    sig.subscribers.push(id);
                }
            }
        }

        Effect { id }
    }

    /// Dispose of an effect, removing it from the graph
    pub fn dispose_effect(&mut self, effect: Effect) {
        if let Some(node) = self.effects.remove(effect.id) {
            for dep_id in &node.dependencies {
                if let Some(sig) = self.signals.get_mut(*dep_id) {
                    sig.subscribers.retain(|s| *s != effect.id);
                }
            }
        }
        self.pending_effects.retain(|id| *id != effect.id);
    }

    // =========================================================================
    // BATCHING
    // =========================================================================

    /// Start a batch - effects won't be released until the batch ends
    pub fn batch_start(&mut self) {
        self.batch_depth += 1;
    }

    /// End a batch; returns true when the outermost batch closed
    pub fn batch_end(&mut self) -> bool {
        if self.batch_depth > 0 {
            self.batch_depth -= 1;
        }
        self.batch_depth == 0
    }

    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    /// Drain queued effects in registration order
    ///
    /// Returns nothing while a batch is open.
    pub fn take_pending_effects(&mut self) -> Vec<EffectFn> {
        if self.batch_depth > 0 || self.pending_effects.is_empty() {
            return Vec::new();
        }

        let mut ids: Vec<EffectId> = std::mem::take(&mut self.pending_effects);
        ids.sort_by_key(|id| self.effects.get(*id).map(|n| n.seq).unwrap_or(u64::MAX));

        ids.into_iter()
            .filter_map(|id| {
                let node = self.effects.get_mut(id)?;
                node.dirty = false;
                Some(node.run.clone())
            })
            .collect()
    }

    fn mark_dirty(&mut self, id: EffectId) {
        if let Some(node) = self.effects.get_mut(id) {
            if !node.dirty {
                node.dirty = true;
                self.pending_effects.push(id);
            }
        }
    }

    /// Get statistics about the reactive graph
    pub fn stats(&self) -> ReactiveStats {
        ReactiveStats {
            signal_count: self.signals.len(),
            effect_count: self.effects.len(),
            pending_effects: self.pending_effects.len(),
            global_version: self.global_version,
        }
    }
}

impl Default for ReactiveGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the reactive graph
#[derive(Debug, Clone)]
pub struct ReactiveStats {
    pub signal_count: usize,
    pub effect_count: usize,
    pub pending_effects: usize,
    pub global_version: u64,
}

// =============================================================================
// SHARED GRAPH
// =============================================================================

/// Shared reactive graph for thread-safe access
pub type SharedReactiveGraph = Arc<Mutex<ReactiveGraph>>;

/// Shared dirty flag for triggering relayout
pub type DirtyFlag = Arc<AtomicBool>;

/// Lock the graph, recovering the guard if a panicking effect poisoned it
pub fn lock_graph(graph: &SharedReactiveGraph) -> MutexGuard<'_, ReactiveGraph> {
    graph.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run every queued effect outside the lock
///
/// Effects that write state queue follow-up effects, which the nested
/// `flush` from [`State::set`] picks up.
pub fn flush(graph: &SharedReactiveGraph) {
    let effects = lock_graph(graph).take_pending_effects();
    for effect in effects {
        effect();
    }
}

/// Open batch level, closed on drop if `f` unwinds
struct BatchGuard<'a> {
    graph: &'a SharedReactiveGraph,
    open: bool,
}

impl BatchGuard<'_> {
    /// Close the level; true when it was the outermost
    fn close(mut self) -> bool {
        self.open = false;
        lock_graph(self.graph).batch_end()
    }
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        if self.open {
            lock_graph(self.graph).batch_end();
        }
    }
}

/// Run `f` as one batch: observers see only the final values, once
pub fn batch<R>(graph: &SharedReactiveGraph, f: impl FnOnce() -> R) -> R {
    lock_graph(graph).batch_start();
    let guard = BatchGuard { graph, open: true };
    let result = f();
    if guard.close() {
        flush(graph);
    }
    result
}

/// Subscribe `f` to several signals at once
pub fn effect(
    graph: &SharedReactiveGraph,
    dependencies: &[SignalId],
    f: impl Fn() + Send + Sync + 'static,
) -> Effect {
    lock_graph(graph).create_effect(dependencies, Arc::new(f))
}

// =============================================================================
// STATE - High-level API for widget state
// =============================================================================

/// A bound state value with direct get/set methods
pub struct State<T> {
    signal: Signal<T>,
    reactive: SharedReactiveGraph,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal,
            reactive: Arc::clone(&self.reactive),
        }
    }
}

impl<T> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State").field("signal", &self.signal.id).finish()
    }
}

impl<T: Clone + Send + 'static> State<T> {
    /// Create a signal in `reactive` and wrap it
    pub fn new(reactive: &SharedReactiveGraph, initial: T) -> Self {
        let signal = lock_graph(reactive).create_signal(initial);
        Self::from_signal(signal, Arc::clone(reactive))
    }

    /// Wrap an existing signal
    pub fn from_signal(signal: Signal<T>, reactive: SharedReactiveGraph) -> Self {
        Self { signal, reactive }
    }

    /// Get the current value
    pub fn get(&self) -> T
    where
        T: Default,
    {
        self.try_get().unwrap_or_default()
    }

    /// Get the current value, returning None if the signal is gone
    pub fn try_get(&self) -> Option<T> {
        lock_graph(&self.reactive).get(self.signal)
    }

    /// Set a new value, running observers if it changed
    pub fn set(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        let changed = lock_graph(&self.reactive).set(self.signal, value);
        if changed {
            flush(&self.reactive);
        }
        changed
    }

    /// Update the value using a function
    pub fn update(&self, f: impl FnOnce(T) -> T) -> bool
    where
        T: PartialEq + Default,
    {
        self.set(f(self.get()))
    }

    /// Register an observer called with the new value after each change
    pub fn on_change(&self, f: impl Fn(T) + Send + Sync + 'static) -> Effect {
        // The graph owns the effect, so it only holds the graph weakly
        let signal = self.signal;
        let graph: Weak<Mutex<ReactiveGraph>> = Arc::downgrade(&self.reactive);
        effect(&self.reactive, &[signal.id()], move || {
            let value = graph.upgrade().and_then(|reactive| lock_graph(&reactive).get(signal));
            if let Some(value) = value {
                f(value);
            }
        })
    }

    /// Get the underlying signal
    pub fn signal(&self) -> Signal<T> {
        self.signal
    }

    /// Get the signal ID (for effect dependencies)
    pub fn signal_id(&self) -> SignalId {
        self.signal.id()
    }

    /// The graph this state lives in
    pub fn graph(&self) -> &SharedReactiveGraph {
        &self.reactive
    }
}
