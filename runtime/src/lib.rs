//! # Todoview Runtime
//!
//! The Store: the single coordinator between pure reducers and the outside
//! world.
//!
//! ## Core Components
//!
//! - **Store**: owns the state snapshot and serializes reducer runs
//! - **Effect execution**: spawns `Effect::Future` descriptions and feeds the
//!   actions they produce back into the reducer
//! - **`EffectHandle`**: lets callers wait until a send's effects have settled
//!
//! ## Concurrency model
//!
//! The reducer runs while holding a write lock, so every state transition runs
//! to completion before the next is considered. Effects run on spawned tasks
//! and only re-enter the state through `send`, which takes the same lock.
//! Nothing orders distinct in-flight effects against each other: two requests
//! racing for the same record resolve last-applied-wins.
//!
//! ## Example
//!
//! ```ignore
//! let store = Store::new(TodoState::default(), TodoReducer::new(), api);
//!
//! let mut handle = store.send(TodoAction::LoadAll).await?;
//! handle.wait().await;
//!
//! let total = store.state(|s| s.todos.len()).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use todoview_core::effect::Effect;
use todoview_core::reducer::Reducer;
use tokio::sync::{RwLock, broadcast, watch};

/// Error types for the Store runtime.
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations.
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions.
        #[error("store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete.
        #[error("shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for a send's effects to settle.
        #[error("timed out waiting for effects")]
        Timeout,
    }
}

pub use error::StoreError;

/// Completion tracking shared between a send and the tasks it spawned.
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }
}

/// Decrements the tracking counter when dropped, so the count stays correct
/// even if the effect task panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.counter.fetch_sub(1, Ordering::SeqCst);
        let _ = self.0.notifier.send(());
    }
}

/// Decrements the store-wide pending counter when dropped.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle returned by [`Store::send`] for waiting on effect completion.
///
/// A handle settles once every effect of *that* send has finished, including
/// the reducer run for the action each effect produced. Effects spawned in
/// turn by those feedback actions belong to their own sends and are not
/// covered; in this system response actions never spawn further effects, so
/// settling means the round-trip is fully applied.
#[derive(Debug)]
pub struct EffectHandle {
    counter: Arc<AtomicUsize>,
    notify: watch::Receiver<()>,
}

impl EffectHandle {
    /// Returns `true` once all tracked effects have completed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.counter.load(Ordering::Acquire) == 0
    }

    /// Wait until all tracked effects have completed.
    ///
    /// Returns immediately when the send produced no effects.
    pub async fn wait(&mut self) {
        while self.counter.load(Ordering::Acquire) > 0 {
            if self.notify.changed().await.is_err() {
                break;
            }
        }
    }

    /// Wait with an upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if effects are still running when the
    /// timeout expires. The effects themselves keep running; there is no
    /// cancellation.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

/// The Store: state, reducer, environment, and the effect feedback loop.
///
/// # Type Parameters
///
/// - `S`: state type
/// - `A`: action type
/// - `E`: environment type
/// - `R`: reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
    /// Every action produced by an effect is broadcast to observers before it
    /// is fed back into the reducer. Shells and tests subscribe here.
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment.
    ///
    /// The action broadcast channel gets a capacity of 16; observers that lag
    /// further behind miss actions (see [`Self::with_broadcast_capacity`]).
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
    }

    /// Create a new store with a custom action broadcast capacity.
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (action_broadcast, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            action_broadcast,
        }
    }

    /// Send an action to the store.
    ///
    /// Acquires the write lock, runs the reducer to completion, then starts
    /// executing the returned effects. Returns once effect execution has
    /// *started*; use the returned [`EffectHandle`] to wait for completion.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
    where
        R: Clone,
        E: Clone,
    {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(StoreError::ShutdownInProgress);
        }

        let (notifier, notify) = watch::channel(());
        let tracking = EffectTracking {
            counter: Arc::new(AtomicUsize::new(0)),
            notifier,
        };
        let handle = EffectHandle {
            counter: Arc::clone(&tracking.counter),
            notify,
        };

        let effects = {
            let mut state = self.state.write().await;
            self.reducer.reduce(&mut state, action, &self.environment)
        };

        tracing::trace!(effects = effects.len(), "reducer completed");

        for effect in effects {
            self.execute_effect(effect, tracking.clone());
        }

        Ok(handle)
    }

    /// Read current state via a closure.
    ///
    /// The closure keeps the read lock only for its own duration:
    ///
    /// ```ignore
    /// let total = store.state(|s| s.todos.len()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&*state)
    }

    /// Subscribe to actions produced by effects.
    ///
    /// Only effect-produced actions are broadcast, not the actions callers
    /// send directly: observers watch the asynchronous half of the loop.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Initiate graceful shutdown: reject new actions, then wait for pending
    /// effects.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// when the timeout expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("initiating graceful shutdown");
        self.shutdown.store(true, Ordering::Release);

        let start = tokio::time::Instant::now();
        let poll_interval = Duration::from_millis(50);

        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);

            if pending == 0 {
                tracing::info!("all effects completed, shutdown successful");
                return Ok(());
            }

            if start.elapsed() >= timeout {
                tracing::error!(pending, "shutdown timed out with effects still running");
                return Err(StoreError::ShutdownTimeout(pending));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Execute a single effect description under the given tracking.
    ///
    /// `Effect::Future` runs on a spawned task; the action it resolves to is
    /// broadcast and then fed back through `send`. A feedback send that fails
    /// (store shutting down) drops the action, which matches the system's
    /// no-cancellation rule: the request ran, only its application is lost.
    fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking)
    where
        R: Clone,
        E: Clone,
    {
        match effect {
            Effect::None => {
                tracing::trace!("no-op effect");
            }
            Effect::Future(fut) => {
                tracking.increment();
                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = PendingGuard(Arc::clone(&self.pending_effects));

                let store = self.clone();

                tokio::spawn(async move {
                    let _guard = DecrementGuard(tracking);
                    let _pending = pending_guard;

                    if let Some(action) = fut.await {
                        tracing::trace!("effect produced an action, feeding back");
                        let _ = store.action_broadcast.send(action.clone());

                        if let Err(error) = store.send(action).await {
                            tracing::debug!(%error, "feedback action dropped");
                        }
                    } else {
                        tracing::trace!("effect completed with no action");
                    }
                });
            }
        }
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}
