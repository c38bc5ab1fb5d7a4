//! # Todoview Core
//!
//! Core abstractions for the todoview architecture.
//!
//! The whole system is built around one idea: business rules live in a pure
//! transition function, and everything that touches the outside world is a
//! value describing what should happen, executed elsewhere.
//!
//! ## Core Concepts
//!
//! - **State**: the local snapshot a feature owns
//! - **Action**: every possible input, user intents and asynchronous results alike
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: a description of a side effect, never its execution
//! - **Environment**: injected dependencies behind traits
//!
//! Reducers mutate the snapshot in place while holding exclusive access and
//! return effect descriptions; the runtime crate's `Store` executes those
//! descriptions and feeds any resulting actions back through the reducer.
//!
//! ## Example
//!
//! ```
//! use todoview_core::effect::{Effect, Effects};
//! use todoview_core::reducer::Reducer;
//! use todoview_core::smallvec;
//!
//! #[derive(Default)]
//! struct Tally { count: u32 }
//!
//! #[derive(Clone, Debug)]
//! enum TallyAction { Bump }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = Tally;
//!     type Action = TallyAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Tally,
//!         action: TallyAction,
//!         _env: &(),
//!     ) -> Effects<TallyAction> {
//!         match action {
//!             TallyAction::Bump => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-exported so downstream reducers can build effect vectors without
// depending on smallvec directly.
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the core trait for business logic.
pub mod reducer {
    use super::effect::Effects;

    /// The Reducer trait - the single place business rules are allowed to live.
    ///
    /// A reducer is deterministic: given the same state, action, and
    /// environment it always produces the same state mutation and the same
    /// effect descriptions. It must not perform I/O itself: network calls
    /// and the like are reached only through effect values built via the
    /// environment.
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodoReducer {
    ///     type State = TodoState;
    ///     type Action = TodoAction;
    ///     type Environment = HttpTodoApi;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut TodoState,
    ///         action: TodoAction,
    ///         env: &HttpTodoApi,
    ///     ) -> Effects<TodoAction> {
    ///         match action {
    ///             TodoAction::LoadAll => smallvec![env.fetch_all()],
    ///             ..
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effect descriptions.
        ///
        /// The caller guarantees exclusive access to `state` for the duration
        /// of the call, so the mutation always runs to completion before the
        /// next action is considered.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Effects<Self::Action>;
    }
}

/// Effect module - side effect descriptions.
pub mod effect {
    use smallvec::SmallVec;
    use std::future::Future;
    use std::pin::Pin;

    /// Effect vector returned by reducers.
    ///
    /// Four inline slots covers every reducer in practice without touching
    /// the heap; larger vectors spill transparently.
    pub type Effects<Action> = SmallVec<[Effect<Action>; 4]>;

    /// A description of a side effect to be executed by the runtime.
    ///
    /// Effects are values. Returning one from a reducer does nothing until
    /// the Store spawns it; dropping one unexecuted is legal (tests do this
    /// constantly to assert *which* effects a reducer produced).
    ///
    /// # Type Parameters
    ///
    /// - `Action`: the action type an effect may feed back into the reducer
    pub enum Effect<Action> {
        /// No side effect.
        None,

        /// Arbitrary async computation, typically a network round-trip.
        ///
        /// Resolves to `Some(action)` to feed a result back into the
        /// reducer, or `None` when there is nothing further to apply.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug since the boxed future has nothing useful to show.
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::None => write!(f, "Effect::None"),
                Self::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns `true` for `Effect::None`.
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Self::None)
        }
    }
}
