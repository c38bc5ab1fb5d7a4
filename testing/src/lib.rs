//! # Todoview Testing
//!
//! Testing utilities for reducers and effects.
//!
//! Two tools cover most reducer tests:
//!
//! - [`ReducerTest`]: a Given/When/Then builder for a single transition
//! - [`drive`]: runs a reducer's effect descriptions to completion and
//!   collects the actions they produce, so a command → response pipeline can
//!   be tested without standing up a Store
//!
//! ## Example
//!
//! ```ignore
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(recording_api())
//!     .given_state(TodoState::default())
//!     .when_action(TodoAction::SetFilter { filter: Filter::Active })
//!     .then_state(|state| assert_eq!(state.filter, Filter::Active))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

pub mod effects;

// Re-export commonly used items
pub use effects::drive;
pub use reducer_test::{ReducerTest, assertions};
