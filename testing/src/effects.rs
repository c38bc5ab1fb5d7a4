//! Running effect descriptions inside tests.

use todoview_core::effect::{Effect, Effects};

/// Run every effect to completion and collect the actions they produce, in
/// order.
///
/// This is the Store's executor loop at test scale: no spawning and no
/// feedback. The caller decides what to do with the produced actions,
/// usually feeding them through the reducer by hand and asserting on state.
pub async fn drive<A>(effects: Effects<A>) -> Vec<A> {
    let mut actions = Vec::new();
    for effect in effects {
        match effect {
            Effect::None => {}
            Effect::Future(fut) => {
                if let Some(action) = fut.await {
                    actions.push(action);
                }
            }
        }
    }
    actions
}
