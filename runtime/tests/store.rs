//! Integration tests for the Store effect feedback loop.
//!
//! Exercises the action → reducer → effects → action cycle with a stub
//! reducer that mimics the shape of a remote fetch: a command produces a
//! `Future` effect, the effect resolves to a response action, and only the
//! response mutates state.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::time::Duration;
use todoview_core::effect::{Effect, Effects};
use todoview_core::reducer::Reducer;
use todoview_core::smallvec;
use todoview_runtime::{Store, StoreError};

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Command: fetch items "remotely"
    Load,
    /// Response: items arrived
    Loaded { items: Vec<String> },
    /// Command: synchronous bump, no effects
    Bump,
    /// Command: effect that never finishes within test timeouts
    Hang,
}

#[derive(Debug, Clone, Default)]
struct TestState {
    items: Vec<String>,
    bumps: u32,
}

#[derive(Clone)]
struct TestEnvironment {
    payload: Vec<String>,
}

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = TestEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            TestAction::Load => {
                let items = env.payload.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    // Simulate network latency
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Some(TestAction::Loaded { items })
                }))]
            }
            TestAction::Loaded { items } => {
                state.items = items;
                smallvec![Effect::None]
            }
            TestAction::Bump => {
                state.bumps += 1;
                smallvec![Effect::None]
            }
            TestAction::Hang => {
                smallvec![Effect::Future(Box::pin(async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    None
                }))]
            }
        }
    }
}

fn test_store(payload: Vec<String>) -> Store<TestState, TestAction, TestEnvironment, TestReducer> {
    Store::new(
        TestState::default(),
        TestReducer,
        TestEnvironment { payload },
    )
}

#[tokio::test]
async fn synchronous_action_applies_before_send_returns() {
    let store = test_store(vec![]);

    let handle = store.send(TestAction::Bump).await.unwrap();
    assert!(handle.is_settled());

    let bumps = store.state(|s| s.bumps).await;
    assert_eq!(bumps, 1);
}

#[tokio::test]
async fn future_effect_feeds_response_back_into_state() {
    let store = test_store(vec!["a".into(), "b".into()]);

    let mut handle = store.send(TestAction::Load).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();

    let items = store.state(|s| s.items.clone()).await;
    assert_eq!(items, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn effect_actions_are_broadcast_to_observers() {
    let store = test_store(vec!["x".into()]);
    let mut actions = store.subscribe_actions();

    store.send(TestAction::Load).await.unwrap();

    let observed = tokio::time::timeout(Duration::from_secs(5), actions.recv())
        .await
        .expect("timed out waiting for broadcast")
        .unwrap();
    assert_eq!(
        observed,
        TestAction::Loaded {
            items: vec!["x".to_string()]
        }
    );
}

#[tokio::test]
async fn directly_sent_actions_are_not_broadcast() {
    let store = test_store(vec![]);
    let mut actions = store.subscribe_actions();

    let handle = store.send(TestAction::Bump).await.unwrap();
    assert!(handle.is_settled());

    // Nothing asynchronous happened, so the channel stays empty.
    assert!(matches!(
        actions.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn other_actions_stay_responsive_while_an_effect_is_in_flight() {
    let store = test_store(vec!["slow".into()]);

    let mut load_handle = store.send(TestAction::Load).await.unwrap();

    // The outstanding fetch must not block an unrelated synchronous action.
    let bump_handle = store.send(TestAction::Bump).await.unwrap();
    assert!(bump_handle.is_settled());
    assert_eq!(store.state(|s| s.bumps).await, 1);

    load_handle
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(store.state(|s| s.items.len()).await, 1);
}

#[tokio::test]
async fn shutdown_rejects_new_actions() {
    let store = test_store(vec![]);

    store.shutdown(Duration::from_secs(1)).await.unwrap();

    let result = store.send(TestAction::Bump).await;
    assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
}

#[tokio::test]
async fn shutdown_times_out_on_hung_effect() {
    let store = test_store(vec![]);

    store.send(TestAction::Hang).await.unwrap();

    let result = store.shutdown(Duration::from_millis(100)).await;
    assert!(matches!(result, Err(StoreError::ShutdownTimeout(1))));
}

#[tokio::test]
async fn wait_times_out_on_hung_effect() {
    let store = test_store(vec![]);

    let mut handle = store.send(TestAction::Hang).await.unwrap();
    let result = handle.wait_with_timeout(Duration::from_millis(50)).await;

    assert!(matches!(result, Err(StoreError::Timeout)));
    assert!(!handle.is_settled());
}
