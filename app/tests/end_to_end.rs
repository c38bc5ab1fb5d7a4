//! End-to-end tests: full Store + reducer + HTTP client against a mock
//! server, driving the same loop the console shell runs.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use serde_json::json;
use std::time::Duration;
use todoview_api::TodoId;
use todoview_app::{DraftField, Filter, HttpTodoApi, TodoAction, TodoReducer, TodoState};
use todoview_runtime::Store;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TodoStore = Store<TodoState, TodoAction, HttpTodoApi, TodoReducer<HttpTodoApi>>;

fn store_against(server: &MockServer) -> TodoStore {
    Store::new(
        TodoState::new(),
        TodoReducer::new(),
        HttpTodoApi::new(server.uri()),
    )
}

/// Send an action and wait for its round-trip to settle.
async fn dispatch(store: &TodoStore, action: TodoAction) {
    let mut handle = store.send(action).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();
}

#[tokio::test]
async fn load_then_add_appends_the_created_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/todos"))
        .and(body_json(json!({"title": "Buy milk", "description": ""})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1, "title": "Buy milk", "description": "", "completed": false,
        })))
        .mount(&server)
        .await;

    let store = store_against(&server);

    dispatch(&store, TodoAction::LoadAll).await;
    assert!(store.state(|s| s.todos.is_empty()).await);

    dispatch(
        &store,
        TodoAction::AddNew {
            title: "Buy milk".to_string(),
            description: String::new(),
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.todos.len(), 1);
    assert_eq!(state.todos[0].id, TodoId::Number(1));
    assert_eq!(state.todos[0].title, "Buy milk");

    let stats = state.stats();
    assert_eq!((stats.total, stats.active, stats.completed), (1, 1, 0));
}

#[tokio::test]
async fn toggle_round_trip_updates_the_record_and_the_active_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Buy milk", "description": null, "completed": false},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/todos/1/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "title": "Buy milk", "description": null, "completed": true,
        })))
        .mount(&server)
        .await;

    let store = store_against(&server);
    dispatch(&store, TodoAction::LoadAll).await;

    dispatch(
        &store,
        TodoAction::Toggle {
            id: TodoId::Number(1),
        },
    )
    .await;
    dispatch(
        &store,
        TodoAction::SetFilter {
            filter: Filter::Active,
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    assert!(state.todos[0].completed);
    assert!(state.visible().is_empty());
}

#[tokio::test]
async fn delete_removes_by_id_regardless_of_position() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "a", "completed": false},
            {"id": 2, "title": "b", "completed": false},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/todos/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let store = store_against(&server);
    dispatch(&store, TodoAction::LoadAll).await;

    dispatch(
        &store,
        TodoAction::Delete {
            id: TodoId::Number(1),
        },
    )
    .await;

    let ids = store
        .state(|s| s.todos.iter().map(|t| t.id.clone()).collect::<Vec<_>>())
        .await;
    assert_eq!(ids, vec![TodoId::Number(2)]);
}

#[tokio::test]
async fn edit_commit_round_trip_replaces_the_record_and_closes_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Buy milk", "description": null, "completed": false},
        ])))
        .mount(&server)
        .await;
    // The merged body: draft fields over the local record, flag untouched.
    Mock::given(method("PUT"))
        .and(path("/todos/1"))
        .and(body_json(json!({
            "id": 1, "title": "Buy oat milk", "description": "", "completed": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "title": "Buy oat milk", "description": "", "completed": false,
        })))
        .mount(&server)
        .await;

    let store = store_against(&server);
    dispatch(&store, TodoAction::LoadAll).await;

    dispatch(
        &store,
        TodoAction::BeginEdit {
            id: TodoId::Number(1),
        },
    )
    .await;
    dispatch(
        &store,
        TodoAction::UpdateDraft {
            field: DraftField::Title,
            value: "Buy oat milk".to_string(),
        },
    )
    .await;
    dispatch(&store, TodoAction::CommitEdit).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.todos[0].title, "Buy oat milk");
    assert_eq!(state.edit, None);
}

#[tokio::test]
async fn failed_create_leaves_the_view_intact_and_the_session_alive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Buy milk", "completed": false},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let store = store_against(&server);
    dispatch(&store, TodoAction::LoadAll).await;
    dispatch(
        &store,
        TodoAction::BeginEdit {
            id: TodoId::Number(1),
        },
    )
    .await;

    // The create fails server-side; the failure is logged and swallowed.
    dispatch(
        &store,
        TodoAction::AddNew {
            title: "doomed".to_string(),
            description: String::new(),
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.todos.len(), 1);
    assert!(state.edit.is_some());

    // A failure never blocks subsequent actions.
    dispatch(
        &store,
        TodoAction::SetFilter {
            filter: Filter::Completed,
        },
    )
    .await;
    assert_eq!(store.state(|s| s.filter).await, Filter::Completed);
}
