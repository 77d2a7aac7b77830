#![allow(clippy::unwrap_used)]
// Integration tests for the `DataLayer` binding surface.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck_core::{
    CollectionKind, CoreConfig, DataLayer, FetchState, FileBackend, FilterMode, MemoryBackend,
    PageSummary, RemoteItems,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn users(n: u64) -> Value {
    let items: Vec<Value> = (1..=n)
        .map(|id| {
            let name = if id == 1 {
                "Leanne Graham".to_owned()
            } else {
                format!("User {id}")
            };
            json!({
                "id": id,
                "name": name,
                "username": format!("user{id}"),
                "email": format!("user{id}@example.com")
            })
        })
        .collect();
    Value::Array(items)
}

fn posts(n: u64) -> Value {
    let items: Vec<Value> = (1..=n)
        .map(|id| json!({ "userId": 1, "id": id, "title": format!("Post {id}"), "body": "body" }))
        .collect();
    Value::Array(items)
}

async fn serve(server: &MockServer, resource: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{resource}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn layer_for(server: &MockServer) -> DataLayer {
    let config = CoreConfig {
        base_url: server.uri(),
        page_size: NonZeroUsize::new(6).unwrap(),
        ..CoreConfig::default()
    };
    DataLayer::init(config, Arc::new(MemoryBackend::new())).unwrap()
}

fn visible_user_ids(layer: &DataLayer) -> Vec<u64> {
    match layer.visible_items() {
        RemoteItems::Users(users) => users.iter().map(|u| u.id).collect(),
        RemoteItems::Posts(_) => panic!("expected users"),
    }
}

// ── Lifecycle ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_init_does_not_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let layer = layer_for(&server);
    assert_eq!(layer.active_kind(), CollectionKind::Users);
    assert_eq!(*layer.fetch_state(CollectionKind::Users), FetchState::Idle);
    assert_eq!(layer.visible_items(), RemoteItems::empty(CollectionKind::Users));
    assert_eq!(layer.total_pages(), 0);
    layer.dispose().await;
}

#[tokio::test]
async fn test_dispose_waits_for_in_flight_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(posts(2))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut layer = layer_for(&server);
    let sub = layer.subscribe_fetch_state(CollectionKind::Posts);
    layer.set_active_kind(CollectionKind::Posts);
    assert!(sub.latest().is_loading());

    layer.dispose().await;

    assert_eq!(sub.latest().items().map(RemoteItems::len), Some(2));
}

// ── Remote views ────────────────────────────────────────────────────

#[tokio::test]
async fn test_pages_through_active_collection() {
    let server = MockServer::start().await;
    serve(&server, "users", users(14)).await;

    let mut layer = layer_for(&server);
    layer.set_active_kind(CollectionKind::Users);
    layer.settle().await;

    assert_eq!(visible_user_ids(&layer), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(layer.total_pages(), 3);

    layer.set_page(3);
    assert_eq!(visible_user_ids(&layer), vec![13, 14]);
    assert_eq!(
        layer.page_summary(),
        PageSummary {
            shown: 2,
            matched: 14,
            page: 3,
            total_pages: 3
        }
    );

    layer.next_page();
    assert_eq!(layer.view().page(), 3, "next_page stops at the last page");

    layer.set_page(4);
    assert!(layer.visible_items().is_empty());

    layer.prev_page();
    assert_eq!(layer.view().page(), 3);

    layer.dispose().await;
}

#[tokio::test]
async fn test_search_term_resets_page() {
    let server = MockServer::start().await;
    serve(&server, "users", users(14)).await;

    let mut layer = layer_for(&server);
    layer.set_active_kind(CollectionKind::Users);
    layer.settle().await;

    layer.set_page(2);
    layer.set_search_term("leanne");
    assert_eq!(layer.view().page(), 1);
    assert_eq!(visible_user_ids(&layer), vec![1]);
    assert_eq!(layer.page_summary().to_string(), "Showing 1 of 1");

    layer.dispose().await;
}

#[tokio::test]
async fn test_switching_kind_refetches_and_resets_view() {
    let server = MockServer::start().await;
    serve(&server, "users", users(3)).await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts(8)))
        .expect(2)
        .mount(&server)
        .await;

    let mut layer = layer_for(&server);
    layer.set_active_kind(CollectionKind::Posts);
    layer.settle().await;

    layer.set_search_term("post");
    layer.set_page(2);
    assert_eq!(layer.visible_items().len(), 2);

    layer.set_active_kind(CollectionKind::Users);
    assert_eq!((layer.view().term(), layer.view().page()), ("", 1));
    layer.settle().await;
    assert_eq!(visible_user_ids(&layer), vec![1, 2, 3]);

    // Re-selecting an already loaded kind still fetches again.
    layer.set_active_kind(CollectionKind::Posts);
    layer.settle().await;
    assert_eq!(layer.active_kind(), CollectionKind::Posts);
    assert_eq!(layer.visible_items().kind(), CollectionKind::Posts);

    layer.dispose().await;
}

#[tokio::test]
async fn test_retry_refetches_active_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    serve(&server, "users", users(2)).await;

    let mut layer = layer_for(&server);
    layer.set_active_kind(CollectionKind::Users);
    layer.settle().await;
    assert!(layer.fetch_state(CollectionKind::Users).error().is_some());
    assert!(layer.visible_items().is_empty());

    layer.retry();
    layer.settle().await;
    assert_eq!(visible_user_ids(&layer), vec![1, 2]);

    layer.dispose().await;
}

// ── Tasks ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_tasks_persist_across_layers() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = CoreConfig {
        base_url: server.uri(),
        ..CoreConfig::default()
    };

    let mut layer = DataLayer::init(config.clone(), Arc::new(FileBackend::new(dir.path()))).unwrap();
    let milk = layer.add("Buy milk").unwrap().unwrap();
    layer.add("Walk dog").unwrap();
    layer.toggle(milk.id).unwrap();
    layer.dispose().await;

    let mut reopened = DataLayer::init(config, Arc::new(FileBackend::new(dir.path()))).unwrap();
    assert_eq!(reopened.counts().total, 2);
    assert_eq!(reopened.counts().completed, 1);

    reopened.set_filter(FilterMode::Active);
    assert_eq!(reopened.filter(), FilterMode::Active);
    let visible: Vec<String> = reopened.visible_tasks().into_iter().map(|t| t.text).collect();
    assert_eq!(visible, vec!["Walk dog"]);

    let fresh = reopened.add("Call mom").unwrap().unwrap();
    assert!(fresh.id > milk.id);
    reopened.dispose().await;
}

#[tokio::test]
async fn test_task_subscription_sees_mutations() {
    let server = MockServer::start().await;
    let mut layer = layer_for(&server);
    let mut sub = layer.subscribe_tasks();

    let task = layer.add("x").unwrap().unwrap();
    let snapshot = sub.changed().await.unwrap();
    assert_eq!(*snapshot, vec![task.clone()]);

    layer.remove(task.id).unwrap();
    assert!(sub.changed().await.unwrap().is_empty());
    assert!(layer.tasks().is_empty());

    layer.dispose().await;
}
