//! Paging tests against a mocked OTX API.
//!
//! Covers the link-following subscription walk and the count-bounded
//! search walk, including the streaming variant.

use otxapi::{
    get_subscribed_pulses, search_all_pulses, search_all_pulses_stream, ClientConfig, List,
    ListOptions, OtxClient, OtxError, Pulse, Search, SearchPulse,
};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = "/api/v1/pulses/subscribed";
const SEARCH: &str = "/api/v1/search/pulses";

fn client_for(server: &MockServer) -> OtxClient {
    OtxClient::new(ClientConfig::new("test-key").with_base_url(server.uri())).unwrap()
}

fn pulses(ids: &[&str]) -> serde_json::Value {
    ids.iter()
        .map(|id| serde_json::json!({"id": id, "name": format!("Pulse {id}")}))
        .collect()
}

fn search_hits(page: u32, per_page: u32) -> serde_json::Value {
    (0..per_page)
        .map(|n| serde_json::json!({"id": format!("p{page}-{n}")}))
        .collect()
}

async fn mount_feed_page(server: &MockServer, page: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(FEED))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_search_page(server: &MockServer, page: u32, per_page: u32, count: u64) {
    Mock::given(method("GET"))
        .and(path(SEARCH))
        .and(query_param("q", "emotet"))
        .and(query_param("page", page.to_string()))
        .and(query_param("limit", per_page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": count,
            "results": search_hits(page, per_page),
            "exact_match": ""
        })))
        .expect(1)
        .mount(server)
        .await;
}

// =============================================================================
// Link-following listing
// =============================================================================

#[tokio::test]
async fn test_list_all_follows_next_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_feed_page(
        &server,
        "1",
        serde_json::json!({
            "results": pulses(&["a", "b"]),
            "next": format!("{base}{FEED}?limit=2&page=2"),
            "previous": null,
            "count": 5
        }),
    )
    .await;
    mount_feed_page(
        &server,
        "2",
        serde_json::json!({
            "results": pulses(&["c", "d"]),
            "next": format!("{base}{FEED}?limit=2&page=3"),
            "previous": format!("{base}{FEED}?limit=2"),
            "count": 5
        }),
    )
    .await;
    mount_feed_page(
        &server,
        "3",
        serde_json::json!({
            "results": pulses(&["e"]),
            "next": null,
            "previous": format!("{base}{FEED}?limit=2&page=2"),
            "count": 5
        }),
    )
    .await;

    let client = client_for(&server);
    let all = Pulse::list_all(&client, &ListOptions::for_page(1, 2))
        .await
        .unwrap();

    let ids: Vec<&str> = all.iter().filter_map(|p| p.id.as_deref()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_list_all_keeps_pulses_without_id() {
    let server = MockServer::start().await;

    mount_feed_page(
        &server,
        "1",
        serde_json::json!({
            "results": [{"id": "a"}, {"name": "anonymous"}, {"id": null}],
            "next": null
        }),
    )
    .await;

    let client = client_for(&server);
    let all = assert_ok!(Pulse::list_all(&client, &ListOptions::default()).await);

    assert_eq!(all.len(), 3);
    assert_eq!(all[1].name.as_deref(), Some("anonymous"));
    assert!(all[1].id.is_none());
    assert!(all[2].id.is_none());
}

#[tokio::test]
async fn test_list_all_single_page() {
    let server = MockServer::start().await;

    mount_feed_page(
        &server,
        "1",
        serde_json::json!({"results": pulses(&["only"]), "next": null, "count": 1}),
    )
    .await;

    let client = client_for(&server);
    let all = assert_ok!(get_subscribed_pulses(&client).await);
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_list_page_sends_bounded_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FEED))
        .and(query_param("page", "2"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = Pulse::list_page(&client, &ListOptions::for_page(2, 500).with_query("ignored"))
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_list_all_stops_on_page_error() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_feed_page(
        &server,
        "1",
        serde_json::json!({
            "results": pulses(&["a"]),
            "next": format!("{base}{FEED}?limit=1&page=2")
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(FEED))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({"detail": "Invalid API key."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(Pulse::list_all(&client, &ListOptions::for_page(1, 1)).await);

    assert_eq!(err.status_code(), Some(403));
    assert!(!err.is_no_page());
}

#[tokio::test]
async fn test_list_all_rejects_malformed_next_link() {
    let server = MockServer::start().await;

    mount_feed_page(
        &server,
        "1",
        serde_json::json!({
            "results": pulses(&["a"]),
            "next": format!("{}{FEED}?page=two", server.uri())
        }),
    )
    .await;

    let client = client_for(&server);
    let err = Pulse::list_all(&client, &ListOptions::for_page(1, 1))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OtxError::InvalidPageParam { param: "page", .. }
    ));
}

// =============================================================================
// Count-bounded search
// =============================================================================

#[tokio::test]
async fn test_search_all_fetches_counted_pages() {
    let server = MockServer::start().await;
    for page in 1..=3 {
        mount_search_page(&server, page, 5, 15).await;
    }

    let client = client_for(&server);
    let hits = search_all_pulses(&client, &ListOptions::search("emotet"))
        .await
        .unwrap();

    assert_eq!(hits.len(), 15);
    assert_eq!(hits[0].id.as_deref(), Some("p1-0"));
    assert_eq!(hits[14].id.as_deref(), Some("p3-4"));
}

#[tokio::test]
async fn test_search_all_drops_partial_last_page() {
    let server = MockServer::start().await;
    // floor(12 / 5) = 2: the third, partial page is never requested.
    mount_search_page(&server, 1, 5, 12).await;
    mount_search_page(&server, 2, 5, 12).await;

    let client = client_for(&server);
    let hits = SearchPulse::search_all(&client, &ListOptions::search("emotet"))
        .await
        .unwrap();

    assert_eq!(hits.len(), 10);
}

#[tokio::test]
async fn test_search_all_zero_count_is_one_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 0,
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let hits = search_all_pulses(&client, &ListOptions::search("nothing"))
        .await
        .unwrap();

    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_search_all_respects_per_page() {
    let server = MockServer::start().await;
    mount_search_page(&server, 1, 10, 20).await;
    mount_search_page(&server, 2, 10, 20).await;

    let client = client_for(&server);
    let hits = search_all_pulses(&client, &ListOptions::search("emotet").with_per_page(10))
        .await
        .unwrap();

    assert_eq!(hits.len(), 20);
}

// =============================================================================
// Streaming search
// =============================================================================

#[tokio::test]
async fn test_stream_delivers_items_in_page_order() {
    let server = MockServer::start().await;
    for page in 1..=3 {
        mount_search_page(&server, page, 5, 15).await;
    }

    let client = client_for(&server);
    // Capacity below the result count forces the producer to wait on the consumer.
    let mut stream = search_all_pulses_stream(&client, &ListOptions::search("emotet"), 2);

    let mut ids = Vec::new();
    while let Some(item) = stream.recv().await {
        ids.push(item.unwrap().id.unwrap());
    }

    assert_eq!(ids.len(), 15);
    assert_eq!(ids.first().map(String::as_str), Some("p1-0"));
    assert_eq!(ids.last().map(String::as_str), Some("p3-4"));
}

#[tokio::test]
async fn test_stream_forwards_error_then_closes() {
    let server = MockServer::start().await;
    mount_search_page(&server, 1, 5, 10).await;
    Mock::given(method("GET"))
        .and(path(SEARCH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut stream = search_all_pulses_stream(&client, &ListOptions::search("emotet"), 10);

    let mut ok = 0;
    let mut errors = Vec::new();
    while let Some(item) = stream.recv().await {
        match item {
            Ok(_) => ok += 1,
            Err(e) => errors.push(e),
        }
    }

    assert_eq!(ok, 5);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].status_code(), Some(500));
}

#[tokio::test]
async fn test_stream_collect_returns_first_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({"detail": "Invalid API key."})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let stream = search_all_pulses_stream(&client, &ListOptions::search("emotet"), 4);

    let err = stream.collect().await.unwrap_err();
    assert!(err.is_api_error());
}

#[tokio::test]
async fn test_stream_producer_finishes_after_drain() {
    let server = MockServer::start().await;
    mount_search_page(&server, 1, 5, 5).await;

    let client = client_for(&server);
    let stream =
        SearchPulse::search_all_stream(client, ListOptions::search("emotet"), 1);
    let (mut receiver, handle) = stream.into_parts();

    let mut count = 0;
    while let Some(item) = receiver.recv().await {
        assert_ok!(item);
        count += 1;
    }

    assert_eq!(count, 5);
    assert_ok!(handle.await);
}
