//! End-to-end tests of `EventWebService` against a local mock server.
//!
//! The blocking client must not run on the async runtime, so each request
//! goes through `spawn_blocking`.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use event_ws::{EventQuery, EventRecord, EventWebService, EventWsError, EventWsResult, Url};

const BODY: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "id": "us7000abcd",
            "properties": { "net": "us", "code": "7000abcd", "mag": 6.8, "place": "Offshore" },
            "geometry": { "type": "Point", "coordinates": [142.1, 38.3, 29.0] }
        },
        {
            "type": "Feature",
            "id": "ak0201",
            "properties": { "net": "ak", "code": "0201", "mag": 6.6 },
            "geometry": { "type": "Point", "coordinates": [-151.0, 60.2, 110.5] }
        }
    ]
}"#;

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn big_quakes() -> EventQuery {
    EventQuery {
        min_magnitude: Some(6.5),
        ..Default::default()
    }
}

/// Run `events` for `query` against `base` on the blocking pool.
async fn fetch(base: String, query: EventQuery) -> EventWsResult<Vec<EventRecord>> {
    tokio::task::spawn_blocking(move || -> EventWsResult<Vec<EventRecord>> {
        let service = EventWebService::new(Url::parse(&base)?)?;
        service.events(&query)
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test]
async fn test_gzip_response_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fdsnws/event/1/query"))
        .and(query_param("format", "geojson"))
        .and(query_param("minmagnitude", "6.5"))
        .and(header("accept-encoding", "gzip"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "GZIP")
                .set_body_bytes(gzip(BODY.as_bytes())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/fdsnws/event/1/", server.uri());
    let events = fetch(base, big_quakes()).await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id().unwrap().to_string(), "us7000abcd");
    assert_eq!(events[0].place(), Some("Offshore"));
    assert_eq!(events[1].id().unwrap().network(), "ak");
    assert_eq!(events[1].depth(), Some(110.5));
}

#[tokio::test]
async fn test_plain_response_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fdsnws/event/1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
        .mount(&server)
        .await;

    // No trailing slash: `query` is still appended as a child segment.
    let base = format!("{}/fdsnws/event/1", server.uri());
    let events = fetch(base, EventQuery::new()).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].magnitude(), Some(6.6));
}

#[tokio::test]
async fn test_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .mount(&server)
        .await;

    let base = format!("{}/fdsnws/event/1/", server.uri());
    let err = fetch(base, big_quakes()).await.unwrap_err();
    assert!(matches!(err, EventWsError::HttpStatus { status: 400, .. }));
    assert!(err.is_transport_error());
}

#[tokio::test]
async fn test_unexpected_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"type": "Feature"}"#))
        .mount(&server)
        .await;

    let base = format!("{}/fdsnws/event/1/", server.uri());
    let err = fetch(base, big_quakes()).await.unwrap_err();
    assert!(matches!(err, EventWsError::MissingFeatures));
}

#[test]
fn test_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base = Url::parse(&format!("http://127.0.0.1:{port}/fdsnws/event/1/")).unwrap();
    let service = EventWebService::new(base).unwrap();
    let err = service.events(&big_quakes()).unwrap_err();
    assert!(matches!(err, EventWsError::Transport(_)), "got {err:?}");
}
