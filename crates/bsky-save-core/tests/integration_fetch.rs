//! Integration test: the curl transport against a local server.

mod common;

use bsky_save_core::fetch::{CurlTransport, FetchError, Fetcher};

#[tokio::test]
async fn image_bytes_and_headers() {
    let body: Vec<u8> = (0u8..=255).cycle().take(10_000).collect();
    let base = common::image_server::start(body.clone());
    let fetcher = Fetcher::new(CurlTransport::default());

    let resp = fetcher
        .get(&format!("{}/img/feed_fullsize/plain/did/a@jpeg", base))
        .await
        .expect("fetch");
    assert!(resp.ok());
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.status_text(), "OK");
    assert_eq!(resp.headers().get("CONTENT-TYPE"), Some("image/jpeg"));
    assert_eq!(
        resp.headers().get("last-modified"),
        Some("Fri, 21 May 2021 14:46:56 GMT")
    );
    assert_eq!(resp.headers().content_length(), Some(10_000));
    assert_eq!(&*resp.bytes().await.unwrap(), body.as_slice());
    assert_eq!(resp.bytes().await.unwrap().len(), 10_000);
}

#[tokio::test]
async fn not_found_is_not_ok_but_has_body() {
    let base = common::image_server::start(Vec::new());
    let fetcher = Fetcher::new(CurlTransport::default());
    let resp = fetcher.get(&format!("{}/nope", base)).await.unwrap();
    assert!(!resp.ok());
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "missing");
}

#[tokio::test]
async fn json_accessor() {
    let base = common::image_server::start(Vec::new());
    let fetcher = Fetcher::new(CurlTransport::default());

    let resp = fetcher.get(&format!("{}/json", base)).await.unwrap();
    let v: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(v["ok"], true);

    let resp = fetcher.get(&format!("{}/not-json", base)).await.unwrap();
    assert!(matches!(resp.json::<serde_json::Value>().await, Err(FetchError::Json(_))));
}

#[tokio::test]
async fn redirects_report_final_response() {
    let base = common::image_server::start(Vec::new());
    let fetcher = Fetcher::new(CurlTransport::default());
    let resp = fetcher.get(&format!("{}/redirect", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().content_type(), Some("application/json"));
    assert_eq!(resp.text().await.unwrap(), r#"{"ok":true}"#);
}

#[tokio::test]
async fn dropped_connection_rejects() {
    let base = common::image_server::start(Vec::new());
    let fetcher = Fetcher::new(CurlTransport::default());
    let err = fetcher.get(&format!("{}/drop", base)).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
