//! End-to-end tests: mock upstream origin → proxy → rewritten response.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use tm_proxy::config::ProxyConfig;
use tm_proxy::http::HttpServer;

mod common;

fn page(origin: &str) -> String {
    format!(
        r##"<html><head>
<title>profit page</title>
<link rel="stylesheet" href="/css/main.css">
<style>@font-face {{ font-family: s; src: url('/fonts/stem.woff?v=1'); }}</style>
</head>
<body>
<a href="{origin}/hub/rust/">the profit hub</a>
<script>var profit = 0;</script>
<p>pure profit here</p>
</body></html>"##
    )
}

async fn start_proxy(proxy_addr: SocketAddr, config: ProxyConfig) {
    let listener = TcpListener::bind(proxy_addr).await.unwrap();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn proxy_rewrites_page_and_localizes_fonts() {
    let origin_addr: SocketAddr = "127.0.0.1:28411".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28412".parse().unwrap();
    let origin = format!("http://{}", origin_addr);

    let font_hits = Arc::new(AtomicU32::new(0));
    let hits = font_hits.clone();
    let html = page(&origin);
    common::start_mock_origin(origin_addr, move |path: String| {
        let hits = hits.clone();
        let html = html.clone();
        async move {
            match path.as_str() {
                "/" => (200, "text/html; charset=utf-8", html.into_bytes()),
                "/fonts/stem.woff" => {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (200, "font/woff", b"FONTBYTES".to_vec())
                }
                _ => (404, "text/plain", b"not found".to_vec()),
            }
        }
    })
    .await;

    let asset_root = tempfile::tempdir().unwrap();
    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.upstream.origin = origin.clone();
    config.assets.root = asset_root.path().to_path_buf();
    start_proxy(proxy_addr, config).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/", proxy_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let body = response.text().await.unwrap();

    assert!(body.starts_with("<!DOCTYPE html>"));

    // Annotation in title and body text, never in script code.
    assert!(body.contains("profit™ page"));
    assert!(body.contains("pure profit™ here"));
    assert!(body.contains("the profit™ hub"));
    assert!(body.contains("var profit = 0;"));

    // Origin anchors are proxy-relative; head stylesheet link is absolute.
    assert!(body.contains(r#"href="/hub/rust/""#));
    assert!(!body.contains(&format!(r#"<a href="{}"#, origin)));
    assert!(body.contains(&format!(r#"href="{}/css/main.css""#, origin)));

    // Style text still points at the origin path; only the mirror changed.
    assert!(body.contains("/fonts/stem.woff?v=1"));
    let font_path = asset_root.path().join("fonts/stem.woff");
    let bytes = tokio::fs::read(&font_path).await.unwrap();
    assert_eq!(bytes, b"FONTBYTES");
    assert_eq!(font_hits.load(Ordering::SeqCst), 1);

    // Second request reuses the mirrored font; no re-download, same markup.
    let body2 = client
        .get(format!("http://{}/", proxy_addr))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(font_hits.load(Ordering::SeqCst), 1);
    assert_eq!(body, body2);
}

#[tokio::test]
async fn blank_upstream_body_short_circuits_to_empty_response() {
    let origin_addr: SocketAddr = "127.0.0.1:28421".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28422".parse().unwrap();

    common::start_mock_origin(origin_addr, |_path: String| async {
        (200, "text/html", b"   \n  ".to_vec())
    })
    .await;

    let asset_root = tempfile::tempdir().unwrap();
    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.upstream.origin = format!("http://{}", origin_addr);
    config.assets.root = asset_root.path().to_path_buf();
    start_proxy(proxy_addr, config).await;

    let response = reqwest::get(format!("http://{}/", proxy_addr))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    // Nothing listens at the origin address; the page fetch fails.
    let proxy_addr: SocketAddr = "127.0.0.1:28432".parse().unwrap();

    let asset_root = tempfile::tempdir().unwrap();
    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.upstream.origin = "http://127.0.0.1:28431".to_string();
    config.assets.root = asset_root.path().to_path_buf();
    start_proxy(proxy_addr, config).await;

    let response = reqwest::get(format!("http://{}/some/page", proxy_addr))
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn path_and_query_are_forwarded_verbatim() {
    let origin_addr: SocketAddr = "127.0.0.1:28441".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28442".parse().unwrap();

    common::start_mock_origin(origin_addr, |path: String| async move {
        if path == "/hub/rust/?page=2" {
            (
                200,
                "text/html",
                b"<html><head></head><body><p>profit</p></body></html>".to_vec(),
            )
        } else {
            (404, "text/plain", b"wrong path".to_vec())
        }
    })
    .await;

    let asset_root = tempfile::tempdir().unwrap();
    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.upstream.origin = format!("http://{}", origin_addr);
    config.assets.root = asset_root.path().to_path_buf();
    start_proxy(proxy_addr, config).await;

    let response = reqwest::get(format!("http://{}/hub/rust/?page=2", proxy_addr))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("profit™"));
}
