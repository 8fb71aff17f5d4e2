//! End-to-end resolution behavior of the gateway.

mod common;

use std::sync::Arc;

use offline_origin::store::MemoryStore;

#[tokio::test]
async fn deep_key_wins_over_its_suffix_twin() {
    let upstream = common::start_upstream("200 OK", &[], "upstream").await;
    let store = Arc::new(MemoryStore::from_entries([
        ("_framework/dotnet.wasm", "deep"),
        ("dotnet.wasm", "shallow"),
    ]));
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(upstream), store).await;

    let res = common::client()
        .get(format!("http://{addr}/game/_framework/dotnet.wasm"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/wasm");
    assert_eq!(res.text().await.unwrap(), "deep");

    let res = common::client()
        .get(format!("http://{addr}/dotnet.wasm"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "shallow");

    shutdown.trigger();
}

#[tokio::test]
async fn stored_asset_gets_cache_and_isolation_headers() {
    let upstream = common::start_upstream("200 OK", &[], "upstream").await;
    let store = Arc::new(MemoryStore::from_entries([("app.js", "console.log(1)")]));
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(upstream), store).await;

    let res = common::client()
        .get(format!("http://{addr}/app.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/javascript");
    assert_eq!(res.headers()["cache-control"], "public, max-age=3600");
    assert_eq!(res.headers()["cross-origin-embedder-policy"], "require-corp");
    assert_eq!(res.headers()["cross-origin-opener-policy"], "same-origin");

    shutdown.trigger();
}

#[tokio::test]
async fn bootstrap_artifact_never_comes_from_the_store() {
    let upstream = common::start_upstream("200 OK", &[], "upstream").await;
    // Even a stored copy of the bootstrap artifact must be ignored.
    let store = Arc::new(MemoryStore::from_entries([("sw.js", "stored")]));
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(upstream), store).await;

    let res = common::client()
        .get(format!("http://{addr}/sw.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "upstream");

    shutdown.trigger();
}

#[tokio::test]
async fn host_page_is_not_served_from_the_store() {
    let upstream = common::start_upstream("200 OK", &[], "upstream").await;
    let store = Arc::new(MemoryStore::from_entries([("index.html", "stored launcher")]));
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(upstream), store).await;

    let res = common::client()
        .get(format!("http://{addr}/index.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "upstream");

    shutdown.trigger();
}

#[tokio::test]
async fn virtual_root_serves_the_entry_document() {
    let upstream = common::start_upstream("200 OK", &[], "upstream").await;
    let store = Arc::new(MemoryStore::from_entries([("index.html", "<html>entry</html>")]));
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(upstream), store).await;

    let res = common::client()
        .get(format!("http://{addr}/virtual-app.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "text/html");
    assert_eq!(
        res.headers()["cache-control"],
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(res.headers()["cross-origin-embedder-policy"], "require-corp");
    assert_eq!(res.text().await.unwrap(), "<html>entry</html>");

    shutdown.trigger();
}

#[tokio::test]
async fn virtual_root_prefers_the_wellknown_entry_key() {
    let upstream = common::start_upstream("200 OK", &[], "upstream").await;
    let store = Arc::new(MemoryStore::from_entries([
        ("index.html", "legacy"),
        ("app.html", "wellknown"),
    ]));
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(upstream), store).await;

    let res = common::client()
        .get(format!("http://{addr}/virtual-app.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "wellknown");

    shutdown.trigger();
}

#[tokio::test]
async fn virtual_root_without_entry_document_is_an_html_404() {
    let upstream = common::start_upstream("200 OK", &[], "upstream").await;
    let store = Arc::new(MemoryStore::from_entries([("app.js", "not html")]));
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(upstream), store).await;

    let res = common::client()
        .get(format!("http://{addr}/virtual-app.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.headers()["content-type"], "text/html");

    shutdown.trigger();
}

#[tokio::test]
async fn resolution_is_idempotent_for_an_unchanged_store() {
    let upstream = common::start_upstream("200 OK", &[], "upstream").await;
    let store = Arc::new(MemoryStore::from_entries([("data/levels.json", r#"{"n":1}"#)]));
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(upstream), store).await;

    let first = common::client()
        .get(format!("http://{addr}/data/levels.json"))
        .send()
        .await
        .unwrap();
    let first_type = first.headers()["content-type"].clone();
    let first_body = first.bytes().await.unwrap();

    let second = common::client()
        .get(format!("http://{addr}/data/levels.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(second.headers()["content-type"], first_type);
    assert_eq!(second.bytes().await.unwrap(), first_body);

    shutdown.trigger();
}
