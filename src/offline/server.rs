//! Local interception boundary for the web-hosted variant.
//!
//! Every resource request the player UI issues is answered here: translated
//! into a [`FetchRequest`] against the configured upstream origin and routed
//! through the worker's fetch policy. Runs on its own tokio task and shares
//! no memory with the UI.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;

use crate::config::offline::OfflineConfig;
use crate::error::WavecrestResult;
use crate::offline::fetcher::{FetchRequest, HttpFetcher};
use crate::offline::manifest::AssetManifest;
use crate::offline::store::CacheStore;
use crate::offline::worker::{FetchOutcome, OfflineWorker};

type SharedWorker = Arc<OfflineWorker<HttpFetcher>>;

/// Install and activate a worker for the current manifest, then serve the
/// interception boundary until shutdown.
pub async fn serve(config: OfflineConfig) -> WavecrestResult<()> {
    let fetcher = HttpFetcher::new(&config.upstream)?;
    let store = CacheStore::open(config.cache_root())?;
    let mut worker = OfflineWorker::new(store, AssetManifest::current(), fetcher);

    worker.install().await?;
    worker.activate().await?;

    let listener = TcpListener::bind(&config.bind).await?;
    log::info!(
        "[OfflineService] listening on {} for upstream {}",
        listener.local_addr()?,
        config.upstream
    );

    let app = router(Arc::new(worker));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("[OfflineService] shutting down");
        })
        .await?;
    Ok(())
}

fn router(worker: SharedWorker) -> Router {
    Router::new().fallback(intercept).with_state(worker)
}

async fn intercept(State(worker): State<SharedWorker>, method: Method, uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .to_string();
    let request = FetchRequest::new(method.as_str(), &target);

    match worker.handle_fetch(&request).await {
        Ok(outcome) => to_response(outcome),
        // No synthetic fallback page; the failure is the response.
        Err(err) => (StatusCode::BAD_GATEWAY, err.to_string()).into_response(),
    }
}

fn to_response(outcome: FetchOutcome) -> Response {
    let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::OK);
    let mut builder = Response::builder().status(status);
    for (name, value) in &outcome.headers {
        if is_end_to_end_header(name) {
            builder = builder.header(name.as_str(), value.as_str());
        }
    }
    builder
        .body(Body::from(outcome.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Hop-by-hop headers describe the upstream connection, not the payload,
/// and must not be replayed on the local one.
fn is_end_to_end_header(name: &str) -> bool {
    !matches!(
        name.to_ascii_lowercase().as_str(),
        "connection" | "keep-alive" | "transfer-encoding" | "content-length" | "upgrade"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offline::worker::FetchSource;
    use bytes::Bytes;

    #[test]
    fn test_hop_by_hop_headers_are_dropped() {
        assert!(!is_end_to_end_header("Connection"));
        assert!(!is_end_to_end_header("transfer-encoding"));
        assert!(is_end_to_end_header("content-type"));
        assert!(is_end_to_end_header("cache-control"));
    }

    #[test]
    fn test_outcome_converts_to_response() {
        let outcome = FetchOutcome {
            source: FetchSource::Cache,
            status: 200,
            headers: vec![
                ("content-type".to_string(), "text/css".to_string()),
                ("transfer-encoding".to_string(), "chunked".to_string()),
            ],
            body: Bytes::from_static(b"body { margin: 0 }"),
        };

        let response = to_response(outcome);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/css"
        );
        assert!(response.headers().get("transfer-encoding").is_none());
    }

    #[test]
    fn test_invalid_status_degrades_to_ok() {
        let outcome = FetchOutcome {
            source: FetchSource::Network,
            status: 42,
            headers: vec![],
            body: Bytes::new(),
        };
        assert_eq!(to_response(outcome).status(), StatusCode::OK);
    }
}
