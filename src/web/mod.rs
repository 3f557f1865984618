//! The browser facing search form.
mod controller;
mod form;
mod handlers;
mod page;

pub use controller::{run_search, SearchOutcome};
pub use form::{ProductType, SearchForm};

use crate::signing::PlanetaryComputerSigner;
use crate::stac_operations::StacClient;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Uploaded area of interest files can be larger than axum's default body limit.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub struct AppState {
    pub catalog: StacClient,
    pub signer: PlanetaryComputerSigner,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            catalog: StacClient::new(),
            signer: PlanetaryComputerSigner::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search", post(handlers::search))
        .route("/healthz", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    const BOUNDARY: &str = "----satdownloaderboundary";

    fn multipart_body(fields: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, file_name, value) in fields {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/json\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    async fn post_search(body: String) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/search")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = router(AppState::new()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = router(AppState::new()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<h1>Satellite Data Downloader</h1>"));
        assert!(html.contains("enctype=\"multipart/form-data\""));
    }

    #[tokio::test]
    async fn test_health_check() {
        let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let response = router(AppState::new()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_without_file() {
        let body = multipart_body(&[
            ("geojson", Some(""), ""),
            ("product_type", None, "sar"),
            ("cloud_cover", None, "30"),
            ("start_date", None, "2024-01-01"),
            ("end_date", None, "2024-01-31"),
        ]);
        let (status, html) = post_search(body).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Please upload a valid GeoJSON/JSON file first."));
        // The previous selection is kept.
        assert!(html.contains("<option value=\"sar\" selected>"));
        assert!(html.contains("name=\"start_date\" value=\"2024-01-01\""));
    }

    #[tokio::test]
    async fn test_search_with_missing_features() {
        let body = multipart_body(&[
            ("geojson", Some("aoi.geojson"), r#"{"type": "Feature"}"#),
            ("product_type", None, "truecolor"),
            ("cloud_cover", None, "30"),
            ("start_date", None, "2024-01-01"),
            ("end_date", None, "2024-01-31"),
        ]);
        let (status, html) = post_search(body).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Invalid GeoJSON: Missing &#39;features&#39;."));
        assert!(html.contains("Could not parse bounding box from the uploaded file."));
        assert!(!html.contains("Extracted Bounding Box"));
    }
}
