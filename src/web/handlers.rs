use super::form::SearchForm;
use super::page::{self, FormValues};
use super::{controller, AppState};
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::State;
use axum::response::Html;
use chrono::Utc;
use std::sync::Arc;

pub async fn index() -> Html<String> {
    let values = FormValues::new(Utc::now().date_naive());
    Html(page::render(&values, None))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Html<String>, MultipartError> {
    let form = SearchForm::from_multipart(multipart).await?;
    let outcome = controller::run_search(&state.catalog, &state.signer, &form).await;
    Ok(Html(page::render(&submitted_values(&form), Some(&outcome))))
}

pub async fn health_check() -> &'static str {
    "ok"
}

/// The submitted selection, falling back to the defaults for fields that did not parse.
fn submitted_values(form: &SearchForm) -> FormValues {
    let mut values = FormValues::new(Utc::now().date_naive());
    if let Ok(product) = form.product() {
        values.product = product;
    }
    if let Ok(cloud_cover) = form.cloud_cover() {
        values.cloud_cover = cloud_cover;
    }
    if let Ok(start) = form.start() {
        values.start = start;
    }
    if let Ok(end) = form.end() {
        values.end = end;
    }
    values
}
