use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, UrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use snip_core::ShortCode;

pub async fn create_url_handler(
    State(state): State<AppState>,
    request: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = request?;
    let original_url = request.url.as_deref().unwrap_or_default();
    let record = state.shortener().create_url(original_url).await?;

    let location = format!("/v1/urls/{}", record.short_code);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UrlResponse::from(record)),
    )
        .into_response())
}

/// Redirects to the original URL with `301 Moved Permanently`.
pub async fn get_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let code = ShortCode::new(short_code)?;

    match state.shortener().get_url(&code).await? {
        Some(record) => Ok((
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, record.original_url)],
        )
            .into_response()),
        None => Err(AppError::NotFound(code.to_string())),
    }
}
