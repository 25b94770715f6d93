use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::http::state::AppState;
use crate::media::library::MediaFile;

// DLNA.ORG_OP=00: no seeking (whole-file delivery only), DLNA.ORG_CI=0: not transcoded.
const DLNA_CONTENT_FEATURES: &str =
    "DLNA.ORG_OP=00;DLNA.ORG_CI=0;DLNA.ORG_FLAGS=01700000000000000000000000000000";
const DLNA_TRANSFER_MODE: &str = "Streaming";

fn dlna_headers(file: &MediaFile) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(file.mime));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(file.file_size));
    headers.insert(
        HeaderName::from_static("transfermode.dlna.org"),
        HeaderValue::from_static(DLNA_TRANSFER_MODE),
    );
    headers.insert(
        HeaderName::from_static("contentfeatures.dlna.org"),
        HeaderValue::from_static(DLNA_CONTENT_FEATURES),
    );
    headers
}

/// HEAD /media/{id}: headers only, the file is not opened.
pub async fn serve_media_head(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.media.get(&id) {
        Some(file) => (StatusCode::OK, dlna_headers(file)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// GET /media/{id}: stream the whole file.
pub async fn serve_media_get(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(file) = state.media.get(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let handle = match tokio::fs::File::open(&file.path).await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("Failed to open file {}: {}", file.path.display(), e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let body = Body::from_stream(ReaderStream::new(handle));
    (StatusCode::OK, dlna_headers(file), body).into_response()
}
