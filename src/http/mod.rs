pub mod control;
pub mod description;
pub mod media;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::http::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/description.xml", get(description::serve_device_xml))
        .route("/ContentDirectory/scpd.xml", get(description::serve_cds_scpd))
        .route("/ConnectionManager/scpd.xml", get(description::serve_cms_scpd))
        .route("/ContentDirectory/control", post(control::cds_control))
        .route("/ConnectionManager/control", post(control::cms_control))
        .route("/media/{id}", get(media::serve_media_get).head(media::serve_media_head))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
