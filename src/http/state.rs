use std::collections::HashMap;
use std::sync::Arc;

use crate::media::library::MediaFile;
use crate::soap::Dispatcher;

/// Shared application state injected into all route handlers via axum::extract::State.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    /// Files behind catalog items, keyed by item id. Written once at startup.
    pub media: Arc<HashMap<String, MediaFile>>,
    pub server_uuid: String,
    pub server_name: String,
}
