use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::state::AppState;
use crate::soap::{soap_fault, Service, SoapError};

const XML_CONTENT_TYPE: &str = "text/xml; charset=\"utf-8\"";

pub async fn cds_control(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    control(&state, Service::ContentDirectory, &headers, &body)
}

pub async fn cms_control(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    control(&state, Service::ConnectionManager, &headers, &body)
}

fn control(state: &AppState, service: Service, headers: &HeaderMap, body: &[u8]) -> Response {
    // The body element names the action; the SOAPACTION header is only logged.
    if let Some(soap_action) = headers.get("soapaction").and_then(|v| v.to_str().ok()) {
        tracing::debug!("{} control, SOAPACTION {}", service.name(), soap_action);
    }

    match state.dispatcher.dispatch(service, body) {
        Ok(envelope) => (StatusCode::OK, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], envelope).into_response(),
        Err(e) => e.into_response(),
    }
}

impl IntoResponse for SoapError {
    fn into_response(self) -> Response {
        if self.is_request_error() {
            tracing::debug!("Rejected control request: {}", self);
            return (StatusCode::BAD_REQUEST, self.to_string()).into_response();
        }
        match &self {
            SoapError::Internal(_) => tracing::error!("Control action failed: {}", self),
            _ => tracing::debug!("Control action fault: {}", self),
        }
        let (code, description) = self.upnp_error().unwrap_or((501, "Action Failed"));
        // UPnP faults travel with HTTP 500 per SOAP 1.1.
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
            soap_fault(code, description),
        )
            .into_response()
    }
}
