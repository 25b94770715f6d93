//! ConnectionManager:1 service. Connections are never negotiated, so every
//! action answers with fixed values.

use crate::media::mime::source_protocol_info;
use crate::soap::{SoapAction, SoapError};

pub fn handle(action: &SoapAction) -> Result<Vec<(&'static str, String)>, SoapError> {
    match action.name.as_str() {
        "GetProtocolInfo" => Ok(get_protocol_info()),
        "GetCurrentConnectionIDs" => Ok(vec![("ConnectionIDs", "0".to_string())]),
        "GetCurrentConnectionInfo" => Ok(get_current_connection_info()),
        "PrepareForConnection" => Ok(prepare_for_connection()),
        other => {
            tracing::warn!("Unknown CMS action: {}", other);
            Err(SoapError::UnsupportedAction(other.to_string()))
        }
    }
}

fn get_protocol_info() -> Vec<(&'static str, String)> {
    vec![("Source", source_protocol_info()), ("Sink", String::new())]
}

fn get_current_connection_info() -> Vec<(&'static str, String)> {
    vec![
        ("RcsID", "-1".to_string()),
        ("AVTransportID", "-1".to_string()),
        ("ProtocolInfo", String::new()),
        ("PeerConnectionManager", String::new()),
        ("PeerConnectionID", "-1".to_string()),
        ("Direction", "Output".to_string()),
        ("Status", "OK".to_string()),
    ]
}

fn prepare_for_connection() -> Vec<(&'static str, String)> {
    vec![
        ("ConnectionID", "-1".to_string()),
        ("AVTransportID", "-1".to_string()),
        ("RcsID", "-1".to_string()),
    ]
}
