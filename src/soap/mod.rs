//! SOAP control: envelope parsing, action dispatch, response and fault building.

pub mod envelope;

use std::borrow::Cow;

use crate::cds::browse::BrowseError;
use crate::cds::ContentDirectory;
use crate::cms;

pub use envelope::{parse_action, soap_fault, soap_response, SoapAction};

pub const ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const ENCODING_STYLE: &str = "http://schemas.xmlsoap.org/soap/encoding/";
pub const CDS_NAMESPACE: &str = "urn:schemas-upnp-org:service:ContentDirectory:1";
pub const CMS_NAMESPACE: &str = "urn:schemas-upnp-org:service:ConnectionManager:1";
const UPNP_SERVICE_PREFIX: &str = "urn:schemas-upnp-org:service:";

/// Escape the five XML special characters for text nodes and attribute values.
/// Characters XML 1.0 cannot carry at all (most C0 controls, U+FFFE, U+FFFF)
/// become U+FFFD.
pub fn xml_escape(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        return quick_xml::escape::escape(s);
    }
    let cleaned: String = s
        .chars()
        .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
        .collect();
    Cow::Owned(quick_xml::escape::escape(&cleaned).into_owned())
}

// XML 1.0 `Char` production; surrogates cannot occur in a `char`.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SoapError {
    #[error("empty SOAP request body")]
    EmptyBody,
    #[error("malformed XML: {0}")]
    MalformedXml(String),
    #[error("invalid SOAP envelope: {0}")]
    InvalidSoap(String),
    #[error("unsupported action: {0}")]
    UnsupportedAction(String),
    #[error("invalid args: {0}")]
    InvalidArgs(String),
    #[error("no such object: {0}")]
    NoSuchObject(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl SoapError {
    /// Rejected before an action could be identified; answered with a plain 400.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            SoapError::EmptyBody | SoapError::MalformedXml(_) | SoapError::InvalidSoap(_)
        )
    }

    /// UPnP error code and description carried in a SOAP fault.
    pub fn upnp_error(&self) -> Option<(u16, &'static str)> {
        match self {
            SoapError::UnsupportedAction(_) => Some((401, "Invalid Action")),
            SoapError::InvalidArgs(_) => Some((402, "Invalid Args")),
            SoapError::NoSuchObject(_) => Some((701, "No such object")),
            SoapError::Internal(_) => Some((501, "Action Failed")),
            _ => None,
        }
    }
}

impl From<BrowseError> for SoapError {
    fn from(e: BrowseError) -> Self {
        match e {
            BrowseError::NoSuchObject(id) => SoapError::NoSuchObject(id),
            BrowseError::InvalidArgs(msg) => SoapError::InvalidArgs(msg),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Service {
    ContentDirectory,
    ConnectionManager,
}

impl Service {
    pub fn namespace(self) -> &'static str {
        match self {
            Service::ContentDirectory => CDS_NAMESPACE,
            Service::ConnectionManager => CMS_NAMESPACE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Service::ContentDirectory => "ContentDirectory",
            Service::ConnectionManager => "ConnectionManager",
        }
    }

    /// Accept any version of this service type, e.g. `...:ContentDirectory:1`.
    /// Namespaces that name no UPnP service (say, an action inheriting the
    /// envelope's default namespace) are accepted too: the element name decides.
    fn accepts_namespace(self, namespace: &str) -> bool {
        match namespace.strip_prefix(UPNP_SERVICE_PREFIX) {
            Some(rest) => rest
                .strip_prefix(self.name())
                .is_some_and(|rest| rest.starts_with(':')),
            None => true,
        }
    }
}

/// Routes parsed actions to the service that owns them.
#[derive(Clone)]
pub struct Dispatcher {
    pub content_directory: ContentDirectory,
}

impl Dispatcher {
    pub fn new(content_directory: ContentDirectory) -> Self {
        Self { content_directory }
    }

    /// Terminate one control request: parse `body`, run the action on `service`,
    /// and return the response envelope.
    pub fn dispatch(&self, service: Service, body: &[u8]) -> Result<String, SoapError> {
        let action = parse_action(body)?;

        if let Some(ns) = action.namespace.as_deref() {
            if !service.accepts_namespace(ns) {
                return Err(SoapError::UnsupportedAction(format!(
                    "{} ({ns}) sent to {}",
                    action.name,
                    service.name()
                )));
            }
        }

        let args = match service {
            Service::ContentDirectory => self.content_directory.handle(&action)?,
            Service::ConnectionManager => cms::handle(&action)?,
        };
        Ok(soap_response(&action.name, service.namespace(), &args))
    }
}
