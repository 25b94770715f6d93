use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::soap::{xml_escape, SoapError, ENCODING_STYLE, ENVELOPE_NAMESPACE};

/// One action invocation lifted out of `<Envelope><Body>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoapAction {
    /// Local name of the Body's child element, e.g. `Browse`.
    pub name: String,
    /// Namespace URI bound to the action element, if any.
    pub namespace: Option<String>,
    /// Argument elements in document order, text unescaped and trimmed.
    pub args: Vec<(String, String)>,
}

impl SoapAction {
    /// Value of argument `name`. Absent and empty arguments are both `None`.
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// Parse a SOAP request body into its action.
///
/// Fails with `EmptyBody` for a blank body, `MalformedXml` when the bytes are not
/// a well-formed document, and `InvalidSoap` when the document is not an
/// `Envelope` whose `Body` holds an action element.
pub fn parse_action(body: &[u8]) -> Result<SoapAction, SoapError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(SoapError::EmptyBody);
    }
    let text = std::str::from_utf8(body)
        .map_err(|e| SoapError::MalformedXml(format!("body is not UTF-8: {e}")))?;

    let mut reader = NsReader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut walk = Walk::default();
    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| SoapError::MalformedXml(e.to_string()))?;
        let namespace = match ns {
            ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
            _ => None,
        };

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                walk.open(local, namespace)?;
                if matches!(event, Event::Empty(_)) {
                    walk.close();
                }
            }
            Event::End(_) => walk.close(),
            Event::Text(e) => {
                if let Some((_, value)) = walk.current_arg.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| SoapError::MalformedXml(err.to_string()))?;
                    value.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some((_, value)) = walk.current_arg.as_mut() {
                    value.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !walk.seen_root {
        return Err(SoapError::MalformedXml("no root element".into()));
    }
    if walk.depth != 0 {
        return Err(SoapError::MalformedXml("unexpected end of document".into()));
    }
    walk.action
        .ok_or_else(|| SoapError::InvalidSoap("no action element inside <Envelope><Body>".into()))
}

/// Element nesting while reading an envelope:
/// 1 = Envelope, 2 = Body/Header, 3 = action, 4 = argument.
#[derive(Default)]
struct Walk {
    depth: usize,
    seen_root: bool,
    in_body: bool,
    in_action: bool,
    action: Option<SoapAction>,
    current_arg: Option<(String, String)>,
}

impl Walk {
    fn open(&mut self, local: String, namespace: Option<String>) -> Result<(), SoapError> {
        self.depth += 1;
        match self.depth {
            1 => {
                if self.seen_root {
                    return Err(SoapError::MalformedXml("more than one root element".into()));
                }
                self.seen_root = true;
                if local != "Envelope" {
                    return Err(SoapError::InvalidSoap(format!(
                        "root element is <{local}>, expected <Envelope>"
                    )));
                }
            }
            2 => self.in_body = local == "Body",
            3 if self.in_body => {
                if self.action.is_none() {
                    self.action = Some(SoapAction {
                        name: local,
                        namespace,
                        args: Vec::new(),
                    });
                    self.in_action = true;
                } else {
                    tracing::debug!("Ignoring extra Body element <{}>", local);
                }
            }
            4 if self.in_action => self.current_arg = Some((local, String::new())),
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self) {
        match self.depth {
            4 => {
                if let (Some((name, value)), Some(action)) = (self.current_arg.take(), self.action.as_mut()) {
                    action.args.push((name, value.trim().to_string()));
                }
            }
            3 => self.in_action = false,
            2 => self.in_body = false,
            _ => {}
        }
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Build a SOAP 1.1 response envelope for `{action}Response` in `namespace`,
/// one child element per argument with its value escaped.
pub fn soap_response(action: &str, namespace: &str, args: &[(&str, String)]) -> String {
    let inner: String = args
        .iter()
        .map(|(name, value)| format!("<{name}>{}</{name}>", xml_escape(value)))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="{ENVELOPE_NAMESPACE}" s:encodingStyle="{ENCODING_STYLE}">
  <s:Body>
    <u:{action}Response xmlns:u="{namespace}">{inner}</u:{action}Response>
  </s:Body>
</s:Envelope>"#
    )
}

/// Build a UPnP SOAP fault envelope carrying `error_code` and `description`.
pub fn soap_fault(error_code: u16, description: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="{ENVELOPE_NAMESPACE}" s:encodingStyle="{ENCODING_STYLE}">
  <s:Body>
    <s:Fault>
      <faultcode>s:Client</faultcode>
      <faultstring>UPnPError</faultstring>
      <detail>
        <UPnPError xmlns="urn:schemas-upnp-org:control-1-0">
          <errorCode>{error_code}</errorCode>
          <errorDescription>{description}</errorDescription>
        </UPnPError>
      </detail>
    </s:Fault>
  </s:Body>
</s:Envelope>"#,
        description = xml_escape(description),
    )
}
