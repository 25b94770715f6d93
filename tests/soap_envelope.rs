use dlnacat::soap::{parse_action, soap_fault, soap_response, SoapError, CDS_NAMESPACE};

fn browse_envelope(args: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <s:Body>
    <u:Browse xmlns:u="urn:schemas-upnp-org:service:ContentDirectory:1">{args}</u:Browse>
  </s:Body>
</s:Envelope>"#
    )
}

#[test]
fn parses_action_name_namespace_and_args() {
    let body = browse_envelope(
        "<ObjectID>0</ObjectID><BrowseFlag>BrowseDirectChildren</BrowseFlag><StartingIndex>5</StartingIndex>",
    );
    let action = parse_action(body.as_bytes()).unwrap();
    assert_eq!(action.name, "Browse");
    assert_eq!(action.namespace.as_deref(), Some(CDS_NAMESPACE));
    assert_eq!(action.arg("ObjectID"), Some("0"));
    assert_eq!(action.arg("BrowseFlag"), Some("BrowseDirectChildren"));
    assert_eq!(action.arg("StartingIndex"), Some("5"));
    assert_eq!(action.arg("RequestedCount"), None);
}

#[test]
fn argument_text_is_unescaped_and_trimmed() {
    let body = browse_envelope("<ObjectID>  a&amp;b  </ObjectID><Filter><![CDATA[dc:title,res]]></Filter>");
    let action = parse_action(body.as_bytes()).unwrap();
    assert_eq!(action.arg("ObjectID"), Some("a&b"));
    assert_eq!(action.arg("Filter"), Some("dc:title,res"));
}

#[test]
fn empty_argument_reads_as_absent() {
    let body = browse_envelope("<ObjectID></ObjectID><SortCriteria/>");
    let action = parse_action(body.as_bytes()).unwrap();
    assert_eq!(action.arg("ObjectID"), None);
    assert_eq!(action.arg("SortCriteria"), None);
    assert_eq!(action.args.len(), 2);
}

#[test]
fn any_envelope_prefix_is_accepted() {
    let body = r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"><SOAP-ENV:Body><m:GetSystemUpdateID xmlns:m="urn:schemas-upnp-org:service:ContentDirectory:1"/></SOAP-ENV:Body></SOAP-ENV:Envelope>"#;
    let action = parse_action(body.as_bytes()).unwrap();
    assert_eq!(action.name, "GetSystemUpdateID");
    assert!(action.args.is_empty());
}

#[test]
fn header_element_is_skipped() {
    let body = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Header><Token>x</Token></s:Header><s:Body><u:GetSortCapabilities xmlns:u="urn:schemas-upnp-org:service:ContentDirectory:1"/></s:Body></s:Envelope>"#;
    let action = parse_action(body.as_bytes()).unwrap();
    assert_eq!(action.name, "GetSortCapabilities");
}

#[test]
fn empty_body_is_rejected() {
    assert_eq!(parse_action(b""), Err(SoapError::EmptyBody));
    assert_eq!(parse_action(b"  \r\n\t"), Err(SoapError::EmptyBody));
}

#[test]
fn malformed_xml_is_rejected() {
    for body in [
        "<s:Envelope><s:Body>",
        r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body></s:Envelope>"#,
        "not xml at all",
        "<Envelope/><Envelope/>",
    ] {
        let err = parse_action(body.as_bytes()).unwrap_err();
        assert!(matches!(err, SoapError::MalformedXml(_)), "{body:?} gave {err:?}");
        assert!(err.is_request_error());
    }
}

#[test]
fn non_utf8_body_is_malformed() {
    let err = parse_action(&[0x3c, 0xff, 0xfe, 0x3e]).unwrap_err();
    assert!(matches!(err, SoapError::MalformedXml(_)));
}

#[test]
fn wrong_root_or_missing_action_is_invalid_soap() {
    let wrong_root = parse_action(b"<Browse><ObjectID>0</ObjectID></Browse>").unwrap_err();
    assert!(matches!(wrong_root, SoapError::InvalidSoap(_)), "{wrong_root:?}");

    let no_action = parse_action(
        br#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body></s:Body></s:Envelope>"#,
    )
    .unwrap_err();
    assert!(matches!(no_action, SoapError::InvalidSoap(_)), "{no_action:?}");
}

#[test]
fn response_envelope_escapes_values() {
    let xml = soap_response(
        "Browse",
        CDS_NAMESPACE,
        &[("Result", "<DIDL-Lite/>".to_string()), ("NumberReturned", "0".to_string())],
    );
    assert!(xml.contains(r#"<u:BrowseResponse xmlns:u="urn:schemas-upnp-org:service:ContentDirectory:1">"#));
    assert!(xml.contains("<Result>&lt;DIDL-Lite/&gt;</Result>"), "{xml}");
    assert!(xml.contains("<NumberReturned>0</NumberReturned>"));
    assert!(xml.contains("</u:BrowseResponse>"));
}

#[test]
fn fault_carries_upnp_error() {
    let xml = soap_fault(701, "No such object");
    assert!(xml.contains("<s:Fault>"));
    assert!(xml.contains("<faultcode>s:Client</faultcode>"));
    assert!(xml.contains("<faultstring>UPnPError</faultstring>"));
    assert!(xml.contains("<errorCode>701</errorCode>"));
    assert!(xml.contains("<errorDescription>No such object</errorDescription>"));
}

#[test]
fn error_codes() {
    assert_eq!(SoapError::UnsupportedAction("X".into()).upnp_error(), Some((401, "Invalid Action")));
    assert_eq!(SoapError::InvalidArgs("X".into()).upnp_error().map(|e| e.0), Some(402));
    assert_eq!(SoapError::NoSuchObject("X".into()).upnp_error().map(|e| e.0), Some(701));
    assert_eq!(SoapError::Internal("X".into()).upnp_error().map(|e| e.0), Some(501));
    assert_eq!(SoapError::EmptyBody.upnp_error(), None);
}
