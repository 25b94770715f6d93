use std::sync::LazyLock;

use axum::{extract::State, http::header, response::IntoResponse};

use crate::http::state::AppState;
use crate::soap::{xml_escape, CDS_NAMESPACE, CMS_NAMESPACE};
use crate::ssdp::messages::MEDIA_SERVER_DEVICE_TYPE;

const IN: bool = true;
const OUT: bool = false;

/// One `<argument>`: name, direction (`IN`/`OUT`) and related state variable.
type Argument = (&'static str, bool, &'static str);

struct Action {
    name: &'static str,
    args: &'static [Argument],
}

struct StateVariable {
    name: &'static str,
    data_type: &'static str,
    send_events: bool,
    allowed: &'static [&'static str],
}

const fn var(name: &'static str, data_type: &'static str) -> StateVariable {
    StateVariable {
        name,
        data_type,
        send_events: false,
        allowed: &[],
    }
}

const fn evented(name: &'static str, data_type: &'static str) -> StateVariable {
    StateVariable {
        send_events: true,
        ..var(name, data_type)
    }
}

const CDS_ACTIONS: &[Action] = &[
    Action {
        name: "Browse",
        args: &[
            ("ObjectID", IN, "A_ARG_TYPE_ObjectID"),
            ("BrowseFlag", IN, "A_ARG_TYPE_BrowseFlag"),
            ("Filter", IN, "A_ARG_TYPE_Filter"),
            ("StartingIndex", IN, "A_ARG_TYPE_Index"),
            ("RequestedCount", IN, "A_ARG_TYPE_Count"),
            ("SortCriteria", IN, "A_ARG_TYPE_SortCriteria"),
            ("Result", OUT, "A_ARG_TYPE_Result"),
            ("NumberReturned", OUT, "A_ARG_TYPE_Count"),
            ("TotalMatches", OUT, "A_ARG_TYPE_Count"),
            ("UpdateID", OUT, "A_ARG_TYPE_UpdateID"),
        ],
    },
    Action {
        name: "GetSearchCapabilities",
        args: &[("SearchCaps", OUT, "SearchCapabilities")],
    },
    Action {
        name: "GetSortCapabilities",
        args: &[("SortCaps", OUT, "SortCapabilities")],
    },
    Action {
        name: "GetSystemUpdateID",
        args: &[("Id", OUT, "SystemUpdateID")],
    },
];

const CDS_STATE: &[StateVariable] = &[
    StateVariable {
        allowed: &["BrowseMetadata", "BrowseDirectChildren"],
        ..var("A_ARG_TYPE_BrowseFlag", "string")
    },
    var("A_ARG_TYPE_ObjectID", "string"),
    var("A_ARG_TYPE_Filter", "string"),
    var("A_ARG_TYPE_Index", "ui4"),
    var("A_ARG_TYPE_Count", "ui4"),
    var("A_ARG_TYPE_SortCriteria", "string"),
    var("A_ARG_TYPE_Result", "string"),
    var("A_ARG_TYPE_UpdateID", "ui4"),
    var("SearchCapabilities", "string"),
    var("SortCapabilities", "string"),
    evented("SystemUpdateID", "ui4"),
];

const CMS_ACTIONS: &[Action] = &[
    Action {
        name: "GetProtocolInfo",
        args: &[
            ("Source", OUT, "SourceProtocolInfo"),
            ("Sink", OUT, "SinkProtocolInfo"),
        ],
    },
    Action {
        name: "GetCurrentConnectionIDs",
        args: &[("ConnectionIDs", OUT, "CurrentConnectionIDs")],
    },
    Action {
        name: "GetCurrentConnectionInfo",
        args: &[
            ("ConnectionID", IN, "A_ARG_TYPE_ConnectionID"),
            ("RcsID", OUT, "A_ARG_TYPE_RcsID"),
            ("AVTransportID", OUT, "A_ARG_TYPE_AVTransportID"),
            ("ProtocolInfo", OUT, "A_ARG_TYPE_ProtocolInfo"),
            ("PeerConnectionManager", OUT, "A_ARG_TYPE_ConnectionManager"),
            ("PeerConnectionID", OUT, "A_ARG_TYPE_ConnectionID"),
            ("Direction", OUT, "A_ARG_TYPE_Direction"),
            ("Status", OUT, "A_ARG_TYPE_ConnectionStatus"),
        ],
    },
    Action {
        name: "PrepareForConnection",
        args: &[
            ("RemoteProtocolInfo", IN, "A_ARG_TYPE_ProtocolInfo"),
            ("PeerConnectionManager", IN, "A_ARG_TYPE_ConnectionManager"),
            ("PeerConnectionID", IN, "A_ARG_TYPE_ConnectionID"),
            ("Direction", IN, "A_ARG_TYPE_Direction"),
            ("ConnectionID", OUT, "A_ARG_TYPE_ConnectionID"),
            ("AVTransportID", OUT, "A_ARG_TYPE_AVTransportID"),
            ("RcsID", OUT, "A_ARG_TYPE_RcsID"),
        ],
    },
];

const CMS_STATE: &[StateVariable] = &[
    evented("SourceProtocolInfo", "string"),
    evented("SinkProtocolInfo", "string"),
    evented("CurrentConnectionIDs", "string"),
    StateVariable {
        allowed: &["OK", "ContentFormatMismatch", "InsufficientBandwidth", "UnreliableChannel", "Unknown"],
        ..var("A_ARG_TYPE_ConnectionStatus", "string")
    },
    var("A_ARG_TYPE_ConnectionManager", "string"),
    StateVariable {
        allowed: &["Input", "Output"],
        ..var("A_ARG_TYPE_Direction", "string")
    },
    var("A_ARG_TYPE_ProtocolInfo", "string"),
    var("A_ARG_TYPE_ConnectionID", "i4"),
    var("A_ARG_TYPE_AVTransportID", "i4"),
    var("A_ARG_TYPE_RcsID", "i4"),
];

static CDS_SCPD: LazyLock<String> = LazyLock::new(|| scpd(CDS_ACTIONS, CDS_STATE));
static CMS_SCPD: LazyLock<String> = LazyLock::new(|| scpd(CMS_ACTIONS, CMS_STATE));

/// Render a service description document (SCPD).
fn scpd(actions: &[Action], state: &[StateVariable]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
<scpd xmlns=\"urn:schemas-upnp-org:service-1-0\">\n\
  <specVersion><major>1</major><minor>0</minor></specVersion>\n\
  <actionList>\n",
    );
    for action in actions {
        out.push_str(&format!("    <action>\n      <name>{}</name>\n      <argumentList>\n", action.name));
        for (name, input, related) in action.args {
            let direction = if *input { "in" } else { "out" };
            out.push_str(&format!(
                "        <argument><name>{name}</name><direction>{direction}</direction><relatedStateVariable>{related}</relatedStateVariable></argument>\n"
            ));
        }
        out.push_str("      </argumentList>\n    </action>\n");
    }
    out.push_str("  </actionList>\n  <serviceStateTable>\n");
    for v in state {
        let events = if v.send_events { "yes" } else { "no" };
        let allowed = if v.allowed.is_empty() {
            String::new()
        } else {
            let values: String = v
                .allowed
                .iter()
                .map(|a| format!("<allowedValue>{a}</allowedValue>"))
                .collect();
            format!("<allowedValueList>{values}</allowedValueList>")
        };
        out.push_str(&format!(
            "    <stateVariable sendEvents=\"{events}\"><name>{}</name><dataType>{}</dataType>{allowed}</stateVariable>\n",
            v.name, v.data_type
        ));
    }
    out.push_str("  </serviceStateTable>\n</scpd>");
    out
}

/// Device description served at `/description.xml`, the SSDP `LOCATION`.
pub fn device_description(server_uuid: &str, server_name: &str) -> String {
    format!(r#"<?xml version="1.0" encoding="utf-8"?>
<root xmlns="urn:schemas-upnp-org:device-1-0"
      xmlns:dlna="urn:schemas-dlna-org:device-1-0"
      xmlns:sec="http://www.sec.co.kr/dlna">
  <specVersion>
    <major>1</major>
    <minor>0</minor>
  </specVersion>
  <device>
    <deviceType>{device_type}</deviceType>
    <dlna:X_DLNADOC>DMS-1.50</dlna:X_DLNADOC>
    <dlna:X_DLNADOC>M-DMS-1.50</dlna:X_DLNADOC>
    <dlna:X_DLNACAP/>
    <sec:ProductCap>smi,DCM10,getMediaInfo.sec,getCaptionInfo.sec</sec:ProductCap>
    <friendlyName>{name}</friendlyName>
    <manufacturer>dlnacat</manufacturer>
    <modelDescription>UPnP/DLNA Media Server</modelDescription>
    <modelName>dlnacat</modelName>
    <modelNumber>{version}</modelNumber>
    <serialNumber>0</serialNumber>
    <UDN>uuid:{uuid}</UDN>
    <serviceList>
      <service>
        <serviceType>{cds}</serviceType>
        <serviceId>urn:upnp-org:serviceId:ContentDirectory</serviceId>
        <SCPDURL>/ContentDirectory/scpd.xml</SCPDURL>
        <controlURL>/ContentDirectory/control</controlURL>
        <eventSubURL></eventSubURL>
      </service>
      <service>
        <serviceType>{cms}</serviceType>
        <serviceId>urn:upnp-org:serviceId:ConnectionManager</serviceId>
        <SCPDURL>/ConnectionManager/scpd.xml</SCPDURL>
        <controlURL>/ConnectionManager/control</controlURL>
        <eventSubURL></eventSubURL>
      </service>
    </serviceList>
  </device>
</root>"#,
        device_type = MEDIA_SERVER_DEVICE_TYPE,
        name = xml_escape(server_name),
        version = env!("CARGO_PKG_VERSION"),
        uuid = xml_escape(server_uuid),
        cds = CDS_NAMESPACE,
        cms = CMS_NAMESPACE,
    )
}

pub async fn serve_device_xml(State(state): State<AppState>) -> impl IntoResponse {
    let body = device_description(&state.server_uuid, &state.server_name);
    ([(header::CONTENT_TYPE, "text/xml; charset=\"utf-8\"")], body)
}

pub async fn serve_cds_scpd() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/xml; charset=\"utf-8\"")], CDS_SCPD.as_str())
}

pub async fn serve_cms_scpd() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/xml; charset=\"utf-8\"")], CMS_SCPD.as_str())
}
