pub const MEDIA_SERVER_DEVICE_TYPE: &str = "urn:schemas-upnp-org:device:MediaServer:1";
pub const ROOT_DEVICE: &str = "upnp:rootdevice";

/// One advertisement: the `NT` header and its matching `USN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    pub nt: String,
    pub usn: String,
}

/// The three targets a root MediaServer announces, in send order.
/// The UUID target's USN is the bare `uuid:{uuid}`; the others append `::{target}`.
pub fn advertisements(device_uuid: &str) -> Vec<Advertisement> {
    let uuid = format!("uuid:{device_uuid}");
    [ROOT_DEVICE, uuid.as_str(), MEDIA_SERVER_DEVICE_TYPE]
        .into_iter()
        .map(|nt| Advertisement {
            nt: nt.to_string(),
            usn: if nt == uuid {
                uuid.clone()
            } else {
                format!("{uuid}::{nt}")
            },
        })
        .collect()
}

/// `SERVER` header value, `{os}/{version} UPnP/1.0 dlnacat/{version}`.
pub fn server_signature() -> String {
    format!(
        "{}/1.0 UPnP/1.0 dlnacat/{}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    )
}

/// Build a NOTIFY ssdp:alive message. CRLF line endings throughout; strict
/// clients drop packets with bare `\n`.
pub fn notify_alive(location: &str, server: &str, ad: &Advertisement) -> String {
    format!(
        "NOTIFY * HTTP/1.1\r\n\
HOST: 239.255.255.250:1900\r\n\
CACHE-CONTROL: max-age=1800\r\n\
LOCATION: {location}\r\n\
NT: {nt}\r\n\
NTS: ssdp:alive\r\n\
SERVER: {server}\r\n\
USN: {usn}\r\n\
\r\n",
        nt = ad.nt,
        usn = ad.usn,
    )
}
