//! DIDL-Lite serialization of catalog nodes.

use std::borrow::Cow;

use crate::catalog::{CatalogNode, NodeKind, Resource};
use crate::media::mime::protocol_info;
use crate::soap::xml_escape;

pub const DIDL_NAMESPACE: &str = "urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/";
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
pub const UPNP_NAMESPACE: &str = "urn:schemas-upnp-org:metadata-1-0/upnp/";
pub const SEC_NAMESPACE: &str = "http://www.sec.co.kr/";

const CONTAINER_CLASS: &str = "object.container.storageFolder";

/// Where server-relative resource URIs are rooted, e.g. `http://192.168.1.5:8200`.
#[derive(Debug, Clone)]
pub struct DidlContext {
    pub base_url: String,
}

impl DidlContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn resolve_uri<'a>(&self, uri: &'a str) -> Cow<'a, str> {
        if uri.starts_with('/') {
            Cow::Owned(format!("{}{}", self.base_url, uri))
        } else {
            Cow::Borrowed(uri)
        }
    }
}

/// Render `nodes`, in order, as one `<DIDL-Lite>` document.
pub fn render(nodes: &[&CatalogNode], ctx: &DidlContext) -> String {
    let mut out = format!(
        r#"<DIDL-Lite xmlns="{DIDL_NAMESPACE}" xmlns:dc="{DC_NAMESPACE}" xmlns:upnp="{UPNP_NAMESPACE}" xmlns:sec="{SEC_NAMESPACE}">"#
    );
    for node in nodes {
        match &node.kind {
            NodeKind::Container { child_ids } => {
                out.push_str(&container_element(node, child_ids.len()));
            }
            NodeKind::Item {
                upnp_class,
                resource,
            } => {
                out.push_str(&item_element(node, upnp_class, resource, ctx));
            }
        }
    }
    out.push_str("</DIDL-Lite>");
    out
}

fn container_element(node: &CatalogNode, child_count: usize) -> String {
    format!(
        r#"<container id="{id}" parentID="{parent_id}" restricted="1" childCount="{child_count}"><dc:title>{title}</dc:title><upnp:class>{CONTAINER_CLASS}</upnp:class></container>"#,
        id = xml_escape(&node.id),
        parent_id = xml_escape(&node.parent_id),
        title = xml_escape(&node.title),
    )
}

fn item_element(node: &CatalogNode, upnp_class: &str, res: &Resource, ctx: &DidlContext) -> String {
    let size_attr = res
        .size_bytes
        .map(|size| format!(r#" size="{size}""#))
        .unwrap_or_default();
    let duration_attr = res
        .duration
        .as_deref()
        .map(|d| format!(r#" duration="{}""#, xml_escape(d)))
        .unwrap_or_default();
    let uri = ctx.resolve_uri(&res.uri);

    format!(
        r#"<item id="{id}" parentID="{parent_id}" restricted="1"><dc:title>{title}</dc:title><upnp:class>{class}</upnp:class><res protocolInfo="{protocol_info}"{size_attr}{duration_attr}>{uri}</res></item>"#,
        id = xml_escape(&node.id),
        parent_id = xml_escape(&node.parent_id),
        title = xml_escape(&node.title),
        class = xml_escape(upnp_class),
        protocol_info = xml_escape(&protocol_info(&res.mime_type)),
        uri = xml_escape(&uri),
    )
}
