/// Where an item's bytes can be fetched and what they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Absolute URL, or a server-relative path starting with `/`.
    pub uri: String,
    pub mime_type: String,
    pub size_bytes: Option<u64>,
    /// UPnP duration, `H+:MM:SS[.F+]`.
    pub duration: Option<String>,
}

impl Resource {
    pub fn new(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
            size_bytes: None,
            duration: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size_bytes = Some(size);
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Container {
        /// Browse order.
        child_ids: Vec<String>,
    },
    Item {
        upnp_class: String,
        resource: Resource,
    },
}

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogNode {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub kind: NodeKind,
}

impl CatalogNode {
    pub fn container(id: impl Into<String>, parent_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            title: title.into(),
            kind: NodeKind::Container {
                child_ids: Vec::new(),
            },
        }
    }

    pub fn item(
        id: impl Into<String>,
        parent_id: impl Into<String>,
        title: impl Into<String>,
        upnp_class: impl Into<String>,
        resource: Resource,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            title: title.into(),
            kind: NodeKind::Item {
                upnp_class: upnp_class.into(),
                resource,
            },
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container { .. })
    }

    pub fn is_item(&self) -> bool {
        matches!(self.kind, NodeKind::Item { .. })
    }

    /// Child ids in browse order; empty for items.
    pub fn child_ids(&self) -> &[String] {
        match &self.kind {
            NodeKind::Container { child_ids } => child_ids,
            NodeKind::Item { .. } => &[],
        }
    }

    pub fn child_count(&self) -> usize {
        self.child_ids().len()
    }
}
