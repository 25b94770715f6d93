//! In-memory content tree addressed by stable string ids.
//!
//! Nodes live in an id-indexed map; parent/child edges are ids, never references.
//! Shared across handlers as `Arc<RwLock<Catalog>>`: browses hold the read lock for
//! one consistent snapshot, mutations hold the write lock so the `system_update_id`
//! bump lands atomically with the structural change.

mod node;

use std::collections::HashMap;

pub use node::{CatalogNode, NodeKind, Resource};

/// Reserved id of the root container.
pub const ROOT_ID: &str = "0";
/// `parentID` reported for the root container.
pub const ROOT_PARENT_ID: &str = "-1";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no such object: {0}")]
    NotFound(String),
    #[error("object id already exists: {0}")]
    DuplicateId(String),
    #[error("parent {0} does not exist")]
    NoSuchParent(String),
    #[error("parent {0} is not a container")]
    ParentNotContainer(String),
    #[error("moving {id} under {parent} would create a cycle")]
    Cycle { id: String, parent: String },
    #[error("the root container cannot be removed or moved")]
    RootImmutable,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    nodes: HashMap<String, CatalogNode>,
    system_update_id: u32,
}

impl Catalog {
    /// Create a catalog holding only the root container.
    pub fn new(root_title: &str) -> Self {
        let root = CatalogNode::container(ROOT_ID, ROOT_PARENT_ID, root_title);
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_ID.to_string(), root);
        Self {
            nodes,
            system_update_id: 1,
        }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogNode> {
        self.nodes.get(id)
    }

    pub fn lookup(&self, id: &str) -> Result<&CatalogNode, CatalogError> {
        self.nodes
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn root(&self) -> &CatalogNode {
        // Root is inserted by `new` and `remove`/`move_node` refuse to touch it.
        &self.nodes[ROOT_ID]
    }

    pub fn system_update_id(&self) -> u32 {
        self.system_update_id
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Number of items (non-containers) in the whole tree.
    pub fn item_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_item()).count()
    }

    /// Resolve the children of `id` in browse order. Empty for items.
    pub fn children(&self, id: &str) -> Result<Vec<&CatalogNode>, CatalogError> {
        let node = self.lookup(id)?;
        Ok(node
            .child_ids()
            .iter()
            .filter_map(|child| self.nodes.get(child))
            .collect())
    }

    /// Insert `node` under its `parent_id`, appending it to the parent's child order.
    ///
    /// Containers are expected to arrive with no children; their subtree is built
    /// by further inserts. Any ids already listed on an inserted container are
    /// dropped so the tree invariants hold.
    pub fn insert(&mut self, mut node: CatalogNode) -> Result<(), CatalogError> {
        if self.nodes.contains_key(&node.id) {
            return Err(CatalogError::DuplicateId(node.id));
        }
        self.container_mut(&node.parent_id)?.push(node.id.clone());
        if let NodeKind::Container { child_ids } = &mut node.kind {
            child_ids.clear();
        }
        self.nodes.insert(node.id.clone(), node);
        self.bump();
        Ok(())
    }

    /// Remove `id` and its whole subtree. Returns the number of nodes removed.
    pub fn remove(&mut self, id: &str) -> Result<usize, CatalogError> {
        if id == ROOT_ID {
            return Err(CatalogError::RootImmutable);
        }
        let parent_id = self.lookup(id)?.parent_id.clone();
        if let Ok(siblings) = self.container_mut(&parent_id) {
            siblings.retain(|c| c != id);
        }

        let mut pending = vec![id.to_string()];
        let mut removed = 0;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend(node.child_ids().iter().cloned());
                removed += 1;
            }
        }
        self.bump();
        Ok(removed)
    }

    /// Reparent `id` under `new_parent`, appending it to the new parent's children.
    pub fn move_node(&mut self, id: &str, new_parent: &str) -> Result<(), CatalogError> {
        if id == ROOT_ID {
            return Err(CatalogError::RootImmutable);
        }
        let old_parent = self.lookup(id)?.parent_id.clone();
        match self.nodes.get(new_parent) {
            None => return Err(CatalogError::NoSuchParent(new_parent.to_string())),
            Some(p) if !p.is_container() => {
                return Err(CatalogError::ParentNotContainer(new_parent.to_string()))
            }
            Some(_) => {}
        }
        if self.is_ancestor_or_self(id, new_parent) {
            return Err(CatalogError::Cycle {
                id: id.to_string(),
                parent: new_parent.to_string(),
            });
        }

        if let Ok(siblings) = self.container_mut(&old_parent) {
            siblings.retain(|c| c != id);
        }
        self.container_mut(new_parent)?.push(id.to_string());
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent_id = new_parent.to_string();
        }
        self.bump();
        Ok(())
    }

    /// True when `ancestor` is `id` itself or lies on the path from `id` to the root.
    fn is_ancestor_or_self(&self, ancestor: &str, id: &str) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(current).map(|n| n.parent_id.as_str());
        }
        false
    }

    fn container_mut(&mut self, id: &str) -> Result<&mut Vec<String>, CatalogError> {
        match self.nodes.get_mut(id) {
            None => Err(CatalogError::NoSuchParent(id.to_string())),
            Some(CatalogNode {
                kind: NodeKind::Container { child_ids },
                ..
            }) => Ok(child_ids),
            Some(_) => Err(CatalogError::ParentNotContainer(id.to_string())),
        }
    }

    fn bump(&mut self) {
        self.system_update_id = self.system_update_id.saturating_add(1);
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new("Root")
    }
}
