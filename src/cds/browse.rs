//! ContentDirectory Browse: resolve, paginate, serialize.

use std::str::FromStr;

use crate::catalog::{Catalog, CatalogNode};
use crate::cds::didl::{self, DidlContext};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BrowseFlag {
    BrowseMetadata,
    BrowseDirectChildren,
}

impl BrowseFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            BrowseFlag::BrowseMetadata => "BrowseMetadata",
            BrowseFlag::BrowseDirectChildren => "BrowseDirectChildren",
        }
    }
}

impl FromStr for BrowseFlag {
    type Err = BrowseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BrowseMetadata" => Ok(BrowseFlag::BrowseMetadata),
            "BrowseDirectChildren" => Ok(BrowseFlag::BrowseDirectChildren),
            other => Err(BrowseError::InvalidArgs(format!("unknown BrowseFlag {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseRequest {
    pub object_id: String,
    pub browse_flag: BrowseFlag,
    /// Accepted, not applied.
    pub filter: String,
    pub starting_index: u32,
    /// 0 means "everything from `starting_index` on".
    pub requested_count: u32,
    /// Accepted, not applied: results keep catalog order.
    pub sort_criteria: String,
}

impl BrowseRequest {
    pub fn direct_children(object_id: impl Into<String>, starting_index: u32, requested_count: u32) -> Self {
        Self {
            object_id: object_id.into(),
            browse_flag: BrowseFlag::BrowseDirectChildren,
            filter: "*".to_string(),
            starting_index,
            requested_count,
            sort_criteria: String::new(),
        }
    }

    pub fn metadata(object_id: impl Into<String>) -> Self {
        Self {
            browse_flag: BrowseFlag::BrowseMetadata,
            ..Self::direct_children(object_id, 0, 0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseResult {
    pub didl: String,
    pub number_returned: u32,
    pub total_matches: u32,
    pub update_id: u32,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BrowseError {
    #[error("no such object: {0}")]
    NoSuchObject(String),
    #[error("invalid args: {0}")]
    InvalidArgs(String),
}

/// Clip `[starting_index, starting_index + requested_count)` to `total`.
/// `requested_count == 0` means "to the end".
pub fn page_bounds(total: usize, starting_index: u32, requested_count: u32) -> (usize, usize) {
    let start = (starting_index as usize).min(total);
    let count = if requested_count == 0 {
        total
    } else {
        requested_count as usize
    };
    let end = start.saturating_add(count).min(total);
    (start, end)
}

/// Answer one Browse against `catalog`. The reported `update_id` is the catalog's
/// `system_update_id` as seen by this call; nothing is mutated.
pub fn browse(
    catalog: &Catalog,
    ctx: &DidlContext,
    req: &BrowseRequest,
) -> Result<BrowseResult, BrowseError> {
    let node = catalog
        .get(&req.object_id)
        .ok_or_else(|| BrowseError::NoSuchObject(req.object_id.clone()))?;
    let update_id = catalog.system_update_id();

    match req.browse_flag {
        BrowseFlag::BrowseMetadata => Ok(BrowseResult {
            didl: didl::render(&[node], ctx),
            number_returned: 1,
            total_matches: 1,
            update_id,
        }),
        BrowseFlag::BrowseDirectChildren => {
            let child_ids = node.child_ids();
            let (start, end) = page_bounds(child_ids.len(), req.starting_index, req.requested_count);

            let mut page: Vec<&CatalogNode> = Vec::with_capacity(end - start);
            for child in &child_ids[start..end] {
                match catalog.get(child) {
                    Some(n) => page.push(n),
                    None => tracing::error!("Container {} lists missing child {}", node.id, child),
                }
            }

            Ok(BrowseResult {
                didl: didl::render(&page, ctx),
                number_returned: u32::try_from(page.len()).unwrap_or(u32::MAX),
                total_matches: u32::try_from(child_ids.len()).unwrap_or(u32::MAX),
                update_id,
            })
        }
    }
}
