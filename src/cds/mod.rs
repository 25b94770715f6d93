//! ContentDirectory:1 service.

pub mod browse;
pub mod didl;

use std::sync::{Arc, RwLock};

use crate::catalog::Catalog;
use crate::soap::{SoapAction, SoapError};
use browse::{BrowseError, BrowseFlag, BrowseRequest};
use didl::DidlContext;

/// Everything a ContentDirectory action needs: the shared catalog and the
/// serializer context (host address and port).
#[derive(Clone)]
pub struct ContentDirectory {
    pub catalog: Arc<RwLock<Catalog>>,
    pub didl: DidlContext,
}

impl ContentDirectory {
    pub fn new(catalog: Arc<RwLock<Catalog>>, didl: DidlContext) -> Self {
        Self { catalog, didl }
    }

    /// Run one action, returning the response arguments in declaration order.
    pub fn handle(&self, action: &SoapAction) -> Result<Vec<(&'static str, String)>, SoapError> {
        match action.name.as_str() {
            "Browse" => self.handle_browse(action),
            "GetSystemUpdateID" => Ok(vec![("Id", self.system_update_id()?.to_string())]),
            "GetSearchCapabilities" => Ok(vec![("SearchCaps", self.search_capabilities())]),
            "GetSortCapabilities" => Ok(vec![("SortCaps", self.sort_capabilities())]),
            other => {
                tracing::warn!("Unknown CDS action: {}", other);
                Err(SoapError::UnsupportedAction(other.to_string()))
            }
        }
    }

    pub fn system_update_id(&self) -> Result<u32, SoapError> {
        let catalog = self.read_catalog()?;
        Ok(catalog.system_update_id())
    }

    /// Empty: search is unsupported.
    pub fn search_capabilities(&self) -> String {
        String::new()
    }

    /// Empty: sorting is unsupported.
    pub fn sort_capabilities(&self) -> String {
        String::new()
    }

    fn handle_browse(&self, action: &SoapAction) -> Result<Vec<(&'static str, String)>, SoapError> {
        let req = parse_browse_request(action)?;
        tracing::debug!(
            "Browse {} {} start={} count={}",
            req.object_id,
            req.browse_flag.as_str(),
            req.starting_index,
            req.requested_count
        );

        let result = {
            let catalog = self.read_catalog()?;
            browse::browse(&catalog, &self.didl, &req)?
        };

        Ok(vec![
            ("Result", result.didl),
            ("NumberReturned", result.number_returned.to_string()),
            ("TotalMatches", result.total_matches.to_string()),
            ("UpdateID", result.update_id.to_string()),
        ])
    }

    fn read_catalog(&self) -> Result<std::sync::RwLockReadGuard<'_, Catalog>, SoapError> {
        self.catalog
            .read()
            .map_err(|_| SoapError::Internal("catalog lock poisoned".to_string()))
    }
}

/// Build a [`BrowseRequest`] from action arguments, applying the standard defaults
/// for anything missing or empty.
pub fn parse_browse_request(action: &SoapAction) -> Result<BrowseRequest, BrowseError> {
    let browse_flag = action
        .arg("BrowseFlag")
        .unwrap_or(BrowseFlag::BrowseDirectChildren.as_str())
        .parse()?;

    Ok(BrowseRequest {
        object_id: action.arg("ObjectID").unwrap_or("0").to_string(),
        browse_flag,
        filter: action.arg("Filter").unwrap_or("*").to_string(),
        starting_index: parse_u32(action, "StartingIndex")?,
        requested_count: parse_u32(action, "RequestedCount")?,
        sort_criteria: action.arg("SortCriteria").unwrap_or_default().to_string(),
    })
}

fn parse_u32(action: &SoapAction, name: &str) -> Result<u32, BrowseError> {
    match action.arg(name) {
        None | Some("") => Ok(0),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BrowseError::InvalidArgs(format!("{name} must be a ui4, got {raw:?}"))),
    }
}
