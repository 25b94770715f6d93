use std::collections::HashMap;
use std::path::PathBuf;

use crate::catalog::Catalog;

/// A scanned file backing one catalog item, used by `/media/{id}`.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Canonical absolute path.
    pub path: PathBuf,
    pub mime: &'static str,
    pub file_size: u64,
}

/// Output of a directory scan: the browsable tree plus the files behind its items.
#[derive(Debug, Default)]
pub struct MediaLibrary {
    pub catalog: Catalog,
    /// Keyed by catalog item id.
    pub files: HashMap<String, MediaFile>,
}

impl MediaLibrary {
    pub fn new(root_title: &str) -> Self {
        Self {
            catalog: Catalog::new(root_title),
            files: HashMap::new(),
        }
    }
}
