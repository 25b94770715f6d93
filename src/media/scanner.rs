use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use uuid::Uuid;
use walkdir::{DirEntry, WalkDir};

use crate::catalog::{CatalogNode, Resource, ROOT_ID};
use crate::media::library::{MediaFile, MediaLibrary};
use crate::media::mime::classify;

/// Title of the root container published by a scanned library.
pub const ROOT_TITLE: &str = "Root";

/// Stable object id for a filesystem path: same path, same id, across restarts.
pub fn object_id(path: &Path) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, path.as_os_str().as_encoded_bytes()).to_string()
}

/// Scan every root into one catalog. Each root becomes a top-level container,
/// each subdirectory a container, each recognised media file an item.
/// Missing roots and unreadable entries are logged and skipped.
pub fn scan(paths: &[PathBuf]) -> MediaLibrary {
    let start = Instant::now();
    let mut library = MediaLibrary::new(ROOT_TITLE);

    for root in paths {
        if !root.exists() {
            tracing::warn!("Scan path does not exist, skipping: {}", root.display());
            continue;
        }
        scan_root(root, &mut library);
    }

    tracing::info!(
        "Scanned {} items in {} containers in {:.1}s",
        library.files.len(),
        library.catalog.len() - library.files.len() - 1,
        start.elapsed().as_secs_f64()
    );
    library
}

fn scan_root(root: &Path, library: &mut MediaLibrary) {
    // Walk path -> container id, so children can find their parent.
    let mut containers: HashMap<PathBuf, String> = HashMap::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Cannot access entry: {}", e);
                continue;
            }
        };

        let parent_id = if entry.depth() == 0 {
            ROOT_ID.to_string()
        } else {
            match entry.path().parent().and_then(|p| containers.get(p)) {
                Some(id) => id.clone(),
                // Parent directory was skipped; so is everything under it.
                None => continue,
            }
        };

        let canonical = match std::fs::canonicalize(entry.path()) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Cannot canonicalize {}: {}", entry.path().display(), e);
                continue;
            }
        };
        let id = object_id(&canonical);
        let title = entry.file_name().to_string_lossy().into_owned();

        if entry.file_type().is_dir() {
            let node = CatalogNode::container(id.clone(), parent_id, title);
            match library.catalog.insert(node) {
                Ok(()) => {
                    containers.insert(entry.path().to_path_buf(), id);
                }
                Err(e) => tracing::warn!("Skipping directory {}: {}", entry.path().display(), e),
            }
        } else if entry.file_type().is_file() {
            add_file(library, &canonical, id, parent_id);
        }
    }
}

fn add_file(library: &mut MediaLibrary, canonical: &Path, id: String, parent_id: String) {
    let Some(media_type) = classify(canonical) else {
        return;
    };
    let Some(upnp_class) = media_type.kind.upnp_class() else {
        tracing::debug!("Not publishing {}", canonical.display());
        return;
    };
    let file_size = match std::fs::metadata(canonical) {
        Ok(m) => m.len(),
        Err(e) => {
            tracing::warn!("Cannot stat {}: {}", canonical.display(), e);
            return;
        }
    };

    let title = canonical
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let resource = Resource::new(format!("/media/{id}"), media_type.mime).with_size(file_size);
    let node = CatalogNode::item(id.clone(), parent_id, title, upnp_class, resource);

    if let Err(e) = library.catalog.insert(node) {
        tracing::warn!("Skipping {}: {}", canonical.display(), e);
        return;
    }
    tracing::debug!("indexed {} -> {}", id, canonical.display());
    library.files.insert(
        id,
        MediaFile {
            path: canonical.to_path_buf(),
            mime: media_type.mime,
            file_size,
        },
    );
}

// Directories before files, then case-insensitive name.
fn sort_key(entry: &DirEntry) -> (bool, String) {
    (
        !entry.file_type().is_dir(),
        entry.file_name().to_string_lossy().to_lowercase(),
    )
}
