use crate::prelude::*;
use docgen_core::grouping::{base_name, DOCUMENT_EXTENSION};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A source document found on disk.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    /// File name without the `.md` extension.
    pub base_name: String,
    pub modified: SystemTime,
}

/// Recursively list every Markdown document under `root`.
///
/// A missing root yields an empty list. Hidden and git-ignored files are
/// included; order follows the directory walk. Symlinked files are listed,
/// symlinked directories are not descended into. Entries that cannot be read
/// are logged and skipped.
pub fn discover_documents(root: &Path) -> Result<Vec<Document>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut documents = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };

        let path = entry.path();
        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext == DOCUMENT_EXTENSION);
        if !is_markdown || path.is_dir() {
            continue;
        }

        // Follows symlinks, so a linked document reports its target's mtime.
        let modified = match std::fs::metadata(path).and_then(|metadata| metadata.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                continue;
            }
        };

        documents.push(Document {
            base_name: base_name(path),
            path: entry.into_path(),
            modified,
        });
    }

    log::debug!("Discovered {} documents under {}", documents.len(), root.display());
    Ok(documents)
}
