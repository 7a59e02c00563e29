use docgen_core::regen::is_stale;
use std::path::Path;
use std::time::SystemTime;

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Whether `target` must be regenerated from `source`.
///
/// True when forced, when the target is missing, or when the source was
/// modified strictly after the target. A source whose mtime cannot be read is
/// treated as stale so the generation attempt reports the real error.
pub fn needs_regeneration(source: &Path, target: &Path, force: bool) -> bool {
    if force {
        return true;
    }

    let Some(source_modified) = modified(source) else {
        log::warn!("Cannot read mtime of {}", source.display());
        return true;
    };

    is_stale(source_modified, modified(target), force)
}
