use std::time::SystemTime;

/// Decide whether a target must be regenerated from its source.
///
/// `target_modified` is `None` when the target does not exist. Only
/// modification times are compared; a touched but unchanged source is still
/// considered newer.
pub fn is_stale(
    source_modified: SystemTime,
    target_modified: Option<SystemTime>,
    force: bool,
) -> bool {
    if force {
        return true;
    }

    match target_modified {
        None => true,
        Some(target) => source_modified > target,
    }
}
