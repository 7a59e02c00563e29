use std::path::PathBuf;

/// The work set a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Only the files recorded as failed by the previous run, unconditionally.
    RetryFailed,
    /// One explicit file relative to the source root, unconditionally.
    SingleFile(PathBuf),
    /// Every discovered document whose target is stale.
    FullScan,
}

impl SelectionMode {
    /// Resolve the mode from CLI flags. Retry wins over a single file, which
    /// wins over a full scan.
    pub fn from_flags(retry_failed: bool, file: Option<PathBuf>) -> Self {
        match (retry_failed, file) {
            (true, _) => SelectionMode::RetryFailed,
            (false, Some(file)) => SelectionMode::SingleFile(file),
            (false, None) => SelectionMode::FullScan,
        }
    }

    /// Whether staleness checks apply to this mode.
    pub fn checks_staleness(&self) -> bool {
        matches!(self, SelectionMode::FullScan)
    }
}
