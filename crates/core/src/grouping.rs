use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Extension of every source document.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Suffixes that mark a document as a companion of another, in match order.
///
/// `foo-impl.md` and `foo-testing.md` are companions of `foo.md`.
pub const COMPANION_SUFFIXES: [&str; 7] = [
    "-impl",
    "-implementation",
    "-testing",
    "-test",
    "-examples",
    "-advanced",
    "-details",
];

/// A main document plus the companion documents merged into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// Base name shared by the group (file name without `.md`).
    pub base_name: String,
    /// The canonical document; its relative path decides the output path.
    pub main_file: PathBuf,
    /// Companions in [`COMPANION_SUFFIXES`] order.
    pub companion_files: Vec<PathBuf>,
}

impl FileGroup {
    /// A group made of a single document and no companions.
    pub fn singleton(path: impl Into<PathBuf>) -> Self {
        let main_file = path.into();
        Self {
            base_name: base_name(&main_file),
            main_file,
            companion_files: Vec::new(),
        }
    }
}

/// File name without the `.md` extension.
///
/// Files with another extension keep their full file name, so `notes.txt`
/// has the base name `notes.txt`.
pub fn base_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    file_name
        .strip_suffix(&format!(".{DOCUMENT_EXTENSION}"))
        .map(str::to_string)
        .unwrap_or(file_name)
}

/// Whether a base name ends with any companion suffix.
pub fn is_companion(base_name: &str) -> bool {
    COMPANION_SUFFIXES
        .iter()
        .any(|suffix| base_name.ends_with(suffix))
}

/// Group documents so every companion lands with its main file.
///
/// Companion-suffixed documents are never main files. A companion without a
/// matching main document is dropped. Matching is by base name only, so a
/// companion in another directory still joins the main file. When two
/// documents share a base name the first one in input order wins.
pub fn group_for_merge(files: &[PathBuf]) -> Vec<FileGroup> {
    let mut by_base_name: HashMap<String, &PathBuf> = HashMap::new();
    for file in files {
        by_base_name.entry(base_name(file)).or_insert(file);
    }

    let mut groups = Vec::new();
    let mut processed: HashSet<String> = HashSet::new();

    for file in files {
        let name = base_name(file);

        if processed.contains(&name) || is_companion(&name) {
            continue;
        }

        let mut companion_files = Vec::new();
        for suffix in COMPANION_SUFFIXES {
            let companion_name = format!("{name}{suffix}");
            if let Some(companion) = by_base_name.get(&companion_name) {
                companion_files.push((*companion).clone());
                processed.insert(companion_name);
            }
        }

        processed.insert(name.clone());
        groups.push(FileGroup {
            base_name: name,
            main_file: file.clone(),
            companion_files,
        });
    }

    groups
}

/// One singleton group per document, companions included.
pub fn group_without_merge(files: &[PathBuf]) -> Vec<FileGroup> {
    files.iter().cloned().map(FileGroup::singleton).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_base_name_strips_md_extension() {
        assert_eq!(base_name(Path::new("docs/llm/foo.md")), "foo");
        assert_eq!(base_name(Path::new("foo-impl.md")), "foo-impl");
    }

    #[test]
    fn test_base_name_keeps_other_extensions() {
        assert_eq!(base_name(Path::new("notes.txt")), "notes.txt");
    }

    #[test]
    fn test_is_companion() {
        assert!(is_companion("foo-impl"));
        assert!(is_companion("foo-details"));
        assert!(!is_companion("foo"));
        assert!(!is_companion("implementation-guide"));
    }

    #[test]
    fn test_main_with_two_companions() {
        let files = paths(&["docs/foo.md", "docs/foo-impl.md", "docs/foo-testing.md"]);
        let groups = group_for_merge(&files);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].base_name, "foo");
        assert_eq!(groups[0].main_file, PathBuf::from("docs/foo.md"));
        assert_eq!(
            groups[0].companion_files,
            paths(&["docs/foo-impl.md", "docs/foo-testing.md"])
        );
    }

    #[test]
    fn test_companions_follow_suffix_order_not_input_order() {
        let files = paths(&["foo-details.md", "foo-test.md", "foo.md", "foo-impl.md"]);
        let groups = group_for_merge(&files);

        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].companion_files,
            paths(&["foo-impl.md", "foo-test.md", "foo-details.md"])
        );
    }

    #[test]
    fn test_orphan_companion_is_dropped() {
        let files = paths(&["orphan-impl.md", "other.md"]);
        let groups = group_for_merge(&files);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].main_file, PathBuf::from("other.md"));
        assert!(groups
            .iter()
            .all(|g| !g.companion_files.contains(&PathBuf::from("orphan-impl.md"))));
    }

    #[test]
    fn test_companion_claimed_once() {
        let files = paths(&["foo.md", "foo-impl.md", "bar.md"]);
        let groups = group_for_merge(&files);

        let claims = groups
            .iter()
            .filter(|g| g.companion_files.contains(&PathBuf::from("foo-impl.md")))
            .count();
        assert_eq!(claims, 1);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_duplicate_base_name_first_wins() {
        let files = paths(&["a/foo.md", "b/foo.md"]);
        let groups = group_for_merge(&files);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].main_file, PathBuf::from("a/foo.md"));
    }

    #[test]
    fn test_duplicate_companion_first_wins() {
        let files = paths(&["foo.md", "a/foo-impl.md", "b/foo-impl.md"]);
        let groups = group_for_merge(&files);

        assert_eq!(groups[0].companion_files, paths(&["a/foo-impl.md"]));
    }

    #[test]
    fn test_regrouping_main_files_is_idempotent() {
        let files = paths(&["foo.md", "foo-impl.md", "bar.md", "baz-examples.md"]);
        let groups = group_for_merge(&files);

        let mains: Vec<PathBuf> = groups.iter().map(|g| g.main_file.clone()).collect();
        let regrouped = group_for_merge(&mains);

        assert_eq!(regrouped.len(), groups.len());
        for (group, again) in groups.iter().zip(&regrouped) {
            assert_eq!(group.main_file, again.main_file);
            assert!(again.companion_files.is_empty());
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(group_for_merge(&[]).is_empty());
    }

    #[test]
    fn test_group_without_merge_keeps_companions_as_groups() {
        let files = paths(&["foo.md", "foo-impl.md", "orphan-impl.md"]);
        let groups = group_without_merge(&files);

        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.companion_files.is_empty()));
        assert_eq!(groups[2].base_name, "orphan-impl");
    }
}
