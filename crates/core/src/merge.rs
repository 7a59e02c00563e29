/// Separator placed between the main document and each companion.
pub const MERGE_SEPARATOR: &str = "\n\n---\n\n";

/// A companion document ready to be merged.
#[derive(Debug, Clone)]
pub struct Companion {
    /// Base name of the companion file (file name without `.md`).
    pub base_name: String,
    /// Full text content of the companion.
    pub content: String,
}

/// Attribution comment naming the file a merged block came from.
pub fn attribution(base_name: &str) -> String {
    format!("<!-- Merged from: {base_name}.md -->\n\n")
}

/// Append every companion to the main content, in the order supplied.
///
/// Each companion block is a separator, an attribution comment, and the
/// companion's full content. Nothing is deduplicated.
pub fn merge_content(main: &str, companions: &[Companion]) -> String {
    let mut content = main.to_string();

    for companion in companions {
        content.push_str(MERGE_SEPARATOR);
        content.push_str(&attribution(&companion.base_name));
        content.push_str(&companion.content);
    }

    content
}
