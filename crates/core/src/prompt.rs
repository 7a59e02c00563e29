/// Placeholder replaced with the source content.
pub const CONTENT_PLACEHOLDER: &str = "{{CONTENT}}";

/// Template used when no prompt file is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../prompts/generate.txt");

/// Sampling temperature for documentation generation.
pub const GENERATION_TEMPERATURE: f32 = 0.3;

/// Output budget for documentation generation.
pub const GENERATION_MAX_TOKENS: u32 = 16384;

/// Build a generation prompt by substituting content into the template.
///
/// Only the first placeholder is replaced. A template without a placeholder
/// is returned unchanged.
pub fn build_prompt(template: &str, content: &str) -> String {
    template.replacen(CONTENT_PLACEHOLDER, content, 1)
}
