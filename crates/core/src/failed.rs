use serde::{Deserialize, Serialize};

/// A file whose generation failed in the last run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedFileRecord {
    /// Path of the main file relative to the source root.
    pub relative_path: String,
    /// Error message reported for the attempt.
    pub error: String,
    /// RFC 3339 time of the failure.
    pub timestamp: String,
}

/// Parse the side-file contents.
///
/// Anything that is not a JSON array of records yields an empty list, so a
/// corrupt file reads as "no history".
pub fn parse_records(content: &str) -> Vec<FailedFileRecord> {
    serde_json::from_str(content).unwrap_or_default()
}

/// Serialize records as pretty-printed JSON with two-space indentation.
pub fn serialize_records(records: &[FailedFileRecord]) -> Result<String, String> {
    serde_json::to_string_pretty(records).map_err(|e| format!("Failed to serialize records: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str) -> FailedFileRecord {
        FailedFileRecord {
            relative_path: path.to_string(),
            error: "Claude API error: 500 - boom".to_string(),
            timestamp: "2025-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_parse_camel_case_fields() {
        let json = r#"[{
            "relativePath": "policies/security.md",
            "error": "nope",
            "timestamp": "2025-01-01T00:00:00Z"
        }]"#;
        let records = parse_records(json);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].relative_path, "policies/security.md");
        assert_eq!(records[0].error, "nope");
    }

    #[test]
    fn test_parse_malformed_is_empty() {
        assert!(parse_records("{not json").is_empty());
        assert!(parse_records("").is_empty());
        assert!(parse_records(r#"{"relativePath":"a.md"}"#).is_empty());
    }

    #[test]
    fn test_serialize_uses_camel_case_and_indent() {
        let json = serialize_records(&[record("a.md")]).unwrap();

        assert!(json.starts_with("[\n  {"));
        assert!(json.contains(r#""relativePath": "a.md""#));
        assert!(!json.contains("relative_path"));
    }

    #[test]
    fn test_serialized_records_parse_back() {
        let records = vec![record("a.md"), record("nested/b.md")];
        let json = serialize_records(&records).unwrap();
        assert_eq!(parse_records(&json), records);
    }
}
