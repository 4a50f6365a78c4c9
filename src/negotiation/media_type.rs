//! Header value helpers for media type lists.
//!
//! These are deliberately string-level: the canonical type must match byte for
//! byte, so no case folding or parameter normalization happens here.

/// Separator between a media type and its parameters.
const PARAMETER_DELIMITER: char = ';';

/// Media range accepted as "anything".
pub const WILDCARD: &str = "*/*";

/// Returns the media type without any parameters, trimmed.
pub fn essence(entry: &str) -> &str {
    entry
        .split(PARAMETER_DELIMITER)
        .next()
        .unwrap_or_default()
        .trim()
}

/// Returns true if the entry carries `;`-delimited parameters.
pub fn has_parameters(entry: &str) -> bool {
    entry.contains(PARAMETER_DELIMITER)
}

/// Splits a comma separated header value into trimmed, non-empty entries.
pub fn entries(header: &str) -> impl Iterator<Item = &str> {
    header
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_essence() {
        assert_eq!(essence("application/vnd.api+json"), "application/vnd.api+json");
        assert_eq!(essence(" text/html ; q=0.9"), "text/html");
        assert_eq!(essence("*/*;q=0.1"), WILDCARD);
        assert_eq!(essence(""), "");
    }

    #[test]
    fn test_has_parameters() {
        assert!(has_parameters("application/vnd.api+json; ext=bulk"));
        assert!(!has_parameters("application/vnd.api+json"));
    }

    #[test]
    fn test_entries() {
        let list: Vec<_> = entries("application/vnd.api+json,  application/json ,,").collect();
        assert_eq!(list, vec!["application/vnd.api+json", "application/json"]);
        assert_eq!(entries("   ").count(), 0);
    }
}
