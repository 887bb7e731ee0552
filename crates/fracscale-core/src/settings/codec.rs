//! Encoding of string lists in the GSettings text format.
//!
//! `gsettings` prints `as` values as `['a', 'b']` and an empty list as the
//! typed literal `@as []`. Swapping the quote characters turns that into a
//! JSON string array, and back.

use super::errors::SettingsError;

/// Typed empty-array literal printed by `gsettings get` for an empty `as`.
pub const EMPTY_LIST_SENTINEL: &str = "@as []";

/// Plain empty list literal.
pub const EMPTY_LIST: &str = "[]";

/// Replace the typed empty-array literal with `[]`.
pub fn normalize_empty_sentinel(raw: &str) -> &str {
    if raw.trim() == EMPTY_LIST_SENTINEL {
        EMPTY_LIST
    } else {
        raw
    }
}

/// Parse `['a', 'b']` into its string elements, in order.
pub fn decode_feature_list(raw: &str) -> Result<Vec<String>, SettingsError> {
    let normalized = normalize_empty_sentinel(raw).replace('\'', "\"");
    serde_json::from_str(&normalized).map_err(|e| SettingsError::ParseFailed {
        value: raw.to_string(),
        message: e.to_string(),
    })
}

/// Render elements as a single-quoted list literal accepted by `gsettings set`.
pub fn encode_feature_list<S: AsRef<str>>(features: &[S]) -> String {
    let items: Vec<&str> = features.iter().map(AsRef::as_ref).collect();
    // Serializing a slice of &str cannot fail.
    serde_json::to_string(&items)
        .unwrap_or_else(|_| EMPTY_LIST.to_string())
        .replace('"', "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gsettings_output() {
        let features =
            decode_feature_list("['scale-monitor-framebuffer', 'x11-randr-fractional-scaling']")
                .unwrap();
        assert_eq!(
            features,
            vec!["scale-monitor-framebuffer", "x11-randr-fractional-scaling"]
        );
    }

    #[test]
    fn test_decode_empty_sentinel() {
        assert!(decode_feature_list("@as []").unwrap().is_empty());
        assert!(decode_feature_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_normalize_only_touches_sentinel() {
        assert_eq!(normalize_empty_sentinel("@as []"), "[]");
        assert_eq!(normalize_empty_sentinel("['a']"), "['a']");
    }

    #[test]
    fn test_decode_malformed() {
        let err = decode_feature_list("['unterminated'").unwrap_err();
        match err {
            SettingsError::ParseFailed { value, .. } => assert_eq!(value, "['unterminated'"),
            other => panic!("expected ParseFailed, got: {}", other),
        }
        assert!(decode_feature_list("'not-a-list'").is_err());
        assert!(decode_feature_list("[1, 2]").is_err());
    }

    #[test]
    fn test_encode_uses_single_quotes() {
        assert_eq!(
            encode_feature_list(&["x11-randr-fractional-scaling"]),
            "['x11-randr-fractional-scaling']"
        );
        assert_eq!(encode_feature_list::<&str>(&[]), "[]");
    }

    #[test]
    fn test_encoded_value_decodes_to_same_members() {
        let original = "['kms-modifiers', 'x11-randr-fractional-scaling']";
        let decoded = decode_feature_list(original).unwrap();
        let encoded = encode_feature_list(&decoded);
        assert_eq!(decode_feature_list(&encoded).unwrap(), decoded);
    }
}
