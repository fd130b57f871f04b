//! Anchored pattern helpers
//!
//! Rule patterns are written as fragments (`[0-9]{5}`) and always matched
//! against the whole value, so `123456` never passes a five digit check.

use regex::Regex;

use crate::RuleError;

/// A compiled pattern that only accepts full-value matches
#[derive(Debug, Clone)]
pub struct AnchoredPattern {
    fragment: String,
    regex: Regex,
}

impl AnchoredPattern {
    /// The fragment this pattern was built from, without anchors
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Wraps a regular-expression fragment with start and end anchors
///
/// The fragment is grouped before anchoring so alternations such as `a|b`
/// stay anchored on both sides.
///
/// # Examples
/// ```
/// use formcheck_rules::{build_anchored_pattern, test_pattern};
///
/// let zip = build_anchored_pattern("[0-9]{5}").unwrap();
/// assert!(test_pattern("12345", &zip));
/// assert!(!test_pattern("123456", &zip));
/// ```
pub fn build_anchored_pattern(fragment: &str) -> Result<AnchoredPattern, RuleError> {
    let regex = Regex::new(&format!("^(?:{})$", fragment)).map_err(|source| {
        RuleError::InvalidPattern {
            pattern: fragment.to_string(),
            source,
        }
    })?;

    Ok(AnchoredPattern {
        fragment: fragment.to_string(),
        regex,
    })
}

/// Tests a value against an anchored pattern
pub fn test_pattern(value: &str, pattern: &AnchoredPattern) -> bool {
    pattern.regex.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_partial_matches() {
        let digits = build_anchored_pattern("[0-9]+").unwrap();
        assert!(test_pattern("2024", &digits));
        assert!(!test_pattern("x2024", &digits));
        assert!(!test_pattern("2024x", &digits));
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let pattern = build_anchored_pattern("cat|dog").unwrap();
        assert!(test_pattern("dog", &pattern));
        assert!(!test_pattern("hotdog", &pattern));
        assert!(!test_pattern("category", &pattern));
    }

    #[test]
    fn test_keeps_fragment() {
        let pattern = build_anchored_pattern(".{6,32}").unwrap();
        assert_eq!(pattern.fragment(), ".{6,32}");
        assert_eq!(pattern.as_str(), "^(?:.{6,32})$");
    }

    #[test]
    fn test_invalid_fragment() {
        let err = build_anchored_pattern("[0-9").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
        assert_eq!(err.subject(), "[0-9");
    }
}
