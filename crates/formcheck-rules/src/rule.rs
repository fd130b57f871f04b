//! Validation rule: a check plus the message shown when it fails

use std::fmt;
use std::sync::Arc;

use crate::pattern::{build_anchored_pattern, test_pattern, AnchoredPattern};
use crate::RuleError;

/// Boxed predicate for rules registered from code
pub type CheckFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// What a rule checks
#[derive(Clone)]
pub enum Check {
    /// Value must be non-empty
    Required,
    /// Value must fully match the pattern
    Pattern(AnchoredPattern),
    /// Value must equal the current value of another field, looked up by element id.
    /// The caller resolves the sibling and hands its value to [`Rule::check`].
    MatchesField { field_id: String },
    Custom(CheckFn),
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Required => f.write_str("Required"),
            Check::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.fragment()).finish(),
            Check::MatchesField { field_id } => f
                .debug_struct("MatchesField")
                .field("field_id", field_id)
                .finish(),
            Check::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    check: Check,
    message: String,
}

impl Rule {
    pub fn new(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(Check::Required, message)
    }

    /// Rule matching the whole value against a pattern fragment
    pub fn pattern(fragment: &str, message: impl Into<String>) -> Result<Self, RuleError> {
        Ok(Self::new(Check::Pattern(build_anchored_pattern(fragment)?), message))
    }

    /// Rule requiring the value to equal the field with id `field_id`
    pub fn matches_field(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            Check::MatchesField {
                field_id: field_id.into(),
            },
            message,
        )
    }

    pub fn custom<F>(check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(Check::Custom(Arc::new(check)), message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &Check {
        &self.check
    }

    /// Element id of the sibling field this rule reads, if any
    pub fn depends_on(&self) -> Option<&str> {
        match &self.check {
            Check::MatchesField { field_id } => Some(field_id),
            _ => None,
        }
    }

    /// Runs the check against `value`
    ///
    /// Every rule except [`Check::Required`] passes on an empty value.
    /// `sibling` is the current value of the field named by [`Rule::depends_on`];
    /// `None` (sibling missing from the page) compares as empty.
    pub fn check(&self, value: &str, sibling: Option<&str>) -> bool {
        match &self.check {
            Check::Required => !value.is_empty(),
            _ if value.is_empty() => true,
            Check::Pattern(pattern) => test_pattern(value, pattern),
            Check::MatchesField { .. } => value == sibling.unwrap_or_default(),
            Check::Custom(check) => check(value),
        }
    }
}
