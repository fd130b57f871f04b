//! Rule lookup and construction errors

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RuleError {
    /// A field declared a rule name the registry does not know
    #[error("unknown validation rule '{0}'")]
    UnknownRule(String),

    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl RuleError {
    /// Rule name or pattern the error refers to
    pub fn subject(&self) -> &str {
        match self {
            RuleError::UnknownRule(name) => name,
            RuleError::InvalidPattern { pattern, .. } => pattern,
        }
    }
}
