//! Built-in rule set

use once_cell::sync::Lazy;

use crate::pattern::{build_anchored_pattern, AnchoredPattern};
use crate::rule::{Check, Rule};

pub const REQUIRED: &str = "required";
pub const EMAIL: &str = "email";
pub const ZIP_CODE: &str = "zipCode";
pub const PASSWORD: &str = "password";
pub const PASSWORD_CONFIRMATION: &str = "passwordConfirmation";
pub const EMAIL_CONFIRMATION: &str = "emailConfirmation";

// at least one char, '@', at least one char, '.', at least one char
static EMAIL_PATTERN: Lazy<AnchoredPattern> =
    Lazy::new(|| build_anchored_pattern(r".+@.+\..+").expect("email pattern compiles"));

static ZIP_CODE_PATTERN: Lazy<AnchoredPattern> =
    Lazy::new(|| build_anchored_pattern("[0-9]{5}").expect("zip code pattern compiles"));

static PASSWORD_PATTERN: Lazy<AnchoredPattern> =
    Lazy::new(|| build_anchored_pattern(".{6,32}").expect("password pattern compiles"));

/// Element ids the confirmation rules compare against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationTargets {
    pub password: String,
    pub email: String,
}

impl Default for ConfirmationTargets {
    fn default() -> Self {
        Self {
            password: "password".to_string(),
            email: "email".to_string(),
        }
    }
}

/// The built-in rules, keyed by name
pub fn rules(targets: &ConfirmationTargets) -> Vec<(&'static str, Rule)> {
    vec![
        (REQUIRED, Rule::required("This field is required.")),
        (
            EMAIL,
            Rule::new(
                Check::Pattern(EMAIL_PATTERN.clone()),
                "Enter a valid e-mail address.",
            ),
        ),
        (
            ZIP_CODE,
            Rule::new(
                Check::Pattern(ZIP_CODE_PATTERN.clone()),
                "Provide a valid zip code (5 digit number)",
            ),
        ),
        (
            PASSWORD,
            Rule::new(
                Check::Pattern(PASSWORD_PATTERN.clone()),
                "Provide a valid password (6-32 characters long)",
            ),
        ),
        (
            PASSWORD_CONFIRMATION,
            Rule::matches_field(targets.password.clone(), "Please confirm your password"),
        ),
        (
            EMAIL_CONFIRMATION,
            Rule::matches_field(targets.email.clone(), "Please confirm your email"),
        ),
    ]
}
