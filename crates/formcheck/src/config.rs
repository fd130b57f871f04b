// File: src/config.rs
// Purpose: Validation settings, read from formcheck.toml or a JS options object

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use formcheck_rules::{ConfirmationTargets, RuleRegistry};

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How fields are discovered and how errors are rendered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    /// Attribute holding the space-separated rule names (default: "validation")
    #[serde(default = "default_attribute")]
    pub attribute: String,

    /// Class put on a field's container while the field is invalid
    #[serde(default = "default_error_class", alias = "errorClass")]
    pub error_class: String,

    /// Class of the generated error list element
    #[serde(default = "default_error_list_class", alias = "errorListClass")]
    pub error_list_class: String,

    /// Message shown for a declared rule the registry doesn't know.
    /// `{rule}` is replaced with the rule name.
    #[serde(default = "default_unknown_rule_message", alias = "unknownRuleMessage")]
    pub unknown_rule_message: String,

    /// Whether to hook the form's submit event
    #[serde(default = "default_true", alias = "interceptSubmit")]
    pub intercept_submit: bool,
}

/// How the built-in registry is built. These settings are baked into the
/// rules themselves, so they apply when the registry is created, not when a
/// form is bound to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RulesConfig {
    /// Element id read by the `passwordConfirmation` rule
    #[serde(default = "default_password_field", alias = "passwordField")]
    pub password_field: String,

    /// Element id read by the `emailConfirmation` rule
    #[serde(default = "default_email_field", alias = "emailField")]
    pub email_field: String,
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset (e.g. "info", "formcheck=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_attribute() -> String {
    "validation".to_string()
}

fn default_error_class() -> String {
    "error".to_string()
}

fn default_error_list_class() -> String {
    "errorList".to_string()
}

fn default_password_field() -> String {
    "password".to_string()
}

fn default_email_field() -> String {
    "email".to_string()
}

fn default_unknown_rule_message() -> String {
    "Unknown validation rule: {rule}".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            attribute: default_attribute(),
            error_class: default_error_class(),
            error_list_class: default_error_list_class(),
            unknown_rule_message: default_unknown_rule_message(),
            intercept_submit: true,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            password_field: default_password_field(),
            email_field: default_email_field(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl RulesConfig {
    /// Element ids the built-in confirmation rules compare against
    pub fn confirmation_targets(&self) -> ConfirmationTargets {
        ConfirmationTargets {
            password: self.password_field.clone(),
            email: self.email_field.clone(),
        }
    }

    /// A fresh registry holding the built-in rules
    pub fn registry(&self) -> RuleRegistry {
        RuleRegistry::with_builtin_rules_for(&self.confirmation_targets())
    }
}

impl ValidationConfig {
    pub fn unknown_rule_message(&self, rule: &str) -> String {
        self.unknown_rule_message.replace("{rule}", rule)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./formcheck.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formcheck.toml")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }
}
