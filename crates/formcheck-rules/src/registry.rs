//! Rule registry
//!
//! Maps rule names to rules. One registry is created per page (or per test) and
//! handed to every form that validates against it.

use std::collections::BTreeMap;

use crate::builtin::{self, ConfirmationTargets};
use crate::rule::Rule;
use crate::RuleError;

#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Rule>,
}

impl RuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in rules, with confirmation rules reading the
    /// `password` and `email` fields
    pub fn with_builtin_rules() -> Self {
        Self::with_builtin_rules_for(&ConfirmationTargets::default())
    }

    /// Registry holding the built-in rules, with confirmation rules reading the
    /// given element ids
    pub fn with_builtin_rules_for(targets: &ConfirmationTargets) -> Self {
        let mut registry = Self::new();
        for (name, rule) in builtin::rules(targets) {
            registry.add_rule(name, rule);
        }
        registry
    }

    /// Stores `rule` under `name`, replacing any rule already registered there
    pub fn add_rule(&mut self, name: impl Into<String>, rule: Rule) {
        let name = name.into();
        tracing::debug!(rule = %name, check = ?rule.kind(), "registering validation rule");
        if self.rules.insert(name.clone(), rule).is_some() {
            tracing::debug!(rule = %name, "replaced existing validation rule");
        }
    }

    /// Looks up a rule by name
    pub fn get_rule(&self, name: &str) -> Result<&Rule, RuleError> {
        self.rules
            .get(name)
            .ok_or_else(|| RuleError::UnknownRule(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_names() {
        let registry = RuleRegistry::with_builtin_rules();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "email",
                "emailConfirmation",
                "password",
                "passwordConfirmation",
                "required",
                "zipCode",
            ]
        );
    }

    #[test]
    fn test_unknown_rule_lookup() {
        let registry = RuleRegistry::with_builtin_rules();
        let err = registry.get_rule("phone").unwrap_err();
        assert!(matches!(err, RuleError::UnknownRule(ref name) if name == "phone"));
        assert_eq!(err.to_string(), "unknown validation rule 'phone'");
    }

    #[test]
    fn test_add_rule_overwrites() {
        let mut registry = RuleRegistry::with_builtin_rules();
        let before = registry.len();
        registry.add_rule("required", Rule::required("Fill this in"));

        assert_eq!(registry.len(), before);
        assert_eq!(registry.get_rule("required").unwrap().message(), "Fill this in");
    }

    #[test]
    fn test_custom_confirmation_targets() {
        let targets = ConfirmationTargets {
            password: "new-password".to_string(),
            email: "contact-email".to_string(),
        };
        let registry = RuleRegistry::with_builtin_rules_for(&targets);

        let rule = registry.get_rule("passwordConfirmation").unwrap();
        assert_eq!(rule.depends_on(), Some("new-password"));
        let rule = registry.get_rule("emailConfirmation").unwrap();
        assert_eq!(rule.depends_on(), Some("contact-email"));
    }
}
