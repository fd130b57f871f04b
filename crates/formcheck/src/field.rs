// File: src/field.rs
// Purpose: One validated form control: its declared rules, state and listeners

use std::collections::BTreeSet;

use formcheck_rules::RuleRegistry;

use crate::config::ValidationConfig;
use crate::dom::{Dom, DomError, FieldEvent, Listener};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Never validated. Not valid, but nothing rendered either.
    Unvalidated,
    Valid,
    Invalid,
}

#[derive(Debug, Clone)]
pub struct Field<E> {
    index: usize,
    element: E,
    container: Option<E>,
    rules: Vec<String>,
    state: FieldState,
    messages: Vec<String>,
    listening: BTreeSet<FieldEvent>,
}

/// Splits a declaration like `"required  email"` into rule names, dropping
/// blanks and repeats
pub fn parse_rule_names(declaration: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in declaration.split_whitespace() {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

impl<E: Clone> Field<E> {
    pub fn new(index: usize, element: E, container: Option<E>, rules: Vec<String>) -> Self {
        Self {
            index,
            element,
            container,
            rules,
            state: FieldState::Unvalidated,
            messages: Vec::new(),
            listening: BTreeSet::new(),
        }
    }

    /// Builds a field from a control carrying the validation attribute.
    /// Controls without it, or with an empty one, are not fields.
    pub fn from_element<D>(dom: &D, index: usize, element: E, config: &ValidationConfig) -> Option<Self>
    where
        D: Dom<Element = E>,
    {
        let rules = parse_rule_names(&dom.attribute(&element, &config.attribute)?);
        if rules.is_empty() {
            return None;
        }
        let container = dom.container(&element);
        Some(Self::new(index, element, container, rules))
    }

    /// Position of this field within its form
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Result of the last `validate()`; false before the first one
    pub fn is_valid(&self) -> bool {
        self.state == FieldState::Valid
    }

    /// Messages rendered by the last `validate()`
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_listening(&self, event: FieldEvent) -> bool {
        self.listening.contains(&event)
    }

    /// Registers a listener for `event`. A kind already attached is left alone.
    pub fn attach<D>(&mut self, dom: &D, event: FieldEvent)
    where
        D: Dom<Element = E>,
    {
        if self.listening.contains(&event) {
            return;
        }
        match dom.listen(&self.element, self.listener(event)) {
            Ok(()) => {
                self.listening.insert(event);
            }
            Err(err) => {
                tracing::error!(field = self.index, event = ?event, error = %err, "failed to attach field listener")
            }
        }
    }

    pub fn detach<D>(&mut self, dom: &D, event: FieldEvent)
    where
        D: Dom<Element = E>,
    {
        if !self.listening.remove(&event) {
            return;
        }
        if let Err(err) = dom.unlisten(&self.element, self.listener(event)) {
            tracing::error!(field = self.index, event = ?event, error = %err, "failed to detach field listener");
        }
    }

    /// Checks the current value against every declared rule and re-renders
    /// the error display
    ///
    /// All failing rules are reported, in declaration order. A failing field
    /// also listens for keystrokes so it clears as soon as it is corrected; a
    /// passing field goes back to change events only.
    pub fn validate<D>(&mut self, dom: &D, registry: &RuleRegistry, config: &ValidationConfig) -> FieldState
    where
        D: Dom<Element = E>,
    {
        let value = dom.value(&self.element);
        let messages = self.failures(dom, registry, config, &value);

        self.report(
            "remove error list",
            dom.remove_error_list(&self.element, &config.error_list_class),
        );

        if messages.is_empty() {
            if let Some(container) = &self.container {
                self.report("remove error class", dom.remove_class(container, &config.error_class));
            }
            self.detach(dom, FieldEvent::Correction);
            self.state = FieldState::Valid;
        } else {
            if let Some(container) = &self.container {
                self.report("add error class", dom.add_class(container, &config.error_class));
            }
            self.attach(dom, FieldEvent::Correction);
            self.report(
                "insert error list",
                dom.insert_error_list(&self.element, &config.error_list_class, &messages),
            );
            self.state = FieldState::Invalid;
        }

        tracing::debug!(field = self.index, state = ?self.state, failures = messages.len(), "field validated");
        self.messages = messages;
        self.state
    }

    fn failures<D>(&self, dom: &D, registry: &RuleRegistry, config: &ValidationConfig, value: &str) -> Vec<String>
    where
        D: Dom<Element = E>,
    {
        self.rules
            .iter()
            .filter_map(|name| match registry.get_rule(name) {
                Ok(rule) => {
                    let sibling = rule.depends_on().and_then(|id| dom.value_by_id(id));
                    (!rule.check(value, sibling.as_deref())).then(|| rule.message().to_string())
                }
                Err(err) => {
                    // fail closed: an undeclared rule can never pass
                    tracing::warn!(field = self.index, error = %err, "field declares an unregistered rule");
                    Some(config.unknown_rule_message(name))
                }
            })
            .collect()
    }

    fn listener(&self, event: FieldEvent) -> Listener {
        Listener::Field {
            index: self.index,
            event,
        }
    }

    fn report(&self, action: &str, result: Result<(), DomError>) {
        if let Err(err) = result {
            tracing::error!(field = self.index, error = %err, "{}", action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rule_names() {
        assert_eq!(parse_rule_names("required email"), vec!["required", "email"]);
        assert_eq!(parse_rule_names("  required   email "), vec!["required", "email"]);
        assert_eq!(parse_rule_names("email required email"), vec!["email", "required"]);
        assert!(parse_rule_names("   ").is_empty());
    }

    #[test]
    fn test_new_field_is_unvalidated() {
        let field = Field::new(0, "input", Some("div"), vec!["required".to_string()]);
        assert_eq!(field.state(), FieldState::Unvalidated);
        assert!(!field.is_valid());
        assert!(field.messages().is_empty());
        assert!(!field.is_listening(FieldEvent::Change));
    }
}
