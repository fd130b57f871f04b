// File: src/form.rs
// Purpose: The set of validated fields inside one form element

use formcheck_rules::RuleRegistry;

use crate::config::ValidationConfig;
use crate::dom::{Dom, FieldEvent};
use crate::field::Field;

/// Fields of one form, in document order
///
/// Discovery happens once, in [`Form::scan`]. Controls added to the form
/// afterwards are not validated.
#[derive(Debug, Clone)]
pub struct Form<E> {
    element: E,
    fields: Vec<Field<E>>,
}

impl<E: Clone> Form<E> {
    /// Collects every control of `element` that declares rules and starts
    /// listening for its change events
    pub fn scan<D>(dom: &D, element: E, config: &ValidationConfig) -> Self
    where
        D: Dom<Element = E>,
    {
        let mut fields = Vec::new();
        for control in dom.controls(&element) {
            if let Some(mut field) = Field::from_element(dom, fields.len(), control, config) {
                field.attach(dom, FieldEvent::Change);
                fields.push(field);
            }
        }
        tracing::debug!(fields = fields.len(), "form scanned");

        Self { element, fields }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn fields(&self) -> &[Field<E>] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Field<E>> {
        self.fields.get(index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut Field<E>> {
        self.fields.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates every field, in order, without stopping at the first failure
    pub fn validate<D>(&mut self, dom: &D, registry: &RuleRegistry, config: &ValidationConfig)
    where
        D: Dom<Element = E>,
    {
        for field in &mut self.fields {
            field.validate(dom, registry, config);
        }
    }

    /// True when every field passed its last validation
    ///
    /// Moves focus to the first field that did not.
    pub fn is_valid<D>(&self, dom: &D) -> bool
    where
        D: Dom<Element = E>,
    {
        match self.fields.iter().find(|field| !field.is_valid()) {
            Some(field) => {
                if let Err(err) = dom.focus(field.element()) {
                    tracing::error!(field = field.index(), error = %err, "failed to focus invalid field");
                }
                false
            }
            None => true,
        }
    }
}
