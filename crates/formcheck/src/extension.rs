// File: src/extension.rs
// Purpose: Binds a Form to its form element's submit lifecycle

use std::cell::RefCell;
use std::rc::Rc;

use formcheck_rules::RuleRegistry;

use crate::config::ValidationConfig;
use crate::dom::{Dom, Listener};
use crate::form::Form;

/// Registry shared by every form on a page
pub type SharedRegistry = Rc<RefCell<RuleRegistry>>;

/// What the page should do with the event that was just handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    /// Cancel the event's default action (the form submission)
    PreventDefault,
}

/// Validation installed on one form
pub struct Validation<D: Dom> {
    dom: D,
    form: Form<D::Element>,
    registry: SharedRegistry,
    config: ValidationConfig,
}

impl<D: Dom> Validation<D> {
    /// Scans `form_element` for fields and, unless disabled in `config`,
    /// starts intercepting its submit event
    pub fn apply(dom: D, form_element: D::Element, registry: SharedRegistry, config: ValidationConfig) -> Self {
        let form = Form::scan(&dom, form_element, &config);

        if config.intercept_submit {
            if let Err(err) = dom.listen(form.element(), Listener::Submit) {
                tracing::error!(error = %err, "failed to attach submit listener");
            }
        }

        Self {
            dom,
            form,
            registry,
            config,
        }
    }

    /// Validates every field and reports whether the form may be submitted
    ///
    /// Focus moves to the first invalid field.
    pub fn validate_now(&mut self) -> bool {
        {
            let registry = self.registry.borrow();
            self.form.validate(&self.dom, &registry, &self.config);
        }
        self.form.is_valid(&self.dom)
    }

    /// Runs the work behind a fired listener
    pub fn handle(&mut self, listener: Listener) -> Dispatch {
        match listener {
            Listener::Field { index, event } => {
                let registry = self.registry.borrow();
                match self.form.field_mut(index) {
                    Some(field) => {
                        tracing::trace!(field = index, event = ?event, "field event");
                        field.validate(&self.dom, &registry, &self.config);
                    }
                    None => tracing::warn!(field = index, "event for a field this form does not track"),
                }
                Dispatch::Continue
            }
            Listener::Submit => {
                if self.validate_now() {
                    Dispatch::Continue
                } else {
                    tracing::debug!("submission blocked by invalid fields");
                    Dispatch::PreventDefault
                }
            }
        }
    }

    pub fn form(&self) -> &Form<D::Element> {
        &self.form
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}
