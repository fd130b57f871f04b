//! DOM collaborator
//!
//! Everything the validation loop needs from a page: enumerating a form's
//! controls, reading attributes and values, registering listeners, rendering the
//! error list and toggling the container's error class. Event dispatch runs the
//! other way: the implementation calls [`crate::Validation::handle`] with the
//! [`Listener`] it was given when a registered event fires.

use thiserror::Error;

/// Field-level events that trigger re-validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldEvent {
    /// Value committed (blur after edit, select change)
    Change,
    /// Keystroke while the user corrects a failing field
    Correction,
}

impl FieldEvent {
    /// Name of the DOM event this maps to
    pub fn dom_event(self) -> &'static str {
        match self {
            FieldEvent::Change => "change",
            FieldEvent::Correction => "keyup",
        }
    }
}

/// A listener registration, handed back to the validation controller on dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Listener {
    Field { index: usize, event: FieldEvent },
    Submit,
}

impl Listener {
    pub fn dom_event(self) -> &'static str {
        match self {
            Listener::Field { event, .. } => event.dom_event(),
            Listener::Submit => "submit",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum DomError {
    #[error("failed to create <{0}> element")]
    CreateElement(&'static str),

    #[error("{operation} failed: {message}")]
    Operation {
        operation: &'static str,
        message: String,
    },

    #[error("element is detached from the document")]
    Detached,
}

impl DomError {
    pub fn operation(operation: &'static str, message: impl Into<String>) -> Self {
        DomError::Operation {
            operation,
            message: message.into(),
        }
    }
}

/// Page operations used by fields and forms
pub trait Dom {
    /// Handle to an element. Cheap to clone.
    type Element: Clone;

    /// The form's controls in document order
    fn controls(&self, form: &Self::Element) -> Vec<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Current value of a control; empty when it has none
    fn value(&self, element: &Self::Element) -> String;

    /// Current value of the control with the given element id
    fn value_by_id(&self, id: &str) -> Option<String>;

    /// Element that receives the error class (the control's parent)
    fn container(&self, element: &Self::Element) -> Option<Self::Element>;

    fn listen(&self, target: &Self::Element, listener: Listener) -> Result<(), DomError>;

    fn unlisten(&self, target: &Self::Element, listener: Listener) -> Result<(), DomError>;

    /// Inserts a list with one item per message directly after `element`
    fn insert_error_list(
        &self,
        element: &Self::Element,
        class: &str,
        messages: &[String],
    ) -> Result<(), DomError>;

    /// Removes the error list directly after `element`, if there is one
    fn remove_error_list(&self, element: &Self::Element, class: &str) -> Result<(), DomError>;

    fn add_class(&self, element: &Self::Element, class: &str) -> Result<(), DomError>;

    fn remove_class(&self, element: &Self::Element, class: &str) -> Result<(), DomError>;

    fn focus(&self, element: &Self::Element) -> Result<(), DomError>;
}
