//! formcheck
//!
//! Inline form validation. Form controls declare rule names in an attribute
//! (`validation="required email"`); a [`Form`] collects those controls, each
//! [`Field`] checks its value against the named rules, renders an error list right
//! after itself and marks its container. [`Validation`] ties a form to its submit
//! event and refuses submission while any field is invalid.
//!
//! Browser APIs sit behind the [`Dom`] trait. [`HeadlessDom`] is an in-memory
//! implementation; the `formcheck-wasm` crate provides the `web-sys` one.

pub mod config;
pub mod dom;
pub mod extension;
pub mod field;
pub mod form;
pub mod headless;
pub mod logging;

pub use config::{Config, LoggingConfig, RulesConfig, ValidationConfig};
pub use dom::{Dom, DomError, FieldEvent, Listener};
pub use extension::{Dispatch, SharedRegistry, Validation};
pub use field::{Field, FieldState};
pub use form::Form;
pub use headless::{HeadlessDom, NodeId};

pub use formcheck_rules::{Rule, RuleError, RuleRegistry};
