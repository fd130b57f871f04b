//! formcheck rules
//!
//! Named validation rules and the registry that maps a rule name, as written in a
//! field's `validation` attribute, to its check and its error message.
//! Shared by the DOM-driven form loop and by the WASM binding.

pub mod builtin;
pub mod error;
pub mod pattern;
pub mod registry;
pub mod rule;

pub use builtin::ConfirmationTargets;
pub use error::RuleError;
pub use pattern::{build_anchored_pattern, test_pattern, AnchoredPattern};
pub use registry::RuleRegistry;
pub use rule::{Check, CheckFn, Rule};
