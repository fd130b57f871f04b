//! formcheck WASM
//!
//! Browser bindings for formcheck. Installs inline validation on a form:
//! fields declaring `validation="..."` are checked on change, failing fields
//! get an error list and re-check on every keystroke, and submission is blocked
//! until every field passes.
//!
//! # Example (JavaScript)
//! ```javascript
//! import init, { applyValidation, RuleSet } from './formcheck_wasm.js';
//!
//! await init();
//! const validation = applyValidation(document.getElementById('myForm'));
//! document.getElementById('send').addEventListener('click', () => {
//!     if (validation.validateNow()) { sendForm(); }
//! });
//!
//! // Extra rules shared by several forms
//! const rules = new RuleSet();
//! rules.addPatternRule('phone', '[0-9]{3}-[0-9]{4}', 'Use the 555-0100 format');
//! rules.applyTo(document.getElementById('contact'), { errorClass: 'has-error' });
//! ```

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use formcheck::{Dom, RulesConfig, SharedRegistry, Validation, ValidationConfig};
use formcheck_rules::Rule;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlFormElement};

pub mod logging;
pub mod web_dom;

pub use web_dom::WebDom;

/// Set panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    logging::init(level);
}

/// A failing rule message, as returned to JavaScript
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

fn js_error(message: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(message.as_ref()).into()
}

/// Reads one settings group out of a JS options object. Keys belonging to
/// other groups are ignored.
fn parse_options<T>(options: &JsValue) -> Result<T, JsValue>
where
    T: Default + serde::de::DeserializeOwned,
{
    if options.is_undefined() || options.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(options.clone())
        .map_err(|e| js_error(format!("Failed to parse options: {}", e)))
}

/// Registry options that `applyTo` cannot honour, since the rule set's
/// registry already exists
#[derive(Deserialize, Default)]
struct RegistryOverrides {
    #[serde(default, alias = "passwordField")]
    password_field: Option<String>,
    #[serde(default, alias = "emailField")]
    email_field: Option<String>,
}

fn shared_registry(rules: &RulesConfig) -> SharedRegistry {
    Rc::new(RefCell::new(rules.registry()))
}

/// Rules shared by any number of forms
#[wasm_bindgen]
pub struct RuleSet {
    registry: SharedRegistry,
}

#[wasm_bindgen]
impl RuleSet {
    /// Built-in rules. `options` may set `passwordField` / `emailField`, the
    /// element ids the confirmation rules compare against.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<RuleSet, JsValue> {
        let rules: RulesConfig = parse_options(&options)?;
        Ok(Self {
            registry: shared_registry(&rules),
        })
    }

    /// Registers (or replaces) a rule matching the whole value against `pattern`
    #[wasm_bindgen(js_name = addPatternRule)]
    pub fn add_pattern_rule(&self, name: &str, pattern: &str, message: &str) -> Result<(), JsValue> {
        let rule = Rule::pattern(pattern, message).map_err(|e| js_error(e.to_string()))?;
        self.registry.borrow_mut().add_rule(name, rule);
        Ok(())
    }

    /// Registers (or replaces) a rule requiring the value to equal the field with id `fieldId`
    #[wasm_bindgen(js_name = addMatchRule)]
    pub fn add_match_rule(&self, name: &str, field_id: &str, message: &str) {
        self.registry
            .borrow_mut()
            .add_rule(name, Rule::matches_field(field_id, message));
    }

    #[wasm_bindgen(js_name = hasRule)]
    pub fn has_rule(&self, name: &str) -> bool {
        self.registry.borrow().contains(name)
    }

    #[wasm_bindgen(js_name = ruleNames)]
    pub fn rule_names(&self) -> Result<JsValue, JsValue> {
        let names: Vec<String> = self.registry.borrow().names().map(str::to_string).collect();
        Ok(serde_wasm_bindgen::to_value(&names)?)
    }

    /// Runs one rule against a value. `sibling` is the compared value for
    /// confirmation rules.
    pub fn check(&self, name: &str, value: &str, sibling: Option<String>) -> Result<bool, JsValue> {
        let registry = self.registry.borrow();
        let rule = registry.get_rule(name).map_err(|e| js_error(e.to_string()))?;
        Ok(rule.check(value, sibling.as_deref()))
    }

    /// Installs validation on `form` using these rules. Confirmation ids are
    /// fixed by the constructor, so `passwordField` / `emailField` are rejected.
    #[wasm_bindgen(js_name = applyTo)]
    pub fn apply_to(&self, form: HtmlFormElement, options: JsValue) -> Result<FormValidation, JsValue> {
        let overrides: RegistryOverrides = parse_options(&options)?;
        if overrides.password_field.is_some() || overrides.email_field.is_some() {
            return Err(js_error(
                "passwordField and emailField must be passed to the RuleSet constructor",
            ));
        }
        FormValidation::install(form, self.registry.clone(), parse_options(&options)?)
    }
}

/// Installs validation on `form` with its own copy of the built-in rules.
/// `options` may also set `passwordField` / `emailField`.
#[wasm_bindgen(js_name = applyValidation)]
pub fn apply_validation(form: HtmlFormElement, options: JsValue) -> Result<FormValidation, JsValue> {
    let rules: RulesConfig = parse_options(&options)?;
    let config: ValidationConfig = parse_options(&options)?;
    FormValidation::install(form, shared_registry(&rules), config)
}

/// Validation installed on one form
#[wasm_bindgen]
pub struct FormValidation {
    inner: Rc<RefCell<Validation<WebDom>>>,
}

impl FormValidation {
    fn install(form: HtmlFormElement, registry: SharedRegistry, config: ValidationConfig) -> Result<Self, JsValue> {
        let document = form
            .owner_document()
            .ok_or_else(|| js_error("form is not attached to a document"))?;
        let element: Element = form.into();

        let inner = Rc::new_cyclic(|handle| {
            RefCell::new(Validation::apply(
                WebDom::new(document, handle.clone()),
                element,
                registry,
                config,
            ))
        });
        tracing::debug!(fields = inner.borrow().form().len(), "validation applied");

        Ok(Self { inner })
    }

    // Page listeners can run while validateNow holds the controller, e.g. a
    // focus handler fired by `is_valid`
    fn current(&self) -> Result<Ref<'_, Validation<WebDom>>, JsValue> {
        self.inner
            .try_borrow()
            .map_err(|_| js_error("validation is already running"))
    }
}

#[wasm_bindgen]
impl FormValidation {
    /// Validates every field; true when the form may be submitted.
    /// Focus moves to the first invalid field otherwise.
    #[wasm_bindgen(js_name = validateNow)]
    pub fn validate_now(&self) -> Result<bool, JsValue> {
        let mut validation = self
            .inner
            .try_borrow_mut()
            .map_err(|_| js_error("validation is already running"))?;
        Ok(validation.validate_now())
    }

    /// Number of fields being validated
    #[wasm_bindgen(getter, js_name = fieldCount)]
    pub fn field_count(&self) -> Result<usize, JsValue> {
        Ok(self.current()?.form().len())
    }

    /// Messages from the last validation, one entry per failed rule
    pub fn errors(&self) -> Result<JsValue, JsValue> {
        let validation = self.current()?;
        let dom = validation.dom();

        let errors: Vec<ValidationError> = validation
            .form()
            .fields()
            .iter()
            .flat_map(|field| {
                let name = dom
                    .attribute(field.element(), "name")
                    .or_else(|| dom.attribute(field.element(), "id"))
                    .unwrap_or_else(|| format!("#{}", field.index()));
                field.messages().iter().map(move |message| ValidationError {
                    field: name.clone(),
                    message: message.clone(),
                })
            })
            .collect();

        Ok(serde_wasm_bindgen::to_value(&errors)?)
    }
}
