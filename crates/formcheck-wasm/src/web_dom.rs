//! `web-sys` implementation of the DOM collaborator

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use formcheck::{Dispatch, Dom, DomError, Listener, Validation};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// Back-reference from listener closures to the controller that owns this DOM
pub type ControllerHandle = Weak<RefCell<Validation<WebDom>>>;

struct Registration {
    target: Element,
    closure: Closure<dyn FnMut(Event)>,
    active: bool,
}

/// Browser DOM bound to one validated form
///
/// Listener closures are created once per [`Listener`] and kept for the life of
/// the form. Detaching only unregisters them, so a closure is never dropped
/// while the browser may still be running it.
pub struct WebDom {
    document: Document,
    handle: ControllerHandle,
    registrations: RefCell<HashMap<Listener, Registration>>,
}

impl WebDom {
    pub fn new(document: Document, handle: ControllerHandle) -> Self {
        Self {
            document,
            handle,
            registrations: RefCell::new(HashMap::new()),
        }
    }

    fn closure_for(&self, listener: Listener) -> Closure<dyn FnMut(Event)> {
        let handle = self.handle.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| dispatch(&handle, listener, &event))
    }

    fn create(&self, tag: &'static str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(|_| DomError::CreateElement(tag))
    }
}

impl Drop for WebDom {
    fn drop(&mut self) {
        for (listener, registration) in self.registrations.get_mut().iter() {
            if registration.active {
                let _ = registration.target.remove_event_listener_with_callback(
                    listener.dom_event(),
                    registration.closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

/// Routes a fired event into the controller
///
/// Events raised synchronously while the controller is already working (a
/// `change` fired by the blur that `focus()` causes, for one) are skipped.
fn dispatch(handle: &ControllerHandle, listener: Listener, event: &Event) {
    let Some(controller) = handle.upgrade() else {
        return;
    };
    let Ok(mut validation) = controller.try_borrow_mut() else {
        tracing::debug!(?listener, "event fired while validation was running; skipped");
        return;
    };
    if validation.handle(listener) == Dispatch::PreventDefault {
        event.prevent_default();
    }
}

fn js_error(operation: &'static str, value: JsValue) -> DomError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    DomError::operation(operation, message)
}

fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        textarea.value()
    } else {
        element.get_attribute("value").unwrap_or_default()
    }
}

impl Dom for WebDom {
    type Element = Element;

    fn controls(&self, form: &Element) -> Vec<Element> {
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            tracing::warn!(tag = %form.tag_name(), "validation applied to a non-form element");
            return Vec::new();
        };
        let elements = form.elements();
        (0..elements.length()).filter_map(|i| elements.item(i)).collect()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn value(&self, element: &Element) -> String {
        control_value(element)
    }

    fn value_by_id(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)
            .map(|element| control_value(&element))
    }

    fn container(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn listen(&self, target: &Element, listener: Listener) -> Result<(), DomError> {
        let mut registrations = self.registrations.borrow_mut();
        let registration = registrations.entry(listener).or_insert_with(|| Registration {
            target: target.clone(),
            closure: self.closure_for(listener),
            active: false,
        });
        if registration.active {
            return Ok(());
        }
        registration
            .target
            .add_event_listener_with_callback(
                listener.dom_event(),
                registration.closure.as_ref().unchecked_ref(),
            )
            .map_err(|err| js_error("addEventListener", err))?;
        registration.active = true;
        Ok(())
    }

    fn unlisten(&self, _target: &Element, listener: Listener) -> Result<(), DomError> {
        let mut registrations = self.registrations.borrow_mut();
        let Some(registration) = registrations.get_mut(&listener).filter(|r| r.active) else {
            return Ok(());
        };
        registration
            .target
            .remove_event_listener_with_callback(
                listener.dom_event(),
                registration.closure.as_ref().unchecked_ref(),
            )
            .map_err(|err| js_error("removeEventListener", err))?;
        registration.active = false;
        Ok(())
    }

    fn insert_error_list(&self, element: &Element, class: &str, messages: &[String]) -> Result<(), DomError> {
        let list = self.create("ul")?;
        list.set_class_name(class);
        for message in messages {
            let item = self.create("li")?;
            item.set_text_content(Some(message));
            list.append_child(&item)
                .map_err(|err| js_error("appendChild", err))?;
        }

        element
            .insert_adjacent_element("afterend", &list)
            .map_err(|err| js_error("insertAdjacentElement", err))?
            .ok_or(DomError::Detached)?;
        Ok(())
    }

    fn remove_error_list(&self, element: &Element, class: &str) -> Result<(), DomError> {
        if let Some(next) = element.next_element_sibling() {
            if next.tag_name().eq_ignore_ascii_case("ul") && next.class_list().contains(class) {
                next.remove();
            }
        }
        Ok(())
    }

    fn add_class(&self, element: &Element, class: &str) -> Result<(), DomError> {
        element
            .class_list()
            .add_1(class)
            .map_err(|err| js_error("classList.add", err))
    }

    fn remove_class(&self, element: &Element, class: &str) -> Result<(), DomError> {
        element
            .class_list()
            .remove_1(class)
            .map_err(|err| js_error("classList.remove", err))
    }

    fn focus(&self, element: &Element) -> Result<(), DomError> {
        element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| DomError::operation("focus", "element is not focusable"))?
            .focus()
            .map_err(|err| js_error("focus", err))
    }
}
