//! In-memory DOM
//!
//! A small element tree implementing [`Dom`] without a browser. Listener
//! registrations are recorded rather than wired to callbacks; [`Validation::fire`]
//! plays the browser's part and routes an event to whatever is registered.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::dom::{Dom, DomError, Listener};
use crate::extension::{Dispatch, Validation};

/// Tags enumerated as form controls, matching `HTMLFormElement.elements`
const CONTROL_TAGS: &[&str] = &["input", "select", "textarea", "button", "fieldset", "output", "object"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    value: String,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Listener>,
}

#[derive(Debug, Default)]
pub struct HeadlessDom {
    nodes: RefCell<Vec<Node>>,
    focused: Cell<Option<NodeId>>,
}

impl HeadlessDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an element that is not attached anywhere
    pub fn create(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        });
        NodeId(nodes.len() - 1)
    }

    /// Creates an element as the last child of `parent`
    pub fn append(&self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create(tag);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(parent);
        nodes[parent.0].children.push(child);
        child
    }

    /// Adds `<div><input id=.. validation=..></div>` to `form` and returns the input
    pub fn add_input(&self, form: NodeId, id: &str, rules: &str) -> NodeId {
        let container = self.append(form, "div");
        let input = self.append(container, "input");
        self.set_attribute(input, "id", id);
        self.set_attribute(input, "validation", rules);
        input
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_value(&self, node: NodeId, value: &str) {
        self.nodes.borrow_mut()[node.0].value = value.to_string();
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    pub fn text(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].text.clone()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0].classes.iter().any(|c| c == class)
    }

    /// Listeners currently registered on `node`, duplicates included
    pub fn listeners(&self, node: NodeId) -> Vec<Listener> {
        self.nodes.borrow()[node.0].listeners.clone()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .position(|node| node.attributes.get("id").map(String::as_str) == Some(id))
            .map(NodeId)
    }

    /// Messages of the error list rendered after `node`, if there is one
    pub fn error_messages(&self, node: NodeId, class: &str) -> Option<Vec<String>> {
        let list = self.next_sibling(node).filter(|&s| self.is_error_list(s, class))?;
        Some(self.children(list).into_iter().map(|item| self.text(item)).collect())
    }

    /// Number of error lists among `node`'s siblings
    pub fn error_list_count(&self, node: NodeId, class: &str) -> usize {
        match self.parent(node) {
            Some(parent) => self
                .children(parent)
                .into_iter()
                .filter(|&child| self.is_error_list(child, class))
                .count(),
            None => 0,
        }
    }

    fn is_error_list(&self, node: NodeId, class: &str) -> bool {
        self.tag(node) == "ul" && self.has_class(node, class)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let position = siblings.iter().position(|&s| s == node)?;
        siblings.get(position + 1).copied()
    }

    fn collect_controls(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(node) {
            if CONTROL_TAGS.contains(&self.tag(child).as_str()) {
                out.push(child);
            }
            self.collect_controls(child, out);
        }
    }
}

impl Dom for HeadlessDom {
    type Element = NodeId;

    fn controls(&self, form: &NodeId) -> Vec<NodeId> {
        let mut controls = Vec::new();
        self.collect_controls(*form, &mut controls);
        controls
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[element.0].attributes.get(name).cloned()
    }

    fn value(&self, element: &NodeId) -> String {
        self.nodes.borrow()[element.0].value.clone()
    }

    fn value_by_id(&self, id: &str) -> Option<String> {
        self.element_by_id(id).map(|node| self.value(&node))
    }

    fn container(&self, element: &NodeId) -> Option<NodeId> {
        self.parent(*element)
    }

    fn listen(&self, target: &NodeId, listener: Listener) -> Result<(), DomError> {
        self.nodes.borrow_mut()[target.0].listeners.push(listener);
        Ok(())
    }

    fn unlisten(&self, target: &NodeId, listener: Listener) -> Result<(), DomError> {
        let mut nodes = self.nodes.borrow_mut();
        let listeners = &mut nodes[target.0].listeners;
        if let Some(position) = listeners.iter().position(|&l| l == listener) {
            listeners.remove(position);
        }
        Ok(())
    }

    fn insert_error_list(&self, element: &NodeId, class: &str, messages: &[String]) -> Result<(), DomError> {
        let parent = self.parent(*element).ok_or(DomError::Detached)?;

        let list = self.create("ul");
        self.nodes.borrow_mut()[list.0].classes.push(class.to_string());
        for message in messages {
            let item = self.append(list, "li");
            self.nodes.borrow_mut()[item.0].text = message.clone();
        }

        let mut nodes = self.nodes.borrow_mut();
        let position = nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == *element)
            .ok_or(DomError::Detached)?;
        nodes[parent.0].children.insert(position + 1, list);
        nodes[list.0].parent = Some(parent);
        Ok(())
    }

    fn remove_error_list(&self, element: &NodeId, class: &str) -> Result<(), DomError> {
        let Some(list) = self.next_sibling(*element).filter(|&s| self.is_error_list(s, class)) else {
            return Ok(());
        };
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[list.0].parent.take() {
            nodes[parent.0].children.retain(|&c| c != list);
        }
        Ok(())
    }

    fn add_class(&self, element: &NodeId, class: &str) -> Result<(), DomError> {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[element.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, element: &NodeId, class: &str) -> Result<(), DomError> {
        self.nodes.borrow_mut()[element.0].classes.retain(|c| c != class);
        Ok(())
    }

    fn focus(&self, element: &NodeId) -> Result<(), DomError> {
        self.focused.set(Some(*element));
        Ok(())
    }
}

impl Validation<HeadlessDom> {
    /// Dispatches a DOM event to the listeners registered on `target`
    ///
    /// Returns [`Dispatch::PreventDefault`] if any listener cancelled it.
    pub fn fire(&mut self, target: NodeId, event: &str) -> Dispatch {
        let listeners: Vec<Listener> = self
            .dom()
            .listeners(target)
            .into_iter()
            .filter(|listener| listener.dom_event() == event)
            .collect();

        let mut outcome = Dispatch::Continue;
        for listener in listeners {
            if self.handle(listener) == Dispatch::PreventDefault {
                outcome = Dispatch::PreventDefault;
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_controls_in_document_order() {
        let dom = HeadlessDom::new();
        let form = dom.create("form");
        let first = dom.add_input(form, "first", "required");
        let fieldset = dom.append(form, "fieldset");
        let nested = dom.append(fieldset, "select");
        dom.append(form, "p");
        let last = dom.append(form, "textarea");

        assert_eq!(dom.controls(&form), vec![first, fieldset, nested, last]);
    }

    #[test]
    fn test_error_list_goes_right_after_element() {
        let dom = HeadlessDom::new();
        let form = dom.create("form");
        let input = dom.add_input(form, "email", "email");
        let container = dom.parent(input).unwrap();
        let hint = dom.append(container, "span");

        dom.insert_error_list(&input, "errorList", &["bad".to_string()]).unwrap();
        let children = dom.children(container);
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], input);
        assert_eq!(children[2], hint);
        assert_eq!(dom.error_messages(input, "errorList"), Some(vec!["bad".to_string()]));

        dom.remove_error_list(&input, "errorList").unwrap();
        assert_eq!(dom.children(container), vec![input, hint]);
        assert_eq!(dom.error_messages(input, "errorList"), None);
    }

    #[test]
    fn test_insert_into_detached_element_fails() {
        let dom = HeadlessDom::new();
        let input = dom.create("input");
        let err = dom.insert_error_list(&input, "errorList", &[]).unwrap_err();
        assert!(matches!(err, DomError::Detached));
    }

    #[test]
    fn test_value_by_id() {
        let dom = HeadlessDom::new();
        let form = dom.create("form");
        let password = dom.add_input(form, "password", "password");
        dom.set_value(password, "hunter22");

        assert_eq!(dom.value_by_id("password"), Some("hunter22".to_string()));
        assert_eq!(dom.value_by_id("email"), None);
    }
}
