//! In-memory document model.
//!
//! A small arena-backed tree of element and text nodes with the subset of
//! browser behaviour the bookstore page relies on:
//!
//! - attributes, a class list, and a live `value` for form controls
//! - lookup by `id` attribute and by control `name` within a form
//! - event listeners with bubbling from a node through its ancestors to the
//!   window, plus `prevent_default` and `stop_propagation`
//! - HTML serialization (see [`Document::outer_html`])
//!
//! Nodes are addressed by [`NodeId`] handles. Removing a node frees its whole
//! subtree and drops every listener registered on it; a handle to a freed node
//! reports [`DomError::UnknownNode`] from then on. Freed slots are reused for
//! new nodes, and each reuse bumps the slot's generation so old handles never
//! alias the newcomer.
//!
//! The document is single-threaded: listeners are `Rc` closures and run to
//! completion one at a time, each with exclusive access to the document.

mod event;
mod html;

pub use event::{Dispatch, Event, EventKind, EventTarget, Listener};

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}.{}", self.index, self.generation)
    }
}

/// Errors from document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("{0} does not exist or was removed")]
    UnknownNode(NodeId),
    #[error("{0} is a text node, not an element")]
    NotAnElement(NodeId),
    #[error("cannot insert {child} into {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    #[error("the document body cannot be removed")]
    RootRemoval,
}

/// Form-associated tags that can carry a `name` and a value.
const CONTROL_TAGS: &[&str] = &["input", "select", "textarea", "button"];

#[derive(Debug, Clone)]
enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    /// Live value of a form control, once set. Falls back to the `value`
    /// attribute until then.
    value: Option<String>,
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

struct Registration {
    kind: EventKind,
    listener: Listener,
}

/// An in-memory document rooted at a `<body>` element.
pub struct Document {
    slots: Vec<Slot>,
    /// Indices of empty slots, reused before the arena grows.
    free: Vec<usize>,
    body: NodeId,
    listeners: HashMap<EventTarget, Vec<Registration>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self.slots.iter().filter(|slot| slot.node.is_some()).count();
        let listeners: usize = self.listeners.values().map(Vec::len).sum();
        f.debug_struct("Document")
            .field("body", &self.body)
            .field("live_nodes", &live)
            .field("slots", &self.slots.len())
            .field("listeners", &listeners)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only `<body>`.
    #[must_use]
    pub fn new() -> Self {
        let body = Node {
            data: NodeData::Element(Element::new("body")),
            parent: None,
            children: Vec::new(),
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(body),
            }],
            free: Vec::new(),
            body: NodeId {
                index: 0,
                generation: 0,
            },
            listeners: HashMap::new(),
        }
    }

    /// The root `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    // =========================================================================
    // Tree construction
    // =========================================================================

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert_node(NodeData::Element(Element::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.insert_node(NodeData::Text(text.into()))
    }

    fn insert_node(&mut self, data: NodeData) -> NodeId {
        let node = Node {
            data,
            parent: None,
            children: Vec::new(),
        };

        while let Some(index) = self.free.pop() {
            let Some(slot) = self.slots.get_mut(index) else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Number of node slots allocated, live or awaiting reuse.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved, not copied.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is unknown, `parent` is a text node,
    /// or `child` is `parent` itself or one of its ancestors.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element(parent)?;
        self.node(child)?;

        if child == self.body || self.ancestors_inclusive(parent).contains(&child) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Remove a node and free its subtree.
    ///
    /// Listeners registered on any node of the subtree are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or is the body.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        if id == self.body {
            return Err(DomError::RootRemoval);
        }
        self.detach(id)?;
        self.free_subtree(id);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.node_mut(id)?.parent.take() else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|&c| c != id);
        Ok(())
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let freed = self
                .slots
                .get_mut(current.index)
                .filter(|slot| slot.generation == current.generation)
                .and_then(|slot| slot.node.take());
            if let Some(node) = freed {
                pending.extend(node.children);
                self.free.push(current.index);
            }
            self.listeners.remove(&EventTarget::Node(current));
        }
    }

    // =========================================================================
    // Tree inspection
    // =========================================================================

    /// Whether the handle refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Whether the node is attached to the body.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(id) && self.ancestors_inclusive(id).last() == Some(&self.body)
    }

    /// The node's parent, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok().and_then(|node| node.parent)
    }

    /// The node's children in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], DomError> {
        Ok(&self.node(id)?.children)
    }

    /// The element's tag name.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or is a text node.
    pub fn tag_name(&self, id: NodeId) -> Result<&str, DomError> {
        Ok(&self.element(id)?.tag)
    }

    /// All descendants of a node in document order, excluding the node.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending: Vec<NodeId> = self
            .node(id)
            .map(|node| node.children.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(current) = pending.pop() {
            found.push(current);
            if let Ok(node) = self.node(current) {
                pending.extend(node.children.iter().rev());
            }
        }
        found
    }

    /// The first connected element whose `id` attribute matches.
    #[must_use]
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        std::iter::once(self.body)
            .chain(self.descendants(self.body))
            .find(|&node| self.attribute(node, "id").ok().flatten() == Some(element_id))
    }

    /// The first control inside `form` whose `name` attribute matches.
    ///
    /// # Errors
    ///
    /// Returns an error if `form` is unknown.
    pub fn named_control(&self, form: NodeId, name: &str) -> Result<Option<NodeId>, DomError> {
        self.node(form)?;
        Ok(self.descendants(form).into_iter().find(|&node| {
            self.element(node).is_ok_and(|el| {
                CONTROL_TAGS.contains(&el.tag.as_str()) && el.attribute("name") == Some(name)
            })
        }))
    }

    fn ancestors_inclusive(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = self.parent(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent(node);
        }
        chain
    }

    // =========================================================================
    // Content, attributes, classes, values
    // =========================================================================

    /// Replace a node's content with a single text node.
    ///
    /// For a text node, replaces its text.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        if let NodeData::Text(existing) = &mut self.node_mut(id)?.data {
            text.clone_into(existing);
            return Ok(());
        }

        let old_children = std::mem::take(&mut self.node_mut(id)?.children);
        for child in old_children {
            self.free_subtree(child);
        }

        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append(id, text_node)?;
        }
        Ok(())
    }

    /// The concatenated text of a node and its descendants.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown.
    pub fn text_content(&self, id: NodeId) -> Result<String, DomError> {
        let node = self.node(id)?;
        if let NodeData::Text(text) = &node.data {
            return Ok(text.clone());
        }

        Ok(self
            .descendants(id)
            .into_iter()
            .filter_map(|child| match self.node(child).map(|n| &n.data) {
                Ok(NodeData::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect())
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or is a text node.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.set_attribute(name, value);
        Ok(())
    }

    /// An attribute's value, if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or is a text node.
    pub fn attribute(&self, id: NodeId, name: &str) -> Result<Option<&str>, DomError> {
        Ok(self.element(id)?.attribute(name))
    }

    /// Add a class if not already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or is a text node.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        if !element.has_class(class) {
            element.toggle_class(class);
        }
        Ok(())
    }

    /// Whether the element's class list contains `class`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or is a text node.
    pub fn has_class(&self, id: NodeId, class: &str) -> Result<bool, DomError> {
        Ok(self.element(id)?.has_class(class))
    }

    /// Flip a class and return whether it is present afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or is a text node.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> Result<bool, DomError> {
        Ok(self.element_mut(id)?.toggle_class(class))
    }

    /// Set the live value of a form control.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or is a text node.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.value = Some(value.to_string());
        Ok(())
    }

    /// The live value of a form control.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or is a text node.
    pub fn value(&self, id: NodeId) -> Result<&str, DomError> {
        Ok(self.element(id)?.current_value())
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register a listener for events of `kind` reaching `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target node is unknown.
    pub fn add_event_listener<F>(
        &mut self,
        target: impl Into<EventTarget>,
        kind: EventKind,
        listener: F,
    ) -> Result<(), DomError>
    where
        F: Fn(&mut Self, &mut Event) -> Result<(), DomError> + 'static,
    {
        let target = target.into();
        if let EventTarget::Node(id) = target {
            self.node(id)?;
        }

        self.listeners.entry(target).or_default().push(Registration {
            kind,
            listener: Rc::new(listener),
        });
        Ok(())
    }

    /// Number of listeners currently registered on a target.
    #[must_use]
    pub fn listener_count(&self, target: impl Into<EventTarget>) -> usize {
        self.listeners.get(&target.into()).map_or(0, Vec::len)
    }

    /// Dispatch an event to a target and let it bubble.
    ///
    /// The path is fixed before any listener runs: the target, each ancestor,
    /// and the window if the target is connected. Listeners registered during
    /// dispatch do not see the current event.
    ///
    /// # Errors
    ///
    /// Returns an error if the target node is unknown. Listener failures are
    /// collected in the returned [`Dispatch`] instead.
    pub fn dispatch(
        &mut self,
        target: impl Into<EventTarget>,
        mut event: Event,
    ) -> Result<Dispatch, DomError> {
        let target = target.into();
        let path = self.propagation_path(target)?;
        event.retarget(target);

        let mut outcome = Dispatch::default();
        for current in path {
            if event.propagation_stopped() {
                break;
            }
            event.set_current_target(current);

            let listeners: Vec<Listener> = self
                .listeners
                .get(&current)
                .map(|registrations| {
                    registrations
                        .iter()
                        .filter(|r| r.kind == event.kind())
                        .map(|r| Rc::clone(&r.listener))
                        .collect()
                })
                .unwrap_or_default();

            for listener in listeners {
                outcome.listeners_run += 1;
                if let Err(e) = listener(self, &mut event) {
                    tracing::error!(error = %e, target = %current, kind = ?event.kind(), "Listener failed");
                    outcome.errors.push(e);
                }
            }
        }

        outcome.default_prevented = event.default_prevented();
        Ok(outcome)
    }

    fn propagation_path(&self, target: EventTarget) -> Result<Vec<EventTarget>, DomError> {
        let EventTarget::Node(id) = target else {
            return Ok(vec![EventTarget::Window]);
        };

        self.node(id)?;
        let mut path: Vec<EventTarget> = self
            .ancestors_inclusive(id)
            .into_iter()
            .map(EventTarget::Node)
            .collect();
        if self.is_connected(id) {
            path.push(EventTarget::Window);
        }
        Ok(path)
    }

    // =========================================================================
    // Internal accessors
    // =========================================================================

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(DomError::UnknownNode(id))
    }

    fn element(&self, id: NodeId) -> Result<&Element, DomError> {
        match &self.node(id)?.data {
            NodeData::Element(element) => Ok(element),
            NodeData::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(element) => Ok(element),
            NodeData::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            value: None,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => value.clone_into(existing),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    fn toggle_class(&mut self, class: &str) -> bool {
        let mut classes: Vec<&str> = self
            .attribute("class")
            .map(|list| list.split_ascii_whitespace().collect())
            .unwrap_or_default();

        let present = if classes.contains(&class) {
            classes.retain(|&c| c != class);
            false
        } else {
            classes.push(class);
            true
        };

        let joined = classes.join(" ");
        self.set_attribute("class", &joined);
        present
    }

    fn current_value(&self) -> &str {
        self.value
            .as_deref()
            .or_else(|| self.attribute("value"))
            .unwrap_or_default()
    }
}
