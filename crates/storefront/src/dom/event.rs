//! Events, targets, and listeners.

use std::fmt;
use std::rc::Rc;

use super::{Document, DomError, NodeId};

/// What a listener is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    KeyDown,
}

/// Where an event is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The global target every connected node's events bubble up to.
    Window,
    Node(NodeId),
}

impl From<NodeId> for EventTarget {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl fmt::Display for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window => f.write_str("window"),
            Self::Node(id) => write!(f, "{id}"),
        }
    }
}

/// A shared event handler.
///
/// Listeners get the whole document so they can mutate the tree and register
/// further listeners. An error from one listener is logged and does not stop
/// the others.
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event) -> Result<(), DomError>>;

/// An event travelling through the document.
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventKind,
    key: Option<String>,
    target: EventTarget,
    current_target: EventTarget,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    fn new(kind: EventKind, key: Option<String>) -> Self {
        Self {
            kind,
            key,
            target: EventTarget::Window,
            current_target: EventTarget::Window,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A pointer click.
    #[must_use]
    pub fn click() -> Self {
        Self::new(EventKind::Click, None)
    }

    /// A form submission.
    #[must_use]
    pub fn submit() -> Self {
        Self::new(EventKind::Submit, None)
    }

    /// A key press, named the way browsers name keys (`"Escape"`, `"a"`).
    #[must_use]
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::new(EventKind::KeyDown, Some(key.into()))
    }

    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// The pressed key, for key events.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The target the event was dispatched to.
    #[must_use]
    pub const fn target(&self) -> EventTarget {
        self.target
    }

    /// The target whose listeners are currently running.
    #[must_use]
    pub const fn current_target(&self) -> EventTarget {
        self.current_target
    }

    /// Cancel the default action (form navigation for submits).
    pub const fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event from reaching targets further up the path.
    ///
    /// Remaining listeners on the current target still run.
    pub const fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub(super) const fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(super) const fn retarget(&mut self, target: EventTarget) {
        self.target = target;
    }

    pub(super) const fn set_current_target(&mut self, target: EventTarget) {
        self.current_target = target;
    }
}

/// Result of dispatching one event.
#[derive(Debug, Default)]
pub struct Dispatch {
    /// Whether any listener cancelled the default action.
    pub default_prevented: bool,
    /// Listeners invoked along the propagation path.
    pub listeners_run: usize,
    /// Failures reported by listeners, in the order they ran.
    pub errors: Vec<DomError>,
}

impl Dispatch {
    /// Whether every listener ran without error.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
