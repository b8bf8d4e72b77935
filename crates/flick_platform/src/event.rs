//! Event kinds, listener targets and handler responses

use crate::host::ElementId;

/// Kinds of host events a carousel can listen for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A finger touched the surface
    TouchStart,
    /// A finger moved
    TouchMove,
    /// A finger was lifted
    TouchEnd,
    /// The touch was cancelled by the system
    TouchCancel,
    /// A mouse button was pressed
    MouseDown,
    /// The mouse moved
    MouseMove,
    /// A mouse button was released
    MouseUp,
    /// The viewport was resized
    Resize,
    /// The device orientation changed
    OrientationChange,
}

impl EventKind {
    /// True for events coming from a mouse
    pub fn is_mouse(&self) -> bool {
        matches!(
            self,
            EventKind::MouseDown | EventKind::MouseMove | EventKind::MouseUp
        )
    }

    /// True for events coming from a touchscreen
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            EventKind::TouchStart
                | EventKind::TouchMove
                | EventKind::TouchEnd
                | EventKind::TouchCancel
        )
    }
}

/// Where a listener is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// A specific element
    Element(ElementId),
    /// The whole document (receives moves outside the element)
    Document,
    /// The window (viewport-level events)
    Window,
}

/// A single listener registration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Binding {
    pub target: ListenerTarget,
    pub kind: EventKind,
}

impl Binding {
    pub fn new(target: ListenerTarget, kind: EventKind) -> Self {
        Self { target, kind }
    }
}

/// What the host should do with an event after a handler ran
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Suppress the host's default action (native scrolling)
    pub prevent_default: bool,
    /// Do not bubble the event further
    pub stop_propagation: bool,
}

impl EventResponse {
    /// The event was not consumed
    pub fn ignored() -> Self {
        Self::default()
    }

    /// The event was observed but the default action must continue
    pub fn observed() -> Self {
        Self {
            prevent_default: false,
            stop_propagation: true,
        }
    }

    /// The event was fully consumed
    pub fn consumed() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_sources() {
        assert!(EventKind::MouseMove.is_mouse());
        assert!(!EventKind::MouseMove.is_touch());
        assert!(EventKind::TouchCancel.is_touch());
        assert!(!EventKind::Resize.is_mouse());
        assert!(!EventKind::Resize.is_touch());
    }

    #[test]
    fn test_response_default_is_ignored() {
        assert_eq!(EventResponse::default(), EventResponse::ignored());
        assert!(EventResponse::consumed().prevent_default);
        assert!(!EventResponse::observed().prevent_default);
    }
}
