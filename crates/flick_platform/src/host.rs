//! Host capability traits
//!
//! A carousel never touches the element tree, the listener registry or the
//! frame clock directly. Everything goes through these traits so the same
//! state machine runs inside a browser binding, a native toolkit, or the
//! [`HeadlessHost`](crate::headless::HeadlessHost) used by tests.

use slotmap::new_key_type;

use crate::event::{EventKind, ListenerTarget};
use crate::input::Axis;

new_key_type! {
    /// Handle to an element owned by the host
    pub struct ElementId;
    /// Handle to a pending one-shot timer
    pub struct TimerId;
}

/// Rendered size of an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent along the given axis
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Element measurement and tree queries
pub trait ElementTree {
    /// Measure the rendered size of an element
    fn measure(&self, element: ElementId) -> Size;

    /// First child element, if any
    fn first_child(&self, element: ElementId) -> Option<ElementId>;

    /// Whether `node` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;
}

/// Listener registration
pub trait EventBinder {
    /// Start delivering `kind` events from `target`
    fn bind(&mut self, target: ListenerTarget, kind: EventKind);

    /// Stop delivering `kind` events from `target`
    fn unbind(&mut self, target: ListenerTarget, kind: EventKind);
}

/// Per-frame scheduling and the clock it runs on
pub trait FrameScheduler {
    /// Ask the host to invoke the frame entry point once before the next repaint
    fn schedule_frame(&mut self);

    /// Current time in milliseconds
    fn now(&self) -> f64;
}

/// One-shot delayed callbacks
pub trait Timers {
    /// Arm a timer that fires once after `delay_ms`
    fn set_timeout(&mut self, delay_ms: f64) -> TimerId;

    /// Disarm a timer; unknown or already-fired ids are ignored
    fn clear_timeout(&mut self, id: TimerId);
}

/// Capabilities a host reports before anything is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Listener registration works
    pub event_listeners: bool,
    /// Element containment checks work
    pub containment: bool,
    /// Frame scheduling works
    pub frame_scheduling: bool,
}

impl Capabilities {
    /// Every capability present
    pub fn all() -> Self {
        Self {
            event_listeners: true,
            containment: true,
            frame_scheduling: true,
        }
    }

    /// True when a carousel can run on this host
    pub fn is_supported(&self) -> bool {
        self.event_listeners && self.containment && self.frame_scheduling
    }

    /// Names of the missing capabilities
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.event_listeners {
            missing.push("event listeners");
        }
        if !self.containment {
            missing.push("element containment");
        }
        if !self.frame_scheduling {
            missing.push("frame scheduling");
        }
        missing
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Everything a carousel needs from its environment
pub trait Host: ElementTree + EventBinder + FrameScheduler + Timers {
    /// Report which capabilities actually work
    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_along_axis() {
        let size = Size::new(320.0, 480.0);
        assert_eq!(size.along(Axis::Horizontal), 320.0);
        assert_eq!(size.along(Axis::Vertical), 480.0);
    }

    #[test]
    fn test_capabilities_missing() {
        assert!(Capabilities::all().is_supported());
        assert!(Capabilities::all().missing().is_empty());

        let caps = Capabilities {
            containment: false,
            frame_scheduling: false,
            ..Capabilities::all()
        };
        assert!(!caps.is_supported());
        assert_eq!(caps.missing(), vec!["element containment", "frame scheduling"]);
    }
}
