//! In-memory host
//!
//! Implements every host capability without a window system: a tiny element
//! tree with fixed sizes, a listener registry, a virtual clock, and queues for
//! frame and timer callbacks. Time only moves when [`HeadlessHost::advance`]
//! is called, which makes gesture timing fully reproducible.

use std::cell::Cell;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::error::{PlatformError, Result};
use crate::event::{Binding, EventKind, ListenerTarget};
use crate::host::{
    Capabilities, ElementId, ElementTree, EventBinder, FrameScheduler, Host, Size, TimerId, Timers,
};

/// Interval between simulated repaints (~60fps)
pub const FRAME_INTERVAL_MS: f64 = 16.0;

/// Shared handle to the virtual clock
///
/// Clones observe the same time, so observers outside the host (e.g. a
/// notification listener) can timestamp what they see.
#[derive(Clone, Debug, Default)]
pub struct VirtualClock(Rc<Cell<f64>>);

impl VirtualClock {
    pub fn now(&self) -> f64 {
        self.0.get()
    }

    fn set(&self, time: f64) {
        self.0.set(time);
    }
}

/// A callback the host owes its client
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    /// A requested frame is due
    Frame,
    /// A timer elapsed
    Timer(TimerId),
}

#[derive(Debug)]
struct Node {
    size: Size,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// Host implementation backed by plain data structures
#[derive(Debug)]
pub struct HeadlessHost {
    elements: SlotMap<ElementId, Node>,
    bindings: FxHashSet<Binding>,
    timers: SlotMap<TimerId, f64>,
    /// Virtual time the outstanding frame callback is owed at
    frame_due: Option<f64>,
    frame_requests: u64,
    clock: VirtualClock,
    capabilities: Capabilities,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
            bindings: FxHashSet::default(),
            timers: SlotMap::with_key(),
            frame_due: None,
            frame_requests: 0,
            clock: VirtualClock::default(),
            capabilities: Capabilities::all(),
        }
    }

    /// Pretend some capabilities are missing
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Create a detached element with a fixed size
    pub fn create_element(&mut self, size: Size) -> ElementId {
        self.elements.insert(Node {
            size,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Move `child` under `parent`, after any existing children
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        if !self.elements.contains_key(parent) {
            return Err(PlatformError::UnknownElement(format!("{parent:?}")));
        }
        let old_parent = match self.elements.get_mut(child) {
            Some(node) => node.parent.replace(parent),
            None => return Err(PlatformError::UnknownElement(format!("{child:?}"))),
        };
        if let Some(old) = old_parent.and_then(|id| self.elements.get_mut(id)) {
            old.children.retain(|&c| c != child);
        }
        if let Some(node) = self.elements.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Change an element's rendered size (e.g. to simulate a resize)
    pub fn set_size(&mut self, element: ElementId, size: Size) -> Result<()> {
        let node = self
            .elements
            .get_mut(element)
            .ok_or_else(|| PlatformError::UnknownElement(format!("{element:?}")))?;
        node.size = size;
        Ok(())
    }

    /// Handle to the virtual clock
    pub fn clock(&self) -> VirtualClock {
        self.clock.clone()
    }

    /// Whether a listener is currently registered
    pub fn is_bound(&self, target: ListenerTarget, kind: EventKind) -> bool {
        self.bindings.contains(&Binding::new(target, kind))
    }

    /// Number of registered listeners
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Whether a frame callback is outstanding
    pub fn frame_pending(&self) -> bool {
        self.frame_due.is_some()
    }

    /// Total number of frame requests received
    pub fn frame_requests(&self) -> u64 {
        self.frame_requests
    }

    /// Number of armed timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Move the clock to the next owed callback, if it is due by `until`
    ///
    /// Returns the callback the client must now run. When nothing is due the
    /// clock is moved to `until` and `None` is returned.
    pub fn advance(&mut self, until: f64) -> Option<Wake> {
        let now = self.clock.now();
        let frame_at = self.frame_due;
        let timer = self
            .timers
            .iter()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(id, &at)| (id, at));

        let (at, wake) = match (frame_at, timer) {
            (Some(frame), Some((id, at))) if at < frame => (at, Wake::Timer(id)),
            (Some(frame), _) => (frame, Wake::Frame),
            (None, Some((id, at))) => (at, Wake::Timer(id)),
            (None, None) => {
                self.clock.set(until.max(now));
                return None;
            }
        };

        if at > until {
            self.clock.set(until.max(now));
            return None;
        }

        self.clock.set(at.max(now));
        match wake {
            Wake::Frame => self.frame_due = None,
            Wake::Timer(id) => {
                self.timers.remove(id);
            }
        }
        tracing::trace!("headless host: {:?} at {:.1}ms", wake, self.clock.now());
        Some(wake)
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree for HeadlessHost {
    fn measure(&self, element: ElementId) -> Size {
        self.elements
            .get(element)
            .map(|node| node.size)
            .unwrap_or_default()
    }

    fn first_child(&self, element: ElementId) -> Option<ElementId> {
        self.elements
            .get(element)
            .and_then(|node| node.children.first().copied())
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.elements.get(id).and_then(|n| n.parent);
        }
        false
    }
}

impl EventBinder for HeadlessHost {
    fn bind(&mut self, target: ListenerTarget, kind: EventKind) {
        self.bindings.insert(Binding::new(target, kind));
    }

    fn unbind(&mut self, target: ListenerTarget, kind: EventKind) {
        self.bindings.remove(&Binding::new(target, kind));
    }
}

impl FrameScheduler for HeadlessHost {
    fn schedule_frame(&mut self) {
        // Repeat requests share the deadline of the first one
        if self.frame_due.is_none() {
            self.frame_due = Some(self.clock.now() + FRAME_INTERVAL_MS);
        }
        self.frame_requests += 1;
    }

    fn now(&self) -> f64 {
        self.clock.now()
    }
}

impl Timers for HeadlessHost {
    fn set_timeout(&mut self, delay_ms: f64) -> TimerId {
        self.timers.insert(self.clock.now() + delay_ms.max(0.0))
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.remove(id);
    }
}

impl Host for HeadlessHost {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}
