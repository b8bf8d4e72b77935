//! Carousel notifications and their subscribers

use std::fmt;

use flick_animation::MotionEvent;
use flick_platform::ElementId;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`Emitter::on`], used to unsubscribe
    pub struct ListenerId;
}

/// Something observers of a carousel can react to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CarouselEvent {
    /// The strip moved; `value` is the position in pages
    Change { value: f32, position: f32 },
    /// The target page changed
    Page { index: usize },
    /// Motion settled on a page
    Complete { index: usize },
    /// Single tap inside the strip
    Tap { target: Option<ElementId> },
    /// Double tap inside the strip
    DoubleTap { target: Option<ElementId> },
}

/// Subscription key for [`CarouselEvent`]s
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CarouselEventKind {
    Change,
    Page,
    Complete,
    Tap,
    DoubleTap,
}

impl CarouselEventKind {
    /// Conventional event name
    pub fn name(&self) -> &'static str {
        match self {
            CarouselEventKind::Change => "change",
            CarouselEventKind::Page => "page",
            CarouselEventKind::Complete => "complete",
            CarouselEventKind::Tap => "tap",
            CarouselEventKind::DoubleTap => "dbltap",
        }
    }
}

impl CarouselEvent {
    pub fn kind(&self) -> CarouselEventKind {
        match self {
            CarouselEvent::Change { .. } => CarouselEventKind::Change,
            CarouselEvent::Page { .. } => CarouselEventKind::Page,
            CarouselEvent::Complete { .. } => CarouselEventKind::Complete,
            CarouselEvent::Tap { .. } => CarouselEventKind::Tap,
            CarouselEvent::DoubleTap { .. } => CarouselEventKind::DoubleTap,
        }
    }
}

impl From<MotionEvent> for CarouselEvent {
    fn from(event: MotionEvent) -> Self {
        match event {
            MotionEvent::Change { value, position } => CarouselEvent::Change { value, position },
            MotionEvent::Page { index } => CarouselEvent::Page { index },
            MotionEvent::Complete { index } => CarouselEvent::Complete { index },
        }
    }
}

impl fmt::Display for CarouselEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind().name();
        match self {
            CarouselEvent::Change { value, position } => {
                write!(f, "{name} value={value:.3} position={position:.1}")
            }
            CarouselEvent::Page { index } | CarouselEvent::Complete { index } => {
                write!(f, "{name} index={index}")
            }
            CarouselEvent::Tap { target } | CarouselEvent::DoubleTap { target } => match target {
                Some(target) => write!(f, "{name} target={target:?}"),
                None => write!(f, "{name}"),
            },
        }
    }
}

/// Subscriber callback
pub type Listener = Box<dyn FnMut(&CarouselEvent)>;

struct Subscription {
    kind: CarouselEventKind,
    callback: Listener,
}

/// Typed publish/subscribe hub
///
/// Listeners for a kind run in the order they subscribed.
#[derive(Default)]
pub struct Emitter {
    subscriptions: SlotMap<ListenerId, Subscription>,
    by_kind: FxHashMap<CarouselEventKind, Vec<ListenerId>>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one kind of event
    pub fn on<F>(&mut self, kind: CarouselEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&CarouselEvent) + 'static,
    {
        let id = self.subscriptions.insert(Subscription {
            kind,
            callback: Box::new(callback),
        });
        self.by_kind.entry(kind).or_default().push(id);
        id
    }

    /// Unsubscribe; returns false if the id was unknown
    pub fn off(&mut self, id: ListenerId) -> bool {
        let Some(subscription) = self.subscriptions.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_kind.get_mut(&subscription.kind) {
            ids.retain(|&other| other != id);
        }
        true
    }

    /// Deliver an event to every subscriber of its kind
    pub fn emit(&mut self, event: CarouselEvent) {
        let Some(ids) = self.by_kind.get(&event.kind()) else {
            return;
        };
        for id in ids {
            if let Some(subscription) = self.subscriptions.get_mut(*id) {
                (subscription.callback)(&event);
            }
        }
    }

    /// Number of subscribers for a kind
    pub fn listener_count(&self, kind: CarouselEventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Drop every subscriber
    pub fn clear(&mut self) {
        self.subscriptions.clear();
        self.by_kind.clear();
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_matching_kind_only() {
        let mut emitter = Emitter::new();
        let pages = Rc::new(RefCell::new(Vec::new()));
        let sink = pages.clone();
        emitter.on(CarouselEventKind::Page, move |event| {
            sink.borrow_mut().push(*event);
        });

        emitter.emit(CarouselEvent::Page { index: 2 });
        emitter.emit(CarouselEvent::Complete { index: 2 });

        assert_eq!(pages.borrow().as_slice(), &[CarouselEvent::Page { index: 2 }]);
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let mut emitter = Emitter::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let order = order.clone();
            emitter.on(CarouselEventKind::Tap, move |_| order.borrow_mut().push(n));
        }

        emitter.emit(CarouselEvent::Tap { target: None });
        assert_eq!(order.borrow().as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_off_unsubscribes() {
        let mut emitter = Emitter::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        let id = emitter.on(CarouselEventKind::Complete, move |_| *counter.borrow_mut() += 1);

        emitter.emit(CarouselEvent::Complete { index: 0 });
        assert!(emitter.off(id));
        assert!(!emitter.off(id));
        emitter.emit(CarouselEvent::Complete { index: 0 });

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(emitter.listener_count(CarouselEventKind::Complete), 0);
    }

    #[test]
    fn test_motion_events_convert() {
        let event: CarouselEvent = MotionEvent::Change {
            value: 0.5,
            position: -160.0,
        }
        .into();
        assert_eq!(event.kind(), CarouselEventKind::Change);
        assert_eq!(event.to_string(), "change value=0.500 position=-160.0");
        assert_eq!(
            CarouselEvent::DoubleTap { target: None }.to_string(),
            "dbltap"
        );
    }
}
