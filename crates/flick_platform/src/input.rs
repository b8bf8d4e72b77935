//! Pointer and touch input types

use smallvec::{smallvec, SmallVec};

use crate::event::EventKind;
use crate::host::ElementId;

/// A point in page coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along the given axis
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Component perpendicular to the given axis
    pub fn across(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.y,
            Axis::Vertical => self.x,
        }
    }

    /// Chebyshev distance (largest per-axis difference)
    pub fn max_axis_distance(&self, other: Point) -> f32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Motion axis of a paged strip
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Pages laid out left to right (default)
    #[default]
    Horizontal,
    /// Pages laid out top to bottom
    Vertical,
}

/// Contact points carried by a single event
///
/// Touch events may report several simultaneous contacts; mouse events always
/// carry exactly one.
pub type Contacts = SmallVec<[Point; 2]>;

/// A raw input event delivered by the host
#[derive(Clone, Debug)]
pub struct InputEvent {
    /// What kind of event this is
    pub kind: EventKind,
    /// Host timestamp in milliseconds
    pub timestamp: f64,
    /// Active contact points (empty for window events)
    pub points: Contacts,
    /// Pinch scale reported by the host, if any
    pub scale: Option<f32>,
    /// Element the event was dispatched to
    pub target: Option<ElementId>,
}

impl InputEvent {
    /// Create an event of any kind
    pub fn new(kind: EventKind, timestamp: f64) -> Self {
        Self {
            kind,
            timestamp,
            points: SmallVec::new(),
            scale: None,
            target: None,
        }
    }

    /// Single-contact touch or mouse event at `point`
    pub fn pointer(kind: EventKind, timestamp: f64, point: Point) -> Self {
        Self {
            points: smallvec![point],
            ..Self::new(kind, timestamp)
        }
    }

    /// Touch event with several simultaneous contacts
    pub fn touches(kind: EventKind, timestamp: f64, points: &[Point]) -> Self {
        Self {
            points: points.iter().copied().collect(),
            ..Self::new(kind, timestamp)
        }
    }

    /// Set the element the event was dispatched to
    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the pinch scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// First contact point, if any
    pub fn primary(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// True when this event describes more than a single-finger drag
    pub fn is_multi_touch(&self) -> bool {
        self.points.len() > 1 || self.scale.is_some_and(|s| s != 1.0)
    }
}
