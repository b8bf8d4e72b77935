//! Gesture interpretation
//!
//! Turns a press/move/release stream into drag targets for the motion engine
//! and, on release, into a page decision and an optional tap candidate.
//!
//! The first move of every gesture decides once whether the user is panning
//! the strip or scrolling the page across it. A scroll never moves the strip.

use flick_animation::MotionEngine;
use flick_platform::{Axis, ElementId, EventResponse, InputEvent, Point};

use crate::tap::{TapCandidate, TAP_SLOP};

/// Releases faster than this may page on a short swipe (ms)
pub const SWIPE_TIME_MS: f64 = 250.0;

/// Minimum displacement of a fast swipe (px)
pub const SWIPE_MIN_DISTANCE: f32 = 40.0;

/// Base divisor of the rubber band past the first and last page
pub const EDGE_RESISTANCE_BASE: f32 = 1.8;

/// Pan-or-scroll latch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Classification {
    /// No move seen yet
    #[default]
    Undecided,
    /// The strip follows the pointer
    Pan,
    /// The user scrolls across the strip
    Scroll,
}

/// Bookkeeping for the gesture in progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub origin: Point,
    pub origin_time: f64,
    /// Strip position when the gesture began
    pub origin_position: f32,
    /// Correction for a strip grabbed mid-animation
    pub offset: f32,
    /// Latest displacement along the motion axis, offset and resistance applied
    pub delta: f32,
    /// Largest per-axis displacement seen
    pub peak_displacement: f32,
    pub classification: Classification,
    pub target: Option<ElementId>,
}

/// Result of a move event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub response: EventResponse,
    /// The pointer travelled too far for a pending tap to stand
    pub cancel_tap: bool,
}

/// Result of a release
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Release {
    /// Set when the gesture qualifies as a tap
    pub tap: Option<TapCandidate>,
    /// Page to animate to, if any
    pub page: Option<isize>,
}

/// Rubber-band a drag past the first or last page
///
/// Dragging forward from page zero (positive delta) or backward from the last
/// page (negative delta) is damped by `|delta| / extent + 1.8`; every other
/// drag passes through unchanged.
pub fn edge_resistance(delta: f32, extent: f32, index: usize, last_index: usize) -> f32 {
    let past_edge = (index == 0 && delta > 0.0) || (index == last_index && delta < 0.0);
    if !past_edge || extent <= 0.0 {
        return delta;
    }
    delta / (delta.abs() / extent + EDGE_RESISTANCE_BASE)
}

/// Whether a release should turn the page
pub fn is_valid_slide(elapsed_ms: f64, delta: f32, extent: f32) -> bool {
    (elapsed_ms < SWIPE_TIME_MS && delta.abs() > SWIPE_MIN_DISTANCE) || delta.abs() > extent / 2.0
}

/// Gesture state machine for one carousel
#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    axis: Axis,
    drag: Option<DragState>,
}

impl GestureInterpreter {
    pub fn new(axis: Axis) -> Self {
        Self { axis, drag: None }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Forget the gesture in progress without deciding anything
    pub fn reset(&mut self) {
        self.drag = None;
    }

    /// A press began
    pub fn start(
        &mut self,
        engine: &mut MotionEngine,
        point: Point,
        timestamp: f64,
        target: Option<ElementId>,
    ) {
        let origin_position = engine.position();
        let offset = engine.grab();
        tracing::trace!(
            "gesture start at ({}, {}) position={} offset={}",
            point.x,
            point.y,
            origin_position,
            offset
        );
        self.drag = Some(DragState {
            origin: point,
            origin_time: timestamp,
            origin_position,
            offset,
            delta: 0.0,
            peak_displacement: 0.0,
            classification: Classification::Undecided,
            target,
        });
    }

    /// The pointer moved
    pub fn movement(&mut self, engine: &mut MotionEngine, event: &InputEvent) -> MoveOutcome {
        let Some(drag) = self.drag.as_mut() else {
            return MoveOutcome::default();
        };
        if event.is_multi_touch() {
            return MoveOutcome::default();
        }
        let Some(point) = event.primary() else {
            return MoveOutcome::default();
        };

        let raw = point.along(self.axis) - drag.origin.along(self.axis);
        let cross = point.across(self.axis) - drag.origin.across(self.axis);
        let mut delta = raw + drag.offset;

        if drag.classification == Classification::Undecided {
            drag.classification = if raw.abs() < cross.abs() {
                Classification::Scroll
            } else {
                Classification::Pan
            };
            tracing::trace!("gesture classified as {:?}", drag.classification);
        }

        drag.peak_displacement = drag.peak_displacement.max(raw.abs().max(cross.abs()));
        let cancel_tap = drag.peak_displacement > TAP_SLOP;

        if drag.classification == Classification::Scroll {
            drag.delta = delta;
            return MoveOutcome {
                response: EventResponse::observed(),
                cancel_tap,
            };
        }

        let index = engine.current_index();
        delta = edge_resistance(delta, engine.extent(), index, engine.last_index());
        drag.delta = delta;
        engine.drag_to(delta - index as f32 * engine.extent());
        engine.record_sample(raw, (event.timestamp - drag.origin_time) as f32);

        MoveOutcome {
            response: EventResponse::consumed(),
            cancel_tap,
        }
    }

    /// The press ended
    ///
    /// `release_target` is the element the release was dispatched to, falling
    /// back to the press target. `inside` tells whether an element belongs to
    /// the strip. Returns `None` when no gesture was active.
    pub fn end<F>(
        &mut self,
        engine: &mut MotionEngine,
        timestamp: f64,
        release_target: Option<ElementId>,
        inside: F,
    ) -> Option<Release>
    where
        F: Fn(ElementId) -> bool,
    {
        let drag = self.drag.take()?;
        engine.release();

        let target = release_target.or(drag.target);
        let tap = (drag.peak_displacement < TAP_SLOP && target.is_some_and(&inside)).then_some(
            TapCandidate {
                point: drag.origin,
                target,
                time: timestamp,
            },
        );

        let page = match drag.classification {
            Classification::Scroll => {
                (drag.offset != 0.0).then_some(engine.current_index() as isize)
            }
            Classification::Pan | Classification::Undecided => {
                let index = engine.current_index();
                let elapsed = timestamp - drag.origin_time;
                let valid = is_valid_slide(elapsed, drag.delta, engine.extent());
                let past_bounds = (index == 0 && drag.delta > 0.0)
                    || (index == engine.last_index() && drag.delta < 0.0);
                let step = match (valid && !past_bounds, drag.delta - drag.offset < 0.0) {
                    (false, _) => 0,
                    (true, true) => 1,
                    (true, false) => -1,
                };
                tracing::trace!(
                    "release: delta={} elapsed={:.1}ms valid={} past_bounds={} step={}",
                    drag.delta,
                    elapsed,
                    valid,
                    past_bounds,
                    step
                );
                Some(engine.projected_index() as isize + step)
            }
        };

        Some(Release { tap, page })
    }
}
