//! Tap and double-tap detection
//!
//! A two-state machine: `Idle` and `Pending`. With double taps disabled every
//! candidate fires a tap at once. With double taps enabled the first candidate
//! arms a timer and waits; a second candidate close enough before the timer
//! fires becomes a double tap, otherwise the timer fires the single tap.

use flick_platform::{ElementId, Point, TimerId, Timers};

/// How long a first tap waits for its partner (ms)
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

/// Largest per-axis distance between the two taps of a double tap
pub const DOUBLE_TAP_MAX_DISTANCE: f32 = 100.0;

/// Movement below which a press still counts as a tap (px)
pub const TAP_SLOP: f32 = 2.0;

/// A released press that qualifies as a tap
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapCandidate {
    /// Where the press started
    pub point: Point,
    /// Element the press landed on
    pub target: Option<ElementId>,
    /// Release time (ms)
    pub time: f64,
}

/// A first tap waiting for a possible second one
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingTap {
    pub candidate: TapCandidate,
    pub timer: TimerId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TapState {
    #[default]
    Idle,
    Pending(PendingTap),
}

/// What the detector decided
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapOutcome {
    Tap { target: Option<ElementId> },
    DoubleTap { target: Option<ElementId> },
}

#[derive(Clone, Debug)]
pub struct TapDetector {
    double_tap: bool,
    state: TapState,
}

impl TapDetector {
    pub fn new(double_tap: bool) -> Self {
        Self {
            double_tap,
            state: TapState::Idle,
        }
    }

    pub fn state(&self) -> &TapState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, TapState::Pending(_))
    }

    /// Feed a tap candidate
    pub fn candidate<T>(&mut self, candidate: TapCandidate, timers: &mut T) -> Option<TapOutcome>
    where
        T: Timers + ?Sized,
    {
        if !self.double_tap {
            return Some(TapOutcome::Tap {
                target: candidate.target,
            });
        }

        match self.state {
            TapState::Idle => {
                let timer = timers.set_timeout(DOUBLE_TAP_WINDOW_MS);
                tracing::trace!("tap armed at {:.1}ms", candidate.time);
                self.state = TapState::Pending(PendingTap { candidate, timer });
                None
            }
            TapState::Pending(pending) => {
                let distance = pending.candidate.point.max_axis_distance(candidate.point);
                self.clear(timers);
                if distance < DOUBLE_TAP_MAX_DISTANCE {
                    Some(TapOutcome::DoubleTap {
                        target: candidate.target,
                    })
                } else {
                    tracing::trace!("second tap {}px away, discarded", distance);
                    None
                }
            }
        }
    }

    /// A host timer fired
    pub fn timeout(&mut self, timer: TimerId) -> Option<TapOutcome> {
        match self.state {
            TapState::Pending(pending) if pending.timer == timer => {
                self.state = TapState::Idle;
                Some(TapOutcome::Tap {
                    target: pending.candidate.target,
                })
            }
            _ => None,
        }
    }

    /// Forget any pending tap
    pub fn clear<T>(&mut self, timers: &mut T)
    where
        T: Timers + ?Sized,
    {
        if let TapState::Pending(pending) = std::mem::take(&mut self.state) {
            timers.clear_timeout(pending.timer);
        }
    }
}
