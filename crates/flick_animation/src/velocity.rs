//! Drag velocity tracking
//!
//! Keeps the most recent drag samples in a fixed-capacity window and derives a
//! release velocity from the oldest and newest of them.

use std::collections::VecDeque;

/// Number of samples kept in the window
pub const VELOCITY_WINDOW: usize = 5;

/// Velocity assumed when no drag samples exist (px/ms)
pub const FALLBACK_VELOCITY: f32 = 0.6;

/// One drag reading
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocitySample {
    /// Displacement along the motion axis since the gesture origin
    pub delta: f32,
    /// Milliseconds since the gesture origin
    pub elapsed: f32,
}

/// Velocity and travel derived from the sample window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityEstimate {
    /// Pixels per millisecond
    pub velocity: f32,
    /// Displacement covered by the window
    pub travel: f32,
}

impl VelocityEstimate {
    /// Estimate used when nothing was sampled
    pub fn fallback(extent: f32) -> Self {
        Self {
            velocity: FALLBACK_VELOCITY,
            travel: extent,
        }
    }
}

/// Sliding window of the last [`VELOCITY_WINDOW`] samples
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: VecDeque<VelocitySample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(VELOCITY_WINDOW),
        }
    }

    /// Record a reading, evicting the oldest one when the window is full
    pub fn push(&mut self, delta: f32, elapsed: f32) {
        if self.samples.len() == VELOCITY_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(VelocitySample { delta, elapsed });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn samples(&self) -> impl Iterator<Item = &VelocitySample> {
        self.samples.iter()
    }

    /// Velocity between the oldest and newest sample
    ///
    /// Returns `None` for an empty window. A window spanning no time has zero
    /// velocity and zero travel.
    pub fn estimate(&self) -> Option<VelocityEstimate> {
        let (first, last) = (self.samples.front()?, self.samples.back()?);
        let travel = last.delta - first.delta;
        let span = last.elapsed - first.elapsed;
        if span <= 0.0 {
            return Some(VelocityEstimate {
                velocity: 0.0,
                travel: 0.0,
            });
        }
        Some(VelocityEstimate {
            velocity: travel / span,
            travel,
        })
    }

    /// Estimate, then empty the window
    pub fn take_estimate(&mut self, extent: f32) -> VelocityEstimate {
        let estimate = self
            .estimate()
            .unwrap_or_else(|| VelocityEstimate::fallback(extent));
        self.samples.clear();
        estimate
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_bounded() {
        let mut tracker = VelocityTracker::new();
        for i in 0..50 {
            tracker.push(i as f32 * 3.0, i as f32 * 16.0);
            assert!(tracker.len() <= VELOCITY_WINDOW);
        }
        assert_eq!(tracker.len(), VELOCITY_WINDOW);

        // Oldest surviving sample is the 46th push
        let first = tracker.samples().next().unwrap();
        assert_eq!(first.elapsed, 45.0 * 16.0);
    }

    #[test]
    fn test_estimate_from_endpoints() {
        let mut tracker = VelocityTracker::new();
        tracker.push(0.0, 0.0);
        tracker.push(150.0, 80.0);

        let estimate = tracker.estimate().unwrap();
        assert!((estimate.velocity - 1.875).abs() < 1e-6);
        assert_eq!(estimate.travel, 150.0);
    }

    #[test]
    fn test_empty_window_uses_fallback() {
        let mut tracker = VelocityTracker::new();
        assert!(tracker.estimate().is_none());

        let estimate = tracker.take_estimate(320.0);
        assert_eq!(estimate, VelocityEstimate::fallback(320.0));
    }

    #[test]
    fn test_single_sample_has_no_velocity() {
        let mut tracker = VelocityTracker::new();
        tracker.push(12.0, 30.0);

        let estimate = tracker.estimate().unwrap();
        assert_eq!(estimate.velocity, 0.0);
        assert_eq!(estimate.travel, 0.0);
    }

    #[test]
    fn test_take_estimate_clears() {
        let mut tracker = VelocityTracker::new();
        tracker.push(0.0, 0.0);
        tracker.push(-40.0, 10.0);

        let estimate = tracker.take_estimate(320.0);
        assert_eq!(estimate.velocity, -4.0);
        assert!(tracker.is_empty());
    }
}
