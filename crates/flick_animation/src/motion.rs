//! Paged motion engine
//!
//! Owns the visual offset of a paged strip and moves it toward a target page
//! with time-based easing. The engine is driven externally: callers feed it
//! drag targets and page requests, then call [`MotionEngine::advance`] once
//! per frame and forward the returned notifications.
//!
//! Offsets follow the forward-paging convention: page `i` rests at
//! `-i * extent`, so positions are zero or negative in the normal range.

use smallvec::SmallVec;

use crate::easing::Easing;
use crate::velocity::VelocityTracker;

/// Remaining distance at which an animation snaps to its target
pub const SETTLE_THRESHOLD: f32 = 1.0;

/// Release speed (px/ms) above which bounce easing may be used
pub const BOUNCE_VELOCITY: f32 = 2.5;

/// Fraction of a page the release must travel for bounce easing
pub const BOUNCE_TRAVEL_RATIO: f32 = 0.35;

/// Travel distance that maps to the nominal duration
pub const DURATION_REFERENCE: f32 = 768.0;

/// Bounds of the duration scale factor
pub const DURATION_SCALE_MIN: f32 = 0.6;
pub const DURATION_SCALE_MAX: f32 = 1.2;

/// Tolerance for "drag started on a page boundary"
const EDGE_EPSILON: f32 = 0.5;

/// Timing and easing parameters
#[derive(Clone, Debug)]
pub struct MotionConfig {
    /// Nominal transition duration in milliseconds
    pub duration: f32,
    /// Curve for ordinary transitions
    pub easing: Easing,
    /// Curve for fast flings away from an edge
    pub bounce_easing: Easing,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            duration: 600.0,
            easing: Easing::QuartOut,
            bounce_easing: Easing::bounce(),
        }
    }
}

/// Which configured curve an animation uses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EasingKind {
    Primary,
    Bounce,
}

/// An eased transition in flight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    pub start_position: f32,
    pub distance: f32,
    /// Host time the transition started (ms)
    pub start_time: f64,
    /// Length of the transition (ms)
    pub duration: f32,
    pub easing: EasingKind,
}

/// Notifications produced by the engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionEvent {
    /// Position changed; `value` is the position in pages (0.0 = first page)
    Change { value: f32, position: f32 },
    /// The requested page changed
    Page { index: usize },
    /// Motion settled on a page
    Complete { index: usize },
}

/// Notifications from a single engine call
pub type MotionEvents = SmallVec<[MotionEvent; 4]>;

/// Position, target and animation state of one paged strip
#[derive(Clone, Debug)]
pub struct MotionEngine {
    config: MotionConfig,
    extent: f32,
    page_count: usize,
    current_index: usize,
    projected_index: usize,
    position: f32,
    target: f32,
    dragging: bool,
    /// Position when the most recent drag began
    drag_origin: Option<f32>,
    velocity: VelocityTracker,
    animation: Option<Animation>,
}

impl MotionEngine {
    /// Create an engine resting at the origin
    ///
    /// `start_index` is kept as the current page until [`layout`](Self::layout)
    /// provides the page geometry that validates and places it.
    pub fn new(config: MotionConfig, start_index: usize) -> Self {
        Self {
            config,
            extent: 0.0,
            page_count: 1,
            current_index: start_index,
            projected_index: start_index,
            position: 0.0,
            target: 0.0,
            dragging: false,
            drag_origin: None,
            velocity: VelocityTracker::new(),
            animation: None,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn last_index(&self) -> usize {
        self.page_count.saturating_sub(1)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn projected_index(&self) -> usize {
        self.projected_index
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn velocity(&self) -> &VelocityTracker {
        &self.velocity
    }

    /// True while another frame is needed
    pub fn is_active(&self) -> bool {
        self.dragging || self.animation.is_some()
    }

    /// Position expressed in pages
    pub fn normalized(&self) -> f32 {
        if self.extent > 0.0 {
            -self.position / self.extent
        } else {
            0.0
        }
    }

    /// Clamp any requested index into `[0, page_count - 1]`
    pub fn clamp_index(&self, index: isize) -> usize {
        let last = isize::try_from(self.last_index()).unwrap_or(isize::MAX);
        index.clamp(0, last) as usize
    }

    /// Resting offset of a page
    pub fn offset_of(&self, index: usize) -> f32 {
        -(index as f32) * self.extent
    }

    /// Apply new page geometry
    ///
    /// A non-zero current page is re-validated and re-placed at its resting
    /// offset; page zero keeps its position.
    pub fn layout(&mut self, extent: f32, page_count: usize) {
        self.extent = extent;
        self.page_count = page_count.max(1);
        if self.current_index != 0 {
            let index = self.clamp_index(self.current_index as isize);
            self.current_index = index;
            self.projected_index = index;
            self.position = self.offset_of(index);
            self.target = self.position;
        }
        tracing::debug!(
            "motion layout: extent={} pages={} index={}",
            self.extent,
            self.page_count,
            self.current_index
        );
    }

    /// Take hold of the strip at its current visual position
    ///
    /// Starts a fresh velocity window and freezes any running animation where
    /// it is. Returns the correction term between the visual position and the
    /// current page's resting offset, so a drag continues from what the user
    /// sees.
    pub fn grab(&mut self) -> f32 {
        self.dragging = true;
        self.drag_origin = Some(self.position);
        self.velocity.clear();
        match self.animation.take() {
            Some(_) => {
                self.target = self.position;
                self.position + self.extent * self.current_index as f32
            }
            None => 0.0,
        }
    }

    /// Set the drag target; applied on the next [`advance`](Self::advance)
    pub fn drag_to(&mut self, target: f32) {
        self.target = target;
    }

    /// Record a drag reading for the release velocity
    pub fn record_sample(&mut self, delta: f32, elapsed: f32) {
        self.velocity.push(delta, elapsed);
    }

    /// Let go of the strip
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Retarget toward a page, clamping out-of-range requests
    pub fn request_animation(&mut self, index: isize) -> MotionEvents {
        let mut events = MotionEvents::new();
        let index = self.clamp_index(index);
        if index != self.current_index {
            events.push(MotionEvent::Page { index });
        }
        self.target = self.offset_of(index);
        self.current_index = index;
        self.projected_index = index;
        tracing::trace!("animate to page {} (target {})", index, self.target);
        events
    }

    /// Move to a page without animating
    ///
    /// Follow with a forced [`advance`](Self::advance) so observers see the
    /// new position.
    pub fn jump_to(&mut self, index: isize) -> MotionEvents {
        let mut events = MotionEvents::new();
        let index = self.clamp_index(index);
        if index != self.current_index {
            events.push(MotionEvent::Page { index });
            events.push(MotionEvent::Complete { index });
        }
        self.target = self.offset_of(index);
        self.position = self.target;
        self.current_index = index;
        self.projected_index = index;
        self.animation = None;
        tracing::trace!("jump to page {}", index);
        events
    }

    /// Advance one frame
    ///
    /// `force` emits a change notification even when the position did not
    /// move. Check [`is_active`](Self::is_active) afterwards to decide whether
    /// to schedule another frame.
    pub fn advance(&mut self, now: f64, force: bool) -> MotionEvents {
        let mut events = MotionEvents::new();
        let previous = self.position;
        let distance = self.target - self.position;

        if self.dragging || distance.abs() <= SETTLE_THRESHOLD {
            self.position = self.target;
            if self.animation.take().is_some() {
                let settled = if self.extent > 0.0 {
                    (self.position.abs() / self.extent).round() as isize
                } else {
                    0
                };
                let index = self.clamp_index(settled);
                self.current_index = index;
                self.projected_index = index;
                tracing::trace!("settled on page {}", index);
                events.push(MotionEvent::Complete { index });
            }
        } else {
            let animation = match self.animation {
                Some(animation) => animation,
                None => {
                    let animation = self.plan(now, distance);
                    self.animation = Some(animation);
                    animation
                }
            };
            let elapsed = ((now - animation.start_time) as f32).clamp(0.0, animation.duration);
            let easing = match animation.easing {
                EasingKind::Primary => &self.config.easing,
                EasingKind::Bounce => &self.config.bounce_easing,
            };
            self.position = easing.apply(
                elapsed,
                animation.start_position,
                animation.distance,
                animation.duration,
            );
        }

        if force || self.position != previous {
            events.push(MotionEvent::Change {
                value: self.normalized(),
                position: self.position,
            });
        }
        events
    }

    /// Build the descriptor for a new transition covering `distance`
    fn plan(&mut self, now: f64, distance: f32) -> Animation {
        let estimate = self.velocity.take_estimate(self.extent);

        let resting = (self.current_index as f32 * self.extent).abs();
        let is_edge = self
            .drag_origin
            .is_some_and(|origin| (origin.abs() - resting).abs() < EDGE_EPSILON);

        let bounce = !is_edge
            && self.extent > 0.0
            && estimate.velocity.abs() > BOUNCE_VELOCITY
            && estimate.travel.abs() / self.extent > BOUNCE_TRAVEL_RATIO;

        let mut duration = self.config.duration;
        if !is_edge {
            duration *= (distance / DURATION_REFERENCE)
                .abs()
                .clamp(DURATION_SCALE_MIN, DURATION_SCALE_MAX);
        }

        tracing::trace!(
            "new animation: distance={} velocity={:.3} travel={} edge={} bounce={} duration={}",
            distance,
            estimate.velocity,
            estimate.travel,
            is_edge,
            bounce,
            duration
        );

        Animation {
            start_position: self.position,
            distance,
            start_time: now,
            duration,
            easing: if bounce {
                EasingKind::Bounce
            } else {
                EasingKind::Primary
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(pages: usize) -> MotionEngine {
        let mut engine = MotionEngine::new(MotionConfig::default(), 0);
        engine.layout(320.0, pages);
        engine
    }

    /// Tick at 16ms intervals until idle, returning every notification
    fn run_to_rest(engine: &mut MotionEngine, mut now: f64) -> Vec<MotionEvent> {
        let mut all = Vec::new();
        for _ in 0..500 {
            all.extend(engine.advance(now, false));
            if !engine.is_active() {
                break;
            }
            now += 16.0;
        }
        all
    }

    #[test]
    fn test_clamp_index() {
        let engine = engine(3);
        assert_eq!(engine.clamp_index(-4), 0);
        assert_eq!(engine.clamp_index(1), 1);
        assert_eq!(engine.clamp_index(99), 2);
    }

    #[test]
    fn test_clamp_index_with_huge_page_count() {
        let mut engine = engine(usize::MAX);
        assert_eq!(engine.clamp_index(-1), 0);
        assert_eq!(engine.clamp_index(isize::MAX), isize::MAX as usize);

        let events = engine.request_animation(3);
        assert!(events.contains(&MotionEvent::Page { index: 3 }));
        assert_eq!(engine.target(), -960.0);
    }

    #[test]
    fn test_layout_places_nonzero_start() {
        let mut engine = MotionEngine::new(MotionConfig::default(), 7);
        engine.layout(100.0, 4);
        assert_eq!(engine.current_index(), 3);
        assert_eq!(engine.projected_index(), 3);
        assert_eq!(engine.position(), -300.0);
        assert_eq!(engine.target(), -300.0);
    }

    #[test]
    fn test_request_animation_settles_on_page() {
        let mut engine = engine(3);

        let events = engine.request_animation(1);
        assert_eq!(events.as_slice(), &[MotionEvent::Page { index: 1 }]);
        assert_eq!(engine.target(), -320.0);

        let events = run_to_rest(&mut engine, 0.0);
        assert_eq!(engine.position(), -320.0);
        assert!(!engine.is_animating());
        assert!(events.contains(&MotionEvent::Complete { index: 1 }));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, MotionEvent::Complete { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_request_same_page_has_no_page_event() {
        let mut engine = engine(3);
        assert!(engine.request_animation(0).is_empty());
        assert!(engine.advance(0.0, false).is_empty());
        assert!(!engine.is_active());
    }

    #[test]
    fn test_out_of_range_requests_clamp() {
        let mut engine = engine(3);
        engine.request_animation(10);
        assert_eq!(engine.current_index(), 2);
        run_to_rest(&mut engine, 0.0);
        assert_eq!(engine.position(), -640.0);

        engine.request_animation(-3);
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn test_jump_to_is_immediate() {
        let mut engine = engine(3);
        let mut events = engine.jump_to(2);
        assert_eq!(
            events.as_slice(),
            &[
                MotionEvent::Page { index: 2 },
                MotionEvent::Complete { index: 2 }
            ]
        );
        assert_eq!(engine.position(), -640.0);

        events = engine.advance(0.0, true);
        assert_eq!(
            events.as_slice(),
            &[MotionEvent::Change {
                value: 2.0,
                position: -640.0
            }]
        );
        assert!(!engine.is_active());
    }

    #[test]
    fn test_drag_snaps_position() {
        let mut engine = engine(3);
        assert_eq!(engine.grab(), 0.0);
        engine.drag_to(-57.0);

        let events = engine.advance(10.0, false);
        assert_eq!(engine.position(), -57.0);
        assert!(matches!(events[0], MotionEvent::Change { position, .. } if position == -57.0));
        assert!(engine.is_active());
    }

    #[test]
    fn test_grab_mid_flight_freezes_and_offsets() {
        let mut engine = engine(3);
        engine.request_animation(1);
        engine.advance(0.0, false);
        engine.advance(100.0, false);
        let visual = engine.position();
        assert!(visual < 0.0 && visual > -320.0);

        let offset = engine.grab();
        assert!(engine.animation().is_none());
        assert_eq!(engine.target(), visual);
        assert!((offset - (visual + 320.0)).abs() < 1e-4);
    }

    #[test]
    fn test_grab_starts_fresh_velocity_window() {
        let mut engine = engine(3);
        engine.grab();
        engine.record_sample(0.0, 0.0);
        engine.record_sample(-0.5, 40.0);
        engine.drag_to(-0.5);
        engine.advance(40.0, false);
        engine.release();

        // Released within a pixel, so no animation consumed the samples
        engine.request_animation(0);
        engine.advance(40.0, false);
        assert!(!engine.is_animating());
        assert_eq!(engine.velocity().len(), 2);

        engine.grab();
        assert!(engine.velocity().is_empty());
    }

    #[test]
    fn test_slow_release_uses_primary_easing() {
        let mut engine = engine(3);
        engine.grab();
        engine.record_sample(0.0, 0.0);
        engine.record_sample(-150.0, 80.0);
        engine.drag_to(-150.0);
        engine.advance(80.0, false);
        engine.release();

        engine.request_animation(1);
        engine.advance(80.0, false);
        let animation = engine.animation().unwrap();
        assert_eq!(animation.easing, EasingKind::Primary);
        assert!(engine.velocity().is_empty());
    }

    #[test]
    fn test_fast_fling_away_from_edge_bounces() {
        let mut engine = engine(3);
        engine.request_animation(1);
        engine.advance(0.0, false);
        engine.advance(100.0, false);

        // Grabbed mid-flight, so the drag did not start on a page boundary
        engine.grab();
        engine.record_sample(0.0, 0.0);
        engine.record_sample(-200.0, 40.0);
        engine.release();
        engine.request_animation(2);
        engine.advance(200.0, false);

        assert_eq!(engine.animation().unwrap().easing, EasingKind::Bounce);
    }

    #[test]
    fn test_edge_drag_keeps_nominal_duration() {
        let mut engine = engine(3);
        engine.grab();
        engine.drag_to(-100.0);
        engine.advance(0.0, false);
        engine.release();
        engine.request_animation(0);
        engine.advance(0.0, false);

        assert_eq!(engine.animation().unwrap().duration, 600.0);
    }

    #[test]
    fn test_duration_scales_with_distance() {
        let mut engine = engine(3);
        // No drag yet: never counts as an edge
        engine.request_animation(1);
        engine.advance(0.0, false);
        // 320 / 768 is below the lower clamp
        assert!((engine.animation().unwrap().duration - 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_animation_lands_exactly_on_target() {
        let mut engine = engine(3);
        engine.request_animation(1);
        engine.advance(0.0, false);
        engine.advance(5000.0, false);
        assert_eq!(engine.position(), -320.0);

        let events = engine.advance(5016.0, false);
        assert_eq!(events.as_slice(), &[MotionEvent::Complete { index: 1 }]);
    }
}
