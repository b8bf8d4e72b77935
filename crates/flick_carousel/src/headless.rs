//! Driving a carousel on the in-memory host
//!
//! Adds a virtual-time pump and synthetic pointer input to
//! `Carousel<HeadlessHost>`. Used by the integration tests and the replay
//! tool.

use flick_platform::headless::{HeadlessHost, Wake};
use flick_platform::{ElementId, EventKind, EventResponse, InputEvent, Point, Size};
use serde::Deserialize;

use crate::carousel::Carousel;
use crate::config::CarouselConfig;
use crate::error::Result;

/// Upper bound on how long [`Carousel::settle`] waits for motion to stop (ms)
pub const SETTLE_LIMIT_MS: f64 = 10_000.0;

/// Which kind of device synthetic input comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerSource {
    #[default]
    Touch,
    Mouse,
}

/// Stage of a synthetic press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerSource {
    /// Host event kind for a phase; a mouse has no cancel and reports an up
    pub fn event_kind(self, phase: PointerPhase) -> EventKind {
        match (self, phase) {
            (PointerSource::Touch, PointerPhase::Down) => EventKind::TouchStart,
            (PointerSource::Touch, PointerPhase::Move) => EventKind::TouchMove,
            (PointerSource::Touch, PointerPhase::Up) => EventKind::TouchEnd,
            (PointerSource::Touch, PointerPhase::Cancel) => EventKind::TouchCancel,
            (PointerSource::Mouse, PointerPhase::Down) => EventKind::MouseDown,
            (PointerSource::Mouse, PointerPhase::Move) => EventKind::MouseMove,
            (PointerSource::Mouse, PointerPhase::Up | PointerPhase::Cancel) => EventKind::MouseUp,
        }
    }
}

/// Build a container holding a strip and mount a carousel on it
pub fn mount(
    container: Size,
    inner: Size,
    config: CarouselConfig,
) -> Result<Carousel<HeadlessHost>> {
    let mut host = HeadlessHost::new();
    let container_id = host.create_element(container);
    let inner_id = host.create_element(inner);
    host.append_child(container_id, inner_id)?;
    Carousel::new(host, container_id, config)
}

impl Carousel<HeadlessHost> {
    /// Current virtual time (ms)
    pub fn now(&self) -> f64 {
        self.host().clock().now()
    }

    /// Run every frame and timer callback due up to `until`
    pub fn pump(&mut self, until: f64) {
        while let Some(wake) = self.host_mut().advance(until) {
            self.wake(wake);
        }
    }

    /// Let `ms` of virtual time pass
    pub fn pump_for(&mut self, ms: f64) {
        let until = self.now() + ms;
        self.pump(until);
    }

    /// Run until no frame or timer is outstanding
    ///
    /// Returns the virtual time at which everything went quiet.
    pub fn settle(&mut self) -> f64 {
        let deadline = self.now() + SETTLE_LIMIT_MS;
        while self.host().frame_pending() || self.host().pending_timers() > 0 {
            match self.host_mut().advance(deadline) {
                Some(wake) => self.wake(wake),
                None => {
                    tracing::warn!("still moving after {}ms", SETTLE_LIMIT_MS);
                    break;
                }
            }
        }
        self.now()
    }

    fn wake(&mut self, wake: Wake) {
        match wake {
            Wake::Frame => self.on_frame(),
            Wake::Timer(timer) => self.on_timeout(timer),
        }
    }

    /// Feed a synthetic pointer event at the current virtual time
    ///
    /// Presses and releases are dispatched to `target`, or to the strip when
    /// no target is given.
    pub fn pointer(
        &mut self,
        source: PointerSource,
        phase: PointerPhase,
        point: Point,
        target: Option<ElementId>,
    ) -> EventResponse {
        let event = InputEvent::pointer(source.event_kind(phase), self.now(), point)
            .with_target(target.unwrap_or(self.inner()));
        self.handle_event(&event)
    }

    pub fn press(&mut self, point: Point) -> EventResponse {
        self.pointer(PointerSource::Touch, PointerPhase::Down, point, None)
    }

    pub fn move_to(&mut self, point: Point) -> EventResponse {
        self.pointer(PointerSource::Touch, PointerPhase::Move, point, None)
    }

    pub fn lift(&mut self, point: Point) -> EventResponse {
        self.pointer(PointerSource::Touch, PointerPhase::Up, point, None)
    }

    /// Press at `from`, glide to `to` over `duration_ms` in frame-sized
    /// steps, and release there
    pub fn swipe(&mut self, from: Point, to: Point, duration_ms: f64) {
        let steps = (duration_ms / flick_platform::headless::FRAME_INTERVAL_MS)
            .ceil()
            .max(1.0) as usize;
        let start = self.now();
        self.press(from);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.pump(start + duration_ms * step as f64 / steps as f64);
            self.move_to(Point::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ));
        }
        self.lift(to);
    }

    /// Press and release in place
    pub fn tap(&mut self, point: Point) {
        self.press(point);
        self.pump_for(50.0);
        self.lift(point);
    }

    /// Resize the container and deliver the resize event
    pub fn resize(&mut self, container: Size, inner: Size) -> Result<()> {
        let (container_id, inner_id) = (self.container(), self.inner());
        self.host_mut().set_size(container_id, container)?;
        self.host_mut().set_size(inner_id, inner)?;
        let event = InputEvent::new(EventKind::Resize, self.now());
        self.handle_event(&event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_source_maps_cancel_to_up() {
        assert_eq!(
            PointerSource::Mouse.event_kind(PointerPhase::Cancel),
            EventKind::MouseUp
        );
        assert_eq!(
            PointerSource::Touch.event_kind(PointerPhase::Cancel),
            EventKind::TouchCancel
        );
    }

    #[test]
    fn test_settle_after_animate() {
        let mut carousel = mount(
            Size::new(320.0, 480.0),
            Size::new(960.0, 480.0),
            CarouselConfig::default(),
        )
        .unwrap();

        carousel.animate_to(2);
        assert!(carousel.is_animating());
        let quiet_at = carousel.settle();

        assert_eq!(carousel.index(), 2);
        assert_eq!(carousel.position(), -640.0);
        assert!(!carousel.is_animating());
        assert!(quiet_at > 0.0);
        assert!(quiet_at < 1000.0);
    }
}
