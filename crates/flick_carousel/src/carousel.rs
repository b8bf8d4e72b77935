//! The carousel façade
//!
//! [`Carousel`] wires a host to the gesture interpreter, the tap detector and
//! the motion engine. The host forwards raw input through
//! [`handle_event`](Carousel::handle_event) and calls back into
//! [`on_frame`](Carousel::on_frame) and [`on_timeout`](Carousel::on_timeout)
//! when the callbacks it was asked for come due.

use flick_animation::{FrameLoop, MotionEngine, MotionEvent};
use flick_platform::{
    Binding, ElementId, EventKind, EventResponse, Host, InputEvent, ListenerTarget, TimerId,
};
use smallvec::{smallvec, SmallVec};

use crate::config::CarouselConfig;
use crate::emitter::{CarouselEvent, CarouselEventKind, Emitter, ListenerId};
use crate::error::{CarouselError, Result};
use crate::gesture::GestureInterpreter;
use crate::tap::{TapDetector, TapOutcome};

/// A paged strip driven by touch and mouse gestures
///
/// The carousel owns its host. Every instance keeps its own drag, velocity
/// and tap state, so any number of carousels can share a page.
pub struct Carousel<H: Host> {
    host: H,
    container: ElementId,
    inner: ElementId,
    config: CarouselConfig,
    engine: MotionEngine,
    gestures: GestureInterpreter,
    taps: TapDetector,
    frames: FrameLoop,
    emitter: Emitter,
    bindings: SmallVec<[Binding; 10]>,
    destroyed: bool,
}

impl<H: Host> Carousel<H> {
    /// Mount a carousel on `container`
    ///
    /// The first child of the container is the strip that moves. Nothing is
    /// registered with the host unless every check passes.
    pub fn new(mut host: H, container: ElementId, config: CarouselConfig) -> Result<Self> {
        config.validate()?;

        let capabilities = host.capabilities();
        if !capabilities.is_supported() {
            let missing = capabilities.missing().join(", ");
            tracing::warn!("carousel not mounted, host is missing {}", missing);
            return Err(CarouselError::Unsupported(missing));
        }

        let inner = host
            .first_child(container)
            .ok_or(CarouselError::MissingInner)?;

        let bindings = Self::listener_table(container, config.mouse);
        for binding in &bindings {
            host.bind(binding.target, binding.kind);
        }

        let mut carousel = Self {
            engine: MotionEngine::new(config.motion_config(), config.start),
            gestures: GestureInterpreter::new(config.axis()),
            taps: TapDetector::new(config.dbltap),
            frames: FrameLoop::new(),
            emitter: Emitter::new(),
            host,
            container,
            inner,
            config,
            bindings,
            destroyed: false,
        };
        tracing::debug!(
            "carousel mounted: {} listeners, axis {:?}",
            carousel.bindings.len(),
            carousel.config.axis()
        );
        carousel.setup();
        Ok(carousel)
    }

    fn listener_table(container: ElementId, mouse: bool) -> SmallVec<[Binding; 10]> {
        let element = ListenerTarget::Element(container);
        let mut bindings: SmallVec<[Binding; 10]> = smallvec![
            Binding::new(ListenerTarget::Window, EventKind::Resize),
            Binding::new(ListenerTarget::Window, EventKind::OrientationChange),
            Binding::new(element, EventKind::TouchStart),
            Binding::new(ListenerTarget::Document, EventKind::TouchMove),
            Binding::new(ListenerTarget::Document, EventKind::TouchEnd),
            Binding::new(ListenerTarget::Document, EventKind::TouchCancel),
        ];
        if mouse {
            bindings.extend([
                Binding::new(element, EventKind::MouseDown),
                Binding::new(ListenerTarget::Document, EventKind::MouseMove),
                Binding::new(ListenerTarget::Document, EventKind::MouseUp),
            ]);
        }
        bindings
    }

    /// Measure the strip and derive the page geometry
    ///
    /// Safe to call any number of times; resize and orientation change events
    /// call it automatically.
    pub fn setup(&mut self) {
        if self.destroyed {
            return;
        }
        let axis = self.config.axis();
        let extent = self.host.measure(self.container).along(axis);
        let page_count = match self.config.items {
            Some(items) => items,
            None if extent > 0.0 => {
                (self.host.measure(self.inner).along(axis) / extent).ceil() as usize
            }
            None => 1,
        };
        if extent <= 0.0 {
            tracing::warn!(
                "container has no extent along {:?}, treating it as a single page",
                axis
            );
        }
        self.engine.layout(extent, page_count);
        self.run(false);
    }

    /// Route one host event
    ///
    /// Returns what the host should do with the event afterwards.
    pub fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
        if self.destroyed || (event.kind.is_mouse() && !self.config.mouse) {
            return EventResponse::ignored();
        }
        match event.kind {
            EventKind::TouchStart | EventKind::MouseDown => self.on_press(event),
            EventKind::TouchMove | EventKind::MouseMove => self.on_move(event),
            EventKind::TouchEnd | EventKind::TouchCancel | EventKind::MouseUp => {
                self.on_release(event)
            }
            EventKind::Resize | EventKind::OrientationChange => {
                tracing::debug!("{:?}, re-measuring", event.kind);
                self.setup();
                EventResponse::ignored()
            }
        }
    }

    fn on_press(&mut self, event: &InputEvent) -> EventResponse {
        let Some(point) = event.primary() else {
            return EventResponse::ignored();
        };
        self.gestures
            .start(&mut self.engine, point, event.timestamp, event.target);
        self.run(false);
        EventResponse::ignored()
    }

    fn on_move(&mut self, event: &InputEvent) -> EventResponse {
        let outcome = self.gestures.movement(&mut self.engine, event);
        if outcome.cancel_tap {
            self.taps.clear(&mut self.host);
        }
        outcome.response
    }

    fn on_release(&mut self, event: &InputEvent) -> EventResponse {
        let host = &self.host;
        let inner = self.inner;
        let Some(release) = self.gestures.end(
            &mut self.engine,
            event.timestamp,
            event.target,
            |element| host.contains(inner, element),
        ) else {
            return EventResponse::ignored();
        };

        match release.tap {
            Some(candidate) => {
                if let Some(outcome) = self.taps.candidate(candidate, &mut self.host) {
                    self.emit_tap(outcome);
                }
            }
            None => self.taps.clear(&mut self.host),
        }

        if let Some(index) = release.page {
            let events = self.engine.request_animation(index);
            self.dispatch(events);
        }
        self.run(false);
        EventResponse::ignored()
    }

    /// Frame callback requested through the host's frame scheduler
    pub fn on_frame(&mut self) {
        if self.destroyed || !self.frames.begin_frame() {
            return;
        }
        let events = self.engine.advance(self.host.now(), false);
        self.dispatch(events);
        self.frames
            .end_frame(&mut self.host, self.engine.is_active());
    }

    /// Timer callback for a timer armed through the host
    pub fn on_timeout(&mut self, timer: TimerId) {
        if self.destroyed {
            return;
        }
        if let Some(outcome) = self.taps.timeout(timer) {
            self.emit_tap(outcome);
        }
    }

    /// Animate to a page; out-of-range indices are clamped
    pub fn animate_to(&mut self, index: isize) {
        if self.destroyed {
            return;
        }
        if self.engine.clamp_index(index) as isize != index {
            tracing::trace!("animate_to({}) clamped", index);
        }
        let events = self.engine.request_animation(index);
        self.dispatch(events);
        self.run(false);
    }

    /// Show a page immediately; out-of-range indices are clamped
    pub fn jump_to(&mut self, index: isize) {
        if self.destroyed {
            return;
        }
        if self.engine.clamp_index(index) as isize != index {
            tracing::trace!("jump_to({}) clamped", index);
        }
        let events = self.engine.jump_to(index);
        self.dispatch(events);
        self.run(true);
    }

    /// Detach from the host
    ///
    /// Unregisters every host listener and subscriber and disarms the tap
    /// timer. All entry points are inert afterwards.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for binding in self.bindings.drain(..) {
            self.host.unbind(binding.target, binding.kind);
        }
        self.taps.clear(&mut self.host);
        self.frames.stop();
        self.gestures.reset();
        self.emitter.clear();
        self.destroyed = true;
        tracing::debug!("carousel destroyed after {} frames", self.frames.frames());
    }

    /// Subscribe to notifications of one kind
    pub fn on<F>(&mut self, kind: CarouselEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&CarouselEvent) + 'static,
    {
        self.emitter.on(kind, callback)
    }

    /// Unsubscribe; returns false if the id was unknown
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.emitter.off(id)
    }

    /// One tick outside the frame loop, restarting the loop if needed
    fn run(&mut self, force: bool) {
        let events = self.engine.advance(self.host.now(), force);
        self.dispatch(events);
        if self.engine.is_active() {
            self.frames.request(&mut self.host);
        }
    }

    fn dispatch<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = MotionEvent>,
    {
        for event in events {
            self.emitter.emit(event.into());
        }
    }

    fn emit_tap(&mut self, outcome: TapOutcome) {
        let event = match outcome {
            TapOutcome::Tap { target } => CarouselEvent::Tap { target },
            TapOutcome::DoubleTap { target } => CarouselEvent::DoubleTap { target },
        };
        tracing::trace!("{}", event);
        self.emitter.emit(event);
    }

    // Accessors

    /// Settled page
    pub fn index(&self) -> usize {
        self.engine.current_index()
    }

    pub fn projected_index(&self) -> usize {
        self.engine.projected_index()
    }

    pub fn position(&self) -> f32 {
        self.engine.position()
    }

    pub fn target(&self) -> f32 {
        self.engine.target()
    }

    /// Size of one page along the motion axis
    pub fn extent(&self) -> f32 {
        self.engine.extent()
    }

    pub fn page_count(&self) -> usize {
        self.engine.page_count()
    }

    pub fn is_dragging(&self) -> bool {
        self.engine.is_dragging()
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Frames run so far
    pub fn frames_run(&self) -> u64 {
        self.frames.frames()
    }

    /// Subscribers currently attached for `kind`
    pub fn listener_count(&self, kind: CarouselEventKind) -> usize {
        self.emitter.listener_count(kind)
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    pub fn taps(&self) -> &TapDetector {
        &self.taps
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    /// The strip that moves
    pub fn inner(&self) -> ElementId {
        self.inner
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
