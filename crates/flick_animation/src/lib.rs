//! Flick Motion Engine
//!
//! Time-based easing for paged strips.
//!
//! # Features
//!
//! - **Easing Curves**: Quartic ease-out and back ease-out (bounce), or custom closures
//! - **Velocity Tracking**: Bounded window of drag samples for release velocity
//! - **Motion Engine**: Drag following, paging, settle detection and notifications
//! - **Frame Loop**: Lazily restarted, self-rescheduling frame requests

pub mod easing;
pub mod frame;
pub mod motion;
pub mod velocity;

pub use easing::{back_out, quart_out, Easing, EasingFn, DEFAULT_OVERSHOOT};
pub use frame::FrameLoop;
pub use motion::{
    Animation, EasingKind, MotionConfig, MotionEngine, MotionEvent, MotionEvents,
    SETTLE_THRESHOLD,
};
pub use velocity::{
    VelocityEstimate, VelocitySample, VelocityTracker, FALLBACK_VELOCITY, VELOCITY_WINDOW,
};
