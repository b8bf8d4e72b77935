//! Flick Carousel
//!
//! A paged strip that follows touch and mouse drags, pages on swipes, and
//! eases between pages.
//!
//! # Features
//!
//! - **Gesture Interpretation**: Pan/scroll latching, edge resistance, slide validity
//! - **Tap Detection**: Single and double taps on one timer-backed state machine
//! - **Notifications**: Typed change/page/complete/tap/dbltap events
//! - **Headless Driving**: Virtual-time pump and synthetic pointer input
//!
//! # Example
//!
//! ```ignore
//! use flick_carousel::prelude::*;
//!
//! let mut carousel = flick_carousel::headless::mount(
//!     Size::new(320.0, 480.0),
//!     Size::new(960.0, 480.0),
//!     CarouselConfig::new().double_tap(true),
//! )?;
//! carousel.on(CarouselEventKind::Page, |event| println!("{event}"));
//! carousel.swipe(Point::new(250.0, 100.0), Point::new(50.0, 100.0), 150.0);
//! carousel.settle();
//! ```

pub mod carousel;
pub mod config;
pub mod emitter;
pub mod error;
pub mod gesture;
pub mod headless;
pub mod tap;

pub use carousel::Carousel;
pub use config::CarouselConfig;
pub use emitter::{CarouselEvent, CarouselEventKind, Emitter, Listener, ListenerId};
pub use error::{CarouselError, Result};
pub use gesture::{Classification, DragState, GestureInterpreter, MoveOutcome, Release};
pub use headless::{mount, PointerPhase, PointerSource};
pub use tap::{TapCandidate, TapDetector, TapOutcome, TapState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::carousel::Carousel;
    pub use crate::config::CarouselConfig;
    pub use crate::emitter::{CarouselEvent, CarouselEventKind, ListenerId};
    pub use crate::error::{CarouselError, Result};
    pub use crate::headless::{PointerPhase, PointerSource};
    pub use flick_animation::Easing;
    pub use flick_platform::{Axis, ElementId, EventKind, EventResponse, InputEvent, Point, Size};
}
