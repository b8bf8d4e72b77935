//! Flick Host Abstraction Layer
//!
//! This crate provides the capability traits a paged carousel needs from its
//! environment, plus the plain input types it consumes.
//!
//! # Architecture
//!
//! The host abstraction is split into small traits, combined by [`Host`]:
//!
//! - [`ElementTree`] - Measurement and containment queries
//! - [`EventBinder`] - Listener registration
//! - [`FrameScheduler`] - Per-frame callbacks and the clock
//! - [`Timers`] - One-shot delayed callbacks
//!
//! # Host Implementations
//!
//! - [`headless::HeadlessHost`] - In-memory host with a virtual clock
//!
//! # Example
//!
//! ```ignore
//! use flick_platform::prelude::*;
//! use flick_platform::headless::HeadlessHost;
//!
//! let mut host = HeadlessHost::new();
//! let container = host.create_element(Size::new(320.0, 480.0));
//! let strip = host.create_element(Size::new(960.0, 480.0));
//! host.append_child(container, strip)?;
//! ```

mod error;
mod event;
pub mod headless;
mod host;
mod input;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{Binding, EventKind, EventResponse, ListenerTarget};
pub use host::{
    Capabilities, ElementId, ElementTree, EventBinder, FrameScheduler, Host, Size, TimerId, Timers,
};
pub use input::{Axis, Contacts, InputEvent, Point};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{Binding, EventKind, EventResponse, ListenerTarget};
    pub use crate::host::{
        Capabilities, ElementId, ElementTree, EventBinder, FrameScheduler, Host, Size, TimerId,
        Timers,
    };
    pub use crate::input::{Axis, Contacts, InputEvent, Point};
}
