//! Carousel configuration

use flick_animation::{Easing, MotionConfig};
use flick_platform::Axis;
use serde::Deserialize;

use crate::error::{CarouselError, Result};

/// Options accepted by [`Carousel::new`](crate::Carousel::new)
///
/// Every field has a default, so a config file only needs to name what it
/// changes:
///
/// ```toml
/// start = 1
/// dbltap = true
/// bounce_easing = { kind = "back_out", overshoot = 1.7 }
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Initial page
    pub start: usize,
    /// Nominal transition duration in milliseconds
    pub duration: f32,
    /// Treat mouse drags like touch drags
    pub mouse: bool,
    /// Distinguish double taps from single taps
    pub dbltap: bool,
    /// Explicit page count instead of measuring the strip
    pub items: Option<usize>,
    /// Page along the vertical axis
    pub vertical: bool,
    /// Curve for ordinary transitions
    pub easing: Easing,
    /// Curve for fast flings
    pub bounce_easing: Easing,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            start: 0,
            duration: 600.0,
            mouse: true,
            dbltap: false,
            items: None,
            vertical: false,
            easing: Easing::QuartOut,
            bounce_easing: Easing::bounce(),
        }
    }
}

impl CarouselConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, index: usize) -> Self {
        self.start = index;
        self
    }

    pub fn duration(mut self, ms: f32) -> Self {
        self.duration = ms;
        self
    }

    pub fn mouse(mut self, enabled: bool) -> Self {
        self.mouse = enabled;
        self
    }

    pub fn double_tap(mut self, enabled: bool) -> Self {
        self.dbltap = enabled;
        self
    }

    pub fn items(mut self, count: usize) -> Self {
        self.items = Some(count);
        self
    }

    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn bounce_easing(mut self, easing: Easing) -> Self {
        self.bounce_easing = easing;
        self
    }

    /// Motion axis
    pub fn axis(&self) -> Axis {
        if self.vertical {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }

    /// Timing and easing handed to the motion engine
    pub fn motion_config(&self) -> MotionConfig {
        MotionConfig {
            duration: self.duration,
            easing: self.easing.clone(),
            bounce_easing: self.bounce_easing.clone(),
        }
    }

    /// Reject values the carousel cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(CarouselError::InvalidConfig(format!(
                "duration must be a positive number of milliseconds, got {}",
                self.duration
            )));
        }
        match self.items {
            Some(0) => {
                return Err(CarouselError::InvalidConfig(
                    "items must be at least 1".to_string(),
                ))
            }
            Some(items) if isize::try_from(items).is_err() => {
                return Err(CarouselError::InvalidConfig(format!(
                    "items must be at most {}, got {}",
                    isize::MAX,
                    items
                )))
            }
            _ => {}
        }
        Ok(())
    }
}
