//! Scenario files
//!
//! A scenario describes a carousel, the size of its container and strip, and
//! a timeline of input steps:
//!
//! ```toml
//! [carousel]
//! dbltap = true
//!
//! [layout]
//! container = [320, 480]
//! inner = [960, 480]
//!
//! [[steps]]
//! at = 0
//! action = "down"
//! x = 250
//! y = 100
//!
//! [[steps]]
//! at = 150
//! action = "up"
//! x = 50
//! y = 100
//! ```

use anyhow::{Context, Result};
use flick_carousel::{CarouselConfig, PointerPhase, PointerSource};
use flick_platform::{Point, Size};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A complete replayable scenario
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub carousel: CarouselConfig,
    pub layout: Layout,
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Fixed time to run after the last step; settles fully when absent
    #[serde(default)]
    pub settle_ms: Option<f64>,
}

/// Container and strip sizes as `[width, height]`
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Layout {
    pub container: [f32; 2],
    pub inner: [f32; 2],
}

impl Layout {
    pub fn container_size(&self) -> Size {
        Size::new(self.container[0], self.container[1])
    }

    pub fn inner_size(&self) -> Size {
        Size::new(self.inner[0], self.inner[1])
    }
}

/// One timed input
#[derive(Clone, Debug, Deserialize)]
pub struct Step {
    /// Virtual time in milliseconds
    pub at: f64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Down {
        x: f32,
        y: f32,
        #[serde(default)]
        source: PointerSource,
    },
    Move {
        x: f32,
        y: f32,
        #[serde(default)]
        source: PointerSource,
    },
    Up {
        x: f32,
        y: f32,
        #[serde(default)]
        source: PointerSource,
    },
    Cancel {
        x: f32,
        y: f32,
        #[serde(default)]
        source: PointerSource,
    },
    Resize {
        container: [f32; 2],
        inner: [f32; 2],
    },
    AnimateTo {
        index: isize,
    },
    JumpTo {
        index: isize,
    },
    /// Only lets time pass
    Wait,
}

impl Action {
    /// Pointer parameters, if this is a pointer step
    pub fn pointer(&self) -> Option<(PointerSource, PointerPhase, Point)> {
        let (source, phase, x, y) = match *self {
            Action::Down { x, y, source } => (source, PointerPhase::Down, x, y),
            Action::Move { x, y, source } => (source, PointerPhase::Move, x, y),
            Action::Up { x, y, source } => (source, PointerPhase::Up, x, y),
            Action::Cancel { x, y, source } => (source, PointerPhase::Cancel, x, y),
            _ => return None,
        };
        Some((source, phase, Point::new(x, y)))
    }
}

impl Scenario {
    /// Load and validate a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let scenario: Scenario = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check everything the replay relies on
    pub fn validate(&self) -> Result<()> {
        self.carousel.validate()?;

        for (name, [width, height]) in [
            ("container", self.layout.container),
            ("inner", self.layout.inner),
        ] {
            if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
                anyhow::bail!("layout.{} must be a non-negative size", name);
            }
        }

        let mut previous = 0.0;
        for (i, step) in self.steps.iter().enumerate() {
            if !step.at.is_finite() || step.at < previous {
                anyhow::bail!(
                    "step {} at {}ms is out of order (previous step at {}ms)",
                    i + 1,
                    step.at,
                    previous
                );
            }
            previous = step.at;
        }

        if let Some(ms) = self.settle_ms {
            if !ms.is_finite() || ms < 0.0 {
                anyhow::bail!("settle_ms must be a non-negative number");
            }
        }
        Ok(())
    }

    /// Time of the last step
    pub fn duration(&self) -> f64 {
        self.steps.last().map_or(0.0, |step| step.at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWIPE: &str = r#"
        [carousel]
        dbltap = true

        [layout]
        container = [320, 480]
        inner = [960, 480]

        [[steps]]
        at = 0
        action = "down"
        x = 250
        y = 100

        [[steps]]
        at = 150
        action = "move"
        x = 50.5
        y = 100
        source = "touch"

        [[steps]]
        at = 150
        action = "up"
        x = 50
        y = 100

        [[steps]]
        at = 900
        action = "jump_to"
        index = -3

        [[steps]]
        at = 1200
        action = "wait"
    "#;

    #[test]
    fn test_parse_scenario() {
        let scenario: Scenario = toml::from_str(SWIPE).unwrap();
        assert!(scenario.validate().is_ok());
        assert!(scenario.carousel.dbltap);
        assert_eq!(scenario.layout.container_size(), Size::new(320.0, 480.0));
        assert_eq!(scenario.steps.len(), 5);
        assert_eq!(scenario.duration(), 1200.0);

        let (source, phase, point) = scenario.steps[1].action.pointer().unwrap();
        assert_eq!(source, PointerSource::Touch);
        assert_eq!(phase, PointerPhase::Move);
        assert_eq!(point, Point::new(50.5, 100.0));

        assert!(matches!(scenario.steps[3].action, Action::JumpTo { index: -3 }));
        assert!(scenario.steps[4].action.pointer().is_none());
    }

    #[test]
    fn test_out_of_order_steps_rejected() {
        let scenario: Scenario = toml::from_str(
            r#"
            [layout]
            container = [320, 480]
            inner = [960, 480]

            [[steps]]
            at = 100
            action = "wait"

            [[steps]]
            at = 50
            action = "wait"
            "#,
        )
        .unwrap();
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_bad_carousel_config_rejected() {
        let scenario: Scenario = toml::from_str(
            r#"
            [carousel]
            duration = 0

            [layout]
            container = [320, 480]
            inner = [960, 480]
            "#,
        )
        .unwrap();
        assert!(scenario.validate().is_err());
    }
}
