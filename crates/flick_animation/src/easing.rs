//! Easing curves
//!
//! Every curve has the classic Penner signature `(t, start, delta, duration)`:
//! `t` is the elapsed time, `start` the initial value, `delta` the total change
//! and `duration` the length of the transition (same unit as `t`).

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Overshoot constant for the default bounce curve
pub const DEFAULT_OVERSHOOT: f32 = 2.0158;

/// User-supplied easing curve
pub type EasingFn = Arc<dyn Fn(f32, f32, f32, f32) -> f32 + Send + Sync>;

/// An easing curve selectable by configuration
#[derive(Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    /// Quartic ease-out
    QuartOut,
    /// Back ease-out: overshoots the target, then settles
    BackOut {
        #[serde(default = "default_overshoot")]
        overshoot: f32,
    },
    /// Custom curve
    #[serde(skip)]
    Custom(EasingFn),
}

fn default_overshoot() -> f32 {
    DEFAULT_OVERSHOOT
}

impl Easing {
    /// Back ease-out with the default overshoot
    pub fn bounce() -> Self {
        Easing::BackOut {
            overshoot: DEFAULT_OVERSHOOT,
        }
    }

    /// Wrap a closure as an easing curve
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32, f32, f32, f32) -> f32 + Send + Sync + 'static,
    {
        Easing::Custom(Arc::new(f))
    }

    /// Evaluate the curve
    pub fn apply(&self, t: f32, start: f32, delta: f32, duration: f32) -> f32 {
        match self {
            Easing::QuartOut => quart_out(t, start, delta, duration),
            Easing::BackOut { overshoot } => back_out(t, start, delta, duration, *overshoot),
            Easing::Custom(f) => f(t, start, delta, duration),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::QuartOut
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::QuartOut => f.write_str("QuartOut"),
            Easing::BackOut { overshoot } => f
                .debug_struct("BackOut")
                .field("overshoot", overshoot)
                .finish(),
            Easing::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// `-delta * ((t/d - 1)^4 - 1) + start`
pub fn quart_out(t: f32, start: f32, delta: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return start + delta;
    }
    let p = t / duration - 1.0;
    -delta * (p * p * p * p - 1.0) + start
}

/// `delta * (p * (p * ((s + 1) * p + s) + 1)) + start` with `p = t/d - 1`
pub fn back_out(t: f32, start: f32, delta: f32, duration: f32, overshoot: f32) -> f32 {
    if duration <= 0.0 {
        return start + delta;
    }
    let p = t / duration - 1.0;
    delta * (p * (p * ((overshoot + 1.0) * p + overshoot) + 1.0)) + start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_quart_out_endpoints() {
        assert!(approx(quart_out(0.0, 10.0, -320.0, 600.0), 10.0));
        assert!(approx(quart_out(600.0, 10.0, -320.0, 600.0), -310.0));
    }

    #[test]
    fn test_quart_out_is_front_loaded() {
        // Half the time covers far more than half the distance
        let half = quart_out(300.0, 0.0, 100.0, 600.0);
        assert!(approx(half, 93.75));
    }

    #[test]
    fn test_back_out_overshoots() {
        assert!(approx(back_out(0.0, 0.0, 100.0, 600.0, DEFAULT_OVERSHOOT), 0.0));
        assert!(approx(back_out(600.0, 0.0, 100.0, 600.0, DEFAULT_OVERSHOOT), 100.0));

        let peak = (1..600)
            .map(|t| back_out(t as f32, 0.0, 100.0, 600.0, DEFAULT_OVERSHOOT))
            .fold(f32::MIN, f32::max);
        assert!(peak > 100.0);
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        assert_eq!(quart_out(0.0, 5.0, 10.0, 0.0), 15.0);
        assert_eq!(back_out(0.0, 5.0, 10.0, 0.0, DEFAULT_OVERSHOOT), 15.0);
    }

    #[test]
    fn test_custom_easing() {
        let linear = Easing::custom(|t, b, c, d| b + c * t / d);
        assert!(approx(linear.apply(50.0, 0.0, 200.0, 100.0), 100.0));
        assert_eq!(format!("{linear:?}"), "Custom(..)");
    }

    #[test]
    fn test_easing_dispatch() {
        assert!(approx(
            Easing::QuartOut.apply(300.0, 0.0, 100.0, 600.0),
            quart_out(300.0, 0.0, 100.0, 600.0)
        ));
        assert!(approx(
            Easing::bounce().apply(300.0, 0.0, 100.0, 600.0),
            back_out(300.0, 0.0, 100.0, 600.0, DEFAULT_OVERSHOOT)
        ));
    }
}
