//! Urgency and display color for goals.
//!
//! Maps how long ago a goal was touched, relative to its interval, onto the
//! red-to-green arc of the HSV wheel. Pure functions only.
//!
//! # Invariants
//! - Elapsed time is fractional days; no calendar rounding.
//! - The fraction of the interval is not clamped. Hues outside [0, 360)
//!   (and non-finite ones) render as hue 0.

use crate::model::goal::Goal;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Hue of a goal that needs no attention.
pub const GREEN_HUE: f64 = 120.0;

/// Current wall-clock time in epoch milliseconds.
///
/// Clocks set before the epoch read as 0.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Days between `touched_ms` and `now_ms`.
///
/// Computed in floating point so any pair of stored timestamps is accepted.
pub fn elapsed_days(touched_ms: i64, now_ms: i64) -> f64 {
    (now_ms as f64 - touched_ms as f64) / MILLIS_PER_DAY as f64
}

/// Share of the interval that has elapsed since `touched_ms`.
///
/// A zero interval yields an infinite (or NaN) fraction.
pub fn fraction_elapsed(touched_ms: i64, interval_days: i64, now_ms: i64) -> f64 {
    elapsed_days(touched_ms, now_ms) / interval_days as f64
}

/// Chase goals move away from red as time passes, avoid goals move towards it.
pub fn hue(polarity: bool, fraction_elapsed: f64) -> f64 {
    if polarity {
        GREEN_HUE * fraction_elapsed
    } else {
        GREEN_HUE - GREEN_HUE * fraction_elapsed
    }
}

/// Opaque display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Packed `0xAARRGGBB` with full alpha.
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Converts HSV to RGB.
///
/// Saturation and value are pinned to [0, 1]. A hue that is non-finite or
/// outside [0, 360) is treated as 0.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb {
    let s = pin_unit(saturation);
    let v = pin_unit(value);
    let h = if hue.is_finite() && (0.0..360.0).contains(&hue) {
        hue / 60.0
    } else {
        0.0
    };

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb {
        r: to_channel(r),
        g: to_channel(g),
        b: to_channel(b),
    }
}

fn pin_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn to_channel(component: f64) -> u8 {
    (component * 255.0).round() as u8
}

/// Urgency snapshot of one goal at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Urgency {
    pub elapsed_days: f64,
    pub fraction_elapsed: f64,
    pub hue: f64,
    pub color: Rgb,
}

impl Urgency {
    pub fn of(goal: &Goal, now_ms: i64) -> Self {
        Self::compute(goal.touched, goal.interval, goal.polarity, now_ms)
    }

    pub fn compute(touched_ms: i64, interval_days: i64, polarity: bool, now_ms: i64) -> Self {
        let fraction_elapsed = fraction_elapsed(touched_ms, interval_days, now_ms);
        let hue = hue(polarity, fraction_elapsed);
        Self {
            elapsed_days: elapsed_days(touched_ms, now_ms),
            fraction_elapsed,
            hue,
            color: hsv_to_rgb(hue, 1.0, 1.0),
        }
    }

    /// Whether the whole interval has passed since the last touch.
    pub fn is_overdue(&self) -> bool {
        self.fraction_elapsed >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::{hsv_to_rgb, Rgb};

    #[test]
    fn primary_hues_map_to_primary_colors() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb { r: 0, g: 0, b: 255 });
    }

    #[test]
    fn midpoint_hue_is_yellow() {
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), Rgb { r: 255, g: 255, b: 0 });
    }

    #[test]
    fn out_of_range_hues_render_red() {
        let red = Rgb { r: 255, g: 0, b: 0 };
        assert_eq!(hsv_to_rgb(-30.0, 1.0, 1.0), red);
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), red);
        assert_eq!(hsv_to_rgb(f64::NAN, 1.0, 1.0), red);
        assert_eq!(hsv_to_rgb(f64::INFINITY, 1.0, 1.0), red);
    }

    #[test]
    fn argb_and_hex_forms_agree() {
        let color = Rgb { r: 0x12, g: 0xab, b: 0x0f };
        assert_eq!(color.to_argb(), 0xFF12_AB0F);
        assert_eq!(color.to_hex(), "#12ab0f");
    }
}
