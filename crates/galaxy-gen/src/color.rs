//! Radius-to-color mapping: a linear hue ramp converted from HSL to RGB.

use serde::{Deserialize, Serialize};

/// Linear hue ramp over normalized radius with fixed saturation and lightness.
///
/// `hue = t * hue_scale + hue_base`, where `t` is `radius / galaxy_radius`.
/// Hue is taken modulo 1, so ramps may run past the red wrap-around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorRamp {
    /// Hue at the galactic center, in turns.
    pub hue_base: f32,
    /// Hue change between center and rim, in turns.
    pub hue_scale: f32,
    /// HSL saturation in [0, 1].
    pub saturation: f32,
    /// HSL lightness in [0, 1].
    pub lightness: f32,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            hue_base: 0.6,
            hue_scale: 1.0,
            saturation: 1.0,
            lightness: 0.7,
        }
    }
}

impl ColorRamp {
    /// Color for a normalized radius `t`.
    pub fn color_at(&self, t: f32) -> [f32; 3] {
        hsl_to_rgb(t * self.hue_scale + self.hue_base, self.saturation, self.lightness)
    }
}

/// Convert HSL to RGB.
///
/// * `h` - hue in turns; wraps, so 1.25 is the same as 0.25
/// * `s` - saturation, clamped to [0, 1]
/// * `l` - lightness, clamped to [0, 1]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let high = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let low = 2.0 * l - high;

    [
        hue_channel(low, high, h + 1.0 / 3.0),
        hue_channel(low, high, h),
        hue_channel(low, high, h - 1.0 / 3.0),
    ]
}

fn hue_channel(low: f32, high: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        low + (high - low) * 6.0 * t
    } else if t < 0.5 {
        high
    } else if t < 2.0 / 3.0 {
        low + (high - low) * 6.0 * (2.0 / 3.0 - t)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb(actual: [f32; 3], expected: [f32; 3]) {
        for (ch, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
            assert!(
                (a - e).abs() < 1e-5,
                "channel {ch}: got {a}, expected {e} ({actual:?} vs {expected:?})"
            );
        }
    }

    #[test]
    fn test_primary_hues() {
        assert_rgb(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]);
        assert_rgb(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]);
        assert_rgb(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        assert_rgb(hsl_to_rgb(0.42, 0.0, 0.3), [0.3, 0.3, 0.3]);
    }

    #[test]
    fn test_hue_wraps() {
        assert_rgb(hsl_to_rgb(1.6, 1.0, 0.7), hsl_to_rgb(0.6, 1.0, 0.7));
        assert_rgb(hsl_to_rgb(-0.4, 1.0, 0.7), hsl_to_rgb(0.6, 1.0, 0.7));
    }

    #[test]
    fn test_galactic_core_color() {
        // Default ramp at the center: hue 0.6, light 0.7 -> pale blue.
        let ramp = ColorRamp::default();
        assert_rgb(ramp.color_at(0.0), [0.4, 0.64, 1.0]);
    }

    #[test]
    fn test_channels_stay_in_unit_range() {
        for i in 0..=100 {
            let h = i as f32 / 37.0;
            for &l in &[0.0, 0.25, 0.5, 0.7, 0.8, 1.0, 1.5] {
                let rgb = hsl_to_rgb(h, 1.2, l);
                for v in rgb {
                    assert!((0.0..=1.0 + 1e-6).contains(&v), "h={h} l={l} -> {rgb:?}");
                }
            }
        }
    }

    #[test]
    fn test_small_hue_scale_gives_near_uniform_tint() {
        let ramp = ColorRamp {
            hue_scale: 0.1,
            lightness: 0.8,
            ..ColorRamp::default()
        };
        let center = ramp.color_at(0.0);
        let rim = ramp.color_at(1.0);
        let diff: f32 = center.iter().zip(rim.iter()).map(|(a, b)| (a - b).abs()).sum();
        assert!(diff < 0.5, "tint should barely change, diff = {diff}");
    }
}
