//! Color math — direct conversions without external dependencies.
//! All functions use normalized f64 in 0.0–1.0 for internal use.

use std::f64::consts::{PI, TAU};

use crate::color::{Hsl, SolidColor};

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// HSL → RGB. Hue wraps modulo 1, saturation and lightness are clamped.
///
/// The result is fully opaque; use [`SolidColor::with_alpha`] to override.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> SolidColor {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        let v = to_channel(l);
        return SolidColor::from_rgb(v, v, v);
    }

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = h * 6.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h6.floor() as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    SolidColor::from_rgb(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

/// RGB → HSL. Achromatic colors report hue 0 and saturation 0.
pub fn rgb_to_hsl(color: SolidColor) -> Hsl {
    let r = color.r() as f64 / 255.0;
    let g = color.g() as f64 / 255.0;
    let b = color.b() as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsl::new(0.0, 0.0, l);
    }

    let s = (delta / (1.0 - (2.0 * l - 1.0).abs())).min(1.0);
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    Hsl::new(h, s, l)
}

/// Hue and saturation for a unit-square coordinate on the wheel.
///
/// `u` runs left to right, `v` top to bottom. The center is neutral; the
/// exact center resolves to hue 0.
pub fn wheel_hue_saturation(u: f64, v: f64) -> (f64, f64) {
    let x = u - 0.5;
    let y = (1.0 - v) - 0.5;
    let saturation = (2.0 * (x * x + y * y).sqrt()).clamp(0.0, 1.0);
    // Lower half sweeps pi..2pi instead of atan2's negative branch.
    let angle = if y < 0.0 {
        (-y).atan2(-x) + PI
    } else {
        y.atan2(x)
    };
    (angle / TAU, saturation)
}

/// Color of the wheel at a unit-square coordinate for the given lightness.
pub fn wheel_color(u: f64, v: f64, lightness: f64) -> SolidColor {
    let (hue, saturation) = wheel_hue_saturation(u, v);
    hsl_to_rgb(hue, saturation, lightness)
}

/// Shortest distance between two hues on the unit circle.
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(1.0);
    d.min(1.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), SolidColor::from_rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), SolidColor::from_rgb(0, 255, 0));
        assert_eq!(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), SolidColor::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(hsl_to_rgb(1.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5));
        assert_eq!(hsl_to_rgb(1.25, 0.8, 0.4), hsl_to_rgb(0.25, 0.8, 0.4));
        assert_eq!(hsl_to_rgb(-0.25, 0.8, 0.4), hsl_to_rgb(0.75, 0.8, 0.4));
    }

    #[test]
    fn test_saturation_over_one_is_clamped() {
        assert_eq!(hsl_to_rgb(0.3, 1.02, 0.5), hsl_to_rgb(0.3, 1.0, 0.5));
    }

    #[test]
    fn test_always_opaque() {
        assert_eq!(hsl_to_rgb(0.6, 0.4, 0.2).a(), 255);
    }

    #[test]
    fn test_gray_has_no_saturation() {
        let hsl = rgb_to_hsl(SolidColor::from_rgb(128, 128, 128));
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_to_hsl_inverts_hsl_to_rgb() {
        for &(h, s, l) in &[(0.1, 0.9, 0.5), (0.45, 0.6, 0.35), (0.8, 0.3, 0.7), (0.99, 1.0, 0.5)] {
            let hsl = rgb_to_hsl(hsl_to_rgb(h, s, l));
            assert!(hue_distance(hsl.h, h) < 0.01, "hue {} vs {}", hsl.h, h);
            assert!((hsl.s - s).abs() < 0.01, "saturation {} vs {}", hsl.s, s);
            assert!((hsl.l - l).abs() < 0.01, "lightness {} vs {}", hsl.l, l);
        }
    }

    #[test]
    fn test_wheel_center_is_neutral() {
        let (hue, sat) = wheel_hue_saturation(0.5, 0.5);
        assert_eq!(hue, 0.0);
        assert_eq!(sat, 0.0);
    }

    #[test]
    fn test_wheel_quadrants() {
        // right edge, top, left edge, bottom
        let cases = [((1.0, 0.5), 0.0), ((0.5, 0.0), 0.25), ((0.0, 0.5), 0.5), ((0.5, 1.0), 0.75)];
        for ((u, v), expected) in cases {
            let (hue, sat) = wheel_hue_saturation(u, v);
            assert!(hue_distance(hue, expected) < 1e-9, "({u}, {v}) -> {hue}");
            assert!((sat - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wheel_corner_saturation_clamped() {
        let (_, sat) = wheel_hue_saturation(0.0, 0.0);
        assert_eq!(sat, 1.0);
    }

    #[test]
    fn test_hue_distance_wraps() {
        assert!((hue_distance(0.02, 0.98) - 0.04).abs() < 1e-12);
        assert_eq!(hue_distance(0.3, 0.3), 0.0);
    }
}
