//! Pointer position ⇄ color mapping for the wheel.
//!
//! Positions are in the wheel's own coordinate space: origin at the top-left
//! of its bounds, y increasing downward. Both directions reuse the same
//! vertical flip so that encoding a color and decoding the resulting position
//! lands on the same hue and saturation.

use std::f64::consts::TAU;

use crate::color::SolidColor;
use crate::math;

/// A point inside the wheel's bounds, in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelPosition {
    pub x: f64,
    pub y: f64,
}

impl WheelPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: WheelPosition) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Maps between pointer positions and colors for a wheel of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapper {
    width: f64,
    height: f64,
}

impl PointerMapper {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> WheelPosition {
        WheelPosition::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether `p` lies inside the hit-test bounds (edges inclusive).
    pub fn contains(&self, p: WheelPosition) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }

    /// Unit-square coordinate of `p`. Degenerate bounds map to the center.
    pub fn normalize(&self, p: WheelPosition) -> (f64, f64) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return (0.5, 0.5);
        }
        (p.x / self.width, p.y / self.height)
    }

    /// Color at `p` for the live lightness.
    pub fn position_to_color(&self, p: WheelPosition, lightness: f64) -> SolidColor {
        let (u, v) = self.normalize(p);
        // Same (u, v) convention as the rasterizer, so the pointer lands on
        // the color drawn under it.
        math::wheel_color(u, v, lightness)
    }

    /// Position on the wheel where `color`'s hue and saturation live.
    ///
    /// Lightness is not encoded; the radius is the HSL saturation times the
    /// half-extent, matching the `2 * distance` saturation of the forward map.
    /// Halving that radius would park full saturation at half the wheel and
    /// the indicator would no longer sit on the color it shows.
    pub fn color_to_position(&self, color: SolidColor) -> WheelPosition {
        let hsl = color.to_hsl();
        let angle = TAU * hsl.h;
        let saturation = hsl.s.clamp(0.0, 1.0);
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        WheelPosition::new(
            saturation * angle.cos() * half_w + half_w,
            -saturation * angle.sin() * half_h + half_h,
        )
    }
}

/// Free-function form of [`PointerMapper::position_to_color`].
pub fn position_to_color(p: WheelPosition, width: f64, height: f64, lightness: f64) -> SolidColor {
    PointerMapper::new(width, height).position_to_color(p, lightness)
}

/// Free-function form of [`PointerMapper::color_to_position`].
pub fn color_to_position(color: SolidColor, width: f64, height: f64) -> WheelPosition {
    PointerMapper::new(width, height).color_to_position(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{hsl_to_rgb, hue_distance, wheel_hue_saturation};

    fn mapper() -> PointerMapper {
        PointerMapper::new(1000.0, 1000.0)
    }

    fn close(a: SolidColor, b: (u8, u8, u8)) -> bool {
        let (r, g, bl) = a.to_rgb();
        (r as i16 - b.0 as i16).abs() <= 1
            && (g as i16 - b.1 as i16).abs() <= 1
            && (bl as i16 - b.2 as i16).abs() <= 1
    }

    #[test]
    fn test_center_is_gray() {
        let c = mapper().position_to_color(WheelPosition::new(500.0, 500.0), 0.5);
        assert!(close(c, (128, 128, 128)), "{:?}", c);
        assert_eq!(c.to_hsl().s, 0.0);
    }

    #[test]
    fn test_center_neutral_for_any_lightness() {
        for l in [0.0, 0.2, 0.5, 0.9, 1.0] {
            let c = mapper().position_to_color(mapper().center(), l);
            assert_eq!(c.to_hsl().s, 0.0, "lightness {l}");
        }
    }

    #[test]
    fn test_right_edge_is_red() {
        let c = mapper().position_to_color(WheelPosition::new(1000.0, 500.0), 0.5);
        assert!(close(c, (255, 0, 0)), "{:?}", c);
    }

    #[test]
    fn test_bottom_edge_is_violet() {
        let c = mapper().position_to_color(WheelPosition::new(500.0, 1000.0), 0.5);
        assert!(close(c, (128, 0, 255)), "{:?}", c);
    }

    #[test]
    fn test_contains() {
        let m = mapper();
        assert!(m.contains(WheelPosition::new(0.0, 1000.0)));
        assert!(!m.contains(WheelPosition::new(-1.0, 10.0)));
        assert!(!m.contains(WheelPosition::new(10.0, 1000.5)));
    }

    #[test]
    fn test_red_maps_to_right_edge() {
        let p = mapper().color_to_position(SolidColor::from_rgb(255, 0, 0));
        assert!(p.distance(WheelPosition::new(1000.0, 500.0)) < 1e-6, "{:?}", p);
    }

    #[test]
    fn test_round_trip_recovers_hue_and_saturation() {
        let m = mapper();
        for i in 0..24 {
            let h = i as f64 / 24.0;
            for &s in &[0.25, 0.5, 0.75, 1.0] {
                let color = hsl_to_rgb(h, s, 0.5);
                let p = m.color_to_position(color);
                let back = m.position_to_color(p, 0.5).to_hsl();
                assert!(hue_distance(back.h, h) < 0.01, "h={h} s={s}: got hue {}", back.h);
                assert!((back.s - s).abs() < 0.01, "h={h} s={s}: got saturation {}", back.s);
            }
        }
    }

    #[test]
    fn test_round_trip_matches_wheel_geometry() {
        let m = mapper();
        let color = hsl_to_rgb(0.6, 0.8, 0.5);
        let p = m.color_to_position(color);
        let (u, v) = m.normalize(p);
        let (hue, sat) = wheel_hue_saturation(u, v);
        let expected = color.to_hsl();
        assert!(hue_distance(hue, expected.h) < 1e-9);
        assert!((sat - expected.s).abs() < 1e-9);
    }

    #[test]
    fn test_hue_wrap_is_continuous() {
        let m = mapper();
        let at_zero = m.color_to_position(hsl_to_rgb(0.0, 1.0, 0.5));
        let near_one = m.color_to_position(hsl_to_rgb(0.999, 1.0, 0.5));
        assert!(at_zero.distance(near_one) <= 5.0, "{:?} vs {:?}", at_zero, near_one);

        let just_under = m.position_to_color(WheelPosition::new(1000.0, 500.5), 0.5);
        let just_over = m.position_to_color(WheelPosition::new(1000.0, 499.5), 0.5);
        assert!(hue_distance(just_under.to_hsl().h, just_over.to_hsl().h) < 0.01);
    }

    #[test]
    fn test_degenerate_bounds_resolve_to_center() {
        let m = PointerMapper::new(0.0, 0.0);
        let c = m.position_to_color(WheelPosition::new(3.0, 4.0), 0.5);
        assert_eq!(c.to_hsl().s, 0.0);
    }

    #[test]
    fn test_free_functions_match_mapper() {
        let p = WheelPosition::new(120.0, 730.0);
        assert_eq!(
            position_to_color(p, 1000.0, 1000.0, 0.4),
            mapper().position_to_color(p, 0.4)
        );
        let c = SolidColor::from_rgb(12, 200, 90);
        assert_eq!(color_to_position(c, 1000.0, 1000.0), mapper().color_to_position(c));
    }
}
