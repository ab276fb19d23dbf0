//! RGBA color value used by the drawing surface.

use ratatui::style::Color;

/// An sRGB color with a straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation of all four channels, `t` clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Source-over blend of `self` onto an opaque destination, scaled by `alpha`.
    pub fn blend_onto(self, dst: Rgba, alpha: f32) -> Rgba {
        let a = (self.a * alpha).clamp(0.0, 1.0);
        let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
        Rgba::rgb(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }

    /// Convert to a terminal color, ignoring alpha.
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let from = Rgba::new(255, 255, 255, 0.8);
        assert_eq!(from.lerp(Rgba::TRANSPARENT, 0.0), from);
        assert_eq!(from.lerp(Rgba::TRANSPARENT, 1.0), Rgba::TRANSPARENT);
        assert_eq!(from.lerp(Rgba::TRANSPARENT, 2.0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_blend_onto() {
        let dst = Rgba::rgb(0, 0, 0);
        assert_eq!(Rgba::WHITE.blend_onto(dst, 1.0), Rgba::WHITE);
        assert_eq!(Rgba::WHITE.blend_onto(dst, 0.0), dst);
        assert_eq!(Rgba::WHITE.with_alpha(0.5).blend_onto(dst, 1.0), Rgba::rgb(128, 128, 128));
    }
}
