//! Shooting stars (stateless, randomly triggered per frame).

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use rand::Rng;
use stardust_core::{Point, Rgba, Viewport};

use super::{starfield::probability, uniform};
use crate::surface::{Paint, Surface};

/// Stroke width of the streak.
pub const STREAK_WIDTH: f32 = 2.0;

/// Head color of the streak.
pub const STREAK_COLOR: Rgba = Rgba::new(255, 255, 255, 0.8);

/// Geometry of one streak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingStar {
    pub origin: Point,
    /// Length in pixels, `50..200`.
    pub length: f32,
    /// Angle from horizontal in radians, `π/4..π/2`.
    pub angle: f32,
}

impl ShootingStar {
    /// Sample a streak starting in the upper half of the viewport.
    pub fn random<R: Rng>(viewport: Viewport, rng: &mut R) -> Self {
        Self {
            origin: Point::new(
                uniform(rng, 0.0..viewport.width as f32),
                uniform(rng, 0.0..viewport.height as f32 * 0.5),
            ),
            length: uniform(rng, 50.0..200.0),
            angle: uniform(rng, FRAC_PI_4..FRAC_PI_2),
        }
    }

    pub fn tip(&self) -> Point {
        self.origin + Point::new(self.angle.cos(), self.angle.sin()) * self.length
    }

    /// Solid stroke, then a trail fading out toward the tip.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        let tip = self.tip();
        surface.stroke_line(self.origin, tip, STREAK_WIDTH, Paint::Solid(STREAK_COLOR));

        let trail = Paint::Linear {
            from: self.origin,
            to: tip,
            start: STREAK_COLOR,
            end: STREAK_COLOR.with_alpha(0.0),
        };
        surface.stroke_line(self.origin, tip, STREAK_WIDTH, trail);
    }
}

/// Roll for a shooting star this frame and draw it if one appears.
pub fn maybe_render<S: Surface, R: Rng>(
    surface: &mut S,
    viewport: Viewport,
    chance: f64,
    rng: &mut R,
) -> Option<ShootingStar> {
    if !rng.random_bool(probability(chance)) {
        return None;
    }
    let streak = ShootingStar::random(viewport, rng);
    streak.render(surface);
    Some(streak)
}
