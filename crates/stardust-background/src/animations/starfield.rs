//! Parallax starfield (stateful).

use rand::{Rng, seq::IndexedRandom};
use stardust_core::{Point, Rgba, Viewport};

use super::uniform;
use crate::surface::{Paint, Surface};

/// Depth at which stars spawn; depth 0 is the viewer.
pub const MAX_DEPTH: f32 = 1000.0;

/// Surface area, in square pixels, that earns one star.
pub const AREA_PER_STAR: u64 = 1000;

/// Parallax displacement per unit of depth and pointer offset.
pub const PARALLAX_FACTOR: f32 = 0.001;

/// Star colors. Both themes currently share this palette.
pub const PALETTE: [Rgba; 6] = [
    Rgba::rgb(0xff, 0xff, 0xff),
    Rgba::rgb(0xf3, 0xf3, 0xf3),
    Rgba::rgb(0xd9, 0xd9, 0xff),
    Rgba::rgb(0x8a, 0x9c, 0xf9),
    Rgba::rgb(0xff, 0xd6, 0xe0),
    Rgba::rgb(0xd6, 0x8c, 0xff),
];

/// A single star in the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Horizontal position in surface pixels.
    pub x: f32,
    /// Vertical position in surface pixels.
    pub y: f32,
    /// Distance from the viewer, `0..=MAX_DEPTH`.
    pub depth: f32,
    /// Base radius.
    pub size: f32,
    /// Color picked at creation.
    pub color: Rgba,
    /// Depth decrement per tick.
    pub speed: f32,
}

impl Star {
    /// Sample a new star inside the viewport.
    pub fn random<R: Rng>(viewport: Viewport, rng: &mut R) -> Self {
        Self {
            x: uniform(rng, 0.0..viewport.width as f32),
            y: uniform(rng, 0.0..viewport.height as f32),
            depth: uniform(rng, 0.0..MAX_DEPTH),
            size: uniform(rng, 0.0..2.0),
            color: PALETTE.choose(rng).copied().unwrap_or(Rgba::WHITE),
            speed: uniform(rng, 0.2..0.7),
        }
    }

    /// Move the star one tick closer, respawning it far away once it passes
    /// the viewer. Size, color and speed survive the respawn.
    pub fn advance<R: Rng>(&mut self, viewport: Viewport, rng: &mut R) {
        self.depth -= self.speed;
        if self.depth <= 0.0 {
            self.depth = MAX_DEPTH;
            self.x = uniform(rng, 0.0..viewport.width as f32);
            self.y = uniform(rng, 0.0..viewport.height as f32);
        }
    }

    /// Fraction of the way from the far plane to the viewer.
    pub fn nearness(&self) -> f32 {
        (MAX_DEPTH - self.depth) / MAX_DEPTH
    }

    /// Radius after perspective: full size at depth 0, nothing at the far plane.
    pub fn apparent_size(&self) -> f32 {
        self.size * self.nearness()
    }

    pub fn opacity(&self) -> f32 {
        self.nearness()
    }

    /// Position on screen after applying the pointer parallax.
    pub fn screen_position(&self, pointer: Point) -> Point {
        Point::new(self.x, self.y) + pointer * (self.depth * PARALLAX_FACTOR)
    }
}

/// Clamp a chance into `0.0..=1.0`; NaN counts as never.
pub(crate) fn probability(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

/// Number of stars for a viewport: one per [`AREA_PER_STAR`] pixels.
pub fn population(viewport: Viewport) -> usize {
    (viewport.area() / AREA_PER_STAR) as usize
}

/// Create the star set for the given viewport.
pub fn init_stars<R: Rng>(viewport: Viewport, rng: &mut R) -> Vec<Star> {
    (0..population(viewport))
        .map(|_| Star::random(viewport, rng))
        .collect()
}

/// Advance every star by one tick.
pub fn update<R: Rng>(stars: &mut [Star], viewport: Viewport, rng: &mut R) {
    for star in stars {
        star.advance(viewport, rng);
    }
}

/// Paint one star: glow, core and the occasional twinkle.
pub fn render_star<S: Surface, R: Rng>(
    surface: &mut S,
    star: &Star,
    pointer: Point,
    twinkle_chance: f64,
    rng: &mut R,
) {
    let center = star.screen_position(pointer);
    let size = star.apparent_size();
    let opacity = star.opacity();

    let glow = Paint::Radial {
        center,
        radius: size * 4.0,
        inner: star.color,
        outer: Rgba::TRANSPARENT,
    };
    surface.fill_circle(center, size * 2.0, glow, opacity);
    surface.fill_circle(center, size, Paint::Solid(star.color), opacity);

    if rng.random_bool(probability(twinkle_chance)) {
        let flash = uniform(rng, 0.5..1.0);
        surface.fill_circle(center, size * 1.5, Paint::Solid(Rgba::WHITE), flash);
    }
}
