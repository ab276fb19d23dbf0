//! Simulation state of the starfield background.

use rand::Rng;
use stardust_core::{Point, Theme, Viewport};

use crate::animations::{nebula, shooting_star, starfield};
use crate::surface::Surface;

/// Scale applied to the pointer's distance from the viewport center.
pub const POINTER_SCALE: f32 = 0.01;

/// Probabilities of the random per-frame effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effects {
    /// Chance per star per frame of a twinkle flash.
    pub twinkle_chance: f64,
    /// Chance per frame of a shooting star.
    pub shooting_star_chance: f64,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            twinkle_chance: 0.01,
            shooting_star_chance: 0.01,
        }
    }
}

/// Everything the starfield carries from one frame to the next.
#[derive(Debug, Clone)]
pub struct StarfieldState {
    /// Current star set.
    stars: Vec<starfield::Star>,
    /// Viewport the star set was created for.
    viewport: Viewport,
    /// Parallax offset derived from the last pointer position.
    pointer: Point,
}

impl StarfieldState {
    /// Create a state with a fresh star set for the viewport.
    pub fn new<R: Rng>(viewport: Viewport, rng: &mut R) -> Self {
        Self {
            stars: starfield::init_stars(viewport, rng),
            viewport,
            pointer: Point::ZERO,
        }
    }

    /// Discard the star set and create a new one for `viewport`.
    pub fn resize<R: Rng>(&mut self, viewport: Viewport, rng: &mut R) {
        self.viewport = viewport;
        self.stars = starfield::init_stars(viewport, rng);
    }

    /// Record a pointer position given in surface pixels.
    pub fn set_pointer_position(&mut self, position: Point) {
        self.pointer = (position - self.viewport.center()) * POINTER_SCALE;
    }

    pub fn stars(&self) -> &[starfield::Star] {
        &self.stars
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current parallax offset.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Draw one frame and advance the simulation by one tick.
    pub fn render<S: Surface, R: Rng>(
        &mut self,
        surface: &mut S,
        theme: Theme,
        elapsed_ms: f64,
        effects: Effects,
        rng: &mut R,
    ) {
        surface.fill_rect(self.viewport.bounds(), theme.background());

        nebula::render(surface, self.viewport, elapsed_ms);

        for star in &self.stars {
            starfield::render_star(surface, star, self.pointer, effects.twinkle_chance, rng);
        }

        shooting_star::maybe_render(surface, self.viewport, effects.shooting_star_chance, rng);

        starfield::update(&mut self.stars, self.viewport, rng);
    }
}
