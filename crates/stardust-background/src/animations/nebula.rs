//! Nebula glow (stateless, computed from elapsed time and viewport).

use stardust_core::{Point, Rgba, Viewport};

use crate::surface::{Paint, Surface};

/// Number of glow blobs drawn each frame.
pub const NEBULA_COUNT: usize = 3;

/// Angular drift rate of the blob centers in radians per millisecond.
pub const ORBIT_RATE: f64 = 0.0001;

/// Blob tints, cycled by blob index.
pub const NEBULA_TINTS: [Rgba; 4] = [
    Rgba::new(138, 43, 226, 0.05),  // purple
    Rgba::new(75, 0, 130, 0.05),    // indigo
    Rgba::new(123, 104, 238, 0.05), // blue
    Rgba::new(148, 0, 211, 0.05),   // violet
];

/// Center of blob `index` at the given time.
pub fn blob_center(index: usize, viewport: Viewport, elapsed_ms: f64) -> Point {
    let angle = elapsed_ms * ORBIT_RATE + index as f64;
    let center = viewport.center();
    Point::new(
        center.x + (angle.cos() * viewport.width as f64 * 0.3) as f32,
        center.y + (angle.sin() * viewport.height as f64 * 0.3) as f32,
    )
}

/// Radius of every blob.
pub fn blob_radius(viewport: Viewport) -> f32 {
    viewport.width.min(viewport.height) as f32 * 0.5
}

/// Paint all nebula blobs.
pub fn render<S: Surface>(surface: &mut S, viewport: Viewport, elapsed_ms: f64) {
    let radius = blob_radius(viewport);
    for index in 0..NEBULA_COUNT {
        let center = blob_center(index, viewport, elapsed_ms);
        let glow = Paint::Radial {
            center,
            radius,
            inner: NEBULA_TINTS[index % NEBULA_TINTS.len()],
            outer: Rgba::TRANSPARENT,
        };
        surface.fill_circle(center, radius, glow, 1.0);
    }
}
