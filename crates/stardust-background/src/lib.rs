//! Animated starfield background for stardust.
//!
//! A field of stars drifts toward the viewer with pointer parallax, over a
//! slowly orbiting nebula glow, with the occasional shooting star. The
//! [`Animator`] owns the simulation and draws through the [`Surface`]
//! trait; [`PixelCanvas`] is the software surface used in the terminal.

mod animations;
mod animator;
mod canvas;
mod clock;
mod state;
mod surface;

pub use animations::nebula::{NEBULA_COUNT, ORBIT_RATE};
pub use animations::shooting_star::ShootingStar;
pub use animations::starfield::{MAX_DEPTH, PALETTE, Star, population};
pub use animator::{Animator, Listener};
pub use canvas::PixelCanvas;
pub use clock::{FrameClock, FrameId, FrameScheduler};
pub use state::{Effects, POINTER_SCALE, StarfieldState};
pub use surface::{Paint, Surface};
