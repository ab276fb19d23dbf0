//! Core types shared by the stardust crates.

mod color;
mod geometry;
mod theme;

pub use color::Rgba;
pub use geometry::{Point, Rect, Viewport};
pub use theme::Theme;
