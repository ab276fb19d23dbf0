//! Drawing surface abstraction.
//!
//! The animator only talks to a [`Surface`]; the host decides what the
//! pixels end up on.

use stardust_core::{Point, Rect, Rgba, Viewport};

/// How a shape is filled or stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// One flat color.
    Solid(Rgba),
    /// Gradient from `inner` at `center` to `outer` at `radius` and beyond.
    Radial {
        center: Point,
        radius: f32,
        inner: Rgba,
        outer: Rgba,
    },
    /// Gradient from `start` at `from` to `end` at `to`, clamped outside.
    Linear {
        from: Point,
        to: Point,
        start: Rgba,
        end: Rgba,
    },
}

impl Paint {
    /// Color of the paint at `point`.
    pub fn sample(&self, point: Point) -> Rgba {
        match *self {
            Paint::Solid(color) => color,
            Paint::Radial {
                center,
                radius,
                inner,
                outer,
            } => {
                if radius <= 0.0 {
                    return outer;
                }
                inner.lerp(outer, point.distance(center) / radius)
            }
            Paint::Linear {
                from,
                to,
                start,
                end,
            } => {
                let axis = to - from;
                let len_sq = axis.dot(axis);
                if len_sq <= 0.0 {
                    return start;
                }
                start.lerp(end, (point - from).dot(axis) / len_sq)
            }
        }
    }
}

/// A 2D drawing surface sized to the viewport.
pub trait Surface {
    /// Resize the surface to match the viewport. Contents are discarded.
    fn resize(&mut self, viewport: Viewport);

    /// Fill a rectangle with a flat color.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Fill a disc, multiplying the paint's alpha by `alpha`.
    fn fill_circle(&mut self, center: Point, radius: f32, paint: Paint, alpha: f32);

    /// Stroke a straight line segment of the given width.
    fn stroke_line(&mut self, from: Point, to: Point, width: f32, paint: Paint);
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// One call made against a [`RecordingSurface`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Resize(Viewport),
        FillRect(Rect, Rgba),
        FillCircle {
            center: Point,
            radius: f32,
            paint: Paint,
            alpha: f32,
        },
        StrokeLine {
            from: Point,
            to: Point,
            width: f32,
            paint: Paint,
        },
    }

    /// Surface that records every call instead of drawing.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn clear(&mut self) {
            self.calls.clear();
        }

        pub fn fills(&self) -> Vec<(Rect, Rgba)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    DrawCall::FillRect(rect, color) => Some((*rect, *color)),
                    _ => None,
                })
                .collect()
        }

        pub fn strokes(&self) -> usize {
            self.calls
                .iter()
                .filter(|call| matches!(call, DrawCall::StrokeLine { .. }))
                .count()
        }
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, viewport: Viewport) {
            self.calls.push(DrawCall::Resize(viewport));
        }

        fn fill_rect(&mut self, rect: Rect, color: Rgba) {
            self.calls.push(DrawCall::FillRect(rect, color));
        }

        fn fill_circle(&mut self, center: Point, radius: f32, paint: Paint, alpha: f32) {
            self.calls.push(DrawCall::FillCircle {
                center,
                radius,
                paint,
                alpha,
            });
        }

        fn stroke_line(&mut self, from: Point, to: Point, width: f32, paint: Paint) {
            self.calls.push(DrawCall::StrokeLine {
                from,
                to,
                width,
                paint,
            });
        }
    }
}
