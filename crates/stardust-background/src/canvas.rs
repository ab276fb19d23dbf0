//! Software pixel canvas presented as half-block terminal cells.

use ratatui::{buffer::Buffer, layout::Rect as Area, widgets::Widget};
use stardust_core::{Point, Rect, Rgba, Viewport};

use crate::surface::{Paint, Surface};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

/// An opaque RGB pixel buffer that implements [`Surface`].
///
/// Drawing happens in viewport coordinates; each canvas pixel covers
/// `scale_x` by `scale_y` viewport pixels.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    scale_x: f32,
    scale_y: f32,
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelCanvas {
    /// Create an empty canvas. Scales below one viewport pixel are raised to one.
    pub fn new(scale_x: f32, scale_y: f32) -> Self {
        Self {
            scale_x: scale_x.max(1.0),
            scale_y: scale_y.max(1.0),
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Canvas for a terminal whose cells are `cell_width x cell_height`
    /// viewport pixels. Each cell holds two vertically stacked pixels.
    pub fn for_cells(cell_width: u32, cell_height: u32) -> Self {
        Self::new(cell_width as f32, cell_height as f32 / 2.0)
    }

    /// Canvas size in pixels.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Viewport coordinates of the center of canvas pixel `(x, y)`.
    fn pixel_center(&self, x: usize, y: usize) -> Point {
        Point::new(
            (x as f32 + 0.5) * self.scale_x,
            (y as f32 + 0.5) * self.scale_y,
        )
    }

    /// Canvas pixel containing a viewport point, if it is on the canvas.
    fn pixel_at(&self, point: Point) -> Option<(usize, usize)> {
        let x = (point.x / self.scale_x).floor();
        let y = (point.y / self.scale_y).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Range of canvas columns and rows overlapping a viewport-space box.
    fn pixel_span(&self, min: Point, max: Point) -> (usize, usize, usize, usize) {
        let clamp_x = |v: f32| (v / self.scale_x).floor().clamp(0.0, self.width as f32) as usize;
        let clamp_y = |v: f32| (v / self.scale_y).floor().clamp(0.0, self.height as f32) as usize;
        (
            clamp_x(min.x),
            clamp_x(max.x) + 1,
            clamp_y(min.y),
            clamp_y(max.y) + 1,
        )
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba, alpha: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        self.pixels[index] = color.blend_onto(self.pixels[index], alpha);
    }
}

impl Surface for PixelCanvas {
    fn resize(&mut self, viewport: Viewport) {
        self.width = (viewport.width as f32 / self.scale_x).ceil() as usize;
        self.height = (viewport.height as f32 / self.scale_y).ceil() as usize;
        self.pixels = vec![Rgba::rgb(0, 0, 0); self.width * self.height];
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let (x0, x1, y0, y1) = self.pixel_span(
            Point::new(rect.x, rect.y),
            Point::new(rect.x + rect.width, rect.y + rect.height),
        );
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                let center = self.pixel_center(x, y);
                let inside = center.x >= rect.x
                    && center.x < rect.x + rect.width
                    && center.y >= rect.y
                    && center.y < rect.y + rect.height;
                if inside {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: Paint, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }

        let reach = Point::new(radius, radius);
        let (x0, x1, y0, y1) = self.pixel_span(center - reach, center + reach);
        let mut covered = false;
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                let point = self.pixel_center(x, y);
                if point.distance(center) <= radius {
                    covered = true;
                    self.blend(x, y, paint.sample(point), alpha);
                }
            }
        }

        // Discs smaller than a pixel land between pixel centers; deposit
        // their area share into the pixel holding the center instead.
        if !covered && let Some((x, y)) = self.pixel_at(center) {
            let coverage =
                (std::f32::consts::PI * radius * radius / (self.scale_x * self.scale_y)).min(1.0);
            self.blend(x, y, paint.sample(center), alpha * coverage);
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, paint: Paint) {
        let length = from.distance(to);
        let step = self.scale_x.min(self.scale_y) / 2.0;
        let steps = (length / step).ceil().max(1.0) as usize;
        let coverage = (width / self.scale_x.min(self.scale_y)).clamp(0.0, 1.0);

        let mut last = None;
        for i in 0..=steps {
            let point = from + (to - from) * (i as f32 / steps as f32);
            let Some(pixel) = self.pixel_at(point) else {
                continue;
            };
            if last == Some(pixel) {
                continue;
            }
            last = Some(pixel);
            let color = paint.sample(self.pixel_center(pixel.0, pixel.1));
            self.blend(pixel.0, pixel.1, color, coverage);
        }
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Area, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let x = col as usize;
                let top = self.pixel(x, row as usize * 2);
                let bottom = self.pixel(x, row as usize * 2 + 1);
                let (Some(top), bottom) = (top, bottom) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(top.to_color())
                        .set_bg(bottom.unwrap_or(top).to_color());
                }
            }
        }
    }
}
