//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the color buffer and implements
//! the drawing operations a wireframe needs: clearing, pixels, a background
//! grid, and lines.

use std::path::Path;

use crate::colors;
use crate::math::{ScreenSize, Vec3};

pub struct Renderer {
    color_buffer: Vec<u32>,
    size: ScreenSize,
}

impl Renderer {
    pub fn new(size: ScreenSize) -> Self {
        Self {
            color_buffer: vec![colors::BACKGROUND; size.pixel_count()],
            size,
        }
    }

    pub fn resize(&mut self, size: ScreenSize) {
        self.color_buffer = vec![colors::BACKGROUND; size.pixel_count()];
        self.size = size;
    }

    pub fn size(&self) -> ScreenSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.size.width as i32 && y >= 0 && y < self.size.height as i32 {
            let index = (y as u32 * self.size.width + x as u32) as usize;
            self.color_buffer[index] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.size.width as i32 && y >= 0 && y < self.size.height as i32 {
            Some(self.color_buffer[(y as u32 * self.size.width + x as u32) as usize])
        } else {
            None
        }
    }

    pub fn draw_grid(&mut self, spacing: i32, color: u32) {
        for y in 0..self.size.height as i32 {
            for x in 0..self.size.width as i32 {
                if x % spacing == 0 || y % spacing == 0 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draws a segment given in pixel coordinates (Z is ignored).
    ///
    /// The segment is first cut to the viewport, so endpoints far off screen
    /// (common for edges cut close to the near plane) cost nothing extra.
    pub fn draw_segment(&mut self, from: Vec3, to: Vec3, color: u32) {
        let Some((x0, y0, x1, y1)) = self.clip_to_viewport(from, to) else {
            return;
        };
        self.draw_line_bresenham(
            x0.round() as i32,
            y0.round() as i32,
            x1.round() as i32,
            y1.round() as i32,
            color,
        );
    }

    /// Liang-Barsky clipping of a 2D segment against the pixel rectangle.
    fn clip_to_viewport(&self, from: Vec3, to: Vec3) -> Option<(f32, f32, f32, f32)> {
        if ![from.x, from.y, to.x, to.y].iter().all(|c| c.is_finite()) {
            return None;
        }
        let max_x = self.size.width.saturating_sub(1) as f32;
        let max_y = self.size.height.saturating_sub(1) as f32;
        let dx = to.x - from.x;
        let dy = to.y - from.y;

        let mut t0 = 0.0_f32;
        let mut t1 = 1.0_f32;
        // (p, q) for the left, right, top and bottom edges
        let bounds = [
            (-dx, from.x),
            (dx, max_x - from.x),
            (-dy, from.y),
            (dy, max_y - from.y),
        ];
        for (p, q) in bounds {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            from.x + t0 * dx,
            from.y + t0 * dy,
            from.x + t1 * dx,
            from.y + t1 * dy,
        ))
    }

    /// Draws a line between two points using Bresenham's line algorithm.
    ///
    /// For each step along the major axis we decide whether to also step along
    /// the minor axis, based on an accumulated integer error term.
    pub fn draw_line_bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        // Positive error favors x movement, negative favors y.
        let mut err = dx - dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }
            // Both conditions can hold, giving a diagonal step.
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    /// Color buffer as ARGB8888 bytes, for uploading to a window texture.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8; the byte
        // slice covers exactly the buffer's memory and borrows it immutably.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Writes the current frame to an image file (format from the extension).
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let width = self.size.width;
        let image = image::RgbaImage::from_fn(width, self.size.height, |x, y| {
            image::Rgba(colors::to_rgba(
                self.color_buffer[(y * width + x) as usize],
            ))
        });
        image.save(path)
    }
}
