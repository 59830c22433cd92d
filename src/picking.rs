//! Off-screen color picking surface.
//!
//! Every live raven is flat-filled with its identifying color.  A click is
//! resolved by sampling the pixel under the pointer and looking for the raven
//! that owns that color.  Painting goes to a back buffer which is swapped to
//! the front on `present`, so a sample never observes a half-painted frame.

use crate::entities::Rgb;

pub type Rgba = [u8; 4];

const TRANSPARENT: Rgba = [0, 0, 0, 0];

#[derive(Clone, Debug)]
pub struct PickingBuffer {
    width: usize,
    height: usize,
    back: Vec<Rgba>,
    front: Vec<Rgba>,
}

impl PickingBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        PickingBuffer {
            width,
            height,
            back: vec![TRANSPARENT; width * height],
            front: vec![TRANSPARENT; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset the back buffer to transparent.
    pub fn clear(&mut self) {
        self.back.fill(TRANSPARENT);
    }

    /// Fill the whole pixels covered by the rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let (x0, x1) = clip_span(x, w, self.width);
        let (y0, y1) = clip_span(y, h, self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let pixel = [color.0, color.1, color.2, 255];
        for row in y0..y1 {
            let start = row * self.width;
            self.back[start + x0..start + x1].fill(pixel);
        }
    }

    /// Publish the back buffer as the one clicks are resolved against.
    pub fn present(&mut self) {
        std::mem::swap(&mut self.back, &mut self.front);
    }

    /// Read one pixel of the most recently presented frame.
    pub fn sample(&self, x: f32, y: f32) -> Option<Rgba> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let (col, row) = (x as usize, y as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.front[row * self.width + col])
    }
}

/// Pixel range `[start, end)` covered by `origin..origin + extent`.
fn clip_span(origin: f32, extent: f32, limit: usize) -> (usize, usize) {
    let start = origin.round().max(0.0);
    let end = (origin + extent).round().max(0.0);
    let limit = limit as f32;
    (start.min(limit) as usize, end.min(limit) as usize)
}
