//! Pixel sinks: the software canvas and the cartesian adapter

use std::path::Path;
use super::circle::{rasterize_circle, CircleAlgorithm};
use super::line::{rasterize_line, rasterize_segment, LineAlgorithm};
use super::types::{Circle, Color, Pixel, Segment};

/// Anything that accepts rasterized pixels
pub trait PixelSink {
    fn plot(&mut self, p: Pixel, color: Color);

    fn plot_all<I>(&mut self, pixels: I, color: Color)
    where
        I: IntoIterator<Item = Pixel>,
        Self: Sized,
    {
        for p in pixels {
            self.plot(p, color);
        }
    }

    fn draw_line(&mut self, algorithm: LineAlgorithm, p1: Pixel, p2: Pixel, color: Color)
    where
        Self: Sized,
    {
        self.plot_all(rasterize_line(algorithm, p1, p2), color);
    }

    /// Like [`draw_line`](Self::draw_line) but valid in every octant for
    /// both algorithms
    fn draw_segment(&mut self, algorithm: LineAlgorithm, segment: Segment, color: Color)
    where
        Self: Sized,
    {
        self.plot_all(rasterize_segment(algorithm, segment), color);
    }

    fn draw_circle(&mut self, algorithm: CircleAlgorithm, circle: Circle, color: Color)
    where
        Self: Sized,
    {
        self.plot_all(rasterize_circle(algorithm, circle), color);
    }
}

/// Collects pixels, ignoring color
impl PixelSink for Vec<Pixel> {
    fn plot(&mut self, p: Pixel, _color: Color) {
        self.push(p);
    }
}

/// RGBA canvas for software rendering (row 0 is the top)
pub struct Canvas {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![255; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&bytes);
        }
    }

    /// Write one pixel; coordinates off the canvas are dropped
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = (y as usize * self.width + x as usize) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Color {
                r: self.pixels[idx],
                g: self.pixels[idx + 1],
                b: self.pixels[idx + 2],
                a: self.pixels[idx + 3],
            }
        } else {
            Color::BLACK
        }
    }

    /// Draw a filled disc at (cx, cy) (markers, not a rasterization demo)
    pub fn fill_disc(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        let r_sq = radius * radius;
        for y in (cy - radius).max(0)..=(cy + radius).min(self.height as i32 - 1) {
            for x in (cx - radius).max(0)..=(cx + radius).min(self.width as i32 - 1) {
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Cartesian view of this canvas (origin at the center, y up)
    pub fn centered(&mut self) -> Centered<'_, Canvas> {
        let (width, height) = (self.width, self.height);
        Centered::new(self, width, height)
    }

    /// Write the canvas to a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgba8,
        )
    }
}

impl PixelSink for Canvas {
    fn plot(&mut self, p: Pixel, color: Color) {
        self.set_pixel(p.x, p.y, color);
    }
}

/// Maps cartesian pixels (origin at the surface center, y up) onto a
/// device sink whose row 0 is the top
pub struct Centered<'a, S: PixelSink> {
    sink: &'a mut S,
    half_w: i32,
    half_h: i32,
}

impl<'a, S: PixelSink> Centered<'a, S> {
    pub fn new(sink: &'a mut S, width: usize, height: usize) -> Self {
        Self {
            sink,
            half_w: width as i32 / 2,
            half_h: height as i32 / 2,
        }
    }

    pub fn to_device(&self, p: Pixel) -> Pixel {
        Pixel::new(p.x + self.half_w, self.half_h - p.y)
    }

    /// Inverse of [`to_device`](Self::to_device), for mouse input
    pub fn from_device(&self, p: Pixel) -> Pixel {
        Pixel::new(p.x - self.half_w, self.half_h - p.y)
    }
}

impl<S: PixelSink> PixelSink for Centered<'_, S> {
    fn plot(&mut self, p: Pixel, color: Color) {
        let device = self.to_device(p);
        self.sink.plot(device, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_pixel_bounds() {
        let mut canvas = Canvas::new(4, 3);
        canvas.clear(Color::WHITE);
        canvas.set_pixel(3, 2, Color::RED);
        canvas.set_pixel(-1, 0, Color::RED);
        canvas.set_pixel(4, 0, Color::RED);
        assert_eq!(canvas.get_pixel(3, 2), Color::RED);
        assert_eq!(canvas.get_pixel(0, 0), Color::WHITE);
        assert_eq!(canvas.get_pixel(9, 9), Color::BLACK);
    }

    #[test]
    fn test_centered_maps_origin_to_middle() {
        let mut canvas = Canvas::new(500, 500);
        canvas.clear(Color::WHITE);
        {
            let mut centered = canvas.centered();
            centered.plot(Pixel::new(0, 0), Color::BLACK);
            centered.plot(Pixel::new(10, 20), Color::RED);
            assert_eq!(centered.from_device(Pixel::new(260, 230)), Pixel::new(10, 20));
        }
        assert_eq!(canvas.get_pixel(250, 250), Color::BLACK);
        assert_eq!(canvas.get_pixel(260, 230), Color::RED);
    }

    #[test]
    fn test_draw_line_into_vec_sink() {
        let mut sink: Vec<Pixel> = Vec::new();
        sink.draw_line(LineAlgorithm::Dda, Pixel::new(0, 0), Pixel::new(0, 3), Color::BLACK);
        assert_eq!(sink.len(), 4);

        let mut sink: Vec<Pixel> = Vec::new();
        sink.draw_circle(CircleAlgorithm::Midpoint, Circle::new(Pixel::new(0, 0), 5), Color::BLACK);
        assert_eq!(sink.len(), 32);
    }

    #[test]
    fn test_fill_disc_stays_on_canvas() {
        let mut canvas = Canvas::new(8, 8);
        canvas.clear(Color::WHITE);
        canvas.fill_disc(0, 0, 2, Color::BLUE);
        assert_eq!(canvas.get_pixel(0, 0), Color::BLUE);
        assert_eq!(canvas.get_pixel(2, 0), Color::BLUE);
        assert_eq!(canvas.get_pixel(2, 2), Color::WHITE);
    }
}
