// raster.rs - In-memory RGBA surface for offline rendering
//
// Circles are rasterized with a one-pixel coverage ramp so sub-pixel stars
// still show up, roughly matching what a canvas arc() + fill() produces.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::config::Rgb;
use crate::error::StarfieldError;
use crate::surface::Surface;

pub struct Raster {
    img: RgbaImage,
}

impl Raster {
    pub fn new(w: u32, h: u32) -> Self {
        Self { img: RgbaImage::new(w, h) }
    }

    /// Color at (x, y); `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.img.get_pixel_checked(x, y).map(|p| Rgb::new(p[0], p[1], p[2]))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn save_png(&self, path: &Path) -> Result<(), StarfieldError> {
        self.img.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Blend `color` over pixel (x, y) with coverage `a` in [0, 1].
    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Rgb, a: f32) {
        let p = self.img.get_pixel_mut(x, y);
        let mix = |dst: u8, src: u8| (dst as f32 + (src as f32 - dst as f32) * a).round() as u8;
        *p = Rgba([mix(p[0], color.r), mix(p[1], color.g), mix(p[2], color.b), 255]);
    }
}

impl Surface for Raster {
    fn size(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    fn set_size(&mut self, w: u32, h: u32) {
        if self.img.dimensions() != (w, h) {
            self.img = RgbaImage::new(w, h);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let (iw, ih) = self.img.dimensions();
        let x0 = x.max(0.0) as u32;
        let y0 = y.max(0.0) as u32;
        let x1 = ((x + w).max(0.0) as u32).min(iw);
        let y1 = ((y + h).max(0.0) as u32).min(ih);

        let px = Rgba([color.r, color.g, color.b, 255]);
        for py in y0..y1 {
            for qx in x0..x1 {
                self.img.put_pixel(qx, py, px);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgb) {
        if r <= 0.0 { return; }

        let (iw, ih) = self.img.dimensions();
        let x0 = (cx - r - 1.0).floor().max(0.0) as u32;
        let y0 = (cy - r - 1.0).floor().max(0.0) as u32;
        let x1 = ((cx + r + 1.0).ceil().max(0.0) as u32).min(iw);
        let y1 = ((cy + r + 1.0).ceil().max(0.0) as u32).min(ih);

        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                let a = (r + 0.5 - d).clamp(0.0, 1.0);
                if a > 0.0 {
                    self.blend(px, py, color, a);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clears() {
        let mut r = Raster::new(8, 4);
        r.fill_rect(0.0, 0.0, 8.0, 4.0, Rgb::new(10, 20, 30));
        assert_eq!(r.pixel(0, 0), Some(Rgb::new(10, 20, 30)));
        assert_eq!(r.pixel(7, 3), Some(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut r = Raster::new(4, 4);
        r.fill_rect(-2.0, -2.0, 100.0, 3.0, Rgb::WHITE);
        assert_eq!(r.pixel(3, 0), Some(Rgb::WHITE));
        assert_eq!(r.pixel(0, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn test_circle_lights_center() {
        let mut r = Raster::new(10, 10);
        r.fill_rect(0.0, 0.0, 10.0, 10.0, Rgb::BLACK);
        r.fill_circle(5.5, 5.5, 1.5, Rgb::WHITE);
        assert_eq!(r.pixel(5, 5), Some(Rgb::WHITE));
        assert_eq!(r.pixel(0, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_zero_radius_draws_nothing() {
        let mut r = Raster::new(10, 10);
        r.fill_rect(0.0, 0.0, 10.0, 10.0, Rgb::BLACK);
        r.fill_circle(5.0, 5.0, 0.0, Rgb::WHITE);
        assert!(r.image().pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_circle_near_edge_is_clipped() {
        let mut r = Raster::new(4, 4);
        r.fill_circle(0.0, 0.0, 1.5, Rgb::WHITE);
        r.fill_circle(3.9, 3.9, 1.5, Rgb::WHITE);
        assert_eq!(r.pixel(0, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let r = Raster::new(4, 3);
        assert_eq!(r.pixel(3, 2), Some(Rgb::BLACK));
        assert_eq!(r.pixel(4, 0), None);
        assert_eq!(r.pixel(0, 3), None);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut r = Raster::new(4, 4);
        r.set_size(16, 9);
        assert_eq!(r.size(), (16, 9));
    }
}
