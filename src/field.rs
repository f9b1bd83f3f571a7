// field.rs - Simulated point cloud and viewport
//
// Structure-of-Arrays layout for cache-friendly iteration:
// one column per coordinate, one index per point.
//
// Coordinates are pixels. x, y are offsets from the viewport center,
// z is depth along the view axis in (0, width].

use crate::rng::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

pub struct Field {
    pub(crate) x: Vec<f32>,
    pub(crate) y: Vec<f32>,
    pub(crate) z: Vec<f32>,

    w: u32,
    h: u32,

    rng: Rng,
}

impl Field {
    /// Allocate `n` points and sample them over a `w` x `h` viewport.
    /// Over a zero-area viewport the points stay unsampled (z = 0, expired)
    /// until the first non-degenerate `reinitialize`.
    pub fn new(n: usize, w: u32, h: u32, rng: Rng) -> Self {
        let mut field = Self {
            x: vec![0.0; n],
            y: vec![0.0; n],
            z: vec![0.0; n],
            w,
            h,
            rng,
        };
        field.reinitialize(w, h);
        field
    }

    /// Resample every point for a `w` x `h` viewport.
    /// A zero-area viewport only records the dimensions; there is nothing
    /// to sample from.
    pub fn reinitialize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        if is_degenerate(w, h) { return; }
        let (wf, hf) = (w as f32, h as f32);
        for i in 0..self.z.len() {
            self.x[i] = self.rng.centered(wf);
            self.y[i] = self.rng.centered(hf);
            self.z[i] = self.rng.depth(wf);
        }
    }

    /// Rebuild the whole population for new dimensions.
    /// A zero-area viewport is skipped and the current points are kept.
    pub fn resize(&mut self, w: u32, h: u32) -> bool {
        if is_degenerate(w, h) {
            log::warn!("ignoring degenerate resize to {}x{}", w, h);
            return false;
        }
        self.reinitialize(w, h);
        true
    }

    /// Send point `i` back to the far plane with a fresh lateral position.
    #[inline]
    pub(crate) fn respawn(&mut self, i: usize) {
        let (wf, hf) = (self.w as f32, self.h as f32);
        self.z[i] = wf;
        self.x[i] = self.rng.centered(wf);
        self.y[i] = self.rng.centered(hf);
    }

    pub fn len(&self) -> usize { self.z.len() }
    pub fn is_empty(&self) -> bool { self.z.is_empty() }
    pub fn width(&self) -> u32 { self.w }
    pub fn height(&self) -> u32 { self.h }

    pub fn point(&self, i: usize) -> Point {
        Point { x: self.x[i], y: self.y[i], z: self.z[i] }
    }

    pub fn set_point(&mut self, i: usize, p: Point) {
        self.x[i] = p.x;
        self.y[i] = p.y;
        self.z[i] = p.z;
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.len()).map(|i| self.point(i))
    }
}

#[inline]
pub fn is_degenerate(w: u32, h: u32) -> bool {
    w == 0 || h == 0
}
