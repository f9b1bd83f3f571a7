// config.rs - Tunable starfield constants
//
// Defaults reproduce the site background: 1000 white stars on black,
// drifting 0.5px of depth per frame toward the viewer.

use crate::error::StarfieldError;

pub const DEFAULT_STARS: usize = 1000;
pub const DEFAULT_DEPTH_STEP: f32 = 0.5;
pub const DEFAULT_PROJECTION: f32 = 128.0;
pub const DEFAULT_MAX_RADIUS: f32 = 1.5;
pub const DEFAULT_SEED: u32 = 0xDEADBEEF;

/// 8-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color string, e.g. `rgb(255,255,255)`
    pub fn css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Number of simulated points (N)
    pub stars: usize,
    /// Depth decrement per frame (Δz), in pixels
    pub depth_step: f32,
    /// Perspective constant (C): k = C / z
    pub projection: f32,
    /// Radius of a star at z = 0 (S)
    pub max_radius: f32,
    pub background: Rgb,
    pub star_color: Rgb,
    pub seed: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stars: DEFAULT_STARS,
            depth_step: DEFAULT_DEPTH_STEP,
            projection: DEFAULT_PROJECTION,
            max_radius: DEFAULT_MAX_RADIUS,
            background: Rgb::BLACK,
            star_color: Rgb::WHITE,
            seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    /// Reject values that would stall the stream or break the projection.
    pub fn validate(&self) -> Result<(), StarfieldError> {
        if !self.depth_step.is_finite() || self.depth_step <= 0.0 {
            return Err(StarfieldError::InvalidConfig(format!(
                "depth step must be positive, got {}",
                self.depth_step
            )));
        }
        if !self.projection.is_finite() || self.projection <= 0.0 {
            return Err(StarfieldError::InvalidConfig(format!(
                "projection constant must be positive, got {}",
                self.projection
            )));
        }
        if !self.max_radius.is_finite() || self.max_radius < 0.0 {
            return Err(StarfieldError::InvalidConfig(format!(
                "max radius must be non-negative, got {}",
                self.max_radius
            )));
        }
        Ok(())
    }
}
