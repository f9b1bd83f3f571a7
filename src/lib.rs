// ============================================================================
// STARFIELD - Perspective particle background
// ============================================================================
//
// A cloud of points drifts toward the viewer. Each frame every point loses a
// little depth, is projected onto the screen with k = C / z, and is drawn as
// a dot that grows as it gets closer. Points that pass the viewer are
// recycled to the far plane.
//
//   field    - point cloud + viewport (SoA)
//   project  - depth step, respawn, projection, culling
//   driver   - Stopped/Running render loop over a Surface and a Host
//   web      - canvas + requestAnimationFrame binding (wasm32)
//   raster   - in-memory image surface (native)

pub mod config;
pub mod driver;
pub mod error;
pub mod field;
pub mod project;
pub mod rng;
pub mod surface;

#[cfg(not(target_arch = "wasm32"))]
pub mod raster;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{Config, Rgb};
pub use driver::Animator;
pub use error::StarfieldError;
pub use field::{Field, Point};
pub use project::{Sprite, advance, project, project_point, step};
pub use rng::Rng;
pub use surface::{Host, Surface};

#[cfg(target_arch = "wasm32")]
pub use web::Starfield;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Route panics to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
