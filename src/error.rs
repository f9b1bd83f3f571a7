// error.rs - Errors at the driver and host boundary
//
// The update/projection step itself cannot fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StarfieldError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("viewport {width}x{height} has no drawable area")]
    DegenerateViewport { width: u32, height: u32 },

    #[error("animation is already running")]
    AlreadyRunning,

    #[error("no window object")]
    NoWindow,

    #[error("canvas '{0}' not found")]
    NoCanvas(String),

    #[error("2d context unavailable")]
    NoContext,

    #[error("failed to schedule frame: {0}")]
    Schedule(String),

    #[error("failed to attach resize listener: {0}")]
    Listener(String),

    #[cfg(not(target_arch = "wasm32"))]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl From<StarfieldError> for wasm_bindgen::JsValue {
    fn from(e: StarfieldError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
