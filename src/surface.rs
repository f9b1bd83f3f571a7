// surface.rs - Drawing surface and host environment boundaries
//
// The driver only needs to fill rectangles and circles, and to be told
// about frames and resizes. Browser and offline backends implement these.

use crate::config::Rgb;
use crate::error::StarfieldError;

pub trait Surface {
    /// Current surface size in pixels
    fn size(&self) -> (u32, u32);

    fn set_size(&mut self, w: u32, h: u32);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Rgb);
}

pub trait Host {
    /// Cancellable token for a scheduled frame
    type Handle: Copy;

    /// Current viewport size in pixels
    fn viewport(&self) -> (u32, u32);

    /// Schedule one frame callback before the next repaint.
    fn request_frame(&mut self) -> Result<Self::Handle, StarfieldError>;

    fn cancel_frame(&mut self, handle: Self::Handle);

    /// Start delivering resize notifications.
    fn listen_resize(&mut self) -> Result<(), StarfieldError>;

    fn unlisten_resize(&mut self);
}
