// host.rs - Offline frame source
//
// Frames are "scheduled" by handing out a ticket; the caller fires the
// pending ticket before each animator.frame() call.

use starfield_engine::{Host, StarfieldError};

pub struct OfflineHost {
    w: u32,
    h: u32,
    next: u64,
    pending: Option<u64>,
}

impl OfflineHost {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h, next: 0, pending: None }
    }

    /// Consume the pending frame, as a display refresh would.
    pub fn fire(&mut self) -> Result<u64, StarfieldError> {
        self.pending
            .take()
            .ok_or_else(|| StarfieldError::Schedule("no frame pending".into()))
    }
}

impl Host for OfflineHost {
    type Handle = u64;

    fn viewport(&self) -> (u32, u32) {
        (self.w, self.h)
    }

    fn request_frame(&mut self) -> Result<u64, StarfieldError> {
        self.next += 1;
        self.pending = Some(self.next);
        Ok(self.next)
    }

    fn cancel_frame(&mut self, handle: u64) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    // No window to resize offline
    fn listen_resize(&mut self) -> Result<(), StarfieldError> { Ok(()) }
    fn unlisten_resize(&mut self) {}
}
