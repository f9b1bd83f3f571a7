// driver.rs - Render loop state machine
//
//   Stopped --start--> Running --stop--> Stopped
//                      |    ^
//                      +----+  frame (draw + reschedule), resize
//
// Running always holds the handle of the next scheduled frame, so stop()
// can cancel it. The host delivers frame and resize calls on one thread,
// one at a time.

use std::marker::PhantomData;

use crate::config::Config;
use crate::error::StarfieldError;
use crate::field::{Field, is_degenerate};
use crate::project::advance;
use crate::rng::Rng;
use crate::surface::{Host, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State<T> {
    Stopped,
    Running { pending: Option<T> },
}

pub struct Animator<S: Surface, H: Host> {
    surface: S,
    cfg: Config,
    field: Field,
    state: State<H::Handle>,
    frames: u64,
    _host: PhantomData<fn(&mut H)>,
}

impl<S: Surface, H: Host> Animator<S, H> {
    pub fn new(surface: S, cfg: Config) -> Result<Self, StarfieldError> {
        cfg.validate()?;
        let (w, h) = surface.size();
        let field = Field::new(cfg.stars, w, h, Rng::new(cfg.seed));
        Ok(Self {
            surface,
            cfg,
            field,
            state: State::Stopped,
            frames: 0,
            _host: PhantomData,
        })
    }

    /// Size everything to the viewport and schedule the first frame.
    pub fn start(&mut self, host: &mut H) -> Result<(), StarfieldError> {
        if self.is_running() {
            return Err(StarfieldError::AlreadyRunning);
        }

        let (w, h) = host.viewport();
        if is_degenerate(w, h) {
            return Err(StarfieldError::DegenerateViewport { width: w, height: h });
        }

        self.surface.set_size(w, h);
        self.field.reinitialize(w, h);

        host.listen_resize()?;
        let pending = match host.request_frame() {
            Ok(handle) => handle,
            Err(e) => {
                host.unlisten_resize();
                return Err(e);
            }
        };

        self.state = State::Running { pending: Some(pending) };
        log::info!("starfield started: {} stars at {}x{}", self.field.len(), w, h);
        Ok(())
    }

    /// Frame callback: clear, draw, schedule the next frame.
    /// A failure to reschedule stops the loop.
    pub fn frame(&mut self, host: &mut H) -> Result<(), StarfieldError> {
        let State::Running { .. } = self.state else { return Ok(()); };
        // The callback that brought us here has fired; nothing to cancel.
        self.state = State::Running { pending: None };

        self.draw();

        match host.request_frame() {
            Ok(handle) => {
                self.state = State::Running { pending: Some(handle) };
                Ok(())
            }
            Err(e) => {
                log::error!("starfield stopped after {} frames: {}", self.frames, e);
                host.unlisten_resize();
                self.state = State::Stopped;
                Err(e)
            }
        }
    }

    /// Rebuild surface and field for a new viewport. Ignored while stopped
    /// or when the new viewport has no area.
    pub fn resize(&mut self, w: u32, h: u32) {
        if !self.is_running() { return; }
        if self.field.resize(w, h) {
            self.surface.set_size(w, h);
            log::info!("starfield resized to {}x{}", w, h);
        }
    }

    /// Cancel the pending frame and detach from resize events.
    pub fn stop(&mut self, host: &mut H) {
        let State::Running { pending } = self.state else { return; };
        if let Some(handle) = pending {
            host.cancel_frame(handle);
        }
        host.unlisten_resize();
        self.state = State::Stopped;
        log::info!("starfield stopped after {} frames", self.frames);
    }

    fn draw(&mut self) {
        let (w, h) = (self.field.width(), self.field.height());
        let (bg, fg) = (self.cfg.background, self.cfg.star_color);

        self.surface.fill_rect(0.0, 0.0, w as f32, h as f32, bg);
        for s in advance(&mut self.field, &self.cfg) {
            self.surface.fill_circle(s.x, s.y, s.size, fg);
        }
        self.frames += 1;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn frames(&self) -> u64 { self.frames }
    pub fn field(&self) -> &Field { &self.field }
    pub fn config(&self) -> &Config { &self.cfg }
    pub fn surface(&self) -> &S { &self.surface }
}
