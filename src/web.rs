// web.rs - Browser binding
//
// Canvas 2d context as the drawing surface, requestAnimationFrame as the
// frame source, window "resize" as the resize source.
//
// The animator and host live behind one Rc<RefCell<_>>. The frame and
// resize closures only hold Weak references, so dropping the Starfield
// frees everything.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::{Config, Rgb};
use crate::driver::Animator;
use crate::error::StarfieldError;
use crate::surface::{Host, Surface};

struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    // Last fill style, to avoid re-formatting the same color per star
    fill: Option<Rgb>,
}

impl CanvasSurface {
    fn set_fill(&mut self, color: Rgb) {
        if self.fill != Some(color) {
            self.ctx.set_fill_style_str(&color.css());
            self.fill = Some(color);
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, w: u32, h: u32) {
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        // Resizing a canvas resets its context state
        self.fill = None;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.set_fill(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Rgb) {
        self.set_fill(color);
        self.ctx.begin_path();
        // arc() only throws for a negative radius
        if self.ctx.arc(x as f64, y as f64, r.max(0.0) as f64, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}

struct WebHost {
    window: Window,
    on_frame: Option<Closure<dyn FnMut()>>,
    on_resize: Option<Closure<dyn FnMut()>>,
    listening: bool,
}

impl WebHost {
    fn inner_size(window: &Window) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).map_or(0, |f| f.max(0.0) as u32)
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }
}

impl Host for WebHost {
    type Handle = i32;

    fn viewport(&self) -> (u32, u32) {
        Self::inner_size(&self.window)
    }

    fn request_frame(&mut self) -> Result<i32, StarfieldError> {
        let cb = self
            .on_frame
            .as_ref()
            .ok_or_else(|| StarfieldError::Schedule("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| StarfieldError::Schedule(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle, e);
        }
    }

    fn listen_resize(&mut self) -> Result<(), StarfieldError> {
        if self.listening { return Ok(()); }
        let cb = self
            .on_resize
            .as_ref()
            .ok_or_else(|| StarfieldError::Listener("resize callback not installed".into()))?;
        self.window
            .add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
            .map_err(|e| StarfieldError::Listener(format!("{:?}", e)))?;
        self.listening = true;
        Ok(())
    }

    fn unlisten_resize(&mut self) {
        if !self.listening { return; }
        if let Some(cb) = self.on_resize.as_ref() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove resize listener: {:?}", e);
            }
        }
        self.listening = false;
    }
}

struct Inner {
    animator: Animator<CanvasSurface, WebHost>,
    host: WebHost,
}

/// Starfield background bound to a `<canvas>` element
#[wasm_bindgen]
pub struct Starfield {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl Starfield {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<Starfield, JsValue> {
        let cfg = Config { seed: random_seed(), ..Config::default() };
        Ok(Self::with_config(canvas_id, cfg)?)
    }

    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(
        canvas_id: &str,
        stars: usize,
        depth_step: f32,
        projection: f32,
        max_radius: f32,
    ) -> Result<Starfield, JsValue> {
        let cfg = Config {
            stars,
            depth_step,
            projection,
            max_radius,
            seed: random_seed(),
            ..Config::default()
        };
        Ok(Self::with_config(canvas_id, cfg)?)
    }

    /// Size the canvas to the window and begin animating.
    pub fn start(&self) -> Result<(), JsValue> {
        let mut inner = self.inner.borrow_mut();
        let Inner { animator, host } = &mut *inner;
        Ok(animator.start(host)?)
    }

    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        let Inner { animator, host } = &mut *inner;
        animator.stop(host);
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.borrow().animator.is_running()
    }

    /// Manually resize, e.g. when the canvas is not full-window.
    pub fn resize(&self, w: u32, h: u32) {
        self.inner.borrow_mut().animator.resize(w, h);
    }

    #[wasm_bindgen(js_name = starCount)]
    pub fn star_count(&self) -> usize {
        self.inner.borrow().animator.field().len()
    }
}

impl Starfield {
    /// Look up the canvas and its 2d context. Any failure here means the
    /// loop is never started.
    pub fn with_config(canvas_id: &str, cfg: Config) -> Result<Starfield, StarfieldError> {
        let window = web_sys::window().ok_or(StarfieldError::NoWindow)?;
        let document = window.document().ok_or(StarfieldError::NoWindow)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| StarfieldError::NoCanvas(canvas_id.to_string()))?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into().ok())
            .ok_or(StarfieldError::NoContext)?;

        let surface = CanvasSurface { canvas, ctx, fill: None };
        let host = WebHost { window, on_frame: None, on_resize: None, listening: false };
        let animator = Animator::new(surface, cfg)?;

        let inner = Rc::new(RefCell::new(Inner { animator, host }));
        install_callbacks(&inner);
        Ok(Starfield { inner })
    }
}

impl Drop for Starfield {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            let Inner { animator, host } = &mut *inner;
            animator.stop(host);
        }
    }
}

fn install_callbacks(inner: &Rc<RefCell<Inner>>) {
    let weak: Weak<RefCell<Inner>> = Rc::downgrade(inner);
    let on_frame = Closure::<dyn FnMut()>::new(move || {
        let Some(inner) = weak.upgrade() else { return; };
        let mut inner = inner.borrow_mut();
        let Inner { animator, host } = &mut *inner;
        if let Err(e) = animator.frame(host) {
            // Already logged by the animator, which has stopped itself
            log::debug!("frame callback ended the loop: {}", e);
        }
    });

    let weak: Weak<RefCell<Inner>> = Rc::downgrade(inner);
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let Some(inner) = weak.upgrade() else { return; };
        let mut inner = inner.borrow_mut();
        let (w, h) = WebHost::inner_size(&inner.host.window);
        inner.animator.resize(w, h);
    });

    let mut inner = inner.borrow_mut();
    inner.host.on_frame = Some(on_frame);
    inner.host.on_resize = Some(on_resize);
}

fn random_seed() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}
