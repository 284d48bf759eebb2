use crate::render;
use instant::Instant;
use starfield_core::{CursorTrail, RenderLoop, Stage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Cursor-trail element plus the state easing it toward the pointer.
pub struct TrailContext {
    pub element: web::HtmlElement,
    pub trail: Rc<RefCell<CursorTrail>>,
}

pub struct FrameContext<'a> {
    pub stage: Rc<RefCell<Stage>>,
    pub render_loop: RenderLoop,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub trail: Option<TrailContext>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
        }
        {
            let mut stage = self.stage.borrow_mut();
            self.render_loop.tick(&mut stage, self.gpu.as_mut(), dt);
        }

        if let Some(t) = &self.trail {
            let pos = t.trail.borrow_mut().step(dt);
            let style = t.element.style();
            let _ = style.set_property("left", &format!("{:.1}px", pos.x));
            let _ = style.set_property("top", &format!("{:.1}px", pos.y));
            let list = t.element.class_list();
            let _ = if t.trail.borrow().is_active() {
                list.add_1("active")
            } else {
                list.remove_1("active")
            };
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let guard = tick.borrow();
    if let (Some(w), Some(cb)) = (web::window(), guard.as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
