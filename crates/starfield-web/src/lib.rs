#![cfg(target_arch = "wasm32")]
use instant::Instant;
use starfield_core::{
    Camera, FrameRateMonitor, ParticleField, RenderLoop, Stage, StarfieldConfig,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod render;
mod storage;

const CONTAINER_ID: &str = "canvas-container";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starfield-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Page config from `data-*` attributes on the canvas container. A malformed
/// attribute keeps its default; the others still apply.
fn read_config(container: &web::Element) -> StarfieldConfig {
    let (cfg, rejected) =
        StarfieldConfig::from_lookup_lenient(|key| dom::data_attribute(container, key));
    for e in rejected {
        log::warn!("[config] {}; keeping default", e);
    }
    cfg
}

fn create_canvas(document: &web::Document, container: &web::Element) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas.set_id("starfield-canvas");
    let _ = canvas.set_attribute(
        "style",
        "position:absolute;inset:0;width:100%;height:100%;display:block;",
    );
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = document
        .get_element_by_id(CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CONTAINER_ID))?;

    let config = read_config(&container);
    let (vw, vh) = dom::viewport_size();
    let device = config.device_class(vw as f32);

    let canvas = create_canvas(&document, &container)?;
    dom::sync_canvas_backing_size(&canvas, device);

    // Stage first so theme and scroll can land before the field exists
    let stage = Rc::new(RefCell::new(Stage::new(Camera::new(
        (vw / vh.max(1.0)) as f32,
    ))));
    events::wire_theme(&document, stage.clone());
    events::wire_scroll_camera(stage.clone(), canvas.clone(), device);
    events::wire_next_section_button(&document);
    events::wire_reveals(&document);
    let trail = events::wire_cursor_trail(&document)
        .map(|(element, trail)| frame::TrailContext { element, trail });

    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64);
    let field = ParticleField::for_device(device, &config, seed);
    stage.borrow_mut().install_field(field);

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] rendering unavailable; background stays static");
    }

    let mut render_loop = RenderLoop::new();
    if config.monitor_fps {
        render_loop = render_loop.with_monitor(FrameRateMonitor::default());
    }
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        stage,
        render_loop,
        gpu,
        canvas,
        trail,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
