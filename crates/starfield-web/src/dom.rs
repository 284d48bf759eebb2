use starfield_core::{DeviceClass, SectionSpan};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Registers a window-level listener for the lifetime of the page.
pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    if let Some(w) = web::window() {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = w.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn viewport_size() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

/// Current vertical scroll offset and the largest offset the page allows.
pub fn scroll_extent() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let offset = w.scroll_y().unwrap_or(0.0);
    let (_, viewport_h) = viewport_size();
    let doc_h = w
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    (offset, (doc_h - viewport_h).max(0.0))
}

pub fn is_touch_device() -> bool {
    web::window()
        .map(|w| js_sys::Reflect::has(&w, &"ontouchstart".into()).unwrap_or(false))
        .unwrap_or(false)
}

/// Sizes the canvas backing store to its CSS size times the device pixel
/// ratio, re-read on every call so zoom and monitor changes are picked up.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, device: DeviceClass) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) = device.backing_size(rect.width(), rect.height(), dpr);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
}

pub fn set_body_class(document: &web::Document, class: &str, on: bool) {
    if let Some(body) = document.body() {
        let list = body.class_list();
        let _ = if on { list.add_1(class) } else { list.remove_1(class) };
    }
}

/// `data-*` attribute lookup on an element, for config overrides.
pub fn data_attribute(el: &web::Element, key: &str) -> Option<String> {
    el.get_attribute(&format!("data-{key}"))
        .filter(|v| !v.trim().is_empty())
}

/// All elements matching `selector`, in document order.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// In-page targets of the nav links, as (href, element) pairs.
pub fn nav_sections(document: &web::Document) -> Vec<(String, web::Element)> {
    query_all(document, ".nav-menu .nav-link[href^=\"#\"]")
        .into_iter()
        .filter_map(|link| link.get_attribute("href"))
        .filter(|href| href != "#")
        .filter_map(|href| {
            let target = document.query_selector(&href).ok().flatten()?;
            Some((href, target))
        })
        .collect()
}

/// Document-space span of an element given the current scroll offset.
pub fn section_span(el: &web::Element, scroll_y: f64) -> SectionSpan {
    let rect = el.get_bounding_client_rect();
    SectionSpan {
        top: rect.top() + scroll_y,
        height: rect.height(),
    }
}
