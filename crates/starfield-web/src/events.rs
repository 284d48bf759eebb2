use crate::dom;
use crate::storage::{MediaColorScheme, PageStore};
use starfield_core::{
    next_section_target, page_reveals, reveal_due, CursorTrail, DeviceClass, RevealGroup,
    RevealLatch, RevealTrigger, ScrollCameraBinding, Stage, Theme, ThemeController,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type PageThemeController = ThemeController<PageStore, MediaColorScheme>;

const DARK_MODE_CLASS: &str = "dark-mode";
const REVEALED_CLASS: &str = "is-revealed";
// ease-out cubic
const REVEAL_EASING: &str = "cubic-bezier(0.215, 0.61, 0.355, 1)";

/// Scroll and resize both recompute the scroll pose; resize also refits the
/// canvas and camera.
pub fn wire_scroll_camera(stage: Rc<RefCell<Stage>>, canvas: web::HtmlCanvasElement, device: DeviceClass) {
    let apply = {
        let stage = stage.clone();
        move || {
            let (offset, max_offset) = dom::scroll_extent();
            ScrollCameraBinding.on_scroll(&mut stage.borrow_mut(), offset, max_offset);
        }
    };
    apply();
    dom::add_window_listener("scroll", apply.clone());

    dom::add_window_listener("resize", move || {
        dom::sync_canvas_backing_size(&canvas, device);
        let (w, h) = dom::viewport_size();
        stage.borrow_mut().camera.set_viewport(w as f32, h as f32);
        apply();
    });
}

/// Applies the initial theme to page and field, then wires the toggle button.
pub fn wire_theme(document: &web::Document, stage: Rc<RefCell<Stage>>) {
    let controller: Rc<RefCell<PageThemeController>> = Rc::new(RefCell::new(ThemeController::new(
        PageStore::open(),
        MediaColorScheme,
    )));
    let initial = controller.borrow_mut().initialize(&mut stage.borrow_mut());
    reflect_theme(document, initial);

    let doc = document.clone();
    dom::add_click_listener(document, "darkModeToggle", move || {
        let theme = controller.borrow_mut().toggle(&mut stage.borrow_mut());
        log::info!("[theme] switched to {}", theme);
        reflect_theme(&doc, theme);
    });
}

fn reflect_theme(document: &web::Document, theme: Theme) {
    dom::set_body_class(document, DARK_MODE_CLASS, theme.is_dark());
}

/// Feeds pointer movement into the trail; `None` when the page has no
/// `.cursor-trail` element.
pub fn wire_cursor_trail(document: &web::Document) -> Option<(web::HtmlElement, Rc<RefCell<CursorTrail>>)> {
    let element = document
        .query_selector(".cursor-trail")
        .ok()
        .flatten()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    let (width, _) = dom::viewport_size();
    let touch = width <= f64::from(starfield_core::NARROW_BREAKPOINT_PX) || dom::is_touch_device();
    let trail = Rc::new(RefCell::new(CursorTrail::new(touch)));

    let moved = trail.clone();
    let on_move = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        moved
            .borrow_mut()
            .pointer_moved(ev.client_x() as f32, ev.client_y() as f32);
    }) as Box<dyn FnMut(web::MouseEvent)>);
    let _ = document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
    on_move.forget();

    let left = trail.clone();
    let on_leave = Closure::wrap(Box::new(move || {
        left.borrow_mut().pointer_left();
    }) as Box<dyn FnMut()>);
    let _ = document.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref());
    on_leave.forget();

    Some((element, trail))
}

/// Keeps `#pageNextButton` pointing at the section after the one in view.
pub fn wire_next_section_button(document: &web::Document) {
    let Some(button) = document.get_element_by_id("pageNextButton") else {
        return;
    };
    let sections = dom::nav_sections(document);
    if sections.is_empty() {
        let _ = button.class_list().add_1("is-hidden");
        return;
    }
    let update = move || {
        let (scroll_y, _) = dom::scroll_extent();
        let (_, viewport_h) = dom::viewport_size();
        let spans: Vec<_> = sections
            .iter()
            .map(|(_, el)| dom::section_span(el, scroll_y))
            .collect();
        match next_section_target(&spans, scroll_y, viewport_h) {
            Some(i) => {
                let _ = button.class_list().remove_1("is-hidden");
                let _ = button.set_attribute("href", &sections[i].0);
            }
            None => {
                let _ = button.class_list().add_1("is-hidden");
            }
        }
    };
    update();
    let update = Rc::new(update);
    let on_scroll = update.clone();
    dom::add_window_listener("scroll", move || on_scroll());
    dom::add_window_listener("resize", move || update());
}

struct RevealTarget {
    element: web::HtmlElement,
    trigger: web::Element,
    group: RevealGroup,
    delay_secs: f64,
}

/// Plays hero content in on load and every other reveal group the first time
/// it scrolls into view. Groups whose elements are missing are skipped.
pub fn wire_reveals(document: &web::Document) {
    let has_logo = document
        .query_selector(".hero-logo-container")
        .ok()
        .flatten()
        .is_some();
    let mut targets = Vec::new();
    for group in page_reveals(has_logo) {
        let shared = match group.trigger_selector {
            Some(sel) => match document.query_selector(sel).ok().flatten() {
                Some(el) => Some(el),
                None => continue,
            },
            None => None,
        };
        for (i, el) in dom::query_all(document, group.selector).into_iter().enumerate() {
            let trigger = shared.clone().unwrap_or_else(|| el.clone());
            let Ok(element) = el.dyn_into::<web::HtmlElement>() else {
                continue;
            };
            targets.push(RevealTarget {
                element,
                trigger,
                group,
                delay_secs: group.delay_for(i),
            });
        }
    }
    if targets.is_empty() {
        return;
    }
    log::info!("[reveal] watching {} elements", targets.len());

    let latch = RefCell::new(RevealLatch::new(targets.len()));
    let check = move || {
        let mut latch = latch.borrow_mut();
        if latch.is_complete() {
            return;
        }
        let (_, viewport_h) = dom::viewport_size();
        for (i, t) in targets.iter().enumerate() {
            if latch.is_revealed(i) {
                continue;
            }
            let due = match t.group.trigger {
                RevealTrigger::Load => true,
                RevealTrigger::Scroll { start_fraction } => reveal_due(
                    t.trigger.get_bounding_client_rect().top(),
                    viewport_h,
                    start_fraction,
                ),
            };
            if latch.observe(i, due) {
                play_reveal(&t.element, t.group.duration_secs, t.delay_secs);
            }
        }
    };
    check();
    let check = Rc::new(check);
    for event in ["scroll", "resize", "load"] {
        let check = check.clone();
        dom::add_window_listener(event, move || check());
    }
}

fn play_reveal(element: &web::HtmlElement, duration: f64, delay: f64) {
    let style = element.style();
    let transition = format!(
        "opacity {duration:.2}s {REVEAL_EASING} {delay:.2}s, transform {duration:.2}s {REVEAL_EASING} {delay:.2}s"
    );
    let _ = style.set_property("transition", &transition);
    let _ = style.set_property("opacity", "1");
    let _ = style.set_property("transform", "none");
    let _ = element.class_list().add_1(REVEALED_CLASS);
}
