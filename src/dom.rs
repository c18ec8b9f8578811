use folio_core::{TrackGeometry, Viewport};
use std::cell::Cell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<Option<T>> {
    match document.get_element_by_id(id) {
        Some(el) => el
            .dyn_into::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("#{id} has unexpected type: {:?}", e)),
        None => Ok(None),
    }
}

/// Window size in CSS pixels, which is the particle field's coordinate space.
pub fn window_viewport(window: &web::Window) -> Viewport {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(w as f32, h as f32)
}

/// Current on-screen extent of the track; queried per update, never cached.
#[inline]
pub fn track_geometry(track: &web::Element) -> TrackGeometry {
    let rect = track.get_bounding_client_rect();
    TrackGeometry::new(rect.left() as f32, rect.width() as f32)
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
/// Returns the ratio so the painter can scale into CSS pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> f64 {
    let Some(w) = web::window() else {
        return 1.0;
    };
    let dpr = w.device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    dpr
}

type Handler = Closure<dyn FnMut(web::Event)>;

#[inline]
fn as_function(handler: &Handler) -> &js_sys::Function {
    handler.as_ref().unchecked_ref()
}

/// A fixed set of event listeners on one target that are attached and
/// detached together. The closures live as long as the set, so the same JS
/// functions are added and removed every time. Dropping the set detaches it.
pub struct ListenerSet {
    target: web::EventTarget,
    handlers: Vec<(&'static str, Handler)>,
    attached: Cell<bool>,
}

impl ListenerSet {
    pub fn new(target: impl Into<web::EventTarget>) -> Self {
        Self {
            target: target.into(),
            handlers: Vec::new(),
            attached: Cell::new(false),
        }
    }

    pub fn on(mut self, event: &'static str, handler: impl FnMut(web::Event) + 'static) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        self.handlers.push((event, closure));
        self
    }

    pub fn attach(&self) {
        if self.attached.replace(true) {
            return;
        }
        for (event, handler) in &self.handlers {
            _ = self
                .target
                .add_event_listener_with_callback(event, as_function(handler));
        }
    }

    pub fn detach(&self) {
        if !self.attached.replace(false) {
            return;
        }
        for (event, handler) in &self.handlers {
            _ = self
                .target
                .remove_event_listener_with_callback(event, as_function(handler));
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.detach();
    }
}
