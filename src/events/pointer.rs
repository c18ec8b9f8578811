use crate::dom::{self, ListenerSet};
use folio_core::{PointerFeed, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window-level inputs of the particle layer: pointer position into `pointer`
/// (last write wins) and the new viewport into `on_resize`.
pub fn field_listeners(
    window: &web::Window,
    pointer: PointerFeed,
    mut on_resize: impl FnMut(Viewport) + 'static,
) -> ListenerSet {
    let window_resize = window.clone();
    ListenerSet::new(window.clone())
        .on("pointermove", move |ev: web::Event| {
            // PointerEvent derives from MouseEvent
            if let Some(me) = ev.dyn_ref::<web::MouseEvent>() {
                pointer.set(me.client_x() as f32, me.client_y() as f32);
            }
        })
        .on("resize", move |_ev: web::Event| {
            on_resize(dom::window_viewport(&window_resize));
        })
}
