use crate::constants::DRAGGING_CLASS;
use crate::dom::{self, ListenerSet};
use folio_core::{DragController, TrackGeometry};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys as web;

/// One draggable marker on one track.
///
/// `grab` listens on the marker for gesture start for as long as the session
/// is mounted. `gesture` holds the window-level move/end listeners: attached
/// when a gesture starts, detached when it ends, so a drag that leaves the
/// track (or the window) still terminates. The optional `fill` is the
/// progress bar behind the marker; its width follows the position.
pub struct DragSession {
    controller: Rc<RefCell<DragController>>,
    track: web::Element,
    marker: web::HtmlElement,
    fill: Option<web::HtmlElement>,
    grab: ListenerSet,
    gesture: ListenerSet,
}

impl DragSession {
    pub fn mount(
        window: &web::Window,
        track: web::Element,
        marker: web::HtmlElement,
        fill: Option<web::HtmlElement>,
        controller: DragController,
    ) -> Rc<Self> {
        let controller = Rc::new(RefCell::new(controller));
        let session = Rc::new_cyclic(|weak: &Weak<DragSession>| {
            let grab = ListenerSet::new(marker.clone())
                .on("pointerdown", with_session(weak, |s, ev| s.begin(&ev)))
                .on("touchstart", with_session(weak, |s, ev| s.begin(&ev)));
            let gesture = ListenerSet::new(window.clone())
                .on(
                    "pointermove",
                    with_session(weak, |s, ev| {
                        if let Some(x) = pointer_client_x(&ev) {
                            s.update(|c, track| c.update_from_pointer(x, track));
                        }
                    }),
                )
                .on(
                    "touchmove",
                    with_session(weak, |s, ev| {
                        let touch = first_touch_client_x(&ev);
                        s.update(|c, track| c.update_from_touch(touch, track));
                    }),
                )
                .on("pointerup", with_session(weak, |s, _| s.end()))
                .on("pointercancel", with_session(weak, |s, _| s.end()))
                .on("touchend", with_session(weak, |s, _| s.end()))
                .on("touchcancel", with_session(weak, |s, _| s.end()));
            DragSession {
                controller,
                track,
                marker,
                fill,
                grab,
                gesture,
            }
        });
        session.grab.attach();
        session.place_marker();
        session
    }

    /// Register the threshold-crossing callback on the controller.
    pub fn on_threshold_cross(&self, callback: impl FnMut(bool) + 'static) {
        self.controller.borrow_mut().on_threshold_cross(callback);
    }

    fn begin(&self, ev: &web::Event) {
        self.controller.borrow_mut().begin_drag();
        self.gesture.attach();
        _ = self.marker.class_list().add_1(DRAGGING_CLASS);
        ev.prevent_default();
    }

    fn update(&self, apply: impl FnOnce(&mut DragController, TrackGeometry) -> Option<f32>) {
        // track may have moved or resized since the last sample
        let geometry = dom::track_geometry(&self.track);
        let applied = apply(&mut *self.controller.borrow_mut(), geometry);
        if applied.is_some() {
            self.place_marker();
        }
    }

    fn end(&self) {
        self.controller.borrow_mut().end_drag();
        self.gesture.detach();
        _ = self.marker.class_list().remove_1(DRAGGING_CLASS);
    }

    fn place_marker(&self) {
        let percent = format!("{:.2}%", self.controller.borrow().position());
        _ = self.marker.style().set_property("left", &percent);
        if let Some(fill) = &self.fill {
            _ = fill.style().set_property("width", &percent);
        }
    }

    /// Detach everything, ending any gesture in flight.
    pub fn unmount(&self) {
        self.end();
        self.grab.detach();
        log::info!("[drag] unmounted");
    }

    pub fn position(&self) -> f32 {
        self.controller.borrow().position()
    }
}

fn with_session(
    weak: &Weak<DragSession>,
    f: impl Fn(&DragSession, web::Event) + 'static,
) -> impl FnMut(web::Event) + 'static {
    let weak = weak.clone();
    move |ev| {
        if let Some(session) = weak.upgrade() {
            f(&session, ev);
        }
    }
}

#[inline]
fn pointer_client_x(ev: &web::Event) -> Option<f32> {
    ev.dyn_ref::<web::MouseEvent>().map(|me| me.client_x() as f32)
}

/// `None` when the event carries no active touch points.
#[inline]
fn first_touch_client_x(ev: &web::Event) -> Option<f32> {
    ev.dyn_ref::<web::TouchEvent>()
        .and_then(|te| te.touches().get(0))
        .map(|t| t.client_x() as f32)
}
