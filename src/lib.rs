#![cfg(target_arch = "wasm32")]
use crate::constants::{FIELD_CANVAS_ID, FILL_ELEMENT_ID, MARKER_ELEMENT_ID, TRACK_ELEMENT_ID};
use folio_core::{DragConfig, DragController, ParticleField, Theme};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod render;
mod theme;

/// Everything mounted by `start`, torn down by `stop`.
struct Mounted {
    background: Option<frame::Background>,
    slider: Option<Rc<events::drag::DragSession>>,
}

impl Mounted {
    fn teardown(self) {
        if let Some(slider) = self.slider {
            slider.unmount();
        }
        if let Some(background) = self.background {
            background.stop();
        }
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    let mounted = mount().map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    MOUNTED.with(|m| {
        if let Some(previous) = m.borrow_mut().replace(mounted) {
            previous.teardown();
        }
    });
    Ok(())
}

/// Stop the particle loop and detach every listener installed by `start`.
#[wasm_bindgen]
pub fn stop() {
    if let Some(mounted) = MOUNTED.with(|m| m.borrow_mut().take()) {
        mounted.teardown();
    }
}

fn mount() -> anyhow::Result<Mounted> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::element_by_id::<web::HtmlCanvasElement>(&document, FIELD_CANVAS_ID)?;
    let background = match canvas {
        Some(canvas) => {
            let cfg = config::field_config(&canvas);
            cfg.validate()?;
            let viewport = dom::window_viewport(&window);
            let mut field = ParticleField::new(cfg, viewport, &mut rand::thread_rng());
            field.set_theme(theme::current(&document));
            let painter = render::Painter::new(canvas)?;
            let background = frame::Background::new(window.clone(), field, painter);
            background.start();
            Some(background)
        }
        None => {
            log::warn!("missing #{FIELD_CANVAS_ID}; particle field disabled");
            None
        }
    };

    let track = dom::element_by_id::<web::Element>(&document, TRACK_ELEMENT_ID)?;
    let marker = dom::element_by_id::<web::HtmlElement>(&document, MARKER_ELEMENT_ID)?;
    let slider = match (track, marker) {
        (Some(track), Some(marker)) => {
            let drag_cfg = DragConfig::default();
            drag_cfg.validate()?;
            let controller = DragController::new(drag_cfg);
            // page starts on whichever side the marker starts on
            let initial = Theme::from_dark(controller.is_high_side());
            let field = background.as_ref().map(|b| b.field().clone());
            theme::apply(&document, field.as_ref(), initial);

            let fill = dom::element_by_id::<web::HtmlElement>(&document, FILL_ELEMENT_ID)?;
            let session =
                events::drag::DragSession::mount(&window, track, marker, fill, controller);
            let doc = document.clone();
            session.on_threshold_cross(move |high| {
                theme::apply(&doc, field.as_ref(), Theme::from_dark(high));
            });
            log::info!("[drag] mounted at {:.0}", session.position());
            Some(session)
        }
        _ => {
            log::warn!(
                "missing #{TRACK_ELEMENT_ID} or #{MARKER_ELEMENT_ID}; theme slider disabled"
            );
            None
        }
    };

    Ok(Mounted { background, slider })
}
