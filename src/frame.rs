use crate::constants::STATS_LOG_INTERVAL_SEC;
use crate::dom::ListenerSet;
use crate::events;
use crate::render::Painter;
use folio_core::{ParticleField, PointerFeed, TickLoop, TickSource};
use instant::Instant;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` as a tick source. The callback slot is filled once
/// the frame closure exists and emptied on teardown.
pub struct RafTicks {
    window: web::Window,
    callback: FrameCallback,
}

impl TickSource for RafTicks {
    type Token = i32;

    fn request(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let cb = slot.as_ref()?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref::<js_sys::Function>())
            .ok()
    }

    fn cancel(&mut self, token: i32) {
        _ = self.window.cancel_animation_frame(token);
    }
}

/// Frame rate bookkeeping, logged at debug level.
pub struct FrameStats {
    window_start: Instant,
    frames: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
        }
    }

    fn record(&mut self) {
        self.frames += 1;
        let elapsed = self.window_start.elapsed().as_secs_f32();
        if elapsed >= STATS_LOG_INTERVAL_SEC {
            log::debug!("[frame] {:.1} fps", self.frames as f32 / elapsed);
            self.window_start = Instant::now();
            self.frames = 0;
        }
    }
}

pub struct FrameContext {
    pub field: Rc<RefCell<ParticleField>>,
    pub pointer: PointerFeed,
    pub painter: Painter,
    pub stats: FrameStats,
}

impl FrameContext {
    pub fn frame(&mut self) {
        // Pointer is sampled here and passed in; the engine holds no copy.
        let pointer = self.pointer.latest();
        let mut field = self.field.borrow_mut();
        field.tick(pointer);
        self.painter.draw(&field.snapshot());
        self.stats.record();
    }
}

/// The particle layer mounted on a canvas: frame loop plus the window-level
/// pointer and resize listeners that feed it. `stop` undoes `start` exactly.
pub struct Background {
    field: Rc<RefCell<ParticleField>>,
    ticks: Rc<RefCell<TickLoop<RafTicks>>>,
    callback: FrameCallback,
    input: ListenerSet,
}

impl Background {
    pub fn new(window: web::Window, field: ParticleField, painter: Painter) -> Self {
        let field = Rc::new(RefCell::new(field));
        let pointer = PointerFeed::new();
        let ctx = Rc::new(RefCell::new(FrameContext {
            field: field.clone(),
            pointer: pointer.clone(),
            painter,
            stats: FrameStats::new(),
        }));

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let ticks = Rc::new(RefCell::new(TickLoop::new(RafTicks {
            window: window.clone(),
            callback: callback.clone(),
        })));

        let loop_weak: Weak<RefCell<TickLoop<RafTicks>>> = Rc::downgrade(&ticks);
        let ctx_tick = ctx.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(ticks) = loop_weak.upgrade() {
                ticks.borrow_mut().run_frame(|| ctx_tick.borrow_mut().frame());
            }
        }) as Box<dyn FnMut()>));

        let field_resize = field.clone();
        let ctx_resize = ctx.clone();
        let input = events::pointer::field_listeners(&window, pointer, move |viewport| {
            field_resize.borrow_mut().resize(viewport);
            ctx_resize.borrow_mut().painter.resize();
        });

        Self {
            field,
            ticks,
            callback,
            input,
        }
    }

    pub fn start(&self) {
        self.input.attach();
        self.ticks.borrow_mut().activate();
        log::info!(
            "[field] started with {} particles",
            self.field.borrow().particles().len()
        );
    }

    pub fn stop(&self) {
        self.ticks.borrow_mut().deactivate();
        self.input.detach();
        log::info!("[field] stopped");
    }

    pub fn field(&self) -> &Rc<RefCell<ParticleField>> {
        &self.field
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        self.ticks.borrow_mut().deactivate();
        self.input.detach();
        // releases the closure's hold on the frame context
        self.callback.borrow_mut().take();
    }
}
