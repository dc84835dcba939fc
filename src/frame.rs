use crate::audio::Ambient;
use crate::cue::ScanSound;
use crate::dom;
use crate::overlay::{self, ScannerView};
use instant::Instant;
use reel_core::ScannerController;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Monotonic page clock in seconds, shared by the frame loop and handlers.
#[derive(Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    #[inline]
    pub fn now_sec(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

pub struct FrameContext {
    pub clock: Clock,
    pub document: web::Document,

    pub ambient: Rc<RefCell<Ambient>>,
    pub shown_playing: bool,

    pub scanner: ScannerController,
    pub scanner_view: Option<ScannerView>,
    pub scan_sound: Rc<RefCell<ScanSound>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.clock.now_sec();

        // Deferred ambient teardown and queued restarts
        let playing = {
            let mut ambient = self.ambient.borrow_mut();
            if let Err(e) = ambient.poll(now) {
                log::warn!("[ambient] restart failed: {}", e);
            }
            ambient.is_playing()
        };
        if playing != self.shown_playing {
            overlay::sync_toggle(&self.document, playing);
            self.shown_playing = playing;
        }

        // Visual and audio channels are independent; a failed cue never
        // skips the overlay update.
        let frame = self.scanner.update(dom::scroll_y(), now);
        if let Some(view) = &mut self.scanner_view {
            view.apply(&frame);
        }
        if frame.event.fires() {
            if let Err(e) = self.scan_sound.borrow_mut().play() {
                log::debug!("[scan] cue skipped: {}", e);
            }
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
