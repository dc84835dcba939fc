#![cfg(target_arch = "wasm32")]
use crate::audio::{Ambient, WebAudioBackend};
use crate::cue::ScanSound;
use crate::frame::{Clock, FrameContext};
use reel_core::{AmbientParams, AmbientPlayback, ScannerController, ScannerParams};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod cue;
mod dom;
mod frame;
mod overlay;

fn wire_ambient_toggle(document: &web::Document, ambient: &Rc<RefCell<Ambient>>, clock: Clock) {
    let ambient = ambient.clone();
    let doc = document.clone();
    dom::add_click_listener(document, constants::TOGGLE_ID, move || {
        let playing = {
            let mut a = ambient.borrow_mut();
            // Autoplay policy or missing hardware: stay off, say nothing.
            if let Err(e) = a.toggle(clock.now_sec()) {
                log::warn!("[ambient] toggle failed: {}", e);
            }
            a.is_playing()
        };
        overlay::sync_toggle(&doc, playing);
        overlay::hide_tooltip(&doc);
    });
}

fn wire_tooltip_dismiss(document: &web::Document) {
    let doc = document.clone();
    dom::set_timeout(constants::TOOLTIP_DISMISS_MS, move || overlay::hide_tooltip(&doc));
}

fn wire_page_teardown(ambient: &Rc<RefCell<Ambient>>, scan_sound: &Rc<RefCell<ScanSound>>) {
    let ambient = ambient.clone();
    let scan_sound = scan_sound.clone();
    dom::add_window_listener("pagehide", move || {
        ambient.borrow_mut().shutdown();
        scan_sound.borrow_mut().close();
        log::info!("page hidden, audio released");
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("reel-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let clock = Clock::new();

    // Ambient sound starts off on every load; the toggle opens the context
    // inside the click gesture.
    let ambient: Rc<RefCell<Ambient>> = Rc::new(RefCell::new(AmbientPlayback::new(
        WebAudioBackend,
        AmbientParams::default(),
    )));
    overlay::sync_toggle(&document, false);
    wire_ambient_toggle(&document, &ambient, clock);
    wire_tooltip_dismiss(&document);

    let scan_sound = Rc::new(RefCell::new(ScanSound::new()));
    wire_page_teardown(&ambient, &scan_sound);

    let scanner_view = overlay::ScannerView::find(&document);
    if scanner_view.is_none() {
        log::warn!("missing #{}; scanner visuals disabled", constants::SCANNER_OVERLAY_ID);
    }

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        clock,
        document,
        ambient,
        shown_playing: false,
        scanner: ScannerController::new(ScannerParams::default()),
        scanner_view,
        scan_sound,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
