use crate::constants::*;
use crate::dom;
use reel_core::ScannerFrame;
use web_sys as web;

/// Reflect ambient state on the toggle button.
pub fn sync_toggle(document: &web::Document, playing: bool) {
    if let Some(el) = document.get_element_by_id(TOGGLE_ID) {
        let label = if playing {
            "Mute ambient sound"
        } else {
            "Play ambient sound"
        };
        _ = el.set_attribute("aria-label", label);
        _ = el.set_attribute("data-playing", if playing { "1" } else { "0" });
    }
    if let Some(el) = document.get_element_by_id(TOGGLE_LABEL_ID) {
        el.set_text_content(Some(if playing { "sound on" } else { "sound off" }));
    }
}

#[inline]
pub fn hide_tooltip(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(TOOLTIP_ID) {
        dom::set_hidden(&el, true);
    }
}

/// Handles to the scanner overlay layers.
pub struct ScannerView {
    overlay: web::HtmlElement,
    beam: Option<web::HtmlElement>,
    red: Option<web::HtmlElement>,
    cyan: Option<web::HtmlElement>,
    beam_visible: Option<bool>,
}

impl ScannerView {
    pub fn find(document: &web::Document) -> Option<Self> {
        let overlay = dom::html_element(document, SCANNER_OVERLAY_ID)?;
        Some(Self {
            overlay,
            beam: dom::html_element(document, SCANNER_BEAM_ID),
            red: dom::html_element(document, SCANNER_RED_ID),
            cyan: dom::html_element(document, SCANNER_CYAN_ID),
            beam_visible: None,
        })
    }

    pub fn apply(&mut self, frame: &ScannerFrame) {
        let v = &frame.visuals;
        let style = self.overlay.style();
        let filter = v.filter.to_string();
        _ = style.set_property("backdrop-filter", &filter);
        _ = style.set_property("-webkit-backdrop-filter", &filter);
        _ = style.set_property("opacity", &format!("{:.3}", v.overlay_opacity));

        for (layer, offset) in [(&self.red, v.red_offset), (&self.cyan, v.cyan_offset)] {
            if let Some(el) = layer {
                _ = el.style().set_property(
                    "transform",
                    &format!("translate({:.2}px, {:.2}px)", offset.x, offset.y),
                );
            }
        }

        // Beam classes change only on transitions.
        if self.beam_visible != Some(frame.scanning) {
            if let Some(beam) = &self.beam {
                dom::set_hidden(beam, !frame.scanning);
            }
            self.beam_visible = Some(frame.scanning);
        }
    }
}
