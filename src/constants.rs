// DOM hooks and UI timings for the web frontend.

// Ambient toggle
pub const TOGGLE_ID: &str = "ambient-toggle";
pub const TOGGLE_LABEL_ID: &str = "ambient-toggle-label";
pub const TOOLTIP_ID: &str = "ambient-tooltip";
pub const TOOLTIP_DISMISS_MS: i32 = 4000;

// Scanner overlay
pub const SCANNER_OVERLAY_ID: &str = "scanner-overlay";
pub const SCANNER_BEAM_ID: &str = "scanner-beam";
pub const SCANNER_RED_ID: &str = "scanner-red";
pub const SCANNER_CYAN_ID: &str = "scanner-cyan";

pub const HIDDEN_CLASS: &str = "hidden";
