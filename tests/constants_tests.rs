// Sanity checks on tuning constants shared by core and web.

use reel_core::constants::*;

#[test]
fn teardown_outlasts_fade_out() {
    assert!(TEARDOWN_DELAY_SEC > FADE_OUT_SEC);
    assert!(FADE_IN_SEC > FADE_OUT_SEC);
    assert!(MASTER_TARGET_GAIN > 0.0 && MASTER_TARGET_GAIN <= 1.0);
}

#[test]
fn noise_filters_are_stable() {
    for (pole, weight) in PINK_STAGES {
        assert!(pole > 0.0 && pole < 1.0);
        assert!(weight > 0.0);
    }
    assert!(BROWN_LEAK < 1.0);
    assert!(POP_PROBABILITY < TICK_PROBABILITY);
    assert!(POP_DECAY_SAMPLES < POP_LENGTH_SAMPLES as f32);
}

#[test]
fn scanner_thresholds_in_range() {
    assert!(SCAN_THRESHOLD > 0.0 && SCAN_THRESHOLD < 1.0);
    assert!(INTENSITY_SATURATION_VELOCITY > 0.0);
    assert!(SCAN_COOLDOWN_SEC > 0.0);
    assert!(OVERLAY_OPACITY_KEYS.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn spring_never_overshoots() {
    let ratio = SPRING_DAMPING / (2.0 * (SPRING_STIFFNESS * SPRING_MASS).sqrt());
    assert!(ratio >= 1.0);
    assert!(SPRING_SUBSTEP_SEC < SPRING_MAX_FRAME_SEC);
}
