// Host-side tests for the scroll scanner: intensity mapping, spring
// smoothing, cooldown and the full per-frame controller.

use reel_core::constants::{SCAN_COOLDOWN_SEC, SPRING_MAX_FRAME_SEC};
use reel_core::{
    intensity, Cooldown, FilterPreset, ScanEvent, ScanTrigger, ScannerController, ScannerParams,
    ScannerVisuals, Spring, SpringParams, VelocityTracker,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn intensity_is_symmetric_and_saturates() {
    assert_eq!(intensity(0.0, 2000.0), 0.0);
    assert!(approx(intensity(500.0, 2000.0), 0.25));
    assert_eq!(intensity(-500.0, 2000.0), intensity(500.0, 2000.0));
    assert_eq!(intensity(2000.0, 2000.0), 1.0);
    assert_eq!(intensity(-9000.0, 2000.0), 1.0);
}

#[test]
fn intensity_ignores_garbage_input() {
    assert_eq!(intensity(f32::NAN, 2000.0), 0.0);
    assert_eq!(intensity(f32::INFINITY, 2000.0), 1.0);
    assert_eq!(intensity(100.0, 0.0), 0.0);
}

// Feeds one rising edge at each time, dropping back below threshold 0.1 s
// later, and returns the times that fired.
fn fire_times(edges: &[f64]) -> Vec<f64> {
    let mut trigger = ScanTrigger::default();
    let mut fired = Vec::new();
    for &t in edges {
        if trigger.update(0.9, t).fires() {
            fired.push(t);
        }
        assert_eq!(trigger.update(0.0, t + 0.1), ScanEvent::Ended);
    }
    fired
}

#[test]
fn cooldown_swallows_edges_inside_the_window() {
    assert_eq!(fire_times(&[0.0, 0.5, 1.0, 2.0, 6.0]), vec![0.0, 6.0]);
}

#[test]
fn cooldown_ends_exactly_at_the_window() {
    assert_eq!(fire_times(&[0.0, SCAN_COOLDOWN_SEC - 0.001]), vec![0.0]);
    assert_eq!(fire_times(&[0.0, SCAN_COOLDOWN_SEC]), vec![0.0, SCAN_COOLDOWN_SEC]);
}

#[test]
fn suppressed_edges_still_scan() {
    let mut trigger = ScanTrigger::default();
    assert_eq!(trigger.update(1.0, 0.0), ScanEvent::Fire);
    trigger.update(0.0, 0.2);
    assert_eq!(trigger.update(1.0, 1.0), ScanEvent::Suppressed);
    assert!(trigger.is_scanning());
    assert_eq!(trigger.cooldown(), Cooldown::Cooling { until: 5.0 });
}

#[test]
fn sustained_intensity_fires_once() {
    let mut trigger = ScanTrigger::default();
    let fires = (0..1200)
        .map(|i| trigger.update(0.8, i as f64 / 60.0))
        .filter(|e| e.fires())
        .count();
    assert_eq!(fires, 1);
}

#[test]
fn threshold_itself_is_not_a_rising_edge() {
    let mut trigger = ScanTrigger::default();
    assert_eq!(trigger.update(0.3, 0.0), ScanEvent::None);
    assert!(!trigger.is_scanning());
}

#[test]
fn cooldown_state_machine() {
    let mut cd = Cooldown::default();
    assert_eq!(cd, Cooldown::Idle);
    assert!(cd.try_begin(1.0, 5.0));
    cd.poll(5.9);
    assert_eq!(cd, Cooldown::Cooling { until: 6.0 });
    assert!(!cd.try_begin(3.0, 5.0));
    cd.poll(6.0);
    assert_eq!(cd, Cooldown::Idle);
}

#[test]
fn visuals_at_rest_are_neutral() {
    let v = ScannerVisuals::from_intensity(0.0);
    assert_eq!(v.filter, FilterPreset::CALM);
    assert_eq!(v.overlay_opacity, 0.0);
    assert_eq!(v.red_offset.x, 0.0);
    assert_eq!(v.cyan_offset.y, 0.0);
    assert_eq!(
        v.filter.to_string(),
        "brightness(1.000) contrast(1.000) blur(0.000px) sepia(0.000)"
    );
}

#[test]
fn visuals_follow_their_keyframes() {
    assert!(approx(ScannerVisuals::from_intensity(0.3).overlay_opacity, 0.1));

    let mid = ScannerVisuals::from_intensity(0.5).filter;
    assert!(approx(mid.brightness, FilterPreset::MIDPOINT.brightness));
    assert!(approx(mid.sepia, FilterPreset::MIDPOINT.sepia));

    let full = ScannerVisuals::from_intensity(1.0);
    assert_eq!(full.filter, FilterPreset::EXTREME);
    assert!(approx(full.overlay_opacity, 0.5));
    assert!(approx(full.red_offset.x, 5.0));
    assert!(approx(full.red_offset.y, -2.0));
    assert_eq!(full.cyan_offset, -full.red_offset);
}

#[test]
fn visuals_are_monotonic_in_intensity() {
    let mut prev = ScannerVisuals::from_intensity(0.0);
    for i in 1..=100 {
        let v = ScannerVisuals::from_intensity(i as f32 / 100.0);
        assert!(v.overlay_opacity >= prev.overlay_opacity);
        assert!(v.filter.blur_px >= prev.filter.blur_px);
        assert!(v.red_offset.x >= prev.red_offset.x);
        prev = v;
    }
}

#[test]
fn spring_parameters_are_overdamped() {
    let p = SpringParams::default();
    assert!(approx(p.damping_ratio(), 1.25));
}

#[test]
fn spring_converges_without_overshoot() {
    let mut spring = Spring::default();
    for _ in 0..120 {
        let v = spring.step(1000.0, 1.0 / 60.0);
        assert!(v <= 1000.0 + 1e-3, "overshoot to {v}");
    }
    assert!((spring.value() - 1000.0).abs() < 1.0);
}

#[test]
fn spring_is_frame_rate_independent() {
    let mut slow = Spring::default();
    let mut fast = Spring::default();
    for frame in 0..30 {
        let a = slow.step(1000.0, 1.0 / 60.0);
        fast.step(1000.0, 1.0 / 120.0);
        let b = fast.step(1000.0, 1.0 / 120.0);
        assert!((a - b).abs() < 25.0, "frame {frame}: {a} vs {b}");
    }
}

#[test]
fn spring_clamps_stalled_frames_and_bad_input() {
    let mut stalled = Spring::default();
    let mut clamped = Spring::default();
    assert_eq!(
        stalled.step(1000.0, 5.0),
        clamped.step(1000.0, SPRING_MAX_FRAME_SEC)
    );
    let before = stalled.value();
    assert_eq!(stalled.step(f32::NAN, 1.0 / 60.0), before);
    assert_eq!(stalled.step(1000.0, 0.0), before);
}

#[test]
fn spring_survives_non_finite_frame_time() {
    let mut spring = Spring::default();
    spring.step(1000.0, 1.0 / 60.0);
    let before = spring.value();
    assert_eq!(spring.step(1000.0, f32::NAN), before);
    assert_eq!(spring.step(1000.0, f32::INFINITY), before);
    let after = spring.step(1000.0, 1.0 / 60.0);
    assert!(after.is_finite() && after > before);
}

#[test]
fn velocity_tracker_differentiates_position() {
    let mut tracker = VelocityTracker::new();
    assert_eq!(tracker.sample(0.0, 0.0), 0.0);
    assert!(approx(tracker.sample(100.0, 0.5), 200.0));
    assert!(approx(tracker.sample(50.0, 1.0), -100.0));
    assert!(approx(tracker.velocity(), -100.0));
}

#[test]
fn velocity_tracker_zeroes_on_stalled_clock() {
    let mut tracker = VelocityTracker::new();
    tracker.sample(0.0, 0.0);
    assert!(approx(tracker.sample(100.0, 0.5), 200.0));
    assert_eq!(tracker.sample(500.0, 0.5), 0.0);
    assert_eq!(tracker.sample(500.0, 0.4), 0.0);
    assert_eq!(tracker.velocity(), 0.0);
    // Differentiates against the last accepted sample.
    assert!(approx(tracker.sample(200.0, 1.0), 200.0));
}

// Scroll at 3000 px/s during the given bursts, stationary otherwise.
fn scroll_position(t: f64, bursts: &[(f64, f64)]) -> f64 {
    bursts
        .iter()
        .map(|&(a, b)| 3000.0 * (t.min(b) - a).max(0.0))
        .sum()
}

#[test]
fn controller_fires_once_per_cooldown_window() {
    let bursts = [(0.0, 0.5), (1.5, 2.0), (6.0, 6.5)];
    let mut controller = ScannerController::new(ScannerParams::default());
    let (mut fires, mut suppressed, mut ended) = (0, 0, 0);
    let mut peak = 0.0_f32;
    for frame in 0..(60 * 8) {
        let t = frame as f64 / 60.0;
        let out = controller.update(scroll_position(t, &bursts), t);
        peak = peak.max(out.intensity);
        assert_eq!(out.visuals, ScannerVisuals::from_intensity(out.intensity));
        match out.event {
            ScanEvent::Fire => fires += 1,
            ScanEvent::Suppressed => suppressed += 1,
            ScanEvent::Ended => ended += 1,
            ScanEvent::None => {}
        }
    }
    assert_eq!(fires, 2);
    assert_eq!(suppressed, 1);
    assert_eq!(ended, 3);
    assert!(peak > 0.9);
}

#[test]
fn controller_settles_when_scrolling_stops() {
    let mut controller = ScannerController::default();
    let mut last = None;
    for frame in 0..(60 * 3) {
        let t = frame as f64 / 60.0;
        last = Some(controller.update(scroll_position(t, &[(0.0, 0.3)]), t));
    }
    let last = last.unwrap();
    assert!(!last.scanning);
    assert!(last.intensity < 0.01);
}
