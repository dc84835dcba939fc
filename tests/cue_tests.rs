// Host-side tests for the scan cue schedule.

use reel_core::{CueEventKind, CueVoice, ScanCue};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3 * b.abs().max(1.0)
}

#[test]
fn events_play_in_order() {
    let cue = ScanCue::standard();
    let kinds: Vec<CueEventKind> = cue.events().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            CueEventKind::Click,
            CueEventKind::Motor,
            CueEventKind::Whir,
            CueEventKind::LampBuzz,
            CueEventKind::Clunk,
            CueEventKind::Beep,
        ]
    );
    let starts: Vec<f64> = cue.events().iter().map(|e| e.start).collect();
    assert_eq!(starts, vec![0.0, 0.04, 0.08, 0.1, 2.2, 2.25]);
    assert!(cue.events().iter().all(|e| e.duration() > 0.0));
}

#[test]
fn clunk_and_beep_overlap() {
    let cue = ScanCue::default();
    let clunk = cue.event(CueEventKind::Clunk).unwrap();
    let beep = cue.event(CueEventKind::Beep).unwrap();
    assert!(beep.start < clunk.end);
    assert!((cue.duration() - 2.65).abs() < 1e-9);
}

#[test]
fn only_oscillators_need_an_explicit_stop() {
    let cue = ScanCue::standard();
    let stopped: Vec<CueEventKind> = cue
        .events()
        .iter()
        .filter(|e| e.needs_stop())
        .map(|e| e.kind)
        .collect();
    assert_eq!(
        stopped,
        vec![CueEventKind::Motor, CueEventKind::LampBuzz, CueEventKind::Beep]
    );
}

#[test]
fn motor_spins_up_holds_and_winds_down() {
    let cue = ScanCue::standard();
    let Some(CueVoice::Tone {
        frequency,
        gain,
        vibrato,
        ..
    }) = cue.event(CueEventKind::Motor).map(|e| &e.voice)
    else {
        panic!("motor is not a tone");
    };
    assert!(approx(frequency.value_at(0.04), 58.0));
    assert!(approx(frequency.value_at(0.3), 72.0));
    assert!(approx(frequency.value_at(1.5), 72.0));
    assert!(approx(frequency.value_at(2.3), 50.0));
    assert!(approx(gain.value_at(1.0), 0.08));
    assert_eq!(gain.value_at(2.4), 0.0);
    assert!(vibrato.is_some());
}

#[test]
fn whir_sweeps_upwards() {
    let cue = ScanCue::standard();
    let Some(CueVoice::Sweep { band_center, gain, .. }) =
        cue.event(CueEventKind::Whir).map(|e| &e.voice)
    else {
        panic!("whir is not a sweep");
    };
    assert!(approx(band_center.value_at(0.1), 800.0));
    assert!(approx(band_center.value_at(1.05), 1200.0));
    assert!(approx(band_center.value_at(2.0), 1600.0));
    assert!(approx(gain.value_at(1.0), 0.55));
    assert_eq!(gain.value_at(2.2), 0.0);
}

#[test]
fn beep_rises_a_fourth_and_fades_exponentially() {
    let cue = ScanCue::standard();
    let Some(CueVoice::Tone { frequency, gain, .. }) =
        cue.event(CueEventKind::Beep).map(|e| &e.voice)
    else {
        panic!("beep is not a tone");
    };
    assert!(approx(frequency.value_at(2.3), 1200.0));
    assert!(approx(frequency.value_at(2.4), 1600.0));
    assert!(approx(gain.value_at(2.4), 0.08));
    // Geometric midpoint of 0.08 -> 0.0001
    let mid = gain.value_at(2.525);
    assert!((mid - (0.08_f32 * 0.0001).sqrt()).abs() < 1e-4);
    assert!(gain.value_at(2.65) < 0.001);
}

#[test]
fn bursts_are_short() {
    let cue = ScanCue::standard();
    for kind in [CueEventKind::Click, CueEventKind::Clunk] {
        let event = cue.event(kind).unwrap();
        let CueVoice::Burst {
            seconds, decay_sec, ..
        } = event.voice
        else {
            panic!("{kind:?} is not a burst");
        };
        assert!(decay_sec < seconds);
        assert!((event.duration() - seconds as f64).abs() < 1e-6);
    }
}
