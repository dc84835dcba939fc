use crate::automation::Automation;
use crate::layers::{FilterSpec, LfoSpec, ModTarget, Waveform};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CueEventKind {
    Click,
    Motor,
    Whir,
    LampBuzz,
    Clunk,
    Beep,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CueVoice {
    Burst {
        seconds: f32,
        decay_sec: f32,
        gain: f32,
        lowpass: Option<FilterSpec>,
    },
    Tone {
        waveform: Waveform,
        frequency: Automation,
        gain: Automation,
        vibrato: Option<LfoSpec>,
        lowpass: Option<FilterSpec>,
    },
    Sweep {
        seconds: f32,
        peak: f32,
        highpass: FilterSpec,
        band_center: Automation,
        q: f32,
        gain: Automation,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CueEvent {
    pub kind: CueEventKind,
    pub start: f64,
    pub end: f64,
    pub voice: CueVoice,
}

impl CueEvent {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Oscillators need an explicit stop; buffers run out on their own.
    pub fn needs_stop(&self) -> bool {
        matches!(self.voice, CueVoice::Tone { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScanCue {
    events: Vec<CueEvent>,
}

impl ScanCue {
    pub fn standard() -> Self {
        let mut events = vec![click(), motor(), whir(), lamp_buzz(), beep(), clunk()];
        events.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self { events }
    }

    pub fn events(&self) -> &[CueEvent] {
        &self.events
    }

    pub fn event(&self, kind: CueEventKind) -> Option<&CueEvent> {
        self.events.iter().find(|e| e.kind == kind)
    }

    pub fn duration(&self) -> f64 {
        self.events.iter().map(|e| e.end).fold(0.0, f64::max)
    }
}

impl Default for ScanCue {
    fn default() -> Self {
        Self::standard()
    }
}

fn click() -> CueEvent {
    CueEvent {
        kind: CueEventKind::Click,
        start: 0.0,
        end: 0.04,
        voice: CueVoice::Burst {
            seconds: 0.04,
            decay_sec: 0.008,
            gain: 0.45,
            lowpass: None,
        },
    }
}

// Carriage motor: spin up, hold, spin down, with a servo wobble on top.
fn motor() -> CueEvent {
    let mut frequency = Automation::new(58.0);
    frequency
        .set_value_at(58.0, 0.04)
        .linear_ramp_to(72.0, 0.3)
        .set_value_at(72.0, 1.8)
        .linear_ramp_to(50.0, 2.3);
    let mut gain = Automation::new(0.0);
    gain.set_value_at(0.0, 0.04)
        .linear_ramp_to(0.08, 0.25)
        .set_value_at(0.08, 1.85)
        .linear_ramp_to(0.0, 2.4);
    CueEvent {
        kind: CueEventKind::Motor,
        start: 0.04,
        end: 2.4,
        voice: CueVoice::Tone {
            waveform: Waveform::Sine,
            frequency,
            gain,
            vibrato: Some(LfoSpec {
                waveform: Waveform::Sine,
                rate_hz: 8.5,
                depth: 3.0,
                target: ModTarget::SourceFrequency,
            }),
            lowpass: None,
        },
    }
}

fn whir() -> CueEvent {
    let mut band_center = Automation::new(800.0);
    band_center
        .set_value_at(800.0, 0.1)
        .linear_ramp_to(1600.0, 2.0);
    let mut gain = Automation::new(0.0);
    gain.set_value_at(0.0, 0.08)
        .linear_ramp_to(0.55, 0.18)
        .set_value_at(0.55, 1.85)
        .linear_ramp_to(0.0, 2.2);
    CueEvent {
        kind: CueEventKind::Whir,
        start: 0.08,
        end: 2.2,
        voice: CueVoice::Sweep {
            seconds: 2.0,
            peak: 0.3,
            highpass: FilterSpec::highpass(400.0),
            band_center,
            q: 2.5,
            gain,
        },
    }
}

// 120 Hz lamp flicker (twice mains).
fn lamp_buzz() -> CueEvent {
    let mut gain = Automation::new(0.0);
    gain.set_value_at(0.0, 0.1)
        .linear_ramp_to(0.025, 0.2)
        .set_value_at(0.025, 1.9)
        .linear_ramp_to(0.0, 2.1);
    CueEvent {
        kind: CueEventKind::LampBuzz,
        start: 0.1,
        end: 2.2,
        voice: CueVoice::Tone {
            waveform: Waveform::Saw,
            frequency: Automation::new(120.0),
            gain,
            vibrato: None,
            lowpass: Some(FilterSpec::lowpass(800.0)),
        },
    }
}

fn beep() -> CueEvent {
    let mut frequency = Automation::new(1200.0);
    frequency
        .set_value_at(1200.0, 2.25)
        .set_value_at(1600.0, 2.35);
    let mut gain = Automation::new(0.0);
    gain.set_value_at(0.0, 2.25)
        .linear_ramp_to(0.08, 2.27)
        .set_value_at(0.08, 2.45)
        .exponential_ramp_to(0.0001, 2.6);
    CueEvent {
        kind: CueEventKind::Beep,
        start: 2.25,
        end: 2.65,
        voice: CueVoice::Tone {
            waveform: Waveform::Sine,
            frequency,
            gain,
            vibrato: None,
            lowpass: None,
        },
    }
}

fn clunk() -> CueEvent {
    CueEvent {
        kind: CueEventKind::Clunk,
        start: 2.2,
        end: 2.26,
        voice: CueVoice::Burst {
            seconds: 0.06,
            decay_sec: 0.015,
            gain: 0.3,
            lowpass: Some(FilterSpec::lowpass(300.0)),
        },
    }
}
