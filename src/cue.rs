use crate::audio::{
    apply_automation, connect_path, create_buffer_source, create_filter, create_gain,
    create_oscillator, js_err, mono_buffer, wire_lfo,
};
use rand::Rng;
use reel_core::error::{AudioError, Result};
use reel_core::noise;
use reel_core::{CueEvent, CueVoice, FilterKind, FilterSpec, ScanCue};
use web_sys as web;

/// Owns the scanner's own audio context, separate from the ambient one.
pub struct ScanSound {
    ctx: Option<web::AudioContext>,
    cue: ScanCue,
}

impl ScanSound {
    pub fn new() -> Self {
        Self {
            ctx: None,
            cue: ScanCue::standard(),
        }
    }

    // Create on first use, recreate if closed, resume if suspended.
    fn ensure_context(&mut self) -> Result<web::AudioContext> {
        let reusable = matches!(&self.ctx, Some(c) if c.state() != web::AudioContextState::Closed);
        if !reusable {
            let ctx = web::AudioContext::new()
                .map_err(|e| AudioError::PlatformUnavailable(js_err(e)))?;
            self.ctx = Some(ctx);
        }
        let ctx = self.ctx.clone().ok_or(AudioError::Closed)?;
        if ctx.state() == web::AudioContextState::Suspended {
            _ = ctx.resume();
        }
        Ok(ctx)
    }

    /// Fire-and-forget: schedules the whole cue on the audio clock.
    pub fn play(&mut self) -> Result<()> {
        let ctx = self.ensure_context()?;
        schedule_cue(&ctx, &self.cue)?;
        log::debug!("[scan] cue scheduled at {:.3}", ctx.current_time());
        Ok(())
    }

    pub fn close(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            _ = ctx.close();
        }
    }
}

impl Default for ScanSound {
    fn default() -> Self {
        Self::new()
    }
}

pub fn schedule_cue(ctx: &web::AudioContext, cue: &ScanCue) -> Result<()> {
    let t0 = ctx.current_time();
    let mut rng = rand::thread_rng();
    for ev in cue.events() {
        schedule_event(ctx, ev, t0, &mut rng)?;
    }
    Ok(())
}

fn schedule_event<R: Rng + ?Sized>(
    ctx: &web::AudioContext,
    ev: &CueEvent,
    t0: f64,
    rng: &mut R,
) -> Result<()> {
    let start = t0 + ev.start;
    let end = t0 + ev.end;
    let sr = ctx.sample_rate();
    let dest = ctx.destination();
    let scheduling = |e| AudioError::Scheduling(js_err(e));

    let source: web::AudioScheduledSourceNode = match &ev.voice {
        CueVoice::Burst {
            seconds,
            decay_sec,
            gain,
            lowpass,
        } => {
            let len = noise::samples_for(*seconds, sr).max(1);
            let mut data = noise::decaying_burst(rng, len, sr * decay_sec);
            let src = create_buffer_source(ctx, &mono_buffer(ctx, &mut data)?)?;
            let lp = lowpass.as_ref().map(|f| create_filter(ctx, f)).transpose()?;
            let g = create_gain(ctx, *gain, "cue burst")?;
            let mut path: Vec<&web::AudioNode> = Vec::with_capacity(4);
            path.push(&src);
            if let Some(f) = &lp {
                path.push(f);
            }
            path.push(&g);
            path.push(&dest);
            connect_path(&path);
            src.into()
        }
        CueVoice::Tone {
            waveform,
            frequency,
            gain,
            vibrato,
            lowpass,
        } => {
            let osc = create_oscillator(ctx, *waveform, frequency.initial())?;
            apply_automation(&osc.frequency(), frequency, t0)?;
            let g = create_gain(ctx, gain.initial(), "cue tone")?;
            apply_automation(&g.gain(), gain, t0)?;
            if let Some(lfo) = vibrato {
                let wobble = wire_lfo(ctx, lfo, &osc.frequency())?;
                wobble.start_with_when(start).map_err(scheduling)?;
                wobble.stop_with_when(end).map_err(scheduling)?;
            }
            let lp = lowpass.as_ref().map(|f| create_filter(ctx, f)).transpose()?;
            let mut path: Vec<&web::AudioNode> = Vec::with_capacity(4);
            path.push(&osc);
            if let Some(f) = &lp {
                path.push(f);
            }
            path.push(&g);
            path.push(&dest);
            connect_path(&path);
            osc.into()
        }
        CueVoice::Sweep {
            seconds,
            peak,
            highpass,
            band_center,
            q,
            gain,
        } => {
            let len = noise::samples_for(*seconds, sr).max(1);
            let mut data = noise::scan_pass(rng, len, *peak);
            let src = create_buffer_source(ctx, &mono_buffer(ctx, &mut data)?)?;
            let hp = create_filter(ctx, highpass)?;
            let band = create_filter(
                ctx,
                &FilterSpec {
                    kind: FilterKind::Bandpass,
                    frequency_hz: band_center.initial(),
                    q: Some(*q),
                },
            )?;
            apply_automation(&band.frequency(), band_center, t0)?;
            let g = create_gain(ctx, gain.initial(), "cue sweep")?;
            apply_automation(&g.gain(), gain, t0)?;
            let path: [&web::AudioNode; 5] = [&src, &hp, &band, &g, &dest];
            connect_path(&path);
            src.into()
        }
    };
    source.start_with_when(start).map_err(scheduling)?;
    if ev.needs_stop() {
        source.stop_with_when(end).map_err(scheduling)?;
    }
    Ok(())
}
