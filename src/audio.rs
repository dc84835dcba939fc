use rand::Rng;
use reel_core::error::{AudioError, Result};
use reel_core::noise::{self, NoiseKind};
use reel_core::{
    AmbientBackend, AmbientPlayback, AmbientSession, Automation, FilterKind, FilterSpec,
    LayerSpec, LfoSpec, ModTarget, ParamEvent, SourceSpec, StopLatch, Waveform,
};
use wasm_bindgen::JsValue;
use web_sys as web;

pub type Ambient = AmbientPlayback<WebAudioBackend>;

#[inline]
pub fn js_err(e: JsValue) -> String {
    format!("{:?}", e)
}

pub fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(AudioError::node("GainNode", js_err(e)))
        }
    }
}

pub fn create_filter(audio_ctx: &web::AudioContext, spec: &FilterSpec) -> Result<web::BiquadFilterNode> {
    let filter = web::BiquadFilterNode::new(audio_ctx).map_err(|e| {
        log::error!("BiquadFilterNode error: {:?}", e);
        AudioError::node("BiquadFilterNode", js_err(e))
    })?;
    filter.set_type(match spec.kind {
        FilterKind::Lowpass => web::BiquadFilterType::Lowpass,
        FilterKind::Highpass => web::BiquadFilterType::Highpass,
        FilterKind::Bandpass => web::BiquadFilterType::Bandpass,
    });
    filter.frequency().set_value(spec.frequency_hz);
    if let Some(q) = spec.q {
        filter.q().set_value(q);
    }
    Ok(filter)
}

pub fn create_oscillator(
    audio_ctx: &web::AudioContext,
    waveform: Waveform,
    frequency_hz: f32,
) -> Result<web::OscillatorNode> {
    let osc = web::OscillatorNode::new(audio_ctx).map_err(|e| {
        log::error!("OscillatorNode error: {:?}", e);
        AudioError::node("OscillatorNode", js_err(e))
    })?;
    match waveform {
        Waveform::Sine => osc.set_type(web::OscillatorType::Sine),
        Waveform::Saw => osc.set_type(web::OscillatorType::Sawtooth),
        Waveform::Triangle => osc.set_type(web::OscillatorType::Triangle),
    }
    osc.frequency().set_value(frequency_hz);
    Ok(osc)
}

pub fn create_buffer_source(
    audio_ctx: &web::AudioContext,
    buffer: &web::AudioBuffer,
) -> Result<web::AudioBufferSourceNode> {
    let src = web::AudioBufferSourceNode::new(audio_ctx).map_err(|e| {
        log::error!("AudioBufferSourceNode error: {:?}", e);
        AudioError::node("AudioBufferSourceNode", js_err(e))
    })?;
    src.set_buffer(Some(buffer));
    Ok(src)
}

/// Buffer of `channels` independent noise channels, `seconds` long.
pub fn noise_buffer<R: Rng + ?Sized>(
    audio_ctx: &web::AudioContext,
    kind: NoiseKind,
    seconds: f32,
    channels: u32,
    rng: &mut R,
) -> Result<web::AudioBuffer> {
    let sr = audio_ctx.sample_rate();
    let len = noise::samples_for(seconds, sr).max(1);
    let buffer = audio_ctx
        .create_buffer(channels, len as u32, sr)
        .map_err(|e| AudioError::node("AudioBuffer", js_err(e)))?;
    for ch in 0..channels {
        let mut data = kind.generate(rng, len);
        buffer
            .copy_to_channel(&mut data, ch as i32)
            .map_err(|e| AudioError::node("AudioBuffer", js_err(e)))?;
    }
    Ok(buffer)
}

pub fn mono_buffer(audio_ctx: &web::AudioContext, data: &mut [f32]) -> Result<web::AudioBuffer> {
    let buffer = audio_ctx
        .create_buffer(1, data.len().max(1) as u32, audio_ctx.sample_rate())
        .map_err(|e| AudioError::node("AudioBuffer", js_err(e)))?;
    buffer
        .copy_to_channel(data, 0)
        .map_err(|e| AudioError::node("AudioBuffer", js_err(e)))?;
    Ok(buffer)
}

// Connect each node to the next one.
pub fn connect_path(path: &[&web::AudioNode]) {
    for pair in path.windows(2) {
        _ = pair[0].connect_with_audio_node(pair[1]);
    }
}

/// Replay automation events onto a real param, offset by `base` seconds.
pub fn apply_events(
    param: &web::AudioParam,
    events: impl IntoIterator<Item = ParamEvent>,
    base: f64,
) -> Result<()> {
    for ev in events {
        let scheduled = match ev.shifted(base) {
            ParamEvent::SetValue { value, time } => param.set_value_at_time(value, time),
            ParamEvent::LinearRamp { value, end_time } => {
                param.linear_ramp_to_value_at_time(value, end_time)
            }
            ParamEvent::ExponentialRamp { value, end_time } => {
                param.exponential_ramp_to_value_at_time(value, end_time)
            }
        };
        scheduled.map_err(|e| AudioError::Scheduling(js_err(e)))?;
    }
    Ok(())
}

pub fn apply_automation(param: &web::AudioParam, automation: &Automation, base: f64) -> Result<()> {
    param.set_value(automation.initial());
    apply_events(param, automation.events().iter().copied(), base)
}

/// Slow oscillator scaled by its depth and fed into `target`. Not started.
pub fn wire_lfo(
    audio_ctx: &web::AudioContext,
    lfo: &LfoSpec,
    target: &web::AudioParam,
) -> Result<web::OscillatorNode> {
    let osc = create_oscillator(audio_ctx, lfo.waveform, lfo.rate_hz)?;
    let depth = create_gain(audio_ctx, lfo.depth, "LFO depth")?;
    _ = osc.connect_with_audio_node(&depth);
    _ = depth.connect_with_audio_param(target);
    Ok(osc)
}

/// A started source node that can be stopped any number of times.
pub struct Generator {
    node: web::AudioScheduledSourceNode,
    latch: StopLatch,
}

impl Generator {
    pub fn new(node: impl Into<web::AudioScheduledSourceNode>) -> Self {
        Self {
            node: node.into(),
            latch: StopLatch::new(),
        }
    }

    pub fn start(&self) -> Result<()> {
        self.node
            .start()
            .map_err(|e| AudioError::Scheduling(js_err(e)))
    }

    pub fn stop(&mut self) {
        if !self.latch.stop() {
            return;
        }
        // Sources that already ran out throw InvalidStateError; nothing to do.
        if let Err(e) = self.node.stop() {
            log::debug!("[audio] stop ignored: {:?}", e);
        }
    }
}

/// Build, wire and start one ambient layer into `master`.
pub fn build_layer<R: Rng + ?Sized>(
    audio_ctx: &web::AudioContext,
    layer: &LayerSpec,
    master: &web::GainNode,
    rng: &mut R,
) -> Result<Vec<Generator>> {
    let (source, source_frequency): (web::AudioScheduledSourceNode, Option<web::AudioParam>) =
        match layer.source {
            SourceSpec::Noise {
                kind,
                seconds,
                channels,
            } => {
                let buffer = noise_buffer(audio_ctx, kind, seconds, channels, rng)?;
                let src = create_buffer_source(audio_ctx, &buffer)?;
                src.set_loop(true);
                (src.into(), None)
            }
            SourceSpec::Oscillator {
                waveform,
                frequency_hz,
            } => {
                let osc = create_oscillator(audio_ctx, waveform, frequency_hz)?;
                let freq = osc.frequency();
                (osc.into(), Some(freq))
            }
        };

    let filters = layer
        .chain
        .iter()
        .map(|spec| create_filter(audio_ctx, spec))
        .collect::<Result<Vec<_>>>()?;
    let gain = create_gain(audio_ctx, layer.gain, layer.name)?;

    let mut path: Vec<&web::AudioNode> = Vec::with_capacity(filters.len() + 3);
    path.push(&source);
    for f in &filters {
        path.push(f);
    }
    path.push(&gain);
    path.push(master);
    connect_path(&path);

    let mut generators = Vec::with_capacity(layer.generator_count());
    if let Some(lfo) = &layer.lfo {
        let target = match lfo.target {
            ModTarget::SourceFrequency => source_frequency.clone(),
            ModTarget::FilterFrequency(i) => filters.get(i).map(|f| f.frequency()),
            ModTarget::LayerGain => Some(gain.gain()),
        }
        .ok_or_else(|| AudioError::node("LFO", format!("{} has no such parameter", layer.name)))?;
        let modulator = Generator::new(wire_lfo(audio_ctx, lfo, &target)?);
        modulator.start()?;
        generators.push(modulator);
    }
    let source = Generator::new(source);
    source.start()?;
    generators.push(source);
    log::debug!("[ambient] layer {} started", layer.name);
    Ok(generators)
}

/// Opens a fresh `AudioContext` per session.
#[derive(Default)]
pub struct WebAudioBackend;

impl AmbientBackend for WebAudioBackend {
    type Session = WebAmbientSession;

    fn open(&mut self, layers: &[LayerSpec]) -> Result<WebAmbientSession> {
        let ctx = web::AudioContext::new()
            .map_err(|e| AudioError::PlatformUnavailable(js_err(e)))?;
        match build_graph(&ctx, layers) {
            Ok((master, generators)) => Ok(WebAmbientSession {
                ctx,
                master,
                generators,
            }),
            Err(e) => {
                _ = ctx.close();
                Err(e)
            }
        }
    }
}

fn build_graph(
    ctx: &web::AudioContext,
    layers: &[LayerSpec],
) -> Result<(web::GainNode, Vec<Generator>)> {
    let master = create_gain(ctx, 0.0, "Master")?;
    _ = master.connect_with_audio_node(&ctx.destination());
    let mut rng = rand::thread_rng();
    let mut generators = Vec::new();
    for layer in layers {
        generators.extend(build_layer(ctx, layer, &master, &mut rng)?);
    }
    Ok((master, generators))
}

pub struct WebAmbientSession {
    ctx: web::AudioContext,
    master: web::GainNode,
    generators: Vec<Generator>,
}

impl AmbientSession for WebAmbientSession {
    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn schedule_master(&mut self, master: &Automation, from: f64) {
        let gain = self.master.gain();
        _ = gain.cancel_scheduled_values(from);
        if let Err(e) = apply_events(&gain, master.events_from(from), 0.0) {
            log::warn!("[ambient] master fade not scheduled: {}", e);
        }
    }

    fn stop_sources(&mut self) {
        for g in &mut self.generators {
            g.stop();
        }
        self.generators.clear();
    }

    fn close(&mut self) {
        _ = self.ctx.close();
    }
}
