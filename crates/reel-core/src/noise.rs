use crate::constants::*;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseKind {
    Pink,
    Crackle,
    Brown,
}

impl NoiseKind {
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R, len: usize) -> Vec<f32> {
        match self {
            NoiseKind::Pink => pink(rng, len),
            NoiseKind::Crackle => crackle(rng, len).samples,
            NoiseKind::Brown => brown(rng, len),
        }
    }
}

#[inline]
pub fn samples_for(seconds: f32, sample_rate: f32) -> usize {
    (seconds * sample_rate).max(0.0) as usize
}

#[inline]
fn white<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}

/// Pink-ish noise from three leaky integrators plus a raw white term.
pub fn pink<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f32> {
    let mut state = [0.0_f32; 3];
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        let w = white(rng);
        let mut sum = w * PINK_WHITE_WEIGHT;
        for (b, (pole, weight)) in state.iter_mut().zip(PINK_STAGES) {
            *b = pole * *b + w * weight;
            sum += *b;
        }
        out.push(sum * PINK_OUTPUT_GAIN);
    }
    out
}

#[derive(Clone, Debug, Default)]
pub struct Crackle {
    pub samples: Vec<f32>,
    pub pops: usize,
    pub ticks: usize,
}

impl Crackle {
    pub fn pop_rate(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.pops as f64 / self.samples.len() as f64
    }
}

/// Sparse vinyl crackle: decaying pops and single-sample ticks over silence.
///
/// A pop adds into the following samples, so a later tick may overwrite part
/// of a pop's tail.
pub fn crackle<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Crackle {
    let mut samples = vec![0.0_f32; len];
    let mut pops = 0;
    let mut ticks = 0;
    for i in 0..len {
        let roll = rng.gen::<f64>();
        if roll < POP_PROBABILITY {
            pops += 1;
            let tail = POP_LENGTH_SAMPLES.min(len - i);
            for d in 0..tail {
                let env = (-(d as f32) / POP_DECAY_SAMPLES).exp();
                samples[i + d] += (rng.gen::<f32>() - 0.5) * env * POP_AMPLITUDE;
            }
        } else if roll < TICK_PROBABILITY {
            ticks += 1;
            samples[i] = (rng.gen::<f32>() - 0.5) * TICK_AMPLITUDE;
        }
    }
    Crackle {
        samples,
        pops,
        ticks,
    }
}

pub fn brown<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f32> {
    let mut prev = 0.0_f32;
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        prev = (prev + rng.gen_range(-BROWN_STEP..BROWN_STEP)) * BROWN_LEAK;
        out.push(prev * BROWN_OUTPUT_GAIN);
    }
    out
}

pub fn decaying_burst<R: Rng + ?Sized>(rng: &mut R, len: usize, tau_samples: f32) -> Vec<f32> {
    let tau = tau_samples.max(f32::EPSILON);
    (0..len)
        .map(|i| white(rng) * (-(i as f32) / tau).exp())
        .collect()
}

pub fn scan_pass<R: Rng + ?Sized>(rng: &mut R, len: usize, peak: f32) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let progress = i as f32 / len as f32;
            let env = if progress < 0.05 {
                progress / 0.05
            } else if progress > 0.9 {
                (1.0 - progress) / 0.1
            } else {
                1.0
            };
            white(rng) * env * peak
        })
        .collect()
}
