use crate::constants::*;
use crate::motion::{Spring, SpringParams, VelocityTracker};
use crate::trigger::{ScanEvent, ScanTrigger};
use glam::Vec2;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScannerParams {
    pub saturation_velocity: f32,
    pub threshold: f32,
    pub cooldown_sec: f64,
    pub spring: SpringParams,
}

impl Default for ScannerParams {
    fn default() -> Self {
        Self {
            saturation_velocity: INTENSITY_SATURATION_VELOCITY,
            threshold: SCAN_THRESHOLD,
            cooldown_sec: SCAN_COOLDOWN_SEC,
            spring: SpringParams::default(),
        }
    }
}

#[inline]
pub fn intensity(velocity: f32, saturation_velocity: f32) -> f32 {
    if velocity.is_nan() || saturation_velocity <= 0.0 {
        return 0.0;
    }
    (velocity.abs() / saturation_velocity).clamp(0.0, 1.0)
}

// Piecewise-linear interpolation over three keyframes.
fn keyframes(x: f32, xs: [f32; 3], ys: [f32; 3]) -> f32 {
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[2] {
        return ys[2];
    }
    let i = if x < xs[1] { 0 } else { 1 };
    let frac = (x - xs[i]) / (xs[i + 1] - xs[i]);
    ys[i] + (ys[i + 1] - ys[i]) * frac
}

/// CSS `backdrop-filter` parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterPreset {
    pub brightness: f32,
    pub contrast: f32,
    pub blur_px: f32,
    pub sepia: f32,
}

impl FilterPreset {
    pub const CALM: Self = Self {
        brightness: 1.0,
        contrast: 1.0,
        blur_px: 0.0,
        sepia: 0.0,
    };
    pub const MIDPOINT: Self = Self {
        brightness: 1.2,
        contrast: 1.2,
        blur_px: 0.5,
        sepia: 0.1,
    };
    pub const EXTREME: Self = Self {
        brightness: 1.4,
        contrast: 1.5,
        blur_px: 1.0,
        sepia: 0.2,
    };

    pub fn at(intensity: f32) -> Self {
        let xs = [0.0, 0.5, 1.0];
        let (a, b, c) = (Self::CALM, Self::MIDPOINT, Self::EXTREME);
        Self {
            brightness: keyframes(intensity, xs, [a.brightness, b.brightness, c.brightness]),
            contrast: keyframes(intensity, xs, [a.contrast, b.contrast, c.contrast]),
            blur_px: keyframes(intensity, xs, [a.blur_px, b.blur_px, c.blur_px]),
            sepia: keyframes(intensity, xs, [a.sepia, b.sepia, c.sepia]),
        }
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "brightness({:.3}) contrast({:.3}) blur({:.3}px) sepia({:.3})",
            self.brightness, self.contrast, self.blur_px, self.sepia
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScannerVisuals {
    pub filter: FilterPreset,
    pub overlay_opacity: f32,
    pub red_offset: Vec2,
    pub cyan_offset: Vec2,
}

impl ScannerVisuals {
    pub fn from_intensity(intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        let red = Vec2::new(CHROMA_MAX_X_PX * i, -CHROMA_MAX_Y_PX * i);
        Self {
            filter: FilterPreset::at(i),
            overlay_opacity: keyframes(i, [0.0, SCAN_THRESHOLD, 1.0], OVERLAY_OPACITY_KEYS),
            red_offset: red,
            cyan_offset: -red,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScannerFrame {
    pub velocity: f32,
    pub intensity: f32,
    pub visuals: ScannerVisuals,
    /// Whether the light beam should be animating.
    pub scanning: bool,
    pub event: ScanEvent,
}

pub struct ScannerController {
    params: ScannerParams,
    tracker: VelocityTracker,
    spring: Spring,
    trigger: ScanTrigger,
    last_time: Option<f64>,
}

impl ScannerController {
    pub fn new(params: ScannerParams) -> Self {
        Self {
            params,
            tracker: VelocityTracker::new(),
            spring: Spring::new(params.spring),
            trigger: ScanTrigger::new(params.threshold, params.cooldown_sec),
            last_time: None,
        }
    }

    pub fn update(&mut self, scroll_y: f64, now: f64) -> ScannerFrame {
        let raw = self.tracker.sample(scroll_y, now);
        let dt = self
            .last_time
            .map(|prev| (now - prev).max(0.0) as f32)
            .unwrap_or(0.0);
        self.last_time = Some(now);
        let velocity = self.spring.step(raw, dt);
        let intensity = intensity(velocity, self.params.saturation_velocity);
        let event = self.trigger.update(intensity, now);
        ScannerFrame {
            velocity,
            intensity,
            visuals: ScannerVisuals::from_intensity(intensity),
            scanning: self.trigger.is_scanning(),
            event,
        }
    }
}

impl Default for ScannerController {
    fn default() -> Self {
        Self::new(ScannerParams::default())
    }
}
