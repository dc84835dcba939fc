// Shared audio/visual tuning constants used by the core and the web frontend.

// Ambient master bus
pub const MASTER_TARGET_GAIN: f32 = 0.8; // steady-state loudness after fade-in
pub const FADE_IN_SEC: f64 = 3.0;
pub const FADE_OUT_SEC: f64 = 1.2;
pub const TEARDOWN_DELAY_SEC: f64 = 1.4; // must outlast FADE_OUT_SEC

// Noise buffer lengths (seconds of audio per looped buffer)
pub const VINYL_BUFFER_SEC: f32 = 3.0;
pub const CRACKLE_BUFFER_SEC: f32 = 4.0;
pub const PAD_BUFFER_SEC: f32 = 5.0;
pub const AMBIENT_CHANNELS: u32 = 2;

// Pink noise (vinyl surface) leaky integrators: (pole, input weight)
pub const PINK_STAGES: [(f32, f32); 3] = [
    (0.99886, 0.0555179),
    (0.99332, 0.0750759),
    (0.96900, 0.1538520),
];
pub const PINK_WHITE_WEIGHT: f32 = 0.5362;
pub const PINK_OUTPUT_GAIN: f32 = 0.11;

// Crackle
pub const POP_PROBABILITY: f64 = 0.0008;
pub const TICK_PROBABILITY: f64 = 0.004; // cumulative with POP_PROBABILITY
pub const POP_LENGTH_SAMPLES: usize = 60;
pub const POP_DECAY_SAMPLES: f32 = 8.0;
pub const POP_AMPLITUDE: f32 = 0.7;
pub const TICK_AMPLITUDE: f32 = 0.3;

// Brown noise (atmosphere pad)
pub const BROWN_STEP: f32 = 0.01;
pub const BROWN_LEAK: f32 = 0.998;
pub const BROWN_OUTPUT_GAIN: f32 = 8.0;

// Scroll velocity -> intensity
pub const INTENSITY_SATURATION_VELOCITY: f32 = 2000.0; // px/s
pub const SCAN_THRESHOLD: f32 = 0.3;
pub const SCAN_COOLDOWN_SEC: f64 = 5.0;

// Velocity smoothing spring
pub const SPRING_STIFFNESS: f32 = 400.0;
pub const SPRING_DAMPING: f32 = 50.0;
pub const SPRING_MASS: f32 = 1.0;
pub const SPRING_SUBSTEP_SEC: f32 = 1.0 / 240.0;
pub const SPRING_MAX_FRAME_SEC: f32 = 0.1; // clamp for stalled frames (tab switches)

// Scanner overlay mapping
pub const OVERLAY_OPACITY_KEYS: [f32; 3] = [0.0, 0.1, 0.5]; // at intensity 0, 0.3, 1
pub const CHROMA_MAX_X_PX: f32 = 5.0;
pub const CHROMA_MAX_Y_PX: f32 = 2.0;
