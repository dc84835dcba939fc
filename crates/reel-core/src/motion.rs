use crate::constants::*;

#[derive(Clone, Copy, Debug, Default)]
pub struct VelocityTracker {
    last: Option<(f64, f64)>,
    velocity: f32,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero on the first sample and on any sample that does not move
    /// forward in time.
    pub fn sample(&mut self, position: f64, time_sec: f64) -> f32 {
        self.velocity = match self.last {
            Some((prev_pos, prev_time)) if time_sec > prev_time => {
                ((position - prev_pos) / (time_sec - prev_time)) as f32
            }
            Some(_) => {
                self.velocity = 0.0;
                return 0.0;
            }
            None => 0.0,
        };
        self.last = Some((position, time_sec));
        self.velocity
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: SPRING_STIFFNESS,
            damping: SPRING_DAMPING,
            mass: SPRING_MASS,
        }
    }
}

impl SpringParams {
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Spring {
    params: SpringParams,
    value: f32,
    velocity: f32,
}

impl Spring {
    pub fn new(params: SpringParams) -> Self {
        Self {
            params,
            value: 0.0,
            velocity: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Integrates with fixed sub-steps so the result does not depend on the
    /// frame rate; long stalls are clamped to [`SPRING_MAX_FRAME_SEC`].
    pub fn step(&mut self, target: f32, dt_sec: f32) -> f32 {
        if !target.is_finite() || !dt_sec.is_finite() {
            return self.value;
        }
        let dt = dt_sec.clamp(0.0, SPRING_MAX_FRAME_SEC);
        if dt == 0.0 {
            return self.value;
        }
        let steps = (dt / SPRING_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        let SpringParams {
            stiffness: k,
            damping: c,
            mass: m,
        } = self.params;
        for _ in 0..steps {
            let accel = (k * (target - self.value) - c * self.velocity) / m;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }
        self.value
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(SpringParams::default())
    }
}
