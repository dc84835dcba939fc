#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamEvent {
    SetValue { value: f32, time: f64 },
    LinearRamp { value: f32, end_time: f64 },
    ExponentialRamp { value: f32, end_time: f64 },
}

impl ParamEvent {
    #[inline]
    pub fn time(&self) -> f64 {
        match *self {
            ParamEvent::SetValue { time, .. } => time,
            ParamEvent::LinearRamp { end_time, .. } => end_time,
            ParamEvent::ExponentialRamp { end_time, .. } => end_time,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        match *self {
            ParamEvent::SetValue { value, .. }
            | ParamEvent::LinearRamp { value, .. }
            | ParamEvent::ExponentialRamp { value, .. } => value,
        }
    }

    pub fn shifted(self, by: f64) -> Self {
        match self {
            ParamEvent::SetValue { value, time } => ParamEvent::SetValue {
                value,
                time: time + by,
            },
            ParamEvent::LinearRamp { value, end_time } => ParamEvent::LinearRamp {
                value,
                end_time: end_time + by,
            },
            ParamEvent::ExponentialRamp { value, end_time } => ParamEvent::ExponentialRamp {
                value,
                end_time: end_time + by,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Automation {
    initial: f32,
    events: Vec<ParamEvent>,
}

impl Automation {
    pub fn new(initial: f32) -> Self {
        Self {
            initial,
            events: Vec::new(),
        }
    }

    pub fn initial(&self) -> f32 {
        self.initial
    }

    pub fn events(&self) -> &[ParamEvent] {
        &self.events
    }

    pub fn events_from(&self, from: f64) -> impl Iterator<Item = ParamEvent> + '_ {
        self.events.iter().copied().filter(move |e| e.time() >= from)
    }

    pub fn set_value_at(&mut self, value: f32, time: f64) -> &mut Self {
        self.insert(ParamEvent::SetValue { value, time })
    }

    pub fn linear_ramp_to(&mut self, value: f32, end_time: f64) -> &mut Self {
        self.insert(ParamEvent::LinearRamp { value, end_time })
    }

    pub fn exponential_ramp_to(&mut self, value: f32, end_time: f64) -> &mut Self {
        self.insert(ParamEvent::ExponentialRamp { value, end_time })
    }

    pub fn cancel_from(&mut self, time: f64) -> &mut Self {
        self.events.retain(|e| e.time() < time);
        self
    }

    fn insert(&mut self, ev: ParamEvent) -> &mut Self {
        // Equal times keep insertion order, as AudioParam does.
        let at = self.events.partition_point(|e| e.time() <= ev.time());
        self.events.insert(at, ev);
        self
    }

    /// Value of the parameter at `t`.
    ///
    /// A ramp runs from the previous event (or from time zero at the initial
    /// value) to its own end time. An exponential ramp whose endpoints are not
    /// both strictly positive or both strictly negative holds the previous
    /// value and jumps at its end.
    pub fn value_at(&self, t: f64) -> f32 {
        let mut prev_time = 0.0_f64;
        let mut prev_value = self.initial;
        for ev in &self.events {
            match *ev {
                ParamEvent::SetValue { value, time } => {
                    if t < time {
                        return prev_value;
                    }
                    prev_time = time;
                    prev_value = value;
                }
                ParamEvent::LinearRamp { value, end_time } => {
                    if t < end_time {
                        let Some(frac) = ramp_fraction(prev_time, end_time, t) else {
                            return prev_value;
                        };
                        return prev_value + (value - prev_value) * frac;
                    }
                    prev_time = end_time;
                    prev_value = value;
                }
                ParamEvent::ExponentialRamp { value, end_time } => {
                    if t < end_time {
                        let Some(frac) = ramp_fraction(prev_time, end_time, t) else {
                            return prev_value;
                        };
                        if prev_value * value <= 0.0 {
                            return prev_value;
                        }
                        return prev_value * (value / prev_value).powf(frac);
                    }
                    prev_time = end_time;
                    prev_value = value;
                }
            }
        }
        prev_value
    }
}

#[inline]
fn ramp_fraction(start: f64, end: f64, t: f64) -> Option<f32> {
    if t <= start || end <= start {
        return None;
    }
    Some(((t - start) / (end - start)) as f32)
}
