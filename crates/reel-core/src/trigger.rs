use crate::constants::{SCAN_COOLDOWN_SEC, SCAN_THRESHOLD};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Cooldown {
    #[default]
    Idle,
    Cooling {
        until: f64,
    },
}

impl Cooldown {
    pub fn poll(&mut self, now: f64) {
        if let Cooldown::Cooling { until } = *self {
            if now >= until {
                *self = Cooldown::Idle;
            }
        }
    }

    pub fn try_begin(&mut self, now: f64, window: f64) -> bool {
        self.poll(now);
        match *self {
            Cooldown::Idle => {
                *self = Cooldown::Cooling { until: now + window };
                true
            }
            Cooldown::Cooling { .. } => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    None,
    /// Rising edge outside the cooldown: play the cue.
    Fire,
    /// Rising edge inside the cooldown: visuals only.
    Suppressed,
    Ended,
}

impl ScanEvent {
    pub fn fires(self) -> bool {
        self == ScanEvent::Fire
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ScanTrigger {
    threshold: f32,
    window: f64,
    scanning: bool,
    cooldown: Cooldown,
}

impl ScanTrigger {
    pub fn new(threshold: f32, window: f64) -> Self {
        Self {
            threshold,
            window,
            scanning: false,
            cooldown: Cooldown::Idle,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    pub fn update(&mut self, intensity: f32, now: f64) -> ScanEvent {
        self.cooldown.poll(now);
        let above = intensity > self.threshold;
        match (self.scanning, above) {
            (false, true) => {
                self.scanning = true;
                if self.cooldown.try_begin(now, self.window) {
                    log::debug!("[scan] rising edge at {:.2}s, firing cue", now);
                    ScanEvent::Fire
                } else {
                    log::debug!("[scan] rising edge at {:.2}s inside cooldown", now);
                    ScanEvent::Suppressed
                }
            }
            (true, false) => {
                self.scanning = false;
                ScanEvent::Ended
            }
            _ => ScanEvent::None,
        }
    }
}

impl Default for ScanTrigger {
    fn default() -> Self {
        Self::new(SCAN_THRESHOLD, SCAN_COOLDOWN_SEC)
    }
}
