use crate::automation::Automation;
use crate::constants::*;
use crate::error::Result;
use crate::layers::{ambient_layers, LayerSpec};

/// A running audio graph: context, master bus and every generator node.
pub trait AmbientSession {
    fn current_time(&self) -> f64;
    fn schedule_master(&mut self, master: &Automation, from: f64);
    fn stop_sources(&mut self);
    fn close(&mut self);
}

pub trait AmbientBackend {
    type Session: AmbientSession;
    fn open(&mut self, layers: &[LayerSpec]) -> Result<Self::Session>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientParams {
    pub target_gain: f32,
    pub fade_in_sec: f64,
    pub fade_out_sec: f64,
    pub teardown_delay_sec: f64,
}

impl Default for AmbientParams {
    fn default() -> Self {
        Self {
            target_gain: MASTER_TARGET_GAIN,
            fade_in_sec: FADE_IN_SEC,
            fade_out_sec: FADE_OUT_SEC,
            teardown_delay_sec: TEARDOWN_DELAY_SEC,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackPhase {
    Stopped,
    Playing,
    Stopping,
}

struct Live<S> {
    session: S,
    master: Automation,
    release_at: Option<f64>,
}

pub struct AmbientPlayback<B: AmbientBackend> {
    backend: B,
    params: AmbientParams,
    layers: Vec<LayerSpec>,
    live: Option<Live<B::Session>>,
    restart_queued: bool,
}

impl<B: AmbientBackend> AmbientPlayback<B> {
    pub fn new(backend: B, params: AmbientParams) -> Self {
        Self {
            backend,
            params,
            layers: ambient_layers(),
            live: None,
            restart_queued: false,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        match &self.live {
            None => PlaybackPhase::Stopped,
            Some(l) if l.release_at.is_some() => PlaybackPhase::Stopping,
            Some(_) => PlaybackPhase::Playing,
        }
    }

    /// What the toggle should display. A restart queued behind a fade-out
    /// already counts as playing.
    pub fn is_playing(&self) -> bool {
        match self.phase() {
            PlaybackPhase::Playing => true,
            PlaybackPhase::Stopping => self.restart_queued,
            PlaybackPhase::Stopped => false,
        }
    }

    pub fn master(&self) -> Option<&Automation> {
        self.live.as_ref().map(|l| &l.master)
    }

    pub fn toggle(&mut self, now: f64) -> Result<()> {
        if self.is_playing() {
            self.stop(now);
            Ok(())
        } else {
            self.start()
        }
    }

    /// Begin playback. A no-op while playing; while a previous session is
    /// still fading out the start is queued until it has been released.
    pub fn start(&mut self) -> Result<()> {
        match self.phase() {
            PlaybackPhase::Playing => {
                log::debug!("[ambient] start ignored, already playing");
                Ok(())
            }
            PlaybackPhase::Stopping => {
                log::debug!("[ambient] start queued behind fade-out");
                self.restart_queued = true;
                Ok(())
            }
            PlaybackPhase::Stopped => self.open_session(),
        }
    }

    pub fn stop(&mut self, now: f64) {
        self.restart_queued = false;
        let fade_out = self.params.fade_out_sec;
        let delay = self.params.teardown_delay_sec;
        let Some(live) = self.live.as_mut() else {
            return;
        };
        if live.release_at.is_some() {
            return;
        }
        let t = live.session.current_time();
        let current = live.master.value_at(t);
        live.master
            .cancel_from(t)
            .set_value_at(current, t)
            .linear_ramp_to(0.0, t + fade_out);
        live.session.schedule_master(&live.master, t);
        live.release_at = Some(now + delay);
        log::info!("[ambient] fading out from {:.3}", current);
    }

    /// Advance deferred work: release a faded session once its deadline has
    /// passed, then open a queued restart.
    pub fn poll(&mut self, now: f64) -> Result<()> {
        let due = matches!(&self.live, Some(Live { release_at: Some(at), .. }) if now >= *at);
        if !due {
            return Ok(());
        }
        self.release();
        if std::mem::take(&mut self.restart_queued) {
            return self.open_session();
        }
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.restart_queued = false;
        self.release();
    }

    fn open_session(&mut self) -> Result<()> {
        let mut session = self.backend.open(&self.layers)?;
        let t = session.current_time();
        let mut master = Automation::new(0.0);
        master
            .set_value_at(0.0, t)
            .linear_ramp_to(self.params.target_gain, t + self.params.fade_in_sec);
        session.schedule_master(&master, t);
        log::info!(
            "[ambient] session open, {} layers, fading in over {:.1}s",
            self.layers.len(),
            self.params.fade_in_sec
        );
        self.live = Some(Live {
            session,
            master,
            release_at: None,
        });
        Ok(())
    }

    fn release(&mut self) {
        if let Some(mut live) = self.live.take() {
            live.session.stop_sources();
            live.session.close();
            log::info!("[ambient] session released");
        }
    }
}

impl<B: AmbientBackend> Drop for AmbientPlayback<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
