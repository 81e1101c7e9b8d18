//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{Beat, Music, SoundSystem};
use crate::settings::Settings;

/// Web Audio backend
pub struct WebAudio {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    music: Music,
    thrust: Option<(OscillatorNode, GainNode)>,
}

impl WebAudio {
    pub fn new(fps: u32, settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music: Music::new(fps, settings.music_on),
            thrust: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Context ready to play, resumed if the browser suspended it
    fn context(&self, vol: f32) -> Option<&AudioContext> {
        if vol <= 0.0 {
            return None;
        }
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Beat note - short low sine
    fn play_beat(&self, beat: Beat) {
        let vol = self.music_volume;
        let Some(ctx) = self.context(vol) else { return };
        let freq = match beat {
            Beat::Low => 55.0,
            Beat::High => 65.0,
        };
        let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }
}

impl SoundSystem for WebAudio {
    /// Laser - falling square zap
    fn play_laser(&mut self) {
        let vol = self.sfx_volume;
        let Some(ctx) = self.context(vol) else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, 1200.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(1200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(300.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Ship explosion - boom with a crack on top
    fn play_explosion(&mut self) {
        let vol = self.sfx_volume;
        let Some(ctx) = self.context(vol) else { return };
        let t = ctx.current_time();

        if let Some((osc, gain)) = Self::create_osc(ctx, 100.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(100.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.6).ok();
        }

        if let Some((osc, gain)) = Self::create_osc(ctx, 1500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Asteroid hit - crunchy thud
    fn play_hit(&mut self) {
        let vol = self.sfx_volume;
        let Some(ctx) = self.context(vol) else { return };
        let t = ctx.current_time();

        if let Some((osc, gain)) = Self::create_osc(ctx, 180.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency().set_value_at_time(90.0, t + 0.04).ok();
            osc.frequency().set_value_at_time(140.0, t + 0.08).ok();
            osc.frequency().set_value_at_time(60.0, t + 0.12).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }

    /// Thrust - low rumble held until [`stop_thrust`](SoundSystem::stop_thrust)
    fn play_thrust(&mut self) {
        if self.thrust.is_some() {
            return;
        }
        let vol = self.sfx_volume;
        let Some(ctx) = self.context(vol) else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, 45.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.01, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.2, t + 0.05)
            .ok();
        osc.start().ok();
        self.thrust = Some((osc, gain));
    }

    fn stop_thrust(&mut self) {
        let Some((osc, gain)) = self.thrust.take() else {
            return;
        };
        let t = self.ctx.as_ref().map(|ctx| ctx.current_time()).unwrap_or(0.0);
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.05)
            .ok();
        osc.stop_with_when(t + 0.06).ok();
    }

    fn set_tempo_ratio(&mut self, ratio: f32) {
        self.music.set_ratio(ratio);
    }

    fn reset_tempo(&mut self) {
        self.music.reset();
    }

    fn tick(&mut self) {
        if let Some(beat) = self.music.tick() {
            self.play_beat(beat);
        }
    }
}
