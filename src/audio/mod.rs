//! Sound cues and the background beat
//!
//! The simulation only emits events; a [`SoundSystem`] turns them into
//! audio. Backends:
//! - [`NullSound`]: silent
//! - [`LogSound`]: logs each cue, used by the headless runner
//! - `WebAudio`: procedurally generated Web Audio tones (wasm32 only)

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Receives the game's sound cues
pub trait SoundSystem {
    fn play_laser(&mut self);
    fn play_explosion(&mut self);
    /// Asteroid hit by a laser
    fn play_hit(&mut self);
    /// Start the thrust loop
    fn play_thrust(&mut self);
    /// Stop the thrust loop; safe to call when it isn't playing
    fn stop_thrust(&mut self);
    /// Scale the beat tempo by the fraction of asteroids left (0.0 - 1.0)
    fn set_tempo_ratio(&mut self, ratio: f32);

    fn reset_tempo(&mut self) {
        self.set_tempo_ratio(1.0);
    }

    /// Advance one frame
    fn tick(&mut self) {}
}

impl<S: SoundSystem + ?Sized> SoundSystem for Box<S> {
    fn play_laser(&mut self) {
        (**self).play_laser()
    }

    fn play_explosion(&mut self) {
        (**self).play_explosion()
    }

    fn play_hit(&mut self) {
        (**self).play_hit()
    }

    fn play_thrust(&mut self) {
        (**self).play_thrust()
    }

    fn stop_thrust(&mut self) {
        (**self).stop_thrust()
    }

    fn set_tempo_ratio(&mut self, ratio: f32) {
        (**self).set_tempo_ratio(ratio)
    }

    fn reset_tempo(&mut self) {
        (**self).reset_tempo()
    }

    fn tick(&mut self) {
        (**self).tick()
    }
}

/// Which of the two alternating beat notes to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    Low,
    High,
}

/// Fastest tempo, reached when the last asteroid is left
const MIN_TEMPO: f32 = 0.25;

/// Background beat scheduler
///
/// Alternates low and high notes. The gap between notes is
/// `tempo * 2` seconds, where tempo runs from 1.0 (full belt) down to
/// [`MIN_TEMPO`] as asteroids are cleared.
#[derive(Debug, Clone)]
pub struct Music {
    fps: u32,
    enabled: bool,
    tempo: f32,
    beat_ticks: u32,
    low: bool,
}

impl Music {
    pub fn new(fps: u32, enabled: bool) -> Self {
        Self {
            fps,
            enabled,
            tempo: 1.0,
            beat_ticks: 0,
            low: true,
        }
    }

    pub fn tempo(&self) -> f32 {
        self.tempo
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Speed up as the belt thins out
    pub fn set_ratio(&mut self, ratio: f32) {
        let ratio = ratio.clamp(0.0, 1.0);
        self.tempo = 1.0 - (1.0 - MIN_TEMPO) * (1.0 - ratio);
    }

    pub fn reset(&mut self) {
        self.tempo = 1.0;
    }

    /// Ticks between two notes at the current tempo
    pub fn beat_interval(&self) -> u32 {
        (self.tempo * 2.0 * self.fps as f32).ceil() as u32
    }

    /// Advance one frame, returning the note to play if one is due
    pub fn tick(&mut self) -> Option<Beat> {
        if !self.enabled {
            return None;
        }
        if self.beat_ticks > 0 {
            self.beat_ticks -= 1;
            return None;
        }

        let beat = if self.low { Beat::Low } else { Beat::High };
        self.low = !self.low;
        self.beat_ticks = self.beat_interval();
        Some(beat)
    }
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl SoundSystem for NullSound {
    fn play_laser(&mut self) {}
    fn play_explosion(&mut self) {}
    fn play_hit(&mut self) {}
    fn play_thrust(&mut self) {}
    fn stop_thrust(&mut self) {}
    fn set_tempo_ratio(&mut self, _ratio: f32) {}
}

/// Logs cues at trace level and keeps the beat running
#[derive(Debug, Clone)]
pub struct LogSound {
    music: Music,
    thrusting: bool,
    beats: u64,
}

impl LogSound {
    pub fn new(fps: u32, music_on: bool) -> Self {
        Self {
            music: Music::new(fps, music_on),
            thrusting: false,
            beats: 0,
        }
    }

    /// Notes played so far
    pub fn beats(&self) -> u64 {
        self.beats
    }

    pub fn music(&self) -> &Music {
        &self.music
    }
}

impl SoundSystem for LogSound {
    fn play_laser(&mut self) {
        log::trace!("sfx: laser");
    }

    fn play_explosion(&mut self) {
        log::trace!("sfx: explosion");
    }

    fn play_hit(&mut self) {
        log::trace!("sfx: hit");
    }

    fn play_thrust(&mut self) {
        if !self.thrusting {
            log::trace!("sfx: thrust on");
            self.thrusting = true;
        }
    }

    fn stop_thrust(&mut self) {
        if self.thrusting {
            log::trace!("sfx: thrust off");
            self.thrusting = false;
        }
    }

    fn set_tempo_ratio(&mut self, ratio: f32) {
        self.music.set_ratio(ratio);
    }

    fn reset_tempo(&mut self) {
        self.music.reset();
    }

    fn tick(&mut self) {
        if let Some(beat) = self.music.tick() {
            self.beats += 1;
            log::trace!("music: {:?} beat (tempo {:.2})", beat, self.music.tempo());
        }
    }
}
