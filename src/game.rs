//! Per-frame driver
//!
//! Owns the simulation state and its random source, feeds it key input,
//! and forwards the events each tick produces to the sound system, the
//! high score store and the renderer.

use rand_pcg::Pcg32;

use crate::audio::SoundSystem;
use crate::highscore::HighScore;
use crate::input::{Control, InputMapper};
use crate::persistence::HighScoreStore;
use crate::render::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, seeded, tick};
use crate::tuning::Tuning;

/// A running game wired to its collaborators
pub struct Game<S: SoundSystem, R: Renderer, P: HighScoreStore> {
    state: GameState,
    rng: Pcg32,
    input: InputMapper,
    high_score: HighScore,
    settings: Settings,
    sound: S,
    renderer: R,
    store: P,
}

impl<S: SoundSystem, R: Renderer, P: HighScoreStore> Game<S, R, P> {
    pub fn new(
        tuning: Tuning,
        settings: Settings,
        seed: u64,
        sound: S,
        renderer: R,
        store: P,
    ) -> Self {
        let high_score = HighScore::load(&store);
        let mut rng = seeded(seed);
        let state = GameState::new_game(tuning, high_score.best(), &mut rng);
        let mut game = Self {
            state,
            rng,
            input: InputMapper::new(),
            high_score,
            settings,
            sound,
            renderer,
            store,
        };
        game.dispatch_events();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted setups
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Key pressed; ignored once the game is over
    pub fn key_down(&mut self, control: Control) {
        if !self.state.is_game_over() {
            self.input.key_down(control);
        }
    }

    /// Key released; ignored once the game is over
    pub fn key_up(&mut self, control: Control) {
        if !self.state.is_game_over() {
            self.input.key_up(control);
        }
    }

    /// Advance one tick and draw the result
    pub fn step(&mut self) {
        let input = self.input.take_input();
        tick(&mut self.state, &input, &mut self.rng);
        self.dispatch_events();
        self.sound.tick();

        let frame = Frame::new(&self.state, &self.settings);
        self.renderer.draw(&frame);

        if self.settings.auto_restart && self.state.is_game_over() && self.state.message.is_faded()
        {
            self.new_game();
        }
    }

    /// Throw away the current game and start over at level 1
    pub fn new_game(&mut self) {
        self.input.reset();
        self.sound.stop_thrust();
        self.sound.reset_tempo();
        self.state = GameState::new_game(
            self.state.tuning.clone(),
            self.high_score.best(),
            &mut self.rng,
        );
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        let sfx = self.settings.sound_on;
        for event in self.state.drain_events() {
            match event {
                GameEvent::LaserFired if sfx => self.sound.play_laser(),
                GameEvent::AsteroidDestroyed { .. } if sfx => self.sound.play_hit(),
                GameEvent::ShipExploded if sfx => self.sound.play_explosion(),
                GameEvent::ThrustStarted if sfx => self.sound.play_thrust(),
                GameEvent::ThrustStopped => self.sound.stop_thrust(),
                GameEvent::TempoChanged { ratio } => self.sound.set_tempo_ratio(ratio),
                GameEvent::TempoReset => self.sound.reset_tempo(),
                GameEvent::HighScore { score } => {
                    self.high_score.record(score, &mut self.store);
                }
                GameEvent::LevelStarted { level } => log::debug!("Level {} begins", level + 1),
                GameEvent::LifeLost { lives } => log::debug!("Life lost, {} left", lives),
                GameEvent::ShipRespawned => log::debug!("Ship respawned"),
                GameEvent::GameOver { score } => {
                    self.sound.stop_thrust();
                    log::debug!("Final score {}", score);
                }
                _ => {}
            }
        }
    }
}
