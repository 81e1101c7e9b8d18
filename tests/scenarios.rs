//! End-to-end scenarios driving [`Game`] with recording collaborators

use asteroids::Game;
use asteroids::audio::SoundSystem;
use asteroids::input::Control;
use asteroids::persistence::{HighScoreStore, MemoryStore};
use asteroids::render::{Frame, Renderer};
use asteroids::settings::Settings;
use asteroids::sim::{Asteroid, AsteroidSize, GamePhase, GameState, seeded};
use asteroids::tuning::Tuning;
use glam::Vec2;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cue {
    Laser,
    Explosion,
    Hit,
    ThrustOn,
    ThrustOff,
    Tempo(f32),
    TempoReset,
}

#[derive(Default)]
struct RecordingSound {
    cues: Vec<Cue>,
    ticks: u32,
}

impl RecordingSound {
    fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }
}

impl SoundSystem for RecordingSound {
    fn play_laser(&mut self) {
        self.cues.push(Cue::Laser);
    }

    fn play_explosion(&mut self) {
        self.cues.push(Cue::Explosion);
    }

    fn play_hit(&mut self) {
        self.cues.push(Cue::Hit);
    }

    fn play_thrust(&mut self) {
        self.cues.push(Cue::ThrustOn);
    }

    fn stop_thrust(&mut self) {
        self.cues.push(Cue::ThrustOff);
    }

    fn set_tempo_ratio(&mut self, ratio: f32) {
        self.cues.push(Cue::Tempo(ratio));
    }

    fn reset_tempo(&mut self) {
        self.cues.push(Cue::TempoReset);
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }
}

#[derive(Default)]
struct RecordingRenderer {
    frames: u32,
    exploding_frames: u32,
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        if frame.exploding() {
            self.exploding_frames += 1;
        }
    }
}

type TestGame = Game<RecordingSound, RecordingRenderer, MemoryStore>;

fn game(high_score: u64, settings: Settings) -> TestGame {
    Game::new(
        Tuning::default(),
        settings,
        42,
        RecordingSound::default(),
        RecordingRenderer::default(),
        MemoryStore::with_score(high_score),
    )
}

fn still_roid(x: f32, y: f32, size: AsteroidSize) -> Asteroid {
    Asteroid {
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
        size,
        radius: Tuning::default().asteroid_radius(size),
        angle: 0.0,
        offsets: vec![1.0; 10],
    }
}

/// Medium asteroid straight above the ship, plus one far off so the belt
/// isn't cleared
fn medium_ahead(game: &mut TestGame) {
    game.state_mut().asteroids = vec![
        still_roid(60.0, 560.0, AsteroidSize::Large),
        still_roid(400.0, 150.0, AsteroidSize::Medium),
    ];
}

fn fire_once(game: &mut TestGame, ticks: u32) {
    game.key_down(Control::Fire);
    game.step();
    game.key_up(Control::Fire);
    for _ in 1..ticks {
        game.step();
    }
}

#[test]
fn test_shot_that_beats_high_score_is_saved_once() {
    let mut game = game(30, Settings::default());
    medium_ahead(&mut game);

    fire_once(&mut game, 30);

    let state = game.state();
    assert_eq!(state.score, 50);
    assert_eq!(state.high_score, 50);
    assert_eq!(game.high_score(), 50);
    assert_eq!(game.store().saves(), 1);
    assert_eq!(game.store().load().unwrap(), 50);
    assert_eq!(state.asteroids_remaining, 6);
    // Medium split into two smalls
    assert_eq!(
        state
            .asteroids
            .iter()
            .filter(|a| a.size == AsteroidSize::Small)
            .count(),
        2
    );

    let sound = game.sound();
    assert_eq!(sound.count(Cue::Laser), 1);
    assert_eq!(sound.count(Cue::Hit), 1);
    assert!(
        sound
            .cues
            .iter()
            .any(|c| matches!(c, Cue::Tempo(r) if (r - 6.0 / 7.0).abs() < 1e-6))
    );
    assert_eq!(sound.ticks, 30);
    assert_eq!(game.renderer().frames, 30);
}

#[test]
fn test_score_below_high_score_is_not_saved() {
    let mut game = game(100, Settings::default());
    medium_ahead(&mut game);

    fire_once(&mut game, 30);

    assert_eq!(game.state().score, 50);
    assert_eq!(game.state().high_score, 100);
    assert_eq!(game.store().saves(), 0);
}

#[test]
fn test_sound_off_silences_effects_but_not_tempo() {
    let settings = Settings {
        sound_on: false,
        ..Settings::default()
    };
    let mut game = game(0, settings);
    medium_ahead(&mut game);

    fire_once(&mut game, 30);

    let sound = game.sound();
    assert_eq!(sound.count(Cue::Laser), 0);
    assert_eq!(sound.count(Cue::Hit), 0);
    assert!(sound.cues.iter().any(|c| matches!(c, Cue::Tempo(_))));
}

#[test]
fn test_clearing_last_asteroid_starts_next_level() {
    let mut game = game(0, Settings::default());
    {
        let state = game.state_mut();
        state.asteroids = vec![still_roid(400.0, 150.0, AsteroidSize::Small)];
        state.asteroids_remaining = 1;
    }

    fire_once(&mut game, 30);

    let state = game.state();
    assert_eq!(state.level, 1);
    assert_eq!(state.score, 100);
    assert_eq!(state.asteroids.len(), 2);
    assert_eq!(state.asteroids_total, 14);
    assert_eq!(state.asteroids_remaining, 14);
    assert_eq!(state.message.text, "Level 2");
}

/// Put the ship, vulnerable, on top of a small asteroid with one life left
fn doomed(game: &mut TestGame) {
    let state = game.state_mut();
    state.lives = 1;
    state.ship.blink_count = 0;
    state.asteroids = vec![
        still_roid(400.0, 300.0, AsteroidSize::Small),
        still_roid(60.0, 560.0, AsteroidSize::Large),
    ];
}

#[test]
fn test_last_life_ends_game_and_new_game_resets() {
    let settings = Settings {
        auto_restart: false,
        ..Settings::default()
    };
    let mut game = game(0, settings);
    doomed(&mut game);

    game.key_down(Control::Thrust);
    game.step();
    assert!(matches!(game.state().phase, GamePhase::ShipExploding { .. }));
    assert_eq!(game.state().score, 100);
    assert_eq!(game.sound().count(Cue::Explosion), 1);

    for _ in 0..18 {
        game.step();
    }
    assert_eq!(game.state().phase, GamePhase::GameOver);
    assert_eq!(game.state().lives, 0);
    assert_eq!(game.state().message.text, "Game Over");
    assert_eq!(game.sound().count(Cue::TempoReset), 1);
    assert_eq!(game.renderer().exploding_frames, 18);
    assert_eq!(game.store().load().unwrap(), 100);

    // Frozen until someone asks for a new game
    for _ in 0..300 {
        game.step();
    }
    assert_eq!(game.state().phase, GamePhase::GameOver);

    game.new_game();
    let state = game.state();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.lives, 3);
    assert_eq!(state.score, 0);
    assert_eq!(state.level, 0);
    assert_eq!(state.high_score, 100);
    assert!(!state.ship.thrusting);
}

#[test]
fn test_auto_restart_after_game_over_message() {
    let mut game = game(0, Settings::default());
    doomed(&mut game);

    for _ in 0..19 {
        game.step();
    }
    assert!(game.state().is_game_over());

    let mut restarted_after = None;
    for t in 1..=200 {
        game.step();
        if !game.state().is_game_over() {
            restarted_after = Some(t);
            break;
        }
    }
    let t = restarted_after.expect("game should restart on its own");
    assert!((140..=160).contains(&t), "restarted after {} ticks", t);
    assert_eq!(game.state().lives, 3);
    assert_eq!(game.high_score(), 100);
}

proptest! {
    #[test]
    fn prop_level_difficulty_grows(level in 0u32..12, seed in any::<u64>()) {
        let tuning = Tuning::default();
        let mut rng = seeded(seed);
        let mut state = GameState::new_game(tuning.clone(), 0, &mut rng);
        state.level = level;
        state.begin_level(&mut rng);

        let count = tuning.asteroid_count(level);
        prop_assert_eq!(state.asteroids.len() as u32, count);
        prop_assert_eq!(state.asteroids_total, count * 7);
        prop_assert!(tuning.asteroid_count(level + 1) > count);
        prop_assert!(
            tuning.level_speed_multiplier(level + 1) > tuning.level_speed_multiplier(level)
        );

        let max_speed = tuning.roids_speed * tuning.level_speed_multiplier(level) / tuning.fps as f32;
        for roid in &state.asteroids {
            prop_assert_eq!(roid.size, AsteroidSize::Large);
            prop_assert!(roid.vel.x.abs() <= max_speed && roid.vel.y.abs() <= max_speed);
            prop_assert!(roid.pos.distance(state.ship.pos) >= tuning.spawn_clearance());
        }
    }
}
