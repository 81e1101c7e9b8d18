//! Asteroids entry point
//!
//! The browser build starts from the library's wasm `start` hook. Natively
//! this runs a headless demo: an autopilot flies the ship for a while with
//! logging stand-ins for audio and video, and the high score is kept in a
//! JSON file in the temp directory.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use asteroids::Game;
    use asteroids::audio::{LogSound, SoundSystem};
    use asteroids::input::Control;
    use asteroids::persistence::{FileStore, HighScoreStore};
    use asteroids::render::{LogRenderer, Renderer};
    use asteroids::settings::Settings;
    use asteroids::sim::{GameState, Turn};
    use asteroids::tuning::Tuning;

    /// Length of the demo run in seconds
    const DEMO_SECONDS: u32 = 120;

    /// Heading error (radians) below which the autopilot shoots
    const AIM_TOLERANCE: f32 = 0.15;

    /// Turns toward the nearest asteroid and fires when lined up
    #[derive(Debug, Default)]
    struct Autopilot {
        turn: Turn,
        fire_held: bool,
    }

    impl Autopilot {
        fn drive<S: SoundSystem, R: Renderer, P: HighScoreStore>(
            &mut self,
            game: &mut Game<S, R, P>,
        ) {
            let (turn, fire) = Self::decide(game.state());

            if turn != self.turn {
                match self.turn {
                    Turn::Left => game.key_up(Control::RotateLeft),
                    Turn::Right => game.key_up(Control::RotateRight),
                    Turn::None => {}
                }
                match turn {
                    Turn::Left => game.key_down(Control::RotateLeft),
                    Turn::Right => game.key_down(Control::RotateRight),
                    Turn::None => {}
                }
                self.turn = turn;
            }

            // Alternate press and release so every shot is a fresh pull
            if self.fire_held {
                game.key_up(Control::Fire);
                self.fire_held = false;
            } else if fire {
                game.key_down(Control::Fire);
                self.fire_held = true;
            }
        }

        fn decide(state: &GameState) -> (Turn, bool) {
            let ship = &state.ship;
            let Some(target) = state.asteroids.iter().min_by(|a, b| {
                a.pos
                    .distance_squared(ship.pos)
                    .total_cmp(&b.pos.distance_squared(ship.pos))
            }) else {
                return (Turn::None, false);
            };

            // Screen y grows downward; ship angles are counter-clockwise
            let to_target = target.pos - ship.pos;
            let wanted = (-to_target.y).atan2(to_target.x);
            let error = (wanted - ship.angle + std::f32::consts::PI)
                .rem_euclid(std::f32::consts::TAU)
                - std::f32::consts::PI;

            let turn = if error > AIM_TOLERANCE {
                Turn::Left
            } else if error < -AIM_TOLERANCE {
                Turn::Right
            } else {
                Turn::None
            };
            (turn, error.abs() < AIM_TOLERANCE * 2.0)
        }
    }

    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("ASTEROIDS_TUNING") else {
            return Tuning::default();
        };
        Tuning::load(&path).unwrap_or_else(|err| {
            log::warn!("Using default tuning, {} is unusable: {}", path, err);
            Tuning::default()
        })
    }

    fn load_settings() -> Settings {
        let Ok(path) = std::env::var("ASTEROIDS_SETTINGS") else {
            return Settings::default();
        };
        Settings::load(&path).unwrap_or_else(|err| {
            log::warn!("Using default settings, {} is unusable: {}", path, err);
            Settings::default()
        })
    }

    pub fn run() {
        let tuning = load_tuning();
        let settings = load_settings();
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let fps = tuning.fps;

        let store = FileStore::new(std::env::temp_dir().join("asteroids-highscore.json"));
        log::info!("High score file: {}", store.path().display());

        let sound = LogSound::new(fps, settings.music_on);
        let renderer = LogRenderer::new(fps as u64);
        let mut game = Game::new(tuning, settings, seed, sound, renderer, store);
        let mut pilot = Autopilot::default();

        for _ in 0..DEMO_SECONDS * fps {
            pilot.drive(&mut game);
            game.step();
        }

        let state = game.state();
        log::info!(
            "Demo finished: level {}, score {}, lives {}, high score {} ({} frames, {} beats)",
            state.level + 1,
            state.score,
            state.lives,
            game.high_score(),
            game.renderer().frames(),
            game.sound().beats()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Asteroids (native, headless) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's start hook, this is just to satisfy the compiler
}
