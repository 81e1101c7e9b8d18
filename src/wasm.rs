//! Browser bindings
//!
//! The page owns the canvas and the frame timer. It calls
//! [`WebGame::step`] once per tick and receives each frame as a JSON array
//! of [`Shape`](crate::render::Shape)s through its draw callback.

use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::audio::WebAudio;
use crate::game::Game;
use crate::input::Control;
use crate::persistence::LocalStorageStore;
use crate::render::{Frame, Renderer, draw_list};
use crate::settings::Settings;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already set: {}", err).into());
    }
    log::info!("Asteroids (web) starting...");
}

/// Hands each frame's display list to a JS function
pub struct CallbackRenderer {
    callback: js_sys::Function,
}

impl Renderer for CallbackRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        match serde_json::to_string(&draw_list(frame)) {
            Ok(json) => {
                if let Err(err) = self.callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("Draw callback failed: {:?}", err);
                }
            }
            Err(err) => log::warn!("Could not serialize frame: {}", err),
        }
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<WebAudio, CallbackRenderer, LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning` and `settings` are optional JSON overrides; invalid ones
    /// fall back to defaults
    #[wasm_bindgen(constructor)]
    pub fn new(draw: js_sys::Function, tuning: Option<String>, settings: Option<String>) -> WebGame {
        let tuning = tuning
            .map(|json| {
                Tuning::from_json(&json).unwrap_or_else(|err| {
                    log::warn!("Ignoring tuning: {}", err);
                    Tuning::default()
                })
            })
            .unwrap_or_default();
        let settings = settings
            .map(|json| {
                Settings::from_json(&json).unwrap_or_else(|err| {
                    log::warn!("Ignoring settings: {}", err);
                    Settings::default()
                })
            })
            .unwrap_or_default();

        let seed = js_sys::Date::now() as u64;
        let sound = WebAudio::new(tuning.fps, &settings);
        let renderer = CallbackRenderer { callback: draw };
        WebGame {
            game: Game::new(tuning, settings, seed, sound, renderer, LocalStorageStore::new()),
        }
    }

    /// Returns true when the key is a game control (the page should not scroll)
    pub fn key_down(&mut self, event: &KeyboardEvent) -> bool {
        let Some(control) = Control::from_code(&event.code()) else {
            return false;
        };
        event.prevent_default();
        self.game.sound().resume();
        self.game.key_down(control);
        true
    }

    pub fn key_up(&mut self, event: &KeyboardEvent) -> bool {
        let Some(control) = Control::from_code(&event.code()) else {
            return false;
        };
        event.prevent_default();
        self.game.key_up(control);
        true
    }

    /// Advance one tick and draw
    pub fn step(&mut self) {
        self.game.step();
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
    }

    /// Milliseconds between ticks
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.game.state().tuning.fps as f64
    }

    pub fn score(&self) -> f64 {
        self.game.state().score as f64
    }

    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }
}
