//! Rendering contract and shape generation
//!
//! The game never draws directly. Each frame it hands a read-only [`Frame`]
//! to a [`Renderer`]; [`draw_list`] flattens that frame into canvas-style
//! [`Shape`]s that any 2D backend can stroke and fill.

use glam::Vec2;
use serde::Serialize;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::settings::Settings;
use crate::sim::{Asteroid, GamePhase, GameState, Laser, Ship};

/// HUD text size in pixels
const TEXT_SIZE: f32 = 40.0;

/// Ship explosion rings, outermost first (radius factor, colour)
const SHIP_EXPLOSION: [(f32, &str); 5] = [
    (1.7, "darkred"),
    (1.4, "red"),
    (1.1, "orange"),
    (0.8, "yellow"),
    (0.5, "white"),
];

/// Laser impact rings, as factors of the ship radius
const LASER_EXPLOSION: [(f32, &str); 3] =
    [(0.75, "orangered"), (0.5, "salmon"), (0.3, "pink")];

/// Receives one frame per tick
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn draw(&mut self, frame: &Frame<'_>) {
        (**self).draw(frame)
    }
}

/// Read-only view of everything visible this tick
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub state: &'a GameState,
    pub show_bounding: bool,
    pub show_centre_dot: bool,
}

impl<'a> Frame<'a> {
    pub fn new(state: &'a GameState, settings: &Settings) -> Self {
        Self {
            state,
            show_bounding: settings.show_bounding,
            show_centre_dot: settings.show_centre_dot,
        }
    }

    pub fn ship(&self) -> &'a Ship {
        &self.state.ship
    }

    pub fn asteroids(&self) -> &'a [Asteroid] {
        &self.state.asteroids
    }

    pub fn lasers(&self) -> &'a [Laser] {
        &self.state.ship.lasers
    }

    /// Explosion shown while the ship is destroyed and not yet replaced
    pub fn exploding(&self) -> bool {
        matches!(
            self.state.phase,
            GamePhase::ShipExploding { .. } | GamePhase::Respawning
        )
    }

    /// Ship drawn this frame (hidden on odd blink counts)
    pub fn ship_visible(&self) -> bool {
        self.state.phase == GamePhase::Playing && self.state.ship.blink_on()
    }

    pub fn thruster_visible(&self) -> bool {
        self.ship_visible() && self.state.ship.thrusting
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One canvas drawing command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Closed path
    Polygon {
        points: Vec<Vec2>,
        stroke: Option<&'static str>,
        fill: Option<&'static str>,
        line_width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        stroke: Option<&'static str>,
        fill: Option<&'static str>,
        line_width: f32,
    },
    /// White text, `alpha` in 0.0 - 1.0
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        align: TextAlign,
        alpha: f32,
    },
}

impl Shape {
    fn filled_circle(center: Vec2, radius: f32, color: &'static str) -> Self {
        Shape::Circle {
            center,
            radius,
            stroke: None,
            fill: Some(color),
            line_width: 0.0,
        }
    }

    fn stroked_circle(center: Vec2, radius: f32, color: &'static str, line_width: f32) -> Self {
        Shape::Circle {
            center,
            radius,
            stroke: Some(color),
            fill: None,
            line_width,
        }
    }
}

/// Ship triangle: nose, rear left, rear right
pub fn ship_outline(pos: Vec2, radius: f32, angle: f32) -> [Vec2; 3] {
    let (sin, cos) = angle.sin_cos();
    [
        Vec2::new(
            pos.x + 4.0 / 3.0 * radius * cos,
            pos.y - 4.0 / 3.0 * radius * sin,
        ),
        Vec2::new(
            pos.x - radius * (2.0 / 3.0 * cos + sin),
            pos.y + radius * (2.0 / 3.0 * sin - cos),
        ),
        Vec2::new(
            pos.x - radius * (2.0 / 3.0 * cos - sin),
            pos.y + radius * (2.0 / 3.0 * sin + cos),
        ),
    ]
}

/// Flame behind the ship while thrusting
pub fn thruster_flame(pos: Vec2, radius: f32, angle: f32) -> [Vec2; 3] {
    let (sin, cos) = angle.sin_cos();
    [
        Vec2::new(
            pos.x - radius * (2.0 / 3.0 * cos + 0.5 * sin),
            pos.y + radius * (2.0 / 3.0 * sin - 0.5 * cos),
        ),
        Vec2::new(
            pos.x - radius * 5.0 / 3.0 * cos,
            pos.y + radius * 5.0 / 3.0 * sin,
        ),
        Vec2::new(
            pos.x - radius * (2.0 / 3.0 * cos - 0.5 * sin),
            pos.y + radius * (2.0 / 3.0 * sin + 0.5 * cos),
        ),
    ]
}

/// Jagged asteroid outline, one point per vertex offset
pub fn asteroid_outline(asteroid: &Asteroid) -> Vec<Vec2> {
    let n = asteroid.vertex_count();
    asteroid
        .offsets
        .iter()
        .enumerate()
        .map(|(j, offset)| {
            let a = asteroid.angle + j as f32 * TAU / n as f32;
            asteroid.pos + Vec2::new(a.cos(), a.sin()) * (asteroid.radius * offset)
        })
        .collect()
}

/// Spare-life icon positions along the top-left of the HUD
pub fn life_icons(lives: u8, ship_size: f32) -> Vec<Vec2> {
    (0..lives)
        .map(|i| Vec2::new(ship_size + i as f32 * ship_size * 1.2, ship_size))
        .collect()
}

/// Flatten a frame into drawing commands, back to front
pub fn draw_list(frame: &Frame<'_>) -> Vec<Shape> {
    let state = frame.state;
    let tuning = &state.tuning;
    let ship = frame.ship();
    let line_width = tuning.ship_size / 20.0;
    let mut shapes = Vec::new();

    // Ship, or its explosion
    if frame.ship_visible() {
        shapes.push(Shape::Polygon {
            points: ship_outline(ship.pos, ship.radius, ship.angle).to_vec(),
            stroke: Some("white"),
            fill: None,
            line_width,
        });
        if frame.thruster_visible() {
            shapes.push(Shape::Polygon {
                points: thruster_flame(ship.pos, ship.radius, ship.angle).to_vec(),
                stroke: Some("yellow"),
                fill: Some("red"),
                line_width,
            });
        }
    } else if frame.exploding() {
        shapes.extend(
            SHIP_EXPLOSION
                .iter()
                .map(|&(k, color)| Shape::filled_circle(ship.pos, ship.radius * k, color)),
        );
    }

    if frame.show_bounding && state.phase != GamePhase::GameOver {
        shapes.push(Shape::stroked_circle(ship.pos, ship.radius, "lime", 1.0));
    }

    for asteroid in frame.asteroids() {
        shapes.push(Shape::Polygon {
            points: asteroid_outline(asteroid),
            stroke: Some("slategrey"),
            fill: None,
            line_width,
        });
        if frame.show_bounding {
            shapes.push(Shape::stroked_circle(
                asteroid.pos,
                asteroid.radius,
                "lime",
                1.0,
            ));
        }
    }

    if frame.show_centre_dot && frame.ship_visible() {
        shapes.push(Shape::filled_circle(ship.pos, 1.0, "red"));
    }

    for laser in frame.lasers() {
        if laser.is_exploding() {
            shapes.extend(
                LASER_EXPLOSION
                    .iter()
                    .map(|&(k, color)| Shape::filled_circle(laser.pos, ship.radius * k, color)),
            );
        } else {
            shapes.push(Shape::filled_circle(
                laser.pos,
                tuning.ship_size / 15.0,
                "salmon",
            ));
        }
    }

    // HUD
    let width = tuning.field_width;
    if !state.message.is_faded() {
        shapes.push(Shape::Text {
            text: state.message.text.clone(),
            pos: Vec2::new(width / 2.0, tuning.field_height * 0.75),
            size: TEXT_SIZE,
            align: TextAlign::Center,
            alpha: state.message.alpha,
        });
    }

    for (i, icon) in life_icons(state.lives, tuning.ship_size).into_iter().enumerate() {
        // Lives drop when the explosion ends, so only flag the icon while it runs
        let losing = matches!(state.phase, GamePhase::ShipExploding { .. })
            && i + 1 == state.lives as usize;
        shapes.push(Shape::Polygon {
            points: ship_outline(icon, ship.radius, FRAC_PI_2).to_vec(),
            stroke: Some(if losing { "red" } else { "white" }),
            fill: None,
            line_width,
        });
    }

    shapes.push(Shape::Text {
        text: state.score.to_string(),
        pos: Vec2::new(width - tuning.ship_size / 2.0, tuning.ship_size),
        size: TEXT_SIZE,
        align: TextAlign::Right,
        alpha: 1.0,
    });
    shapes.push(Shape::Text {
        text: format!("BEST {}", state.high_score),
        pos: Vec2::new(width / 2.0, tuning.ship_size),
        size: TEXT_SIZE * 0.75,
        align: TextAlign::Center,
        alpha: 1.0,
    });

    shapes
}

/// Discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &Frame<'_>) {}
}

/// Logs a one-line HUD summary every `interval` frames
#[derive(Debug, Clone)]
pub struct LogRenderer {
    interval: u64,
    frames: u64,
}

impl LogRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        if self.frames % self.interval != 0 {
            return;
        }
        let state = frame.state;
        log::debug!(
            "[frame {}] level {} | score {} (best {}) | lives {} | asteroids {} | lasers {} | {} shapes",
            self.frames,
            state.level + 1,
            state.score,
            state.high_score,
            state.lives,
            state.asteroids.len(),
            state.ship.lasers.len(),
            draw_list(frame).len()
        );
    }
}
