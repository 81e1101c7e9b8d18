//! Keyboard input mapping
//!
//! Raw key-down/key-up events become ship intents. Rotation and thrust are
//! level-triggered (active while held); fire is edge-triggered and must be
//! released before it can fire again.

use crate::sim::{TickInput, Trigger, Turn};

/// Game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

impl Control {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Control::RotateLeft),
            "ArrowRight" => Some(Control::RotateRight),
            "ArrowUp" => Some(Control::Thrust),
            "Space" => Some(Control::Fire),
            _ => None,
        }
    }

    /// Map a legacy `keyCode`
    pub fn from_key_code(key_code: u32) -> Option<Self> {
        match key_code {
            37 => Some(Control::RotateLeft),
            39 => Some(Control::RotateRight),
            38 => Some(Control::Thrust),
            32 => Some(Control::Fire),
            _ => None,
        }
    }
}

/// Accumulates key state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    left: bool,
    right: bool,
    thrust: bool,
    fire_held: bool,
    trigger: Vec<Trigger>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, control: Control) {
        match control {
            Control::RotateLeft => self.left = true,
            Control::RotateRight => self.right = true,
            Control::Thrust => self.thrust = true,
            Control::Fire => {
                // Auto-repeat keydowns are not new pulls
                if !self.fire_held {
                    self.fire_held = true;
                    self.trigger.push(Trigger::Pull);
                }
            }
        }
    }

    pub fn key_up(&mut self, control: Control) {
        match control {
            Control::RotateLeft => self.left = false,
            Control::RotateRight => self.right = false,
            Control::Thrust => self.thrust = false,
            Control::Fire => {
                if self.fire_held {
                    self.fire_held = false;
                    self.trigger.push(Trigger::Release);
                }
            }
        }
    }

    /// Current turn intent; opposite keys cancel out
    pub fn turn(&self) -> Turn {
        match (self.left, self.right) {
            (true, false) => Turn::Left,
            (false, true) => Turn::Right,
            _ => Turn::None,
        }
    }

    /// Snapshot the intents for the next tick, consuming fire edges
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            turn: self.turn(),
            thrust: self.thrust,
            trigger: std::mem::take(&mut self.trigger),
        }
    }

    /// Forget every held key
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
