use bevy::prelude::*;

use crate::game_logic::PhysicsInput;
use crate::session::RaceActions;

const FORWARD_KEYS: [KeyCode; 3] = [KeyCode::ArrowUp, KeyCode::KeyW, KeyCode::Enter];
const BRAKE_KEYS: [KeyCode; 2] = [KeyCode::ArrowDown, KeyCode::KeyS];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
const START_KEYS: [KeyCode; 2] = [KeyCode::Enter, KeyCode::Space];
const RESTART_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyR];
pub const FULLSCREEN_KEY: KeyCode = KeyCode::KeyF;

/// Held driving keys for this tick.
pub fn physics_input(keys: &ButtonInput<KeyCode>) -> PhysicsInput {
    PhysicsInput {
        forward: keys.any_pressed(FORWARD_KEYS),
        brake: keys.any_pressed(BRAKE_KEYS),
        left: keys.any_pressed(LEFT_KEYS),
        right: keys.any_pressed(RIGHT_KEYS),
    }
}

/// Start/restart presses since last frame.
pub fn race_actions(keys: &ButtonInput<KeyCode>) -> RaceActions {
    RaceActions {
        start: keys.any_just_pressed(START_KEYS),
        restart: keys.any_just_pressed(RESTART_KEYS),
    }
}
