pub mod camera;
pub mod game_logic;
pub mod hud;
pub mod input;
pub mod race_plugin;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod title_screen;
pub mod victory_screen;

use bevy::prelude::*;
use game_logic::RaceMode;

/// Screen flow, mirrored from the session's race mode.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Title,
    Racing,
    Finished,
}

impl From<RaceMode> for GameState {
    fn from(mode: RaceMode) -> Self {
        match mode {
            RaceMode::Menu => GameState::Title,
            RaceMode::Racing => GameState::Racing,
            RaceMode::Finished => GameState::Finished,
        }
    }
}
