use std::time::Duration;

use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use crate::GameState;
use crate::camera::setup_screen_camera;
use crate::game_logic::MAX_FRAME_DELTA;
use crate::hud::{setup_hud, update_hud};
use crate::input::{FULLSCREEN_KEY, physics_input, race_actions};
use crate::render::{setup_frame_mesh, upload_frame};
use crate::session::RaceSession;
use crate::title_screen::{MainScreenEntity, destroy_screen, setup_title_screen};
use crate::victory_screen::{VictoryScreenEntity, setup_victory_screen};

/// Runs one validated race session: fixed-rate simulation, input, screens
/// and the composited frame.
pub struct RacePlugin {
    session: RaceSession,
}

impl RacePlugin {
    pub fn new(session: RaceSession) -> Self {
        Self { session }
    }
}

impl Plugin for RacePlugin {
    fn build(&self, app: &mut App) {
        let timestep = self.session.config().fixed_timestep as f64;

        app.insert_resource(self.session.clone())
            .insert_resource(Time::<Fixed>::from_seconds(timestep))
            .insert_resource(ClearColor(Color::srgb(0.302, 0.490, 0.349)))
            .init_state::<GameState>()
            .add_systems(
                Startup,
                (clamp_frame_delta, setup_screen_camera, setup_frame_mesh, setup_hud),
            )
            .add_systems(FixedUpdate, fixed_tick)
            .add_systems(
                Update,
                (
                    handle_race_actions,
                    sync_game_state,
                    toggle_fullscreen,
                    (upload_frame, update_hud),
                )
                    .chain(),
            )
            .add_systems(OnEnter(GameState::Title), setup_title_screen)
            .add_systems(OnExit(GameState::Title), destroy_screen::<MainScreenEntity>)
            .add_systems(OnEnter(GameState::Finished), setup_victory_screen)
            .add_systems(OnExit(GameState::Finished), destroy_screen::<VictoryScreenEntity>);
    }
}

/// Bound catch-up ticks after a stall.
fn clamp_frame_delta(mut time: ResMut<Time<Virtual>>) {
    time.set_max_delta(Duration::from_secs_f32(MAX_FRAME_DELTA));
}

/// Held keys are read exactly once per fixed step.
fn fixed_tick(keys: Res<ButtonInput<KeyCode>>, mut session: ResMut<RaceSession>) {
    let input = physics_input(&keys);
    session.tick(&input);
}

fn handle_race_actions(keys: Res<ButtonInput<KeyCode>>, mut session: ResMut<RaceSession>) {
    session.handle_actions(&race_actions(&keys));
}

fn sync_game_state(
    session: Res<RaceSession>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let wanted = GameState::from(session.mode());
    if *state.get() != wanted {
        debug!("Screen {:?} -> {:?}", state.get(), wanted);
        next_state.set(wanted);
    }
}

fn toggle_fullscreen(
    keys: Res<ButtonInput<KeyCode>>,
    mut window: Single<&mut Window, With<PrimaryWindow>>,
) {
    if !keys.just_pressed(FULLSCREEN_KEY) {
        return;
    }
    window.mode = match window.mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        _ => WindowMode::Windowed,
    };
}
