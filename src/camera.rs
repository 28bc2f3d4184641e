use bevy::prelude::*;
use bevy::render::camera::{Projection, ScalingMode};

use crate::game_logic::{
    CAMERA_DISTANCE, CAMERA_HEIGHT, CAMERA_LOOK_AHEAD, CAMERA_LOOK_HEIGHT, CAMERA_OFF_TRACK_LIFT,
    CAMERA_RESPONSIVENESS, TOP_DOWN_EYE_HEIGHT, VIEWPORT_HEIGHT, VIEWPORT_WIDTH, VehicleState,
    ViewMode,
};

/// Virtual camera the scene is projected through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraState {
    /// Where the camera wants to be for the current vehicle pose.
    pub fn target_for(mode: ViewMode, vehicle: &VehicleState, off_track: bool) -> Self {
        let position = vehicle.position;
        match mode {
            ViewMode::Chase => {
                let forward = vehicle.forward_vector();
                let behind = position - forward * CAMERA_DISTANCE;
                let ahead = position + forward * CAMERA_LOOK_AHEAD;
                let lift = if off_track { CAMERA_OFF_TRACK_LIFT } else { 0.0 };
                Self {
                    eye: Vec3::new(behind.x, CAMERA_HEIGHT + lift, behind.y),
                    target: Vec3::new(ahead.x, CAMERA_LOOK_HEIGHT, ahead.y),
                }
            }
            ViewMode::TopDown => Self {
                eye: Vec3::new(position.x, TOP_DOWN_EYE_HEIGHT, position.y),
                target: Vec3::new(position.x, 0.0, position.y),
            },
        }
    }

    /// Frame-rate independent exponential approach, per axis, no overshoot.
    pub fn smooth_toward(&mut self, target: &CameraState, responsiveness: f32, delta: f32) {
        let blend = 1.0 - (-responsiveness * delta).exp();
        self.eye = self.eye.lerp(target.eye, blend);
        self.target = self.target.lerp(target.target, blend);
    }
}

/// Follows the vehicle each fixed tick.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub mode: ViewMode,
    pub state: CameraState,
}

impl CameraRig {
    pub fn new(mode: ViewMode, vehicle: &VehicleState) -> Self {
        Self {
            mode,
            state: CameraState::target_for(mode, vehicle, false),
        }
    }

    pub fn update(&mut self, vehicle: &VehicleState, off_track: bool, delta: f32) {
        let target = CameraState::target_for(self.mode, vehicle, off_track);
        match self.mode {
            ViewMode::Chase => self.state.smooth_toward(&target, CAMERA_RESPONSIVENESS, delta),
            ViewMode::TopDown => self.state = target,
        }
    }

    /// Jump straight to the target, used on race reset.
    pub fn snap(&mut self, vehicle: &VehicleState) {
        self.state = CameraState::target_for(self.mode, vehicle, false);
    }
}

/// Screen-space camera the composited frame is drawn with.
pub fn setup_screen_camera(mut commands: Commands) {
    // fit the fixed logical viewport into whatever window size we get
    let mut projection = OrthographicProjection::default_2d();
    projection.scaling_mode = ScalingMode::AutoMin {
        min_width: VIEWPORT_WIDTH,
        min_height: VIEWPORT_HEIGHT,
    };

    commands.spawn((Camera2d, Projection::Orthographic(projection)));
}
