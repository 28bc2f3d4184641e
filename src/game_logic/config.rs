use crate::game_logic::*;
use bevy::prelude::*;
use thiserror::Error;

/// How the scene is viewed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Smoothed third-person perspective camera.
    #[default]
    Chase,
    /// Orthographic view straight down onto the vehicle, no smoothing.
    TopDown,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Track(#[from] TrackError),

    #[error("lap target must be at least 1")]
    NoLaps,

    #[error("fixed timestep must be positive and finite, got {0}")]
    BadTimestep(f32),

    #[error(
        "max travel per tick ({step:.2}) must stay under half the loop ({half_loop:.2}) \
         for progress unwrapping"
    )]
    StepExceedsHalfLoop { step: f32, half_loop: f32 },

    #[error(
        "max travel per tick ({step:.2}) can skip past the query window \
         ({span} segments of at least {shortest:.2})"
    )]
    StepExceedsQueryWindow {
        step: f32,
        span: usize,
        shortest: f32,
    },
}

/// Fixed race tuning. Not editable once the race session exists.
#[derive(Resource, Clone, Debug)]
pub struct RaceConfig {
    pub view_mode: ViewMode,
    pub fixed_timestep: f32,
    pub half_width: f32,
    pub lap_target: u32,
    pub start_s: f32,
    pub max_forward_speed: f32,
    pub max_reverse_speed: f32,
    pub query_span: usize,
    pub snap_query_span: usize,
    pub hard_reset_distance: f32,
    pub lap_credit_min_speed: f32,
    pub fov_deg: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Chase,
            fixed_timestep: FIXED_TIMESTEP,
            half_width: TRACK_HALF_WIDTH,
            lap_target: LAP_TARGET,
            start_s: START_S,
            max_forward_speed: MAX_FORWARD_SPEED,
            max_reverse_speed: MAX_REVERSE_SPEED,
            query_span: QUERY_SPAN,
            snap_query_span: SNAP_QUERY_SPAN,
            hard_reset_distance: HARD_RESET_DISTANCE,
            lap_credit_min_speed: LAP_CREDIT_MIN_SPEED,
            fov_deg: FOV_DEG,
        }
    }
}

impl RaceConfig {
    pub fn with_lap_target(mut self, lap_target: u32) -> Self {
        self.lap_target = lap_target;
        self
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    /// Furthest the vehicle can travel in one fixed tick.
    pub fn max_step_distance(&self) -> f32 {
        self.max_forward_speed.abs().max(self.max_reverse_speed.abs()) * self.fixed_timestep
    }

    /// Check the assumptions the locality query and the progress unwrap rely on.
    pub fn validate(&self, track: &Track) -> Result<(), ConfigError> {
        if self.lap_target == 0 {
            return Err(ConfigError::NoLaps);
        }
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(ConfigError::BadTimestep(self.fixed_timestep));
        }

        let step = self.max_step_distance();
        let half_loop = track.total_length() / 2.0;
        if step >= half_loop {
            return Err(ConfigError::StepExceedsHalfLoop { step, half_loop });
        }

        let shortest = track.shortest_segment();
        if step > self.query_span as f32 * shortest {
            return Err(ConfigError::StepExceedsQueryWindow {
                step,
                span: self.query_span,
                shortest,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_for_default_circuit() {
        let track = Track::default_circuit().unwrap();
        assert_eq!(RaceConfig::default().validate(&track), Ok(()));
    }

    #[test]
    fn test_max_step_distance() {
        let config = RaceConfig::default();
        assert!((config.max_step_distance() - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_step_longer_than_half_loop() {
        let track = Track::from_centerline(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 3.0),
        ])
        .unwrap();
        let err = RaceConfig::default().validate(&track).unwrap_err();
        assert!(matches!(err, ConfigError::StepExceedsHalfLoop { .. }));
    }

    #[test]
    fn test_rejects_zero_laps() {
        let track = Track::default_circuit().unwrap();
        let config = RaceConfig::default().with_lap_target(0);
        assert_eq!(config.validate(&track), Err(ConfigError::NoLaps));
    }
}
