use crate::game_logic::{Pose, Track};
use bevy::prelude::*;

/// Kinematic state of the player's vehicle.
///
/// Ground-plane vectors store world `(x, z)` in their `(x, y)` lanes.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleState {
    pub position: Vec2,
    /// Height above the ground plane. Always 0 until the track gains elevation.
    pub height: f32,
    pub angle: f32,
    /// Signed scalar speed, negative while reversing.
    pub speed: f32,
    /// Wrapped arc-length of the last matched track point.
    pub track_s: f32,
    /// Unwrapped arc-length, accumulates across laps.
    pub total_progress: f32,
    /// Last matched segment, the locality hint for the next query.
    pub segment_index: usize,
    /// Perpendicular distance reported by the last off-track check.
    pub track_distance: f32,
}

impl VehicleState {
    /// A stationary vehicle at arc-length `s` facing along the track.
    pub fn at_start(track: &Track, s: f32) -> Self {
        let pose = track.pose_at(s);
        Self::from_pose(pose, track.wrap_s(s), s)
    }

    pub fn from_pose(pose: Pose, track_s: f32, total_progress: f32) -> Self {
        Self {
            position: pose.position,
            height: 0.0,
            angle: pose.angle,
            speed: 0.0,
            track_s,
            total_progress,
            segment_index: pose.segment_index,
            track_distance: 0.0,
        }
    }

    pub fn forward_vector(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// World-space position with the height in the y lane.
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.position.x, self.height, self.position.y)
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            angle: self.angle,
            segment_index: self.segment_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_state_sits_on_track() {
        let track = Track::default_circuit().unwrap();
        let vehicle = VehicleState::at_start(&track, 24.0);
        let pose = track.pose_at(24.0);
        assert_eq!(vehicle.position, pose.position);
        assert_eq!(vehicle.angle, pose.angle);
        assert_eq!(vehicle.speed, 0.0);
        assert_eq!(vehicle.track_s, 24.0);
        assert_eq!(vehicle.total_progress, 24.0);
        assert_eq!(vehicle.segment_index, 0);
    }

    #[test]
    fn test_world_position_maps_ground_plane() {
        let track = Track::default_circuit().unwrap();
        let mut vehicle = VehicleState::at_start(&track, 0.0);
        vehicle.position = Vec2::new(3.0, 7.0);
        assert_eq!(vehicle.world_position(), Vec3::new(3.0, 0.0, 7.0));
        vehicle.angle = 0.0;
        assert_eq!(vehicle.forward_vector(), Vec2::X);
    }
}
