use serde::Serialize;

use crate::game_logic::ViewMode;
use crate::session::RaceSession;

/// Round a length or position for the snapshot.
pub fn round2(value: f32) -> f64 {
    round_to(value, 100.0)
}

/// Round an angle or a timer for the snapshot.
pub fn round3(value: f32) -> f64 {
    round_to(value, 1000.0)
}

fn round_to(value: f32, scale: f64) -> f64 {
    (value as f64 * scale).round() / scale
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackSnapshot {
    pub total_length: f64,
    pub half_width: f64,
    pub start_line_s: f64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarSnapshot {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub angle_rad: f64,
    pub speed: f64,
    pub on_track: bool,
    pub track_s: f64,
    pub total_progress: f64,
    pub segment_index: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CameraSnapshot {
    pub view: &'static str,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub target_x: f64,
    pub target_y: f64,
    pub target_z: f64,
    /// Absent for the orthographic top-down view.
    pub fov_deg: Option<f64>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LapSnapshot {
    pub completed: u32,
    pub total: u32,
    pub next_lap_at_progress: f64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub race_clock: f64,
    pub current_lap: f64,
    pub last_lap: Option<f64>,
    pub best_lap: Option<f64>,
}

/// Rounded, serializable view of a race session.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RaceSnapshot {
    pub mode: &'static str,
    pub coordinate_system: &'static str,
    pub track: TrackSnapshot,
    pub car: CarSnapshot,
    pub camera: CameraSnapshot,
    pub laps: LapSnapshot,
    pub timers: TimerSnapshot,
}

impl RaceSnapshot {
    pub fn capture(session: &RaceSession) -> Self {
        let config = session.config();
        let race = session.race();
        let vehicle = session.vehicle();
        let camera = session.camera();

        let (view, fov_deg) = match camera.mode {
            ViewMode::Chase => ("chase", Some(round2(config.fov_deg))),
            ViewMode::TopDown => ("topDown", None),
        };

        Self {
            mode: race.mode.as_str(),
            coordinate_system: "world x/z ground plane, y up; screen origin top-left, y down",
            track: TrackSnapshot {
                total_length: round2(session.track().total_length()),
                half_width: round2(config.half_width),
                start_line_s: round2(config.start_s),
            },
            car: CarSnapshot {
                x: round2(vehicle.position.x),
                y: round2(vehicle.height),
                z: round2(vehicle.position.y),
                angle_rad: round3(vehicle.angle),
                speed: round2(vehicle.speed),
                on_track: !race.off_track,
                track_s: round2(vehicle.track_s),
                total_progress: round2(vehicle.total_progress),
                segment_index: vehicle.segment_index,
            },
            camera: CameraSnapshot {
                view,
                x: round2(camera.state.eye.x),
                y: round2(camera.state.eye.y),
                z: round2(camera.state.eye.z),
                target_x: round2(camera.state.target.x),
                target_y: round2(camera.state.target.y),
                target_z: round2(camera.state.target.z),
                fov_deg,
            },
            laps: LapSnapshot {
                completed: race.laps_completed,
                total: race.lap_target,
                next_lap_at_progress: round2(race.next_lap_at),
            },
            timers: TimerSnapshot {
                race_clock: round3(race.race_clock),
                current_lap: round3(race.current_lap()),
                last_lap: race.last_lap.map(round3),
                best_lap: race.best_lap.map(round3),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::{PhysicsInput, RaceConfig, RaceMode};

    fn session() -> RaceSession {
        RaceSession::with_default_track(RaceConfig::default()).unwrap()
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(-0.005001), -0.01);
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(2.0), 2.0);
    }

    #[test]
    fn test_menu_snapshot() {
        let snapshot = session().snapshot();
        assert_eq!(snapshot.mode, "menu");
        assert_eq!(snapshot.track.half_width, 56.0);
        assert_eq!(snapshot.track.start_line_s, 24.0);
        assert_eq!(snapshot.car.speed, 0.0);
        assert!(snapshot.car.on_track);
        assert_eq!(snapshot.laps.completed, 0);
        assert_eq!(snapshot.laps.total, 3);
        assert_eq!(snapshot.timers.last_lap, None);
        assert_eq!(snapshot.camera.fov_deg, Some(68.0));
    }

    #[test]
    fn test_snapshot_is_stable_between_identical_runs() {
        let run = || {
            let mut session = session();
            session.reset(RaceMode::Racing);
            session.advance_time(750.0, &PhysicsInput::forward());
            session.snapshot()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let mut session = session();
        session.reset(RaceMode::Racing);
        session.advance_time(100.0, &PhysicsInput::forward());

        let json = session.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "racing");
        assert!(value["car"]["totalProgress"].as_f64().unwrap() > 24.0);
        assert!(value["track"]["totalLength"].is_number());
        assert!(value["camera"]["targetX"].is_number());
        assert!(value["timers"]["bestLap"].is_null());
        assert_eq!(value["laps"]["completed"], 0);
    }

    #[test]
    fn test_top_down_snapshot_omits_fov() {
        let config = RaceConfig::default().with_view_mode(ViewMode::TopDown);
        let session = RaceSession::with_default_track(config).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.camera.view, "topDown");
        assert_eq!(snapshot.camera.fov_deg, None);
        assert_eq!(snapshot.camera.y, 400.0);
    }
}
