use crate::game_logic::*;
use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Held driving actions, sampled once per fixed tick
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhysicsInput {
    pub forward: bool,
    pub brake: bool,
    pub left: bool,
    pub right: bool,
}

impl PhysicsInput {
    pub fn forward() -> Self {
        Self {
            forward: true,
            ..Default::default()
        }
    }
}

/// Scalar controls derived from the held actions
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInput {
    /// Forward adds 1, brake/reverse subtracts a smaller weight.
    pub throttle: f32,
    /// Left is -1, right is +1, both cancel.
    pub steer: f32,
}

impl From<&PhysicsInput> for ControlInput {
    fn from(input: &PhysicsInput) -> Self {
        let mut throttle = 0.0;
        if input.forward {
            throttle += 1.0;
        }
        if input.brake {
            throttle -= REVERSE_WEIGHT;
        }

        let mut steer = 0.0;
        if input.left {
            steer -= 1.0;
        }
        if input.right {
            steer += 1.0;
        }

        Self { throttle, steer }
    }
}

/// What happened during one dynamics step
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    pub off_track: bool,
    pub hard_reset: bool,
    /// Whether the locality query was replaced by a full scan.
    pub revalidated: bool,
    /// Perpendicular distance from the locality query.
    pub distance: f32,
    /// Unwrapped arc-length travelled this step.
    pub delta_s: f32,
}

/// Wrap an angle into `[-PI, PI)`.
pub fn normalize_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Shortest signed arc-length between two wrapped positions on the loop.
///
/// Assumes the true travel is under half the loop, which `RaceConfig::validate`
/// guarantees for a single tick.
pub fn unwrap_delta(raw: f32, total_length: f32) -> f32 {
    [raw, raw - total_length, raw + total_length]
        .into_iter()
        .fold(raw, |best, candidate| {
            if candidate.abs() < best.abs() {
                candidate
            } else {
                best
            }
        })
}

/// Advance the vehicle by one fixed tick.
///
/// This is the core physics logic, shared by the live app and headless driving.
pub fn apply_physics(
    vehicle: &mut VehicleState,
    control: ControlInput,
    track: &Track,
    config: &RaceConfig,
    delta: f32,
) -> StepReport {
    let throttle = control.throttle.clamp(-1.0, 1.0);
    let steer = control.steer.clamp(-1.0, 1.0);

    // Speed: thrust, then exponential drag (stronger while coasting)
    vehicle.speed += throttle * ACCEL_RATE * delta;
    let rolling_drag = if throttle == 0.0 {
        COAST_DRAG
    } else {
        POWERED_DRAG
    };
    vehicle.speed *= (-rolling_drag * delta).exp();
    vehicle.speed = vehicle
        .speed
        .clamp(config.max_reverse_speed, config.max_forward_speed);

    // Steering authority fades with speed and flips when reversing
    let speed_ratio = (vehicle.speed.abs() / STEER_REF_SPEED).min(1.0);
    let direction = if vehicle.speed >= 0.0 { 1.0 } else { -1.0 };
    let steer_rate = (STEER_BASE_RATE - speed_ratio * STEER_RATE_FALLOFF) * direction;
    vehicle.angle += steer * steer_rate * delta;

    vehicle.position += vehicle.forward_vector() * vehicle.speed * delta;

    // Match against the neighbourhood of the last matched segment
    let mut hit = track.nearest_point(
        vehicle.position,
        SearchWindow::Around {
            reference: vehicle.segment_index,
            span: config.query_span,
        },
    );
    let total_length = track.total_length();
    let mut delta_s = unwrap_delta(hit.s - vehicle.track_s, total_length);

    // A jump no single tick can produce means the hint went stale
    let mut revalidated = false;
    if delta_s.abs() > SUSPICIOUS_JUMP_STEPS * config.max_step_distance() {
        let full = track.nearest_point(vehicle.position, SearchWindow::Full);
        if full.distance < hit.distance {
            warn!(
                "Locality query missed segment {} (matched {}), using full scan",
                full.segment_index, hit.segment_index
            );
            hit = full;
            delta_s = unwrap_delta(hit.s - vehicle.track_s, total_length);
            revalidated = true;
        }
    }

    // Off-track slowdown grows with distance past the edge
    let off_distance = hit.distance - config.half_width;
    let off_track = off_distance > 0.0;
    vehicle.track_distance = hit.distance;

    if off_track {
        let decay = (OFF_TRACK_DRAG_BASE + off_distance / OFF_TRACK_DRAG_SCALE)
            .min(OFF_TRACK_DRAG_MAX);
        vehicle.speed *= (-decay * delta).exp();
    }

    let hard_reset = off_distance > config.hard_reset_distance;
    if hard_reset {
        let snap = track.nearest_point(
            vehicle.position,
            SearchWindow::Around {
                reference: hit.segment_index,
                span: config.snap_query_span,
            },
        );
        debug!(
            "Snapping back to track at s={:.1} from {:.1} units out",
            snap.s, off_distance
        );
        vehicle.position = snap.point;
        vehicle.angle = snap.heading();
        vehicle.speed = vehicle.speed.min(RECOVERY_SPEED);
        // the vehicle now sits on the snapped point
        hit = TrackHit {
            distance: 0.0,
            ..snap
        };
        delta_s = unwrap_delta(hit.s - vehicle.track_s, total_length);
    }

    // Steering assist pulls the heading toward the track tangent
    let alignment_error = normalize_angle(hit.heading() - vehicle.angle);
    let assist_strength = if off_track {
        ASSIST_OFF_TRACK
    } else {
        ASSIST_ON_TRACK
    };
    let assist_scale = (vehicle.speed.abs() / ASSIST_REF_SPEED).min(1.0);
    vehicle.angle += alignment_error.clamp(-ASSIST_MAX_ERROR, ASSIST_MAX_ERROR)
        * assist_strength
        * assist_scale
        * delta;
    vehicle.angle = normalize_angle(vehicle.angle);

    vehicle.total_progress += delta_s;
    vehicle.track_s = hit.s;
    vehicle.segment_index = hit.segment_index;

    StepReport {
        off_track,
        hard_reset,
        revalidated,
        distance: vehicle.track_distance,
        delta_s,
    }
}
