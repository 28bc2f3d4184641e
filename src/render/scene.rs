use bevy::prelude::*;

use crate::game_logic::{Track, VehicleState};

/// A flat world-space polygon waiting to be projected.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: Vec<Vec3>,
    pub fill: Color,
    pub stroke: Option<Color>,
}

impl Polygon {
    pub fn filled(points: Vec<Vec3>, fill: Color) -> Self {
        Self {
            points,
            fill,
            stroke: None,
        }
    }

    pub fn outlined(points: Vec<Vec3>, fill: Color, stroke: Color) -> Self {
        Self {
            points,
            fill,
            stroke: Some(stroke),
        }
    }
}

/// Vertical sky gradient stops, as (fraction of screen height, colour).
pub const SKY_GRADIENT: [(f32, Color); 4] = [
    (0.0, Color::srgb(0.431, 0.635, 0.792)),
    (0.58, Color::srgb(0.663, 0.776, 0.863)),
    (0.581, Color::srgb(0.537, 0.698, 0.545)),
    (1.0, Color::srgb(0.302, 0.490, 0.349)),
];

const ASPHALT_DARK: Color = Color::srgb(0.192, 0.220, 0.255);
const ASPHALT_LIGHT: Color = Color::srgb(0.216, 0.247, 0.282);
const EDGE_TRIM: Color = Color::srgb(0.592, 0.651, 0.702);
const DASH: Color = Color::srgb(0.906, 0.922, 0.937);
const FINISH_LIGHT: Color = Color::srgb(0.957, 0.965, 0.973);
const FINISH_DARK: Color = Color::srgb(0.078, 0.098, 0.122);
const CAR_BODY: Color = Color::srgb(1.0, 0.373, 0.239);
const CAR_BODY_OFF_TRACK: Color = Color::srgb(0.925, 0.702, 0.345);
const CAR_CABIN: Color = Color::srgb(0.957, 0.969, 0.984);
const CAR_TRIM: Color = Color::srgb(0.133, 0.169, 0.208);
const CAR_SHADOW: Color = Color::srgba(0.0, 0.0, 0.0, 0.28);

const EDGE_TRIM_WIDTH: f32 = 7.0;
const EDGE_TRIM_LIFT: f32 = 2.0;
const DASH_LENGTH: f32 = 32.0;
const DASH_GAP: f32 = 24.0;
const DASH_HALF_WIDTH: f32 = 2.4;
const DASH_MIN_LENGTH: f32 = 8.0;
const FINISH_STRIPES: usize = 12;
const FINISH_DEPTH: f32 = 8.0;

fn ground_point(p: Vec2, y: f32) -> Vec3 {
    Vec3::new(p.x, y, p.y)
}

/// Grass planes under and around the circuit.
pub fn ground() -> impl Iterator<Item = Polygon> {
    [
        Polygon::filled(
            vec![
                Vec3::new(-1600.0, -2.0, -220.0),
                Vec3::new(1600.0, -2.0, -220.0),
                Vec3::new(2100.0, -2.0, 1900.0),
                Vec3::new(-2100.0, -2.0, 1900.0),
            ],
            Color::srgb(0.361, 0.541, 0.388),
        ),
        Polygon::filled(
            vec![
                Vec3::new(-2000.0, -1.8, 420.0),
                Vec3::new(1900.0, -1.8, 420.0),
                Vec3::new(2350.0, -1.8, 2100.0),
                Vec3::new(-2500.0, -1.8, 2100.0),
            ],
            Color::srgb(0.482, 0.631, 0.490),
        ),
    ]
    .into_iter()
}

/// Backdrop ridge line.
pub fn mountains() -> impl Iterator<Item = Polygon> {
    [
        (
            [(-700.0, 0.0, -560.0), (-180.0, 152.0, -760.0), (180.0, 0.0, -610.0)],
            Color::srgb(0.553, 0.659, 0.733),
        ),
        (
            [(-150.0, 0.0, -640.0), (210.0, 116.0, -900.0), (510.0, 0.0, -680.0)],
            Color::srgb(0.463, 0.592, 0.678),
        ),
        (
            [(290.0, 0.0, -560.0), (720.0, 138.0, -820.0), (980.0, 0.0, -520.0)],
            Color::srgb(0.384, 0.533, 0.631),
        ),
        (
            [(-980.0, 0.0, -320.0), (-640.0, 104.0, -580.0), (-360.0, 0.0, -330.0)],
            Color::srgb(0.584, 0.690, 0.753),
        ),
    ]
    .into_iter()
    .map(|(corners, fill)| {
        Polygon::filled(
            corners.iter().map(|&(x, y, z)| Vec3::new(x, y, z)).collect(),
            fill,
        )
    })
}

/// One asphalt quad per segment, shaded alternately.
pub fn track_surface(track: &Track, half_width: f32) -> impl Iterator<Item = Polygon> + '_ {
    track.segments().iter().enumerate().map(move |(i, seg)| {
        let offset = seg.normal * half_width;
        let fill = if i % 2 == 0 { ASPHALT_DARK } else { ASPHALT_LIGHT };
        Polygon::outlined(
            vec![
                ground_point(seg.p0 + offset, 0.0),
                ground_point(seg.p0 - offset, 0.0),
                ground_point(seg.p1 - offset, 0.0),
                ground_point(seg.p1 + offset, 0.0),
            ],
            fill,
            fill,
        )
    })
}

/// Raised kerb strips along the inside of both track edges.
pub fn edge_trims(track: &Track, half_width: f32) -> impl Iterator<Item = Polygon> + '_ {
    track.segments().iter().flat_map(move |seg| {
        [1.0, -1.0].map(|side: f32| {
            let inner = seg.normal * side * (half_width - EDGE_TRIM_WIDTH);
            let outer = seg.normal * side * half_width;
            Polygon::filled(
                vec![
                    ground_point(seg.p0 + inner, EDGE_TRIM_LIFT),
                    ground_point(seg.p0 + outer, EDGE_TRIM_LIFT),
                    ground_point(seg.p1 + outer, EDGE_TRIM_LIFT),
                    ground_point(seg.p1 + inner, EDGE_TRIM_LIFT),
                ],
                EDGE_TRIM,
            )
        })
    })
}

/// Centre line dashes, restarted at each segment.
pub fn lane_dashes(track: &Track) -> impl Iterator<Item = Polygon> + '_ {
    track.segments().iter().flat_map(|seg| {
        let side = seg.normal * DASH_HALF_WIDTH;
        let count = (seg.length / (DASH_LENGTH + DASH_GAP)).ceil() as usize;
        (0..count).filter_map(move |k| {
            let start = k as f32 * (DASH_LENGTH + DASH_GAP);
            let end = (start + DASH_LENGTH).min(seg.length);
            if end - start < DASH_MIN_LENGTH {
                return None;
            }
            let a = seg.p0 + seg.tangent * start;
            let b = seg.p0 + seg.tangent * end;
            Some(Polygon::filled(
                vec![
                    ground_point(a + side, 0.3),
                    ground_point(a - side, 0.3),
                    ground_point(b - side, 0.3),
                    ground_point(b + side, 0.3),
                ],
                DASH,
            ))
        })
    })
}

/// Chequered stripes across the track at the start position.
pub fn finish_line(
    track: &Track,
    start_s: f32,
    half_width: f32,
) -> impl Iterator<Item = Polygon> + use<> {
    let pose = track.pose_at(start_s);
    let seg = track.segment(pose.segment_index).clone();
    let span = half_width - 4.0;
    let stripe = 2.0 * span / FINISH_STRIPES as f32;
    let depth = seg.tangent * FINISH_DEPTH;

    (0..FINISH_STRIPES).map(move |i| {
        let a = pose.position + seg.normal * (-span + stripe * i as f32);
        let b = a + seg.normal * stripe;
        let fill = if i % 2 == 0 { FINISH_LIGHT } else { FINISH_DARK };
        Polygon::filled(
            vec![
                ground_point(a - depth, 0.35),
                ground_point(b - depth, 0.35),
                ground_point(b + depth, 0.35),
                ground_point(a + depth, 0.35),
            ],
            fill,
        )
    })
}

/// Low-poly car body in its own frame: x forward, y up, z right.
pub fn vehicle_body(
    vehicle: &VehicleState,
    off_track: bool,
) -> impl Iterator<Item = Polygon> + use<> {
    let forward = vehicle.forward_vector();
    let f = Vec3::new(forward.x, 0.0, forward.y);
    let r = Vec3::new(-f.z, 0.0, f.x);
    let origin = Vec3::new(vehicle.position.x, vehicle.height + 1.0, vehicle.position.y);
    let place = move |local: &[(f32, f32, f32)]| -> Vec<Vec3> {
        local
            .iter()
            .map(|&(lx, ly, lz)| origin + f * lx + Vec3::Y * ly + r * lz)
            .collect()
    };

    let body = if off_track { CAR_BODY_OFF_TRACK } else { CAR_BODY };

    vec![
        Polygon::filled(
            place(&[
                (16.0, -0.8, 7.0),
                (16.0, -0.8, -7.0),
                (-16.0, -0.8, -8.0),
                (-16.0, -0.8, 8.0),
            ]),
            CAR_SHADOW,
        ),
        Polygon::filled(place(&[(18.0, 1.2, 0.0), (-14.0, 1.2, -9.0), (-14.0, 1.2, 9.0)]), body),
        Polygon::filled(
            place(&[(18.0, 4.0, 0.0), (18.0, 1.2, 0.0), (-14.0, 1.2, 9.0), (-11.0, 3.5, 8.0)]),
            body,
        ),
        Polygon::filled(
            place(&[(18.0, 4.0, 0.0), (-11.0, 3.5, -8.0), (-14.0, 1.2, -9.0), (18.0, 1.2, 0.0)]),
            body,
        ),
        Polygon::filled(place(&[(18.0, 4.0, 0.0), (-11.0, 3.5, 8.0), (-11.0, 3.5, -8.0)]), body),
        Polygon::filled(place(&[(8.0, 6.3, 0.0), (-3.0, 5.8, 4.5), (-3.0, 5.8, -4.5)]), CAR_CABIN),
        Polygon::filled(
            place(&[(-12.0, 2.4, 7.8), (-15.0, 2.4, 7.8), (-15.0, 0.8, 7.8), (-12.0, 0.8, 7.8)]),
            CAR_TRIM,
        ),
        Polygon::filled(
            place(&[
                (-12.0, 2.4, -7.8),
                (-15.0, 2.4, -7.8),
                (-15.0, 0.8, -7.8),
                (-12.0, 0.8, -7.8),
            ]),
            CAR_TRIM,
        ),
    ]
    .into_iter()
}

/// Every world polygon for one frame, unordered.
pub fn scene<'a>(
    track: &'a Track,
    vehicle: &VehicleState,
    off_track: bool,
    start_s: f32,
    half_width: f32,
) -> impl Iterator<Item = Polygon> + use<'a> {
    ground()
        .chain(mountains())
        .chain(track_surface(track, half_width))
        .chain(edge_trims(track, half_width))
        .chain(lane_dashes(track))
        .chain(finish_line(track, start_s, half_width))
        .chain(vehicle_body(vehicle, off_track))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Track {
        Track::default_circuit().unwrap()
    }

    #[test]
    fn test_track_surface_covers_every_segment() {
        let track = track();
        let quads: Vec<Polygon> = track_surface(&track, 56.0).collect();
        assert_eq!(quads.len(), track.len());
        for (quad, seg) in quads.iter().zip(track.segments()) {
            assert_eq!(quad.points.len(), 4);
            let width = quad.points[0].distance(quad.points[1]);
            assert!((width - 112.0).abs() < 1e-2);
            let mid = (quad.points[0] + quad.points[1]) / 2.0;
            assert!(Vec2::new(mid.x, mid.z).distance(seg.p0) < 1e-2);
        }
        assert_ne!(quads[0].fill, quads[1].fill);
    }

    #[test]
    fn test_edge_trims_sit_inside_the_surface() {
        let track = track();
        let seg = track.segment(0).clone();
        for trim in edge_trims(&track, 56.0).take(2) {
            for point in &trim.points {
                let lateral = (Vec2::new(point.x, point.z) - seg.p0).dot(seg.normal).abs();
                assert!(lateral >= 49.0 - 1e-2 && lateral <= 56.0 + 1e-2);
                assert_eq!(point.y, EDGE_TRIM_LIFT);
            }
        }
        assert_eq!(edge_trims(&track, 56.0).count(), 2 * track.len());
    }

    #[test]
    fn test_lane_dashes_stay_within_their_segment() {
        let track = Track::from_centerline(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
        ])
        .unwrap();
        let first: Vec<Polygon> = lane_dashes(&track)
            .take_while(|dash| dash.points.iter().all(|p| p.z.abs() <= DASH_HALF_WIDTH + 1e-3))
            .collect();
        // 0..32 and 56..88; the 112 start is past the end
        assert_eq!(first.len(), 2);
        assert!(first.iter().flat_map(|d| &d.points).all(|p| p.x <= 100.0 + 1e-3));
    }

    #[test]
    fn test_short_dash_remainders_are_skipped() {
        // 60 units: a full dash then a 4 unit stub
        let track = Track::from_centerline(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(60.0, 0.0),
            Vec2::new(60.0, 500.0),
        ])
        .unwrap();
        let on_first = lane_dashes(&track)
            .filter(|dash| dash.points.iter().all(|p| p.z.abs() <= DASH_HALF_WIDTH + 1e-3))
            .count();
        assert_eq!(on_first, 1);
    }

    #[test]
    fn test_finish_line_alternates_across_track() {
        let track = track();
        let stripes: Vec<Polygon> = finish_line(&track, 24.0, 56.0).collect();
        assert_eq!(stripes.len(), FINISH_STRIPES);
        assert_eq!(stripes[0].fill, FINISH_LIGHT);
        assert_eq!(stripes[1].fill, FINISH_DARK);
        let start = track.pose_at(24.0).position;
        let centre: Vec3 = stripes.iter().flat_map(|s| s.points.iter().copied()).sum::<Vec3>()
            / (FINISH_STRIPES * 4) as f32;
        assert!(Vec2::new(centre.x, centre.z).distance(start) < 1e-2);
    }

    #[test]
    fn test_vehicle_body_follows_heading_and_state() {
        let track = track();
        let vehicle = VehicleState::at_start(&track, 24.0);
        let parts: Vec<Polygon> = vehicle_body(&vehicle, false).collect();
        assert_eq!(parts[0].fill, CAR_SHADOW);
        assert_eq!(parts[1].fill, CAR_BODY);

        // the nose vertex sits 18 units ahead of the car
        let nose = parts[1].points[0];
        let expected = vehicle.position + vehicle.forward_vector() * 18.0;
        assert!(Vec2::new(nose.x, nose.z).distance(expected) < 1e-2);

        let off: Vec<Polygon> = vehicle_body(&vehicle, true).collect();
        assert_eq!(off[1].fill, CAR_BODY_OFF_TRACK);
    }

    #[test]
    fn test_scene_contains_every_layer() {
        let track = track();
        let vehicle = VehicleState::at_start(&track, 24.0);
        let count = scene(&track, &vehicle, false, 24.0, 56.0).count();
        assert!(count > 2 + 4 + 3 * track.len() + FINISH_STRIPES + 8);
    }
}
