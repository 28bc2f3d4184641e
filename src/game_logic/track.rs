use crate::game_logic::{CENTERLINE_ORIGIN, CENTERLINE_SCALE};
use bevy::prelude::*;
use thiserror::Error;

/// Raw layout of the default circuit, in editor coordinates.
const DEFAULT_LAYOUT: [(f32, f32); 9] = [
    (184.0, 156.0),
    (334.0, 98.0),
    (520.0, 108.0),
    (740.0, 178.0),
    (818.0, 302.0),
    (702.0, 430.0),
    (482.0, 474.0),
    (260.0, 424.0),
    (134.0, 300.0),
];

#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("track centerline needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("track centerline point {index} is not finite")]
    NonFinitePoint { index: usize },

    #[error("track centerline has zero total length (all points coincide)")]
    ZeroLength,
}

/// One straight piece of the closed centerline.
///
/// Ground-plane vectors store world `(x, z)` in their `(x, y)` lanes.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub p0: Vec2,
    pub p1: Vec2,
    pub delta: Vec2,
    pub length: f32,
    /// Unit direction of travel. Falls back to +x for a zero-length segment.
    pub tangent: Vec2,
    /// Left of travel.
    pub normal: Vec2,
    pub start_s: f32,
    pub end_s: f32,
}

impl Segment {
    fn new(p0: Vec2, p1: Vec2, start_s: f32) -> Self {
        let delta = p1 - p0;
        let length = delta.length();
        let tangent = if length > 0.0 {
            delta / length
        } else {
            Vec2::X
        };

        Self {
            p0,
            p1,
            delta,
            length,
            tangent,
            normal: Vec2::new(-tangent.y, tangent.x),
            start_s,
            end_s: start_s + length,
        }
    }

    /// Heading angle of the tangent, radians.
    pub fn heading(&self) -> f32 {
        self.tangent.y.atan2(self.tangent.x)
    }

    /// Point at parameter `t` in `[0, 1]` along the segment.
    pub fn lerp(&self, t: f32) -> Vec2 {
        self.p0 + self.delta * t
    }
}

/// A position on the track with its travel heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f32,
    pub segment_index: usize,
}

/// Closed loop of segments with arc-length parameterization.
///
/// Built once and never edited; a different layout means a new `Track`.
#[derive(Clone, Debug)]
pub struct Track {
    points: Vec<Vec2>,
    segments: Vec<Segment>,
    total_length: f32,
}

impl Track {
    pub fn from_centerline(points: &[Vec2]) -> Result<Self, TrackError> {
        if points.len() < 3 {
            return Err(TrackError::TooFewPoints {
                count: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(TrackError::NonFinitePoint { index });
        }

        let mut segments = Vec::with_capacity(points.len());
        let mut total_length = 0.0;
        for (i, p0) in points.iter().enumerate() {
            let p1 = points[(i + 1) % points.len()];
            let segment = Segment::new(*p0, p1, total_length);
            total_length += segment.length;
            segments.push(segment);
        }

        if total_length <= 0.0 {
            return Err(TrackError::ZeroLength);
        }

        Ok(Self {
            points: points.to_vec(),
            segments,
            total_length,
        })
    }

    /// The built-in circuit.
    pub fn default_circuit() -> Result<Self, TrackError> {
        Self::from_centerline(&default_centerline())
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[index % self.segments.len()]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Length of the shortest segment that is not degenerate.
    pub fn shortest_segment(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| s.length)
            .filter(|len| *len > 0.0)
            .fold(f32::INFINITY, f32::min)
    }

    /// Map any arc-length into `[0, total_length)`.
    pub fn wrap_s(&self, s: f32) -> f32 {
        let wrapped = s.rem_euclid(self.total_length);
        // rem_euclid can round up to the modulus for tiny negative inputs
        if wrapped >= self.total_length {
            0.0
        } else {
            wrapped
        }
    }

    /// Position and heading at arc-length `s`.
    pub fn pose_at(&self, s: f32) -> Pose {
        let wrapped = self.wrap_s(s);
        for (i, segment) in self.segments.iter().enumerate() {
            if wrapped >= segment.start_s && wrapped <= segment.end_s {
                let t = if segment.length > 0.0 {
                    (wrapped - segment.start_s) / segment.length
                } else {
                    0.0
                };
                return Pose {
                    position: segment.lerp(t),
                    angle: segment.heading(),
                    segment_index: i,
                };
            }
        }

        let first = &self.segments[0];
        Pose {
            position: first.p0,
            angle: first.heading(),
            segment_index: 0,
        }
    }
}

/// The default circuit centered on the world origin.
pub fn default_centerline() -> Vec<Vec2> {
    let (ox, oz) = CENTERLINE_ORIGIN;
    DEFAULT_LAYOUT
        .iter()
        .map(|(x, z)| Vec2::new((x - ox) * CENTERLINE_SCALE, (z - oz) * CENTERLINE_SCALE))
        .collect()
}
