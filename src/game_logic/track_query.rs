use crate::game_logic::Track;
use bevy::prelude::*;

/// Which segments a nearest-point query scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchWindow {
    /// Every segment, O(n). Used on reset or when there is no hint.
    Full,
    /// Segments within `±span` of `reference`, wrapping around the loop.
    ///
    /// Only valid while the vehicle cannot cross more than `span`
    /// segments in one tick.
    Around { reference: usize, span: usize },
}

/// Closest point on the centerline to a query position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackHit {
    pub point: Vec2,
    pub distance: f32,
    /// Arc-length of `point`, in `[0, total_length)`.
    pub s: f32,
    pub tangent: Vec2,
    pub segment_index: usize,
}

impl TrackHit {
    pub fn heading(&self) -> f32 {
        self.tangent.y.atan2(self.tangent.x)
    }
}

impl SearchWindow {
    /// Candidate indices in scan order. Ties go to the earliest candidate.
    fn candidates(self, count: usize) -> Box<dyn Iterator<Item = usize>> {
        match self {
            SearchWindow::Around { reference, span }
                if span.saturating_mul(2).saturating_add(1) < count =>
            {
                let start = (reference % count + count - span) % count;
                Box::new((0..=2 * span).map(move |offset| (start + offset) % count))
            }
            _ => Box::new(0..count),
        }
    }
}

impl Track {
    /// Nearest point on the centerline polyline to `position`.
    pub fn nearest_point(&self, position: Vec2, window: SearchWindow) -> TrackHit {
        let segments = self.segments();
        let mut best: Option<TrackHit> = None;

        for i in window.candidates(segments.len()) {
            let segment = &segments[i];
            let length_sq = segment.length * segment.length;
            let t = if length_sq > 0.0 {
                ((position - segment.p0).dot(segment.delta) / length_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let point = segment.lerp(t);
            let distance = position.distance(point);

            if best.is_none_or(|hit| distance < hit.distance) {
                best = Some(TrackHit {
                    point,
                    distance,
                    s: self.wrap_s(segment.start_s + segment.length * t),
                    tangent: segment.tangent,
                    segment_index: i,
                });
            }
        }

        // the track always has at least three segments
        best.unwrap_or_else(|| {
            let first = &segments[0];
            TrackHit {
                point: first.p0,
                distance: position.distance(first.p0),
                s: 0.0,
                tangent: first.tangent,
                segment_index: 0,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f32) -> Track {
        Track::from_centerline(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(size, 0.0),
            Vec2::new(size, size),
            Vec2::new(0.0, size),
        ])
        .unwrap()
    }

    #[test]
    fn test_midpoint_is_its_own_nearest_point() {
        let track = Track::default_circuit().unwrap();
        for (i, segment) in track.segments().iter().enumerate() {
            let mid = segment.lerp(0.5);
            let hit = track.nearest_point(mid, SearchWindow::Full);
            assert!(hit.distance < 1e-3, "segment {i} distance {}", hit.distance);
            assert!((hit.point - mid).length() < 1e-3);
            assert_eq!(hit.segment_index, i);
            assert!((hit.s - (segment.start_s + segment.length * 0.5)).abs() < 1e-2);
        }
    }

    #[test]
    fn test_perpendicular_distance() {
        let track = square(100.0);
        let hit = track.nearest_point(Vec2::new(40.0, -30.0), SearchWindow::Full);
        assert_eq!(hit.segment_index, 0);
        assert!((hit.distance - 30.0).abs() < 1e-4);
        assert!((hit.s - 40.0).abs() < 1e-4);
        assert_eq!(hit.tangent, Vec2::X);
    }

    #[test]
    fn test_clamps_to_segment_endpoint() {
        let track = square(100.0);
        let hit = track.nearest_point(Vec2::new(-30.0, -40.0), SearchWindow::Full);
        assert_eq!(hit.point, Vec2::ZERO);
        assert!((hit.distance - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let track = square(100.0);
        // the corner at (100, 0) is shared by segments 0 and 1
        let hit = track.nearest_point(Vec2::new(130.0, -40.0), SearchWindow::Full);
        assert_eq!(hit.segment_index, 0);
        // segment 0 ends at s = 100, which wraps to itself
        assert!((hit.s - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_arc_length_always_wrapped() {
        let track = Track::default_circuit().unwrap();
        let total = track.total_length();
        for i in 0..64 {
            let angle = i as f32 / 64.0 * std::f32::consts::TAU;
            let probe = Vec2::new(angle.cos(), angle.sin()) * (200.0 + i as f32 * 9.0);
            let hit = track.nearest_point(probe, SearchWindow::Full);
            assert!(hit.s >= 0.0 && hit.s < total, "s {} out of range", hit.s);
        }
    }

    #[test]
    fn test_closing_vertex_wraps_to_zero() {
        let track = square(100.0);
        let hit = track.nearest_point(
            Vec2::new(-10.0, -10.0),
            SearchWindow::Around {
                reference: 3,
                span: 1,
            },
        );
        // segment 3 is scanned before segment 0 and ends at s = total_length
        assert_eq!(hit.segment_index, 3);
        assert_eq!(hit.s, 0.0);
    }

    #[test]
    fn test_window_only_scans_neighbours() {
        let track = Track::default_circuit().unwrap();
        let far_segment = &track.segments()[5];
        let probe = far_segment.lerp(0.5);

        let local = track.nearest_point(
            probe,
            SearchWindow::Around {
                reference: 0,
                span: 2,
            },
        );
        assert!([7, 8, 0, 1, 2].contains(&local.segment_index));
        assert!(local.distance > 1.0);

        let full = track.nearest_point(probe, SearchWindow::Full);
        assert_eq!(full.segment_index, 5);
    }

    #[test]
    fn test_window_wraps_backwards_from_zero() {
        let track = square(100.0);
        let hit = track.nearest_point(
            Vec2::new(-10.0, 50.0),
            SearchWindow::Around {
                reference: 0,
                span: 1,
            },
        );
        assert_eq!(hit.segment_index, 3);
    }

    #[test]
    fn test_wide_window_degenerates_to_full_scan() {
        let track = square(100.0);
        let window = SearchWindow::Around {
            reference: 2,
            span: 10,
        };
        let indices: Vec<usize> = window.candidates(track.len()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_huge_span_degenerates_to_full_scan() {
        let track = square(100.0);
        let window = SearchWindow::Around {
            reference: 1,
            span: usize::MAX,
        };
        let indices: Vec<usize> = window.candidates(track.len()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);

        let hit = track.nearest_point(Vec2::new(50.0, -5.0), window);
        assert_eq!(hit.segment_index, 0);
    }
}
