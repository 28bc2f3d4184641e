use bevy::prelude::*;

use super::projection::CameraView;
use super::scene::Polygon;

/// A projected polygon ready to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenPolygon {
    pub points: Vec<Vec2>,
    /// Mean camera-space depth of the vertices.
    pub depth: f32,
    pub fill: Color,
    pub stroke: Option<Color>,
}

/// Polygons in paint order, farthest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub polygons: Vec<ScreenPolygon>,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Project one polygon. Any vertex behind the near plane drops the whole polygon.
pub fn project_polygon(polygon: &Polygon, view: &CameraView) -> Option<ScreenPolygon> {
    if polygon.points.len() < 3 {
        return None;
    }

    let mut points = Vec::with_capacity(polygon.points.len());
    let mut depth_sum = 0.0;
    for &point in &polygon.points {
        let screen = view.project(point)?;
        points.push(Vec2::new(screen.x, screen.y));
        depth_sum += screen.depth;
    }

    Some(ScreenPolygon {
        depth: depth_sum / points.len() as f32,
        points,
        fill: polygon.fill,
        stroke: polygon.stroke,
    })
}

/// Painter's algorithm: project everything, then sort far to near.
/// Equal depths keep their submission order.
pub fn compose<I>(polygons: I, view: &CameraView) -> DrawList
where
    I: IntoIterator<Item = Polygon>,
{
    let mut projected: Vec<ScreenPolygon> = polygons
        .into_iter()
        .filter_map(|polygon| project_polygon(&polygon, view))
        .collect();
    projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    DrawList {
        polygons: projected,
    }
}
