use bevy::asset::RenderAssetUsages;
use bevy::color::ColorToComponents;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::view::NoFrustumCulling;
use bevy::sprite::AlphaMode2d;

use super::compositor::DrawList;
use super::scene::SKY_GRADIENT;
use crate::game_logic::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::session::RaceSession;

const STROKE_WIDTH: f32 = 1.0;

/// Handle to the single mesh the composited frame is written into.
#[derive(Resource)]
pub struct FrameMesh(pub Handle<Mesh>);

/// Accumulates coloured triangles in screen space.
#[derive(Default)]
struct FrameBuilder {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<u32>,
}

/// Logical screen pixels (origin top-left, y down) to 2D world units
/// (origin centre, y up).
pub fn screen_to_world(point: Vec2) -> Vec3 {
    Vec3::new(
        point.x - VIEWPORT_WIDTH / 2.0,
        VIEWPORT_HEIGHT / 2.0 - point.y,
        0.0,
    )
}

impl FrameBuilder {
    fn push_vertex(&mut self, point: Vec2, color: Color) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(screen_to_world(point).to_array());
        self.colors.push(color.to_linear().to_f32_array());
        index
    }

    /// Fan triangulation, fine for the convex polygons the scene emits.
    fn fill(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let base = self.positions.len() as u32;
        for &point in points {
            self.push_vertex(point, color);
        }
        for i in 1..points.len() as u32 - 1 {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    fn stroke(&mut self, points: &[Vec2], color: Color) {
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            let Some(dir) = (b - a).try_normalize() else {
                continue;
            };
            let side = dir.perp() * (STROKE_WIDTH / 2.0);
            self.fill(&[a + side, a - side, b - side, b + side], color);
        }
    }

    fn sky(&mut self) {
        let size = Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
        for band in SKY_GRADIENT.windows(2) {
            let (top, top_color) = band[0];
            let (bottom, bottom_color) = band[1];
            let base = self.positions.len() as u32;
            self.push_vertex(Vec2::new(0.0, top * size.y), top_color);
            self.push_vertex(Vec2::new(size.x, top * size.y), top_color);
            self.push_vertex(Vec2::new(size.x, bottom * size.y), bottom_color);
            self.push_vertex(Vec2::new(0.0, bottom * size.y), bottom_color);
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    fn into_mesh(self) -> Mesh {
        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, self.colors)
            .with_inserted_indices(Indices::U32(self.indices))
    }
}

/// Sky backdrop followed by every polygon in paint order.
pub fn build_frame_mesh(draw_list: &DrawList) -> Mesh {
    let mut builder = FrameBuilder::default();
    builder.sky();
    for polygon in &draw_list.polygons {
        builder.fill(&polygon.points, polygon.fill);
        if let Some(stroke) = polygon.stroke {
            builder.stroke(&polygon.points, stroke);
        }
    }
    builder.into_mesh()
}

pub fn setup_frame_mesh(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let handle = meshes.add(build_frame_mesh(&DrawList::default()));
    let material = materials.add(ColorMaterial {
        color: Color::WHITE,
        alpha_mode: AlphaMode2d::Blend,
        ..default()
    });

    // the mesh is rewritten every frame so its bounds are never current
    commands.spawn((
        Mesh2d(handle.clone()),
        MeshMaterial2d(material),
        Transform::default(),
        NoFrustumCulling,
    ));
    commands.insert_resource(FrameMesh(handle));
}

/// Composite the session's current state into the frame mesh.
pub fn upload_frame(
    session: Res<RaceSession>,
    frame: Res<FrameMesh>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(mesh) = meshes.get_mut(&frame.0) else {
        return;
    };
    *mesh = build_frame_mesh(&session.render());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::compositor::ScreenPolygon;

    fn counts(mesh: &Mesh) -> (usize, usize) {
        let vertices = mesh.attribute(Mesh::ATTRIBUTE_POSITION).unwrap().len();
        let indices = mesh.indices().unwrap().len();
        (vertices, indices)
    }

    #[test]
    fn test_screen_to_world_centres_origin() {
        assert_eq!(screen_to_world(Vec2::new(480.0, 270.0)), Vec3::ZERO);
        assert_eq!(screen_to_world(Vec2::ZERO), Vec3::new(-480.0, 270.0, 0.0));
        assert_eq!(screen_to_world(Vec2::new(960.0, 540.0)), Vec3::new(480.0, -270.0, 0.0));
    }

    #[test]
    fn test_empty_frame_still_draws_sky() {
        let mesh = build_frame_mesh(&DrawList::default());
        assert_eq!(counts(&mesh), (12, 18));
    }

    #[test]
    fn test_polygons_fan_and_strokes_add_quads() {
        let square = vec![
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 10.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(10.0, 20.0),
        ];
        let list = DrawList {
            polygons: vec![
                ScreenPolygon {
                    points: square.clone(),
                    depth: 5.0,
                    fill: Color::WHITE,
                    stroke: None,
                },
                ScreenPolygon {
                    points: square,
                    depth: 4.0,
                    fill: Color::BLACK,
                    stroke: Some(Color::WHITE),
                },
            ],
        };
        let mesh = build_frame_mesh(&list);
        // sky 12/18, two fills 4/6 each, four stroke quads 4/6 each
        assert_eq!(counts(&mesh), (12 + 8 + 16, 18 + 12 + 24));
    }
}
