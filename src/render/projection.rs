use bevy::prelude::*;

use crate::camera::CameraState;
use crate::game_logic::{NEAR_PLANE, TOP_DOWN_SCALE, ViewMode};

/// A projected point in logical screen pixels, y growing downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// Pinhole camera built from a look-at pose.
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveView {
    eye: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    focal: f32,
    center: Vec2,
}

impl PerspectiveView {
    pub fn look_at(camera: &CameraState, fov_deg: f32, viewport: Vec2) -> Self {
        let forward = (camera.target - camera.eye).normalize_or(Vec3::X);

        // looking straight up or down leaves cross(forward, up) degenerate
        let right = forward.cross(Vec3::Y);
        let right = if right.length() < 1e-6 {
            Vec3::X
        } else {
            right.normalize()
        };
        let up = right.cross(forward).normalize_or(Vec3::Y);

        let focal = viewport.y / (2.0 * (fov_deg.to_radians() / 2.0).tan());

        Self {
            eye: camera.eye,
            right,
            up,
            forward,
            focal,
            center: viewport / 2.0,
        }
    }

    pub fn focal_length(&self) -> f32 {
        self.focal
    }

    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        let rel = point - self.eye;
        let x = rel.dot(self.right);
        let y = rel.dot(self.up);
        let z = rel.dot(self.forward);
        if z <= NEAR_PLANE {
            return None;
        }

        Some(ScreenPoint {
            x: self.center.x + x / z * self.focal,
            y: self.center.y - y / z * self.focal,
            depth: z,
        })
    }
}

/// Orthographic view looking straight down. World x maps to screen x and
/// world z to screen y, centred on the eye.
#[derive(Clone, Copy, Debug)]
pub struct TopDownView {
    eye: Vec3,
    scale: f32,
    center: Vec2,
}

impl TopDownView {
    pub fn new(camera: &CameraState, scale: f32, viewport: Vec2) -> Self {
        Self {
            eye: camera.eye,
            scale,
            center: viewport / 2.0,
        }
    }

    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        let depth = self.eye.y - point.y;
        if depth <= NEAR_PLANE {
            return None;
        }

        Some(ScreenPoint {
            x: self.center.x + (point.x - self.eye.x) * self.scale,
            y: self.center.y + (point.z - self.eye.z) * self.scale,
            depth,
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub enum CameraView {
    Perspective(PerspectiveView),
    TopDown(TopDownView),
}

impl CameraView {
    pub fn for_mode(mode: ViewMode, camera: &CameraState, fov_deg: f32, viewport: Vec2) -> Self {
        match mode {
            ViewMode::Chase => {
                CameraView::Perspective(PerspectiveView::look_at(camera, fov_deg, viewport))
            }
            ViewMode::TopDown => {
                CameraView::TopDown(TopDownView::new(camera, TOP_DOWN_SCALE, viewport))
            }
        }
    }

    /// Screen position and depth, or `None` when the point is at or behind the near plane.
    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        match self {
            CameraView::Perspective(view) => view.project(point),
            CameraView::TopDown(view) => view.project(point),
        }
    }
}
