//! Viewport camera used for picking and screen-space projection

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::ray::Ray;

/// Gizmo size relative to its distance from the camera
const GIZMO_SCALE_FACTOR: f32 = 0.1;

/// Perspective camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -60.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 60f32.to_radians(),
            near: 0.1,
            far: 5000.0,
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, viewport: Vec2) -> Self {
        Self {
            position,
            target,
            viewport,
            ..Default::default()
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Project a world point to pixel coordinates (origin top-left).
    /// Returns None for points behind the camera.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= self.near * 0.5 {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Ray through a pixel
    pub fn screen_to_ray(&self, x: f32, y: f32) -> Ray {
        let ndc_x = (2.0 * x / self.viewport.x) - 1.0;
        let ndc_y = 1.0 - (2.0 * y / self.viewport.y);

        let inv = self.view_projection().inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        Ray::new(self.position, far - near)
    }

    /// Right and up vectors of a plane at `position` facing the camera
    pub fn billboard(&self, position: Vec3) -> (Vec3, Vec3) {
        let facing = (self.position - position).normalize_or_zero();
        let mut right = self.up.cross(facing).normalize_or_zero();
        if right == Vec3::ZERO {
            right = Vec3::X;
        }
        let up = facing.cross(right).normalize_or_zero();
        (right, up)
    }

    /// World-space size that keeps a gizmo at a constant screen size
    pub fn gizmo_scale(&self, position: Vec3) -> f32 {
        self.position.distance(position) * GIZMO_SCALE_FACTOR
    }
}
