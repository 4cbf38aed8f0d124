//! Renderable geometry of one side

use glam::Vec3;

use crate::ray::{Ray, point_segment_distance_squared};

/// Tolerance for treating two faces as lying in the same plane
pub const COPLANAR_TOLERANCE: f32 = 0.01;

/// The four corner points of a side, in side winding order.
///
/// Side normals point into the segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub points: [Vec3; 4],
}

impl std::ops::Index<usize> for Face {
    type Output = Vec3;

    fn index(&self, index: usize) -> &Vec3 {
        &self.points[index % 4]
    }
}

impl Face {
    pub fn new(points: [Vec3; 4]) -> Self {
        Self { points }
    }

    pub fn center(&self) -> Vec3 {
        (self.points[0] + self.points[1] + self.points[2] + self.points[3]) / 4.0
    }

    /// The side split along the 0-2 diagonal
    pub fn triangles(&self) -> [[Vec3; 3]; 2] {
        let [p0, p1, p2, p3] = self.points;
        [[p0, p1, p2], [p0, p2, p3]]
    }

    /// Normals of the two triangles
    pub fn triangle_normals(&self) -> [Vec3; 2] {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(c - a).normalize_or_zero())
    }

    pub fn average_normal(&self) -> Vec3 {
        let [n0, n1] = self.triangle_normals();
        (n0 + n1).normalize_or_zero()
    }

    /// Corner points of edge `i`
    pub fn edge(&self, edge: usize) -> (Vec3, Vec3) {
        (self[edge], self[edge + 1])
    }

    pub fn edge_midpoint(&self, edge: usize) -> Vec3 {
        let (a, b) = self.edge(edge);
        (a + b) * 0.5
    }

    /// Distance along the ray to the face.
    ///
    /// Faces seen from behind are skipped unless `include_back` is set.
    pub fn intersect(&self, ray: &Ray, include_back: bool) -> Option<f32> {
        if !include_back && ray.direction.dot(self.average_normal()) >= 0.0 {
            return None;
        }

        self.triangles()
            .into_iter()
            .filter_map(|tri| ray.triangle_distance(tri))
            .min_by(f32::total_cmp)
    }

    /// Index of the edge nearest to `point`
    pub fn closest_edge(&self, point: Vec3) -> usize {
        (0..4)
            .map(|i| {
                let (a, b) = self.edge(i);
                (i, point_segment_distance_squared(point, a, b))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Index of the corner nearest to `point`
    pub fn closest_point(&self, point: Vec3) -> usize {
        (0..4)
            .min_by(|a, b| {
                self.points[*a]
                    .distance_squared(point)
                    .total_cmp(&self.points[*b].distance_squared(point))
            })
            .unwrap_or(0)
    }

    /// True if both faces lie in the same plane
    pub fn is_coplanar_with(&self, other: &Face) -> bool {
        let normal = self.average_normal();
        if normal.dot(other.average_normal()) < 1.0 - COPLANAR_TOLERANCE {
            return false;
        }

        let offset = normal.dot(self.center());
        other
            .points
            .iter()
            .all(|p| (normal.dot(*p) - offset).abs() < COPLANAR_TOLERANCE * 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor() -> Face {
        // Normal points up (+Y)
        Face::new([
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
        ])
    }

    #[test]
    fn test_center_and_normal() {
        let face = floor();
        assert_relative_eq!(face.center(), Vec3::ZERO);
        assert_relative_eq!(face.average_normal(), Vec3::Y);
    }

    #[test]
    fn test_intersect_respects_facing() {
        let face = floor();
        let down = Ray::new(Vec3::new(0.1, 5.0, 0.1), Vec3::NEG_Y);
        assert_relative_eq!(face.intersect(&down, false).unwrap(), 5.0, epsilon = 1e-5);

        let up = Ray::new(Vec3::new(0.1, -5.0, 0.1), Vec3::Y);
        assert!(face.intersect(&up, false).is_none());
        assert!(face.intersect(&up, true).is_some());
    }

    #[test]
    fn test_closest_edge_and_point() {
        let face = floor();
        // Edge 0 runs along x = -1
        assert_eq!(face.closest_edge(Vec3::new(-0.9, 0.0, 0.0)), 0);
        assert_eq!(face.closest_point(Vec3::new(0.9, 0.0, -0.9)), 3);
    }

    #[test]
    fn test_coplanar() {
        let a = floor();
        let mut b = floor();
        for p in &mut b.points {
            p.x += 2.0;
        }
        assert!(a.is_coplanar_with(&b));

        for p in &mut b.points {
            p.y += 1.0;
        }
        assert!(!a.is_coplanar_with(&b));
    }
}
