//! Ray intersection tests

use glam::Vec3;

const EPSILON: f32 = 1e-6;

/// A ray with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the triangle `[a, b, c]`, hit from either side.
    ///
    /// Intersects the triangle's plane, then keeps the point if it lies on
    /// the inner side of all three edges.
    pub fn triangle_distance(&self, [a, b, c]: [Vec3; 3]) -> Option<f32> {
        let normal = (b - a).cross(c - a);
        let denom = normal.dot(self.direction);
        if denom.abs() < EPSILON * normal.length() {
            return None;
        }

        let t = normal.dot(a - self.origin) / denom;
        if t <= EPSILON {
            return None;
        }

        let hit = self.at(t);
        let inside = [(a, b), (b, c), (c, a)]
            .iter()
            .all(|&(from, to)| (to - from).cross(hit - from).dot(normal) >= 0.0);
        inside.then_some(t)
    }
}

/// Ray-sphere intersection
/// Returns the distance to the nearest point in front of the ray origin
pub fn ray_sphere_intersection(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    if radius <= 0.0 {
        return None;
    }

    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    let far = -b + sqrt_d;

    if near > EPSILON {
        Some(near)
    } else if far > EPSILON {
        // Origin is inside the sphere
        Some(far)
    } else {
        None
    }
}

/// Squared distance from a point to a line segment
pub fn point_segment_distance_squared(point: Vec3, a: Vec3, b: Vec3) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < EPSILON {
        return point.distance_squared(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance_squared(a + ab * t)
}
