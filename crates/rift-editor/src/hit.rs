//! Ray hits against level geometry

use std::collections::BTreeSet;

use glam::Vec3;
use rift_core::ray::ray_sphere_intersection;
use rift_core::{Level, ObjId, Ray, SideId, Tag};

use crate::mode::SelectionMode;

/// One candidate under the cursor
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionHit {
    pub tag: Tag,
    /// Edge of the side nearest the hit. In point mode this is the nearest corner.
    pub edge: u16,
    /// World intersection point
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    pub object: ObjId,
}

// Distance, point and normal are excluded so that repeated casts through the
// same geometry compare equal despite float noise.
impl PartialEq for SelectionHit {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.edge == other.edge && self.object == other.object
    }
}

impl Eq for SelectionHit {}

impl SelectionHit {
    pub fn is_object(&self) -> bool {
        self.object.is_some()
    }
}

/// Every candidate along the ray for a mode, nearest first.
///
/// Open sides and faces seen from behind are skipped unless
/// `include_invisible` is set. Object mode tests object hit spheres; the
/// other modes test sides. In segment mode each segment appears once.
pub fn cast_ray(
    level: &Level,
    ray: &Ray,
    mode: SelectionMode,
    include_invisible: bool,
) -> Vec<SelectionHit> {
    let mut hits = match mode {
        SelectionMode::Object => object_hits(level, ray),
        _ => face_hits(level, ray, mode, include_invisible),
    };

    hits.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.tag.cmp(&b.tag))
            .then(a.object.cmp(&b.object))
    });

    if mode == SelectionMode::Segment {
        let mut seen = BTreeSet::new();
        hits.retain(|hit| seen.insert(hit.tag.segment));
    }

    hits
}

fn face_hits(
    level: &Level,
    ray: &Ray,
    mode: SelectionMode,
    include_invisible: bool,
) -> Vec<SelectionHit> {
    let mut hits = Vec::new();

    for seg_id in level.segment_ids() {
        let seg = level.get_segment(seg_id);
        for side in SideId::ALL {
            if !include_invisible && !seg.side_is_visible(side) {
                continue;
            }

            let tag = Tag::new(seg_id, side);
            let Some(face) = level.face(tag) else {
                continue;
            };
            let Some(distance) = face.intersect(ray, include_invisible) else {
                continue;
            };

            let point = ray.at(distance);
            let edge = match mode {
                SelectionMode::Point => face.closest_point(point),
                _ => face.closest_edge(point),
            };

            hits.push(SelectionHit {
                tag,
                edge: edge as u16,
                point,
                normal: face.average_normal(),
                distance,
                object: ObjId::NONE,
            });
        }
    }

    hits
}

fn object_hits(level: &Level, ray: &Ray) -> Vec<SelectionHit> {
    level
        .object_ids()
        .filter_map(|id| {
            let obj = level.try_get_object(id)?;
            let distance = ray_sphere_intersection(ray, obj.position, obj.radius)?;
            let point = ray.at(distance);
            Some(SelectionHit {
                tag: Tag::new(obj.segment, SideId::default()),
                edge: 0,
                point,
                normal: (point - obj.position).normalize_or_zero(),
                distance,
                object: id,
            })
        })
        .collect()
}
