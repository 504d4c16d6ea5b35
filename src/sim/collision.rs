//! Collision detection and response against straight barriers
//!
//! The tricky part of Ring Chase: finding where a circular collider crosses a
//! barrier line and pushing it back out along the line's normal. Oblique
//! barriers go through the slope-intercept form and a Cramer solve for the
//! foot of the perpendicular; horizontal and vertical barriers take the
//! direct route.

use glam::DVec2;

use super::geometry::{Circle, Segment, SegmentKind};
use crate::distance;

/// Result of resolving one collider against a barrier list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Number of barriers that pushed the collider
    pub collisions: u32,
    /// Sum of every push, to be added to the owner's position
    pub displacement: DVec2,
}

impl Resolution {
    pub fn none() -> Self {
        Self {
            collisions: 0,
            displacement: DVec2::ZERO,
        }
    }

    #[inline]
    pub fn hit(&self) -> bool {
        self.collisions > 0
    }
}

/// Resolve a collider against every barrier.
///
/// Each push is computed against `collider` as passed in, so overlapping
/// barriers add their pushes together without any normalization.
/// `corner_buffer` shrinks the broad-phase box around each barrier so
/// colliders slide past barrier ends instead of snagging on them.
pub fn resolve(collider: &Circle, segments: &[Segment], corner_buffer: f64) -> Resolution {
    let mut result = Resolution::none();
    for segment in segments {
        if let Some(push) = segment_push(collider, segment, corner_buffer) {
            result.collisions += 1;
            result.displacement += push;
        }
    }
    result
}

/// Push needed to move `collider` off a single barrier, if they touch.
///
/// Returns `None` when the collider is out of reach or when the barrier
/// produces non-finite math.
pub fn segment_push(collider: &Circle, segment: &Segment, corner_buffer: f64) -> Option<DVec2> {
    if !segment.is_finite() || !collider.center.is_finite() {
        return None;
    }

    let center = collider.center;
    let bounds = segment.padded_bounds(collider.radius - corner_buffer);

    let push = match segment.kind() {
        SegmentKind::Horizontal => {
            // Only the run matters here, the distance test handles Y
            if !bounds.contains_x(center.x) {
                return None;
            }
            let foot = DVec2::new(center.x, segment.a.y);
            let depth = penetration(collider, foot)?;
            if center.y > foot.y {
                DVec2::new(0.0, depth)
            } else {
                DVec2::new(0.0, -depth)
            }
        }
        SegmentKind::Vertical => {
            if !bounds.contains_y(center.y) {
                return None;
            }
            let foot = DVec2::new(segment.b.x, center.y);
            let depth = penetration(collider, foot)?;
            if center.x > foot.x {
                DVec2::new(depth, 0.0)
            } else {
                DVec2::new(-depth, 0.0)
            }
        }
        SegmentKind::Oblique => {
            if !bounds.contains(center) {
                return None;
            }
            oblique_push(collider, segment)?
        }
    };

    push.is_finite().then_some(push)
}

/// How far the collider reaches past `foot`, if it reaches it at all
#[inline]
fn penetration(collider: &Circle, foot: DVec2) -> Option<f64> {
    let dist = distance(foot, collider.center);
    (dist <= collider.radius).then(|| collider.radius - dist)
}

/// Foot of the perpendicular from `point` onto the infinite line through an
/// oblique segment.
///
/// Both lines are put in `y = m·x + c` form and solved with Cramer's rule.
pub fn perpendicular_foot(segment: &Segment, point: DVec2) -> Option<DVec2> {
    let slope = segment.rise() / segment.run();
    let intercept = segment.a.y - segment.a.x * slope;
    let perp_slope = -1.0 / slope;
    let perp_intercept = point.y - point.x * perp_slope;

    let det = perp_slope - slope;
    let foot = DVec2::new(
        (intercept - perp_intercept) / det,
        (intercept * perp_slope - perp_intercept * slope) / det,
    );
    foot.is_finite().then_some(foot)
}

fn oblique_push(collider: &Circle, segment: &Segment) -> Option<DVec2> {
    let center = collider.center;
    let slope = segment.rise() / segment.run();
    let perp_slope = -1.0 / slope;

    let foot = perpendicular_foot(segment, center)?;
    let depth = penetration(collider, foot)?;

    // Split the depth along the perpendicular: b² + a² = depth², a = perp_slope·b
    let b = depth / (perp_slope.powi(2) + 1.0).sqrt();
    let a = perp_slope * b;

    // (b, a) points down-right for rising lines and up-right for falling ones
    let above = center.y > foot.y;
    let push = match (slope > 0.0, above) {
        (true, true) => DVec2::new(-b, -a),
        (true, false) => DVec2::new(b, a),
        (false, true) => DVec2::new(b, a),
        (false, false) => DVec2::new(-b, -a),
    };
    Some(push)
}
