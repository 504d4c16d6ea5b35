//! Barrier and collider geometry
//!
//! Barriers are straight segments between two endpoints. Colliders are
//! circles that follow their owning entity.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A static barrier between two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

/// How the resolver treats a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Zero rise. Zero-length segments land here too.
    Horizontal,
    /// Zero run
    Vertical,
    Oblique,
}

/// Axis-aligned box around a segment, grown by a collider's reach
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddedBounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl PaddedBounds {
    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        crate::between(self.min.x, x, self.max.x)
    }

    #[inline]
    pub fn contains_y(&self, y: f64) -> bool {
        crate::between(self.min.y, y, self.max.y)
    }

    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        self.contains_x(p.x) && self.contains_y(p.y)
    }
}

impl Segment {
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self { a, b }
    }

    /// Change in Y from `a` to `b`
    #[inline]
    pub fn rise(&self) -> f64 {
        self.b.y - self.a.y
    }

    /// Change in X from `a` to `b`
    #[inline]
    pub fn run(&self) -> f64 {
        self.b.x - self.a.x
    }

    /// Rise is tested first, so a zero-length segment is horizontal.
    pub fn kind(&self) -> SegmentKind {
        if self.rise() == 0.0 {
            SegmentKind::Horizontal
        } else if self.run() == 0.0 {
            SegmentKind::Vertical
        } else {
            SegmentKind::Oblique
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }

    pub fn length(&self) -> f64 {
        crate::distance(self.a, self.b)
    }

    /// Segment bounds grown by `reach` on every side
    pub fn padded_bounds(&self, reach: f64) -> PaddedBounds {
        PaddedBounds {
            min: self.a.min(self.b) - DVec2::splat(reach),
            max: self.a.max(self.b) + DVec2::splat(reach),
        }
    }
}

/// A circular collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// True when the two circles touch or overlap
    pub fn overlaps(&self, other: &Circle) -> bool {
        crate::distance(self.center, other.center) <= self.radius + other.radius
    }
}
