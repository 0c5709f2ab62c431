//! Capsule bounding volume.
//!
//! A capsule is the set of points within `radius` of the segment
//! `start..end`. A ball is the degenerate case `start == end`.

use crate::{Point, Vector};

/// A line segment with a radius; the bounding volume for one body part over
/// one time interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub start: Point,
    pub end: Point,
    pub radius: f64,
}

impl Capsule {
    pub fn new(start: Point, end: Point, radius: f64) -> Self {
        debug_assert!(radius >= 0.0, "capsule radius must be non-negative");
        Self { start, end, radius }
    }

    /// Degenerate capsule: a ball around `center`.
    pub fn ball(center: Point, radius: f64) -> Self {
        Self::new(center, center, radius)
    }

    /// Length of the capsule axis (zero for a ball).
    pub fn axis_length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// True when both endpoints and the radius are finite.
    pub fn is_finite(&self) -> bool {
        self.start.coords.iter().all(|c| c.is_finite())
            && self.end.coords.iter().all(|c| c.is_finite())
            && self.radius.is_finite()
    }

    /// True when `p` lies inside or on the capsule surface.
    pub fn contains_point(&self, p: &Point) -> bool {
        point_segment_distance(p, &self.start, &self.end) <= self.radius
    }

    /// True when `other` is entirely contained in `self`.
    ///
    /// Checks the balls at `other`'s endpoints; for capsules this is exact
    /// because the surface is the convex hull of the two end balls.
    pub fn contains_capsule(&self, other: &Capsule) -> bool {
        point_segment_distance(&other.start, &self.start, &self.end) + other.radius <= self.radius
            && point_segment_distance(&other.end, &self.start, &self.end) + other.radius
                <= self.radius
    }
}

/// Distance from `p` to the segment `a..b`.
pub fn point_segment_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let ab: Vector = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < 1e-20 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).norm()
}

/// Smallest simple capsule containing the balls `(c1, r1)` and `(c2, r2)`:
/// axis `c1..c2`, radius `max(r1, r2)`.
pub fn enclose_balls(c1: Point, r1: f64, c2: Point, r2: f64) -> Capsule {
    Capsule::new(c1, c2, r1.max(r2))
}
