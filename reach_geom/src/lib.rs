#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! 3D primitives for reachable-set bounding.
//!
//! Everything here builds on `nalgebra`; the only shape this workspace needs
//! is the capsule (a line segment with a radius), plus a handful of
//! conservative enclosure helpers used when a swept volume has to be folded
//! back into a single capsule.

pub mod capsule;

pub use capsule::{Capsule, enclose_balls, point_segment_distance};

/// 3D position in metres.
pub type Point = nalgebra::Point3<f64>;
/// 3D displacement or velocity.
pub type Vector = nalgebra::Vector3<f64>;
