//! The three conservative motion models.
//!
//! A closed set by design: the safety argument depends on the
//! position-limit, velocity-bound, and acceleration-bound envelopes all
//! being computed on every update, so there is no open-ended registry —
//! just one trait with exactly three implementations.

mod accel;
mod pos;
mod vel;

pub use accel::AccelModel;
pub use pos::PosModel;
pub use vel::VelModel;

use reach_geom::{Capsule, Point, Vector};

use crate::error::ModelError;

/// One worst-case motion model over a future time interval.
///
/// `update` must replace the whole capsule state for `[begin, end]` or leave
/// it untouched and return an error; it never commits a partial result.
/// Callers must pass one position and one velocity per configured joint.
/// For fixed inputs, capsule radii are non-decreasing in `end`
/// (safety-monotonicity).
pub trait MotionModel {
    /// Short model name for events and logs.
    fn name(&self) -> &'static str;

    fn update(
        &mut self,
        begin: f64,
        end: f64,
        positions: &[Point],
        velocities: &[Vector],
    ) -> Result<(), ModelError>;

    /// Capsules from the last committed update, declaration order.
    fn capsules(&self) -> &[Capsule];
}

/// Ball enclosing one joint's occupancy while its nominal centre sweeps from
/// `p + v*tb` to `p + v*te`: centred at the sweep midpoint, radius `grow`
/// plus half the sweep length.
pub(crate) fn swept_ball(p: &Point, v: &Vector, tb: f64, te: f64, grow: f64) -> (Point, f64) {
    let start = p + v * tb;
    let end = p + v * te;
    let mid = Point::from((start.coords + end.coords) * 0.5);
    let half_sweep = (end - start).norm() * 0.5;
    (mid, grow + half_sweep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn swept_ball_midpoint_and_radius() {
        let p = Point::new(0.0, 0.0, 0.0);
        let v = Vector::new(2.0, 0.0, 0.0);
        let (mid, radius) = swept_ball(&p, &v, 0.0, 1.0, 0.1);
        assert_relative_eq!(mid.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(radius, 0.1 + 1.0, epsilon = 1e-12);
    }

    #[test]
    fn swept_ball_stationary_is_plain_ball() {
        let p = Point::new(1.0, 2.0, 3.0);
        let v = Vector::zeros();
        let (mid, radius) = swept_ball(&p, &v, 0.2, 0.8, 0.05);
        assert_eq!(mid, p);
        assert_relative_eq!(radius, 0.05);
    }
}
