//! Acceleration-bound model: velocity-extrapolated centres with
//! acceleration-limited growth.

use reach_config::{JointPair, SegmentDef, SystemUncertainty};
use reach_geom::{Capsule, Point, Vector};

use crate::error::ModelError;
use crate::model::{MotionModel, swept_ball};

struct SegmentBound {
    name: String,
    joints: JointPair,
    half_thickness: f64,
    /// Acceleration limits of the two endpoint joints.
    accel: (f64, f64),
}

/// Bounds each segment assuming the joints keep their estimated velocity,
/// deviating at most by the acceleration limit. Each joint's occupancy over
/// the interval is a ball at the midpoint of its extrapolated sweep; the
/// segment capsule joins the two midpoints. Tighter than the velocity bound
/// near-term, looser far-term where `½at²` dominates.
pub struct AccelModel {
    segments: Vec<SegmentBound>,
    uncertainty: SystemUncertainty,
    capsules: Vec<Capsule>,
    scratch: Vec<Capsule>,
}

impl AccelModel {
    pub fn new(
        segments: &[SegmentDef],
        max_acceleration: &[f64],
        uncertainty: SystemUncertainty,
    ) -> Self {
        let segments: Vec<SegmentBound> = segments
            .iter()
            .map(|seg| SegmentBound {
                name: seg.name.clone(),
                joints: seg.joints,
                half_thickness: seg.thickness * 0.5,
                accel: (
                    max_acceleration[seg.joints.first],
                    max_acceleration[seg.joints.second],
                ),
            })
            .collect();
        let zero = vec![Capsule::ball(Point::origin(), 0.0); segments.len()];
        Self {
            segments,
            uncertainty,
            capsules: zero.clone(),
            scratch: zero,
        }
    }

}

impl MotionModel for AccelModel {
    fn name(&self) -> &'static str {
        "acceleration-bound"
    }

    fn update(
        &mut self,
        begin: f64,
        end: f64,
        positions: &[Point],
        velocities: &[Vector],
    ) -> Result<(), ModelError> {
        // Measurements are `delay` old, so the joints have already been
        // moving that long when the interval starts.
        let tb = begin + self.uncertainty.delay;
        let te = end + self.uncertainty.delay;
        // Uncertainty growth after `te` seconds: position error,
        // velocity-estimate error, and the acceleration-limit envelope.
        let unc = self.uncertainty;
        let growth =
            |accel: f64| unc.position_error + unc.velocity_error * te + 0.5 * accel * te * te;
        for (slot, seg) in self.scratch.iter_mut().zip(&self.segments) {
            let JointPair { first, second } = seg.joints;
            let (m1, r1) = swept_ball(
                &positions[first],
                &velocities[first],
                tb,
                te,
                growth(seg.accel.0),
            );
            let (m2, r2) = swept_ball(
                &positions[second],
                &velocities[second],
                tb,
                te,
                growth(seg.accel.1),
            );
            *slot = Capsule::new(m1, m2, seg.half_thickness + r1.max(r2));
        }
        if let Some(idx) = self.scratch.iter().position(|c| !c.is_finite()) {
            let part = self
                .segments
                .get(idx)
                .map_or_else(String::new, |s| s.name.clone());
            return Err(ModelError::NonFiniteCapsule { part, begin, end });
        }
        std::mem::swap(&mut self.scratch, &mut self.capsules);
        Ok(())
    }

    fn capsules(&self) -> &[Capsule] {
        &self.capsules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn forearm() -> SegmentDef {
        SegmentDef {
            name: "forearm".into(),
            joints: JointPair { first: 0, second: 1 },
            thickness: 0.1,
        }
    }

    fn no_uncertainty() -> SystemUncertainty {
        SystemUncertainty {
            position_error: 0.0,
            velocity_error: 0.0,
            delay: 0.0,
        }
    }

    #[test]
    fn stationary_joints_give_static_capsule_plus_accel_growth() {
        let mut model = AccelModel::new(&[forearm()], &[2.0, 2.0], no_uncertainty());
        let positions = [Point::origin(), Point::new(1.0, 0.0, 0.0)];
        model
            .update(0.0, 0.5, &positions, &[Vector::zeros(); 2])
            .expect("update");

        let c = model.capsules()[0];
        assert_eq!(c.start, positions[0]);
        assert_eq!(c.end, positions[1]);
        // 0.05 + 0.5 * 2.0 * 0.5²
        assert_relative_eq!(c.radius, 0.05 + 0.25, epsilon = 1e-12);
    }

    #[test]
    fn capsule_translates_with_estimated_velocity() {
        let mut model = AccelModel::new(&[forearm()], &[0.0, 0.0], no_uncertainty());
        let positions = [Point::origin(), Point::new(1.0, 0.0, 0.0)];
        let velocities = [Vector::new(1.0, 0.0, 0.0); 2];
        model
            .update(0.2, 0.4, &positions, &velocities)
            .expect("update");

        // Sweep midpoint: p + v * 0.3
        let c = model.capsules()[0];
        assert_relative_eq!(c.start.x, 0.3, epsilon = 1e-12);
        assert_relative_eq!(c.end.x, 1.3, epsilon = 1e-12);
        // Radius covers half the sweep: 0.05 + (0.4 - 0.2) / 2
        assert_relative_eq!(c.radius, 0.05 + 0.1, epsilon = 1e-12);
    }

    #[test]
    fn velocity_error_widens_the_envelope() {
        let unc = SystemUncertainty {
            position_error: 0.0,
            velocity_error: 0.1,
            delay: 0.0,
        };
        let mut model = AccelModel::new(&[forearm()], &[0.0, 0.0], unc);
        let positions = [Point::origin(), Point::new(1.0, 0.0, 0.0)];
        model
            .update(0.0, 2.0, &positions, &[Vector::zeros(); 2])
            .expect("update");
        // 0.05 + 0.1 * 2.0
        assert_relative_eq!(model.capsules()[0].radius, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn radius_is_monotone_in_horizon_with_motion() {
        let unc = SystemUncertainty {
            position_error: 0.01,
            velocity_error: 0.05,
            delay: 0.004,
        };
        let mut model = AccelModel::new(&[forearm()], &[10.0, 15.0], unc);
        let positions = [Point::origin(), Point::new(0.3, 0.0, 0.0)];
        let velocities = [Vector::new(0.4, -0.2, 0.1), Vector::new(-0.3, 0.0, 0.8)];
        let mut last = 0.0;
        for end in [0.01, 0.1, 0.5, 1.0, 2.0] {
            model
                .update(0.0, end, &positions, &velocities)
                .expect("update");
            let radius = model.capsules()[0].radius;
            assert!(radius > last, "radius must grow with the horizon");
            last = radius;
        }
    }
}
