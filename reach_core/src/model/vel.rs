//! Velocity-bound model: segments grown by their joint speed limits.

use reach_config::{JointPair, SegmentDef, SystemUncertainty};
use reach_geom::{Capsule, Point, Vector};

use crate::error::ModelError;
use crate::model::MotionModel;

struct SegmentBound {
    name: String,
    joints: JointPair,
    /// Horizon-independent radius: half thickness + position error.
    static_radius: f64,
    /// The larger of the two endpoint joints' speed limits.
    pair_speed: f64,
}

/// Bounds each body segment as a capsule between its measured joint
/// positions, with a radius that grows by the distance the faster endpoint
/// could cover at its speed limit. The estimated velocity is deliberately
/// unused: the envelope covers motion in any direction.
pub struct VelModel {
    segments: Vec<SegmentBound>,
    delay: f64,
    capsules: Vec<Capsule>,
    scratch: Vec<Capsule>,
}

impl VelModel {
    pub fn new(
        segments: &[SegmentDef],
        max_velocity: &[f64],
        uncertainty: SystemUncertainty,
    ) -> Self {
        let segments: Vec<SegmentBound> = segments
            .iter()
            .map(|seg| SegmentBound {
                name: seg.name.clone(),
                joints: seg.joints,
                static_radius: seg.thickness * 0.5 + uncertainty.position_error,
                pair_speed: max_velocity[seg.joints.first].max(max_velocity[seg.joints.second]),
            })
            .collect();
        let zero = vec![Capsule::ball(Point::origin(), 0.0); segments.len()];
        Self {
            segments,
            delay: uncertainty.delay,
            capsules: zero.clone(),
            scratch: zero,
        }
    }
}

impl MotionModel for VelModel {
    fn name(&self) -> &'static str {
        "velocity-bound"
    }

    fn update(
        &mut self,
        begin: f64,
        end: f64,
        positions: &[Point],
        _velocities: &[Vector],
    ) -> Result<(), ModelError> {
        let reach_time = end + self.delay;
        for (slot, seg) in self.scratch.iter_mut().zip(&self.segments) {
            let radius = seg.static_radius + seg.pair_speed * reach_time;
            *slot = Capsule::new(
                positions[seg.joints.first],
                positions[seg.joints.second],
                radius,
            );
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
