//! Position-limit model: reach bounded from kinematic limits alone.

use reach_config::{ExtremityDef, SystemUncertainty};
use reach_geom::{Capsule, Point, Vector};

use crate::error::ModelError;
use crate::model::MotionModel;

struct ExtremityBound {
    name: String,
    base: usize,
    /// Horizon-independent radius: extension + half thickness + position error.
    static_radius: f64,
    /// The larger of the two endpoint joints' speed limits.
    max_speed: f64,
}

/// Bounds each extremity as a ball around its measured base joint, grown by
/// its maximum extension and the distance its fastest endpoint could cover.
/// Uses no velocity knowledge, so it stays valid when the estimate is stale.
pub struct PosModel {
    extremities: Vec<ExtremityBound>,
    delay: f64,
    capsules: Vec<Capsule>,
    scratch: Vec<Capsule>,
}

impl PosModel {
    pub fn new(
        extremities: &[ExtremityDef],
        max_velocity: &[f64],
        uncertainty: SystemUncertainty,
    ) -> Self {
        let extremities: Vec<ExtremityBound> = extremities
            .iter()
            .map(|ext| ExtremityBound {
                name: ext.name.clone(),
                base: ext.base,
                static_radius: ext.length + ext.thickness * 0.5 + uncertainty.position_error,
                max_speed: max_velocity[ext.base].max(max_velocity[ext.end]),
            })
            .collect();
        let zero = vec![Capsule::ball(Point::origin(), 0.0); extremities.len()];
        Self {
            extremities,
            delay: uncertainty.delay,
            capsules: zero.clone(),
            scratch: zero,
        }
    }
}

impl MotionModel for PosModel {
    fn name(&self) -> &'static str {
        "position-limit"
    }

    fn update(
        &mut self,
        begin: f64,
        end: f64,
        positions: &[Point],
        _velocities: &[Vector],
    ) -> Result<(), ModelError> {
        let reach_time = end + self.delay;
        for (slot, ext) in self.scratch.iter_mut().zip(&self.extremities) {
            let radius = ext.static_radius + ext.max_speed * reach_time;
            *slot = Capsule::ball(positions[ext.base], radius);
        }
        if let Some(idx) = self.scratch.iter().position(|c| !c.is_finite()) {
            let part = self
                .extremities
                .get(idx)
                .map_or_else(String::new, |e| e.name.clone());
            return Err(ModelError::NonFiniteCapsule { part, begin, end });
        }
        std::mem::swap(&mut self.scratch, &mut self.capsules);
        Ok(())
    }

    fn capsules(&self) -> &[Capsule] {
        &self.capsules
    }
}
