//! Last-known joint state and finite-difference velocity estimation.

use reach_geom::{Point, Vector};

use crate::error::ReachError;
use crate::status::ReachStatus;

/// Minimum spacing between two measurements for a velocity estimate (s).
/// Below this the estimate is frozen instead of divided by a near-zero dt.
pub const MIN_SAMPLE_SPACING: f64 = 1e-7;

/// Holds the latest joint positions, the velocities estimated from the last
/// two position samples, and the timestamp of the latest sample.
///
/// The joint count is fixed at construction; storage is overwritten in
/// place, never resized. Rejected measurements leave every field untouched.
#[derive(Debug)]
pub struct MeasurementBuffer {
    positions: Vec<Point>,
    velocities: Vec<Vector>,
    last_timestamp: Option<f64>,
    has_velocity_estimate: bool,
}

impl MeasurementBuffer {
    pub fn new(n_joints: usize) -> Self {
        Self {
            positions: vec![Point::origin(); n_joints],
            velocities: vec![Vector::zeros(); n_joints],
            last_timestamp: None,
            has_velocity_estimate: false,
        }
    }

    /// Re-initialize to the zero state: every position and velocity at the
    /// origin, no prior measurement.
    pub fn reset(&mut self) {
        self.positions.fill(Point::origin());
        self.velocities.fill(Vector::zeros());
        self.last_timestamp = None;
        self.has_velocity_estimate = false;
    }

    /// Ingest one sensor frame.
    ///
    /// On the first frame, positions and timestamp are stored and velocities
    /// keep their last value. Afterwards velocities are the finite
    /// difference of the two latest frames, unless the frames are closer
    /// than [`MIN_SAMPLE_SPACING`] — then positions and timestamp still
    /// advance but the velocity estimate is frozen ([`ReachStatus::Degraded`]).
    pub fn record(&mut self, positions: &[Point], timestamp: f64) -> ReachStatus {
        if positions.len() != self.positions.len() {
            return ReachStatus::Faulted(ReachError::JointCount {
                expected: self.positions.len(),
                got: positions.len(),
            });
        }
        if !timestamp.is_finite() {
            return ReachStatus::Faulted(ReachError::NonFiniteTimestamp { timestamp });
        }
        if let Some(joint) = positions
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return ReachStatus::Faulted(ReachError::NonFiniteSample { joint });
        }

        let status = match self.last_timestamp {
            None => ReachStatus::Ok,
            Some(last) => {
                let dt = timestamp - last;
                if dt < MIN_SAMPLE_SPACING {
                    ReachStatus::Degraded(ReachError::TimingJitter { dt })
                } else {
                    for (vel, (new, old)) in self
                        .velocities
                        .iter_mut()
                        .zip(positions.iter().zip(self.positions.iter()))
                    {
                        *vel = (new - old) / dt;
                    }
                    self.has_velocity_estimate = true;
                    ReachStatus::Ok
                }
            }
        };

        self.positions.copy_from_slice(positions);
        self.last_timestamp = Some(timestamp);
        status
    }

    pub fn joint_positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn joint_velocities(&self) -> &[Vector] {
        &self.velocities
    }

    /// Timestamp of the latest accepted frame, if any.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    /// True once velocities have been derived from two distinct frames.
    pub fn has_velocity_estimate(&self) -> bool {
        self.has_velocity_estimate
    }
}
