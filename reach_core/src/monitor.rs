//! Reachability driver: horizon computation, model updates, snapshots.

use std::sync::Arc;

use reach_config::MonitorConfig;
use reach_geom::{Capsule, Point, Vector};

use crate::buffer::MeasurementBuffer;
use crate::error::ReachError;
use crate::model::{AccelModel, MotionModel, PosModel, VelModel};
use crate::sink::{EventSink, TracingSink};
use crate::status::ReachStatus;

/// Hard cap on the number of time slices one trajectory call may request.
/// Beyond this the caller's timing is treated as a configuration error
/// rather than allocating an unbounded snapshot sequence in the hot path.
pub const MAX_TRAJECTORY_SLICES: usize = 1 << 20;

/// All capsules valid for one time slice `[begin, end)` of the horizon.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub begin: f64,
    pub end: f64,
    /// Position-limit extremities, then velocity-bound segments, then
    /// acceleration-bound segments; declaration order within each model.
    pub capsules: Vec<Capsule>,
}

/// Result of a time-sliced analysis: one snapshot per future robot sample.
#[derive(Debug)]
pub struct TrajectoryAnalysis {
    pub status: ReachStatus,
    pub snapshots: Vec<Snapshot>,
}

/// The human-reachability monitor.
///
/// Fuses joint position measurements into velocity estimates and drives the
/// three conservative motion models over caller-supplied future horizons.
/// Single-threaded by design; callers sharing one instance across threads
/// must serialize access externally.
pub struct ReachMonitor {
    buffer: MeasurementBuffer,
    pos: PosModel,
    vel: VelModel,
    accel: AccelModel,
    sink: Arc<dyn EventSink>,
    capsule_count: usize,
}

impl std::fmt::Debug for ReachMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReachMonitor")
            .field("n_joints", &self.buffer.joint_positions().len())
            .field("capsule_count", &self.capsule_count)
            .field("last_measurement_time", &self.buffer.last_timestamp())
            .finish()
    }
}

impl ReachMonitor {
    /// Build a monitor from a resolved configuration, reporting events
    /// through `tracing`.
    pub fn new(config: &MonitorConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Build a monitor with an injected event sink.
    pub fn with_sink(config: &MonitorConfig, sink: Arc<dyn EventSink>) -> Self {
        let uncertainty = config.uncertainty();
        let pos = PosModel::new(config.extremities(), config.max_velocity(), uncertainty);
        let vel = VelModel::new(config.segments(), config.max_velocity(), uncertainty);
        let accel = AccelModel::new(config.segments(), config.max_acceleration(), uncertainty);
        let capsule_count = config.extremities().len() + 2 * config.segments().len();
        Self {
            buffer: MeasurementBuffer::new(config.n_joints()),
            pos,
            vel,
            accel,
            sink,
            capsule_count,
        }
    }

    /// Re-initialize joint state: all positions and velocities zero, no
    /// prior measurement.
    pub fn reset(&mut self) {
        self.buffer.reset();
    }

    /// Ingest one sensor frame of joint positions.
    pub fn record_measurement(&mut self, positions: &[Point], timestamp: f64) -> ReachStatus {
        let status = self.buffer.record(positions, timestamp);
        match &status {
            ReachStatus::Ok => {}
            ReachStatus::Degraded(event) => self.sink.warning(event),
            ReachStatus::Faulted(event) => self.sink.error(event),
        }
        status
    }

    /// Single-shot analysis: bound the human over the worst-case interval
    /// between the last measurement and the end of a braking manoeuvre.
    ///
    /// The horizon is `t_command - last_measurement_time + t_brake`. Capsule
    /// state is read afterwards via [`ReachMonitor::snapshot`].
    pub fn analyze(&mut self, t_command: f64, t_brake: f64) -> ReachStatus {
        let Some(last) = self.buffer.last_timestamp() else {
            return self.reject(ReachError::NoMeasurement);
        };
        let horizon = t_command - last + t_brake;
        if !horizon.is_finite() || horizon <= 0.0 {
            return self.reject(ReachError::InvalidHorizon { horizon });
        }
        self.run_models(0.0, horizon)
    }

    /// Time-sliced analysis matched to the robot's planned sample times.
    ///
    /// The human horizon `t_command - last_measurement_time + t_motion_goal`
    /// is split into `ceil((t_motion_goal - t_motion_current) / sample_time)`
    /// contiguous slices; snapshot `i` bounds the human during the `i`-th
    /// future robot sample. One capsule over the whole horizon would be so
    /// conservative that almost any trajectory becomes infeasible; slicing
    /// lets the verifier reject motion only at the instant of actual overlap.
    pub fn analyze_trajectory(
        &mut self,
        t_command: f64,
        t_motion_current: f64,
        t_motion_goal: f64,
        sample_time: f64,
    ) -> TrajectoryAnalysis {
        let Some(last) = self.buffer.last_timestamp() else {
            return self.reject_trajectory(ReachError::NoMeasurement);
        };
        if !sample_time.is_finite() || sample_time <= 0.0 {
            return self.reject_trajectory(ReachError::InvalidSampleTime { sample_time });
        }
        let horizon_robot = t_motion_goal - t_motion_current;
        if !horizon_robot.is_finite() || horizon_robot <= 0.0 {
            return self.reject_trajectory(ReachError::InvalidHorizon {
                horizon: horizon_robot,
            });
        }
        let horizon_human = t_command - last + t_motion_goal;
        if !horizon_human.is_finite() || horizon_human <= 0.0 {
            return self.reject_trajectory(ReachError::InvalidHorizon {
                horizon: horizon_human,
            });
        }
        let steps = (horizon_robot / sample_time).ceil();
        if steps > MAX_TRAJECTORY_SLICES as f64 {
            return self.reject_trajectory(ReachError::InvalidSampleTime { sample_time });
        }
        let steps = (steps as usize).max(1);
        let increment = horizon_human / steps as f64;

        let mut snapshots = Vec::with_capacity(steps);
        let mut status = ReachStatus::Ok;
        for i in 0..steps {
            // Multiplying out from `i` keeps consecutive slice boundaries
            // bit-identical; accumulating `+= increment` would not.
            let begin = i as f64 * increment;
            let end = (i + 1) as f64 * increment;
            status = status.worst(self.run_models(begin, end));
            snapshots.push(Snapshot {
                begin,
                end,
                capsules: self.snapshot(),
            });
        }
        TrajectoryAnalysis { status, snapshots }
    }

    /// Current capsules across all models, in the fixed collector order:
    /// position-limit extremities, velocity-bound segments,
    /// acceleration-bound segments.
    pub fn snapshot(&self) -> Vec<Capsule> {
        let mut out = Vec::with_capacity(self.capsule_count);
        out.extend_from_slice(self.pos.capsules());
        out.extend_from_slice(self.vel.capsules());
        out.extend_from_slice(self.accel.capsules());
        out
    }

    /// Number of capsules in every snapshot.
    pub fn capsule_count(&self) -> usize {
        self.capsule_count
    }

    pub fn position_limit_capsules(&self) -> &[Capsule] {
        self.pos.capsules()
    }

    pub fn velocity_bound_capsules(&self) -> &[Capsule] {
        self.vel.capsules()
    }

    pub fn acceleration_bound_capsules(&self) -> &[Capsule] {
        self.accel.capsules()
    }

    pub fn joint_positions(&self) -> &[Point] {
        self.buffer.joint_positions()
    }

    pub fn joint_velocities(&self) -> &[Vector] {
        self.buffer.joint_velocities()
    }

    pub fn last_measurement_time(&self) -> Option<f64> {
        self.buffer.last_timestamp()
    }

    pub fn has_velocity_estimate(&self) -> bool {
        self.buffer.has_velocity_estimate()
    }

    /// Update all three models over `[begin, end]`. A faulting model keeps
    /// its last valid capsules; the fault is reported and reflected in the
    /// returned status so staleness stays observable to the caller.
    fn run_models(&mut self, begin: f64, end: f64) -> ReachStatus {
        let Self {
            buffer,
            pos,
            vel,
            accel,
            sink,
            ..
        } = self;
        let positions = buffer.joint_positions();
        let velocities = buffer.joint_velocities();
        let mut status = ReachStatus::Ok;
        let models: [&mut dyn MotionModel; 3] = [pos, vel, accel];
        for model in models {
            if let Err(source) = model.update(begin, end, positions, velocities) {
                let fault = ReachError::ModelFault {
                    model: model.name(),
                    source,
                };
                sink.error(&fault);
                status = status.worst(ReachStatus::Faulted(fault));
            }
        }
        status
    }

    fn reject(&self, event: ReachError) -> ReachStatus {
        self.sink.error(&event);
        ReachStatus::Faulted(event)
    }

    fn reject_trajectory(&self, event: ReachError) -> TrajectoryAnalysis {
        TrajectoryAnalysis {
            status: self.reject(event),
            snapshots: Vec::new(),
        }
    }
}
