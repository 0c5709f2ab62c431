#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Human-reachability core for a robot safety monitor.
//!
//! Given noisy, delayed joint-position measurements, this crate maintains a
//! velocity estimate and drives three independent worst-case motion models
//! over caller-supplied future horizons, producing conservative capsule
//! envelopes for an external collision checker.
//!
//! ## Architecture
//!
//! - **Measurement buffer**: last-known joint state, finite-difference
//!   velocity estimation (`buffer` module)
//! - **Motion models**: position-limit, velocity-bound, acceleration-bound
//!   (`model` module)
//! - **Driver/collector**: horizon computation, time slicing, ordered
//!   snapshots (`monitor` module)
//! - **Status**: explicit `Ok`/`Degraded`/`Faulted` from every mutating call
//!   (`status` module); no panic and no `Err` escapes the hot path
//! - **Events**: injected sink, `tracing` by default (`sink` module)
//!
//! Configuration is resolved up front by `reach_config`; the core performs
//! no name lookup at runtime.

pub mod buffer;
pub mod error;
pub mod model;
pub mod monitor;
pub mod sink;
pub mod status;

pub use buffer::{MIN_SAMPLE_SPACING, MeasurementBuffer};
pub use error::{ModelError, ReachError};
pub use model::{AccelModel, MotionModel, PosModel, VelModel};
pub use monitor::{MAX_TRAJECTORY_SLICES, ReachMonitor, Snapshot, TrajectoryAnalysis};
pub use sink::{EventSink, NullSink, TracingSink};
pub use status::ReachStatus;
