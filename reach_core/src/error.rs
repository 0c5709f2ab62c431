//! Error taxonomy for the reachability core.
//!
//! None of these are ever returned as `Err` from the monitor's entry points;
//! they travel inside [`crate::status::ReachStatus`] so the calling safety
//! loop always gets a well-formed status to react to.

use thiserror::Error;

/// A fault raised inside one motion model's update.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("non-finite capsule for '{part}' over [{begin}, {end}]")]
    NonFiniteCapsule { part: String, begin: f64, end: f64 },
}

/// Everything that can degrade or fault a monitor call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReachError {
    /// Two measurements closer than the minimum spacing; the velocity
    /// estimate is frozen at its previous value.
    #[error("measurement spacing too small: dt = {dt:e} s")]
    TimingJitter { dt: f64 },
    #[error("measurement has {got} joints, monitor is configured for {expected}")]
    JointCount { expected: usize, got: usize },
    #[error("non-finite position for joint {joint}")]
    NonFiniteSample { joint: usize },
    #[error("non-finite measurement timestamp {timestamp}")]
    NonFiniteTimestamp { timestamp: f64 },
    #[error("no measurement recorded before analysis")]
    NoMeasurement,
    #[error("degenerate reach horizon {horizon} s; check command/measurement timing")]
    InvalidHorizon { horizon: f64 },
    #[error("sample time must be > 0, got {sample_time} s")]
    InvalidSampleTime { sample_time: f64 },
    #[error("{model} model fault: {source}")]
    ModelFault {
        model: &'static str,
        #[source]
        source: ModelError,
    },
}
