#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and resolution for the reachability monitor.
//!
//! - `RawConfig` and sub-structs are deserialized from TOML.
//! - `RawConfig::resolve` validates the schema, resolves every joint name to
//!   its index, and produces the immutable [`MonitorConfig`] the core
//!   consumes. No name lookup survives past this point.

use std::collections::HashMap;

use eyre::WrapErr;
use serde::Deserialize;
use thiserror::Error;

/// Typed validation/resolution failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("joints.names must not be empty")]
    EmptyJoints,
    #[error("duplicate joint name '{0}'")]
    DuplicateJoint(String),
    #[error("{field} must have one entry per joint: expected {expected}, got {got}")]
    LimitLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("{context} must be finite, got {value}")]
    NonFinite { context: String, value: f64 },
    #[error("{context} must be > 0, got {value}")]
    NonPositive { context: String, value: f64 },
    #[error("{context} must be >= 0, got {value}")]
    Negative { context: String, value: f64 },
    #[error("{context} references unknown joint '{name}'")]
    UnknownJoint { context: String, name: String },
    #[error("{context} must reference two distinct joints")]
    SelfPair { context: String },
    #[error("{context} joint index {index} out of range for {n_joints} joints")]
    IndexOutOfRange {
        context: String,
        index: usize,
        n_joints: usize,
    },
}

// ── TOML schema ─────────────────────────────────────────────────────────────

/// Joint declarations. Index order follows `names`.
#[derive(Debug, Deserialize)]
pub struct JointsCfg {
    pub names: Vec<String>,
    /// Per-joint speed limit (m/s), same order as `names`.
    pub max_velocity: Vec<f64>,
    /// Per-joint acceleration limit (m/s²), same order as `names`.
    pub max_acceleration: Vec<f64>,
}

/// One rigid link between two tracked joints.
#[derive(Debug, Deserialize)]
pub struct SegmentCfg {
    pub name: String,
    /// `[proximal, distal]` joint names.
    pub joints: [String; 2],
    /// Body-part diameter (m).
    pub thickness: f64,
}

/// A named limb whose reach is bounded from kinematic limits alone.
#[derive(Debug, Deserialize)]
pub struct ExtremityCfg {
    pub name: String,
    pub base: String,
    pub end: String,
    /// Maximum extension from the base joint (m).
    pub length: f64,
    /// Body-part diameter (m).
    pub thickness: f64,
}

/// Shared measurement-uncertainty scalars.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct UncertaintyCfg {
    /// Position measurement error (m).
    pub position_error: f64,
    /// Velocity measurement error (m/s).
    pub velocity_error: f64,
    /// Sensing delay (s): measurements are at least this stale.
    pub delay: f64,
}

/// TOML-level configuration, prior to name resolution.
#[derive(Debug, Deserialize)]
pub struct RawConfig {
    pub joints: JointsCfg,
    #[serde(default)]
    pub segments: Vec<SegmentCfg>,
    #[serde(default)]
    pub extremities: Vec<ExtremityCfg>,
    pub uncertainty: UncertaintyCfg,
}

pub fn load_toml(s: &str) -> Result<RawConfig, toml::de::Error> {
    toml::from_str::<RawConfig>(s)
}

/// Load and resolve a config file in one step, with path context on failure.
pub fn load_file(path: &std::path::Path) -> eyre::Result<MonitorConfig> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading config {}", path.display()))?;
    let raw = load_toml(&text).wrap_err_with(|| format!("parsing config {}", path.display()))?;
    raw.resolve()
        .wrap_err_with(|| format!("resolving config {}", path.display()))
}

// ── Resolved configuration ──────────────────────────────────────────────────

/// Ordered pair of joint indices defining a rigid link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointPair {
    pub first: usize,
    pub second: usize,
}

/// Resolved body segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDef {
    pub name: String,
    pub joints: JointPair,
    /// Body-part diameter (m); capsules add half of this to their radius.
    pub thickness: f64,
}

/// Resolved extremity.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremityDef {
    pub name: String,
    pub base: usize,
    pub end: usize,
    pub length: f64,
    pub thickness: f64,
}

/// The three uncertainty scalars shared by all motion models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemUncertainty {
    pub position_error: f64,
    pub velocity_error: f64,
    pub delay: f64,
}

/// Immutable, fully resolved monitor configuration.
///
/// Only constructible through [`MonitorConfig::new`] (or
/// [`RawConfig::resolve`]), so holding one is proof that every index is in
/// range and every scalar is finite and correctly signed.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    n_joints: usize,
    max_velocity: Vec<f64>,
    max_acceleration: Vec<f64>,
    segments: Vec<SegmentDef>,
    extremities: Vec<ExtremityDef>,
    uncertainty: SystemUncertainty,
}

impl MonitorConfig {
    /// Validate and freeze a resolved configuration.
    pub fn new(
        n_joints: usize,
        max_velocity: Vec<f64>,
        max_acceleration: Vec<f64>,
        segments: Vec<SegmentDef>,
        extremities: Vec<ExtremityDef>,
        uncertainty: SystemUncertainty,
    ) -> Result<Self, ConfigError> {
        if n_joints == 0 {
            return Err(ConfigError::EmptyJoints);
        }
        if max_velocity.len() != n_joints {
            return Err(ConfigError::LimitLength {
                field: "joints.max_velocity",
                expected: n_joints,
                got: max_velocity.len(),
            });
        }
        if max_acceleration.len() != n_joints {
            return Err(ConfigError::LimitLength {
                field: "joints.max_acceleration",
                expected: n_joints,
                got: max_acceleration.len(),
            });
        }
        for (i, v) in max_velocity.iter().enumerate() {
            check_non_negative(&format!("joints.max_velocity[{i}]"), *v)?;
        }
        for (i, a) in max_acceleration.iter().enumerate() {
            check_non_negative(&format!("joints.max_acceleration[{i}]"), *a)?;
        }
        for seg in &segments {
            let ctx = format!("segment '{}'", seg.name);
            check_index(&ctx, seg.joints.first, n_joints)?;
            check_index(&ctx, seg.joints.second, n_joints)?;
            if seg.joints.first == seg.joints.second {
                return Err(ConfigError::SelfPair { context: ctx });
            }
            check_positive(&format!("{ctx} thickness"), seg.thickness)?;
        }
        for ext in &extremities {
            let ctx = format!("extremity '{}'", ext.name);
            check_index(&ctx, ext.base, n_joints)?;
            check_index(&ctx, ext.end, n_joints)?;
            check_positive(&format!("{ctx} length"), ext.length)?;
            check_positive(&format!("{ctx} thickness"), ext.thickness)?;
        }
        check_non_negative("uncertainty.position_error", uncertainty.position_error)?;
        check_non_negative("uncertainty.velocity_error", uncertainty.velocity_error)?;
        check_non_negative("uncertainty.delay", uncertainty.delay)?;

        Ok(Self {
            n_joints,
            max_velocity,
            max_acceleration,
            segments,
            extremities,
            uncertainty,
        })
    }

    pub fn n_joints(&self) -> usize {
        self.n_joints
    }
    pub fn max_velocity(&self) -> &[f64] {
        &self.max_velocity
    }
    pub fn max_acceleration(&self) -> &[f64] {
        &self.max_acceleration
    }
    pub fn segments(&self) -> &[SegmentDef] {
        &self.segments
    }
    pub fn extremities(&self) -> &[ExtremityDef] {
        &self.extremities
    }
    pub fn uncertainty(&self) -> SystemUncertainty {
        self.uncertainty
    }
}

impl RawConfig {
    /// Validate without resolving. Suitable for fuzzing and config linting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    /// Resolve every joint name to its index and validate all scalars.
    pub fn resolve(&self) -> Result<MonitorConfig, ConfigError> {
        let names = &self.joints.names;
        if names.is_empty() {
            return Err(ConfigError::EmptyJoints);
        }
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.as_str(), i).is_some() {
                return Err(ConfigError::DuplicateJoint(name.clone()));
            }
        }
        let lookup = |context: &str, name: &str| -> Result<usize, ConfigError> {
            index.get(name).copied().ok_or_else(|| ConfigError::UnknownJoint {
                context: context.to_owned(),
                name: name.to_owned(),
            })
        };

        let segments = self
            .segments
            .iter()
            .map(|seg| {
                let ctx = format!("segment '{}'", seg.name);
                Ok(SegmentDef {
                    name: seg.name.clone(),
                    joints: JointPair {
                        first: lookup(&ctx, &seg.joints[0])?,
                        second: lookup(&ctx, &seg.joints[1])?,
                    },
                    thickness: seg.thickness,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let extremities = self
            .extremities
            .iter()
            .map(|ext| {
                let ctx = format!("extremity '{}'", ext.name);
                Ok(ExtremityDef {
                    name: ext.name.clone(),
                    base: lookup(&ctx, &ext.base)?,
                    end: lookup(&ctx, &ext.end)?,
                    length: ext.length,
                    thickness: ext.thickness,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        MonitorConfig::new(
            names.len(),
            self.joints.max_velocity.clone(),
            self.joints.max_acceleration.clone(),
            segments,
            extremities,
            SystemUncertainty {
                position_error: self.uncertainty.position_error,
                velocity_error: self.uncertainty.velocity_error,
                delay: self.uncertainty.delay,
            },
        )
    }
}

fn check_finite(context: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            context: context.to_owned(),
            value,
        })
    }
}

fn check_positive(context: &str, value: f64) -> Result<(), ConfigError> {
    check_finite(context, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            context: context.to_owned(),
            value,
        })
    }
}

fn check_non_negative(context: &str, value: f64) -> Result<(), ConfigError> {
    check_finite(context, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative {
            context: context.to_owned(),
            value,
        })
    }
}

fn check_index(context: &str, idx: usize, n_joints: usize) -> Result<(), ConfigError> {
    if idx < n_joints {
        Ok(())
    } else {
        Err(ConfigError::IndexOutOfRange {
            context: context.to_owned(),
            index: idx,
            n_joints,
        })
    }
}
