//! Per-call status returned from every mutating monitor entry point.

use crate::error::ReachError;

/// Outcome of one `record_measurement`/`analyze`/`analyze_trajectory` call.
///
/// The monitor never panics and never returns `Err`; a caller that sees
/// `Degraded` is working from a frozen velocity estimate, and a caller that
/// sees `Faulted` is working from the last valid capsule state and should
/// treat repeated faults as a reason to fail safe externally.
#[derive(Debug, Clone, PartialEq)]
pub enum ReachStatus {
    /// Full-fidelity result.
    Ok,
    /// Result computed, but from partially stale inputs.
    Degraded(ReachError),
    /// Call rejected or a model faulted; capsule state is last-valid.
    Faulted(ReachError),
}

impl ReachStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, ReachStatus::Ok)
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self, ReachStatus::Faulted(_))
    }

    /// Keep the more severe of two statuses (first error wins on a tie).
    pub fn worst(self, other: ReachStatus) -> ReachStatus {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }

    fn severity(&self) -> u8 {
        match self {
            ReachStatus::Ok => 0,
            ReachStatus::Degraded(_) => 1,
            ReachStatus::Faulted(_) => 2,
        }
    }
}
