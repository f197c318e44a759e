//! Evaluation result types.
//!
//! Each evaluated descriptor produces a `RequirementResult` saying whether
//! it held and why. An unsatisfied requirement is data, not an error.

use crate::requirements::descriptor::RequirementDescriptor;
use serde::Serialize;

/// The outcome of evaluating a single descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementResult {
    /// The descriptor that was evaluated
    pub descriptor: RequirementDescriptor,
    /// Whether the environment met it
    pub satisfied: bool,
    /// Human-readable detail naming what matched or what failed
    pub reason: String,
}

impl RequirementResult {
    /// A result for a descriptor the environment meets.
    pub fn satisfied(descriptor: RequirementDescriptor, reason: impl Into<String>) -> Self {
        Self {
            descriptor,
            satisfied: true,
            reason: reason.into(),
        }
    }

    /// A result for a descriptor the environment does not meet.
    pub fn unsatisfied(descriptor: RequirementDescriptor, reason: impl Into<String>) -> Self {
        Self {
            descriptor,
            satisfied: false,
            reason: reason.into(),
        }
    }

    /// Whether the requirement held.
    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }
}
