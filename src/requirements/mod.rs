//! Requirement declaration and evaluation.
//!
//! Requirements are declared on a [`Checker`], stored as
//! [`RequirementDescriptor`]s and evaluated against a
//! [`PlatformProbe`](crate::probe::PlatformProbe) into
//! [`RequirementResult`]s.
//!
//! # Modules
//!
//! - [`comparator`] - Operator-prefixed constraint parsing and matching
//! - [`descriptor`] - Requirement kinds and their expected values
//! - [`set`] - Ordered collection of registered requirements
//! - [`evaluator`] - Turns descriptors into results using a probe
//! - [`status`] - Evaluation result type
//! - [`checker`] - Fluent registration facade

pub mod checker;
pub mod comparator;
pub mod descriptor;
pub mod evaluator;
pub mod set;
pub mod status;

pub use checker::Checker;
pub use comparator::{evaluate, Constraint, Operator};
pub use descriptor::{
    AlternativesGroup, IniEntry, IniExpectation, OsFamily, RequirementDescriptor, RequirementKind,
};
pub use evaluator::Evaluator;
pub use set::RequirementSet;
pub use status::RequirementResult;
