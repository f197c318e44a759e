//! Fluent requirements checker.
//!
//! The `Checker` is the public face of the crate: register requirements
//! with the `require_*` methods, run [`Checker::check`], then read
//! [`Checker::is_satisfied`] and [`Checker::unsatisfied`].
//!
//! Results are cached until the next `check` or `reset_requirements`.
//! Before the first `check`, `is_satisfied` returns `true` because there is
//! nothing that failed yet. Always call `check` before trusting it.
//!
//! # Example
//!
//! ```
//! use phpreqs::probe::StaticProbe;
//! use phpreqs::requirements::{Checker, OsFamily};
//!
//! let probe = StaticProbe::new()
//!     .with_version("8.2.12")
//!     .with_os(OsFamily::Unix)
//!     .with_functions(["sprintf", "ucwords"]);
//!
//! let mut checker = Checker::new(probe);
//! checker
//!     .require_php_version(">=7.4")
//!     .require_os(OsFamily::Unix)
//!     .require_functions(["sprintf", "ucfirst|ucwords"])
//!     .check();
//!
//! assert!(checker.is_satisfied());
//! assert!(checker.unsatisfied().is_empty());
//! ```

use crate::error::{PhpReqsError, Result};
use crate::probe::{PhpProbe, PlatformProbe};
use crate::requirements::comparator::Constraint;
use crate::requirements::descriptor::{
    AlternativesGroup, IniEntry, IniExpectation, OsFamily, RequirementDescriptor,
};
use crate::requirements::evaluator::Evaluator;
use crate::requirements::set::RequirementSet;
use crate::requirements::status::RequirementResult;

/// Accumulates requirements and evaluates them against a probe.
///
/// Not meant for concurrent mutation; use one checker per validation run.
#[derive(Debug, Clone)]
pub struct Checker<P: PlatformProbe> {
    probe: P,
    requirements: RequirementSet,
    results: Vec<RequirementResult>,
}

impl Default for Checker<PhpProbe> {
    /// A checker backed by the `php` interpreter on PATH.
    fn default() -> Self {
        Self::new(PhpProbe::default())
    }
}

impl<P: PlatformProbe> Checker<P> {
    /// Create a checker with no requirements.
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            requirements: RequirementSet::new(),
            results: Vec::new(),
        }
    }

    /// The probe requirements are evaluated against.
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Mutable access to the probe, for probes whose answers can change.
    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }

    /// The registered requirements.
    pub fn requirements(&self) -> &RequirementSet {
        &self.requirements
    }

    fn register(&mut self, descriptor: RequirementDescriptor) -> &mut Self {
        tracing::debug!("Registered requirement: {}", descriptor);
        self.requirements.push(descriptor);
        self
    }

    /// Require the PHP version to satisfy `constraint` (`">=7.2"`, `"8.1"`).
    pub fn require_php_version(&mut self, constraint: &str) -> &mut Self {
        self.register(RequirementDescriptor::Version(Constraint::parse(constraint)))
    }

    /// Require the host to belong to an OS family.
    pub fn require_os(&mut self, os: OsFamily) -> &mut Self {
        self.register(RequirementDescriptor::Os(os))
    }

    /// Require an OS family given by tag (`"unix"`, `"dos"`).
    ///
    /// Fails immediately with `InvalidArgument` for an unsupported tag.
    pub fn require_os_tag(&mut self, tag: &str) -> Result<&mut Self> {
        let os: OsFamily = tag.parse()?;
        Ok(self.require_os(os))
    }

    /// Require functions. Each entry is one group of pipe-delimited
    /// alternatives; every group needs at least one existing function.
    pub fn require_functions<I, S>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = parse_groups(groups);
        self.register(RequirementDescriptor::Functions(groups))
    }

    /// Require classes, grouped the same way as [`Checker::require_functions`].
    pub fn require_classes<I, S>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = parse_groups(groups);
        self.register(RequirementDescriptor::Classes(groups))
    }

    /// Require ini directives to match expectations. All pairs become one
    /// requirement.
    ///
    /// Fails with `InvalidArgument`, registering nothing, if any directive
    /// name is blank.
    pub fn require_ini_values<I, K, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<IniExpectation>,
    {
        let entries = values
            .into_iter()
            .map(|(directive, expected)| {
                let directive = directive.into().trim().to_string();
                if directive.is_empty() {
                    return Err(PhpReqsError::InvalidArgument {
                        message: "ini directive names must not be empty".to_string(),
                    });
                }
                Ok(IniEntry {
                    directive,
                    expected: expected.into(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.register(RequirementDescriptor::IniValues(entries)))
    }

    /// Evaluate every registered requirement against the probe as it is now,
    /// replacing any earlier results.
    pub fn check(&mut self) -> &mut Self {
        self.results = Evaluator::new(&self.probe).evaluate_all(&self.requirements);
        tracing::debug!(
            "Checked {} requirement(s), {} unsatisfied",
            self.results.len(),
            self.results.iter().filter(|r| !r.satisfied).count()
        );
        self
    }

    /// Whether every result from the last `check` was satisfied.
    ///
    /// `true` when `check` has not run since construction or reset.
    pub fn is_satisfied(&self) -> bool {
        self.results.iter().all(|r| r.satisfied)
    }

    /// Results of the last `check`, in registration order.
    pub fn results(&self) -> &[RequirementResult] {
        &self.results
    }

    /// Failed results of the last `check`, in registration order.
    pub fn unsatisfied(&self) -> Vec<&RequirementResult> {
        self.results.iter().filter(|r| !r.satisfied).collect()
    }

    /// Drop all requirements and results.
    pub fn reset_requirements(&mut self) {
        self.requirements.reset();
        self.results.clear();
    }
}

fn parse_groups<I, S>(groups: I) -> Vec<AlternativesGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    groups
        .into_iter()
        .map(|g| AlternativesGroup::parse(g.as_ref()))
        .collect()
}
