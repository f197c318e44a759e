//! Rendering of check results.
//!
//! Human output is one line per result, `descriptor: reason`, drawn as a
//! success or failure on a [`UserInterface`]. Machine output is a JSON
//! document:
//!
//! ```json
//! { "satisfied": false, "results": [ { "descriptor": {...}, "satisfied": false, "reason": "..." } ] }
//! ```

use crate::error::Result;
use crate::probe::PlatformProbe;
use crate::requirements::{Checker, RequirementResult};
use crate::ui::UserInterface;
use serde::Serialize;

/// JSON view of a finished check.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub satisfied: bool,
    pub results: &'a [RequirementResult],
}

impl<'a> Report<'a> {
    /// Build a report from the last `check` of `checker`.
    pub fn from_checker<P: PlatformProbe>(checker: &'a Checker<P>) -> Self {
        Self {
            satisfied: checker.is_satisfied(),
            results: checker.results(),
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| anyhow::Error::new(e).into())
    }
}

/// One human-readable line for a result.
pub fn result_line(result: &RequirementResult) -> String {
    format!("{}: {}", result.descriptor, result.reason)
}

/// Closing summary line.
pub fn summary_line(results: &[RequirementResult]) -> String {
    let failed = results.iter().filter(|r| !r.satisfied).count();
    let noun = if results.len() == 1 {
        "requirement"
    } else {
        "requirements"
    };
    if failed == 0 {
        format!("All {} {} satisfied", results.len(), noun)
    } else {
        format!("{} of {} {} not satisfied", failed, results.len(), noun)
    }
}

/// Draw every result on `ui`, in registration order.
pub fn render_results(ui: &mut dyn UserInterface, results: &[RequirementResult]) {
    for result in results {
        let line = result_line(result);
        if result.satisfied {
            ui.success(&line);
        } else {
            ui.failure(&line);
        }
    }
}
