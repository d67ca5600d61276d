//!
//! The run summary element.
//!

pub mod outcome;

use std::path::PathBuf;

use colored::Colorize;

use crate::pool::outcome::JobOutcome;

use self::outcome::Outcome;

///
/// The run summary element.
///
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Element {
    /// The run identifier, which is also the seed.
    pub run_id: String,
    /// The target name.
    pub target: String,
    /// The instance name.
    pub instance: String,
    /// The remote node the run was dispatched to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    /// The run log file.
    pub log: PathBuf,
    /// The start time in RFC 3339.
    pub start: String,
    /// The wall-clock duration in milliseconds.
    pub duration_ms: i64,
    /// The run outcome.
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Element {
    ///
    /// Prints the element.
    ///
    pub fn print(&self, verbosity: bool) -> Option<String> {
        let (outcome, details) = match self.outcome {
            Outcome::Passed if !verbosity => return None,
            Outcome::Passed => (
                "PASSED".green(),
                format!("({} ms)", self.duration_ms)
                    .bright_white()
                    .to_string(),
            ),
            Outcome::Failed { ref error } => ("FAILED".bright_red(), error.to_owned()),
        };

        Some(format!(
            "{:24} {:>7} {} {} {}",
            self.instance.bright_white(),
            outcome,
            self.target,
            self.run_id,
            details
        ))
    }
}

impl From<JobOutcome> for Element {
    fn from(job: JobOutcome) -> Self {
        let outcome = match job.error {
            None => Outcome::passed(),
            Some(ref error) => Outcome::failed(error),
        };
        Self {
            duration_ms: job.duration().num_milliseconds(),
            start: job.start.to_rfc3339(),
            run_id: job.id,
            target: job.target,
            instance: job.instance,
            node: job.node,
            log: job.output,
            outcome,
        }
    }
}
