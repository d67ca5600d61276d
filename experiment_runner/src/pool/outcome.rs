//!
//! The completed job outcome.
//!

use std::path::PathBuf;

use super::job::Job;

type TimeStamp = chrono::DateTime<chrono::Utc>;

///
/// The completed job outcome.
///
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct JobOutcome {
    /// The job identifier.
    pub id: String,
    /// The target name.
    pub target: String,
    /// The instance name.
    pub instance: String,
    /// The remote node the job ran on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    /// The output file.
    pub output: PathBuf,
    /// The start time.
    pub start: TimeStamp,
    /// The end time.
    pub end: TimeStamp,
    /// The failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobOutcome {
    ///
    /// A shortcut constructor. The end time is now.
    ///
    pub fn new(
        job: &Job,
        node: Option<String>,
        start: TimeStamp,
        result: Result<(), String>,
    ) -> Self {
        Self {
            id: job.id.clone(),
            target: job.target.clone(),
            instance: job.instance.clone(),
            node,
            output: job.output.clone(),
            start,
            end: chrono::Utc::now(),
            error: result.err(),
        }
    }

    ///
    /// Whether the job has exited successfully.
    ///
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    ///
    /// The wall-clock duration.
    ///
    pub fn duration(&self) -> chrono::TimeDelta {
        self.end - self.start
    }
}
