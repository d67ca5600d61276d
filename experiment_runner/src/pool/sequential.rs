//!
//! The pool running jobs in the submitting thread.
//!

use std::sync::Mutex;

use super::job::Job;
use super::outcome::JobOutcome;
use super::Pool;

///
/// The pool running jobs in the submitting thread.
///
#[derive(Debug, Default)]
pub struct SequentialPool {
    /// The outcomes since the last wait.
    outcomes: Mutex<Vec<JobOutcome>>,
}

impl Pool for SequentialPool {
    fn submit(&self, job: Job) -> anyhow::Result<()> {
        let outcome = job.execute();
        self.outcomes.lock().expect("Sync").push(outcome);
        Ok(())
    }

    fn wait_all(&self) -> Vec<JobOutcome> {
        std::mem::take(&mut *self.outcomes.lock().expect("Sync"))
    }

    fn is_concurrent(&self) -> bool {
        false
    }
}
