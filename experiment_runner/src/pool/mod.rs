//!
//! The run dispatch pools.
//!

pub mod job;
pub mod local;
pub mod outcome;
pub mod sequential;
pub mod ssh;


use crate::context::arguments::Arguments;
use crate::context::parallel_mode::ParallelMode;

use self::job::Job;
use self::local::LocalPool;
use self::outcome::JobOutcome;
use self::sequential::SequentialPool;
use self::ssh::SshPool;

///
/// The run dispatch pool.
///
/// Job failures are reported through the outcomes, never as a submission error.
///
pub trait Pool: Send + Sync {
    ///
    /// Runs `job` now or queues it.
    ///
    fn submit(&self, job: Job) -> anyhow::Result<()>;

    ///
    /// Blocks until every job submitted since the last call has finished.
    ///
    fn wait_all(&self) -> Vec<JobOutcome>;

    ///
    /// Whether jobs may run concurrently with the submitter.
    ///
    fn is_concurrent(&self) -> bool;
}

///
/// Creates the pool selected by the command arguments.
///
pub fn make(arguments: &Arguments) -> anyhow::Result<Box<dyn Pool>> {
    Ok(match arguments.parallel {
        None => Box::new(SequentialPool::default()),
        Some(ParallelMode::Proc) => Box::new(LocalPool::new(arguments.parallel_max)?),
        Some(ParallelMode::Ssh) => Box::new(SshPool::new(arguments.ssh_nodes.clone())?),
    })
}
