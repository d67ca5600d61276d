//!
//! The fatal errors of the experiment runner.
//!

///
/// The fatal errors of the experiment runner.
///
/// None of these is retried: each one aborts the whole command.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A randomizing instance was configured without a seed.
    #[error("Instance `{instance}` requires an RNG seed. Currently only the `run-random` command creates such a seed")]
    MissingSeed {
        /// The instance name.
        instance: String,
    },
    /// The instance name is not registered.
    #[error("Unknown instance `{name}`. Available instances: {available}")]
    UnknownInstance {
        /// The requested name.
        name: String,
        /// The registered names.
        available: String,
    },
    /// The target name is not registered.
    #[error("Unknown target `{name}`. Available targets: {available}")]
    UnknownTarget {
        /// The requested name.
        name: String,
        /// The registered names.
        available: String,
    },
    /// The package name is not registered.
    #[error("Unknown package `{name}`. Available packages: {available}")]
    UnknownPackage {
        /// The requested name.
        name: String,
        /// The registered names.
        available: String,
    },
    /// Two instances share a name.
    #[error("Instance `{name}` is registered more than once")]
    DuplicateInstance {
        /// The clashing name.
        name: String,
    },
    /// Two targets share a name.
    #[error("Target `{name}` is registered more than once")]
    DuplicateTarget {
        /// The clashing name.
        name: String,
    },
    /// Runs were requested through a pool the target cannot be run in.
    #[error("Target `{target}` does not support parallel runs")]
    ParallelRunsUnsupported {
        /// The target name.
        target: String,
    },
    /// The target build has failed.
    #[error("Building target `{target}` with instance `{instance}` failed: {reason}")]
    BuildFailed {
        /// The target name.
        target: String,
        /// The instance name.
        instance: String,
        /// The failure description.
        reason: String,
    },
    /// A runtime dependency is missing.
    #[error("Package `{ident}` is not installed: {reason}")]
    PackageNotInstalled {
        /// The package identifier.
        ident: String,
        /// The failure description.
        reason: String,
    },
    /// Some runs have failed.
    #[error("{failed} of {total} runs failed")]
    RunsFailed {
        /// The number of failed runs.
        failed: usize,
        /// The number of all runs.
        total: usize,
    },
}
