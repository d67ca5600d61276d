//!
//! The benchmark targets.
//!

pub mod command;
pub mod registry;


use std::sync::Arc;

use crate::context::Context;
use crate::instance::Instance;
use crate::package::Package;
use crate::pool::Pool;

pub use self::command::CommandTarget;
pub use self::registry::Registry;

///
/// The benchmark target: a program that is built with an instance and then run.
///
pub trait Target: Send + Sync + std::fmt::Debug {
    ///
    /// The unique target name.
    ///
    fn name(&self) -> String;

    ///
    /// The runtime dependencies.
    ///
    fn dependencies(&self) -> Vec<Arc<dyn Package>> {
        vec![]
    }

    ///
    /// Points the run directory of `context` at the target root.
    ///
    fn goto_rootdir(&self, context: &mut Context) -> anyhow::Result<()>;

    ///
    /// Builds the target with the flags `instance` has configured into `context`.
    ///
    fn build(&self, context: &Context, instance: &dyn Instance) -> anyhow::Result<()>;

    ///
    /// Whether several runs may execute at the same time.
    ///
    fn supports_parallel_runs(&self) -> bool;

    ///
    /// Submits one run of the target built with `instance` to `pool`.
    ///
    fn run(
        &self,
        context: &Context,
        instance: &dyn Instance,
        pool: &dyn Pool,
    ) -> anyhow::Result<()>;
}
