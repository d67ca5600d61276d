//!
//! The `run-random` command.
//!

use std::sync::Arc;

use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::context::seed::Seed;
use crate::context::Context;
use crate::error::Error;
use crate::instance::Instance;
use crate::package;
use crate::pool;
use crate::pool::Pool;
use crate::setup::Setup;
use crate::summary::Summary;
use crate::target::Target;

use super::build::BuildCommand;
use super::Builder;

///
/// The `run-random` command.
///
/// Every iteration rebuilds the target with a fresh seed and submits one run of it.
/// Builds happen strictly one after another in the calling thread, while the runs
/// may overlap with later builds if the pool is concurrent.
///
#[derive(Debug)]
pub struct RunRandomCommand<B = BuildCommand>
where
    B: Builder,
{
    /// The experiment setup.
    setup: Arc<Setup>,
    /// The inner build subsystem.
    builder: B,
    /// The seed generator.
    rng: StdRng,
    /// The output verbosity.
    verbosity: bool,
    /// Whether the output is suppressed.
    quiet: bool,
}

impl RunRandomCommand<BuildCommand> {
    ///
    /// A shortcut constructor.
    ///
    /// Without `rng_seed` the seed generator is seeded from the OS entropy.
    ///
    pub fn new(setup: Arc<Setup>, rng_seed: Option<u64>, verbosity: bool, quiet: bool) -> Self {
        let builder = BuildCommand::new(setup.clone(), quiet);
        Self::with_builder(setup, builder, rng_seed, verbosity, quiet)
    }
}

impl<B> RunRandomCommand<B>
where
    B: Builder,
{
    ///
    /// A shortcut constructor with a custom build subsystem.
    ///
    pub fn with_builder(
        setup: Arc<Setup>,
        builder: B,
        rng_seed: Option<u64>,
        verbosity: bool,
        quiet: bool,
    ) -> Self {
        let rng = match rng_seed {
            Some(rng_seed) => StdRng::seed_from_u64(rng_seed),
            None => StdRng::from_entropy(),
        };
        Self {
            setup,
            builder,
            rng,
            verbosity,
            quiet,
        }
    }

    ///
    /// Runs every iteration of every instance selected by the arguments of `context`.
    ///
    /// The submitted runs are always waited for, even if an iteration fails.
    /// `context` is left as it was on entry.
    ///
    pub fn run(&mut self, context: &mut Context) -> anyhow::Result<Summary> {
        let target_name = context
            .args
            .target
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No target selected"))?;
        let target = self.setup.targets.get(target_name.as_str())?;
        let instances = self
            .setup
            .instances
            .select(context.args.instances.as_slice())?;
        let pool = pool::make(&context.args)?;

        let result = self.dispatch(context, target.as_ref(), instances.as_slice(), pool.as_ref());

        let mut summary = Summary::new(self.verbosity, self.quiet);
        for outcome in pool.wait_all() {
            summary.push(outcome);
        }
        result?;
        Ok(summary)
    }

    fn dispatch(
        &mut self,
        context: &mut Context,
        target: &dyn Target,
        instances: &[Arc<dyn Instance>],
        pool: &dyn Pool,
    ) -> anyhow::Result<()> {
        for instance in instances.iter() {
            for iteration in 1..=context.args.iterations {
                let snapshot = context.snapshot();
                let result = self.iteration(context, &snapshot, target, instance.as_ref(), pool);
                context.restore(snapshot);
                result.map_err(|error| {
                    error.context(format!(
                        "Iteration {iteration} of `{}` on `{}`",
                        instance.name(),
                        target.name()
                    ))
                })?;
            }
        }
        Ok(())
    }

    fn iteration(
        &mut self,
        context: &mut Context,
        snapshot: &Context,
        target: &dyn Target,
        instance: &dyn Instance,
        pool: &dyn Pool,
    ) -> anyhow::Result<()> {
        let seed = Seed::random(&mut self.rng);
        context.install_seed(seed);
        context
            .args
            .scope_to_single_build(target.name().as_str(), instance.name().as_str());

        if context.args.is_remote() {
            let remote_arguments = context.args.clone();
            context.args.disable_remote_dispatch();
            self.builder.build(context)?;
            context.args = remote_arguments;
        } else {
            self.builder.build(context)?;
        }
        context.restore_arguments(snapshot);

        package::load(context, instance.dependencies().as_slice())?;
        package::load(context, target.dependencies().as_slice())?;
        instance.prepare_run(context)?;
        target.goto_rootdir(context)?;

        if pool.is_concurrent() && !target.supports_parallel_runs() {
            anyhow::bail!(Error::ParallelRunsUnsupported {
                target: target.name(),
            });
        }
        if !self.quiet {
            println!(
                "    {} {} with {} (seed {seed})",
                "Running".bright_green().bold(),
                target.name(),
                instance.name()
            );
        }
        target.run(context, instance, pool)
    }
}
