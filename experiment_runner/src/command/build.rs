//!
//! The `build` command.
//!

use std::sync::Arc;

use colored::Colorize;
use itertools::Itertools;

use crate::context::Context;
use crate::package;
use crate::package::Package;
use crate::setup::Setup;

use super::Builder;

///
/// The `build` command.
///
/// Builds every selected target with every selected instance, or only loads the
/// selected packages if any are given.
///
#[derive(Debug)]
pub struct BuildCommand {
    /// The experiment setup.
    setup: Arc<Setup>,
    /// Whether the output is suppressed.
    quiet: bool,
}

impl BuildCommand {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(setup: Arc<Setup>, quiet: bool) -> Self {
        Self { setup, quiet }
    }

    fn build_packages(&self, context: &Context) -> anyhow::Result<()> {
        let packages = context
            .args
            .packages
            .iter()
            .map(|name| self.setup.package(name.as_str()))
            .collect::<anyhow::Result<Vec<Arc<dyn Package>>>>()?;

        let mut context = context.snapshot();
        package::load(&mut context, packages.as_slice())?;
        if !self.quiet {
            for package in packages.iter() {
                println!(
                    "    {} package {}",
                    "Loaded".bright_green().bold(),
                    package.ident()
                );
            }
        }
        Ok(())
    }
}

impl Builder for BuildCommand {
    fn build(&self, context: &Context) -> anyhow::Result<()> {
        if !context.args.packages.is_empty() {
            return self.build_packages(context);
        }

        let targets = self.setup.targets.select(context.args.targets.as_slice())?;
        let instances = self
            .setup
            .instances
            .select(context.args.instances.as_slice())?;

        for (target, instance) in targets.iter().cartesian_product(instances.iter()) {
            let mut context = context.snapshot();
            package::load(&mut context, instance.dependencies().as_slice())?;
            package::load(&mut context, target.dependencies().as_slice())?;
            if context.args.deps_only {
                continue;
            }

            instance.configure(&mut context)?;
            if !self.quiet {
                println!(
                    "    {} {} with {}",
                    "Building".bright_green().bold(),
                    target.name(),
                    instance.name()
                );
            }
            target.build(&context, instance.as_ref())?;
        }
        Ok(())
    }
}
