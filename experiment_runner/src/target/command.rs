//!
//! The target driven by shell commands from the experiment file.
//!

use std::path::PathBuf;

use colored::Colorize;

use crate::context::Context;
use crate::error::Error;
use crate::instance::Instance;
use crate::pool::job::Job;
use crate::pool::Pool;

use super::Target;

///
/// The target driven by shell commands from the experiment file.
///
/// The commands are started in the target root. The toolchain reaches them through
/// the environment, and `BUILD_DIR` names the build directory of the instance and
/// of the current run, if any.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTarget {
    /// The target name.
    name: String,
    /// The source directory.
    root: PathBuf,
    /// The full build command.
    build: Vec<String>,
    /// The command relinking existing objects.
    link: Option<Vec<String>>,
    /// The benchmark command.
    run: Vec<String>,
    /// Whether several runs may execute at the same time.
    parallel: bool,
}

impl CommandTarget {
    /// The build log file name in the build directory.
    pub const BUILD_LOG: &'static str = "build.log";

    ///
    /// A shortcut constructor.
    ///
    pub fn new(
        name: String,
        root: PathBuf,
        build: Vec<String>,
        link: Option<Vec<String>>,
        run: Vec<String>,
        parallel: bool,
    ) -> anyhow::Result<Self> {
        if build.is_empty() {
            anyhow::bail!("Target `{name}` has an empty build command");
        }
        if run.is_empty() {
            anyhow::bail!("Target `{name}` has an empty run command");
        }
        if link.as_ref().is_some_and(Vec::is_empty) {
            anyhow::bail!("Target `{name}` has an empty link command");
        }

        Ok(Self {
            name,
            root,
            build,
            link,
            run,
            parallel,
        })
    }

    fn build_job(&self, context: &Context, instance: &str) -> anyhow::Result<Job> {
        let command = if context.args.relink {
            self.link.as_ref().ok_or_else(|| {
                anyhow::anyhow!("Target `{}` has no link command for `--relink`", self.name)
            })?
        } else {
            &self.build
        };

        let build_directory = context.build_directory(self.name.as_str(), instance);
        let mut environment = context.build_environment();
        environment.insert(
            "BUILD_DIR".to_owned(),
            build_directory.to_string_lossy().into_owned(),
        );

        Ok(Job::new(
            format!("build-{}-{instance}", self.name),
            self.name.clone(),
            instance.to_owned(),
            command,
            self.root.clone(),
            build_directory.join(Self::BUILD_LOG),
        )?
        .with_environment(environment)
        .with_path_prepends(context.runenv_paths.clone()))
    }
}

impl Target for CommandTarget {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn goto_rootdir(&self, context: &mut Context) -> anyhow::Result<()> {
        if !self.root.is_dir() {
            anyhow::bail!(
                "Target `{}` root directory {:?} does not exist",
                self.name,
                self.root
            );
        }
        context.working_directory = Some(self.root.clone());
        Ok(())
    }

    fn build(&self, context: &Context, instance: &dyn Instance) -> anyhow::Result<()> {
        let instance = instance.name();
        let job = self.build_job(context, instance.as_str())?;

        if context.args.dry_run {
            println!(
                "    {} {}",
                "Would run".bright_cyan().bold(),
                job.command_line()?
            );
            return Ok(());
        }

        let build_directory = context.build_directory(self.name.as_str(), instance.as_str());
        if context.args.clean && build_directory.exists() {
            std::fs::remove_dir_all(build_directory.as_path()).map_err(|error| {
                anyhow::anyhow!("Build directory {build_directory:?} removing error: {error}")
            })?;
        }
        std::fs::create_dir_all(build_directory.as_path()).map_err(|error| {
            anyhow::anyhow!("Build directory {build_directory:?} creating error: {error}")
        })?;

        let outcome = job.execute();
        if let Some(reason) = outcome.error {
            anyhow::bail!(Error::BuildFailed {
                target: self.name.clone(),
                instance,
                reason,
            });
        }
        Ok(())
    }

    fn supports_parallel_runs(&self) -> bool {
        self.parallel
    }

    fn run(
        &self,
        context: &Context,
        instance: &dyn Instance,
        pool: &dyn Pool,
    ) -> anyhow::Result<()> {
        let instance = instance.name();
        let run_id = context.unique_id.as_deref().ok_or_else(|| {
            anyhow::anyhow!("Running target `{}` requires a run identifier", self.name)
        })?;

        let mut environment = context.run_environment();
        environment.insert(
            "BUILD_DIR".to_owned(),
            context
                .build_directory(self.name.as_str(), instance.as_str())
                .to_string_lossy()
                .into_owned(),
        );
        let working_directory = context
            .working_directory
            .clone()
            .unwrap_or_else(|| self.root.clone());
        let output = context
            .paths
            .run_log(self.name.as_str(), instance.as_str(), run_id);

        let job = Job::new(
            run_id.to_owned(),
            self.name.clone(),
            instance,
            self.run.as_slice(),
            working_directory,
            output,
        )?
        .with_environment(environment)
        .with_path_prepends(context.runenv_paths.clone());
        pool.submit(job)
    }
}
