//!
//! The experiment runner arguments.
//!

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;

use experiment_runner::context::arguments::default_jobs;
use experiment_runner::context::parallel_mode::ParallelMode;

///
/// The experiment runner arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// Prints every finished run, not only the failed ones.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppresses the output completely.
    #[arg(short, long)]
    pub quiet: bool,

    /// The experiment file declaring packages, instances, and targets.
    #[arg(short, long, default_value = experiment_runner::Setup::DEFAULT_PATH)]
    pub config: PathBuf,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

///
/// The experiment runner commands.
///
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rebuilds and runs the target with a fresh random seed on every iteration.
    RunRandom(RunRandomArguments),
    /// Builds the targets with the instances, or loads the packages.
    Build(BuildArguments),
}

///
/// The `run-random` command arguments.
///
#[derive(Debug, Args)]
pub struct RunRandomArguments {
    /// The target to rebuild and run.
    pub target: String,

    /// The instances to rebuild the target with.
    #[arg(required = true)]
    pub instances: Vec<String>,

    /// The number of iterations per instance.
    #[arg(short, long, default_value_t = 1)]
    pub iterations: usize,

    /// The maximum number of build processes.
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Dispatches the runs concurrently: `proc` for local processes, `ssh` for remote nodes.
    #[arg(long)]
    pub parallel: Option<ParallelMode>,

    /// The maximum number of concurrent local runs.
    #[arg(long = "parallelmax")]
    pub parallel_max: Option<usize>,

    /// The remote nodes for `--parallel ssh`.
    #[arg(long = "ssh-nodes", num_args = 1..)]
    pub ssh_nodes: Vec<String>,

    /// Seeds the generator of the iteration seeds, making them reproducible.
    #[arg(long = "rng-seed")]
    pub rng_seed: Option<u64>,

    /// The run results directory.
    #[arg(long)]
    pub results: Option<PathBuf>,
}

impl RunRandomArguments {
    ///
    /// The arguments carried by the context.
    ///
    pub fn context_arguments(&self) -> experiment_runner::context::arguments::Arguments {
        experiment_runner::context::arguments::Arguments {
            target: Some(self.target.clone()),
            instances: self.instances.clone(),
            iterations: self.iterations,
            jobs: self.jobs.unwrap_or_else(default_jobs),
            parallel: self.parallel,
            parallel_max: self.parallel_max.unwrap_or_else(default_jobs),
            ssh_nodes: self.ssh_nodes.clone(),
            ..Default::default()
        }
    }
}

///
/// The `build` command arguments.
///
#[derive(Debug, Args)]
pub struct BuildArguments {
    /// The instances to build the targets with.
    pub instances: Vec<String>,

    /// The targets to build.
    #[arg(short, long, num_args = 1..)]
    pub targets: Vec<String>,

    /// The packages to load instead of building targets.
    #[arg(short, long, num_args = 1..)]
    pub packages: Vec<String>,

    /// Prints the build commands instead of executing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Removes the build directories before building.
    #[arg(long)]
    pub clean: bool,

    /// Only relinks the targets.
    #[arg(long)]
    pub relink: bool,

    /// Only loads the dependencies.
    #[arg(long)]
    pub deps_only: bool,

    /// The maximum number of build processes.
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

impl BuildArguments {
    ///
    /// The arguments carried by the context.
    ///
    pub fn context_arguments(&self) -> experiment_runner::context::arguments::Arguments {
        experiment_runner::context::arguments::Arguments {
            targets: self.targets.clone(),
            packages: self.packages.clone(),
            instances: self.instances.clone(),
            jobs: self.jobs.unwrap_or_else(default_jobs),
            dry_run: self.dry_run,
            deps_only: self.deps_only,
            clean: self.clean,
            relink: self.relink,
            ..Default::default()
        }
    }
}

impl Arguments {
    ///
    /// Validate the arguments.
    ///
    pub fn validate(arguments: Self) -> anyhow::Result<Self> {
        match arguments.command {
            Command::RunRandom(ref run) => {
                if run.iterations == 0 {
                    anyhow::bail!("The number of iterations `-i` must be at least 1.");
                }
                if run.parallel_max == Some(0) {
                    anyhow::bail!(
                        "The number of concurrent runs `--parallelmax` must be at least 1."
                    );
                }
                if run.jobs == Some(0) {
                    anyhow::bail!("The number of build processes `-j` must be at least 1.");
                }
                match (run.parallel, run.ssh_nodes.is_empty()) {
                    (Some(ParallelMode::Ssh), true) => {
                        anyhow::bail!("Remote runs with `--parallel ssh` require `--ssh-nodes`.")
                    }
                    (Some(ParallelMode::Ssh), false) => {}
                    (_, false) => {
                        anyhow::bail!("`--ssh-nodes` is only valid with `--parallel ssh`.")
                    }
                    (_, true) => {}
                }
            }
            Command::Build(ref build) => {
                if build.packages.is_empty() {
                    if build.targets.is_empty() {
                        anyhow::bail!("Nothing to build: pass `--targets` or `--packages`.");
                    }
                    if build.instances.is_empty() {
                        anyhow::bail!("Building targets requires at least one instance.");
                    }
                }
                if build.jobs == Some(0) {
                    anyhow::bail!("The number of build processes `-j` must be at least 1.");
                }
            }
        }

        Ok(arguments)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use experiment_runner::context::parallel_mode::ParallelMode;

    use super::Arguments;
    use super::Command;

    fn parse(line: &[&str]) -> anyhow::Result<Arguments> {
        Arguments::try_parse_from(std::iter::once("experiment-runner").chain(line.iter().copied()))
            .map_err(|error| anyhow::anyhow!(error))
            .and_then(Arguments::validate)
    }

    #[test]
    fn run_random_defaults() {
        let arguments = parse(&["run-random", "echo-target", "demo"]).expect("Always valid");
        let Command::RunRandom(run) = arguments.command else {
            panic!("Unexpected command");
        };
        let context_arguments = run.context_arguments();
        assert_eq!(context_arguments.target.as_deref(), Some("echo-target"));
        assert_eq!(context_arguments.instances, vec!["demo"]);
        assert_eq!(context_arguments.iterations, 1);
        assert_eq!(context_arguments.parallel, None);
        assert_eq!(
            arguments.config,
            std::path::PathBuf::from(experiment_runner::Setup::DEFAULT_PATH)
        );
    }

    #[test]
    fn run_random_ssh() {
        let arguments = parse(&[
            "run-random",
            "spec",
            "baseline",
            "r2c",
            "-i",
            "5",
            "--parallel",
            "ssh",
            "--ssh-nodes",
            "node1",
            "node2",
        ])
        .expect("Always valid");
        let Command::RunRandom(run) = arguments.command else {
            panic!("Unexpected command");
        };
        let context_arguments = run.context_arguments();
        assert_eq!(context_arguments.instances, vec!["baseline", "r2c"]);
        assert_eq!(context_arguments.iterations, 5);
        assert_eq!(context_arguments.parallel, Some(ParallelMode::Ssh));
        assert_eq!(context_arguments.ssh_nodes, vec!["node1", "node2"]);
    }

    #[test]
    fn invalid_combinations_rejected() {
        assert!(parse(&["run-random", "spec"]).is_err());
        assert!(parse(&["run-random", "spec", "demo", "-i", "0"]).is_err());
        assert!(parse(&["run-random", "spec", "demo", "--parallel", "ssh"]).is_err());
        assert!(parse(&["run-random", "spec", "demo", "--parallel", "mpi"]).is_err());
        assert!(parse(&["run-random", "spec", "demo", "--ssh-nodes", "node1"]).is_err());
        assert!(parse(&["run-random", "spec", "demo", "--parallelmax", "0"]).is_err());
        assert!(parse(&["build", "demo"]).is_err());
        assert!(parse(&["build", "--targets", "spec"]).is_err());
    }

    #[test]
    fn build_packages_only() {
        let arguments =
            parse(&["build", "--packages", "llvm", "gperftools"]).expect("Always valid");
        let Command::Build(build) = arguments.command else {
            panic!("Unexpected command");
        };
        assert_eq!(build.context_arguments().packages, vec!["llvm", "gperftools"]);
    }

    #[test]
    fn build_flags() {
        let arguments = parse(&[
            "build", "baseline", "--targets", "spec", "--clean", "--dry-run",
        ])
        .expect("Always valid");
        let Command::Build(build) = arguments.command else {
            panic!("Unexpected command");
        };
        let context_arguments = build.context_arguments();
        assert_eq!(context_arguments.targets, vec!["spec"]);
        assert!(context_arguments.clean);
        assert!(context_arguments.dry_run);
        assert!(!context_arguments.relink);
    }
}
