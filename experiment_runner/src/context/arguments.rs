//!
//! The command arguments carried by the context.
//!

use super::parallel_mode::ParallelMode;

///
/// The command arguments carried by the context.
///
/// The orchestrator rewrites a subset of these for every inner build and puts the
/// original values back before dispatching the run.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    /// The target selected on the command line.
    pub target: Option<String>,
    /// The targets to build.
    pub targets: Vec<String>,
    /// The packages to build instead of targets.
    pub packages: Vec<String>,
    /// The instances to build or run.
    pub instances: Vec<String>,
    /// The number of iterations per instance.
    pub iterations: usize,
    /// The maximum number of build processes.
    pub jobs: usize,
    /// Print the commands instead of executing them.
    pub dry_run: bool,
    /// Only load the dependencies.
    pub deps_only: bool,
    /// Remove the build directory before building.
    pub clean: bool,
    /// Only relink the target.
    pub relink: bool,
    /// The run dispatch mode.
    pub parallel: Option<ParallelMode>,
    /// The maximum number of concurrent local runs.
    pub parallel_max: usize,
    /// The remote nodes for the `ssh` dispatch mode.
    pub ssh_nodes: Vec<String>,
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            target: None,
            targets: Vec::new(),
            packages: Vec::new(),
            instances: Vec::new(),
            iterations: 1,
            jobs: default_jobs(),
            dry_run: false,
            deps_only: false,
            clean: false,
            relink: false,
            parallel: None,
            parallel_max: default_jobs(),
            ssh_nodes: Vec::new(),
        }
    }
}

impl Arguments {
    ///
    /// Restricts the arguments to one fresh full build of `target` with `instance`.
    ///
    pub fn scope_to_single_build(&mut self, target: &str, instance: &str) {
        self.dry_run = false;
        self.targets = vec![target.to_owned()];
        self.packages = Vec::new();
        self.deps_only = false;
        self.clean = false;
        self.relink = false;
        self.iterations = 1;
        self.instances = vec![instance.to_owned()];
    }

    ///
    /// Turns off remote dispatch, so that the next build goes through the local path.
    ///
    pub fn disable_remote_dispatch(&mut self) {
        self.parallel = None;
        self.ssh_nodes = Vec::new();
    }

    ///
    /// Whether runs are dispatched to remote nodes.
    ///
    pub fn is_remote(&self) -> bool {
        matches!(self.parallel, Some(ParallelMode::Ssh))
    }
}

///
/// The default number of build processes: one per available CPU.
///
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(1)
}
