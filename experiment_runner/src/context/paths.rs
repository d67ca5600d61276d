//!
//! The output directory layout.
//!

use std::path::PathBuf;

///
/// The output directory layout.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// The directory the runner was started in.
    pub root: PathBuf,
    /// The build directory.
    pub build: PathBuf,
    /// The run results directory.
    pub results: PathBuf,
}

impl Paths {
    /// The build directory name under the root.
    pub const BUILD_DIRECTORY: &'static str = "build";

    /// The default results directory name under the root.
    pub const RESULTS_DIRECTORY: &'static str = "results";

    ///
    /// A shortcut constructor.
    ///
    /// A relative `results` directory is resolved against `root`.
    ///
    pub fn new(root: PathBuf, results: Option<PathBuf>) -> Self {
        let results = match results {
            Some(results) if results.is_absolute() => results,
            Some(results) => root.join(results),
            None => root.join(Self::RESULTS_DIRECTORY),
        };
        Self {
            build: root.join(Self::BUILD_DIRECTORY),
            root,
            results,
        }
    }

    ///
    /// The build directory of `target` configured with `instance`.
    ///
    pub fn target_build(&self, target: &str, instance: &str) -> PathBuf {
        self.build.join("targets").join(target).join(instance)
    }

    ///
    /// The log file of the run `run_id`.
    ///
    pub fn run_log(&self, target: &str, instance: &str, run_id: &str) -> PathBuf {
        self.results
            .join(target)
            .join(instance)
            .join(format!("{run_id}.log"))
    }

    ///
    /// The results summary file.
    ///
    pub fn summary(&self) -> PathBuf {
        self.results.join("results.json")
    }
}
