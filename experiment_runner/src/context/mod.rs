//!
//! The build and run context.
//!

pub mod arguments;
pub mod parallel_mode;
pub mod paths;
pub mod seed;

mod tests;

use std::collections::BTreeMap;
use std::path::PathBuf;

use self::arguments::Arguments;
use self::paths::Paths;
use self::seed::Seed;

///
/// The build and run context.
///
/// Every iteration works on its own copy: take a [`Context::snapshot`] before mutating
/// and [`Context::restore`] it afterwards.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// The output directory layout.
    pub paths: Paths,
    /// The C compiler.
    pub cc: String,
    /// The C++ compiler.
    pub cxx: String,
    /// The archiver.
    pub ar: String,
    /// The symbol lister.
    pub nm: String,
    /// The archive indexer.
    pub ranlib: String,
    /// The C compiler flags.
    pub cflags: Vec<String>,
    /// The C++ compiler flags.
    pub cxxflags: Vec<String>,
    /// The executable linker flags.
    pub ldflags: Vec<String>,
    /// The shared library linker flags.
    pub lib_ldflags: Vec<String>,
    /// The environment of the benchmark process.
    pub benchenv: BTreeMap<String, String>,
    /// The environment of every spawned process.
    pub runenv: BTreeMap<String, String>,
    /// The directories prepended to list variables such as `PATH`, first entry first.
    /// Each host appends its own current value of the variable.
    pub runenv_paths: BTreeMap<String, Vec<String>>,
    /// The randomization seed of the current iteration.
    pub seed: Option<Seed>,
    /// The unique identifier of the current run.
    pub unique_id: Option<String>,
    /// The directory runs are started in.
    pub working_directory: Option<PathBuf>,
    /// The command arguments.
    pub args: Arguments,
}

impl Context {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(paths: Paths, args: Arguments) -> Self {
        Self {
            paths,
            cc: "cc".to_owned(),
            cxx: "c++".to_owned(),
            ar: "ar".to_owned(),
            nm: "nm".to_owned(),
            ranlib: "ranlib".to_owned(),
            cflags: Vec::new(),
            cxxflags: Vec::new(),
            ldflags: Vec::new(),
            lib_ldflags: Vec::new(),
            benchenv: BTreeMap::new(),
            runenv: BTreeMap::new(),
            runenv_paths: BTreeMap::new(),
            seed: None,
            unique_id: None,
            working_directory: None,
            args,
        }
    }

    ///
    /// Returns an independent deep copy to restore from later.
    ///
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    ///
    /// Rolls the whole context back to `snapshot`.
    ///
    pub fn restore(&mut self, snapshot: Self) {
        *self = snapshot;
    }

    ///
    /// Rolls only the command arguments back to those of `snapshot`.
    ///
    pub fn restore_arguments(&mut self, snapshot: &Self) {
        self.args = snapshot.args.clone();
    }

    ///
    /// Installs `seed` as both the randomization seed and the run identifier.
    ///
    pub fn install_seed(&mut self, seed: Seed) {
        self.seed = Some(seed);
        self.unique_id = Some(seed.to_string());
    }

    ///
    /// Prepends `path` to the list variable `variable` of the run environment.
    ///
    /// A path already in the list is not added again.
    ///
    pub fn prepend_runenv_path(&mut self, variable: &str, path: &str) {
        let entries = self.runenv_paths.entry(variable.to_owned()).or_default();
        if entries.iter().any(|entry| entry == path) {
            return;
        }
        entries.insert(0, path.to_owned());
    }

    ///
    /// The build directory of `target` configured with `instance`.
    ///
    /// With a run identifier installed, the directory belongs to that run alone.
    ///
    pub fn build_directory(&self, target: &str, instance: &str) -> PathBuf {
        let directory = self.paths.target_build(target, instance);
        match self.unique_id.as_ref() {
            Some(unique_id) => directory.join(unique_id),
            None => directory,
        }
    }

    ///
    /// The environment a target build is started with.
    ///
    pub fn build_environment(&self) -> BTreeMap<String, String> {
        let mut environment = self.runenv.clone();
        environment.insert("CC".to_owned(), self.cc.clone());
        environment.insert("CXX".to_owned(), self.cxx.clone());
        environment.insert("AR".to_owned(), self.ar.clone());
        environment.insert("NM".to_owned(), self.nm.clone());
        environment.insert("RANLIB".to_owned(), self.ranlib.clone());
        environment.insert("CFLAGS".to_owned(), self.cflags.join(" "));
        environment.insert("CXXFLAGS".to_owned(), self.cxxflags.join(" "));
        environment.insert("LDFLAGS".to_owned(), self.ldflags.join(" "));
        environment.insert("LIB_LDFLAGS".to_owned(), self.lib_ldflags.join(" "));
        environment.insert("JOBS".to_owned(), self.args.jobs.to_string());
        environment.insert("MAKEFLAGS".to_owned(), format!("-j{}", self.args.jobs));
        environment
    }

    ///
    /// The environment a benchmark run is started with.
    ///
    pub fn run_environment(&self) -> BTreeMap<String, String> {
        let mut environment = self.runenv.clone();
        environment.extend(
            self.benchenv
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        if let Some(unique_id) = self.unique_id.as_ref() {
            environment.insert("RUN_ID".to_owned(), unique_id.clone());
        }
        environment
    }
}
