//!
//! The test doubles shared by the unit tests.
//!

#![cfg(test)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use crate::context::arguments::Arguments;
use crate::context::seed::Seed;
use crate::context::Context;
use crate::instance::Instance;
use crate::package::Package;
use crate::pool::Pool;
use crate::target::Target;

///
/// The instance appending fixed flags to both compiler flag lists.
///
#[derive(Debug)]
pub(crate) struct FakeInstance {
    /// The instance name.
    name: String,
    /// The appended flags.
    flags: Vec<String>,
}

impl FakeInstance {
    ///
    /// A shortcut constructor.
    ///
    pub(crate) fn new(name: &str, flags: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            flags: flags.iter().map(|flag| (*flag).to_owned()).collect(),
        }
    }
}

impl Instance for FakeInstance {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn dependencies(&self) -> Vec<Arc<dyn Package>> {
        vec![]
    }

    fn configure(&self, context: &mut Context) -> anyhow::Result<()> {
        context.cflags.extend(self.flags.iter().cloned());
        context.cxxflags.extend(self.flags.iter().cloned());
        Ok(())
    }
}

///
/// What a fake target has been built with.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuildRecord {
    /// The instance name.
    pub instance: String,
    /// The seed visible to the build.
    pub seed: Option<Seed>,
    /// The configured C compiler flags.
    pub cflags: Vec<String>,
    /// The build arguments.
    pub args: Arguments,
}

///
/// What a fake target has been run with.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunRecord {
    /// The instance name.
    pub instance: String,
    /// The run identifier.
    pub unique_id: Option<String>,
    /// The seed visible to the run.
    pub seed: Option<Seed>,
    /// The run arguments.
    pub args: Arguments,
    /// The run directory.
    pub working_directory: Option<PathBuf>,
}

///
/// The target recording every build and run instead of spawning processes.
///
#[derive(Debug)]
pub(crate) struct FakeTarget {
    /// The target name.
    name: String,
    /// Whether pooled runs are supported.
    parallel: bool,
    /// The recorded builds.
    builds: Mutex<Vec<BuildRecord>>,
    /// The recorded runs.
    runs: Mutex<Vec<RunRecord>>,
}

impl FakeTarget {
    ///
    /// A shortcut constructor.
    ///
    pub(crate) fn new(name: &str, parallel: bool) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            parallel,
            builds: Mutex::new(Vec::new()),
            runs: Mutex::new(Vec::new()),
        })
    }

    ///
    /// The recorded builds.
    ///
    pub(crate) fn builds(&self) -> Vec<BuildRecord> {
        self.builds.lock().expect("Sync").clone()
    }

    ///
    /// The recorded runs.
    ///
    pub(crate) fn runs(&self) -> Vec<RunRecord> {
        self.runs.lock().expect("Sync").clone()
    }
}

impl Target for FakeTarget {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn goto_rootdir(&self, context: &mut Context) -> anyhow::Result<()> {
        context.working_directory = Some(PathBuf::from("/fake").join(self.name.as_str()));
        Ok(())
    }

    fn build(&self, context: &Context, instance: &dyn Instance) -> anyhow::Result<()> {
        self.builds.lock().expect("Sync").push(BuildRecord {
            instance: instance.name(),
            seed: context.seed,
            cflags: context.cflags.clone(),
            args: context.args.clone(),
        });
        Ok(())
    }

    fn supports_parallel_runs(&self) -> bool {
        self.parallel
    }

    fn run(
        &self,
        context: &Context,
        instance: &dyn Instance,
        _pool: &dyn Pool,
    ) -> anyhow::Result<()> {
        self.runs.lock().expect("Sync").push(RunRecord {
            instance: instance.name(),
            unique_id: context.unique_id.clone(),
            seed: context.seed,
            args: context.args.clone(),
            working_directory: context.working_directory.clone(),
        });
        Ok(())
    }
}
