//!
//! The experiment setup: everything the experiment file declares.
//!

pub mod config;

mod tests;

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::Error;
use crate::instance;
use crate::instance::clang::allocator::Allocator;
use crate::instance::clang::optimization_level::OptimizationLevel;
use crate::instance::clang::Clang;
use crate::instance::parameterized::Parameterized;
use crate::instance::randomizing::Randomizing;
use crate::package::gperftools::Gperftools;
use crate::package::llvm::Llvm;
use crate::package::Package;
use crate::target;
use crate::target::CommandTarget;

use self::config::Config;
use self::config::InstanceConfig;

///
/// The experiment setup: everything the experiment file declares.
///
#[derive(Debug, Default)]
pub struct Setup {
    /// The instances.
    pub instances: instance::Registry,
    /// The targets.
    pub targets: target::Registry,
    /// The packages by configuration key.
    packages: BTreeMap<String, Arc<dyn Package>>,
}

impl Setup {
    /// The default experiment file name.
    pub const DEFAULT_PATH: &'static str = "experiment.yaml";

    ///
    /// Reads the experiment file at `path`.
    ///
    /// Relative paths in the file are resolved against its directory.
    ///
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|error| anyhow::anyhow!("Experiment file {path:?} reading error: {error}"))?;
        let base_directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::from_yaml(yaml.as_str(), base_directory.as_path())
            .map_err(|error| error.context(format!("Experiment file {path:?}")))
    }

    ///
    /// Parses an experiment description.
    ///
    pub fn from_yaml(yaml: &str, base_directory: &Path) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|error| anyhow::anyhow!("Experiment parsing error: {error}"))?;
        Self::from_config(config, base_directory)
    }

    ///
    /// Builds the registries from the parsed experiment description.
    ///
    pub fn from_config(config: Config, base_directory: &Path) -> anyhow::Result<Self> {
        let resolve = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base_directory.join(path)
            }
        };

        let mut setup = Self::default();

        let llvm = config.packages.llvm.unwrap_or_default();
        let llvm = Arc::new(Llvm::new(
            llvm.prefix.as_deref().map(resolve),
            llvm.version,
        ));
        setup.add_package("llvm", llvm.clone());

        let gperftools = config
            .packages
            .gperftools
            .map(|gperftools| Arc::new(Gperftools::new(resolve(gperftools.prefix.as_path()))));
        if let Some(gperftools) = gperftools.as_ref() {
            setup.add_package("gperftools", gperftools.clone());
        }

        for instance in config.instances.into_iter() {
            setup.add_instance(instance, llvm.clone(), gperftools.clone())?;
        }

        for target in config.targets.into_iter() {
            let target = CommandTarget::new(
                target.name,
                resolve(target.root.as_path()),
                target.build,
                target.link,
                target.run,
                target.parallel,
            )?;
            setup.targets.add(Arc::new(target))?;
        }

        Ok(setup)
    }

    ///
    /// Registers `package` under the configuration key `name`.
    ///
    pub fn add_package(&mut self, name: &str, package: Arc<dyn Package>) {
        self.packages.insert(name.to_owned(), package);
    }

    ///
    /// Returns the package registered under `name`.
    ///
    pub fn package(&self, name: &str) -> anyhow::Result<Arc<dyn Package>> {
        self.packages.get(name).cloned().ok_or_else(|| {
            anyhow::Error::from(Error::UnknownPackage {
                name: name.to_owned(),
                available: self
                    .packages
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
        })
    }

    fn add_instance(
        &mut self,
        config: InstanceConfig,
        llvm: Arc<Llvm>,
        gperftools: Option<Arc<Gperftools>>,
    ) -> anyhow::Result<()> {
        let optimization_level = match config.optlevel.as_ref() {
            Some(value) => OptimizationLevel::from_str(value.to_string().as_str())?,
            None => OptimizationLevel::default(),
        };
        let allocator = match config.allocator.as_deref() {
            None | Some("system") => Allocator::System,
            Some("tcmalloc") => Allocator::Tcmalloc(gperftools.ok_or_else(|| {
                anyhow::anyhow!("The `tcmalloc` allocator needs `packages.gperftools`")
            })?),
            Some(allocator) => anyhow::bail!(
                "Invalid allocator `{allocator}`. Supported allocators: system, tcmalloc"
            ),
        };
        let clang = Clang::new(llvm, optimization_level, config.lto, allocator)?;

        if !config.is_decorated() {
            return match config.name {
                Some(name) => self.instances.add(Parameterized::new(clang, name)),
                None => self.instances.add(clang),
            };
        }

        let name = config.name.ok_or_else(|| {
            anyhow::anyhow!("Instances with extra flags or randomization need a `name`")
        })?;
        let mut parameterized = Parameterized::new(clang, name);
        parameterized.add_all_flags(config.all_flags);
        parameterized.add_cflags(config.cflags);
        parameterized.add_cxxflags(config.cxxflags);
        parameterized.add_linker_flags(config.linker_flags);
        parameterized.add_lib_linker_flags(config.lib_linker_flags);
        for (key, value) in config.benchmark_env.into_iter() {
            parameterized.set_benchmark_env(key, value);
        }

        if config.randomize {
            self.instances.add(Randomizing::new(parameterized))
        } else {
            self.instances.add(parameterized)
        }
    }
}
