//!
//! The experiment file representation.
//!

use std::collections::BTreeMap;
use std::path::PathBuf;

///
/// The experiment file representation.
///
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The prebuilt toolchain packages.
    #[serde(default)]
    pub packages: PackagesConfig,
    /// The instances in registration order.
    #[serde(default)]
    pub instances: Vec<InstanceConfig>,
    /// The targets in registration order.
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

///
/// The prebuilt toolchain packages.
///
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagesConfig {
    /// The LLVM toolchain. `clang` is looked up in `PATH` if omitted.
    pub llvm: Option<LlvmConfig>,
    /// The `tcmalloc` allocator.
    pub gperftools: Option<GperftoolsConfig>,
}

///
/// The LLVM toolchain package.
///
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlvmConfig {
    /// The installation prefix.
    pub prefix: Option<PathBuf>,
    /// The version label.
    pub version: Option<String>,
}

///
/// The `tcmalloc` allocator package.
///
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GperftoolsConfig {
    /// The installation prefix.
    pub prefix: PathBuf,
}

///
/// One instance declaration.
///
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceConfig {
    /// The explicit name. Required for decorated instances.
    pub name: Option<String>,
    /// The optimization level.
    pub optlevel: Option<OptimizationLevelValue>,
    /// Whether link-time optimizations are enabled.
    #[serde(default)]
    pub lto: bool,
    /// The memory allocator: `system` or `tcmalloc`.
    pub allocator: Option<String>,
    /// The flags added to the compiler and both linker flag lists.
    #[serde(default)]
    pub all_flags: Vec<String>,
    /// The extra C compiler flags.
    #[serde(default)]
    pub cflags: Vec<String>,
    /// The extra C++ compiler flags.
    #[serde(default)]
    pub cxxflags: Vec<String>,
    /// The extra executable linker flags.
    #[serde(default)]
    pub linker_flags: Vec<String>,
    /// The extra shared library linker flags.
    #[serde(default)]
    pub lib_linker_flags: Vec<String>,
    /// The benchmark environment overrides.
    #[serde(default)]
    pub benchmark_env: BTreeMap<String, String>,
    /// Whether the seed placeholder is substituted on every configuration.
    #[serde(default)]
    pub randomize: bool,
}

impl InstanceConfig {
    ///
    /// Whether anything is layered on top of the base instance.
    ///
    pub fn is_decorated(&self) -> bool {
        !self.all_flags.is_empty()
            || !self.cflags.is_empty()
            || !self.cxxflags.is_empty()
            || !self.linker_flags.is_empty()
            || !self.lib_linker_flags.is_empty()
            || !self.benchmark_env.is_empty()
            || self.randomize
    }
}

///
/// The optimization level written either as a number or as a letter.
///
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum OptimizationLevelValue {
    /// `0` to `3`.
    Number(u8),
    /// `"s"` or a quoted number.
    Text(String),
}

impl std::fmt::Display for OptimizationLevelValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

///
/// One target declaration.
///
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// The target name.
    pub name: String,
    /// The source directory, relative to the experiment file.
    pub root: PathBuf,
    /// The full build command.
    pub build: Vec<String>,
    /// The relink command.
    pub link: Option<Vec<String>>,
    /// The benchmark command.
    pub run: Vec<String>,
    /// Whether several runs may execute at the same time.
    #[serde(default)]
    pub parallel: bool,
}
