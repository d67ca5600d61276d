//!
//! The instance decorator adding extra flags and benchmark environment.
//!

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::context::Context;
use crate::package::Package;

use super::Instance;

///
/// The instance decorator adding extra flags and benchmark environment.
///
/// The wrapped instance is configured first, so the extras always follow its flags.
///
#[derive(Debug)]
pub struct Parameterized {
    /// The wrapped instance.
    inner: Box<dyn Instance>,
    /// The explicitly assigned name.
    name: String,
    /// The extra C compiler flags.
    extra_cflags: Vec<String>,
    /// The extra C++ compiler flags.
    extra_cxxflags: Vec<String>,
    /// The extra executable linker flags.
    extra_ldflags: Vec<String>,
    /// The extra shared library linker flags.
    extra_lib_ldflags: Vec<String>,
    /// The benchmark environment overrides.
    benchmark_env: BTreeMap<String, String>,
}

impl Parameterized {
    ///
    /// A shortcut constructor.
    ///
    pub fn new<I>(inner: I, name: String) -> Self
    where
        I: Instance + 'static,
    {
        Self {
            inner: Box::new(inner),
            name,
            extra_cflags: Vec::new(),
            extra_cxxflags: Vec::new(),
            extra_ldflags: Vec::new(),
            extra_lib_ldflags: Vec::new(),
            benchmark_env: BTreeMap::new(),
        }
    }

    ///
    /// Adds `flags` to the compiler and both linker flag lists.
    ///
    pub fn add_all_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let flags: Vec<String> = flags.into_iter().map(Into::into).collect();
        self.extra_cflags.extend(flags.iter().cloned());
        self.extra_cxxflags.extend(flags.iter().cloned());
        self.extra_ldflags.extend(flags.iter().cloned());
        self.extra_lib_ldflags.extend(flags);
    }

    ///
    /// Adds `flags` to the C compiler flag list.
    ///
    pub fn add_cflags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_cflags.extend(flags.into_iter().map(Into::into));
    }

    ///
    /// Adds `flags` to the C++ compiler flag list.
    ///
    pub fn add_cxxflags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_cxxflags.extend(flags.into_iter().map(Into::into));
    }

    ///
    /// Adds `flags` to the executable linker flag list.
    ///
    pub fn add_linker_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_ldflags.extend(flags.into_iter().map(Into::into));
    }

    ///
    /// Adds `flags` to the shared library linker flag list.
    ///
    pub fn add_lib_linker_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_lib_ldflags
            .extend(flags.into_iter().map(Into::into));
    }

    ///
    /// Sets the benchmark environment variable `key`.
    ///
    pub fn set_benchmark_env(&mut self, key: String, value: String) {
        self.benchmark_env.insert(key, value);
    }
}

impl Instance for Parameterized {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn dependencies(&self) -> Vec<Arc<dyn Package>> {
        self.inner.dependencies()
    }

    fn configure(&self, context: &mut Context) -> anyhow::Result<()> {
        self.inner.configure(context)?;

        context.cflags.extend(self.extra_cflags.iter().cloned());
        context.cxxflags.extend(self.extra_cxxflags.iter().cloned());
        context.ldflags.extend(self.extra_ldflags.iter().cloned());
        context.lib_ldflags.extend(self.extra_lib_ldflags.iter().cloned());
        for (key, value) in self.benchmark_env.iter() {
            context.benchenv.insert(key.clone(), value.clone());
        }

        Ok(())
    }

    fn prepare_run(&self, context: &mut Context) -> anyhow::Result<()> {
        self.inner.prepare_run(context)
    }
}
