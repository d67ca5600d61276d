//!
//! The instance decorator substituting the iteration seed.
//!

use std::sync::Arc;

use crate::context::Context;
use crate::error::Error;
use crate::package::Package;

use super::placeholder;
use super::Instance;

///
/// The instance decorator substituting the iteration seed.
///
/// After the wrapped instance is configured, every [`placeholder::SEED_PLACEHOLDER`]
/// in the context flags and benchmark environment is replaced by the seed.
///
#[derive(Debug)]
pub struct Randomizing {
    /// The wrapped instance.
    inner: Box<dyn Instance>,
}

impl Randomizing {
    ///
    /// A shortcut constructor.
    ///
    pub fn new<I>(inner: I) -> Self
    where
        I: Instance + 'static,
    {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl Instance for Randomizing {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn dependencies(&self) -> Vec<Arc<dyn Package>> {
        self.inner.dependencies()
    }

    fn configure(&self, context: &mut Context) -> anyhow::Result<()> {
        let seed = match context.seed {
            Some(seed) => seed.to_string(),
            None => anyhow::bail!(Error::MissingSeed {
                instance: self.name(),
            }),
        };

        self.inner.configure(context)?;

        placeholder::substitute_all(context.cflags.as_mut_slice(), seed.as_str());
        placeholder::substitute_all(context.cxxflags.as_mut_slice(), seed.as_str());
        placeholder::substitute_all(context.ldflags.as_mut_slice(), seed.as_str());
        placeholder::substitute_all(context.lib_ldflags.as_mut_slice(), seed.as_str());
        for value in context.benchenv.values_mut() {
            *value = placeholder::substitute(value, seed.as_str());
        }

        Ok(())
    }

    fn prepare_run(&self, context: &mut Context) -> anyhow::Result<()> {
        self.inner.prepare_run(context)
    }
}
