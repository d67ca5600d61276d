//!
//! The target registry.
//!

use std::sync::Arc;

use crate::error::Error;

use super::Target;

///
/// The target registry.
///
#[derive(Debug, Default)]
pub struct Registry {
    /// The registered targets.
    targets: Vec<Arc<dyn Target>>,
}

impl Registry {
    ///
    /// Registers `target`.
    ///
    pub fn add(&mut self, target: Arc<dyn Target>) -> anyhow::Result<()> {
        let name = target.name();
        if self.targets.iter().any(|target| target.name() == name) {
            anyhow::bail!(Error::DuplicateTarget { name });
        }
        self.targets.push(target);
        Ok(())
    }

    ///
    /// Returns the target called `name`.
    ///
    pub fn get(&self, name: &str) -> anyhow::Result<Arc<dyn Target>> {
        self.targets
            .iter()
            .find(|target| target.name() == name)
            .cloned()
            .ok_or_else(|| {
                anyhow::Error::from(Error::UnknownTarget {
                    name: name.to_owned(),
                    available: self.names().join(", "),
                })
            })
    }

    ///
    /// Resolves the command-line target names, keeping their order.
    ///
    pub fn select(&self, names: &[String]) -> anyhow::Result<Vec<Arc<dyn Target>>> {
        names.iter().map(|name| self.get(name.as_str())).collect()
    }

    ///
    /// The registered names in registration order.
    ///
    pub fn names(&self) -> Vec<String> {
        self.targets.iter().map(|target| target.name()).collect()
    }
}
