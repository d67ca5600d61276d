//!
//! The runtime dependencies of instances and targets.
//!

pub mod gperftools;
pub mod llvm;


use std::collections::HashSet;
use std::sync::Arc;

use crate::context::Context;

///
/// The runtime dependency of an instance or target.
///
/// Packages are prebuilt: the runner checks they are present, but never builds them.
///
pub trait Package: Send + Sync + std::fmt::Debug {
    ///
    /// The unique package identifier.
    ///
    fn ident(&self) -> String;

    ///
    /// The packages this one depends on.
    ///
    fn dependencies(&self) -> Vec<Arc<dyn Package>> {
        Vec::new()
    }

    ///
    /// Checks that the package is available on this machine.
    ///
    fn check_installed(&self) -> anyhow::Result<()>;

    ///
    /// Makes the package visible to spawned processes.
    ///
    fn install_env(&self, context: &mut Context) -> anyhow::Result<()>;

    ///
    /// Adds the package compiler and linker flags.
    ///
    fn configure(&self, _context: &mut Context) -> anyhow::Result<()> {
        Ok(())
    }
}

///
/// Loads `packages` and everything they depend on, dependencies first.
///
/// Loading the same package twice leaves the context unchanged.
///
pub fn load(context: &mut Context, packages: &[Arc<dyn Package>]) -> anyhow::Result<()> {
    let mut visited = HashSet::new();
    for package in packages.iter() {
        load_recursive(context, package, &mut visited)?;
    }
    Ok(())
}

fn load_recursive(
    context: &mut Context,
    package: &Arc<dyn Package>,
    visited: &mut HashSet<String>,
) -> anyhow::Result<()> {
    if !visited.insert(package.ident()) {
        return Ok(());
    }
    for dependency in package.dependencies().iter() {
        load_recursive(context, dependency, visited)?;
    }
    package.check_installed()?;
    package.install_env(context)
}
