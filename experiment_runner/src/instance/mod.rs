//!
//! The compiler toolchain instances.
//!

pub mod clang;
pub mod parameterized;
pub mod placeholder;
pub mod randomizing;
pub mod registry;

use std::sync::Arc;

use crate::context::Context;
use crate::package::Package;

pub use self::registry::Registry;

///
/// The named compiler toolchain configuration a target is built with.
///
/// Instances are created once and reused across iterations. The per-iteration state,
/// such as the seed, lives in the context.
///
pub trait Instance: Send + Sync + std::fmt::Debug {
    ///
    /// The unique instance name.
    ///
    fn name(&self) -> String;

    ///
    /// The packages the instance needs at build and run time.
    ///
    fn dependencies(&self) -> Vec<Arc<dyn Package>>;

    ///
    /// Appends the instance flags and environment to the context.
    ///
    fn configure(&self, context: &mut Context) -> anyhow::Result<()>;

    ///
    /// Adjusts the context right before a run is dispatched.
    ///
    fn prepare_run(&self, _context: &mut Context) -> anyhow::Result<()> {
        Ok(())
    }
}
