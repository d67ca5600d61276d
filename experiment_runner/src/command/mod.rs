//!
//! The experiment runner commands.
//!

pub mod build;
pub mod run_random;


use crate::context::Context;

pub use self::build::BuildCommand;
pub use self::run_random::RunRandomCommand;

///
/// The build subsystem driven by the commands.
///
pub trait Builder {
    ///
    /// Builds everything the arguments of `context` select.
    ///
    /// Works on a copy, so `context` is left unchanged.
    ///
    fn build(&self, context: &Context) -> anyhow::Result<()>;
}
