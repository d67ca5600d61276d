//!
//! The randomized rebuild-and-run experiment runner library.
//!

pub mod command;
pub mod context;
pub mod error;
pub mod instance;
pub mod package;
pub mod pool;
pub mod setup;
pub mod summary;
pub mod target;

#[cfg(test)]
mod testing;

pub use self::command::BuildCommand;
pub use self::command::Builder;
pub use self::command::RunRandomCommand;
pub use self::context::paths::Paths;
pub use self::context::Context;
pub use self::error::Error;
pub use self::setup::Setup;
pub use self::summary::Summary;

/// The process exit code on success.
pub const EXIT_CODE_SUCCESS: i32 = 0;

/// The process exit code on failure.
pub const EXIT_CODE_FAILURE: i32 = 1;
