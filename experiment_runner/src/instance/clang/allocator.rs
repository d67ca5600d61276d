//!
//! The memory allocator linked into the target.
//!

use std::sync::Arc;

use crate::package::gperftools::Gperftools;

///
/// The memory allocator linked into the target.
///
#[derive(Debug, Clone, Default)]
pub enum Allocator {
    /// The system `libc` allocator.
    #[default]
    System,
    /// The `tcmalloc` allocator.
    Tcmalloc(Arc<Gperftools>),
}

impl Allocator {
    ///
    /// Whether the allocator is the system one.
    ///
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl std::fmt::Display for Allocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Tcmalloc(_) => write!(f, "tcmalloc"),
        }
    }
}
