//!
//! The `tcmalloc` allocator package.
//!

use std::path::PathBuf;

use crate::context::Context;
use crate::error::Error;

use super::Package;

///
/// The `tcmalloc` allocator package from a prebuilt `gperftools` installation.
///
#[derive(Debug, Clone)]
pub struct Gperftools {
    /// The installation prefix.
    prefix: PathBuf,
}

impl Gperftools {
    /// The allocator functions the compiler must not assume builtin semantics for.
    const NO_BUILTIN: [&'static str; 4] = ["malloc", "calloc", "realloc", "free"];

    ///
    /// A shortcut constructor.
    ///
    pub fn new(prefix: PathBuf) -> Self {
        Self { prefix }
    }

    ///
    /// The library directory.
    ///
    pub fn lib_directory(&self) -> PathBuf {
        self.prefix.join("lib")
    }
}

impl Package for Gperftools {
    fn ident(&self) -> String {
        "gperftools".to_owned()
    }

    fn check_installed(&self) -> anyhow::Result<()> {
        let library = self.lib_directory().join("libtcmalloc.so");
        if !library.exists() {
            anyhow::bail!(Error::PackageNotInstalled {
                ident: self.ident(),
                reason: format!("{library:?} does not exist"),
            });
        }
        Ok(())
    }

    fn install_env(&self, context: &mut Context) -> anyhow::Result<()> {
        context.prepend_runenv_path(
            "LD_LIBRARY_PATH",
            self.lib_directory().to_string_lossy().as_ref(),
        );
        Ok(())
    }

    fn configure(&self, context: &mut Context) -> anyhow::Result<()> {
        let mut cflags: Vec<String> = Self::NO_BUILTIN
            .iter()
            .map(|function| format!("-fno-builtin-{function}"))
            .collect();
        cflags.push("-I".to_owned());
        cflags.push(
            self.prefix
                .join("include")
                .join("gperftools")
                .to_string_lossy()
                .to_string(),
        );
        context.cflags.extend(cflags.iter().cloned());
        context.cxxflags.extend(cflags);

        let ldflags = [
            format!("-L{}", self.lib_directory().to_string_lossy()),
            "-ltcmalloc".to_owned(),
            "-lpthread".to_owned(),
        ];
        context.ldflags.extend(ldflags.iter().cloned());
        context.lib_ldflags.extend(ldflags);
        Ok(())
    }
}
