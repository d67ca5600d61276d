//!
//! The LLVM toolchain package.
//!

use std::path::PathBuf;

use crate::context::Context;
use crate::error::Error;

use super::Package;

///
/// The LLVM toolchain package.
///
/// Without an explicit prefix, the toolchain is the one providing `clang` in `${PATH}`.
///
#[derive(Debug, Clone, Default)]
pub struct Llvm {
    /// The installation prefix.
    prefix: Option<PathBuf>,
    /// The version, used in the identifier only.
    version: Option<String>,
}

impl Llvm {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(prefix: Option<PathBuf>, version: Option<String>) -> Self {
        Self { prefix, version }
    }

    ///
    /// The directory with the toolchain executables.
    ///
    pub fn bin_directory(&self) -> anyhow::Result<PathBuf> {
        if let Some(prefix) = self.prefix.as_ref() {
            return Ok(prefix.join("bin"));
        }

        let clang = which::which("clang").map_err(|error| Error::PackageNotInstalled {
            ident: self.ident(),
            reason: format!("the `clang` executable not found in ${{PATH}}: {error}"),
        })?;
        clang
            .parent()
            .map(|directory| directory.to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Invalid `clang` path {clang:?}"))
    }

    fn tool(&self, name: &str) -> anyhow::Result<String> {
        Ok(self.bin_directory()?.join(name).to_string_lossy().to_string())
    }
}

impl Package for Llvm {
    fn ident(&self) -> String {
        match self.version.as_ref() {
            Some(version) => format!("llvm-{version}"),
            None => "llvm".to_owned(),
        }
    }

    fn check_installed(&self) -> anyhow::Result<()> {
        let clang = self.bin_directory()?.join("clang");
        if !clang.is_file() {
            anyhow::bail!(Error::PackageNotInstalled {
                ident: self.ident(),
                reason: format!("{clang:?} does not exist"),
            });
        }
        Ok(())
    }

    fn install_env(&self, context: &mut Context) -> anyhow::Result<()> {
        let bin_directory = self.bin_directory()?;
        context.prepend_runenv_path("PATH", bin_directory.to_string_lossy().as_ref());
        Ok(())
    }

    fn configure(&self, context: &mut Context) -> anyhow::Result<()> {
        context.cc = self.tool("clang")?;
        context.cxx = self.tool("clang++")?;
        context.ar = self.tool("llvm-ar")?;
        context.nm = self.tool("llvm-nm")?;
        context.ranlib = self.tool("llvm-ranlib")?;
        Ok(())
    }
}
