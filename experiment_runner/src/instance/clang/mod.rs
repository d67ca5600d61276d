//!
//! The `clang` base instance.
//!

pub mod allocator;
pub mod optimization_level;


use std::sync::Arc;

use crate::context::Context;
use crate::package::llvm::Llvm;
use crate::package::Package;

use super::Instance;

use self::allocator::Allocator;
use self::optimization_level::OptimizationLevel;

///
/// The `clang` base instance.
///
/// Named `clang[-O<level>][-lto][-<allocator>]`, where the default `-O2` and the
/// system allocator are omitted.
///
#[derive(Debug, Clone)]
pub struct Clang {
    /// The LLVM toolchain providing `clang`.
    llvm: Arc<Llvm>,
    /// The optimization level.
    optimization_level: OptimizationLevel,
    /// Whether link-time optimizations are enabled.
    lto: bool,
    /// The memory allocator.
    allocator: Allocator,
}

impl Clang {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(
        llvm: Arc<Llvm>,
        optimization_level: OptimizationLevel,
        lto: bool,
        allocator: Allocator,
    ) -> anyhow::Result<Self> {
        if lto && optimization_level == OptimizationLevel::Zero {
            anyhow::bail!("LTO needs compile-time optimizations, but `-O0` was requested");
        }

        Ok(Self {
            llvm,
            optimization_level,
            lto,
            allocator,
        })
    }
}

impl Instance for Clang {
    fn name(&self) -> String {
        let mut name = "clang".to_owned();
        if self.optimization_level != OptimizationLevel::Two {
            name.push_str(self.optimization_level.flag().as_str());
        }
        if self.lto {
            name.push_str("-lto");
        }
        if !self.allocator.is_system() {
            name.push('-');
            name.push_str(self.allocator.to_string().as_str());
        }
        name
    }

    fn dependencies(&self) -> Vec<Arc<dyn Package>> {
        let mut dependencies: Vec<Arc<dyn Package>> = vec![self.llvm.clone()];
        if let Allocator::Tcmalloc(gperftools) = &self.allocator {
            dependencies.push(gperftools.clone());
        }
        dependencies
    }

    fn configure(&self, context: &mut Context) -> anyhow::Result<()> {
        self.llvm.configure(context)?;
        if let Allocator::Tcmalloc(gperftools) = &self.allocator {
            gperftools.configure(context)?;
        }

        let optimization_flag = self.optimization_level.flag();
        context.cflags.push(optimization_flag.clone());
        context.cxxflags.push(optimization_flag);

        if self.lto {
            context.cflags.push("-flto".to_owned());
            context.cxxflags.push("-flto".to_owned());
            context.ldflags.push("-flto".to_owned());
            context.lib_ldflags.push("-flto".to_owned());
        }

        Ok(())
    }
}
