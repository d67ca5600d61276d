//!
//! The run summary.
//!

pub mod element;


use std::path::Path;

use colored::Colorize;

use crate::error::Error;
use crate::pool::outcome::JobOutcome;

use self::element::outcome::Outcome;
use self::element::Element;

///
/// The run summary.
///
#[derive(Debug)]
pub struct Summary {
    /// The summary elements.
    elements: Vec<Element>,
    /// The output verbosity.
    verbosity: bool,
    /// Whether the output is suppressed.
    quiet: bool,
    /// The passed runs counter.
    passed: usize,
    /// The failed runs counter.
    failed: usize,
}

impl Summary {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(verbosity: bool, quiet: bool) -> Self {
        Self {
            elements: Vec::new(),
            verbosity,
            quiet,
            passed: 0,
            failed: 0,
        }
    }

    ///
    /// Whether every run has been successful.
    ///
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    ///
    /// Returns an error if any run has failed.
    ///
    pub fn ensure_successful(&self) -> anyhow::Result<()> {
        if !self.is_successful() {
            anyhow::bail!(Error::RunsFailed {
                failed: self.failed,
                total: self.passed + self.failed,
            });
        }
        Ok(())
    }

    ///
    /// The summary elements in completion order.
    ///
    pub fn elements(&self) -> &[Element] {
        self.elements.as_slice()
    }

    ///
    /// Adds a finished run, printing it.
    ///
    pub fn push(&mut self, outcome: JobOutcome) {
        let element = Element::from(outcome);
        if !self.quiet {
            if let Some(string) = element.print(self.verbosity) {
                println!("{string}");
            }
        }

        match element.outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
        self.elements.push(element);
    }

    ///
    /// Writes all elements to `path` as JSON.
    ///
    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                anyhow::anyhow!("Results directory {parent:?} creating error: {error}")
            })?;
        }
        let json = serde_json::to_string_pretty(&self.elements)
            .map_err(|error| anyhow::anyhow!("Results serialization error: {error}"))?;
        std::fs::write(path, json)
            .map_err(|error| anyhow::anyhow!("Results file {path:?} writing error: {error}"))?;
        Ok(())
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.quiet {
            return Ok(());
        }

        writeln!(
            f,
            "╔═════════════════════╡ RANDOMIZED RUNS ╞══════════════════════╗"
        )?;
        writeln!(
            f,
            "║                                                              ║"
        )?;
        writeln!(
            f,
            "║     {:7}                                   {:10}     ║",
            "PASSED".green(),
            self.passed.to_string().green(),
        )?;
        writeln!(
            f,
            "║     {:7}                                   {:10}     ║",
            "FAILED".bright_red(),
            self.failed.to_string().bright_red(),
        )?;
        writeln!(
            f,
            "╚══════════════════════════════════════════════════════════════╝"
        )?;

        Ok(())
    }
}
