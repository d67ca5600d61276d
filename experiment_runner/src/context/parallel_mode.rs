//!
//! The run dispatch mode.
//!

///
/// The run dispatch mode.
///
/// The absence of a mode means runs execute sequentially in the orchestrator thread.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParallelMode {
    /// Local subprocesses, bounded by `--parallelmax`.
    Proc,
    /// Remote nodes reached over SSH.
    Ssh,
}

impl std::str::FromStr for ParallelMode {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "proc" => Ok(Self::Proc),
            "ssh" => Ok(Self::Ssh),
            string => anyhow::bail!(
                "Unknown parallel mode `{}`. Supported modes: {}",
                string,
                [Self::Proc, Self::Ssh]
                    .into_iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
        }
    }
}

impl std::fmt::Display for ParallelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proc => write!(f, "proc"),
            Self::Ssh => write!(f, "ssh"),
        }
    }
}
