//!
//! The `-O` optimization level.
//!

///
/// The `-O` optimization level.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptimizationLevel {
    /// `-O0`
    Zero,
    /// `-O1`
    One,
    /// `-O2`
    #[default]
    Two,
    /// `-O3`
    Three,
    /// `-Os`
    Size,
}

impl OptimizationLevel {
    ///
    /// The compiler flag.
    ///
    pub fn flag(&self) -> String {
        format!("-O{self}")
    }
}

impl std::str::FromStr for OptimizationLevel {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "0" => Ok(Self::Zero),
            "1" => Ok(Self::One),
            "2" => Ok(Self::Two),
            "3" => Ok(Self::Three),
            "s" => Ok(Self::Size),
            string => anyhow::bail!(
                "Invalid optimization level `{string}`. Supported levels: 0, 1, 2, 3, s"
            ),
        }
    }
}

impl std::fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zero => write!(f, "0"),
            Self::One => write!(f, "1"),
            Self::Two => write!(f, "2"),
            Self::Three => write!(f, "3"),
            Self::Size => write!(f, "s"),
        }
    }
}
