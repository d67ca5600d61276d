//!
//! The run summary element outcome.
//!

///
/// The run summary element outcome.
///
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// The `passed` outcome. The run has exited successfully.
    Passed,
    /// The `failed` outcome. The run could not be started or exited abnormally.
    Failed {
        /// The failure description.
        error: String,
    },
}

impl Outcome {
    ///
    /// A shortcut constructor.
    ///
    pub fn passed() -> Self {
        Self::Passed
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn failed<S>(error: S) -> Self
    where
        S: ToString,
    {
        Self::Failed {
            error: error.to_string(),
        }
    }
}
