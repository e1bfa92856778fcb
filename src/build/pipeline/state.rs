//! Coordinator state machine.

use std::fmt;

use super::StageName;

/// Where a generation run currently stands.
///
/// `Created -> ContentDone -> DesignDone -> CodeDone -> [ReviewDone] -> Complete`,
/// with `Failed(stage)` reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Created,
    ContentDone,
    DesignDone,
    CodeDone,
    ReviewDone,
    Complete,
    Failed(StageName),
}

impl PipelineState {
    /// The state reached once `stage` has finished successfully.
    pub fn after(stage: StageName) -> Self {
        match stage {
            StageName::Content => Self::ContentDone,
            StageName::Design => Self::DesignDone,
            StageName::Code => Self::CodeDone,
            StageName::Review => Self::ReviewDone,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed(_))
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::ContentDone => f.write_str("content done"),
            Self::DesignDone => f.write_str("design done"),
            Self::CodeDone => f.write_str("code done"),
            Self::ReviewDone => f.write_str("review done"),
            Self::Complete => f.write_str("complete"),
            Self::Failed(stage) => write!(f, "failed ({stage})"),
        }
    }
}
