//! Pipeline error types.

use std::path::PathBuf;

use super::StageName;
use crate::build::json::ParseError;
use crate::build::project::ProjectError;
use crate::build::prompts::PromptError;
use crate::build::request::ValidationError;
use crate::llm::CompletionError;

/// Errors a single stage can produce.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("{0}")]
    Service(#[from] CompletionError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Prompt(#[from] PromptError),

    #[error("{0}")]
    Persist(#[from] ProjectError),

    #[error("missing input: {0} has not been produced yet")]
    MissingInput(&'static str),
}

/// Errors that can end a generation run.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("project setup failed: {0}")]
    Project(#[source] ProjectError),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: StageName,
        #[source]
        source: StageError,
        /// Directory holding whatever earlier stages persisted
        project_dir: PathBuf,
    },
}
