//! Generation pipeline.
//!
//! A run moves a [`GenerationRequest`] through a fixed series of stages:
//! 1. Content (site copy as a structured document)
//! 2. Design (palette, typography, layout)
//! 3. Code (the complete HTML page)
//! 4. Review (a polish pass over the page, skippable)
//!
//! Each stage talks to the completion service once. Its output is
//! persisted to the project directory before the next stage starts, so a
//! failed run leaves everything produced up to the failure on disk.

mod context;
mod document;
mod error;
mod stages;
mod state;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

pub use context::PipelineContext;
pub use document::{ProcessingSite, StageOutput};
pub use error::{PipelineError, StageError};
pub use state::PipelineState;

use stages::{CodeStage, ContentStage, DesignStage, ReviewStage};

use crate::build::project::ProjectRecord;
use crate::build::prompts::{PromptError, PromptRenderer};
use crate::build::request::GenerationRequest;
use crate::llm::CompletionClient;

/// Identifies a stage in logs, errors and state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageName {
    Content,
    Design,
    Code,
    Review,
}

impl StageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Design => "design",
            Self::Code => "code",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stage in the generation pipeline.
///
/// Stages read what earlier stages produced from the [`ProcessingSite`] and
/// return their own output; the coordinator persists and applies it.
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> StageName;

    /// Persona sent as the system prompt.
    fn system_prompt(&self) -> &'static str;

    /// Sampling temperature for this stage's request.
    fn temperature(&self) -> f32;

    /// Produce this stage's output. Must not mutate anything.
    async fn run(
        &self,
        site: &ProcessingSite,
        ctx: &PipelineContext<'_>,
    ) -> Result<StageOutput, StageError>;
}

/// Callback invoked on every state transition.
pub type Observer = Box<dyn Fn(PipelineState) + Send + Sync>;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Project directory holding all artifacts
    pub project_dir: PathBuf,
    /// The generated page
    pub index_path: PathBuf,
    /// Whether the review stage ran
    pub reviewed: bool,
}

/// Runs generation requests through the stages, one at a time.
///
/// The completion client is injected at construction:
///
/// ```ignore
/// let client = Arc::new(OpenAiClient::new(&settings.llm)?);
/// let coordinator = Coordinator::new(client, &settings.output)?;
/// let result = coordinator.build_website(&request).await?;
/// ```
pub struct Coordinator {
    client: Arc<dyn CompletionClient>,
    prompts: PromptRenderer,
    stages: Vec<Box<dyn Stage>>,
    output_root: PathBuf,
    observer: Option<Observer>,
}

impl Coordinator {
    /// Create a coordinator with the standard stages.
    ///
    /// Stages: content → design → code → review
    pub fn new(
        client: Arc<dyn CompletionClient>,
        output_root: impl Into<PathBuf>,
    ) -> Result<Self, PromptError> {
        Ok(Self {
            client,
            prompts: PromptRenderer::new()?,
            stages: vec![
                Box::new(ContentStage),
                Box::new(DesignStage),
                Box::new(CodeStage),
                Box::new(ReviewStage),
            ],
            output_root: output_root.into(),
            observer: None,
        })
    }

    /// Register a callback for state transitions.
    pub fn with_observer(mut self, observer: impl Fn(PipelineState) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Get the names of all stages in order.
    pub fn stage_names(&self) -> Vec<StageName> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run one request through every stage.
    ///
    /// Strictly sequential, no retries. The first failing stage ends the run
    /// with [`PipelineError::Stage`]; earlier outputs stay on disk.
    #[tracing::instrument(
        skip_all,
        fields(website_type = %request.website_type, style = %request.style)
    )]
    pub async fn build_website(
        &self,
        request: &GenerationRequest,
    ) -> Result<BuildResult, PipelineError> {
        request.validate()?;

        let project = ProjectRecord::create(
            &self.output_root,
            request.project_name.as_deref(),
            &request.description,
        )
        .map_err(PipelineError::Project)?;
        self.notify(PipelineState::Created);

        let ctx = PipelineContext::new(self.client.as_ref(), &self.prompts, request);
        let mut site = ProcessingSite::new();
        let mut reviewed = false;

        for stage in &self.stages {
            let name = stage.name();
            if name == StageName::Review && request.skip_review {
                tracing::debug!("review skipped");
                continue;
            }

            tracing::info!(stage = %name, "stage started");
            let started = Instant::now();

            if let Err(source) = run_stage(stage.as_ref(), &mut site, &ctx, &project).await {
                tracing::warn!(stage = %name, error = %source, "stage failed");
                self.notify(PipelineState::Failed(name));
                return Err(PipelineError::Stage {
                    stage: name,
                    source,
                    project_dir: project.dir().to_path_buf(),
                });
            }

            tracing::info!(
                stage = %name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "stage finished"
            );
            reviewed |= name == StageName::Review;
            self.notify(PipelineState::after(name));
        }

        self.notify(PipelineState::Complete);

        Ok(BuildResult {
            project_dir: project.dir().to_path_buf(),
            index_path: project.index_path(),
            reviewed,
        })
    }

    fn notify(&self, state: PipelineState) {
        if state.is_terminal() {
            tracing::info!(%state, "pipeline finished");
        } else {
            tracing::debug!(%state, "pipeline state changed");
        }
        if let Some(observer) = &self.observer {
            observer(state);
        }
    }
}

/// Run a stage, persist its output, then hand it on.
async fn run_stage(
    stage: &dyn Stage,
    site: &mut ProcessingSite,
    ctx: &PipelineContext<'_>,
    project: &ProjectRecord,
) -> Result<(), StageError> {
    let output = stage.run(site, ctx).await?;
    project.persist(&output)?;
    site.apply(output);
    Ok(())
}
