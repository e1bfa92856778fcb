//! Visual design stage.

use async_trait::async_trait;

use crate::build::design::DesignSpec;
use crate::build::pipeline::{
    PipelineContext, ProcessingSite, Stage, StageError, StageName, StageOutput,
};
use crate::build::prompts::{DESIGN_TEMPLATE, DesignPrompt};

const SYSTEM_PROMPT: &str = "\
You are an expert UI/UX designer specializing in modern web design.
You create beautiful, modern and user-friendly design specifications.

You understand color theory, typography, spacing and current design trends:
- Glassmorphism
- Gradients
- Dark and light modes
- Micro-animations
- Responsive design

Respond with valid JSON only, no additional text.";

/// Stage that turns the copy into a design spec.
pub struct DesignStage;

#[async_trait]
impl Stage for DesignStage {
    fn name(&self) -> StageName {
        StageName::Design
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn temperature(&self) -> f32 {
        0.7
    }

    async fn run(
        &self,
        site: &ProcessingSite,
        ctx: &PipelineContext<'_>,
    ) -> Result<StageOutput, StageError> {
        let content = site
            .content
            .as_ref()
            .ok_or(StageError::MissingInput("content"))?;

        let request = ctx.request;
        let preview = content.preview();
        let prompt = ctx.prompts.render(
            DESIGN_TEMPLATE,
            &DesignPrompt {
                description: &request.description,
                style: request.style.as_str(),
                content_preview: &preview,
            },
        )?;

        let text = ctx
            .complete(self.name(), self.system_prompt(), &prompt, self.temperature())
            .await?;
        let design = DesignSpec::from_completion(&text)?;

        Ok(StageOutput::Design(design))
    }
}
