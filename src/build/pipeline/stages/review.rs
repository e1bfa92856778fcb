//! Review stage.
//!
//! Sends the generated page back for a polish pass. The reviewed page
//! replaces the original artifact.

use async_trait::async_trait;

use super::finish_markup;
use crate::build::pipeline::{
    PipelineContext, ProcessingSite, Stage, StageError, StageName, StageOutput,
};
use crate::build::prompts::{REVIEW_TEMPLATE, ReviewPrompt};

const SYSTEM_PROMPT: &str = "\
You are a senior frontend developer and code reviewer.
You review website code and improve it for:

1. Code quality: clean, well organized, properly indented
2. Performance: optimized CSS, efficient JavaScript
3. Accessibility: ARIA labels, proper contrast, keyboard navigation
4. SEO: meta tags, semantic HTML, proper headings
5. Visual polish: refined animations, spacing and colors
6. Responsiveness: a better mobile experience
7. Cross-browser support: vendor prefixes where needed

Output the IMPROVED, COMPLETE HTML file.
Keep the core design intact.
Do NOT remove any sections. Only enhance what exists.";

/// Stage that reviews and improves the generated page.
pub struct ReviewStage;

#[async_trait]
impl Stage for ReviewStage {
    fn name(&self) -> StageName {
        StageName::Review
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn temperature(&self) -> f32 {
        0.4
    }

    async fn run(
        &self,
        site: &ProcessingSite,
        ctx: &PipelineContext<'_>,
    ) -> Result<StageOutput, StageError> {
        let html = site
            .artifact
            .as_deref()
            .ok_or(StageError::MissingInput("artifact"))?;

        let prompt = ctx.prompts.render(
            REVIEW_TEMPLATE,
            &ReviewPrompt {
                description: &ctx.request.description,
                html_code: html,
            },
        )?;

        let text = ctx
            .complete(self.name(), self.system_prompt(), &prompt, self.temperature())
            .await?;

        Ok(StageOutput::Artifact(finish_markup(&text)?))
    }
}
