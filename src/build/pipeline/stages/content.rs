//! Content writing stage.

use async_trait::async_trait;

use crate::build::content::ContentDocument;
use crate::build::pipeline::{
    PipelineContext, ProcessingSite, Stage, StageError, StageName, StageOutput,
};
use crate::build::prompts::{CONTENT_TEMPLATE, ContentPrompt};

const SYSTEM_PROMPT: &str = "\
You are an expert website copywriter.
You write compelling, engaging and SEO-friendly content for websites.

You produce structured JSON covering:
- Hero section (headline, subheadline, call-to-action texts)
- About section
- Features or services (3-4 items)
- Testimonials (2-3 quotes)
- Contact section
- Footer

Keep the tone professional and tailored to the business or purpose described.
Respond with valid JSON only, no additional text.";

/// Stage that writes the site copy.
pub struct ContentStage;

#[async_trait]
impl Stage for ContentStage {
    fn name(&self) -> StageName {
        StageName::Content
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn temperature(&self) -> f32 {
        0.7
    }

    async fn run(
        &self,
        _site: &ProcessingSite,
        ctx: &PipelineContext<'_>,
    ) -> Result<StageOutput, StageError> {
        let request = ctx.request;
        let prompt = ctx.prompts.render(
            CONTENT_TEMPLATE,
            &ContentPrompt {
                description: &request.description,
                website_type: request.website_type.as_str(),
            },
        )?;

        let text = ctx
            .complete(self.name(), self.system_prompt(), &prompt, self.temperature())
            .await?;
        let content = ContentDocument::from_completion(&text)?;

        Ok(StageOutput::Content(content))
    }
}
