//! Code generation stage.
//!
//! Embeds the content document and design spec as pretty-printed JSON and
//! asks for one self-contained HTML file.

use async_trait::async_trait;

use super::finish_markup;
use crate::build::json::ParseError;
use crate::build::pipeline::{
    PipelineContext, ProcessingSite, Stage, StageError, StageName, StageOutput,
};
use crate::build::prompts::{CODE_TEMPLATE, CodePrompt};

const SYSTEM_PROMPT: &str = "\
You are an expert frontend developer specializing in modern, responsive websites.
You write clean semantic HTML5, modern CSS3 and vanilla JavaScript.

Your code always uses:
- Semantic HTML elements
- CSS custom properties (variables)
- Mobile-first responsive design
- Accessibility standards (ARIA, proper contrast)
- Smooth animations and transitions
- Cross-browser compatible features

Generate COMPLETE, production-ready code. Never use placeholders or comments like \"add more here\".
Always output the complete HTML file with embedded CSS and JavaScript.";

/// Stage that generates the page from content and design.
pub struct CodeStage;

#[async_trait]
impl Stage for CodeStage {
    fn name(&self) -> StageName {
        StageName::Code
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn temperature(&self) -> f32 {
        0.3
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
        let design = site
            .design
            .as_ref()
            .ok_or(StageError::MissingInput("design"))?;

        let content = serde_json::to_string_pretty(content).map_err(ParseError::from)?;
        let design = serde_json::to_string_pretty(design).map_err(ParseError::from)?;
        let prompt = ctx.prompts.render(
            CODE_TEMPLATE,
            &CodePrompt {
                description: &ctx.request.description,
                content: &content,
                design: &design,
            },
        )?;

        let text = ctx
            .complete(self.name(), self.system_prompt(), &prompt, self.temperature())
            .await?;

        Ok(StageOutput::Artifact(finish_markup(&text)?))
    }
}
