//! User prompt templates, rendered with Tera.
//!
//! Templates are compiled into the binary and registered once at start-up.
//! They are plain text, so autoescaping is off.

use serde::Serialize;
use tera::{Context, Tera};

pub const CONTENT_TEMPLATE: &str = "content.txt";
pub const DESIGN_TEMPLATE: &str = "design.txt";
pub const CODE_TEMPLATE: &str = "code.txt";
pub const REVIEW_TEMPLATE: &str = "review.txt";

#[derive(thiserror::Error, Debug)]
pub enum PromptError {
    #[error("prompt template error: {0}")]
    Template(#[from] tera::Error),
}

/// Context for the content stage prompt.
#[derive(Debug, Serialize)]
pub struct ContentPrompt<'a> {
    pub description: &'a str,
    pub website_type: &'a str,
}

/// Context for the design stage prompt.
#[derive(Debug, Serialize)]
pub struct DesignPrompt<'a> {
    pub description: &'a str,
    pub style: &'a str,
    pub content_preview: &'a str,
}

/// Context for the code stage prompt. Content and design are embedded as JSON text.
#[derive(Debug, Serialize)]
pub struct CodePrompt<'a> {
    pub description: &'a str,
    pub content: &'a str,
    pub design: &'a str,
}

/// Context for the review stage prompt.
#[derive(Debug, Serialize)]
pub struct ReviewPrompt<'a> {
    pub description: &'a str,
    pub html_code: &'a str,
}

/// The prompt renderer, wrapping Tera.
pub struct PromptRenderer {
    tera: Tera,
}

impl PromptRenderer {
    /// Create a renderer with the built-in stage templates.
    pub fn new() -> Result<Self, PromptError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            (CONTENT_TEMPLATE, include_str!("prompts/content.txt")),
            (DESIGN_TEMPLATE, include_str!("prompts/design.txt")),
            (CODE_TEMPLATE, include_str!("prompts/code.txt")),
            (REVIEW_TEMPLATE, include_str!("prompts/review.txt")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a named template with the given context.
    pub fn render<C: Serialize>(&self, template: &str, context: &C) -> Result<String, PromptError> {
        let context = Context::from_serialize(context)?;
        Ok(self.tera.render(template, &context)?)
    }
}
