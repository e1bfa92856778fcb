//! Site state carried through the pipeline.

use crate::build::content::ContentDocument;
use crate::build::design::DesignSpec;

/// What a stage hands back to the coordinator.
#[derive(Debug, Clone)]
pub enum StageOutput {
    Content(ContentDocument),
    Design(DesignSpec),
    /// A complete HTML document. Replaces any previous artifact.
    Artifact(String),
}

/// The site being generated.
///
/// Evolves through pipeline stages:
///
/// 1. After content: `content` populated
/// 2. After design: `design` populated
/// 3. After code: `artifact` holds the generated page
/// 4. After review: `artifact` replaced by the reviewed page
#[derive(Debug, Default)]
pub struct ProcessingSite {
    pub content: Option<ContentDocument>,
    pub design: Option<DesignSpec>,
    pub artifact: Option<String>,
}

impl ProcessingSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a stage's output into the site.
    pub fn apply(&mut self, output: StageOutput) {
        match output {
            StageOutput::Content(content) => self.content = Some(content),
            StageOutput::Design(design) => self.design = Some(design),
            StageOutput::Artifact(html) => self.artifact = Some(html),
        }
    }
}
