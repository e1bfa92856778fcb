mod content;
mod design;
mod json;
mod markup;
pub mod pipeline;
mod project;
mod prompts;
mod request;

pub use pipeline::{Coordinator, PipelineError, PipelineState};
pub use project::ProjectRecord;
pub use request::GenerationRequest;
