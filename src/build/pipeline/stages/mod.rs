//! Default pipeline stages.
//!
//! A generation run goes through:
//!
//! 1. **ContentStage** - Write the site copy as a structured document
//! 2. **DesignStage** - Pick palette, typography and layout
//! 3. **CodeStage** - Produce the complete HTML document
//! 4. **ReviewStage** - Polish the document (optional)

mod code;
mod content;
mod design;
mod review;

pub use code::CodeStage;
pub use content::ContentStage;
pub use design::DesignStage;
pub use review::ReviewStage;

use crate::build::json::ParseError;
use crate::build::markup::strip_code_fence;

/// Strip the boundary fence from a markup completion and reject empty pages.
fn finish_markup(raw: &str) -> Result<String, ParseError> {
    let html = strip_code_fence(raw);
    if html.is_empty() {
        return Err(ParseError::EmptyDocument);
    }
    Ok(html)
}
