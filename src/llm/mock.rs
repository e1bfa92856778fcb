//! Scripted completion client for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionClient, CompletionError};

/// One recorded call to [`ScriptedClient::complete`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
}

/// Returns queued responses in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    pub fn with_error(self, error: CompletionError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, response: Result<String, CompletionError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            temperature,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(CompletionError::InvalidResponse(
                    "no scripted response left".to_string(),
                ))
            })
    }
}

/// A content completion that satisfies the content schema.
pub const CONTENT_JSON: &str = r##"{
    "hero": {
        "headline": "Fresh Bread, Every Morning",
        "subheadline": "A neighbourhood bakery baking by hand since 1998.",
        "cta_primary": "Order Now",
        "cta_secondary": "See the Menu"
    },
    "about": {
        "title": "Our Story",
        "description": "We started with one oven and a sourdough starter."
    },
    "features": [
        { "title": "Sourdough", "description": "Slow fermented for 48 hours.", "icon": "bread" },
        { "title": "Pastries", "description": "Laminated by hand every day.", "icon": "croissant" },
        { "title": "Coffee", "description": "Roasted two streets away.", "icon": "coffee" }
    ],
    "testimonials": [
        { "quote": "Best loaf in town.", "author": "Ana Ruiz", "role": "Chef, Casa Ruiz" }
    ],
    "contact": {
        "title": "Visit Us",
        "description": "Open every day from 7am."
    },
    "footer": {
        "tagline": "Baked with patience.",
        "copyright": "© 2025 Corner Bakery"
    }
}"##;

/// A design completion that satisfies the design schema.
pub const DESIGN_JSON: &str = r##"{
    "theme": { "mode": "light", "style": "elegant" },
    "colors": {
        "primary": "#8B5E3C",
        "secondary": "#F4E1C1",
        "accent": "#D94F30",
        "background": "#FFFBF5",
        "surface": "#FFFFFF",
        "text_primary": "#2B2118",
        "text_secondary": "#6B5B4E",
        "gradient": "linear-gradient(135deg, #8B5E3C 0%, #D94F30 100%)"
    },
    "typography": {
        "font_heading": "Playfair Display",
        "font_body": "Inter",
        "heading_sizes": { "h1": "4rem", "h2": "2.5rem", "h3": "1.75rem" },
        "body_size": "1rem",
        "line_height": 1.6
    },
    "spacing": {
        "section_padding": "6rem",
        "element_gap": "2rem",
        "container_max_width": "1200px"
    },
    "effects": {
        "border_radius": "12px",
        "box_shadow": "0 10px 40px rgba(0,0,0,0.1)",
        "glass_effect": false,
        "animations": ["fade-in", "slide-up", "hover-lift"]
    },
    "layout": {
        "hero_style": "split",
        "navigation": "sticky",
        "sections_order": ["hero", "features", "about", "testimonials", "contact", "footer"]
    }
}"##;

/// A complete markup document as the code stage would return it.
pub const INDEX_HTML: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head><title>Corner Bakery</title></head>\n<body><h1>Fresh Bread, Every Morning</h1></body>\n</html>";
