//! The immutable input to a generation run.

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

/// A request field outside the accepted choices.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown website type '{0}' (expected one of: business, portfolio, landing, blog, saas)")]
    UnknownWebsiteType(String),

    #[error("unknown style '{0}' (expected one of: modern, minimal, bold, elegant, playful)")]
    UnknownStyle(String),

    #[error("website description must not be empty")]
    EmptyDescription,

    #[error("invalid project name '{0}': must be a single directory name")]
    InvalidProjectName(String),
}

/// What kind of site is being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WebsiteType {
    #[default]
    Business,
    Portfolio,
    Landing,
    Blog,
    Saas,
}

impl WebsiteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebsiteType::Business => "business",
            WebsiteType::Portfolio => "portfolio",
            WebsiteType::Landing => "landing",
            WebsiteType::Blog => "blog",
            WebsiteType::Saas => "saas",
        }
    }
}

impl FromStr for WebsiteType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(WebsiteType::Business),
            "portfolio" => Ok(WebsiteType::Portfolio),
            "landing" => Ok(WebsiteType::Landing),
            "blog" => Ok(WebsiteType::Blog),
            "saas" => Ok(WebsiteType::Saas),
            _ => Err(ValidationError::UnknownWebsiteType(s.to_string())),
        }
    }
}

impl fmt::Display for WebsiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual style preference handed to the design stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    #[default]
    Modern,
    Minimal,
    Bold,
    Elegant,
    Playful,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Modern => "modern",
            Style::Minimal => "minimal",
            Style::Bold => "bold",
            Style::Elegant => "elegant",
            Style::Playful => "playful",
        }
    }
}

impl FromStr for Style {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(Style::Modern),
            "minimal" => Ok(Style::Minimal),
            "bold" => Ok(Style::Bold),
            "elegant" => Ok(Style::Elegant),
            "playful" => Ok(Style::Playful),
            _ => Err(ValidationError::UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one pipeline run needs to know about the site to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub description: String,
    pub website_type: WebsiteType,
    pub style: Style,
    pub skip_review: bool,
    /// Explicit project directory name; derived from the description if unset
    pub project_name: Option<String>,
}

impl GenerationRequest {
    /// A business site in the modern style, with review enabled.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            website_type: WebsiteType::default(),
            style: Style::default(),
            skip_review: false,
            project_name: None,
        }
    }

    /// Build a request from unvalidated text fields.
    pub fn parse(
        description: &str,
        website_type: &str,
        style: &str,
    ) -> Result<Self, ValidationError> {
        let request = Self::new(description)
            .with_website_type(website_type.parse()?)
            .with_style(style.parse()?);
        request.validate()?;
        Ok(request)
    }

    pub fn with_website_type(mut self, website_type: WebsiteType) -> Self {
        self.website_type = website_type;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_skip_review(mut self, skip_review: bool) -> Self {
        self.skip_review = skip_review;
        self
    }

    pub fn with_project_name(mut self, name: Option<String>) -> Self {
        self.project_name = name.filter(|n| !n.trim().is_empty());
        self
    }

    /// Check the fields that the type system can't.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if let Some(name) = &self.project_name
            && !is_plain_dir_name(name)
        {
            return Err(ValidationError::InvalidProjectName(name.clone()));
        }
        Ok(())
    }
}

/// A name that joins onto the output root as exactly one child directory.
fn is_plain_dir_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
