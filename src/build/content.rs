//! Structured website copy produced by the content stage.

use serde::{Deserialize, Serialize};

use super::json::{ParseError, parse_structured};

/// Accepted number of feature entries.
pub const FEATURE_COUNT: std::ops::RangeInclusive<usize> = 3..=4;

/// All copy for a single-page site, section by section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub hero: Hero,
    pub about: About,
    pub features: Vec<Feature>,
    pub testimonials: Vec<Testimonial>,
    pub contact: Contact,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
    pub cta_primary: String,
    pub cta_secondary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct About {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
    /// Suggested icon name
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    /// Job title and company
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    pub tagline: String,
    pub copyright: String,
}

impl ContentDocument {
    /// Parse a raw completion and check it against the content schema.
    pub fn from_completion(text: &str) -> Result<Self, ParseError> {
        let content: Self = parse_structured(text)?;
        content.validate()?;
        Ok(content)
    }

    /// Check the constraints serde can't express.
    pub fn validate(&self) -> Result<(), ParseError> {
        if !FEATURE_COUNT.contains(&self.features.len()) {
            return Err(ParseError::Schema(format!(
                "expected {} to {} features, got {}",
                FEATURE_COUNT.start(),
                FEATURE_COUNT.end(),
                self.features.len()
            )));
        }
        Ok(())
    }

    /// One-line summary handed to the design stage instead of the full document.
    pub fn preview(&self) -> String {
        format!("Hero: {}", self.hero.headline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::CONTENT_JSON;

    #[test]
    fn test_from_completion() {
        let content = ContentDocument::from_completion(CONTENT_JSON).unwrap();

        assert_eq!(content.hero.headline, "Fresh Bread, Every Morning");
        assert_eq!(content.features.len(), 3);
        assert_eq!(content.features[1].icon, "croissant");
        assert_eq!(content.testimonials[0].author, "Ana Ruiz");
        assert_eq!(content.preview(), "Hero: Fresh Bread, Every Morning");
    }

    #[test]
    fn test_feature_count_is_checked() {
        let mut value: serde_json::Value = serde_json::from_str(CONTENT_JSON).unwrap();
        let features = value["features"].as_array_mut().unwrap();
        features.truncate(2);

        let err = ContentDocument::from_completion(&value.to_string()).unwrap_err();
        assert!(matches!(err, ParseError::Schema(ref m) if m == "expected 3 to 4 features, got 2"));

        let features = value["features"].as_array_mut().unwrap();
        let first = features[0].clone();
        for _ in 0..3 {
            features.push(first.clone());
        }
        assert_eq!(features.len(), 5);
        assert!(ContentDocument::from_completion(&value.to_string()).is_err());
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(CONTENT_JSON).unwrap();
        value.as_object_mut().unwrap().remove("footer");

        let err = ContentDocument::from_completion(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("footer"));
    }
}
