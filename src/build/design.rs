//! Visual design specification produced by the design stage.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use super::json::{ParseError, parse_structured};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSpec {
    pub theme: Theme,
    pub colors: Colors,
    pub typography: Typography,
    pub spacing: Spacing,
    pub effects: Effects,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// "dark" or "light"
    pub mode: String,
    pub style: String,
}

/// The palette. Always exactly eight named entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text_primary: String,
    pub text_secondary: String,
    /// A CSS gradient expression rather than a single color
    pub gradient: String,
}

impl Colors {
    /// Name/value pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("background", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("text_primary", self.text_primary.as_str()),
            ("text_secondary", self.text_secondary.as_str()),
            ("gradient", self.gradient.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub font_heading: String,
    pub font_body: String,
    /// Heading level to CSS size, e.g. "h1" -> "4rem"
    pub heading_sizes: BTreeMap<String, String>,
    pub body_size: String,
    #[serde(deserialize_with = "string_or_number")]
    pub line_height: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub section_padding: String,
    pub element_gap: String,
    pub container_max_width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    pub border_radius: String,
    pub box_shadow: String,
    pub glass_effect: bool,
    pub animations: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub hero_style: String,
    pub navigation: String,
    pub sections_order: Vec<String>,
}

/// Models write unitless CSS values either as `"1.6"` or `1.6`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

impl DesignSpec {
    /// Parse a raw completion and check it against the design schema.
    pub fn from_completion(text: &str) -> Result<Self, ParseError> {
        let design: Self = parse_structured(text)?;
        design.validate()?;
        Ok(design)
    }

    /// Check the constraints serde can't express.
    pub fn validate(&self) -> Result<(), ParseError> {
        if let Some((name, _)) = self
            .colors
            .entries()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(ParseError::Schema(format!("color '{name}' is empty")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::DESIGN_JSON;

    #[test]
    fn test_from_completion() {
        let design = DesignSpec::from_completion(DESIGN_JSON).unwrap();

        assert_eq!(design.theme.mode, "light");
        assert_eq!(design.colors.entries().len(), 8);
        assert_eq!(design.colors.entries()[7].0, "gradient");
        assert_eq!(design.typography.heading_sizes["h1"], "4rem");
        assert!(!design.effects.glass_effect);
        assert!(design.effects.animations.contains("hover-lift"));
        assert_eq!(design.layout.sections_order.first().map(String::as_str), Some("hero"));
    }

    #[test]
    fn test_line_height_accepts_number_or_string() {
        let design = DesignSpec::from_completion(DESIGN_JSON).unwrap();
        assert_eq!(design.typography.line_height, "1.6");

        let mut value: serde_json::Value = serde_json::from_str(DESIGN_JSON).unwrap();
        value["typography"]["line_height"] = serde_json::json!("1.75");
        let design = DesignSpec::from_completion(&value.to_string()).unwrap();
        assert_eq!(design.typography.line_height, "1.75");
    }

    #[test]
    fn test_missing_color_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(DESIGN_JSON).unwrap();
        value["colors"].as_object_mut().unwrap().remove("surface");

        let err = DesignSpec::from_completion(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("surface"));
    }

    #[test]
    fn test_empty_color_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(DESIGN_JSON).unwrap();
        value["colors"]["accent"] = serde_json::json!(" ");

        let err = DesignSpec::from_completion(&value.to_string()).unwrap_err();
        assert!(matches!(err, ParseError::Schema(ref m) if m == "color 'accent' is empty"));
    }
}
