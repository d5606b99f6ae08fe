//! User-level singleton records: settings and profile

use serde::{Deserialize, Serialize};

/// Target length of generated content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ContentLength {
    /// Approximate number of words requested from the model
    pub fn target_words(&self) -> usize {
        match self {
            ContentLength::Short => 500,
            ContentLength::Medium => 1000,
            ContentLength::Long => 1500,
        }
    }
}

impl std::fmt::Display for ContentLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentLength::Short => write!(f, "short"),
            ContentLength::Medium => write!(f, "medium"),
            ContentLength::Long => write!(f, "long"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Html,
    PlainText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Per-user defaults. Replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_tone: String,
    pub default_style: String,
    pub default_length: ContentLength,
    pub export_format: ExportFormat,
    pub include_hero_image: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_tone: "professional".to_string(),
            default_style: "informative".to_string(),
            default_length: ContentLength::Medium,
            export_format: ExportFormat::Markdown,
            include_hero_image: true,
            theme: Theme::System,
        }
    }
}

/// Author profile. Replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_targets() {
        assert_eq!(ContentLength::Short.target_words(), 500);
        assert_eq!(ContentLength::Medium.target_words(), 1000);
        assert_eq!(ContentLength::Long.target_words(), 1500);
    }

    #[test]
    fn test_settings_wire_format() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["defaultLength"], "medium");
        assert_eq!(json["exportFormat"], "markdown");
        assert_eq!(json["theme"], "system");

        let parsed: Settings = serde_json::from_value(serde_json::json!({
            "defaultTone": "casual",
            "defaultStyle": "listicle",
            "defaultLength": "short",
            "exportFormat": "plainText",
            "includeHeroImage": false,
            "theme": "dark"
        }))
        .unwrap();
        assert_eq!(parsed.default_length, ContentLength::Short);
        assert_eq!(parsed.export_format, ExportFormat::PlainText);
    }
}
