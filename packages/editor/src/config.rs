use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "liveedit.config.json";

/// Live editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Pixels moved by one nudge
    #[serde(default = "default_nudge_step")]
    pub nudge_step: i64,

    /// Position used when `top`/`left` is absent or not numeric
    #[serde(default)]
    pub default_offset: i64,

    /// Element ids are `<idPrefix>-<n>`
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Attribute carrying the element id in the annotated markup
    #[serde(default = "default_marker_attribute")]
    pub marker_attribute: String,

    /// Add `position: absolute` to editable elements that declare no position
    #[serde(default = "default_true")]
    pub inject_absolute_position: bool,

    /// Image text starting with one of these is written back to `src`
    #[serde(default = "default_image_source_prefixes")]
    pub image_source_prefixes: Vec<String>,
}

fn default_nudge_step() -> i64 {
    10
}

fn default_id_prefix() -> String {
    "element".to_string()
}

fn default_marker_attribute() -> String {
    "data-edit-id".to_string()
}

fn default_true() -> bool {
    true
}

fn default_image_source_prefixes() -> Vec<String> {
    vec!["http".to_string(), "data:".to_string(), "./".to_string()]
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            nudge_step: default_nudge_step(),
            default_offset: 0,
            id_prefix: default_id_prefix(),
            marker_attribute: default_marker_attribute(),
            inject_absolute_position: true,
            image_source_prefixes: default_image_source_prefixes(),
        }
    }
}

impl EditorConfig {
    /// Parse config from JSON text; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a directory, falling back to defaults if none exists
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, EditorError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), EditorError> {
        // Extraction strips the marker from every element, so it must not
        // collide with an attribute the markup itself uses
        let marker = self.marker_attribute.to_ascii_lowercase();
        if !marker.starts_with("data-") || marker.len() == "data-".len() {
            return Err(EditorError::InvalidConfig {
                field: "markerAttribute",
                message: format!("must be a data- attribute, got {:?}", self.marker_attribute),
            });
        }
        if marker.chars().any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '>' | '/')) {
            return Err(EditorError::InvalidConfig {
                field: "markerAttribute",
                message: "is not a valid attribute name".to_string(),
            });
        }
        if self.id_prefix.is_empty() {
            return Err(EditorError::InvalidConfig {
                field: "idPrefix",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Whether image text should be written back to `src`
    pub fn is_image_source(&self, text: &str) -> bool {
        self.image_source_prefixes
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()))
    }
}
