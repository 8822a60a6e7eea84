//! Inspector configuration persistence
//!
//! Every recognized option is an explicit typed field with a documented
//! default. Stored in `~/.config/scopelens/config.yaml`; hosts may instead
//! deserialize this struct from their own settings store.

use serde::{Deserialize, Serialize};

/// How extent highlights are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightShape {
    /// Zero-width regions under each character
    #[default]
    Underline,
    /// Outlined box around the extent
    Outline,
    /// Filled region
    Solid,
}

/// Inspector configuration that persists across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Show the first scope in the status bar
    #[serde(default)]
    pub show_statusbar: bool,
    /// Write the report to the output panel
    #[serde(default)]
    pub show_panel: bool,
    /// Show the report in a popup at the caret
    #[serde(default)]
    pub show_popup: bool,
    /// Echo the report through the log sink
    #[serde(default)]
    pub console_log: bool,
    /// Copy queried scope names to the clipboard
    #[serde(default)]
    pub clipboard: bool,
    /// Query every selection instead of just the first
    #[serde(default)]
    pub multiselect: bool,
    /// Include the extent as (line, char) pairs
    #[serde(default)]
    pub extent_line_char: bool,
    /// Include the extent as point offsets
    #[serde(default)]
    pub extent_points: bool,
    /// Highlight the scope extent in the buffer
    #[serde(default)]
    pub highlight_extent: bool,
    /// Scope name used to color the extent highlight
    #[serde(default = "default_highlight_scope")]
    pub highlight_scope: String,
    /// Highlight drawing style
    #[serde(default)]
    pub highlight_style: HighlightShape,
    /// Skip highlighting extents larger than this many points
    #[serde(default = "default_highlight_max_size")]
    pub highlight_max_size: usize,
    /// Resolve and report color scheme info (selectors, colors, style)
    #[serde(default)]
    pub show_color_scheme_info: bool,
    /// Explicit popup CSS resource path (overrides dark/light selection)
    #[serde(default)]
    pub css_file: Option<String>,
    /// Popup CSS used when the scheme is dark
    #[serde(default = "default_dark_css")]
    pub dark_css_override: String,
    /// Popup CSS used when the scheme is light
    #[serde(default = "default_light_css")]
    pub light_css_override: String,
}

fn default_highlight_scope() -> String {
    "invalid".to_string()
}

fn default_highlight_max_size() -> usize {
    100
}

fn default_dark_css() -> String {
    "css/dark.css".to_string()
}

fn default_light_css() -> String {
    "css/light.css".to_string()
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            show_statusbar: false,
            show_panel: false,
            show_popup: false,
            console_log: false,
            clipboard: false,
            multiselect: false,
            extent_line_char: false,
            extent_points: false,
            highlight_extent: false,
            highlight_scope: default_highlight_scope(),
            highlight_style: HighlightShape::default(),
            highlight_max_size: default_highlight_max_size(),
            show_color_scheme_info: false,
            css_file: None,
            dark_css_override: default_dark_css(),
            light_css_override: default_light_css(),
        }
    }
}

impl InspectorConfig {
    /// Everything on: the configuration the integration tests and the demo
    /// CLI report with
    pub fn full_report() -> Self {
        Self {
            show_statusbar: true,
            show_panel: true,
            show_popup: true,
            console_log: true,
            clipboard: false,
            multiselect: true,
            extent_line_char: true,
            extent_points: true,
            highlight_extent: true,
            show_color_scheme_info: true,
            ..Default::default()
        }
    }

    /// Parse from a YAML string, falling back to defaults on error
    pub fn from_yaml_lenient(yaml: &str) -> Self {
        match serde_yaml::from_str(yaml) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to parse inspector config: {}", e);
                Self::default()
            }
        }
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let config = Self::from_yaml_lenient(&content);
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InspectorConfig::default();
        assert!(!config.show_popup);
        assert_eq!(config.highlight_scope, "invalid");
        assert_eq!(config.highlight_max_size, 100);
        assert_eq!(config.highlight_style, HighlightShape::Underline);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = InspectorConfig::from_yaml_lenient("show_popup: true\nhighlight_style: outline\n");
        assert!(config.show_popup);
        assert_eq!(config.highlight_style, HighlightShape::Outline);
        assert_eq!(config.highlight_max_size, 100);
    }

    #[test]
    fn test_bad_yaml_falls_back() {
        let config = InspectorConfig::from_yaml_lenient("highlight_max_size: [nope");
        assert_eq!(config.highlight_max_size, 100);
    }
}
