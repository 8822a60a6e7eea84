//! Color scheme documents and rule sets
//!
//! A scheme is an ordered list of (selector, colors, font style) rules plus
//! global defaults. Documents are YAML (the native format) or JSON; both
//! deserialize into the same [`SchemeData`] shape before being normalized
//! into a [`ThemeRuleSet`] with parsed colors and selectors.
//!
//! Scheme loading priority:
//! 1. Host resource loader (virtual paths)
//! 2. Embedded: built-in schemes compiled into the binary

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::color::Color;
use crate::host::{ResourceError, ResourceLoader};
use crate::selector::Selector;

// Embed scheme YAML files at compile time
pub const LENS_DARK_YAML: &str = include_str!("../themes/dark.yaml");
pub const LENS_LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// A built-in scheme entry
pub struct BuiltinScheme {
    /// Stable identifier (e.g. "lens-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in schemes
pub const BUILTIN_SCHEMES: &[BuiltinScheme] = &[
    BuiltinScheme {
        id: "lens-dark",
        yaml: LENS_DARK_YAML,
    },
    BuiltinScheme {
        id: "lens-light",
        yaml: LENS_LIGHT_YAML,
    },
];

/// Structurally invalid scheme input
#[derive(Debug, Error)]
pub enum ThemeParseError {
    #[error("scheme document parse error: {0}")]
    Document(String),
    #[error("scheme rule {index}: {reason}")]
    Rule { index: usize, reason: String },
    #[error("unknown builtin scheme id: {0}")]
    UnknownBuiltin(String),
}

/// Failure to obtain a scheme through the host loader
#[derive(Debug, Error)]
pub enum SchemeLoadError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Parse(#[from] ThemeParseError),
}

/// Raw scheme document as deserialized from YAML/JSON
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeData {
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub globals: GlobalsData,
    #[serde(default)]
    pub rules: Vec<RuleData>,
}

/// Global defaults (raw strings from the document)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalsData {
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}

/// One highlighting rule (raw strings from the document)
#[derive(Debug, Clone, Deserialize)]
pub struct RuleData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub font_style: Option<String>,
}

/// Bold/italic flags from a rule's `font_style` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
}

impl FontStyle {
    /// Parse a space-separated style list ("bold italic").
    ///
    /// Unknown words are ignored with a warning; an empty string is a valid
    /// explicit reset to the plain style.
    pub fn parse(s: &str) -> Self {
        let mut style = FontStyle::default();
        for word in s.split_whitespace() {
            match word {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                other => tracing::warn!("ignoring unknown font style {:?}", other),
            }
        }
        style
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.bold, self.italic) {
            (true, true) => write!(f, "bold italic"),
            (true, false) => write!(f, "bold"),
            (false, true) => write!(f, "italic"),
            (false, false) => write!(f, "normal"),
        }
    }
}

/// One normalized highlighting rule
#[derive(Debug, Clone)]
pub struct ThemeRule {
    pub name: Option<String>,
    pub selector: Selector,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    /// `Some` when the rule declares `font_style`, including an explicit
    /// empty reset
    pub font_style: Option<FontStyle>,
}

/// A parsed scheme: ordered rules plus resolved global defaults
#[derive(Debug, Clone)]
pub struct ThemeRuleSet {
    pub name: String,
    /// Where the scheme was loaded from, when it came through a loader
    pub source: Option<PathBuf>,
    pub foreground: Color,
    pub background: Color,
    pub rules: Vec<ThemeRule>,
}

impl ThemeRuleSet {
    /// Hard-coded fallback foreground when the document has no global
    pub const FALLBACK_FOREGROUND: Color = Color::rgb(0x00, 0x00, 0x00);
    /// Hard-coded fallback background when the document has no global
    pub const FALLBACK_BACKGROUND: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Parse a scheme from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeParseError> {
        let data: SchemeData =
            serde_yaml::from_str(yaml).map_err(|e| ThemeParseError::Document(e.to_string()))?;
        Self::from_data(data)
    }

    /// Parse a scheme from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ThemeParseError> {
        let data: SchemeData =
            serde_json::from_str(json).map_err(|e| ThemeParseError::Document(e.to_string()))?;
        Self::from_data(data)
    }

    /// Load a built-in scheme by id
    pub fn from_builtin(id: &str) -> Result<Self, ThemeParseError> {
        let entry = BUILTIN_SCHEMES
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ThemeParseError::UnknownBuiltin(id.to_string()))?;
        Self::from_yaml(entry.yaml)
    }

    /// Normalize raw document data into an ordered rule set.
    ///
    /// A rule without a `scope`, or with an unparsable selector, fails the
    /// whole document with the offending rule index. A malformed color in an
    /// otherwise valid rule degrades to "attribute not set" with a warning,
    /// so one bad value cannot take the scheme down.
    pub fn from_data(data: SchemeData) -> Result<Self, ThemeParseError> {
        let foreground = resolve_global(
            data.globals.foreground.as_deref(),
            Self::FALLBACK_FOREGROUND,
            "foreground",
        );
        let background = resolve_global(
            data.globals.background.as_deref(),
            Self::FALLBACK_BACKGROUND,
            "background",
        );

        let mut rules = Vec::with_capacity(data.rules.len());
        for (index, rule) in data.rules.into_iter().enumerate() {
            let scope = rule.scope.ok_or_else(|| ThemeParseError::Rule {
                index,
                reason: "missing scope selector".to_string(),
            })?;
            let selector = Selector::parse(&scope).map_err(|e| ThemeParseError::Rule {
                index,
                reason: e.to_string(),
            })?;
            rules.push(ThemeRule {
                name: rule.name,
                selector,
                foreground: parse_rule_color(rule.foreground.as_deref(), index, "foreground"),
                background: parse_rule_color(rule.background.as_deref(), index, "background"),
                font_style: rule.font_style.as_deref().map(FontStyle::parse),
            });
        }

        Ok(Self {
            name: data.name,
            source: None,
            foreground,
            background,
            rules,
        })
    }

    /// Whether the global background reads as a dark theme
    pub fn is_dark(&self) -> bool {
        self.background.luminance() < 0.5
    }
}

/// Load a scheme through the host resource loader.
///
/// `.json` paths parse as JSON, everything else as YAML. Builtin scheme ids
/// resolve from the embedded registry without touching the loader.
pub fn load_scheme(
    path: &str,
    loader: &dyn ResourceLoader,
) -> Result<ThemeRuleSet, SchemeLoadError> {
    if let Some(builtin) = BUILTIN_SCHEMES.iter().find(|s| s.id == path) {
        tracing::debug!("loading builtin scheme {}", builtin.id);
        let mut scheme = ThemeRuleSet::from_yaml(builtin.yaml)?;
        scheme.source = Some(PathBuf::from(builtin.id));
        return Ok(scheme);
    }

    let raw = loader.load(path)?;
    let mut scheme = if Path::new(path).extension().is_some_and(|ext| ext == "json") {
        ThemeRuleSet::from_json(&raw)?
    } else {
        ThemeRuleSet::from_yaml(&raw)?
    };
    scheme.source = Some(PathBuf::from(path));
    tracing::info!("loaded scheme {:?} from {}", scheme.name, path);
    Ok(scheme)
}

fn resolve_global(raw: Option<&str>, fallback: Color, attribute: &str) -> Color {
    match raw {
        None => fallback,
        Some(s) => match Color::parse(s) {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!("scheme global {}: {}, using fallback", attribute, e);
                fallback
            }
        },
    }
}

fn parse_rule_color(raw: Option<&str>, index: usize, attribute: &str) -> Option<Color> {
    match raw {
        None => None,
        Some(s) => match Color::parse(s) {
            Ok(color) => Some(color),
            Err(e) => {
                tracing::warn!("scheme rule {} {}: {}, attribute dropped", index, attribute, e);
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_style_parse() {
        let style = FontStyle::parse("bold italic");
        assert!(style.bold && style.italic);
        assert_eq!(FontStyle::parse(""), FontStyle::default());
        assert_eq!(FontStyle::parse("underline"), FontStyle::default());
    }

    #[test]
    fn test_font_style_display() {
        let bold = FontStyle {
            bold: true,
            italic: false,
        };
        assert_eq!(bold.to_string(), "bold");
        assert_eq!(FontStyle::default().to_string(), "normal");
    }

    #[test]
    fn test_builtin_schemes_parse() {
        for builtin in BUILTIN_SCHEMES {
            let scheme = ThemeRuleSet::from_yaml(builtin.yaml)
                .unwrap_or_else(|e| panic!("failed to parse scheme '{}': {}", builtin.id, e));
            assert!(
                !scheme.name.is_empty(),
                "scheme '{}' has empty name",
                builtin.id
            );
            assert!(!scheme.rules.is_empty());
        }
    }

    #[test]
    fn test_is_dark() {
        let dark = ThemeRuleSet::from_builtin("lens-dark").unwrap();
        let light = ThemeRuleSet::from_builtin("lens-light").unwrap();
        assert!(dark.is_dark());
        assert!(!light.is_dark());
    }
}
