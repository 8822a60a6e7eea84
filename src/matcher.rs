//! Scheme resolution: which rules paint a scope
//!
//! For each style attribute (foreground, background, bold, italic) the
//! matcher picks, independently, the matching rule with the highest
//! (specificity, declaration order) and records the selector that won.
//! Attributes no rule sets fall back to the scheme globals. Resolution is
//! total: it never errors and always produces all four attributes.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::color::Color;
use crate::selector::{ScopePath, Specificity};
use crate::theme::{FontStyle, ThemeRuleSet};

/// Effective style for one scope, with per-attribute provenance.
///
/// Selector fields hold the winning rule's selector text, or an empty
/// string when the scheme default supplied the value. Style selectors are
/// only recorded for flags that resolved to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub foreground: Color,
    pub background: Color,
    pub style: FontStyle,
    pub foreground_selector: String,
    pub background_selector: String,
    pub bold_selector: String,
    pub italic_selector: String,
}

/// Resolves scopes against one parsed scheme.
///
/// Hold two instances to compare real and simulated-transparency
/// renderings; they never share state. Results are memoized per scope
/// string, so repeated queries over the same token are cheap.
pub struct ColorSchemeMatcher {
    theme: ThemeRuleSet,
    simulate_transparency: bool,
    cache: Mutex<HashMap<String, ResolvedStyle>>,
}

impl ColorSchemeMatcher {
    pub fn new(theme: ThemeRuleSet) -> Self {
        Self {
            theme,
            simulate_transparency: false,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// A matcher that flattens alpha-bearing colors against the resolved
    /// background, approximating what an opaque renderer would display
    pub fn simulated(theme: ThemeRuleSet) -> Self {
        Self {
            simulate_transparency: true,
            ..Self::new(theme)
        }
    }

    pub fn theme(&self) -> &ThemeRuleSet {
        &self.theme
    }

    /// Path of the scheme document, when it was loaded from one
    pub fn scheme_path(&self) -> Option<&Path> {
        self.theme.source.as_deref()
    }

    pub fn is_simulated(&self) -> bool {
        self.simulate_transparency
    }

    /// Resolve the effective style for a scope name.
    pub fn resolve(&self, scope: &str) -> ResolvedStyle {
        if let Ok(cache) = self.cache.lock() {
            if let Some(style) = cache.get(scope) {
                return style.clone();
            }
        }

        let style = self.compute(&ScopePath::parse(scope));

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(scope.to_string(), style.clone());
        }
        style
    }

    fn compute(&self, scope: &ScopePath) -> ResolvedStyle {
        // Best (specificity, declaration order) winner per attribute;
        // iterating in order makes >= the "last declared wins" tie-break.
        let mut fg: Option<(Specificity, Color, &str)> = None;
        let mut bg: Option<(Specificity, Color, &str)> = None;
        let mut font: Option<(Specificity, FontStyle, &str)> = None;

        for rule in &self.theme.rules {
            let Some(specificity) = rule.selector.matches(scope) else {
                continue;
            };
            let selector = rule.selector.as_str();
            if let Some(color) = rule.foreground {
                if fg.map_or(true, |(best, _, _)| specificity >= best) {
                    fg = Some((specificity, color, selector));
                }
            }
            if let Some(color) = rule.background {
                if bg.map_or(true, |(best, _, _)| specificity >= best) {
                    bg = Some((specificity, color, selector));
                }
            }
            if let Some(style) = rule.font_style {
                if font.map_or(true, |(best, _, _)| specificity >= best) {
                    font = Some((specificity, style, selector));
                }
            }
        }

        let (mut foreground, foreground_selector) = match fg {
            Some((_, color, selector)) => (color, selector.to_string()),
            None => (self.theme.foreground, String::new()),
        };
        let (mut background, background_selector) = match bg {
            Some((_, color, selector)) => (color, selector.to_string()),
            None => (self.theme.background, String::new()),
        };
        let (style, style_selector) = match font {
            Some((_, style, selector)) => (style, selector.to_string()),
            None => (FontStyle::default(), String::new()),
        };

        if self.simulate_transparency {
            // Background resolves first so the foreground flattens against
            // the color actually behind it.
            let base = self
                .theme
                .background
                .strip_alpha(ThemeRuleSet::FALLBACK_BACKGROUND);
            background = background.strip_alpha(base);
            foreground = foreground.strip_alpha(background);
        }

        ResolvedStyle {
            foreground,
            background,
            bold_selector: if style.bold {
                style_selector.clone()
            } else {
                String::new()
            },
            italic_selector: if style.italic {
                style_selector
            } else {
                String::new()
            },
            style,
            foreground_selector,
            background_selector,
        }
    }
}
