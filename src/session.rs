//! Inspector session: the host-integration context
//!
//! Owns the state a host integration needs across queries: the parsed
//! matcher pair (real + simulated), the active configuration, the popup CSS
//! and the debounce state. Hosts construct one session, feed it change
//! notifications, and drain the scheduler's evaluate requests into
//! [`InspectorSession::evaluate`].

use std::sync::Arc;

use crate::config::{HighlightShape, InspectorConfig};
use crate::host::{DisplaySurface, ResourceLoader, TextSurface};
use crate::matcher::ColorSchemeMatcher;
use crate::query::{ScopeQueryEngine, ScopeReport};
use crate::report::{panel_text, popup_markup, PopupLink};
use crate::scheduler::DebounceState;
use crate::theme::{self, ThemeRuleSet};

/// Region key under which extent highlights are stored in the host
pub const HIGHLIGHT_KEY: &str = "scope_inspector";

/// Real and simulated matchers for the active scheme.
///
/// Rebuilt wholesale on scheme change and swapped in as a unit, so an
/// evaluation never sees one half updated.
struct MatcherPair {
    real: ColorSchemeMatcher,
    simulated: ColorSchemeMatcher,
}

/// One inspector instance bound to a host integration
pub struct InspectorSession {
    config: InspectorConfig,
    matchers: Option<MatcherPair>,
    /// Popup stylesheet; `None` is an explicit no-CSS state
    css: Option<String>,
    debounce: Arc<DebounceState>,
    /// Plain-text form of the last report, for the popup copy link
    last_panel_text: Option<String>,
    /// Syntax file of the last queried buffer, for the popup syntax link
    last_syntax: Option<String>,
}

impl InspectorSession {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            config,
            matchers: None,
            css: None,
            debounce: Arc::new(DebounceState::new()),
            last_panel_text: None,
            last_syntax: None,
        }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Replace the configuration (settings-change notification)
    pub fn set_config(&mut self, config: InspectorConfig) {
        self.config = config;
    }

    /// Shared debounce state for the scheduler and notification handlers
    pub fn debounce(&self) -> Arc<DebounceState> {
        Arc::clone(&self.debounce)
    }

    /// Whether scheme-derived info is currently available
    pub fn has_scheme(&self) -> bool {
        self.matchers.is_some()
    }

    /// Load and activate a color scheme (scheme-change notification).
    ///
    /// On parse failure scheme-derived info is disabled for the session;
    /// scope and extent reporting keep working.
    pub fn set_color_scheme(&mut self, path: &str, loader: &dyn ResourceLoader) {
        self.matchers = match theme::load_scheme(path, loader) {
            Ok(rule_set) => Some(MatcherPair {
                simulated: ColorSchemeMatcher::simulated(rule_set.clone()),
                real: ColorSchemeMatcher::new(rule_set),
            }),
            Err(e) => {
                tracing::warn!("Scheme parsing failed, ignoring scheme related info: {}", e);
                None
            }
        };
        self.reload_css(loader);
    }

    /// Activate an already parsed scheme (hosts that do their own loading)
    pub fn set_rule_set(&mut self, rule_set: ThemeRuleSet) {
        self.matchers = Some(MatcherPair {
            simulated: ColorSchemeMatcher::simulated(rule_set.clone()),
            real: ColorSchemeMatcher::new(rule_set),
        });
    }

    /// Reload the popup stylesheet.
    ///
    /// An explicit `css_file` wins; otherwise the dark or light override is
    /// chosen by the active scheme's background. A missing resource leaves
    /// the session in the explicit no-CSS state.
    pub fn reload_css(&mut self, loader: &dyn ResourceLoader) {
        let path = match &self.config.css_file {
            Some(path) => path.clone(),
            None => {
                let dark = self
                    .matchers
                    .as_ref()
                    .map_or(true, |pair| pair.real.theme().is_dark());
                if dark {
                    self.config.dark_css_override.clone()
                } else {
                    self.config.light_css_override.clone()
                }
            }
        };
        self.css = match loader.load(&path) {
            Ok(css) => Some(css.replace('\r', "\n")),
            Err(e) => {
                tracing::debug!("popup css unavailable: {}", e);
                None
            }
        };
    }

    /// Selection-change notification from the host.
    ///
    /// In instant mode this arms the debounce; otherwise stale extent
    /// highlights are cleared.
    pub fn on_selection_modified(&self, host: &mut dyn DisplaySurface) {
        if self.debounce.suppressed() {
            return;
        }
        if self.debounce.instant() {
            self.debounce.mark_modified(self.debounce.now_ms());
        } else {
            self.clear_highlights(host);
        }
    }

    /// One-shot query request (host command)
    pub fn request_scope(&self) {
        self.debounce.mark_modified(self.debounce.now_ms());
    }

    /// Toggle continuous scoping; turning it off clears highlights
    pub fn toggle_instant(&self, host: &mut dyn DisplaySurface) {
        let on = !self.debounce.instant();
        self.debounce.set_instant(on);
        if on {
            self.debounce.mark_modified(self.debounce.now_ms());
        } else {
            self.clear_highlights(host);
        }
    }

    /// Remove extent highlights if any are present
    pub fn clear_highlights(&self, host: &mut dyn DisplaySurface) {
        if self.config.highlight_extent && host.region_count(HIGHLIGHT_KEY) > 0 {
            host.erase_regions(HIGHLIGHT_KEY);
        }
    }

    /// Run one scope evaluation and push the report to the enabled sinks.
    ///
    /// Re-entrant triggering is suppressed for the duration; the host's own
    /// notifications during the evaluation are swallowed.
    pub fn evaluate<H>(&mut self, host: &mut H) -> ScopeReport
    where
        H: TextSurface + DisplaySurface,
    {
        let _guard = self.debounce.suppress();

        let engine = match &self.matchers {
            Some(pair) if self.config.show_color_scheme_info => {
                ScopeQueryEngine::new(&pair.real, &pair.simulated)
            }
            _ => ScopeQueryEngine::without_scheme(),
        };
        let report = engine.report(host, self.config.multiselect);

        let text = panel_text(&report, &self.config);

        if self.config.clipboard {
            let scopes: Vec<&str> = report.entries.iter().map(|e| e.scope.as_str()).collect();
            host.set_clipboard(&scopes.join("\n"));
        }

        if self.config.show_statusbar {
            if let Some(first) = report.entries.first() {
                host.status_message(&first.scope);
            }
        }

        if self.config.show_panel {
            host.show_panel(&text);
        }

        if self.config.show_popup {
            host.show_popup(&popup_markup(&report, &self.config, self.css.as_deref()));
        }

        if self.config.console_log {
            tracing::info!("scope report:\n{}", text);
        }

        if self.config.highlight_extent {
            self.highlight_extents(host, &report);
        }

        self.last_panel_text = Some(text);
        self.last_syntax = report.syntax_path.clone();
        report
    }

    fn highlight_extents<H: DisplaySurface>(&self, host: &mut H, report: &ScopeReport) {
        let extents: Vec<(usize, usize)> = report
            .entries
            .iter()
            .map(|e| (e.extent.start, e.extent.end))
            .filter(|(start, end)| end.saturating_sub(*start) < self.config.highlight_max_size)
            .collect();

        let regions = match self.config.highlight_style {
            // Only zero-width regions can be seen through a selection
            HighlightShape::Underline => underline(&extents),
            _ => extents,
        };
        host.add_regions(
            HIGHLIGHT_KEY,
            &regions,
            &self.config.highlight_scope,
            self.config.highlight_style,
        );
    }

    /// Popup link activation, routed back from the host as an opaque href
    pub fn handle_popup_link(&self, host: &mut dyn DisplaySurface, href: &str) {
        match PopupLink::from_href(href) {
            Some(PopupLink::Copy) => {
                if let Some(text) = &self.last_panel_text {
                    host.set_clipboard(text);
                }
                host.hide_popup();
            }
            Some(PopupLink::Scheme) => {
                if let Some(path) = self
                    .matchers
                    .as_ref()
                    .and_then(|pair| pair.real.scheme_path())
                {
                    host.open_file(&path.display().to_string());
                }
            }
            Some(PopupLink::Syntax) => {
                if let Some(path) = &self.last_syntax {
                    host.open_file(path);
                }
            }
            None => tracing::debug!("unknown popup link {:?}", href),
        }
    }
}

/// Convert extents to zero-width regions under each point so the highlight
/// reads as an underline
fn underline(regions: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut points = Vec::new();
    for &(start, end) in regions {
        for pt in start..end {
            points.push((pt, pt));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underline_explodes_regions() {
        let points = underline(&[(3, 6)]);
        assert_eq!(points, vec![(3, 3), (4, 4), (5, 5)]);
    }
}
