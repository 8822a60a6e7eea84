//! Scope queries: pull scope + extent from the host and resolve styles
//!
//! The engine itself does no I/O beyond the [`TextSurface`] trait and holds
//! no state; per-query results live only inside the returned report.

use std::path::PathBuf;

use crate::matcher::{ColorSchemeMatcher, ResolvedStyle};
use crate::host::TextSurface;

/// Extent of a scope span, in both offset and line/column form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub start: usize,
    pub end: usize,
    /// (line, column) of `start`, 0-indexed
    pub start_line_col: (usize, usize),
    /// (line, column) of `end`, 0-indexed
    pub end_line_col: (usize, usize),
}

impl Extent {
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Everything known about the scope under one caret
#[derive(Debug, Clone)]
pub struct ScopeEntry {
    pub scope: String,
    pub extent: Extent,
    /// Style under the real scheme, when scheme info was requested
    pub style: Option<ResolvedStyle>,
    /// Style with simulated transparency removal
    pub style_simulated: Option<ResolvedStyle>,
}

/// Per-query result pushed to the display surfaces
#[derive(Debug, Clone, Default)]
pub struct ScopeReport {
    pub entries: Vec<ScopeEntry>,
    pub scheme_path: Option<PathBuf>,
    pub syntax_path: Option<String>,
}

/// Runs scope queries against a host surface and a matcher pair.
///
/// The real and simulated matchers are distinct objects resolving the same
/// scheme document; the report carries both renderings side by side.
pub struct ScopeQueryEngine<'a> {
    matchers: Option<(&'a ColorSchemeMatcher, &'a ColorSchemeMatcher)>,
}

impl<'a> ScopeQueryEngine<'a> {
    /// An engine that reports scope and extent only
    pub fn without_scheme() -> Self {
        Self { matchers: None }
    }

    /// An engine that also resolves styles through `real` and `simulated`
    pub fn new(real: &'a ColorSchemeMatcher, simulated: &'a ColorSchemeMatcher) -> Self {
        Self {
            matchers: Some((real, simulated)),
        }
    }

    /// Query the scope under a single offset
    pub fn query(&self, surface: &dyn TextSurface, offset: usize) -> ScopeEntry {
        let scope = surface.scope_name_at(offset).trim().to_string();
        let (start, end) = surface.scope_extent_at(offset);
        let extent = Extent {
            start,
            end,
            start_line_col: surface.line_col(start),
            end_line_col: surface.line_col(end),
        };

        let (style, style_simulated) = match self.matchers {
            Some((real, simulated)) => (
                Some(real.resolve(&scope)),
                Some(simulated.resolve(&scope)),
            ),
            None => (None, None),
        };

        ScopeEntry {
            scope,
            extent,
            style,
            style_simulated,
        }
    }

    /// Query every selection (or just the first), assembling a full report
    pub fn report(&self, surface: &dyn TextSurface, multiselect: bool) -> ScopeReport {
        let offsets = surface.selection_offsets();
        let queried: Vec<usize> = if multiselect {
            offsets
        } else {
            offsets.into_iter().take(1).collect()
        };

        ScopeReport {
            entries: queried
                .into_iter()
                .map(|offset| self.query(surface, offset))
                .collect(),
            scheme_path: self
                .matchers
                .and_then(|(real, _)| real.scheme_path().map(|p| p.to_path_buf())),
            syntax_path: surface.syntax_path(),
        }
    }
}
