//! Host-facing contracts
//!
//! The inspector core is host-agnostic: buffer access, resource loading and
//! display surfaces are supplied by the embedding editor through these
//! traits. [`MemoryHost`] is a self-contained in-memory host used by the
//! test suites and the demo CLI.

use std::collections::HashMap;

use thiserror::Error;

use crate::config::HighlightShape;

/// Failure to load a virtual resource
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("resource not found: {0}")]
    NotFound(String),
}

/// Buffer-side services: selection state and scope queries at offsets
pub trait TextSurface {
    /// Caret offset of every selection, in order
    fn selection_offsets(&self) -> Vec<usize>;
    /// Full scope name at an offset (whitespace-separated atoms)
    fn scope_name_at(&self, offset: usize) -> String;
    /// (start, end) offsets of the innermost scope span containing `offset`
    fn scope_extent_at(&self, offset: usize) -> (usize, usize);
    /// Convert an offset to (line, column), both 0-indexed
    fn line_col(&self, offset: usize) -> (usize, usize);
    /// Path of the syntax definition driving this buffer, if any
    fn syntax_path(&self) -> Option<String>;
}

/// Resource loading by virtual path (theme files, popup CSS)
pub trait ResourceLoader {
    fn load(&self, path: &str) -> Result<String, ResourceError>;
}

/// Write-only display surfaces the report is pushed to.
///
/// The core never reads these back; the popup's link activation comes back
/// through [`crate::session::InspectorSession::handle_popup_link`] as an
/// opaque command string.
pub trait DisplaySurface {
    /// One-line status bar message
    fn status_message(&mut self, text: &str);
    /// Scrollable output panel content
    fn show_panel(&mut self, text: &str);
    /// Rich-text popup markup at the caret
    fn show_popup(&mut self, markup: &str);
    /// Dismiss the popup if visible
    fn hide_popup(&mut self);
    /// Replace the clipboard contents
    fn set_clipboard(&mut self, text: &str);
    /// Persistent highlighted regions keyed by `key`
    fn add_regions(
        &mut self,
        key: &str,
        regions: &[(usize, usize)],
        scope: &str,
        shape: HighlightShape,
    );
    /// Remove the highlighted regions stored under `key`
    fn erase_regions(&mut self, key: &str);
    /// Number of regions currently stored under `key`
    fn region_count(&self, key: &str) -> usize;
    /// Open a file in the host editor (popup link navigation)
    fn open_file(&mut self, path: &str);
}

/// In-memory host: a buffer with a static scope map plus recording sinks
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub text: String,
    pub selections: Vec<usize>,
    /// (start, end, scope name) spans; first containing span wins
    pub scopes: Vec<(usize, usize, String)>,
    pub syntax: Option<String>,
    pub resources: HashMap<String, String>,

    // Recorded sink writes
    pub status: Option<String>,
    pub panel: Option<String>,
    pub popup: Option<String>,
    pub clipboard: Option<String>,
    pub opened_files: Vec<String>,
    pub regions: HashMap<String, (Vec<(usize, usize)>, HighlightShape)>,
}

impl MemoryHost {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            selections: vec![0],
            ..Default::default()
        }
    }

    /// Register a scope span over a byte range
    pub fn add_scope(&mut self, start: usize, end: usize, scope: &str) {
        self.scopes.push((start, end, scope.to_string()));
    }

    /// Register a loadable virtual resource
    pub fn add_resource(&mut self, path: &str, content: &str) {
        self.resources.insert(path.to_string(), content.to_string());
    }
}

impl TextSurface for MemoryHost {
    fn selection_offsets(&self) -> Vec<usize> {
        self.selections.clone()
    }

    fn scope_name_at(&self, offset: usize) -> String {
        self.scopes
            .iter()
            .find(|(start, end, _)| offset >= *start && offset < *end)
            .map(|(_, _, scope)| scope.clone())
            .unwrap_or_else(|| "text.plain".to_string())
    }

    fn scope_extent_at(&self, offset: usize) -> (usize, usize) {
        self.scopes
            .iter()
            .find(|(start, end, _)| offset >= *start && offset < *end)
            .map(|(start, end, _)| (*start, *end))
            .unwrap_or((0, self.text.len()))
    }

    fn line_col(&self, offset: usize) -> (usize, usize) {
        let clamped = offset.min(self.text.len());
        let before = &self.text[..clamped];
        let line = before.matches('\n').count();
        let col = before
            .rfind('\n')
            .map(|nl| clamped - nl - 1)
            .unwrap_or(clamped);
        (line, col)
    }

    fn syntax_path(&self) -> Option<String> {
        self.syntax.clone()
    }
}

impl ResourceLoader for MemoryHost {
    fn load(&self, path: &str) -> Result<String, ResourceError> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }
}

impl DisplaySurface for MemoryHost {
    fn status_message(&mut self, text: &str) {
        self.status = Some(text.to_string());
    }

    fn show_panel(&mut self, text: &str) {
        self.panel = Some(text.to_string());
    }

    fn show_popup(&mut self, markup: &str) {
        self.popup = Some(markup.to_string());
    }

    fn hide_popup(&mut self) {
        self.popup = None;
    }

    fn set_clipboard(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }

    fn add_regions(
        &mut self,
        key: &str,
        regions: &[(usize, usize)],
        scope: &str,
        shape: HighlightShape,
    ) {
        let _ = scope;
        self.regions
            .insert(key.to_string(), (regions.to_vec(), shape));
    }

    fn erase_regions(&mut self, key: &str) {
        self.regions.remove(key);
    }

    fn region_count(&self, key: &str) -> usize {
        self.regions.get(key).map_or(0, |(r, _)| r.len())
    }

    fn open_file(&mut self, path: &str) {
        self.opened_files.push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_lookup_falls_back_to_plain() {
        let mut host = MemoryHost::new("let x = 1;\n");
        host.add_scope(4, 5, "source.rust variable");
        assert_eq!(host.scope_name_at(4), "source.rust variable");
        assert_eq!(host.scope_name_at(9), "text.plain");
        assert_eq!(host.scope_extent_at(9), (0, 11));
    }

    #[test]
    fn test_line_col() {
        let host = MemoryHost::new("ab\ncdef\ng");
        assert_eq!(host.line_col(0), (0, 0));
        assert_eq!(host.line_col(3), (1, 0));
        assert_eq!(host.line_col(6), (1, 3));
        assert_eq!(host.line_col(8), (2, 0));
    }

    #[test]
    fn test_missing_resource() {
        let host = MemoryHost::new("");
        assert_eq!(
            host.load("nope.css"),
            Err(ResourceError::NotFound("nope.css".to_string()))
        );
    }
}
