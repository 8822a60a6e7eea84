//! Report formatting for the display surfaces
//!
//! Two renditions of the same [`ScopeReport`]: an aligned plain-text form
//! for the output panel / console log, and a minihtml-style markup form for
//! the popup with navigation links.

use std::fmt::Write as _;

use crate::config::InspectorConfig;
use crate::query::{ScopeEntry, ScopeReport};

/// Label gutter width in the plain-text report
const LABEL_WIDTH: usize = 30;

/// Popup links routed back from the host as opaque command strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupLink {
    /// Copy the plain-text report to the clipboard
    Copy,
    /// Open the color scheme file
    Scheme,
    /// Open the syntax definition file
    Syntax,
}

impl PopupLink {
    pub fn from_href(href: &str) -> Option<Self> {
        match href {
            "copy" => Some(Self::Copy),
            "scheme" => Some(Self::Scheme),
            "syntax" => Some(Self::Syntax),
            _ => None,
        }
    }
}

fn line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<width$} {}", label, value, width = LABEL_WIDTH);
}

/// Continuation indent for multi-line values (one past the label gutter)
fn continuation() -> String {
    format!("\n{}", " ".repeat(LABEL_WIDTH + 1))
}

/// Render the aligned plain-text report
pub fn panel_text(report: &ScopeReport, config: &InspectorConfig) -> String {
    let mut out = String::new();
    for entry in &report.entries {
        panel_entry(&mut out, entry, report, config);
        out.push('\n');
    }
    out
}

fn panel_entry(out: &mut String, entry: &ScopeEntry, report: &ScopeReport, config: &InspectorConfig) {
    if config.extent_points || config.extent_line_char {
        let mut extents = Vec::new();
        if config.extent_points {
            extents.push(format!("({}, {})", entry.extent.start, entry.extent.end));
        }
        if config.extent_line_char {
            let (row1, col1) = entry.extent.start_line_col;
            let (row2, col2) = entry.extent.end_line_col;
            extents.push(format!(
                "(line: {} char: {}, line: {} char: {})",
                row1 + 1,
                col1 + 1,
                row2 + 1,
                col2 + 1
            ));
        }
        line(out, "Scope Extents:", &extents.join(&continuation()));
    }

    line(
        out,
        "Scope:",
        &entry.scope.split_whitespace().collect::<Vec<_>>().join(&continuation()),
    );

    let (Some(style), Some(simulated)) = (&entry.style, &entry.style_simulated) else {
        return;
    };

    if let Some(scheme) = &report.scheme_path {
        line(out, "Scheme File:", &scheme.display().to_string());
    }
    if let Some(syntax) = &report.syntax_path {
        line(out, "Syntax File:", syntax);
    }
    line(out, "foreground:", &style.foreground.to_hex());
    line(
        out,
        "foreground (simulated trans):",
        &simulated.foreground.to_hex(),
    );
    line(out, "foreground selector:", &style.foreground_selector);
    line(out, "background:", &style.background.to_hex());
    line(
        out,
        "background (simulated trans):",
        &simulated.background.to_hex(),
    );
    line(out, "background selector:", &style.background_selector);
    line(out, "style:", &style.style.to_string());
    if !style.bold_selector.is_empty() {
        line(out, "bold selector:", &style.bold_selector);
    }
    if !style.italic_selector.is_empty() {
        line(out, "italic selector:", &style.italic_selector);
    }
}

/// Render the popup markup, with `copy`/`scheme`/`syntax` links
pub fn popup_markup(report: &ScopeReport, config: &InspectorConfig, css: Option<&str>) -> String {
    let mut out = String::new();
    let _ = write!(out, "<style>{}</style>", css.unwrap_or(""));

    for entry in &report.entries {
        popup_entry(&mut out, entry, report, config);
    }

    out.push_str("<br><br><a href=\"copy\">Copy to Clipboard</a>");
    out
}

fn popup_entry(out: &mut String, entry: &ScopeEntry, report: &ScopeReport, config: &InspectorConfig) {
    if config.extent_points || config.extent_line_char {
        out.push_str("<h1>Scope Extent</h1><p>");
        if config.extent_points {
            let _ = write!(out, "({}, {})", entry.extent.start, entry.extent.end);
            if config.extent_line_char {
                out.push_str("<br>");
            }
        }
        if config.extent_line_char {
            let (row1, col1) = entry.extent.start_line_col;
            let (row2, col2) = entry.extent.end_line_col;
            let _ = write!(
                out,
                "(<b>Line:</b> {} <b>Char:</b> {}, <b>Line:</b> {} <b>Char:</b> {})",
                row1 + 1,
                col1 + 1,
                row2 + 1,
                col2 + 1
            );
        }
        out.push_str("</p>");
    }

    let _ = write!(out, "<h1>Scope:</h1><p>{}</p>", entry.scope);

    let (Some(style), Some(simulated)) = (&entry.style, &entry.style_simulated) else {
        return;
    };

    if let Some(scheme) = &report.scheme_path {
        let _ = write!(
            out,
            "<h1>Scheme File</h1><p><a href=\"scheme\">{}</a></p>",
            scheme.display()
        );
    }
    if let Some(syntax) = &report.syntax_path {
        let _ = write!(
            out,
            "<h1>Syntax File</h1><p><a href=\"syntax\">{}</a></p>",
            syntax
        );
    }
    out.push_str("<h1>Color and Style</h1><p>");
    let _ = write!(
        out,
        "<b>foreground:</b> {}<br><b>foreground (simulated trans):</b> {}<br>",
        style.foreground.to_hex(),
        simulated.foreground.to_hex()
    );
    let _ = write!(
        out,
        "<b>foreground selector:</b> {}<br>",
        style.foreground_selector
    );
    let _ = write!(
        out,
        "<b>background:</b> {}<br><b>background (simulated trans):</b> {}<br>",
        style.background.to_hex(),
        simulated.background.to_hex()
    );
    let _ = write!(
        out,
        "<b>background selector:</b> {}<br>",
        style.background_selector
    );
    let _ = write!(out, "<b>style:</b> {}", style.style);
    if !style.bold_selector.is_empty() {
        let _ = write!(out, "<br><b>bold selector:</b> {}", style.bold_selector);
    }
    if !style.italic_selector.is_empty() {
        let _ = write!(out, "<br><b>italic selector:</b> {}", style.italic_selector);
    }
    out.push_str("</p>");
}
