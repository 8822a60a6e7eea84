//! ScopeLens - scope and color-scheme inspection core
//!
//! This crate answers "what grammar scope is under the cursor, and how
//! would the active color scheme paint it" for editor integrations: scheme
//! rule resolution with selector provenance, simulated-transparency
//! rendering, debounced evaluation scheduling and report formatting. The
//! host editor supplies buffer access and display surfaces through the
//! traits in [`host`].

pub mod cli;
pub mod color;
pub mod config;
pub mod config_paths;
pub mod host;
pub mod matcher;
pub mod query;
pub mod report;
pub mod scheduler;
pub mod selector;
pub mod session;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use color::Color;
pub use config::InspectorConfig;
pub use matcher::{ColorSchemeMatcher, ResolvedStyle};
pub use selector::{ScopePath, Selector, Specificity};
pub use session::InspectorSession;
pub use theme::ThemeRuleSet;
