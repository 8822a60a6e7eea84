//! Scope selector parsing and matching
//!
//! Selectors follow TextMate-style scope selector conventions:
//! - comma separates alternatives (`comment, string`)
//! - whitespace separates ancestor atoms within one alternative
//!   (`source.python string` requires a `string` atom with a
//!   `source.python` ancestor somewhere above it)
//! - a leading `-` marks an exclusion (`string -string.quoted`)
//!
//! An atom matches a scope-path atom when its dot-separated segments are a
//! prefix of that atom's segments (`string.quoted` matches
//! `string.quoted.double`). Atoms are matched right-to-left against the
//! scope path, so the deepest contexts anchor the match and earlier atoms
//! may skip intervening ancestors.

use std::fmt;

use thiserror::Error;

/// A selector pattern that could not be parsed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid scope selector {selector:?}: {reason}")]
pub struct SelectorSyntaxError {
    pub selector: String,
    pub reason: String,
}

/// A scope name split into whitespace-separated atoms of dot-separated
/// segments, e.g. `source.python string.quoted.double` becomes
/// `[[source, python], [string, quoted, double]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePath {
    atoms: Vec<Vec<String>>,
}

impl ScopePath {
    pub fn parse(scope: &str) -> Self {
        let atoms = scope
            .split_whitespace()
            .map(|atom| {
                atom.split('.')
                    .filter(|seg| !seg.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .filter(|atom: &Vec<String>| !atom.is_empty())
            .collect();
        Self { atoms }
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Vec<String>] {
        &self.atoms
    }
}

/// How strongly a selector matched a scope path.
///
/// Ordering is lexicographic: matched atom count ranks first, then the
/// total number of matched dot-segments (exactness), then the summed depth
/// of the scope atoms that matched (deeper wins). Declaration order is the
/// caller's final tie-break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    pub atoms: usize,
    pub segments: usize,
    pub depth: usize,
}

/// One comma-separated alternative: a chain of positive atoms plus any
/// `-`-prefixed exclusion atoms that appeared alongside them.
#[derive(Debug, Clone)]
struct OrGroup {
    chain: Vec<Vec<String>>,
    exclusions: Vec<Vec<String>>,
}

/// A parsed scope selector
#[derive(Debug, Clone)]
pub struct Selector {
    raw: String,
    groups: Vec<OrGroup>,
}

impl Selector {
    pub fn parse(raw: &str) -> Result<Self, SelectorSyntaxError> {
        let error = |reason: &str| SelectorSyntaxError {
            selector: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut groups = Vec::new();
        for group in raw.split(',') {
            let mut chain = Vec::new();
            let mut exclusions = Vec::new();
            for token in group.split_whitespace() {
                if let Some(rest) = token.strip_prefix('-') {
                    if rest.is_empty() {
                        return Err(error("dangling '-' with no pattern"));
                    }
                    exclusions.push(parse_atom(rest).ok_or_else(|| error("empty scope segment"))?);
                } else {
                    chain.push(parse_atom(token).ok_or_else(|| error("empty scope segment"))?);
                }
            }
            if !chain.is_empty() || !exclusions.is_empty() {
                groups.push(OrGroup { chain, exclusions });
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            groups,
        })
    }

    /// The selector source text, as written in the theme
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether no alternative carries a positive pattern (matches nothing)
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.chain.is_empty())
    }

    /// Match against a scope path.
    ///
    /// Returns the best specificity over all alternatives, or `None` when
    /// nothing matches. A matched exclusion disqualifies the whole selector
    /// for this scope, regardless of positive matches in other alternatives.
    pub fn matches(&self, scope: &ScopePath) -> Option<Specificity> {
        if scope.is_empty() {
            return None;
        }
        for group in &self.groups {
            for exclusion in &group.exclusions {
                if match_chain(std::slice::from_ref(exclusion), scope).is_some() {
                    return None;
                }
            }
        }
        self.groups
            .iter()
            .filter_map(|group| match_chain(&group.chain, scope))
            .max()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Split a pattern atom into segments; `None` when a segment is empty
/// (leading/trailing/double dots).
fn parse_atom(token: &str) -> Option<Vec<String>> {
    let segments: Vec<String> = token.split('.').map(str::to_string).collect();
    if segments.iter().any(|seg| seg.is_empty()) {
        return None;
    }
    Some(segments)
}

/// Match a chain of pattern atoms against a scope path, right to left.
///
/// The last pattern atom anchors at the rightmost scope atom it
/// prefix-matches; each earlier atom must then match some scope atom
/// strictly above it (non-adjacent ancestors allowed).
fn match_chain(chain: &[Vec<String>], scope: &ScopePath) -> Option<Specificity> {
    if chain.is_empty() {
        return None;
    }
    let atoms = scope.atoms();
    let mut specificity = Specificity::default();
    let mut upper = atoms.len();
    for pattern in chain.iter().rev() {
        let found = (0..upper)
            .rev()
            .find(|&i| segments_prefix_match(pattern, &atoms[i]))?;
        specificity.atoms += 1;
        specificity.segments += pattern.len();
        specificity.depth += found + 1;
        upper = found;
    }
    Some(specificity)
}

fn segments_prefix_match(pattern: &[String], atom: &[String]) -> bool {
    pattern.len() <= atom.len() && pattern.iter().zip(atom).all(|(p, s)| p == s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(selector: &str, scope: &str) -> Option<Specificity> {
        Selector::parse(selector)
            .unwrap()
            .matches(&ScopePath::parse(scope))
    }

    #[test]
    fn test_prefix_match_on_trailing_atom() {
        assert!(matches("string.quoted", "source.python string.quoted.double").is_some());
    }

    #[test]
    fn test_ancestor_chain() {
        assert!(matches("source string.quoted", "source.python string.quoted.double").is_some());
        // Both atoms cannot land on the same scope atom
        assert!(matches("string string", "source.python string.quoted").is_none());
    }

    #[test]
    fn test_non_adjacent_ancestors() {
        assert!(matches("source punctuation", "source.js meta.group punctuation.definition").is_some());
    }

    #[test]
    fn test_no_match_wrong_order() {
        assert!(matches("string source", "source.python string.quoted").is_none());
    }

    #[test]
    fn test_or_groups() {
        let sel = Selector::parse("comment, string").unwrap();
        assert!(sel.matches(&ScopePath::parse("string.quoted")).is_some());
        assert!(sel.matches(&ScopePath::parse("comment.line")).is_some());
        assert!(sel.matches(&ScopePath::parse("keyword")).is_none());
    }

    #[test]
    fn test_exclusion_disqualifies() {
        assert!(matches("string -string.quoted", "string.quoted.double").is_none());
        assert!(matches("string -string.quoted", "string.unquoted").is_some());
    }

    #[test]
    fn test_empty_selector_matches_nothing() {
        assert!(matches("", "string").is_none());
        assert!(matches(" , ", "string").is_none());
    }

    #[test]
    fn test_deeper_pattern_outranks_broader() {
        let broad = matches("string", "string.quoted.double").unwrap();
        let deep = matches("string.quoted.double", "string.quoted.double").unwrap();
        assert!(deep > broad);
    }

    #[test]
    fn test_more_atoms_outrank_more_segments() {
        let scope = "source.python string.quoted.double";
        let two_atoms = matches("source string", scope).unwrap();
        let one_deep_atom = matches("string.quoted.double", scope).unwrap();
        assert!(two_atoms > one_deep_atom);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Selector::parse("string. quoted").is_err());
        assert!(Selector::parse("string -").is_err());
        assert!(Selector::parse("a..b").is_err());
    }
}
