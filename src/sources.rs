//! Tracked obstacle sources and the pattern set that admits them
//!
//! The tracker keeps a lexicographically sorted identifier list so
//! membership tests are binary searches, and raises a dirty flag on every
//! mutation; the service layer rebuilds the whole graph when the flag is
//! set.

use derive_more::Display;

use crate::errors::{NavgraphError, NavgraphResult};

/// A path pattern admitting source identifiers.
///
/// Supports `*` within one path segment and a leading `**/` matching any
/// number of directories (including none): `*.tmx`, `maps/*.tmx`,
/// `**/*.tmx`. Richer matching belongs to the external decoder layer.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{raw}")]
pub struct SourcePattern {
    raw: String,
}

impl SourcePattern {
    pub fn new(pattern: &str) -> NavgraphResult<Self> {
        if pattern.is_empty() {
            return Err(NavgraphError::InvalidConfig {
                reason: "empty source pattern".to_string(),
            });
        }
        Ok(Self {
            raw: pattern.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> bool {
        let pattern: Vec<&str> = self.raw.split('/').collect();
        let segments: Vec<&str> = path.split('/').collect();
        match_segments(&pattern, &segments)
    }
}

fn match_segments(pattern: &[&str], segments: &[&str]) -> bool {
    match pattern.first() {
        None => segments.is_empty(),
        Some(&"**") => {
            // consume zero or more path segments
            (0..=segments.len()).any(|skip| match_segments(&pattern[1..], &segments[skip..]))
        }
        Some(seg_pattern) => match segments.first() {
            Some(segment) if match_segment(seg_pattern, segment) => {
                match_segments(&pattern[1..], &segments[1..])
            }
            _ => false,
        },
    }
}

/// `*` wildcard match within a single path segment.
fn match_segment(pattern: &str, segment: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == segment,
        Some((prefix, rest)) => {
            let Some(remainder) = segment.strip_prefix(prefix) else {
                return false;
            };
            remainder
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(remainder.len()))
                .any(|skip| match_segment(rest, &remainder[skip..]))
        }
    }
}

/// The sorted set of source identifiers currently contributing obstacles.
#[derive(Debug)]
pub struct SourceTracker {
    patterns: Vec<SourcePattern>,
    sources: Vec<String>,
    dirty: bool,
}

impl SourceTracker {
    /// A fresh tracker starts dirty: the first rebuild always runs.
    pub fn new(patterns: Vec<SourcePattern>) -> Self {
        Self {
            patterns,
            sources: Vec::new(),
            dirty: true,
        }
    }

    pub fn from_patterns(raw: &[String]) -> NavgraphResult<Self> {
        let patterns = raw
            .iter()
            .map(|p| SourcePattern::new(p))
            .collect::<NavgraphResult<Vec<_>>>()?;
        Ok(Self::new(patterns))
    }

    /// Offer an identifier for tracking.
    ///
    /// Already-tracked and pattern-unmatched identifiers are inert no-ops;
    /// otherwise the id is inserted in sorted position, the dirty flag is
    /// raised, and the matching pattern is returned.
    pub fn offer(&mut self, path: &str) -> Option<&SourcePattern> {
        let slot = match self.sources.binary_search_by(|s| s.as_str().cmp(path)) {
            Ok(_) => return None,
            Err(slot) => slot,
        };

        let matched = self.patterns.iter().position(|p| p.matches(path))?;
        self.sources.insert(slot, path.to_string());
        self.dirty = true;
        self.patterns.get(matched)
    }

    /// Stop tracking an identifier, returning it if it was tracked.
    pub fn remove(&mut self, path: &str) -> Option<String> {
        let index = self
            .sources
            .binary_search_by(|s| s.as_str().cmp(path))
            .ok()?;
        self.dirty = true;
        Some(self.sources.remove(index))
    }

    /// Flag a tracked identifier's derived graph as stale. Untracked ids are
    /// ignored.
    pub fn mark_dirty(&mut self, path: &str) -> bool {
        if self.contains(path) {
            self.dirty = true;
            true
        } else {
            false
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.sources
            .binary_search_by(|s| s.as_str().cmp(path))
            .is_ok()
    }

    /// Tracked identifiers in lexicographic order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
