//! Keyword search over the documentation catalog
//!
//! Matching is plain case-insensitive substring containment. For every
//! matching line a small window of surrounding lines is reported so the
//! caller gets context without the whole document.

use crate::catalog::Document;

/// Context window settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Lines of context before a matching line
    pub lines_before: usize,

    /// Lines of context after a matching line
    pub lines_after: usize,

    /// Maximum windows reported per document
    pub max_windows: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            lines_before: 1,
            lines_after: 2,
            max_windows: 3,
        }
    }
}

/// A run of lines around one matching line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    /// First line of the window (0-based, inclusive)
    pub start_line: usize,

    /// Last line of the window (0-based, inclusive)
    pub end_line: usize,

    /// The window's lines joined by `\n`
    pub text: String,
}

/// One matching document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub key: String,
    pub title: String,

    /// Empty when only the title matched
    pub windows: Vec<ContextWindow>,
}

/// Search result: either some hits or an explicit "nothing found"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Matches(Vec<SearchHit>),
    NoResults,
}

impl SearchOutcome {
    /// Hits, or an empty slice for `NoResults`
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::Matches(hits) => hits,
            SearchOutcome::NoResults => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::NoResults)
    }
}

/// Search documents in iteration order
pub fn search_documents<'a, I>(documents: I, query: &str, options: &SearchOptions) -> SearchOutcome
where
    I: IntoIterator<Item = &'a Document>,
{
    let needle = query.to_lowercase();

    let hits: Vec<SearchHit> = documents
        .into_iter()
        .filter(|doc| {
            doc.title.to_lowercase().contains(&needle)
                || doc.content.to_lowercase().contains(&needle)
        })
        .map(|doc| SearchHit {
            key: doc.key.clone(),
            title: doc.title.clone(),
            windows: context_windows(&doc.content, &needle, options),
        })
        .collect();

    tracing::debug!(query, hits = hits.len(), "documentation search");

    if hits.is_empty() {
        SearchOutcome::NoResults
    } else {
        SearchOutcome::Matches(hits)
    }
}

/// Collect windows around each line containing `needle` (already lowercased)
///
/// Windows for nearby matches may overlap; each matching line gets its own.
pub fn context_windows(content: &str, needle: &str, options: &SearchOptions) -> Vec<ContextWindow> {
    let lines: Vec<&str> = content.split('\n').collect();
    let last = lines.len() - 1;

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains(needle))
        .take(options.max_windows)
        .map(|(i, _)| {
            let start_line = i.saturating_sub(options.lines_before);
            let end_line = i.saturating_add(options.lines_after).min(last);
            ContextWindow {
                start_line,
                end_line,
                text: lines[start_line..=end_line].join("\n"),
            }
        })
        .collect()
}
