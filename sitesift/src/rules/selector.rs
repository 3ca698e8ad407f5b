//! Content selection strategies applied to extracted page text.

use regex::Regex;

use crate::errors::SiftError;

/// A pattern-based slice of extracted page text.
///
/// Selectors are data, not closures: each variant names a strategy that can
/// be constructed, inspected, and tested independently of the pipeline.
#[derive(Debug, Clone)]
pub enum ContentSelector {
    /// Returns the text between two marker patterns, trimmed, with an
    /// optional prefix prepended to the slice.
    ///
    /// Markers are regex fragments matched with dot-matches-newline; the
    /// slice is the shortest span between them.
    Between {
        /// Compiled `(?s)start(.*?)end` pattern.
        pattern: Regex,
        /// Prepended to the trimmed slice (e.g. a markdown heading marker
        /// consumed by the start pattern).
        prefix: Option<String>,
    },
    /// Passes the extracted text through unchanged (trimmed).
    FullText,
}

impl ContentSelector {
    /// Builds a `Between` selector from start and end marker patterns.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Rule`] if the combined pattern is not a valid
    /// regex.
    pub fn between(start: &str, end: &str) -> Result<Self, SiftError> {
        Self::between_with_prefix(start, end, None)
    }

    /// Builds a `Between` selector that re-prepends `prefix` to the slice.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Rule`] if the combined pattern is not a valid
    /// regex.
    pub fn between_with_prefix(
        start: &str,
        end: &str,
        prefix: Option<&str>,
    ) -> Result<Self, SiftError> {
        let combined = format!("(?s){start}(.*?){end}");
        let pattern = Regex::new(&combined).map_err(|e| SiftError::Rule {
            pattern: combined,
            message: e.to_string(),
        })?;
        Ok(Self::Between {
            pattern,
            prefix: prefix.map(String::from),
        })
    }

    /// Applies the selector to extracted page text.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::ContentNotFound`] when a `Between` selector's
    /// markers are absent, e.g. because the page layout changed.
    pub fn apply(&self, text: &str, url: &str) -> Result<String, SiftError> {
        match self {
            Self::Between { pattern, prefix } => {
                let slice = pattern
                    .captures(text)
                    .and_then(|caps| caps.get(1))
                    .ok_or_else(|| SiftError::content_not_found(url))?
                    .as_str()
                    .trim();
                Ok(match prefix {
                    Some(prefix) => format!("{prefix}{slice}"),
                    None => slice.to_string(),
                })
            }
            Self::FullText => Ok(text.trim().to_string()),
        }
    }
}
