//! Caller-supplied keywords and their per-image assignment.

use serde::{Deserialize, Serialize};

/// Keyword used when the caller supplied none at all.
pub const DEFAULT_KEYWORD: &str = "image";

/// Keywords as received from the caller.
///
/// # Examples
///
/// ```
/// use sfumato_core::Keywords;
///
/// let resolved = Keywords::from("red shoes\n\n  blue shoes  \n").resolve();
/// assert_eq!(resolved.for_index(0), "red shoes");
/// assert_eq!(resolved.for_index(1), "blue shoes");
/// // Shorter lists stretch the first keyword over remaining images
/// assert_eq!(resolved.for_index(5), "red shoes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    /// One raw string, one keyword per line
    Delimited(String),
    /// An explicit list, used as given
    List(Vec<String>),
}

impl Keywords {
    /// Turn the raw input into an ordered keyword list.
    ///
    /// Delimited input is split on newlines; each line is trimmed and blank
    /// lines are dropped.
    pub fn resolve(&self) -> ResolvedKeywords {
        let keywords = match self {
            Keywords::Delimited(raw) => raw
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Keywords::List(list) => list.clone(),
        };
        ResolvedKeywords(keywords)
    }
}

impl From<&str> for Keywords {
    fn from(raw: &str) -> Self {
        Keywords::Delimited(raw.to_string())
    }
}

impl From<String> for Keywords {
    fn from(raw: String) -> Self {
        Keywords::Delimited(raw)
    }
}

impl From<Vec<String>> for Keywords {
    fn from(list: Vec<String>) -> Self {
        Keywords::List(list)
    }
}

impl From<Vec<&str>> for Keywords {
    fn from(list: Vec<&str>) -> Self {
        Keywords::List(list.into_iter().map(str::to_string).collect())
    }
}

/// An ordered keyword list with the stretching policy applied on lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedKeywords(Vec<String>);

impl ResolvedKeywords {
    /// Keyword for the image at `index`.
    ///
    /// Falls back to the first keyword when the list is too short, and to
    /// [`DEFAULT_KEYWORD`] when it is empty.
    pub fn for_index(&self, index: usize) -> &str {
        self.0
            .get(index)
            .or_else(|| self.0.first())
            .map(String::as_str)
            .unwrap_or(DEFAULT_KEYWORD)
    }

    /// Number of distinct keywords supplied.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no keyword was supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
