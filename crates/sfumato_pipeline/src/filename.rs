//! SEO filename synthesis from a keyword and a content description.
//!
//! ```
//! use sfumato_pipeline::filename::synthesize;
//!
//! assert_eq!(
//!     synthesize("Blue Shoes", "stylish blue athletic shoes", "jpg"),
//!     "blue-shoes-stylish-blue-athletic-shoes.jpg"
//! );
//! ```

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Upper bound on base name plus dot plus extension.
pub const MAX_FILENAME_LEN: usize = 200;

static DISALLOWED: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]"));
static WHITESPACE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"\s+"));
static HYPHENS: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"-+"));

struct Patterns {
    disallowed: &'static Regex,
    whitespace: &'static Regex,
    hyphens: &'static Regex,
}

impl Patterns {
    fn get() -> Result<Self, &'static regex::Error> {
        Ok(Self {
            disallowed: DISALLOWED.as_ref()?,
            whitespace: WHITESPACE.as_ref()?,
            hyphens: HYPHENS.as_ref()?,
        })
    }

    fn normalize(&self, input: &str) -> String {
        let lowered = input.to_lowercase();
        let stripped = self.disallowed.replace_all(lowered.trim(), "");
        let hyphenated = self.whitespace.replace_all(&stripped, "-");
        self.hyphens.replace_all(&hyphenated, "-").into_owned()
    }
}

/// Normalize free text into the filename alphabet.
///
/// Lowercases, trims, drops characters outside `[a-z0-9\s-]`, and turns
/// whitespace and hyphen runs into single hyphens. Edge hyphens are kept.
/// Returns `None` only if the normalization patterns are unavailable.
pub fn normalize(input: &str) -> Option<String> {
    Patterns::get().ok().map(|patterns| patterns.normalize(input))
}

/// Build `"{keyword}-{description}.{extension}"` in normalized form.
///
/// Never fails. Both parts may be empty, in which case the result is the bare
/// `".{extension}"`. The base is cut so the whole name fits
/// [`MAX_FILENAME_LEN`].
pub fn synthesize(keyword: &str, description: &str, extension: &str) -> String {
    match Patterns::get() {
        Ok(patterns) => compose(&patterns, keyword, description, extension),
        Err(e) => {
            warn!(error = %e, "Filename patterns unavailable, using timestamp name");
            fallback_name(extension)
        }
    }
}

/// Timestamp name used when normalization itself cannot run.
pub fn fallback_name(extension: &str) -> String {
    format!("image-{}.{}", chrono::Utc::now().timestamp_millis(), extension)
}

fn compose(patterns: &Patterns, keyword: &str, description: &str, extension: &str) -> String {
    let keyword = patterns.normalize(keyword);
    let description = patterns.normalize(description);
    let description = description.trim_matches('-');

    let base = match (keyword.is_empty(), description.is_empty()) {
        (false, false) => patterns
            .hyphens
            .replace_all(&format!("{}-{}", keyword, description), "-")
            .into_owned(),
        (false, true) => keyword,
        (true, false) => description.to_string(),
        (true, true) => String::new(),
    };

    let limit = MAX_FILENAME_LEN.saturating_sub(extension.len() + 1);
    let base = if base.chars().count() > limit {
        let cut: String = base.chars().take(limit).collect();
        cut.trim_end_matches('-').to_string()
    } else {
        base
    };

    format!("{}.{}", base, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_example() {
        assert_eq!(
            synthesize("Blue Shoes", "stylish blue athletic shoes", "jpg"),
            "blue-shoes-stylish-blue-athletic-shoes.jpg"
        );
    }

    #[test]
    fn empty_inputs_yield_bare_extension() {
        assert_eq!(synthesize("", "", "jpg"), ".jpg");
        assert_eq!(synthesize("  ", "!!!", "png"), ".png");
    }

    #[test]
    fn single_part_is_used_alone() {
        assert_eq!(synthesize("Summer Sale", "", "png"), "summer-sale.png");
        assert_eq!(synthesize("", "A red car.", "jpg"), "a-red-car.jpg");
    }

    #[test]
    fn description_edge_hyphens_are_trimmed() {
        assert_eq!(synthesize("", "- red car -", "jpg"), "red-car.jpg");
    }

    #[test]
    fn keyword_keeps_leading_hyphen() {
        assert_eq!(synthesize("-promo", "red car", "jpg"), "-promo-red-car.jpg");
    }

    #[test]
    fn keyword_trailing_hyphen_does_not_double_at_seam() {
        assert_eq!(synthesize("promo-", "red car", "jpg"), "promo-red-car.jpg");
        assert_eq!(synthesize("promo -", "", "jpg"), "promo-.jpg");
    }

    #[test]
    fn punctuation_and_unicode_are_stripped() {
        assert_eq!(
            synthesize("Café & Co.", "Ürban  loft\tinterior", "jpg"),
            "caf-co-rban-loft-interior.jpg"
        );
    }

    #[test]
    fn long_names_are_bounded_without_trailing_hyphen() {
        let description = "ab ".repeat(200);
        let name = synthesize("keyword", &description, "jpg");
        assert!(name.len() <= MAX_FILENAME_LEN);
        assert!(name.ends_with(".jpg"));
        assert!(!name.contains("-.jpg"));
    }

    #[test]
    fn normalize_matches_synthesize_alphabet() {
        assert_eq!(normalize(" Hello   World ").as_deref(), Some("hello-world"));
        assert_eq!(normalize("a -- b").as_deref(), Some("a-b"));
    }

    #[test]
    fn fallback_name_has_timestamp_shape() {
        let name = fallback_name("png");
        let stamp = name
            .strip_prefix("image-")
            .and_then(|rest| rest.strip_suffix(".png"))
            .unwrap();
        assert!(stamp.parse::<i64>().unwrap() > 0);
    }
}
