use std::cmp::Ordering;

use feruca::{Collator, Locale, Tailoring};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lower-cases `text` and strips diacritics (NFD, then drops combining marks).
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// [`normalize`] for optional values; `None` becomes the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Unicode collation with the CLDR root order.
///
/// Punctuation and spaces are not ignorable: they sort before digits, and
/// digits before letters. Accents and case only break ties.
pub struct TextCollator {
    inner: Collator,
    fold_case: bool,
}

impl TextCollator {
    /// Total order: strings that collate equal fall back to code points.
    pub fn new() -> Self {
        Self {
            inner: Collator::new(Tailoring::Cldr(Locale::Root), false, true),
            fold_case: false,
        }
    }

    /// Case never decides, so strings differing only in case compare equal.
    pub fn case_insensitive() -> Self {
        Self {
            inner: Collator::new(Tailoring::Cldr(Locale::Root), false, false),
            fold_case: true,
        }
    }

    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        if self.fold_case {
            let (a, b) = (a.to_lowercase(), b.to_lowercase());
            self.inner.collate(a.as_str(), b.as_str())
        } else {
            self.inner.collate(a, b)
        }
    }
}

impl Default for TextCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// One-off [`TextCollator::new`] comparison. Sort through a single
/// `TextCollator` when ordering many values.
pub fn collate(a: &str, b: &str) -> Ordering {
    TextCollator::new().compare(a, b)
}
