//! Accent folding helpers used by the search pipeline and the sort stage.
//!
//! Matching in the atlas is accent-insensitive: a query for "Inicio" must find
//! records titled "Início" and vice versa. The helpers here are pure and total;
//! callers decide how to treat absent fields before reaching for them.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Return a case-preserving copy of `text` with diacritics removed.
///
/// Works by NFD-decomposing the input and dropping combining marks, so "Início"
/// becomes "Inicio" and "Vistas Aéreas" becomes "Vistas Aereas". Characters
/// without a decomposition pass through unchanged.
#[must_use]
pub fn unaccent(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Fold `text` into a sort key: diacritics removed, punctuation and whitespace
/// stripped.
///
/// Sorting "Praça XV" next to "Praca 15" is the intent; the exact collation of
/// what remains is plain code-point order.
#[must_use]
pub fn sort_key(text: &str) -> String {
    unaccent(text).chars().filter(|c| c.is_alphanumeric()).collect()
}
