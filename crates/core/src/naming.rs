//! Slug generation for titles and tags.
//!
//! Titles are transliterated to ASCII before slugifying, so
//! `"Café Menü"` becomes `"cafe-menu"`.

/// Slugify a title: ASCII transliteration, lowercase, hyphen-separated.
///
/// ```
/// use tunobase_core::naming::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Café Menü"), "cafe-menu");
/// ```
pub fn slugify(title: &str) -> String {
    slug::slugify(title)
}

/// Return `existing` if it is non-blank, otherwise a slug derived from `title`.
///
/// Slugs are assigned once; renaming content does not change its slug.
pub fn slug_or_derive(existing: Option<&str>, title: &str) -> String {
    match existing {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => slugify(title),
    }
}
