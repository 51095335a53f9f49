//! URL slugification.
//!
//! `slugify` maps any title to a path-safe segment:
//!
//! | Input                   | Slug                   |
//! |-------------------------|------------------------|
//! | `The Great Guide!!`     | `the-great-guide`      |
//! | `  OKRs -- a primer `   | `okrs-a-primer`        |
//! | `Crème brûlée`          | `creme-brulee`         |
//!
//! The output only contains `[a-z0-9-]` with no leading, trailing or
//! repeated hyphen, so slugifying a slug returns it unchanged.

use deunicode::deunicode;

/// Convert text to a lowercase, hyphenated URL slug.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
        // everything else is stripped without separating words
    }

    slug
}

/// Join a slug onto a URL prefix as a directory-style path.
///
/// `url_for("https://a.example/", "blog", "intro")` → `https://a.example/blog/intro/`
pub fn url_for(base: &str, prefix: &str, slug: &str) -> String {
    let base = base.trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    match (prefix.is_empty(), slug.is_empty()) {
        (true, true) => format!("{base}/"),
        (true, false) => format!("{base}/{slug}/"),
        (false, true) => format!("{base}/{prefix}/"),
        (false, false) => format!("{base}/{prefix}/{slug}/"),
    }
}
