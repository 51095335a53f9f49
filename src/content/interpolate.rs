//! `{{key}}` placeholder substitution.
//!
//! - `{{key}}` and `{{ key }}` are equivalent
//! - `\{{key}}` renders the literal `{{key}}`
//! - keys are `[A-Za-z0-9_.-]+`; anything else between braces is left as-is

use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\\)?\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("valid placeholder regex")
});

/// How substituted values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// Backslash-escape every ASCII punctuation char, so values in a
    /// markdown body render as literal text (no links, images or raw HTML).
    Markdown,
    /// Insert values verbatim (titles fed to the slugifier, SEO text).
    Raw,
}

/// Substitution result.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Interpolated {
    pub text: String,
    /// Keys with no value; rendered as empty strings.
    pub unresolved: Vec<String>,
}

/// Replace placeholders in `template` with values from `resolve`.
pub fn interpolate<'v>(
    template: &str,
    resolve: impl Fn(&str) -> Option<&'v str>,
    escape: Escape,
) -> Interpolated {
    let mut unresolved = Vec::new();
    let text = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let whole = &caps[0];
        if caps.get(1).is_some() {
            return whole[1..].to_owned();
        }
        let key = &caps[2];
        match resolve(key) {
            Some(value) if escape == Escape::Markdown => escape_markdown(value),
            Some(value) => value.to_owned(),
            None => {
                if !unresolved.iter().any(|seen| seen == key) {
                    unresolved.push(key.to_owned());
                }
                String::new()
            }
        }
    });

    Interpolated {
        text: text.into_owned(),
        unresolved,
    }
}

fn escape_markdown(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 2);
    for c in value.chars() {
        if c.is_ascii_punctuation() {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
