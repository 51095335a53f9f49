//! Design token tables and their style-sheet serialization.
//!
//! Every theme defines the same token names in the same order; values
//! differ. Serialization is a pure function of the theme name.
//!
//! ```text
//! [data-theme="dark"] {
//!   --color-background: #0b0f19;
//!   --color-surface: #111827;
//!   ...
//! }
//! ```

use super::{ThemeError, ThemeName};

/// One token as `(name, value)`; the name is emitted as `--name`.
pub type Token = (&'static str, &'static str);

/// The full token mapping of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet {
    pub theme: ThemeName,
    pub tokens: &'static [Token],
}

// ============================================================================
// Token Tables
// ============================================================================

const LIGHT: &[Token] = &[
    ("color-background", "#ffffff"),
    ("color-surface", "#f8fafc"),
    ("color-surface-muted", "#f1f5f9"),
    ("color-text", "#0f172a"),
    ("color-text-muted", "#475569"),
    ("color-border", "#e2e8f0"),
    ("color-primary", "#4f46e5"),
    ("color-primary-contrast", "#ffffff"),
    ("color-accent", "#0ea5e9"),
    ("color-success", "#16a34a"),
    ("color-warning", "#d97706"),
    ("color-danger", "#dc2626"),
    ("gradient-hero", "linear-gradient(135deg, #eef2ff 0%, #e0f2fe 100%)"),
    ("shadow-card", "0 1px 3px rgba(15, 23, 42, 0.08), 0 1px 2px rgba(15, 23, 42, 0.04)"),
    ("radius-sm", "4px"),
    ("radius-md", "8px"),
    ("radius-lg", "16px"),
    ("space-xs", "0.25rem"),
    ("space-sm", "0.5rem"),
    ("space-md", "1rem"),
    ("space-lg", "2rem"),
    ("space-xl", "4rem"),
    ("font-sans", "Inter, system-ui, -apple-system, sans-serif"),
];

const DARK: &[Token] = &[
    ("color-background", "#0b0f19"),
    ("color-surface", "#111827"),
    ("color-surface-muted", "#1f2937"),
    ("color-text", "#f9fafb"),
    ("color-text-muted", "#9ca3af"),
    ("color-border", "#374151"),
    ("color-primary", "#818cf8"),
    ("color-primary-contrast", "#0b0f19"),
    ("color-accent", "#38bdf8"),
    ("color-success", "#4ade80"),
    ("color-warning", "#fbbf24"),
    ("color-danger", "#f87171"),
    ("gradient-hero", "linear-gradient(135deg, #1e1b4b 0%, #0c4a6e 100%)"),
    ("shadow-card", "0 1px 3px rgba(0, 0, 0, 0.5), 0 1px 2px rgba(0, 0, 0, 0.3)"),
    ("radius-sm", "4px"),
    ("radius-md", "8px"),
    ("radius-lg", "16px"),
    ("space-xs", "0.25rem"),
    ("space-sm", "0.5rem"),
    ("space-md", "1rem"),
    ("space-lg", "2rem"),
    ("space-xl", "4rem"),
    ("font-sans", "Inter, system-ui, -apple-system, sans-serif"),
];

const GRAY: &[Token] = &[
    ("color-background", "#f3f4f6"),
    ("color-surface", "#e5e7eb"),
    ("color-surface-muted", "#d1d5db"),
    ("color-text", "#111827"),
    ("color-text-muted", "#4b5563"),
    ("color-border", "#9ca3af"),
    ("color-primary", "#374151"),
    ("color-primary-contrast", "#f9fafb"),
    ("color-accent", "#6b7280"),
    ("color-success", "#15803d"),
    ("color-warning", "#b45309"),
    ("color-danger", "#b91c1c"),
    ("gradient-hero", "linear-gradient(135deg, #f3f4f6 0%, #d1d5db 100%)"),
    ("shadow-card", "0 1px 3px rgba(17, 24, 39, 0.12), 0 1px 2px rgba(17, 24, 39, 0.08)"),
    ("radius-sm", "4px"),
    ("radius-md", "8px"),
    ("radius-lg", "16px"),
    ("space-xs", "0.25rem"),
    ("space-sm", "0.5rem"),
    ("space-md", "1rem"),
    ("space-lg", "2rem"),
    ("space-xl", "4rem"),
    ("font-sans", "Inter, system-ui, -apple-system, sans-serif"),
];

impl TokenSet {
    /// The static token set of `theme`.
    pub const fn for_theme(theme: ThemeName) -> Self {
        let tokens = match theme {
            ThemeName::Light => LIGHT,
            ThemeName::Dark => DARK,
            ThemeName::Gray => GRAY,
        };
        Self { theme, tokens }
    }

    /// `(name, value)` pairs in declaration order, names without `--`.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.tokens.iter().copied()
    }

    #[cfg(test)]
    fn get(&self, name: &str) -> Option<&'static str> {
        self.iter().find_map(|(key, value)| (key == name).then_some(value))
    }

    /// Write one rule block for `selector`.
    fn write_rule(&self, selector: &str, out: &mut String) {
        out.push_str(selector);
        out.push_str(" {\n");
        for (name, value) in self.iter() {
            out.push_str("  --");
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(";\n");
        }
        out.push_str("}\n");
    }
}

/// CSS selector matching a document root carrying `theme`.
pub fn theme_selector(theme: ThemeName) -> String {
    format!("[data-theme=\"{theme}\"]")
}

// ============================================================================
// Serialization
// ============================================================================

/// Serialize the token set of `theme` into a style sheet rule.
pub fn serialize_theme(theme: ThemeName) -> String {
    let set = TokenSet::for_theme(theme);
    let mut out = String::with_capacity(set.tokens.len() * 48);
    set.write_rule(&theme_selector(theme), &mut out);
    out
}

/// Serialize a theme by name.
///
/// Unknown names are rejected without producing any output.
pub fn serialize(name: &str) -> Result<String, ThemeError> {
    let theme: ThemeName = name.parse()?;
    Ok(serialize_theme(theme))
}

/// Style sheet covering every theme, with light also bound to `:root`.
pub fn serialize_all() -> String {
    let mut out = String::from("/* generated by marquee: design tokens */\n");
    for theme in ThemeName::ALL {
        let selector = if theme == ThemeName::default() {
            format!(":root,\n{}", theme_selector(theme))
        } else {
            theme_selector(theme)
        };
        TokenSet::for_theme(theme).write_rule(&selector, &mut out);
    }
    out
}
