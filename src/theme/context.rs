//! The owned current-theme state.
//!
//! ```text
//! ThemeStorage ──load──► ThemeContext ──apply──► StyleScope
//!      ▲                     │
//!      └──────persist────────┘ (set_theme / toggle)
//! ```
//!
//! The persisted slot holds `{"themeName": "<name>"}`. Anything unreadable
//! resolves to the configured default.

use super::{
    ThemeError, ThemeName,
    scope::{DocumentRoot, StyleScope},
    storage::ThemeStorage,
    tokens::TokenSet,
};
use crate::{config::ThemeConfig, log};
use serde::{Deserialize, Serialize};

/// Outcome of persisting a theme change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    Saved,
    /// Storage failed; the theme applies for this session only.
    Skipped,
}

/// Persisted slot layout.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedTheme {
    #[serde(rename = "themeName")]
    theme_name: String,
}

/// Holds the single current theme and projects it onto a style scope.
pub struct ThemeContext<S: StyleScope = DocumentRoot> {
    current: ThemeName,
    storage: Box<dyn ThemeStorage>,
    scope: S,
    key: String,
}

impl<S: StyleScope> ThemeContext<S> {
    /// Initialize from storage, falling back to `config.default`, and apply.
    pub fn load(storage: impl ThemeStorage + 'static, scope: S, config: &ThemeConfig) -> Self {
        let current = read_persisted(&storage, &config.storage_key).unwrap_or(config.default);
        let mut context = Self {
            current,
            storage: Box::new(storage),
            scope,
            key: config.storage_key.clone(),
        };
        apply(&mut context.scope, current);
        context
    }

    /// The current theme.
    pub fn theme(&self) -> ThemeName {
        self.current
    }

    /// The scope the theme is applied to.
    pub fn scope(&self) -> &S {
        &self.scope
    }

    /// Switch to `theme`, apply it, then persist it.
    pub fn set_theme(&mut self, theme: ThemeName) -> Persistence {
        self.current = theme;
        apply(&mut self.scope, theme);
        self.persist(theme)
    }

    /// Parse and switch. Unknown names leave the state untouched.
    pub fn set_theme_str(&mut self, name: &str) -> Result<Persistence, ThemeError> {
        let theme: ThemeName = name.parse()?;
        Ok(self.set_theme(theme))
    }

    /// Advance to the next theme in toggle order.
    pub fn toggle(&mut self) -> Persistence {
        self.set_theme(self.current.next())
    }

    fn persist(&self, theme: ThemeName) -> Persistence {
        let slot = PersistedTheme {
            theme_name: theme.as_str().to_owned(),
        };
        let value = match serde_json::to_string(&slot) {
            Ok(value) => value,
            Err(err) => {
                log!("warn"; "cannot encode theme slot: {err}");
                return Persistence::Skipped;
            }
        };
        match self.storage.set(&self.key, &value) {
            Ok(()) => Persistence::Saved,
            Err(err) => {
                log!("warn"; "theme not persisted ({err}); keeping `{theme}` for this session");
                Persistence::Skipped
            }
        }
    }
}

/// Read the persisted theme, `None` when absent or unusable.
fn read_persisted(storage: &dyn ThemeStorage, key: &str) -> Option<ThemeName> {
    let raw = match storage.get(key) {
        Ok(raw) => raw?,
        Err(err) => {
            log!("warn"; "theme storage unreadable ({err}), using default");
            return None;
        }
    };
    let slot: PersistedTheme = serde_json::from_str(&raw).ok()?;
    slot.theme_name.parse().ok()
}

/// Write the token set and theme classification onto `scope`.
fn apply<S: StyleScope>(scope: &mut S, theme: ThemeName) {
    scope.set_attribute("data-theme", theme.as_str());
    for candidate in ThemeName::ALL {
        scope.set_class(&format!("theme-{candidate}"), candidate == theme);
    }
    scope.set_class("dark", theme.is_dark());
    for (name, value) in TokenSet::for_theme(theme).iter() {
        scope.set_property(&format!("--{name}"), value);
    }
}
