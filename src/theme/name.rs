//! The closed set of theme names.

use super::ThemeError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A named visual appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
    Gray,
}

impl ThemeName {
    /// Every theme, in toggle order.
    pub const ALL: [ThemeName; 3] = [ThemeName::Light, ThemeName::Dark, ThemeName::Gray];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Gray => "gray",
        }
    }

    /// Whether the theme is built on a dark palette.
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// The theme after this one in toggle order.
    pub const fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Gray,
            Self::Gray => Self::Light,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ThemeError::UnknownTheme(name.to_owned()))
    }
}
