//! Theming: design tokens, the current-theme context and its persistence.
//!
//! | Module    | Role                                                   |
//! |-----------|--------------------------------------------------------|
//! | `name`    | `ThemeName`, the closed set light / dark / gray        |
//! | `tokens`  | static token tables, pure style-sheet serialization    |
//! | `context` | `ThemeContext`, owner of the single current theme      |
//! | `storage` | storage port (file, memory, disabled)                  |
//! | `scope`   | style scope port and the in-memory `DocumentRoot`      |

mod context;
mod name;
pub mod scope;
pub mod storage;
pub mod tokens;

pub use context::{Persistence, ThemeContext};
pub use name::ThemeName;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("unknown theme `{0}` (expected light, dark or gray)")]
    UnknownTheme(String),
}
