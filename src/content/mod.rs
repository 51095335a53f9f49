//! Template-driven marketing content.
//!
//! | Module        | Role                                              |
//! |---------------|---------------------------------------------------|
//! | `template`    | template / section / SEO settings types           |
//! | `registry`    | built-in templates and `*.toml` loading           |
//! | `interpolate` | `{{key}}` substitution                            |
//! | `factory`     | generated pages and blog summaries                |

mod factory;
mod interpolate;
mod registry;
mod template;

pub use factory::{BlogSummary, ContentFactory, GeneratedContent, Variables};
pub use registry::TemplateRegistry;
pub use template::{ContentSection, ContentTemplate, SectionKind, SeoSettings};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("template `{0}` not found")]
    TemplateNotFound(String),

    #[error("duplicate template id `{id}` in {}", path.display())]
    DuplicateTemplate { id: String, path: PathBuf },

    #[error("cannot load template {}: {message}", path.display())]
    Load { path: PathBuf, message: String },
}
