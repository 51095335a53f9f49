//! Template registry: built-in templates plus `*.toml` files from disk.

use super::{ContentError, ContentTemplate};
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Templates compiled into the binary, in registry order.
const BUILTIN: &[(&str, &str)] = &[
    ("okr-guide.toml", include_str!("../embed/templates/okr-guide.toml")),
    (
        "roadmap-playbook.toml",
        include_str!("../embed/templates/roadmap-playbook.toml"),
    ),
    (
        "prioritization-frameworks.toml",
        include_str!("../embed/templates/prioritization-frameworks.toml"),
    ),
    (
        "stakeholder-alignment.toml",
        include_str!("../embed/templates/stakeholder-alignment.toml"),
    ),
    (
        "product-discovery.toml",
        include_str!("../embed/templates/product-discovery.toml"),
    ),
];

/// Ordered, id-indexed collection of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<ContentTemplate>,
    index: FxHashMap<String, usize>,
}

impl TemplateRegistry {
    /// Registry with no templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in templates.
    pub fn builtin() -> Result<Self, ContentError> {
        let mut registry = Self::new();
        for (name, source) in BUILTIN {
            let origin = Path::new("<builtin>").join(name);
            registry.insert(parse(source, &origin)?, &origin)?;
        }
        Ok(registry)
    }

    /// Build from already-constructed templates.
    #[cfg(test)]
    pub fn from_templates(
        templates: impl IntoIterator<Item = ContentTemplate>,
    ) -> Result<Self, ContentError> {
        let mut registry = Self::new();
        for template in templates {
            registry.insert(template, Path::new("<inline>"))?;
        }
        Ok(registry)
    }

    /// Add a template; its id must be new.
    pub fn insert(&mut self, template: ContentTemplate, origin: &Path) -> Result<(), ContentError> {
        if template.id.trim().is_empty() {
            return Err(ContentError::Load {
                path: origin.to_owned(),
                message: "template id is empty".into(),
            });
        }
        if self.index.contains_key(&template.id) {
            return Err(ContentError::DuplicateTemplate {
                id: template.id,
                path: origin.to_owned(),
            });
        }
        self.index.insert(template.id.clone(), self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    /// Load every `*.toml` under `dir`, sorted by path.
    ///
    /// A missing directory is not an error. Returns the number loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, ContentError> {
        if !dir.is_dir() {
            return Ok(0);
        }

        let mut loaded = 0;
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|err| ContentError::Load {
                path: err.path().map_or_else(|| dir.to_owned(), Path::to_owned),
                message: err.to_string(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "toml") {
                continue;
            }

            let source = fs::read_to_string(path).map_err(|err| ContentError::Load {
                path: path.to_owned(),
                message: err.to_string(),
            })?;
            self.insert(parse(&source, path)?, path)?;
            loaded += 1;
        }

        Ok(loaded)
    }

    pub fn get(&self, id: &str) -> Option<&ContentTemplate> {
        self.index.get(id).map(|&idx| &self.templates[idx])
    }

    /// Templates in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }
}

fn parse(source: &str, origin: &Path) -> Result<ContentTemplate, ContentError> {
    toml::from_str(source).map_err(|err| ContentError::Load {
        path: PathBuf::from(origin),
        message: err.to_string(),
    })
}
