//! Site configuration management for `marquee.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[base]`      | Site identity (title, url, author, logo)         |
//! | `[build]`     | Paths, minify, sitemap, RSS                      |
//! | `[seo]`       | Excerpt bound, reading speed, keywords, CTA      |
//! | `[theme]`     | Default theme and persisted storage slot         |
//! | `[analytics]` | Event tracking switch                            |
//! | `[variables]` | Global content-template variables                |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Acme PM"
//! description = "Roadmaps your whole company understands"
//! url = "https://acme.example"
//!
//! [build.rss]
//! enable = true
//!
//! [theme]
//! default = "dark"
//!
//! [variables]
//! product = "Acme PM"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod seo;
mod theme;

pub use base::BaseConfig;
pub use build::BuildConfig;
pub use error::ConfigError;
pub use seo::{CtaConfig, SeoConfig};
pub use theme::{AnalyticsConfig, ThemeConfig};

use crate::cli::{BuildArgs, Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Smallest excerpt bound that still leaves room for a word and `...`.
const MIN_EXCERPT_LENGTH: usize = 10;

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing marquee.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// SEO heuristics and call-to-action
    #[serde(default)]
    pub seo: SeoConfig,

    /// Theme defaults and persistence
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Analytics event sink
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Global variables for content templates
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Resolved theme storage file (`~` expanded, relative paths under root).
    ///
    /// `None` when `[theme] storage` is empty, which disables persistence.
    pub fn theme_storage_path(&self) -> Option<PathBuf> {
        if self.theme.storage.as_os_str().is_empty() {
            return None;
        }
        let raw = self.theme.storage.to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
        if expanded.is_relative() {
            Some(self.get_root().join(expanded))
        } else {
            Some(expanded)
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => cli
                .root
                .clone()
                .unwrap_or_else(|| self.get_root().to_owned())
                .join(name),
            _ => cli
                .root
                .clone()
                .unwrap_or_else(|| self.get_root().to_owned()),
        };

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.update_path_with_root(&root, &cli.config);

        if let Commands::Build { build_args } = &cli.command {
            self.update_with_build_args(build_args);
        }
    }

    fn update_with_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.rss.enable, args.rss.as_ref());
        Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
        if let Some(url) = &args.base_url {
            self.base.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Make every directory path absolute under `root`
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.templates = Self::normalize_path(&root.join(&self.build.templates));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let needs_url = self.build.sitemap.enable || self.build.rss.enable;
        match &self.base.url {
            None if needs_url => bail!(ConfigError::Validation(
                "[base.url] is required for sitemap and RSS generation".into()
            )),
            Some(url) if !url.starts_with("http") => bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            )),
            _ => {}
        }

        if self.seo.excerpt_length < MIN_EXCERPT_LENGTH {
            bail!(ConfigError::Validation(format!(
                "[seo.excerpt_length] must be at least {MIN_EXCERPT_LENGTH}"
            )));
        }

        if self.seo.words_per_minute == 0 {
            bail!(ConfigError::Validation(
                "[seo.words_per_minute] must be greater than 0".into()
            ));
        }

        if self.build.blog_prefix.contains(['/', '\\']) || self.build.blog_prefix.is_empty() {
            bail!(ConfigError::Validation(
                "[build.blog_prefix] must be a single non-empty path segment".into()
            ));
        }

        if self.theme.storage_key.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[theme.storage_key] must not be empty".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
