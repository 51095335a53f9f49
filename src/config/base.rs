//! `[base]` section configuration.
//!
//! Site identity used in page heads, structured data and the RSS channel.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in marquee.toml - site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Acme PM"
/// description = "Roadmaps your whole company understands"
/// url = "https://acme.example"
/// author = "Acme Product Team"
/// logo = "https://acme.example/logo.png"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site (and publisher) name.
    pub title: String,

    /// Default meta description.
    pub description: String,

    /// Absolute base URL for canonical links, sitemap and RSS.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Article author shown in structured data.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Author profile URL. Falls back to the site URL.
    #[serde(default)]
    pub author_url: Option<String>,

    /// Publisher logo URL for structured data.
    #[serde(default)]
    pub logo: Option<String>,

    /// BCP 47 language code.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Copyright notice for the footer.
    #[serde(default)]
    pub copyright: String,
}

impl BaseConfig {
    /// Base URL without a trailing slash, empty when unset.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    /// Author URL, defaulting to the site URL.
    pub fn author_url(&self) -> String {
        self.author_url
            .clone()
            .unwrap_or_else(|| self.base_url().to_owned())
    }

    /// Logo URL, defaulting to `<base>/logo.png`.
    pub fn logo_url(&self) -> String {
        self.logo
            .clone()
            .unwrap_or_else(|| format!("{}/logo.png", self.base_url()))
    }
}
