//! `[seo]` section configuration.
//!
//! Bounds for excerpts, the reading-speed constant, domain keywords
//! detected in articles and the call-to-action appended to generated pages.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[seo]` section in marquee.toml.
///
/// # Example
/// ```toml
/// [seo]
/// excerpt_length = 160
/// words_per_minute = 200
/// domain_keywords = ["roadmap", "okr"]
///
/// [seo.cta]
/// label = "Book a demo"
/// url = "/demo/"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SeoConfig {
    /// Maximum excerpt length in characters.
    #[serde(default = "defaults::seo::excerpt_length")]
    #[educe(Default = defaults::seo::excerpt_length())]
    pub excerpt_length: usize,

    /// Reading speed used for reading-time estimates.
    #[serde(default = "defaults::seo::words_per_minute")]
    #[educe(Default = defaults::seo::words_per_minute())]
    pub words_per_minute: usize,

    /// Keywords added to an article's keyword list when found in its text.
    #[serde(default = "defaults::seo::domain_keywords")]
    #[educe(Default = defaults::seo::domain_keywords())]
    pub domain_keywords: Vec<String>,

    /// Call-to-action footer on generated content.
    #[serde(default)]
    pub cta: CtaConfig,
}

/// `[seo.cta]`
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CtaConfig {
    #[serde(default = "defaults::seo::cta::heading")]
    #[educe(Default = defaults::seo::cta::heading())]
    pub heading: String,

    #[serde(default = "defaults::seo::cta::text")]
    #[educe(Default = defaults::seo::cta::text())]
    pub text: String,

    #[serde(default = "defaults::seo::cta::label")]
    #[educe(Default = defaults::seo::cta::label())]
    pub label: String,

    #[serde(default = "defaults::seo::cta::url")]
    #[educe(Default = defaults::seo::cta::url())]
    pub url: String,
}
