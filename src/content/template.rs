//! Content template definitions.
//!
//! Templates are plain TOML documents:
//!
//! ```toml
//! id = "okr-guide"
//! title = "OKRs for {{audience}}"
//! category = "guides"
//! segment = "product-leaders"
//!
//! [seo]
//! keywords = ["okr"]
//!
//! [[sections]]
//! kind = "hero"
//! title = "Goals your whole team can see"
//! content = "Built for **{{audience}}**."
//! variables = { audience = "product teams" }
//! ```

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// A reusable page recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentTemplate {
    pub id: String,
    /// May contain `{{key}}` placeholders.
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Target audience.
    #[serde(default)]
    pub segment: String,
    #[serde(default)]
    pub sections: Vec<ContentSection>,
    #[serde(default)]
    pub seo: SeoSettings,
}

impl ContentTemplate {
    /// Default for `key` from the first section that declares it.
    pub fn default_for(&self, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find_map(|section| section.variables.get(key))
            .map(String::as_str)
    }
}

/// One block of a template, rendered in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentSection {
    pub kind: SectionKind,
    #[serde(default)]
    pub title: String,
    /// Markdown with `{{key}}` placeholders.
    #[serde(default)]
    pub content: String,
    /// Placeholder defaults.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    Problem,
    Solution,
    Features,
    Benefits,
    Testimonial,
    Faq,
    Cta,
}

impl SectionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Problem => "problem",
            Self::Solution => "solution",
            Self::Features => "features",
            Self::Benefits => "benefits",
            Self::Testimonial => "testimonial",
            Self::Faq => "faq",
            Self::Cta => "cta",
        }
    }

    /// Heading element for the section title.
    pub const fn heading_tag(self) -> &'static str {
        match self {
            Self::Hero => "h1",
            _ => "h2",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search metadata of a template or generated page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeoSettings {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
}
