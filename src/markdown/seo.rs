//! SEO metadata for processed content.
//!
//! Precedence rules:
//!
//! | Field       | 1st                   | 2nd                          | 3rd                            |
//! |-------------|-----------------------|------------------------------|--------------------------------|
//! | title       | front-matter `title`  | first H1                     | `{Keyword}: The Complete Guide`|
//! | description | front-matter `description` | first paragraph ≥ 50 chars | templated from the keyword   |
//!
//! Keywords are the primary keyword, then front-matter `keywords`, then the
//! configured domain keywords that occur in the text.

use super::{ProcessedContent, excerpt::clamp};
use crate::config::{BaseConfig, SiteConfig};
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Maximum title length in chars.
pub const TITLE_MAX: usize = 70;
/// Maximum meta description length in chars.
pub const DESCRIPTION_MAX: usize = 160;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]*\}\}").expect("valid placeholder regex"));

/// Title, description, keywords and JSON-LD of one page.
#[derive(Debug, Clone, Serialize)]
pub struct SeoData {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub structured_data: Article,
}

// ============================================================================
// Structured data
// ============================================================================

/// schema.org `Article`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    pub headline: String,
    pub description: String,
    pub url: String,
    pub author: Person,
    pub publisher: Organization,
    pub keywords: Vec<String>,
    pub about: Thing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub name: String,
    pub logo: ImageObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thing {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub name: String,
}

impl Article {
    /// Build an article; unresolved `{{...}}` placeholders are dropped.
    pub fn new(
        headline: &str,
        description: &str,
        url: &str,
        keywords: &[String],
        about: &str,
        base: &BaseConfig,
    ) -> Self {
        Self {
            context: "https://schema.org",
            kind: "Article",
            headline: strip_placeholders(headline),
            description: strip_placeholders(description),
            url: url.to_owned(),
            author: Person {
                kind: "Person",
                name: strip_placeholders(&base.author),
                url: base.author_url(),
            },
            publisher: Organization {
                kind: "Organization",
                name: strip_placeholders(&base.title),
                logo: ImageObject {
                    kind: "ImageObject",
                    url: base.logo_url(),
                },
            },
            keywords: keywords
                .iter()
                .map(|keyword| strip_placeholders(keyword).trim().to_owned())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
            about: Thing {
                kind: "Thing",
                name: strip_placeholders(about),
            },
        }
    }

    /// Compact JSON for a `<script type="application/ld+json">` block.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn strip_placeholders(text: &str) -> String {
    PLACEHOLDER.replace_all(text, "").trim().to_owned()
}

// ============================================================================
// Generation
// ============================================================================

/// Derive SEO data for `content` published at `url`.
///
/// `keyword` may be empty, in which case front-matter `keyword` is used.
pub fn generate_seo_data(
    content: &ProcessedContent,
    keyword: &str,
    url: &str,
    config: &SiteConfig,
) -> SeoData {
    let keyword = match keyword.trim() {
        "" => content.field("keyword").unwrap_or_default(),
        keyword => keyword,
    };

    let title = content
        .field("title")
        .map(str::to_owned)
        .or_else(|| content.headline.clone())
        .unwrap_or_else(|| fallback_title(keyword, &config.base));
    let title = clamp(&title, TITLE_MAX);

    let description = content
        .field("description")
        .map(str::to_owned)
        .or_else(|| content.lead.clone())
        .unwrap_or_else(|| fallback_description(keyword, &config.base));
    let description = clamp(&description, DESCRIPTION_MAX);

    let haystack = format!("{title} {}", content.text).to_lowercase();
    let explicit =
        std::iter::once(keyword).chain(front_matter_keywords(content.data.get("keywords")));
    let keywords = collect_keywords(explicit, &config.seo.domain_keywords, &haystack);

    let about = match keyword {
        "" => title.as_str(),
        keyword => keyword,
    };
    let structured_data = Article::new(&title, &description, url, &keywords, about, &config.base);

    SeoData {
        title,
        description,
        keywords,
        structured_data,
    }
}

fn fallback_title(keyword: &str, base: &BaseConfig) -> String {
    match keyword {
        "" => base.title.clone(),
        keyword => format!("{}: The Complete Guide", title_case(keyword)),
    }
}

fn fallback_description(keyword: &str, base: &BaseConfig) -> String {
    match keyword {
        "" if base.description.is_empty() => base.title.clone(),
        "" => base.description.clone(),
        keyword => format!(
            "Everything product teams need to know about {keyword}: practical frameworks, \
             real examples and ready-to-use templates from {}.",
            base.title
        ),
    }
}

/// Uppercase the first letter of each word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Front-matter `keywords`, as a list or a comma-separated string.
pub fn front_matter_keywords(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(list)) => list.split(',').collect(),
        _ => Vec::new(),
    }
}

/// Ordered, case-insensitively deduplicated keyword list: `explicit`
/// first, then each `domain` keyword found in `haystack_lower`.
pub fn collect_keywords<'a>(
    explicit: impl IntoIterator<Item = &'a str>,
    domain: &'a [String],
    haystack_lower: &str,
) -> Vec<String> {
    let found = domain
        .iter()
        .map(String::as_str)
        .filter(|keyword| haystack_lower.contains(&keyword.to_lowercase()));

    let mut seen = FxHashSet::default();
    let mut keywords = Vec::new();
    for keyword in explicit.into_iter().chain(found) {
        let keyword = keyword.trim();
        if !keyword.is_empty() && seen.insert(keyword.to_lowercase()) {
            keywords.push(keyword.to_owned());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::Processor;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Acme PM".into();
        config.base.url = Some("https://acme.example".into());
        config.base.author = "Acme Team".into();
        config
    }

    fn seo(raw: &str, keyword: &str) -> SeoData {
        let content = Processor::default().process(raw, None);
        generate_seo_data(&content, keyword, "https://acme.example/x/", &config())
    }

    #[test]
    fn test_front_matter_title_wins() {
        let data = seo("---\ntitle: From Front Matter\n---\n# From Heading\n", "okr");
        assert_eq!(data.title, "From Front Matter");
    }

    #[test]
    fn test_first_h1_title() {
        let data = seo("# Roadmaps That Work\n\nbody\n\n# Ignored\n", "roadmap");
        assert_eq!(data.title, "Roadmaps That Work");
    }

    #[test]
    fn test_keyword_title_fallback() {
        let data = seo("just a paragraph", "product discovery");
        assert_eq!(data.title, "Product Discovery: The Complete Guide");
    }

    #[test]
    fn test_title_clamped() {
        let long = "word ".repeat(40);
        let data = seo(&format!("# {long}"), "");
        assert!(data.title.chars().count() <= TITLE_MAX);
    }

    #[test]
    fn test_description_from_first_long_paragraph() {
        let lead = "Roadmaps align engineering, design and sales around one shared plan.";
        let data = seo(&format!("# T\n\nShort one.\n\n{lead}\n"), "roadmap");
        assert_eq!(data.description, lead);
    }

    #[test]
    fn test_description_fallback_and_bound() {
        let data = seo("# T\n\ntiny", "stakeholder alignment");
        assert!(data.description.contains("stakeholder alignment"));
        assert!(data.description.chars().count() <= DESCRIPTION_MAX);

        let long = "lorem ipsum ".repeat(60);
        let data = seo(&format!("---\ndescription: {long}\n---\n"), "x");
        assert!(data.description.chars().count() <= DESCRIPTION_MAX);
        assert!(data.description.ends_with("..."));
    }

    #[test]
    fn test_keywords_order_and_dedup() {
        let raw = "---\nkeywords: [Roadmap, planning]\n---\nOur roadmap and OKR process.";
        let data = seo(raw, "roadmap");
        assert_eq!(data.keywords[0], "roadmap");
        assert_eq!(data.keywords[1], "planning");
        assert!(data.keywords.iter().any(|k| k == "okr"));
        let lower: Vec<_> = data.keywords.iter().map(|k| k.to_lowercase()).collect();
        assert_eq!(lower.iter().filter(|k| *k == "roadmap").count(), 1);
    }

    #[test]
    fn test_keywords_comma_string() {
        let list = Value::String("a, b,,a".into());
        let keywords = collect_keywords(front_matter_keywords(Some(&list)), &[], "");
        assert_eq!(keywords, ["a", "b"]);

        let domain = ["OKR".to_owned(), "roadmap".to_owned()];
        let keywords = collect_keywords(["okr"], &domain, "our okr and roadmap");
        assert_eq!(keywords, ["okr", "roadmap"]);
    }

    #[test]
    fn test_structured_data_shape() {
        let data = seo("# Guide to {{topic}}\n\nbody", "okr");
        let json: Value = serde_json::from_str(&data.structured_data.to_json()).unwrap();

        assert_eq!(json["@context"], "https://schema.org");
        assert_eq!(json["@type"], "Article");
        assert_eq!(json["url"], "https://acme.example/x/");
        assert_eq!(json["author"]["name"], "Acme Team");
        assert_eq!(json["publisher"]["name"], "Acme PM");
        assert_eq!(json["publisher"]["logo"]["url"], "https://acme.example/logo.png");
        assert_eq!(json["about"]["name"], "okr");
        assert!(json["keywords"].is_array());
        assert_eq!(json["keywords"][0], "okr");
        assert!(!data.structured_data.to_json().contains("{{"));
    }

    #[test]
    fn test_structured_keywords_drop_placeholders() {
        let keywords = vec!["{{product}}".to_owned(), "launch".to_owned()];
        let base = BaseConfig::default();
        let article = Article::new("T", "D", "https://acme.example/", &keywords, "launch", &base);
        assert_eq!(article.keywords, ["launch"]);
    }

    #[test]
    fn test_front_matter_keyword_used_when_none_given() {
        let data = seo("---\nkeyword: user research\n---\nhello", "");
        assert_eq!(data.keywords[0], "user research");
        assert_eq!(data.title, "User Research: The Complete Guide");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("product  roadmap"), "Product Roadmap");
        assert_eq!(title_case(""), "");
    }
}
