//! Template → page generation.

use super::{
    ContentError, ContentTemplate, SeoSettings, TemplateRegistry,
    interpolate::{Escape, interpolate},
};
use crate::{
    config::{BaseConfig, SiteConfig},
    log,
    markdown::{self, Article, DESCRIPTION_MAX, TITLE_MAX, clamp},
    utils::{
        html::escape_html,
        slug::{slugify, url_for},
    },
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Caller-supplied placeholder values.
pub type Variables = BTreeMap<String, String>;

/// A page produced from a template.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedContent {
    pub template_id: String,
    pub slug: String,
    pub title: String,
    pub html: String,
    pub seo: SeoSettings,
    pub structured_data: Article,
    pub category: String,
    pub segment: String,
    /// Minutes.
    pub read_time: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry for the blog index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub segment: String,
    pub read_time: usize,
}

/// Renders registry templates against the site configuration.
pub struct ContentFactory<'a> {
    registry: TemplateRegistry,
    config: &'a SiteConfig,
    generated_at: DateTime<Utc>,
}

impl<'a> ContentFactory<'a> {
    pub fn new(registry: TemplateRegistry, config: &'a SiteConfig) -> Self {
        Self {
            registry,
            config,
            generated_at: Utc::now(),
        }
    }

    /// Fix the timestamp stamped on generated content.
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Generate one page from template `template_id`.
    ///
    /// Values resolve from `variables`, then the section's defaults, then
    /// the first default any section declares, then render empty.
    pub fn generate_content(
        &self,
        template_id: &str,
        variables: &Variables,
    ) -> Result<GeneratedContent, ContentError> {
        let template = self
            .registry
            .get(template_id)
            .ok_or_else(|| ContentError::TemplateNotFound(template_id.to_owned()))?;
        Ok(self.render(template, variables))
    }

    /// Up to `limit` summaries in registry order, rendered with the
    /// configured `[variables]`.
    pub fn generate_blog_list(&self, limit: usize) -> Vec<BlogSummary> {
        self.registry
            .iter()
            .take(limit)
            .map(|template| {
                let page = self.render(template, &self.config.variables);
                BlogSummary {
                    excerpt: clamp(&page.seo.description, self.config.seo.excerpt_length),
                    slug: page.slug,
                    title: page.title,
                    category: page.category,
                    segment: page.segment,
                    read_time: page.read_time,
                }
            })
            .collect()
    }

    fn render(&self, template: &ContentTemplate, variables: &Variables) -> GeneratedContent {
        let lookup = |key: &str| {
            variables
                .get(key)
                .map(String::as_str)
                .or_else(|| template.default_for(key))
        };
        let raw = |text: &str| self.resolve(template, text, &lookup, Escape::Raw);

        let title = raw(&template.title);
        let slug = match slugify(&title) {
            slug if slug.is_empty() => slugify(&template.id),
            slug => slug,
        };

        let mut html = String::new();
        let mut text = String::new();
        for section in &template.sections {
            let section_lookup = |key: &str| {
                variables
                    .get(key)
                    .or_else(|| section.variables.get(key))
                    .map(String::as_str)
                    .or_else(|| template.default_for(key))
            };
            let heading = self.resolve(template, &section.title, &section_lookup, Escape::Raw);
            let body =
                self.resolve(template, &section.content, &section_lookup, Escape::Markdown);
            let rendered = markdown::render(&body);

            let kind = section.kind;
            let tag = kind.heading_tag();
            html.push_str(&format!("<section class=\"section section-{kind}\">\n"));
            if !heading.is_empty() {
                html.push_str(&format!("<{tag}>{}</{tag}>\n", escape_html(&heading)));
            }
            html.push_str(&rendered.html);
            html.push_str("</section>\n");

            text.push_str(&heading);
            text.push(' ');
            text.push_str(&rendered.text);
            text.push(' ');
        }
        html.push_str(&self.cta_footer());

        let canonical_url = url_for(
            self.config.base.base_url(),
            &self.config.build.blog_prefix,
            &slug,
        );
        let seo_title = match raw(&template.seo.title) {
            seo_title if seo_title.is_empty() => title.clone(),
            seo_title => seo_title,
        };
        let description = match raw(&template.seo.description) {
            description if description.is_empty() => first_sentences(&text, &self.config.base),
            description => description,
        };
        let explicit: Vec<String> = template.seo.keywords.iter().map(|k| raw(k)).collect();
        let haystack = format!("{title} {text}").to_lowercase();
        let keywords = markdown::collect_keywords(
            explicit.iter().map(String::as_str),
            &self.config.seo.domain_keywords,
            &haystack,
        );

        let seo = SeoSettings {
            title: clamp(&seo_title, TITLE_MAX),
            description: clamp(&description, DESCRIPTION_MAX),
            keywords,
            canonical_url: Some(canonical_url.clone()),
        };
        let about = seo.keywords.first().unwrap_or(&template.category);
        let structured_data = Article::new(
            &seo.title,
            &seo.description,
            &canonical_url,
            &seo.keywords,
            about,
            &self.config.base,
        );

        let words = markdown::count_words(&text);
        GeneratedContent {
            template_id: template.id.clone(),
            slug,
            title,
            html,
            seo,
            structured_data,
            category: template.category.clone(),
            segment: template.segment.clone(),
            read_time: markdown::reading_time(words, self.config.seo.words_per_minute),
            created_at: self.generated_at,
            updated_at: self.generated_at,
        }
    }

    fn resolve<'v>(
        &self,
        template: &ContentTemplate,
        text: &str,
        lookup: &impl Fn(&str) -> Option<&'v str>,
        escape: Escape,
    ) -> String {
        let out = interpolate(text, lookup, escape);
        if !out.unresolved.is_empty() {
            log!("content"; "{}: no value for {}", template.id, out.unresolved.join(", "));
        }
        out.text
    }

    fn cta_footer(&self) -> String {
        let cta = &self.config.seo.cta;
        format!(
            "<section class=\"section section-cta-footer\">\n<h2>{}</h2>\n<p>{}</p>\n\
             <a class=\"button\" href=\"{}\">{}</a>\n</section>\n",
            escape_html(&cta.heading),
            escape_html(&cta.text),
            escape_html(&cta.url),
            escape_html(&cta.label),
        )
    }
}

/// Description fallback: the opening of the page text.
fn first_sentences(text: &str, base: &BaseConfig) -> String {
    let text = clamp(text, DESCRIPTION_MAX);
    if text.is_empty() {
        base.description.clone()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentSection, SectionKind};
    use chrono::TimeZone;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Acme PM".into();
        config.base.url = Some("https://acme.example/".into());
        config
    }

    fn template(id: &str, title: &str) -> ContentTemplate {
        ContentTemplate {
            id: id.into(),
            title: title.into(),
            category: "guides".into(),
            segment: "pm".into(),
            sections: vec![ContentSection {
                kind: SectionKind::Hero,
                title: "Welcome".into(),
                content: "Hello {{name}}".into(),
                variables: [("name".to_owned(), "World".to_owned())].into(),
            }],
            seo: SeoSettings::default(),
        }
    }

    fn factory(config: &SiteConfig, templates: Vec<ContentTemplate>) -> ContentFactory<'_> {
        let registry = TemplateRegistry::from_templates(templates).unwrap();
        ContentFactory::new(registry, config)
            .with_timestamp(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_generate_t1() {
        let config = config();
        let factory = factory(&config, vec![template("t1", "The Great Guide!!")]);
        let page = factory.generate_content("t1", &Variables::new()).unwrap();

        assert_eq!(page.slug, "the-great-guide");
        assert!(page.html.contains("Hello World"));
        assert!(page.html.contains(r#"<section class="section section-hero">"#));
        assert!(page.html.contains("<h1>Welcome</h1>"));
        assert_eq!(
            page.seo.canonical_url.as_deref(),
            Some("https://acme.example/blog/the-great-guide/")
        );
        assert_eq!(page.structured_data.url, "https://acme.example/blog/the-great-guide/");
        assert_eq!(page.read_time, 1);
        assert_eq!(page.created_at, page.updated_at);
    }

    #[test]
    fn test_runtime_variables_override_defaults() {
        let config = config();
        let factory = factory(&config, vec![template("t1", "Guide for {{name}}")]);
        let vars = Variables::from([("name".to_owned(), "Product Teams".to_owned())]);
        let page = factory.generate_content("t1", &vars).unwrap();

        assert_eq!(page.title, "Guide for Product Teams");
        assert_eq!(page.slug, "guide-for-product-teams");
        assert!(page.html.contains("Hello Product Teams"));
    }

    #[test]
    fn test_values_are_escaped() {
        let config = config();
        let factory = factory(&config, vec![template("t1", "T")]);
        let vars = Variables::from([("name".to_owned(), "<img src=x onerror=alert(1)>".to_owned())]);
        let page = factory.generate_content("t1", &vars).unwrap();

        assert!(!page.html.contains("<img"));
        assert!(page.html.contains("&lt;img"));
    }

    #[test]
    fn test_markdown_in_values_renders_literally() {
        let config = config();
        let factory = factory(&config, vec![template("t1", "T")]);
        let payload = "[claim prize](https://evil.example) ![x](https://evil.example/t.gif)";
        let vars = Variables::from([("name".to_owned(), payload.to_owned())]);
        let page = factory.generate_content("t1", &vars).unwrap();

        assert!(!page.html.contains("<a href=\"https://evil.example"));
        assert!(!page.html.contains("<img"));
        assert!(page.html.contains(&format!("<p>Hello {payload}</p>")));
    }

    #[test]
    fn test_template_markdown_still_renders() {
        let config = config();
        let mut t = template("t1", "T");
        t.sections[0].content = "**{{name}}** at [docs](https://acme.example/docs)".into();
        let factory = factory(&config, vec![t]);
        let vars = Variables::from([("name".to_owned(), "# Teams_1".to_owned())]);
        let page = factory.generate_content("t1", &vars).unwrap();

        assert!(page.html.contains("<strong># Teams_1</strong>"));
        assert!(page.html.contains(r#"<a href="https://acme.example/docs">docs</a>"#));
    }

    #[test]
    fn test_unresolved_placeholder_renders_empty() {
        let config = config();
        let mut t = template("t1", "T");
        t.sections[0].content = "Dear {{missing}}, hi".into();
        let factory = factory(&config, vec![t]);
        let page = factory.generate_content("t1", &Variables::new()).unwrap();

        assert!(page.html.contains("Dear , hi"));
        assert!(!page.html.contains("{{"));
    }

    #[test]
    fn test_unknown_template() {
        let config = config();
        let factory = factory(&config, vec![]);
        let err = factory
            .generate_content("unknown-id", &Variables::new())
            .unwrap_err();
        assert!(matches!(err, ContentError::TemplateNotFound(ref id) if id == "unknown-id"));
    }

    #[test]
    fn test_cta_footer_appended_last() {
        let config = config();
        let factory = factory(&config, vec![template("t1", "T")]);
        let page = factory.generate_content("t1", &Variables::new()).unwrap();

        let hero = page.html.find("section-hero").unwrap();
        let cta = page.html.find("section-cta-footer").unwrap();
        assert!(hero < cta);
        assert!(page.html.contains(&config.seo.cta.label));
    }

    #[test]
    fn test_seo_bounds() {
        let config = config();
        let mut t = template("t1", &"Very Long Title ".repeat(10));
        t.seo.description = "word ".repeat(100);
        let factory = factory(&config, vec![t]);
        let page = factory.generate_content("t1", &Variables::new()).unwrap();

        assert!(page.seo.title.chars().count() <= TITLE_MAX);
        assert!(page.seo.description.chars().count() <= DESCRIPTION_MAX);
        assert!(!page.structured_data.to_json().contains("{{"));
    }

    #[test]
    fn test_empty_title_slug_falls_back_to_id() {
        let config = config();
        let factory = factory(&config, vec![template("My Template", "!!!")]);
        let page = factory
            .generate_content("My Template", &Variables::new())
            .unwrap();
        assert_eq!(page.slug, "my-template");
    }

    #[test]
    fn test_blog_list_respects_limit_and_order() {
        let config = config();
        let templates = (1..=5)
            .map(|i| template(&format!("t{i}"), &format!("Post {i}")))
            .collect();
        let factory = factory(&config, templates);

        let list = factory.generate_blog_list(2);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].slug, "post-1");
        assert_eq!(list[1].slug, "post-2");
        assert!(list.iter().all(|s| s.excerpt.chars().count() <= 160));

        assert_eq!(factory.generate_blog_list(50).len(), 5);
        assert!(factory.generate_blog_list(0).is_empty());
    }

    #[test]
    fn test_blog_list_uses_configured_variables() {
        let mut config = config();
        config.variables.insert("name".into(), "Acme".into());
        let factory = factory(&config, vec![template("t1", "Hi {{name}}")]);
        assert_eq!(factory.generate_blog_list(1)[0].title, "Hi Acme");
    }

    #[test]
    fn test_builtin_templates_generate() {
        let config = config();
        let factory = ContentFactory::new(TemplateRegistry::builtin().unwrap(), &config);
        let mut slugs = Vec::new();
        for template in factory.registry().iter() {
            let page = factory.generate_content(&template.id, &config.variables).unwrap();
            assert!(!page.slug.is_empty());
            assert!(!page.html.contains("{{"), "{}", template.id);
            slugs.push(page.slug);
        }
        let count = slugs.len();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), count);
    }
}
