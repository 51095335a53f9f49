//! Page shell: wraps rendered bodies into complete HTML documents.

use crate::{
    config::SiteConfig,
    content::BlogSummary,
    markdown::Article,
    theme::scope::DocumentRoot,
    utils::html::{escape_html, escape_script_json},
};
use std::fmt::Write;

/// Per-page head data and body.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub keywords: &'a [String],
    pub canonical_url: &'a str,
    pub structured_data: Option<&'a Article>,
    /// Already-rendered HTML.
    pub body: &'a str,
}

/// Site-wide inputs shared by every page.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub config: &'a SiteConfig,
    /// Root element carrying the applied theme.
    pub root: &'a DocumentRoot,
    /// Href of the token style sheet.
    pub stylesheet: &'a str,
}

/// Render a full HTML5 document.
pub fn render_page(page: &Page<'_>, ctx: &PageContext<'_>) -> String {
    let base = &ctx.config.base;
    let mut html = String::with_capacity(page.body.len() + 2048);

    let title = if page.title == base.title || base.title.is_empty() {
        escape_html(page.title)
    } else {
        format!("{} | {}", escape_html(page.title), escape_html(&base.title))
    };

    // `write!` into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{lang}\"{attrs}>\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <meta name=\"description\" content=\"{description}\">\n",
        lang = escape_html(&base.language),
        attrs = ctx.root.html_attributes(),
        description = escape_html(page.description),
    );
    if !page.keywords.is_empty() {
        let _ = writeln!(
            html,
            "<meta name=\"keywords\" content=\"{}\">",
            escape_html(&page.keywords.join(", "))
        );
    }
    if !page.canonical_url.is_empty() {
        let _ = writeln!(
            html,
            "<link rel=\"canonical\" href=\"{}\">",
            escape_html(page.canonical_url)
        );
        let _ = writeln!(
            html,
            "<meta property=\"og:url\" content=\"{}\">",
            escape_html(page.canonical_url)
        );
    }
    let _ = write!(
        html,
        "<meta property=\"og:type\" content=\"article\">\n\
         <meta property=\"og:title\" content=\"{}\">\n\
         <meta property=\"og:description\" content=\"{}\">\n\
         <link rel=\"stylesheet\" href=\"{}\">\n",
        escape_html(page.title),
        escape_html(page.description),
        escape_html(ctx.stylesheet),
    );
    if let Some(article) = page.structured_data {
        let _ = writeln!(
            html,
            "<script type=\"application/ld+json\">{}</script>",
            escape_script_json(&article.to_json())
        );
    }
    html.push_str("</head>\n<body>\n");

    render_header(&mut html, ctx.config);
    html.push_str("<main>\n");
    html.push_str(page.body);
    html.push_str("</main>\n");
    render_footer(&mut html, ctx.config);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, config: &SiteConfig) {
    let _ = write!(
        html,
        "<header class=\"site-header\">\n<a class=\"brand\" href=\"/\">{}</a>\n\
         <nav>\n<a href=\"/\">Home</a>\n<a href=\"/{}/\">Blog</a>\n\
         <a class=\"button\" href=\"{}\">{}</a>\n</nav>\n</header>\n",
        escape_html(&config.base.title),
        escape_html(config.build.blog_prefix.trim_matches('/')),
        escape_html(&config.seo.cta.url),
        escape_html(&config.seo.cta.label),
    );
}

fn render_footer(html: &mut String, config: &SiteConfig) {
    html.push_str("<footer class=\"site-footer\">\n");
    if !config.base.copyright.is_empty() {
        let _ = writeln!(html, "<p>{}</p>", escape_html(&config.base.copyright));
    }
    let _ = writeln!(
        html,
        "<p>{}</p>\n</footer>",
        escape_html(&config.base.description)
    );
}

/// Body of the blog index page.
pub fn render_blog_index(summaries: &[BlogSummary], config: &SiteConfig) -> String {
    let prefix = config.build.blog_prefix.trim_matches('/');
    let mut html = String::from("<section class=\"section section-blog-index\">\n<h1>Blog</h1>\n");

    if summaries.is_empty() {
        html.push_str("<p>No articles yet.</p>\n");
    }
    for summary in summaries {
        let _ = write!(
            html,
            "<article class=\"post-card\">\n\
             <h2><a href=\"/{prefix}/{slug}/\">{title}</a></h2>\n\
             <p>{excerpt}</p>\n\
             <p class=\"meta\">{category} · {minutes} min read</p>\n\
             </article>\n",
            prefix = escape_html(prefix),
            slug = escape_html(&summary.slug),
            title = escape_html(&summary.title),
            excerpt = escape_html(&summary.excerpt),
            category = escape_html(&summary.category),
            minutes = summary.read_time,
        );
    }

    html.push_str("</section>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ThemeContext, ThemeName, storage::MemoryStorage};

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Acme PM".into();
        config.base.description = "Roadmaps for everyone".into();
        config.base.url = Some("https://acme.example".into());
        config
    }

    fn root(theme: ThemeName) -> DocumentRoot {
        let mut context =
            ThemeContext::load(MemoryStorage::new(), DocumentRoot::new(), &Default::default());
        context.set_theme(theme);
        context.scope().clone()
    }

    #[test]
    fn test_render_page_head() {
        let config = config();
        let root = root(ThemeName::Dark);
        let keywords = vec!["okr".to_owned(), "roadmap".to_owned()];
        let url = "https://acme.example/t/";
        let article = Article::new("T", "D", url, &keywords, "okr", &config.base);
        let page = Page {
            title: "Tom & Jerry's <Guide>",
            description: "A \"quoted\" description",
            keywords: &keywords,
            canonical_url: "https://acme.example/t/",
            structured_data: Some(&article),
            body: "<p>body</p>",
        };
        let ctx = PageContext {
            config: &config,
            root: &root,
            stylesheet: "/theme-00000000.css",
        };
        let html = render_page(&page, &ctx);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains("<title>Tom &amp; Jerry&#39;s &lt;Guide&gt; | Acme PM</title>"));
        assert!(html.contains(r#"content="A &quot;quoted&quot; description""#));
        assert!(html.contains(r#"<meta name="keywords" content="okr, roadmap">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://acme.example/t/">"#));
        assert!(html.contains(r#"<script type="application/ld+json">{"@context""#));
        assert!(html.contains(r#"href="/theme-00000000.css""#));
        assert!(html.contains("<main>\n<p>body</p></main>"));
    }

    #[test]
    fn test_json_ld_cannot_close_script() {
        let config = config();
        let article = Article::new("</script><b>", "d", "u", &[], "a", &config.base);
        let page = Page {
            title: "t",
            description: "d",
            keywords: &[],
            canonical_url: "",
            structured_data: Some(&article),
            body: "",
        };
        let root = DocumentRoot::new();
        let ctx = PageContext {
            config: &config,
            root: &root,
            stylesheet: "/s.css",
        };
        let html = render_page(&page, &ctx);
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(!html.contains("rel=\"canonical\""));
    }

    #[test]
    fn test_blog_index() {
        let config = config();
        let summaries = vec![BlogSummary {
            slug: "okr-guide".into(),
            title: "OKRs & You".into(),
            excerpt: "Short".into(),
            category: "guides".into(),
            segment: "pm".into(),
            read_time: 4,
        }];
        let html = render_blog_index(&summaries, &config);
        assert!(html.contains(r#"<a href="/blog/okr-guide/">OKRs &amp; You</a>"#));
        assert!(html.contains("4 min read"));

        assert!(render_blog_index(&[], &config).contains("No articles yet."));
    }
}
