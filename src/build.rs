//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── write_stylesheet() ──► theme-<hash>.css (stale copies removed)
//!     │
//!     ├── markdown pages   ─┐  rendered in parallel, nothing written yet
//!     ├── template pages   ─┤
//!     ├── blog index       ─┘
//!     │
//!     ├── check_unique()   ──► duplicate output paths are a config error
//!     │
//!     ├── write pages (parallel, minified)
//!     │
//!     └── sitemap.xml, feed.xml, `build_completed` event
//! ```

use crate::{
    analytics::Tracker,
    config::{ConfigError, SiteConfig},
    content::{BlogSummary, ContentFactory, TemplateRegistry},
    generator::{rss::build_rss, sitemap::build_sitemap},
    layout::{Page, PageContext, render_blog_index, render_page},
    log,
    logger::ProgressBars,
    markdown::{Processor, generate_seo_data},
    theme::{ThemeContext, scope::DocumentRoot, storage, tokens::serialize_all},
    utils::{
        css::{cleanup_old_theme_css, write_theme_css},
        minify::{MinifyType, minify},
        slug::{slugify, url_for},
    },
};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde_json::json;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// A rendered page waiting to be written.
#[derive(Debug)]
struct OutputPage {
    /// Where the page came from, for error messages.
    source: String,
    /// Output path relative to the output directory.
    path: PathBuf,
    url: String,
    html: String,
}

/// Summary of a finished build.
#[derive(Debug)]
pub struct BuildReport {
    pub pages: usize,
    pub articles: usize,
    pub stylesheet: PathBuf,
}

/// Build the whole site into `config.build.output`.
pub fn build_site(config: &SiteConfig, tracker: &dyn Tracker) -> Result<BuildReport> {
    let output = &config.build.output;
    let built_at = Utc::now();

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let theme = ThemeContext::load(
        storage::open(config.theme_storage_path()),
        DocumentRoot::new(),
        &config.theme,
    );
    let stylesheet = write_stylesheet(config)?;
    let href = format!("/{}", stylesheet.display());
    let ctx = PageContext {
        config,
        root: theme.scope(),
        stylesheet: &href,
    };

    let mut registry = TemplateRegistry::builtin()?;
    let extra = registry.load_dir(&config.build.templates)?;
    log!("content"; "{} templates ({extra} from {})", registry.len(), config.build.templates.display());
    let factory = ContentFactory::new(registry, config).with_timestamp(built_at);

    let mut pages = render_markdown_pages(config, &ctx)?;
    let articles = render_template_pages(&factory, config, &ctx)?;
    let article_count = articles.len();
    pages.extend(articles);

    let summaries = factory.generate_blog_list(config.build.list_limit);
    pages.push(render_index_page(&summaries, config, &ctx));

    check_unique(&pages)?;
    write_pages(&pages, config)?;

    let urls: Vec<String> = pages.iter().map(|page| page.url.clone()).collect();
    let (sitemap, rss) = rayon::join(
        || build_sitemap(config, &urls, built_at),
        || build_rss(config, &summaries, built_at),
    );
    sitemap?;
    rss?;

    tracker.track(
        "build_completed",
        &json!({
            "pages": pages.len(),
            "articles": article_count,
            "theme": theme.theme().as_str(),
        }),
    );
    log!("build"; "done: {} pages ({} articles)", pages.len(), article_count);

    Ok(BuildReport {
        pages: pages.len(),
        articles: article_count,
        stylesheet,
    })
}

/// Write the fingerprinted token style sheet and drop older ones.
fn write_stylesheet(config: &SiteConfig) -> Result<PathBuf> {
    let output = &config.build.output;
    let sheet = serialize_all();
    let css = minify(MinifyType::Css(sheet.as_bytes()), config);

    let name = write_theme_css(output, &sheet, &css)?;
    let removed = cleanup_old_theme_css(output, &name)?;
    if removed > 0 {
        log!("theme"; "removed {removed} stale stylesheet(s)");
    }
    log!("theme"; "{}", name.display());
    Ok(name)
}

// ============================================================================
// Markdown pages
// ============================================================================

/// All `*.md` files under `dir`, sorted.
fn collect_markdown(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        log!("warn"; "content directory {} not found", dir.display());
        return Vec::new();
    }
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect()
}

fn render_markdown_pages(config: &SiteConfig, ctx: &PageContext<'_>) -> Result<Vec<OutputPage>> {
    let content_dir = &config.build.content;
    let sources = collect_markdown(content_dir);
    let processor = Processor::new(&config.seo);

    let progress = ProgressBars::new_filtered(&[("content", sources.len())]);
    let pages = sources
        .par_iter()
        .map(|source| {
            let page = render_markdown_page(source, content_dir, processor, config, ctx);
            if let Some(progress) = &progress {
                progress.inc_by_name("content");
            }
            page
        })
        .collect::<Result<Vec<_>>>();
    if let Some(progress) = &progress {
        progress.finish();
    }

    let pages = pages?;
    log!("content"; "{} markdown pages", pages.len());
    Ok(pages)
}

fn render_markdown_page(
    source: &Path,
    content_dir: &Path,
    processor: Processor,
    config: &SiteConfig,
    ctx: &PageContext<'_>,
) -> Result<OutputPage> {
    let raw = fs::read(source).with_context(|| format!("Failed to read {}", source.display()))?;
    let content = processor.process_bytes(&raw, None);

    let relative = source.strip_prefix(content_dir).unwrap_or(source);
    let route = page_route(relative, content.field("slug"));
    let url = url_for(config.base.base_url(), "", &route);
    let seo = generate_seo_data(&content, "", &url, config);

    let html = render_page(
        &Page {
            title: &seo.title,
            description: &seo.description,
            keywords: &seo.keywords,
            canonical_url: &url,
            structured_data: Some(&seo.structured_data),
            body: &content.html,
        },
        ctx,
    );

    Ok(OutputPage {
        source: source.display().to_string(),
        path: Path::new(&route).join("index.html"),
        url,
        html,
    })
}

/// URL route of a content file: slugified directories, then the slug
/// (front-matter `slug` or the file stem). `index.md` maps to its directory.
fn page_route(relative: &Path, slug: Option<&str>) -> String {
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .map(|part| slugify(&part.as_os_str().to_string_lossy()))
        .filter(|part| !part.is_empty())
        .collect();

    let stem = relative
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let leaf = match slug {
        Some(slug) => slugify(slug),
        None if stem == "index" => String::new(),
        None => slugify(&stem),
    };
    if !leaf.is_empty() {
        segments.push(leaf);
    }
    segments.join("/")
}

// ============================================================================
// Template pages
// ============================================================================

fn render_template_pages(
    factory: &ContentFactory<'_>,
    config: &SiteConfig,
    ctx: &PageContext<'_>,
) -> Result<Vec<OutputPage>> {
    let prefix = &config.build.blog_prefix;
    let templates: Vec<_> = factory.registry().iter().collect();

    let pages = templates
        .par_iter()
        .map(|template| -> Result<OutputPage> {
            let generated = factory.generate_content(&template.id, &config.variables)?;
            let url = generated.seo.canonical_url.clone().unwrap_or_default();
            let html = render_page(
                &Page {
                    title: &generated.seo.title,
                    description: &generated.seo.description,
                    keywords: &generated.seo.keywords,
                    canonical_url: &url,
                    structured_data: Some(&generated.structured_data),
                    body: &generated.html,
                },
                ctx,
            );
            Ok(OutputPage {
                source: format!("template `{}`", template.id),
                path: Path::new(prefix).join(&generated.slug).join("index.html"),
                url,
                html,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log!("content"; "{} articles from templates", pages.len());
    Ok(pages)
}

fn render_index_page(
    summaries: &[BlogSummary],
    config: &SiteConfig,
    ctx: &PageContext<'_>,
) -> OutputPage {
    let prefix = &config.build.blog_prefix;
    let url = url_for(config.base.base_url(), prefix, "");
    let body = render_blog_index(summaries, config);
    let html = render_page(
        &Page {
            title: "Blog",
            description: &config.base.description,
            keywords: &[],
            canonical_url: &url,
            structured_data: None,
            body: &body,
        },
        ctx,
    );

    OutputPage {
        source: "blog index".into(),
        path: Path::new(prefix).join("index.html"),
        url,
        html,
    }
}

// ============================================================================
// Output
// ============================================================================

/// Reject two pages targeting the same output file.
fn check_unique(pages: &[OutputPage]) -> Result<()> {
    let mut seen: FxHashMap<&Path, &str> = FxHashMap::default();
    for page in pages {
        if let Some(first) = seen.insert(page.path.as_path(), page.source.as_str()) {
            bail!(ConfigError::Validation(format!(
                "duplicate output path `{}` produced by {} and {}",
                page.path.display(),
                first,
                page.source
            )));
        }
    }
    Ok(())
}

fn write_pages(pages: &[OutputPage], config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    let progress = ProgressBars::new_filtered(&[("pages", pages.len())]);

    let result = pages.par_iter().try_for_each(|page| -> Result<()> {
        let path = output.join(&page.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let html = minify(MinifyType::Html(page.html.as_bytes()), config);
        fs::write(&path, &*html).with_context(|| format!("Failed to write {}", path.display()))?;
        if let Some(progress) = &progress {
            progress.inc_by_name("pages");
        }
        Ok(())
    });

    if let Some(progress) = &progress {
        progress.finish();
    }
    result
}
