//! Sitemap generation.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/okr-guide/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    log,
    utils::{
        html::escape_xml,
        minify::{MinifyType, minify},
    },
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Write `sitemap.xml` for `urls` if enabled in config.
pub fn build_sitemap(config: &SiteConfig, urls: &[String], built_at: DateTime<Utc>) -> Result<()> {
    if config.build.sitemap.enable {
        Sitemap::new(urls, built_at).write(config)?;
    }
    Ok(())
}

struct Sitemap<'a> {
    urls: &'a [String],
    /// YYYY-MM-DD
    lastmod: String,
}

impl<'a> Sitemap<'a> {
    fn new(urls: &'a [String], built_at: DateTime<Utc>) -> Self {
        Self {
            urls,
            lastmod: built_at.format("%Y-%m-%d").to_string(),
        }
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 + self.urls.len() * 96);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for url in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(url)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", self.lastmod));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write(&self, config: &SiteConfig) -> Result<()> {
        let path = config.build.output.join(&config.build.sitemap.path);
        let xml = self.to_xml();
        let xml = minify(MinifyType::Xml(xml.as_bytes()), config);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        let name = path.file_name().unwrap_or_default().to_string_lossy();
        log!("sitemap"; "{name} ({} urls)", self.urls.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn built_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = Sitemap::new(&[], built_at()).to_xml();

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_sitemap_pages() {
        let urls = vec![
            "https://example.com/".to_owned(),
            "https://example.com/blog/okr-guide/".to_owned(),
        ];
        let xml = Sitemap::new(&urls, built_at()).to_xml();

        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/okr-guide/</loc>"));
        assert_eq!(xml.matches("<lastmod>2025-01-01</lastmod>").count(), 2);
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_sitemap_escapes_special_chars() {
        let urls = vec!["https://example.com/search?q=a&b=c".to_owned()];
        let xml = Sitemap::new(&urls, built_at()).to_xml();
        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b=c</loc>"));
    }

    #[test]
    fn test_build_sitemap_writes_into_output() {
        let dir = tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.build.output = dir.path().to_owned();
        config.build.minify = false;

        build_sitemap(&config, &["https://example.com/".to_owned()], built_at()).unwrap();
        let xml = fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
        assert!(xml.starts_with("<?xml"));

        config.build.sitemap.enable = false;
        fs::remove_file(dir.path().join("sitemap.xml")).unwrap();
        build_sitemap(&config, &[], built_at()).unwrap();
        assert!(!dir.path().join("sitemap.xml").exists());
    }
}
