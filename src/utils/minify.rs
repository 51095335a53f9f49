//! Minification for generated pages, feeds and style sheets.
//!
//! `minify` is a no-op (borrowed) unless `[build] minify = true`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Content type for minification.
pub enum MinifyType<'a> {
    Html(&'a [u8]),
    Xml(&'a [u8]),
    Css(&'a [u8]),
}

/// Minify content based on type and config.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify<'a>(content: MinifyType<'a>, config: &SiteConfig) -> Cow<'a, [u8]> {
    match content {
        MinifyType::Html(bytes) | MinifyType::Xml(bytes) | MinifyType::Css(bytes)
            if !config.build.minify =>
        {
            Cow::Borrowed(bytes)
        }
        MinifyType::Html(html) => Cow::Owned(minify_html_inner(html)),
        MinifyType::Xml(xml) => Cow::Owned(join_trimmed_lines(xml)),
        MinifyType::Css(css) => Cow::Owned(minify_css_inner(css)),
    }
}

/// Minify HTML using the `minify_html` crate.
///
/// JSON-LD and the token style sheet are left to the dedicated passes.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = false;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = false;
    minify_html::minify(html, &cfg)
}

/// Trim every line and drop blank ones.
fn join_trimmed_lines(text: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("")
        .into_bytes()
}

/// Drop `/* */` comments, then trim lines.
fn minify_css_inner(css: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(css);
    let mut stripped = String::with_capacity(text.len());
    let mut rest = text.as_ref();
    while let Some(start) = rest.find("/*") {
        stripped.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
            }
        }
    }
    stripped.push_str(rest);
    join_trimmed_lines(stripped.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_minify(enabled: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.minify = enabled;
        config
    }

    #[test]
    fn test_minify_html_removes_whitespace() {
        let html = b"<html>\n  <head>\n  </head>\n  <body>\n    <p>Hello</p>\n  </body>\n</html>";
        let result = minify(MinifyType::Html(html), &config_with_minify(true));
        let result = String::from_utf8_lossy(&result);

        assert!(!result.contains("\n  "));
        assert!(result.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_minify_disabled_borrows() {
        let html = b"<html>\n  <body>\n  </body>\n</html>";
        let result = minify(MinifyType::Html(html), &config_with_minify(false));
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, html);

        let css = b"a {\n  b: c;\n}\n";
        assert_eq!(&*minify(MinifyType::Css(css), &config_with_minify(false)), css);
    }

    #[test]
    fn test_minify_html_keeps_json_ld() {
        let html = br#"<html><head><script type="application/ld+json">{"headline":"A  B"}</script></head><body></body></html>"#;
        let result = minify(MinifyType::Html(html), &config_with_minify(true));
        let result = String::from_utf8_lossy(&result);
        assert!(result.contains(r#""headline":"A  B""#));
    }

    #[test]
    fn test_minify_xml_sitemap_like() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
  </url>
</urlset>"#;
        let result = minify(MinifyType::Xml(xml), &config_with_minify(true));
        let result = String::from_utf8_lossy(&result);

        assert!(!result.contains('\n'));
        assert!(result.contains("<loc>https://example.com/</loc>"));
    }

    #[test]
    fn test_minify_xml_removes_empty_lines() {
        let xml = b"<root>\n\n  <item/>\n\n</root>";
        let result = minify(MinifyType::Xml(xml), &config_with_minify(true));
        assert_eq!(&*result, b"<root><item/></root>");
    }

    #[test]
    fn test_minify_css_strips_comments() {
        let css = b"/* tokens */\n:root {\n  --a: 1;\n  /* inline */ --b: 2;\n}\n";
        let result = minify(MinifyType::Css(css), &config_with_minify(true));
        assert_eq!(&*result, b":root {--a: 1;--b: 2;}");
    }

    #[test]
    fn test_minify_css_unterminated_comment() {
        let css = b"a { b: c; }\n/* never closed";
        let result = minify(MinifyType::Css(css), &config_with_minify(true));
        assert_eq!(&*result, b"a { b: c; }");
    }
}
