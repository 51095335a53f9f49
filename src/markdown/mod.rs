//! Markdown processing: front-matter, HTML, excerpt, reading time, SEO.
//!
//! ```text
//! raw ──split──► front-matter ──parse──► data bag
//!         └────► body ──render──► html + plain text ──► excerpt, reading time
//!                                                     └─► generate_seo_data
//! ```
//!
//! Processing never fails: malformed input degrades with a logged warning.

mod excerpt;
mod frontmatter;
mod render;
mod seo;

pub use excerpt::{clamp, count_words, reading_time};
pub use render::render;
pub use seo::{
    Article, DESCRIPTION_MAX, SeoData, TITLE_MAX, collect_keywords, generate_seo_data,
};

use crate::{config::SeoConfig, log};
use serde::Serialize;
use serde_json::{Map, Value};

/// Rendered in place of an empty body.
const FALLBACK_HTML: &str = "<p>Content coming soon.</p>\n";

/// Result of processing one markdown document.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedContent {
    pub html: String,
    /// Front-matter values.
    pub data: Map<String, Value>,
    pub excerpt: String,
    /// Minutes.
    pub reading_time: usize,

    #[serde(skip)]
    text: String,
    #[serde(skip)]
    headline: Option<String>,
    #[serde(skip)]
    lead: Option<String>,
}

impl ProcessedContent {
    fn fallback(data: Map<String, Value>) -> Self {
        Self {
            html: FALLBACK_HTML.to_owned(),
            data,
            excerpt: String::new(),
            reading_time: 0,
            text: String::new(),
            headline: None,
            lead: None,
        }
    }

    /// A non-empty string front-matter field.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Markdown processor bound to excerpt and reading-speed settings.
#[derive(Debug, Clone, Copy)]
pub struct Processor {
    excerpt_length: usize,
    words_per_minute: usize,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(&SeoConfig::default())
    }
}

impl Processor {
    pub fn new(config: &SeoConfig) -> Self {
        Self {
            excerpt_length: config.excerpt_length,
            words_per_minute: config.words_per_minute,
        }
    }

    /// Process a markdown document with optional front-matter.
    ///
    /// `primary_keyword` is recorded as `keyword` unless front-matter sets one.
    pub fn process(&self, raw: &str, primary_keyword: Option<&str>) -> ProcessedContent {
        let (yaml, body) = frontmatter::split(raw);
        let mut data = yaml.map(frontmatter::parse).unwrap_or_default();

        if let Some(keyword) = primary_keyword.map(str::trim).filter(|k| !k.is_empty())
            && !data.contains_key("keyword")
        {
            data.insert("keyword".into(), Value::String(keyword.to_owned()));
        }

        let rendered = render::render(body);
        if rendered.html.trim().is_empty() {
            let mut content = ProcessedContent::fallback(data);
            content.excerpt = content
                .field("excerpt")
                .map(|excerpt| clamp(excerpt, self.excerpt_length))
                .unwrap_or_default();
            return content;
        }

        let words = excerpt::count_words(&rendered.text);
        let excerpt = match data.get("excerpt").and_then(Value::as_str) {
            Some(excerpt) if !excerpt.trim().is_empty() => clamp(excerpt, self.excerpt_length),
            _ => clamp(&rendered.prose, self.excerpt_length),
        };

        ProcessedContent {
            html: rendered.html,
            data,
            excerpt,
            reading_time: excerpt::reading_time(words, self.words_per_minute),
            text: rendered.text,
            headline: rendered.headline,
            lead: rendered.lead,
        }
    }

    /// Process raw bytes; non-UTF-8 input yields the fallback content.
    pub fn process_bytes(&self, raw: &[u8], primary_keyword: Option<&str>) -> ProcessedContent {
        match std::str::from_utf8(raw) {
            Ok(text) => self.process(text, primary_keyword),
            Err(err) => {
                log!("warn"; "markdown is not valid UTF-8 ({err}), using placeholder");
                let mut data = Map::new();
                if let Some(keyword) = primary_keyword.filter(|k| !k.trim().is_empty()) {
                    data.insert("keyword".into(), Value::String(keyword.trim().to_owned()));
                }
                ProcessedContent::fallback(data)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(raw: &str) -> ProcessedContent {
        Processor::default().process(raw, None)
    }

    #[test]
    fn test_process_full_document() {
        let raw = "---\ntitle: OKRs 101\nauthor: Dana\n---\n# OKRs 101\n\nObjectives and key results keep teams aligned.\n";
        let content = process(raw);

        assert_eq!(content.data["title"], "OKRs 101");
        assert_eq!(content.data["author"], "Dana");
        assert!(content.html.contains(r#"<h1 id="okrs-101">OKRs 101</h1>"#));
        assert_eq!(content.excerpt, "Objectives and key results keep teams aligned.");
        assert_eq!(content.reading_time, 1);
    }

    #[test]
    fn test_excerpt_strips_markdown_syntax() {
        let content = process("Use **bold** and [links](https://x.example) and `code`.");
        assert_eq!(content.excerpt, "Use bold and links and code.");
    }

    #[test]
    fn test_excerpt_bound() {
        let body = "lorem ipsum dolor sit amet ".repeat(50);
        let content = process(&body);
        assert!(content.excerpt.chars().count() <= 160);
        assert!(content.excerpt.ends_with("..."));
    }

    #[test]
    fn test_excerpt_from_front_matter() {
        let content = process("---\nexcerpt: Hand written summary\n---\nBody text here.");
        assert_eq!(content.excerpt, "Hand written summary");
    }

    #[test]
    fn test_custom_excerpt_length() {
        let mut seo = SeoConfig::default();
        seo.excerpt_length = 20;
        let content = Processor::new(&seo).process(&"word ".repeat(30), None);
        assert!(content.excerpt.chars().count() <= 20);
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(process("one").reading_time, 1);
        assert_eq!(process(&"word ".repeat(200)).reading_time, 1);
        assert_eq!(process(&"word ".repeat(401)).reading_time, 3);
    }

    #[test]
    fn test_html_block_text_is_read() {
        let content = process("<div>\nPlan your roadmap with the team\n</div>\n");
        assert_eq!(content.reading_time, 1);
        assert_eq!(content.excerpt, "Plan your roadmap with the team");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        for raw in ["", "   \n\n", "---\ntitle: Only Meta\n---\n"] {
            let content = process(raw);
            assert_eq!(content.html, FALLBACK_HTML);
            assert_eq!(content.reading_time, 0);
            assert!(content.excerpt.is_empty());
        }
    }

    #[test]
    fn test_unterminated_front_matter_is_body() {
        let content = process("---\ntitle: Oops\nStill body text.");
        assert!(content.data.is_empty());
        assert!(content.html.contains("Still body text."));
    }

    #[test]
    fn test_invalid_front_matter_degrades() {
        let content = process("---\ntitle: [broken\n---\nBody survives.");
        assert!(content.data.is_empty());
        assert!(content.html.contains("Body survives."));
    }

    #[test]
    fn test_primary_keyword_recorded() {
        let processor = Processor::default();
        let content = processor.process("text", Some("roadmap"));
        assert_eq!(content.field("keyword"), Some("roadmap"));

        let content = processor.process("---\nkeyword: okr\n---\ntext", Some("roadmap"));
        assert_eq!(content.field("keyword"), Some("okr"));
    }

    #[test]
    fn test_process_bytes_invalid_utf8() {
        let content = Processor::default().process_bytes(&[0xff, 0xfe, b'#'], Some("okr"));
        assert_eq!(content.html, FALLBACK_HTML);
        assert_eq!(content.field("keyword"), Some("okr"));
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        let inputs = [
            "---",
            "---\n",
            "\u{feff}---\na: 1\n---\n",
            "# \n\n#\n",
            "[unclosed](",
            "| a |\n|---|\n",
            "> > > deep\n>\n",
            "* * *",
            "<div>\n\nhtml\n\n</div>",
        ];
        for raw in inputs {
            let content = process(raw);
            assert!(content.excerpt.chars().count() <= 160);
            assert!(!content.html.is_empty());
        }
    }
}
