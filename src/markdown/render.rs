//! Markdown → sanitized HTML, plus the plain text the SEO pass reads.
//!
//! The pulldown-cmark event stream is rewritten on the way to `push_html`:
//!
//! - raw HTML (blocks and inline) becomes escaped text
//! - `javascript:` / `vbscript:` / `data:` link targets become `#`
//! - headings get unique slug `id`s
//!
//! While walking, the plain text of the document is collected, along with
//! the first H1 and the first paragraph long enough to serve as a meta
//! description.

use super::excerpt::collapse_whitespace;
use crate::utils::slug::slugify;
use pulldown_cmark::{
    CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html::push_html,
};
use rustc_hash::FxHashMap;

/// Shortest paragraph (in chars) accepted as a description candidate.
pub const LEAD_MIN_CHARS: usize = 50;

/// Output of one render pass.
#[derive(Debug, Default)]
pub struct Rendered {
    pub html: String,
    /// All visible text, headings included.
    pub text: String,
    /// Visible text outside headings.
    pub prose: String,
    /// Text of the first H1.
    pub headline: Option<String>,
    /// First paragraph of at least `LEAD_MIN_CHARS` chars.
    pub lead: Option<String>,
}

struct PendingHeading<'a> {
    level: HeadingLevel,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    text: String,
    inner: Vec<Event<'a>>,
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render a markdown body.
pub fn render(body: &str) -> Rendered {
    let mut out = Rendered::default();
    let mut events: Vec<Event<'_>> = Vec::new();
    let mut heading: Option<PendingHeading<'_>> = None;
    let mut paragraph: Option<String> = None;
    let mut ids: FxHashMap<String, usize> = FxHashMap::default();

    for event in Parser::new_ext(body, options()) {
        collect_text(&event, &mut out, heading.as_mut(), paragraph.as_mut());

        match sanitize(event) {
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                heading = Some(PendingHeading {
                    level,
                    classes,
                    attrs,
                    text: String::new(),
                    inner: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(level)) => {
                let Some(pending) = heading.take() else {
                    continue;
                };
                let text = collapse_whitespace(&pending.text);
                if level == HeadingLevel::H1 && out.headline.is_none() && !text.is_empty() {
                    out.headline = Some(text.clone());
                }
                events.push(Event::Start(Tag::Heading {
                    level: pending.level,
                    id: unique_id(&mut ids, &text).map(CowStr::from),
                    classes: pending.classes,
                    attrs: pending.attrs,
                }));
                events.extend(pending.inner);
                events.push(Event::End(TagEnd::Heading(level)));
            }
            event @ Event::Start(Tag::Paragraph) => {
                paragraph = Some(String::new());
                events.push(event);
            }
            event @ Event::End(TagEnd::Paragraph) => {
                if let Some(text) = paragraph.take() {
                    let text = collapse_whitespace(&text);
                    if out.lead.is_none() && text.chars().count() >= LEAD_MIN_CHARS {
                        out.lead = Some(text);
                    }
                }
                events.push(event);
            }
            event => match heading.as_mut() {
                Some(pending) => pending.inner.push(event),
                None => events.push(event),
            },
        }
    }

    out.html = String::with_capacity(body.len() * 3 / 2);
    push_html(&mut out.html, events.into_iter());
    out.text = collapse_whitespace(&out.text);
    out.prose = collapse_whitespace(&out.prose);
    out
}

fn collect_text(
    event: &Event<'_>,
    out: &mut Rendered,
    heading: Option<&mut PendingHeading<'_>>,
    paragraph: Option<&mut String>,
) {
    let stripped;
    let piece: &str = match event {
        Event::Text(text) | Event::Code(text) => text,
        // Raw HTML is shown as text, so its words count too
        Event::Html(raw) | Event::InlineHtml(raw) => {
            stripped = strip_tags(raw);
            &stripped
        }
        Event::SoftBreak | Event::HardBreak => " ",
        Event::End(end) if is_block_end(end) => " ",
        _ => return,
    };

    out.text.push_str(piece);
    match heading {
        Some(pending) => pending.text.push_str(piece),
        None => out.prose.push_str(piece),
    }
    if let Some(paragraph) = paragraph {
        paragraph.push_str(piece);
    }
}

fn is_block_end(end: &TagEnd) -> bool {
    matches!(
        end,
        TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock
            | TagEnd::Item
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell
            | TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
    )
}

/// Text of an HTML fragment with `<...>` tags removed.
fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Neutralize raw HTML and script-bearing URLs.
fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::HtmlBlock) => Event::Start(Tag::Paragraph),
        Event::End(TagEnd::HtmlBlock) => Event::End(TagEnd::Paragraph),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        event => event,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url.trim_start().to_ascii_lowercase();
    if ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|bad| scheme.starts_with(bad))
    {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Slug id for a heading, suffixed `-1`, `-2`, ... on repeats.
fn unique_id(ids: &mut FxHashMap<String, usize>, text: &str) -> Option<String> {
    let slug = slugify(text);
    if slug.is_empty() {
        return None;
    }
    let seen = ids.entry(slug.clone()).or_insert(0);
    let id = match *seen {
        0 => slug,
        n => format!("{slug}-{n}"),
    };
    *seen += 1;
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let out = render("# Hello World\n\nSome *emphasis* here.");
        assert!(out.html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(out.html.contains("<em>emphasis</em>"));
        assert_eq!(out.headline.as_deref(), Some("Hello World"));
        assert_eq!(out.text, "Hello World Some emphasis here.");
        assert_eq!(out.prose, "Some emphasis here.");
    }

    #[test]
    fn test_only_first_h1_is_headline() {
        let out = render("## Intro\n\n# First\n\n# Second\n");
        assert_eq!(out.headline.as_deref(), Some("First"));
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let out = render("## FAQ\n\n## FAQ\n\n## FAQ\n");
        assert!(out.html.contains(r#"id="faq""#));
        assert!(out.html.contains(r#"id="faq-1""#));
        assert!(out.html.contains(r#"id="faq-2""#));
    }

    #[test]
    fn test_raw_html_escaped() {
        let out = render("<script>alert(1)</script>\n\nHi <b>there</b>");
        assert!(!out.html.contains("<script"));
        assert!(!out.html.contains("<b>"));
        assert!(out.html.contains("&lt;script&gt;"));
        assert!(!out.text.contains("script"));
    }

    #[test]
    fn test_html_only_body_counts_words() {
        let out = render("<div>\nPlan your roadmap with the team\n</div>\n");
        assert!(out.html.contains("&lt;div&gt;"));
        assert_eq!(out.text, "Plan your roadmap with the team");
        assert_eq!(out.prose, "Plan your roadmap with the team");
    }

    #[test]
    fn test_unsafe_links_neutralized() {
        let out = render("[x](javascript:alert(1)) [y](https://ok.example)");
        assert!(!out.html.contains("javascript:"));
        assert!(out.html.contains(r##"href="#""##));
        assert!(out.html.contains(r#"href="https://ok.example""#));
    }

    #[test]
    fn test_gfm_extensions() {
        let out = render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~\n\n- [x] done\n");
        assert!(out.html.contains("<table>"));
        assert!(out.html.contains("<del>old</del>"));
        assert!(out.html.contains("checkbox"));
    }

    #[test]
    fn test_lead_requires_min_length() {
        let long = "This paragraph is comfortably longer than fifty characters overall.";
        let out = render(&format!("Too short.\n\n{long}\n\nAnother long paragraph that should never be selected here."));
        assert_eq!(out.lead.as_deref(), Some(long));
    }

    #[test]
    fn test_empty_body() {
        let out = render("");
        assert!(out.html.is_empty());
        assert!(out.text.is_empty());
        assert!(out.headline.is_none());
    }
}
