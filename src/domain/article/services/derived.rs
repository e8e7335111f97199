//! Fields computed from a post's markdown source.
//!
//! Every function here is pure: the same source always yields the same output, which
//! is what lets the pipeline re-derive these fields on each content change and compare
//! them against what is stored.

use crate::domain::article::value_objects::ContentSource;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

pub const WORDS_PER_MINUTE: usize = 200;
pub const EXCERPT_MAX_CHARS: usize = 160;

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Derived values stored next to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedFields {
    pub content_rendered: String,
    pub excerpt: String,
    pub read_time_minutes: u32,
}

impl DerivedFields {
    /// An explicit excerpt, even an empty one, replaces the derived excerpt.
    pub fn compute(source: &ContentSource, explicit_excerpt: Option<String>) -> Self {
        let source = source.as_str();
        Self {
            content_rendered: render_content(source),
            excerpt: explicit_excerpt
                .unwrap_or_else(|| extract_excerpt(source, EXCERPT_MAX_CHARS)),
            read_time_minutes: estimate_read_time(source),
        }
    }
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

/// Renders markdown to HTML that is safe to inject without further escaping.
///
/// Raw HTML in the source is emitted as escaped text, so the only tags in the output are
/// the ones the markdown renderer produces itself. Link and image destinations outside
/// `http`, `https`, `mailto` and relative paths are replaced by `#`.
pub fn render_content(source: &str) -> String {
    let parser = Parser::new_ext(source, markdown_options()).map(sanitize_event);
    let mut output = String::with_capacity(source.len() * 2);
    html::push_html(&mut output, parser);
    output
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_destination(dest_url),
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
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_destination(destination: CowStr<'_>) -> CowStr<'_> {
    if is_safe_destination(&destination) {
        destination
    } else {
        CowStr::Borrowed("#")
    }
}

fn is_safe_destination(destination: &str) -> bool {
    let trimmed = destination.trim();
    let Some(colon) = trimmed.find(':') else {
        return true;
    };
    let scheme = &trimmed[..colon];
    // a colon after a path, query or fragment delimiter is not a scheme separator
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    SAFE_SCHEMES
        .iter()
        .any(|safe| scheme.eq_ignore_ascii_case(safe))
}

/// Minutes needed to read the source at [`WORDS_PER_MINUTE`], rounded up, never below 1.
pub fn estimate_read_time(source: &str) -> u32 {
    let words = plain_text(source, TextMode::Everything)
        .split_whitespace()
        .count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Plain-text summary: no code, no images, link text kept, whitespace collapsed,
/// cut to `max_chars` characters.
pub fn extract_excerpt(source: &str, max_chars: usize) -> String {
    let text = plain_text(source, TextMode::Prose);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(max_chars).collect();
    truncated.trim_end().to_string()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TextMode {
    Everything,
    Prose,
}

fn plain_text(source: &str, mode: TextMode) -> String {
    let mut text = String::with_capacity(source.len());
    let mut image_depth = 0usize;
    let mut in_code_block = false;

    for event in Parser::new_ext(source, markdown_options()) {
        match event {
            Event::Start(Tag::Image { .. }) => image_depth += 1,
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                text.push(' ');
            }
            Event::Text(chunk) => {
                let skip = image_depth > 0 || (in_code_block && mode == TextMode::Prose);
                if !skip {
                    text.push_str(&chunk);
                }
            }
            Event::Code(code) => {
                if image_depth == 0 && mode == TextMode::Everything {
                    text.push_str(&code);
                }
            }
            Event::SoftBreak | Event::HardBreak | Event::Rule => text.push(' '),
            Event::End(end) if is_block_end(&end) => text.push(' '),
            _ => {}
        }
    }

    text
}

fn is_block_end(end: &TagEnd) -> bool {
    !matches!(
        end,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}
