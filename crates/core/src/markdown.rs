//! Markdown to HTML rendering for server-rendered wiki pages.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// URL schemes that run script when followed.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Destination written in place of an unsafe link or image URL.
const SAFE_PLACEHOLDER_URL: &str = "#";

/// Render page content to HTML.
///
/// Tables and strikethrough are enabled. Raw HTML embedded in the Markdown is
/// emitted as escaped text, and links or images pointing at a script scheme
/// lose their destination.
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_unsafe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed(SAFE_PLACEHOLDER_URL),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if is_unsafe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed(SAFE_PLACEHOLDER_URL),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// True for destinations using a script-capable scheme. Browsers ignore
/// case, whitespace and control characters in the scheme, so this does too.
fn is_unsafe_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    UNSAFE_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}

/// Escape text for an HTML body or double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}
