use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag};

use crate::views::tabs::ResultKind;

/// Converts a result into display markup according to its kind.
///
/// Markdown is rendered to HTML. Raw HTML (portfolio pages) is escaped and
/// shown pre-formatted so it is displayed, never executed.
pub fn render_result(kind: ResultKind, text: &str) -> String {
    match kind {
        ResultKind::Markdown => markdown_to_html(text),
        ResultKind::Html => preformatted(text),
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// `<pre><code>` block around the text; the renderer escapes code text.
fn preformatted(text: &str) -> String {
    let events = [
        Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)),
        Event::Text(text.into()),
        Event::End(Tag::CodeBlock(CodeBlockKind::Indented)),
    ];
    let mut out = String::with_capacity(text.len() + text.len() / 4 + 32);
    html::push_html(&mut out, events.into_iter());
    out
}
