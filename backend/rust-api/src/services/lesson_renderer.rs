use pulldown_cmark::{html, Event, Options, Parser};

/// Markdown lesson to an HTML fragment for the browser shell.
/// Raw HTML in the source is escaped and shown as text, never emitted as markup.
/// LaTeX is passed through untouched; the page renders it client-side.
pub fn render_lesson_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
