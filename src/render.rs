//! Markdown rendering for the result tabs
//!
//! The model writes markdown. The page shows it as HTML while downloads keep
//! the raw text. Raw HTML in the model output is escaped, never passed
//! through.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

fn is_script_url(dest: &CowStr) -> bool {
    let dest = dest.trim_start().to_ascii_lowercase();
    dest.starts_with("javascript:") || dest.starts_with("vbscript:") || dest.starts_with("data:")
}

/// Render markdown to an HTML fragment safe to place in the page
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::Start(Tag::Link(kind, dest, title)) if is_script_url(&dest) => {
            Event::Start(Tag::Link(kind, CowStr::Borrowed("#"), title))
        }
        Event::Start(Tag::Image(kind, dest, title)) if is_script_url(&dest) => {
            Event::Start(Tag::Image(kind, CowStr::Borrowed("#"), title))
        }
        other => other,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_common_markdown() {
        let html = markdown_to_html(
            "# AI in medicine\n\nAdoption is **rising**.\n\n- triage\n- imaging\n\n[Source](https://study.example)",
        );
        assert!(html.contains("<h1>AI in medicine</h1>"));
        assert!(html.contains("<strong>rising</strong>"));
        assert!(html.contains("<li>triage</li>"));
        assert!(html.contains(r#"<a href="https://study.example">Source</a>"#));
    }

    #[test]
    fn test_tables_are_enabled() {
        let html = markdown_to_html("| Area | Use |\n|---|---|\n| Radiology | Triage |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>Radiology</td>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = markdown_to_html("Intro\n\n<script>alert(1)</script>\n\nInline <b onclick=\"x()\">bold</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b onclick"));
    }

    #[test]
    fn test_script_links_are_neutralized() {
        let html = markdown_to_html("[click](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r##"<a href="#">click</a>"##));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(markdown_to_html(""), "");
    }
}
