use std::fmt::Write;

use html_escape::{encode_quoted_attribute as escape_attr, encode_safe as escape_text};

use crate::types::Page;

const UNTITLED: &str = "Untitled";

const PAGE_STYLE: &str = "\
    .ydoc-page { font-family: -apple-system, BlinkMacSystemFont, Segoe UI, Roboto, Helvetica, Arial, sans-serif; }
    .ydoc-title { margin: 0.2em 0 0.4em; font-size: 1.6em; }
    .ydoc-desc { color: #444; margin-bottom: 1em; }
    .ydoc-body { line-height: 1.5; }";

const INDEX_STYLE: &str = "\
    .ydoc-index { font-family: -apple-system, BlinkMacSystemFont, Segoe UI, Roboto, Helvetica, Arial, sans-serif; }
    .ydoc-index h1 { font-size: 1.8em; }
    .ydoc-index ul { list-style: disc; padding-left: 1.4em; }";

/// Standalone document for one page. The fragment is inserted verbatim.
pub fn render_page_html(page: &Page) -> String {
    let title = escape_text(page.title.as_deref().unwrap_or(UNTITLED));
    let description = page
        .description
        .as_deref()
        .map(|desc| format!("<p class=\"ydoc-desc\">{}</p>\n", escape_text(desc)))
        .unwrap_or_default();

    format!(
        "<!doctype html>
<html lang=\"en\">
<head>
  <meta charset=\"utf-8\" />
  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />
  <title>{title}</title>
  <style>
{PAGE_STYLE}
  </style>
</head>
<body class=\"ydoc-page\">
<h1 class=\"ydoc-title\">{title}</h1>
{description}<div class=\"ydoc-body\">{body}</div>
</body>
</html>
",
        body = page.html,
    )
}

/// Index document linking every page, in the order given. `slugs` pairs
/// with `pages` by position.
pub fn render_index_html(pages: &[Page], slugs: &[String]) -> String {
    let mut rows = String::new();
    for (page, slug) in pages.iter().zip(slugs) {
        let label = page.title.as_deref().unwrap_or(slug);
        let _ = write!(
            rows,
            "  <li><a href=\"{}.html\">{}</a>",
            escape_attr(slug),
            escape_text(label)
        );
        if let Some(desc) = page.description.as_deref() {
            let _ = write!(rows, " \u{2014} {}", escape_text(desc));
        }
        rows.push_str("</li>\n");
    }

    format!(
        "<!doctype html>
<html lang=\"en\">
<head>
  <meta charset=\"utf-8\" />
  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />
  <title>YAML Index</title>
  <style>
{INDEX_STYLE}
  </style>
</head>
<body class=\"ydoc-index\">
<h1>YAML Documents</h1>
<ul>
{rows}</ul>
</body>
</html>
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Conversion;

    fn page(title: Option<&str>, description: Option<&str>, html: &str) -> Page {
        Page::from_conversion(
            "/docs/a.yml",
            Conversion {
                html: html.to_string(),
                title: title.map(str::to_string),
                description: description.map(str::to_string),
                ..Conversion::empty()
            },
        )
    }

    #[test]
    fn page_escapes_title_but_not_fragment() {
        let html = render_page_html(&page(Some("A < B & \"C\""), None, "<p>raw</p>"));
        assert!(html.contains("<title>A &lt; B &amp; "));
        assert!(!html.contains("\"C\"</title>"));
        assert!(html.contains("<div class=\"ydoc-body\"><p>raw</p></div>"));
        assert!(!html.contains("ydoc-desc\">"));
    }

    #[test]
    fn single_quotes_are_escaped_in_text() {
        let html = render_page_html(&page(Some("O'Brien's notes"), Some("it's"), ""));
        assert!(!html.contains("O'Brien"));
        assert!(!html.contains("it's"));
        assert!(html.contains("<h1 class=\"ydoc-title\">O&#"));

        let index = render_index_html(
            &[page(Some("O'Brien"), None, "")],
            &["o-brien".to_string()],
        );
        assert!(index.contains("<a href=\"o-brien.html\">O&#"));
        assert!(!index.contains("O'Brien"));
    }

    #[test]
    fn description_paragraph_only_when_present() {
        let html = render_page_html(&page(Some("T"), Some("About <this>"), ""));
        assert!(html.contains("<p class=\"ydoc-desc\">About &lt;this&gt;</p>"));
    }

    #[test]
    fn missing_title_renders_untitled() {
        let html = render_page_html(&page(None, None, ""));
        assert!(html.contains("<h1 class=\"ydoc-title\">Untitled</h1>"));
    }

    #[test]
    fn index_lists_pages_in_given_order() {
        let pages = vec![page(Some("Zeta"), Some("last"), ""), page(None, None, "")];
        let slugs = vec!["zeta".to_string(), "a".to_string()];
        let html = render_index_html(&pages, &slugs);
        let zeta = html.find("zeta.html").unwrap();
        let a = html.find("\"a.html\"").unwrap();
        assert!(zeta < a);
        assert!(html.contains("<a href=\"zeta.html\">Zeta</a> \u{2014} last</li>"));
        assert!(html.contains("<a href=\"a.html\">a</a></li>"));
    }
}
