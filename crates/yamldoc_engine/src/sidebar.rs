use std::fmt::Write;

use html_escape::{encode_quoted_attribute as escape_attr, encode_safe as escape_text};
use yamldoc_core::Config;

use crate::slug::assign_slugs;
use crate::types::Page;

/// Navigation fragment linking every emitted page, for the host's sidebar.
///
/// Links point at `/<out_dir>/<slug>.html` using the same slug assignment
/// as the emitter. Returns an empty string when there is nothing to list.
pub fn render_sidebar(pages: &[Page], config: &Config) -> String {
    if pages.is_empty() {
        return String::new();
    }
    let prefix = match config.out_dir.trim_matches('/') {
        "" => String::from("/"),
        dir => format!("/{dir}/"),
    };
    let slugs = assign_slugs(pages, config.index);

    let mut html = String::from("<div class=\"ydoc-sidebar\">\n<h2>YAML Docs</h2>\n<ul>\n");
    for (page, slug) in pages.iter().zip(&slugs) {
        let label = page.title.as_deref().unwrap_or(slug);
        let _ = writeln!(
            html,
            "  <li><a href=\"{}{}.html\">{}</a></li>",
            escape_attr(&prefix),
            escape_attr(slug),
            escape_text(label)
        );
    }
    html.push_str("</ul>\n</div>");
    html
}
