//! Output documents: the HTML listing, the plain-text table, and the
//! one-line range summary for both formats.

use crate::formatting::{FormatContext, format_added, format_range_end};
use crate::record::Bookmark;
use crate::shared::table::{render_table, truncate_with_ellipsis};

const EMPTY_RANGE: &str = "no bookmarks";

/// Escape text for an HTML text node or attribute value.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn html_head(title: &str) -> String {
    format!(
        "<!DOCTYPE html><html>\n<head><meta charset=\"utf-8\"><title>{}</title></head><body>\n",
        escape_html(title)
    )
}

const HTML_TAIL: &str = "</body></html>";

/// Ordered list of anchors. The `href` is written as stored in the dump.
pub fn html_listing(bookmarks: &[Bookmark], title: &str) -> String {
    let mut out = html_head(title);
    out.push_str("<ol>\n");
    for b in bookmarks {
        out.push_str(&format!(
            "<li>{} <a href=\"{}\">{}</a></li>\n",
            format_added(b.added),
            b.url,
            escape_html(&b.title)
        ));
    }
    out.push_str("</ol>\n");
    out.push_str(HTML_TAIL);
    out
}

pub fn html_range(span: Option<(i64, i64)>, title: &str) -> String {
    let mut out = html_head(title);
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&range_line(span))));
    out.push_str(HTML_TAIL);
    out
}

pub fn text_range(span: Option<(i64, i64)>) -> String {
    format!("{}\n", range_line(span))
}

fn range_line(span: Option<(i64, i64)>) -> String {
    match span {
        Some((first, last)) => {
            format!("{} - {}", format_range_end(first), format_range_end(last))
        }
        None => EMPTY_RANGE.to_string(),
    }
}

/// Plain-text table. With a known terminal `width` long titles are cut so
/// rows stay on one line.
pub fn text_listing(
    bookmarks: &[Bookmark],
    ctx: &FormatContext,
    width: Option<usize>,
) -> String {
    if bookmarks.is_empty() {
        return "No bookmarks matched.\n".to_string();
    }

    let title_width = width.map(|w| (w / 2).max(20));
    let headers = vec![
        ctx.format_header("Added"),
        ctx.format_header("Title"),
        ctx.format_header("URL"),
    ];
    let rows: Vec<Vec<String>> = bookmarks
        .iter()
        .map(|b| {
            let title = match title_width {
                Some(w) => truncate_with_ellipsis(&b.title, w),
                None => b.title.clone(),
            };
            vec![
                ctx.format_timestamp(&format_added(b.added)),
                title,
                ctx.format_url(&b.url),
            ]
        })
        .collect();
    render_table(&headers, &rows)
}
