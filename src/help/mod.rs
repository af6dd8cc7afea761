use crate::terminal_columns;

mod content;

#[derive(Clone, Copy)]
pub(crate) struct HelpFlag<'a> {
    pub name: &'a str,
    pub desc: &'a str,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub usage: &'a str,
    pub details: &'a [&'a str],
    pub flags: &'a [HelpFlag<'a>],
    pub environment: &'a [HelpFlag<'a>],
    pub examples: &'a [&'a str],
    pub footer: &'a [&'a str],
}

pub(crate) fn render() -> String {
    let width = terminal_columns().unwrap_or(96).clamp(64, 120);
    let lines = HelpPrinter::new(width).render(&content::book());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

struct HelpPrinter {
    width: usize,
}

impl HelpPrinter {
    fn new(width: usize) -> Self {
        Self { width }
    }

    fn render(&self, book: &HelpBook<'_>) -> Vec<String> {
        let mut out = Vec::new();
        out.push(book.title.to_string());
        out.push(format!("usage: {}", book.usage));
        out.push(String::new());

        for line in book.details {
            out.extend(self.wrap(line, self.width));
        }
        if !book.details.is_empty() {
            out.push(String::new());
        }

        out.extend(self.render_block("Options", book.flags));
        out.extend(self.render_block("Environment", book.environment));

        if !book.examples.is_empty() {
            out.push("Examples:".to_string());
            for ex in book.examples {
                for l in self.wrap(ex, self.width.saturating_sub(2)) {
                    out.push(format!("  {l}"));
                }
            }
            out.push(String::new());
        }

        for line in book.footer {
            out.extend(self.wrap(line, self.width));
        }
        out
    }

    fn render_block(&self, title: &str, rows: &[HelpFlag<'_>]) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let min_desc = self.width / 2;
        let mut label_width =
            rows.iter().map(|r| r.name.len()).max().unwrap_or(0).min(38);
        if label_width + 4 + min_desc > self.width {
            label_width = self.width.saturating_sub(min_desc + 4);
        }
        let desc_width =
            self.width.saturating_sub(2 + label_width + 2).max(min_desc);

        out.push(format!("{title}:"));
        for row in rows {
            let label_lines = self.wrap(row.name, label_width);
            let desc_lines = self.wrap(row.desc, desc_width);
            for idx in 0..label_lines.len().max(desc_lines.len()) {
                let l = label_lines.get(idx).map(String::as_str).unwrap_or("");
                let d = desc_lines.get(idx).map(String::as_str).unwrap_or("");
                out.push(format!("  {l:label_width$}  {d}").trim_end().to_string());
            }
        }
        out.push(String::new());
        out
    }

    fn wrap(&self, text: &str, width: usize) -> Vec<String> {
        let mut out = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
            } else if line.len() + 1 + word.len() <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                out.push(std::mem::take(&mut line));
                line.push_str(word);
            }
        }
        if !line.is_empty() || out.is_empty() {
            out.push(line);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let printer = HelpPrinter::new(64);
        let lines = printer.wrap("one two three four five six", 9);
        assert_eq!(lines, vec!["one two", "three", "four five", "six"]);
        assert_eq!(printer.wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn test_help_lists_every_flag() {
        let printer = HelpPrinter::new(100);
        let text = printer.render(&content::book()).join("\n");
        for flag in [
            "--in", "--out", "--title", "--reverse", "--range", "--start",
            "--end", "--url-regex", "--title-regex", "--max", "--format",
            "--status",
        ] {
            assert!(text.contains(flag), "missing {flag}");
        }
        assert!(text.contains("POCKET_DUMP_LOG"));
    }
}
