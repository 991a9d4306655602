//! Light markdown formatting for paragraph blocks.
//!
//! Only what analysis reports typically contain: inline emphasis and code,
//! bullet lists, horizontal rules and pipe tables.

// ---------------------------------------------------------------------------
// Paragraph segments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Consecutive text lines joined with single spaces.
    Text(String),
    /// One `-`, `*` or `+` list item.
    Bullet(String),
    /// `---`, `***` or `___`.
    Rule,
    /// Pipe table; the first row is the header, the `|---|` row is dropped.
    Table(Vec<Vec<String>>),
}

/// Split a paragraph block into display segments.
pub fn segments(paragraph: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut text: Vec<&str> = Vec::new();
    let mut table: Vec<Vec<String>> = Vec::new();

    fn flush_text(text: &mut Vec<&str>, out: &mut Vec<Segment>) {
        if !text.is_empty() {
            out.push(Segment::Text(text.join(" ")));
            text.clear();
        }
    }

    fn flush_table(table: &mut Vec<Vec<String>>, out: &mut Vec<Segment>) {
        if !table.is_empty() {
            out.push(Segment::Table(std::mem::take(table)));
        }
    }

    for line in paragraph.lines() {
        let line = line.trim();

        if line.starts_with('|') {
            flush_text(&mut text, &mut out);
            if !is_separator_row(line) {
                table.push(table_cells(line));
            }
            continue;
        }
        flush_table(&mut table, &mut out);

        if line.is_empty() {
            flush_text(&mut text, &mut out);
        } else if is_rule(line) {
            flush_text(&mut text, &mut out);
            out.push(Segment::Rule);
        } else if let Some(item) = bullet_item(line) {
            flush_text(&mut text, &mut out);
            out.push(Segment::Bullet(item.to_string()));
        } else {
            text.push(line);
        }
    }

    flush_table(&mut table, &mut out);
    flush_text(&mut text, &mut out);
    out
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&m| compact.chars().all(|c| c == m))
}

fn bullet_item(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|m| line.strip_prefix(m))
        .map(str::trim)
}

fn table_cells(line: &str) -> Vec<String> {
    let inner = line.trim_start_matches('|');
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

fn is_separator_row(line: &str) -> bool {
    table_cells(line).iter().all(|cell| {
        !cell.is_empty() && cell.contains('-') && cell.chars().all(|c| matches!(c, '-' | ':'))
    })
}

// ---------------------------------------------------------------------------
// Inline spans
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Span<'a> {
    Plain(&'a str),
    Bold(&'a str),
    Italic(&'a str),
    Code(&'a str),
}

/// Split a line into emphasis / code spans. Unclosed markers stay literal.
pub fn inline_spans<'a>(text: &'a str) -> Vec<Span<'a>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let (marker, wrap): (&str, fn(&'a str) -> Span<'a>) = match bytes[i] {
            b'`' => ("`", Span::Code),
            b'*' if bytes.get(i + 1) == Some(&b'*') => ("**", Span::Bold),
            b'*' => ("*", Span::Italic),
            // Underscores inside identifiers are not emphasis.
            b'_' if i == 0 || !bytes[i - 1].is_ascii_alphanumeric() => ("_", Span::Italic),
            _ => {
                i += 1;
                continue;
            }
        };

        let inner = i + marker.len();
        match text[inner..].find(marker) {
            Some(len) if len > 0 => {
                if plain_start < i {
                    spans.push(Span::Plain(&text[plain_start..i]));
                }
                spans.push(wrap(&text[inner..inner + len]));
                i = inner + len + marker.len();
                plain_start = i;
            }
            _ => i += marker.len(),
        }
    }

    if plain_start < text.len() {
        spans.push(Span::Plain(&text[plain_start..]));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_text_bullets_and_rules() {
        let para = "The random forest\nscored best.\n\n- accuracy 0.61\n* f1 0.58\n---\nDone.";
        assert_eq!(
            segments(para),
            vec![
                Segment::Text("The random forest scored best.".into()),
                Segment::Bullet("accuracy 0.61".into()),
                Segment::Bullet("f1 0.58".into()),
                Segment::Rule,
                Segment::Text("Done.".into()),
            ]
        );
    }

    #[test]
    fn recognises_pipe_tables() {
        let para = "Scores:\n| Model | Accuracy |\n|:------|---------:|\n| RF | 0.61 |\n| SVM | 0.57 |";
        assert_eq!(
            segments(para),
            vec![
                Segment::Text("Scores:".into()),
                Segment::Table(vec![
                    vec!["Model".into(), "Accuracy".into()],
                    vec!["RF".into(), "0.61".into()],
                    vec!["SVM".into(), "0.57".into()],
                ]),
            ]
        );
    }

    #[test]
    fn bold_rule_is_not_a_bullet() {
        assert_eq!(segments("* * *"), vec![Segment::Rule]);
        assert_eq!(segments("**Note**"), vec![Segment::Text("**Note**".into())]);
    }

    #[test]
    fn inline_emphasis_and_code() {
        assert_eq!(
            inline_spans("Best: **Random Forest** with `n_estimators=200`, *tuned*."),
            vec![
                Span::Plain("Best: "),
                Span::Bold("Random Forest"),
                Span::Plain(" with "),
                Span::Code("n_estimators=200"),
                Span::Plain(", "),
                Span::Italic("tuned"),
                Span::Plain("."),
            ]
        );
    }

    #[test]
    fn identifiers_and_unclosed_markers_stay_plain() {
        assert_eq!(
            inline_spans("max_depth and min_samples_leaf"),
            vec![Span::Plain("max_depth and min_samples_leaf")]
        );
        assert_eq!(inline_spans("2 * 3 = 6"), vec![Span::Plain("2 * 3 = 6")]);
        assert_eq!(
            inline_spans("_emphasis_ here"),
            vec![Span::Italic("emphasis"), Span::Plain(" here")]
        );
    }
}
