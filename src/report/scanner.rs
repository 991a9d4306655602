use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// One display action produced while scanning a report.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `#`-prefixed line with the hashes and surrounding whitespace removed.
    Heading(String),
    /// Consecutive plain lines, trimmed.
    Paragraph(String),
    /// Image reference whose resolved file exists.
    Image(PathBuf),
    /// Image reference whose resolved file does not exist.
    MissingImage(PathBuf),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{} not found.", .0.display())]
    NotFound(PathBuf),
    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Read a markdown report and emit its blocks in document order.
///
/// Relative image paths are resolved against `image_dir`; an empty
/// `image_dir` leaves them relative to the working directory.
pub fn scan_file<F>(path: &Path, image_dir: &Path, emit: F) -> Result<(), ReportError>
where
    F: FnMut(Block),
{
    if !path.exists() {
        return Err(ReportError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    scan(&text, image_dir, emit);
    Ok(())
}

/// Collect every block of a report file.
pub fn load_blocks(path: &Path, image_dir: &Path) -> Result<Vec<Block>, ReportError> {
    let mut blocks = Vec::new();
    scan_file(path, image_dir, |b| blocks.push(b))?;
    Ok(blocks)
}

/// Scan markdown text line by line.
///
/// Plain lines accumulate in a buffer; an image line or a heading line
/// flushes it as one paragraph before emitting itself. Whitespace-only
/// buffers are dropped.
pub fn scan<F>(text: &str, image_dir: &Path, mut emit: F)
where
    F: FnMut(Block),
{
    fn flush<F: FnMut(Block)>(buffer: &mut String, emit: &mut F) {
        let trimmed = buffer.trim();
        if !trimmed.is_empty() {
            emit(Block::Paragraph(trimmed.to_string()));
        }
        buffer.clear();
    }

    let mut buffer = String::new();

    for line in text.split_inclusive('\n') {
        if let Some(target) = image_reference(line) {
            flush(&mut buffer, &mut emit);
            let resolved = image_dir.join(target);
            if resolved.exists() {
                emit(Block::Image(resolved));
            } else {
                log::warn!("Image not found: {}", resolved.display());
                emit(Block::MissingImage(resolved));
            }
        } else if line.trim().starts_with('#') {
            flush(&mut buffer, &mut emit);
            let title = line.trim().trim_start_matches('#').trim();
            emit(Block::Heading(title.to_string()));
        } else {
            buffer.push_str(line);
        }
    }

    flush(&mut buffer, &mut emit);
}

/// Target of the first `![alt](target)` reference on the line.
///
/// The alt text is greedy, so with several references on one line the
/// target comes from the last `](` that still has a closing `)` after it.
/// The target itself ends at the first `)`.
fn image_reference(line: &str) -> Option<&str> {
    let line = line.trim_end_matches('\n');
    let start = line.find("![")?;
    let rest = &line[start + 2..];

    let mut end = rest.len();
    while let Some(pos) = rest[..end].rfind("](") {
        let after = &rest[pos + 2..];
        if let Some(close) = after.find(')') {
            return Some(&after[..close]);
        }
        end = pos;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(text: &str, image_dir: &Path) -> Vec<Block> {
        let mut out = Vec::new();
        scan(text, image_dir, |b| out.push(b));
        out
    }

    #[test]
    fn plain_document_is_one_paragraph() {
        let text = "First line.\n  indented   words\n\nlast line\n\n   \n";
        assert_eq!(
            blocks(text, Path::new("")),
            vec![Block::Paragraph(
                "First line.\n  indented   words\n\nlast line".to_string()
            )]
        );
    }

    #[test]
    fn heading_then_body() {
        assert_eq!(
            blocks("# Title\nbody text", Path::new("")),
            vec![
                Block::Heading("Title".to_string()),
                Block::Paragraph("body text".to_string()),
            ]
        );
    }

    #[test]
    fn consecutive_lines_merge_before_heading() {
        assert_eq!(
            blocks("one\ntwo\n### Results\n", Path::new("")),
            vec![
                Block::Paragraph("one\ntwo".to_string()),
                Block::Heading("Results".to_string()),
            ]
        );
    }

    #[test]
    fn indented_heading_of_any_depth() {
        assert_eq!(
            blocks("   ####   Deep  \n", Path::new("")),
            vec![Block::Heading("Deep".to_string())]
        );
    }

    #[test]
    fn whitespace_buffer_is_dropped() {
        assert_eq!(
            blocks("# Only\n   \n\t\n", Path::new("")),
            vec![Block::Heading("Only".to_string())]
        );
        assert!(blocks("", Path::new("")).is_empty());
    }

    #[test]
    fn missing_image_warns_with_resolved_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = blocks("intro\n![alt](missing.png)\noutro\n", dir.path());
        assert_eq!(
            out,
            vec![
                Block::Paragraph("intro".to_string()),
                Block::MissingImage(dir.path().join("missing.png")),
                Block::Paragraph("outro".to_string()),
            ]
        );
    }

    #[test]
    fn existing_image_is_emitted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cm.png"), b"not really a png").unwrap();
        let out = blocks("text ![Confusion matrix](cm.png) trailing\n", dir.path());
        assert_eq!(out, vec![Block::Image(dir.path().join("cm.png"))]);
    }

    #[test]
    fn image_wins_over_heading() {
        let out = blocks("# ![logo](nope.png)\n", Path::new(""));
        assert_eq!(out, vec![Block::MissingImage(PathBuf::from("nope.png"))]);
    }

    #[test]
    fn image_reference_matching() {
        assert_eq!(image_reference("![a](x.png)\n"), Some("x.png"));
        assert_eq!(image_reference("![](x.png)"), Some("x.png"));
        assert_eq!(image_reference("see ![a](x.png) (fig 1)"), Some("x.png"));
        assert_eq!(image_reference("![a](x.png) and ![b](y.png)"), Some("y.png"));
        assert_eq!(image_reference("![a](x.png"), None);
        assert_eq!(image_reference("[a](x.png)"), None);
        assert_eq!(image_reference("plain"), None);
    }

    #[test]
    fn missing_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_comparison.md");
        let err = load_blocks(&path, Path::new("")).unwrap_err();
        assert!(matches!(err, ReportError::NotFound(_)));
        assert_eq!(err.to_string(), format!("{} not found.", path.display()));
    }

    #[test]
    fn reads_document_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        std::fs::write(&path, "## Model comparison\nRandom forest wins.\n").unwrap();
        assert_eq!(
            load_blocks(&path, dir.path()).unwrap(),
            vec![
                Block::Heading("Model comparison".to_string()),
                Block::Paragraph("Random forest wins.".to_string()),
            ]
        );
    }
}
