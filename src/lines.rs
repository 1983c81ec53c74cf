use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::error::{NavError, NavResult};

/// A single line of a document, as handed out by a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub line_number: usize,
    pub text: Cow<'a, str>,
}

impl<'a> Line<'a> {
    pub fn new(line_number: usize, text: impl Into<Cow<'a, str>>) -> Self {
        Line {
            line_number,
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Read-only, zero-indexed access to the lines of a document.
///
/// The parser and navigator never cache what they read through this trait,
/// so any backing storage works: a line array, a rope, an editor buffer.
pub trait LineSource {
    fn line_count(&self) -> usize;

    /// Returns `None` when `index` is outside `[0, line_count)`.
    fn line_at(&self, index: usize) -> Option<Line<'_>>;
}

impl LineSource for [String] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_at(&self, index: usize) -> Option<Line<'_>> {
        self.get(index).map(|text| Line::new(index, text.as_str()))
    }
}

impl LineSource for Vec<String> {
    fn line_count(&self) -> usize {
        self.as_slice().line_count()
    }

    fn line_at(&self, index: usize) -> Option<Line<'_>> {
        self.as_slice().line_at(index)
    }
}

impl LineSource for [&str] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_at(&self, index: usize) -> Option<Line<'_>> {
        self.get(index).map(|text| Line::new(index, *text))
    }
}

impl LineSource for Vec<&str> {
    fn line_count(&self) -> usize {
        self.as_slice().line_count()
    }

    fn line_at(&self, index: usize) -> Option<Line<'_>> {
        self.as_slice().line_at(index)
    }
}

/// An in-memory PO catalog split into lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        Document {
            lines: text
                .lines()
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect(),
        }
    }

    /// Load a catalog from disk
    ///
    /// # Errors
    /// - File not found
    /// - File is not valid UTF-8
    pub fn open(path: &Path) -> NavResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| NavError::Io(format!("Failed to read '{}': {}", path.display(), e)))?;
        Ok(Document::from_text(&content))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Ensure `index` addresses a line of this document.
    pub fn check_line(&self, index: usize) -> NavResult<usize> {
        if index < self.lines.len() {
            Ok(index)
        } else {
            Err(NavError::InvalidLine(format!(
                "line {} is outside the document ({} lines)",
                index,
                self.lines.len()
            )))
        }
    }
}

impl LineSource for Document {
    fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    fn line_at(&self, index: usize) -> Option<Line<'_>> {
        self.lines.line_at(index)
    }
}

/// Walk lines from `start` (inclusive) to the end of the document.
pub fn forward_lines<D: LineSource + ?Sized>(
    document: &D,
    start: usize,
) -> impl Iterator<Item = Line<'_>> {
    (start..document.line_count()).filter_map(move |index| document.line_at(index))
}

/// Walk lines from `start` (inclusive) back to the first line.
///
/// A `start` past the end is clamped to the last line.
pub fn backward_lines<D: LineSource + ?Sized>(
    document: &D,
    start: usize,
) -> impl Iterator<Item = Line<'_>> {
    let end = start.saturating_add(1).min(document.line_count());
    (0..end)
        .rev()
        .filter_map(move |index| document.line_at(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_text() {
        let doc = Document::from_text("msgid \"a\"\r\nmsgstr \"b\"\n\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_at(0).unwrap().text, "msgid \"a\"");
        assert_eq!(doc.line_at(1).unwrap().text, "msgstr \"b\"");
        assert!(doc.line_at(2).unwrap().is_blank());
        assert_eq!(doc.line_at(3), None);
    }

    #[test]
    fn test_check_line() {
        let doc = Document::from_text("a\nb");
        assert_eq!(doc.check_line(1), Ok(1));
        assert!(matches!(doc.check_line(2), Err(NavError::InvalidLine(_))));
    }

    #[test]
    fn test_forward_and_backward_walks() {
        let lines = vec!["zero", "one", "two", "three"];

        let forward: Vec<usize> = forward_lines(&lines, 1).map(|l| l.line_number).collect();
        assert_eq!(forward, vec![1, 2, 3]);

        let backward: Vec<usize> = backward_lines(&lines, 2).map(|l| l.line_number).collect();
        assert_eq!(backward, vec![2, 1, 0]);

        let clamped: Vec<usize> = backward_lines(&lines, 99).map(|l| l.line_number).collect();
        assert_eq!(clamped, vec![3, 2, 1, 0]);

        assert_eq!(forward_lines(&lines, 4).count(), 0);
    }

    #[test]
    fn test_owned_lines_source() {
        let lines = vec!["msgid \"x\"".to_string()];
        assert_eq!(lines.line_count(), 1);
        assert_eq!(lines.line_at(0), Some(Line::new(0, "msgid \"x\"")));
    }
}
