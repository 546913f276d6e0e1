//! Segment lines - the unit of output for every layout engine
//!
//! A [`Line`] is an ordered run of [`Segment`]s. Whitespace runs are kept
//! separate from text so the consumer can turn them into tabs or padding,
//! and a line-break marker stands for a blank row on the page.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Number of braille cells a piece of text occupies
pub fn cell_width(text: &str) -> usize {
    text.graphemes(true).count()
}

/// A piece of a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Segment {
    /// Literal braille text
    Text(String),
    /// A run of blank cells
    Whitespace(usize),
    /// Blank row marker, renders as nothing
    LineBreak,
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text(text.into())
    }

    pub fn whitespace(count: usize) -> Self {
        Segment::Whitespace(count)
    }

    pub fn line_break() -> Self {
        Segment::LineBreak
    }

    /// Width of the rendered segment in cells
    pub fn len(&self) -> usize {
        match self {
            Segment::Text(text) => cell_width(text),
            Segment::Whitespace(count) => *count,
            Segment::LineBreak => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self) -> String {
        match self {
            Segment::Text(text) => text.clone(),
            Segment::Whitespace(count) => " ".repeat(*count),
            Segment::LineBreak => String::new(),
        }
    }
}

/// A line of segments
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Line {
    pub segments: Vec<Segment>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// A line holding a single text segment
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut line = Self::new();
        line.push(Segment::text(text));
        line
    }

    /// A line that only marks a blank row
    pub fn blank_row() -> Self {
        Self {
            segments: vec![Segment::LineBreak],
        }
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Append text, skipping empty strings
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(Segment::Text(text));
        }
    }

    /// Append a whitespace run, merging with a trailing run
    pub fn push_whitespace(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Whitespace(run)) => *run += count,
            _ => self.segments.push(Segment::Whitespace(count)),
        }
    }

    /// Append every segment of another line
    pub fn extend(&mut self, other: &Line) {
        self.segments.extend(other.segments.iter().cloned());
    }

    /// Rendered width in cells
    pub fn len(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the line starts with a line-break marker
    pub fn is_line_break(&self) -> bool {
        matches!(self.segments.first(), Some(Segment::LineBreak))
    }

    pub fn render(&self) -> String {
        self.segments.iter().map(Segment::render).collect()
    }

    /// Copy of this line right-padded with whitespace to `width` cells
    pub fn padded_to(&self, width: usize) -> Line {
        let mut line = self.clone();
        line.push_whitespace(width.saturating_sub(self.len()));
        line
    }
}

/// Render lines into page text, one line per row
pub fn render_lines(lines: &[Line]) -> String {
    lines.iter().map(Line::render).collect::<Vec<_>>().join("\n")
}

/// Number of rows that are blank line-break markers
pub fn count_blank_rows(lines: &[Line]) -> usize {
    lines.iter().filter(|line| line.is_line_break()).count()
}

/// Width of the widest line
pub fn widest(lines: &[Line]) -> usize {
    lines.iter().map(Line::len).max().unwrap_or(0)
}
