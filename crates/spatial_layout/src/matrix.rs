//! Matrix Layout - bracketed cell grids
//!
//! This module lays out a matrix as braille rows, handling:
//! - Skinny layout: one line per row, columns padded to their widest cell
//! - Indent layout: one line per cell, columns stepped in by two cells
//! - Block-blank layout: cells tiled into fixed-width blocks across lines
//!
//! Widths are always measured on the braille text of each cell.

use crate::context::FormatContext;
use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use spatial_model::{
    cell_width, widest, BracketType, Line, SpatialSettings, TranslationMode, WideStrategy,
};
use unicode_segmentation::UnicodeSegmentation;

/// One entry of a matrix
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatrixCell {
    pub text: String,
    /// Draw the script's ellipsis instead of the text
    pub ellipsis: bool,
}

impl MatrixCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ellipsis: false,
        }
    }

    pub fn ellipsis() -> Self {
        Self {
            text: String::new(),
            ellipsis: true,
        }
    }
}

/// Persisted state of a matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatrixModel {
    pub rows: usize,
    pub cols: usize,
    /// Cells by row, then column
    pub cells: Vec<Vec<MatrixCell>>,
    pub bracket: BracketType,
    pub wide_strategy: WideStrategy,
    pub translation: TranslationMode,
}

impl Default for MatrixModel {
    fn default() -> Self {
        let mut model = Self {
            rows: 2,
            cols: 2,
            cells: Vec::new(),
            bracket: BracketType::Parentheses,
            wide_strategy: WideStrategy::BlockBlank,
            translation: TranslationMode::Direct,
        };
        model.build_model();
        model
    }
}

impl MatrixModel {
    /// Bring the cell grid in line with `rows` x `cols`.
    ///
    /// Growing fills with empty cells, shrinking truncates; surviving cells
    /// keep their row and column.
    pub fn build_model(&mut self) {
        let cols = self.cols;
        self.cells.resize_with(self.rows, Vec::new);
        for row in &mut self.cells {
            row.resize_with(cols, MatrixCell::default);
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&MatrixCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut MatrixCell> {
        self.cells.get_mut(row).and_then(|r| r.get_mut(col))
    }
}

/// Matrix container
#[derive(Debug, Clone, Default)]
pub struct Matrix {
    pub model: MatrixModel,
    lines: Vec<Line>,
    widest: usize,
}

/// Braille text of every cell plus the derived widths
struct MatrixLayout {
    texts: Vec<Vec<String>>,
    column_widths: Vec<usize>,
    open: &'static str,
    close: &'static str,
}

impl MatrixLayout {
    fn skinny_width(&self) -> usize {
        let cols = self.column_widths.len();
        cell_width(self.open)
            + cell_width(self.close)
            + self.column_widths.iter().sum::<usize>()
            + cols.saturating_sub(1)
    }
}

impl Matrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut model = MatrixModel {
            rows,
            cols,
            ..Default::default()
        };
        model.build_model();
        Self::from_model(model)
    }

    pub fn from_model(mut model: MatrixModel) -> Self {
        model.build_model();
        Self {
            model,
            lines: Vec::new(),
            widest: 0,
        }
    }

    /// Fill cells from row-major text
    pub fn with_texts<S: AsRef<str>>(mut self, texts: &[S]) -> Self {
        let cols = self.model.cols.max(1);
        for (i, text) in texts.iter().enumerate() {
            if let Some(cell) = self.model.cell_mut(i / cols, i % cols) {
                cell.text = text.as_ref().to_string();
            }
        }
        self
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.model.rows = rows;
        self.model.build_model();
    }

    pub fn set_cols(&mut self, cols: usize) {
        self.model.cols = cols;
        self.model.build_model();
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn widest_line(&self) -> usize {
        self.widest
    }

    fn measure(&self, ctx: &FormatContext<'_>) -> MatrixLayout {
        let glyphs = ctx.glyphs();
        let texts: Vec<Vec<String>> = self
            .model
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.ellipsis {
                            glyphs.ellipsis.to_string()
                        } else {
                            ctx.translate(self.model.translation, &cell.text)
                        }
                    })
                    .collect()
            })
            .collect();

        // Rows may be out of step with `cols` until the model is rebuilt
        let mut column_widths = vec![0; self.model.cols];
        for row in &texts {
            if row.len() > column_widths.len() {
                column_widths.resize(row.len(), 0);
            }
            for (width, text) in column_widths.iter_mut().zip(row) {
                *width = (*width).max(cell_width(text));
            }
        }

        let (open, close) = self.model.bracket.glyphs(ctx.script());
        MatrixLayout {
            texts,
            column_widths,
            open,
            close,
        }
    }

    /// Whether the skinny layout would overflow the page
    pub fn need_wide(&self, ctx: &FormatContext<'_>) -> bool {
        self.measure(ctx).skinny_width() > ctx.cells_per_line()
    }

    /// Lay the matrix out, keeping the previous lines if layout fails
    pub fn format(&mut self, ctx: &FormatContext<'_>) -> Result<()> {
        self.model.build_model();
        if self.model.rows == 0 || self.model.cols == 0 {
            self.lines.clear();
            self.widest = 0;
            return Ok(());
        }

        let layout = self.measure(ctx);
        let lines = if layout.skinny_width() <= ctx.cells_per_line() {
            skinny(&layout)
        } else {
            tracing::debug!(
                "matrix is {} cells wide, using {:?} layout",
                layout.skinny_width(),
                self.model.wide_strategy
            );
            match self.model.wide_strategy {
                WideStrategy::IndentColumn => indent(&layout, ctx.cells_per_line())?,
                WideStrategy::BlockBlank => {
                    block_blank(&layout, ctx.cells_per_line(), ctx.script().is_nemeth())?
                }
            }
        };

        self.widest = widest(&lines);
        self.lines = lines;
        Ok(())
    }

    pub fn load_settings(&mut self, settings: &SpatialSettings) {
        self.model.bracket = settings.matrix.bracket;
        self.model.wide_strategy = settings.matrix.wide_strategy;
        self.model.translation = settings.matrix.translation;
    }

    pub fn save_settings(&self, settings: &mut SpatialSettings) {
        settings.matrix.bracket = self.model.bracket;
        settings.matrix.wide_strategy = self.model.wide_strategy;
        settings.matrix.translation = self.model.translation;
    }
}

fn skinny(layout: &MatrixLayout) -> Vec<Line> {
    layout
        .texts
        .iter()
        .map(|row| {
            let mut line = Line::new();
            line.push_text(layout.open);
            for (col, text) in row.iter().enumerate() {
                if col > 0 {
                    line.push_whitespace(1);
                }
                line.push_text(text.clone());
                line.push_whitespace(layout.column_widths[col] - cell_width(text));
            }
            line.push_text(layout.close);
            line
        })
        .collect()
}

fn indent(layout: &MatrixLayout, limit: usize) -> Result<Vec<Line>> {
    let cols = layout.column_widths.len();
    let mut lines = Vec::new();
    for col in 0..cols {
        for row in &layout.texts {
            let mut line = Line::new();
            line.push_whitespace(2 * col);
            if col == 0 {
                line.push_text(layout.open);
            }
            line.push_text(row.get(col).cloned().unwrap_or_default());
            if col + 1 == cols {
                line.push_text(layout.close);
            }
            let width = line.len();
            if width > limit {
                return Err(LayoutError::IndentTooWide { width, limit }.into());
            }
            lines.push(line);
        }
    }
    Ok(lines)
}

fn chunk(text: &str, width: usize, index: usize) -> String {
    text.graphemes(true).skip(index * width).take(width).collect()
}

fn block_blank(layout: &MatrixLayout, limit: usize, nemeth: bool) -> Result<Vec<Line>> {
    let cols = layout.column_widths.len();
    let brackets = cell_width(layout.open) + cell_width(layout.close);
    let cell_width_each = limit
        .checked_sub(brackets + cols - 1)
        .map(|room| room / cols)
        .unwrap_or(0);
    if cell_width_each == 0 {
        let width = brackets + 2 * cols - 1;
        return Err(LayoutError::LineTooLong { width, limit }.into());
    }

    let blank_line = || {
        let mut line = Line::new();
        line.push_text(layout.open);
        line.push_whitespace(cell_width_each * cols + cols - 1);
        line.push_text(layout.close);
        line
    };

    let mut lines = Vec::new();
    for (r, row) in layout.texts.iter().enumerate() {
        if r > 0 && !nemeth {
            lines.push(blank_line());
        }
        let wraps = row
            .iter()
            .map(|text| cell_width(text).div_ceil(cell_width_each))
            .max()
            .unwrap_or(0)
            .max(1);
        for k in 0..wraps {
            let mut line = Line::new();
            line.push_text(layout.open);
            for (col, text) in row.iter().enumerate() {
                if col > 0 {
                    line.push_whitespace(1);
                }
                let piece = chunk(text, cell_width_each, k);
                let pad = cell_width_each - cell_width(&piece);
                line.push_text(piece);
                line.push_whitespace(pad);
            }
            line.push_text(layout.close);
            lines.push(line);
        }
    }
    Ok(lines)
}
