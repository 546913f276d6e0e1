//! Grid Compositor - lays heterogeneous containers out on one page
//!
//! Formatting runs in passes:
//! 1. Every container formats itself
//! 2. Column widths and row heights are reconciled
//! 3. Connecting text re-lays itself inside its cell
//! 4. Each row is merged horizontally
//! 5. Rows are joined with blank rows
//! 6. The page is framed for the active passage

use crate::container::{Container, SpatialContainer};
use crate::context::FormatContext;
use crate::error::Result;
use crate::passage;
use crate::persist::GridRecord;
use spatial_model::{count_blank_rows, widest, Line, PassageMode, Segment, SpatialSettings};

/// Cells between neighbouring containers
const CELL_GAP: usize = 1;

/// Cells before a template that carries an identifier
const TEMPLATE_GAP: usize = 3;

/// A page of containers arranged in rows and columns
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Containers by row, then column
    cells: Vec<Vec<Container>>,
    pub passage: PassageMode,
    lines: Vec<Line>,
    widest: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Grid {
    /// Create a grid of blank connecting containers
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut grid = Self {
            rows,
            cols,
            cells: Vec::new(),
            passage: PassageMode::None,
            lines: Vec::new(),
            widest: 0,
        };
        grid.build_model();
        grid
    }

    /// A one-cell page holding `container`
    pub fn single(container: Container) -> Self {
        let mut grid = Self::new(1, 1);
        grid.cells[0][0] = container;
        grid
    }

    pub fn from_record(record: GridRecord) -> Self {
        let mut grid = Self {
            rows: record.rows,
            cols: record.cols,
            cells: record
                .cells
                .into_iter()
                .map(|row| row.into_iter().map(Container::from_record).collect())
                .collect(),
            passage: record.passage,
            lines: Vec::new(),
            widest: 0,
        };
        grid.build_model();
        grid
    }

    pub fn to_record(&self) -> GridRecord {
        GridRecord {
            rows: self.rows,
            cols: self.cols,
            passage: self.passage,
            cells: self
                .cells
                .iter()
                .map(|row| row.iter().map(SpatialContainer::to_record).collect())
                .collect(),
        }
    }

    /// Bring the container array in line with `rows` x `cols`, filling new
    /// cells with blank connecting containers
    pub fn build_model(&mut self) {
        let cols = self.cols;
        self.cells.resize_with(self.rows, Vec::new);
        for row in &mut self.cells {
            row.resize_with(cols, Container::default);
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
        self.build_model();
    }

    pub fn set_cols(&mut self, cols: usize) {
        self.cols = cols;
        self.build_model();
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Container> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Container> {
        self.cells.get_mut(row).and_then(|r| r.get_mut(col))
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn widest_line(&self) -> usize {
        self.widest
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().flatten().all(SpatialContainer::is_blank)
    }

    pub fn load_settings(&mut self, settings: &SpatialSettings) {
        self.passage = settings.grid.passage;
    }

    pub fn save_settings(&self, settings: &mut SpatialSettings) {
        settings.grid.passage = self.passage;
    }

    /// Compose every container into page lines.
    ///
    /// The page is assembled in a local buffer; if any container fails the
    /// previous lines stay in place.
    pub fn format(&mut self, ctx: &FormatContext<'_>) -> Result<()> {
        if !ctx.script().is_nemeth() && self.passage != PassageMode::None {
            tracing::debug!("{:?} passage dropped outside Nemeth", self.passage);
            self.passage = PassageMode::None;
        }
        self.build_model();

        for (i, row) in self.cells.iter_mut().enumerate() {
            for (j, container) in row.iter_mut().enumerate() {
                if let Err(e) = container.format(ctx) {
                    tracing::warn!(
                        "{} at ({}, {}) failed to format: {}",
                        container.kind_name(),
                        i,
                        j,
                        e
                    );
                    return Err(e);
                }
            }
        }

        let col_widths = self.column_widths();
        let row_heights = self.row_heights(ctx);
        self.fill_connecting(ctx, &col_widths, &row_heights);

        let mut lines = Vec::new();
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                lines.push(Line::blank_row());
            }
            lines.extend(merge_row(row, &col_widths, row_heights[i]));
        }
        passage::wrap(&mut lines, self.passage, self.rows == 1);

        let limit = ctx.cells_per_line();
        let widest = widest(&lines);
        if widest > limit {
            tracing::warn!("composed page is {} cells wide, limit {}", widest, limit);
        }

        tracing::trace!(
            "grid formatted: {}x{} containers, {} lines, {} blank",
            self.rows,
            self.cols,
            lines.len(),
            count_blank_rows(&lines)
        );
        self.widest = widest;
        self.lines = lines;
        Ok(())
    }

    fn column_widths(&self) -> Vec<usize> {
        (0..self.cols)
            .map(|j| {
                self.cells
                    .iter()
                    .filter_map(|row| row.get(j))
                    .map(SpatialContainer::widest_line)
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn row_heights(&self, ctx: &FormatContext<'_>) -> Vec<usize> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|container| match container {
                        Container::Connecting(c) if !c.is_blank() => c.text_lines(ctx).len(),
                        other => other.lines().len(),
                    })
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn fill_connecting(
        &mut self,
        ctx: &FormatContext<'_>,
        col_widths: &[usize],
        row_heights: &[usize],
    ) {
        for (i, row) in self.cells.iter_mut().enumerate() {
            for (j, container) in row.iter_mut().enumerate() {
                if let Container::Connecting(c) = container {
                    c.fill_page_info(ctx, col_widths[j], row_heights[i]);
                }
            }
        }
    }
}

/// Cells between `left` and `right` on a merged line
fn column_gap(left: &Container, right: &Container) -> usize {
    if left.is_blank() || right.is_blank() {
        return 0;
    }
    match right {
        Container::Template(template) if template.has_identifier() => TEMPLATE_GAP,
        _ => CELL_GAP,
    }
}

/// Merge one grid row into `height` page lines
fn merge_row(row: &[Container], col_widths: &[usize], height: usize) -> Vec<Line> {
    (0..height)
        .map(|k| {
            let mut line = Line::new();
            for (j, container) in row.iter().enumerate() {
                if j > 0 {
                    line.push_whitespace(column_gap(&row[j - 1], container));
                }
                let width = col_widths[j];
                match container.lines().get(k) {
                    Some(part) if !container.is_blank() && !part.is_line_break() => {
                        line.extend(&part.padded_to(width));
                    }
                    _ => line.push_whitespace(width),
                }
            }
            while matches!(line.segments.last(), Some(Segment::Whitespace(_))) {
                line.segments.pop();
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connecting::ConnectingContainer;
    use crate::matrix::Matrix;
    use crate::number_line::NumberLine;
    use crate::template::{Template, TemplateModel};
    use spatial_model::{render_lines, LayoutConfig, PassThrough, ScriptMode, VerticalJustify};

    fn text(s: &str) -> Container {
        Container::Connecting(ConnectingContainer::new(s))
    }

    fn template(identifier: &str, rows: &[&str]) -> Container {
        Container::Template(Template::from_model(TemplateModel {
            identifier: identifier.into(),
            rows: rows.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }))
    }

    fn row_grid(containers: Vec<Container>) -> Grid {
        let mut grid = Grid::new(1, containers.len());
        for (j, container) in containers.into_iter().enumerate() {
            if let Some(cell) = grid.cell_mut(0, j) {
                *cell = container;
            }
        }
        grid
    }

    fn formatted(grid: &mut Grid, config: &LayoutConfig) -> String {
        let ctx = FormatContext::new(config, &PassThrough);
        grid.format(&ctx).unwrap();
        render_lines(grid.lines())
    }

    #[test]
    fn test_text_beside_matrix() {
        let matrix = Container::Matrix(Matrix::new(1, 2).with_texts(&["1", "2"]));
        let mut grid = row_grid(vec![text("x+y"), matrix]);
        assert_eq!(formatted(&mut grid, &LayoutConfig::default()), "x+y ,(1 2,)");
        assert_eq!(grid.widest_line(), 11);
    }

    #[test]
    fn test_blank_container_has_no_gap() {
        let mut grid = row_grid(vec![text("a"), text(""), text("b")]);
        assert_eq!(formatted(&mut grid, &LayoutConfig::default()), "ab");
    }

    #[test]
    fn test_template_with_identifier_gets_wide_gap() {
        let mut grid = row_grid(vec![text("a"), template("_=", &["12"])]);
        assert_eq!(formatted(&mut grid, &LayoutConfig::default()), "a   12");

        let mut grid = row_grid(vec![text("a"), template("", &["12"])]);
        assert_eq!(formatted(&mut grid, &LayoutConfig::default()), "a 12");
    }

    #[test]
    fn test_rows_separated_by_blank_row() {
        let mut grid = Grid::new(2, 1);
        *grid.cell_mut(0, 0).unwrap() = text("a");
        *grid.cell_mut(1, 0).unwrap() = text("b");
        assert_eq!(formatted(&mut grid, &LayoutConfig::default()), "a\n\nb");
        assert!(grid.lines()[1].is_line_break());
    }

    #[test]
    fn test_row_height_and_column_padding() {
        let mut centered = ConnectingContainer::new("c");
        centered.model.vertical = VerticalJustify::Center;
        let mut bottom = ConnectingContainer::new("z");
        bottom.model.vertical = VerticalJustify::Bottom;
        let mut grid = row_grid(vec![
            text("a\nbbb"),
            Container::Connecting(centered),
            Container::Connecting(bottom),
        ]);
        assert_eq!(formatted(&mut grid, &LayoutConfig::default()), "a   c\nbbb   z");
    }

    #[test]
    fn test_matrix_rows_set_height() {
        let matrix = Container::Matrix(Matrix::new(2, 1).with_texts(&["1", "2"]));
        let mut grid = row_grid(vec![matrix, text("k")]);
        let page = formatted(&mut grid, &LayoutConfig::default());
        assert_eq!(page, ",(1,) k\n,(2,)");
    }

    #[test]
    fn test_single_row_passage_inline() {
        let mut grid = Grid::single(text("a"));
        grid.passage = PassageMode::Nemeth;
        assert_eq!(formatted(&mut grid, &LayoutConfig::default()), "_% a _:");
    }

    #[test]
    fn test_multi_row_passage_lines() {
        let mut grid = Grid::new(2, 1);
        *grid.cell_mut(0, 0).unwrap() = text("a");
        *grid.cell_mut(1, 0).unwrap() = text("b");
        grid.passage = PassageMode::Numeric;
        assert_eq!(formatted(&mut grid, &LayoutConfig::default()), "##\na\n\nb\n#'");
    }

    #[test]
    fn test_passage_reset_outside_nemeth() {
        let mut grid = Grid::single(text("a"));
        grid.passage = PassageMode::Nemeth;
        let config = LayoutConfig::new(40, ScriptMode::Ueb);
        assert_eq!(formatted(&mut grid, &config), "a");
        assert_eq!(grid.passage, PassageMode::None);
    }

    #[test]
    fn test_resize_keeps_existing_cells() {
        let mut grid = Grid::single(text("a"));
        grid.set_cols(3);
        grid.set_rows(2);
        assert_eq!(grid.cells.iter().map(Vec::len).sum::<usize>(), 6);
        assert!(!grid.cell(0, 0).unwrap().is_blank());
        assert!(grid.cell(1, 2).unwrap().is_blank());

        grid.set_rows(0);
        assert_eq!(formatted(&mut grid, &LayoutConfig::default()), "");
        assert!(grid.lines().is_empty());
    }

    #[test]
    fn test_failed_container_keeps_previous_page() {
        let mut grid = Grid::single(text("a"));
        let config = LayoutConfig::default();
        assert_eq!(formatted(&mut grid, &config), "a");

        let mut line = NumberLine::new();
        line.set_interval("2").unwrap();
        *grid.cell_mut(0, 0).unwrap() = Container::NumberLine(line);
        let ctx = FormatContext::new(&config, &PassThrough);
        assert!(grid.format(&ctx).is_err());
        assert_eq!(render_lines(grid.lines()), "a");
    }

    #[test]
    fn test_overwide_page_still_formats() {
        let mut grid = row_grid(vec![text("abcdef"), text("ghijkl")]);
        let config = LayoutConfig::new(8, ScriptMode::Nemeth);
        assert_eq!(formatted(&mut grid, &config), "abcdef ghijkl");
        assert_eq!(grid.widest_line(), 13);
    }

    #[test]
    fn test_settings_carry_passage() {
        let mut settings = SpatialSettings::default();
        let mut grid = Grid::default();
        grid.passage = PassageMode::Grade1;
        grid.save_settings(&mut settings);
        let mut other = Grid::default();
        other.load_settings(&settings);
        assert_eq!(other.passage, PassageMode::Grade1);
    }

    #[test]
    fn test_record_round_trip() {
        let mut grid = row_grid(vec![text("a"), template("_=", &["1"])]);
        grid.passage = PassageMode::Nemeth;
        let restored = Grid::from_record(grid.to_record());
        assert_eq!(restored.to_record(), grid.to_record());
        assert_eq!(restored.cols(), 2);
    }
}
