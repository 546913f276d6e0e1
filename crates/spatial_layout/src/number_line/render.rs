//! Column alignment and row rendering for number lines

use super::{CircleFill, NumberLine, NumberLineOption, SectionMode};
use crate::context::FormatContext;
use crate::error::{LayoutError, Result};
use spatial_model::{cell_width, ArrowStyle, GlyphTable, LabelPosition, Line};

/// Text of one column split at the minus glyph
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnText {
    /// Everything up to and including the minus glyph
    pub left: String,
    pub right: String,
}

impl ColumnText {
    pub fn split(text: &str, minus: &str) -> Self {
        match text.find(minus) {
            Some(at) if !minus.is_empty() => {
                let (left, right) = text.split_at(at + minus.len());
                Self {
                    left: left.to_string(),
                    right: right.to_string(),
                }
            }
            _ => Self {
                left: String::new(),
                right: text.to_string(),
            },
        }
    }

    pub fn left_width(&self) -> usize {
        cell_width(&self.left)
    }

    pub fn right_width(&self) -> usize {
        cell_width(&self.right)
    }
}

/// Points and labels padded to shared left and right widths
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignedColumns {
    pub left_width: usize,
    pub right_width: usize,
    pub points: Vec<ColumnText>,
    pub labels: Option<Vec<ColumnText>>,
}

impl AlignedColumns {
    pub fn column_width(&self) -> usize {
        self.left_width + self.right_width
    }

    /// Blank cells before and after a column's text
    pub fn padding(&self, column: &ColumnText) -> (usize, usize) {
        (
            self.left_width.saturating_sub(column.left_width()),
            self.right_width.saturating_sub(column.right_width()),
        )
    }
}

/// Split every point and label at the minus glyph and find the widest left
/// and right parts, so all tick positions line up.
pub fn align_columns(points: &[String], labels: Option<&[String]>, minus: &str) -> AlignedColumns {
    let points: Vec<ColumnText> = points.iter().map(|p| ColumnText::split(p, minus)).collect();
    let labels: Option<Vec<ColumnText>> = labels.map(|labels| {
        (0..points.len())
            .map(|i| ColumnText::split(labels.get(i).map_or("", String::as_str), minus))
            .collect()
    });

    let all = points.iter().chain(labels.iter().flatten());
    let (left_width, right_width) = all.fold((0, 0), |(l, r), c| {
        (l.max(c.left_width()), r.max(c.right_width()))
    });

    AlignedColumns {
        left_width,
        right_width,
        points,
        labels,
    }
}

fn arrow_glyphs(style: ArrowStyle, glyphs: &GlyphTable) -> (&'static str, &'static str) {
    match style {
        ArrowStyle::None => ("", ""),
        ArrowStyle::Plain => (glyphs.begin_arrow, glyphs.end_arrow),
        ArrowStyle::Overflow => (glyphs.begin_overflow_arrow, glyphs.end_overflow_arrow),
    }
}

fn circle(fill: CircleFill, glyphs: &GlyphTable) -> &'static str {
    match fill {
        CircleFill::Full => glyphs.filled_circle,
        CircleFill::Empty => glyphs.hollow_circle,
    }
}

fn check_width(line: &Line, limit: usize) -> Result<()> {
    let width = line.len();
    if width > limit {
        tracing::warn!("number line row is {} cells, limit {}", width, limit);
        return Err(LayoutError::LineTooLong { width, limit }.into());
    }
    Ok(())
}

/// Reject a line that cannot fit before any point is built. Every column
/// holds at least one cell and columns are `gap` apart.
pub(super) fn check_capacity(count: usize, ctx: &FormatContext<'_>) -> Result<()> {
    let gap = ctx.config.number_line_gap;
    let width = count.saturating_mul(1 + gap).saturating_sub(gap);
    let limit = ctx.cells_per_line();
    if width > limit {
        tracing::warn!("number line needs at least {} cells, limit {}", width, limit);
        return Err(LayoutError::LineTooLong { width, limit }.into());
    }
    Ok(())
}

impl NumberLine {
    /// Glyph drawn at the tick of a 1-based interval
    fn marker(&self, interval: usize, glyphs: &GlyphTable) -> &'static str {
        let model = &self.model;
        match model.section {
            SectionMode::Segment if interval == model.segment.start_interval => {
                circle(model.segment.start_cap, glyphs)
            }
            SectionMode::Segment if interval == model.segment.end_interval => {
                circle(model.segment.end_cap, glyphs)
            }
            SectionMode::Points => model
                .points
                .iter()
                .find(|p| p.interval == interval)
                .map_or(glyphs.tick, |p| circle(p.fill, glyphs)),
            _ => glyphs.tick,
        }
    }

    /// The drawn line: arrows, fill, ticks, circles and segment fill
    pub(super) fn render_line_row(
        &self,
        ctx: &FormatContext<'_>,
        columns: &AlignedColumns,
    ) -> Line {
        let glyphs = ctx.glyphs();
        let gap = ctx.config.number_line_gap;
        let width = columns.column_width();
        let count = columns.points.len();
        let stride = width + gap;
        let marker_at = |interval: usize| (interval - 1) * stride + columns.left_width;

        let segment = (self.model.section == SectionMode::Segment
            && self.model.segment.start_interval >= 1
            && self.model.segment.end_interval <= count)
            .then(|| {
                (
                    marker_at(self.model.segment.start_interval),
                    marker_at(self.model.segment.end_interval),
                )
            });

        let body_len = (count * stride).saturating_sub(gap);
        let mut body = String::new();
        for pos in 0..body_len {
            let in_column = pos % stride;
            if in_column == columns.left_width {
                body.push_str(self.marker(pos / stride + 1, glyphs));
            } else if segment.is_some_and(|(from, to)| pos > from && pos < to) {
                body.push_str(glyphs.segment_fill);
            } else {
                body.push_str(glyphs.line_fill);
            }
        }

        let (begin, _) = arrow_glyphs(self.model.start_arrow, glyphs);
        let (_, end) = arrow_glyphs(self.model.end_arrow, glyphs);
        let mut line = Line::new();
        line.push_text(begin);
        line.push_text(body);
        line.push_text(end);
        line
    }

    pub(super) fn render_rows(
        &self,
        ctx: &FormatContext<'_>,
        point_texts: &[String],
    ) -> Result<Vec<Line>> {
        let glyphs = ctx.glyphs();
        let limit = ctx.cells_per_line();
        let labels: Option<Vec<String>> = self.model.has_option(NumberLineOption::Labels).then(|| {
            self.model
                .labels
                .iter()
                .map(|label| ctx.translate(self.model.translation, label))
                .collect()
        });
        let columns = align_columns(point_texts, labels.as_deref(), glyphs.minus);

        let line_row = self.render_line_row(ctx, &columns);
        check_width(&line_row, limit)?;

        let point_row = self.render_point_line(ctx, &columns);
        check_width(&point_row, limit)?;

        let label_row = match self.render_label_line(ctx, &columns) {
            Some(row) => {
                check_width(&row, limit)?;
                Some(row)
            }
            None => None,
        };

        let mut lines = Vec::with_capacity(3);
        match (label_row, self.model.label_position) {
            (Some(label), LabelPosition::Above) => {
                lines.push(label);
                lines.push(line_row);
                lines.push(point_row);
            }
            (Some(label), LabelPosition::Below) => {
                lines.push(line_row);
                lines.push(point_row);
                lines.push(label);
            }
            (None, _) => {
                lines.push(line_row);
                lines.push(point_row);
            }
        }
        Ok(lines)
    }

    pub fn render_point_line(&self, ctx: &FormatContext<'_>, columns: &AlignedColumns) -> Line {
        self.render_columns(ctx, columns, &columns.points)
    }

    pub fn render_label_line(
        &self,
        ctx: &FormatContext<'_>,
        columns: &AlignedColumns,
    ) -> Option<Line> {
        columns
            .labels
            .as_ref()
            .map(|labels| self.render_columns(ctx, columns, labels))
    }

    fn render_columns(
        &self,
        ctx: &FormatContext<'_>,
        columns: &AlignedColumns,
        texts: &[ColumnText],
    ) -> Line {
        let glyphs = ctx.glyphs();
        let gap = ctx.config.number_line_gap;
        let (begin, _) = arrow_glyphs(self.model.start_arrow, glyphs);

        let mut line = Line::new();
        line.push_whitespace(cell_width(begin));
        for (i, column) in texts.iter().enumerate() {
            if i > 0 {
                line.push_whitespace(gap);
            }
            let (before, after) = columns.padding(column);
            line.push_whitespace(before);
            line.push_text(format!("{}{}", column.left, column.right));
            line.push_whitespace(after);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::super::{NumberLine, SegmentPoint};
    use super::*;
    use proptest::prelude::*;
    use spatial_model::{LayoutConfig, PassThrough, ScriptMode};

    #[test]
    fn test_split_at_minus() {
        let c = ColumnText::split("-12", "-");
        assert_eq!((c.left.as_str(), c.right.as_str()), ("-", "12"));
        let c = ColumnText::split("\"-#a", "\"-");
        assert_eq!((c.left.as_str(), c.right.as_str()), ("\"-", "#a"));
        let c = ColumnText::split("7", "-");
        assert_eq!((c.left.as_str(), c.right.as_str()), ("", "7"));
    }

    #[test]
    fn test_alignment_with_signs() {
        let points = vec!["-2".to_string(), "-1".to_string(), "0".to_string(), "10".to_string()];
        let columns = align_columns(&points, None, "-");
        assert_eq!(columns.left_width, 1);
        assert_eq!(columns.right_width, 2);
        assert_eq!(columns.padding(&columns.points[2]), (1, 1));
        assert_eq!(columns.padding(&columns.points[3]), (1, 0));
    }

    #[test]
    fn test_labels_widen_columns() {
        let points = vec!["1".to_string(), "2".to_string()];
        let labels = vec!["abc".to_string()];
        let columns = align_columns(&points, Some(&labels), "-");
        assert_eq!(columns.right_width, 3);
        let labels = columns.labels.as_ref().unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1].right, "");
    }

    fn rows(nl: &mut NumberLine, config: &LayoutConfig) -> Vec<String> {
        let ctx = FormatContext::new(config, &PassThrough);
        nl.format(&ctx).unwrap();
        nl.lines().iter().map(Line::render).collect()
    }

    #[test]
    fn test_negative_points_line_up() {
        let config = LayoutConfig::new(40, ScriptMode::Nemeth);
        let mut nl = NumberLine::new();
        nl.set_interval("1").unwrap();
        nl.set_line("-1", "1").unwrap();
        let rows = rows(&mut nl, &config);
        assert_eq!(rows[0], "{3733373337o");
        assert_eq!(rows[1], " -1   0   1");
    }

    #[test]
    fn test_segment_rendering() {
        let config = LayoutConfig::new(40, ScriptMode::Nemeth);
        let mut nl = NumberLine::new();
        nl.set_interval("1").unwrap();
        nl.set_line("1", "4").unwrap();
        nl.set_segment("2", "3").unwrap();
        nl.model.section = SectionMode::Segment;
        nl.model.segment.end_cap = CircleFill::Empty;
        let rows = rows(&mut nl, &config);
        assert_eq!(rows[0], "{733&gg%337o");
    }

    #[test]
    fn test_marked_points() {
        let config = LayoutConfig::new(40, ScriptMode::Nemeth);
        let mut nl = NumberLine::new();
        nl.set_interval("1").unwrap();
        nl.set_line("1", "3").unwrap();
        nl.model.section = SectionMode::Points;
        nl.model.points = vec![SegmentPoint {
            interval: 2,
            fill: CircleFill::Empty,
            ..Default::default()
        }];
        let rows = rows(&mut nl, &config);
        assert_eq!(rows[0], "{733%337o");
    }

    #[test]
    fn test_overflow_arrows_and_labels_above() {
        let config = LayoutConfig::new(40, ScriptMode::Nemeth);
        let mut nl = NumberLine::new();
        nl.set_interval("1").unwrap();
        nl.set_line("1", "2").unwrap();
        nl.model.start_arrow = ArrowStyle::Overflow;
        nl.model.end_arrow = ArrowStyle::None;
        nl.model.label_position = LabelPosition::Above;
        nl.model.labels = vec!["a".into(), "b".into()];
        nl.set_option(NumberLineOption::Labels, true);
        let rows = rows(&mut nl, &config);
        assert_eq!(rows, ["  a  b", "{{7337", "  1  2"]);
    }

    #[test]
    fn test_ueb_glyphs() {
        let config = LayoutConfig::new(40, ScriptMode::Ueb);
        let mut nl = NumberLine::new();
        nl.set_interval("1").unwrap();
        nl.set_line("0", "1").unwrap();
        let rows = rows(&mut nl, &config);
        assert_eq!(rows[0], "[7\"\"7o");
    }

    proptest! {
        #[test]
        fn prop_columns_align(
            values in proptest::collection::vec(-999i32..999, 1..12),
            labels in proptest::collection::vec("[a-z]{0,4}", 0..12),
        ) {
            let points: Vec<String> = values.iter().map(i32::to_string).collect();
            let columns = align_columns(&points, Some(&labels), "-");
            let all = columns.points.iter().chain(columns.labels.iter().flatten());
            for column in all {
                let (before, after) = columns.padding(column);
                prop_assert_eq!(before + column.left_width(), columns.left_width);
                prop_assert_eq!(column.right_width() + after, columns.right_width);
            }
        }
    }
}
