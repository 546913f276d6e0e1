//! Number Line - interval, bounds and segment laid out as braille rows
//!
//! A number line renders as up to three rows: the line itself (arrows, fill,
//! tick marks and circles), the numerals under the ticks, and an optional
//! label row. Numerals and labels are padded so that every tick sits over
//! the same relative position of its column.

mod points;
mod render;
mod validate;

pub use points::MAX_INTERVALS;
pub use render::{align_columns, AlignedColumns, ColumnText};

use crate::context::FormatContext;
use crate::error::{NumberLineError, Result};
use serde::{Deserialize, Serialize};
use spatial_model::{
    widest, ArrowStyle, FormatResult, LabelPosition, Line, NumberKind, RationalComponent,
    SpatialSettings, TranslationMode,
};
use std::collections::BTreeSet;

/// How points are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberLineMode {
    /// Points follow from interval, start and end
    #[default]
    AutomaticMath,
    /// Every interval's text is typed by the user
    UserDefined,
}

/// What is highlighted on the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionMode {
    Points,
    Segment,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberLineOption {
    Blanks,
    Labels,
}

/// Circle drawn on a marked point or segment end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CircleFill {
    #[default]
    Full,
    Empty,
}

/// Per-interval override applied when the blanks option is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntervalType {
    #[default]
    Normal,
    Blank,
    Omission,
}

/// A point on the line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentPoint {
    pub value: RationalComponent,
    /// 1-based interval index
    pub interval: usize,
    pub fill: CircleFill,
}

/// A highlighted sub-range of the line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineSegment {
    pub start: RationalComponent,
    pub end: RationalComponent,
    pub start_cap: CircleFill,
    pub end_cap: CircleFill,
    pub start_interval: usize,
    pub end_interval: usize,
}

impl LineSegment {
    pub fn is_active(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }
}

/// Persisted state of a number line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberLineModel {
    pub interval: RationalComponent,
    pub line_start: RationalComponent,
    pub line_end: RationalComponent,
    pub segment: LineSegment,
    /// Points marked with circles in [`SectionMode::Points`]
    pub points: Vec<SegmentPoint>,
    pub options: BTreeSet<NumberLineOption>,
    pub mode: NumberLineMode,
    pub section: SectionMode,
    /// Kind every computed point is written as
    pub number_kind: NumberKind,
    /// Point text per interval in [`NumberLineMode::UserDefined`]
    pub user_points: Vec<String>,
    /// Label text per interval
    pub labels: Vec<String>,
    pub interval_types: Vec<IntervalType>,
    pub label_position: LabelPosition,
    pub start_arrow: ArrowStyle,
    pub end_arrow: ArrowStyle,
    pub translation: TranslationMode,
}

impl Default for NumberLineModel {
    fn default() -> Self {
        Self {
            interval: RationalComponent::whole_number(1),
            line_start: RationalComponent::whole_number(0),
            line_end: RationalComponent::whole_number(5),
            segment: LineSegment::default(),
            points: Vec::new(),
            options: BTreeSet::new(),
            mode: NumberLineMode::AutomaticMath,
            section: SectionMode::None,
            number_kind: NumberKind::Whole,
            user_points: Vec::new(),
            labels: Vec::new(),
            interval_types: Vec::new(),
            label_position: LabelPosition::Below,
            start_arrow: ArrowStyle::Plain,
            end_arrow: ArrowStyle::Plain,
            translation: TranslationMode::Direct,
        }
    }
}

impl NumberLineModel {
    pub fn has_option(&self, option: NumberLineOption) -> bool {
        self.options.contains(&option)
    }

    pub fn interval_type(&self, interval: usize) -> IntervalType {
        interval
            .checked_sub(1)
            .and_then(|i| self.interval_types.get(i))
            .copied()
            .unwrap_or_default()
    }
}

/// Number line container
#[derive(Debug, Clone, Default)]
pub struct NumberLine {
    pub model: NumberLineModel,
    lines: Vec<Line>,
    widest: usize,
}

impl NumberLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_model(model: NumberLineModel) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    /// Set the interval from typed text. The number kind follows the interval.
    pub fn set_interval(&mut self, raw: &str) -> FormatResult<()> {
        let interval = RationalComponent::parse(raw)?;
        if !interval.is_empty() {
            self.model.number_kind = interval.kind;
        }
        self.model.interval = interval;
        Ok(())
    }

    pub fn set_line(&mut self, start: &str, end: &str) -> FormatResult<()> {
        let start = RationalComponent::parse(start)?;
        let end = RationalComponent::parse(end)?;
        self.model.line_start = start;
        self.model.line_end = end;
        Ok(())
    }

    pub fn set_segment(&mut self, start: &str, end: &str) -> FormatResult<()> {
        let start = RationalComponent::parse(start)?;
        let end = RationalComponent::parse(end)?;
        self.model.segment.start = start;
        self.model.segment.end = end;
        Ok(())
    }

    /// Switch the number kind and rewrite every numeric field in it
    pub fn change_number_kind(&mut self, kind: NumberKind) -> FormatResult<()> {
        let model = &mut self.model;
        for field in [
            &mut model.interval,
            &mut model.line_start,
            &mut model.line_end,
            &mut model.segment.start,
            &mut model.segment.end,
        ] {
            if !field.is_empty() {
                let text = field.unparse(kind)?;
                *field = RationalComponent::parse(&text)?;
            }
        }
        model.number_kind = kind;
        Ok(())
    }

    pub fn set_option(&mut self, option: NumberLineOption, enabled: bool) {
        if enabled {
            self.model.options.insert(option);
        } else {
            self.model.options.remove(&option);
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn widest_line(&self) -> usize {
        self.widest
    }

    /// Validate, compute points and render every row.
    ///
    /// The rows are assembled in a local buffer; on failure the previous
    /// lines stay in place.
    pub fn format(&mut self, ctx: &FormatContext<'_>) -> Result<()> {
        self.run_validation(false)?;
        if self.model.section == SectionMode::Segment
            && self.model.mode == NumberLineMode::AutomaticMath
        {
            self.derive_segment_intervals()?;
        }
        if self.model.mode == NumberLineMode::AutomaticMath {
            render::check_capacity(self.interval_count()?, ctx)?;
        }

        let point_texts = self.point_texts(ctx)?;
        let lines = self.render_rows(ctx, &point_texts)?;

        self.widest = widest(&lines);
        self.lines = lines;
        tracing::trace!(
            "number line formatted: {} rows, widest {}",
            self.lines.len(),
            self.widest
        );
        Ok(())
    }

    /// Print text of every interval, before translation overrides
    fn point_texts(
        &self,
        ctx: &FormatContext<'_>,
    ) -> std::result::Result<Vec<String>, NumberLineError> {
        let raw: Vec<String> = match self.model.mode {
            NumberLineMode::AutomaticMath => self
                .enumerate_points()?
                .iter()
                .map(|p| p.value.to_string())
                .collect(),
            NumberLineMode::UserDefined => self.model.user_points.clone(),
        };

        let glyphs = ctx.glyphs();
        let blanks = self.model.has_option(NumberLineOption::Blanks);
        Ok(raw
            .iter()
            .enumerate()
            .map(|(i, text)| match self.model.interval_type(i + 1) {
                IntervalType::Blank if blanks => " ".to_string(),
                IntervalType::Omission if blanks => glyphs.omission.to_string(),
                _ => ctx.translate(self.model.translation, text),
            })
            .collect())
    }

    pub fn load_settings(&mut self, settings: &SpatialSettings) {
        let defaults = &settings.number_line;
        self.model.start_arrow = defaults.start_arrow;
        self.model.end_arrow = defaults.end_arrow;
        self.model.label_position = defaults.label_position;
        self.model.translation = defaults.translation;
    }

    pub fn save_settings(&self, settings: &mut SpatialSettings) {
        let defaults = &mut settings.number_line;
        defaults.start_arrow = self.model.start_arrow;
        defaults.end_arrow = self.model.end_arrow;
        defaults.label_position = self.model.label_position;
        defaults.translation = self.model.translation;
    }
}
