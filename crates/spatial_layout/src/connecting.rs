//! Connecting text between spatial containers

use crate::context::FormatContext;
use serde::{Deserialize, Serialize};
use spatial_model::{
    cell_width, widest, HorizontalJustify, Line, SpatialSettings, TranslationMode,
    VerticalJustify,
};

/// Persisted state of a connecting text block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectingModel {
    pub text: String,
    pub translation: TranslationMode,
    pub vertical: VerticalJustify,
    pub horizontal: HorizontalJustify,
}

/// A block of text justified inside a grid cell
#[derive(Debug, Clone, Default)]
pub struct ConnectingContainer {
    pub model: ConnectingModel,
    lines: Vec<Line>,
    widest: usize,
}

impl ConnectingContainer {
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_model(ConnectingModel {
            text: text.into(),
            ..Default::default()
        })
    }

    pub fn from_model(model: ConnectingModel) -> Self {
        Self {
            model,
            lines: Vec::new(),
            widest: 0,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn widest_line(&self) -> usize {
        self.widest
    }

    pub fn is_blank(&self) -> bool {
        self.model.text.trim().is_empty()
    }

    /// Braille text split on line separators
    pub fn text_lines(&self, ctx: &FormatContext<'_>) -> Vec<String> {
        let braille = ctx.translate(self.model.translation, &self.model.text);
        braille.lines().map(str::to_string).collect()
    }

    /// One line holding the braille text as-is
    pub fn format(&mut self, ctx: &FormatContext<'_>) {
        if self.is_blank() {
            self.lines.clear();
            self.widest = 0;
            return;
        }
        let braille = ctx.translate(self.model.translation, &self.model.text);
        self.widest = braille.lines().map(cell_width).max().unwrap_or(0);
        self.lines = vec![Line::from_text(braille)];
    }

    /// Lay the text out inside a grid cell `width` cells wide and
    /// `total_lines` rows tall.
    ///
    /// Vertical centering puts the odd blank row at the bottom; horizontal
    /// centering puts the odd blank cell on the right.
    pub fn fill_page_info(&mut self, ctx: &FormatContext<'_>, width: usize, total_lines: usize) {
        if self.is_blank() {
            self.lines.clear();
            self.widest = 0;
            return;
        }

        let texts = self.text_lines(ctx);
        let spare = total_lines.saturating_sub(texts.len());
        let (above, below) = match self.model.vertical {
            VerticalJustify::Top => (0, spare),
            VerticalJustify::Center => (spare / 2, spare - spare / 2),
            VerticalJustify::Bottom => (spare, 0),
        };

        let mut lines = Vec::with_capacity(texts.len() + spare);
        lines.extend(std::iter::repeat_with(Line::blank_row).take(above));
        for text in &texts {
            lines.push(justify(text, width, self.model.horizontal));
        }
        lines.extend(std::iter::repeat_with(Line::blank_row).take(below));

        self.widest = widest(&lines);
        self.lines = lines;
    }

    pub fn load_settings(&mut self, settings: &SpatialSettings) {
        self.model.vertical = settings.connecting.vertical;
        self.model.horizontal = settings.connecting.horizontal;
        self.model.translation = settings.connecting.translation;
    }

    pub fn save_settings(&self, settings: &mut SpatialSettings) {
        settings.connecting.vertical = self.model.vertical;
        settings.connecting.horizontal = self.model.horizontal;
        settings.connecting.translation = self.model.translation;
    }
}

fn justify(text: &str, width: usize, horizontal: HorizontalJustify) -> Line {
    let mut line = Line::new();
    if horizontal == HorizontalJustify::Trim {
        line.push_text(text.trim());
        return line;
    }

    let spare = width.saturating_sub(cell_width(text));
    let (left, right) = match horizontal {
        HorizontalJustify::Left => (0, spare),
        HorizontalJustify::Center => (spare / 2, spare - spare / 2),
        HorizontalJustify::Right => (spare, 0),
        HorizontalJustify::Trim => (0, 0),
    };
    line.push_whitespace(left);
    line.push_text(text);
    line.push_whitespace(right);
    line
}
