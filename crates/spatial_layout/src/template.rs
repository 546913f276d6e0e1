//! Template containers - pre-laid-out arithmetic templates
//!
//! The template editor lives outside this crate. A template reaches the
//! compositor as an identifier glyph and the rows it already produced.

use crate::context::FormatContext;
use serde::{Deserialize, Serialize};
use spatial_model::{widest, Line, TranslationMode};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateModel {
    /// Glyph announcing the template; a non-empty identifier widens the
    /// gap before the template on a composed page
    pub identifier: String,
    pub rows: Vec<String>,
    pub translation: TranslationMode,
}

#[derive(Debug, Clone, Default)]
pub struct Template {
    pub model: TemplateModel,
    lines: Vec<Line>,
    widest: usize,
}

impl Template {
    pub fn from_model(model: TemplateModel) -> Self {
        Self {
            model,
            lines: Vec::new(),
            widest: 0,
        }
    }

    pub fn has_identifier(&self) -> bool {
        !self.model.identifier.is_empty()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn widest_line(&self) -> usize {
        self.widest
    }

    pub fn is_blank(&self) -> bool {
        self.model.rows.iter().all(|row| row.trim().is_empty())
    }

    pub fn format(&mut self, ctx: &FormatContext<'_>) {
        let lines: Vec<Line> = self
            .model
            .rows
            .iter()
            .map(|row| Line::from_text(ctx.translate(self.model.translation, row)))
            .collect();
        self.widest = widest(&lines);
        self.lines = lines;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spatial_model::{LayoutConfig, PassThrough};

    #[test]
    fn test_template_rows() {
        let config = LayoutConfig::default();
        let ctx = FormatContext::new(&config, &PassThrough);
        let mut template = Template::from_model(TemplateModel {
            identifier: "_=".into(),
            rows: vec!["  12".into(), "+345".into()],
            ..Default::default()
        });
        template.format(&ctx);
        assert!(template.has_identifier());
        assert_eq!(template.lines().len(), 2);
        assert_eq!(template.widest_line(), 4);
        assert!(!template.is_blank());
    }
}
