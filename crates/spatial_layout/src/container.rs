//! Container abstraction shared by every spatial layout kind
//!
//! The grid compositor only talks to containers through
//! [`SpatialContainer`]. The one place it needs to know the concrete kind
//! (the wider gap before a template) matches on [`Container`] directly.

use crate::connecting::ConnectingContainer;
use crate::context::FormatContext;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::number_line::NumberLine;
use crate::persist::ContainerRecord;
use crate::template::Template;
use spatial_model::{Line, SpatialSettings};

/// Operations every container supports
pub trait SpatialContainer {
    /// Rebuild `lines` from the current model
    fn format(&mut self, ctx: &FormatContext<'_>) -> Result<()>;

    fn lines(&self) -> &[Line];

    fn widest_line(&self) -> usize;

    /// True when the container has nothing to draw
    fn is_blank(&self) -> bool;

    fn load_settings(&mut self, settings: &SpatialSettings);

    fn save_settings(&self, settings: &mut SpatialSettings);

    fn to_record(&self) -> ContainerRecord;
}

/// Any container that can sit in a grid cell
#[derive(Debug, Clone)]
pub enum Container {
    NumberLine(NumberLine),
    Matrix(Matrix),
    Connecting(ConnectingContainer),
    Template(Template),
}

impl Default for Container {
    fn default() -> Self {
        Container::Connecting(ConnectingContainer::default())
    }
}

impl Container {
    pub fn from_record(record: ContainerRecord) -> Self {
        match record {
            ContainerRecord::NumberLine(model) => {
                Container::NumberLine(NumberLine::from_model(model))
            }
            ContainerRecord::Matrix(model) => Container::Matrix(Matrix::from_model(model)),
            ContainerRecord::Connecting(model) => {
                Container::Connecting(ConnectingContainer::from_model(model))
            }
            ContainerRecord::Template(model) => Container::Template(Template::from_model(model)),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Container::NumberLine(_) => "numberLine",
            Container::Matrix(_) => "matrix",
            Container::Connecting(_) => "connecting",
            Container::Template(_) => "template",
        }
    }
}

impl SpatialContainer for NumberLine {
    fn format(&mut self, ctx: &FormatContext<'_>) -> Result<()> {
        NumberLine::format(self, ctx)
    }

    fn lines(&self) -> &[Line] {
        NumberLine::lines(self)
    }

    fn widest_line(&self) -> usize {
        NumberLine::widest_line(self)
    }

    fn is_blank(&self) -> bool {
        NumberLine::lines(self).is_empty()
    }

    fn load_settings(&mut self, settings: &SpatialSettings) {
        NumberLine::load_settings(self, settings);
    }

    fn save_settings(&self, settings: &mut SpatialSettings) {
        NumberLine::save_settings(self, settings);
    }

    fn to_record(&self) -> ContainerRecord {
        ContainerRecord::NumberLine(self.model.clone())
    }
}

impl SpatialContainer for Matrix {
    fn format(&mut self, ctx: &FormatContext<'_>) -> Result<()> {
        Matrix::format(self, ctx)
    }

    fn lines(&self) -> &[Line] {
        Matrix::lines(self)
    }

    fn widest_line(&self) -> usize {
        Matrix::widest_line(self)
    }

    fn is_blank(&self) -> bool {
        Matrix::lines(self).is_empty()
    }

    fn load_settings(&mut self, settings: &SpatialSettings) {
        Matrix::load_settings(self, settings);
    }

    fn save_settings(&self, settings: &mut SpatialSettings) {
        Matrix::save_settings(self, settings);
    }

    fn to_record(&self) -> ContainerRecord {
        ContainerRecord::Matrix(self.model.clone())
    }
}

impl SpatialContainer for ConnectingContainer {
    fn format(&mut self, ctx: &FormatContext<'_>) -> Result<()> {
        ConnectingContainer::format(self, ctx);
        Ok(())
    }

    fn lines(&self) -> &[Line] {
        ConnectingContainer::lines(self)
    }

    fn widest_line(&self) -> usize {
        ConnectingContainer::widest_line(self)
    }

    fn is_blank(&self) -> bool {
        ConnectingContainer::is_blank(self)
    }

    fn load_settings(&mut self, settings: &SpatialSettings) {
        ConnectingContainer::load_settings(self, settings);
    }

    fn save_settings(&self, settings: &mut SpatialSettings) {
        ConnectingContainer::save_settings(self, settings);
    }

    fn to_record(&self) -> ContainerRecord {
        ContainerRecord::Connecting(self.model.clone())
    }
}

impl SpatialContainer for Template {
    fn format(&mut self, ctx: &FormatContext<'_>) -> Result<()> {
        Template::format(self, ctx);
        Ok(())
    }

    fn lines(&self) -> &[Line] {
        Template::lines(self)
    }

    fn widest_line(&self) -> usize {
        Template::widest_line(self)
    }

    fn is_blank(&self) -> bool {
        Template::is_blank(self)
    }

    // Templates keep their own preferences in the template editor
    fn load_settings(&mut self, _settings: &SpatialSettings) {}

    fn save_settings(&self, _settings: &mut SpatialSettings) {}

    fn to_record(&self) -> ContainerRecord {
        ContainerRecord::Template(self.model.clone())
    }
}

impl Container {
    fn inner(&self) -> &dyn SpatialContainer {
        match self {
            Container::NumberLine(c) => c,
            Container::Matrix(c) => c,
            Container::Connecting(c) => c,
            Container::Template(c) => c,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SpatialContainer {
        match self {
            Container::NumberLine(c) => c,
            Container::Matrix(c) => c,
            Container::Connecting(c) => c,
            Container::Template(c) => c,
        }
    }
}

impl SpatialContainer for Container {
    fn format(&mut self, ctx: &FormatContext<'_>) -> Result<()> {
        self.inner_mut().format(ctx)
    }

    fn lines(&self) -> &[Line] {
        self.inner().lines()
    }

    fn widest_line(&self) -> usize {
        self.inner().widest_line()
    }

    fn is_blank(&self) -> bool {
        self.inner().is_blank()
    }

    fn load_settings(&mut self, settings: &SpatialSettings) {
        self.inner_mut().load_settings(settings);
    }

    fn save_settings(&self, settings: &mut SpatialSettings) {
        self.inner().save_settings(settings);
    }

    fn to_record(&self) -> ContainerRecord {
        self.inner().to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixModel;
    use spatial_model::{LayoutConfig, PassThrough, WideStrategy};

    #[test]
    fn test_default_is_blank_connecting() {
        let container = Container::default();
        assert_eq!(container.kind_name(), "connecting");
        assert!(container.is_blank());
    }

    #[test]
    fn test_dispatch_format_and_lines() {
        let config = LayoutConfig::default();
        let ctx = FormatContext::new(&config, &PassThrough);
        let mut container = Container::Matrix(Matrix::new(1, 2).with_texts(&["1", "2"]));
        container.format(&ctx).unwrap();
        assert_eq!(container.lines().len(), 1);
        assert_eq!(container.widest_line(), 7);
        assert!(!container.is_blank());
    }

    #[test]
    fn test_record_round_trip() {
        let model = MatrixModel {
            wide_strategy: WideStrategy::IndentColumn,
            ..Default::default()
        };
        let container = Container::from_record(ContainerRecord::Matrix(model.clone()));
        assert_eq!(container.to_record(), ContainerRecord::Matrix(model));
    }

    #[test]
    fn test_settings_through_container() {
        let mut settings = SpatialSettings::default();
        settings.matrix.wide_strategy = WideStrategy::IndentColumn;
        let mut container = Container::Matrix(Matrix::new(1, 1));
        container.load_settings(&settings);
        match &container {
            Container::Matrix(m) => assert_eq!(m.model.wide_strategy, WideStrategy::IndentColumn),
            other => panic!("unexpected {}", other.kind_name()),
        }
    }
}
