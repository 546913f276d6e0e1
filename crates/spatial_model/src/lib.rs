//! Spatial Model - building blocks for braille spatial math layout
//!
//! This crate holds everything the layout engines share:
//! - Exact fractions and the typed numeric text transcribers enter
//! - Segment lines, the unit of output of every engine
//! - Nemeth and UEB glyph tables
//! - Page configuration and persisted user preferences
//! - The braille translation boundary

pub mod config;
pub mod error;
pub mod fraction;
pub mod glyphs;
pub mod rational;
pub mod segment;
pub mod translator;

pub use config::{
    ArrowStyle, ConnectingSettings, GridSettings, HorizontalJustify, LabelPosition, LayoutConfig,
    MatrixSettings, NumberLineSettings, SettingsManager, SpatialSettings, VerticalJustify,
    WideStrategy, DEFAULT_CELLS_PER_LINE,
};
pub use error::*;
pub use fraction::{Fraction, MAX_DECIMAL_DIGITS};
pub use glyphs::{BracketType, GlyphTable, PassageMode, ScriptMode};
pub use rational::{NumberKind, RationalComponent};
pub use segment::{cell_width, count_blank_rows, render_lines, widest, Line, Segment};
pub use translator::{PassThrough, TranslationMode, Translator};
