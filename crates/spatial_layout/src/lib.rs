//! Spatial Layout - braille layout engines for spatial math
//!
//! This crate turns structured math input into braille-ready lines:
//! - Number lines with ticks, segments, points and labels
//! - Matrices in skinny, indent and block-blank layouts
//! - Connecting text justified inside a page cell
//! - Grids composing any mix of containers into one page, with passages
//! - Versioned persistence of pages and upgrade of legacy records

pub mod connecting;
pub mod container;
pub mod context;
pub mod error;
pub mod grid;
pub mod matrix;
pub mod number_line;
pub mod passage;
pub mod persist;
pub mod template;

pub use connecting::{ConnectingContainer, ConnectingModel};
pub use container::{Container, SpatialContainer};
pub use context::FormatContext;
pub use error::*;
pub use grid::Grid;
pub use matrix::{Matrix, MatrixCell, MatrixModel};
pub use number_line::{
    align_columns, AlignedColumns, CircleFill, ColumnText, IntervalType, LineSegment, NumberLine,
    NumberLineMode, NumberLineModel, NumberLineOption, SectionMode, SegmentPoint, MAX_INTERVALS,
};
pub use persist::{upgrade_record, ContainerRecord, GridRecord, PageRecord, CURRENT_VERSION};
pub use template::{Template, TemplateModel};
