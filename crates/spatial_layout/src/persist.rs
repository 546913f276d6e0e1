//! Persisted pages
//!
//! A page is stored as a versioned [`PageRecord`] wrapping a grid of
//! tagged container records. Records written before versioning was
//! introduced are flat attribute maps; [`upgrade_record`] migrates them.

use crate::connecting::ConnectingModel;
use crate::error::{PersistError, PersistResult};
use crate::matrix::{MatrixCell, MatrixModel};
use crate::number_line::{NumberLineModel, SectionMode};
use crate::template::TemplateModel;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use spatial_model::{BracketType, PassageMode, RationalComponent};

/// Version written by this build
pub const CURRENT_VERSION: u64 = 1;

/// One container in a persisted page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContainerRecord {
    NumberLine(NumberLineModel),
    Matrix(MatrixModel),
    Connecting(ConnectingModel),
    Template(TemplateModel),
}

/// A persisted grid of containers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRecord {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub passage: PassageMode,
    /// Containers by row, then column
    pub cells: Vec<Vec<ContainerRecord>>,
}

impl GridRecord {
    pub fn single(record: ContainerRecord) -> Self {
        Self {
            rows: 1,
            cols: 1,
            passage: PassageMode::None,
            cells: vec![vec![record]],
        }
    }
}

/// Top-level persisted page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub version: u64,
    pub grid: GridRecord,
}

impl PageRecord {
    pub fn new(grid: GridRecord) -> Self {
        Self {
            version: CURRENT_VERSION,
            grid,
        }
    }

    pub fn to_json(&self) -> PersistResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a page, upgrading legacy records on the way
    pub fn from_json(text: &str) -> PersistResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        upgrade_record(value)
    }
}

/// Bring any persisted page up to [`CURRENT_VERSION`].
///
/// Versioned records newer than this build are rejected. Unversioned
/// records are legacy attribute maps keyed by `kind`: `numberLine`,
/// `matrix`, `connecting` or `grid` (whose `cells` hold legacy maps in
/// row-major order).
pub fn upgrade_record(value: Value) -> PersistResult<PageRecord> {
    match value.get("version") {
        Some(version) => {
            let version = version
                .as_u64()
                .ok_or_else(|| PersistError::InvalidLegacy(format!("bad version {version}")))?;
            if version > CURRENT_VERSION {
                return Err(PersistError::UnsupportedVersion(version));
            }
            Ok(serde_json::from_value(value)?)
        }
        None => {
            let map = as_map(&value)?;
            let grid = match attr(map, "kind").as_str() {
                "grid" => legacy_grid(map)?,
                _ => GridRecord::single(legacy_container(map)?),
            };
            tracing::debug!("upgraded legacy record to a {}x{} grid", grid.rows, grid.cols);
            Ok(PageRecord::new(grid))
        }
    }
}

fn as_map(value: &Value) -> PersistResult<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| PersistError::InvalidLegacy("expected an attribute map".to_string()))
}

/// Attribute as text; legacy writers stored numbers either way
fn attr(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn attr_count(map: &Map<String, Value>, key: &str) -> PersistResult<usize> {
    let text = attr(map, key);
    text.trim()
        .parse()
        .map_err(|_| PersistError::InvalidLegacy(format!("{key} is not a count: {text:?}")))
}

fn legacy_grid(map: &Map<String, Value>) -> PersistResult<GridRecord> {
    let rows = attr_count(map, "rows")?;
    let cols = attr_count(map, "cols")?;
    let passage = match attr(map, "passage").as_str() {
        "" => PassageMode::None,
        name => serde_json::from_value(Value::String(name.to_string()))
            .map_err(|_| PersistError::InvalidLegacy(format!("unknown passage {name:?}")))?,
    };
    let flat = map
        .get("cells")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut cells = Vec::with_capacity(rows);
    for i in 0..rows {
        let mut row = Vec::with_capacity(cols);
        for j in 0..cols {
            let record = match flat.get(i * cols + j) {
                Some(value) => legacy_container(as_map(value)?)?,
                None => ContainerRecord::Connecting(ConnectingModel::default()),
            };
            row.push(record);
        }
        cells.push(row);
    }
    Ok(GridRecord {
        rows,
        cols,
        passage,
        cells,
    })
}

fn legacy_container(map: &Map<String, Value>) -> PersistResult<ContainerRecord> {
    match attr(map, "kind").as_str() {
        "numberLine" => legacy_number_line(map).map(ContainerRecord::NumberLine),
        "matrix" => legacy_matrix(map).map(ContainerRecord::Matrix),
        "connecting" => Ok(ContainerRecord::Connecting(ConnectingModel {
            text: attr(map, "text"),
            ..Default::default()
        })),
        "" => Err(PersistError::InvalidLegacy("missing kind".to_string())),
        other => Err(PersistError::InvalidLegacy(format!("unknown kind {other:?}"))),
    }
}

fn legacy_number_line(map: &Map<String, Value>) -> PersistResult<NumberLineModel> {
    let mut model = NumberLineModel {
        interval: RationalComponent::parse(&attr(map, "interval"))?,
        line_start: RationalComponent::parse(&attr(map, "lineStart"))?,
        line_end: RationalComponent::parse(&attr(map, "lineEnd"))?,
        ..Default::default()
    };
    model.segment.start = RationalComponent::parse(&attr(map, "segmentStart"))?;
    model.segment.end = RationalComponent::parse(&attr(map, "segmentEnd"))?;
    if !model.interval.is_empty() {
        model.number_kind = model.interval.kind;
    }
    if model.segment.is_active() {
        model.section = SectionMode::Segment;
    }
    Ok(model)
}

fn legacy_matrix(map: &Map<String, Value>) -> PersistResult<MatrixModel> {
    let bracket = match attr(map, "bracket").as_str() {
        "" => BracketType::default(),
        name => serde_json::from_value(Value::String(name.to_string()))
            .map_err(|_| PersistError::InvalidLegacy(format!("unknown bracket {name:?}")))?,
    };
    let mut model = MatrixModel {
        rows: attr_count(map, "rows")?,
        cols: attr_count(map, "cols")?,
        cells: Vec::new(),
        bracket,
        ..Default::default()
    };

    let texts: Vec<String> = map
        .get("cells")
        .and_then(Value::as_array)
        .map(|cells| {
            cells
                .iter()
                .map(|cell| cell.as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default();
    let cols = model.cols.max(1);
    model.cells = texts
        .chunks(cols)
        .map(|row| row.iter().map(MatrixCell::new).collect())
        .collect();
    model.build_model();
    Ok(model)
}
