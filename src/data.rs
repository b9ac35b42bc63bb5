//! CSV parsing for scatter data.
//!
//! The header row must name `x`, `y` and `z` columns (any order). Other columns
//! are ignored. Every value must parse to a finite number; the first offending
//! cell is reported with its 1-based data row.

use std::io::Read;
use std::path::Path;

use error_stack::{Report, ResultExt};

use crate::core::{Axis, DataPoint};
use crate::error::GraphError;

/// Column positions of x/y/z in a header record
#[derive(Clone, Copy, Debug)]
struct Columns([usize; 3]);

impl Columns {
    fn locate(headers: &csv::StringRecord) -> crate::Result<Self> {
        let mut idx = [0usize; 3];
        for (slot, axis) in idx.iter_mut().zip(Axis::ALL) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == axis.column())
                .ok_or_else(|| Report::new(GraphError::MissingColumn(axis.column())))?;
        }
        Ok(Self(idx))
    }

    fn read(&self, record: &csv::StringRecord, row: usize) -> crate::Result<DataPoint> {
        let [x, y, z] = [Axis::X, Axis::Y, Axis::Z].map(|axis| {
            let raw = record.get(self.0[axis as usize]).unwrap_or("");
            parse_cell(raw, row, axis)
        });
        Ok(DataPoint::new(x?, y?, z?))
    }
}

fn parse_cell(raw: &str, row: usize, axis: Axis) -> crate::Result<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Report::new(GraphError::DataParse {
            row,
            column: axis.column(),
            value: raw.to_string(),
        })),
    }
}

/// Read every row of `reader` as a data point, in file order
pub fn read_points<R: Read>(reader: R) -> crate::Result<Vec<DataPoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(GraphError::from)?.clone();
    let columns = Columns::locate(&headers)?;

    let mut points = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(GraphError::from)?;
        points.push(columns.read(&record, i + 1)?);
    }

    tracing::debug!(rows = points.len(), "parsed scatter data");
    Ok(points)
}

/// Parse an in-memory CSV document
pub fn parse_points(bytes: &[u8]) -> crate::Result<Vec<DataPoint>> {
    read_points(bytes)
}

/// Read a CSV file from disk
pub fn load_points(path: impl AsRef<Path>) -> crate::Result<Vec<DataPoint>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        Report::new(GraphError::ResourceLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    })?;
    read_points(std::io::BufReader::new(file)).change_context(GraphError::ResourceLoad {
        path: path.display().to_string(),
        reason: "invalid scatter data".to_string(),
    })
}
