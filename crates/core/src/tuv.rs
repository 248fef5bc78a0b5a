//! Parsing and series statistics for HF-radar TUV measurement files.
//!
//! A TUV file is line-oriented text: `%Key: value` header lines describing
//! the acquisition, followed by a whitespace-separated data table that starts
//! after the `%TableStart:` marker. Only what the asset record needs is
//! extracted here; interpretation of individual variables is left to callers.

use std::collections::BTreeMap;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Row prefix that opens the data table.
pub const TABLE_START_MARKER: &str = "%TableStart:";

/// Rows directly after the marker holding column names and units.
pub const TABLE_HEADER_ROWS: usize = 2;

/// Trailing rows after the data table (table end marker and file footer).
pub const TABLE_FOOTER_ROWS: usize = 8;

/// Header variable that is never copied into the common variables.
pub const SKIPPED_VARIABLE: &str = "SiteSource";

/// Data table columns, in file order.
pub const COLUMN_NAMES: [&str; 20] = [
    "Longitude",
    "Latitude",
    "UComp",
    "VComp",
    "VectorFlag",
    "UStdDev",
    "VStdDev",
    "Covariance",
    "XDistance",
    "YDistance",
    "Range",
    "Bearing",
    "Velocity",
    "Direction",
    "SiteContributers1",
    "SiteContributers2",
    "SiteContributers3",
    "SiteContributers4",
    "SiteContributers5",
    "SiteContributers6",
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Summary statistics of one data column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub standard_deviation: f64,
}

impl SeriesStats {
    /// Compute statistics over `values`. Returns `None` for an empty series.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;

        Some(Self {
            mean,
            min,
            max,
            standard_deviation: variance.sqrt(),
        })
    }
}

/// One named column of the data table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// The parsed content of a TUV file.
#[derive(Debug, Clone, PartialEq)]
pub struct TuvFile {
    /// Header variables keyed by name (leading `%` stripped).
    pub common_variables: BTreeMap<String, String>,
    /// Data columns in [`COLUMN_NAMES`] order.
    pub columns: Vec<Column>,
    /// Number of data rows in the table.
    pub row_count: usize,
}

impl TuvFile {
    /// Parse the text content of a TUV file.
    pub fn parse(contents: &str) -> Result<Self, CoreError> {
        let rows: Vec<&str> = contents.split('\n').map(str::trim).collect();

        let common_variables = parse_common_variables(&rows);

        let start = rows
            .iter()
            .position(|row| row.starts_with(TABLE_START_MARKER))
            .ok_or_else(|| {
                CoreError::Validation(format!("TUV file has no {TABLE_START_MARKER} row"))
            })?;
        let table = &rows[start + 1..];
        let data_rows = if table.len() > TABLE_HEADER_ROWS + TABLE_FOOTER_ROWS {
            &table[TABLE_HEADER_ROWS..table.len() - TABLE_FOOTER_ROWS]
        } else {
            &[][..]
        };

        let mut columns: Vec<Column> = COLUMN_NAMES
            .iter()
            .map(|&name| Column {
                name,
                values: Vec::with_capacity(data_rows.len()),
            })
            .collect();

        for (offset, row) in data_rows.iter().enumerate() {
            // Line number in the file, 1-based.
            let line = start + 1 + TABLE_HEADER_ROWS + offset + 1;
            let values: Vec<&str> = row.split_whitespace().collect();
            if values.len() < COLUMN_NAMES.len() {
                return Err(CoreError::Validation(format!(
                    "TUV line {line} has {} values, expected {}",
                    values.len(),
                    COLUMN_NAMES.len()
                )));
            }
            for (column, raw) in columns.iter_mut().zip(values) {
                let value = raw.parse::<f64>().map_err(|_| {
                    CoreError::Validation(format!(
                        "TUV line {line} has non-numeric {} value '{raw}'",
                        column.name
                    ))
                })?;
                column.values.push(value);
            }
        }

        Ok(Self {
            common_variables,
            columns,
            row_count: data_rows.len(),
        })
    }

    /// Look up a header variable by name.
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.common_variables.get(key).map(String::as_str)
    }

    /// Values of the named column, if it is a known column.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Per-column statistics keyed by column name. Empty when the table has
    /// no data rows.
    pub fn statistics(&self) -> BTreeMap<&'static str, SeriesStats> {
        self.columns
            .iter()
            .filter_map(|c| SeriesStats::from_values(&c.values).map(|s| (c.name, s)))
            .collect()
    }
}

fn parse_common_variables(rows: &[&str]) -> BTreeMap<String, String> {
    let mut variables = BTreeMap::new();
    for row in rows {
        let Some((key, value)) = row.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let key = key.strip_prefix('%').unwrap_or(key);
        if key == SKIPPED_VARIABLE {
            continue;
        }
        variables.insert(key.to_string(), value.trim().to_string());
    }
    variables
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
