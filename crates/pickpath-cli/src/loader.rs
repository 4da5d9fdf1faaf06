use anyhow::{bail, Context, Result};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use pickpath_core::{AnalysisError, LayoutRow, PickRow};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// A header row plus every non-blank data row, keyed by header
#[derive(Debug, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl Table {
    fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    fn require(&self, columns: &[&str]) -> pickpath_core::Result<()> {
        let missing: Vec<&str> = columns
            .iter()
            .copied()
            .filter(|c| !self.has_column(c))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::MissingColumn(missing.join(", ")))
        }
    }
}

/// Reads a CSV or Excel table, picking the parser from the file extension.
pub fn read_table(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let table = match ext.as_str() {
        "csv" => read_csv(path),
        "xlsx" | "xlsm" => read_xlsx(path),
        _ => bail!("Unsupported table format '{}' for {}", ext, path.display()),
    }
    .with_context(|| format!("Failed to read {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        columns = ?table.headers,
        rows = table.rows.len(),
        "Loaded table"
    );

    Ok(table)
}

fn read_csv(path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(record.iter().map(|v| v.trim().to_string()))
            .collect();
        if row.values().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

fn read_xlsx(path: &Path) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("Workbook has no sheets")?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header) => header
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect(),
        None => return Ok(Table::default()),
    };

    let mut rows = Vec::new();
    for data in rows_iter {
        let row: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(data.iter().map(|cell| cell.to_string().trim().to_string()))
            .collect();
        if row.values().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

/// Reads a YAML or JSON document, chosen by extension.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );

    let document = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(document)
}

fn text(row: &HashMap<String, String>, column: &str) -> String {
    row.get(column).cloned().unwrap_or_default()
}

fn optional_text(row: &HashMap<String, String>, column: &str) -> Option<String> {
    row.get(column).filter(|v| !v.is_empty()).cloned()
}

fn number(row: &HashMap<String, String>, column: &str, line: usize) -> pickpath_core::Result<f64> {
    let raw = text(row, column);
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(AnalysisError::InvalidValue {
            column: column.to_string(),
            row: line,
            value: raw,
        })
}

fn integer(row: &HashMap<String, String>, column: &str, line: usize) -> pickpath_core::Result<i64> {
    let raw = text(row, column);
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    // spreadsheets hand integers back as "12.0"
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        _ => Err(AnalysisError::InvalidValue {
            column: column.to_string(),
            row: line,
            value: raw,
        }),
    }
}

pub const LAYOUT_COLUMNS: [&str; 5] = ["Current_Prime_Item", "Slot_ID", "Pick_Seq", "X", "Y"];
pub const PICK_COLUMNS: [&str; 5] = ["Trip", "Trip_Category", "Item", "Whse_Area", "Trip_Type"];

/// Converts a layout table into typed rows. Row numbers in errors are 1-based data rows.
pub fn layout_rows(table: &Table) -> pickpath_core::Result<Vec<LayoutRow>> {
    table.require(&LAYOUT_COLUMNS)?;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let line = i + 1;
            Ok(LayoutRow {
                item: text(row, "Current_Prime_Item"),
                slot_id: text(row, "Slot_ID"),
                pick_seq: integer(row, "Pick_Seq", line)?,
                x: number(row, "X", line)?,
                y: number(row, "Y", line)?,
            })
        })
        .collect()
}

/// Converts a pick table into typed rows. `Pick_Slot` is optional.
pub fn pick_rows(table: &Table) -> pickpath_core::Result<Vec<PickRow>> {
    table.require(&PICK_COLUMNS)?;

    Ok(table
        .rows
        .iter()
        .map(|row| PickRow {
            trip: text(row, "Trip"),
            trip_category: optional_text(row, "Trip_Category"),
            item: text(row, "Item"),
            whse_area: text(row, "Whse_Area"),
            trip_type: text(row, "Trip_Type"),
            pick_slot: optional_text(row, "Pick_Slot"),
        })
        .collect())
}
