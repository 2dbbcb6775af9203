//! CSV reading and writing.
//!
//! Dataset ingestion sits outside the pipeline core: it only has to
//! deliver an ordered, typed, row-aligned frame. Column types are
//! inferred from the cell contents; empty cells and the literal `NA`
//! read as missing.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Writer};
use log::debug;

use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::series::Series;
use crate::value::{DataType, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read a CSV file into a frame. Without a header row, columns are named
/// `column_0`, `column_1`, ….
pub fn read_csv<P: AsRef<Path>>(path: P, has_header: bool) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;
    let mut reader = ReaderBuilder::new()
        .has_headers(has_header)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records: Vec<csv::StringRecord> = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }

    let headers: Vec<String> = if has_header {
        reader.headers()?.iter().map(|h| h.to_string()).collect()
    } else {
        let width = records.first().map_or(0, |r| r.len());
        (0..width).map(|i| format!("column_{}", i)).collect()
    };

    let mut df = DataFrame::new();
    for (col_index, name) in headers.iter().enumerate() {
        let cells: Vec<&str> = records
            .iter()
            .map(|r| r.get(col_index).unwrap_or(""))
            .collect();
        let dtype = infer_dtype(&cells);
        let values = cells.iter().map(|cell| parse_cell(cell, dtype)).collect();
        df.add_column(name.clone(), Series::new(values, dtype)?)?;
    }
    debug!(
        "read {} rows x {} columns from {}",
        df.nrows(),
        df.ncols(),
        path.as_ref().display()
    );
    Ok(df)
}

/// Write a frame to a CSV file with a header row. Missing values write as
/// empty cells.
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let mut writer = Writer::from_path(path.as_ref())?;
    writer.write_record(df.column_names())?;
    for row in 0..df.nrows() {
        let cells: Vec<String> = df
            .columns()
            .iter()
            .map(|series| match &series.values()[row] {
                Value::Na => String::new(),
                value => value.to_string(),
            })
            .collect();
        writer.write_record(&cells)?;
    }
    writer.flush()?;
    debug!(
        "wrote {} rows x {} columns to {}",
        df.nrows(),
        df.ncols(),
        path.as_ref().display()
    );
    Ok(())
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || cell == "NA"
}

/// Narrowest type every non-missing cell parses as, falling back to
/// strings.
fn infer_dtype(cells: &[&str]) -> DataType {
    let present: Vec<&str> = cells.iter().copied().filter(|c| !is_missing(c)).collect();
    if present.is_empty() {
        return DataType::Str;
    }
    if present.iter().all(|c| c.parse::<i64>().is_ok()) {
        return DataType::Int64;
    }
    if present.iter().all(|c| c.parse::<f64>().is_ok()) {
        return DataType::Float64;
    }
    if present.iter().all(|c| *c == "true" || *c == "false") {
        return DataType::Bool;
    }
    if present
        .iter()
        .all(|c| NaiveDate::parse_from_str(c, DATE_FORMAT).is_ok())
    {
        return DataType::Date;
    }
    DataType::Str
}

fn parse_cell(cell: &str, dtype: DataType) -> Value {
    if is_missing(cell) {
        return Value::Na;
    }
    match dtype {
        DataType::Int64 => cell.parse::<i64>().map(Value::Int64).unwrap_or(Value::Na),
        DataType::Float64 => cell
            .parse::<f64>()
            .map(Value::Float64)
            .unwrap_or(Value::Na),
        DataType::Bool => match cell {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Na,
        },
        DataType::Date => NaiveDate::parse_from_str(cell, DATE_FORMAT)
            .map(Value::Date)
            .unwrap_or(Value::Na),
        DataType::Str => Value::Str(cell.to_string()),
    }
}
