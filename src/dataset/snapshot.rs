//! Parquet snapshot files
//!
//! Reading maps Arrow columns onto [`CellValue`] variants; writing stores
//! every column as nullable UTF-8 text.

use super::{CellValue, Dataset, Row};
use arrow_array::cast::AsArray;
use arrow_array::types::{Float64Type, TimestampMicrosecondType};
use arrow_array::{Array, ArrayRef, RecordBatch, StringArray};
use arrow_schema::{ArrowError, DataType, Field, Schema, TimeUnit};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl SnapshotError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SnapshotError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Reads a whole snapshot into memory.
pub fn read_snapshot(path: &Path) -> Result<Dataset, SnapshotError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows: Vec<Row> = Vec::new();
    for batch in reader {
        let batch = batch?;
        let mut cells = batch
            .columns()
            .iter()
            .map(|array| column_values(array).map(Vec::into_iter))
            .collect::<Result<Vec<_>, _>>()?;
        for _ in 0..batch.num_rows() {
            rows.push(
                cells
                    .iter_mut()
                    .map(|column| column.next().unwrap_or_default())
                    .collect(),
            );
        }
    }

    Ok(Dataset::from_rows(columns, rows))
}

/// Writes `dataset` as a text-only snapshot, replacing any existing file.
pub fn write_snapshot(path: &Path, dataset: &Dataset) -> Result<(), SnapshotError> {
    let fields: Vec<Field> = dataset
        .columns()
        .iter()
        .map(|column| Field::new(column, DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let arrays: Vec<ArrayRef> = (0..dataset.columns().len())
        .map(|index| {
            let values = dataset.rows().iter().map(|row| row[index].as_text());
            Arc::new(StringArray::from_iter(values)) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn column_values(array: &ArrayRef) -> Result<Vec<CellValue>, ArrowError> {
    let data_type = array.data_type();
    let values = match data_type {
        DataType::Null => vec![CellValue::Null; array.len()],
        DataType::Utf8 => array
            .as_string::<i32>()
            .iter()
            .map(|value| value.map(CellValue::from).unwrap_or_default())
            .collect(),
        DataType::LargeUtf8 => array
            .as_string::<i64>()
            .iter()
            .map(|value| value.map(CellValue::from).unwrap_or_default())
            .collect(),
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            let cast = arrow_cast::cast(array, &DataType::Timestamp(TimeUnit::Microsecond, None))?;
            let timestamps = cast.as_primitive::<TimestampMicrosecondType>();
            (0..timestamps.len())
                .map(|i| {
                    if timestamps.is_null(i) {
                        CellValue::Null
                    } else {
                        timestamps
                            .value_as_datetime(i)
                            .map(CellValue::Date)
                            .unwrap_or_default()
                    }
                })
                .collect()
        }
        t if t.is_numeric() => {
            let cast = arrow_cast::cast(array, &DataType::Float64)?;
            cast.as_primitive::<Float64Type>()
                .iter()
                .map(|value| value.map(CellValue::Number).unwrap_or_default())
                .collect()
        }
        _ => {
            let cast = arrow_cast::cast(array, &DataType::Utf8)?;
            cast.as_string::<i32>()
                .iter()
                .map(|value| value.map(CellValue::from).unwrap_or_default())
                .collect()
        }
    };
    Ok(values)
}
