use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchRecord, LaunchTable, OutcomeClass};

/// Source column names, shared by every format.
pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";

const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_BOOSTER_CATEGORY,
    COL_CLASS,
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; the four launch columns, extra columns ignored
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – the same four columns
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            parse_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    if table.is_empty() {
        log::warn!("{} contains no launch records", path.display());
    }
    log::info!(
        "Loaded {} launches from {} (sites {:?}, payload bounds {:?})",
        table.len(),
        path.display(),
        table.sites(),
        table.payload_bounds()
    );
    Ok(table)
}

fn finish(records: Vec<LaunchRecord>) -> Result<LaunchTable> {
    for (row, record) in records.iter().enumerate() {
        record
            .validate()
            .with_context(|| format!("Row {row}: invalid launch record"))?;
    }
    Ok(LaunchTable::new(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV stream. Columns are matched by header name so the pandas
/// index column and any extra mission columns are skipped.
pub fn read_csv<R: Read>(source: R) -> Result<LaunchTable> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<LaunchRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    finish(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0", "class": 0, "Flight Number": 2 },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<LaunchTable> {
    let records: Vec<LaunchRecord> =
        serde_json::from_str(text).context("parsing JSON launch records")?;
    finish(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the four launch columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`), which differ in integer widths and
/// string offsets.
fn load_parquet(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        records.extend(batch_records(&batch)?);
    }

    finish(records)
}

fn batch_records(batch: &RecordBatch) -> Result<Vec<LaunchRecord>> {
    let sites = string_column(column(batch, COL_LAUNCH_SITE)?, COL_LAUNCH_SITE)?;
    let masses = numeric_column(column(batch, COL_PAYLOAD_MASS)?, COL_PAYLOAD_MASS)?;
    let boosters = string_column(column(batch, COL_BOOSTER_CATEGORY)?, COL_BOOSTER_CATEGORY)?;
    let classes = numeric_column(column(batch, COL_CLASS)?, COL_CLASS)?;

    sites
        .into_iter()
        .zip(masses)
        .zip(boosters)
        .zip(classes)
        .enumerate()
        .map(|(row, (((site, mass), booster), class))| -> Result<LaunchRecord> {
            if class.fract() != 0.0 {
                bail!("Row {row}: class {class} is not an integer");
            }
            let outcome = OutcomeClass::try_from(class as i64)
                .with_context(|| format!("Row {row}: bad '{COL_CLASS}' value"))?;
            Ok(LaunchRecord::new(site, mass, booster, outcome))
        })
        .collect()
}

// -- Arrow helpers --

fn column<'b>(batch: &'b RecordBatch, name: &str) -> Result<&'b ArrayRef> {
    batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

fn downcast<'c, T: 'static>(col: &'c ArrayRef, name: &str) -> Result<&'c T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("column '{name}': unexpected array layout"))
}

fn string_column(col: &ArrayRef, name: &str) -> Result<Vec<String>> {
    if col.null_count() > 0 {
        bail!("column '{name}' contains nulls");
    }
    let values = match col.data_type() {
        DataType::Utf8 => {
            let arr = downcast::<StringArray>(col, name)?;
            (0..arr.len()).map(|i| arr.value(i).to_string()).collect()
        }
        DataType::LargeUtf8 => {
            let arr = downcast::<LargeStringArray>(col, name)?;
            (0..arr.len()).map(|i| arr.value(i).to_string()).collect()
        }
        other => bail!("column '{name}': expected a string column, got {other:?}"),
    };
    Ok(values)
}

fn numeric_column(col: &ArrayRef, name: &str) -> Result<Vec<f64>> {
    if col.null_count() > 0 {
        bail!("column '{name}' contains nulls");
    }
    let values = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col, name)?.values().to_vec(),
        DataType::Float32 => downcast::<Float32Array>(col, name)?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        DataType::Int64 => downcast::<Int64Array>(col, name)?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        DataType::Int32 => downcast::<Int32Array>(col, name)?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        other => bail!("column '{name}': expected a numeric column, got {other:?}"),
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::OutcomeClass::{Failure, Success};

    const SAMPLE_CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
2,3,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT
3,4,KSC LC-39A,1,2490.0,F9 B4 B1040.1,B4
";

    #[test]
    fn reads_csv_ignoring_extra_columns() {
        let table = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.iter().nth(2),
            Some(&LaunchRecord::new("VAFB SLC-4E", 9600.0, "FT", Success))
        );
        assert_eq!(table.payload_bounds(), Some((0.0, 9600.0)));
        assert_eq!(table.sites(), ["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);
    }

    #[test]
    fn csv_missing_column_is_fatal() {
        let csv = "Launch Site,class,Booster Version Category\nCCAFS LC-40,1,FT\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Payload Mass (kg)"));
    }

    #[test]
    fn csv_bad_class_is_fatal() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\n\
                   CCAFS LC-40,500,FT,3\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn csv_negative_payload_is_fatal() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\n\
                   CCAFS LC-40,-5,FT,1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Row 0"));
    }

    #[test]
    fn csv_header_only_is_empty_table() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.payload_bounds(), None);
    }

    #[test]
    fn parses_json_records() {
        let json = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490.0,
             "Booster Version Category": "B4", "class": 1, "Flight Number": 4},
            {"Launch Site": "CCAFS SLC-40", "Payload Mass (kg)": 3600,
             "Booster Version Category": "FT", "class": 0}
        ]"#;
        let table = parse_json(json).unwrap();
        assert_eq!(table.len(), 2);
        let second = table.iter().nth(1).unwrap();
        assert_eq!(second.outcome_class, Failure);
        assert_eq!(second.payload_mass_kg, 3600.0);
    }

    #[test]
    fn loads_csv_file_and_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.csv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(SAMPLE_CSV.as_bytes())
            .unwrap();
        assert_eq!(load_file(&path).unwrap().len(), 4);

        let other = dir.path().join("launches.xlsx");
        std::fs::write(&other, b"").unwrap();
        assert!(load_file(&other).is_err());
        assert!(load_file(&dir.path().join("missing.csv")).is_err());
    }

    /// Write named columns to a Parquet file inside `dir`.
    fn write_parquet(dir: &tempfile::TempDir, columns: Vec<(&str, ArrayRef)>) -> std::path::PathBuf {
        let batch = RecordBatch::try_from_iter(columns).unwrap();
        let path = dir.path().join("launches.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    fn parquet_columns(masses: ArrayRef, classes: ArrayRef) -> Vec<(&'static str, ArrayRef)> {
        vec![
            (
                COL_LAUNCH_SITE,
                Arc::new(StringArray::from(vec!["CCAFS LC-40", "VAFB SLC-4E"])) as ArrayRef,
            ),
            (COL_PAYLOAD_MASS, masses),
            (COL_BOOSTER_CATEGORY, Arc::new(StringArray::from(vec!["v1.1", "FT"])) as ArrayRef),
            (COL_CLASS, classes),
        ]
    }

    #[test]
    fn loads_parquet_with_integer_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(
            &dir,
            parquet_columns(
                Arc::new(Int64Array::from(vec![500, 9600])),
                Arc::new(Int32Array::from(vec![0, 1])),
            ),
        );

        let table = load_file(&path).unwrap();
        let records: Vec<LaunchRecord> = table.iter().cloned().collect();
        assert_eq!(
            records,
            [
                LaunchRecord::new("CCAFS LC-40", 500.0, "v1.1", Failure),
                LaunchRecord::new("VAFB SLC-4E", 9600.0, "FT", Success),
            ]
        );
    }

    #[test]
    fn parquet_fractional_class_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(
            &dir,
            parquet_columns(
                Arc::new(Float64Array::from(vec![500.0, 9600.0])),
                Arc::new(Float64Array::from(vec![1.0, 0.5])),
            ),
        );
        let err = format!("{:#}", load_file(&path).unwrap_err());
        assert!(err.contains("Row 1: class 0.5 is not an integer"), "{err}");
    }

    #[test]
    fn parquet_class_outside_zero_one_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(
            &dir,
            parquet_columns(
                Arc::new(Float64Array::from(vec![500.0, 9600.0])),
                Arc::new(Int64Array::from(vec![2, 1])),
            ),
        );
        let err = format!("{:#}", load_file(&path).unwrap_err());
        assert!(err.contains("Row 0: bad 'class' value"), "{err}");
    }

    #[test]
    fn parquet_null_payload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(
            &dir,
            parquet_columns(
                Arc::new(Float64Array::from(vec![Some(500.0), None])),
                Arc::new(Int64Array::from(vec![0, 1])),
            ),
        );
        let err = format!("{:#}", load_file(&path).unwrap_err());
        assert!(err.contains("column 'Payload Mass (kg)' contains nulls"), "{err}");
    }
}
