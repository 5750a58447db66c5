//! Tabular input and output for the `cardprice` binary.
//!
//! Input is always CSV with a header row. Output is CSV in the fixed column
//! order, or a JSON array of objects keyed by the same column names.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use anyhow::Context;
use cardprice_core::{CardQuery, PriceRecord, QueryRow, PRICE_COLUMNS};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Reads every query from the CSV at `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened or any row is malformed; nothing is
/// fetched in that case.
pub fn read_queries(path: &Path) -> anyhow::Result<Vec<CardQuery>> {
    let file =
        File::open(path).with_context(|| format!("failed to open input {}", path.display()))?;
    parse_queries(file).with_context(|| format!("invalid input {}", path.display()))
}

/// Parses queries from CSV. Errors name the 1-based data row.
pub fn parse_queries<R: Read>(reader: R) -> anyhow::Result<Vec<CardQuery>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut queries = Vec::new();
    for (index, row) in csv_reader.deserialize::<QueryRow>().enumerate() {
        let row_number = index + 1;
        let row = row.with_context(|| format!("row {row_number}: malformed record"))?;
        let query = row
            .into_query()
            .with_context(|| format!("row {row_number}"))?;
        queries.push(query);
    }
    Ok(queries)
}

/// Opens `path` for writing, or stdout when `None`.
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

/// Writes `records` in `format`. CSV output always carries the header row,
/// even when there are no records.
pub fn write_records<W: Write>(
    mut writer: W,
    records: &[PriceRecord],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut out = csv::Writer::from_writer(writer);
            out.write_record(PRICE_COLUMNS)?;
            for record in records {
                out.write_record(record.values())?;
            }
            out.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}
