use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::ingest::errors::IngestError;
use crate::ingest::normalize::{locate_columns, RawRow};
use crate::models::BatchRow;

pub fn read_csv(path: &Path) -> Result<Vec<BatchRow>, IngestError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            IngestError::NotFound { path: path.to_path_buf() }
        } else {
            IngestError::Io { path: path.to_path_buf(), source }
        }
    })?;

    read_csv_from(BufReader::new(file))
}

pub fn read_csv_from<R: Read>(input: R) -> Result<Vec<BatchRow>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    locate_columns(&headers)?;

    let mut rows = Vec::new();

    // Line 1 is the header row.
    for (index, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result?;

        if raw.is_blank() {
            continue;
        }

        rows.push(raw.normalize(index + 2)?);
    }

    Ok(rows)
}
