mod csv_reader;
mod errors;
mod normalize;
mod workbook_reader;

use std::path::Path;

use tracing::debug;

use crate::models::BatchRow;

pub use csv_reader::{read_csv, read_csv_from};
pub use errors::IngestError;
pub use normalize::{locate_columns, parse_date, title_case, ColumnPositions, RawRow, REQUIRED_COLUMNS};
pub use workbook_reader::{cell_text, read_workbook};

/// Reads a spending sheet into normalized batch rows, choosing the reader by
/// file extension.
pub fn read_batch(path: &Path) -> Result<Vec<BatchRow>, IngestError> {
    let extension = path.extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        _ => return Err(IngestError::UnsupportedFormat { extension })
    };

    debug!("Read {} row(s) from {}", rows.len(), path.display());

    Ok(rows)
}
