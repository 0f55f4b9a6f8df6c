use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use crate::ingest::errors::IngestError;
use crate::ingest::normalize::{locate_columns, RawRow};
use crate::models::BatchRow;

/// Reads the first worksheet of an Excel or OpenDocument workbook.
pub fn read_workbook(path: &Path) -> Result<Vec<BatchRow>, IngestError> {
    if !path.exists() {
        return Err(IngestError::NotFound { path: path.to_path_buf() });
    }

    let mut workbook = open_workbook_auto(path)?;
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(IngestError::EmptyWorkbook { path: path.to_path_buf() });
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut sheet_rows = range.rows();

    let Some(header_cells) = sheet_rows.next() else {
        return Ok(Vec::new());
    };

    let headers: Vec<String> = header_cells.iter().map(|cell| cell_text(cell).unwrap_or_default()).collect();
    let columns = locate_columns(&headers)?;
    let (first_row, _) = range.start().unwrap_or((0, 0));

    let mut rows = Vec::new();

    for (index, cells) in sheet_rows.enumerate() {
        let cell = |position: usize| cells.get(position).and_then(cell_text);

        let raw = RawRow {
            date: cell(columns.date),
            item: cell(columns.item),
            category: cell(columns.category),
            quantity: cell(columns.quantity),
            cost: cell(columns.cost)
        };

        if raw.is_blank() {
            continue;
        }

        // Sheet rows are 1-based and the header occupies the first used row.
        rows.push(raw.normalize(first_row as usize + index + 2)?);
    }

    Ok(rows)
}

/// Renders a cell as the text the normalizer expects. Date cells become ISO
/// dates; empty and error cells have no text.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(value) => Some(value.clone()),
        Data::Float(value) => Some(value.to_string()),
        Data::Int(value) => Some(value.to_string()),
        Data::Bool(value) => Some(value.to_string()),
        Data::DateTime(_) => cell.as_date().map(|date| date.format("%Y-%m-%d").to_string()),
        Data::DateTimeIso(value) => Some(value.clone()),
        _ => None
    }
}
