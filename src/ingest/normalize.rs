use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{BatchRow, ValidationError};
use crate::types::Monetary;

pub const REQUIRED_COLUMNS: [&str; 5] = ["Date", "Item", "Category", "Quantity", "Cost"];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"];
const SHORT_YEAR_DATE_FORMATS: [&str; 3] = ["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];

/// Index of each required column within a header row.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ColumnPositions {
    pub date: usize,
    pub item: usize,
    pub category: usize,
    pub quantity: usize,
    pub cost: usize
}

/// Finds the required columns in a header row. Extra columns are ignored.
pub fn locate_columns<S: AsRef<str>>(headers: &[S]) -> Result<ColumnPositions, ValidationError> {
    let position = |name: &str| headers.iter().position(|header| header.as_ref().trim() == name);

    let missing: Vec<String> = REQUIRED_COLUMNS.iter()
        .filter(|name| position(*name).is_none())
        .map(|name| name.to_string())
        .collect();

    match (position("Date"), position("Item"), position("Category"), position("Quantity"), position("Cost")) {
        (Some(date), Some(item), Some(category), Some(quantity), Some(cost)) => {
            Ok(ColumnPositions { date, item, category, quantity, cost })
        }
        _ => Err(ValidationError::MissingColumns { columns: missing })
    }
}

/// One sheet row as text cells, before any normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Item")]
    pub item: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: Option<String>,
    #[serde(rename = "Cost")]
    pub cost: Option<String>
}

impl RawRow {
    pub fn is_blank(&self) -> bool {
        [&self.date, &self.item, &self.category, &self.quantity, &self.cost]
            .iter()
            .all(|cell| cell.as_deref().is_none_or(|value| value.trim().is_empty()))
    }

    /// Produces a typed row: item title-cased, category lower-cased, cost
    /// rounded half-up to two places. `row` is the sheet line number used in
    /// error messages.
    pub fn normalize(&self, row: usize) -> Result<BatchRow, ValidationError> {
        let date_text = required(row, "Date", &self.date)?;
        let date = parse_date(date_text).ok_or_else(|| ValidationError::invalid_date(row, date_text))?;

        let item = title_case(required(row, "Item", &self.item)?);
        let category = required(row, "Category", &self.category)?.to_lowercase();
        let quantity = parse_quantity(row, required(row, "Quantity", &self.quantity)?)?;

        let cost_text = required(row, "Cost", &self.cost)?;
        let unit_cost = Monetary::from_str(cost_text)
            .map_err(|error| ValidationError::invalid_cost(row, cost_text, error))?;

        if unit_cost.is_negative() {
            return Err(ValidationError::NegativeCost { row, cost: unit_cost });
        }

        Ok(BatchRow { date, item, category, quantity, unit_cost })
    }
}

fn required<'a>(row: usize, field: &'static str, cell: &'a Option<String>) -> Result<&'a str, ValidationError> {
    match cell.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::missing_field(row, field))
    }
}

/// Accepts ISO or day-first dates; a trailing time component is ignored.
/// Two-digit years are read as `%y` does (`25` is 2025).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split([' ', 'T']).next()?;

    //NOTE: `%Y` takes any digit count, so `12-06-25` would otherwise land in year 12
    DATE_FORMATS.iter()
        .filter_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
        .find(|date| (1000..=9999).contains(&date.year()))
        .or_else(|| {
            SHORT_YEAR_DATE_FORMATS.iter().find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
        })
}

fn parse_quantity(row: usize, value: &str) -> Result<u32, ValidationError> {
    let quantity = match value.parse::<i64>() {
        Ok(quantity) => quantity,
        Err(_) => {
            // Spreadsheet numbers may arrive as `2.0`.
            let decimal = Decimal::from_str(value).map_err(|_| ValidationError::invalid_quantity(row, value))?;
            if !decimal.fract().is_zero() {
                return Err(ValidationError::invalid_quantity(row, value));
            }
            decimal.to_i64().ok_or_else(|| ValidationError::invalid_quantity(row, value))?
        }
    };

    if quantity <= 0 {
        return Err(ValidationError::NonPositiveQuantity { row, quantity });
    }

    u32::try_from(quantity).map_err(|_| ValidationError::invalid_quantity(row, value))
}

/// Upper-cases the first letter of every run of letters and lower-cases the
/// rest, then trims.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_letter = false;

    for character in value.chars() {
        if character.is_alphabetic() {
            if previous_is_letter {
                result.extend(character.to_lowercase());
            } else {
                result.extend(character.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(character);
            previous_is_letter = false;
        }
    }

    result.trim().to_string()
}
