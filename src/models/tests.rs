use super::{BatchRow, Category, Tier, Transaction, ValidationError};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::types::Monetary;

fn create_row(item: &str, category: &str, quantity: u32, unit_cost: &str) -> Result<BatchRow> {
    Ok(BatchRow {
        date: NaiveDate::from_ymd_opt(2025, 3, 14).ok_or_else(|| anyhow!("invalid date"))?,
        item: item.to_string(),
        category: category.to_string(),
        quantity,
        unit_cost: Monetary::from_str(unit_cost)?
    })
}

#[test]
fn test_category_parses_only_normalized_names() {
    assert_eq!(Category::parse("meal"), Some(Category::Meal));
    assert_eq!(Category::parse("beverage"), Some(Category::Beverage));
    assert_eq!(Category::parse("Meal"), None);
    assert_eq!(Category::parse("snack"), None);
}

#[test]
fn test_tier_text_representation_round_trips() -> Result<()> {
    for tier in [Tier::Saving, Tier::Balance, Tier::Luxury] {
        assert_eq!(Tier::from_str(tier.as_str()).map_err(|error| anyhow!(error))?, tier);
    }

    assert!(Tier::from_str("premium").is_err());
    assert_eq!(Tier::Luxury.to_string(), "luxury");

    Ok(())
}

#[test]
fn test_amount_spent_is_unit_cost_times_quantity() -> Result<()> {
    let row = create_row("Latte", "beverage", 3, "2.35")?;

    assert_eq!(row.amount_spent()?.to_string(), "7.05");

    Ok(())
}

#[test]
fn test_valid_row_passes_shape_checks() -> Result<()> {
    create_row("Chicken Rice", "meal", 1, "0")?.validate(1)?;

    Ok(())
}

#[test]
fn test_zero_quantity_is_rejected() -> Result<()> {
    let result = create_row("Chicken Rice", "meal", 0, "5.00")?.validate(4);

    assert!(matches!(result, Err(ValidationError::NonPositiveQuantity { row: 4, .. })));

    Ok(())
}

#[test]
fn test_negative_cost_is_rejected() -> Result<()> {
    let result = create_row("Chicken Rice", "meal", 1, "-0.01")?.validate(2);

    assert!(matches!(result, Err(ValidationError::NegativeCost { row: 2, .. })));

    Ok(())
}

#[test]
fn test_blank_item_or_category_is_rejected() -> Result<()> {
    let blank_item = create_row("  ", "meal", 1, "5.00")?.validate(1);
    let blank_category = create_row("Tea", "", 1, "5.00")?.validate(1);

    assert!(matches!(blank_item, Err(ValidationError::MissingField { field: "Item", .. })));
    assert!(matches!(blank_category, Err(ValidationError::MissingField { field: "Category", .. })));

    Ok(())
}

#[test]
fn test_natural_key_ignores_derived_fields() -> Result<()> {
    let row = create_row("Tea", "beverage", 2, "1.50")?;
    let stored = Transaction {
        date: row.date,
        item: row.item.clone(),
        category: row.category.clone(),
        quantity: row.quantity,
        unit_cost: row.unit_cost,
        tier: Tier::Luxury,
        amount_spent: Monetary::from_str("99.99")?,
        remaining_balance: Monetary::from_str("-5")?
    };

    assert_eq!(stored.key(), row.key());
    assert!(stored.matches(&row.key()));
    assert!(!stored.matches(&create_row("Tea", "beverage", 3, "1.50")?.key()));

    Ok(())
}
