use super::{classify, BalanceProjector, ReconcileError, Reconciler};

use std::collections::HashSet;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::models::{BatchRow, StoredTransaction, Tier, Transaction, ValidationError};
use crate::storage::{LedgerStore, MemoryLedgerStore, SqliteLedgerStore};
use crate::types::Monetary;

fn money(value: &str) -> Result<Monetary> {
    Ok(Monetary::from_str(value)?)
}

fn create_row(day: u32, item: &str, category: &str, quantity: u32, unit_cost: &str) -> Result<BatchRow> {
    Ok(BatchRow {
        date: NaiveDate::from_ymd_opt(2025, 6, day).ok_or_else(|| anyhow!("invalid day {day}"))?,
        item: item.to_string(),
        category: category.to_string(),
        quantity,
        unit_cost: money(unit_cost)?
    })
}

fn memory_reconciler(balance: &str) -> Result<Reconciler<MemoryLedgerStore>> {
    Ok(Reconciler::new(MemoryLedgerStore::new(money(balance)?)))
}

fn remaining_balances(rows: &[StoredTransaction]) -> Vec<String> {
    rows.iter().map(|row| row.transaction.remaining_balance.to_string()).collect()
}

#[test]
fn test_meal_tier_boundaries() -> Result<()> {
    let test_cases = vec![
        ("0.00", Tier::Saving),
        ("6.00", Tier::Saving),
        ("6.01", Tier::Balance),
        ("14.99", Tier::Balance),
        ("15.00", Tier::Luxury),
        ("80.00", Tier::Luxury),
    ];

    for (cost, expected_tier) in test_cases {
        assert_eq!(classify("meal", money(cost)?)?, expected_tier, "meal at {cost}");
    }

    Ok(())
}

#[test]
fn test_beverage_tier_boundaries() -> Result<()> {
    let test_cases = vec![
        ("2.00", Tier::Saving),
        ("2.01", Tier::Balance),
        ("6.99", Tier::Balance),
        ("7.00", Tier::Luxury),
    ];

    for (cost, expected_tier) in test_cases {
        assert_eq!(classify("beverage", money(cost)?)?, expected_tier, "beverage at {cost}");
    }

    Ok(())
}

#[test]
fn test_unknown_category_is_a_hard_error() -> Result<()> {
    let result = classify("dessert", money("3.00")?);

    assert!(matches!(result, Err(ReconcileError::UnsupportedCategory { ref category }) if category == "dessert"));

    Ok(())
}

#[test]
fn test_projector_rounds_after_each_step() -> Result<()> {
    let mut projector = BalanceProjector::new(money("100")?);

    assert_eq!(projector.debit(money("10.005")?)?.to_string(), "89.99");
    assert_eq!(projector.adjust(money("-0.99")?)?.to_string(), "89.00");
    assert_eq!(projector.adjust(money("11")?)?.to_string(), "100.00");
    assert_eq!(projector.current().to_string(), "100.00");

    Ok(())
}

#[test]
fn test_insertions_debit_in_chronological_order() -> Result<()> {
    let mut reconciler = memory_reconciler("100.00")?;
    let batch = vec![
        create_row(12, "Iced Tea", "beverage", 2, "3.00")?,
        create_row(3, "Nasi Lemak", "meal", 1, "10.00")?,
    ];

    let summary = reconciler.reconcile(&batch)?;
    let rows = reconciler.store().transactions();

    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.deleted, 0);
    assert_eq!(summary.final_balance.to_string(), "84.00");
    assert_eq!(rows[0].transaction.item, "Nasi Lemak");
    assert_eq!(remaining_balances(&rows), vec!["90.00", "84.00"]);
    assert_eq!(rows[0].transaction.tier, Tier::Balance);
    assert_eq!(rows[1].transaction.tier, Tier::Balance);
    assert_eq!(rows[1].transaction.amount_spent.to_string(), "6.00");
    assert_eq!(reconciler.store().balance().to_string(), "84.00");

    Ok(())
}

#[test]
fn test_same_day_rows_keep_their_input_order() -> Result<()> {
    let mut reconciler = memory_reconciler("20")?;
    let batch = vec![
        create_row(1, "Kopi", "beverage", 1, "1.50")?,
        create_row(1, "Roti", "meal", 1, "2.50")?,
    ];

    reconciler.reconcile(&batch)?;
    let rows = reconciler.store().transactions();

    assert_eq!(rows[0].transaction.item, "Kopi");
    assert_eq!(remaining_balances(&rows), vec!["18.50", "16.00"]);

    Ok(())
}

#[test]
fn test_reconciling_the_same_batch_twice_is_idempotent() -> Result<()> {
    let mut reconciler = memory_reconciler("50")?;
    let batch = vec![
        create_row(2, "Burger", "meal", 1, "16.50")?,
        create_row(4, "Cola", "beverage", 3, "1.20")?,
    ];

    let first = reconciler.reconcile(&batch)?;
    let ledger_after_first = reconciler.store().transactions();

    let second = reconciler.reconcile(&batch)?;

    assert_eq!(second.inserted, 0);
    assert_eq!(second.deleted, 0);
    assert_eq!(second.unchanged_or_updated, 2);
    assert_eq!(second.final_balance, first.final_balance);
    assert_eq!(reconciler.store().transactions().len(), ledger_after_first.len());

    let keys: HashSet<_> = reconciler.store().transactions().iter().map(|row| row.transaction.key()).collect();

    assert_eq!(keys.len(), 2);

    let ledger_after_second = reconciler.store().transactions();
    let third = reconciler.reconcile(&batch)?;

    assert_eq!(third, second);
    assert_eq!(reconciler.store().transactions(), ledger_after_second);

    Ok(())
}

#[test]
fn test_removed_rows_are_deleted_without_touching_the_balance() -> Result<()> {
    let mut reconciler = memory_reconciler("100")?;
    let row_a = create_row(1, "Porridge", "meal", 1, "5.00")?;
    let row_b = create_row(2, "Smoothie", "beverage", 1, "8.00")?;
    let row_c = create_row(3, "Curry", "meal", 2, "7.50")?;

    reconciler.reconcile(&[row_a.clone(), row_b.clone(), row_c.clone()])?;
    let balance_before = reconciler.store().balance();

    let summary = reconciler.reconcile(&[row_a.clone(), row_c.clone()])?;
    let rows = reconciler.store().transactions();

    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.unchanged_or_updated, 2);
    assert_eq!(summary.final_balance, balance_before);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.transaction.key() != row_b.key()));
    assert_eq!(rows[0].transaction.amount_spent.to_string(), "5.00");
    assert_eq!(rows[1].transaction.amount_spent.to_string(), "15.00");

    Ok(())
}

#[test]
fn test_surviving_rows_see_the_current_balance_without_debiting_it() -> Result<()> {
    let mut reconciler = memory_reconciler("100")?;
    let breakfast = create_row(1, "Toast", "meal", 1, "4.00")?;

    reconciler.reconcile(&[breakfast.clone()])?;

    let lunch = create_row(5, "Laksa", "meal", 1, "9.00")?;
    let summary = reconciler.reconcile(&[breakfast.clone(), lunch])?;
    let rows = reconciler.store().transactions();

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.unchanged_or_updated, 1);
    assert_eq!(summary.final_balance.to_string(), "87.00");
    // Toast is refreshed against the balance as it stood before the new debit.
    assert_eq!(remaining_balances(&rows), vec!["96.00", "87.00"]);

    Ok(())
}

#[test]
fn test_final_balance_conserves_inserted_spend() -> Result<()> {
    let mut reconciler = memory_reconciler("250.00")?;
    reconciler.reconcile(&[create_row(1, "Dim Sum", "meal", 4, "3.25")?])?;
    let start = reconciler.store().balance();

    let batch = vec![
        create_row(1, "Dim Sum", "meal", 4, "3.25")?,
        create_row(6, "Bubble Tea", "beverage", 2, "5.40")?,
        create_row(9, "Steak", "meal", 1, "32.90")?,
    ];
    let summary = reconciler.reconcile(&batch)?;

    let inserted_spend = reconciler.store().transactions().iter()
        .filter(|row| row.transaction.item != "Dim Sum")
        .try_fold(Monetary::zero(), |total, row| total.checked_add(row.transaction.amount_spent))?;

    assert_eq!(summary.final_balance, start.checked_sub(inserted_spend)?);
    assert_eq!(summary.final_balance.to_string(), "193.30");

    Ok(())
}

#[test]
fn test_half_cent_costs_round_up_before_summing() -> Result<()> {
    let mut reconciler = memory_reconciler("100")?;

    let summary = reconciler.reconcile(&[create_row(1, "Sandwich", "meal", 1, "10.005")?])?;
    let rows = reconciler.store().transactions();

    assert_eq!(rows[0].transaction.unit_cost.to_string(), "10.01");
    assert_eq!(rows[0].transaction.amount_spent.to_string(), "10.01");
    assert_eq!(summary.final_balance.to_string(), "89.99");

    Ok(())
}

#[test]
fn test_unsupported_category_rolls_back_the_whole_run() -> Result<()> {
    let mut reconciler = memory_reconciler("100")?;
    let keep = create_row(1, "Pho", "meal", 1, "11.00")?;
    let juice = create_row(2, "Juice", "beverage", 1, "4.00")?;
    reconciler.reconcile(&[keep.clone(), juice])?;

    let ledger_before = reconciler.store().transactions();
    let balance_before = reconciler.store().balance();

    let result = reconciler.reconcile(&[keep, create_row(3, "Candle", "household", 1, "2.00")?]);

    assert!(matches!(result, Err(ReconcileError::UnsupportedCategory { .. })));
    assert_eq!(reconciler.store().transactions(), ledger_before);
    assert_eq!(reconciler.store().balance(), balance_before);

    Ok(())
}

#[test]
fn test_unsupported_category_rolls_back_sqlite_store() -> Result<()> {
    let mut reconciler = Reconciler::new(SqliteLedgerStore::open_in_memory(money("30")?)?);
    reconciler.reconcile(&[create_row(1, "Bagel", "meal", 1, "3.00")?])?;

    let result = reconciler.reconcile(&[create_row(2, "Soap", "toiletries", 1, "2.00")?]);

    assert!(matches!(result, Err(ReconcileError::UnsupportedCategory { .. })));

    let mut store = reconciler.into_store();
    let rows = store.run_atomically(|session| session.list_transactions())?;
    let balance = store.run_atomically(|session| session.get_balance())?;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].transaction.item, "Bagel");
    assert_eq!(balance.to_string(), "27.00");

    Ok(())
}

#[test]
fn test_invalid_rows_are_rejected_before_any_change() -> Result<()> {
    let mut reconciler = memory_reconciler("100")?;
    reconciler.reconcile(&[create_row(1, "Wrap", "meal", 1, "6.50")?])?;

    let result = reconciler.reconcile(&[create_row(2, "Water", "beverage", 0, "1.00")?]);

    assert!(matches!(result, Err(ReconcileError::Validation(ValidationError::NonPositiveQuantity { row: 1, .. }))));
    assert_eq!(reconciler.store().transactions().len(), 1);
    assert_eq!(reconciler.store().balance().to_string(), "93.50");

    Ok(())
}

#[test]
fn test_updates_leave_the_stored_tier_untouched() -> Result<()> {
    let row = create_row(1, "Salad", "meal", 1, "5.00")?;
    let stored = Transaction {
        date: row.date,
        item: row.item.clone(),
        category: row.category.clone(),
        quantity: row.quantity,
        unit_cost: row.unit_cost,
        tier: Tier::Luxury,
        amount_spent: money("0")?,
        remaining_balance: money("1")?
    };

    let mut reconciler = Reconciler::new(MemoryLedgerStore::with_transactions(money("40")?, vec![stored]));
    let summary = reconciler.reconcile(&[row])?;
    let rows = reconciler.store().transactions();

    assert_eq!(summary.unchanged_or_updated, 1);
    assert_eq!(rows[0].transaction.tier, Tier::Luxury);
    assert_eq!(rows[0].transaction.amount_spent.to_string(), "5.00");
    assert_eq!(rows[0].transaction.remaining_balance.to_string(), "40.00");
    assert_eq!(summary.final_balance.to_string(), "40.00");

    Ok(())
}

#[test]
fn test_adjustments_move_the_stored_balance() -> Result<()> {
    let mut reconciler = memory_reconciler("10.00")?;

    assert_eq!(reconciler.apply_adjustment(money("25.555")?)?.to_string(), "35.56");
    assert_eq!(reconciler.apply_adjustment(money("-5.56")?)?.to_string(), "30.00");
    assert_eq!(reconciler.balance()?.to_string(), "30.00");

    let summary = reconciler.reconcile(&[create_row(1, "Mocha", "beverage", 1, "5.00")?])?;

    assert_eq!(summary.final_balance.to_string(), "25.00");

    Ok(())
}

#[test]
fn test_empty_batch_clears_the_ledger_but_keeps_the_balance() -> Result<()> {
    let mut reconciler = memory_reconciler("100")?;
    reconciler.reconcile(&[create_row(1, "Bao", "meal", 2, "2.00")?])?;

    let summary = reconciler.reconcile(&[])?;

    assert_eq!(summary.deleted, 1);
    assert!(reconciler.store().transactions().is_empty());
    assert_eq!(summary.final_balance.to_string(), "96.00");

    Ok(())
}

#[test]
fn test_repeated_rows_in_one_batch_are_stored_once() -> Result<()> {
    let mut reconciler = memory_reconciler("50")?;
    let batch = vec![
        create_row(3, "Roti Canai", "meal", 1, "2.50")?,
        create_row(3, "Roti Canai", "meal", 1, "2.50")?
    ];

    let summary = reconciler.reconcile(&batch)?;
    let rows = reconciler.store().transactions();

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.unchanged_or_updated, 1);
    assert_eq!(rows.len(), 1);
    assert_eq!(summary.final_balance.to_string(), "47.50");

    Ok(())
}
