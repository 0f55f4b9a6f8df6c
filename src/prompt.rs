use std::str::FromStr;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use cashcuddle::Monetary;

/// Asks for a deposit and, when that is skipped, for a withdrawal. Returns
/// the signed adjustment, or `None` when both are skipped or zero.
pub fn adjustment() -> Result<Option<Monetary>> {
    let theme = ColorfulTheme::default();

    if let Some(deposit) = prompt_amount(&theme, "Enter deposit amount (or press Enter to skip)")? {
        return Ok(Some(deposit).filter(|amount| !amount.is_zero()));
    }

    let Some(withdrawal) = prompt_amount(&theme, "Enter withdraw amount (or press Enter to skip)")? else {
        return Ok(None);
    };

    if withdrawal.is_zero() {
        return Ok(None);
    }

    Ok(Some(Monetary::zero().checked_sub(withdrawal.abs())?))
}

fn prompt_amount(theme: &ColorfulTheme, prompt: &str) -> Result<Option<Monetary>> {
    let text = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            Monetary::from_str(input).map(|_| ()).map_err(|error| error.to_string())
        })
        .interact_text()?;

    if text.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(Monetary::from_str(&text)?))
}
