use rust_decimal::Decimal;
use time::Date;

use super::dto::{date_format, ExpenseRequest};
use crate::error::ApiError;

/// Validated input for create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub expense_name: String,
    pub amount: Decimal,
    pub date: Date,
    pub description: Option<String>,
}

/// Upper bound imposed by the NUMERIC(10, 2) column.
fn max_amount() -> Decimal {
    Decimal::from(100_000_000u32)
}

pub fn validate(input: ExpenseRequest) -> Result<NewExpense, ApiError> {
    let name = input.expense_name.trim();
    if name.is_empty() || input.date.trim().is_empty() || input.amount.is_none() {
        return Err(ApiError::Validation(
            "Expense name, amount, and date are required.".into(),
        ));
    }
    let amount = input.amount.unwrap_or_default();

    if amount <= Decimal::ZERO {
        return Err(ApiError::Validation(
            "Amount must be greater than zero.".into(),
        ));
    }
    if amount.scale() > 2 {
        return Err(ApiError::Validation(
            "Amount cannot have more than two decimal places.".into(),
        ));
    }
    if amount >= max_amount() {
        return Err(ApiError::Validation("Amount is too large.".into()));
    }

    let date = Date::parse(input.date.trim(), date_format::FORMAT)
        .map_err(|_| ApiError::Validation("Date must be in YYYY-MM-DD format.".into()))?;

    let description = input.description.filter(|d| !d.trim().is_empty());

    Ok(NewExpense {
        expense_name: name.to_owned(),
        amount: amount.round_dp(2),
        date,
        description,
    })
}
