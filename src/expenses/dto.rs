use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo_types::Expense;

/// Request body for create and full-replace update. `amount` deserializes
/// strictly into a decimal (numbers or numeric strings, never NaN); `date`
/// stays a string until the service layer parses it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    #[serde(default)]
    pub expense_name: String,
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub date: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    pub id: Uuid,
    pub expense_name: String,
    pub amount: Decimal,
    #[serde(serialize_with = "date_format::serialize")]
    pub date: Date,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<Expense> for ExpenseItem {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            expense_name: e.expense_name,
            amount: e.amount,
            date: e.date,
            description: e.description,
            created_at: e.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCreated {
    pub message: String,
    pub expense_id: Uuid,
    pub redirect_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdated {
    pub message: String,
    pub redirect_url: String,
}

#[derive(Debug, Serialize)]
pub struct ExpenseDeleted {
    pub message: String,
}

pub(crate) mod date_format {
    use serde::Serializer;
    use time::{format_description::FormatItem, macros::format_description, Date};

    pub(crate) const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn request_accepts_numeric_and_string_amounts() {
        let req: ExpenseRequest = serde_json::from_str(
            r#"{"expenseName":"Coffee","amount":3.50,"date":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(req.amount, Some(Decimal::new(350, 2)));

        let req: ExpenseRequest =
            serde_json::from_str(r#"{"expenseName":"Coffee","amount":"3.50","date":"2024-01-01"}"#)
                .unwrap();
        assert_eq!(req.amount, Some(Decimal::new(350, 2)));
    }

    #[test]
    fn request_rejects_non_numeric_amount() {
        let res: Result<ExpenseRequest, _> = serde_json::from_str(
            r#"{"expenseName":"Coffee","amount":"lots","date":"2024-01-01"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn item_serializes_camel_case_with_plain_date() {
        let item = ExpenseItem {
            id: Uuid::nil(),
            expense_name: "Coffee".into(),
            amount: Decimal::new(350, 2),
            date: time::macros::date!(2024 - 01 - 01),
            description: None,
            created_at: datetime!(2024-01-01 10:00 UTC),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""expenseName":"Coffee""#));
        assert!(json.contains(r#""amount":"3.50""#));
        assert!(json.contains(r#""date":"2024-01-01""#));
        assert!(json.contains("createdAt"));
    }
}
