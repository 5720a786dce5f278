use rust_decimal::Decimal;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Expense row. Only ever read or written through queries that also filter
/// on the owning `user_id`.
#[derive(Debug, Clone, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expense_name: String,
    pub amount: Decimal,
    pub date: Date,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
}
