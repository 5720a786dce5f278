use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Expense;
use super::services::NewExpense;

impl Expense {
    pub async fn create(db: &PgPool, user_id: Uuid, input: &NewExpense) -> sqlx::Result<Expense> {
        sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (user_id, expense_name, amount, date, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, expense_name, amount, date, description, created_at
            "#,
        )
        .bind(user_id)
        .bind(&input.expense_name)
        .bind(input.amount)
        .bind(input.date)
        .bind(&input.description)
        .fetch_one(db)
        .await
    }

    /// All of one user's expenses, newest date first. `created_at` breaks
    /// ties so repeated calls return the same order.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Expense>> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, expense_name, amount, date, description, created_at
            FROM expenses
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn find(db: &PgPool, user_id: Uuid, id: Uuid) -> sqlx::Result<Option<Expense>> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, expense_name, amount, date, description, created_at
            FROM expenses
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    /// Full replace. The WHERE clause carries both id and user_id, so an
    /// update aimed at someone else's row matches zero rows instead of
    /// revealing that the row exists.
    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        input: &NewExpense,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET expense_name = $1, amount = $2, date = $3, description = $4
            WHERE id = $5 AND user_id = $6
            "#,
        )
        .bind(&input.expense_name)
        .bind(input.amount)
        .bind(input.date)
        .bind(&input.description)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Same scoped matching as update; zero affected rows reads the same
    /// whether the id never existed or belongs to another user.
    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}
