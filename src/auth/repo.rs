use sqlx::PgPool;

use crate::auth::repo_types::User;

impl User {
    /// Case-sensitive username lookup.
    pub async fn find_by_username(db: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, full_name, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user. Uniqueness of username and email is enforced by
    /// the database; violations surface as `sqlx::Error::Database`.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        full_name: &str,
        password_hash: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, full_name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, full_name, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(full_name)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}
