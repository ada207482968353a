use chrono::Utc;
use sqlx::{Result, SqlitePool};

use crate::database::models::{NewUser, User, UserChanges};

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user and return it with its assigned id
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO
                users (
                    name,
                    email,
                    employee_code,
                    role,
                    password_hash,
                    created_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.employee_code)
        .bind(user.role)
        .bind(&user.password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: user.name.clone(),
            email: user.email.clone(),
            employee_code: user.employee_code.clone(),
            role: user.role,
            password_hash: user.password_hash.clone(),
            created_at,
        })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id,
                name,
                email,
                employee_code,
                role,
                password_hash,
                created_at
            FROM
                users
            WHERE
                email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id,
                name,
                email,
                employee_code,
                role,
                password_hash,
                created_at
            FROM
                users
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All users, newest first
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id,
                name,
                email,
                employee_code,
                role,
                password_hash,
                created_at
            FROM
                users
            ORDER BY
                id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Apply a partial update in one statement. Returns the number of rows touched.
    pub async fn update_user(&self, id: i64, changes: &UserChanges) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                password_hash = COALESCE(?, password_hash)
            WHERE
                id = ?
            "#,
        )
        .bind(changes.name.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a user; their vacation requests go with them via ON DELETE CASCADE
    pub async fn delete_user(&self, id: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT
                COUNT(*)
            FROM
                users
            WHERE
                email = ?
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    pub async fn employee_code_exists(&self, employee_code: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT
                COUNT(*)
            FROM
                users
            WHERE
                employee_code = ?
            "#,
        )
        .bind(employee_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }
}
