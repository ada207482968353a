use chrono::{NaiveDate, Utc};
use sqlx::{Result, SqlitePool};

use crate::database::models::{RequestStatus, VacationRequest, VacationRequestWithUser};

#[derive(Clone)]
pub struct VacationRequestRepository {
    pool: SqlitePool,
}

impl VacationRequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a pending request and return its id
    pub async fn create_request(
        &self,
        user_id: i64,
        date_from: NaiveDate,
        date_to: NaiveDate,
        reason: &str,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO
                vacation_requests (
                    user_id,
                    date_from,
                    date_to,
                    reason,
                    status,
                    submitted_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(date_from)
        .bind(date_to)
        .bind(reason)
        .bind(RequestStatus::Pending)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_request_by_id(&self, id: i64) -> Result<Option<VacationRequest>> {
        sqlx::query_as::<_, VacationRequest>(
            r#"
            SELECT
                id,
                user_id,
                date_from,
                date_to,
                reason,
                status,
                submitted_at,
                decided_at
            FROM
                vacation_requests
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Requests owned by one user, newest first
    pub async fn get_requests_for_user(&self, user_id: i64) -> Result<Vec<VacationRequest>> {
        sqlx::query_as::<_, VacationRequest>(
            r#"
            SELECT
                id,
                user_id,
                date_from,
                date_to,
                reason,
                status,
                submitted_at,
                decided_at
            FROM
                vacation_requests
            WHERE
                user_id = ?
            ORDER BY
                id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Every request with its requester's name and email, newest first
    pub async fn get_all_requests(&self) -> Result<Vec<VacationRequestWithUser>> {
        sqlx::query_as::<_, VacationRequestWithUser>(
            r#"
            SELECT
                r.id,
                r.user_id,
                r.date_from,
                r.date_to,
                r.reason,
                r.status,
                r.submitted_at,
                r.decided_at,
                u.name,
                u.email
            FROM
                vacation_requests r
                JOIN users u ON u.id = r.user_id
            ORDER BY
                r.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Overwrite the status whatever it currently is. `decided_at` only moves when
    /// the status actually changes. Returns the number of rows matched.
    pub async fn set_status(&self, id: i64, status: RequestStatus) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE vacation_requests
            SET
                decided_at = CASE
                    WHEN status = ? THEN decided_at
                    ELSE ?
                END,
                status = ?
            WHERE
                id = ?
            "#,
        )
        .bind(status)
        .bind(Utc::now())
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_for_user(&self, user_id: i64) -> Result<i64> {
        sqlx::query_scalar(
            r#"
            SELECT
                COUNT(*)
            FROM
                vacation_requests
            WHERE
                user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}
