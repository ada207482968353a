use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VacationRequest {
    pub id: i64,
    pub user_id: i64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub reason: String,
    pub status: RequestStatus,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

/// A request joined with the name and email of the user who submitted it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VacationRequestWithUser {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub request: VacationRequest,
    pub name: String,
    pub email: String,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum RequestStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

/// The two outcomes a manager can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl From<Decision> for RequestStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VacationRequestInput {
    pub date_from: String,
    pub date_to: String,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedRequest {
    pub id: i64,
}
