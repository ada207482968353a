use crate::database::models::{
    CreatedRequest, Decision, RequestStatus, VacationRequest, VacationRequestInput,
    VacationRequestWithUser,
};
use crate::database::repositories::VacationRequestRepository;
use crate::error::AppError;
use crate::services::validation::parse_date;

#[derive(Clone)]
pub struct RequestLedger {
    repository: VacationRequestRepository,
}

impl RequestLedger {
    pub fn new(repository: VacationRequestRepository) -> Self {
        Self { repository }
    }

    /// Submit a request on behalf of `user_id`. Dates are not checked against each other.
    pub async fn create(
        &self,
        user_id: i64,
        input: VacationRequestInput,
    ) -> Result<CreatedRequest, AppError> {
        let date_from = parse_date("date_from", &input.date_from)?;
        let date_to = parse_date("date_to", &input.date_to)?;

        let reason = input.reason.trim();
        if reason.is_empty() {
            return Err(AppError::validation("Reason is required"));
        }

        let id = self
            .repository
            .create_request(user_id, date_from, date_to, reason)
            .await?;

        log::info!(
            "User {} submitted vacation request {} ({} to {})",
            user_id,
            id,
            date_from,
            date_to
        );

        Ok(CreatedRequest { id })
    }

    pub async fn list_mine(&self, user_id: i64) -> Result<Vec<VacationRequest>, AppError> {
        Ok(self.repository.get_requests_for_user(user_id).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<VacationRequestWithUser>, AppError> {
        Ok(self.repository.get_all_requests().await?)
    }

    /// Record a decision. The current status is not consulted and an unknown
    /// id is not an error: both cases report success.
    pub async fn set_status(&self, id: i64, decision: Decision) -> Result<(), AppError> {
        let status = RequestStatus::from(decision);
        let updated = self.repository.set_status(id, status).await?;

        if updated == 0 {
            log::warn!("Decision {} recorded for unknown vacation request {}", status, id);
        } else {
            log::info!("Vacation request {} marked {}", id, status);
        }

        Ok(())
    }
}
