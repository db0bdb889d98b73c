use crate::domain::form::LeaseForm;
use crate::domain::installment::display_amount;
use crate::domain::ports::{LeaseRepositoryBox, SaveOutcome};
use crate::domain::submission::LeaseSubmission;
use crate::error::Result;
use tracing::{info, warn};

/// Saves lease forms through a [`LeaseRepository`](crate::domain::ports::LeaseRepository).
///
/// Validation happens before anything reaches the repository; a form that
/// fails validation is rejected and the repository is left untouched.
pub struct LeaseService {
    repository: LeaseRepositoryBox,
}

impl LeaseService {
    /// Creates a service that saves through `repository`.
    pub fn new(repository: LeaseRepositoryBox) -> Self {
        Self { repository }
    }

    /// Validates `form`, builds its payload and saves it.
    pub async fn submit(&self, form: &LeaseForm) -> Result<(LeaseSubmission, SaveOutcome)> {
        let submission = LeaseSubmission::try_from(form).inspect_err(|e| {
            warn!(lease_id = %form.lease_id, error = %e, "lease rejected");
        })?;

        let outcome = self.repository.save(submission.clone()).await?;
        info!(
            lease_id = %submission.lease_id,
            installments = submission.payments.len(),
            installment_amount = %display_amount(form.installment_amount),
            total = %form.payments_total(),
            ?outcome,
            "lease saved"
        );
        Ok((submission, outcome))
    }

    /// Consumes the service and returns every saved lease, ordered by id.
    pub async fn into_results(self) -> Result<Vec<LeaseSubmission>> {
        let mut leases = self.repository.all().await?;
        leases.sort_by(|a, b| a.lease_id.cmp(&b.lease_id));
        Ok(leases)
    }
}
