use crate::domain::ports::{LeaseRepository, SaveOutcome};
use crate::domain::submission::LeaseSubmission;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory lease repository.
///
/// Uses `Arc<RwLock<HashMap<String, LeaseSubmission>>>` so clones share the
/// same leases. Saving an existing id replaces it.
#[derive(Default, Clone)]
pub struct InMemoryLeaseRepository {
    leases: Arc<RwLock<HashMap<String, LeaseSubmission>>>,
}

impl InMemoryLeaseRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaseRepository for InMemoryLeaseRepository {
    async fn save(&self, lease: LeaseSubmission) -> Result<SaveOutcome> {
        let mut leases = self.leases.write().await;
        let outcome = match leases.insert(lease.lease_id.clone(), lease) {
            Some(_) => SaveOutcome::Updated,
            None => SaveOutcome::Created,
        };
        Ok(outcome)
    }

    async fn get(&self, lease_id: &str) -> Result<Option<LeaseSubmission>> {
        let leases = self.leases.read().await;
        Ok(leases.get(lease_id).cloned())
    }

    async fn all(&self) -> Result<Vec<LeaseSubmission>> {
        let leases = self.leases.read().await;
        Ok(leases.values().cloned().collect())
    }
}
