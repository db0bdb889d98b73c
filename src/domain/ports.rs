use super::submission::LeaseSubmission;
use crate::error::Result;
use async_trait::async_trait;

/// Whether a save created a new lease or replaced an existing one.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Storage port for submitted leases, keyed by lease id.
#[async_trait]
pub trait LeaseRepository: Send + Sync {
    /// Creates the lease, or replaces the one already stored under its id.
    async fn save(&self, lease: LeaseSubmission) -> Result<SaveOutcome>;
    async fn get(&self, lease_id: &str) -> Result<Option<LeaseSubmission>>;
    async fn all(&self) -> Result<Vec<LeaseSubmission>>;
}

pub type LeaseRepositoryBox = Box<dyn LeaseRepository>;
