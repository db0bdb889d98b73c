//! Application layer orchestrating the domain.
//!
//! `ScheduleSynchronizer` owns a lease form and re-runs the schedule
//! derivations after every edit; `LeaseService` validates finished forms and
//! hands their payloads to a repository.

pub mod lease_service;
pub mod synchronizer;
