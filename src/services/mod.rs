// External-service clients: blob storage, scoring backend, identity provider

pub mod identity;
pub mod scoring;
pub mod storage;

pub use identity::IdentityService;
pub use scoring::{ScoringError, ScoringService};
pub use storage::StorageService;
