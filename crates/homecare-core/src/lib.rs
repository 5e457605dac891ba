//! # HomeCare Core
//! 
//! Domain entities, services, and ports for tenant-scoped care coordination.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
