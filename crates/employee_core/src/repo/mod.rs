//! Repository layer over the key/entity datastore.
//!
//! # Responsibility
//! - Define use-case oriented employee data access contracts.
//! - Isolate entity/property encoding from service orchestration.
//!
//! # Invariants
//! - Every operation reports store failures as errors; nothing is swallowed.
//! - Not-found is a semantic result (`None` or `NotFound`), distinct from
//!   transport errors.

pub mod employee_repo;
