//! Employee data-access core.
//! Five CRUD operations over `Employee` entities in a key/entity datastore.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{
    parse_badges, Employee, EmployeeId, EmployeeUpdate, FieldPatch, NewEmployee,
};
pub use repo::employee_repo::{
    DatastoreEmployeeRepository, EmployeeRepository, RepoError, RepoResult, EMPLOYEE_KIND,
};
pub use service::employee_service::EmployeeService;
pub use store::{Datastore, Entity, Key, SqliteDatastore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
