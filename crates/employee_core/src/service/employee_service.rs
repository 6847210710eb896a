//! Employee use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Accept form-shaped inputs (comma-joined badges) for legacy callers.
//! - Emit metadata-only log events per operation.
//!
//! # Invariants
//! - Repository errors are returned unchanged after logging.
//! - Log lines carry ids and counts only, never employee field values.

use crate::model::employee::{Employee, EmployeeId, EmployeeUpdate, NewEmployee};
use crate::repo::employee_repo::{EmployeeRepository, RepoError, RepoResult};
use log::{debug, warn};

/// Use-case service wrapper for employee CRUD operations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all employees in store-defined order.
    pub fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let result = self.repo.list_employees();
        match &result {
            Ok(employees) => debug!(
                "event=employee_list module=service status=ok count={}",
                employees.len()
            ),
            Err(err) => log_failure("employee_list", None, err),
        }
        result
    }

    /// Loads one employee by id.
    pub fn load_employee(&self, id: &str) -> RepoResult<Option<Employee>> {
        let result = self.repo.load_employee(id);
        match &result {
            Ok(found) => debug!(
                "event=employee_load module=service status=ok id={id} found={}",
                found.is_some()
            ),
            Err(err) => log_failure("employee_load", Some(id), err),
        }
        result
    }

    /// Creates an employee and returns its generated id.
    pub fn add_employee(&self, input: &NewEmployee) -> RepoResult<EmployeeId> {
        let result = self.repo.add_employee(input);
        match &result {
            Ok(id) => debug!("event=employee_add module=service status=ok id={id}"),
            Err(err) => log_failure("employee_add", None, err),
        }
        result
    }

    /// Creates an employee from form-shaped arguments.
    ///
    /// # Contract
    /// - `badges` is comma-joined; empty leaves the field unset.
    /// - Empty `object_key` leaves the field unset.
    pub fn add_employee_form(
        &self,
        object_key: Option<&str>,
        full_name: &str,
        location: &str,
        job_title: &str,
        badges: Option<&str>,
    ) -> RepoResult<EmployeeId> {
        let input = NewEmployee::from_form(object_key, full_name, location, job_title, badges);
        self.add_employee(&input)
    }

    /// Updates an existing employee.
    ///
    /// Returns `RepoError::NotFound` when the id is not stored.
    pub fn update_employee(&self, id: &str, update: &EmployeeUpdate) -> RepoResult<()> {
        let result = self.repo.update_employee(id, update);
        match &result {
            Ok(()) => debug!("event=employee_update module=service status=ok id={id}"),
            Err(err) => log_failure("employee_update", Some(id), err),
        }
        result
    }

    /// Updates an employee from form-shaped arguments.
    ///
    /// # Contract
    /// - Empty `object_key` keeps the stored value.
    /// - Empty `badges` removes the stored badges.
    pub fn update_employee_form(
        &self,
        id: &str,
        object_key: Option<&str>,
        full_name: &str,
        location: &str,
        job_title: &str,
        badges: Option<&str>,
    ) -> RepoResult<()> {
        let update = EmployeeUpdate::from_form(object_key, full_name, location, job_title, badges);
        self.update_employee(id, &update)
    }

    /// Deletes an employee; deleting a missing id succeeds.
    pub fn delete_employee(&self, id: &str) -> RepoResult<()> {
        let result = self.repo.delete_employee(id);
        match &result {
            Ok(()) => debug!("event=employee_delete module=service status=ok id={id}"),
            Err(err) => log_failure("employee_delete", Some(id), err),
        }
        result
    }

    /// Returns the number of stored employees.
    pub fn employee_count(&self) -> RepoResult<usize> {
        self.list_employees().map(|employees| employees.len())
    }
}

fn log_failure(event: &str, id: Option<&str>, err: &RepoError) {
    let error_code = match err {
        RepoError::Store(_) => "store_failed",
        RepoError::NotFound(_) => "not_found",
        RepoError::InvalidData(_) => "invalid_data",
    };
    warn!(
        "event={event} module=service status=error id={} error_code={error_code} error={err}",
        id.unwrap_or("-")
    );
}
