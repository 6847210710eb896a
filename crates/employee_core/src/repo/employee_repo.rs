//! Employee repository contract and datastore implementation.
//!
//! # Responsibility
//! - Provide the five employee CRUD operations over `Employee` entities.
//! - Keep property naming and sparse-field encoding inside this module.
//!
//! # Invariants
//! - Employee ids come from key names and are never stored as properties.
//! - `object_key` and `badges` properties are written only when non-empty.
//! - Read paths reject malformed entities instead of masking them.

use crate::model::employee::{
    generate_employee_id, Employee, EmployeeId, EmployeeUpdate, FieldPatch, NewEmployee,
};
use crate::store::{Datastore, Entity, StoreError};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store kind holding employee entities.
pub const EMPLOYEE_KIND: &str = "Employee";

const PROP_FULL_NAME: &str = "full_name";
const PROP_JOB_TITLE: &str = "job_title";
const PROP_LOCATION: &str = "location";
const PROP_OBJECT_KEY: &str = "object_key";
const PROP_BADGES: &str = "badges";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    NotFound(EmployeeId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid stored employee data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for employee CRUD operations.
pub trait EmployeeRepository {
    /// Returns every stored employee in store-defined order.
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    /// Point lookup; `Ok(None)` means the id is not stored.
    fn load_employee(&self, id: &str) -> RepoResult<Option<Employee>>;
    /// Persists a new employee under a freshly generated id and returns it.
    fn add_employee(&self, input: &NewEmployee) -> RepoResult<EmployeeId>;
    /// Overwrites required fields and applies sparse-field patches.
    ///
    /// Returns `NotFound` without writing when the id is not stored.
    fn update_employee(&self, id: &str, update: &EmployeeUpdate) -> RepoResult<()>;
    /// Removes the employee; removing a missing id succeeds.
    fn delete_employee(&self, id: &str) -> RepoResult<()>;
}

/// Employee repository backed by a shared datastore handle.
pub struct DatastoreEmployeeRepository<'store, S: Datastore> {
    store: &'store S,
}

impl<'store, S: Datastore> DatastoreEmployeeRepository<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }
}

impl<S: Datastore> EmployeeRepository for DatastoreEmployeeRepository<'_, S> {
    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        self.store
            .query_kind(EMPLOYEE_KIND)?
            .iter()
            .map(employee_from_entity)
            .collect()
    }

    fn load_employee(&self, id: &str) -> RepoResult<Option<Employee>> {
        let key = self.store.key(EMPLOYEE_KIND, id);
        match self.store.get(&key)? {
            Some(entity) => Ok(Some(employee_from_entity(&entity)?)),
            None => Ok(None),
        }
    }

    fn add_employee(&self, input: &NewEmployee) -> RepoResult<EmployeeId> {
        let id = generate_employee_id();
        let mut entity = Entity::new(self.store.key(EMPLOYEE_KIND, &id));
        write_required(&mut entity, &input.full_name, &input.job_title, &input.location);

        if let Some(object_key) = input.object_key.as_deref().filter(|v| !v.is_empty()) {
            entity.set(PROP_OBJECT_KEY, object_key);
        }
        if let Some(badges) = input.badges.as_ref().filter(|v| !v.is_empty()) {
            entity.set(PROP_BADGES, badges_value(badges));
        }

        self.store.put(&entity)?;
        Ok(id)
    }

    fn update_employee(&self, id: &str, update: &EmployeeUpdate) -> RepoResult<()> {
        let key = self.store.key(EMPLOYEE_KIND, id);
        let Some(mut entity) = self.store.get(&key)? else {
            return Err(RepoError::NotFound(id.to_string()));
        };

        write_required(
            &mut entity,
            &update.full_name,
            &update.job_title,
            &update.location,
        );

        match &update.object_key {
            FieldPatch::Keep => {}
            FieldPatch::Set(object_key) if !object_key.is_empty() => {
                entity.set(PROP_OBJECT_KEY, object_key.as_str());
            }
            FieldPatch::Set(_) | FieldPatch::Clear => {
                entity.remove(PROP_OBJECT_KEY);
            }
        }
        match &update.badges {
            FieldPatch::Keep => {}
            FieldPatch::Set(badges) if !badges.is_empty() => {
                entity.set(PROP_BADGES, badges_value(badges));
            }
            FieldPatch::Set(_) | FieldPatch::Clear => {
                entity.remove(PROP_BADGES);
            }
        }

        self.store.put(&entity)?;
        Ok(())
    }

    fn delete_employee(&self, id: &str) -> RepoResult<()> {
        let key = self.store.key(EMPLOYEE_KIND, id);
        self.store.delete(&key)?;
        Ok(())
    }
}

fn write_required(entity: &mut Entity, full_name: &str, job_title: &str, location: &str) {
    entity.set(PROP_FULL_NAME, full_name);
    entity.set(PROP_JOB_TITLE, job_title);
    entity.set(PROP_LOCATION, location);
}

fn badges_value(badges: &[String]) -> Value {
    Value::Array(badges.iter().cloned().map(Value::String).collect())
}

fn employee_from_entity(entity: &Entity) -> RepoResult<Employee> {
    let id = entity.key.name.clone();

    let object_key = match entity.get(PROP_OBJECT_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "employee `{id}` has non-string {PROP_OBJECT_KEY}: {other}"
            )));
        }
    };

    let badges = match entity.get(PROP_BADGES) {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        RepoError::InvalidData(format!(
                            "employee `{id}` has non-string badge: {item}"
                        ))
                    })
                })
                .collect::<RepoResult<Vec<_>>>()?,
        ),
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "employee `{id}` has non-array {PROP_BADGES}: {other}"
            )));
        }
    };

    Ok(Employee {
        full_name: required_str(entity, PROP_FULL_NAME)?,
        job_title: required_str(entity, PROP_JOB_TITLE)?,
        location: required_str(entity, PROP_LOCATION)?,
        object_key,
        badges,
        id,
    })
}

fn required_str(entity: &Entity, name: &str) -> RepoResult<String> {
    entity.get_str(name).map(str::to_string).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "employee `{}` is missing string property {name}",
            entity.key.name
        ))
    })
}
