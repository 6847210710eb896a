//! Employee record and write inputs.
//!
//! # Responsibility
//! - Define the canonical employee shape shared by repository and callers.
//! - Translate form-shaped inputs (comma-joined badges, optional object key)
//!   into typed write requests.
//!
//! # Invariants
//! - `id` is generated on create and never changes afterwards.
//! - `object_key` and `badges` are `None` rather than empty.
//! - `FieldPatch::Set` with an empty value is treated as `FieldPatch::Clear`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque employee identifier; also the store key name.
pub type EmployeeId = String;

/// Separator used by the form-shaped badges field.
pub const BADGE_SEPARATOR: char = ',';

/// Stored employee as returned by list/load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Taken from the store key name.
    pub id: EmployeeId,
    pub full_name: String,
    pub job_title: String,
    pub location: String,
    /// Reference to an externally stored resource (avatar, document).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_key: Option<String>,
    /// Ordered badge names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<String>>,
}

/// Generates a fresh random employee id.
pub fn generate_employee_id() -> EmployeeId {
    Uuid::new_v4().to_string()
}

/// Splits a comma-joined badge string into an ordered badge list.
///
/// Returns `None` for an empty input so the field stays sparse. Segments are
/// kept verbatim; `"a,,b"` yields three badges including an empty one.
pub fn parse_badges(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return None;
    }
    Some(raw.split(BADGE_SEPARATOR).map(str::to_string).collect())
}

/// Input for creating an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEmployee {
    pub full_name: String,
    pub location: String,
    pub job_title: String,
    pub object_key: Option<String>,
    pub badges: Option<Vec<String>>,
}

impl NewEmployee {
    /// Creates an input with the three required fields set.
    pub fn new(
        full_name: impl Into<String>,
        location: impl Into<String>,
        job_title: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            location: location.into(),
            job_title: job_title.into(),
            object_key: None,
            badges: None,
        }
    }

    /// Sets the object key unless it is empty.
    pub fn with_object_key(mut self, object_key: impl Into<String>) -> Self {
        let object_key = object_key.into();
        self.object_key = (!object_key.is_empty()).then_some(object_key);
        self
    }

    /// Sets the badges unless the list is empty.
    pub fn with_badges<I, S>(mut self, badges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let badges: Vec<String> = badges.into_iter().map(Into::into).collect();
        self.badges = (!badges.is_empty()).then_some(badges);
        self
    }

    /// Builds an input from form-shaped arguments.
    ///
    /// `badges` is the comma-joined form value; empty values leave the
    /// corresponding sparse field unset.
    pub fn from_form(
        object_key: Option<&str>,
        full_name: &str,
        location: &str,
        job_title: &str,
        badges: Option<&str>,
    ) -> Self {
        let mut input = Self::new(full_name, location, job_title);
        if let Some(object_key) = object_key {
            input = input.with_object_key(object_key);
        }
        input.badges = badges.and_then(parse_badges);
        input
    }
}

/// Patch for one sparse property on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Leave the stored value untouched.
    #[default]
    Keep,
    /// Replace the stored value.
    Set(T),
    /// Remove the property entirely.
    Clear,
}

impl<T> FieldPatch<T> {
    /// Maps `Some` to `Set` and `None` to `Keep`.
    pub fn keep_if_none(value: Option<T>) -> Self {
        value.map_or(Self::Keep, Self::Set)
    }

    /// Maps `Some` to `Set` and `None` to `Clear`.
    pub fn clear_if_none(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}

/// Input for updating an existing employee.
///
/// The three required fields are always overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub full_name: String,
    pub location: String,
    pub job_title: String,
    pub object_key: FieldPatch<String>,
    pub badges: FieldPatch<Vec<String>>,
}

impl EmployeeUpdate {
    /// Creates an update that keeps both sparse fields as stored.
    pub fn new(
        full_name: impl Into<String>,
        location: impl Into<String>,
        job_title: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            location: location.into(),
            job_title: job_title.into(),
            object_key: FieldPatch::Keep,
            badges: FieldPatch::Keep,
        }
    }

    pub fn object_key(mut self, patch: FieldPatch<String>) -> Self {
        self.object_key = patch;
        self
    }

    pub fn badges(mut self, patch: FieldPatch<Vec<String>>) -> Self {
        self.badges = patch;
        self
    }

    /// Builds an update from form-shaped arguments.
    ///
    /// An empty `object_key` keeps the stored value; an empty `badges`
    /// clears the stored badges.
    pub fn from_form(
        object_key: Option<&str>,
        full_name: &str,
        location: &str,
        job_title: &str,
        badges: Option<&str>,
    ) -> Self {
        let object_key = object_key
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Self::new(full_name, location, job_title)
            .object_key(FieldPatch::keep_if_none(object_key))
            .badges(FieldPatch::clear_if_none(badges.and_then(parse_badges)))
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_employee_id, parse_badges, EmployeeUpdate, FieldPatch, NewEmployee};
    use uuid::Uuid;

    #[test]
    fn parse_badges_splits_on_commas_verbatim() {
        assert_eq!(
            parse_badges("python,rust"),
            Some(vec!["python".to_string(), "rust".to_string()])
        );
        assert_eq!(
            parse_badges("a, b"),
            Some(vec!["a".to_string(), " b".to_string()])
        );
        assert_eq!(parse_badges(""), None);
    }

    #[test]
    fn generated_ids_are_uuid_strings() {
        let id = generate_employee_id();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, generate_employee_id());
    }

    #[test]
    fn new_employee_builders_skip_empty_values() {
        let input = NewEmployee::new("Ada", "London", "Engineer")
            .with_object_key("")
            .with_badges(Vec::<String>::new());
        assert_eq!(input.object_key, None);
        assert_eq!(input.badges, None);
    }

    #[test]
    fn update_from_form_keeps_object_key_and_clears_badges_when_empty() {
        let update = EmployeeUpdate::from_form(Some(""), "Ada", "London", "Engineer", Some(""));
        assert_eq!(update.object_key, FieldPatch::Keep);
        assert_eq!(update.badges, FieldPatch::Clear);

        let update = EmployeeUpdate::from_form(Some("avatar.png"), "Ada", "Paris", "CTO", Some("x"));
        assert_eq!(update.object_key, FieldPatch::Set("avatar.png".to_string()));
        assert_eq!(update.badges, FieldPatch::Set(vec!["x".to_string()]));
    }
}
