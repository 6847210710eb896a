//! Employee domain model.
//!
//! # Responsibility
//! - Define the employee record returned by read paths.
//! - Define write-side inputs, including tri-state patches for sparse fields.
//!
//! # Invariants
//! - Every employee is identified by the store key name, never by content.
//! - Sparse fields are absent (not empty) when never set.

pub mod employee;
