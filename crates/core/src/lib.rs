//! Core domain types and data contracts for briefdesk.
//!
//! This crate is pure: domain types, the paginated envelope, the failure
//! taxonomy, resource-key construction, filtering operations, and the
//! `AdvisorSource` trait that every data backend implements. No I/O lives
//! here; the HTTP client and the mock source are separate crates.

pub mod advisory;
pub mod api;
pub mod query;
pub mod source;
