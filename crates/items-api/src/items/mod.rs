//! The item collection and its identity rules.
//!
//! Ids are v4 UUIDs generated on create and never change. Lookups are linear
//! scans; the collection is sized for demo workloads.

pub mod store;

pub use store::{ItemStore, StoreError};
