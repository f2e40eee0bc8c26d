//! Shared-secret API key authorizer.
//!
//! Compares the token presented by a caller against a secret resolved from
//! the [`SecretStore`](common::SecretStore) and produces an
//! [`AccessDecision`](common::protocol::AccessDecision) for the requested
//! resource.
//!
//! # Failure semantics
//!
//! A wrong token and an unreachable secret store both surface as
//! [`AuthError::Unauthorized`]. The cause is logged, never returned, so a
//! caller cannot tell the two apart.

mod decision;
mod policy;

pub use decision::{AuthError, Authorizer};
pub use policy::{generate_policy, INVOKE_ACTION, POLICY_VERSION};
