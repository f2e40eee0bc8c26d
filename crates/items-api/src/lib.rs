//! Items CRUD API.
//!
//! Requests pass the gateway gate in [`server::middleware`], which runs the
//! shared-secret [`authorizer::Authorizer`], before reaching the handlers in
//! [`server::handlers`]. Handlers work on the [`items::ItemStore`] through a
//! scoped [`db::Session`].

pub mod config;
pub mod db;
pub mod items;
pub mod server;
pub mod telemetry;
