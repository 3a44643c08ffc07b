//! Marketplace review API library.
//!
//! Exposes the request handler, its gateway envelope, configuration, state
//! and routing so integration tests and the binary entrypoint can both
//! access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
