//! Demo server internals: configuration and router construction, exposed
//! as a library so the integration tests can drive the router directly.

pub mod config;
pub mod routes;
