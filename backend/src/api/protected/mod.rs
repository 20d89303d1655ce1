//! Example resource that is only reachable with a valid bearer token.

pub mod handlers;
pub mod routes;
