//! Authentication module for user accounts and access control.
//!
//! This module provides password hashing, signup and signin, and the
//! middleware that gates protected routes behind a bearer token.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod routes;
pub mod service;
