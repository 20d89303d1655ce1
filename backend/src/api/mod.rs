//! Central module for organizing the application's API endpoints outside of
//! the authentication routes, which live in `auth`.

pub mod common;
pub mod protected;
