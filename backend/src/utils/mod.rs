//! Collection of general utilities that do not fit a specific domain module.

pub mod jwt;
