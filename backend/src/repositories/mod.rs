//! Persistence layer. Each repository owns the queries for one table.

pub mod user_repository;
