//! Application services: use-case orchestration between HTTP and storage.

pub mod admin;
pub mod auth;
pub mod error;
pub mod repos;
