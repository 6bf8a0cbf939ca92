//! Tinta is a small self-hosted blog administration panel. Authenticated
//! admins manage posts (with optional image uploads) and user accounts over
//! server-rendered HTML.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
