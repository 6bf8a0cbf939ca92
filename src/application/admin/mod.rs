//! Administrative services backing the admin panel.

pub mod posts;
pub mod users;
