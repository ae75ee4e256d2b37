//! Server-rendered HTML for the roster, create, search and detail screens.

pub mod candidates;
pub mod detail;
pub mod layout;
