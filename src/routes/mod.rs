pub mod candidate_routes;
pub mod detail;
pub mod docs;
pub mod health;
pub mod roster;
