// Users module - profiles and the write-once role choice

pub mod handlers;
pub mod models;
pub mod routes;

mod tests;

pub use handlers::require_recruiter;
pub use routes::users_routes;
