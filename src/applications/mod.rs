// Applications module - submission, review workflow, and resume handling

pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;

mod tests;

pub use routes::applications_routes;
