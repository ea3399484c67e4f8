// Auth module - token validation against the identity provider's signatures

pub mod extractors;
pub mod models;


pub use extractors::AuthedUser;
