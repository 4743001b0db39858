//! Identity HTTP adapter - profile synchronization.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::identity_routes;
