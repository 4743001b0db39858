//! Entitlement HTTP adapter - invite codes and access decisions.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::entitlement_routes;
