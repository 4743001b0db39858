//! Flutterwave adapter - Hosted checkout and transaction verification.

mod gateway;
mod types;

pub use gateway::{FlutterwaveConfig, FlutterwaveGateway};
