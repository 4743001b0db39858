//! InferCircle Access Backend
//!
//! This crate gates the InferCircle TGE dashboard: time-bounded access
//! grants (paid subscriptions and invite codes) plus payment
//! reconciliation against the provider, idempotent by transaction
//! reference.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
