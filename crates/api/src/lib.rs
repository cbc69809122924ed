//! # Clinic Queue API
//!
//! Framework-agnostic services for the clinic-queue backend. Every service
//! is an async function over a [`ClinicContext`](clinic_queue_core::ClinicContext);
//! the HTTP layer lives in the root crate.

pub mod services;

pub use services::*;
