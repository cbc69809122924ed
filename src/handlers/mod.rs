#[cfg(feature = "axum")]
pub mod axum;

#[cfg(feature = "axum")]
pub use self::axum::AxumIntegration;
#[cfg(feature = "axum")]
pub use clinic_queue_core::OptionalSession;
