//! Shared persistence handle.
//!
//! The gateway is constructed once per process. When the database adapter
//! cannot be built, the gateway keeps the failure reason instead of the
//! handle, and every operation that needs the database fails fast with
//! [`ClinicError::GatewayUnavailable`]. Routes that never touch the database
//! (such as `/health`) keep working.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use crate::adapters::DatabaseAdapter;
use crate::error::{ClinicError, ClinicResult};
use crate::logger::Logger;

enum GatewayState<DB> {
    Ready(Arc<DB>),
    Unavailable { reason: String },
}

/// Process-wide database handle with an explicit "not initialized" state.
pub struct PersistenceGateway<DB> {
    state: GatewayState<DB>,
}

impl<DB: DatabaseAdapter> PersistenceGateway<DB> {
    /// Gateway over an already constructed adapter.
    pub fn ready(database: DB) -> Self {
        Self {
            state: GatewayState::Ready(Arc::new(database)),
        }
    }

    /// Gateway that rejects every operation with `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: GatewayState::Unavailable {
                reason: reason.into(),
            },
        }
    }

    /// Await adapter construction and capture the outcome.
    ///
    /// Never fails: a construction error is logged and stored.
    pub async fn initialize<F, E>(connect: F, logger: &dyn Logger) -> Self
    where
        F: Future<Output = Result<DB, E>>,
        E: Display,
    {
        match connect.await {
            Ok(database) => {
                logger.info("Persistence gateway ready");
                Self::ready(database)
            }
            Err(err) => {
                let reason = err.to_string();
                logger.error(&format!(
                    "Persistence gateway unavailable, database routes will fail: {}",
                    reason
                ));
                Self::unavailable(reason)
            }
        }
    }

    /// The shared database handle, or `GatewayUnavailable`.
    pub fn database(&self) -> ClinicResult<&Arc<DB>> {
        match &self.state {
            GatewayState::Ready(database) => Ok(database),
            GatewayState::Unavailable { reason } => {
                Err(ClinicError::GatewayUnavailable(reason.clone()))
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, GatewayState::Ready(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            GatewayState::Ready(_) => None,
            GatewayState::Unavailable { reason } => Some(reason),
        }
    }
}

impl<DB> std::fmt::Debug for PersistenceGateway<DB> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            GatewayState::Ready(_) => f.write_str("PersistenceGateway::Ready"),
            GatewayState::Unavailable { reason } => f
                .debug_struct("PersistenceGateway::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryDatabaseAdapter;
    use crate::logger::test_support::RecordingLogger;

    #[tokio::test]
    async fn test_initialize_success_is_ready() {
        let logger = RecordingLogger::default();
        let gateway = PersistenceGateway::initialize(
            async { Ok::<_, std::io::Error>(MemoryDatabaseAdapter::new()) },
            &logger,
        )
        .await;

        assert!(gateway.is_ready());
        assert!(gateway.database().is_ok());
        assert_eq!(gateway.unavailable_reason(), None);
    }

    #[tokio::test]
    async fn test_initialize_failure_stores_sentinel() {
        let logger = RecordingLogger::default();
        let gateway: PersistenceGateway<MemoryDatabaseAdapter> = PersistenceGateway::initialize(
            async { Err::<MemoryDatabaseAdapter, _>("connection refused") },
            &logger,
        )
        .await;

        assert!(!gateway.is_ready());
        assert_eq!(gateway.unavailable_reason(), Some("connection refused"));
        match gateway.database() {
            Err(ClinicError::GatewayUnavailable(reason)) => {
                assert_eq!(reason, "connection refused")
            }
            other => panic!("expected GatewayUnavailable, got {:?}", other.map(|_| ())),
        }

        let lines = logger.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, "error");
        assert!(lines[0].1.contains("connection refused"));
    }
}
