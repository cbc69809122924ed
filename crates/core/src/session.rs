use std::sync::Arc;

use crate::adapters::DatabaseAdapter;
use crate::error::ClinicResult;
use crate::gateway::PersistenceGateway;
use crate::types::Session;

/// Read-only view over sessions issued by the authentication provider.
pub struct SessionManager<DB: DatabaseAdapter> {
    gateway: Arc<PersistenceGateway<DB>>,
}

impl<DB: DatabaseAdapter> SessionManager<DB> {
    pub fn new(gateway: Arc<PersistenceGateway<DB>>) -> Self {
        Self { gateway }
    }

    /// Get a live session by token.
    ///
    /// Unknown and expired tokens both yield `None`. Expired rows are left
    /// for the provider to clean up.
    pub async fn get_session(&self, token: &str) -> ClinicResult<Option<Session>> {
        if token.is_empty() {
            return Ok(None);
        }

        let session = self.gateway.database()?.get_session(token).await?;

        Ok(session.filter(|session| {
            if session.is_expired() {
                tracing::debug!(session_id = %session.id, "Ignoring expired session");
                false
            } else {
                true
            }
        }))
    }
}
