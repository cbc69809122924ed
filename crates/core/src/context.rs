use std::sync::Arc;

use crate::adapters::DatabaseAdapter;
use crate::config::ClinicConfig;
use crate::error::ClinicResult;
use crate::gateway::PersistenceGateway;
use crate::session::SessionManager;

/// Shared state handed to every service and HTTP handler.
///
/// Cloning is cheap; all members are reference counted.
pub struct ClinicContext<DB: DatabaseAdapter> {
    pub config: Arc<ClinicConfig>,
    pub gateway: Arc<PersistenceGateway<DB>>,
    pub session_manager: Arc<SessionManager<DB>>,
}

impl<DB: DatabaseAdapter> ClinicContext<DB> {
    pub fn new(config: Arc<ClinicConfig>, gateway: Arc<PersistenceGateway<DB>>) -> Self {
        let session_manager = Arc::new(SessionManager::new(gateway.clone()));
        Self {
            config,
            gateway,
            session_manager,
        }
    }

    /// Shortcut for `self.gateway.database()`.
    pub fn database(&self) -> ClinicResult<&Arc<DB>> {
        self.gateway.database()
    }
}

impl<DB: DatabaseAdapter> Clone for ClinicContext<DB> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            gateway: self.gateway.clone(),
            session_manager: self.session_manager.clone(),
        }
    }
}
