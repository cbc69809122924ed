use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use clinic_queue_api::{
    PendingActivationView, ProvisionAdminRequest, ProvisionAdminResponse,
    check_activation_status, pending_activation_page, provision_super_admin, queue_snapshot,
    tv_display,
};
use clinic_queue_core::{
    ActivationStatus, ClinicConfig, ClinicContext, ClinicDisplay, ClinicResult, DatabaseAdapter,
    PersistenceGateway, Session, TurnSnapshot,
};

/// The assembled clinic-queue service, generic over the database adapter.
pub struct ClinicQueue<DB: DatabaseAdapter> {
    context: ClinicContext<DB>,
}

/// Initial builder for configuring ClinicQueue.
///
/// Call `.database(adapter)` or `.connect(future)` to obtain a
/// [`TypedClinicQueueBuilder`].
pub struct ClinicQueueBuilder {
    config: ClinicConfig,
}

/// Typed builder returned by [`ClinicQueueBuilder::database`] and
/// [`ClinicQueueBuilder::connect`].
pub struct TypedClinicQueueBuilder<DB: DatabaseAdapter> {
    config: ClinicConfig,
    gateway: PersistenceGateway<DB>,
}

impl ClinicQueueBuilder {
    pub fn new(config: ClinicConfig) -> Self {
        Self { config }
    }

    /// Use an already constructed adapter.
    pub fn database<DB: DatabaseAdapter>(self, database: DB) -> TypedClinicQueueBuilder<DB> {
        TypedClinicQueueBuilder {
            config: self.config,
            gateway: PersistenceGateway::ready(database),
        }
    }

    /// Construct the adapter once through the persistence gateway.
    ///
    /// A failed connection does not abort startup: the service comes up with
    /// an unavailable gateway and every database-backed operation reports
    /// `GatewayUnavailable`.
    pub async fn connect<DB, F, E>(self, connect: F) -> TypedClinicQueueBuilder<DB>
    where
        DB: DatabaseAdapter,
        F: Future<Output = Result<DB, E>>,
        E: Display,
    {
        let gateway = PersistenceGateway::initialize(connect, self.config.logger.as_ref()).await;
        TypedClinicQueueBuilder {
            config: self.config,
            gateway,
        }
    }
}

impl<DB: DatabaseAdapter> TypedClinicQueueBuilder<DB> {
    /// Build the ClinicQueue instance.
    pub fn build(self) -> ClinicResult<ClinicQueue<DB>> {
        self.config.validate()?;

        let context = ClinicContext::new(Arc::new(self.config), Arc::new(self.gateway));
        Ok(ClinicQueue { context })
    }
}

impl<DB: DatabaseAdapter> ClinicQueue<DB> {
    /// Shared state for handlers and services.
    pub fn context(&self) -> &ClinicContext<DB> {
        &self.context
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClinicConfig {
        &self.context.config
    }

    pub fn gateway(&self) -> &PersistenceGateway<DB> {
        &self.context.gateway
    }

    /// Get the database adapter, or `GatewayUnavailable`.
    pub fn database(&self) -> ClinicResult<&Arc<DB>> {
        self.context.database()
    }

    pub async fn activation_status(
        &self,
        session: Option<&Session>,
    ) -> ClinicResult<Option<ActivationStatus>> {
        check_activation_status(session, &self.context).await
    }

    pub async fn pending_activation(
        &self,
        session: Option<&Session>,
    ) -> ClinicResult<Option<PendingActivationView>> {
        pending_activation_page(session, &self.context).await
    }

    pub async fn queue_snapshot(&self, slug: &str) -> ClinicResult<Vec<TurnSnapshot>> {
        queue_snapshot(slug, &self.context).await
    }

    pub async fn tv_display(&self, slug: &str) -> ClinicResult<ClinicDisplay> {
        tv_display(slug, &self.context).await
    }

    /// Create or reset the bootstrap super admin.
    pub async fn provision_admin(
        &self,
        request: &ProvisionAdminRequest,
    ) -> ClinicResult<ProvisionAdminResponse> {
        provision_super_admin(request, &self.context).await
    }
}
