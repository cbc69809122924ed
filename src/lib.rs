//! # Clinic Queue
//!
//! Backend for a clinic queue-management product: clinic onboarding and
//! activation status, pending-activation support tickets, queue snapshots
//! and the public waiting-room TV display.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clinic_queue::{ClinicConfig, ClinicQueueBuilder};
//! use clinic_queue::adapters::MemoryDatabaseAdapter;
//! use clinic_queue::handlers::AxumIntegration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClinicConfig::new().login_path("/login");
//!
//!     let queue = ClinicQueueBuilder::new(config)
//!         .database(MemoryDatabaseAdapter::new())
//!         .build()?;
//!
//!     let app = queue.app_router();
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

// ClinicQueue lives in the root crate because it ties the services
// (clinic-queue-api) to the core state (clinic-queue-core).
pub mod core;
pub mod handlers;

pub use clinic_queue_core::{
    ActivationStatus, Clinic, ClinicConfig, ClinicContext, ClinicDisplay, ClinicError,
    ClinicResult, DatabaseAdapter, DatabaseError, Logger, Message, MessageSender,
    PasswordConfig, PersistenceGateway, PoolConfig, Session, SessionConfig, SessionManager,
    SupportTicket, TicketStatus, TicketThread, TracingLogger, Turn, TurnSnapshot, TurnStatus,
};

pub mod types {
    pub use clinic_queue_core::{
        ActivationStatus, Clinic, ClinicDisplay, CreateClinic, CreateMessage, CreateSession,
        CreateSubscription, CreateSupportTicket, CreateTurn, Message, MessageSender, Session,
        Subscription, SuperAdmin, SupportTicket, TicketStatus, TicketThread, Turn, TurnSnapshot,
        TurnStatus,
    };
}

pub mod adapters {
    pub use clinic_queue_core::{
        ClinicOps, DatabaseAdapter, MemoryDatabaseAdapter, SessionOps, SubscriptionOps,
        SuperAdminOps, SupportTicketOps, TurnOps,
    };

    #[cfg(feature = "sqlx-postgres")]
    pub use clinic_queue_core::{PoolStats, SqlxAdapter};
}

pub mod services {
    pub use clinic_queue_api::*;
}

pub use core::{ClinicQueue, ClinicQueueBuilder, StorageBackend, TypedClinicQueueBuilder};

#[cfg(feature = "axum")]
pub use handlers::AxumIntegration;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        ClinicOps, MemoryDatabaseAdapter, SessionOps, SubscriptionOps, SuperAdminOps,
    };
    use crate::services::ProvisionAdminRequest;
    use crate::types::{CreateClinic, CreateSession, CreateSubscription};

    fn test_config() -> ClinicConfig {
        ClinicConfig::new().password_min_length(10)
    }

    fn create_test_queue() -> ClinicQueue<MemoryDatabaseAdapter> {
        ClinicQueueBuilder::new(test_config())
            .database(MemoryDatabaseAdapter::new())
            .build()
            .expect("Failed to create test queue instance")
    }

    #[tokio::test]
    async fn test_builder_with_ready_database() {
        let queue = create_test_queue();
        assert!(queue.gateway().is_ready());
        assert!(queue.database().is_ok());
        assert_eq!(queue.config().password.min_length, 10);
    }

    #[tokio::test]
    async fn test_failed_connect_yields_unavailable_gateway() {
        let queue = ClinicQueueBuilder::new(test_config())
            .connect(async { Err::<MemoryDatabaseAdapter, _>("connection refused") })
            .await
            .build()
            .unwrap();

        assert!(!queue.gateway().is_ready());
        assert_eq!(queue.gateway().unavailable_reason(), Some("connection refused"));
        assert!(matches!(
            queue.tv_display("sunrise").await,
            Err(ClinicError::GatewayUnavailable(_))
        ));
        assert!(matches!(
            queue.queue_snapshot("sunrise").await,
            Err(ClinicError::GatewayUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let result = ClinicQueueBuilder::new(ClinicConfig::new().login_path("login"))
            .database(MemoryDatabaseAdapter::new())
            .build();
        assert!(matches!(result, Err(ClinicError::Config(_))));
    }

    #[tokio::test]
    async fn test_activation_flow() {
        let queue = create_test_queue();
        let db = queue.database().unwrap().clone();

        let clinic = db
            .create_clinic(CreateClinic::new("front@sunrise.test", "sunrise"))
            .await
            .unwrap();
        let session = db
            .create_session(CreateSession {
                user_email: Some("front@sunrise.test".to_string()),
                expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
            })
            .await
            .unwrap();

        assert_eq!(queue.activation_status(Some(&session)).await.unwrap(), None);

        db.create_subscription(CreateSubscription {
            clinic_id: clinic.id,
            status: "TRIALING".to_string(),
            plan: "BASIC".to_string(),
        })
        .await
        .unwrap();

        let status = queue
            .activation_status(Some(&session))
            .await
            .unwrap()
            .expect("subscription");
        assert_eq!(status.status, "TRIALING");
        assert_eq!(status.plan, "BASIC");
    }

    #[tokio::test]
    async fn test_provision_admin_uses_configured_min_length() {
        let queue = create_test_queue();

        let short = ProvisionAdminRequest {
            email: "ops@clinic-queue.test".to_string(),
            password: "123456789".to_string(),
        };
        assert!(matches!(
            queue.provision_admin(&short).await,
            Err(ClinicError::Validation(_))
        ));

        let ok = ProvisionAdminRequest {
            email: "ops@clinic-queue.test".to_string(),
            password: "1234567890".to_string(),
        };
        let response = queue.provision_admin(&ok).await.unwrap();
        assert!(response.password_configured);

        let db = queue.database().unwrap();
        assert_eq!(
            db.count_super_admins("ops@clinic-queue.test").await.unwrap(),
            1
        );
    }
}
