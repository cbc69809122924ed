//! # Clinic Queue Core
//!
//! Core abstractions for the clinic-queue service: domain types, error
//! handling, configuration, persistence adapters and the shared
//! persistence gateway.

pub mod adapters;
pub mod config;
pub mod context;
pub mod error;
pub mod extractors;
pub mod gateway;
pub mod logger;
pub mod password;
pub mod session;
pub mod types;
pub mod types_impls;

pub use adapters::{
    ClinicOps, DatabaseAdapter, MemoryDatabaseAdapter, SessionOps, SubscriptionOps,
    SuperAdminOps, SupportTicketOps, TurnOps,
};
#[cfg(feature = "sqlx-postgres")]
pub use adapters::{PoolStats, SqlxAdapter};
pub use config::{ClinicConfig, PasswordConfig, PoolConfig, SessionConfig};
pub use context::ClinicContext;
pub use error::{ClinicError, ClinicResult, DatabaseError, validation_message};
#[cfg(feature = "axum")]
pub use extractors::OptionalSession;
pub use gateway::PersistenceGateway;
pub use logger::{Logger, TracingLogger};
pub use password::{hash_password, verify_password};
pub use session::SessionManager;
pub use types::{
    ActivationStatus, Clinic, ClinicDisplay, CreateClinic, CreateMessage, CreateSession,
    CreateSubscription, CreateSupportTicket, CreateTurn, ErrorMessageResponse, Message,
    MessageSender, Session, Subscription, SuperAdmin, SupportTicket, TicketStatus, TicketThread,
    Turn, TurnSnapshot, TurnStatus, normalize_email,
};
