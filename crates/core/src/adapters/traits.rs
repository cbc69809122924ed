use async_trait::async_trait;

use crate::error::ClinicResult;
use crate::types::{
    Clinic, CreateClinic, CreateMessage, CreateSession, CreateSubscription, CreateSupportTicket,
    CreateTurn, Message, Session, Subscription, SuperAdmin, SupportTicket, Turn,
};

/// Clinic persistence operations.
#[async_trait]
pub trait ClinicOps: Send + Sync + 'static {
    async fn create_clinic(&self, clinic: CreateClinic) -> ClinicResult<Clinic>;
    async fn get_clinic_by_id(&self, id: &str) -> ClinicResult<Option<Clinic>>;
    async fn get_clinic_by_email(&self, email: &str) -> ClinicResult<Option<Clinic>>;
    async fn get_clinic_by_slug(&self, slug: &str) -> ClinicResult<Option<Clinic>>;
}

/// Subscription persistence operations.
#[async_trait]
pub trait SubscriptionOps: Send + Sync + 'static {
    async fn create_subscription(
        &self,
        subscription: CreateSubscription,
    ) -> ClinicResult<Subscription>;
    async fn get_subscription_by_clinic(&self, clinic_id: &str)
    -> ClinicResult<Option<Subscription>>;
}

/// Support ticket and message persistence operations.
#[async_trait]
pub trait SupportTicketOps: Send + Sync + 'static {
    async fn create_support_ticket(&self, ticket: CreateSupportTicket)
    -> ClinicResult<SupportTicket>;
    async fn create_message(&self, message: CreateMessage) -> ClinicResult<Message>;

    /// Most recently created ticket of the clinic whose status is not `CLOSED`.
    async fn get_latest_open_ticket(&self, clinic_id: &str)
    -> ClinicResult<Option<SupportTicket>>;

    /// Messages of a ticket, oldest first.
    async fn list_ticket_messages(&self, ticket_id: &str) -> ClinicResult<Vec<Message>>;
}

/// Queue turn persistence operations.
#[async_trait]
pub trait TurnOps: Send + Sync + 'static {
    async fn create_turn(&self, turn: CreateTurn) -> ClinicResult<Turn>;

    /// Turns of the clinic whose status is not `CANCELLED`, in service order.
    async fn list_active_turns(&self, clinic_id: &str) -> ClinicResult<Vec<Turn>>;
}

/// Super admin credential persistence operations.
#[async_trait]
pub trait SuperAdminOps: Send + Sync + 'static {
    /// Insert the admin, or overwrite the password of the existing row with
    /// the same email.
    async fn upsert_super_admin(&self, email: &str, password_hash: &str)
    -> ClinicResult<SuperAdmin>;
    async fn get_super_admin_by_email(&self, email: &str) -> ClinicResult<Option<SuperAdmin>>;
    async fn count_super_admins(&self, email: &str) -> ClinicResult<usize>;
}

/// Session lookups. Sessions are issued by the authentication provider.
#[async_trait]
pub trait SessionOps: Send + Sync + 'static {
    async fn create_session(&self, session: CreateSession) -> ClinicResult<Session>;
    async fn get_session(&self, token: &str) -> ClinicResult<Option<Session>>;
}
