pub use super::traits::{
    ClinicOps, SessionOps, SubscriptionOps, SuperAdminOps, SupportTicketOps, TurnOps,
};

/// Database adapter trait for persistence.
///
/// Combines all entity-specific operation traits. Any type that implements
/// all sub-traits automatically implements `DatabaseAdapter` via the
/// blanket impl.
pub trait DatabaseAdapter:
    ClinicOps + SubscriptionOps + SupportTicketOps + TurnOps + SuperAdminOps + SessionOps
{
}

impl<T> DatabaseAdapter for T where
    T: ClinicOps + SubscriptionOps + SupportTicketOps + TurnOps + SuperAdminOps + SessionOps
{
}

#[cfg(feature = "sqlx-postgres")]
pub mod sqlx_adapter {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::config::PoolConfig;
    use crate::error::{ClinicResult, DatabaseError};
    use crate::types::{
        Clinic, CreateClinic, CreateMessage, CreateSession, CreateSubscription,
        CreateSupportTicket, CreateTurn, Message, Session, Subscription, SuperAdmin,
        SupportTicket, TicketStatus, Turn, TurnStatus, normalize_email,
    };

    /// PostgreSQL database adapter via SQLx.
    #[derive(Clone)]
    pub struct SqlxAdapter {
        pool: PgPool,
    }

    impl SqlxAdapter {
        pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
            let pool = PgPool::connect(database_url).await?;
            Ok(Self { pool })
        }

        pub async fn with_config(
            database_url: &str,
            config: PoolConfig,
        ) -> Result<Self, sqlx::Error> {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(config.acquire_timeout)
                .idle_timeout(config.idle_timeout)
                .max_lifetime(config.max_lifetime)
                .connect(database_url)
                .await?;
            Ok(Self { pool })
        }

        /// Apply the embedded schema migrations.
        pub async fn migrate(&self) -> Result<(), DatabaseError> {
            sqlx::migrate!("./migrations").run(&self.pool).await?;
            Ok(())
        }

        pub fn pool_stats(&self) -> PoolStats {
            PoolStats {
                size: self.pool.size(),
                idle: self.pool.num_idle(),
            }
        }

        pub async fn close(&self) {
            self.pool.close().await;
        }
    }

    #[derive(Debug, Clone)]
    pub struct PoolStats {
        pub size: u32,
        pub idle: usize,
    }

    // -- ClinicOps --

    #[async_trait]
    impl ClinicOps for SqlxAdapter {
        async fn create_clinic(&self, create: CreateClinic) -> ClinicResult<Clinic> {
            let id = create.id.unwrap_or_else(|| Uuid::new_v4().to_string());
            let now = Utc::now();

            let clinic = sqlx::query_as::<_, Clinic>(
                r#"
                INSERT INTO clinics (id, email, slug, name, logo, ticket_language, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
                "#,
            )
            .bind(&id)
            .bind(normalize_email(&create.email))
            .bind(&create.slug)
            .bind(&create.name)
            .bind(&create.logo)
            .bind(create.ticket_language.as_deref().unwrap_or("en"))
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

            Ok(clinic)
        }

        async fn get_clinic_by_id(&self, id: &str) -> ClinicResult<Option<Clinic>> {
            let clinic = sqlx::query_as::<_, Clinic>("SELECT * FROM clinics WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(clinic)
        }

        async fn get_clinic_by_email(&self, email: &str) -> ClinicResult<Option<Clinic>> {
            let clinic = sqlx::query_as::<_, Clinic>("SELECT * FROM clinics WHERE email = $1")
                .bind(normalize_email(email))
                .fetch_optional(&self.pool)
                .await?;
            Ok(clinic)
        }

        async fn get_clinic_by_slug(&self, slug: &str) -> ClinicResult<Option<Clinic>> {
            let clinic = sqlx::query_as::<_, Clinic>("SELECT * FROM clinics WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;
            Ok(clinic)
        }
    }

    // -- SubscriptionOps --

    #[async_trait]
    impl SubscriptionOps for SqlxAdapter {
        async fn create_subscription(
            &self,
            create: CreateSubscription,
        ) -> ClinicResult<Subscription> {
            let now = Utc::now();
            let subscription = sqlx::query_as::<_, Subscription>(
                r#"
                INSERT INTO subscriptions (id, clinic_id, status, plan, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&create.clinic_id)
            .bind(&create.status)
            .bind(&create.plan)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

            Ok(subscription)
        }

        async fn get_subscription_by_clinic(
            &self,
            clinic_id: &str,
        ) -> ClinicResult<Option<Subscription>> {
            let subscription = sqlx::query_as::<_, Subscription>(
                "SELECT * FROM subscriptions WHERE clinic_id = $1",
            )
            .bind(clinic_id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(subscription)
        }
    }

    // -- SupportTicketOps --

    #[async_trait]
    impl SupportTicketOps for SqlxAdapter {
        async fn create_support_ticket(
            &self,
            create: CreateSupportTicket,
        ) -> ClinicResult<SupportTicket> {
            let id = create.id.unwrap_or_else(|| Uuid::new_v4().to_string());
            let created_at = create.created_at.unwrap_or_else(Utc::now);

            let ticket = sqlx::query_as::<_, SupportTicket>(
                r#"
                INSERT INTO support_tickets (id, clinic_id, subject, status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(&id)
            .bind(&create.clinic_id)
            .bind(&create.subject)
            .bind(create.status.as_str())
            .bind(created_at)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;

            Ok(ticket)
        }

        async fn create_message(&self, create: CreateMessage) -> ClinicResult<Message> {
            let message = sqlx::query_as::<_, Message>(
                r#"
                INSERT INTO messages (id, ticket_id, sender, body, created_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&create.ticket_id)
            .bind(create.sender.as_str())
            .bind(&create.body)
            .bind(create.created_at.unwrap_or_else(Utc::now))
            .fetch_one(&self.pool)
            .await?;

            Ok(message)
        }

        async fn get_latest_open_ticket(
            &self,
            clinic_id: &str,
        ) -> ClinicResult<Option<SupportTicket>> {
            let ticket = sqlx::query_as::<_, SupportTicket>(
                r#"
                SELECT * FROM support_tickets
                WHERE clinic_id = $1 AND status <> $2
                ORDER BY created_at DESC, id DESC
                LIMIT 1
                "#,
            )
            .bind(clinic_id)
            .bind(TicketStatus::Closed.as_str())
            .fetch_optional(&self.pool)
            .await?;
            Ok(ticket)
        }

        async fn list_ticket_messages(&self, ticket_id: &str) -> ClinicResult<Vec<Message>> {
            let messages = sqlx::query_as::<_, Message>(
                "SELECT * FROM messages WHERE ticket_id = $1 ORDER BY created_at ASC, id ASC",
            )
            .bind(ticket_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(messages)
        }
    }

    // -- TurnOps --

    #[async_trait]
    impl TurnOps for SqlxAdapter {
        async fn create_turn(&self, create: CreateTurn) -> ClinicResult<Turn> {
            let id = create.id.unwrap_or_else(|| Uuid::new_v4().to_string());

            let turn = sqlx::query_as::<_, Turn>(
                r#"
                INSERT INTO turns (id, clinic_id, ticket_code, status, position, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(&id)
            .bind(&create.clinic_id)
            .bind(&create.ticket_code)
            .bind(create.status.as_str())
            .bind(create.position)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

            Ok(turn)
        }

        async fn list_active_turns(&self, clinic_id: &str) -> ClinicResult<Vec<Turn>> {
            let turns = sqlx::query_as::<_, Turn>(
                r#"
                SELECT * FROM turns
                WHERE clinic_id = $1 AND status <> $2
                ORDER BY position ASC, id ASC
                "#,
            )
            .bind(clinic_id)
            .bind(TurnStatus::Cancelled.as_str())
            .fetch_all(&self.pool)
            .await?;
            Ok(turns)
        }
    }

    // -- SuperAdminOps --

    #[async_trait]
    impl SuperAdminOps for SqlxAdapter {
        async fn upsert_super_admin(
            &self,
            email: &str,
            password_hash: &str,
        ) -> ClinicResult<SuperAdmin> {
            let now = Utc::now();
            let admin = sqlx::query_as::<_, SuperAdmin>(
                r#"
                INSERT INTO super_admins (id, email, password, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $4)
                ON CONFLICT (email) DO UPDATE
                SET password = EXCLUDED.password, updated_at = EXCLUDED.updated_at
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(email)
            .bind(password_hash)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

            Ok(admin)
        }

        async fn get_super_admin_by_email(
            &self,
            email: &str,
        ) -> ClinicResult<Option<SuperAdmin>> {
            let admin =
                sqlx::query_as::<_, SuperAdmin>("SELECT * FROM super_admins WHERE email = $1")
                    .bind(email)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(admin)
        }

        async fn count_super_admins(&self, email: &str) -> ClinicResult<usize> {
            let count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM super_admins WHERE email = $1")
                    .bind(email)
                    .fetch_one(&self.pool)
                    .await?;
            Ok(count as usize)
        }
    }

    // -- SessionOps --

    #[async_trait]
    impl SessionOps for SqlxAdapter {
        async fn create_session(&self, create: CreateSession) -> ClinicResult<Session> {
            let session = sqlx::query_as::<_, Session>(
                r#"
                INSERT INTO sessions (id, token, user_email, expires_at, created_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(format!("session_{}", Uuid::new_v4().simple()))
            .bind(&create.user_email)
            .bind(create.expires_at)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

            Ok(session)
        }

        async fn get_session(&self, token: &str) -> ClinicResult<Option<Session>> {
            let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
            Ok(session)
        }
    }
}
