use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::{ClinicError, ClinicResult, DatabaseError};
use crate::types::{
    Clinic, CreateClinic, CreateMessage, CreateSession, CreateSubscription, CreateSupportTicket,
    CreateTurn, Message, Session, Subscription, SuperAdmin, SupportTicket, TicketStatus, Turn,
    TurnStatus, normalize_email,
};

use super::{ClinicOps, SessionOps, SubscriptionOps, SuperAdminOps, SupportTicketOps, TurnOps};

/// In-memory database adapter for tests and local development.
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabaseAdapter {
    clinics: Arc<Mutex<HashMap<String, Clinic>>>,
    email_index: Arc<Mutex<HashMap<String, String>>>,
    slug_index: Arc<Mutex<HashMap<String, String>>>,
    subscriptions: Arc<Mutex<HashMap<String, Subscription>>>,
    tickets: Arc<Mutex<HashMap<String, SupportTicket>>>,
    messages: Arc<Mutex<HashMap<String, Message>>>,
    turns: Arc<Mutex<HashMap<String, Turn>>>,
    super_admins: Arc<Mutex<HashMap<String, SuperAdmin>>>,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl MemoryDatabaseAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(table: &Mutex<T>) -> ClinicResult<MutexGuard<'_, T>> {
    table
        .lock()
        .map_err(|_| ClinicError::internal("in-memory table lock poisoned"))
}

fn constraint(message: impl Into<String>) -> ClinicError {
    ClinicError::Database(DatabaseError::Constraint(message.into()))
}

#[async_trait]
impl ClinicOps for MemoryDatabaseAdapter {
    async fn create_clinic(&self, create: CreateClinic) -> ClinicResult<Clinic> {
        let mut clinics = lock(&self.clinics)?;
        let mut email_index = lock(&self.email_index)?;
        let mut slug_index = lock(&self.slug_index)?;

        let email = normalize_email(&create.email);
        if email_index.contains_key(&email) {
            return Err(constraint("clinics_email_key"));
        }
        if slug_index.contains_key(&create.slug) {
            return Err(constraint("clinics_slug_key"));
        }

        let now = Utc::now();
        let clinic = Clinic {
            id: create.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            email,
            slug: create.slug,
            name: create.name,
            logo: create.logo,
            ticket_language: create.ticket_language.unwrap_or_else(|| "en".to_string()),
            created_at: now,
            updated_at: now,
        };

        email_index.insert(clinic.email.clone(), clinic.id.clone());
        slug_index.insert(clinic.slug.clone(), clinic.id.clone());
        clinics.insert(clinic.id.clone(), clinic.clone());

        Ok(clinic)
    }

    async fn get_clinic_by_id(&self, id: &str) -> ClinicResult<Option<Clinic>> {
        Ok(lock(&self.clinics)?.get(id).cloned())
    }

    async fn get_clinic_by_email(&self, email: &str) -> ClinicResult<Option<Clinic>> {
        let id = lock(&self.email_index)?
            .get(&normalize_email(email))
            .cloned();
        match id {
            Some(id) => self.get_clinic_by_id(&id).await,
            None => Ok(None),
        }
    }

    async fn get_clinic_by_slug(&self, slug: &str) -> ClinicResult<Option<Clinic>> {
        let id = lock(&self.slug_index)?.get(slug).cloned();
        match id {
            Some(id) => self.get_clinic_by_id(&id).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SubscriptionOps for MemoryDatabaseAdapter {
    async fn create_subscription(&self, create: CreateSubscription) -> ClinicResult<Subscription> {
        if !lock(&self.clinics)?.contains_key(&create.clinic_id) {
            return Err(constraint("subscriptions_clinic_id_fkey"));
        }

        let mut subscriptions = lock(&self.subscriptions)?;
        if subscriptions.contains_key(&create.clinic_id) {
            return Err(constraint("subscriptions_clinic_id_key"));
        }

        let now = Utc::now();
        let subscription = Subscription {
            id: Uuid::new_v4().to_string(),
            clinic_id: create.clinic_id,
            status: create.status,
            plan: create.plan,
            created_at: now,
            updated_at: now,
        };
        subscriptions.insert(subscription.clinic_id.clone(), subscription.clone());

        Ok(subscription)
    }

    async fn get_subscription_by_clinic(
        &self,
        clinic_id: &str,
    ) -> ClinicResult<Option<Subscription>> {
        Ok(lock(&self.subscriptions)?.get(clinic_id).cloned())
    }
}

#[async_trait]
impl SupportTicketOps for MemoryDatabaseAdapter {
    async fn create_support_ticket(
        &self,
        create: CreateSupportTicket,
    ) -> ClinicResult<SupportTicket> {
        if !lock(&self.clinics)?.contains_key(&create.clinic_id) {
            return Err(constraint("support_tickets_clinic_id_fkey"));
        }

        let created_at = create.created_at.unwrap_or_else(Utc::now);
        let ticket = SupportTicket {
            id: create.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            clinic_id: create.clinic_id,
            subject: create.subject,
            status: create.status,
            created_at,
            updated_at: created_at,
        };
        lock(&self.tickets)?.insert(ticket.id.clone(), ticket.clone());

        Ok(ticket)
    }

    async fn create_message(&self, create: CreateMessage) -> ClinicResult<Message> {
        if !lock(&self.tickets)?.contains_key(&create.ticket_id) {
            return Err(constraint("messages_ticket_id_fkey"));
        }

        let message = Message {
            id: Uuid::new_v4().to_string(),
            ticket_id: create.ticket_id,
            sender: create.sender,
            body: create.body,
            created_at: create.created_at.unwrap_or_else(Utc::now),
        };
        lock(&self.messages)?.insert(message.id.clone(), message.clone());

        Ok(message)
    }

    async fn get_latest_open_ticket(
        &self,
        clinic_id: &str,
    ) -> ClinicResult<Option<SupportTicket>> {
        let tickets = lock(&self.tickets)?;
        let latest = tickets
            .values()
            .filter(|t| t.clinic_id == clinic_id && t.status != TicketStatus::Closed)
            .max_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .cloned();
        Ok(latest)
    }

    async fn list_ticket_messages(&self, ticket_id: &str) -> ClinicResult<Vec<Message>> {
        let mut thread: Vec<Message> = lock(&self.messages)?
            .values()
            .filter(|m| m.ticket_id == ticket_id)
            .cloned()
            .collect();
        thread.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(thread)
    }
}

#[async_trait]
impl TurnOps for MemoryDatabaseAdapter {
    async fn create_turn(&self, create: CreateTurn) -> ClinicResult<Turn> {
        if !lock(&self.clinics)?.contains_key(&create.clinic_id) {
            return Err(constraint("turns_clinic_id_fkey"));
        }

        let turn = Turn {
            id: create.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            clinic_id: create.clinic_id,
            ticket_code: create.ticket_code,
            status: create.status,
            position: create.position,
            created_at: Utc::now(),
        };
        lock(&self.turns)?.insert(turn.id.clone(), turn.clone());

        Ok(turn)
    }

    async fn list_active_turns(&self, clinic_id: &str) -> ClinicResult<Vec<Turn>> {
        let mut turns: Vec<Turn> = lock(&self.turns)?
            .values()
            .filter(|t| t.clinic_id == clinic_id && t.status != TurnStatus::Cancelled)
            .cloned()
            .collect();
        turns.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        Ok(turns)
    }
}

#[async_trait]
impl SuperAdminOps for MemoryDatabaseAdapter {
    async fn upsert_super_admin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> ClinicResult<SuperAdmin> {
        let mut admins = lock(&self.super_admins)?;
        let now = Utc::now();

        let admin = admins
            .entry(email.to_string())
            .and_modify(|existing| {
                existing.password = password_hash.to_string();
                existing.updated_at = now;
            })
            .or_insert_with(|| SuperAdmin {
                id: Uuid::new_v4().to_string(),
                email: email.to_string(),
                password: password_hash.to_string(),
                created_at: now,
                updated_at: now,
            });

        Ok(admin.clone())
    }

    async fn get_super_admin_by_email(&self, email: &str) -> ClinicResult<Option<SuperAdmin>> {
        Ok(lock(&self.super_admins)?.get(email).cloned())
    }

    async fn count_super_admins(&self, email: &str) -> ClinicResult<usize> {
        Ok(lock(&self.super_admins)?
            .values()
            .filter(|admin| admin.email == email)
            .count())
    }
}

#[async_trait]
impl SessionOps for MemoryDatabaseAdapter {
    async fn create_session(&self, create: CreateSession) -> ClinicResult<Session> {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            token: format!("session_{}", Uuid::new_v4().simple()),
            user_email: create.user_email,
            expires_at: create.expires_at,
            created_at: Utc::now(),
        };
        lock(&self.sessions)?.insert(session.token.clone(), session.clone());

        Ok(session)
    }

    async fn get_session(&self, token: &str) -> ClinicResult<Option<Session>> {
        Ok(lock(&self.sessions)?.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_clinic_email_and_slug_are_unique() {
        let db = MemoryDatabaseAdapter::new();
        db.create_clinic(CreateClinic::new("a@clinic.test", "alpha"))
            .await
            .unwrap();

        let dup_email = db
            .create_clinic(CreateClinic::new("a@clinic.test", "beta"))
            .await;
        assert!(matches!(
            dup_email,
            Err(ClinicError::Database(DatabaseError::Constraint(_)))
        ));

        let dup_slug = db
            .create_clinic(CreateClinic::new("b@clinic.test", "alpha"))
            .await;
        assert!(dup_slug.is_err());
    }

    #[tokio::test]
    async fn test_clinic_email_is_case_insensitive() {
        let db = MemoryDatabaseAdapter::new();
        let clinic = db
            .create_clinic(CreateClinic::new(" Front@Sunrise.test", "sunrise"))
            .await
            .unwrap();
        assert_eq!(clinic.email, "front@sunrise.test");

        let found = db.get_clinic_by_email("FRONT@sunrise.TEST").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(clinic.id));

        let dup = db
            .create_clinic(CreateClinic::new("front@sunrise.test", "other"))
            .await;
        assert!(matches!(
            dup,
            Err(ClinicError::Database(DatabaseError::Constraint(_)))
        ));
    }

    #[tokio::test]
    async fn test_one_subscription_per_clinic() {
        let db = MemoryDatabaseAdapter::new();
        let clinic = db
            .create_clinic(CreateClinic::new("a@clinic.test", "alpha"))
            .await
            .unwrap();

        let create = CreateSubscription {
            clinic_id: clinic.id.clone(),
            status: "PENDING".to_string(),
            plan: "BASIC".to_string(),
        };
        db.create_subscription(create.clone()).await.unwrap();
        assert!(db.create_subscription(create).await.is_err());
    }

    #[tokio::test]
    async fn test_turn_requires_existing_clinic() {
        let db = MemoryDatabaseAdapter::new();
        let result = db
            .create_turn(CreateTurn {
                id: None,
                clinic_id: "missing".to_string(),
                ticket_code: "A001".to_string(),
                status: TurnStatus::Waiting,
                position: 1,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_upsert_keeps_single_row() {
        let db = MemoryDatabaseAdapter::new();
        let first = db.upsert_super_admin("root@clinic.test", "h1").await.unwrap();
        let second = db.upsert_super_admin("root@clinic.test", "h2").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.password, "h2");
        assert_eq!(db.count_super_admins("root@clinic.test").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_tables() {
        let db = MemoryDatabaseAdapter::new();
        let other = db.clone();
        let session = db
            .create_session(CreateSession {
                user_email: Some("a@clinic.test".to_string()),
                expires_at: Utc::now() + Duration::hours(1),
            })
            .await
            .unwrap();

        let found = other.get_session(&session.token).await.unwrap();
        assert_eq!(found, Some(session));
    }
}
