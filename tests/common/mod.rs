//! Shared harness for the router tests.
//!
//! [`TestHarness`] wraps a `ClinicQueue` over the in-memory adapter with
//! seeding helpers and request builders.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use chrono::{Duration, TimeZone, Utc};
use clinic_queue::adapters::{
    ClinicOps, MemoryDatabaseAdapter, SessionOps, SubscriptionOps, SupportTicketOps, TurnOps,
};
use clinic_queue::types::{
    CreateClinic, CreateMessage, CreateSession, CreateSubscription, CreateSupportTicket,
    CreateTurn,
};
use clinic_queue::{
    Clinic, ClinicConfig, ClinicQueue, ClinicQueueBuilder, MessageSender, TicketStatus,
    TurnStatus,
};
use serde_json::Value;

pub struct TestHarness {
    pub queue: ClinicQueue<MemoryDatabaseAdapter>,
}

#[allow(dead_code)]
impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(ClinicConfig::new())
    }

    pub fn with_config(config: ClinicConfig) -> Self {
        let queue = ClinicQueueBuilder::new(config)
            .database(MemoryDatabaseAdapter::new())
            .build()
            .expect("Failed to create test queue instance");
        Self { queue }
    }

    /// A harness whose database never came up.
    pub async fn unavailable(config: ClinicConfig) -> Self {
        let queue = ClinicQueueBuilder::new(config)
            .connect(async { Err::<MemoryDatabaseAdapter, _>("connection refused") })
            .await
            .build()
            .expect("Failed to create test queue instance");
        Self { queue }
    }

    pub fn db(&self) -> Arc<MemoryDatabaseAdapter> {
        self.queue.database().expect("database ready").clone()
    }

    pub async fn clinic(&self, email: &str, slug: &str) -> Clinic {
        self.db()
            .create_clinic(
                CreateClinic::new(email, slug)
                    .with_name("Harbor Pediatrics")
                    .with_logo("https://cdn.clinic.test/harbor.png")
                    .with_ticket_language("pt"),
            )
            .await
            .unwrap()
    }

    pub async fn subscription(&self, clinic_id: &str, status: &str, plan: &str) {
        self.db()
            .create_subscription(CreateSubscription {
                clinic_id: clinic_id.to_string(),
                status: status.to_string(),
                plan: plan.to_string(),
            })
            .await
            .unwrap();
    }

    /// Session token for `email`, valid for a day.
    pub async fn session(&self, email: Option<&str>) -> String {
        self.session_expiring(email, Duration::hours(24)).await
    }

    pub async fn session_expiring(&self, email: Option<&str>, ttl: Duration) -> String {
        self.db()
            .create_session(CreateSession {
                user_email: email.map(str::to_string),
                expires_at: Utc::now() + ttl,
            })
            .await
            .unwrap()
            .token
    }

    pub async fn ticket(&self, clinic_id: &str, id: &str, created_secs: i64, status: TicketStatus) {
        self.db()
            .create_support_ticket(CreateSupportTicket {
                id: Some(id.to_string()),
                clinic_id: clinic_id.to_string(),
                subject: "Account activation".to_string(),
                status,
                created_at: Some(at(created_secs)),
            })
            .await
            .unwrap();
    }

    pub async fn message(&self, ticket_id: &str, created_secs: i64, sender: MessageSender, body: &str) {
        self.db()
            .create_message(CreateMessage {
                ticket_id: ticket_id.to_string(),
                sender,
                body: body.to_string(),
                created_at: Some(at(created_secs)),
            })
            .await
            .unwrap();
    }

    pub async fn turn(&self, clinic_id: &str, id: &str, status: TurnStatus, position: i32) {
        self.db()
            .create_turn(CreateTurn {
                id: Some(id.to_string()),
                clinic_id: clinic_id.to_string(),
                ticket_code: format!("B{:02}", position),
                status,
                position,
            })
            .await
            .unwrap();
    }
}

pub fn at(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_710_000_000 + secs, 0).unwrap()
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    use tower::ServiceExt;
    router.clone().oneshot(request).await.unwrap()
}
