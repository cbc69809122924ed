use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clinic tenant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clinic {
    pub id: String,
    pub email: String,
    pub slug: String,
    pub name: String,
    pub logo: Option<String>,
    #[serde(rename = "ticketLanguage")]
    pub ticket_language: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Canonical form of an account email: trimmed and lowercased.
///
/// Clinic and super admin emails are stored and looked up in this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Public-safe projection of a clinic for the TV display.
///
/// Carries no identifier other than `slug`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicDisplay {
    pub name: String,
    pub logo: Option<String>,
    pub slug: String,
    #[serde(rename = "ticketLanguage")]
    pub ticket_language: String,
}

impl From<Clinic> for ClinicDisplay {
    fn from(clinic: Clinic) -> Self {
        Self {
            name: clinic.name,
            logo: clinic.logo,
            slug: clinic.slug,
            ticket_language: clinic.ticket_language,
        }
    }
}

/// A clinic's subscription. `status` and `plan` are stored and returned verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: String,
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    pub status: String,
    pub plan: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Activation status reported to the onboarding flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivationStatus {
    pub status: String,
    pub plan: String,
}

impl From<Subscription> for ActivationStatus {
    fn from(subscription: Subscription) -> Self {
        Self {
            status: subscription.status,
            plan: subscription.plan,
        }
    }
}

/// Error returned when a stored status string is not a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} status: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownStatus {}

/// Support ticket status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    WaitingOnClinic,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::WaitingOnClinic => "WAITING_ON_CLINIC",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "WAITING_ON_CLINIC" => Ok(Self::WaitingOnClinic),
            "CLOSED" => Ok(Self::Closed),
            other => Err(UnknownStatus {
                kind: "ticket",
                value: other.to_string(),
            }),
        }
    }
}

/// Author side of a support ticket message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageSender {
    #[default]
    Clinic,
    Staff,
}

impl MessageSender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clinic => "CLINIC",
            Self::Staff => "STAFF",
        }
    }
}

impl fmt::Display for MessageSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageSender {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLINIC" => Ok(Self::Clinic),
            "STAFF" => Ok(Self::Staff),
            other => Err(UnknownStatus {
                kind: "message sender",
                value: other.to_string(),
            }),
        }
    }
}

/// Queue turn status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnStatus {
    #[default]
    Waiting,
    Called,
    Serving,
    Done,
    Cancelled,
}

impl TurnStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Called => "CALLED",
            Self::Serving => "SERVING",
            Self::Done => "DONE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "CALLED" => Ok(Self::Called),
            "SERVING" => Ok(Self::Serving),
            "DONE" => Ok(Self::Done),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(UnknownStatus {
                kind: "turn",
                value: other.to_string(),
            }),
        }
    }
}

/// Onboarding support ticket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupportTicket {
    pub id: String,
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    pub subject: String,
    pub status: TicketStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// A message on a support ticket thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    #[serde(rename = "ticketId")]
    pub ticket_id: String,
    pub sender: MessageSender,
    pub body: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A ticket together with its messages, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketThread {
    #[serde(flatten)]
    pub ticket: SupportTicket,
    pub messages: Vec<Message>,
}

/// A queue turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    pub id: String,
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    #[serde(rename = "ticketCode")]
    pub ticket_code: String,
    pub status: TurnStatus,
    pub position: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Projection of a turn returned by the queue snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurnSnapshot {
    pub id: String,
    #[serde(rename = "ticketCode")]
    pub ticket_code: String,
    pub status: TurnStatus,
    pub position: i32,
}

impl From<Turn> for TurnSnapshot {
    fn from(turn: Turn) -> Self {
        Self {
            id: turn.id,
            ticket_code: turn.ticket_code,
            status: turn.status,
            position: turn.position,
        }
    }
}

/// Super admin credential. The password is an Argon2 PHC string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuperAdmin {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Session issued by the authentication provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: String,
    pub token: String,
    #[serde(rename = "userEmail")]
    pub user_email: Option<String>,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

// -- Creation inputs --
//
// Clinics, subscriptions, tickets, turns and sessions are written by flows
// outside this service. The creation inputs exist so the in-memory adapter
// and seeding tools can populate them.

/// Input for creating a clinic
#[derive(Debug, Clone, Default)]
pub struct CreateClinic {
    pub id: Option<String>,
    pub email: String,
    pub slug: String,
    pub name: String,
    pub logo: Option<String>,
    pub ticket_language: Option<String>,
}

impl CreateClinic {
    pub fn new(email: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            slug: slug.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_ticket_language(mut self, language: impl Into<String>) -> Self {
        self.ticket_language = Some(language.into());
        self
    }
}

/// Input for creating a subscription
#[derive(Debug, Clone)]
pub struct CreateSubscription {
    pub clinic_id: String,
    pub status: String,
    pub plan: String,
}

/// Input for creating a support ticket
#[derive(Debug, Clone)]
pub struct CreateSupportTicket {
    pub id: Option<String>,
    pub clinic_id: String,
    pub subject: String,
    pub status: TicketStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Input for appending a message to a ticket
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub ticket_id: String,
    pub sender: MessageSender,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Input for creating a queue turn
#[derive(Debug, Clone)]
pub struct CreateTurn {
    pub id: Option<String>,
    pub clinic_id: String,
    pub ticket_code: String,
    pub status: TurnStatus,
    pub position: i32,
}

/// Input for creating a session
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// `{ "message": "..." }` body used for error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessageResponse {
    pub message: String,
}
