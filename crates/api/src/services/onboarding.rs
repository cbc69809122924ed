use serde::{Deserialize, Serialize};

use clinic_queue_core::adapters::DatabaseAdapter;
use clinic_queue_core::{ClinicContext, ClinicDisplay, ClinicResult, Session, TicketThread};

use super::identity::resolve_clinic;

/// Data behind the "activation pending" page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingActivationView {
    pub clinic: ClinicDisplay,
    /// Latest open support ticket, or `null` for the generic pending state.
    pub ticket: Option<TicketThread>,
}

/// Latest non-closed support ticket of a clinic with its messages, oldest
/// message first.
pub async fn pending_activation_ticket<DB: DatabaseAdapter>(
    clinic_id: &str,
    ctx: &ClinicContext<DB>,
) -> ClinicResult<Option<TicketThread>> {
    let database = ctx.database()?;

    let Some(ticket) = database.get_latest_open_ticket(clinic_id).await? else {
        return Ok(None);
    };

    let messages = database.list_ticket_messages(&ticket.id).await?;
    tracing::debug!(
        ticket_id = %ticket.id,
        messages = messages.len(),
        "Loaded pending activation ticket"
    );

    Ok(Some(TicketThread { ticket, messages }))
}

/// Assemble the pending page for the signed-in clinic.
///
/// `Ok(None)` means the caller has no clinic session and should be sent to
/// the login page.
pub async fn pending_activation_page<DB: DatabaseAdapter>(
    session: Option<&Session>,
    ctx: &ClinicContext<DB>,
) -> ClinicResult<Option<PendingActivationView>> {
    let Some(clinic) = resolve_clinic(session, ctx).await? else {
        return Ok(None);
    };

    let ticket = pending_activation_ticket(&clinic.id, ctx).await?;

    Ok(Some(PendingActivationView {
        clinic: clinic.into(),
        ticket,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_helpers::{self, at};
    use clinic_queue_core::adapters::SupportTicketOps;
    use clinic_queue_core::{CreateMessage, MessageSender, TicketStatus};

    #[tokio::test]
    async fn test_latest_non_closed_ticket_wins() {
        let ctx = test_helpers::create_test_context();
        let clinic = test_helpers::create_clinic(&ctx, "front@sunrise.test", "sunrise").await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T1", 1, TicketStatus::Open).await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T2", 2, TicketStatus::Closed).await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T3", 3, TicketStatus::Open).await;

        let thread = pending_activation_ticket(&clinic.id, &ctx)
            .await
            .unwrap()
            .expect("open ticket");
        assert_eq!(thread.ticket.id, "T3");
    }

    #[tokio::test]
    async fn test_same_instant_tickets_prefer_higher_id() {
        let ctx = test_helpers::create_test_context();
        let clinic = test_helpers::create_clinic(&ctx, "front@sunrise.test", "sunrise").await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T-b", 5, TicketStatus::Open).await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T-c", 5, TicketStatus::Closed).await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T-a", 5, TicketStatus::Open).await;

        let thread = pending_activation_ticket(&clinic.id, &ctx)
            .await
            .unwrap()
            .expect("open ticket");
        assert_eq!(thread.ticket.id, "T-b");
    }

    #[tokio::test]
    async fn test_newest_closed_ticket_is_skipped() {
        let ctx = test_helpers::create_test_context();
        let clinic = test_helpers::create_clinic(&ctx, "front@sunrise.test", "sunrise").await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T1", 1, TicketStatus::InProgress).await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T2", 2, TicketStatus::Closed).await;

        let thread = pending_activation_ticket(&clinic.id, &ctx)
            .await
            .unwrap()
            .expect("open ticket");
        assert_eq!(thread.ticket.id, "T1");
        assert_eq!(thread.ticket.status, TicketStatus::InProgress);
    }

    #[tokio::test]
    async fn test_only_closed_tickets_is_empty() {
        let ctx = test_helpers::create_test_context();
        let clinic = test_helpers::create_clinic(&ctx, "front@sunrise.test", "sunrise").await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T1", 1, TicketStatus::Closed).await;

        assert_eq!(pending_activation_ticket(&clinic.id, &ctx).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_other_clinics_tickets_are_ignored() {
        let ctx = test_helpers::create_test_context();
        let clinic = test_helpers::create_clinic(&ctx, "front@sunrise.test", "sunrise").await;
        let other = test_helpers::create_clinic(&ctx, "desk@harbor.test", "harbor").await;
        test_helpers::create_ticket(&ctx, &other.id, "T9", 9, TicketStatus::Open).await;

        assert_eq!(pending_activation_ticket(&clinic.id, &ctx).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_messages_are_oldest_first() {
        let ctx = test_helpers::create_test_context();
        let clinic = test_helpers::create_clinic(&ctx, "front@sunrise.test", "sunrise").await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T1", 1, TicketStatus::Open).await;

        let db = test_helpers::db(&ctx);
        for (secs, sender, body) in [
            (30, MessageSender::Staff, "We are reviewing your documents"),
            (10, MessageSender::Clinic, "Please activate our account"),
            (20, MessageSender::Clinic, "Attached our license"),
        ] {
            db.create_message(CreateMessage {
                ticket_id: "T1".to_string(),
                sender,
                body: body.to_string(),
                created_at: Some(at(secs)),
            })
            .await
            .unwrap();
        }

        let thread = pending_activation_ticket(&clinic.id, &ctx)
            .await
            .unwrap()
            .expect("open ticket");
        let bodies: Vec<&str> = thread.messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(
            bodies,
            vec![
                "Please activate our account",
                "Attached our license",
                "We are reviewing your documents",
            ]
        );
    }

    #[tokio::test]
    async fn test_same_instant_messages_follow_id_order() {
        let ctx = test_helpers::create_test_context();
        let clinic = test_helpers::create_clinic(&ctx, "front@sunrise.test", "sunrise").await;
        test_helpers::create_ticket(&ctx, &clinic.id, "T1", 1, TicketStatus::Open).await;

        let db = test_helpers::db(&ctx);
        let mut created = Vec::new();
        for body in ["first", "second", "third", "fourth"] {
            let message = db
                .create_message(CreateMessage {
                    ticket_id: "T1".to_string(),
                    sender: MessageSender::Clinic,
                    body: body.to_string(),
                    created_at: Some(at(40)),
                })
                .await
                .unwrap();
            created.push(message.id);
        }
        created.sort();

        let thread = pending_activation_ticket(&clinic.id, &ctx)
            .await
            .unwrap()
            .expect("open ticket");
        let ids: Vec<String> = thread.messages.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, created);
    }

    #[tokio::test]
    async fn test_page_without_clinic_session_is_none() {
        let ctx = test_helpers::create_test_context();
        let session = test_helpers::create_session(&ctx, Some("nobody@clinic.test")).await;

        assert_eq!(pending_activation_page(None, &ctx).await.unwrap(), None);
        assert_eq!(
            pending_activation_page(Some(&session), &ctx).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_page_renders_generic_state_without_ticket() {
        let ctx = test_helpers::create_test_context();
        test_helpers::create_clinic(&ctx, "front@sunrise.test", "sunrise").await;
        let session = test_helpers::create_session(&ctx, Some("front@sunrise.test")).await;

        let view = pending_activation_page(Some(&session), &ctx)
            .await
            .unwrap()
            .expect("clinic session");
        assert_eq!(view.clinic.slug, "sunrise");
        assert_eq!(view.ticket, None);
    }
}
