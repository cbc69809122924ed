use serde::{Deserialize, Serialize};

use clinic_queue_core::adapters::DatabaseAdapter;
use clinic_queue_core::{ClinicContext, ClinicResult, TurnSnapshot};

/// `{ "turns": [...] }` payload of the queue inspection tools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueSnapshotResponse {
    pub turns: Vec<TurnSnapshot>,
}

/// Non-cancelled turns of the clinic with the given public slug, in service
/// order (`position` ascending).
///
/// An unknown slug yields an empty list rather than an error.
pub async fn queue_snapshot<DB: DatabaseAdapter>(
    slug: &str,
    ctx: &ClinicContext<DB>,
) -> ClinicResult<Vec<TurnSnapshot>> {
    let database = ctx.database()?;

    let Some(clinic) = database.get_clinic_by_slug(slug).await? else {
        tracing::debug!(slug, "Queue snapshot requested for unknown clinic");
        return Ok(Vec::new());
    };

    let turns = database.list_active_turns(&clinic.id).await?;
    Ok(turns.into_iter().map(TurnSnapshot::from).collect())
}
