use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::ClinicQueue;
use clinic_queue_api::{
    QueueSnapshotResponse, check_activation_status, pending_activation_page, queue_snapshot,
    tv_display,
};
use clinic_queue_core::{
    ActivationStatus, ClinicConfig, ClinicContext, ClinicDisplay, ClinicError, DatabaseAdapter,
    OptionalSession,
};

/// Integration trait for Axum web framework
pub trait AxumIntegration<DB: DatabaseAdapter> {
    /// Public routes: health, onboarding and the TV display.
    fn axum_router(&self) -> Router;

    /// Operator-only routes. Never merged into [`axum_router`](Self::axum_router).
    fn internal_router(&self) -> Router;

    /// Public routes plus, when `internal_routes` is enabled, the internal
    /// router under `/internal`, wrapped in CORS and request tracing.
    fn app_router(&self) -> Router;
}

impl<DB: DatabaseAdapter> AxumIntegration<DB> for ClinicQueue<DB> {
    fn axum_router(&self) -> Router {
        Router::new()
            .route("/health", get(health_check::<DB>))
            .route(
                "/api/onboarding/activation-status",
                get(activation_status::<DB>),
            )
            .route("/onboarding/pending", get(pending_activation::<DB>))
            .route("/p/{slug}/tv", get(tv_page::<DB>))
            .with_state(self.context().clone())
    }

    fn internal_router(&self) -> Router {
        Router::new()
            .route("/clinics/{slug}/turns", get(view_turns::<DB>))
            .with_state(self.context().clone())
    }

    fn app_router(&self) -> Router {
        let mut router = self.axum_router();

        if self.config().internal_routes {
            tracing::warn!("Internal routes enabled under /internal");
            router = router.nest("/internal", self.internal_router());
        }

        router
            .layer(cors_layer(self.context().config.clone()))
            .layer(TraceLayer::new_for_http())
    }
}

fn cors_layer(config: Arc<ClinicConfig>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| config.is_origin_trusted(origin))
            },
        ))
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn health_check<DB: DatabaseAdapter>(
    State(ctx): State<ClinicContext<DB>>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": ctx.config.app_name,
    }))
}

async fn activation_status<DB: DatabaseAdapter>(
    State(ctx): State<ClinicContext<DB>>,
    OptionalSession(session): OptionalSession,
) -> Result<Json<Option<ActivationStatus>>, ClinicError> {
    let status = check_activation_status(session.as_ref(), &ctx).await?;
    Ok(Json(status))
}

async fn pending_activation<DB: DatabaseAdapter>(
    State(ctx): State<ClinicContext<DB>>,
    OptionalSession(session): OptionalSession,
) -> Result<Response, ClinicError> {
    match pending_activation_page(session.as_ref(), &ctx).await? {
        Some(view) => Ok(Json(view).into_response()),
        None => Ok(Redirect::to(&ctx.config.login_path).into_response()),
    }
}

async fn tv_page<DB: DatabaseAdapter>(
    State(ctx): State<ClinicContext<DB>>,
    Path(slug): Path<String>,
) -> Result<Json<ClinicDisplay>, ClinicError> {
    let display = tv_display(&slug, &ctx).await?;
    Ok(Json(display))
}

/// Queue inspection for operators. Failures are logged and answered with a
/// fixed `{"error": ...}` body.
async fn view_turns<DB: DatabaseAdapter>(
    State(ctx): State<ClinicContext<DB>>,
    Path(slug): Path<String>,
) -> Response {
    match queue_snapshot(&slug, &ctx).await {
        Ok(turns) => Json(QueueSnapshotResponse { turns }).into_response(),
        Err(err) => {
            tracing::error!(error = %err, slug = %slug, "Failed to load queue snapshot");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}
