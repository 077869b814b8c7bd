use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use maintenance_gate::MaintenanceStatus;
use std::sync::Arc;
use tax_core::{calculate_tax_from_text, TaxError, TaxType};

use crate::clock::Clock;
use crate::health::health;
use crate::models::{
    numeric_field_text, AccessResponse, ActivateSubscriptionRequest, CalculateCostRequest,
    CalculateCostResponse, ErrorResponse, RenewSubscriptionRequest, SetActiveRequest,
    SubscriptionView,
};
use crate::repo::RepoError;
use crate::service::{ServiceError, SubscriptionService};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SubscriptionService>,
    pub clock: Arc<dyn Clock>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_body(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            details: None,
        }),
    )
}

fn service_error(e: ServiceError) -> ApiError {
    match e {
        ServiceError::Validation(v) => {
            error_body(StatusCode::BAD_REQUEST, "validation_error", v.to_string())
        }
        ServiceError::PaymentNotCompleted(_) => error_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            "payment_not_completed",
            e.to_string(),
        ),
        ServiceError::Repo(RepoError::NotFound { .. }) => {
            error_body(StatusCode::NOT_FOUND, "not_found", e.to_string())
        }
        ServiceError::Repo(RepoError::Conflict { .. } | RepoError::Stale { .. }) => {
            error_body(StatusCode::CONFLICT, "conflict", e.to_string())
        }
        ServiceError::Repo(repo_err) => {
            tracing::error!("Subscription repository error: {}", repo_err);
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Failed to access subscription store".to_string(),
            )
        }
    }
}

fn tax_error(e: TaxError) -> ApiError {
    error_body(StatusCode::UNPROCESSABLE_ENTITY, "invalid_tax_input", e.to_string())
}

pub fn subscriptions_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/subscriptions",
            post(activate_subscription).get(list_subscriptions),
        )
        .route("/api/subscriptions/{company_id}", get(get_subscription))
        .route("/api/subscriptions/{company_id}/renew", post(renew_subscription))
        .route("/api/subscriptions/{company_id}/active", post(set_active))
        .route(
            "/api/subscriptions/{company_id}/access/{module_name}",
            get(check_access),
        )
        .route("/api/maintenance/{module_name}", get(maintenance_status))
        .route("/api/cost-entries/calculate", post(calculate_cost))
        .with_state(state)
}

/// POST /api/subscriptions - Activate a subscription after payment completion
async fn activate_subscription(
    State(state): State<AppState>,
    Json(req): Json<ActivateSubscriptionRequest>,
) -> Result<(StatusCode, Json<SubscriptionView>), ApiError> {
    let view = state
        .service
        .activate_from_payment(req, state.clock.now())
        .await
        .map_err(service_error)?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/subscriptions - All subscriptions with derived status
async fn list_subscriptions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubscriptionView>>, ApiError> {
    let views = state
        .service
        .list_statuses(state.clock.now())
        .await
        .map_err(service_error)?;

    Ok(Json(views))
}

/// GET /api/subscriptions/{company_id}
async fn get_subscription(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<SubscriptionView>, ApiError> {
    let view = state
        .service
        .status(&company_id, state.clock.now())
        .await
        .map_err(service_error)?;

    Ok(Json(view))
}

/// POST /api/subscriptions/{company_id}/renew
async fn renew_subscription(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Json(req): Json<RenewSubscriptionRequest>,
) -> Result<Json<SubscriptionView>, ApiError> {
    let view = state
        .service
        .renew(&company_id, req, state.clock.now())
        .await
        .map_err(service_error)?;

    Ok(Json(view))
}

/// POST /api/subscriptions/{company_id}/active
async fn set_active(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<SubscriptionView>, ApiError> {
    let view = state
        .service
        .set_active(&company_id, req.is_active, state.clock.now())
        .await
        .map_err(service_error)?;

    Ok(Json(view))
}

/// GET /api/subscriptions/{company_id}/access/{module_name}
async fn check_access(
    State(state): State<AppState>,
    Path((company_id, module_name)): Path<(String, String)>,
) -> Result<Json<AccessResponse>, ApiError> {
    let response = state
        .service
        .check_access(&company_id, &module_name, state.clock.now())
        .await
        .map_err(service_error)?;

    Ok(Json(response))
}

/// GET /api/maintenance/{module_name}
async fn maintenance_status(
    State(state): State<AppState>,
    Path(module_name): Path<String>,
) -> Json<MaintenanceStatus> {
    let status = state
        .service
        .maintenance()
        .status(&module_name, state.clock.now())
        .await;

    Json(status)
}

/// POST /api/cost-entries/calculate - Derive tax and gross totals for a cost line
async fn calculate_cost(
    Json(req): Json<CalculateCostRequest>,
) -> Result<Json<CalculateCostResponse>, ApiError> {
    let tax_type: TaxType = req.tax_type.parse().map_err(tax_error)?;
    let totals = calculate_tax_from_text(
        &numeric_field_text(&req.net_amount),
        &numeric_field_text(&req.tax_rate),
        tax_type,
    )
    .map_err(tax_error)?;

    let exchange_rate = match &req.exchange_rate {
        serde_json::Value::Null => None,
        value => Some(numeric_field_text(value)),
    };

    Ok(Json(CalculateCostResponse {
        currency: req.currency,
        exchange_rate,
        tax_type: tax_type.to_string(),
        total_tax: totals.total_tax_display(),
        total_amount: totals.total_amount_display(),
    }))
}
