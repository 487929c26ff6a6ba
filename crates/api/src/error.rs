//! HTTP mapping for core errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use devhub_monetization::{
    BindError, MonetizationError, RegionError, TransitionError, UpsellError,
};
use serde_json::json;

/// Wrapper turning core errors into JSON error responses.
#[derive(Debug)]
pub struct ApiError(pub MonetizationError);

impl From<MonetizationError> for ApiError {
    fn from(err: MonetizationError) -> Self {
        Self(err)
    }
}

fn status_for(err: &MonetizationError) -> StatusCode {
    match err {
        MonetizationError::AppNotFound(_) => StatusCode::NOT_FOUND,
        MonetizationError::Transition(TransitionError::StaleSnapshot) => StatusCode::CONFLICT,
        MonetizationError::Transition(_) => StatusCode::BAD_REQUEST,
        MonetizationError::Region(RegionError::InvalidRegionId(_)) => StatusCode::BAD_REQUEST,
        MonetizationError::Upsell(UpsellError::AlreadyLinked) => StatusCode::CONFLICT,
        MonetizationError::Upsell(_) => StatusCode::BAD_REQUEST,
        MonetizationError::Bind(BindError::StaleRegistry) => StatusCode::CONFLICT,
        MonetizationError::Bind(BindError::UnknownAccount(_)) => StatusCode::NOT_FOUND,
        MonetizationError::Bind(BindError::FreeTier) => StatusCode::BAD_REQUEST,
    }
}

fn code_for(err: &MonetizationError) -> &'static str {
    match err {
        MonetizationError::AppNotFound(_) => "app_not_found",
        MonetizationError::Transition(TransitionError::NoChange) => "no_change",
        MonetizationError::Transition(TransitionError::PlatformIneligible) => "platform_ineligible",
        MonetizationError::Transition(TransitionError::StaleSnapshot) => "stale_snapshot",
        MonetizationError::Region(RegionError::InvalidRegionId(_)) => "invalid_region",
        MonetizationError::Upsell(UpsellError::NotOwnedByDeveloper) => "not_owned_by_developer",
        MonetizationError::Upsell(UpsellError::WrongTier) => "wrong_tier",
        MonetizationError::Upsell(UpsellError::AlreadyLinked) => "already_linked",
        MonetizationError::Bind(BindError::FreeTier) => "free_tier",
        MonetizationError::Bind(BindError::UnknownAccount(_)) => "unknown_account",
        MonetizationError::Bind(BindError::StaleRegistry) => "stale_registry",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let body = json!({
            "error": self.0.to_string(),
            "code": code_for(&self.0),
        });
        (status, Json(body)).into_response()
    }
}
