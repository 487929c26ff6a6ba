//! Route table for the developer console API.

pub mod apps;
pub mod reference;

use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/apps", post(apps::create_app))
        .route("/apps/{id}/monetization", get(apps::monetization_view))
        .route("/apps/{id}/tier", post(apps::change_tier))
        .route("/apps/{id}/regions", put(apps::set_regions))
        .route("/apps/{id}/upsell", post(apps::set_upsell))
        .route("/apps/{id}/payment-account", post(apps::bind_account))
        .route("/regions", get(reference::list_regions))
        .route("/payment-accounts", post(reference::link_payment_account))
        .route("/internal/reconcile", post(reference::run_reconcile))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use devhub_shared::{DeveloperId, Tier};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn create_app(router: Router, platforms: Value) -> String {
        let (status, body) = send(
            router,
            post_json(
                "/apps",
                json!({
                    "developer": DeveloperId::new(),
                    "name": "Test app",
                    "platforms": platforms,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["app"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_then_view() {
        let state = AppState::new();
        let id = create_app(create_router(state.clone()), json!(["desktop"])).await;

        let req = Request::builder()
            .uri(format!("/apps/{id}/monetization"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(create_router(state), req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["config"]["tier"], "free");
        assert_eq!(body["complete"], true);
        // desktop-only app: paid tier is hidden, not offered
        assert_eq!(body["tier_choices"]["offered"].as_array().unwrap().len(), 1);
        assert_eq!(body["tier_choices"]["hidden"][0]["tier"], "paid");
    }

    #[tokio::test]
    async fn tier_change_round_trip() {
        let state = AppState::new();
        let id = create_app(create_router(state.clone()), json!(["firefoxos"])).await;

        let (status, body) = send(
            create_router(state.clone()),
            post_json(&format!("/apps/{id}/tier"), json!({ "tier": Tier::Paid })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["from"], "free");
        assert_eq!(body["to"], "paid");
        assert_eq!(body["pending_review"], true);

        // repeating the request is a NoChange error, not a silent success
        let (status, body) = send(
            create_router(state),
            post_json(&format!("/apps/{id}/tier"), json!({ "tier": "paid" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "no_change");
    }

    #[tokio::test]
    async fn ineligible_platforms_get_a_400() {
        let state = AppState::new();
        let id = create_app(
            create_router(state.clone()),
            json!(["desktop", "android"]),
        )
        .await;

        let (status, body) = send(
            create_router(state),
            post_json(&format!("/apps/{id}/tier"), json!({ "tier": "paid" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "platform_ineligible");
    }

    #[tokio::test]
    async fn unknown_region_gets_a_400() {
        let state = AppState::new();
        let id = create_app(create_router(state.clone()), json!(["desktop"])).await;

        let req = Request::builder()
            .method("PUT")
            .uri(format!("/apps/{id}/regions"))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "regions": ["atlantis"], "include_worldwide": false }).to_string(),
            ))
            .unwrap();
        let (status, body) = send(create_router(state), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_region");
    }

    #[tokio::test]
    async fn missing_app_gets_a_404() {
        let state = AppState::new();
        let req = Request::builder()
            .uri(format!("/apps/{}/monetization", uuid::Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(create_router(state), req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "app_not_found");
    }

    #[tokio::test]
    async fn reconcile_endpoint_reports_summary() {
        let state = AppState::new();
        let (status, body) = send(
            create_router(state),
            post_json("/internal/reconcile", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["apps_checked"], 0);
    }
}
