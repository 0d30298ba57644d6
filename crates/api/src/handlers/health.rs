//! Health check endpoint for load balancers and monitoring.
//!
//! Returns 200 OK if both code stores are reachable,
//! 503 Service Unavailable otherwise.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    phone_store: bool,
    email_store: bool,
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let phone_ok = state.phone.store_healthy().await;
    let email_ok = state.email.store_healthy().await;

    let healthy = phone_ok && email_ok;

    let response = HealthResponse {
        status: if healthy { "ok" } else { "unhealthy" },
        phone_store: phone_ok,
        email_store: email_ok,
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::stores::MockOtpStore;
    use crate::test_utils::TestStateBuilder;

    #[tokio::test]
    async fn healthy_with_memory_stores() {
        let state = TestStateBuilder::new().build();

        let response = health_check(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unhealthy_when_a_store_is_unreachable() {
        let mut store = MockOtpStore::new();
        store
            .expect_health_check()
            .returning(|| Err(anyhow::anyhow!("connection refused")));

        let state = TestStateBuilder::new()
            .with_phone_store(Arc::new(store))
            .build();

        let response = health_check(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
