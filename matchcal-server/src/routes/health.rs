//! Liveness endpoint

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub team_id: u64,
    pub calendar_name: String,
}

/// GET /health - Report which calendar this instance serves
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let calendar = state.calendar();

    Json(HealthResponse {
        status: "ok",
        team_id: calendar.team_id,
        calendar_name: calendar.calendar_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use matchcal_core::{DateRange, MatchCalConfig, MatchCalResult, MatchRecord, MatchSource};
    use tower::ServiceExt;

    struct EmptySource;

    #[async_trait]
    impl MatchSource for EmptySource {
        async fn fetch_matches(&self, _range: &DateRange) -> MatchCalResult<Vec<MatchRecord>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_health_reports_calendar() {
        let state = AppState::with_source(MatchCalConfig::default(), Arc::new(EmptySource));
        let app = router().with_state(state);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("\"status\":\"ok\""), "Got: {}", body);
        assert!(body.contains("\"team_id\":81"), "Got: {}", body);
    }
}
