//! Calendar feed endpoint

use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;

use matchcal_core::DateRange;
use matchcal_core::ics::{CONTENT_TYPE, generate_calendar};

use crate::routes::AppError;
use crate::state::AppState;

const DEFAULT_FEED_PATH: &str = "/calendar.ics";

pub fn router(file_name: &str) -> Router<AppState> {
    let configured = format!("/{}", file_name.trim_start_matches('/'));

    let router = Router::new().route(DEFAULT_FEED_PATH, get(serve_calendar));
    if configured == DEFAULT_FEED_PATH {
        router
    } else {
        router.route(&configured, get(serve_calendar))
    }
}

/// GET /calendar.ics - Fetch current fixtures and render them as iCalendar
async fn serve_calendar(State(state): State<AppState>) -> Result<Response, AppError> {
    let range = DateRange::from_source(&state.config().source);
    let matches = state.source().fetch_matches(&range).await?;

    // One clock read per request: every event shares this DTSTAMP
    let generated_at = Utc::now();
    let ics = generate_calendar(&matches, state.calendar(), generated_at)?;

    tracing::info!(matches = matches.len(), bytes = ics.len(), "served calendar");

    let server = state.server();
    let disposition = format!("inline; filename=\"{}\"", server.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, server.cache_control()),
        ],
        ics,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use matchcal_core::fixture::{Competition, Score, Team};
    use matchcal_core::{
        MatchCalConfig, MatchCalError, MatchCalResult, MatchRecord, MatchSource, MatchStatus,
    };
    use tower::ServiceExt;

    struct FixedSource(Vec<MatchRecord>);

    #[async_trait]
    impl MatchSource for FixedSource {
        async fn fetch_matches(&self, _range: &DateRange) -> MatchCalResult<Vec<MatchRecord>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl MatchSource for FailingSource {
        async fn fetch_matches(&self, _range: &DateRange) -> MatchCalResult<Vec<MatchRecord>> {
            Err(MatchCalError::Provider(
                "football-data.org API error: 429 Too Many Requests".to_string(),
            ))
        }
    }

    fn make_match(utc_date: &str) -> MatchRecord {
        MatchRecord {
            id: 12345,
            competition: Competition {
                name: "Primera Division".to_string(),
                code: Some("PD".to_string()),
            },
            utc_date: utc_date.to_string(),
            status: MatchStatus::Scheduled,
            matchday: Some(28),
            home_team: Team {
                id: 81,
                name: "FC Barcelona".to_string(),
                short_name: Some("FCB".to_string()),
            },
            away_team: Team {
                id: 86,
                name: "Real Madrid CF".to_string(),
                short_name: Some("RMA".to_string()),
            },
            venue: Some("Camp Nou".to_string()),
            score: Score::default(),
        }
    }

    fn app(config: MatchCalConfig, source: impl MatchSource + 'static) -> Router {
        let file_name = config.server.file_name.clone();
        let state = AppState::with_source(config, Arc::new(source));
        router(&file_name).with_state(state)
    }

    async fn send_get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_calendar_with_headers() {
        let app = app(
            MatchCalConfig::default(),
            FixedSource(vec![make_match("2025-03-15T20:00:00Z")]),
        );

        let response = send_get(app, "/calendar.ics").await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/calendar; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "inline; filename=\"calendar.ics\""
        );
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "public, max-age=3600, s-maxage=3600, stale-while-revalidate=1800"
        );

        let body = body_text(response).await;
        assert!(body.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(body.contains("DTSTART:20250315T200000Z\r\n"));
        assert!(body.contains("SUMMARY:FCB vs RMA\r\n"));
        assert!(body.ends_with("END:VCALENDAR\r\n"));
    }

    #[tokio::test]
    async fn test_configured_file_name_is_also_served() {
        let mut config = MatchCalConfig::default();
        config.server.file_name = "barca.ics".to_string();
        let app = app(config, FixedSource(vec![]));

        let response = send_get(app.clone(), "/barca.ics").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "inline; filename=\"barca.ics\""
        );

        let response = send_get(app, "/calendar.ics").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_source_failure_is_plain_text_500() {
        let app = app(MatchCalConfig::default(), FailingSource);

        let response = send_get(app, "/calendar.ics").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );

        let body = body_text(response).await;
        assert!(
            body.starts_with("Calendar generation failed: Provider error: football-data.org API error: 429"),
            "Unexpected body: {}",
            body
        );
    }

    #[tokio::test]
    async fn test_bad_record_fails_whole_feed() {
        let app = app(
            MatchCalConfig::default(),
            FixedSource(vec![make_match("2025-03-15T20:00:00Z"), make_match("soon")]),
        );

        let response = send_get(app, "/calendar.ics").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_text(response).await;
        assert!(!body.contains("BEGIN:VCALENDAR"));
        assert!(body.contains("Invalid timestamp 'soon'"), "Unexpected body: {}", body);
    }
}
