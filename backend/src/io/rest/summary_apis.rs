use axum::{extract::State, response::Json, routing::get, Router};
use serde::Deserialize;
use shared::FinancialSummary;
use tracing::info;

use crate::domain::SummaryService;
use crate::io::rest::error::{ApiQuery, ApiResult};

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub month: Option<String>,
}

/// Create a router for the financial summary
pub fn router(service: SummaryService) -> Router {
    Router::new().route("/", get(get_summary)).with_state(service)
}

pub async fn get_summary(
    State(service): State<SummaryService>,
    ApiQuery(query): ApiQuery<SummaryQuery>,
) -> ApiResult<Json<FinancialSummary>> {
    info!("GET /api/summary - query: {:?}", query);
    Ok(Json(service.summarize(query.month.as_deref()).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt; // for `oneshot`

    async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let app = router(SummaryService::new(db));

        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_summary_echoes_month() {
        let (status, body) = get("/?month=2024-03").await;
        assert_eq!(status, StatusCode::OK);

        let summary: FinancialSummary = serde_json::from_slice(&body).unwrap();
        assert_eq!(summary.month.as_deref(), Some("2024-03"));
        assert_eq!(summary.net_cash_flow, "0");
    }

    #[tokio::test]
    async fn test_summary_rejects_bad_month() {
        let (status, _) = get("/?month=2024-13").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
