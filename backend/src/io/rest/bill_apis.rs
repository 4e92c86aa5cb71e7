//! # REST API for Recurring Bills
//!
//! Bill definitions reuse the generic record handlers; listing adds a
//! `type` filter, and the registry exposes category suggestions and the
//! upcoming-due schedule.

use axum::{
    extract::{FromRef, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{BillType, RecurringBill, UpcomingBill};
use tracing::info;

use crate::domain::validation::parse_date;
use crate::domain::{BillService, DomainError, RecordService, DEFAULT_UPCOMING_DAYS};
use crate::io::rest::error::{ApiQuery, ApiResult};
use crate::io::rest::record_apis::{create_record, delete_record, get_record, update_record};

impl FromRef<BillService> for RecordService<RecurringBill> {
    fn from_ref(service: &BillService) -> Self {
        service.records().clone()
    }
}

#[derive(Debug, Deserialize)]
pub struct BillListQuery {
    #[serde(rename = "type")]
    pub bill_type: Option<BillType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingQuery {
    pub days: Option<u32>,
    pub as_of: Option<String>,
}

/// Create a router for recurring bill APIs
pub fn router(service: BillService) -> Router {
    Router::new()
        .route("/", get(list_bills).post(create_record::<RecurringBill>))
        .route("/categories", get(list_categories))
        .route("/upcoming", get(list_upcoming))
        .route(
            "/:id",
            get(get_record::<RecurringBill>)
                .patch(update_record::<RecurringBill>)
                .delete(delete_record::<RecurringBill>),
        )
        .with_state(service)
}

pub async fn list_bills(
    State(service): State<BillService>,
    ApiQuery(query): ApiQuery<BillListQuery>,
) -> ApiResult<Json<Vec<RecurringBill>>> {
    info!("GET /api/recurring-bills - query: {:?}", query);
    Ok(Json(service.list_bills(query.bill_type).await?))
}

pub async fn list_categories(State(service): State<BillService>) -> Json<Vec<String>> {
    Json(service.category_suggestions())
}

/// Bills due within `days` of `asOf` (today when absent), overdue ones included
pub async fn list_upcoming(
    State(service): State<BillService>,
    ApiQuery(query): ApiQuery<UpcomingQuery>,
) -> ApiResult<Json<Vec<UpcomingBill>>> {
    info!("GET /api/recurring-bills/upcoming - query: {:?}", query);

    let as_of = match query.as_of.as_deref() {
        Some(raw) => parse_date("asOf", raw).map_err(DomainError::from)?,
        None => chrono::Local::now().date_naive(),
    };
    let days = query.days.unwrap_or(DEFAULT_UPCOMING_DAYS);

    Ok(Json(service.upcoming_bills(as_of, days).await?))
}
