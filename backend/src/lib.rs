//! # Finance Tracker Backend
//!
//! Household finance tracking over a REST API: income and expenses, the
//! balance sheet (assets, liabilities, investments), a rental vehicle fleet,
//! forex trading accounts, recurring bills and the payments made against them.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum REST handlers)
//!     ↓
//! Domain Layer (validation, services, payment recorder)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! A single [`DbConnection`] is opened at startup and handed to every service;
//! the services are then handed to the routers as state.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use shared::{Asset, Investment, LedgerEntry, Liability, RentalVehicle, TradingAccount};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::AppConfig;
use domain::{BillService, PaymentRecorder, RecordService, SummaryService};
use io::rest::{bill_apis, payment_apis, record_apis, summary_apis};
pub use storage::DbConnection;
use storage::{
    AssetRepository, InvestmentRepository, LedgerRepository, LiabilityRepository,
    TradingAccountRepository, VehicleRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub income: RecordService<LedgerEntry>,
    pub expenses: RecordService<LedgerEntry>,
    pub assets: RecordService<Asset>,
    pub liabilities: RecordService<Liability>,
    pub investments: RecordService<Investment>,
    pub rental_fleet: RecordService<RentalVehicle>,
    pub trading_accounts: RecordService<TradingAccount>,
    pub bill_service: BillService,
    pub payment_recorder: PaymentRecorder,
    pub summary_service: SummaryService,
}

impl AppState {
    pub fn new(db: DbConnection) -> Self {
        Self {
            income: RecordService::new("income", Arc::new(LedgerRepository::income(db.clone()))),
            expenses: RecordService::new("expense", Arc::new(LedgerRepository::expenses(db.clone()))),
            assets: RecordService::new("asset", Arc::new(AssetRepository::new(db.clone()))),
            liabilities: RecordService::new("liability", Arc::new(LiabilityRepository::new(db.clone()))),
            investments: RecordService::new("investment", Arc::new(InvestmentRepository::new(db.clone()))),
            rental_fleet: RecordService::new("rental vehicle", Arc::new(VehicleRepository::new(db.clone()))),
            trading_accounts: RecordService::new(
                "trading account",
                Arc::new(TradingAccountRepository::new(db.clone())),
            ),
            bill_service: BillService::new(db.clone()),
            payment_recorder: PaymentRecorder::new(db.clone()),
            summary_service: SummaryService::new(db),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Opening database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    info!("Setting up application state");
    Ok(AppState::new(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin {}", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/income", record_apis::router(state.income))
        .nest("/expenses", record_apis::router(state.expenses))
        .nest("/assets", record_apis::router(state.assets))
        .nest("/liabilities", record_apis::router(state.liabilities))
        .nest("/investments", record_apis::router(state.investments))
        .nest("/rental-fleet", record_apis::router(state.rental_fleet))
        .nest("/trading-accounts", record_apis::router(state.trading_accounts))
        .nest("/recurring-bills", bill_apis::router(state.bill_service))
        .nest("/bill-payments", payment_apis::router(state.payment_recorder))
        .nest("/summary", summary_apis::router(state.summary_service));

    let mut app = Router::new().nest("/api", api_routes);
    if let Some(dir) = &config.static_dir {
        info!("Serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    Ok(app.layer(TraceLayer::new_for_http()).layer(cors))
}
