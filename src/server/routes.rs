use crate::errors::EngineError;
use crate::models::{OptionContract, PricingResult};
use crate::portfolio::{self, PortfolioSummary, Position};
use crate::state::{AppState, CounterSnapshot, PerfCounters};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::sync::Arc;

/// Engine failures mapped onto HTTP. Caller mistakes are 4xx, never 5xx.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = match &self.0 {
            EngineError::InvalidInput { field, .. } => serde_json::json!({
                "error": self.0.to_string(),
                "field": field,
            }),
            other => serde_json::json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct PortfolioSnapshot {
    pub id: Option<String>,
    #[serde(default = "default_portfolio_name")]
    pub name: String,
    pub positions: Vec<Position>,
}

fn default_portfolio_name() -> String {
    "Default".to_string()
}

#[derive(Debug, serde::Serialize)]
pub struct PortfolioSummaryResponse {
    pub id: Option<String>,
    #[serde(flatten)]
    pub summary: PortfolioSummary,
    /// false when `unrealized_pnl_pct` is null because cost basis is zero
    pub pnl_pct_defined: bool,
}

/// GET / -- liveness probe
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "quantlab-api" }))
}

/// GET /api/v1/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

/// POST /api/v1/options/price -- Black-Scholes price and Greeks
pub async fn price_option(
    State(state): State<Arc<AppState>>,
    Json(contract): Json<OptionContract>,
) -> Result<Json<PricingResult>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    PerfCounters::bump(&state.counters.pricing_requests);

    match state.model.price(&contract) {
        Ok(result) => {
            tracing::debug!(
                %request_id,
                model = state.model.name(),
                option_type = %contract.option_type,
                price = result.price,
                "option priced"
            );
            Ok(Json(result))
        }
        Err(e) => {
            PerfCounters::bump(&state.counters.client_errors);
            tracing::info!(%request_id, error = %e, "pricing request rejected");
            Err(e.into())
        }
    }
}

/// POST /api/v1/portfolio/summary -- aggregate P&L over the submitted positions
pub async fn portfolio_summary(
    State(state): State<Arc<AppState>>,
    Json(snapshot): Json<PortfolioSnapshot>,
) -> Result<Json<PortfolioSummaryResponse>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    PerfCounters::bump(&state.counters.portfolio_requests);

    let summary = portfolio::summarize(&snapshot.name, &snapshot.positions).map_err(|e| {
        PerfCounters::bump(&state.counters.client_errors);
        tracing::info!(%request_id, error = %e, "portfolio request rejected");
        ApiError(e)
    })?;

    let pnl_pct_defined = match summary.pnl_ratio() {
        Ok(_) => true,
        Err(e) => {
            PerfCounters::bump(&state.counters.undefined_ratios);
            tracing::debug!(%request_id, reason = %e, "pnl pct left undefined");
            false
        }
    };

    tracing::debug!(
        %request_id,
        name = %summary.name,
        positions = summary.positions.len(),
        total_value = summary.total_value,
        "portfolio summarized"
    );

    Ok(Json(PortfolioSummaryResponse {
        id: snapshot.id,
        summary,
        pnl_pct_defined,
    }))
}

/// GET /api/v1/counters -- request counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<CounterSnapshot> {
    Json(state.counters.snapshot())
}
