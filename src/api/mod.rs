use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ResolutionResult;
use crate::presentation::ForecastView;
use crate::weather::ForecastResolver;

#[derive(Debug, Deserialize)]
pub struct CityParams {
    #[serde(default)]
    pub city: String,
}

/// POST body. `city` stays untyped so non-string input reaches validation
/// instead of being rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct CityBody {
    #[serde(default)]
    pub city: Value,
}

#[derive(Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

pub fn router(resolver: Arc<ForecastResolver>) -> Router {
    Router::new()
        .route("/forecast", get(get_forecast).post(post_forecast))
        .route("/forecast/view", get(get_forecast_view))
        .route("/health", get(health))
        .with_state(resolver)
}

async fn get_forecast(
    State(resolver): State<Arc<ForecastResolver>>,
    Query(params): Query<CityParams>,
) -> Json<ResolutionResult> {
    Json(resolver.resolve(&params.city).await)
}

async fn post_forecast(
    State(resolver): State<Arc<ForecastResolver>>,
    Json(body): Json<CityBody>,
) -> Json<ResolutionResult> {
    Json(resolver.resolve_value(&body.city).await)
}

async fn get_forecast_view(
    State(resolver): State<Arc<ForecastResolver>>,
    Query(params): Query<CityParams>,
) -> Json<ForecastView> {
    let result = resolver.resolve(&params.city).await;
    Json(ForecastView::from(&result))
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}
