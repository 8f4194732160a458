// HTTP request handlers
use crate::application::ChartError;
use crate::application::chart_service::TemperatureChartService;
use crate::application::render::{ChartRenderer, RenderOutcome};
use crate::domain::temperature::RawTemperature;
use crate::infrastructure::html_page::HtmlPageContext;
use crate::infrastructure::http_response::{accepts_brotli, html_response, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Readings for one chart, index-aligned.
#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub temperatures: Vec<RawTemperature>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct PopularCities<'a> {
    cities: &'a [String],
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn popular_cities(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let body = PopularCities {
        cities: &state.chart_service.settings().popular_cities,
    };
    into_response(json_response(StatusCode::OK, &body, accepts_brotli(&headers)).await)
}

/// Chart configuration document for the posted readings
pub async fn temperature_chart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ChartRequest>,
) -> Response {
    let compress = accepts_brotli(&headers);

    match state
        .chart_service
        .build_from_columns(&request.cities, &request.temperatures)
    {
        Ok(build) => {
            into_response(json_response(StatusCode::OK, &build.configuration, compress).await)
        }
        Err(e) => bad_request(e, compress).await,
    }
}

/// Full page drawing the chart, or the static table when it cannot be drawn
pub async fn temperature_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ChartRequest>,
) -> Response {
    match render_page(&state.chart_service, &request) {
        Ok(html) => into_response(html_response(html)),
        Err(e) => bad_request(e, accepts_brotli(&headers)).await,
    }
}

fn render_page(
    service: &TemperatureChartService,
    request: &ChartRequest,
) -> Result<String, ChartError> {
    let settings = service.settings();
    let context = HtmlPageContext::new(&settings.title, settings.script_url.clone());
    let mut renderer = ChartRenderer::new(context, service.clone());

    let outcome = renderer.render(&request.cities, &request.temperatures)?;
    match &outcome {
        RenderOutcome::Chart { range, anomalies } => tracing::debug!(
            min = range.min,
            max = range.max,
            fallbacks = anomalies.len(),
            "page chart rendered"
        ),
        RenderOutcome::Table { reason, anomalies } => tracing::info!(
            fallbacks = anomalies.len(),
            "serving static temperature table: {}",
            reason
        ),
    }

    let html = renderer.context().to_html();
    renderer.teardown();
    Ok(html)
}

async fn bad_request(error: ChartError, compress: bool) -> Response {
    tracing::warn!("rejecting chart request: {}", error);
    let body = ErrorBody {
        error: error.to_string(),
    };
    into_response(json_response(StatusCode::BAD_REQUEST, &body, compress).await)
}

fn into_response(result: Result<Response, StatusCode>) -> Response {
    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
