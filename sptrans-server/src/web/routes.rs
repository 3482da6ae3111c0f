//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::sptrans::SptransError;
use crate::translate::{
    ArrivalPredictionsByLineResponse, ArrivalPredictionsByStopResponse,
    ArrivalPredictionsResponse, CompaniesResponse, CorridorsResponse,
    GarageVehiclePositionsResponse, SearchLineByDirectionResponse, SearchLinesResponse,
    SearchStopsResponse, StopsByCorridorResponse, StopsByLineResponse,
    VehiclePositionsByLineResponse, VehiclePositionsResponse,
};

use super::requests::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/lines/search", get(search_lines))
        .route("/lines/search-by-direction", get(search_line_by_direction))
        .route("/stops/search", get(search_stops))
        .route("/stops/by-line", get(stops_by_line))
        .route("/stops/by-corridor", get(stops_by_corridor))
        .route("/corridors", get(corridors))
        .route("/companies", get(companies))
        .route("/positions", get(vehicle_positions))
        .route("/positions/by-line", get(vehicle_positions_by_line))
        .route("/positions/garage", get(vehicle_positions_in_garage))
        .route("/predictions", get(arrival_predictions))
        .route("/predictions/by-line", get(arrival_predictions_by_line))
        .route("/predictions/by-stop", get(arrival_predictions_by_stop))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search bus lines by name or number.
async fn search_lines(
    State(state): State<AppState>,
    Query(req): Query<SearchRequest>,
) -> Result<Json<SearchLinesResponse>, AppError> {
    let term = search_term(req.term.as_deref())?;
    let lines = state.run(state.client.search_lines(term)).await?;
    Ok(Json(SearchLinesResponse::build(term, &lines)))
}

async fn search_line_by_direction(
    State(state): State<AppState>,
    Query(req): Query<SearchByDirectionRequest>,
) -> Result<Json<SearchLineByDirectionResponse>, AppError> {
    let term = search_term(req.term.as_deref())?;
    let direction = direction(req.direction.as_deref())?;
    let lines = state
        .run(state.client.search_line_by_direction(term, direction))
        .await?;
    Ok(Json(SearchLineByDirectionResponse::build(
        term, direction, &lines,
    )))
}

/// Search stops by name or address.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<SearchRequest>,
) -> Result<Json<SearchStopsResponse>, AppError> {
    let term = search_term(req.term.as_deref())?;
    let stops = state.run(state.client.search_stops(term)).await?;
    Ok(Json(SearchStopsResponse::build(term, &stops)))
}

async fn stops_by_line(
    State(state): State<AppState>,
    Query(req): Query<LineRequest>,
) -> Result<Json<StopsByLineResponse>, AppError> {
    let line_code = positive_code("line_code", req.line_code.as_deref())?;
    let stops = state.run(state.client.get_stops_by_line(line_code)).await?;
    Ok(Json(StopsByLineResponse::build(line_code, &stops)))
}

async fn stops_by_corridor(
    State(state): State<AppState>,
    Query(req): Query<CorridorRequest>,
) -> Result<Json<StopsByCorridorResponse>, AppError> {
    let corridor_code = positive_code("corridor_code", req.corridor_code.as_deref())?;
    let stops = state
        .run(state.client.get_stops_by_corridor(corridor_code))
        .await?;
    Ok(Json(StopsByCorridorResponse::build(corridor_code, &stops)))
}

async fn corridors(State(state): State<AppState>) -> Result<Json<CorridorsResponse>, AppError> {
    let corridors = state.run(state.client.get_corridors()).await?;
    Ok(Json(CorridorsResponse::build(&corridors)))
}

async fn companies(State(state): State<AppState>) -> Result<Json<CompaniesResponse>, AppError> {
    let company = state.run(state.client.get_companies()).await?;
    Ok(Json(CompaniesResponse::build(&company)))
}

/// Real-time positions of every vehicle.
async fn vehicle_positions(
    State(state): State<AppState>,
) -> Result<Json<VehiclePositionsResponse>, AppError> {
    let positions = state.run(state.client.get_vehicle_positions()).await?;
    Ok(Json(VehiclePositionsResponse::build(&positions)))
}

async fn vehicle_positions_by_line(
    State(state): State<AppState>,
    Query(req): Query<LineRequest>,
) -> Result<Json<VehiclePositionsByLineResponse>, AppError> {
    let line_code = positive_code("line_code", req.line_code.as_deref())?;
    let positions = state
        .run(state.client.get_vehicle_positions_by_line(line_code))
        .await?;
    Ok(Json(VehiclePositionsByLineResponse::build(
        line_code, &positions,
    )))
}

async fn vehicle_positions_in_garage(
    State(state): State<AppState>,
    Query(req): Query<GarageRequest>,
) -> Result<Json<GarageVehiclePositionsResponse>, AppError> {
    let company_code = positive_code("company_code", req.company_code.as_deref())?;
    let line_code = positive_code("line_code", req.line_code.as_deref())?;
    let positions = state
        .run(
            state
                .client
                .get_vehicle_positions_in_garage(company_code, line_code),
        )
        .await?;
    Ok(Json(GarageVehiclePositionsResponse::build(
        company_code,
        line_code,
        &positions,
    )))
}

/// Arrival predictions for one line at one stop.
async fn arrival_predictions(
    State(state): State<AppState>,
    Query(req): Query<StopLineRequest>,
) -> Result<Json<ArrivalPredictionsResponse>, AppError> {
    let stop_code = positive_code("stop_code", req.stop_code.as_deref())?;
    let line_code = positive_code("line_code", req.line_code.as_deref())?;
    let prediction = state
        .run(state.client.get_arrival_predictions(stop_code, line_code))
        .await?;
    Ok(Json(ArrivalPredictionsResponse::build(
        stop_code,
        line_code,
        &prediction,
    )))
}

async fn arrival_predictions_by_line(
    State(state): State<AppState>,
    Query(req): Query<LineRequest>,
) -> Result<Json<ArrivalPredictionsByLineResponse>, AppError> {
    let line_code = positive_code("line_code", req.line_code.as_deref())?;
    let predictions = state
        .run(state.client.get_arrival_predictions_by_line(line_code))
        .await?;
    Ok(Json(ArrivalPredictionsByLineResponse::build(
        line_code,
        &predictions,
    )))
}

async fn arrival_predictions_by_stop(
    State(state): State<AppState>,
    Query(req): Query<StopRequest>,
) -> Result<Json<ArrivalPredictionsByStopResponse>, AppError> {
    let stop_code = positive_code("stop_code", req.stop_code.as_deref())?;
    let predictions = state
        .run(state.client.get_arrival_predictions_by_stop(stop_code))
        .await?;
    Ok(Json(ArrivalPredictionsByStopResponse::build(
        stop_code,
        &predictions,
    )))
}

/// Error body returned by every route.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// What failed: "validation", "authentication", "upstream",
    /// "transport", "decode" or "timeout".
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Gateway(SptransError),
}

impl From<SptransError> for AppError {
    fn from(e: SptransError) -> Self {
        AppError::Gateway(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message.clone(),
                    kind: "validation",
                    code: None,
                    details: None,
                },
            ),
            AppError::Gateway(e) => {
                let (status, kind) = match e {
                    SptransError::Auth(_) => (StatusCode::BAD_GATEWAY, "authentication"),
                    SptransError::Api(_) => (StatusCode::BAD_GATEWAY, "upstream"),
                    SptransError::Http(_) => (StatusCode::SERVICE_UNAVAILABLE, "transport"),
                    SptransError::Decode { .. } => (StatusCode::BAD_GATEWAY, "decode"),
                    SptransError::Cancelled { .. } => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
                };
                let body = match e.api_error() {
                    Some(api) => ErrorResponse {
                        error: api.message.clone(),
                        kind,
                        code: api.code,
                        details: api.details.clone(),
                    },
                    None => ErrorResponse {
                        error: e.to_string(),
                        kind,
                        code: None,
                        details: None,
                    },
                };
                (status, body)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = self.parts();

        if status.is_server_error() {
            error!(status = status.as_u16(), kind = body.kind, "{}", body.error);
        } else {
            warn!(status = status.as_u16(), "{}", body.error);
        }

        (status, Json(body)).into_response()
    }
}
