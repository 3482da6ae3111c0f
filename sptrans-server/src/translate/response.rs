//! Response envelopes returned to callers.
//!
//! An envelope wraps converted data with the query parameters that produced
//! it and with aggregate counts. Counts are computed from the data while the
//! envelope is built and are never supplied from outside.

use serde::Serialize;

use crate::sptrans::{
    ArrivalPrediction, ArrivalPredictionsByLine, Company, Corridor, Direction, Line, Stop,
    VehiclePositions,
};

use super::dto::{
    ArrivalPredictionResult, ArrivalPredictionsResult, CompaniesResult, CorridorResult,
    LineResult, StopResult, VehiclePositionsResult,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchLinesResponse {
    pub total_results: usize,
    pub search_term: String,
    pub lines: Vec<LineResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchLineByDirectionResponse {
    pub total_results: usize,
    pub search_term: String,
    pub direction: u8,
    pub lines: Vec<LineResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStopsResponse {
    pub total_results: usize,
    pub search_term: String,
    pub stops: Vec<StopResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopsByLineResponse {
    pub total_results: usize,
    pub line_code: u32,
    pub stops: Vec<StopResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopsByCorridorResponse {
    pub total_results: usize,
    pub corridor_code: u32,
    pub stops: Vec<StopResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorsResponse {
    pub total_results: usize,
    pub corridors: Vec<CorridorResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompaniesResponse {
    pub timestamp: String,
    pub total_areas: usize,
    pub total_companies: usize,
    pub companies: CompaniesResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehiclePositionsResponse {
    pub timestamp: String,
    pub total_vehicles: u64,
    pub total_lines: usize,
    pub positions: VehiclePositionsResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehiclePositionsByLineResponse {
    pub timestamp: String,
    pub line_code: u32,
    pub total_vehicles: u64,
    pub total_lines: usize,
    pub positions: VehiclePositionsResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GarageVehiclePositionsResponse {
    pub timestamp: String,
    pub company_code: u32,
    pub line_code: u32,
    pub total_vehicles: u64,
    pub total_lines: usize,
    pub positions: VehiclePositionsResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalPredictionsResponse {
    pub timestamp: String,
    pub stop_code: u32,
    pub line_code: u32,
    pub total_predictions: usize,
    pub predictions: ArrivalPredictionResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalPredictionsByLineResponse {
    pub timestamp: String,
    pub line_code: u32,
    pub total_predictions: usize,
    pub total_stops: usize,
    pub predictions: ArrivalPredictionsResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalPredictionsByStopResponse {
    pub timestamp: String,
    pub stop_code: u32,
    pub total_predictions: usize,
    pub total_stops: usize,
    pub predictions: ArrivalPredictionsResult,
}

fn convert_lines(lines: &[Line]) -> Vec<LineResult> {
    lines.iter().map(LineResult::from_line).collect()
}

fn convert_stops(stops: &[Stop]) -> Vec<StopResult> {
    stops.iter().map(StopResult::from_stop).collect()
}

impl SearchLinesResponse {
    pub fn build(search_term: &str, lines: &[Line]) -> Self {
        let lines = convert_lines(lines);
        Self {
            total_results: lines.len(),
            search_term: search_term.to_string(),
            lines,
        }
    }
}

impl SearchLineByDirectionResponse {
    pub fn build(search_term: &str, direction: Direction, lines: &[Line]) -> Self {
        let lines = convert_lines(lines);
        Self {
            total_results: lines.len(),
            search_term: search_term.to_string(),
            direction: direction.code(),
            lines,
        }
    }
}

impl SearchStopsResponse {
    pub fn build(search_term: &str, stops: &[Stop]) -> Self {
        let stops = convert_stops(stops);
        Self {
            total_results: stops.len(),
            search_term: search_term.to_string(),
            stops,
        }
    }
}

impl StopsByLineResponse {
    pub fn build(line_code: u32, stops: &[Stop]) -> Self {
        let stops = convert_stops(stops);
        Self {
            total_results: stops.len(),
            line_code,
            stops,
        }
    }
}

impl StopsByCorridorResponse {
    pub fn build(corridor_code: u32, stops: &[Stop]) -> Self {
        let stops = convert_stops(stops);
        Self {
            total_results: stops.len(),
            corridor_code,
            stops,
        }
    }
}

impl CorridorsResponse {
    pub fn build(corridors: &[Corridor]) -> Self {
        let corridors: Vec<_> = corridors.iter().map(CorridorResult::from_corridor).collect();
        Self {
            total_results: corridors.len(),
            corridors,
        }
    }
}

impl CompaniesResponse {
    pub fn build(company: &Company) -> Self {
        let companies = CompaniesResult::from_company(company);
        Self {
            timestamp: companies.timestamp.clone(),
            total_areas: companies.areas.len(),
            total_companies: companies.company_count(),
            companies,
        }
    }
}

impl VehiclePositionsResponse {
    pub fn build(positions: &VehiclePositions) -> Self {
        let positions = VehiclePositionsResult::from_positions(positions);
        Self {
            timestamp: positions.timestamp.clone(),
            total_vehicles: positions.vehicle_count(),
            total_lines: positions.lines.len(),
            positions,
        }
    }
}

impl VehiclePositionsByLineResponse {
    pub fn build(line_code: u32, positions: &VehiclePositions) -> Self {
        let positions = VehiclePositionsResult::from_positions(positions);
        Self {
            timestamp: positions.timestamp.clone(),
            line_code,
            total_vehicles: positions.vehicle_count(),
            total_lines: positions.lines.len(),
            positions,
        }
    }
}

impl GarageVehiclePositionsResponse {
    pub fn build(company_code: u32, line_code: u32, positions: &VehiclePositions) -> Self {
        let positions = VehiclePositionsResult::from_positions(positions);
        Self {
            timestamp: positions.timestamp.clone(),
            company_code,
            line_code,
            total_vehicles: positions.vehicle_count(),
            total_lines: positions.lines.len(),
            positions,
        }
    }
}

impl ArrivalPredictionsResponse {
    pub fn build(stop_code: u32, line_code: u32, prediction: &ArrivalPrediction) -> Self {
        let predictions = ArrivalPredictionResult::from_prediction(prediction);
        Self {
            timestamp: predictions.timestamp.clone(),
            stop_code,
            line_code,
            total_predictions: predictions.prediction_count(),
            predictions,
        }
    }
}

impl ArrivalPredictionsByLineResponse {
    pub fn build(line_code: u32, predictions: &ArrivalPredictionsByLine) -> Self {
        let predictions = ArrivalPredictionsResult::from_predictions(predictions);
        Self {
            timestamp: predictions.timestamp.clone(),
            line_code,
            total_predictions: predictions.prediction_count(),
            total_stops: predictions.stops.len(),
            predictions,
        }
    }
}

impl ArrivalPredictionsByStopResponse {
    pub fn build(stop_code: u32, predictions: &ArrivalPredictionsByLine) -> Self {
        let predictions = ArrivalPredictionsResult::from_predictions(predictions);
        Self {
            timestamp: predictions.timestamp.clone(),
            stop_code,
            total_predictions: predictions.prediction_count(),
            total_stops: predictions.stops.len(),
            predictions,
        }
    }
}
