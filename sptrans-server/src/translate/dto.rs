//! Readable counterparts of the Olho Vivo records.
//!
//! Each DTO carries every field of its source record under a stable name.
//! Nested sequences keep upstream order.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sptrans::{
    ArrivalPrediction, ArrivalPredictionsByLine, Company, CompanyArea, CompanyEntry, Corridor,
    Line, LinePredictions, LineVehicles, PredictedVehicle, PredictionStop, Stop, Vehicle,
    VehiclePositions,
};

/// A bus line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineResult {
    pub code: u32,
    pub is_circular: bool,
    /// Sign number, e.g. "8000"
    pub number: String,
    /// 1 = main terminal to secondary, 2 = back
    pub direction: u8,
    #[serde(rename = "type")]
    pub line_type: u8,
    pub origin: String,
    pub destination: String,
}

/// A bus stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopResult {
    pub code: u32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorResult {
    pub code: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyResult {
    pub area: u32,
    pub code: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyAreaResult {
    pub area: u32,
    pub companies: Vec<CompanyResult>,
}

/// Operating companies grouped by area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompaniesResult {
    pub timestamp: String,
    pub areas: Vec<CompanyAreaResult>,
}

/// A vehicle's last reported position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleResult {
    pub id: u32,
    pub accessible: bool,
    pub last_update: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

/// A line with the vehicles currently running it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineVehiclesResult {
    /// Full sign, e.g. "8000-10"
    pub identifier: String,
    pub code: u32,
    pub direction: u8,
    pub origin: String,
    pub destination: String,
    /// Vehicle count as reported upstream
    pub vehicle_count: u32,
    pub vehicles: Vec<VehicleResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehiclePositionsResult {
    pub timestamp: String,
    pub lines: Vec<LineVehiclesResult>,
}

/// A vehicle predicted to reach a stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub vehicle_id: String,
    pub arrival_time: String,
    pub accessible: bool,
    pub last_update: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePredictionsResult {
    pub identifier: String,
    pub code: u32,
    pub direction: u8,
    pub origin: String,
    pub destination: String,
    pub vehicle_count: u32,
    pub predictions: Vec<PredictionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopPredictionsResult {
    pub code: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub lines: Vec<LinePredictionsResult>,
}

/// Predictions at a single stop. `stop` is absent when SPTrans had nothing
/// to predict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalPredictionResult {
    pub timestamp: String,
    pub stop: Option<StopPredictionsResult>,
}

/// Predictions across several stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalPredictionsResult {
    pub timestamp: String,
    pub stops: Vec<StopPredictionsResult>,
}

// Conversion implementations

impl LineResult {
    pub fn from_line(line: &Line) -> Self {
        Self {
            code: line.code,
            is_circular: line.is_circular,
            number: line.number.clone(),
            direction: line.direction,
            line_type: line.line_type,
            origin: line.origin.clone(),
            destination: line.destination.clone(),
        }
    }
}

impl StopResult {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            code: stop.code,
            name: stop.name.clone(),
            address: stop.address.clone(),
            latitude: stop.latitude,
            longitude: stop.longitude,
        }
    }
}

impl CorridorResult {
    pub fn from_corridor(corridor: &Corridor) -> Self {
        Self {
            code: corridor.code,
            name: corridor.name.clone(),
        }
    }
}

impl CompanyResult {
    fn from_entry(entry: &CompanyEntry) -> Self {
        Self {
            area: entry.area,
            code: entry.code,
            name: entry.name.clone(),
        }
    }
}

impl CompanyAreaResult {
    fn from_area(area: &CompanyArea) -> Self {
        Self {
            area: area.area,
            companies: area.companies.iter().map(CompanyResult::from_entry).collect(),
        }
    }
}

impl CompaniesResult {
    pub fn from_company(company: &Company) -> Self {
        Self {
            timestamp: company.hour.clone(),
            areas: company.areas.iter().map(CompanyAreaResult::from_area).collect(),
        }
    }

    pub fn company_count(&self) -> usize {
        self.areas.iter().map(|a| a.companies.len()).sum()
    }
}

impl VehicleResult {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            accessible: vehicle.accessible,
            last_update: vehicle.last_update,
            latitude: vehicle.latitude,
            longitude: vehicle.longitude,
        }
    }
}

impl LineVehiclesResult {
    fn from_line_vehicles(line: &LineVehicles) -> Self {
        Self {
            identifier: line.identifier.clone(),
            code: line.code,
            direction: line.direction,
            origin: line.origin.clone(),
            destination: line.destination.clone(),
            vehicle_count: line.vehicle_qty,
            vehicles: line.vehicles.iter().map(VehicleResult::from_vehicle).collect(),
        }
    }
}

impl VehiclePositionsResult {
    pub fn from_positions(positions: &VehiclePositions) -> Self {
        Self {
            timestamp: positions.hour.clone(),
            lines: positions
                .lines
                .iter()
                .map(LineVehiclesResult::from_line_vehicles)
                .collect(),
        }
    }

    /// Sum of the per-line vehicle counts.
    pub fn vehicle_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.vehicle_count)).sum()
    }
}

impl PredictionResult {
    fn from_predicted(vehicle: &PredictedVehicle) -> Self {
        Self {
            vehicle_id: vehicle.vehicle_id.clone(),
            arrival_time: vehicle.arrival_time.clone(),
            accessible: vehicle.accessible,
            last_update: vehicle.last_update,
            latitude: vehicle.latitude,
            longitude: vehicle.longitude,
        }
    }
}

impl LinePredictionsResult {
    fn from_line_predictions(line: &LinePredictions) -> Self {
        Self {
            identifier: line.identifier.clone(),
            code: line.code,
            direction: line.direction,
            origin: line.origin.clone(),
            destination: line.destination.clone(),
            vehicle_count: line.vehicle_qty,
            predictions: line
                .predictions
                .iter()
                .map(PredictionResult::from_predicted)
                .collect(),
        }
    }
}

impl StopPredictionsResult {
    pub fn from_stop(stop: &PredictionStop) -> Self {
        Self {
            code: stop.code,
            name: stop.name.clone(),
            latitude: stop.latitude,
            longitude: stop.longitude,
            lines: stop
                .lines
                .iter()
                .map(LinePredictionsResult::from_line_predictions)
                .collect(),
        }
    }

    pub fn prediction_count(&self) -> usize {
        self.lines.iter().map(|l| l.predictions.len()).sum()
    }
}

impl ArrivalPredictionResult {
    pub fn from_prediction(prediction: &ArrivalPrediction) -> Self {
        Self {
            timestamp: prediction.hour.clone(),
            stop: prediction.stop.as_ref().map(StopPredictionsResult::from_stop),
        }
    }

    pub fn prediction_count(&self) -> usize {
        self.stop
            .as_ref()
            .map_or(0, StopPredictionsResult::prediction_count)
    }
}

impl ArrivalPredictionsResult {
    pub fn from_predictions(predictions: &ArrivalPredictionsByLine) -> Self {
        Self {
            timestamp: predictions.hour.clone(),
            stops: predictions
                .stops
                .iter()
                .map(StopPredictionsResult::from_stop)
                .collect(),
        }
    }

    pub fn prediction_count(&self) -> usize {
        self.stops
            .iter()
            .map(StopPredictionsResult::prediction_count)
            .sum()
    }
}
