//! Olho Vivo API response records.
//!
//! These types map directly to the upstream JSON, which uses terse
//! one- to three-letter keys. Every known field is required: a payload
//! that is missing one is a decode error, never a zero value. Unknown
//! extra keys are ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Direction of travel on a line.
///
/// SPTrans numbers directions from the line's main terminal: `1` runs main
/// terminal to secondary terminal, `2` runs back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    MainToSecondary,
    SecondaryToMain,
}

impl Direction {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Direction::MainToSecondary),
            2 => Some(Direction::SecondaryToMain),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Direction::MainToSecondary => 1,
            Direction::SecondaryToMain => 2,
        }
    }
}

/// A bus line, from `/Linha/Buscar` and `/Linha/BuscarLinhaSentido`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Line {
    /// Line code, the upstream identifier used by other endpoints.
    #[serde(rename = "cl")]
    pub code: u32,
    #[serde(rename = "lc")]
    pub is_circular: bool,
    /// Public sign number, e.g. "8000".
    #[serde(rename = "lt")]
    pub number: String,
    #[serde(rename = "sl")]
    pub direction: u8,
    /// Line type; 10 for regular service, 21..=41 for training/special.
    #[serde(rename = "tl")]
    pub line_type: u8,
    /// Main terminal.
    #[serde(rename = "tp")]
    pub origin: String,
    /// Secondary terminal.
    #[serde(rename = "ts")]
    pub destination: String,
}

/// A bus stop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stop {
    #[serde(rename = "cp")]
    pub code: u32,
    #[serde(rename = "np")]
    pub name: String,
    #[serde(rename = "ed")]
    pub address: String,
    #[serde(rename = "py")]
    pub latitude: f64,
    #[serde(rename = "px")]
    pub longitude: f64,
}

/// A dedicated bus corridor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Corridor {
    #[serde(rename = "cc")]
    pub code: u32,
    #[serde(rename = "nc")]
    pub name: String,
}

/// Response from `/Empresa`: operating companies grouped by area.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Company {
    /// Upstream reference time ("HH:MM").
    #[serde(rename = "hr")]
    pub hour: String,
    #[serde(rename = "e")]
    pub areas: Vec<CompanyArea>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanyArea {
    #[serde(rename = "a")]
    pub area: u32,
    #[serde(rename = "e")]
    pub companies: Vec<CompanyEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanyEntry {
    #[serde(rename = "a")]
    pub area: u32,
    #[serde(rename = "c")]
    pub code: u32,
    #[serde(rename = "n")]
    pub name: String,
}

/// A vehicle's last reported position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vehicle {
    /// Vehicle prefix.
    #[serde(rename = "p")]
    pub id: u32,
    /// Wheelchair accessible.
    #[serde(rename = "a")]
    pub accessible: bool,
    #[serde(rename = "ta")]
    pub last_update: DateTime<Utc>,
    #[serde(rename = "py")]
    pub latitude: f64,
    #[serde(rename = "px")]
    pub longitude: f64,
}

/// Response from the `/Posicao` family.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VehiclePositions {
    #[serde(rename = "hr")]
    pub hour: String,
    #[serde(rename = "l")]
    pub lines: Vec<LineVehicles>,
}

/// One line and the vehicles currently running it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineVehicles {
    /// Full sign, e.g. "8000-10".
    #[serde(rename = "c")]
    pub identifier: String,
    #[serde(rename = "cl")]
    pub code: u32,
    #[serde(rename = "sl")]
    pub direction: u8,
    #[serde(rename = "lt0")]
    pub origin: String,
    #[serde(rename = "lt1")]
    pub destination: String,
    /// Vehicle count as reported by the upstream.
    #[serde(rename = "qv")]
    pub vehicle_qty: u32,
    #[serde(rename = "vs")]
    pub vehicles: Vec<Vehicle>,
}

/// Response from `/Previsao`: a single stop.
///
/// SPTrans sends `"p": null` when it has nothing to predict for the pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArrivalPrediction {
    #[serde(rename = "hr")]
    pub hour: String,
    #[serde(rename = "p")]
    pub stop: Option<PredictionStop>,
}

/// Response from `/Previsao/Linha` and `/Previsao/Parada`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArrivalPredictionsByLine {
    #[serde(rename = "hr")]
    pub hour: String,
    #[serde(rename = "ps")]
    pub stops: Vec<PredictionStop>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionStop {
    #[serde(rename = "cp")]
    pub code: u32,
    #[serde(rename = "np")]
    pub name: String,
    #[serde(rename = "py")]
    pub latitude: f64,
    #[serde(rename = "px")]
    pub longitude: f64,
    #[serde(rename = "l")]
    pub lines: Vec<LinePredictions>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinePredictions {
    #[serde(rename = "c")]
    pub identifier: String,
    #[serde(rename = "cl")]
    pub code: u32,
    #[serde(rename = "sl")]
    pub direction: u8,
    #[serde(rename = "lt0")]
    pub origin: String,
    #[serde(rename = "lt1")]
    pub destination: String,
    #[serde(rename = "qv")]
    pub vehicle_qty: u32,
    #[serde(rename = "vs")]
    pub predictions: Vec<PredictedVehicle>,
}

/// A vehicle expected at the stop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictedVehicle {
    /// Vehicle prefix; a string here, unlike in `/Posicao`.
    #[serde(rename = "p")]
    pub vehicle_id: String,
    /// Predicted arrival ("HH:MM").
    #[serde(rename = "t")]
    pub arrival_time: String,
    #[serde(rename = "a")]
    pub accessible: bool,
    #[serde(rename = "ta")]
    pub last_update: DateTime<Utc>,
    #[serde(rename = "py")]
    pub latitude: f64,
    #[serde(rename = "px")]
    pub longitude: f64,
}
