//! SPTrans Olho Vivo API gateway.
//!
//! This module provides an authenticated HTTP client for the São Paulo bus
//! telemetry API (lines, stops, vehicle positions, arrival predictions).
//!
//! Key characteristics of Olho Vivo:
//! - Authentication is a `POST` carrying the token as a query parameter; the
//!   answer is the bare text `true` or `false`, and the session itself rides
//!   on cookies
//! - Field names are terse (`cl`, `lt0`, `qv`, ...) and nested positionally
//! - Positions and predictions change continuously; nothing here is cached

mod client;
mod error;
mod session;
mod types;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_VALIDITY_WINDOW, SptransClient, SptransConfig, within_deadline,
};
pub use error::{ApiError, SptransError};
pub use session::{AUTH_PATH, SessionManager};
pub use types::{
    ArrivalPrediction, ArrivalPredictionsByLine, Company, CompanyArea, CompanyEntry, Corridor,
    Direction, Line, LinePredictions, LineVehicles, PredictedVehicle, PredictionStop, Stop,
    Vehicle, VehiclePositions,
};
