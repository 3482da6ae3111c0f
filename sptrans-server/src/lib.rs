//! SPTrans Olho Vivo gateway server.
//!
//! Serves São Paulo bus data (lines, stops, vehicle positions, arrival
//! predictions) as clean JSON, authenticating against the Olho Vivo API
//! on the caller's behalf.

pub mod config;
pub mod sptrans;
pub mod translate;
pub mod web;
