//! HTTP front end exposing the SPTrans queries as JSON endpoints.
//!
//! Parameters are validated here; the client itself trusts its inputs.

mod requests;
mod routes;
mod state;

pub use requests::*;
pub use routes::{AppError, ErrorResponse, create_router};
pub use state::AppState;
