//! Translation from Olho Vivo records to caller-facing responses.
//!
//! Conversions are pure: they borrow the source record and never keep or
//! modify it.

mod dto;
mod response;

pub use dto::*;
pub use response::*;
