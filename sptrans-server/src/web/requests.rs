//! Query parameters for the HTTP routes and their validation.
//!
//! Parameters arrive as optional strings and are parsed here, so a missing,
//! malformed or out-of-range value gets the same JSON message instead of an
//! extractor rejection.

use serde::Deserialize;

use crate::sptrans::Direction;

use super::routes::AppError;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub term: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchByDirectionRequest {
    pub term: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LineRequest {
    pub line_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StopRequest {
    pub stop_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CorridorRequest {
    pub corridor_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GarageRequest {
    pub company_code: Option<String>,
    pub line_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StopLineRequest {
    pub stop_code: Option<String>,
    pub line_code: Option<String>,
}

/// A search term must have at least one non-blank character. The term is
/// forwarded as typed.
pub fn search_term(term: Option<&str>) -> Result<&str, AppError> {
    term.filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "term parameter is required".to_string(),
        })
}

/// SPTrans codes are positive integers.
pub fn positive_code(name: &str, value: Option<&str>) -> Result<u32, AppError> {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .ok_or_else(|| AppError::BadRequest {
            message: format!("{name} parameter must be a positive integer"),
        })
}

pub fn direction(value: Option<&str>) -> Result<Direction, AppError> {
    value
        .and_then(|v| v.trim().parse::<u8>().ok())
        .and_then(Direction::from_code)
        .ok_or_else(|| AppError::BadRequest {
            message: "direction parameter must be 1 or 2".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::BadRequest { message } => message,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn search_term_is_forwarded_as_typed() {
        assert_eq!(search_term(Some("  Lapa ")).unwrap(), "  Lapa ");
        assert_eq!(search_term(Some("8000")).unwrap(), "8000");
    }

    #[test]
    fn search_term_rejects_blank() {
        assert_eq!(message(search_term(None).unwrap_err()), "term parameter is required");
        assert!(search_term(Some("")).is_err());
        assert!(search_term(Some("   ")).is_err());
    }

    #[test]
    fn positive_codes() {
        assert_eq!(positive_code("line_code", Some("1273")).unwrap(), 1273);
        assert_eq!(
            message(positive_code("line_code", Some("0")).unwrap_err()),
            "line_code parameter must be a positive integer"
        );
        assert!(positive_code("stop_code", Some("-5")).is_err());
        assert!(positive_code("stop_code", None).is_err());
        assert!(positive_code("stop_code", Some("4294967296")).is_err());
    }

    #[test]
    fn malformed_codes_get_the_same_message() {
        for raw in ["abc", "", "12x", "1.5", "99999999999999999999"] {
            assert_eq!(
                message(positive_code("line_code", Some(raw)).unwrap_err()),
                "line_code parameter must be a positive integer",
                "{raw:?}"
            );
        }
    }

    #[test]
    fn directions() {
        assert_eq!(direction(Some("1")).unwrap(), Direction::MainToSecondary);
        assert_eq!(direction(Some("2")).unwrap(), Direction::SecondaryToMain);
        assert_eq!(
            message(direction(Some("3")).unwrap_err()),
            "direction parameter must be 1 or 2"
        );
        assert!(direction(Some("0")).is_err());
        assert!(direction(Some("258")).is_err());
        assert!(direction(Some("north")).is_err());
        assert!(direction(Some("")).is_err());
        assert!(direction(None).is_err());
    }
}
