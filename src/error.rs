use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        json_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            200..=299 => (StatusCode::UNPROCESSABLE_ENTITY, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Terminal outcomes of a directions request, keyed by the provider status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionsFailure {
    LocationNotFound,
    ZeroResults,
    WaypointLimitExceeded,
    RouteTooLong,
    InvalidRequest,
    QuotaExceeded,
    RequestDenied,
    UnknownProviderError,
}

impl DirectionsFailure {
    /// Returns `None` for `OK`; any status the provider may add later is unknown.
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            "OK" => None,
            "NOT_FOUND" => Some(Self::LocationNotFound),
            "ZERO_RESULTS" => Some(Self::ZeroResults),
            "MAX_WAYPOINTS_EXCEEDED" => Some(Self::WaypointLimitExceeded),
            "MAX_ROUTE_LENGTH_EXCEEDED" => Some(Self::RouteTooLong),
            "INVALID_REQUEST" => Some(Self::InvalidRequest),
            "OVER_QUERY_LIMIT" => Some(Self::QuotaExceeded),
            "REQUEST_DENIED" => Some(Self::RequestDenied),
            _ => Some(Self::UnknownProviderError),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::LocationNotFound => 200,
            Self::ZeroResults => 201,
            Self::WaypointLimitExceeded => 202,
            Self::RouteTooLong => 203,
            Self::InvalidRequest => 204,
            Self::QuotaExceeded => 205,
            Self::RequestDenied => 206,
            Self::UnknownProviderError => 207,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::LocationNotFound => {
                "At least one of the locations could not be found. Check the spelling and try again."
            }
            Self::ZeroResults => "No route could be found between these locations.",
            Self::WaypointLimitExceeded => "Too many stops. A route can have at most 23 waypoints.",
            Self::RouteTooLong => "The requested route is too long to be calculated.",
            Self::InvalidRequest => {
                "The route request was invalid. Check the origin and destination."
            }
            Self::QuotaExceeded => "Too many route requests. Please wait a moment and try again.",
            Self::RequestDenied => "The route request was denied by the maps service.",
            Self::UnknownProviderError => {
                "The maps service failed to calculate a route. Please try again."
            }
        }
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn route_payload_parse_error() -> Error {
    Error {
        code: 102,
        message: "stored route data could not be parsed".into(),
    }
}

pub fn directions_error(failure: DirectionsFailure) -> Error {
    Error {
        code: failure.code(),
        message: failure.message().into(),
    }
}

pub fn geocode_error(status: &str) -> Error {
    Error {
        code: 300,
        message: format!("geocoding failed: {}", status),
    }
}

pub fn reconstruction_error() -> Error {
    Error {
        code: 301,
        message: "route could not be reconstructed".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn json_error<T: Debug>(_: T) -> Error {
    Error {
        code: 2,
        message: "json error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn empty_point_set_error() -> Error {
    Error {
        code: 6,
        message: "cannot compute bounds of an empty point set".into(),
    }
}

#[test]
fn directions_statuses_map_to_distinct_errors() {
    let statuses = [
        "NOT_FOUND",
        "ZERO_RESULTS",
        "MAX_WAYPOINTS_EXCEEDED",
        "MAX_ROUTE_LENGTH_EXCEEDED",
        "INVALID_REQUEST",
        "OVER_QUERY_LIMIT",
        "REQUEST_DENIED",
        "UNKNOWN_ERROR",
    ];

    let errors: Vec<Error> = statuses
        .iter()
        .map(|s| directions_error(DirectionsFailure::from_status(s).unwrap()))
        .collect();

    for (i, a) in errors.iter().enumerate() {
        for b in errors.iter().skip(i + 1) {
            assert_ne!(a.code, b.code);
            assert_ne!(a.message, b.message);
        }
    }

    assert_eq!(DirectionsFailure::from_status("OK"), None);
    assert_eq!(
        DirectionsFailure::from_status("SOMETHING_NEW"),
        Some(DirectionsFailure::UnknownProviderError)
    );
}

#[test]
fn zero_results_message() {
    let err = directions_error(DirectionsFailure::ZeroResults);
    assert_eq!(err.message, "No route could be found between these locations.");
}

#[test]
fn responses_hide_internal_faults() {
    let response = directions_error(DirectionsFailure::RouteTooLong).into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = route_payload_parse_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = upstream_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
