use std::panic::Location;

use hyper::StatusCode;
use serde_json::json;
use utils::http::{Body, RouteError};
use utils::make_response;

use crate::service::ServiceError;
use crate::validation::{DecodeError, Violation, ViolationList};

pub type Result<T, E = RouteError<ApiError>> = std::result::Result<T, E>;

pub const REFERENCE_NOT_FOUND: &str = "This channel does not exist.";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("failed to read http body: {0}")]
	ReadBody(Box<dyn std::error::Error + Send + Sync>),
	#[error("failed to decode request: {0}")]
	Decode(#[from] DecodeError),
	#[error("service error: {0}")]
	Service(#[from] ServiceError),
}

/// The 422 body listing every violation.
pub fn violations_response(violations: &ViolationList) -> hyper::Response<Body> {
	make_response!(
		StatusCode::UNPROCESSABLE_ENTITY,
		json!({
			"title": "Validation Failed",
			"detail": violations.to_string(),
			"violations": violations,
		})
	)
}

impl From<DecodeError> for RouteError<ApiError> {
	#[track_caller]
	fn from(err: DecodeError) -> Self {
		let response = match &err {
			DecodeError::Invalid(violations) => violations_response(violations),
			DecodeError::Malformed(_) | DecodeError::NotAnObject => {
				make_response!(StatusCode::BAD_REQUEST, json!({ "message": "Invalid JSON body" }))
			}
		};

		RouteError::from(response)
			.with_source(err.into())
			.with_location(Location::caller())
	}
}

impl From<ServiceError> for RouteError<ApiError> {
	#[track_caller]
	fn from(err: ServiceError) -> Self {
		let route_err = match &err {
			ServiceError::NotFound => RouteError::from((StatusCode::NOT_FOUND, "Not found")),
			ServiceError::ReferenceNotFound(id) => RouteError::from(violations_response(
				&vec![Violation::new("channel", REFERENCE_NOT_FOUND).with_parameter("{{ value }}", id.to_string())].into(),
			)),
			ServiceError::Repository(_) => RouteError::from((StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")),
		};

		route_err.with_source(err.into()).with_location(Location::caller())
	}
}
