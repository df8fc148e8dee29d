use std::fmt;
use std::panic::Location;

use http::StatusCode;
use serde_json::json;

use super::Body;
use crate::make_response;

/// How loudly a [`RouteError`] should be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
	/// Server errors
	Error,
	/// Client errors with an underlying cause
	Debug,
	/// Plain client errors
	Off,
}

/// An error returned from a route handler.
///
/// It already holds the response the client will see. The optional source,
/// the span it was raised in and the call site are only for logging.
pub struct RouteError<E> {
	response: hyper::Response<Body>,
	source: Option<E>,
	span: tracing::Span,
	location: &'static Location<'static>,
}

impl<E> RouteError<E> {
	#[track_caller]
	pub fn new(response: hyper::Response<Body>) -> Self {
		Self {
			response,
			source: None,
			span: tracing::Span::current(),
			location: Location::caller(),
		}
	}

	/// A response of the form `{"message": ...}`.
	#[track_caller]
	pub fn message(status: StatusCode, message: impl AsRef<str>) -> Self {
		Self::new(make_response!(status, json!({ "message": message.as_ref() })))
	}

	pub fn with_source(mut self, source: E) -> Self {
		self.source = Some(source);
		self
	}

	pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
		self.location = location;
		self
	}

	pub fn status(&self) -> StatusCode {
		self.response.status()
	}

	pub fn source(&self) -> Option<&E> {
		self.source.as_ref()
	}

	pub fn span(&self) -> &tracing::Span {
		&self.span
	}

	pub fn location(&self) -> &'static Location<'static> {
		self.location
	}

	pub fn log_level(&self) -> LogLevel {
		if self.status().is_server_error() {
			LogLevel::Error
		} else if self.source.is_some() {
			LogLevel::Debug
		} else {
			LogLevel::Off
		}
	}

	pub fn response(self) -> hyper::Response<Body> {
		self.response
	}
}

impl<E> From<hyper::Response<Body>> for RouteError<E> {
	#[track_caller]
	fn from(response: hyper::Response<Body>) -> Self {
		Self::new(response)
	}
}

impl<E, S: AsRef<str>> From<(StatusCode, S)> for RouteError<E> {
	#[track_caller]
	fn from((status, message): (StatusCode, S)) -> Self {
		Self::message(status, message)
	}
}

impl<E, S: AsRef<str>, T: Into<E>> From<(StatusCode, S, T)> for RouteError<E> {
	#[track_caller]
	fn from((status, message, source): (StatusCode, S, T)) -> Self {
		Self::message(status, message).with_source(source.into())
	}
}

impl<E> From<&str> for RouteError<E> {
	#[track_caller]
	fn from(message: &str) -> Self {
		Self::message(StatusCode::INTERNAL_SERVER_ERROR, message)
	}
}

impl<E: fmt::Debug> fmt::Debug for RouteError<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.source {
			Some(source) => write!(f, "RouteError({}): {source:?}", self.status()),
			None => write!(f, "RouteError({})", self.status()),
		}
	}
}

impl<E: fmt::Display> fmt::Display for RouteError<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.source {
			Some(source) => write!(f, "{}: {source}", self.status()),
			None => write!(f, "{}", self.status()),
		}
	}
}

impl<E: std::error::Error + 'static> std::error::Error for RouteError<E> {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source.as_ref().map(|source| source as _)
	}
}
