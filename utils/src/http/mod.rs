use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;

mod error;
pub mod ext;
pub mod router;

pub use error::{LogLevel, RouteError};

/// The body type produced by every handler in this crate.
pub type Body = Full<Bytes>;

/// Builds a JSON response. `$body` is anything whose `to_string` is the
/// JSON text, usually a `serde_json::Value`.
#[macro_export]
macro_rules! make_response {
	($status:expr, $body:expr) => {
		::hyper::Response::builder()
			.status($status)
			.header(::hyper::header::CONTENT_TYPE, "application/json")
			.body(::http_body_util::Full::new(::hyper::body::Bytes::from($body.to_string())))
			.expect("failed to build response")
	};
}

/// A response with no body, used for 204 replies.
pub fn empty_response(status: StatusCode) -> hyper::Response<Body> {
	hyper::Response::builder()
		.status(status)
		.body(Body::default())
		.expect("failed to build response")
}

/// Logs a [`RouteError`] in the span it was raised in and hands its response
/// to the client. Meant for [`router::builder::RouterBuilder::error_handler`].
pub async fn error_handler<E: std::error::Error + 'static>(req: hyper::Request<()>, err: RouteError<E>) -> hyper::Response<Body> {
	let location = err.location();

	err.span().in_scope(|| match err.log_level() {
		LogLevel::Error => {
			tracing::error!(path = %req.uri(), method = %req.method(), location = %location, error = ?err, "http error")
		}
		LogLevel::Debug => {
			tracing::debug!(path = %req.uri(), method = %req.method(), location = %location, error = ?err, "http error")
		}
		LogLevel::Off => {}
	});

	err.response()
}
