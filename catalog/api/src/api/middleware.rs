use std::time::Instant;

use hyper::body::Incoming;
use hyper::{Request, Response};
use tracing::Instrument;
use utils::http::router::middleware::NextFn;
use utils::http::{Body, RouteError};

use super::error::{ApiError, Result};

/// Runs the rest of the chain inside an `http_request` span and logs how
/// the request ended.
pub async fn trace_request(
	req: Request<Incoming>,
	next: NextFn<Incoming, Body, RouteError<ApiError>>,
) -> Result<Response<Body>> {
	let span = tracing::debug_span!("http_request", method = %req.method(), path = %req.uri().path());
	let start = Instant::now();

	let result = next(req).instrument(span.clone()).await;

	let status = match &result {
		Ok(res) => res.status(),
		Err(err) => err.status(),
	};

	span.in_scope(|| tracing::debug!(status = status.as_u16(), latency = ?start.elapsed(), "request finished"));

	result
}
