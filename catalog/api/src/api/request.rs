use std::sync::Arc;

use binary_helper::global::RequestGlobalExt;
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::{Request, StatusCode};
use utils::http::ext::OptionExt;
use utils::http::router::ext::RequestExt;

use super::error::{ApiError, Result};
use crate::config::ApiConfig;
use crate::global::ApiGlobal;

pub fn global<G: ApiGlobal>(req: &Request<Incoming>) -> Result<Arc<G>> {
	req.get_global::<G>()
}

/// Collects the request body, refusing anything larger than
/// `api.max_body_size` with a 413.
pub async fn read_body<G: ApiGlobal>(global: &Arc<G>, req: Request<Incoming>) -> Result<Bytes> {
	let limit = global.config::<ApiConfig>().max_body_size;

	match Limited::new(req.into_body(), limit).collect().await {
		Ok(collected) => Ok(collected.to_bytes()),
		Err(err) if err.is::<LengthLimitError>() => Err((StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into()),
		Err(err) => Err((StatusCode::BAD_REQUEST, "Failed to read request body", ApiError::ReadBody(err)).into()),
	}
}

/// The `:id` segment of the route. Anything that is not plain ASCII digits
/// cannot name a record and is reported as not found.
pub fn parse_id(req: &Request<Incoming>) -> Result<i64> {
	req.param("id")
		.filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
		.and_then(|id| id.parse().ok())
		.map_err_route((StatusCode::NOT_FOUND, "Not found"))
}
