use std::sync::Arc;

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde_json::json;
use utils::http::ext::OptionExt;
use utils::http::router::builder::RouterBuilder;
use utils::http::router::Router;
use utils::http::{empty_response, Body, RouteError};
use utils::make_response;

use super::error::{ApiError, Result};
use super::request::{global, parse_id, read_body};
use crate::database::Channel;
use crate::dto::ChannelInput;
use crate::global::ApiGlobal;
use crate::validation::decode_valid;

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<Incoming, Body, RouteError<ApiError>> {
	Router::builder()
		.get("/channels", list::<G>)
		.post("/channel", create::<G>)
		.get("/channel/:id", get::<G>)
		.put("/channel/:id", update::<G>)
		.delete("/channel/:id", delete::<G>)
		.get("/channel/:id/contents", contents::<G>)
}

async fn find<G: ApiGlobal>(global: &Arc<G>, id: i64) -> Result<Channel> {
	global
		.channels()
		.get(id)
		.await?
		.map_err_route((StatusCode::NOT_FOUND, "Not found"))
}

async fn list<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	let channels = global.channels().list().await?;

	Ok(make_response!(StatusCode::OK, json!(channels)))
}

async fn get<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	let channel = find(&global, parse_id(&req)?).await?;

	Ok(make_response!(StatusCode::OK, json!(channel)))
}

async fn create<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	let body = read_body(&global, req).await?;
	let input = decode_valid::<ChannelInput>(&body)?;

	let channel = global.channels().create(input).await?;

	Ok(make_response!(StatusCode::CREATED, json!(channel)))
}

async fn update<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	// A missing channel is reported before the body is looked at.
	let existing = find(&global, parse_id(&req)?).await?;

	let body = read_body(&global, req).await?;
	let input = decode_valid::<ChannelInput>(&body)?;

	let channel = global.channels().update(input, existing).await?;

	Ok(make_response!(StatusCode::OK, json!(channel)))
}

async fn delete<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	let existing = find(&global, parse_id(&req)?).await?;

	global.channels().delete(existing).await?;

	Ok(empty_response(StatusCode::NO_CONTENT))
}

async fn contents<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	let channel = find(&global, parse_id(&req)?).await?;
	let contents = global.contents().list_by_channel(&channel).await?;

	Ok(make_response!(StatusCode::OK, json!(contents)))
}
