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
use crate::database::Content;
use crate::dto::ContentInput;
use crate::global::ApiGlobal;
use crate::validation::decode_valid;

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<Incoming, Body, RouteError<ApiError>> {
	Router::builder()
		.get("/contents", list::<G>)
		.post("/content", create::<G>)
		.get("/content/:id", get::<G>)
		.put("/content/:id", update::<G>)
		.delete("/content/:id", delete::<G>)
}

async fn find<G: ApiGlobal>(global: &Arc<G>, id: i64) -> Result<Content> {
	global
		.contents()
		.get(id)
		.await?
		.map_err_route((StatusCode::NOT_FOUND, "Not found"))
}

async fn list<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	let contents = global.contents().list().await?;

	Ok(make_response!(StatusCode::OK, json!(contents)))
}

async fn get<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	let content = find(&global, parse_id(&req)?).await?;

	Ok(make_response!(StatusCode::OK, json!(content)))
}

async fn create<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	let body = read_body(&global, req).await?;
	let input = decode_valid::<ContentInput>(&body)?;

	let content = global.contents().create(input).await?;

	Ok(make_response!(StatusCode::CREATED, json!(content)))
}

async fn update<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	let existing = find(&global, parse_id(&req)?).await?;

	let body = read_body(&global, req).await?;
	let input = decode_valid::<ContentInput>(&body)?;

	let content = global.contents().update(input, existing).await?;

	Ok(make_response!(StatusCode::OK, json!(content)))
}

async fn delete<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = global::<G>(&req)?;

	let existing = find(&global, parse_id(&req)?).await?;

	global.contents().delete(existing).await?;

	Ok(empty_response(StatusCode::NO_CONTENT))
}
