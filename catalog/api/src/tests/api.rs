use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use serial_test::serial;
use utils::context::Handler;
use utils::prelude::FutureTimeout;

use crate::api;
use crate::global::GlobalState;
use crate::tests::global::{local_config, mock_global_state};

struct Server {
	global: Arc<GlobalState>,
	handler: Handler,
	handle: tokio::task::JoinHandle<anyhow::Result<()>>,
	base: String,
	client: reqwest::Client,
}

impl Server {
	async fn start(max_body_size: usize) -> Self {
		let (config, port) = local_config(max_body_size);
		let (global, handler) = mock_global_state(config);

		let handle = tokio::spawn(api::run(global.clone()));

		// We need to wait for the server to start
		tokio::time::sleep(Duration::from_millis(300)).await;

		Self {
			global,
			handler,
			handle,
			base: format!("http://127.0.0.1:{port}"),
			client: reqwest::Client::new(),
		}
	}

	async fn send(&self, method: reqwest::Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
		let mut req = self.client.request(method, format!("{}{path}", self.base));
		if let Some(body) = body {
			req = req.json(&body);
		}

		let resp = req.send().await.expect("failed to send request");
		let status = resp.status();
		let text = resp.text().await.expect("failed to read body");

		let body = if text.is_empty() {
			Value::Null
		} else {
			serde_json::from_str(&text).expect("response is not json")
		};

		(status, body)
	}

	async fn get(&self, path: &str) -> (StatusCode, Value) {
		self.send(reqwest::Method::GET, path, None).await
	}

	async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
		self.send(reqwest::Method::POST, path, Some(body)).await
	}

	async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
		self.send(reqwest::Method::PUT, path, Some(body)).await
	}

	async fn delete(&self, path: &str) -> (StatusCode, Value) {
		self.send(reqwest::Method::DELETE, path, None).await
	}

	async fn raw(&self, method: reqwest::Method, path: &str, body: impl Into<reqwest::Body>) -> StatusCode {
		self.client
			.request(method, format!("{}{path}", self.base))
			.header("content-type", "application/json")
			.body(body)
			.send()
			.await
			.expect("failed to send request")
			.status()
	}

	async fn stop(self) {
		drop(self.global);

		self.handler
			.cancel()
			.timeout(Duration::from_secs(1))
			.await
			.expect("failed to cancel context");

		self.handle
			.timeout(Duration::from_secs(1))
			.await
			.expect("api did not stop in time")
			.expect("api task panicked")
			.expect("api failed");
	}
}

fn hbo() -> Value {
	json!({
		"name": "HBO",
		"description": "Home Box Office",
		"websiteUrl": "https://hbo.com",
		"isPaid": true,
	})
}

#[serial]
#[tokio::test]
async fn test_health_and_unknown_routes() {
	let server = Server::start(64 * 1024).await;

	assert_eq!(server.get("/health").await, (StatusCode::OK, json!({ "status": "ok" })));

	let not_found = (StatusCode::NOT_FOUND, json!({ "message": "Not found" }));
	assert_eq!(server.get("/nothing/here").await, not_found);
	assert_eq!(server.get("/channel/999999").await, not_found);
	assert_eq!(server.get("/channel/abc").await, not_found);
	assert_eq!(server.get("/channel/-1").await, not_found);
	assert_eq!(server.get("/content/1").await, not_found);
	assert_eq!(server.send(reqwest::Method::PATCH, "/channels", None).await, not_found);

	server.stop().await;
}

#[serial]
#[tokio::test]
async fn test_channel_lifecycle() {
	let server = Server::start(64 * 1024).await;

	let (status, created) = server.post("/channel", hbo()).await;
	assert_eq!(status, StatusCode::CREATED);
	assert_eq!(
		created,
		json!({
			"id": 1,
			"name": "HBO",
			"description": "Home Box Office",
			"websiteUrl": "https://hbo.com",
			"isPaid": true,
		})
	);

	assert_eq!(server.get("/channel/1").await, (StatusCode::OK, created.clone()));
	assert_eq!(server.get("/channels").await, (StatusCode::OK, json!([created])));

	// only the description changes
	let mut body = hbo();
	body["description"] = json!("Home Box Office, Inc.");
	let (status, updated) = server.put("/channel/1", body).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(updated["description"], "Home Box Office, Inc.");
	assert_eq!(updated["name"], "HBO");
	assert_eq!(updated["websiteUrl"], "https://hbo.com");
	assert_eq!(updated["id"], 1);

	assert_eq!(server.delete("/channel/1").await, (StatusCode::NO_CONTENT, Value::Null));
	assert_eq!(server.get("/channel/1").await.0, StatusCode::NOT_FOUND);
	assert_eq!(server.delete("/channel/1").await.0, StatusCode::NOT_FOUND);

	server.stop().await;
}

#[serial]
#[tokio::test]
async fn test_channel_validation() {
	let server = Server::start(64 * 1024).await;

	let mut body = hbo();
	body["websiteUrl"] = json!("");
	let (status, error) = server.post("/channel", body).await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(error["title"], "Validation Failed");
	assert_eq!(error["detail"], "websiteUrl: URL should not be empty if channel is paid");
	assert_eq!(
		error["violations"],
		json!([{
			"propertyPath": "websiteUrl",
			"message": "URL should not be empty if channel is paid",
			"parameters": { "{{ value }}": "\"\"" },
		}])
	);

	let mut body = hbo();
	body["websiteUrl"] = Value::Null;
	let (status, error) = server.post("/channel", body).await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(error["violations"][0]["message"], "URL should not be null if channel is paid");

	let (status, error) = server.post("/channel", json!({ "name": "HBO" })).await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(error["violations"][0]["propertyPath"], "");
	assert_eq!(error["violations"][0]["message"], "Missing fields: description");

	let (status, error) = server
		.post("/channel", json!({ "name": "", "description": "HBO", "isPaid": false }))
		.await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(error["detail"], "name: This value should not be blank.");
	assert_eq!(
		error["violations"],
		json!([{
			"propertyPath": "name",
			"message": "This value should not be blank.",
			"parameters": { "{{ value }}": "\"\"" },
		}])
	);

	assert_eq!(server.get("/channels").await, (StatusCode::OK, json!([])));

	// a missing channel wins over an invalid body
	assert_eq!(server.put("/channel/7", json!({})).await.0, StatusCode::NOT_FOUND);

	server.stop().await;
}

#[serial]
#[tokio::test]
async fn test_content_lifecycle() {
	let server = Server::start(64 * 1024).await;

	let (_, channel) = server.post("/channel", hbo()).await;
	let channel_id = channel["id"].as_i64().unwrap();

	let (status, created) = server
		.post(
			"/content",
			json!({
				"name": "Game of Thrones",
				"description": "Winter is coming",
				"minimumAge": 16,
				"channel": channel_id,
			}),
		)
		.await;
	assert_eq!(status, StatusCode::CREATED);
	assert_eq!(
		created,
		json!({
			"id": 1,
			"name": "Game of Thrones",
			"description": "Winter is coming",
			"minimumAge": 16,
			"channel": channel_id,
		})
	);

	assert_eq!(server.get("/content/1").await, (StatusCode::OK, created.clone()));
	assert_eq!(server.get("/contents").await, (StatusCode::OK, json!([created.clone()])));
	assert_eq!(
		server.get(&format!("/channel/{channel_id}/contents")).await,
		(StatusCode::OK, json!([created.clone()]))
	);
	assert_eq!(server.get("/channel/99/contents").await.0, StatusCode::NOT_FOUND);

	let mut body = created.clone();
	body["minimumAge"] = json!(18);
	let (status, updated) = server.put("/content/1", body).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(updated["minimumAge"], 18);

	// deleting the channel removes its content
	assert_eq!(server.delete(&format!("/channel/{channel_id}")).await.0, StatusCode::NO_CONTENT);
	assert_eq!(server.get("/content/1").await.0, StatusCode::NOT_FOUND);
	assert_eq!(server.delete("/content/1").await.0, StatusCode::NOT_FOUND);

	server.stop().await;
}

#[serial]
#[tokio::test]
async fn test_content_validation() {
	let server = Server::start(64 * 1024).await;

	let (status, error) = server
		.post(
			"/content",
			json!({
				"name": "Game of Thrones",
				"description": "Winter is coming",
				"minimumAge": 19,
				"channel": 1,
			}),
		)
		.await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(error["violations"].as_array().unwrap().len(), 1);
	assert_eq!(error["violations"][0]["message"], "This value should be less than or equal to 18.");

	let (status, error) = server
		.post(
			"/content",
			json!({
				"name": "Game of Thrones",
				"description": "Winter is coming",
				"minimumAge": 12,
				"channel": 404,
			}),
		)
		.await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(error["violations"][0]["propertyPath"], "channel");
	assert_eq!(error["violations"][0]["message"], "This channel does not exist.");

	assert_eq!(server.get("/contents").await, (StatusCode::OK, json!([])));

	server.stop().await;
}

#[serial]
#[tokio::test]
async fn test_malformed_bodies() {
	let server = Server::start(1024).await;

	assert_eq!(
		server.raw(reqwest::Method::POST, "/channel", "{\"name\": ").await,
		StatusCode::BAD_REQUEST
	);
	assert_eq!(server.raw(reqwest::Method::POST, "/channel", "[]").await, StatusCode::BAD_REQUEST);
	assert_eq!(
		server.raw(reqwest::Method::POST, "/channel", "x".repeat(4096)).await,
		StatusCode::PAYLOAD_TOO_LARGE
	);

	server.stop().await;
}
