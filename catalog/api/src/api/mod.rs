use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::{service_fn, Service};
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::json;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::select;
use tokio_rustls::TlsAcceptor;
use utils::http::router::{Router, RouterError};
use utils::http::{Body, RouteError};
use utils::make_response;
use utils::prelude::FutureTimeout;

use self::error::ApiError;
use crate::config::ApiConfig;
use crate::global::ApiGlobal;

mod channel;
mod content;
pub mod error;
mod middleware;
mod request;

const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn routes<G: ApiGlobal>(global: &Arc<G>) -> Router<Incoming, Body, RouteError<ApiError>> {
	let weak = Arc::downgrade(global);
	Router::builder()
		.data(weak)
		.middleware(middleware::trace_request)
		.get("/health", |_| async move { Ok(make_response!(StatusCode::OK, json!({ "status": "ok" }))) })
		.scope("/", channel::routes(global))
		.scope("/", content::routes(global))
		.error_handler(utils::http::error_handler::<ApiError>)
		.not_found(|_| async move { Err(RouteError::from((StatusCode::NOT_FOUND, "Not found"))) })
		.build()
}

/// Binds the listener with address and port reuse so a restarted process
/// can take over the port immediately.
fn bind(config: &ApiConfig) -> io::Result<TcpListener> {
	let socket = match config.bind_address {
		SocketAddr::V4(_) => TcpSocket::new_v4()?,
		SocketAddr::V6(_) => TcpSocket::new_v6()?,
	};

	socket.set_reuseaddr(true)?;
	socket.set_reuseport(true)?;
	socket.bind(config.bind_address)?;
	socket.listen(1024)
}

async fn serve<S>(stream: TcpStream, tls: Option<TlsAcceptor>, service: S)
where
	S: Service<Request<Incoming>, Response = Response<Body>, Error = Infallible>,
	S::Future: Send + 'static,
{
	let conn = http1::Builder::new();

	let result = match tls {
		Some(acceptor) => match acceptor.accept(stream).timeout(TLS_HANDSHAKE_TIMEOUT).await {
			Ok(Ok(stream)) => conn.serve_connection(TokioIo::new(stream), service).await,
			Ok(Err(err)) => {
				tracing::debug!(error = %err, "tls handshake failed");
				return;
			}
			Err(_) => {
				tracing::debug!("tls handshake timed out");
				return;
			}
		},
		None => conn.serve_connection(TokioIo::new(stream), service).await,
	};

	if let Err(err) = result {
		tracing::debug!(error = %err, "connection closed with error");
	}
}

pub async fn run<G: ApiGlobal>(global: Arc<G>) -> anyhow::Result<()> {
	let config = global.config::<ApiConfig>();

	let listener = bind(config).with_context(|| format!("failed to bind {}", config.bind_address))?;
	tracing::info!(address = %config.bind_address, tls = config.tls.is_some(), "api listening");

	let tls = match &config.tls {
		Some(tls) => Some(TlsAcceptor::from(Arc::new(
			binary_helper::tls::server_config(tls).await.context("api tls")?,
		))),
		None => None,
	};

	// The router keeps only a weak handle on the global state, so idle
	// keep-alive connections never delay shutdown.
	let router = Arc::new(routes(&global));
	let service = service_fn(move |req| {
		let router = router.clone();
		async move {
			let res = router.handle(req).await.unwrap_or_else(|err| match err {
				RouterError::NotFound => make_response!(StatusCode::NOT_FOUND, json!({ "message": "Not found" })),
				RouterError::Unhandled(err) => err.response(),
			});

			Ok::<_, Infallible>(res)
		}
	});

	let ctx = global.ctx().clone();
	drop(global);

	loop {
		let (stream, peer) = select! {
			_ = ctx.done() => return Ok(()),
			accepted = listener.accept() => accepted.context("failed to accept connection")?,
		};

		tracing::trace!(peer = %peer, "accepted connection");
		tokio::spawn(serve(stream, tls.clone(), service.clone()));
	}
}
