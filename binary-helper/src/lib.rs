use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use tokio::signal::unix::SignalKind;
use tokio::{select, time};
use utils::context::Context;
use utils::signal;

pub mod config;
pub mod global;
pub mod logging;
pub mod tls;

#[cfg(test)]
mod tests;

/// What [`bootstrap`] needs from a binary's configuration.
pub trait Config: Sized {
	/// Builds the config from every source, see [`config::parse`].
	fn parse() -> anyhow::Result<Self>;

	fn name(&self) -> &str;

	fn logging(&self) -> &config::LoggingConfig;

	/// Runs once after parsing, before logging is set up.
	fn pre_hook(&mut self) -> anyhow::Result<()> {
		Ok(())
	}
}

/// The state shared by everything a binary runs. Dropping the last handle
/// to it releases its [`Context`].
#[allow(async_fn_in_trait)]
pub trait Global<C: Config>: Sized {
	async fn new(ctx: Context, config: C) -> anyhow::Result<Self>;
}

const DRAIN_TIMEOUT: Duration = Duration::from_secs(60);

fn load_config<C: Config>() -> anyhow::Result<C> {
	let mut config = C::parse()?;
	config.pre_hook()?;
	Ok(config)
}

/// Runs a binary: parses its config, sets up logging and the global state,
/// then drives `process` until it exits or a shutdown signal arrives.
///
/// Once shutdown starts the context is cancelled and every task holding it
/// gets [`DRAIN_TIMEOUT`] to finish. A second signal skips the wait.
pub async fn bootstrap<C: Config, G: Global<C>, F: Future<Output = anyhow::Result<()>> + Send + 'static>(
	process: impl FnOnce(Arc<G>) -> F,
) -> anyhow::Result<()> {
	let config = match load_config::<C>() {
		Ok(config) => config,
		Err(err) => {
			// logging is not configured yet, so fall back to a verbose default
			logging::init("trace", logging::Mode::Default).ok();
			return Err(err.context("failed to parse config"));
		}
	};

	logging::init(&config.logging().level, config.logging().mode).context("failed to init logging")?;
	tracing::info!(name = config.name(), "starting");

	let mut signals = signal::SignalHandler::new()
		.with_signal(SignalKind::interrupt())
		.and_then(|signals| signals.with_signal(SignalKind::terminate()))
		.context("failed to register signal handlers")?;

	let (ctx, handler) = Context::new();
	let global = Arc::new(G::new(ctx, config).await.context("failed to create global state")?);
	let mut process = tokio::spawn(process(global));

	select! {
		_ = signals.recv() => tracing::info!("received shutdown signal"),
		result = &mut process => match result {
			Ok(Ok(())) => tracing::warn!("process exited"),
			Ok(Err(err)) => tracing::error!("process failed: {err:#}"),
			Err(err) => tracing::error!(error = %err, "process panicked"),
		},
	}

	tracing::info!(timeout = ?DRAIN_TIMEOUT, "draining");

	select! {
		_ = handler.cancel() => tracing::info!("shutdown complete"),
		_ = time::sleep(DRAIN_TIMEOUT) => tracing::warn!("drain timed out, forcing shutdown"),
		_ = signals.recv() => tracing::warn!("second signal, forcing shutdown"),
	}

	Ok(())
}
