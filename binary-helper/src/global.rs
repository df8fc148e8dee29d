use std::sync::{Arc, Weak};

use anyhow::Context as _;
use hyper::StatusCode;
use utils::database::deadpool_postgres::{Manager, ManagerConfig, PoolConfig, RecyclingMethod, Runtime};
use utils::database::tokio_postgres::config::SslMode;
use utils::database::tokio_postgres::NoTls;
use utils::database::Pool;
use utils::http::RouteError;

use crate::config::DatabaseConfig;

pub trait GlobalCtx {
	fn ctx(&self) -> &utils::context::Context;
}

pub trait GlobalConfig {
	#[inline(always)]
	fn config<C>(&self) -> &C
	where
		Self: GlobalConfigProvider<C>,
	{
		GlobalConfigProvider::provide_config(self)
	}
}

pub trait GlobalConfigProvider<C> {
	fn provide_config(&self) -> &C;
}

/// Builds a postgres pool. Connections are opened lazily, so this only
/// fails on a bad uri or unreadable TLS material.
pub async fn setup_database(config: &DatabaseConfig) -> anyhow::Result<Arc<Pool>> {
	let mut pg_config = config
		.uri
		.parse::<utils::database::tokio_postgres::Config>()
		.context("invalid database uri")?;

	pg_config.ssl_mode(if config.tls.is_some() {
		SslMode::Require
	} else {
		SslMode::Disable
	});

	let manager_config = ManagerConfig {
		recycling_method: RecyclingMethod::Fast,
	};

	let manager = match &config.tls {
		Some(tls) => {
			let tls = crate::tls::client_config(tls).await.context("database tls")?;
			Manager::from_config(pg_config, tokio_postgres_rustls::MakeRustlsConnect::new(tls), manager_config)
		}
		None => Manager::from_config(pg_config, NoTls, manager_config),
	};

	Ok(Arc::new(
		Pool::builder(manager)
			.config(PoolConfig::default())
			.runtime(Runtime::Tokio1)
			.build()
			.context("failed to create database pool")?,
	))
}

/// Gives handlers access to the global state the router injected as a
/// `Weak<G>`.
pub trait RequestGlobalExt<E> {
	fn get_global<G: Sync + Send + 'static>(&self) -> std::result::Result<Arc<G>, RouteError<E>>;
}

impl<E, B> RequestGlobalExt<E> for hyper::Request<B> {
	#[track_caller]
	fn get_global<G: Sync + Send + 'static>(&self) -> std::result::Result<Arc<G>, RouteError<E>> {
		Ok(self
			.extensions()
			.get::<Weak<G>>()
			.ok_or((StatusCode::INTERNAL_SERVER_ERROR, "global state not set"))?
			.upgrade()
			.ok_or((StatusCode::INTERNAL_SERVER_ERROR, "failed to upgrade global state"))?)
	}
}
