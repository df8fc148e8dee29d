use std::sync::Arc;

use anyhow::Context as _;
use binary_helper::global::setup_database;
use utils::context::Context;

use crate::config::{ApiConfig, AppConfig, DatabaseBackend};
use crate::database::{ChannelRepository, ContentRepository, MemoryStore, PostgresStore};
use crate::service::{ChannelService, ContentService};

pub trait ApiState {
	fn channels(&self) -> &ChannelService;
	fn contents(&self) -> &ContentService;
}

pub trait ApiGlobal:
	binary_helper::global::GlobalCtx
	+ binary_helper::global::GlobalConfigProvider<ApiConfig>
	+ binary_helper::global::GlobalConfig
	+ ApiState
	+ Send
	+ Sync
	+ 'static
{
}

impl<T> ApiGlobal for T where
	T: binary_helper::global::GlobalCtx
		+ binary_helper::global::GlobalConfigProvider<ApiConfig>
		+ binary_helper::global::GlobalConfig
		+ ApiState
		+ Send
		+ Sync
		+ 'static
{
}

fn split<S: ChannelRepository + ContentRepository + 'static>(
	store: Arc<S>,
) -> (Arc<dyn ChannelRepository>, Arc<dyn ContentRepository>) {
	(store.clone(), store)
}

pub struct GlobalState {
	ctx: Context,
	config: AppConfig,
	channels: ChannelService,
	contents: ContentService,
}

impl GlobalState {
	pub fn with_repositories(
		ctx: Context,
		config: AppConfig,
		channels: Arc<dyn ChannelRepository>,
		contents: Arc<dyn ContentRepository>,
	) -> Self {
		Self {
			ctx,
			config,
			channels: ChannelService::new(channels.clone()),
			contents: ContentService::new(contents, channels),
		}
	}
}

impl binary_helper::global::GlobalCtx for GlobalState {
	#[inline(always)]
	fn ctx(&self) -> &Context {
		&self.ctx
	}
}

impl binary_helper::global::GlobalConfigProvider<ApiConfig> for GlobalState {
	#[inline(always)]
	fn provide_config(&self) -> &ApiConfig {
		&self.config.extra.api
	}
}

impl binary_helper::global::GlobalConfig for GlobalState {}

impl ApiState for GlobalState {
	#[inline(always)]
	fn channels(&self) -> &ChannelService {
		&self.channels
	}

	#[inline(always)]
	fn contents(&self) -> &ContentService {
		&self.contents
	}
}

impl binary_helper::Global<AppConfig> for GlobalState {
	async fn new(ctx: Context, config: AppConfig) -> anyhow::Result<Self> {
		let database = &config.extra.database;

		let (channels, contents) = match database.backend {
			DatabaseBackend::Memory => {
				tracing::warn!("using the in-memory store, data is lost on restart");

				split(Arc::new(MemoryStore::new()))
			}
			DatabaseBackend::Postgres => {
				let store = Arc::new(PostgresStore::new(setup_database(&database.connection).await?));

				if database.ensure_schema {
					store.ensure_schema().await.context("failed to create database schema")?;
					tracing::info!("database schema ready");
				}

				split(store)
			}
		};

		Ok(Self::with_repositories(ctx, config, channels, contents))
	}
}
