use anyhow::Context as _;
use binary_helper::bootstrap;
use catalog_api::config::AppConfig;
use catalog_api::global::GlobalState;

#[tokio::main]
pub async fn main() {
	if let Err(err) = bootstrap::<AppConfig, GlobalState, _>(|global| async move {
		catalog_api::api::run(global).await.context("api server stopped unexpectedly")
	})
	.await
	{
		tracing::error!("{:#}", err);
		std::process::exit(1);
	}
}
