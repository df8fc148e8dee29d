use std::net::SocketAddr;

use binary_helper::config::TlsConfig;

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ApiConfig {
	/// Bind address for the API
	pub bind_address: SocketAddr,

	/// If we should use TLS for the API server
	pub tls: Option<TlsConfig>,

	/// Largest request body accepted, in bytes
	pub max_body_size: usize,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			bind_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
			tls: None,
			max_body_size: 64 * 1024,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
	/// Process local storage, lost on restart
	#[default]
	Memory,
	Postgres,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// Where channels and content are stored
	pub backend: DatabaseBackend,

	/// Create the tables on startup if they do not exist (postgres only)
	pub ensure_schema: bool,

	#[serde(flatten)]
	pub connection: binary_helper::config::DatabaseConfig,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			backend: DatabaseBackend::default(),
			ensure_schema: true,
			connection: Default::default(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CatalogConfig {
	/// The API configuration
	pub api: ApiConfig,

	/// The storage configuration
	pub database: DatabaseConfig,
}

impl binary_helper::config::ConfigExtention for CatalogConfig {
	const APP_NAME: &'static str = "catalog-api";
}

pub type AppConfig = binary_helper::config::AppConfig<CatalogConfig>;
