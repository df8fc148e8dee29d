use std::path::{Path, PathBuf};

use clap::Parser;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::Config;
use crate::logging;

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// The log level filter, in `EnvFilter` syntax
	pub level: String,

	/// How log lines are formatted
	pub mode: logging::Mode,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_owned(),
			mode: logging::Mode::Default,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct TlsConfig {
	/// PEM encoded certificate chain
	pub cert: String,

	/// PEM encoded PKCS#8 private key
	pub key: String,

	/// Optional CA bundle used to verify the peer
	pub ca_cert: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// The postgres connection string
	pub uri: String,

	/// Client TLS, plaintext when absent
	pub tls: Option<TlsConfig>,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			uri: "postgres://localhost:5432/catalog".to_owned(),
			tls: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, bound = "T: ConfigExtention")]
pub struct AppConfig<T: ConfigExtention> {
	/// The name of the application
	pub name: String,

	/// The path to the config file
	pub config_file: Option<String>,

	/// The logging configuration
	pub logging: LoggingConfig,

	#[serde(flatten)]
	pub extra: T,
}

pub trait ConfigExtention: Serialize + DeserializeOwned + Default {
	const APP_NAME: &'static str;

	/// Environment variables starting with `{ENV_PREFIX}_` override the config.
	const ENV_PREFIX: &'static str = "CATALOG";

	fn config_default() -> AppConfig<Self> {
		AppConfig {
			name: Self::APP_NAME.to_owned(),
			config_file: Some("config".to_owned()),
			logging: Default::default(),
			extra: Self::default(),
		}
	}

	fn pre_hook(_config: &mut AppConfig<Self>) -> anyhow::Result<()> {
		Ok(())
	}
}

impl<T: ConfigExtention> Default for AppConfig<T> {
	fn default() -> Self {
		T::config_default()
	}
}

impl<T: ConfigExtention> AppConfig<T> {
	/// Builds the config from explicit command line arguments and
	/// environment. `config_file` ends up as the path that was loaded.
	pub fn parse_from(cli: Cli, env: Vec<(String, String)>) -> Result<Self, ConfigError> {
		let (mut config, config_file) = parse::<Self>(&Sources {
			cli,
			env,
			env_prefix: T::ENV_PREFIX,
			default_config_file: Self::default().config_file,
		})?;

		config.config_file = config_file;

		Ok(config)
	}
}

impl<T: ConfigExtention> Config for AppConfig<T> {
	fn logging(&self) -> &LoggingConfig {
		&self.logging
	}

	fn parse() -> anyhow::Result<Self> {
		Ok(Self::parse_from(Cli::try_parse()?, std::env::vars().collect())?)
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn pre_hook(&mut self) -> anyhow::Result<()> {
		T::pre_hook(self)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	Io { path: String, source: std::io::Error },
	#[error("unsupported config file format: {0}")]
	UnsupportedFormat(String),
	#[error("invalid json in {path}: {source}")]
	Json { path: String, source: serde_json::Error },
	#[error("invalid toml in {path}: {source}")]
	Toml { path: String, source: toml::de::Error },
	#[error("invalid yaml in {path}: {source}")]
	Yaml { path: String, source: serde_yaml::Error },
	#[error("failed to serialize default config: {0}")]
	Defaults(serde_json::Error),
	#[error("invalid config value at {}: {}", .0.path(), .0.inner())]
	Deserialize(#[from] serde_path_to_error::Error<serde_json::Error>),
	#[error("invalid command line: {0}")]
	Cli(#[from] clap::Error),
}

impl ConfigError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
	}
}

#[derive(Debug, Default, Clone, Parser)]
#[command(about, version)]
pub struct Cli {
	/// Path to the config file, overriding the default location
	#[arg(long, short = 'c')]
	pub config_file: Option<String>,
}

/// Everything a config is built from, lowest priority last.
#[derive(Debug, Clone)]
pub struct Sources {
	pub cli: Cli,
	pub env: Vec<(String, String)>,
	pub env_prefix: &'static str,
	pub default_config_file: Option<String>,
}

/// Layers defaults, the config file, the environment and the command line,
/// in increasing priority, and returns the config together with the path of
/// the file that was loaded, if any.
pub fn parse<C: Serialize + DeserializeOwned + Default>(sources: &Sources) -> Result<(C, Option<String>), ConfigError> {
	let mut tree = serde_json::to_value(C::default()).map_err(ConfigError::Defaults)?;

	let env_prefix = format!("{}_", sources.env_prefix);
	let env = sources
		.env
		.iter()
		.filter_map(|(key, value)| {
			let key = key.strip_prefix(&env_prefix)?;
			let path = key.split("__").map(|s| s.to_lowercase()).collect::<Vec<_>>();
			Some((path, value.as_str()))
		})
		.collect::<Vec<_>>();

	let env_config_file = env
		.iter()
		.find(|(path, _)| path.len() == 1 && path[0] == "config_file")
		.map(|(_, value)| value.to_string())
		.filter(|value| !value.is_empty());

	let explicit = sources.cli.config_file.clone().or(env_config_file);
	let explicit_provided = explicit.is_some();

	let mut config_path = None;

	if let Some(path) = explicit.or_else(|| sources.default_config_file.clone()) {
		match load_file(Path::new(&path)) {
			Ok((location, value)) => {
				merge(&mut tree, value);
				config_path = Some(location);
			}
			Err(err) => {
				if explicit_provided || !err.is_not_found() {
					return Err(err);
				}

				tracing::debug!("failed to load config file: {}", err);
			}
		}
	}

	for (path, value) in env {
		set_path(&mut tree, &path, value);
	}

	if let Some(config_file) = &sources.cli.config_file {
		set_path(&mut tree, &["config_file".to_owned()], config_file);
	}

	let config = serde_path_to_error::deserialize(tree)?;

	Ok((
		config,
		config_path.map(|p: PathBuf| std::fs::canonicalize(&p).unwrap_or(p).display().to_string()),
	))
}

/// Reads a config file, picking the format from its extension. A path
/// without one is tried as `.json`, `.toml`, `.yaml` and `.yml` in turn.
pub fn load_file(path: &Path) -> Result<(PathBuf, Value), ConfigError> {
	let format = match path.extension().and_then(|s| s.to_str()) {
		Some(ext @ ("json" | "toml" | "yaml" | "yml")) => ext,
		None => {
			let mut last_err = None;
			for ext in ["json", "toml", "yaml", "yml"] {
				match load_file(&path.with_extension(ext)) {
					Ok(found) => return Ok(found),
					Err(err) if err.is_not_found() => last_err = Some(err),
					Err(err) => return Err(err),
				}
			}

			return Err(last_err.unwrap_or_else(|| ConfigError::Io {
				path: path.display().to_string(),
				source: std::io::ErrorKind::NotFound.into(),
			}));
		}
		Some(ext) => return Err(ConfigError::UnsupportedFormat(ext.to_owned())),
	};

	let display = path.display().to_string();
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
		path: display.clone(),
		source,
	})?;

	let value = match format {
		"json" => serde_json::from_str(&content).map_err(|source| ConfigError::Json { path: display, source })?,
		"toml" => toml::from_str(&content).map_err(|source| ConfigError::Toml { path: display, source })?,
		_ => serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml { path: display, source })?,
	};

	Ok((path.to_path_buf(), value))
}

/// Deep merges `overlay` into `base`. Objects merge key by key, anything
/// else replaces.
fn merge(base: &mut Value, overlay: Value) {
	match (base, overlay) {
		(Value::Object(base), Value::Object(overlay)) => {
			for (key, value) in overlay {
				match base.get_mut(&key) {
					Some(existing) => merge(existing, value),
					None => {
						base.insert(key, value);
					}
				}
			}
		}
		(base, overlay) => *base = overlay,
	}
}

/// Writes a raw string value at `path`, converting it to the type of the
/// value already there so `CATALOG_DATABASE__ENSURE_SCHEMA=true` becomes a
/// boolean. An empty string clears an optional value.
fn set_path(tree: &mut Value, path: &[String], raw: &str) {
	let Some((last, parents)) = path.split_last() else {
		return;
	};

	let mut node = tree;
	for key in parents {
		if !node.is_object() {
			*node = Value::Object(Map::new());
		}

		let Value::Object(map) = node else {
			return;
		};

		node = map.entry(key.clone()).or_insert_with(|| Value::Object(Map::new()));
	}

	if !node.is_object() {
		*node = Value::Object(Map::new());
	}

	let Value::Object(map) = node else {
		return;
	};

	let value = match map.get(last) {
		Some(Value::Bool(_)) => raw.parse().map(Value::Bool).unwrap_or_else(|_| Value::String(raw.to_owned())),
		Some(Value::Number(_)) => serde_json::from_str::<serde_json::Number>(raw)
			.map(Value::Number)
			.unwrap_or_else(|_| Value::String(raw.to_owned())),
		Some(Value::Null) if raw.is_empty() => Value::Null,
		_ => Value::String(raw.to_owned()),
	};

	map.insert(last.clone(), value);
}
