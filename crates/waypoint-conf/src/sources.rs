//! Configuration sources for layered settings
//!
//! Sources are merged in priority order (environment variables > TOML file >
//! defaults); a key set by a higher-priority source replaces the lower one.

use crate::error::SettingsError;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Flat key/value map produced by a source.
pub type ConfigMap = IndexMap<String, Value>;

/// Environment variable prefix read by [`EnvSource`].
pub const ENV_PREFIX: &str = "WAYPOINT_";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<ConfigMap, SettingsError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Explicit values at the lowest priority.
///
/// Keys not set by any source fall back to the built-in defaults of
/// [`Settings`](crate::Settings).
#[derive(Debug, Clone, Default)]
pub struct DefaultSource {
	values: ConfigMap,
}

impl DefaultSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a default value.
	///
	/// # Examples
	///
	/// ```
	/// use waypoint_conf::sources::DefaultSource;
	///
	/// let source = DefaultSource::new()
	///     .with_value("initial_path", "/orders")
	///     .with_value("max_redirects", 4);
	/// ```
	pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.values.insert(key.into(), value.into());
		self
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<ConfigMap, SettingsError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// TOML file configuration source
///
/// A missing file loads as empty unless the source is marked
/// [`required`](Self::required).
#[derive(Debug, Clone)]
pub struct TomlFileSource {
	path: PathBuf,
	required: bool,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: false,
		}
	}

	/// Fails the load when the file does not exist.
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<ConfigMap, SettingsError> {
		if !self.required && !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "optional settings file not found");
			return Ok(ConfigMap::new());
		}

		let content = fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
			path: self.path.clone(),
			source,
		})?;
		let table: toml::Table = toml::from_str(&content).map_err(|source| SettingsError::Toml {
			path: self.path.clone(),
			source,
		})?;

		match serde_json::to_value(table)? {
			Value::Object(map) => Ok(map.into_iter().collect()),
			_ => Ok(ConfigMap::new()),
		}
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variable configuration source
///
/// Reads `WAYPOINT_INITIAL_PATH`, `WAYPOINT_MAX_REDIRECTS` and
/// `WAYPOINT_LOG_LEVEL`. Other variables under the prefix are ignored.
#[derive(Debug, Clone)]
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	pub fn new() -> Self {
		Self {
			prefix: ENV_PREFIX.to_string(),
		}
	}

	/// Reads variables under a different prefix.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	fn parse(&self, var: &str, key: &str, value: String) -> Result<Option<Value>, SettingsError> {
		match key {
			"initial_path" | "log_level" => Ok(Some(Value::String(value))),
			"max_redirects" => {
				let hops = value
					.trim()
					.parse::<u64>()
					.map_err(|err| SettingsError::InvalidEnv {
						key: var.to_string(),
						value: value.clone(),
						message: err.to_string(),
					})?;
				Ok(Some(Value::Number(hops.into())))
			}
			_ => {
				tracing::debug!(var, "ignoring unrecognised variable");
				Ok(None)
			}
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<ConfigMap, SettingsError> {
		let mut config = ConfigMap::new();

		for (var, value) in std::env::vars() {
			let Some(key) = var.strip_prefix(&self.prefix) else {
				continue;
			};
			let key = key.to_lowercase();
			if let Some(parsed) = self.parse(&var, &key, value)? {
				config.insert(key, parsed);
			}
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}
