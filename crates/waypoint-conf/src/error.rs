//! Settings errors.

use std::path::PathBuf;
use waypoint_router::PatternError;

/// Error raised while loading settings or building a route table from them.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML error in {}: {source}", path.display())]
	Toml {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("invalid value for {key}: '{value}' ({message})")]
	InvalidEnv {
		key: String,
		value: String,
		message: String,
	},

	#[error("invalid settings: {0}")]
	Invalid(#[from] serde_json::Error),

	#[error("route '{path}' must set exactly one of `feature` or `redirect_to`")]
	AmbiguousRoute { path: String },

	#[error("route '{path}' names unregistered feature '{feature}'")]
	UnknownFeature { path: String, feature: String },

	#[error(transparent)]
	Pattern(#[from] PatternError),
}
