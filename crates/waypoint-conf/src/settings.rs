//! Application settings.

use crate::builder::SettingsBuilder;
use crate::error::SettingsError;
use crate::routes::{FeatureRegistry, RouteEntry, build_route_table, default_routes};
use crate::sources::{EnvSource, TomlFileSource};
use serde::{Deserialize, Serialize};
use std::path::Path;
use waypoint_router::{DEFAULT_MAX_REDIRECTS, NavigatorConfig, RouteTable};

/// Waypoint settings.
///
/// Every field is optional in a settings file; absent fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Path navigated to on start.
	pub initial_path: String,
	/// Redirect hop cap per navigation.
	pub max_redirects: usize,
	/// Default tracing filter directive.
	pub log_level: String,
	/// Route table entries, in match order.
	pub routes: Vec<RouteEntry>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			initial_path: "/".to_string(),
			max_redirects: DEFAULT_MAX_REDIRECTS,
			log_level: "info".to_string(),
			routes: default_routes(),
		}
	}
}

impl Settings {
	/// Loads settings from the defaults, an optional TOML file and the
	/// `WAYPOINT_*` environment variables, in increasing priority.
	///
	/// # Errors
	///
	/// Returns [`SettingsError`] if the file is missing or malformed, an
	/// environment value is invalid, or a route entry is ambiguous.
	pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
		let mut builder = SettingsBuilder::new();
		if let Some(path) = config_file {
			builder = builder.add_source(TomlFileSource::new(path).required());
		}
		builder.add_source(EnvSource::new()).build()
	}

	/// Checks that every route entry has exactly one target.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::AmbiguousRoute`] for the first offending entry.
	pub fn validate(&self) -> Result<(), SettingsError> {
		for entry in &self.routes {
			entry.target()?;
		}
		Ok(())
	}

	/// Returns the router-level subset of the settings.
	pub fn navigator_config(&self) -> NavigatorConfig {
		NavigatorConfig {
			max_redirects: self.max_redirects,
			initial_path: self.initial_path.clone(),
		}
	}

	/// Builds the route table from [`routes`](Self::routes).
	///
	/// # Errors
	///
	/// See [`build_route_table`].
	pub fn route_table(&self, registry: &FeatureRegistry) -> Result<RouteTable, SettingsError> {
		build_route_table(&self.routes, registry)
	}
}
