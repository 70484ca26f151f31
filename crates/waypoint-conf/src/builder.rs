//! Merges configuration sources into [`Settings`].

use crate::error::SettingsError;
use crate::settings::Settings;
use crate::sources::ConfigSource;
use serde_json::{Map, Value};

/// Collects sources and merges them by priority.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a source. Sources of equal priority apply in insertion order.
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Loads every source and deserializes the merged result.
	///
	/// # Errors
	///
	/// Returns the first source failure, a deserialization failure of the
	/// merged values, or a validation failure of the resulting settings.
	pub fn build(self) -> Result<Settings, SettingsError> {
		let mut sources = self.sources;
		sources.sort_by_key(|source| source.priority());

		let mut merged = Map::new();
		for source in &sources {
			let values = source.load()?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"loaded settings source"
			);
			merged.extend(values);
		}

		let settings: Settings = serde_json::from_value(Value::Object(merged))?;
		settings.validate()?;
		Ok(settings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::DefaultSource;
	use rstest::rstest;

	struct Fixed(u8, &'static str);

	impl ConfigSource for Fixed {
		fn load(&self) -> Result<crate::sources::ConfigMap, SettingsError> {
			Ok([("initial_path".to_string(), Value::from(self.1))]
				.into_iter()
				.collect())
		}

		fn priority(&self) -> u8 {
			self.0
		}

		fn description(&self) -> String {
			format!("fixed {}", self.1)
		}
	}

	#[rstest]
	fn test_empty_builder_yields_defaults() {
		assert_eq!(SettingsBuilder::new().build().unwrap(), Settings::default());
	}

	#[rstest]
	fn test_higher_priority_wins_regardless_of_order() {
		let settings = SettingsBuilder::new()
			.add_source(Fixed(90, "/orders"))
			.add_source(Fixed(10, "/users"))
			.build()
			.unwrap();
		assert_eq!(settings.initial_path, "/orders");
	}

	#[rstest]
	fn test_wrong_type_is_rejected() {
		let result = SettingsBuilder::new()
			.add_source(DefaultSource::new().with_value("max_redirects", "ten"))
			.build();
		assert!(matches!(result, Err(SettingsError::Invalid(_))));
	}
}
