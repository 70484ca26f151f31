//! Builds in-app links from the configured route entries.

use std::collections::HashMap;
use std::sync::Arc;
use waypoint_conf::{EntryTarget, RouteEntry, SettingsError};
use waypoint_router::RoutePattern;

/// Reverse routing for views, keyed by feature id.
///
/// Built from route entries rather than the route table so that features can
/// hold it before the table exists.
#[derive(Debug, Clone, Default)]
pub struct Links {
	patterns: Arc<HashMap<String, RoutePattern>>,
}

impl Links {
	/// Collects the first pattern routed to each feature.
	///
	/// # Errors
	///
	/// Returns [`SettingsError`] for an ambiguous entry or an invalid pattern.
	pub fn from_entries(entries: &[RouteEntry]) -> Result<Self, SettingsError> {
		let mut patterns = HashMap::new();
		for entry in entries {
			if let EntryTarget::Feature(feature) = entry.target()?
				&& !patterns.contains_key(feature)
			{
				patterns.insert(feature.to_string(), RoutePattern::parse(&entry.path)?);
			}
		}
		Ok(Self {
			patterns: Arc::new(patterns),
		})
	}

	/// Path of a parameterless feature.
	pub fn to(&self, feature_id: &str) -> Option<String> {
		self.build(feature_id, HashMap::new())
	}

	/// Path of a feature taking an `:id` parameter.
	pub fn to_id(&self, feature_id: &str, id: u64) -> Option<String> {
		self.build(feature_id, HashMap::from([("id".to_string(), id.to_string())]))
	}

	fn build(&self, feature_id: &str, params: HashMap<String, String>) -> Option<String> {
		let pattern = self.patterns.get(feature_id)?;
		pattern.reverse(&params).ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use waypoint_conf::default_routes;

	#[rstest]
	fn test_default_links() {
		let links = Links::from_entries(&default_routes()).unwrap();
		assert_eq!(links.to("order-list").as_deref(), Some("/orders"));
		assert_eq!(links.to_id("user-details", 42).as_deref(), Some("/users/42"));
		assert_eq!(links.to("user-details"), None);
		assert_eq!(links.to("report-list"), None);
	}

	#[rstest]
	fn test_first_entry_wins() {
		let entries = [
			RouteEntry::feature("people/:id", "user-details"),
			RouteEntry::feature("users/:id", "user-details"),
		];
		let links = Links::from_entries(&entries).unwrap();
		assert_eq!(links.to_id("user-details", 7).as_deref(), Some("/people/7"));
	}
}
