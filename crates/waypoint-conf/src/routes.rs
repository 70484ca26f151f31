//! Declarative route entries and the feature registry they bind against.

use crate::error::SettingsError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use waypoint_router::{Loader, Route, RouteTable};

/// A route as written in settings: `{ path, feature }` or `{ path, redirect_to }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
	pub path: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub feature: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect_to: Option<String>,
}

/// Resolved target of a [`RouteEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTarget<'a> {
	Feature(&'a str),
	Redirect(&'a str),
}

impl RouteEntry {
	pub fn feature(path: impl Into<String>, feature: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			feature: Some(feature.into()),
			redirect_to: None,
		}
	}

	pub fn redirect(path: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			feature: None,
			redirect_to: Some(target.into()),
		}
	}

	/// Returns the target of this entry.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::AmbiguousRoute`] unless exactly one of
	/// `feature` and `redirect_to` is set.
	pub fn target(&self) -> Result<EntryTarget<'_>, SettingsError> {
		match (&self.feature, &self.redirect_to) {
			(Some(feature), None) => Ok(EntryTarget::Feature(feature)),
			(None, Some(target)) => Ok(EntryTarget::Redirect(target)),
			_ => Err(SettingsError::AmbiguousRoute {
				path: self.path.clone(),
			}),
		}
	}
}

/// The shell's route table: three resource domains with list and detail
/// views, and the empty path redirecting to the product list.
pub fn default_routes() -> Vec<RouteEntry> {
	vec![
		RouteEntry::feature("products", "product-list"),
		RouteEntry::feature("products/:id", "product-details"),
		RouteEntry::feature("users", "user-list"),
		RouteEntry::feature("users/:id", "user-details"),
		RouteEntry::feature("orders", "order-list"),
		RouteEntry::feature("orders/:id", "order-details"),
		RouteEntry::redirect("", "/products"),
	]
}

/// Maps feature ids to loaders.
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
	loaders: IndexMap<String, Loader>,
}

impl FeatureRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `loader` under `feature_id`, replacing any previous one.
	pub fn register(mut self, feature_id: impl Into<String>, loader: Loader) -> Self {
		self.insert(feature_id, loader);
		self
	}

	pub fn insert(&mut self, feature_id: impl Into<String>, loader: Loader) {
		let feature_id = feature_id.into();
		if self.loaders.insert(feature_id.clone(), loader).is_some() {
			tracing::debug!(feature = %feature_id, "replaced registered loader");
		}
	}

	pub fn get(&self, feature_id: &str) -> Option<&Loader> {
		self.loaders.get(feature_id)
	}

	pub fn contains(&self, feature_id: &str) -> bool {
		self.loaders.contains_key(feature_id)
	}

	/// Registered feature ids in registration order.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.loaders.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.loaders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.loaders.is_empty()
	}
}

/// Builds a route table from `entries`, in order.
///
/// # Errors
///
/// Returns [`SettingsError::AmbiguousRoute`] for an entry without exactly one
/// target, [`SettingsError::UnknownFeature`] for a feature missing from
/// `registry`, and [`SettingsError::Pattern`] for an invalid path.
pub fn build_route_table(
	entries: &[RouteEntry],
	registry: &FeatureRegistry,
) -> Result<RouteTable, SettingsError> {
	let mut routes = Vec::with_capacity(entries.len());
	for entry in entries {
		let route = match entry.target()? {
			EntryTarget::Feature(feature) => {
				let loader = registry
					.get(feature)
					.ok_or_else(|| SettingsError::UnknownFeature {
						path: entry.path.clone(),
						feature: feature.to_string(),
					})?;
				Route::feature(&entry.path, feature, loader.clone())?
			}
			EntryTarget::Redirect(target) => Route::redirect(&entry.path, target)?,
		};
		routes.push(route);
	}

	tracing::debug!(routes = routes.len(), "built route table");
	Ok(routes.into_iter().collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use std::sync::Arc;
	use waypoint_router::{Feature, RouteParams, TextView, View};

	struct Blank;

	impl Feature for Blank {
		fn instantiate(&self, _params: &RouteParams) -> Box<dyn View> {
			Box::new(TextView::new(""))
		}
	}

	#[fixture]
	fn registry() -> FeatureRegistry {
		[
			"product-list",
			"product-details",
			"user-list",
			"user-details",
			"order-list",
			"order-details",
		]
		.into_iter()
		.fold(FeatureRegistry::new(), |registry, id| {
			registry.register(id, Loader::ready(Arc::new(Blank)))
		})
	}

	#[rstest]
	fn test_default_routes_build(registry: FeatureRegistry) {
		let table = build_route_table(&default_routes(), &registry).unwrap();
		assert_eq!(table.len(), 7);
		assert_eq!(table.feature_ids(), registry.ids().collect::<Vec<_>>());
		assert_eq!(table.all_routes()[6].redirect_target(), Some("/products"));
	}

	#[rstest]
	#[case(RouteEntry { path: "x".into(), feature: None, redirect_to: None })]
	#[case(RouteEntry {
		path: "x".into(),
		feature: Some("user-list".into()),
		redirect_to: Some("/users".into()),
	})]
	fn test_entry_needs_exactly_one_target(registry: FeatureRegistry, #[case] entry: RouteEntry) {
		assert!(matches!(
			build_route_table(&[entry], &registry),
			Err(SettingsError::AmbiguousRoute { .. })
		));
	}

	#[rstest]
	fn test_unregistered_feature(registry: FeatureRegistry) {
		let entries = [RouteEntry::feature("reports", "report-list")];
		match build_route_table(&entries, &registry) {
			Err(SettingsError::UnknownFeature { path, feature }) => {
				assert_eq!(path, "reports");
				assert_eq!(feature, "report-list");
			}
			other => panic!("expected UnknownFeature, got {other:?}"),
		}
	}

	#[rstest]
	fn test_invalid_pattern(registry: FeatureRegistry) {
		let entries = [RouteEntry::feature("users/:", "user-details")];
		assert!(matches!(
			build_route_table(&entries, &registry),
			Err(SettingsError::Pattern(_))
		));
	}
}
