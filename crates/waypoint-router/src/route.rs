//! Route definitions and the ordered route table.

use crate::error::{PatternError, ReverseError};
use crate::feature::Loader;
use crate::pattern::RoutePattern;
use std::collections::HashMap;

/// What a matched route resolves to.
#[derive(Debug, Clone)]
pub enum RouteTarget {
	/// A feature loaded through its loader.
	Feature {
		/// Feature identifier, the loader cache key.
		id: String,
		/// Deferred resolution of the feature implementation.
		loader: Loader,
	},
	/// A rewrite to another path. `:name` segments of the target are
	/// substituted with the parameters bound by the redirect's pattern.
	Redirect(String),
}

/// A single route definition.
#[derive(Debug, Clone)]
pub struct Route {
	pattern: RoutePattern,
	target: RouteTarget,
}

impl Route {
	/// Creates a feature route.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern is invalid.
	pub fn feature(
		pattern: &str,
		id: impl Into<String>,
		loader: Loader,
	) -> Result<Self, PatternError> {
		Ok(Self {
			pattern: RoutePattern::parse(pattern)?,
			target: RouteTarget::Feature {
				id: id.into(),
				loader,
			},
		})
	}

	/// Creates a redirect route.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern is invalid.
	pub fn redirect(pattern: &str, target: impl Into<String>) -> Result<Self, PatternError> {
		Ok(Self {
			pattern: RoutePattern::parse(pattern)?,
			target: RouteTarget::Redirect(target.into()),
		})
	}

	/// Returns the pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	/// Returns the target.
	pub fn target(&self) -> &RouteTarget {
		&self.target
	}

	/// Returns the feature id, if this is a feature route.
	pub fn feature_id(&self) -> Option<&str> {
		match &self.target {
			RouteTarget::Feature { id, .. } => Some(id),
			RouteTarget::Redirect(_) => None,
		}
	}

	/// Returns the redirect target, if this is a redirect route.
	pub fn redirect_target(&self) -> Option<&str> {
		match &self.target {
			RouteTarget::Redirect(target) => Some(target),
			RouteTarget::Feature { .. } => None,
		}
	}
}

/// The immutable, ordered list of routes.
///
/// Order is significant: the first matching route wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	routes: Vec<Route>,
}

impl RouteTable {
	/// Starts building a route table.
	pub fn builder() -> RouteTableBuilder {
		RouteTableBuilder::default()
	}

	/// Returns all routes in registration order.
	pub fn all_routes(&self) -> &[Route] {
		&self.routes
	}

	/// Returns the number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns whether the table has no routes.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Returns the distinct feature ids in registration order.
	pub fn feature_ids(&self) -> Vec<&str> {
		let mut ids: Vec<&str> = Vec::new();
		for id in self.routes.iter().filter_map(Route::feature_id) {
			if !ids.contains(&id) {
				ids.push(id);
			}
		}
		ids
	}

	/// Returns the loader of the first route bound to `feature_id`.
	pub fn loader(&self, feature_id: &str) -> Option<&Loader> {
		self.routes.iter().find_map(|route| match &route.target {
			RouteTarget::Feature { id, loader } if id == feature_id => Some(loader),
			_ => None,
		})
	}

	/// Builds a path for the first route bound to `feature_id`.
	///
	/// # Errors
	///
	/// Returns [`ReverseError::UnknownFeature`] if no route is bound to the
	/// id, or [`ReverseError::MissingParameter`] if `params` lacks a value.
	pub fn reverse(&self, feature_id: &str, params: &[(&str, &str)]) -> Result<String, ReverseError> {
		let route = self
			.routes
			.iter()
			.find(|route| route.feature_id() == Some(feature_id))
			.ok_or_else(|| ReverseError::UnknownFeature(feature_id.to_string()))?;

		let params: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		route.pattern.reverse(&params)
	}
}

impl FromIterator<Route> for RouteTable {
	fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
		Self {
			routes: iter.into_iter().collect(),
		}
	}
}

/// Builder for [`RouteTable`].
///
/// The first invalid pattern is remembered and reported by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
	routes: Vec<Route>,
	error: Option<PatternError>,
}

impl RouteTableBuilder {
	/// Registers a feature route.
	pub fn register(self, pattern: &str, feature_id: impl Into<String>, loader: Loader) -> Self {
		self.push(Route::feature(pattern, feature_id, loader))
	}

	/// Same as [`register`](Self::register).
	pub fn feature(self, pattern: &str, feature_id: impl Into<String>, loader: Loader) -> Self {
		self.register(pattern, feature_id, loader)
	}

	/// Registers a redirect route.
	pub fn redirect(self, pattern: &str, target: impl Into<String>) -> Self {
		self.push(Route::redirect(pattern, target))
	}

	/// Appends an already constructed route.
	pub fn route(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	fn push(mut self, route: Result<Route, PatternError>) -> Self {
		match route {
			Ok(route) => self.routes.push(route),
			Err(err) => {
				self.error.get_or_insert(err);
			}
		}
		self
	}

	/// Finishes the table.
	///
	/// # Errors
	///
	/// Returns the first [`PatternError`] encountered while registering.
	pub fn build(self) -> Result<RouteTable, PatternError> {
		if let Some(err) = self.error {
			tracing::warn!(error = %err, "rejecting route table");
			return Err(err);
		}
		tracing::debug!(routes = self.routes.len(), "route table built");
		Ok(RouteTable {
			routes: self.routes,
		})
	}
}
