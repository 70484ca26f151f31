//! Path-to-route resolution.
//!
//! Routes are tried in registration order and the first whose whole segment
//! sequence matches wins; overlapping patterns are disambiguated by order,
//! never by specificity. Redirect routes rewrite the path and restart the
//! search, up to a hop limit.

use crate::error::MatchError;
use crate::params::RouteParams;
use crate::pattern::{join_segments, split_path};
use crate::route::{Route, RouteTable, RouteTarget};
use std::sync::Arc;

/// Default cap on redirect hops per resolution.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// A matched feature route with its extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The matched feature route.
	pub route: Route,
	/// Feature id of the matched route.
	pub feature_id: String,
	/// Extracted path parameters.
	pub params: RouteParams,
	/// Canonical path the match was made on, after any redirects.
	pub path: String,
	/// Number of redirect hops followed to reach this route.
	pub redirects: usize,
}

/// Resolves paths against a [`RouteTable`].
#[derive(Debug, Clone)]
pub struct PathMatcher {
	table: Arc<RouteTable>,
	max_redirects: usize,
}

impl PathMatcher {
	/// Creates a matcher with the default redirect limit.
	pub fn new(table: Arc<RouteTable>) -> Self {
		Self {
			table,
			max_redirects: DEFAULT_MAX_REDIRECTS,
		}
	}

	/// Sets the redirect hop limit.
	pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
		self.max_redirects = max_redirects;
		self
	}

	/// Returns the route table.
	pub fn table(&self) -> &Arc<RouteTable> {
		&self.table
	}

	/// Resolves `path` to a feature route.
	///
	/// # Errors
	///
	/// Returns [`MatchError::NotFound`] if no route matches (including after a
	/// redirect), or [`MatchError::RedirectCycle`] if more than the configured
	/// number of redirects would be followed.
	pub fn match_path(&self, path: &str) -> Result<RouteMatch, MatchError> {
		let mut current = path.to_string();
		let mut redirects = 0;

		loop {
			let segments = split_path(&current);
			let Some((route, params)) = self.first_match(&segments) else {
				tracing::debug!(path, resolved = %current, "no route matched");
				return Err(MatchError::NotFound(path.to_string()));
			};

			match route.target() {
				RouteTarget::Feature { id, .. } => {
					tracing::debug!(
						path,
						pattern = %route.pattern(),
						feature = %id,
						"route matched"
					);
					return Ok(RouteMatch {
						route: route.clone(),
						feature_id: id.clone(),
						params,
						path: join_segments(&segments),
						redirects,
					});
				}
				RouteTarget::Redirect(target) => {
					if redirects >= self.max_redirects {
						tracing::warn!(path, hops = redirects, "redirect limit exceeded");
						return Err(MatchError::RedirectCycle {
							path: path.to_string(),
							hops: self.max_redirects,
						});
					}
					redirects += 1;
					current = rewrite_target(target, &params);
					tracing::debug!(path, target = %current, hop = redirects, "following redirect");
				}
			}
		}
	}

	fn first_match(&self, segments: &[&str]) -> Option<(&Route, RouteParams)> {
		self.table.all_routes().iter().find_map(|route| {
			route
				.pattern()
				.match_segments(segments)
				.map(|params| (route, params))
		})
	}
}

/// Substitutes `:name` segments of a redirect target with bound parameters.
/// Unbound placeholders are kept literally.
fn rewrite_target(target: &str, params: &RouteParams) -> String {
	let segments: Vec<&str> = split_path(target)
		.into_iter()
		.map(|segment| {
			segment
				.strip_prefix(':')
				.and_then(|name| params.get(name))
				.unwrap_or(segment)
		})
		.collect();
	join_segments(&segments)
}
