//! Route pattern parsing and segment-wise matching.
//!
//! Patterns are `/`-delimited templates. A segment starting with `:` is a
//! named parameter that binds exactly one non-empty path segment; every other
//! segment is a literal that must match exactly.
//!
//! - `products` - Literal match
//! - `products/:id` - Single parameter
//! - `""` - Matches only the empty path (`/`)

use crate::error::{PatternError, ReverseError};
use crate::params::RouteParams;
use std::collections::{HashMap, HashSet};

/// One segment of a compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
	/// Must equal the path segment exactly.
	Literal(String),
	/// Matches any non-empty path segment and binds it under the name.
	Parameter(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	/// The original pattern string.
	pattern: String,
	/// Parsed segments in order.
	segments: Vec<Segment>,
}

impl RoutePattern {
	/// Parses a pattern string.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if a parameter segment has an empty or invalid
	/// name, or if the same parameter name is bound twice.
	pub fn parse(pattern: &str) -> Result<Self, PatternError> {
		let mut segments = Vec::new();
		let mut seen = HashSet::new();

		for raw in split_path(pattern) {
			let Some(name) = raw.strip_prefix(':') else {
				segments.push(Segment::Literal(raw.to_string()));
				continue;
			};

			if name.is_empty() {
				return Err(PatternError::EmptyParameterName {
					pattern: pattern.to_string(),
				});
			}
			if !name
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
			{
				return Err(PatternError::InvalidParameterName {
					pattern: pattern.to_string(),
					name: name.to_string(),
				});
			}
			if !seen.insert(name) {
				return Err(PatternError::DuplicateParameter {
					pattern: pattern.to_string(),
					name: name.to_string(),
				});
			}
			segments.push(Segment::Parameter(name.to_string()));
		}

		Ok(Self {
			pattern: pattern.to_string(),
			segments,
		})
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parsed segments.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(|segment| match segment {
			Segment::Parameter(name) => Some(name.as_str()),
			Segment::Literal(_) => None,
		})
	}

	/// Returns whether the pattern has no parameters.
	pub fn is_exact(&self) -> bool {
		self.param_names().next().is_none()
	}

	/// Returns whether the pattern only matches the empty path.
	pub fn is_root(&self) -> bool {
		self.segments.is_empty()
	}

	/// Matches already-split path segments against this pattern.
	///
	/// Segment counts must be equal; there is no prefix matching.
	pub fn match_segments(&self, segments: &[&str]) -> Option<RouteParams> {
		if segments.len() != self.segments.len() {
			return None;
		}

		let mut params = RouteParams::default();
		for (spec, actual) in self.segments.iter().zip(segments) {
			match spec {
				Segment::Literal(text) if text == actual => {}
				Segment::Literal(_) => return None,
				Segment::Parameter(_) if actual.is_empty() => return None,
				Segment::Parameter(name) => params.insert(name.clone(), (*actual).to_string()),
			}
		}
		Some(params)
	}

	/// Attempts to match a path against this pattern.
	pub fn matches(&self, path: &str) -> Option<RouteParams> {
		self.match_segments(&split_path(path))
	}

	/// Builds a canonical path from this pattern and the given parameters.
	///
	/// # Errors
	///
	/// Returns [`ReverseError::MissingParameter`] if a parameter is not supplied.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Result<String, ReverseError> {
		let mut parts = Vec::with_capacity(self.segments.len());
		for segment in &self.segments {
			match segment {
				Segment::Literal(text) => parts.push(text.as_str()),
				Segment::Parameter(name) => {
					let value = params
						.get(name)
						.filter(|value| !value.is_empty())
						.ok_or_else(|| ReverseError::MissingParameter(name.clone()))?;
					parts.push(value.as_str());
				}
			}
		}
		Ok(join_segments(&parts))
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.segments == other.segments
	}
}

impl Eq for RoutePattern {}

impl std::fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

/// Splits a path into its non-empty segments.
///
/// Leading, trailing and repeated slashes are discarded, and anything after
/// a `?` or `#` is ignored.
pub fn split_path(path: &str) -> Vec<&str> {
	let end = path.find(['?', '#']).unwrap_or(path.len());
	path[..end].split('/').filter(|s| !s.is_empty()).collect()
}

/// Returns the canonical `/a/b` form of a path. The empty path becomes `/`.
pub fn canonical_path(path: &str) -> String {
	join_segments(&split_path(path))
}

pub(crate) fn join_segments(segments: &[&str]) -> String {
	format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_exact_pattern() {
		let pattern = RoutePattern::parse("products").unwrap();
		assert!(pattern.is_exact());
		assert!(pattern.matches("/products").is_some());
		assert!(pattern.matches("products/").is_some());
		assert!(pattern.matches("/products/1").is_none());
		assert!(pattern.matches("/").is_none());
	}

	#[rstest]
	fn test_single_param() {
		let pattern = RoutePattern::parse("users/:id").unwrap();
		assert!(!pattern.is_exact());
		assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id"]);

		let params = pattern.matches("/users/42").unwrap();
		assert_eq!(params.get("id"), Some("42"));
		assert!(pattern.matches("/users").is_none());
		assert!(pattern.matches("/users/42/edit").is_none());
	}

	#[rstest]
	fn test_root_pattern_matches_only_empty_path() {
		let pattern = RoutePattern::parse("").unwrap();
		assert!(pattern.is_root());
		assert!(pattern.matches("").is_some());
		assert!(pattern.matches("/").is_some());
		assert!(pattern.matches("//").is_some());
		assert!(pattern.matches("/products").is_none());
	}

	#[rstest]
	#[case("products/:", "without a name")]
	#[case("a/:id/b/:id", "more than once")]
	#[case("files/:na.me", "invalid parameter name")]
	fn test_invalid_patterns(#[case] raw: &str, #[case] message: &str) {
		let err = RoutePattern::parse(raw).unwrap_err();
		assert!(err.to_string().contains(message), "{err}");
	}

	#[rstest]
	#[case("/products", vec!["products"])]
	#[case("products/", vec!["products"])]
	#[case("//users///42/", vec!["users", "42"])]
	#[case("/orders/7?tab=items", vec!["orders", "7"])]
	#[case("/orders#summary", vec!["orders"])]
	#[case("", vec![])]
	fn test_split_path(#[case] path: &str, #[case] expected: Vec<&str>) {
		assert_eq!(split_path(path), expected);
	}

	#[rstest]
	#[case("", "/")]
	#[case("/", "/")]
	#[case("users/42/", "/users/42")]
	#[case("/orders//3", "/orders/3")]
	fn test_canonical_path(#[case] path: &str, #[case] expected: &str) {
		assert_eq!(canonical_path(path), expected);
	}

	#[rstest]
	fn test_reverse() {
		let pattern = RoutePattern::parse("orders/:id").unwrap();
		let mut params = HashMap::new();
		params.insert("id".to_string(), "9".to_string());
		assert_eq!(pattern.reverse(&params).unwrap(), "/orders/9");

		let err = pattern.reverse(&HashMap::new()).unwrap_err();
		assert_eq!(err, ReverseError::MissingParameter("id".to_string()));
	}

	#[rstest]
	fn test_pattern_equality_ignores_slashes() {
		let p1 = RoutePattern::parse("/users/:id").unwrap();
		let p2 = RoutePattern::parse("users/:id/").unwrap();
		let p3 = RoutePattern::parse("users/:user_id").unwrap();
		assert_eq!(p1, p2);
		assert_ne!(p1, p3);
		assert_eq!(p2.to_string(), "users/:id/");
	}
}
