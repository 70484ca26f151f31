//! Error types for route construction, matching, loading and navigation.

use thiserror::Error;

/// Error raised while parsing a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatternError {
	/// A `:` segment without a name.
	#[error("pattern '{pattern}' has a parameter segment without a name")]
	EmptyParameterName {
		/// The offending pattern.
		pattern: String,
	},

	/// The same parameter name appears twice.
	#[error("pattern '{pattern}' binds parameter '{name}' more than once")]
	DuplicateParameter {
		/// The offending pattern.
		pattern: String,
		/// The repeated name.
		name: String,
	},

	/// A parameter name contains characters other than ASCII alphanumerics, `_` or `-`.
	#[error("pattern '{pattern}' has an invalid parameter name '{name}'")]
	InvalidParameterName {
		/// The offending pattern.
		pattern: String,
		/// The rejected name.
		name: String,
	},
}

/// Error raised when a path cannot be resolved to a feature route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
	/// No route pattern matches the path.
	#[error("no route matches '{0}'")]
	NotFound(String),

	/// Redirect routes kept rewriting the path past the hop limit.
	#[error("redirect limit of {hops} exceeded while resolving '{path}'")]
	RedirectCycle {
		/// The path originally requested.
		path: String,
		/// The hop limit that was exceeded.
		hops: usize,
	},
}

/// Error raised while resolving a feature implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
	/// No loader is registered for the feature id.
	#[error("no loader registered for feature '{0}'")]
	UnknownFeature(String),

	/// The loader's fetch failed.
	#[error("failed to load feature '{feature}': {reason}")]
	Fetch {
		/// Feature whose fetch failed.
		feature: String,
		/// Failure description reported by the loader.
		reason: String,
	},
}

impl LoadError {
	/// Creates a fetch failure for `feature`.
	pub fn fetch(feature: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::Fetch {
			feature: feature.into(),
			reason: reason.into(),
		}
	}
}

/// Error raised when building a path from a feature id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
	/// No route is bound to the feature id.
	#[error("no route bound to feature '{0}'")]
	UnknownFeature(String),

	/// A parameter required by the pattern was not supplied.
	#[error("missing parameter '{0}'")]
	MissingParameter(String),
}

/// Error raised when a route parameter cannot be read as the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
	/// The parameter was not bound by the matched route.
	#[error("parameter '{0}' is not bound")]
	Missing(String),

	/// The raw value could not be parsed.
	#[error("failed to parse parameter '{name}' value '{raw_value}' as {param_type}: {message}")]
	Parse {
		/// Parameter name.
		name: String,
		/// Expected type name.
		param_type: &'static str,
		/// Raw string value.
		raw_value: String,
		/// Parser message.
		message: String,
	},
}

/// Terminal outcome of a failed navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
	/// No route pattern matches the requested path.
	#[error("route not found: {0}")]
	NotFound(String),

	/// The feature implementation could not be fetched.
	#[error(transparent)]
	LoadFailed(#[from] LoadError),

	/// Redirect routes formed a cycle.
	#[error("redirect cycle while resolving '{path}' ({hops} hops)")]
	RedirectCycle {
		/// The path originally requested.
		path: String,
		/// The hop limit that was exceeded.
		hops: usize,
	},
}

impl From<MatchError> for NavigationError {
	fn from(err: MatchError) -> Self {
		match err {
			MatchError::NotFound(path) => Self::NotFound(path),
			MatchError::RedirectCycle { path, hops } => Self::RedirectCycle { path, hops },
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_match_error_display() {
		assert_eq!(
			MatchError::NotFound("/unknown".to_string()).to_string(),
			"no route matches '/unknown'"
		);
		let err = MatchError::RedirectCycle {
			path: "/".to_string(),
			hops: 10,
		};
		assert!(err.to_string().contains("limit of 10"));
	}

	#[rstest]
	fn test_navigation_error_from_match_error() {
		let err: NavigationError = MatchError::NotFound("/x".to_string()).into();
		assert_eq!(err, NavigationError::NotFound("/x".to_string()));

		let err: NavigationError = MatchError::RedirectCycle {
			path: "/".to_string(),
			hops: 3,
		}
		.into();
		assert!(matches!(err, NavigationError::RedirectCycle { hops: 3, .. }));
	}

	#[rstest]
	fn test_load_failed_is_transparent() {
		let err = NavigationError::from(LoadError::fetch("user-list", "connection reset"));
		assert_eq!(
			err.to_string(),
			"failed to load feature 'user-list': connection reset"
		);
	}

	#[rstest]
	fn test_param_error_display() {
		let err = ParamError::Parse {
			name: "id".to_string(),
			param_type: "u64",
			raw_value: "abc".to_string(),
			message: "invalid digit found in string".to_string(),
		};
		assert!(err.to_string().contains("'id'"));
		assert!(err.to_string().contains("u64"));
	}
}
