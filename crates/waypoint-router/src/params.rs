//! Route parameters bound by a successful match.

use crate::error::ParamError;
use std::collections::HashMap;
use std::str::FromStr;

/// Parameters extracted from a path.
///
/// Keeps both the name → value map and the values in the order their
/// segments appear in the pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
	params: HashMap<String, String>,
	values: Vec<String>,
}

impl RouteParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn insert(&mut self, name: String, value: String) {
		self.values.push(value.clone());
		self.params.insert(name, value);
	}

	/// Returns the raw value bound under `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Parses the value bound under `name`.
	///
	/// # Errors
	///
	/// Returns [`ParamError::Missing`] if nothing is bound under `name`, or
	/// [`ParamError::Parse`] if the value does not parse as `T`.
	pub fn parse<T>(&self, name: &str) -> Result<T, ParamError>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		let raw = self
			.get(name)
			.ok_or_else(|| ParamError::Missing(name.to_string()))?;
		raw.parse::<T>().map_err(|e| ParamError::Parse {
			name: name.to_string(),
			param_type: std::any::type_name::<T>(),
			raw_value: raw.to_string(),
			message: e.to_string(),
		})
	}

	/// Returns the name → value map.
	pub fn as_map(&self) -> &HashMap<String, String> {
		&self.params
	}

	/// Returns the values in pattern order.
	pub fn values(&self) -> &[String] {
		&self.values
	}

	/// Returns the number of bound parameters.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns whether no parameters are bound.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Self::default();
		for (name, value) in iter {
			params.insert(name.into(), value.into());
		}
		params
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_parse_typed_value() {
		let params: RouteParams = [("id", "42")].into_iter().collect();
		assert_eq!(params.parse::<u64>("id").unwrap(), 42);
		assert_eq!(params.values(), &["42".to_string()]);
	}

	#[rstest]
	fn test_parse_errors() {
		let params: RouteParams = [("id", "abc")].into_iter().collect();
		assert!(matches!(
			params.parse::<u64>("id"),
			Err(ParamError::Parse { param_type: "u64", .. })
		));
		assert_eq!(
			params.parse::<u64>("slug"),
			Err(ParamError::Missing("slug".to_string()))
		);
	}

	#[rstest]
	fn test_empty() {
		let params = RouteParams::new();
		assert!(params.is_empty());
		assert_eq!(params.len(), 0);
		assert!(params.as_map().is_empty());
	}
}
