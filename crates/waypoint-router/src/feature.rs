//! Feature implementations, the views they construct, and their loaders.
//!
//! A [`Feature`] is the unit a route resolves to. It is fetched on demand by
//! a [`Loader`] and, once resolved, constructs a [`View`] for every mount.

use crate::error::LoadError;
use crate::params::RouteParams;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// A loadable unit of view logic bound to one or more routes.
pub trait Feature: Send + Sync {
	/// Constructs a view for the given route parameters.
	fn instantiate(&self, params: &RouteParams) -> Box<dyn View>;
}

/// A mounted feature instance.
pub trait View: Send {
	/// Renders the view as text.
	fn render(&self) -> String;

	/// Called once when the view is retired from the view slot.
	fn teardown(&mut self) {}
}

/// A view with fixed text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextView(pub String);

impl TextView {
	/// Creates a text view.
	pub fn new(text: impl Into<String>) -> Self {
		Self(text.into())
	}
}

impl View for TextView {
	fn render(&self) -> String {
		self.0.clone()
	}
}

/// Future produced by a single loader fetch.
pub type FeatureFetch = BoxFuture<'static, Result<Arc<dyn Feature>, LoadError>>;

/// Deferred resolution of a feature implementation.
///
/// Calling [`Loader::fetch`] issues a new fetch every time; deduplication and
/// caching are the [`FeatureLoader`](crate::loader::FeatureLoader)'s job.
#[derive(Clone)]
pub struct Loader {
	fetch: Arc<dyn Fn() -> FeatureFetch + Send + Sync>,
}

impl Loader {
	/// Creates a loader from an async factory.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use waypoint_router::{Feature, Loader, RouteParams, TextView, View};
	///
	/// struct Dashboard;
	///
	/// impl Feature for Dashboard {
	///     fn instantiate(&self, _params: &RouteParams) -> Box<dyn View> {
	///         Box::new(TextView::new("dashboard"))
	///     }
	/// }
	///
	/// let loader = Loader::new(|| async {
	///     Ok::<_, waypoint_router::LoadError>(Arc::new(Dashboard) as Arc<dyn Feature>)
	/// });
	/// # let _ = loader;
	/// ```
	pub fn new<F, Fut>(factory: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Arc<dyn Feature>, LoadError>> + Send + 'static,
	{
		Self {
			fetch: Arc::new(move || factory().boxed()),
		}
	}

	/// Creates a loader that resolves immediately to an already linked feature.
	pub fn ready(feature: Arc<dyn Feature>) -> Self {
		Self::new(move || {
			let feature = Arc::clone(&feature);
			async move { Ok::<_, LoadError>(feature) }
		})
	}

	/// Issues one fetch.
	pub fn fetch(&self) -> FeatureFetch {
		(self.fetch)()
	}
}

impl std::fmt::Debug for Loader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Loader").finish_non_exhaustive()
	}
}
