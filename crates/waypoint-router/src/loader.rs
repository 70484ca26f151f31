//! On-demand, memoising resolution of feature implementations.
//!
//! The cache entry for a feature id moves from pending to resolved or failed
//! exactly once and is never evicted. Concurrent resolutions of a pending id
//! await the same shared fetch, so at most one fetch is issued per id.
//! Failures are cached as well and are not retried.

use crate::error::LoadError;
use crate::feature::{Feature, FeatureFetch, Loader};
use crate::route::RouteTable;
use futures::FutureExt;
use futures::future::Shared;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Observable state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
	/// A fetch is in flight.
	Pending,
	/// The feature is available.
	Resolved,
	/// The fetch failed; the failure is permanent.
	Failed,
}

enum CacheEntry {
	Pending(Shared<FeatureFetch>),
	Resolved(Arc<dyn Feature>),
	Failed(LoadError),
}

impl CacheEntry {
	fn status(&self) -> LoadStatus {
		match self {
			Self::Pending(_) => LoadStatus::Pending,
			Self::Resolved(_) => LoadStatus::Resolved,
			Self::Failed(_) => LoadStatus::Failed,
		}
	}
}

/// Resolves feature ids to implementations, fetching each at most once.
pub struct FeatureLoader {
	loaders: HashMap<String, Loader>,
	cache: Mutex<HashMap<String, CacheEntry>>,
	fetches: AtomicUsize,
}

impl std::fmt::Debug for FeatureLoader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let cache = self.cache.lock();
		f.debug_struct("FeatureLoader")
			.field("features", &self.loaders.keys().collect::<Vec<_>>())
			.field(
				"cache",
				&cache
					.iter()
					.map(|(id, entry)| (id.as_str(), entry.status()))
					.collect::<HashMap<_, _>>(),
			)
			.field("fetches", &self.fetches.load(Ordering::Relaxed))
			.finish()
	}
}

impl FeatureLoader {
	/// Creates a loader from explicit feature id → loader pairs.
	///
	/// When an id appears twice the first loader is kept.
	pub fn new<I, S>(loaders: I) -> Self
	where
		I: IntoIterator<Item = (S, Loader)>,
		S: Into<String>,
	{
		let mut map = HashMap::new();
		for (id, loader) in loaders {
			map.entry(id.into()).or_insert(loader);
		}
		Self {
			loaders: map,
			cache: Mutex::new(HashMap::new()),
			fetches: AtomicUsize::new(0),
		}
	}

	/// Creates a loader for every feature route of `table`.
	///
	/// A feature bound by several routes uses the loader of the first one.
	pub fn from_table(table: &RouteTable) -> Self {
		Self::new(table.feature_ids().into_iter().filter_map(|id| {
			table
				.loader(id)
				.map(|loader| (id.to_string(), loader.clone()))
		}))
	}

	/// Resolves the implementation of `feature_id`.
	///
	/// Returns immediately when the entry is resolved or failed, joins the
	/// in-flight fetch when pending, and otherwise issues the fetch.
	///
	/// # Errors
	///
	/// Returns [`LoadError::UnknownFeature`] if no loader is registered for the
	/// id, or the (cached) [`LoadError::Fetch`] of a failed fetch.
	pub async fn resolve(&self, feature_id: &str) -> Result<Arc<dyn Feature>, LoadError> {
		let fetch = {
			let mut cache = self.cache.lock();
			match cache.get(feature_id) {
				Some(CacheEntry::Resolved(feature)) => return Ok(Arc::clone(feature)),
				Some(CacheEntry::Failed(err)) => return Err(err.clone()),
				Some(CacheEntry::Pending(fetch)) => {
					tracing::trace!(feature = feature_id, "joining in-flight fetch");
					fetch.clone()
				}
				None => {
					let loader = self
						.loaders
						.get(feature_id)
						.ok_or_else(|| LoadError::UnknownFeature(feature_id.to_string()))?;
					tracing::debug!(feature = feature_id, "fetching feature");
					self.fetches.fetch_add(1, Ordering::Relaxed);
					let fetch = loader.fetch().shared();
					cache.insert(feature_id.to_string(), CacheEntry::Pending(fetch.clone()));
					fetch
				}
			}
		};

		let outcome = fetch.await;
		self.settle(feature_id, &outcome);
		outcome
	}

	/// Moves a pending entry to its final state. Later settlements of the same
	/// entry are ignored.
	fn settle(&self, feature_id: &str, outcome: &Result<Arc<dyn Feature>, LoadError>) {
		let mut cache = self.cache.lock();
		let Some(entry) = cache.get_mut(feature_id) else {
			return;
		};
		if !matches!(entry, CacheEntry::Pending(_)) {
			return;
		}

		*entry = match outcome {
			Ok(feature) => {
				tracing::debug!(feature = feature_id, "feature resolved");
				CacheEntry::Resolved(Arc::clone(feature))
			}
			Err(err) => {
				tracing::warn!(feature = feature_id, error = %err, "feature failed to load");
				CacheEntry::Failed(err.clone())
			}
		};
	}

	/// Resolves `feature_id` ahead of any navigation.
	///
	/// # Errors
	///
	/// Same as [`resolve`](Self::resolve).
	pub async fn preload(&self, feature_id: &str) -> Result<(), LoadError> {
		self.resolve(feature_id).await.map(|_| ())
	}

	/// Returns the cache state of `feature_id`, or `None` if never requested.
	pub fn status(&self, feature_id: &str) -> Option<LoadStatus> {
		self.cache.lock().get(feature_id).map(CacheEntry::status)
	}

	/// Returns whether a loader is registered for `feature_id`.
	pub fn knows(&self, feature_id: &str) -> bool {
		self.loaders.contains_key(feature_id)
	}

	/// Returns the number of fetches issued so far.
	pub fn fetch_count(&self) -> usize {
		self.fetches.load(Ordering::Relaxed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::feature::{TextView, View};
	use crate::params::RouteParams;
	use futures::channel::oneshot;
	use rstest::rstest;

	struct Blank;

	impl Feature for Blank {
		fn instantiate(&self, _params: &RouteParams) -> Box<dyn View> {
			Box::new(TextView::new(""))
		}
	}

	fn counting_loader(counter: Arc<AtomicUsize>) -> Loader {
		Loader::new(move || {
			counter.fetch_add(1, Ordering::SeqCst);
			async { Ok::<_, LoadError>(Arc::new(Blank) as Arc<dyn Feature>) }
		})
	}

	#[rstest]
	#[tokio::test]
	async fn test_resolved_entry_is_reused() {
		let calls = Arc::new(AtomicUsize::new(0));
		let loader = FeatureLoader::new([("products", counting_loader(Arc::clone(&calls)))]);

		assert_eq!(loader.status("products"), None);
		let first = loader.resolve("products").await.unwrap();
		let second = loader.resolve("products").await.unwrap();

		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(loader.fetch_count(), 1);
		assert_eq!(loader.status("products"), Some(LoadStatus::Resolved));
	}

	#[rstest]
	#[tokio::test]
	async fn test_pending_entry_is_shared() {
		let (tx, rx) = oneshot::channel::<()>();
		let gate = Arc::new(Mutex::new(Some(rx)));
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let gated = Loader::new(move || {
			counter.fetch_add(1, Ordering::SeqCst);
			let rx = gate.lock().take();
			async move {
				if let Some(rx) = rx {
					let _ = rx.await;
				}
				Ok::<_, LoadError>(Arc::new(Blank) as Arc<dyn Feature>)
			}
		});
		let loader = FeatureLoader::new([("products", gated)]);

		let observer = &loader;
		let release = async move {
			assert_eq!(observer.status("products"), Some(LoadStatus::Pending));
			tx.send(()).unwrap();
		};
		let (a, b, c, ()) = futures::join!(
			loader.resolve("products"),
			loader.resolve("products"),
			loader.resolve("products"),
			release
		);

		let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
		assert!(Arc::ptr_eq(&a, &b));
		assert!(Arc::ptr_eq(&b, &c));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_failure_is_cached() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let failing = Loader::new(move || {
			counter.fetch_add(1, Ordering::SeqCst);
			async { Err::<Arc<dyn Feature>, _>(LoadError::fetch("orders", "chunk missing")) }
		});
		let loader = FeatureLoader::new([("orders", failing)]);

		let first = loader.resolve("orders").await.err().unwrap();
		let second = loader.resolve("orders").await.err().unwrap();

		assert_eq!(first, second);
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(loader.status("orders"), Some(LoadStatus::Failed));
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_feature_is_not_cached() {
		let loader = FeatureLoader::new(Vec::<(String, Loader)>::new());

		let err = loader.resolve("ghost").await.err().unwrap();
		assert_eq!(err, LoadError::UnknownFeature("ghost".to_string()));
		assert_eq!(loader.status("ghost"), None);
		assert_eq!(loader.fetch_count(), 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_preload_warms_cache() {
		let loader = FeatureLoader::new([("users", Loader::ready(Arc::new(Blank)))]);
		assert!(loader.knows("users"));

		loader.preload("users").await.unwrap();
		assert_eq!(loader.status("users"), Some(LoadStatus::Resolved));
	}
}
