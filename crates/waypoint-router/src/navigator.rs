//! The navigation controller.
//!
//! A [`Navigator`] owns the current path, the active match and the view
//! slot. Each call to [`Navigator::navigate`] takes a generation ticket;
//! when a newer navigation has started by the time a feature fetch lands,
//! the older result is discarded without touching state.
//!
//! ## Example
//!
//! ```ignore
//! let navigator = Navigator::new(table, NavigatorConfig::default());
//! let id = navigator.subscribe(|snapshot| println!("{:?}", snapshot.phase));
//!
//! navigator.navigate("/users/42").await?;
//! assert_eq!(navigator.current_path().as_deref(), Some("/users/42"));
//!
//! navigator.unsubscribe(id);
//! ```

use crate::error::NavigationError;
use crate::loader::FeatureLoader;
use crate::matcher::{DEFAULT_MAX_REDIRECTS, PathMatcher, RouteMatch};
use crate::pattern::canonical_path;
use crate::route::RouteTable;
use crate::slot::ViewSlot;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Navigator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
	/// Maximum redirect hops per navigation.
	pub max_redirects: usize,
	/// Path used by [`Navigator::start`].
	pub initial_path: String,
}

impl Default for NavigatorConfig {
	fn default() -> Self {
		Self {
			max_redirects: DEFAULT_MAX_REDIRECTS,
			initial_path: "/".to_string(),
		}
	}
}

/// Controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationPhase {
	/// Nothing has been navigated to yet.
	Idle,
	/// A navigation is waiting for its feature.
	Resolving,
	/// A feature view is mounted.
	Active,
	/// The most recent navigation failed.
	Error(NavigationError),
}

/// Result of a navigation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// The feature was resolved and its view mounted.
	Mounted,
	/// The path is already shown or already being resolved; no view was mounted.
	Unchanged,
	/// A newer navigation started first; this result was discarded.
	Superseded,
}

/// Point-in-time copy of the navigation state, handed to subscribers.
#[derive(Debug, Clone)]
pub struct NavigationSnapshot {
	/// Controller phase.
	pub phase: NavigationPhase,
	/// Path of the most recent completed navigation.
	pub current_path: Option<String>,
	/// Path of the navigation in flight, if any.
	pub pending_path: Option<String>,
	/// Match of the mounted feature.
	pub active_match: Option<RouteMatch>,
	/// Feature id of the mounted view.
	pub mounted_feature: Option<String>,
}

/// Handle returned by [`Navigator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&NavigationSnapshot) + Send + Sync>;

struct PendingNavigation {
	ticket: u64,
	path: String,
}

struct NavigationState {
	phase: NavigationPhase,
	/// Phase to fall back to when the pending navigation is dropped.
	settled: NavigationPhase,
	current_path: Option<String>,
	active_match: Option<RouteMatch>,
	pending: Option<PendingNavigation>,
	generation: u64,
	slot: ViewSlot,
}

impl NavigationState {
	fn new() -> Self {
		Self {
			phase: NavigationPhase::Idle,
			settled: NavigationPhase::Idle,
			current_path: None,
			active_match: None,
			pending: None,
			generation: 0,
			slot: ViewSlot::new(),
		}
	}

	/// Whether the mounted view was reached through `path`.
	fn shows(&self, path: &str) -> bool {
		self.active_match
			.as_ref()
			.is_some_and(|route_match| route_match.path == path)
	}

	fn settle_phase(&mut self, phase: NavigationPhase) {
		self.settled = phase.clone();
		self.phase = phase;
		self.pending = None;
	}

	fn fail(&mut self, path: String, err: NavigationError) {
		self.slot.clear();
		self.current_path = Some(path);
		self.active_match = None;
		self.settle_phase(NavigationPhase::Error(err));
	}

	fn snapshot(&self) -> NavigationSnapshot {
		NavigationSnapshot {
			phase: self.phase.clone(),
			current_path: self.current_path.clone(),
			pending_path: self.pending.as_ref().map(|p| p.path.clone()),
			active_match: self.active_match.clone(),
			mounted_feature: self.slot.feature_id().map(str::to_string),
		}
	}
}

/// A navigation between taking its ticket and settling.
///
/// Dropping it unsettled, for instance when the `navigate` future is
/// cancelled mid-fetch, abandons the navigation.
struct InFlight<'a> {
	navigator: &'a Navigator,
	ticket: u64,
	settled: bool,
}

impl InFlight<'_> {
	fn settle<R>(mut self, apply: impl FnOnce(&mut NavigationState) -> R) -> Option<R> {
		self.settled = true;
		self.navigator.settle(self.ticket, apply)
	}
}

impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		if !self.settled {
			self.navigator.abandon(self.ticket);
		}
	}
}

/// Drives path matching and feature loading, and owns the view slot.
pub struct Navigator {
	config: NavigatorConfig,
	matcher: PathMatcher,
	loader: Arc<FeatureLoader>,
	state: Mutex<NavigationState>,
	listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
	next_subscription: AtomicU64,
}

impl std::fmt::Debug for Navigator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		f.debug_struct("Navigator")
			.field("routes_count", &self.matcher.table().len())
			.field("phase", &state.phase)
			.field("current_path", &state.current_path)
			.field("listeners", &self.listeners.lock().len())
			.finish()
	}
}

impl Navigator {
	/// Creates a navigator with a fresh feature loader built from `table`.
	pub fn new(table: RouteTable, config: NavigatorConfig) -> Self {
		let table = Arc::new(table);
		let loader = Arc::new(FeatureLoader::from_table(&table));
		Self::with_loader(table, loader, config)
	}

	/// Creates a navigator sharing an existing feature loader.
	pub fn with_loader(
		table: Arc<RouteTable>,
		loader: Arc<FeatureLoader>,
		config: NavigatorConfig,
	) -> Self {
		let matcher = PathMatcher::new(table).with_max_redirects(config.max_redirects);
		Self {
			config,
			matcher,
			loader,
			state: Mutex::new(NavigationState::new()),
			listeners: Mutex::new(Vec::new()),
			next_subscription: AtomicU64::new(0),
		}
	}

	/// Navigates to the configured initial path.
	///
	/// # Errors
	///
	/// Same as [`navigate`](Self::navigate).
	pub async fn start(&self) -> Result<NavigationOutcome, NavigationError> {
		self.navigate(&self.config.initial_path).await
	}

	/// Navigates to `path`.
	///
	/// The path is canonicalised first (empty segments dropped, query and
	/// fragment ignored). Navigating to the path already shown, or to the path
	/// already being resolved, is a no-op. Navigating back to the mounted view
	/// while another navigation is pending supersedes that navigation without
	/// remounting.
	///
	/// Dropping the returned future before it completes abandons the
	/// navigation: the pending path is cleared and the previous phase is
	/// restored, unless a newer navigation has started since.
	///
	/// # Errors
	///
	/// Returns [`NavigationError::NotFound`], [`NavigationError::RedirectCycle`]
	/// or [`NavigationError::LoadFailed`]. In each case the view slot is
	/// cleared and the phase becomes [`NavigationPhase::Error`].
	pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome, NavigationError> {
		let requested = canonical_path(path);
		let resolution = self.matcher.match_path(&requested);

		let ticket = {
			let mut state = self.state.lock();
			let already_shown = state.shows(&requested)
				|| resolution
					.as_ref()
					.is_ok_and(|route_match| state.shows(&route_match.path));
			if already_shown {
				let Some(cancelled) = state.pending.take() else {
					tracing::debug!(path = %requested, "already active");
					return Ok(NavigationOutcome::Unchanged);
				};
				// Back to the mounted view: drop the pending navigation, keep the view.
				tracing::debug!(
					cancelled = %cancelled.path,
					ticket = cancelled.ticket,
					path = %requested,
					"returning to mounted view"
				);
				state.generation += 1;
				state.settle_phase(NavigationPhase::Active);
				drop(state);
				self.notify();
				return Ok(NavigationOutcome::Unchanged);
			}
			if state
				.pending
				.as_ref()
				.is_some_and(|pending| pending.path == requested)
			{
				tracing::debug!(path = %requested, "already resolving");
				return Ok(NavigationOutcome::Unchanged);
			}

			state.generation += 1;
			let ticket = state.generation;
			if let Some(previous) = &state.pending {
				tracing::debug!(
					superseded = %previous.path,
					ticket = previous.ticket,
					path = %requested,
					"superseding navigation"
				);
			}
			state.phase = NavigationPhase::Resolving;
			state.pending = Some(PendingNavigation {
				ticket,
				path: requested.clone(),
			});
			ticket
		};
		let in_flight = InFlight {
			navigator: self,
			ticket,
			settled: false,
		};
		self.notify();

		let route_match = match resolution {
			Ok(route_match) => route_match,
			Err(err) => {
				let err = NavigationError::from(err);
				tracing::warn!(path = %requested, error = %err, "navigation failed");
				let failure = err.clone();
				return match in_flight.settle(move |state| state.fail(requested, failure)) {
					Some(()) => Err(err),
					None => Ok(NavigationOutcome::Superseded),
				};
			}
		};

		let resolved = self.loader.resolve(&route_match.feature_id).await;

		let settled = in_flight.settle(move |state| match resolved {
			Ok(feature) => {
				let view = feature.instantiate(&route_match.params);
				state.slot.mount(route_match.feature_id.clone(), view);
				tracing::info!(
					path = %route_match.path,
					feature = %route_match.feature_id,
					"mounted feature"
				);
				state.current_path = Some(route_match.path.clone());
				state.active_match = Some(route_match);
				state.settle_phase(NavigationPhase::Active);
				Ok(NavigationOutcome::Mounted)
			}
			Err(err) => {
				let err = NavigationError::from(err);
				tracing::warn!(path = %requested, error = %err, "navigation failed");
				state.fail(requested, err.clone());
				Err(err)
			}
		});

		settled.unwrap_or_else(|| {
			tracing::trace!(ticket, "discarding superseded navigation result");
			Ok(NavigationOutcome::Superseded)
		})
	}

	/// Applies `apply` if `ticket` is still the latest navigation, then
	/// notifies subscribers. Returns `None` for a stale ticket.
	fn settle<R>(&self, ticket: u64, apply: impl FnOnce(&mut NavigationState) -> R) -> Option<R> {
		let applied = {
			let mut state = self.state.lock();
			(state.generation == ticket).then(|| apply(&mut state))
		};
		if applied.is_some() {
			self.notify();
		}
		applied
	}

	/// Clears a navigation whose future was dropped before settling. The
	/// mounted view and the last settled phase are kept.
	fn abandon(&self, ticket: u64) {
		let abandoned = {
			let mut state = self.state.lock();
			let current = state.generation == ticket;
			if current {
				let phase = state.settled.clone();
				state.settle_phase(phase);
			}
			current
		};
		if abandoned {
			tracing::debug!(ticket, "navigation dropped before settling");
			self.notify();
		}
	}

	fn notify(&self) {
		let snapshot = self.snapshot();
		let listeners: Vec<Listener> = self
			.listeners
			.lock()
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();
		for listener in listeners {
			listener(&snapshot);
		}
	}

	/// Registers a callback invoked synchronously after every state transition.
	///
	/// Callbacks must not navigate re-entrantly from within the call.
	pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
	where
		F: Fn(&NavigationSnapshot) + Send + Sync + 'static,
	{
		let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
		self.listeners.lock().push((id, Arc::new(listener)));
		id
	}

	/// Detaches a callback. Returns whether it was registered.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut listeners = self.listeners.lock();
		let before = listeners.len();
		listeners.retain(|(registered, _)| *registered != id);
		listeners.len() != before
	}

	/// Returns a copy of the current state.
	pub fn snapshot(&self) -> NavigationSnapshot {
		self.state.lock().snapshot()
	}

	/// Returns the controller phase.
	pub fn phase(&self) -> NavigationPhase {
		self.state.lock().phase.clone()
	}

	/// Returns the path of the most recent completed navigation.
	pub fn current_path(&self) -> Option<String> {
		self.state.lock().current_path.clone()
	}

	/// Returns the match of the mounted feature.
	pub fn active_match(&self) -> Option<RouteMatch> {
		self.state.lock().active_match.clone()
	}

	/// Returns the feature id of the mounted view.
	pub fn mounted_feature(&self) -> Option<String> {
		self.state.lock().slot.feature_id().map(str::to_string)
	}

	/// Renders the mounted view.
	pub fn render(&self) -> Option<String> {
		self.state.lock().slot.render()
	}

	/// Returns the route table.
	pub fn routes(&self) -> &RouteTable {
		self.matcher.table()
	}

	/// Returns the feature loader.
	pub fn loader(&self) -> &Arc<FeatureLoader> {
		&self.loader
	}

	/// Returns the configuration.
	pub fn config(&self) -> &NavigatorConfig {
		&self.config
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::feature::{Feature, Loader, TextView, View};
	use crate::params::RouteParams;
	use rstest::rstest;

	struct Named(&'static str);

	impl Feature for Named {
		fn instantiate(&self, params: &RouteParams) -> Box<dyn View> {
			match params.get("id") {
				Some(id) => Box::new(TextView::new(format!("{} #{}", self.0, id))),
				None => Box::new(TextView::new(self.0)),
			}
		}
	}

	fn navigator() -> Navigator {
		let table = RouteTable::builder()
			.register("products", "product-list", Loader::ready(Arc::new(Named("products"))))
			.register(
				"products/:id",
				"product-details",
				Loader::ready(Arc::new(Named("product"))),
			)
			.redirect("", "/products")
			.build()
			.unwrap();
		Navigator::new(table, NavigatorConfig::default())
	}

	#[rstest]
	fn test_initial_state() {
		let navigator = navigator();
		assert_eq!(navigator.phase(), NavigationPhase::Idle);
		assert_eq!(navigator.current_path(), None);
		assert!(navigator.active_match().is_none());
		assert_eq!(navigator.render(), None);
	}

	#[rstest]
	#[tokio::test]
	async fn test_start_follows_root_redirect() {
		let navigator = navigator();
		assert_eq!(navigator.start().await, Ok(NavigationOutcome::Mounted));
		assert_eq!(navigator.current_path().as_deref(), Some("/products"));
		assert_eq!(navigator.mounted_feature().as_deref(), Some("product-list"));
		assert_eq!(navigator.render().as_deref(), Some("products"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_same_path_is_noop() {
		let navigator = navigator();
		navigator.navigate("/products/3").await.unwrap();

		assert_eq!(
			navigator.navigate("products/3/").await,
			Ok(NavigationOutcome::Unchanged)
		);
		assert_eq!(
			navigator.navigate("/products/4").await,
			Ok(NavigationOutcome::Mounted)
		);
		assert_eq!(navigator.render().as_deref(), Some("product #4"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_redirect_to_shown_path_is_noop() {
		let navigator = navigator();
		navigator.navigate("/products").await.unwrap();
		assert_eq!(navigator.navigate("/").await, Ok(NavigationOutcome::Unchanged));
	}

	#[rstest]
	#[tokio::test]
	async fn test_not_found_clears_slot() {
		let navigator = navigator();
		navigator.navigate("/products").await.unwrap();

		let err = navigator.navigate("/unknown").await.unwrap_err();
		assert_eq!(err, NavigationError::NotFound("/unknown".to_string()));
		assert_eq!(navigator.phase(), NavigationPhase::Error(err));
		assert_eq!(navigator.current_path().as_deref(), Some("/unknown"));
		assert!(navigator.active_match().is_none());
		assert_eq!(navigator.render(), None);
	}

	#[rstest]
	fn test_unsubscribe() {
		let navigator = navigator();
		let id = navigator.subscribe(|_| {});
		assert!(navigator.unsubscribe(id));
		assert!(!navigator.unsubscribe(id));
	}
}
