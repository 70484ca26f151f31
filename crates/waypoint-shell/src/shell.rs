//! Wires settings, catalogue and features into a navigator.

use crate::catalogue::Catalogue;
use crate::chrome;
use crate::features;
use crate::links::Links;
use std::sync::Arc;
use std::time::Duration;
use waypoint_conf::{Settings, SettingsError};
use waypoint_router::{
	LoadError, LoadStatus, NavigationError, NavigationOutcome, Navigator, RouteTarget,
};

/// The demo application: a navigator plus chrome rendering.
#[derive(Debug)]
pub struct Shell {
	navigator: Arc<Navigator>,
	styled: bool,
}

impl Shell {
	/// Builds the shell from settings.
	///
	/// # Errors
	///
	/// Returns [`SettingsError`] if the configured routes are invalid or name
	/// a feature the shell does not provide.
	pub fn build(
		settings: &Settings,
		catalogue: Arc<Catalogue>,
		latency: Duration,
	) -> Result<Self, SettingsError> {
		let links = Links::from_entries(&settings.routes)?;
		let registry = features::registry(catalogue, links, latency);
		let table = settings.route_table(&registry)?;
		let navigator = Navigator::new(table, settings.navigator_config());
		navigator.subscribe(|snapshot| {
			tracing::debug!(
				phase = ?snapshot.phase,
				current = ?snapshot.current_path,
				pending = ?snapshot.pending_path,
				"navigation state changed"
			);
		});

		Ok(Self {
			navigator: Arc::new(navigator),
			styled: false,
		})
	}

	/// Enables terminal styling of the chrome.
	pub fn styled(mut self, styled: bool) -> Self {
		self.styled = styled;
		self
	}

	pub fn navigator(&self) -> &Arc<Navigator> {
		&self.navigator
	}

	/// Navigates to the configured initial path and renders the screen.
	pub async fn start(&self) -> String {
		let outcome = self.navigator.start().await;
		self.finish(&self.navigator.config().initial_path, outcome)
	}

	/// Navigates to `path` and renders the screen.
	pub async fn visit(&self, path: &str) -> String {
		let outcome = self.navigator.navigate(path).await;
		self.finish(path, outcome)
	}

	// Failures are already logged by the navigator and shown in the body.
	fn finish(&self, path: &str, outcome: Result<NavigationOutcome, NavigationError>) -> String {
		if let Ok(outcome) = outcome {
			tracing::debug!(path, ?outcome, "navigation finished");
		}
		self.screen()
	}

	/// Renders the chrome around the mounted view.
	pub fn screen(&self) -> String {
		chrome::screen(&self.navigator.snapshot(), self.navigator.render(), self.styled)
	}

	/// Resolves every routed feature ahead of navigation.
	pub async fn preload_all(&self) -> Vec<(String, Result<(), LoadError>)> {
		let loader = self.navigator.loader();
		let mut results = Vec::new();
		for id in self.navigator.routes().feature_ids() {
			results.push((id.to_string(), loader.preload(id).await));
		}
		results
	}

	/// Lists the route table with each feature's load state.
	pub fn routes_listing(&self) -> String {
		let loader = self.navigator.loader();
		let mut out = String::new();
		for route in self.navigator.routes().all_routes() {
			let path = format!("/{}", route.pattern().pattern().trim_start_matches('/'));
			let line = match route.target() {
				RouteTarget::Feature { id, .. } => {
					let status = match loader.status(id) {
						None => "not loaded",
						Some(LoadStatus::Pending) => "loading",
						Some(LoadStatus::Resolved) => "loaded",
						Some(LoadStatus::Failed) => "failed",
					};
					format!("{path:<18} {id:<16} ({status})\n")
				}
				RouteTarget::Redirect(target) => format!("{path:<18} -> {target}\n"),
			};
			out.push_str(&line);
		}
		out
	}
}
