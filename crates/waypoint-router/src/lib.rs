//! Path-keyed navigation between lazily loaded features.
//!
//! A [`RouteTable`] binds path patterns to feature ids. The [`PathMatcher`]
//! resolves a path to the first matching route, following redirects; the
//! [`FeatureLoader`] fetches each feature at most once; and the [`Navigator`]
//! ties both together, mounting the resolved view into its [`ViewSlot`].
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use waypoint_router::{
//! 	Feature, Loader, NavigationOutcome, Navigator, NavigatorConfig, RouteParams, RouteTable,
//! 	TextView, View,
//! };
//!
//! struct UserDetails;
//!
//! impl Feature for UserDetails {
//! 	fn instantiate(&self, params: &RouteParams) -> Box<dyn View> {
//! 		Box::new(TextView::new(format!("user {}", params.get("id").unwrap_or("?"))))
//! 	}
//! }
//!
//! # futures::executor::block_on(async {
//! let table = RouteTable::builder()
//! 	.register("users/:id", "user-details", Loader::ready(Arc::new(UserDetails)))
//! 	.redirect("", "/users/1")
//! 	.build()
//! 	.unwrap();
//! let navigator = Navigator::new(table, NavigatorConfig::default());
//!
//! assert_eq!(navigator.navigate("/users/42").await, Ok(NavigationOutcome::Mounted));
//! assert_eq!(navigator.render().as_deref(), Some("user 42"));
//! # });
//! ```

pub mod error;
pub mod feature;
pub mod loader;
pub mod matcher;
pub mod navigator;
pub mod params;
pub mod pattern;
pub mod route;
pub mod slot;

pub use error::{LoadError, MatchError, NavigationError, ParamError, PatternError, ReverseError};
pub use feature::{Feature, FeatureFetch, Loader, TextView, View};
pub use loader::{FeatureLoader, LoadStatus};
pub use matcher::{DEFAULT_MAX_REDIRECTS, PathMatcher, RouteMatch};
pub use navigator::{
	NavigationOutcome, NavigationPhase, NavigationSnapshot, Navigator, NavigatorConfig,
	SubscriptionId,
};
pub use params::RouteParams;
pub use pattern::{RoutePattern, Segment, canonical_path, split_path};
pub use route::{Route, RouteTable, RouteTableBuilder, RouteTarget};
pub use slot::{MountedView, ViewSlot};
