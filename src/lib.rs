//! # Waypoint
//!
//! Path-keyed navigation between lazily loaded features.
//!
//! A route table binds path patterns such as `users/:id` to feature ids. A
//! navigation matches the path (following redirects), fetches the feature at
//! most once, and mounts the view it builds into a single view slot. A newer
//! navigation supersedes one still waiting on its fetch.
//!
//! ## Feature Flags
//!
//! - `conf` (default) - Layered settings (defaults, TOML file, `WAYPOINT_*`
//!   environment variables) and route tables built from declarative entries
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//! use waypoint::prelude::*;
//!
//! struct Products;
//!
//! impl Feature for Products {
//! 	fn instantiate(&self, _params: &RouteParams) -> Box<dyn View> {
//! 		Box::new(TextView::new("products"))
//! 	}
//! }
//!
//! # block_on(async {
//! let table = RouteTable::builder()
//! 	.register("products", "product-list", Loader::ready(Arc::new(Products)))
//! 	.redirect("", "/products")
//! 	.build()
//! 	.unwrap();
//! let navigator = Navigator::new(table, NavigatorConfig::default());
//!
//! navigator.start().await.unwrap();
//! assert_eq!(navigator.current_path().as_deref(), Some("/products"));
//! # });
//! # fn block_on<F: std::future::Future>(f: F) -> F::Output {
//! # 	tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

/// Route table, matcher, feature loader and navigator.
pub mod router {
	pub use waypoint_router::*;
}

/// Settings and declarative routes.
#[cfg(feature = "conf")]
pub mod conf {
	pub use waypoint_conf::*;
}

pub use waypoint_router::{
	Feature, FeatureLoader, LoadError, Loader, MatchError, NavigationError, NavigationOutcome,
	NavigationPhase, NavigationSnapshot, Navigator, NavigatorConfig, PathMatcher, RouteMatch,
	RouteParams, RouteTable, TextView, View,
};

#[cfg(feature = "conf")]
pub use waypoint_conf::{FeatureRegistry, RouteEntry, Settings, SettingsError};

/// Commonly used types.
pub mod prelude {
	pub use waypoint_router::{
		Feature, Loader, NavigationError, NavigationOutcome, NavigationPhase, Navigator,
		NavigatorConfig, RouteParams, RouteTable, TextView, View,
	};

	#[cfg(feature = "conf")]
	pub use waypoint_conf::{FeatureRegistry, RouteEntry, Settings};
}
