//! Layered settings and declarative route tables for Waypoint.
//!
//! Settings are merged from prioritised [`ConfigSource`]s: built-in defaults,
//! an optional TOML file, then `WAYPOINT_*` environment variables. Route
//! entries name feature ids that a [`FeatureRegistry`] binds to loaders.
//!
//! ```toml
//! initial_path = "/users"
//! max_redirects = 5
//! log_level = "waypoint_router=debug"
//!
//! [[routes]]
//! path = ""
//! redirect_to = "/users"
//!
//! [[routes]]
//! path = "users/:id"
//! feature = "user-details"
//! ```

pub mod builder;
pub mod error;
pub mod routes;
pub mod settings;
pub mod sources;

pub use builder::SettingsBuilder;
pub use error::SettingsError;
pub use routes::{EntryTarget, FeatureRegistry, RouteEntry, build_route_table, default_routes};
pub use settings::Settings;
pub use sources::{ConfigSource, DefaultSource, EnvSource, TomlFileSource};
