//! Demo shell for the Waypoint router.
//!
//! Six features over an in-memory catalogue (product, user and order lists
//! and details), a text navbar, and a [`Shell`] driving the navigator.

pub mod catalogue;
pub mod chrome;
pub mod features;
pub mod links;
pub mod shell;

pub use catalogue::Catalogue;
pub use links::Links;
pub use shell::Shell;
