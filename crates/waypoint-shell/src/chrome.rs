//! Text chrome around the mounted view.

use colored::Colorize;
use waypoint_router::{NavigationError, NavigationPhase, NavigationSnapshot, split_path};

pub const BRAND: &str = "Waypoint Demo";

/// A navbar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
	pub label: &'static str,
	pub path: &'static str,
}

pub const NAV_LINKS: [NavLink; 3] = [
	NavLink {
		label: "Products",
		path: "/products",
	},
	NavLink {
		label: "Users",
		path: "/users",
	},
	NavLink {
		label: "Orders",
		path: "/orders",
	},
];

/// A link is active when its segments prefix the current path's segments.
pub fn is_link_active(link: &str, current: &str) -> bool {
	split_path(current).starts_with(&split_path(link))
}

/// Renders the navbar, bracketing the active link.
pub fn navbar(current_path: Option<&str>, styled: bool) -> String {
	let mut bar = if styled {
		BRAND.bold().to_string()
	} else {
		BRAND.to_string()
	};
	bar.push_str(" |");

	for link in &NAV_LINKS {
		let active = current_path.is_some_and(|current| is_link_active(link.path, current));
		let item = if active {
			let marked = format!("[{}]", link.label);
			if styled {
				marked.bold().underline().to_string()
			} else {
				marked
			}
		} else {
			format!(" {} ", link.label)
		};
		bar.push(' ');
		bar.push_str(&item);
	}
	bar
}

/// Describes the page body for phases without a mounted view.
pub fn placeholder(snapshot: &NavigationSnapshot) -> String {
	match &snapshot.phase {
		NavigationPhase::Idle => "Nothing to show yet.".to_string(),
		NavigationPhase::Resolving => format!(
			"Loading {}...",
			snapshot.pending_path.as_deref().unwrap_or_default()
		),
		NavigationPhase::Active => String::new(),
		NavigationPhase::Error(NavigationError::NotFound(path)) => {
			format!("Page not found: {path}")
		}
		NavigationPhase::Error(NavigationError::LoadFailed(err)) => {
			format!("This page could not be loaded: {err}")
		}
		NavigationPhase::Error(NavigationError::RedirectCycle { path, hops }) => {
			format!("Too many redirects opening {path} (gave up after {hops})")
		}
	}
}

/// Renders navbar, rule and body.
pub fn screen(snapshot: &NavigationSnapshot, body: Option<String>, styled: bool) -> String {
	let bar = navbar(snapshot.current_path.as_deref(), styled);
	let rule = "=".repeat(48);
	let body = body.unwrap_or_else(|| placeholder(snapshot));
	format!("{bar}\n{rule}\n{}", body.trim_end())
}
