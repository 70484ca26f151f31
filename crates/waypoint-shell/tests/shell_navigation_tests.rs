//! End-to-end navigation through the demo shell.

use rstest::*;
use std::sync::Arc;
use std::time::Duration;
use waypoint_conf::{RouteEntry, Settings, SettingsError};
use waypoint_router::{LoadStatus, NavigationPhase};
use waypoint_shell::{Catalogue, Shell};

fn shell_with(settings: &Settings, latency: Duration) -> Shell {
	Shell::build(settings, Arc::new(Catalogue::sample()), latency).unwrap()
}

#[fixture]
fn shell() -> Shell {
	shell_with(&Settings::default(), Duration::ZERO)
}

#[rstest]
#[tokio::test]
async fn test_start_opens_product_list(shell: Shell) {
	let screen = shell.start().await;

	assert!(screen.starts_with("Waypoint Demo | [Products]  Users   Orders \n"));
	assert!(screen.contains("Laptop"));
	assert_eq!(
		shell.navigator().current_path().as_deref(),
		Some("/products")
	);
}

#[rstest]
#[tokio::test]
async fn test_visit_sequence(shell: Shell) {
	let screen = shell.visit("/users/42").await;
	assert!(screen.contains("[Users]"));
	assert!(screen.contains("Maria Garcia"));

	let screen = shell.visit("/orders/1002").await;
	assert!(screen.contains("[Orders]"));
	assert!(screen.contains("Order #1002"));
	assert_eq!(
		shell.navigator().mounted_feature().as_deref(),
		Some("order-details")
	);
}

#[rstest]
#[tokio::test]
async fn test_unknown_path(shell: Shell) {
	shell.visit("/products").await;
	let screen = shell.visit("/unknown").await;

	assert!(screen.ends_with("Page not found: /unknown"));
	assert!(!screen.contains('['));
	assert!(matches!(shell.navigator().phase(), NavigationPhase::Error(_)));
	assert_eq!(shell.navigator().render(), None);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_slow_fetch_is_superseded() {
	let shell = shell_with(&Settings::default(), Duration::from_millis(250));

	let (users, orders) = tokio::join!(shell.visit("/users"), shell.visit("/orders"));

	assert!(orders.contains("[Orders]"));
	assert!(!users.contains("[Users]"));
	assert_eq!(shell.navigator().mounted_feature().as_deref(), Some("order-list"));
	assert_eq!(
		shell.navigator().loader().status("user-list"),
		Some(LoadStatus::Resolved)
	);
}

#[rstest]
#[tokio::test]
async fn test_preload_and_routes_listing(shell: Shell) {
	let listing = shell.routes_listing();
	assert!(listing.contains("/products/:id"));
	assert!(listing.contains("(not loaded)"));
	assert_eq!(
		listing.lines().next(),
		Some("/products          product-list     (not loaded)")
	);
	assert_eq!(listing.lines().count(), 7);
	assert!(listing.lines().last().unwrap().ends_with("-> /products"));

	let results = shell.preload_all().await;
	assert_eq!(results.len(), 6);
	assert!(results.iter().all(|(_, result)| result.is_ok()));
	assert!(!shell.routes_listing().contains("(not loaded)"));
	assert_eq!(shell.navigator().loader().fetch_count(), 6);
}

#[rstest]
fn test_unknown_configured_feature() {
	let settings = Settings {
		routes: vec![RouteEntry::feature("reports", "report-list")],
		..Settings::default()
	};
	let err = Shell::build(&settings, Arc::new(Catalogue::sample()), Duration::ZERO).unwrap_err();
	assert!(matches!(err, SettingsError::UnknownFeature { .. }));
}

#[rstest]
#[tokio::test]
async fn test_custom_initial_path() {
	let settings = Settings {
		initial_path: "/users".to_string(),
		..Settings::default()
	};
	let shell = shell_with(&settings, Duration::ZERO);
	let screen = shell.start().await;
	assert!(screen.contains("[Users]"));
	assert!(screen.contains("Jean Dupont"));
}
