//! Facade re-export tests

use rstest::*;
use std::sync::Arc;
use waypoint::prelude::*;

struct Orders;

impl Feature for Orders {
	fn instantiate(&self, params: &RouteParams) -> Box<dyn View> {
		Box::new(TextView::new(format!(
			"order {}",
			params.get("id").unwrap_or("list")
		)))
	}
}

#[rstest]
#[tokio::test]
async fn test_navigator_from_declarative_routes() {
	let settings = Settings {
		initial_path: "/orders/7".to_string(),
		routes: vec![
			RouteEntry::feature("orders", "order-list"),
			RouteEntry::feature("orders/:id", "order-details"),
		],
		..Settings::default()
	};
	let registry = FeatureRegistry::new()
		.register("order-list", Loader::ready(Arc::new(Orders)))
		.register("order-details", Loader::ready(Arc::new(Orders)));

	let table = settings.route_table(&registry).unwrap();
	let navigator = Navigator::new(table, settings.navigator_config());

	assert_eq!(navigator.start().await, Ok(NavigationOutcome::Mounted));
	assert_eq!(navigator.render().as_deref(), Some("order 7"));
	assert_eq!(
		navigator.navigate("/").await,
		Err(NavigationError::NotFound("/".to_string()))
	);
}

#[rstest]
fn test_router_module_exposes_matcher() {
	let table = waypoint::router::RouteTable::builder()
		.redirect("", "/")
		.build()
		.unwrap();
	let matcher = waypoint::PathMatcher::new(Arc::new(table)).with_max_redirects(2);
	assert!(matches!(
		matcher.match_path("/"),
		Err(waypoint::MatchError::RedirectCycle { hops: 2, .. })
	));
}
