//! The six catalogue features and their loaders.

use crate::catalogue::{Catalogue, format_price};
use crate::links::Links;
use std::sync::Arc;
use std::time::Duration;
use waypoint_conf::FeatureRegistry;
use waypoint_router::{Feature, LoadError, Loader, RouteParams, View};

/// A titled block of text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
	title: String,
	lines: Vec<String>,
}

impl Page {
	fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			lines: Vec::new(),
		}
	}

	fn line(mut self, line: impl Into<String>) -> Self {
		self.lines.push(line.into());
		self
	}

	fn lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
		self.lines.extend(lines);
		self
	}
}

impl View for Page {
	fn render(&self) -> String {
		let mut out = format!("{}\n{}\n", self.title, "-".repeat(self.title.chars().count()));
		for line in &self.lines {
			out.push_str(line);
			out.push('\n');
		}
		out
	}
}

/// Shared state of every catalogue feature.
#[derive(Debug, Clone)]
struct Context {
	catalogue: Arc<Catalogue>,
	links: Links,
}

impl Context {
	fn link(&self, feature_id: &str, id: u64) -> String {
		self.links
			.to_id(feature_id, id)
			.map(|path| format!("  -> {path}"))
			.unwrap_or_default()
	}

	/// Reads the `id` parameter, or returns the page to show instead.
	fn id(&self, params: &RouteParams, kind: &str) -> Result<u64, Box<dyn View>> {
		params.parse::<u64>("id").map_err(|err| {
			tracing::debug!(error = %err, "rejecting {kind} id");
			Box::new(Page::new(format!("{kind} not found")).line(err.to_string())) as Box<dyn View>
		})
	}

	fn back(&self, feature_id: &str, label: &str) -> String {
		match self.links.to(feature_id) {
			Some(path) => format!("Back to {label}: {path}"),
			None => String::new(),
		}
	}
}

struct ProductList(Context);

impl Feature for ProductList {
	fn instantiate(&self, _params: &RouteParams) -> Box<dyn View> {
		let cx = &self.0;
		Box::new(Page::new("Products").lines(cx.catalogue.products.iter().map(|p| {
			format!(
				"#{:<4} {:<12} {:>10}  {}{}",
				p.id,
				p.name,
				format_price(p.price_cents),
				p.category,
				cx.link("product-details", p.id)
			)
		})))
	}
}

struct ProductDetails(Context);

impl Feature for ProductDetails {
	fn instantiate(&self, params: &RouteParams) -> Box<dyn View> {
		let cx = &self.0;
		let id = match cx.id(params, "Product") {
			Ok(id) => id,
			Err(page) => return page,
		};
		let Some(product) = cx.catalogue.product(id) else {
			return Box::new(Page::new("Product not found").line(format!("No product with id {id}")));
		};
		Box::new(
			Page::new(product.name.clone())
				.line(product.description.clone())
				.line(format!("Price:    {}", format_price(product.price_cents)))
				.line(format!("In stock: {}", product.stock_quantity))
				.line(format!("Category: {}", product.category))
				.line(cx.back("product-list", "products")),
		)
	}
}

struct UserList(Context);

impl Feature for UserList {
	fn instantiate(&self, _params: &RouteParams) -> Box<dyn View> {
		let cx = &self.0;
		Box::new(Page::new("Users").lines(cx.catalogue.users.iter().map(|u| {
			format!(
				"#{:<4} {:<10} {}{}",
				u.id,
				u.username,
				u.full_name,
				cx.link("user-details", u.id)
			)
		})))
	}
}

struct UserDetails(Context);

impl Feature for UserDetails {
	fn instantiate(&self, params: &RouteParams) -> Box<dyn View> {
		let cx = &self.0;
		let id = match cx.id(params, "User") {
			Ok(id) => id,
			Err(page) => return page,
		};
		let Some(user) = cx.catalogue.user(id) else {
			return Box::new(Page::new("User not found").line(format!("No user with id {id}")));
		};
		let orders = cx.catalogue.orders_for(user.id).map(|o| {
			format!(
				"  order #{} {} {}{}",
				o.id,
				o.status,
				format_price(o.total_cents()),
				cx.link("order-details", o.id)
			)
		});
		Box::new(
			Page::new(user.full_name.clone())
				.line(format!("Username: {}", user.username))
				.line(format!("Email:    {}", user.email))
				.line("Orders:")
				.lines(orders)
				.line(cx.back("user-list", "users")),
		)
	}
}

struct OrderList(Context);

impl Feature for OrderList {
	fn instantiate(&self, _params: &RouteParams) -> Box<dyn View> {
		let cx = &self.0;
		Box::new(Page::new("Orders").lines(cx.catalogue.orders.iter().map(|o| {
			format!(
				"#{:<5} user {:<4} {:<10} {:>10}{}",
				o.id,
				o.user_id,
				o.status.to_string(),
				format_price(o.total_cents()),
				cx.link("order-details", o.id)
			)
		})))
	}
}

struct OrderDetails(Context);

impl Feature for OrderDetails {
	fn instantiate(&self, params: &RouteParams) -> Box<dyn View> {
		let cx = &self.0;
		let id = match cx.id(params, "Order") {
			Ok(id) => id,
			Err(page) => return page,
		};
		let Some(order) = cx.catalogue.order(id) else {
			return Box::new(Page::new("Order not found").line(format!("No order with id {id}")));
		};
		let customer = cx
			.catalogue
			.user(order.user_id)
			.map_or_else(|| format!("user {}", order.user_id), |u| u.full_name.clone());
		let items = order.items.iter().map(|item| {
			format!(
				"  {} x {:<12} {:>10}{}",
				item.quantity,
				item.product_name,
				format_price(item.subtotal_cents()),
				cx.link("product-details", item.product_id)
			)
		});
		Box::new(
			Page::new(format!("Order #{}", order.id))
				.line(format!("Customer: {customer}{}", cx.link("user-details", order.user_id)))
				.line(format!("Status:   {}", order.status))
				.line("Items:")
				.lines(items)
				.line(format!("Total:    {}", format_price(order.total_cents())))
				.line(cx.back("order-list", "orders")),
		)
	}
}

/// Registers the six catalogue features.
///
/// Each loader waits `latency` before handing out its feature, standing in
/// for a network fetch of the feature's code.
pub fn registry(catalogue: Arc<Catalogue>, links: Links, latency: Duration) -> FeatureRegistry {
	let cx = Context { catalogue, links };
	let features: [(&str, Arc<dyn Feature>); 6] = [
		("product-list", Arc::new(ProductList(cx.clone()))),
		("product-details", Arc::new(ProductDetails(cx.clone()))),
		("user-list", Arc::new(UserList(cx.clone()))),
		("user-details", Arc::new(UserDetails(cx.clone()))),
		("order-list", Arc::new(OrderList(cx.clone()))),
		("order-details", Arc::new(OrderDetails(cx))),
	];

	features
		.into_iter()
		.fold(FeatureRegistry::new(), |registry, (id, feature)| {
			registry.register(id, delayed(id, feature, latency))
		})
}

fn delayed(id: &'static str, feature: Arc<dyn Feature>, latency: Duration) -> Loader {
	Loader::new(move || {
		let feature = Arc::clone(&feature);
		async move {
			if !latency.is_zero() {
				tokio::time::sleep(latency).await;
			}
			tracing::debug!(feature = id, ?latency, "feature code fetched");
			Ok::<_, LoadError>(feature)
		}
	})
}
