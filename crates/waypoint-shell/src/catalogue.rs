//! In-memory catalogue backing the demo features.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
	pub id: u64,
	pub name: String,
	pub description: String,
	pub price_cents: u64,
	pub stock_quantity: u32,
	pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
	pub id: u64,
	pub username: String,
	pub email: String,
	pub full_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
	Pending,
	Confirmed,
	Shipped,
	Delivered,
	Cancelled,
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Self::Pending => "PENDING",
			Self::Confirmed => "CONFIRMED",
			Self::Shipped => "SHIPPED",
			Self::Delivered => "DELIVERED",
			Self::Cancelled => "CANCELLED",
		};
		f.write_str(label)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
	pub product_id: u64,
	pub product_name: String,
	pub quantity: u32,
	pub price_cents: u64,
}

impl OrderItem {
	pub fn subtotal_cents(&self) -> u64 {
		self.price_cents * u64::from(self.quantity)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
	pub id: u64,
	pub user_id: u64,
	pub status: OrderStatus,
	pub items: Vec<OrderItem>,
}

impl Order {
	pub fn total_cents(&self) -> u64 {
		self.items.iter().map(OrderItem::subtotal_cents).sum()
	}
}

/// Products, users and orders.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
	pub products: Vec<Product>,
	pub users: Vec<User>,
	pub orders: Vec<Order>,
}

impl Catalogue {
	/// A small fixed data set.
	pub fn sample() -> Self {
		let product = |id, name: &str, description: &str, price_cents, stock_quantity, category: &str| {
			Product {
				id,
				name: name.to_string(),
				description: description.to_string(),
				price_cents,
				stock_quantity,
				category: category.to_string(),
			}
		};
		let user = |id, username: &str, email: &str, full_name: &str| User {
			id,
			username: username.to_string(),
			email: email.to_string(),
			full_name: full_name.to_string(),
		};
		let item = |product: &Product, quantity| OrderItem {
			product_id: product.id,
			product_name: product.name.clone(),
			quantity,
			price_cents: product.price_cents,
		};

		let products = vec![
			product(1, "Laptop", "14-inch ultrabook", 129_900, 12, "Electronics"),
			product(2, "Headphones", "Noise-cancelling, over-ear", 19_950, 40, "Electronics"),
			product(3, "Desk Lamp", "Dimmable LED lamp", 3_499, 25, "Home"),
			product(4, "Notebook", "A5, dotted, 192 pages", 1_250, 300, "Stationery"),
		];
		let users = vec![
			user(1, "jdupont", "jean.dupont@example.com", "Jean Dupont"),
			user(2, "asmith", "alice.smith@example.com", "Alice Smith"),
			user(42, "mgarcia", "maria.garcia@example.com", "Maria Garcia"),
		];
		let orders = vec![
			Order {
				id: 1001,
				user_id: 1,
				status: OrderStatus::Shipped,
				items: vec![item(&products[0], 1), item(&products[3], 3)],
			},
			Order {
				id: 1002,
				user_id: 42,
				status: OrderStatus::Pending,
				items: vec![item(&products[1], 2)],
			},
			Order {
				id: 1003,
				user_id: 2,
				status: OrderStatus::Delivered,
				items: vec![item(&products[2], 1), item(&products[3], 1)],
			},
		];

		Self {
			products,
			users,
			orders,
		}
	}

	pub fn product(&self, id: u64) -> Option<&Product> {
		self.products.iter().find(|p| p.id == id)
	}

	pub fn user(&self, id: u64) -> Option<&User> {
		self.users.iter().find(|u| u.id == id)
	}

	pub fn order(&self, id: u64) -> Option<&Order> {
		self.orders.iter().find(|o| o.id == id)
	}

	pub fn orders_for(&self, user_id: u64) -> impl Iterator<Item = &Order> {
		self.orders.iter().filter(move |o| o.user_id == user_id)
	}
}

/// Formats an amount in cents as `$1299.00`.
pub fn format_price(cents: u64) -> String {
	format!("${}.{:02}", cents / 100, cents % 100)
}
