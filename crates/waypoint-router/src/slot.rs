//! The single mount point for the active feature view.

use crate::feature::View;

/// A view mounted in the slot, tagged with the feature that built it.
pub struct MountedView {
	feature_id: String,
	view: Box<dyn View>,
}

impl MountedView {
	/// Returns the feature id of the mounted view.
	pub fn feature_id(&self) -> &str {
		&self.feature_id
	}

	/// Renders the mounted view.
	pub fn render(&self) -> String {
		self.view.render()
	}
}

impl std::fmt::Debug for MountedView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MountedView")
			.field("feature_id", &self.feature_id)
			.finish_non_exhaustive()
	}
}

/// Holds at most one mounted view.
///
/// Replacing or clearing the occupant calls its teardown hook first.
#[derive(Debug, Default)]
pub struct ViewSlot {
	occupant: Option<MountedView>,
}

impl ViewSlot {
	/// Creates an empty slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Retires the current occupant, if any, then installs `view`.
	pub fn mount(&mut self, feature_id: impl Into<String>, view: Box<dyn View>) {
		self.clear();
		self.occupant = Some(MountedView {
			feature_id: feature_id.into(),
			view,
		});
	}

	/// Retires the current occupant. Returns whether there was one.
	pub fn clear(&mut self) -> bool {
		match self.occupant.take() {
			Some(mut previous) => {
				tracing::debug!(feature = %previous.feature_id, "tearing down view");
				previous.view.teardown();
				true
			}
			None => false,
		}
	}

	/// Returns the current occupant.
	pub fn occupant(&self) -> Option<&MountedView> {
		self.occupant.as_ref()
	}

	/// Returns whether a view is mounted.
	pub fn is_occupied(&self) -> bool {
		self.occupant.is_some()
	}

	/// Returns the feature id of the mounted view.
	pub fn feature_id(&self) -> Option<&str> {
		self.occupant.as_ref().map(MountedView::feature_id)
	}

	/// Renders the mounted view.
	pub fn render(&self) -> Option<String> {
		self.occupant.as_ref().map(MountedView::render)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	struct Tracked {
		label: &'static str,
		teardowns: Arc<AtomicUsize>,
	}

	impl View for Tracked {
		fn render(&self) -> String {
			self.label.to_string()
		}

		fn teardown(&mut self) {
			self.teardowns.fetch_add(1, Ordering::SeqCst);
		}
	}

	#[rstest]
	fn test_mount_replaces_and_tears_down() {
		let teardowns = Arc::new(AtomicUsize::new(0));
		let mut slot = ViewSlot::new();
		assert!(!slot.is_occupied());

		slot.mount(
			"product-list",
			Box::new(Tracked {
				label: "products",
				teardowns: Arc::clone(&teardowns),
			}),
		);
		assert_eq!(slot.feature_id(), Some("product-list"));
		assert_eq!(teardowns.load(Ordering::SeqCst), 0);

		slot.mount(
			"user-list",
			Box::new(Tracked {
				label: "users",
				teardowns: Arc::clone(&teardowns),
			}),
		);
		assert_eq!(slot.render().as_deref(), Some("users"));
		assert_eq!(teardowns.load(Ordering::SeqCst), 1);
	}

	#[rstest]
	fn test_clear() {
		let teardowns = Arc::new(AtomicUsize::new(0));
		let mut slot = ViewSlot::new();
		assert!(!slot.clear());

		slot.mount(
			"order-list",
			Box::new(Tracked {
				label: "orders",
				teardowns: Arc::clone(&teardowns),
			}),
		);
		assert!(slot.clear());
		assert!(slot.occupant().is_none());
		assert_eq!(slot.render(), None);
		assert_eq!(teardowns.load(Ordering::SeqCst), 1);
	}
}
