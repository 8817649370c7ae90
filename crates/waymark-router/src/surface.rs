//! Navigation surface abstraction.
//!
//! The router never touches `window.location` or `window.history` directly.
//! Everything it reads from or writes to the address bar goes through
//! [`NavigationSurface`], so the dispatcher can run against
//! [`MemorySurface`] in tests and on native targets, and against
//! [`BrowserSurface`](browser::BrowserSurface) in the browser.

use crate::error::{RouterError, SurfaceError};
use serde_json::Value;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod memory;

pub use memory::MemorySurface;

/// Callback run when the surface reports a location change.
pub type UriListener = Rc<dyn Fn() -> Result<(), RouterError>>;

/// Callback consulted when the document is about to unload.
///
/// Returns `true` if the user should be asked to confirm leaving.
pub type LeaveGuard = Rc<dyn Fn() -> bool>;

/// Location change notifications a surface can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriEvent {
	/// Native history traversal (`popstate`).
	PopState,
	/// Fragment change (`hashchange`).
	HashChange,
}

/// Address bar and native history of the host.
///
/// Change notifications are asynchronous: writing the hash must not call the
/// listener from inside [`set_hash`](Self::set_hash).
pub trait NavigationSurface {
	/// Path component of the current URL, still percent-encoded.
	fn pathname(&self) -> String;

	/// Query component of the current URL, including the leading `?` if any.
	fn search(&self) -> String;

	/// Fragment of the current URL, including the leading `#` if any.
	fn hash(&self) -> String;

	/// Returns `true` if `pushState`/`replaceState` are available.
	fn supports_history(&self) -> bool;

	/// Sets the fragment; the surface reports [`UriEvent::HashChange`] later if it changed.
	fn set_hash(&self, hash: &str) -> Result<(), SurfaceError>;

	/// Adds a native history entry without reporting a change.
	fn push_state(&self, state: Option<&Value>, url: &str) -> Result<(), SurfaceError>;

	/// Replaces the current native history entry without reporting a change.
	fn replace_state(&self, state: Option<&Value>, url: &str) -> Result<(), SurfaceError>;

	/// Traverses native history by `delta` entries.
	fn go(&self, delta: i32) -> Result<(), SurfaceError>;

	/// Traverses one entry back.
	fn back(&self) -> Result<(), SurfaceError> {
		self.go(-1)
	}

	/// Traverses one entry forward.
	fn forward(&self) -> Result<(), SurfaceError> {
		self.go(1)
	}

	/// Installs or removes the listener for `event`.
	fn set_uri_listener(&self, event: UriEvent, listener: Option<UriListener>);

	/// Installs or removes the page-leave guard.
	fn set_leave_guard(&self, guard: Option<LeaveGuard>);
}
