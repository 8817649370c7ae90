//! Error types for client-side routing.
//!
//! Only conditions the caller has to react to are errors. A fragment that
//! matches no route, a route declined by the `secure` hook and a navigation
//! vetoed by an unload guard are ordinary outcomes of a dispatch and never
//! show up here.

use futures::task::SpawnError;

/// Error raised by application code inside a hook, handler or not-found callback.
///
/// The router carries it to the caller untouched.
pub type HookError = anyhow::Error;

/// Result type returned by hooks and handlers.
pub type HookResult = Result<(), HookError>;

/// Error reported by a [`NavigationSurface`](crate::surface::NavigationSurface).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed: {message}")]
pub struct SurfaceError {
	/// The surface operation that failed, e.g. `pushState`.
	pub operation: &'static str,
	/// Message reported by the platform.
	pub message: String,
}

impl SurfaceError {
	/// Creates a new surface error.
	pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
		Self {
			operation,
			message: message.into(),
		}
	}
}

/// Error type for router operations.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
	/// A route rule could not be compiled.
	#[error("Malformed route rule '{rule}': {reason}")]
	MalformedRule {
		/// The rule as supplied by the caller.
		rule: String,
		/// Why compilation failed.
		reason: String,
	},

	/// A hook or route handler failed.
	#[error("Route handler failed: {0}")]
	Handler(#[source] HookError),

	/// The navigation surface rejected an operation.
	#[error("Navigation failed: {0}")]
	Surface(#[from] SurfaceError),

	/// A deferred unload decision could not be scheduled.
	#[error("Failed to schedule unload decision: {0}")]
	Spawn(#[from] SpawnError),

	/// An unload guard deferred its answer but the router has no executor to await it.
	#[error("Unload guard returned a deferred decision but no local executor is configured")]
	NoExecutor,
}

impl RouterError {
	/// Returns `true` when the error originates from application code.
	pub fn is_handler_fault(&self) -> bool {
		matches!(self, Self::Handler(_))
	}
}
