//! Per-dispatch page descriptor and per-route options.

use crate::query::{Query, QueryValue};
use futures::future::LocalBoxFuture;
use serde_json::Value;
use std::rc::Rc;

/// Answer of an unload guard.
pub enum UnloadDecision {
	/// Immediate answer: `true` lets the navigation proceed.
	Ready(bool),
	/// Answer settled later, e.g. after a confirmation dialog.
	Deferred(LocalBoxFuture<'static, bool>),
}

impl UnloadDecision {
	/// Wraps a future as a deferred decision.
	pub fn deferred<F>(future: F) -> Self
	where
		F: std::future::Future<Output = bool> + 'static,
	{
		Self::Deferred(Box::pin(future))
	}
}

impl From<bool> for UnloadDecision {
	fn from(allow: bool) -> Self {
		Self::Ready(allow)
	}
}

impl std::fmt::Debug for UnloadDecision {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Ready(allow) => f.debug_tuple("Ready").field(allow).finish(),
			Self::Deferred(_) => f.write_str("Deferred(..)"),
		}
	}
}

/// Guard consulted before navigating away from a page.
///
/// Receives the page being left and whether the router can wait for a
/// deferred answer. With `is_async == false` (the browser is about to
/// unload the document) only an immediate `Ready(true)` avoids the leave
/// prompt.
pub type UnloadCallback = Rc<dyn Fn(&Page, bool) -> UnloadDecision>;

/// Per-route options.
#[derive(Clone, Default)]
pub struct RouteOptions {
	/// Leave-confirmation guard for pages dispatched through this route.
	pub unload_callback: Option<UnloadCallback>,
}

impl RouteOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the unload guard.
	pub fn with_unload_callback<F, D>(mut self, callback: F) -> Self
	where
		F: Fn(&Page, bool) -> D + 'static,
		D: Into<UnloadDecision>,
	{
		self.unload_callback = Some(Rc::new(move |page: &Page, is_async: bool| -> UnloadDecision {
			callback(page, is_async).into()
		}));
		self
	}
}

impl std::fmt::Debug for RouteOptions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteOptions")
			.field("has_unload_callback", &self.unload_callback.is_some())
			.finish()
	}
}

/// Descriptor of the page produced by one successful dispatch.
///
/// Hooks and handlers receive it by reference; the router replaces it on
/// the next dispatch.
#[derive(Debug, Clone, Default)]
pub struct Page {
	/// Fragment the page was dispatched for.
	pub uri: String,
	/// Parsed query parameters.
	pub query: Query,
	/// Captured groups of the matching rule, in order.
	pub params: Vec<String>,
	/// State staged by the navigation that led here.
	pub state: Option<Value>,
	/// Options of the matching route.
	pub options: RouteOptions,
	pub(crate) query_string: String,
}

impl Page {
	pub(crate) fn new(
		uri: impl Into<String>,
		query_string: impl Into<String>,
		params: Vec<String>,
		state: Option<Value>,
		options: RouteOptions,
	) -> Self {
		let query_string = query_string.into();
		Self {
			uri: uri.into(),
			query: crate::query::parse_query(&query_string),
			params,
			state,
			options,
			query_string,
		}
	}

	/// Placeholder page set when no route matched.
	pub(crate) fn not_found() -> Self {
		Self::default()
	}

	/// Raw query string the page was dispatched with, without `?`.
	pub fn query_string(&self) -> &str {
		&self.query_string
	}

	/// Looks up a query parameter.
	pub fn query_param(&self, key: &str) -> Option<&QueryValue> {
		self.query.get(key)
	}

	/// Returns the captured group at `index`.
	pub fn param(&self, index: usize) -> Option<&str> {
		self.params.get(index).map(String::as_str)
	}

	/// Returns `true` if the page declared an unload guard.
	pub fn has_unload_callback(&self) -> bool {
		self.options.unload_callback.is_some()
	}
}
