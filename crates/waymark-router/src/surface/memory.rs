//! In-memory navigation surface.
//!
//! Emulates the parts of a browser the router depends on: an address bar,
//! a native history list and an event queue. Location changes are queued
//! instead of delivered, and only reach the installed listeners when
//! [`MemorySurface::deliver_events`] is called, which models the browser
//! firing `hashchange`/`popstate` on a later turn of its event loop.

use super::{LeaveGuard, NavigationSurface, UriEvent, UriListener};
use crate::error::{RouterError, SurfaceError};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Default)]
struct Entry {
	pathname: String,
	search: String,
	hash: String,
	state: Option<Value>,
}

impl Entry {
	fn parse(url: &str) -> Self {
		let (rest, hash) = match url.split_once('#') {
			Some((rest, hash)) => (rest, format!("#{}", hash)),
			None => (url, String::new()),
		};
		let (pathname, search) = match rest.split_once('?') {
			Some((path, query)) => (path, format!("?{}", query)),
			None => (rest, String::new()),
		};
		let pathname = if pathname.starts_with('/') {
			pathname.to_string()
		} else {
			format!("/{}", pathname)
		};
		Self {
			pathname,
			search,
			hash,
			state: None,
		}
	}
}

#[derive(Default)]
struct MemoryState {
	entries: Vec<Entry>,
	index: usize,
	supports_history: bool,
	pending: VecDeque<UriEvent>,
	popstate: Option<UriListener>,
	hashchange: Option<UriListener>,
	leave_guard: Option<LeaveGuard>,
}

impl MemoryState {
	fn current(&self) -> &Entry {
		&self.entries[self.index]
	}

	fn push(&mut self, entry: Entry) {
		self.entries.truncate(self.index + 1);
		self.entries.push(entry);
		self.index = self.entries.len() - 1;
	}
}

/// Browser-like navigation surface backed by memory.
pub struct MemorySurface {
	state: RefCell<MemoryState>,
}

impl std::fmt::Debug for MemorySurface {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("MemorySurface")
			.field("url", &self.url())
			.field("history_len", &state.entries.len())
			.field("pending_events", &state.pending.len())
			.finish()
	}
}

impl Default for MemorySurface {
	fn default() -> Self {
		Self::new()
	}
}

impl MemorySurface {
	/// Creates a surface at `/` with native history support.
	pub fn new() -> Self {
		Self::with_url("/")
	}

	/// Creates a surface at `url` (path, optional `?query`, optional `#hash`).
	pub fn with_url(url: &str) -> Self {
		Self {
			state: RefCell::new(MemoryState {
				entries: vec![Entry::parse(url)],
				supports_history: true,
				..MemoryState::default()
			}),
		}
	}

	/// Disables `pushState`/`replaceState`, like a host without the History API.
	pub fn without_history(self) -> Self {
		self.state.borrow_mut().supports_history = false;
		self
	}

	/// The full current URL.
	pub fn url(&self) -> String {
		let state = self.state.borrow();
		let entry = state.current();
		format!("{}{}{}", entry.pathname, entry.search, entry.hash)
	}

	/// State stored with the current native history entry.
	pub fn state(&self) -> Option<Value> {
		self.state.borrow().current().state.clone()
	}

	/// Number of native history entries.
	pub fn history_len(&self) -> usize {
		self.state.borrow().entries.len()
	}

	/// Number of queued, undelivered events.
	pub fn pending_events(&self) -> usize {
		self.state.borrow().pending.len()
	}

	/// Returns `true` if a listener for `event` is installed.
	pub fn has_listener(&self, event: UriEvent) -> bool {
		let state = self.state.borrow();
		match event {
			UriEvent::PopState => state.popstate.is_some(),
			UriEvent::HashChange => state.hashchange.is_some(),
		}
	}

	/// Simulates the user entering a new hash in the address bar.
	///
	/// # Errors
	///
	/// Same as [`NavigationSurface::set_hash`].
	pub fn type_hash(&self, hash: &str) -> Result<(), SurfaceError> {
		self.set_hash(hash)
	}

	/// Simulates closing the tab: returns whether the leave prompt would be shown.
	///
	/// Returns `None` when no guard is installed.
	pub fn leave_prompt(&self) -> Option<bool> {
		let guard = self.state.borrow().leave_guard.clone();
		guard.map(|guard| guard())
	}

	/// Delivers queued events to their listeners in order.
	///
	/// Events queued by the listeners themselves are delivered in the same
	/// call. Events without a listener are dropped. Returns the number of
	/// events handed to a listener.
	///
	/// # Errors
	///
	/// Stops at the first listener error and returns it; later events stay queued.
	pub fn deliver_events(&self) -> Result<usize, RouterError> {
		let mut delivered = 0;
		loop {
			let listener = {
				let mut state = self.state.borrow_mut();
				let Some(event) = state.pending.pop_front() else {
					return Ok(delivered);
				};
				match event {
					UriEvent::PopState => state.popstate.clone(),
					UriEvent::HashChange => state.hashchange.clone(),
				}
			};
			if let Some(listener) = listener {
				delivered += 1;
				listener()?;
			}
		}
	}
}

impl NavigationSurface for MemorySurface {
	fn pathname(&self) -> String {
		self.state.borrow().current().pathname.clone()
	}

	fn search(&self) -> String {
		self.state.borrow().current().search.clone()
	}

	fn hash(&self) -> String {
		self.state.borrow().current().hash.clone()
	}

	fn supports_history(&self) -> bool {
		self.state.borrow().supports_history
	}

	fn set_hash(&self, hash: &str) -> Result<(), SurfaceError> {
		let hash = hash.strip_prefix('#').unwrap_or(hash);
		let hash = if hash.is_empty() {
			String::new()
		} else {
			format!("#{}", hash)
		};

		let mut state = self.state.borrow_mut();
		if state.current().hash == hash {
			return Ok(());
		}
		let entry = Entry {
			hash,
			state: None,
			..state.current().clone()
		};
		state.push(entry);
		state.pending.push_back(UriEvent::HashChange);
		Ok(())
	}

	fn push_state(&self, state: Option<&Value>, url: &str) -> Result<(), SurfaceError> {
		let mut surface = self.state.borrow_mut();
		if !surface.supports_history {
			return Err(SurfaceError::new("pushState", "History API is not available"));
		}
		let entry = Entry {
			state: state.cloned(),
			..Entry::parse(url)
		};
		surface.push(entry);
		Ok(())
	}

	fn replace_state(&self, state: Option<&Value>, url: &str) -> Result<(), SurfaceError> {
		let mut surface = self.state.borrow_mut();
		if !surface.supports_history {
			return Err(SurfaceError::new(
				"replaceState",
				"History API is not available",
			));
		}
		let index = surface.index;
		surface.entries[index] = Entry {
			state: state.cloned(),
			..Entry::parse(url)
		};
		Ok(())
	}

	fn go(&self, delta: i32) -> Result<(), SurfaceError> {
		let mut state = self.state.borrow_mut();
		let target = state.index as i64 + i64::from(delta);
		if delta == 0 || target < 0 || target >= state.entries.len() as i64 {
			return Ok(());
		}
		let previous_hash = state.current().hash.clone();
		state.index = target as usize;
		state.pending.push_back(UriEvent::PopState);
		if state.current().hash != previous_hash {
			state.pending.push_back(UriEvent::HashChange);
		}
		Ok(())
	}

	fn set_uri_listener(&self, event: UriEvent, listener: Option<UriListener>) {
		let mut state = self.state.borrow_mut();
		match event {
			UriEvent::PopState => state.popstate = listener,
			UriEvent::HashChange => state.hashchange = listener,
		}
	}

	fn set_leave_guard(&self, guard: Option<LeaveGuard>) {
		self.state.borrow_mut().leave_guard = guard;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;
	use std::rc::Rc;

	#[rstest]
	fn test_with_url_splits_parts() {
		let surface = MemorySurface::with_url("/app/users?x=1#top");
		assert_eq!(surface.pathname(), "/app/users");
		assert_eq!(surface.search(), "?x=1");
		assert_eq!(surface.hash(), "#top");
		assert_eq!(surface.url(), "/app/users?x=1#top");
	}

	#[rstest]
	fn test_set_hash_queues_event_only_on_change() {
		let surface = MemorySurface::new();
		surface.set_hash("a").unwrap();
		surface.set_hash("#a").unwrap();
		assert_eq!(surface.hash(), "#a");
		assert_eq!(surface.pending_events(), 1);
	}

	#[rstest]
	fn test_type_hash_behaves_like_set_hash() {
		let surface = MemorySurface::new().without_history();
		surface.type_hash("#typed").unwrap();
		assert_eq!(surface.url(), "/#typed");
		assert_eq!(surface.history_len(), 2);
		assert_eq!(surface.pending_events(), 1);
	}

	#[rstest]
	fn test_push_state_does_not_queue_event() {
		let surface = MemorySurface::new();
		surface
			.push_state(Some(&serde_json::json!(1)), "/users?page=2")
			.unwrap();
		assert_eq!(surface.url(), "/users?page=2");
		assert_eq!(surface.state(), Some(serde_json::json!(1)));
		assert_eq!(surface.history_len(), 2);
		assert_eq!(surface.pending_events(), 0);
	}

	#[rstest]
	fn test_replace_state_keeps_length() {
		let surface = MemorySurface::new();
		surface.replace_state(None, "/other").unwrap();
		assert_eq!(surface.url(), "/other");
		assert_eq!(surface.history_len(), 1);
	}

	#[rstest]
	fn test_without_history_rejects_push() {
		let surface = MemorySurface::new().without_history();
		assert!(!surface.supports_history());
		assert!(surface.push_state(None, "/x").is_err());
	}

	#[rstest]
	fn test_go_traverses_and_queues_popstate() {
		let surface = MemorySurface::new();
		surface.push_state(None, "/a").unwrap();
		surface.push_state(None, "/b").unwrap();

		surface.back().unwrap();
		assert_eq!(surface.pathname(), "/a");
		surface.go(-5).unwrap();
		assert_eq!(surface.pathname(), "/a");
		surface.forward().unwrap();
		assert_eq!(surface.pathname(), "/b");
		assert_eq!(surface.pending_events(), 2);
	}

	#[rstest]
	fn test_deliver_events_calls_listener() {
		// Arrange
		let surface = MemorySurface::new();
		let calls = Rc::new(Cell::new(0));
		let counter = Rc::clone(&calls);
		surface.set_uri_listener(
			UriEvent::HashChange,
			Some(Rc::new(move || -> Result<(), RouterError> {
				counter.set(counter.get() + 1);
				Ok(())
			})),
		);
		surface.set_hash("a").unwrap();
		surface.set_hash("b").unwrap();

		// Act
		let delivered = surface.deliver_events().unwrap();

		// Assert
		assert_eq!(delivered, 2);
		assert_eq!(calls.get(), 2);
		assert_eq!(surface.pending_events(), 0);
	}

	#[rstest]
	fn test_events_without_listener_are_dropped() {
		let surface = MemorySurface::new();
		surface.set_hash("a").unwrap();
		assert_eq!(surface.deliver_events().unwrap(), 0);
		assert_eq!(surface.pending_events(), 0);
	}

	#[rstest]
	fn test_leave_prompt() {
		let surface = MemorySurface::new();
		assert_eq!(surface.leave_prompt(), None);
		surface.set_leave_guard(Some(Rc::new(|| true)));
		assert_eq!(surface.leave_prompt(), Some(true));
	}
}
