//! Hash Mode Integration Tests
//!
//! Drives a [`Router`] in hash mode, where the router keeps its own history
//! stack and every dispatch waits for the surface's `hashchange` event.
//!
//! Test Categories:
//! - Category 1: Dispatch on Hash Change
//! - Category 2: History Stack
//! - Category 3: Traversal
//! - Category 4: Vetoed Navigation

use regex::Regex;
use rstest::{fixture, rstest};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use waymark_router::surface::MemorySurface;
use waymark_router::{
	HookResult, NavigateOptions, Page, RouteOptions, Router, RouterConfig, RouterMode, UriEvent,
};

/// Catch-all route recording every dispatched fragment.
fn catch_all() -> Regex {
	Regex::new(r"^(.*)$").unwrap()
}

struct Harness {
	router: Router,
	surface: Rc<MemorySurface>,
	log: Rc<RefCell<Vec<String>>>,
}

impl Harness {
	fn new(surface: MemorySurface, config: RouterConfig) -> Self {
		let surface = Rc::new(surface);
		let router = Router::new(config, surface.clone()).unwrap();
		let log = Rc::new(RefCell::new(Vec::new()));
		let calls = Rc::clone(&log);
		router
			.add(
				catch_all(),
				move |page: &Page, _: &[String]| -> HookResult {
					calls.borrow_mut().push(page.uri.clone());
					Ok(())
				},
				RouteOptions::default(),
			)
			.unwrap();
		router.add_uri_listener();
		Self {
			router,
			surface,
			log,
		}
	}

	/// Navigates and lets the surface fire `hashchange`.
	fn visit(&self, path: &str) {
		self.router.navigate_to(path, NavigateOptions::new()).unwrap();
		self.surface.deliver_events().unwrap();
	}

	fn stack(&self) -> Vec<String> {
		self.router
			.history()
			.entries()
			.iter()
			.map(|entry| entry.path.clone())
			.collect()
	}

	fn cursor(&self) -> Option<usize> {
		self.router.history().cursor()
	}

	fn calls(&self) -> Vec<String> {
		self.log.borrow().clone()
	}
}

/// Router in hash mode on a host without the History API, started at `#home`.
#[fixture]
fn harness() -> Harness {
	let h = Harness::new(
		MemorySurface::with_url("/#home").without_history(),
		RouterConfig::new(),
	);
	h.router.check().unwrap();
	h
}

// ============================================================================
// Category 1: Dispatch on Hash Change
// ============================================================================

/// Tests hash mode is forced without a History API
#[rstest]
fn test_hash_mode_forced(harness: Harness) {
	assert_eq!(harness.router.mode(), RouterMode::Hash);
	assert!(harness.surface.has_listener(UriEvent::HashChange));
	assert!(!harness.surface.has_listener(UriEvent::PopState));
}

/// Tests hash mode can be selected explicitly
#[rstest]
fn test_hash_mode_configured() {
	let h = Harness::new(
		MemorySurface::new(),
		RouterConfig::new().with_mode(RouterMode::Hash),
	);
	assert_eq!(h.router.mode(), RouterMode::Hash);
}

/// Tests navigate_to writes the hash and dispatches on the change event
#[rstest]
fn test_navigate_dispatches_on_hashchange(harness: Harness) {
	// Act
	harness
		.router
		.navigate_to("/inbox/", NavigateOptions::new())
		.unwrap();

	// Assert
	assert_eq!(harness.surface.url(), "/#inbox");
	assert_eq!(harness.calls(), vec!["home"]);

	harness.surface.deliver_events().unwrap();
	assert_eq!(harness.calls(), vec!["home", "inbox"]);
}

/// Tests the hash query is split off the fragment
#[rstest]
fn test_hash_query(harness: Harness) {
	harness.visit("item/5?tab=notes&raw");

	let page = harness.router.current_page().unwrap();
	assert_eq!(page.uri, "item/5");
	assert_eq!(page.query_param("tab").and_then(|v| v.as_str()), Some("notes"));
	assert!(page.query_param("raw").is_some_and(|v| v.is_flag()));
	assert_eq!(harness.router.current_fragment(), "item/5");
}

/// Tests a hash typed by the user is dispatched
#[rstest]
fn test_typed_hash(harness: Harness) {
	harness.surface.type_hash("#settings").unwrap();
	harness.surface.deliver_events().unwrap();

	assert_eq!(harness.calls(), vec!["home", "settings"]);
}

/// Tests state travels with the hash navigation
#[rstest]
fn test_state_reaches_page(harness: Harness) {
	harness
		.router
		.navigate_to("compose", NavigateOptions::new().with_state(json!({"to": "ana"})))
		.unwrap();
	harness.surface.deliver_events().unwrap();

	let page = harness.router.current_page().unwrap();
	assert_eq!(page.state, Some(json!({"to": "ana"})));
	assert_eq!(harness.router.history().current().unwrap().state, Some(json!({"to": "ana"})));
}

/// Tests a silent hash navigation swallows exactly one event
#[rstest]
fn test_silent_hash_navigation(harness: Harness) {
	harness
		.router
		.navigate_to("quiet", NavigateOptions::new().silent())
		.unwrap();
	harness.surface.deliver_events().unwrap();
	harness.visit("loud");

	assert_eq!(harness.calls(), vec!["home", "loud"]);
	assert_eq!(harness.stack(), vec!["home", "loud"]);
}

// ============================================================================
// Category 2: History Stack
// ============================================================================

/// Tests every dispatch records an entry
#[rstest]
fn test_stack_records_dispatches(harness: Harness) {
	harness.visit("a");
	harness.visit("b");

	assert_eq!(harness.stack(), vec!["home", "a", "b"]);
	assert_eq!(harness.cursor(), Some(2));
}

/// Tests unmatched fragments are recorded too
#[rstest]
fn test_not_found_is_recorded() {
	let h = Harness::new(
		MemorySurface::with_url("/#start").without_history(),
		RouterConfig::new(),
	);
	assert!(h.router.remove(catch_all()).unwrap());
	h.router.check().unwrap();
	h.visit("nowhere");

	assert!(h.calls().is_empty());
	assert_eq!(h.stack(), vec!["start", "nowhere"]);
	assert_eq!(h.router.current_page().unwrap().uri, "");
}

/// Tests navigating after going back to index k leaves k + 2 entries
#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn test_branch_after_go_overwrites_forward_entries(harness: Harness, #[case] k: i32) {
	// Arrange
	for path in ["a", "b", "c"] {
		harness.visit(path);
	}

	// Act
	harness.router.go(k).unwrap();
	harness.surface.deliver_events().unwrap();
	harness.visit("branch");

	// Assert
	let stack = harness.stack();
	assert_eq!(stack.len(), k as usize + 2);
	assert_eq!(stack.last().map(String::as_str), Some("branch"));
	assert_eq!(harness.cursor(), Some(k as usize + 1));
}

/// Tests redirect_to replaces the top entry instead of growing the stack
#[rstest]
fn test_redirect_replaces_top_entry(harness: Harness) {
	harness.visit("login");

	harness
		.router
		.redirect_to("dashboard", NavigateOptions::new())
		.unwrap();
	harness.surface.deliver_events().unwrap();

	assert_eq!(harness.stack(), vec!["home", "dashboard"]);
	assert_eq!(harness.calls(), vec!["home", "login", "dashboard"]);
}

/// Tests refresh does not extend the stack
#[rstest]
fn test_refresh_keeps_stack(harness: Harness) {
	harness.visit("a");

	harness.router.refresh().unwrap();

	assert_eq!(harness.stack(), vec!["home", "a"]);
	assert_eq!(harness.calls(), vec!["home", "a", "a"]);
}

// ============================================================================
// Category 3: Traversal
// ============================================================================

/// Tests back and forward move along the stack without recording
#[rstest]
fn test_back_and_forward(harness: Harness) {
	// Arrange
	harness.visit("a");
	harness.visit("b");

	// Act
	harness.router.back().unwrap();
	harness.surface.deliver_events().unwrap();

	// Assert
	assert_eq!(harness.router.current_page().unwrap().uri, "a");
	assert_eq!(harness.stack(), vec!["home", "a", "b"]);
	assert_eq!(harness.cursor(), Some(1));

	harness.router.forward().unwrap();
	harness.surface.deliver_events().unwrap();
	assert_eq!(harness.router.current_page().unwrap().uri, "b");
	assert_eq!(harness.cursor(), Some(2));
}

/// Tests traversal past either end is ignored
#[rstest]
#[case(-1)]
#[case(3)]
#[case(100)]
fn test_go_out_of_range_is_noop(harness: Harness, #[case] index: i32) {
	harness.visit("a");
	harness.visit("b");

	harness.router.go(index).unwrap();

	assert_eq!(harness.surface.pending_events(), 0);
	assert_eq!(harness.cursor(), Some(2));
	assert!(!harness.router.history().is_holding());
}

/// Tests back at the first entry and forward at the last are ignored
#[rstest]
fn test_back_forward_at_edges(harness: Harness) {
	harness.router.back().unwrap();
	harness.router.forward().unwrap();

	assert_eq!(harness.surface.pending_events(), 0);
	assert_eq!(harness.calls(), vec!["home"]);
}

/// Tests that going to the current index leaves the skip armed
///
/// No `hashchange` fires, so the next unrelated navigation is not recorded.
#[rstest]
fn test_go_to_current_index_skips_next_record(harness: Harness) {
	// Arrange
	harness.visit("a");

	// Act
	harness.router.go(1).unwrap();
	harness.surface.deliver_events().unwrap();

	// Assert
	assert!(harness.router.history().is_holding());
	harness.visit("b");
	assert_eq!(harness.calls(), vec!["home", "a", "b"]);
	assert_eq!(harness.stack(), vec!["home", "a"]);
}

// ============================================================================
// Category 4: Vetoed Navigation
// ============================================================================

/// Hash-mode router on `#editor` (after `#home`) whose editor page refuses
/// to be left while `locked` is set.
fn locked_editor(locked: &Rc<Cell<bool>>) -> (Router, Rc<MemorySurface>) {
	let surface = Rc::new(MemorySurface::with_url("/#home").without_history());
	let router = Router::new(RouterConfig::new(), surface.clone()).unwrap();
	let lock = Rc::clone(locked);
	router
		.add(
			"editor",
			|_: &Page, _: &[String]| -> HookResult { Ok(()) },
			RouteOptions::new().with_unload_callback(move |_: &Page, _: bool| !lock.get()),
		)
		.unwrap()
		.add(
			catch_all(),
			|_: &Page, _: &[String]| -> HookResult { Ok(()) },
			RouteOptions::default(),
		)
		.unwrap();
	router.add_uri_listener().check().unwrap();
	router.navigate_to("editor", NavigateOptions::new()).unwrap();
	surface.deliver_events().unwrap();
	(router, surface)
}

/// Tests a vetoed back leaves the cursor on the current entry
#[rstest]
fn test_vetoed_back_keeps_stack_position() {
	// Arrange
	let locked = Rc::new(Cell::new(true));
	let (router, surface) = locked_editor(&locked);

	// Act
	router.back().unwrap();
	surface.deliver_events().unwrap();

	// Assert
	let history = router.history();
	assert_eq!(surface.url(), "/#editor");
	assert_eq!(router.current_page().unwrap().uri, "editor");
	assert_eq!(history.cursor(), Some(1));
	assert!(!history.is_holding());

	locked.set(false);
	router.navigate_to("next", NavigateOptions::new()).unwrap();
	surface.deliver_events().unwrap();
	let paths: Vec<String> = router
		.history()
		.entries()
		.iter()
		.map(|entry| entry.path.clone())
		.collect();
	assert_eq!(paths, vec!["home", "editor", "next"]);
	assert_eq!(router.history().cursor(), Some(2));
}

/// Tests a vetoed redirect does not turn the next navigation into a replace
#[rstest]
fn test_vetoed_redirect_keeps_add_mode() {
	// Arrange
	let locked = Rc::new(Cell::new(true));
	let (router, surface) = locked_editor(&locked);

	// Act
	router.redirect_to("login", NavigateOptions::new()).unwrap();
	surface.deliver_events().unwrap();
	locked.set(false);
	router.navigate_to("next", NavigateOptions::new()).unwrap();
	surface.deliver_events().unwrap();

	// Assert
	let paths: Vec<String> = router
		.history()
		.entries()
		.iter()
		.map(|entry| entry.path.clone())
		.collect();
	assert_eq!(paths, vec!["home", "editor", "next"]);
}
