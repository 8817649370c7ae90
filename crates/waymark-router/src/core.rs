//! Core Router Implementation.
//!
//! [`Router`] owns the route table, runs the dispatch state machine and
//! exposes the navigation operations. It is a cheap handle: clones share
//! the same route table, current page and history.
//!
//! A dispatch goes through these phases:
//!
//! ```text
//! Idle -> Resolving -> Matching -> Dispatching -> Idle
//!   \-> AwaitingUnloadDecision -> (Resolving ... | revert) -> Idle
//! ```
//!
//! Triggers that arrive while the router is not idle (including navigations
//! issued from inside a handler) are queued and processed in arrival order.

use crate::config::{Handler, Hooks, NotFoundHandler, RouteDefinition, RouterConfig, RouterMode};
use crate::error::{HookResult, RouterError};
use crate::history::{HistoryEntry, HistoryStack};
use crate::page::{Page, RouteOptions, UnloadCallback, UnloadDecision};
use crate::pattern::{RoutePattern, RouteRule};
use crate::query::{self, Location, Query};
use crate::surface::{LeaveGuard, NavigationSurface, UriEvent, UriListener};
use futures::future::LocalBoxFuture;
use futures::task::{LocalSpawn, LocalSpawnExt};
use regex::Regex;
use serde_json::Value;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

/// A registered route.
pub struct Route {
	pattern: RoutePattern,
	handler: Handler,
	options: RouteOptions,
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern)
			.field("options", &self.options)
			.finish()
	}
}

impl Route {
	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	/// Returns the handler.
	pub fn handler(&self) -> &Handler {
		&self.handler
	}

	/// Returns the route options.
	pub fn options(&self) -> &RouteOptions {
		&self.options
	}
}

/// Identifies a route to remove: by rule, or by handler identity.
pub enum RouteSelector {
	/// Matches a route whose compiled pattern equals this rule's.
	Rule(RouteRule),
	/// Matches a route registered with this exact handler (`Rc::ptr_eq`).
	Handler(Handler),
}

impl From<&str> for RouteSelector {
	fn from(rule: &str) -> Self {
		Self::Rule(rule.into())
	}
}

impl From<String> for RouteSelector {
	fn from(rule: String) -> Self {
		Self::Rule(rule.into())
	}
}

impl From<Regex> for RouteSelector {
	fn from(regex: Regex) -> Self {
		Self::Rule(regex.into())
	}
}

impl From<Handler> for RouteSelector {
	fn from(handler: Handler) -> Self {
		Self::Handler(handler)
	}
}

impl From<&Handler> for RouteSelector {
	fn from(handler: &Handler) -> Self {
		Self::Handler(Rc::clone(handler))
	}
}

/// Options for [`Router::navigate_to`] and [`Router::redirect_to`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigateOptions {
	/// State handed to the next page.
	pub state: Option<Value>,
	/// Update the address bar without dispatching.
	pub silent: bool,
}

impl NavigateOptions {
	/// Creates default options: no state, not silent.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the page state.
	pub fn with_state(mut self, state: impl Into<Value>) -> Self {
		self.state = Some(state.into());
		self
	}

	/// Makes the navigation silent.
	pub fn silent(mut self) -> Self {
		self.silent = true;
		self
	}
}

/// Dispatcher state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPhase {
	/// Ready to process the next trigger.
	#[default]
	Idle,
	/// Recording the location being dispatched.
	Resolving,
	/// Scanning the route table; `secure` hooks run in this phase.
	Matching,
	/// Running `before`, the handler, `after` or the not-found handler.
	Dispatching,
	/// Waiting for the previous page's deferred unload decision.
	AwaitingUnloadDecision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigationKind {
	Push,
	Replace,
}

#[derive(Debug, Clone)]
struct Trigger {
	location: Location,
	state: Option<Value>,
	record_history: bool,
}

struct RouterState {
	mode: RouterMode,
	root: String,
	routes: Vec<Rc<Route>>,
	hooks: Hooks,
	page404: NotFoundHandler,
	current_page: Option<Rc<Page>>,
	last_location: Option<Location>,
	page_state: Option<Value>,
	skip_check: bool,
	phase: DispatchPhase,
	queue: VecDeque<Trigger>,
	history: HistoryStack,
	/// Stack as it was before a pending traversal or redirect moved it.
	history_rollback: Option<HistoryStack>,
	generation: u64,
}

impl RouterState {
	fn unload_guard(&self) -> Option<(UnloadCallback, Rc<Page>)> {
		let page = self.current_page.as_ref()?;
		let callback = page.options.unload_callback.clone()?;
		Some((callback, Rc::clone(page)))
	}
}

struct Shared {
	surface: Rc<dyn NavigationSurface>,
	spawner: Option<Rc<dyn LocalSpawn>>,
	state: RefCell<RouterState>,
}

/// The client-side router.
#[derive(Clone)]
pub struct Router {
	shared: Rc<Shared>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state();
		f.debug_struct("Router")
			.field("mode", &state.mode)
			.field("root", &state.root)
			.field("routes_count", &state.routes.len())
			.field("phase", &state.phase)
			.field("current_uri", &state.current_page.as_ref().map(|p| &p.uri))
			.finish()
	}
}

fn compile_route(
	rule: impl Into<RouteRule>,
	handler: Handler,
	options: RouteOptions,
) -> Result<Rc<Route>, RouterError> {
	Ok(Rc::new(Route {
		pattern: RoutePattern::compile(rule)?,
		handler,
		options,
	}))
}

impl Router {
	/// Creates a router over `surface`.
	///
	/// The mode falls back to [`RouterMode::Hash`] when the surface has no
	/// History API. No listener is installed; call
	/// [`add_uri_listener`](Self::add_uri_listener) and [`check`](Self::check)
	/// to start routing.
	///
	/// # Errors
	///
	/// Returns [`RouterError::MalformedRule`] if an initial route fails to compile.
	pub fn new(config: RouterConfig, surface: Rc<dyn NavigationSurface>) -> Result<Self, RouterError> {
		let RouterConfig {
			settings,
			routes,
			hooks,
			page404,
			spawner,
		} = config;

		let mode = if surface.supports_history() {
			settings.mode
		} else {
			RouterMode::Hash
		};

		let routes = routes
			.into_iter()
			.map(|RouteDefinition { rule, handler, options }| compile_route(rule, handler, options))
			.collect::<Result<Vec<_>, _>>()?;

		debug!(%mode, root = %settings.root, routes = routes.len(), "router created");

		Ok(Self {
			shared: Rc::new(Shared {
				surface,
				spawner,
				state: RefCell::new(RouterState {
					mode,
					root: query::normalize_root(&settings.root),
					routes,
					hooks,
					page404,
					current_page: None,
					last_location: None,
					page_state: None,
					skip_check: false,
					phase: DispatchPhase::Idle,
					queue: VecDeque::new(),
					history: HistoryStack::new(),
					history_rollback: None,
					generation: 0,
				}),
			}),
		})
	}

	/// Creates a router over the browser's `window`.
	///
	/// # Errors
	///
	/// Fails if there is no global `window` or an initial route is malformed.
	#[cfg(target_arch = "wasm32")]
	pub fn browser(config: RouterConfig) -> Result<Self, RouterError> {
		let surface = crate::surface::browser::BrowserSurface::new()?;
		Self::new(config, Rc::new(surface))
	}

	fn state(&self) -> Ref<'_, RouterState> {
		self.shared.state.borrow()
	}

	fn state_mut(&self) -> RefMut<'_, RouterState> {
		self.shared.state.borrow_mut()
	}

	fn set_phase(&self, phase: DispatchPhase) {
		self.state_mut().phase = phase;
	}

	fn from_weak(weak: &Weak<Shared>) -> Option<Self> {
		weak.upgrade().map(|shared| Self { shared })
	}

	// ========================================================================
	// Route table
	// ========================================================================

	/// Appends a route. Registration order is match priority.
	///
	/// # Errors
	///
	/// Returns [`RouterError::MalformedRule`] if the rule fails to compile.
	pub fn add<F>(
		&self,
		rule: impl Into<RouteRule>,
		handler: F,
		options: RouteOptions,
	) -> Result<&Self, RouterError>
	where
		F: Fn(&Page, &[String]) -> HookResult + 'static,
	{
		self.add_handler(rule, Rc::new(handler), options)
	}

	/// Appends a route with a shared handler, which can later be passed to
	/// [`remove`](Self::remove).
	///
	/// # Errors
	///
	/// Returns [`RouterError::MalformedRule`] if the rule fails to compile.
	pub fn add_handler(
		&self,
		rule: impl Into<RouteRule>,
		handler: Handler,
		options: RouteOptions,
	) -> Result<&Self, RouterError> {
		let route = compile_route(rule, handler, options)?;
		debug!(rule = %route.pattern, "route added");
		self.state_mut().routes.push(route);
		Ok(self)
	}

	/// Removes the first route matching `selector`.
	///
	/// Returns whether a route was removed; at most one is removed per call.
	///
	/// # Errors
	///
	/// Returns [`RouterError::MalformedRule`] if a rule selector fails to compile.
	pub fn remove(&self, selector: impl Into<RouteSelector>) -> Result<bool, RouterError> {
		enum Target {
			Pattern(RoutePattern),
			Handler(Handler),
		}

		let target = match selector.into() {
			RouteSelector::Rule(rule) => Target::Pattern(RoutePattern::compile(rule)?),
			RouteSelector::Handler(handler) => Target::Handler(handler),
		};

		let mut state = self.state_mut();
		let position = state.routes.iter().position(|route| match &target {
			Target::Pattern(pattern) => route.pattern == *pattern,
			Target::Handler(handler) => Rc::ptr_eq(&route.handler, handler),
		});

		match position {
			Some(index) => {
				let route = state.routes.remove(index);
				debug!(rule = %route.pattern, "route removed");
				Ok(true)
			}
			None => Ok(false),
		}
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.state().routes.len()
	}

	/// Returns the registered routes in match order.
	pub fn routes(&self) -> Vec<Rc<Route>> {
		self.state().routes.clone()
	}

	/// Drops all routes, history and page state and removes every listener.
	///
	/// A deferred unload decision still pending is ignored when it settles.
	pub fn reset(&self) {
		{
			let mut state = self.state_mut();
			state.routes.clear();
			state.root = "/".to_string();
			state.current_page = None;
			state.last_location = None;
			state.page_state = None;
			state.skip_check = false;
			state.phase = DispatchPhase::Idle;
			state.queue.clear();
			state.history.clear();
			state.history_rollback = None;
			state.generation += 1;
		}
		self.remove_uri_listener();
		self.shared.surface.set_leave_guard(None);
		debug!("router reset");
	}

	// ========================================================================
	// Resolution
	// ========================================================================

	/// Returns the navigation mode in effect.
	pub fn mode(&self) -> RouterMode {
		self.state().mode
	}

	/// Returns the normalized root prefix.
	pub fn root(&self) -> String {
		self.state().root.clone()
	}

	/// Resolves the surface's current location.
	pub fn current_location(&self) -> Location {
		let (mode, root) = {
			let state = self.state();
			(state.mode, state.root.clone())
		};
		let surface = &self.shared.surface;
		match mode {
			RouterMode::History => Location::new(
				query::history_fragment(&surface.pathname(), &root),
				surface.search(),
			),
			RouterMode::Hash => {
				let hash = surface.hash();
				Location::new(query::hash_fragment(&hash), query::hash_query(&hash))
			}
		}
	}

	/// Returns the normalized fragment of the current location.
	pub fn current_fragment(&self) -> String {
		self.current_location().fragment
	}

	/// Returns the parsed query of the current location.
	pub fn current_query(&self) -> Query {
		self.current_location().query()
	}

	/// Returns the page of the last dispatch.
	pub fn current_page(&self) -> Option<Rc<Page>> {
		self.state().current_page.clone()
	}

	/// Returns the dispatcher phase.
	pub fn phase(&self) -> DispatchPhase {
		self.state().phase
	}

	/// Returns the number of triggers waiting behind the current one.
	pub fn pending_triggers(&self) -> usize {
		self.state().queue.len()
	}

	/// Returns a snapshot of the hash-mode history stack.
	pub fn history(&self) -> HistoryStack {
		self.state().history.clone()
	}

	// ========================================================================
	// Dispatcher
	// ========================================================================

	/// Dispatches the surface's current location.
	///
	/// A pending silent navigation swallows exactly one check.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Handler`] when a hook or handler fails; the
	/// router is left idle and later triggers stay queued.
	pub fn check(&self) -> Result<(), RouterError> {
		let page_state = {
			let mut state = self.state_mut();
			if state.skip_check {
				state.skip_check = false;
				debug!("silent navigation, dispatch skipped");
				return Ok(());
			}
			state.page_state.take()
		};
		let location = self.current_location();
		self.enqueue(Trigger {
			location,
			state: page_state,
			record_history: true,
		})
	}

	fn enqueue(&self, trigger: Trigger) -> Result<(), RouterError> {
		{
			let mut state = self.state_mut();
			state.queue.push_back(trigger);
			if state.phase != DispatchPhase::Idle {
				debug!(phase = ?state.phase, queued = state.queue.len(), "trigger queued");
				return Ok(());
			}
		}
		self.drain()
	}

	fn drain(&self) -> Result<(), RouterError> {
		loop {
			let trigger = {
				let mut state = self.state_mut();
				if state.phase != DispatchPhase::Idle {
					return Ok(());
				}
				match state.queue.pop_front() {
					Some(trigger) => trigger,
					None => return Ok(()),
				}
			};
			self.run(trigger)?;
		}
	}

	fn run(&self, trigger: Trigger) -> Result<(), RouterError> {
		let guard = self.state().unload_guard();
		let Some((callback, page)) = guard else {
			return self.process(trigger);
		};

		match callback(&page, true) {
			UnloadDecision::Ready(true) => self.process(trigger),
			UnloadDecision::Ready(false) => self.revert(),
			UnloadDecision::Deferred(decision) => self.await_decision(trigger, decision),
		}
	}

	fn await_decision(
		&self,
		trigger: Trigger,
		decision: LocalBoxFuture<'static, bool>,
	) -> Result<(), RouterError> {
		let spawner = self.shared.spawner.clone().ok_or(RouterError::NoExecutor)?;
		let generation = {
			let mut state = self.state_mut();
			state.phase = DispatchPhase::AwaitingUnloadDecision;
			state.generation
		};
		debug!(fragment = %trigger.location.fragment, "awaiting unload decision");

		let weak = Rc::downgrade(&self.shared);
		let continuation = async move {
			let allowed = decision.await;
			let Some(router) = Self::from_weak(&weak) else {
				return;
			};
			if router.state().generation != generation {
				return;
			}
			if let Err(err) = router.resume(trigger, allowed) {
				tracing::error!(error = %err, "navigation failed after unload decision");
			}
		};

		spawner.spawn_local(continuation).map_err(|err| {
			self.set_phase(DispatchPhase::Idle);
			RouterError::from(err)
		})
	}

	fn resume(&self, trigger: Trigger, allowed: bool) -> Result<(), RouterError> {
		self.set_phase(DispatchPhase::Idle);
		if allowed {
			self.process(trigger)?;
		} else {
			self.revert()?;
		}
		self.drain()
	}

	/// Restores the previous location without dispatching.
	fn revert(&self) -> Result<(), RouterError> {
		let (previous, state) = {
			let mut router_state = self.state_mut();
			if let Some(history) = router_state.history_rollback.take() {
				router_state.history = history;
			}
			let page_state = router_state
				.current_page
				.as_ref()
				.and_then(|p| p.state.clone());
			(router_state.last_location.clone().unwrap_or_default(), page_state)
		};

		// Nothing to restore, and a silent write would fire no event to consume the skip.
		if self.current_location() == previous {
			warn!(path = %previous.fragment, "navigation vetoed by unload guard");
			return Ok(());
		}

		let path = if previous.query_string.is_empty() {
			previous.fragment
		} else {
			format!("{}?{}", previous.fragment, previous.query_string)
		};
		warn!(path = %path, "navigation vetoed by unload guard, restoring previous location");
		self.navigate(
			&path,
			NavigateOptions {
				state,
				silent: true,
			},
			NavigationKind::Push,
		)
	}

	fn process(&self, trigger: Trigger) -> Result<(), RouterError> {
		let result = self.dispatch(trigger);
		self.set_phase(DispatchPhase::Idle);
		result
	}

	fn dispatch(&self, trigger: Trigger) -> Result<(), RouterError> {
		let Trigger {
			location,
			state: page_state,
			record_history,
		} = trigger;

		let (routes, hooks) = {
			let mut state = self.state_mut();
			state.phase = DispatchPhase::Resolving;
			state.last_location = Some(location.clone());

			if state.mode == RouterMode::Hash && record_history {
				let entry = HistoryEntry::new(location.fragment.clone(), page_state.clone());
				state.history_rollback = None;
				if state.history.record(entry) {
					debug!(path = %location.fragment, "history entry recorded");
				} else {
					debug!(path = %location.fragment, "history entry held after go");
				}
			}

			state.phase = DispatchPhase::Matching;
			(state.routes.clone(), state.hooks.clone())
		};

		for route in routes {
			let Some(params) = route.pattern.captures(&location.fragment) else {
				continue;
			};
			let page = Rc::new(Page::new(
				location.fragment.clone(),
				location.query_string.clone(),
				params,
				page_state.clone(),
				route.options.clone(),
			));

			if !(hooks.secure)(&page).map_err(RouterError::Handler)? {
				debug!(rule = %route.pattern, fragment = %location.fragment, "route rejected by secure hook");
				continue;
			}

			{
				let mut state = self.state_mut();
				state.current_page = Some(Rc::clone(&page));
				state.phase = DispatchPhase::Dispatching;
			}
			debug!(rule = %route.pattern, fragment = %location.fragment, "route matched");

			(hooks.before)(&page).map_err(RouterError::Handler)?;
			(route.handler)(&page, &page.params).map_err(RouterError::Handler)?;
			(hooks.after)(&page).map_err(RouterError::Handler)?;

			self.install_leave_guard();
			return Ok(());
		}

		let page404 = {
			let mut state = self.state_mut();
			state.current_page = Some(Rc::new(Page::not_found()));
			state.phase = DispatchPhase::Dispatching;
			Rc::clone(&state.page404)
		};
		page404(&location.fragment).map_err(RouterError::Handler)
	}

	fn install_leave_guard(&self) {
		let weak = Rc::downgrade(&self.shared);
		let guard: LeaveGuard = Rc::new(move || {
			Self::from_weak(&weak)
				.map(|router| router.should_confirm_leave())
				.unwrap_or(false)
		});
		self.shared.surface.set_leave_guard(Some(guard));
	}

	/// Asks the current page's unload guard whether leaving needs confirmation.
	fn should_confirm_leave(&self) -> bool {
		let (skip, guard) = {
			let state = self.state();
			(state.skip_check, state.unload_guard())
		};
		if skip {
			return false;
		}
		match guard {
			None => false,
			Some((callback, page)) => match callback(&page, false) {
				UnloadDecision::Ready(allow) => !allow,
				// Cannot wait during unload.
				UnloadDecision::Deferred(_) => true,
			},
		}
	}

	// ========================================================================
	// Listeners
	// ========================================================================

	/// Dispatches on `popstate` (history mode) or `hashchange` (hash mode).
	pub fn add_uri_listener(&self) -> &Self {
		let weak = Rc::downgrade(&self.shared);
		let listener: UriListener = Rc::new(move || match Self::from_weak(&weak) {
			Some(router) => router.check(),
			None => Ok(()),
		});
		let event = match self.mode() {
			RouterMode::History => UriEvent::PopState,
			RouterMode::Hash => UriEvent::HashChange,
		};
		self.shared.surface.set_uri_listener(event, Some(listener));
		self
	}

	/// Removes both location listeners.
	pub fn remove_uri_listener(&self) -> &Self {
		let surface = &self.shared.surface;
		surface.set_uri_listener(UriEvent::PopState, None);
		surface.set_uri_listener(UriEvent::HashChange, None);
		self
	}

	// ========================================================================
	// Navigation
	// ========================================================================

	/// Navigates to `path`, adding a history entry.
	///
	/// In history mode the new location is dispatched before returning. In
	/// hash mode only the fragment is written; the dispatch follows when the
	/// surface reports the change.
	///
	/// # Errors
	///
	/// Returns surface errors, and handler faults of a history-mode dispatch.
	pub fn navigate_to(&self, path: &str, options: NavigateOptions) -> Result<(), RouterError> {
		self.navigate(path, options, NavigationKind::Push)
	}

	/// Navigates to `path`, replacing the current history entry.
	///
	/// # Errors
	///
	/// Same as [`navigate_to`](Self::navigate_to).
	pub fn redirect_to(&self, path: &str, options: NavigateOptions) -> Result<(), RouterError> {
		self.navigate(path, options, NavigationKind::Replace)
	}

	fn navigate(
		&self,
		path: &str,
		options: NavigateOptions,
		kind: NavigationKind,
	) -> Result<(), RouterError> {
		let path = query::trim_slashes(path);
		let NavigateOptions { state, silent } = options;

		let (mode, root) = {
			let mut router_state = self.state_mut();
			router_state.page_state = state.clone();
			router_state.skip_check = silent;
			if router_state.mode == RouterMode::Hash && kind == NavigationKind::Replace {
				router_state.history_rollback = Some(router_state.history.clone());
				router_state.history.replace_next();
			}
			(router_state.mode, router_state.root.clone())
		};
		debug!(%path, ?kind, silent, "navigate");

		let surface = &self.shared.surface;
		match mode {
			RouterMode::History => {
				let url = format!("{}{}", root, path);
				match kind {
					NavigationKind::Push => surface.push_state(state.as_ref(), &url)?,
					NavigationKind::Replace => surface.replace_state(state.as_ref(), &url)?,
				}
				self.check()
			}
			RouterMode::Hash => Ok(surface.set_hash(path)?),
		}
	}

	/// Re-dispatches the current page's location with its state.
	///
	/// Does nothing before the first dispatch. The hash-mode history stack is
	/// not extended.
	///
	/// # Errors
	///
	/// Returns handler faults of the dispatch.
	pub fn refresh(&self) -> Result<(), RouterError> {
		let trigger = {
			let state = self.state();
			let Some(location) = state.last_location.clone() else {
				return Ok(());
			};
			Trigger {
				location,
				state: state.current_page.as_ref().and_then(|p| p.state.clone()),
				record_history: false,
			}
		};
		self.enqueue(trigger)
	}

	/// Goes one entry back.
	///
	/// # Errors
	///
	/// Returns surface errors.
	pub fn back(&self) -> Result<(), RouterError> {
		match self.mode() {
			RouterMode::History => Ok(self.shared.surface.back()?),
			RouterMode::Hash => {
				let target = self.state().history.cursor().and_then(|c| c.checked_sub(1));
				match target {
					Some(index) => self.go_to_entry(index),
					None => Ok(()),
				}
			}
		}
	}

	/// Goes one entry forward.
	///
	/// # Errors
	///
	/// Returns surface errors.
	pub fn forward(&self) -> Result<(), RouterError> {
		match self.mode() {
			RouterMode::History => Ok(self.shared.surface.forward()?),
			RouterMode::Hash => {
				let target = self.state().history.cursor().map(|c| c + 1);
				match target {
					Some(index) => self.go_to_entry(index),
					None => Ok(()),
				}
			}
		}
	}

	/// History mode: traverses native history by the relative offset `n`.
	/// Hash mode: jumps to the stack entry at absolute index `n`; out of
	/// range (including negative) is a no-op.
	///
	/// # Errors
	///
	/// Returns surface errors.
	pub fn go(&self, n: i32) -> Result<(), RouterError> {
		match self.mode() {
			RouterMode::History => Ok(self.shared.surface.go(n)?),
			RouterMode::Hash => match usize::try_from(n) {
				Ok(index) => self.go_to_entry(index),
				Err(_) => Ok(()),
			},
		}
	}

	fn go_to_entry(&self, index: usize) -> Result<(), RouterError> {
		let entry = {
			let mut state = self.state_mut();
			let before = state.history.clone();
			let entry = state.history.go(index);
			if entry.is_some() {
				state.history_rollback = Some(before);
			}
			entry
		};
		match entry {
			Some(HistoryEntry { path, state }) => self.navigate_to(
				&path,
				NavigateOptions {
					state,
					silent: false,
				},
			),
			None => Ok(()),
		}
	}
}
