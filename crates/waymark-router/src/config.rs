//! Router construction settings.
//!
//! [`RouterSettings`] holds the plain, serializable part of the
//! configuration (mode and root prefix). [`RouterConfig`] adds the parts
//! that only exist in code: initial routes, lifecycle hooks, the not-found
//! handler and the executor used for deferred unload decisions.

use crate::error::HookResult;
use crate::page::{Page, RouteOptions};
use crate::pattern::RouteRule;
use futures::task::LocalSpawn;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Route handler: receives the page and its captured groups.
pub type Handler = Rc<dyn Fn(&Page, &[String]) -> HookResult>;

/// `before`/`after` lifecycle hook.
pub type Hook = Rc<dyn Fn(&Page) -> HookResult>;

/// `secure` hook: returning `Ok(false)` skips the candidate route.
pub type SecureHook = Rc<dyn Fn(&Page) -> Result<bool, crate::error::HookError>>;

/// Not-found handler: receives the unmatched fragment.
pub type NotFoundHandler = Rc<dyn Fn(&str) -> HookResult>;

/// Which part of the URL drives routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterMode {
	/// URL path, navigated with `pushState`/`replaceState`.
	#[default]
	History,
	/// URL fragment after `#`.
	Hash,
}

impl std::fmt::Display for RouterMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::History => f.write_str("history"),
			Self::Hash => f.write_str("hash"),
		}
	}
}

/// Serializable router settings.
///
/// # Examples
///
/// ```
/// use waymark_router::{RouterMode, RouterSettings};
///
/// let settings = RouterSettings::from_json(r#"{"mode": "hash"}"#).unwrap();
/// assert_eq!(settings.mode, RouterMode::Hash);
/// assert_eq!(settings.root, "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
	/// Navigation mode; forced to `hash` if the host lacks the History API.
	pub mode: RouterMode,
	/// Path prefix stripped from history-mode locations.
	pub root: String,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			mode: RouterMode::History,
			root: "/".to_string(),
		}
	}
}

impl RouterSettings {
	/// Parses settings from JSON; missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

/// A route registered at construction time.
pub struct RouteDefinition {
	pub(crate) rule: RouteRule,
	pub(crate) handler: Handler,
	pub(crate) options: RouteOptions,
}

impl RouteDefinition {
	/// Creates a route definition.
	pub fn new<F>(rule: impl Into<RouteRule>, handler: F) -> Self
	where
		F: Fn(&Page, &[String]) -> HookResult + 'static,
	{
		Self {
			rule: rule.into(),
			handler: Rc::new(handler),
			options: RouteOptions::default(),
		}
	}

	/// Sets the route options.
	pub fn with_options(mut self, options: RouteOptions) -> Self {
		self.options = options;
		self
	}
}

impl std::fmt::Debug for RouteDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteDefinition")
			.field("rule", &self.rule)
			.field("options", &self.options)
			.finish()
	}
}

/// Lifecycle hooks run around every accepted route.
#[derive(Clone)]
pub struct Hooks {
	pub(crate) before: Hook,
	pub(crate) after: Hook,
	pub(crate) secure: SecureHook,
}

fn noop(_page: &Page) -> HookResult {
	Ok(())
}

fn allow(_page: &Page) -> Result<bool, crate::error::HookError> {
	Ok(true)
}

impl Default for Hooks {
	fn default() -> Self {
		Self {
			before: Rc::new(noop),
			after: Rc::new(noop),
			secure: Rc::new(allow),
		}
	}
}

/// Default not-found handler: reports the fragment as a structured event.
fn report_not_found(page: &str) -> HookResult {
	tracing::error!(page = %page, message = "404. Page not found");
	Ok(())
}

/// Full router configuration.
pub struct RouterConfig {
	pub(crate) settings: RouterSettings,
	pub(crate) routes: Vec<RouteDefinition>,
	pub(crate) hooks: Hooks,
	pub(crate) page404: NotFoundHandler,
	pub(crate) spawner: Option<Rc<dyn LocalSpawn>>,
}

impl std::fmt::Debug for RouterConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterConfig")
			.field("settings", &self.settings)
			.field("routes", &self.routes)
			.field("has_spawner", &self.spawner.is_some())
			.finish()
	}
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self::from_settings(RouterSettings::default())
	}
}

impl RouterConfig {
	/// Creates a default configuration (history mode, root `/`).
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a configuration from serializable settings.
	pub fn from_settings(settings: RouterSettings) -> Self {
		Self {
			settings,
			routes: Vec::new(),
			hooks: Hooks::default(),
			page404: Rc::new(report_not_found),
			spawner: default_spawner(),
		}
	}

	/// Sets the navigation mode.
	pub fn with_mode(mut self, mode: RouterMode) -> Self {
		self.settings.mode = mode;
		self
	}

	/// Sets the root prefix used in history mode.
	pub fn with_root(mut self, root: impl Into<String>) -> Self {
		self.settings.root = root.into();
		self
	}

	/// Adds an initial route.
	pub fn with_route(mut self, route: RouteDefinition) -> Self {
		self.routes.push(route);
		self
	}

	/// Sets the hook run before each handler.
	pub fn with_before<F>(mut self, hook: F) -> Self
	where
		F: Fn(&Page) -> HookResult + 'static,
	{
		self.hooks.before = Rc::new(hook);
		self
	}

	/// Sets the hook run after each handler.
	pub fn with_after<F>(mut self, hook: F) -> Self
	where
		F: Fn(&Page) -> HookResult + 'static,
	{
		self.hooks.after = Rc::new(hook);
		self
	}

	/// Sets the hook deciding whether a matching route may be used.
	pub fn with_secure<F>(mut self, hook: F) -> Self
	where
		F: Fn(&Page) -> Result<bool, crate::error::HookError> + 'static,
	{
		self.hooks.secure = Rc::new(hook);
		self
	}

	/// Sets the not-found handler.
	pub fn with_page404<F>(mut self, handler: F) -> Self
	where
		F: Fn(&str) -> HookResult + 'static,
	{
		self.page404 = Rc::new(handler);
		self
	}

	/// Sets the executor used to await deferred unload decisions.
	pub fn with_spawner<S>(mut self, spawner: S) -> Self
	where
		S: LocalSpawn + 'static,
	{
		self.spawner = Some(Rc::new(spawner));
		self
	}

	/// Returns the serializable settings.
	pub fn settings(&self) -> &RouterSettings {
		&self.settings
	}
}

#[cfg(target_arch = "wasm32")]
fn default_spawner() -> Option<Rc<dyn LocalSpawn>> {
	Some(Rc::new(crate::surface::browser::WasmSpawner))
}

#[cfg(not(target_arch = "wasm32"))]
fn default_spawner() -> Option<Rc<dyn LocalSpawn>> {
	None
}
