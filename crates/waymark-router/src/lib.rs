//! Client-side router for single-page applications.
//!
//! The router maps the address bar to application handlers. It supports two
//! navigation modes:
//!
//! - **History mode**: routes on `location.pathname` below a configurable root
//!   and navigates with `pushState` / `replaceState`.
//! - **Hash mode**: routes on the fragment after `#` and keeps its own history
//!   stack, for hosts without a History API.
//!
//! ## Features
//!
//! - Route rules with `:num`, `:word`, `:any` and `{name}` placeholders, or raw regexes
//! - `secure` / `before` / `after` hooks and a not-found handler
//! - Per-page unload guards, answered synchronously or with a future
//! - Silent navigations that update the address bar without dispatching
//!
//! ## Example
//!
//! ```ignore
//! use waymark_router::{NavigateOptions, RouteOptions, Router, RouterConfig};
//!
//! let router = Router::browser(RouterConfig::new().with_root("/app"))?;
//! router
//!     .add("hello/{name}", |page, params| {
//!         tracing::info!(uri = %page.uri, name = %params[0], "hello");
//!         Ok(())
//!     }, RouteOptions::default())?
//!     .add_uri_listener()
//!     .check()?;
//!
//! router.navigate_to("hello/world", NavigateOptions::new())?;
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod history;
pub mod page;
pub mod pattern;
pub mod query;
pub mod surface;

pub use config::{
	Handler, Hook, Hooks, NotFoundHandler, RouteDefinition, RouterConfig, RouterMode,
	RouterSettings, SecureHook,
};
pub use self::core::{DispatchPhase, NavigateOptions, Route, RouteSelector, Router};
pub use error::{HookError, HookResult, RouterError, SurfaceError};
pub use history::{HistoryEntry, HistoryStack};
pub use page::{Page, RouteOptions, UnloadCallback, UnloadDecision};
pub use pattern::{RoutePattern, RouteRule};
pub use query::{Location, Query, QueryValue, parse_query, trim_slashes};
pub use surface::{LeaveGuard, MemorySurface, NavigationSurface, UriEvent, UriListener};

#[cfg(target_arch = "wasm32")]
pub use surface::browser::{BrowserSurface, WasmSpawner};
