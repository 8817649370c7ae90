//! # Waymark
//!
//! Client-side routing for single-page applications written in Rust and
//! compiled to WebAssembly.
//!
//! ## Feature Flags
//!
//! - `router` (default) - The router, route patterns and navigation surfaces
//!
//! ## Quick Example
//!
//! ```ignore
//! use waymark::prelude::*;
//!
//! let router = Router::browser(RouterConfig::new().with_mode(RouterMode::Hash))?;
//! router.add("item/(:num)", |page, params| {
//!     tracing::info!(uri = %page.uri, id = %params[0], "item");
//!     Ok(())
//! }, RouteOptions::default())?;
//! router.add_uri_listener().check()?;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "router")]
#[cfg_attr(docsrs, doc(cfg(feature = "router")))]
pub use waymark_router as router;

/// Commonly used types.
#[cfg(feature = "router")]
#[cfg_attr(docsrs, doc(cfg(feature = "router")))]
pub mod prelude {
	pub use waymark_router::{
		HookResult, NavigateOptions, Page, RouteOptions, Router, RouterConfig, RouterError,
		RouterMode, UnloadDecision,
	};
}
