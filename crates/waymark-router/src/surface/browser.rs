//! Browser navigation surface backed by `web-sys`.

use super::{LeaveGuard, NavigationSurface, UriEvent, UriListener};
use crate::error::SurfaceError;
use futures::future::LocalFutureObj;
use futures::task::{LocalSpawn, SpawnError};
use serde_json::Value;
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type EventClosure = Closure<dyn FnMut()>;
type UnloadClosure = Closure<dyn FnMut(web_sys::BeforeUnloadEvent)>;

/// [`NavigationSurface`] over `window.location` and `window.history`.
///
/// Listener closures are owned by the surface and dropped when replaced,
/// so the surface must outlive the router that uses it.
pub struct BrowserSurface {
	window: web_sys::Window,
	popstate: RefCell<Option<EventClosure>>,
	hashchange: RefCell<Option<EventClosure>>,
	beforeunload: RefCell<Option<UnloadClosure>>,
}

impl std::fmt::Debug for BrowserSurface {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BrowserSurface")
			.field("has_popstate", &self.popstate.borrow().is_some())
			.field("has_hashchange", &self.hashchange.borrow().is_some())
			.field("has_beforeunload", &self.beforeunload.borrow().is_some())
			.finish()
	}
}

fn js_error(operation: &'static str, err: JsValue) -> SurfaceError {
	SurfaceError::new(
		operation,
		err.as_string().unwrap_or_else(|| format!("{:?}", err)),
	)
}

fn state_to_js(state: Option<&Value>) -> Result<JsValue, SurfaceError> {
	let Some(state) = state else {
		return Ok(JsValue::NULL);
	};
	let json = serde_json::to_string(state)
		.map_err(|e| SurfaceError::new("serialize state", e.to_string()))?;
	js_sys::JSON::parse(&json).map_err(|e| js_error("serialize state", e))
}

impl BrowserSurface {
	/// Creates a surface for the global `window`.
	///
	/// # Errors
	///
	/// Returns an error when there is no global `window` (e.g. in a worker).
	pub fn new() -> Result<Self, SurfaceError> {
		let window = web_sys::window()
			.ok_or_else(|| SurfaceError::new("window", "no global `window` exists"))?;
		Ok(Self {
			window,
			popstate: RefCell::new(None),
			hashchange: RefCell::new(None),
			beforeunload: RefCell::new(None),
		})
	}

	fn history(&self) -> Result<web_sys::History, SurfaceError> {
		self.window.history().map_err(|e| js_error("history", e))
	}
}

impl NavigationSurface for BrowserSurface {
	fn pathname(&self) -> String {
		self.window.location().pathname().unwrap_or_default()
	}

	fn search(&self) -> String {
		self.window.location().search().unwrap_or_default()
	}

	fn hash(&self) -> String {
		self.window.location().hash().unwrap_or_default()
	}

	fn supports_history(&self) -> bool {
		self.window
			.history()
			.ok()
			.and_then(|history| js_sys::Reflect::has(&history, &JsValue::from_str("pushState")).ok())
			.unwrap_or(false)
	}

	fn set_hash(&self, hash: &str) -> Result<(), SurfaceError> {
		self.window
			.location()
			.set_hash(hash)
			.map_err(|e| js_error("set hash", e))
	}

	fn push_state(&self, state: Option<&Value>, url: &str) -> Result<(), SurfaceError> {
		self.history()?
			.push_state_with_url(&state_to_js(state)?, "", Some(url))
			.map_err(|e| js_error("pushState", e))
	}

	fn replace_state(&self, state: Option<&Value>, url: &str) -> Result<(), SurfaceError> {
		self.history()?
			.replace_state_with_url(&state_to_js(state)?, "", Some(url))
			.map_err(|e| js_error("replaceState", e))
	}

	fn go(&self, delta: i32) -> Result<(), SurfaceError> {
		self.history()?
			.go_with_delta(delta)
			.map_err(|e| js_error("history.go", e))
	}

	fn back(&self) -> Result<(), SurfaceError> {
		self.history()?.back().map_err(|e| js_error("history.back", e))
	}

	fn forward(&self) -> Result<(), SurfaceError> {
		self.history()?
			.forward()
			.map_err(|e| js_error("history.forward", e))
	}

	fn set_uri_listener(&self, event: UriEvent, listener: Option<UriListener>) {
		// Faults are rethrown into the browser's event dispatch.
		let closure = listener.map(|listener| {
			EventClosure::new(move || {
				if let Err(err) = listener() {
					wasm_bindgen::throw_str(&err.to_string());
				}
			})
		});
		let function = closure.as_ref().map(|c| c.as_ref().unchecked_ref());

		match event {
			UriEvent::PopState => {
				self.window.set_onpopstate(function);
				*self.popstate.borrow_mut() = closure;
			}
			UriEvent::HashChange => {
				self.window.set_onhashchange(function);
				*self.hashchange.borrow_mut() = closure;
			}
		}
	}

	fn set_leave_guard(&self, guard: Option<LeaveGuard>) {
		let closure = guard.map(|guard| {
			UnloadClosure::new(move |event: web_sys::BeforeUnloadEvent| {
				if guard() {
					event.prevent_default();
					event.set_return_value("true");
				}
			})
		});
		self.window
			.set_onbeforeunload(closure.as_ref().map(|c| c.as_ref().unchecked_ref()));
		*self.beforeunload.borrow_mut() = closure;
	}
}

/// Runs deferred unload decisions on the browser's microtask queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

impl LocalSpawn for WasmSpawner {
	fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
		wasm_bindgen_futures::spawn_local(future);
		Ok(())
	}
}
