//! Host size tracking.
//!
//! Layout can change the host box without any window resize (responsive
//! breakpoints, sibling content loading), so the host is watched with a
//! `ResizeObserver`. The observer reports once right after `observe`, which
//! doubles as the initial setup. Without a host, window `resize` events drive
//! the canvas instead and one setup pass runs immediately.

use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ResizeObserver, Window};

enum Source {
	Observer(ResizeObserver),
	Window(Window),
}

/// Keeps the resize subscription (and its callback) alive.
pub struct ResizeCoordinator {
	source: Source,
	callback: Closure<dyn FnMut()>,
}

impl ResizeCoordinator {
	/// Subscribes `on_resize` to size changes of `host`, or of the window when
	/// there is no host or the observer is unavailable.
	///
	/// Returns `None` when neither source exists; the canvas then never seeds.
	pub fn attach(
		host: Option<HtmlElement>,
		on_resize: impl Fn(u32, u32) + 'static,
	) -> Option<Self> {
		let on_resize: Rc<dyn Fn(u32, u32)> = Rc::new(on_resize);

		if let Some(host) = host {
			let (measured, notify) = (host.clone(), on_resize.clone());
			let callback = Closure::<dyn FnMut()>::new(move || {
				let (w, h) = element_size(&measured);
				notify(w, h);
			});
			match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
				Ok(observer) => {
					observer.observe(&host);
					info!("dust-text: observing host element size");
					return Some(Self {
						source: Source::Observer(observer),
						callback,
					});
				}
				Err(e) => {
					warn!("dust-text: ResizeObserver unavailable ({e:?}), using window resize")
				}
			}
		} else {
			warn!("dust-text: canvas has no host element, using window resize");
		}

		let Some(window) = web_sys::window() else {
			warn!("dust-text: no window, particles will not be seeded");
			return None;
		};
		let (measured, notify) = (window.clone(), on_resize.clone());
		let callback = Closure::<dyn FnMut()>::new(move || {
			let (w, h) = window_size(&measured);
			notify(w, h);
		});
		if let Err(e) =
			window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
		{
			warn!("dust-text: failed to listen for window resize: {e:?}");
		}
		let (w, h) = window_size(&window);
		on_resize(w, h);

		Some(Self {
			source: Source::Window(window),
			callback,
		})
	}

	/// Whether the host element itself is being observed.
	pub fn observes_host(&self) -> bool {
		matches!(self.source, Source::Observer(_))
	}
}

impl Drop for ResizeCoordinator {
	fn drop(&mut self) {
		match &self.source {
			Source::Observer(observer) => observer.disconnect(),
			Source::Window(window) => {
				let _ = window.remove_event_listener_with_callback(
					"resize",
					self.callback.as_ref().unchecked_ref(),
				);
			}
		}
	}
}

fn element_size(el: &HtmlElement) -> (u32, u32) {
	(el.offset_width().max(0) as u32, el.offset_height().max(0) as u32)
}

fn window_size(window: &Window) -> (u32, u32) {
	let dim = |v: Result<JsValue, JsValue>| {
		v.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(0.0)
			.max(0.0) as u32
	};
	(dim(window.inner_width()), dim(window.inner_height()))
}
