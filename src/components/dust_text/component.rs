//! Leptos component wrapping the dust text canvas.
//!
//! The component creates an HTML canvas inside its host element and wires up
//! the pointer listeners, the host resize subscription and an animation loop
//! running via `requestAnimationFrame`, which ticks the simulation every frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::config::DustConfig;
use super::resize::ResizeCoordinator;
use super::simulation::DustSimulation;
use super::surface::CanvasSurface;

/// Bundles the simulation with the canvas it draws on.
struct DustContext {
	sim: DustSimulation,
	surface: CanvasSurface,
}

type Listener = Closure<dyn FnMut(MouseEvent)>;

/// Renders the dust text effect on a canvas filling its parent element.
///
/// The parent is the layout host: whenever its box changes size the canvas is
/// resized and the particles are reseeded. Pointer movement anywhere in the
/// window repels nearby particles; clicking the canvas briefly widens the
/// repulsion radius.
#[component]
pub fn DustTextCanvas(#[prop(optional)] config: DustConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<DustContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize: Rc<RefCell<Option<ResizeCoordinator>>> = Rc::new(RefCell::new(None));
	let listeners: Rc<RefCell<Vec<Listener>>> = Rc::new(RefCell::new(Vec::new()));
	let (context_init, animate_init, resize_init, listeners_init) = (
		context.clone(),
		animate.clone(),
		resize.clone(),
		listeners.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("dust-text: no window, canvas stays blank");
			return;
		};
		let surface = match CanvasSurface::new(canvas.clone()) {
			Ok(surface) => surface,
			Err(e) => {
				warn!("dust-text: {e}");
				return;
			}
		};

		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		*context_init.borrow_mut() = Some(DustContext {
			sim: DustSimulation::new(config.clone(), seed),
			surface,
		});

		let host = canvas
			.parent_element()
			.and_then(|p| p.dyn_into::<HtmlElement>().ok());
		let context_resize = context_init.clone();
		let coordinator = ResizeCoordinator::attach(host, move |w, h| {
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.sim.on_surface_resized(&mut c.surface, w, h);
			}
		});
		info!(
			"dust-text: canvas mounted, sized by {}",
			match &coordinator {
				Some(c) if c.observes_host() => "host element",
				Some(_) => "window",
				None => "nothing",
			}
		);
		*resize_init.borrow_mut() = coordinator;

		listeners_init
			.borrow_mut()
			.extend(pointer_listeners(&window, &canvas, &context_init));

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |now: f64| {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.sim.tick(&mut c.surface, now);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_click = context.clone();
	let on_click = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_click.borrow_mut() {
			c.sim.pointer_clicked();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="dust-text-canvas"
			on:click=on_click
			style="position: absolute; top: 0; left: 0; display: block;"
		/>
	}
}

/// Window-level pointer tracking: movement anywhere on the page counts, and
/// leaving the page parks the pointer.
fn pointer_listeners(
	window: &Window,
	canvas: &HtmlCanvasElement,
	context: &Rc<RefCell<Option<DustContext>>>,
) -> Vec<Listener> {
	let (context_mm, canvas_mm) = (context.clone(), canvas.clone());
	let on_mousemove: Listener = Closure::new(move |ev: MouseEvent| {
		let rect = canvas_mm.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.sim.pointer_moved(x, y);
		}
	});

	let context_mo = context.clone();
	let on_mouseout: Listener = Closure::new(move |ev: MouseEvent| {
		// A null related target means the pointer left the document.
		if ev.related_target().is_some() {
			return;
		}
		if let Some(ref mut c) = *context_mo.borrow_mut() {
			c.sim.pointer_left();
		}
	});

	for (event, cb) in [("mousemove", &on_mousemove), ("mouseout", &on_mouseout)] {
		let target = cb.as_ref().unchecked_ref();
		if let Err(e) = window.add_event_listener_with_callback(event, target) {
			warn!("dust-text: failed to listen for {event}: {e:?}");
		}
	}
	vec![on_mousemove, on_mouseout]
}
