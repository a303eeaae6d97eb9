//! Background glow that drifts on two out-of-phase sine waves.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use leptos::prelude::*;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// Glow drift settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
	/// Phase advance of the left lobe per frame, in radians.
	pub left_speed: f64,
	/// Phase advance of the right lobe per frame, in radians.
	pub right_speed: f64,
	/// Peak horizontal shift of each lobe in pixels.
	pub amplitude: f64,
	/// The vertical lift is the sum of both shifts divided by this.
	pub lift_divisor: f64,
}

impl Default for GlowConfig {
	fn default() -> Self {
		Self {
			left_speed: 0.01,
			right_speed: 0.008,
			amplitude: 30.0,
			lift_divisor: 6.0,
		}
	}
}

/// Offsets for one frame, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowOffsets {
	pub left: f64,
	pub right: f64,
	pub lift: f64,
}

impl GlowOffsets {
	/// Style properties to write onto the glow element.
	pub fn css_properties(&self) -> [(&'static str, String); 3] {
		[
			("--left-shift", format!("{}px", self.left)),
			("--right-shift", format!("{}px", self.right)),
			("transform", format!("translateY({}px)", self.lift)),
		]
	}
}

/// Phase state of the glow; the right lobe starts half a period ahead.
#[derive(Clone, Debug)]
pub struct GlowAnimator {
	left_phase: f64,
	right_phase: f64,
	config: GlowConfig,
}

impl GlowAnimator {
	pub fn new(config: GlowConfig) -> Self {
		Self {
			left_phase: 0.0,
			right_phase: PI,
			config,
		}
	}

	/// Advances both phases by one frame and returns the new offsets.
	pub fn step(&mut self) -> GlowOffsets {
		self.left_phase += self.config.left_speed;
		self.right_phase += self.config.right_speed;
		let left = self.left_phase.sin() * self.config.amplitude;
		let right = self.right_phase.sin() * self.config.amplitude;
		GlowOffsets {
			left,
			right,
			lift: (left + right) / self.config.lift_divisor,
		}
	}
}

/// Decorative glow element animated every frame.
#[component]
pub fn AmbientGlow(#[prop(optional)] config: GlowConfig) -> impl IntoView {
	let glow_ref = NodeRef::<leptos::html::Div>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let animate_init = animate.clone();

	Effect::new(move |_| {
		let Some(glow) = glow_ref.get() else {
			return;
		};
		let glow: HtmlElement = glow.into();
		let mut animator = GlowAnimator::new(config.clone());

		let animate_inner = animate_init.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let style = glow.style();
			for (name, value) in animator.step().css_properties() {
				let _ = style.set_property(name, &value);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(win)) = (&*animate_init.borrow(), web_sys::window()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! { <div node_ref=glow_ref class="ambient-glow" /> }
}
