//! Logo intro: play a video, then crossfade to a still image.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, HtmlVideoElement};

/// Logo sequence settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
	/// Logo video URL. The sequence is skipped without one.
	pub video_src: Option<String>,
	/// Still image shown once the video has faded out.
	pub image_src: Option<String>,
	/// Extra full plays before fading out.
	pub replays: u32,
	/// Delay between starting the video fade and swapping in the image.
	pub fade_ms: i32,
}

impl Default for LogoConfig {
	fn default() -> Self {
		Self {
			video_src: None,
			image_src: None,
			replays: 0,
			fade_ms: 600,
		}
	}
}

/// What to do when the video reaches its end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoStep {
	/// Rewind and play again.
	Replay,
	/// Fade the video out and reveal the image.
	FadeOut,
	/// The image is already showing.
	Done,
}

/// Counts completed plays and decides when to reveal the image.
#[derive(Clone, Debug)]
pub struct LogoCrossfade {
	plays: u32,
	replays: u32,
	revealed: bool,
}

impl LogoCrossfade {
	pub fn new(replays: u32) -> Self {
		Self {
			plays: 0,
			replays,
			revealed: false,
		}
	}

	/// Handles one `ended` event.
	pub fn on_ended(&mut self) -> LogoStep {
		self.plays += 1;
		if self.revealed {
			LogoStep::Done
		} else if self.plays <= self.replays {
			LogoStep::Replay
		} else {
			self.revealed = true;
			LogoStep::FadeOut
		}
	}

	pub fn plays(&self) -> u32 {
		self.plays
	}
}

/// Logo video that hands over to a still image when it finishes.
#[component]
pub fn LogoReveal(
	#[prop(into)] video_src: String,
	#[prop(into)] image_src: String,
	#[prop(optional)] config: LogoConfig,
) -> impl IntoView {
	let video_ref = NodeRef::<leptos::html::Video>::new();
	let image_ref = NodeRef::<leptos::html::Img>::new();
	let sequence = Rc::new(RefCell::new(LogoCrossfade::new(config.replays)));
	let fade_ms = config.fade_ms;

	Effect::new(move |_| {
		if let Some(video) = video_ref.get() {
			let video: HtmlVideoElement = video.into();
			video.set_muted(true);
			video.set_autoplay(true);
			let _ = video.play();
		}
	});

	let on_ended = move |_: Event| {
		let (Some(video), Some(image)) = (video_ref.get(), image_ref.get()) else {
			return;
		};
		let video: HtmlVideoElement = video.into();
		let image: HtmlElement = image.into();

		match sequence.borrow_mut().on_ended() {
			LogoStep::Replay => {
				video.set_current_time(0.0);
				let _ = video.play();
			}
			LogoStep::FadeOut => {
				debug!("logo: video finished, revealing image");
				let _ = video.class_list().add_1("fade-out");
				reveal_after(video, image, fade_ms);
			}
			LogoStep::Done => {}
		}
	};

	view! {
		<video node_ref=video_ref class="logo-video" src=video_src on:ended=on_ended />
		<img node_ref=image_ref class="logo-image" src=image_src style="display: none;" />
	}
}

/// Once the fade-out has run, hides the video and fades the image in.
fn reveal_after(video: HtmlVideoElement, image: HtmlElement, fade_ms: i32) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let swap = Closure::once_into_js(move || {
		let _ = video.pause();
		let _ = HtmlElement::style(&video).set_property("display", "none");
		let style = image.style();
		let _ = style.set_property("display", "block");
		let _ = style.set_property("opacity", "0");
		let _ = image.class_list().add_1("fade-in");

		// Opacity must change on a later frame for the transition to run.
		let show = Closure::once_into_js(move || {
			let _ = image.style().set_property("opacity", "1");
		});
		if let Some(win) = web_sys::window() {
			let _ = win.request_animation_frame(show.unchecked_ref());
		}
	});
	let _ = window
		.set_timeout_with_callback_and_timeout_and_arguments_0(swap.unchecked_ref(), fade_ms);
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn fades_after_the_first_play_by_default() {
		let mut seq = LogoCrossfade::new(0);
		assert_eq!(seq.on_ended(), LogoStep::FadeOut);
		assert_eq!(seq.on_ended(), LogoStep::Done);
		assert_eq!(seq.plays(), 2);
	}

	#[test]
	fn replays_before_fading() {
		let mut seq = LogoCrossfade::new(2);
		assert_eq!(seq.on_ended(), LogoStep::Replay);
		assert_eq!(seq.on_ended(), LogoStep::Replay);
		assert_eq!(seq.on_ended(), LogoStep::FadeOut);
	}

	#[test]
	fn config_defaults_match_the_stock_intro() {
		let config: LogoConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config.replays, 0);
		assert_eq!(config.fade_ms, 600);
		assert_eq!(config.video_src, None);
	}
}
