//! dust-text: glyph-sampled particle text for the web.
//!
//! This crate provides a WASM-based canvas component that turns a text label
//! into a swarm of dust particles which spring back into formation, scatter
//! away from the pointer and re-form whenever their host box is resized.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::ambient::{AmbientConfig, AmbientGlow, LogoReveal};
pub use components::dust_text::{DustConfig, DustSimulation, DustTextCanvas};

/// Page-level configuration, read from the document at startup.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
	/// Document title.
	pub title: String,
	/// CSS height of the box hosting the canvas. The canvas is absolutely
	/// positioned, so the host needs its own height or nothing is seeded.
	pub host_height: String,
	/// Dust text canvas settings.
	pub dust: DustConfig,
	/// Glow and logo settings.
	pub ambient: AmbientConfig,
}

impl Default for PageConfig {
	fn default() -> Self {
		Self {
			title: "MOMINTECH".to_string(),
			host_height: "40vh".to_string(),
			dust: DustConfig::default(),
			ambient: AmbientConfig::default(),
		}
	}
}

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("dust-text: logging initialized");
}

/// Load page configuration from a script element with id="dust-config".
/// Expected format: JSON matching [`PageConfig`]; every field is optional.
fn load_page_config() -> Option<PageConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("dust-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	parse_page_config(&json_text)
}

fn parse_page_config(json_text: &str) -> Option<PageConfig> {
	match serde_json::from_str::<PageConfig>(json_text) {
		Ok(config) => {
			info!("dust-text: loaded config for label {:?}", config.dust.label);
			Some(config)
		}
		Err(e) => {
			warn!("dust-text: failed to parse config, using defaults: {}", e);
			None
		}
	}
}

fn host_style(height: &str) -> String {
	format!("position: relative; width: 100%; height: {height};")
}

/// Main application component.
/// Loads the page config from the DOM and renders the glow, the dust text and
/// the logo intro.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let PageConfig {
		title,
		host_height,
		dust,
		ambient,
	} = load_page_config().unwrap_or_default();
	let logo = match (ambient.logo.video_src.clone(), ambient.logo.image_src.clone()) {
		(Some(video), Some(image)) => Some((video, image, ambient.logo.clone())),
		_ => None,
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<AmbientGlow config=ambient.glow />
		<div class="ambient-box" style=host_style(&host_height)>
			<DustTextCanvas config=dust />
		</div>
		{logo.map(|(video, image, config)| view! {
			<div class="logo">
				<LogoReveal video_src=video image_src=image config=config />
			</div>
		})}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::dust_text::config::BoostOverlap;

	#[test]
	fn page_config_from_partial_json() {
		let config = parse_page_config(
			r#"{
				"title": "Demo",
				"dust": { "label": "DUST", "pointer": { "boost_overlap": "extend" } },
				"ambient": { "logo": { "video_src": "logo.mp4", "image_src": "logo.png" } }
			}"#,
		)
		.unwrap();

		assert_eq!(config.title, "Demo");
		assert_eq!(config.dust.label, "DUST");
		assert_eq!(config.dust.pointer.boost_overlap, BoostOverlap::Extend);
		assert_eq!(config.ambient.logo.video_src.as_deref(), Some("logo.mp4"));
		assert_eq!(config.ambient.logo.fade_ms, 600);
	}

	#[test]
	fn invalid_json_falls_back() {
		assert_eq!(parse_page_config("{ not json"), None);
		assert_eq!(
			parse_page_config("{}").unwrap_or_default(),
			PageConfig::default()
		);
	}

	#[test]
	fn host_box_has_its_own_height() {
		let config = PageConfig::default();
		assert_eq!(
			host_style(&config.host_height),
			"position: relative; width: 100%; height: 40vh;"
		);
		let config = parse_page_config(r#"{ "host_height": "320px" }"#).unwrap();
		assert!(host_style(&config.host_height).ends_with("height: 320px;"));
	}
}
