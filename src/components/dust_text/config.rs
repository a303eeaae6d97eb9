//! Tunable constants for the dust text effect.
//!
//! Every value has a default matching the stock look (blue dust forming a bold
//! white-stenciled label). A page can override any subset of them through a
//! JSON block; missing fields fall back to the defaults below.

use serde::Deserialize;

use super::color::Color;

/// Complete configuration of the dust text canvas.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DustConfig {
	/// Text rasterized into the mask.
	pub label: String,
	/// How the label is stenciled before sampling.
	pub text: TextStyle,
	/// How the stencil is scanned for ink pixels.
	pub sampling: SamplingConfig,
	/// Per-particle physical constants.
	pub particle: ParticleParams,
	/// Pointer repulsion and click boost.
	pub pointer: PointerConfig,
}

impl Default for DustConfig {
	fn default() -> Self {
		Self {
			label: "MOMINTECH".to_string(),
			text: TextStyle::default(),
			sampling: SamplingConfig::default(),
			particle: ParticleParams::default(),
			pointer: PointerConfig::default(),
		}
	}
}

/// Font and fill used to stencil the label.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
	/// CSS font family list.
	pub font_family: String,
	/// CSS font weight keyword.
	pub font_weight: String,
	/// Upper bound on the font size in pixels.
	pub max_font_px: f64,
	/// Font size as a fraction of the surface width, before capping.
	pub width_ratio: f64,
	/// Canvas `textAlign` keyword.
	pub align: String,
	/// Canvas `textBaseline` keyword.
	pub baseline: String,
	/// Stencil fill color. Only its alpha matters for sampling.
	pub color: Color,
}

impl Default for TextStyle {
	fn default() -> Self {
		Self {
			font_family: "Roboto, Arial".to_string(),
			font_weight: "bold".to_string(),
			max_font_px: 100.0,
			width_ratio: 0.15,
			align: "center".to_string(),
			baseline: "middle".to_string(),
			color: Color::WHITE,
		}
	}
}

impl TextStyle {
	/// Responsive font size: proportional to width, capped at `max_font_px`.
	pub fn font_px(&self, surface_width: f64) -> f64 {
		self.max_font_px.min(surface_width * self.width_ratio)
	}

	/// CSS `font` shorthand for a given pixel size.
	pub fn css_font(&self, font_px: f64) -> String {
		format!("{} {}px {}", self.font_weight, font_px, self.font_family)
	}
}

/// Scan parameters for extracting ink pixels from the stencil.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
	/// Distance between samples along both axes.
	pub stride: u32,
	/// Alpha a pixel must strictly exceed to count as ink.
	pub alpha_threshold: u8,
}

impl Default for SamplingConfig {
	fn default() -> Self {
		Self {
			stride: 2,
			alpha_threshold: 150,
		}
	}
}

/// Constants shared by every particle of a swarm.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleParams {
	/// Render and collision radius.
	pub radius: f64,
	/// Velocity multiplier applied once per tick.
	pub damping: f64,
	/// Fraction of speed kept (and reversed) on a wall bounce.
	pub restitution: f64,
	/// Stiffness of the pull back toward the home position.
	pub spring: f64,
	/// Lower bound (inclusive) of the random per-particle density.
	pub density_min: f64,
	/// Upper bound (exclusive) of the random per-particle density.
	pub density_max: f64,
	/// Fill color of every particle.
	pub color: Color,
}

impl Default for ParticleParams {
	fn default() -> Self {
		Self {
			radius: 0.7,
			damping: 0.95,
			restitution: 0.8,
			spring: 0.01,
			density_min: 3.0,
			density_max: 13.0,
			color: Color::DUST_BLUE,
		}
	}
}

/// What happens when a click lands while a previous boost is still active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostOverlap {
	/// Each click keeps its own expiry; the earliest one ends the boost.
	#[default]
	Independent,
	/// A click restarts the boost window.
	Extend,
}

/// Pointer repulsion settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
	/// Resting repulsion radius in pixels.
	pub radius: f64,
	/// Repulsion radius while a click boost is active.
	pub boost_radius: f64,
	/// Length of a click boost in milliseconds.
	pub boost_ms: f64,
	/// Fraction of the remaining gap closed by the smoothed pointer per tick.
	pub smoothing: f64,
	/// Overlapping click behavior.
	pub boost_overlap: BoostOverlap,
}

impl Default for PointerConfig {
	fn default() -> Self {
		Self {
			radius: 120.0,
			boost_radius: 300.0,
			boost_ms: 200.0,
			smoothing: 0.15,
			boost_overlap: BoostOverlap::Independent,
		}
	}
}
