//! Decorative effects sharing the page with the dust text: a drifting
//! background glow and the logo intro.

mod glow;
mod logo;

use serde::Deserialize;

pub use glow::{AmbientGlow, GlowAnimator, GlowConfig, GlowOffsets};
pub use logo::{LogoConfig, LogoCrossfade, LogoReveal, LogoStep};

/// Settings for the ambient effects.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
	/// Background glow drift.
	pub glow: GlowConfig,
	/// Logo intro sequence.
	pub logo: LogoConfig,
}
