//! Simulation state driven once per animation frame.
//!
//! [`DustSimulation`] owns everything the effect mutates: the collision bounds,
//! the current text mask, the swarm and the pointer. Host events write into it
//! through its methods and the animation loop calls [`DustSimulation::tick`].
//! Resizing is a plain synchronous call, so the whole pipeline can be driven
//! without a browser.

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::bounds::Bounds;
use super::config::DustConfig;
use super::mask::TextMask;
use super::particles::ParticleSwarm;
use super::pointer::PointerTracker;
use super::surface::RenderSurface;

/// Complete state of one dust text canvas.
pub struct DustSimulation {
	config: DustConfig,
	bounds: Bounds,
	mask: TextMask,
	swarm: ParticleSwarm,
	pointer: PointerTracker,
	rng: SmallRng,
	/// Clicks waiting for the next frame's timestamp.
	pending_clicks: u32,
	frames: u64,
	reseeds: u64,
}

impl DustSimulation {
	/// Empty simulation; nothing is seeded until the first resize.
	pub fn new(config: DustConfig, seed: u64) -> Self {
		Self {
			pointer: PointerTracker::new(config.pointer.clone()),
			config,
			bounds: Bounds::default(),
			mask: TextMask::default(),
			swarm: ParticleSwarm::default(),
			rng: SmallRng::seed_from_u64(seed),
			pending_clicks: 0,
			frames: 0,
			reseeds: 0,
		}
	}

	/// Reacts to a new host size: resizes the surface, recomputes the bounds,
	/// rebuilds the mask and replaces the swarm, in that order.
	pub fn on_surface_resized<S: RenderSurface>(
		&mut self,
		surface: &mut S,
		width: u32,
		height: u32,
	) {
		surface.set_size(width, height);
		self.bounds = Bounds::from_size(surface.width(), surface.height());
		self.mask = TextMask::rasterize(surface, &self.config.label, &self.config.text);
		self.swarm.reseed(
			&self.mask,
			&self.config.sampling,
			&self.bounds,
			&self.config.particle,
			&mut self.rng,
		);
		self.reseeds += 1;
		debug!(
			"dust-text: reseeded {} particles for {}x{}",
			self.swarm.len(),
			width,
			height
		);
	}

	/// Applies queued clicks, advances the pointer, clears the frame, then steps
	/// and draws every particle.
	pub fn tick<S: RenderSurface>(&mut self, surface: &mut S, now_ms: f64) {
		self.frames += 1;
		for _ in 0..std::mem::take(&mut self.pending_clicks) {
			self.pointer.trigger_boost(now_ms);
		}
		self.pointer.advance(now_ms);

		surface.clear();
		self.swarm.update_and_draw(
			surface,
			self.pointer.smoothed(),
			self.pointer.radius(),
			&self.config.particle,
			&self.bounds,
		);
	}

	/// Pointer moved to surface-local `(x, y)`.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.pointer.move_to(x, y);
	}

	pub fn pointer_left(&mut self) {
		self.pointer.leave();
	}

	/// Click or tap. The boost starts on the next frame and lasts the full
	/// boost window measured from that frame's timestamp, including clicks
	/// that arrive before the first frame.
	pub fn pointer_clicked(&mut self) {
		self.pending_clicks += 1;
	}

	pub fn config(&self) -> &DustConfig {
		&self.config
	}

	pub fn bounds(&self) -> &Bounds {
		&self.bounds
	}

	pub fn mask(&self) -> &TextMask {
		&self.mask
	}

	pub fn swarm(&self) -> &ParticleSwarm {
		&self.swarm
	}

	pub fn pointer(&self) -> &PointerTracker {
		&self.pointer
	}

	/// Frames simulated so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Number of completed reseed passes.
	pub fn reseeds(&self) -> u64 {
		self.reseeds
	}
}
