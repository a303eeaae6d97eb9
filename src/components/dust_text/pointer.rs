//! Smoothed pointer used as the repulsion source.
//!
//! Raw pointer coordinates jump around with every input event; the particles
//! instead react to an exponentially lagged copy that is advanced once per
//! frame. A click widens the repulsion radius for a short window. Instead of
//! a deferred callback restoring the radius, expiry timestamps are recorded and
//! checked on every [`PointerTracker::advance`].

use std::collections::VecDeque;

use super::config::{BoostOverlap, PointerConfig};

/// Position used while no pointer is over the page.
pub const POINTER_SENTINEL: (f64, f64) = (-9999.0, -9999.0);

/// Pointer state sampled by the simulation.
#[derive(Clone, Debug)]
pub struct PointerTracker {
	raw: (f64, f64),
	smoothed: (f64, f64),
	radius: f64,
	config: PointerConfig,
	/// Pending boost expiries in frame-clock milliseconds, oldest first.
	boost_expiries: VecDeque<f64>,
}

impl PointerTracker {
	pub fn new(config: PointerConfig) -> Self {
		Self {
			raw: POINTER_SENTINEL,
			smoothed: POINTER_SENTINEL,
			radius: config.radius,
			config,
			boost_expiries: VecDeque::new(),
		}
	}

	/// Records a pointer position in surface-local coordinates.
	pub fn move_to(&mut self, x: f64, y: f64) {
		self.raw = (x, y);
	}

	/// Parks the pointer far away so nothing is repelled.
	pub fn leave(&mut self) {
		self.raw = POINTER_SENTINEL;
	}

	/// Widens the repulsion radius until `now_ms + boost_ms`.
	pub fn trigger_boost(&mut self, now_ms: f64) {
		let expires = now_ms + self.config.boost_ms;
		if self.config.boost_overlap == BoostOverlap::Extend {
			self.boost_expiries.clear();
		}
		self.boost_expiries.push_back(expires);
		self.radius = self.config.boost_radius;
	}

	/// Per-frame update: eases the smoothed position toward the raw one and
	/// ends the boost once an expiry has been reached.
	///
	/// With [`BoostOverlap::Independent`] the earliest pending expiry restores
	/// the resting radius even if a later click is still within its window.
	pub fn advance(&mut self, now_ms: f64) {
		let k = self.config.smoothing;
		self.smoothed.0 += (self.raw.0 - self.smoothed.0) * k;
		self.smoothed.1 += (self.raw.1 - self.smoothed.1) * k;

		let mut expired = false;
		while self.boost_expiries.front().is_some_and(|&t| t <= now_ms) {
			self.boost_expiries.pop_front();
			expired = true;
		}
		if expired {
			self.radius = self.config.radius;
		}
	}

	pub fn raw(&self) -> (f64, f64) {
		self.raw
	}

	pub fn smoothed(&self) -> (f64, f64) {
		self.smoothed
	}

	/// Current repulsion radius.
	pub fn radius(&self) -> f64 {
		self.radius
	}

	pub fn is_boosted(&self) -> bool {
		self.radius != self.config.radius
	}
}
