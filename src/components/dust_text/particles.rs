//! Dust particles seeded from a text mask.
//!
//! Particles are plain records; the physics is a set of free functions applied
//! in a fixed order by [`step_particle`]. A particle never looks at another
//! particle, so the swarm can be iterated in any order.

use rand::Rng;

use super::bounds::Bounds;
use super::config::{ParticleParams, SamplingConfig};
use super::mask::TextMask;
use super::surface::RenderSurface;

/// A single dust particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	/// Scales how hard the pointer pushes this particle.
	pub density: f64,
	pub damping: f64,
	pub restitution: f64,
	home_x: f64,
	home_y: f64,
}

impl Particle {
	/// A resting particle at `position` that springs back to `home`.
	pub fn new(
		position: (f64, f64),
		home: (f64, f64),
		density: f64,
		params: &ParticleParams,
	) -> Self {
		Self {
			x: position.0,
			y: position.1,
			vx: 0.0,
			vy: 0.0,
			radius: params.radius,
			density,
			damping: params.damping,
			restitution: params.restitution,
			home_x: home.0,
			home_y: home.1,
		}
	}

	/// Formation target sampled from the mask.
	pub fn home(&self) -> (f64, f64) {
		(self.home_x, self.home_y)
	}

	#[cfg(test)]
	pub fn speed(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}
}

/// Linear falloff: 1 at the pointer, 0 at `radius` and beyond.
pub fn repulsion_force(distance: f64, radius: f64) -> f64 {
	if radius <= 0.0 || distance >= radius {
		return 0.0;
	}
	(radius - distance) / radius
}

/// Pushes the particle away from the pointer when it is inside `radius`.
pub fn apply_pointer_repulsion(p: &mut Particle, pointer: (f64, f64), radius: f64) {
	let (dx, dy) = (pointer.0 - p.x, pointer.1 - p.y);
	let dist_sq = dx * dx + dy * dy;
	if dist_sq >= radius * radius {
		return;
	}
	let dist = match dist_sq.sqrt() {
		d if d == 0.0 => 1.0,
		d => d,
	};
	let force = repulsion_force(dist, radius);
	p.vx -= dx / dist * force * p.density;
	p.vy -= dy / dist * force * p.density;
}

/// Pulls the particle toward its home with constant stiffness.
pub fn apply_spring(p: &mut Particle, stiffness: f64) {
	p.vx += (p.home_x - p.x) * stiffness;
	p.vy += (p.home_y - p.y) * stiffness;
}

pub fn apply_damping(p: &mut Particle) {
	p.vx *= p.damping;
	p.vy *= p.damping;
}

/// Explicit Euler step with a one-frame timestep.
pub fn integrate(p: &mut Particle) {
	p.x += p.vx;
	p.y += p.vy;
}

/// Clamps an escaped particle back inside and bounces it inelastically.
pub fn collide_with_bounds(p: &mut Particle, bounds: &Bounds) {
	let r = p.radius;
	if p.x - r < bounds.left {
		p.x = bounds.left + r;
		p.vx *= -p.restitution;
	}
	if p.x + r > bounds.right {
		p.x = bounds.right - r;
		p.vx *= -p.restitution;
	}
	if p.y - r < bounds.top {
		p.y = bounds.top + r;
		p.vy *= -p.restitution;
	}
	if p.y + r > bounds.bottom {
		p.y = bounds.bottom - r;
		p.vy *= -p.restitution;
	}
}

/// Advances one particle by one frame.
///
/// Order matters: both forces feed the velocity before damping, and the wall
/// check runs after integration so it corrects an already escaped position.
pub fn step_particle(
	p: &mut Particle,
	pointer: (f64, f64),
	pointer_radius: f64,
	stiffness: f64,
	bounds: &Bounds,
) {
	apply_pointer_repulsion(p, pointer, pointer_radius);
	apply_spring(p, stiffness);
	apply_damping(p);
	integrate(p);
	collide_with_bounds(p, bounds);
}

pub fn draw_particle<S: RenderSurface>(surface: &mut S, p: &Particle, color: &str) {
	surface.fill_circle(p.x, p.y, p.radius, color);
}

/// Owns every particle of the current formation.
#[derive(Clone, Debug, Default)]
pub struct ParticleSwarm {
	particles: Vec<Particle>,
}

impl ParticleSwarm {
	/// Replaces the whole swarm with one particle per ink pixel of `mask`.
	///
	/// Particles start scattered uniformly over `bounds` and fly into
	/// formation over the following frames.
	pub fn reseed<R: Rng>(
		&mut self,
		mask: &TextMask,
		sampling: &SamplingConfig,
		bounds: &Bounds,
		params: &ParticleParams,
		rng: &mut R,
	) {
		let ink = mask.ink_pixels(sampling);
		let mut particles = Vec::with_capacity(ink.len());
		for (hx, hy) in ink {
			let position = (
				uniform(rng, bounds.left, bounds.right),
				uniform(rng, bounds.top, bounds.bottom),
			);
			let density = uniform(rng, params.density_min, params.density_max);
			particles.push(Particle::new(
				position,
				(hx as f64, hy as f64),
				density,
				params,
			));
		}
		self.particles = particles;
	}

	/// Steps every particle by one frame.
	#[cfg(test)]
	pub fn update(
		&mut self,
		pointer: (f64, f64),
		pointer_radius: f64,
		stiffness: f64,
		bounds: &Bounds,
	) {
		for p in &mut self.particles {
			step_particle(p, pointer, pointer_radius, stiffness, bounds);
		}
	}

	/// Steps and draws each particle in turn.
	pub fn update_and_draw<S: RenderSurface>(
		&mut self,
		surface: &mut S,
		pointer: (f64, f64),
		pointer_radius: f64,
		params: &ParticleParams,
		bounds: &Bounds,
	) {
		let color = params.color.to_css();
		for p in &mut self.particles {
			step_particle(p, pointer, pointer_radius, params.spring, bounds);
			draw_particle(surface, p, &color);
		}
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Particle> {
		self.particles.iter()
	}

	/// Home positions in swarm order.
	pub fn homes(&self) -> Vec<(f64, f64)> {
		self.particles.iter().map(Particle::home).collect()
	}
}

/// Uniform sample in `[lo, hi)`, or `lo` for an empty range.
fn uniform<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::surface::testing::{DrawCall, MemorySurface};
	use super::*;

	const FAR: (f64, f64) = (-9999.0, -9999.0);

	fn particle_at(x: f64, y: f64) -> Particle {
		Particle::new((x, y), (x, y), 5.0, &ParticleParams::default())
	}

	fn opaque_mask(width: u32, height: u32) -> TextMask {
		TextMask::from_rgba(width, height, &vec![255; (width * height * 4) as usize]).unwrap()
	}

	#[test]
	fn repulsion_at_zero_distance_uses_unit_distance() {
		let force = repulsion_force(1.0, 120.0);
		assert!((force - 119.0 / 120.0).abs() < 1e-12);
		assert!((force * 5.0 - 4.958).abs() < 1e-3);

		// The direction is degenerate, so the push itself vanishes.
		let mut p = particle_at(50.0, 50.0);
		apply_pointer_repulsion(&mut p, (50.0, 50.0), 120.0);
		assert_eq!((p.vx, p.vy), (0.0, 0.0));
	}

	#[test]
	fn repulsion_pushes_away_from_pointer() {
		let mut p = particle_at(100.0, 50.0);
		apply_pointer_repulsion(&mut p, (40.0, 50.0), 120.0);
		let expected = 0.5 * 5.0;
		assert!((p.vx - expected).abs() < 1e-12);
		assert_eq!(p.vy, 0.0);
	}

	#[test]
	fn repulsion_is_zero_at_and_beyond_radius() {
		assert_eq!(repulsion_force(120.0, 120.0), 0.0);
		assert_eq!(repulsion_force(500.0, 120.0), 0.0);

		let mut p = particle_at(0.0, 0.0);
		apply_pointer_repulsion(&mut p, (120.0, 0.0), 120.0);
		assert_eq!((p.vx, p.vy), (0.0, 0.0));
	}

	#[test]
	fn step_applies_forces_before_damping() {
		let params = ParticleParams::default();
		let mut p = Particle::new((10.0, 10.0), (20.0, 10.0), 5.0, &params);
		step_particle(&mut p, FAR, 120.0, params.spring, &Bounds::from_size(100, 100));

		// spring 0.1, damped to 0.095, then integrated
		assert!((p.vx - 0.095).abs() < 1e-12);
		assert!((p.x - 10.095).abs() < 1e-12);
		assert_eq!(p.home(), (20.0, 10.0));
	}

	#[test]
	fn wall_bounce_reverses_and_loses_speed() {
		let mut p = particle_at(0.5, 50.0);
		p.vx = -10.0;
		integrate(&mut p);
		collide_with_bounds(&mut p, &Bounds::from_size(100, 100));
		assert!((p.x - 0.7).abs() < 1e-12);
		assert!((p.vx - 8.0).abs() < 1e-12);

		let mut p = particle_at(50.0, 99.9);
		p.vy = 3.0;
		integrate(&mut p);
		collide_with_bounds(&mut p, &Bounds::from_size(100, 100));
		assert!((p.y - 99.3).abs() < 1e-12);
		assert!((p.vy + 2.4).abs() < 1e-12);
	}

	#[test]
	fn reseed_creates_one_particle_per_ink_pixel() {
		let mut swarm = ParticleSwarm::default();
		let mut rng = SmallRng::seed_from_u64(7);
		let params = ParticleParams::default();
		swarm.reseed(
			&opaque_mask(4, 4),
			&SamplingConfig::default(),
			&Bounds::from_size(4, 4),
			&params,
			&mut rng,
		);

		assert_eq!(
			swarm.homes(),
			vec![(0.0, 0.0), (2.0, 0.0), (0.0, 2.0), (2.0, 2.0)]
		);
		for p in swarm.iter() {
			assert!((3.0..13.0).contains(&p.density));
			assert!((0.0..4.0).contains(&p.x) && (0.0..4.0).contains(&p.y));
			assert_eq!((p.vx, p.vy), (0.0, 0.0));
		}
	}

	#[test]
	fn reseed_twice_keeps_homes_but_rerolls_state() {
		let mask = opaque_mask(16, 8);
		let bounds = Bounds::from_size(16, 8);
		let params = ParticleParams::default();
		let mut rng = SmallRng::seed_from_u64(42);

		let mut swarm = ParticleSwarm::default();
		swarm.reseed(&mask, &SamplingConfig::default(), &bounds, &params, &mut rng);
		let first: Vec<Particle> = swarm.iter().cloned().collect();
		swarm.reseed(&mask, &SamplingConfig::default(), &bounds, &params, &mut rng);

		assert_eq!(swarm.len(), first.len());
		let mut a: Vec<_> = first.iter().map(Particle::home).collect();
		let mut b = swarm.homes();
		a.sort_by(|l, r| l.partial_cmp(r).unwrap());
		b.sort_by(|l, r| l.partial_cmp(r).unwrap());
		assert_eq!(a, b);
		assert!(first.iter().zip(swarm.iter()).any(|(l, r)| l.density != r.density));
	}

	#[test]
	fn empty_mask_gives_empty_swarm() {
		let mut swarm = ParticleSwarm::default();
		swarm.reseed(
			&TextMask::empty(0, 0),
			&SamplingConfig::default(),
			&Bounds::from_size(0, 0),
			&ParticleParams::default(),
			&mut SmallRng::seed_from_u64(1),
		);
		assert!(swarm.is_empty());
		swarm.update(FAR, 120.0, 0.01, &Bounds::from_size(0, 0));
	}

	#[test]
	fn update_and_draw_renders_each_particle_once() {
		let mut swarm = ParticleSwarm::default();
		let params = ParticleParams::default();
		let bounds = Bounds::from_size(4, 4);
		swarm.reseed(
			&opaque_mask(4, 4),
			&SamplingConfig::default(),
			&bounds,
			&params,
			&mut SmallRng::seed_from_u64(3),
		);
		let mut surface = MemorySurface::new(4, 4);
		swarm.update_and_draw(&mut surface, FAR, 120.0, &params, &bounds);

		let circles: Vec<_> = surface
			.calls
			.iter()
			.filter_map(|c| match c {
				DrawCall::Circle { radius, color, .. } => Some((*radius, color.clone())),
				_ => None,
			})
			.collect();
		assert_eq!(circles, vec![(0.7, "#1c75bc".to_string()); 4]);
	}

	#[test]
	fn settles_at_home_without_pointer() {
		let params = ParticleParams::default();
		let bounds = Bounds::from_size(400, 400);
		let mut p = Particle::new((300.0, 50.0), (120.0, 200.0), 7.0, &params);
		p.vx = 6.0;
		p.vy = -4.0;

		for _ in 0..2000 {
			step_particle(&mut p, FAR, 120.0, params.spring, &bounds);
		}
		let (hx, hy) = p.home();
		assert!((p.x - hx).abs() < 1e-3 && (p.y - hy).abs() < 1e-3);
		assert!(p.speed() < 1e-3);
	}

	proptest! {
		#[test]
		fn repulsion_decreases_with_distance(
			radius in 1.0f64..500.0,
			a in 0.0f64..1.0,
			b in 0.0f64..1.0,
		) {
			let (lo, hi) = if a < b { (a, b) } else { (b, a) };
			let (near, far) = (lo * radius, hi * radius);
			prop_assume!(far - near > radius * 1e-9);
			prop_assert!(repulsion_force(near, radius) > repulsion_force(far, radius));
			prop_assert_eq!(repulsion_force(radius, radius), 0.0);
		}

		#[test]
		fn particles_stay_inside_bounds(
			width in 10u32..300,
			height in 10u32..300,
			x in 0.0f64..1.0,
			y in 0.0f64..1.0,
			vx in -80.0f64..80.0,
			vy in -80.0f64..80.0,
			px in -50.0f64..350.0,
			py in -50.0f64..350.0,
			density in 3.0f64..13.0,
			ticks in 1usize..200,
		) {
			let params = ParticleParams::default();
			let bounds = Bounds::from_size(width, height);
			let home = (x * width as f64, y * height as f64);
			let mut p = Particle::new(home, home, density, &params);
			p.vx = vx;
			p.vy = vy;
			for _ in 0..ticks {
				step_particle(&mut p, (px, py), 300.0, params.spring, &bounds);
				let eps = 1e-9;
				prop_assert!(p.x - p.radius >= bounds.left - eps);
				prop_assert!(p.x + p.radius <= bounds.right + eps);
				prop_assert!(p.y - p.radius >= bounds.top - eps);
				prop_assert!(p.y + p.radius <= bounds.bottom + eps);
			}
		}
	}
}
