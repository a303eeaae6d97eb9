//! Glowing dust text rendered on an HTML canvas.
//!
//! A label is stenciled onto the canvas, its opaque pixels are sampled on a
//! coarse grid, and each sample becomes the home of one particle:
//! - Particles spring back toward their home and are damped every frame
//! - A smoothed pointer pushes nearby particles away; clicks widen its reach
//! - Particles bounce inelastically off the canvas edges
//! - Any size change of the host box rebuilds the stencil and the swarm
//!
//! # Example
//!
//! ```ignore
//! use dust_text::{DustConfig, DustTextCanvas};
//!
//! let config = DustConfig {
//!     label: "HELLO".into(),
//!     ..DustConfig::default()
//! };
//!
//! view! {
//!     <div class="ambient-box">
//!         <DustTextCanvas config=config />
//!     </div>
//! }
//! ```

mod bounds;
mod color;
mod component;
pub mod config;
mod mask;
mod particles;
mod pointer;
mod resize;
mod simulation;
mod surface;

pub use bounds::Bounds;
pub use color::Color;
pub use component::DustTextCanvas;
pub use config::DustConfig;
pub use mask::TextMask;
pub use particles::{
	Particle, ParticleSwarm, apply_damping, apply_pointer_repulsion, apply_spring,
	collide_with_bounds, draw_particle, integrate, repulsion_force, step_particle,
};
pub use pointer::{POINTER_SENTINEL, PointerTracker};
pub use resize::ResizeCoordinator;
pub use simulation::DustSimulation;
pub use surface::{CanvasSurface, RenderSurface, SurfaceError};
