//! Text stencil capture and ink sampling.
//!
//! The label is drawn onto the visible surface, its pixels are read back, and
//! the surface is cleared again before anything is presented, so the user only
//! ever sees particles. The alpha channel of that snapshot is the mask.

use log::warn;

use super::config::{SamplingConfig, TextStyle};
use super::surface::{RenderSurface, SurfaceError};

/// Alpha snapshot of the rasterized label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextMask {
	width: u32,
	height: u32,
	/// Row-major, one byte per pixel.
	alpha: Vec<u8>,
}

impl TextMask {
	/// A mask with no ink, e.g. for a surface that was never laid out.
	pub fn empty(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			alpha: vec![0; width as usize * height as usize],
		}
	}

	/// Builds a mask from an RGBA buffer, keeping only the alpha channel.
	pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, SurfaceError> {
		let expected = width as usize * height as usize * 4;
		if rgba.len() != expected {
			return Err(SurfaceError::BufferSize {
				len: rgba.len(),
				width,
				height,
			});
		}
		Ok(Self {
			width,
			height,
			alpha: rgba.chunks_exact(4).map(|px| px[3]).collect(),
		})
	}

	/// Stencils `label` centered on the surface and captures its alpha.
	///
	/// Never fails: a readback error or a zero-area surface yields an empty
	/// mask of the surface's dimensions.
	pub fn rasterize<S: RenderSurface>(surface: &mut S, label: &str, style: &TextStyle) -> Self {
		let (width, height) = (surface.width(), surface.height());
		let font_px = style.font_px(width as f64);
		surface.fill_text(
			label,
			width as f64 / 2.0,
			height as f64 / 2.0,
			style,
			font_px,
		);

		let mask = if width == 0 || height == 0 {
			Self::empty(width, height)
		} else {
			match surface
				.read_rgba()
				.and_then(|rgba| Self::from_rgba(width, height, &rgba))
			{
				Ok(mask) => mask,
				Err(e) => {
					warn!("dust-text: text mask capture failed, seeding nothing: {e}");
					Self::empty(width, height)
				}
			}
		};

		surface.clear();
		mask
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	/// Alpha at `(x, y)`, or 0 outside the mask.
	pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
		if x >= self.width || y >= self.height {
			return 0;
		}
		self.alpha[y as usize * self.width as usize + x as usize]
	}

	/// Ink coordinates on a `stride` grid, in row-major order.
	///
	/// A pixel is ink when its alpha is strictly above `alpha_threshold`.
	/// A stride of 0 is treated as 1.
	pub fn ink_pixels(&self, sampling: &SamplingConfig) -> Vec<(u32, u32)> {
		let stride = sampling.stride.max(1) as usize;
		let mut ink = Vec::new();
		for y in (0..self.height).step_by(stride) {
			for x in (0..self.width).step_by(stride) {
				if self.alpha_at(x, y) > sampling.alpha_threshold {
					ink.push((x, y));
				}
			}
		}
		ink
	}
}
