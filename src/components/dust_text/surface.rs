//! Drawing surface abstraction.
//!
//! The simulation only needs a handful of 2D operations: clear, filled circle,
//! filled text and an RGBA readback. [`RenderSurface`] captures exactly that so
//! the core can run against an HTML canvas in the browser and against an
//! in-memory buffer in tests.

use std::f64::consts::TAU;

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::TextStyle;

/// Failures of the underlying drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
	/// The canvas refused to hand out a 2D context.
	#[error("canvas has no 2d rendering context: {0}")]
	NoContext(String),
	/// Reading pixels back failed.
	#[error("pixel readback failed: {0}")]
	Readback(String),
	/// A pixel buffer does not cover the surface it claims to describe.
	#[error("buffer of {len} bytes does not match a {width}x{height} RGBA surface")]
	BufferSize {
		/// Actual byte length.
		len: usize,
		/// Surface width in pixels.
		width: u32,
		/// Surface height in pixels.
		height: u32,
	},
}

impl SurfaceError {
	fn js(kind: fn(String) -> Self, value: JsValue) -> Self {
		kind(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// A 2D surface the dust text is drawn onto.
pub trait RenderSurface {
	/// Width in device pixels.
	fn width(&self) -> u32;
	/// Height in device pixels.
	fn height(&self) -> u32;
	/// Resizes the backing store. Contents are discarded.
	fn set_size(&mut self, width: u32, height: u32);
	/// Clears the whole surface to transparent.
	fn clear(&mut self);
	/// Fills a circle with a CSS color.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);
	/// Fills `text` anchored at `(x, y)` using the style's alignment and baseline.
	fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle, font_px: f64);
	/// Reads back the whole surface as row-major RGBA bytes.
	fn read_rgba(&self) -> Result<Vec<u8>, SurfaceError>;
}

/// [`RenderSurface`] backed by an HTML canvas element.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquires the canvas's 2D context.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
		let ctx = canvas
			.get_context("2d")
			.map_err(|e| SurfaceError::js(SurfaceError::NoContext, e))?
			.ok_or_else(|| SurfaceError::NoContext("context type unsupported".into()))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|e| SurfaceError::js(SurfaceError::NoContext, e.into()))?;
		Ok(Self { canvas, ctx })
	}
}

impl RenderSurface for CanvasSurface {
	fn width(&self) -> u32 {
		self.canvas.width()
	}

	fn height(&self) -> u32 {
		self.canvas.height()
	}

	fn set_size(&mut self, width: u32, height: u32) {
		self.canvas.set_width(width);
		self.canvas.set_height(height);
	}

	fn clear(&mut self) {
		self.ctx
			.clear_rect(0.0, 0.0, self.width() as f64, self.height() as f64);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
		self.ctx.set_fill_style_str(color);
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
		self.ctx.fill();
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle, font_px: f64) {
		self.ctx.set_fill_style_str(&style.color.to_css());
		self.ctx.set_font(&style.css_font(font_px));
		self.ctx.set_text_align(&style.align);
		self.ctx.set_text_baseline(&style.baseline);
		let _ = self.ctx.fill_text(text, x, y);
	}

	fn read_rgba(&self) -> Result<Vec<u8>, SurfaceError> {
		let (w, h) = (self.width(), self.height());
		if w == 0 || h == 0 {
			return Ok(Vec::new());
		}
		let image = self
			.ctx
			.get_image_data(0.0, 0.0, w as f64, h as f64)
			.map_err(|e| SurfaceError::js(SurfaceError::Readback, e))?;
		Ok(image.data().0)
	}
}

#[cfg(test)]
pub(crate) mod testing {
	//! In-memory surface used by the simulation tests.

	use super::*;

	/// Every drawing call a [`MemorySurface`] has received.
	#[derive(Clone, Debug, PartialEq)]
	pub enum DrawCall {
		Resize(u32, u32),
		Clear,
		Circle { x: f64, y: f64, radius: f64, color: String },
		Text { text: String, x: f64, y: f64, font: String },
	}

	/// RGBA buffer with a crude glyph model: text fills an opaque box
	/// `0.6 * font_px` wide per character and `0.7 * font_px` tall, centered on
	/// the anchor point.
	#[derive(Debug, Default)]
	pub struct MemorySurface {
		width: u32,
		height: u32,
		pub pixels: Vec<u8>,
		pub calls: Vec<DrawCall>,
	}

	impl MemorySurface {
		pub fn new(width: u32, height: u32) -> Self {
			let mut surface = Self::default();
			surface.set_size(width, height);
			surface.calls.clear();
			surface
		}

		pub fn fill_rect_opaque(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) {
			for y in y0..y1.min(self.height) {
				for x in x0..x1.min(self.width) {
					let i = ((y * self.width + x) * 4) as usize;
					self.pixels[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
				}
			}
		}

		pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
			self.calls.iter().filter(|c| pred(*c)).count()
		}
	}

	impl RenderSurface for MemorySurface {
		fn width(&self) -> u32 {
			self.width
		}

		fn height(&self) -> u32 {
			self.height
		}

		fn set_size(&mut self, width: u32, height: u32) {
			self.width = width;
			self.height = height;
			self.pixels = vec![0; (width * height * 4) as usize];
			self.calls.push(DrawCall::Resize(width, height));
		}

		fn clear(&mut self) {
			self.pixels.fill(0);
			self.calls.push(DrawCall::Clear);
		}

		fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
			self.calls.push(DrawCall::Circle {
				x,
				y,
				radius,
				color: color.to_string(),
			});
		}

		fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle, font_px: f64) {
			self.calls.push(DrawCall::Text {
				text: text.to_string(),
				x,
				y,
				font: style.css_font(font_px),
			});
			let half_w = text.chars().count() as f64 * font_px * 0.3;
			let half_h = font_px * 0.35;
			let clamp = |v: f64| v.max(0.0) as u32;
			self.fill_rect_opaque(
				clamp(x - half_w),
				clamp(y - half_h),
				clamp(x + half_w),
				clamp(y + half_h),
			);
		}

		fn read_rgba(&self) -> Result<Vec<u8>, SurfaceError> {
			Ok(self.pixels.clone())
		}
	}
}
