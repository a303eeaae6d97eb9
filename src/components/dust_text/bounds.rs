//! Collision region tracking the surface size.

/// Axis-aligned walls particles bounce off.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub left: f64,
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
}

impl Bounds {
	/// Bounds covering a `width × height` surface anchored at the origin.
	pub fn from_size(width: u32, height: u32) -> Self {
		Self {
			left: 0.0,
			top: 0.0,
			right: width as f64,
			bottom: height as f64,
		}
	}

	pub fn width(&self) -> f64 {
		self.right - self.left
	}

	pub fn height(&self) -> f64 {
		self.bottom - self.top
	}

	/// Whether a circle of `radius` at `(x, y)` lies inside, edges included.
	#[cfg(test)]
	pub fn contains_circle(&self, x: f64, y: f64, radius: f64) -> bool {
		x - radius >= self.left
			&& x + radius <= self.right
			&& y - radius >= self.top
			&& y + radius <= self.bottom
	}
}
