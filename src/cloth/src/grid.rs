use rand::Rng;

use crate::error::ClothError;
use crate::point_mass::PointMass;
use crate::spring::{Spring, SpringType};
use crate::V3;

/// Largest z offset applied to a vertical cloth.
pub const VERTICAL_JITTER: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
	/// Flat sheet in the xz plane at `y = 1`.
	Horizontal,
	/// Hanging sheet in the xy plane with a small random z offset per point.
	Vertical,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
	pub width: f64,
	pub height: f64,
	pub num_width_points: usize,
	pub num_height_points: usize,
	pub thickness: f64,
	pub orientation: Orientation,
	/// (row, col) pairs that never move.
	pub pinned: Vec<[usize; 2]>,
	pub seed: u64,
}

impl Default for GridConfig {
	fn default() -> Self {
		Self {
			width: 1.0,
			height: 1.0,
			num_width_points: 16,
			num_height_points: 16,
			thickness: 0.01,
			orientation: Orientation::Horizontal,
			pinned: Vec::new(),
			seed: 0,
		}
	}
}

impl GridConfig {
	pub fn new(
		width: f64,
		height: f64,
		num_width_points: usize,
		num_height_points: usize,
	) -> Self {
		Self {
			width,
			height,
			num_width_points,
			num_height_points,
			..Default::default()
		}
	}

	pub fn with_thickness(mut self, thickness: f64) -> Self {
		self.thickness = thickness;
		self
	}

	pub fn with_orientation(mut self, orientation: Orientation) -> Self {
		self.orientation = orientation;
		self
	}

	pub fn with_pinned(mut self, row: usize, col: usize) -> Self {
		self.pinned.push([row, col]);
		self
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}

	pub fn index(&self, row: usize, col: usize) -> usize {
		row * self.num_width_points + col
	}

	pub fn len(&self) -> usize {
		self.num_width_points * self.num_height_points
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn validate(&self) -> Result<(), ClothError> {
		let (cols, rows) = (self.num_width_points, self.num_height_points);
		if cols == 0 || rows == 0 {
			return Err(ClothError::InvalidGridDimensions {
				width_points: cols,
				height_points: rows,
			});
		}
		let extent_ok = |x: f64| x.is_finite() && x > 0.0;
		if !extent_ok(self.width) || !extent_ok(self.height) {
			return Err(ClothError::InvalidExtent {
				width: self.width,
				height: self.height,
			});
		}
		if !(self.thickness.is_finite() && self.thickness >= 0.0) {
			return Err(ClothError::InvalidThickness(self.thickness));
		}
		for &[row, col] in self.pinned.iter() {
			if row >= rows || col >= cols {
				return Err(ClothError::PinnedOutOfRange { row, col, rows, cols });
			}
		}
		Ok(())
	}
}

/// Point masses and the springs between them, before any stepping.
#[derive(Clone, Debug, Default)]
pub struct ClothGrid {
	pub point_masses: Vec<PointMass>,
	pub springs: Vec<Spring>,
}

impl ClothGrid {
	pub fn build<R: Rng>(
		config: &GridConfig,
		rng: &mut R,
	) -> Result<Self, ClothError> {
		config.validate()?;
		let cols = config.num_width_points;
		let rows = config.num_height_points;
		let row_step = config.height / rows as f64;
		let col_step = config.width / cols as f64;

		let mut point_masses = Vec::with_capacity(cols * rows);
		for row in 0..rows {
			for col in 0..cols {
				let pos = match config.orientation {
					Orientation::Horizontal => {
						V3::new(col_step * col as f64, 1.0, row_step * row as f64)
					}
					Orientation::Vertical => {
						let offset = rng.gen_range(-VERTICAL_JITTER..=VERTICAL_JITTER);
						V3::new(col_step * col as f64, row_step * row as f64, offset)
					}
				};
				point_masses.push(PointMass::new(pos, false));
			}
		}

		// every point is placed before rest lengths are taken
		let mut springs = Vec::with_capacity(cols * rows * 6);
		for row in 0..rows {
			for col in 0..cols {
				let c = config.index(row, col);
				let mut link = |r: usize, k: usize, ty: SpringType| {
					springs.push(Spring::new(&point_masses, c, config.index(r, k), ty));
				};
				if col > 0 {
					link(row, col - 1, SpringType::Structural);
				}
				if row > 0 {
					link(row - 1, col, SpringType::Structural);
				}
				if row > 0 && col > 0 {
					link(row - 1, col - 1, SpringType::Shearing);
				}
				if row > 0 && col + 1 < cols {
					link(row - 1, col + 1, SpringType::Shearing);
				}
				if col > 1 {
					link(row, col - 2, SpringType::Bending);
				}
				if row > 1 {
					link(row - 2, col, SpringType::Bending);
				}
			}
		}

		for &[row, col] in config.pinned.iter() {
			point_masses[config.index(row, col)].pinned = true;
		}

		Ok(Self {
			point_masses,
			springs,
		})
	}

	pub fn mean_rest_length(&self) -> f64 {
		if self.springs.is_empty() {
			return 0.0;
		}
		self.springs.iter().map(|s| s.rest_length).sum::<f64>()
			/ self.springs.len() as f64
	}
}
