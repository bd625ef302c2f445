// pr_model: Physical model for rendering

#[derive(Clone, Debug, PartialEq)]
pub struct PrPointMass {
	pub pos: [f64; 3],
	pub pinned: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrSpringKind {
	Structural,
	Shearing,
	Bending,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrSpring {
	pub point_masses: [usize; 2],
	pub kind: PrSpringKind,
}

/// Read-only snapshot handed to a renderer once per frame.
///
/// `point_masses` is row-major: index = `row * num_width_points + col`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrModel {
	pub num_width_points: usize,
	pub num_height_points: usize,
	pub point_masses: Vec<PrPointMass>,
	pub springs: Vec<PrSpring>,
}

impl PrModel {
	pub fn positions(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
		self.point_masses.iter().map(|pm| pm.pos)
	}

	pub fn at(&self, row: usize, col: usize) -> Option<&PrPointMass> {
		if row >= self.num_height_points || col >= self.num_width_points {
			return None;
		}
		self.point_masses.get(row * self.num_width_points + col)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_at_is_row_major() {
		let point_masses = (0..6)
			.map(|i| PrPointMass {
				pos: [i as f64, 0., 0.],
				pinned: false,
			})
			.collect();
		let model = PrModel {
			num_width_points: 3,
			num_height_points: 2,
			point_masses,
			springs: Vec::new(),
		};
		assert_eq!(model.at(1, 2).unwrap().pos[0], 5.);
		assert!(model.at(2, 0).is_none());
		assert!(model.at(0, 3).is_none());
		assert_eq!(model.positions().count(), 6);
	}
}
