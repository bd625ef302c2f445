use fnv::FnvHashMap;

use crate::point_mass::PointMass;
use crate::{C3, V3};

/// Uniform grid over space, point masses bucketed by the cell they sit in.
#[derive(Clone, Debug)]
pub struct SpatialMap {
	csize: f64,
	data: FnvHashMap<C3, Vec<usize>>,
}

impl SpatialMap {
	pub fn new(csize: f64) -> Self {
		let csize = if csize.is_normal() && csize > 0.0 { csize } else { 1.0 };
		Self {
			csize,
			data: FnvHashMap::default(),
		}
	}

	pub fn csize(&self) -> f64 {
		self.csize
	}

	pub fn hash_position(&self, p: V3) -> C3 {
		C3::new(
			(p[0] / self.csize).floor() as i64,
			(p[1] / self.csize).floor() as i64,
			(p[2] / self.csize).floor() as i64,
		)
	}

	pub fn build(&mut self, point_masses: &[PointMass]) {
		// keep bucket allocations between steps
		for bucket in self.data.values_mut() {
			bucket.clear();
		}
		for (idx, pm) in point_masses.iter().enumerate() {
			let cpos = self.hash_position(pm.position);
			self.data.entry(cpos).or_default().push(idx);
		}
		self.data.retain(|_, bucket| !bucket.is_empty());
	}

	/// Everything in the 27 cells around `p`, `p`'s own entry included.
	pub fn neighbours(&self, p: V3) -> impl Iterator<Item = usize> + '_ {
		let c = self.hash_position(p);
		(-1i64..=1)
			.flat_map(move |dx| {
				(-1i64..=1).flat_map(move |dy| {
					(-1i64..=1).map(move |dz| c + C3::new(dx, dy, dz))
				})
			})
			.filter_map(move |key| self.data.get(&key))
			.flatten()
			.copied()
	}

	/// Averaged push that moves point mass `idx` away from every neighbour
	/// closer than `min_dist`. Each push grows with `1 / d` and is capped at
	/// `min_dist`. Requires `min_dist <= csize`.
	pub fn correction(
		&self,
		point_masses: &[PointMass],
		idx: usize,
		min_dist: f64,
	) -> Option<V3> {
		let pos = point_masses[idx].position;
		let mut total = V3::zeros();
		let mut count = 0usize;
		for other in self.neighbours(pos) {
			if other == idx {
				continue;
			}
			let dp = pos - point_masses[other].position;
			let d = dp.norm();
			if d >= min_dist || !d.is_normal() {
				continue;
			}
			let push = (min_dist * (min_dist / d - 1.0)).min(min_dist);
			total += dp * (push / d);
			count += 1;
		}
		if count == 0 {
			return None;
		}
		Some(total / count as f64)
	}
}
