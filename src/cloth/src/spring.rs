use crate::point_mass::PointMass;
use crate::V3;
use protocol::pr_model::{PrSpring, PrSpringKind};

/// Bending springs are this much softer than `ks`.
pub const BENDING_SCALE: f64 = 0.2;

/// Maximum length of a spring after strain limiting, relative to rest.
pub const MAX_STRAIN: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpringType {
	Structural,
	Shearing,
	Bending,
}

impl SpringType {
	pub fn stiffness(self, ks: f64) -> f64 {
		match self {
			SpringType::Bending => ks * BENDING_SCALE,
			SpringType::Structural | SpringType::Shearing => ks,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
	pub pm_a: usize,
	pub pm_b: usize,
	pub ty: SpringType,
	pub rest_length: f64,
}

impl Spring {
	pub fn new(
		point_masses: &[PointMass],
		pm_a: usize,
		pm_b: usize,
		ty: SpringType,
	) -> Self {
		let rest_length =
			(point_masses[pm_a].position - point_masses[pm_b].position).norm();
		Self {
			pm_a,
			pm_b,
			ty,
			rest_length,
		}
	}

	// vector from b to a
	pub fn delta(&self, point_masses: &[PointMass]) -> V3 {
		point_masses[self.pm_a].position - point_masses[self.pm_b].position
	}

	pub fn length(&self, point_masses: &[PointMass]) -> f64 {
		self.delta(point_masses).norm()
	}

	/// Hooke force pulling `pm_a` towards `pm_b` when stretched.
	/// Subtract it from `pm_a`, add it to `pm_b`.
	pub fn force(&self, point_masses: &[PointMass], ks: f64) -> Option<V3> {
		let dp = self.delta(point_masses);
		let l = dp.norm();
		if !l.is_normal() {
			return None;
		}
		let k = self.ty.stiffness(ks);
		Some(dp * (k * (l - self.rest_length) / l))
	}

	/// Displacement along the spring that removes any stretch beyond
	/// `MAX_STRAIN`. Same sign convention as `force`.
	pub fn overstretch(&self, point_masses: &[PointMass]) -> Option<V3> {
		let dp = self.delta(point_masses);
		let l = dp.norm();
		let excess = l - MAX_STRAIN * self.rest_length;
		if excess <= 0.0 || !l.is_normal() {
			return None;
		}
		Some(dp * (excess / l))
	}

	pub fn render(&self) -> PrSpring {
		let kind = match self.ty {
			SpringType::Structural => PrSpringKind::Structural,
			SpringType::Shearing => PrSpringKind::Shearing,
			SpringType::Bending => PrSpringKind::Bending,
		};
		PrSpring {
			point_masses: [self.pm_a, self.pm_b],
			kind,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn pair(a: V3, b: V3) -> Vec<PointMass> {
		vec![PointMass::new(a, false), PointMass::new(b, false)]
	}

	#[test]
	fn test_rest_length() {
		let pms = pair(V3::zeros(), V3::new(3., 4., 0.));
		let s = Spring::new(&pms, 0, 1, SpringType::Structural);
		assert!((s.rest_length - 5.).abs() < 1e-12);
	}

	#[test]
	fn test_force_at_rest_is_zero() {
		let pms = pair(V3::zeros(), V3::new(1., 0., 0.));
		let s = Spring::new(&pms, 0, 1, SpringType::Shearing);
		assert!(s.force(&pms, 100.).unwrap().norm() < 1e-12);
	}

	#[test]
	fn test_bending_is_softer() {
		let mut pms = pair(V3::zeros(), V3::new(1., 0., 0.));
		let structural = Spring::new(&pms, 0, 1, SpringType::Structural);
		let bending = Spring::new(&pms, 0, 1, SpringType::Bending);
		pms[1].position = V3::new(2., 0., 0.);
		let fs = structural.force(&pms, 10.).unwrap();
		let fb = bending.force(&pms, 10.).unwrap();
		// delta points from b to a, so a stretched spring gives a force along -x
		assert!((fs[0] + 10.).abs() < 1e-12);
		assert!((fb[0] + 2.).abs() < 1e-12);
	}

	#[test]
	fn test_zero_length_has_no_force() {
		let mut pms = pair(V3::zeros(), V3::new(1., 0., 0.));
		let s = Spring::new(&pms, 0, 1, SpringType::Structural);
		pms[1].position = V3::zeros();
		assert!(s.force(&pms, 10.).is_none());
		assert!(s.overstretch(&pms).is_none());
	}

	#[test]
	fn test_overstretch() {
		let mut pms = pair(V3::zeros(), V3::new(1., 0., 0.));
		let s = Spring::new(&pms, 0, 1, SpringType::Structural);
		pms[1].position = V3::new(1.05, 0., 0.);
		assert!(s.overstretch(&pms).is_none());
		pms[1].position = V3::new(1.5, 0., 0.);
		let c = s.overstretch(&pms).unwrap();
		assert!((c[0] + 0.4).abs() < 1e-12);
	}
}
