use crate::V3;
use protocol::pr_model::PrPointMass;

#[derive(Clone, Debug, PartialEq)]
pub struct PointMass {
	pub pinned: bool,
	pub start_position: V3,
	pub position: V3,
	pub last_position: V3,
	pub forces: V3,
}

impl PointMass {
	pub fn new(position: V3, pinned: bool) -> Self {
		Self {
			pinned,
			start_position: position,
			position,
			last_position: position,
			forces: V3::zeros(),
		}
	}

	pub fn velocity(&self, dt: f64) -> V3 {
		if dt == 0.0 {
			return V3::zeros();
		}
		(self.position - self.last_position) / dt
	}

	pub fn reset(&mut self) {
		self.position = self.start_position;
		self.last_position = self.start_position;
		self.forces = V3::zeros();
	}

	// position Verlet, `keep` is the fraction of velocity left after damping
	pub fn integrate(&mut self, mass: f64, keep: f64, dt: f64) {
		if self.pinned {
			return;
		}
		let accel = self.forces / mass;
		let last_position = self.last_position;
		self.last_position = self.position;
		self.position += keep * (self.position - last_position) + accel * dt * dt;
	}

	pub fn render(&self) -> PrPointMass {
		PrPointMass {
			pos: [self.position[0], self.position[1], self.position[2]],
			pinned: self.pinned,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_integrate_free_fall() {
		let mut pm = PointMass::new(V3::new(0., 1., 0.), false);
		pm.forces = V3::new(0., -2., 0.);
		pm.integrate(2.0, 1.0, 0.1);
		assert!((pm.position[1] - (1.0 - 0.01)).abs() < 1e-12);
		assert_eq!(pm.last_position, V3::new(0., 1., 0.));
		// velocity carries over on the next step
		pm.forces = V3::zeros();
		pm.integrate(2.0, 1.0, 0.1);
		assert!((pm.position[1] - (1.0 - 0.02)).abs() < 1e-12);
	}

	#[test]
	fn test_integrate_damped() {
		let mut pm = PointMass::new(V3::zeros(), false);
		pm.last_position = V3::new(-1., 0., 0.);
		pm.integrate(1.0, 0.5, 0.1);
		assert!((pm.position[0] - 0.5).abs() < 1e-12);
	}

	#[test]
	fn test_pinned_does_not_move() {
		let mut pm = PointMass::new(V3::new(1., 2., 3.), true);
		pm.forces = V3::new(10., 10., 10.);
		pm.integrate(1.0, 1.0, 0.1);
		assert_eq!(pm.position, V3::new(1., 2., 3.));
		assert_eq!(pm.last_position, V3::new(1., 2., 3.));
	}

	#[test]
	fn test_reset() {
		let mut pm = PointMass::new(V3::new(0., 1., 0.), false);
		pm.position = V3::new(5., 5., 5.);
		pm.last_position = V3::new(4., 4., 4.);
		pm.reset();
		assert_eq!(pm.position, pm.start_position);
		assert_eq!(pm.last_position, pm.start_position);
		assert_eq!(pm.velocity(0.1), V3::zeros());
	}
}
