use crate::collision::{apply_friction, check_friction, CollisionObject};
use crate::error::ClothError;
use crate::point_mass::PointMass;
use crate::V3;

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
	origin: V3,
	radius: f64,
	friction: f64,
}

impl Sphere {
	pub fn new(origin: V3, radius: f64, friction: f64) -> Result<Self, ClothError> {
		if !(radius.is_finite() && radius > 0.0) {
			return Err(ClothError::InvalidRadius(radius));
		}
		Ok(Self {
			origin,
			radius,
			friction: check_friction(friction)?,
		})
	}

	pub fn origin(&self) -> V3 {
		self.origin
	}

	pub fn radius(&self) -> f64 {
		self.radius
	}
}

impl CollisionObject for Sphere {
	fn collide(&self, pm: &mut PointMass) {
		if pm.pinned {
			return;
		}
		let dp = pm.position - self.origin;
		if dp.norm() > self.radius {
			return;
		}
		let dir = match dp
			.try_normalize(f64::EPSILON)
			.or_else(|| (pm.last_position - self.origin).try_normalize(f64::EPSILON))
		{
			Some(dir) => dir,
			None => return,
		};
		let target = self.origin + dir * self.radius;
		apply_friction(pm, target, self.friction);
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use float_cmp::approx_eq;

	fn ball(friction: f64) -> Sphere {
		Sphere::new(V3::new(0., 0., 0.), 1.0, friction).unwrap()
	}

	#[test]
	fn test_rejects_radius() {
		assert_eq!(
			Sphere::new(V3::zeros(), 0.0, 0.1),
			Err(ClothError::InvalidRadius(0.0))
		);
	}

	#[test]
	fn test_outside_is_untouched() {
		let mut pm = PointMass::new(V3::new(0., 1.5, 0.), false);
		pm.position = V3::new(0., 1.2, 0.);
		ball(0.).collide(&mut pm);
		assert_eq!(pm.position, V3::new(0., 1.2, 0.));
	}

	#[test]
	fn test_projects_to_surface() {
		let mut pm = PointMass::new(V3::new(0., 0.5, 0.), false);
		pm.position = V3::new(0., 0.5, 0.);
		ball(0.).collide(&mut pm);
		assert!(approx_eq!(f64, pm.position.norm(), 1.0, epsilon = 1e-12));
		assert!(approx_eq!(f64, pm.position[1], 1.0, epsilon = 1e-12));
	}

	#[test]
	fn test_friction_is_relative_to_last_position() {
		let mut pm = PointMass::new(V3::new(2., 0., 0.), false);
		pm.position = V3::new(0.5, 0., 0.);
		ball(0.25).collide(&mut pm);
		// target (1, 0, 0), last (2, 0, 0)
		assert!(approx_eq!(f64, pm.position[0], 2. + 0.75 * (1. - 2.), epsilon = 1e-12));
	}

	#[test]
	fn test_at_origin_uses_last_position() {
		let mut pm = PointMass::new(V3::new(0., 0., 2.), false);
		pm.position = V3::zeros();
		ball(0.).collide(&mut pm);
		assert!(approx_eq!(f64, pm.position[2], 1.0, epsilon = 1e-12));

		let mut stuck = PointMass::new(V3::zeros(), false);
		ball(0.).collide(&mut stuck);
		assert_eq!(stuck.position, V3::zeros());
	}
}
