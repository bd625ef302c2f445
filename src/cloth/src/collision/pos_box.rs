use crate::collision::{apply_friction, check_friction, CollisionObject, SURFACE_OFFSET};
use crate::error::ClothError;
use crate::point_mass::PointMass;
use crate::V3;

/// Axis-aligned box the cloth is kept inside of.
#[derive(Clone, Debug, PartialEq)]
pub struct PosBox {
	min: V3,
	max: V3,
	friction: f64,
}

impl PosBox {
	pub fn new(min: V3, max: V3, friction: f64) -> Result<Self, ClothError> {
		if (0..3).any(|i| !(min[i] <= max[i])) {
			return Err(ClothError::InvertedBox);
		}
		Ok(Self {
			min,
			max,
			friction: check_friction(friction)?,
		})
	}

	/// Clamp `pos` back inside the box, returns whether it was outside.
	pub fn apply(&self, pos: &mut V3) -> bool {
		let mut flag = false;
		for i in 0..3 {
			if pos[i] < self.min[i] {
				pos[i] = self.min[i] + SURFACE_OFFSET;
				flag = true;
			} else if pos[i] > self.max[i] {
				pos[i] = self.max[i] - SURFACE_OFFSET;
				flag = true;
			}
		}
		flag
	}
}

impl CollisionObject for PosBox {
	fn collide(&self, pm: &mut PointMass) {
		if pm.pinned {
			return;
		}
		let mut target = pm.position;
		if self.apply(&mut target) {
			apply_friction(pm, target, self.friction);
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn unit_box(friction: f64) -> PosBox {
		PosBox::new(V3::new(-1., 0., -1.), V3::new(1., 2., 1.), friction).unwrap()
	}

	#[test]
	fn test_rejects_inverted() {
		assert_eq!(
			PosBox::new(V3::new(0., 1., 0.), V3::new(1., 0., 1.), 0.),
			Err(ClothError::InvertedBox)
		);
	}

	#[test]
	fn test_inside_is_untouched() {
		let mut pm = PointMass::new(V3::new(0., 1., 0.), false);
		pm.position = V3::new(0.5, 1.5, -0.5);
		unit_box(0.).collide(&mut pm);
		assert_eq!(pm.position, V3::new(0.5, 1.5, -0.5));
	}

	#[test]
	fn test_clamps_below_floor() {
		let mut pm = PointMass::new(V3::new(0., 0.5, 0.), false);
		pm.position = V3::new(0.2, -0.5, 3.);
		unit_box(0.).collide(&mut pm);
		assert!((pm.position - V3::new(0.2, SURFACE_OFFSET, 1. - SURFACE_OFFSET)).norm() < 1e-12);
	}

	#[test]
	fn test_full_friction_sticks() {
		let mut pm = PointMass::new(V3::new(0., 0.5, 0.), false);
		pm.position = V3::new(0.2, -0.5, 0.);
		unit_box(1.).collide(&mut pm);
		assert_eq!(pm.position, V3::new(0., 0.5, 0.));
	}
}
