use crate::collision::{apply_friction, check_friction, CollisionObject, SURFACE_OFFSET};
use crate::error::ClothError;
use crate::point_mass::PointMass;
use crate::V3;

/// Infinite two-sided plane through `point`.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
	point: V3,
	normal: V3,
	friction: f64,
}

impl Plane {
	pub fn new(point: V3, normal: V3, friction: f64) -> Result<Self, ClothError> {
		let normal = normal
			.try_normalize(f64::EPSILON)
			.filter(|n| n.iter().all(|x| x.is_finite()))
			.ok_or(ClothError::DegenerateNormal)?;
		Ok(Self {
			point,
			normal,
			friction: check_friction(friction)?,
		})
	}

	pub fn signed_distance(&self, pos: V3) -> f64 {
		(pos - self.point).dot(&self.normal)
	}
}

impl CollisionObject for Plane {
	fn collide(&self, pm: &mut PointMass) {
		if pm.pinned {
			return;
		}
		let side_current = self.signed_distance(pm.position);
		let side_previous = self.signed_distance(pm.last_position);
		if side_current * side_previous > 0.0 && side_current.abs() >= SURFACE_OFFSET {
			return;
		}

		let path = pm.position - pm.last_position;
		let denom = path.dot(&self.normal);
		let t = -side_previous / denom;
		let crossed = side_current * side_previous <= 0.0 && (0.0..=1.0).contains(&t);
		let intersection = if crossed && denom.abs() > f64::EPSILON {
			pm.last_position + path * t
		} else {
			// inside the offset band or moving parallel: drop straight onto the plane
			pm.position - self.normal * side_current
		};
		let side = if side_previous < 0.0 { -1.0 } else { 1.0 };
		let target = intersection + self.normal * (side * SURFACE_OFFSET);
		apply_friction(pm, target, self.friction);
	}
}
