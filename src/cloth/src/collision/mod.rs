//! Rigid colliders the cloth is pushed out of.
//!
//! A collider only ever rewrites `position` of the point mass it is handed.
//! The built-in colliders leave pinned point masses untouched.

pub mod plane;
pub mod pos_box;
pub mod sphere;

use dyn_clone::DynClone;

use crate::error::ClothError;
use crate::point_mass::PointMass;
use crate::V3;

pub use plane::Plane;
pub use pos_box::PosBox;
pub use sphere::Sphere;

/// Distance kept between a resolved point mass and the surface.
pub const SURFACE_OFFSET: f64 = 1e-4;

pub type CRef = Box<dyn CollisionObject>;

pub trait CollisionObject: DynClone + Send + Sync {
	fn collide(&self, pm: &mut PointMass);

	fn build(self) -> CRef
	where
		Self: Sized + 'static,
	{
		Box::new(self)
	}
}

dyn_clone::clone_trait_object!(CollisionObject);

/// Move `pm` from its last position towards `target`, keeping `1 - friction`
/// of the way.
pub(crate) fn apply_friction(pm: &mut PointMass, target: V3, friction: f64) {
	let correction = target - pm.last_position;
	pm.position = pm.last_position + correction * (1.0 - friction);
}

pub(crate) fn check_friction(friction: f64) -> Result<f64, ClothError> {
	if (0.0..=1.0).contains(&friction) {
		Ok(friction)
	} else {
		Err(ClothError::InvalidFriction(friction))
	}
}
