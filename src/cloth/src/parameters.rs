use crate::error::ClothError;
use crate::spring::SpringType;

/// Material and solver settings read by every sub-step.
///
/// ```
/// use cloth::ClothParameters;
///
/// let cp = ClothParameters::default()
/// 	.with_ks(1000.0)
/// 	.with_damping(0.0)
/// 	.with_bending(false);
/// assert!(cp.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ClothParameters {
	/// Spring constant for structural and shearing springs.
	pub ks: f64,
	/// Mass per unit area.
	pub density: f64,
	/// Percentage of velocity lost per step, in [0, 100].
	pub damping: f64,
	pub enable_structural_constraints: bool,
	pub enable_shearing_constraints: bool,
	pub enable_bending_constraints: bool,
	pub enable_self_collision: bool,
	/// Upper bound on strain limiting passes per step.
	pub strain_iterations: usize,
}

impl Default for ClothParameters {
	fn default() -> Self {
		Self {
			ks: 5000.0,
			density: 15.0,
			damping: 0.2,
			enable_structural_constraints: true,
			enable_shearing_constraints: true,
			enable_bending_constraints: true,
			enable_self_collision: true,
			strain_iterations: 32,
		}
	}
}

impl ClothParameters {
	pub fn with_ks(mut self, ks: f64) -> Self {
		self.ks = ks;
		self
	}

	pub fn with_density(mut self, density: f64) -> Self {
		self.density = density;
		self
	}

	pub fn with_damping(mut self, damping: f64) -> Self {
		self.damping = damping;
		self
	}

	pub fn with_structural(mut self, on: bool) -> Self {
		self.enable_structural_constraints = on;
		self
	}

	pub fn with_shearing(mut self, on: bool) -> Self {
		self.enable_shearing_constraints = on;
		self
	}

	pub fn with_bending(mut self, on: bool) -> Self {
		self.enable_bending_constraints = on;
		self
	}

	pub fn with_self_collision(mut self, on: bool) -> Self {
		self.enable_self_collision = on;
		self
	}

	pub fn with_strain_iterations(mut self, n: usize) -> Self {
		self.strain_iterations = n;
		self
	}

	pub fn with_all_springs(self, on: bool) -> Self {
		self.with_structural(on).with_shearing(on).with_bending(on)
	}

	pub fn is_enabled(&self, ty: SpringType) -> bool {
		match ty {
			SpringType::Structural => self.enable_structural_constraints,
			SpringType::Shearing => self.enable_shearing_constraints,
			SpringType::Bending => self.enable_bending_constraints,
		}
	}

	pub fn validate(&self) -> Result<(), ClothError> {
		if !(self.ks.is_finite() && self.ks >= 0.0) {
			return Err(ClothError::InvalidStiffness(self.ks));
		}
		if !(self.density.is_finite() && self.density > 0.0) {
			return Err(ClothError::InvalidDensity(self.density));
		}
		if !(0.0..=100.0).contains(&self.damping) {
			return Err(ClothError::InvalidDamping(self.damping));
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use test_case::test_case;

	#[test]
	fn test_default_is_valid() {
		assert!(ClothParameters::default().validate().is_ok());
	}

	#[test_case(ClothParameters::default().with_density(0.0), ClothError::InvalidDensity(0.0); "zero density")]
	#[test_case(ClothParameters::default().with_density(-1.0), ClothError::InvalidDensity(-1.0); "negative density")]
	#[test_case(ClothParameters::default().with_ks(-5.0), ClothError::InvalidStiffness(-5.0); "negative ks")]
	#[test_case(ClothParameters::default().with_damping(101.0), ClothError::InvalidDamping(101.0); "damping over 100")]
	fn test_rejects(cp: ClothParameters, err: ClothError) {
		assert_eq!(cp.validate(), Err(err));
	}

	#[test]
	fn test_toggles() {
		let cp = ClothParameters::default().with_all_springs(false).with_shearing(true);
		assert!(!cp.is_enabled(SpringType::Structural));
		assert!(cp.is_enabled(SpringType::Shearing));
		assert!(!cp.is_enabled(SpringType::Bending));
	}
}
