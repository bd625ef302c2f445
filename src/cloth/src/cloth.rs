use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::CRef;
use crate::error::ClothError;
use crate::grid::{ClothGrid, GridConfig};
use crate::parameters::ClothParameters;
use crate::point_mass::PointMass;
use crate::spatial_map::SpatialMap;
use crate::spring::Spring;
use crate::V3;
use protocol::pr_model::PrModel;

/// A rectangular mass-spring sheet.
///
/// The point mass storage is sized once in the constructor and never grows,
/// springs address it by index.
#[derive(Clone, Debug)]
pub struct Cloth {
	config: GridConfig,
	point_masses: Vec<PointMass>,
	springs: Vec<Spring>,
	map: SpatialMap,
}

impl Cloth {
	/// Builds the grid with a generator seeded from `config.seed`.
	pub fn new(config: GridConfig) -> Result<Self, ClothError> {
		let mut rng = StdRng::seed_from_u64(config.seed);
		Self::with_rng(config, &mut rng)
	}

	pub fn with_rng<R: Rng>(config: GridConfig, rng: &mut R) -> Result<Self, ClothError> {
		let grid = ClothGrid::build(&config, rng)?;
		let csize = grid.mean_rest_length().max(2.0 * config.thickness);
		ftlog::info!(
			"cloth: {}x{} point masses, {} springs, {} pinned, cell size {:.4}",
			config.num_width_points,
			config.num_height_points,
			grid.springs.len(),
			grid.point_masses.iter().filter(|pm| pm.pinned).count(),
			csize,
		);
		Ok(Self {
			config,
			point_masses: grid.point_masses,
			springs: grid.springs,
			map: SpatialMap::new(csize),
		})
	}

	pub fn config(&self) -> &GridConfig {
		&self.config
	}

	pub fn point_masses(&self) -> &[PointMass] {
		&self.point_masses
	}

	pub fn springs(&self) -> &[Spring] {
		&self.springs
	}

	pub fn point_mass(&self, row: usize, col: usize) -> Option<&PointMass> {
		if row >= self.config.num_height_points || col >= self.config.num_width_points {
			return None;
		}
		self.point_masses.get(self.config.index(row, col))
	}

	/// Mass of a single point mass under `cp`.
	pub fn mass(&self, cp: &ClothParameters) -> f64 {
		self.config.width * self.config.height * cp.density / self.config.len() as f64
	}

	/// Largest `length / rest_length` over all springs.
	pub fn max_strain(&self) -> f64 {
		self.springs
			.iter()
			.filter(|s| s.rest_length > 0.0)
			.map(|s| s.length(&self.point_masses) / s.rest_length)
			.fold(0.0, f64::max)
	}

	/// Advances the cloth by one sub-step of `1 / (frames_per_sec * simulation_steps)`.
	pub fn simulate(
		&mut self,
		frames_per_sec: f64,
		simulation_steps: usize,
		cp: &ClothParameters,
		external_accelerations: &[V3],
		collision_objects: &[CRef],
	) {
		let mass = self.mass(cp);
		let dt = 1.0 / frames_per_sec / simulation_steps as f64;
		if !(mass.is_normal() && dt.is_normal()) {
			ftlog::warn!("cloth: skipping step, mass {} dt {}", mass, dt);
			return;
		}

		accumulate_forces(&mut self.point_masses, &self.springs, cp, mass, external_accelerations);
		verlet_step(&mut self.point_masses, mass, cp.damping, dt);
		collide_objects(&mut self.point_masses, collision_objects);
		if cp.enable_self_collision {
			self_collide(
				&mut self.point_masses,
				&mut self.map,
				self.config.thickness,
				simulation_steps,
			);
		}
		limit_strain(&mut self.point_masses, &self.springs, cp.strain_iterations);
	}

	pub fn reset(&mut self) {
		for pm in self.point_masses.iter_mut() {
			pm.reset();
		}
	}

	pub fn pr_model(&self) -> PrModel {
		PrModel {
			num_width_points: self.config.num_width_points,
			num_height_points: self.config.num_height_points,
			point_masses: self.point_masses.iter().map(|pm| pm.render()).collect(),
			springs: self.springs.iter().map(|s| s.render()).collect(),
		}
	}
}

type SpringForce = (usize, usize, Option<V3>);

#[cfg(not(debug_assertions))]
fn spring_forces(
	point_masses: &[PointMass],
	springs: &[Spring],
	cp: &ClothParameters,
) -> Vec<SpringForce> {
	use rayon::prelude::*;
	springs
		.par_iter()
		.filter(|s| cp.is_enabled(s.ty))
		.map(|s| (s.pm_a, s.pm_b, s.force(point_masses, cp.ks)))
		.collect()
}

#[cfg(debug_assertions)]
fn spring_forces(
	point_masses: &[PointMass],
	springs: &[Spring],
	cp: &ClothParameters,
) -> Vec<SpringForce> {
	springs
		.iter()
		.filter(|s| cp.is_enabled(s.ty))
		.map(|s| (s.pm_a, s.pm_b, s.force(point_masses, cp.ks)))
		.collect()
}

/// Resets every accumulator to the external load, then adds the enabled
/// spring forces to both endpoints.
pub fn accumulate_forces(
	point_masses: &mut [PointMass],
	springs: &[Spring],
	cp: &ClothParameters,
	mass: f64,
	external_accelerations: &[V3],
) {
	let external = external_accelerations
		.iter()
		.fold(V3::zeros(), |acc, a| acc + a)
		* mass;
	for pm in point_masses.iter_mut() {
		pm.forces = external;
	}

	let forces = spring_forces(point_masses, springs, cp);
	let mut degenerate = 0usize;
	for (a, b, force) in forces.into_iter() {
		match force {
			Some(f) => {
				point_masses[a].forces -= f;
				point_masses[b].forces += f;
			}
			None => degenerate += 1,
		}
	}
	if degenerate > 0 {
		ftlog::warn!("cloth: {} zero length springs skipped", degenerate);
	}
}

/// Position Verlet for every unpinned point mass, `damping` in percent.
pub fn verlet_step(point_masses: &mut [PointMass], mass: f64, damping: f64, dt: f64) {
	let keep = 1.0 - damping / 100.0;
	for pm in point_masses.iter_mut() {
		pm.integrate(mass, keep, dt);
	}
}

pub fn collide_objects(point_masses: &mut [PointMass], collision_objects: &[CRef]) {
	for obj in collision_objects.iter() {
		for pm in point_masses.iter_mut() {
			obj.collide(pm);
		}
	}
}

#[cfg(not(debug_assertions))]
fn self_collision_corrections(
	point_masses: &[PointMass],
	map: &SpatialMap,
	min_dist: f64,
) -> Vec<Option<V3>> {
	use rayon::prelude::*;
	(0..point_masses.len())
		.into_par_iter()
		.map(|idx| {
			if point_masses[idx].pinned {
				return None;
			}
			map.correction(point_masses, idx, min_dist)
		})
		.collect()
}

#[cfg(debug_assertions)]
fn self_collision_corrections(
	point_masses: &[PointMass],
	map: &SpatialMap,
	min_dist: f64,
) -> Vec<Option<V3>> {
	(0..point_masses.len())
		.map(|idx| {
			if point_masses[idx].pinned {
				return None;
			}
			map.correction(point_masses, idx, min_dist)
		})
		.collect()
}

/// Rebuilds `map` and pushes apart point masses closer than `2 * thickness`.
/// `map` cells must be at least `2 * thickness` wide.
pub fn self_collide(
	point_masses: &mut [PointMass],
	map: &mut SpatialMap,
	thickness: f64,
	simulation_steps: usize,
) {
	let min_dist = 2.0 * thickness;
	if min_dist <= 0.0 {
		return;
	}
	map.build(point_masses);
	// every correction sees the same snapshot
	let corrections = self_collision_corrections(point_masses, map, min_dist);
	let scale = 1.0 / simulation_steps.max(1) as f64;
	for (pm, correction) in point_masses.iter_mut().zip(corrections) {
		if let Some(c) = correction {
			pm.position += c * scale;
		}
	}
}

/// Provot strain limiting: shortens every spring stretched past
/// `MAX_STRAIN`, repeating up to `iterations` passes (at least one) until a
/// pass changes nothing. Returns the number of passes that moved something.
pub fn limit_strain(point_masses: &mut [PointMass], springs: &[Spring], iterations: usize) -> usize {
	let iterations = iterations.max(1);
	for pass in 0..iterations {
		let mut corrected = 0usize;
		for s in springs.iter() {
			let c = match s.overstretch(point_masses) {
				Some(c) => c,
				None => continue,
			};
			match (point_masses[s.pm_a].pinned, point_masses[s.pm_b].pinned) {
				(true, true) => continue,
				(false, true) => point_masses[s.pm_a].position -= c,
				(true, false) => point_masses[s.pm_b].position += c,
				(false, false) => {
					point_masses[s.pm_a].position -= c * 0.5;
					point_masses[s.pm_b].position += c * 0.5;
				}
			}
			corrected += 1;
		}
		if corrected == 0 {
			return pass;
		}
	}
	iterations
}
