use std::time::Instant;

use crate::cloth::Cloth;
use crate::collision::CRef;
use crate::error::ClothError;
use crate::parameters::ClothParameters;
use crate::V3;
use protocol::pr_model::PrModel;

/// Standard gravity, pointing down the y axis.
pub fn gravity() -> V3 {
	V3::new(0., -9.8, 0.)
}

/// Owns one cloth and everything needed to step it frame by frame.
#[derive(Clone)]
pub struct ClothSimulator {
	frames_per_sec: f64,
	simulation_steps: usize,
	frame: usize,

	cloth: Cloth,
	cp: ClothParameters,
	external_accelerations: Vec<V3>,
	collision_objects: Vec<CRef>,
}

impl ClothSimulator {
	pub fn new(
		cloth: Cloth,
		cp: ClothParameters,
		frames_per_sec: f64,
		simulation_steps: usize,
	) -> Result<Self, ClothError> {
		cp.validate()?;
		if !(frames_per_sec.is_finite() && frames_per_sec > 0.0) {
			return Err(ClothError::InvalidFrameRate(frames_per_sec));
		}
		if simulation_steps == 0 {
			return Err(ClothError::NoSimulationSteps);
		}
		Ok(Self {
			frames_per_sec,
			simulation_steps,
			frame: 0,
			cloth,
			cp,
			external_accelerations: Vec::new(),
			collision_objects: Vec::new(),
		})
	}

	pub fn with_gravity(self) -> Self {
		self.with_acceleration(gravity())
	}

	pub fn with_acceleration(mut self, accel: V3) -> Self {
		self.external_accelerations.push(accel);
		self
	}

	pub fn with_collision_object(mut self, obj: CRef) -> Self {
		self.collision_objects.push(obj);
		self
	}

	pub fn cloth(&self) -> &Cloth {
		&self.cloth
	}

	pub fn parameters(&self) -> &ClothParameters {
		&self.cp
	}

	/// Swaps in new parameters between frames.
	pub fn set_parameters(&mut self, cp: ClothParameters) -> Result<(), ClothError> {
		cp.validate()?;
		self.cp = cp;
		Ok(())
	}

	pub fn frames_per_sec(&self) -> f64 {
		self.frames_per_sec
	}

	pub fn simulation_steps(&self) -> usize {
		self.simulation_steps
	}

	pub fn frame(&self) -> usize {
		self.frame
	}

	pub fn dt(&self) -> f64 {
		1.0 / self.frames_per_sec / self.simulation_steps as f64
	}

	pub fn step(&mut self) {
		self.cloth.simulate(
			self.frames_per_sec,
			self.simulation_steps,
			&self.cp,
			&self.external_accelerations,
			&self.collision_objects,
		);
	}

	pub fn run_frame(&mut self) {
		let start = Instant::now();
		for _ in 0..self.simulation_steps {
			self.step();
		}
		self.frame += 1;
		ftlog::debug!(
			"frame {}: {} steps in {}us",
			self.frame,
			self.simulation_steps,
			start.elapsed().as_micros()
		);
	}

	pub fn run_frames(&mut self, frames: usize) {
		for _ in 0..frames {
			self.run_frame();
		}
	}

	pub fn reset(&mut self) {
		self.cloth.reset();
		self.frame = 0;
	}

	pub fn pr_model(&self) -> PrModel {
		self.cloth.pr_model()
	}
}
