use std::time::SystemTime;

use cloth::collision::{CollisionObject, Plane, Sphere};
use cloth::{Cloth, ClothParameters, ClothSimulator, GridConfig, Orientation, V3};
use ftlog::LevelFilter;

fn main() {
	let _guard = ftlog::Builder::new()
		.max_log_level(LevelFilter::Info)
		.try_init()
		.map_err(|e| eprintln!("ERROR: logger: {}", e))
		.ok();

	let config = GridConfig::new(1.0, 1.0, 64, 64)
		.with_orientation(Orientation::Horizontal)
		.with_seed(7);
	let cloth = match Cloth::new(config) {
		Ok(cloth) => cloth,
		Err(e) => {
			ftlog::error!("bad cloth: {}", e);
			return;
		}
	};
	let sphere = Sphere::new(V3::new(0.5, 0.5, 0.5), 0.25, 0.3);
	let floor = Plane::new(V3::zeros(), V3::y(), 0.5);
	let (sphere, floor) = match (sphere, floor) {
		(Ok(sphere), Ok(floor)) => (sphere, floor),
		(Err(e), _) | (_, Err(e)) => {
			ftlog::error!("bad collider: {}", e);
			return;
		}
	};
	let mut sim = match ClothSimulator::new(cloth, ClothParameters::default(), 90.0, 30) {
		Ok(sim) => sim
			.with_gravity()
			.with_collision_object(sphere.build())
			.with_collision_object(floor.build()),
		Err(e) => {
			ftlog::error!("bad parameters: {}", e);
			return;
		}
	};

	let start = SystemTime::now();
	let rframes = 100;
	sim.run_frames(rframes);
	let time = rframes as f64 / sim.frames_per_sec();
	let duration = start.elapsed().map(|d| d.as_micros()).unwrap_or(0);
	let max_speed = sim
		.cloth()
		.point_masses()
		.iter()
		.map(|pm| pm.velocity(sim.dt()).norm())
		.fold(0.0, f64::max);
	ftlog::info!(
		"{:.3}% of realtime, max strain {:.4}, max speed {:.4}",
		duration as f64 / time / 1e4,
		sim.cloth().max_strain(),
		max_speed
	);
}
