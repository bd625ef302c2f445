pub mod cloth;
pub mod collision;
pub mod error;
pub mod grid;
pub mod parameters;
pub mod point_mass;
pub mod simulator;
pub mod spatial_map;
pub mod spring;

pub type V3 = nalgebra::Vector3<f64>;
pub type C3 = nalgebra::Vector3<i64>;

pub use cloth::Cloth;
pub use error::ClothError;
pub use grid::{GridConfig, Orientation};
pub use parameters::ClothParameters;
pub use simulator::ClothSimulator;
