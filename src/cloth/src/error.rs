//! Configuration errors, rejected when a scene is built.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
	#[error("grid must have at least one point per side, got {width_points}x{height_points}")]
	InvalidGridDimensions {
		width_points: usize,
		height_points: usize,
	},

	#[error("cloth extent must be positive and finite, got {width}x{height}")]
	InvalidExtent { width: f64, height: f64 },

	#[error("pinned point ({row}, {col}) is outside the {rows}x{cols} grid")]
	PinnedOutOfRange {
		row: usize,
		col: usize,
		rows: usize,
		cols: usize,
	},

	#[error("thickness must be non-negative and finite, got {0}")]
	InvalidThickness(f64),

	#[error("density must be positive and finite, got {0}")]
	InvalidDensity(f64),

	#[error("spring constant must be non-negative and finite, got {0}")]
	InvalidStiffness(f64),

	#[error("damping must be a percentage in [0, 100], got {0}")]
	InvalidDamping(f64),

	#[error("frame rate must be positive and finite, got {0}")]
	InvalidFrameRate(f64),

	#[error("at least one simulation step per frame is required")]
	NoSimulationSteps,

	#[error("friction must be in [0, 1], got {0}")]
	InvalidFriction(f64),

	#[error("sphere radius must be positive and finite, got {0}")]
	InvalidRadius(f64),

	#[error("plane normal must be non-zero and finite")]
	DegenerateNormal,

	#[error("box minimum corner must not exceed its maximum corner")]
	InvertedBox,
}
