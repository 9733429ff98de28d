//! Error types for planning, configuration and waypoint persistence.

use thiserror::Error;

use crate::obstacle::MAX_COLLISION_SAMPLES;
use crate::point::{Axis, Point};

/// Inputs rejected before a search starts.
///
/// Failing to find a path is not an error: planners report it as an absent result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("obstacle {index} has min > max on the {axis} axis")]
    InvalidObstacle { index: usize, axis: Axis },

    #[error("sampling bounds are malformed or not finite on the {axis} axis")]
    InvalidBounds { axis: Axis },

    #[error("goal sample rate must be within [0, 1], but was {0}")]
    GoalSampleRate(f64),

    #[error("expand distance must be positive and finite, but was {0}")]
    ExpandDist(f64),

    #[error("max iterations must be positive")]
    ZeroMaxIters,

    #[error("goal tolerance must be non-negative and finite, but was {0}")]
    GoalTolerance(f64),

    #[error("collision step must be positive and finite, but was {0}")]
    CollisionStep(f64),

    #[error(
        "segments of length {length} need more than {} collision samples at step {step}",
        MAX_COLLISION_SAMPLES
    )]
    CollisionSamples { length: f64, step: f64 },

    #[error("max radius must be positive, but was {0}")]
    MaxRadius(f64),

    #[error("gamma must be non-negative and finite, but was {0}")]
    Gamma(f64),

    #[error("start point {0} is not finite")]
    NonFiniteStart(Point),

    #[error("goal point {0} is not finite")]
    NonFiniteGoal(Point),

    #[error("start point lies inside obstacle {index}")]
    StartInCollision { index: usize },

    #[error("goal point lies inside obstacle {index}")]
    GoalInCollision { index: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum WaypointError {
    #[error("waypoint I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected `(x, y, z)`, found `{content}`")]
    Parse { line: usize, content: String },

    #[error("waypoint JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = PlanError> = std::result::Result<T, E>;
