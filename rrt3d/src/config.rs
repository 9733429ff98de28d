//! JSON configuration: planner hyperparameters and complete planning scenarios.
//!
//! Nothing is validated while deserializing. Bad values surface as a `PlanError` once a search is
//! started from the resulting builder.

use std::fs;
use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::builder::RRTBuilder;
use crate::error::ConfigError;
use crate::obstacle::{BBox, DEFAULT_COLLISION_STEP};
use crate::point::Point;
use crate::solvers::{star, RRTSolver};
use crate::space::Bounds;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    pub expand_dist: f64,
    pub goal_sample_rate: f64,
    pub max_iters: usize,
    pub goal_tolerance: f64,
    pub collision_step: f64,
    pub max_radius: f64,
    pub gamma: f64,
}

impl PlannerConfig {
    pub const DEFAULT_EXPAND_DIST: f64 = 1.0;
    pub const DEFAULT_GOAL_SAMPLE_RATE: f64 = 0.05;
    pub const DEFAULT_MAX_ITERS: usize = 1000;
    pub const DEFAULT_GOAL_TOLERANCE: f64 = 1.0;

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            expand_dist: Self::DEFAULT_EXPAND_DIST,
            goal_sample_rate: Self::DEFAULT_GOAL_SAMPLE_RATE,
            max_iters: Self::DEFAULT_MAX_ITERS,
            goal_tolerance: Self::DEFAULT_GOAL_TOLERANCE,
            collision_step: DEFAULT_COLLISION_STEP,
            max_radius: star::DEFAULT_MAX_RADIUS,
            gamma: star::DEFAULT_GAMMA,
        }
    }
}

/// A complete planning problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(with = "crate::point::triple")]
    pub start: Point,
    #[serde(with = "crate::point::triple")]
    pub goal: Point,
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub obstacles: Vec<BBox>,
    #[serde(default)]
    pub planner: PlannerConfig,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn builder<S: RRTSolver>(&self) -> RRTBuilder<S, BBox> {
        let builder = RRTBuilder::new(self.start, self.goal)
            .extend_obstacles(self.obstacles.iter().copied())
            .with_config(&self.planner);
        match self.bounds {
            Some(bounds) => builder.with_bounds(bounds),
            None => builder,
        }
    }
}
