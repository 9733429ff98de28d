//! Random box obstacle maps for the 3D planners.
//!
//! Obstacles are generated as centres drawn uniformly inside a region and then grown into cubes.
//! The centres can be exchanged as text, one `(x, y, z)` per line with two decimals.

use nalgebra as na;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use thiserror::Error;

use rrt3d::{BBox, Point};

pub mod centers;

pub use centers::{format_centers, load_centers, parse_centers, save_centers};

/// Number of obstacles in the reference map.
pub const REFERENCE_COUNT: usize = 15;

/// Half the side of a reference obstacle, so each one is a unit cube.
pub const REFERENCE_HALF_EXTENT: f64 = 0.5;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("could not access the centres file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected `(x, y, z)`, found `{content}`")]
    Parse { line: usize, content: String },

    #[error("half extent must be positive and finite, but was {0}")]
    InvalidHalfExtent(f64),

    #[error("generation region is malformed or not finite")]
    InvalidRegion,
}

/// The region obstacle centres are drawn from in the reference map: x, y in [0, 6], z in [2, 6].
pub fn reference_region() -> BBox {
    BBox::from_extents(0.0, 6.0, 0.0, 6.0, 2.0, 6.0)
}

/// `count` centres drawn uniformly and independently per axis inside `region`.
pub fn generate_centers<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    region: &BBox,
) -> Result<Vec<Point>, MapError> {
    if region.malformed_axis().is_some() || !region.is_finite() {
        return Err(MapError::InvalidRegion);
    }

    let (min, max) = (region.min_corner, region.max_corner);
    let x = Uniform::new_inclusive(min.x, max.x);
    let y = Uniform::new_inclusive(min.y, max.y);
    let z = Uniform::new_inclusive(min.z, max.z);

    Ok((0..count)
        .map(|_| na::Point3::new(x.sample(rng), y.sample(rng), z.sample(rng)))
        .collect())
}

/// Grows every centre into a cube with the given half extent.
pub fn cubes_from_centers(centers: &[Point], half_extent: f64) -> Result<Vec<BBox>, MapError> {
    if !(half_extent > 0.0 && half_extent.is_finite()) {
        return Err(MapError::InvalidHalfExtent(half_extent));
    }
    Ok(centers
        .iter()
        .map(|&center| BBox::cube(center, half_extent))
        .collect())
}

pub fn generate_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    region: &BBox,
    half_extent: f64,
) -> Result<Vec<BBox>, MapError> {
    let centers = generate_centers(rng, count, region)?;
    cubes_from_centers(&centers, half_extent)
}
