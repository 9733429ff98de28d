use std::fmt;

use nalgebra as na;

pub type Point = na::Point3<f64>;
pub type Vector = na::Vector3<f64>;

#[inline(always)]
pub fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Euclidean distance between two points.
#[inline(always)]
pub fn distance(p: &Point, q: &Point) -> f64 {
    na::distance(p, q)
}

#[inline(always)]
pub fn distance_squared(p: &Point, q: &Point) -> f64 {
    na::distance_squared(p, q)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Serializes a `Point` as a plain `[x, y, z]` array.
pub(crate) mod triple {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Point;

    pub fn serialize<S: Serializer>(p: &Point, serializer: S) -> Result<S::Ok, S::Error> {
        [p.x, p.y, p.z].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point, D::Error> {
        let [x, y, z] = <[f64; 3]>::deserialize(deserializer)?;
        Ok(Point::new(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let p = point(1.0, 2.0, 3.0);
        let q = point(4.0, 6.0, 3.0);
        assert_relative_eq!(distance(&p, &q), 5.0);
        assert_relative_eq!(distance_squared(&p, &q), 25.0);
        assert_relative_eq!(distance(&q, &p), distance(&p, &q));
    }

    #[test]
    fn axis_indices() {
        let indices: Vec<usize> = Axis::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(Axis::Z.to_string(), "z");
    }
}
