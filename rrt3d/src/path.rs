use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::obstacle::{CollisionChecker, Obstacle};
use crate::point::*;

/// Waypoints from the start to the goal. Independent of the tree it was extracted from.
///
/// Serializes as a list of `[x, y, z]` triples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<[f64; 3]>", into = "Vec<[f64; 3]>")]
pub struct Path {
    pub waypoints: Vec<Point>,
}

impl Path {
    pub fn new(waypoints: Vec<Point>) -> Self {
        Self { waypoints }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn start(&self) -> Option<&Point> {
        self.waypoints.first()
    }

    pub fn end(&self) -> Option<&Point> {
        self.waypoints.last()
    }

    pub fn length(&self) -> f64 {
        path_length(&self.waypoints)
    }

    /// Consecutive waypoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
        self.waypoints.iter().tuple_windows()
    }

    /// Re-checks every segment against `obstacles`, independently of how the path was built.
    pub fn is_collision_free<O: Obstacle>(
        &self,
        obstacles: &[O],
        checker: &CollisionChecker,
    ) -> bool {
        match self.waypoints.as_slice() {
            [] => true,
            [single] => checker.point_is_free(single, obstacles),
            _ => self
                .segments()
                .all(|(a, b)| checker.segment_is_free(a, b, obstacles)),
        }
    }
}

impl From<Vec<[f64; 3]>> for Path {
    fn from(triples: Vec<[f64; 3]>) -> Path {
        Path::new(triples.into_iter().map(Point::from).collect())
    }
}

impl From<Path> for Vec<[f64; 3]> {
    fn from(path: Path) -> Vec<[f64; 3]> {
        path.waypoints.iter().map(|p| [p.x, p.y, p.z]).collect()
    }
}

/// Sum of the distances between consecutive points; zero for fewer than two points.
pub fn path_length(points: &[Point]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| distance(a, b))
        .sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::obstacle::BBox;

    fn zigzag() -> Path {
        Path::new(vec![
            point(0.0, 0.0, 0.0),
            point(3.0, 4.0, 0.0),
            point(3.0, 4.0, 2.0),
        ])
    }

    #[test]
    fn length() {
        assert_relative_eq!(zigzag().length(), 7.0);
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[point(1.0, 2.0, 3.0)]), 0.0);
    }

    #[test]
    fn accessors() {
        let path = zigzag();
        assert_eq!(path.len(), 3);
        assert_eq!(path.start(), Some(&point(0.0, 0.0, 0.0)));
        assert_eq!(path.end(), Some(&point(3.0, 4.0, 2.0)));
        assert_eq!(path.segments().count(), 2);
        assert!(Path::new(vec![]).is_empty());
    }

    #[test]
    fn collision_check() {
        let path = zigzag();
        let checker = CollisionChecker::default();
        let clear = [BBox::from_extents(5.0, 6.0, 5.0, 6.0, 5.0, 6.0)];
        let blocking = [BBox::from_extents(1.0, 2.0, 1.0, 2.0, -1.0, 1.0)];
        assert!(path.is_collision_free(&clear, &checker));
        assert!(!path.is_collision_free(&blocking, &checker));

        let single = Path::new(vec![point(1.5, 1.5, 0.0)]);
        assert!(!single.is_collision_free(&blocking, &checker));
    }

    #[test]
    fn json_layout() {
        let json = serde_json::to_string(&zigzag()).unwrap();
        assert_eq!(json, "[[0.0,0.0,0.0],[3.0,4.0,0.0],[3.0,4.0,2.0]]");
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, zigzag());
    }
}
