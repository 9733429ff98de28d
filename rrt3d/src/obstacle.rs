use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::point::*;

/// Sampling step used by `segment_is_free` when no other step is configured.
pub const DEFAULT_COLLISION_STEP: f64 = 0.5;

/// Most points a single segment check will sample.
pub const MAX_COLLISION_SAMPLES: usize = 1 << 20;

pub trait Obstacle {
    /// Whether `p` lies inside the obstacle. Points on the boundary count as inside.
    fn is_inside(&self, p: &Point) -> bool;

    fn bounding_box(&self) -> BBox;
}

impl<T: Obstacle + ?Sized> Obstacle for &T {
    #[inline(always)]
    fn is_inside(&self, p: &Point) -> bool {
        (**self).is_inside(p)
    }

    #[inline(always)]
    fn bounding_box(&self) -> BBox {
        (**self).bounding_box()
    }
}

impl<T: Obstacle + ?Sized> Obstacle for Box<T> {
    #[inline(always)]
    fn is_inside(&self, p: &Point) -> bool {
        (**self).is_inside(p)
    }

    #[inline(always)]
    fn bounding_box(&self) -> BBox {
        (**self).bounding_box()
    }
}

/// An axis-aligned box. On the wire it is the six scalars
/// `[x_min, x_max, y_min, y_max, z_min, z_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct BBox {
    pub min_corner: Point,
    pub max_corner: Point,
}

impl BBox {
    pub fn new(min_corner: Point, max_corner: Point) -> BBox {
        BBox {
            min_corner,
            max_corner,
        }
    }

    pub fn from_extents(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        z_min: f64,
        z_max: f64,
    ) -> BBox {
        BBox::new(point(x_min, y_min, z_min), point(x_max, y_max, z_max))
    }

    pub fn cube(center: Point, half_extent: f64) -> BBox {
        let half = Vector::repeat(half_extent);
        BBox::new(center - half, center + half)
    }

    /// The smallest box containing both points.
    pub fn enclosing(a: &Point, b: &Point) -> BBox {
        BBox::new(a.inf(b), a.sup(b))
    }

    pub fn padded(&self, margin: f64) -> BBox {
        let margin = Vector::repeat(margin);
        BBox::new(self.min_corner - margin, self.max_corner + margin)
    }

    pub fn extents(&self) -> [f64; 6] {
        let (min, max) = (&self.min_corner, &self.max_corner);
        [min.x, max.x, min.y, max.y, min.z, max.z]
    }

    /// The first axis on which `min <= max` does not hold, if any. NaN bounds are malformed.
    pub fn malformed_axis(&self) -> Option<Axis> {
        Axis::ALL
            .into_iter()
            .find(|axis| !(self.min_corner[axis.index()] <= self.max_corner[axis.index()]))
    }

    pub fn is_finite(&self) -> bool {
        self.min_corner.iter().chain(self.max_corner.iter()).all(|v| v.is_finite())
    }

    pub fn size(&self) -> Vector {
        self.max_corner - self.min_corner
    }

    pub fn center(&self) -> Point {
        nalgebra::center(&self.min_corner, &self.max_corner)
    }

    pub fn volume(&self) -> f64 {
        self.size().iter().product()
    }

    pub fn contains(&self, p: &Point) -> bool {
        itertools::izip!(p.iter(), self.min_corner.iter(), self.max_corner.iter())
            .all(|(&coord, &min, &max)| (min..=max).contains(&coord))
    }

    /// All eight corners. Corner `i` takes the max coordinate on axis `k` iff bit `k` of `i` is set.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + ExactSizeIterator + Clone + '_ {
        (0..8_usize).map(move |combination| self.vertex(combination))
    }

    /// The twelve edges, as pairs of corners.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..8_usize).flat_map(move |combination| {
            Axis::ALL
                .into_iter()
                .map(|axis| 1 << axis.index())
                .filter(move |bit| combination & bit == 0)
                .map(move |bit| (self.vertex(combination), self.vertex(combination | bit)))
        })
    }

    fn vertex(&self, combination: usize) -> Point {
        let mut p = self.min_corner;
        for axis in Axis::ALL {
            if combination >> axis.index() & 1 == 1 {
                p[axis.index()] = self.max_corner[axis.index()];
            }
        }
        p
    }
}

impl Obstacle for BBox {
    #[inline]
    fn is_inside(&self, p: &Point) -> bool {
        self.contains(p)
    }

    fn bounding_box(&self) -> BBox {
        *self
    }
}

impl From<[f64; 6]> for BBox {
    fn from([x_min, x_max, y_min, y_max, z_min, z_max]: [f64; 6]) -> BBox {
        BBox::from_extents(x_min, x_max, y_min, y_max, z_min, z_max)
    }
}

impl From<BBox> for [f64; 6] {
    fn from(bbox: BBox) -> [f64; 6] {
        bbox.extents()
    }
}

/// Discrete segment-vs-obstacle test.
///
/// The segment is sampled at `floor(length / step) + 1` evenly spaced points, both endpoints
/// included. Obstacles thinner than `step` along the segment can slip between two samples and go
/// undetected; a smaller step trades speed for fewer missed collisions.
///
/// The count is capped at `MAX_COLLISION_SAMPLES`, so segments longer than
/// `MAX_COLLISION_SAMPLES * step` are sampled more coarsely than `step`. `RRTBuilder::validate`
/// keeps every segment a planner checks below that length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionChecker {
    step: f64,
}

impl CollisionChecker {
    /// Fails unless `step` is positive and finite.
    pub fn new(step: f64) -> Result<CollisionChecker> {
        if step > 0.0 && step.is_finite() {
            Ok(CollisionChecker { step })
        } else {
            Err(PlanError::CollisionStep(step))
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn sample_count(&self, a: &Point, b: &Point) -> usize {
        // The cast saturates on huge and infinite lengths and maps NaN to 0.
        let intervals = (distance(a, b) / self.step).floor() as usize;
        intervals.saturating_add(1).min(MAX_COLLISION_SAMPLES)
    }

    pub fn samples(&self, a: &Point, b: &Point) -> impl Iterator<Item = Point> {
        // A single sample cannot include both endpoints, so short segments get two.
        let last = (self.sample_count(a, b) - 1).max(1);
        let (a, ab) = (*a, b - a);
        (0..=last).map(move |i| a + ab * (i as f64 / last as f64))
    }

    pub fn point_is_free<O: Obstacle>(&self, p: &Point, obstacles: &[O]) -> bool {
        !obstacles.iter().any(|o| o.is_inside(p))
    }

    pub fn segment_is_free<O: Obstacle>(&self, a: &Point, b: &Point, obstacles: &[O]) -> bool {
        self.samples(a, b).all(|p| self.point_is_free(&p, obstacles))
    }
}

impl Default for CollisionChecker {
    fn default() -> Self {
        CollisionChecker {
            step: DEFAULT_COLLISION_STEP,
        }
    }
}

/// `segment_is_free` with the default collision step.
pub fn segment_is_free<O: Obstacle>(a: &Point, b: &Point, obstacles: &[O]) -> bool {
    CollisionChecker::default().segment_is_free(a, b, obstacles)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn unit_box() -> BBox {
        BBox::from_extents(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn closed_bounds() {
        let b = unit_box();
        assert!(b.is_inside(&point(0.5, 0.5, 0.5)));
        assert!(b.is_inside(&point(0.0, 0.0, 0.0)));
        assert!(b.is_inside(&point(1.0, 0.3, 1.0)));
        assert!(!b.is_inside(&point(1.0 + 1e-9, 0.3, 0.3)));
        assert!(!b.is_inside(&point(-0.1, 0.5, 0.5)));
    }

    #[test]
    fn six_scalar_layout() {
        let b = BBox::from([0.0, 10.0, 5.0, 6.0, 0.0, 10.0]);
        assert_eq!(b.min_corner, point(0.0, 5.0, 0.0));
        assert_eq!(b.max_corner, point(10.0, 6.0, 10.0));
        assert_eq!(<[f64; 6]>::from(b), [0.0, 10.0, 5.0, 6.0, 0.0, 10.0]);
        assert_relative_eq!(b.volume(), 100.0);
        assert_eq!(b.center(), point(5.0, 5.5, 5.0));
    }

    #[test]
    fn malformed_axes() {
        assert_eq!(unit_box().malformed_axis(), None);
        assert_eq!(
            BBox::from_extents(0.0, 1.0, 2.0, 1.0, 0.0, 1.0).malformed_axis(),
            Some(Axis::Y)
        );
        assert_eq!(
            BBox::from_extents(0.0, 1.0, 0.0, 1.0, f64::NAN, 1.0).malformed_axis(),
            Some(Axis::Z)
        );
        // Flat boxes are fine.
        assert_eq!(BBox::from_extents(1.0, 1.0, 0.0, 1.0, 0.0, 1.0).malformed_axis(), None);
    }

    #[test]
    fn cube_and_enclosing() {
        let c = BBox::cube(point(1.0, 2.0, 3.0), 0.5);
        assert_eq!(c.extents(), [0.5, 1.5, 1.5, 2.5, 2.5, 3.5]);

        let e = BBox::enclosing(&point(3.0, -1.0, 2.0), &point(0.0, 4.0, 2.0)).padded(1.0);
        assert_eq!(e.extents(), [-1.0, 4.0, -2.0, 5.0, 1.0, 3.0]);
    }

    #[test]
    fn vertices_and_edges() {
        let b = unit_box();
        assert_eq!(b.vertices().len(), 8);
        assert!(b.vertices().all(|v| b.is_inside(&v)));

        let edges: Vec<_> = b.edges().collect();
        assert_eq!(edges.len(), 12);
        for (p, q) in edges {
            assert_relative_eq!(distance(&p, &q), 1.0);
        }
    }

    #[test]
    fn sample_count_and_endpoints() {
        let checker = CollisionChecker::default();
        let a = point(0.0, 0.0, 0.0);
        let b = point(2.0, 0.0, 0.0);
        assert_eq!(checker.sample_count(&a, &b), 5);

        let samples: Vec<_> = checker.samples(&a, &b).collect();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0], a);
        assert_eq!(samples[4], b);
        assert_relative_eq!(samples[1].x, 0.5);

        // Shorter than one step: still both endpoints.
        let c = point(0.2, 0.0, 0.0);
        assert_eq!(checker.sample_count(&a, &c), 1);
        let samples: Vec<_> = checker.samples(&a, &c).collect();
        assert_eq!(samples, vec![a, c]);
    }

    #[test]
    fn segment_through_box_collides() {
        let obstacles = [BBox::from_extents(0.0, 10.0, 5.0, 6.0, 0.0, 10.0)];
        assert!(!segment_is_free(&point(5.0, 0.0, 5.0), &point(5.0, 10.0, 5.0), &obstacles));
        assert!(segment_is_free(&point(5.0, 0.0, 5.0), &point(5.0, 4.0, 5.0), &obstacles));
    }

    #[test]
    fn touching_a_face_collides() {
        let obstacles = [unit_box()];
        // Only the end point touches the face at x = 0.
        assert!(!segment_is_free(&point(-1.0, 0.5, 0.5), &point(0.0, 0.5, 0.5), &obstacles));
        // Only the start point touches it.
        assert!(!segment_is_free(&point(0.0, 0.5, 0.5), &point(-0.3, 0.5, 0.5), &obstacles));
    }

    #[test]
    fn thin_obstacles_can_be_missed() {
        let obstacles = [BBox::from_extents(0.6, 0.7, -1.0, 1.0, -1.0, 1.0)];
        let a = point(0.0, 0.0, 0.0);
        let b = point(1.0, 0.0, 0.0);

        // Samples at x = 0, 0.5, 1 straddle the slab.
        assert!(CollisionChecker::new(0.5).unwrap().segment_is_free(&a, &b, &obstacles));
        assert!(!CollisionChecker::new(0.05).unwrap().segment_is_free(&a, &b, &obstacles));
    }

    #[test]
    fn rejects_degenerate_steps() {
        assert_eq!(CollisionChecker::new(0.0), Err(PlanError::CollisionStep(0.0)));
        assert_eq!(CollisionChecker::new(-0.5), Err(PlanError::CollisionStep(-0.5)));
        assert_eq!(
            CollisionChecker::new(f64::INFINITY),
            Err(PlanError::CollisionStep(f64::INFINITY))
        );
        assert!(matches!(
            CollisionChecker::new(f64::NAN),
            Err(PlanError::CollisionStep(_))
        ));
        assert_eq!(CollisionChecker::new(0.5).unwrap(), CollisionChecker::default());
    }

    #[test]
    fn sample_count_is_capped() {
        let checker = CollisionChecker::default();
        let a = point(0.0, 0.0, 0.0);

        let far = point(1e20, 0.0, 0.0);
        assert_eq!(checker.sample_count(&a, &far), MAX_COLLISION_SAMPLES);
        assert_eq!(checker.samples(&a, &far).count(), MAX_COLLISION_SAMPLES);
        assert!(segment_is_free(&a, &far, &[BBox::cube(point(0.0, 5.0, 0.0), 0.5)]));

        let unbounded = point(f64::INFINITY, 0.0, 0.0);
        assert_eq!(checker.sample_count(&a, &unbounded), MAX_COLLISION_SAMPLES);

        let undefined = point(f64::NAN, 0.0, 0.0);
        assert_eq!(checker.sample_count(&a, &undefined), 1);
    }

    #[test]
    fn degenerate_segment() {
        let obstacles = [unit_box()];
        let p = point(2.0, 2.0, 2.0);
        assert!(segment_is_free(&p, &p, &obstacles));
        let q = point(0.5, 0.5, 0.5);
        assert!(!segment_is_free(&q, &q, &obstacles));
    }

    #[test]
    fn dyn_obstacles() {
        let obstacles: Vec<Box<dyn Obstacle>> = vec![Box::new(unit_box())];
        assert!(obstacles[0].is_inside(&point(0.5, 0.5, 0.5)));
        assert_eq!(obstacles[0].bounding_box(), unit_box());
    }

    #[test]
    fn serde_as_six_scalars() {
        let b: BBox = serde_json::from_str("[2.0, 3.5, 2.0, 3.5, 2.0, 3.5]").unwrap();
        assert_eq!(b, BBox::from_extents(2.0, 3.5, 2.0, 3.5, 2.0, 3.5));
        assert_eq!(serde_json::to_string(&b).unwrap(), "[2.0,3.5,2.0,3.5,2.0,3.5]");
    }
}
