//! The external-geometric-primitive boundary.
//!
//! Everything this engine needs from "a 2-D geometry library" is isolated
//! here. `union`/`difference`/`xor`/`covered_by`/`intersects` delegate to
//! `geo`'s boolean-operations and relate machinery. `signed_area`,
//! `squared_distance` and `self_intersections` are small enough, and narrow
//! enough in contract, that we reimplement them directly rather than reach
//! for `geo`'s more general (and more expensive) equivalents.

use geo::{BooleanOps, Covers, Intersects};
use geo_types::{Coord, LineString, MultiPolygon, Polygon};

/// Signed planar area of a ring via the shoelace formula. Positive for
/// counterclockwise rings, negative for clockwise, independent of whether
/// the ring happens to be closed (the implicit closing edge is included).
pub(crate) fn signed_area(ring: &LineString<f64>) -> f64 {
    let coords = &ring.0;
    if coords.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for window in coords.windows(2) {
        let (a, b) = (window[0], window[1]);
        sum += a.x * b.y - b.x * a.y;
    }
    // Close the loop if the caller passed an already-closed ring, the last
    // edge is a zero-length no-op; if not closed, this is the closing edge.
    let (first, last) = (coords[0], coords[coords.len() - 1]);
    sum += last.x * first.y - first.x * last.y;
    sum / 2.0
}

/// Squared euclidean distance; used only to order pseudo-vertices along a
/// segment, so exactness beyond "consistent ordering" is not required.
pub(crate) fn squared_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    dx * dx + dy * dy
}

/// A single proper or tangential crossing between two non-adjacent segments
/// of the same ring.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Turn {
    pub point: Coord<f64>,
    pub seg_a: usize,
    pub seg_b: usize,
}

/// All self-crossings of a closed ring's non-adjacent segments.
///
/// `ring` must already be closed (first point == last point). Segment `i`
/// runs from `ring[i]` to `ring[i + 1]`; there are `ring.0.len() - 1`
/// segments. Adjacency is cyclic: segment `0` and the last segment share
/// the ring's start/end point and are not compared.
pub(crate) fn self_intersections(ring: &LineString<f64>) -> Vec<Turn> {
    let coords = &ring.0;
    if coords.len() < 4 {
        return Vec::new();
    }
    let segment_count = coords.len() - 1;
    let mut turns = Vec::new();

    for i in 0..segment_count {
        for j in (i + 1)..segment_count {
            if are_cyclically_adjacent(i, j, segment_count) {
                continue;
            }
            let (p1, p2) = (coords[i], coords[i + 1]);
            let (p3, p4) = (coords[j], coords[j + 1]);
            for point in segment_intersection(p1, p2, p3, p4) {
                turns.push(Turn {
                    point,
                    seg_a: i,
                    seg_b: j,
                });
            }
        }
    }
    turns
}

fn are_cyclically_adjacent(i: usize, j: usize, segment_count: usize) -> bool {
    i == j || (j == i + 1) || (i == 0 && j == segment_count - 1)
}

/// Intersection point(s) of two segments, including degenerate collinear
/// overlap (reported as its two overlap endpoints). Proper crossings and
/// endpoint touches yield exactly one point.
fn segment_intersection(p1: Coord<f64>, p2: Coord<f64>, p3: Coord<f64>, p4: Coord<f64>) -> Vec<Coord<f64>> {
    let d1 = Coord { x: p2.x - p1.x, y: p2.y - p1.y };
    let d2 = Coord { x: p4.x - p3.x, y: p4.y - p3.y };
    let denom = cross(d1, d2);

    if denom != 0.0 {
        let diff = Coord { x: p3.x - p1.x, y: p3.y - p1.y };
        let t = cross(diff, d2) / denom;
        let u = cross(diff, d1) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            return vec![Coord {
                x: p1.x + t * d1.x,
                y: p1.y + t * d1.y,
            }];
        }
        return Vec::new();
    }

    // Parallel. Collinear only if p3 also lies on the line through p1,p2.
    let diff = Coord { x: p3.x - p1.x, y: p3.y - p1.y };
    if cross(diff, d1) != 0.0 {
        return Vec::new();
    }

    // Collinear: project onto the dominant axis to find the overlap interval.
    let along = |p: Coord<f64>| -> f64 {
        if d1.x.abs() >= d1.y.abs() {
            p.x
        } else {
            p.y
        }
    };
    let (lo1, hi1) = order2(along(p1), along(p2));
    let (lo2, hi2) = order2(along(p3), along(p4));
    let lo = lo1.max(lo2);
    let hi = hi1.min(hi2);
    if lo > hi {
        return Vec::new();
    }

    let param = |target: f64| -> f64 {
        let span = along(p2) - along(p1);
        if span == 0.0 {
            0.0
        } else {
            (target - along(p1)) / span
        }
    };
    let at = |t: f64| Coord {
        x: p1.x + t * d1.x,
        y: p1.y + t * d1.y,
    };
    let start = at(param(lo));
    let end = at(param(hi));
    if start == end {
        vec![start]
    } else {
        vec![start, end]
    }
}

fn order2(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn cross(a: Coord<f64>, b: Coord<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

pub(crate) fn union(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    a.union(b)
}

pub(crate) fn difference(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    a.difference(b)
}

pub(crate) fn symmetric_difference(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    a.xor(b)
}

pub(crate) fn intersects(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
    a.intersects(b)
}

/// True iff `a`'s closure lies within `b`'s closure (boundary touches allowed).
pub(crate) fn covered_by(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
    b.covers(a)
}

pub(crate) fn singleton(ring: LineString<f64>) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![Polygon::new(ring, vec![])])
}

/// Total filled area of a multi-polygon (each member's exterior less its
/// holes), used only as a sort key when ordering regions by size.
pub(crate) fn area(mp: &MultiPolygon<f64>) -> f64 {
    mp.0.iter()
        .map(|p| {
            let exterior = signed_area(p.exterior()).abs();
            let holes: f64 = p.interiors().iter().map(|h| signed_area(h).abs()).sum();
            exterior - holes
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn signed_area_ccw_square_is_positive() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 0., y: 0. },
        ]);
        assert_eq!(signed_area(&ring), 100.0);
    }

    #[test]
    fn signed_area_cw_square_is_negative() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 0., y: 10. },
            coord! { x: 10., y: 10. },
            coord! { x: 10., y: 0. },
            coord! { x: 0., y: 0. },
        ]);
        assert_eq!(signed_area(&ring), -100.0);
    }

    #[test]
    fn figure_eight_has_one_crossing() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 10., y: 0. },
            coord! { x: 0., y: 0. },
        ]);
        let turns = self_intersections(&ring);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].point, coord! { x: 5., y: 5. });
    }

    #[test]
    fn simple_square_has_no_crossings() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 0., y: 0. },
        ]);
        assert!(self_intersections(&ring).is_empty());
    }
}
