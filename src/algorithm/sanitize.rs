//! Ring sanitizer: drop invalid vertices, close the ring, fix
//! orientation. The only failure mode is collapsing to an empty ring, which
//! is not an error — it just contributes nothing downstream.

use std::collections::HashSet;

use geo_types::{Coord, LineString};

use crate::config::Order;
use crate::primitives::signed_area;

const MIN_DISTINCT_POINTS: usize = 3;

/// Sanitize `ring` for the given outer-ring `order` (callers repairing a
/// hole pass `order.opposite()`). Returns an empty `LineString` if fewer
/// than three distinct points remain.
pub fn sanitize_ring(ring: &LineString<f64>, order: Order) -> LineString<f64> {
    let mut coords = remove_invalid_vertices(ring);
    close(&mut coords);

    if distinct_point_count(&coords) < MIN_DISTINCT_POINTS {
        return LineString::new(Vec::new());
    }

    let mut ring = LineString::new(coords);
    orient(&mut ring, order);
    ring
}

fn remove_invalid_vertices(ring: &LineString<f64>) -> Vec<Coord<f64>> {
    ring.0
        .iter()
        .copied()
        .filter(|c| c.x.is_finite() && c.y.is_finite())
        .collect()
}

fn close(coords: &mut Vec<Coord<f64>>) {
    match (coords.first(), coords.last()) {
        (Some(&first), Some(&last)) if first != last => coords.push(first),
        _ => {}
    }
}

fn distinct_point_count(coords: &[Coord<f64>]) -> usize {
    let mut seen = HashSet::with_capacity(coords.len());
    for c in coords {
        seen.insert((c.x.to_bits(), c.y.to_bits()));
    }
    seen.len()
}

fn orient(ring: &mut LineString<f64>, order: Order) {
    let area = signed_area(ring);
    if !order.matches_area(area) {
        ring.0.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn closes_an_open_ring() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
        ]);
        let sanitized = sanitize_ring(&ring, Order::CounterClockwise);
        assert_eq!(sanitized.0.first(), sanitized.0.last());
    }

    #[test]
    fn reverses_wrong_orientation() {
        let cw_square = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 0., y: 10. },
            coord! { x: 10., y: 10. },
            coord! { x: 10., y: 0. },
            coord! { x: 0., y: 0. },
        ]);
        let sanitized = sanitize_ring(&cw_square, Order::CounterClockwise);
        assert!(signed_area(&sanitized) > 0.0);
    }

    #[test]
    fn drops_nan_vertices() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: f64::NAN, y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 0., y: 0. },
        ]);
        let sanitized = sanitize_ring(&ring, Order::CounterClockwise);
        assert!(sanitized.0.iter().all(|c| c.x.is_finite() && c.y.is_finite()));
        assert_eq!(sanitized.0.len(), 5);
    }

    #[test]
    fn collapses_degenerate_ring_to_empty() {
        let point = coord! { x: 3., y: 3. };
        let ring = LineString::new(vec![point, point, point]);
        let sanitized = sanitize_ring(&ring, Order::CounterClockwise);
        assert!(sanitized.0.is_empty());
    }

    #[test]
    fn two_point_ring_collapses_to_empty() {
        let ring = LineString::new(vec![coord! { x: 0., y: 0. }, coord! { x: 1., y: 1. }]);
        let sanitized = sanitize_ring(&ring, Order::CounterClockwise);
        assert!(sanitized.0.is_empty());
    }

    #[test]
    fn empty_ring_stays_empty() {
        let ring = LineString::new(Vec::<Coord<f64>>::new());
        let sanitized = sanitize_ring(&ring, Order::CounterClockwise);
        assert!(sanitized.0.is_empty());
    }
}
