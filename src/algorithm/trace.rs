//! Ring tracer: walks the pseudo-vertex graph, draining start keys,
//! and emits every simple sub-ring it closes onto along the way.

use std::ops::Bound::{Excluded, Unbounded};

use geo_types::LineString;
use log::trace;

use super::pseudo_vertex::{PseudoVertexGraph, PseudoVertexKey};
use crate::primitives::signed_area;

/// Trace `graph` into its simple sub-rings, discarding any whose area
/// doesn't clear `spike_threshold`. `original` is the sanitized ring the
/// graph was built from; it is used verbatim when the ring has no
/// self-intersections at all.
pub fn trace_rings(
    mut graph: PseudoVertexGraph,
    original: &LineString<f64>,
    spike_threshold: f64,
) -> Vec<LineString<f64>> {
    if graph.start_keys.is_empty() {
        let area = signed_area(original);
        return if original.0.len() >= 4 && area.abs() > spike_threshold {
            vec![original.clone()]
        } else {
            Vec::new()
        };
    }

    let mut output = Vec::new();
    // A cursor visits each pseudo-vertex key at most once before the walk
    // it's part of closes, so no single sub-ring walk can exceed this.
    let max_steps = graph.vertices.len() + 1;

    while let Some(&start_key) = graph.start_keys.iter().next() {
        let mut new_ring = Vec::new();
        let mut cursor_key = start_key;
        let mut steps = 0usize;
        let mut closed = false;

        loop {
            steps += 1;
            debug_assert!(
                steps <= max_steps,
                "ring tracer failed to close within the graph's size"
            );
            if steps > max_steps {
                // Should be unreachable given a correctly built graph; bail
                // out of this walk rather than spin forever on bad input.
                break;
            }

            let vertex = graph.vertices[&cursor_key];
            trace!("cursor {:?} -> {:?}", cursor_key, vertex.point);

            if new_ring.last() != Some(&vertex.point) {
                new_ring.push(vertex.point);
            }
            graph.start_keys.remove(&cursor_key);

            if let Some(idx) = new_ring[..new_ring.len() - 1]
                .iter()
                .position(|p| *p == vertex.point)
            {
                new_ring.drain(..idx);
                closed = true;
                break;
            }

            cursor_key = if cursor_key.reroute {
                vertex.link.expect("reroute pseudo-vertex must have a link")
            } else {
                next_key(&graph, cursor_key)
            };
        }

        if !closed {
            continue;
        }

        let sub_ring = LineString::new(new_ring);
        let area = signed_area(&sub_ring);
        if area.abs() > spike_threshold {
            output.push(sub_ring);
        }
    }

    output
}

/// The next key in the graph's total order after `key`, wrapping from the
/// last key back to the first.
fn next_key(graph: &PseudoVertexGraph, key: PseudoVertexKey) -> PseudoVertexKey {
    graph
        .vertices
        .range((Excluded(key), Unbounded))
        .next()
        .map(|(k, _)| *k)
        .unwrap_or_else(|| *graph.vertices.keys().next().expect("graph is non-empty"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::self_intersections::find_self_intersections;
    use geo_types::coord;

    #[test]
    fn simple_square_traces_to_itself() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 0., y: 0. },
        ]);
        let graph = find_self_intersections(&ring);
        let rings = trace_rings(graph, &ring, 0.0);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0], ring);
    }

    #[test]
    fn figure_eight_traces_to_two_triangles() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 10., y: 0. },
            coord! { x: 0., y: 0. },
        ]);
        let graph = find_self_intersections(&ring);
        let rings = trace_rings(graph, &ring, 0.0);
        assert_eq!(rings.len(), 2);
        let total_area: f64 = rings.iter().map(|r| signed_area(r).abs()).sum();
        assert!((total_area - 50.0).abs() < 1e-9);
    }

    #[test]
    fn below_threshold_spike_is_discarded() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 0., y: 0. },
        ]);
        let graph = find_self_intersections(&ring);
        let rings = trace_rings(graph, &ring, 1e6);
        assert!(rings.is_empty());
    }
}
