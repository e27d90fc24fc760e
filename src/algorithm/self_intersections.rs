//! Self-intersection finder: turns a sanitized ring into a
//! pseudo-vertex graph plus the set of candidate start keys for tracing.

use geo_types::LineString;
use log::debug;

use super::pseudo_vertex::{PseudoVertex, PseudoVertexGraph, PseudoVertexKey};
use crate::primitives::{self, squared_distance};

/// Build the pseudo-vertex graph for a closed, sanitized ring.
///
/// Step 1 seeds one pseudo-vertex per original vertex. Step 2 asks the
/// external self-intersection primitive for every proper/tangential
/// crossing of non-adjacent segments. Step 3 injects four pseudo-vertices
/// per crossing (two non-reroute, two reroute) and registers both
/// non-reroute keys as start keys.
pub fn find_self_intersections(ring: &LineString<f64>) -> PseudoVertexGraph {
    let mut graph = PseudoVertexGraph::new();

    if ring.0.len() < 2 {
        return graph;
    }

    // Step 1: seed with the original polyline.
    for (i, point) in ring.0.iter().enumerate() {
        graph.insert(
            PseudoVertexKey::new(i, i, 0.0, false),
            PseudoVertex {
                point: *point,
                link: None,
            },
        );
    }

    // Step 2: find crossings.
    let turns = primitives::self_intersections(ring);
    debug!("found {} self-intersection turn(s)", turns.len());

    // Step 3: inject crossings.
    for turn in turns {
        let i = turn.seg_a.min(turn.seg_b);
        let j = turn.seg_a.max(turn.seg_b);
        let point = turn.point;

        let off_i = squared_distance(point, ring.0[i]);
        let off_j = squared_distance(point, ring.0[j]);

        let key_i = PseudoVertexKey::new(i, j, off_i, false);
        let key_j = PseudoVertexKey::new(j, i, off_j, false);

        graph.insert(
            PseudoVertexKey::new(i, j, off_i, true),
            PseudoVertex {
                point,
                link: Some(key_j),
            },
        );
        graph.insert(key_j, PseudoVertex { point, link: None });

        graph.insert(
            PseudoVertexKey::new(j, i, off_j, true),
            PseudoVertex {
                point,
                link: Some(key_i),
            },
        );
        graph.insert(key_i, PseudoVertex { point, link: None });

        graph.start_keys.insert(key_i);
        graph.start_keys.insert(key_j);
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn simple_ring_has_no_start_keys() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 0., y: 0. },
        ]);
        let graph = find_self_intersections(&ring);
        assert!(graph.start_keys.is_empty());
        assert_eq!(graph.vertices.len(), 5);
    }

    #[test]
    fn figure_eight_has_four_start_keys() {
        let ring = LineString::new(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 10., y: 0. },
            coord! { x: 0., y: 0. },
        ]);
        let graph = find_self_intersections(&ring);
        // One crossing => 4 injected pseudo-vertices, 2 of them start keys.
        assert_eq!(graph.start_keys.len(), 2);
        assert_eq!(graph.vertices.len(), 5 + 4);
    }
}
